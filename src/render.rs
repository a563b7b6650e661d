use crate::sim::FireworkShow;
use crossterm::{
    cursor, queue,
    style::{Print, ResetColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) glyph: char,
    pub(crate) colour: Option<u8>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            colour: None,
        }
    }
}

pub(crate) struct Canvas {
    pub(crate) w: usize,
    pub(crate) h: usize,
    pub(crate) cells: Vec<Cell>,
}

impl Canvas {
    pub(crate) fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); w * h],
        }
    }

    pub(crate) fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }

    /// Rows joined by `\n`. Coloured glyphs carry their own 256-colour
    /// escape and a reset, so cells never bleed into each other.
    pub(crate) fn to_ansi(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 2);
        for y in 0..self.h {
            if y > 0 {
                out.push('\n');
            }
            let row = &self.cells[self.idx(0, y)..self.idx(0, y + 1)];
            for cell in row {
                match cell.colour {
                    Some(c) if cell.glyph != ' ' => {
                        out.push_str(&format!("\x1b[38;5;{}m", c));
                        out.push(cell.glyph);
                        out.push_str("\x1b[0m");
                    }
                    _ => out.push(cell.glyph),
                }
            }
        }
        out
    }
}

impl FireworkShow {
    /// Composite the live sparks into a text frame. Only the glyph draw
    /// touches the random source; the simulation itself is not mutated.
    pub(crate) fn render(&mut self) -> String {
        let mut canvas = Canvas::new(self.width(), self.height());

        for i in 0..self.particles().len() {
            let p = self.particles()[i];
            if p.x < 0.0 || p.y < 0.0 {
                continue;
            }
            let glyph = self.glyph();
            canvas.set(
                p.x as usize,
                p.y as usize,
                Cell {
                    glyph,
                    colour: Some(p.colour),
                },
            );
        }

        canvas.to_ansi()
    }
}

/// Where finished frames go.
pub(crate) trait FrameSink {
    fn begin(&mut self) -> io::Result<()>;
    /// `index` is zero-based; `total` is the length of the show.
    fn present(&mut self, frame: &str, index: u32, total: u32) -> io::Result<()>;
    fn finish(&mut self) -> io::Result<()>;
}

/// Full-screen redraws on an ANSI terminal, paced by a fixed sleep.
pub(crate) struct TerminalSink<W: Write> {
    out: W,
    interval: Duration,
}

impl<W: Write> TerminalSink<W> {
    pub(crate) fn new(out: W, interval: Duration) -> Self {
        Self { out, interval }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for TerminalSink<W> {
    fn begin(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        self.out.flush()
    }

    fn present(&mut self, frame: &str, index: u32, total: u32) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            Print(frame),
            Print(format!("\n\nFrame {}/{}", index + 1, total))
        )?;
        self.out.flush()?;
        if !self.interval.is_zero() {
            std::thread::sleep(self.interval);
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            ResetColor,
            Print("\nThanks for watching the show!\n\n")
        )?;
        self.out.flush()
    }
}
