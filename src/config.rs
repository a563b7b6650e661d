use crate::error::ConfigError;
use clap::Parser;
use crossterm::terminal;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const FALLBACK_SIZE: (u16, u16) = (80, 24);
const MIN_WIDTH: usize = 40;
const MIN_HEIGHT: usize = 15;

#[derive(Parser, Debug)]
#[command(name = "fireworks")]
#[command(about = "Render dazzling ASCII fireworks.", long_about = None)]
pub(crate) struct Args {
    /// number of frames to render
    #[arg(long, default_value_t = 200)]
    pub(crate) frames: u32,

    /// delay between frames in seconds
    #[arg(long, default_value = "0.06", value_parser = parse_interval)]
    pub(crate) interval: Duration,

    /// canvas size as WIDTHxHEIGHT, or 'auto' to fit the terminal
    #[arg(long, default_value = "auto", value_parser = parse_size)]
    pub(crate) size: SizeArg,

    /// random seed for a reproducible show
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SizeArg {
    Auto,
    Fixed { width: usize, height: usize },
}

pub(crate) fn parse_size(s: &str) -> Result<SizeArg, ConfigError> {
    let text = s.trim().to_ascii_lowercase();
    if text == "auto" {
        return Ok(SizeArg::Auto);
    }

    let invalid = || ConfigError::InvalidSize(s.to_string());
    let (w, h) = text.split_once('x').ok_or_else(invalid)?;
    let width: usize = w.trim().parse().map_err(|_| invalid())?;
    let height: usize = h.trim().parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok(SizeArg::Fixed { width, height })
}

pub(crate) fn parse_interval(s: &str) -> Result<Duration, ConfigError> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidInterval(s.to_string()))?;
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidInterval(s.to_string()))
}

/// Canvas size for a show. `auto` asks the terminal, keeps a one-cell
/// border so the frame never wraps, and never goes below 40x15.
pub(crate) fn resolve_size(size: SizeArg) -> (usize, usize) {
    match size {
        SizeArg::Fixed { width, height } => (width, height),
        SizeArg::Auto => {
            let (cols, rows) = terminal::size().unwrap_or(FALLBACK_SIZE);
            fit_terminal(cols, rows)
        }
    }
}

fn fit_terminal(cols: u16, rows: u16) -> (usize, usize) {
    (
        (cols as usize).saturating_sub(1).max(MIN_WIDTH),
        (rows as usize).saturating_sub(1).max(MIN_HEIGHT),
    )
}

pub(crate) fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0xC0FFEE_u64)
}
