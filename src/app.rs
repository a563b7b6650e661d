use crate::config::{clock_seed, resolve_size, Args};
use crate::model::ShowParams;
use crate::render::{FrameSink, TerminalSink};
use crate::sim::FireworkShow;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{stdout, BufWriter};

pub(crate) fn run() -> Result<()> {
    let args = Args::parse();

    let (width, height) = resolve_size(args.size);
    let seed = args.seed.unwrap_or_else(clock_seed);
    if args.seed.is_none() {
        eprintln!("fireworks: seed {seed} (pass --seed {seed} to replay)");
    }

    let show = FireworkShow::new(ShowParams::with_size(width, height), seed);
    let sink = TerminalSink::new(BufWriter::new(stdout()), args.interval);
    play(show, sink, args.frames).context("failed to draw fireworks")?;
    Ok(())
}

/// Drive the show for `frames` frames: step, render, hand off to the sink.
pub(crate) fn play<S: FrameSink>(mut show: FireworkShow, mut sink: S, frames: u32) -> Result<S> {
    sink.begin()?;
    for frame in 0..frames {
        show.step();
        let text = show.render();
        sink.present(&text, frame, frames)?;
    }
    sink.finish()?;
    Ok(sink)
}
