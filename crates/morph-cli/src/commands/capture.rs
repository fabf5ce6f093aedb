//! Capture command - record guide points from typed commands
//!
//! One command per line:
//!
//! - `x y` records a point on the current image
//! - `d` finishes the current image (source, then destination)
//! - `p` / `s` print the source / destination point counts
//! - `q` quits without writing anything
//!
//! Once both images are done the points are written to the `.dat` files
//! next to the images.

use crate::CaptureArgs;
use anyhow::{Context, Result, bail};
use morph_core::{CaptureSession, CaptureStage, RecordOutcome};
use morph_io::lines_path_for;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tracing::{debug, warn};

/// What the input loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run(args: CaptureArgs, verbose: u8) -> Result<()> {
    let source = super::load_image(&args.source)?;
    let dest = super::load_image(&args.dest)?;
    let bounds = [source.dimensions(), dest.dimensions()];

    let mut session = CaptureSession::new();
    let mut stdout = io::stdout();

    writeln!(
        stdout,
        "Marking {} ({}x{}). Enter `x y`, `d` when done.",
        args.source.display(),
        source.width(),
        source.height()
    )?;

    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script: {}", path.display()))?;
            drive(&mut session, BufReader::new(file), &mut stdout, bounds)?;
        }
        None => {
            let stdin = io::stdin();
            drive(&mut session, stdin.lock(), &mut stdout, bounds)?;
        }
    }

    if !session.is_ready() {
        bail!(
            "Capture stopped while {}; no guide points written",
            session.stage()
        );
    }

    let source_path = lines_path_for(&args.source);
    let dest_path = lines_path_for(&args.dest);
    let lines = session
        .into_line_set()
        .context("Captured points do not form line pairs")?;

    super::save_points(&source_path, &lines.source_points())?;
    super::save_points(&dest_path, &lines.dest_points())?;

    if verbose > 0 {
        println!("Saved: {}", source_path.display());
        println!("Saved: {}", dest_path.display());
    }
    println!("{} line pair(s) captured", lines.len());
    Ok(())
}

/// Feeds every input line to the session until `q`, end of input or the
/// session is ready.
fn drive<R: BufRead, W: Write>(
    session: &mut CaptureSession,
    input: R,
    out: &mut W,
    bounds: [(u32, u32); 2],
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read capture input")?;
        if apply_command(session, line.trim(), out, bounds)? == Flow::Quit {
            break;
        }
        if session.is_ready() {
            break;
        }
    }
    Ok(())
}

fn apply_command<W: Write>(
    session: &mut CaptureSession,
    command: &str,
    out: &mut W,
    bounds: [(u32, u32); 2],
) -> Result<Flow> {
    match command.to_ascii_lowercase().as_str() {
        "" => {}
        "q" => return Ok(Flow::Quit),
        "p" => writeln!(out, "Number: {}", session.source_points().len())?,
        "s" => writeln!(out, "Number: {}", session.dest_points().len())?,
        "d" => {
            writeln!(out, "-------------")?;
            match session.advance_stage() {
                CaptureStage::CapturingDestination => {
                    writeln!(out, "Lines: {}", session.source_points().len() / 2)?;
                }
                stage => debug!(%stage, "capture finished"),
            }
        }
        other => match parse_point(other) {
            Some((x, y)) => record(session, x, y, out, bounds)?,
            None => warn!(command = other, "unknown capture command"),
        },
    }
    Ok(Flow::Continue)
}

fn record<W: Write>(
    session: &mut CaptureSession,
    x: f64,
    y: f64,
    out: &mut W,
    bounds: [(u32, u32); 2],
) -> Result<()> {
    let (width, height) = match session.stage() {
        CaptureStage::CapturingSource => bounds[0],
        _ => bounds[1],
    };
    if x < 0.0 || y < 0.0 || x >= f64::from(width) || y >= f64::from(height) {
        warn!(x, y, width, height, "point lies outside the image");
    }

    match session.record_point(x, y) {
        RecordOutcome::Source(_) | RecordOutcome::Destination(_) => {
            writeln!(out, "({x}, {y})")?;
        }
        RecordOutcome::Rejected => warn!(x, y, "capture already complete; point ignored"),
    }
    Ok(())
}

fn parse_point(command: &str) -> Option<(f64, f64)> {
    let mut parts = command
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(f64::is_finite(x) && f64::is_finite(y)) {
        return None;
    }
    Some((x, y))
}
