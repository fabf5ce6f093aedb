//! Render command - full morph sequence to numbered frames

use crate::RenderArgs;
use anyhow::{Context, Result, bail};
use morph_core::{LineSet, MorphParams};
use morph_io::{frame_path, lines_path_for};
use morph_ops::{BoxError, MorphInputs, MorphSequence};
use std::io::{self, BufRead, Write};
use tracing::info;

pub fn run(args: RenderArgs, verbose: u8) -> Result<()> {
    if args.frames == 0 {
        bail!("Frame count must be at least 1");
    }

    let source_lines = args
        .source_lines
        .clone()
        .unwrap_or_else(|| lines_path_for(&args.source));
    let dest_lines = args
        .dest_lines
        .clone()
        .unwrap_or_else(|| lines_path_for(&args.dest));

    let source_points = super::load_points(&source_lines)?;
    let dest_points = super::load_points(&dest_lines)?;
    let lines = LineSet::from_points(&source_points, &dest_points).with_context(|| {
        format!(
            "Guide points in {} and {} do not pair up",
            source_lines.display(),
            dest_lines.display()
        )
    })?;

    let params = resolve_params(&args)?;

    let source = super::load_image(&args.source)?;
    let dest = super::load_image(&args.dest)?;

    if args.save_lines {
        super::save_points(&lines_path_for(&args.source), &source_points)?;
        super::save_points(&lines_path_for(&args.dest), &dest_points)?;
    }

    let inputs = MorphInputs::new(&source, &dest, &lines, params)
        .context("Cannot morph these inputs")?;

    if verbose > 0 {
        println!(
            "Morphing {} -> {} ({}x{}, {} lines, {})",
            args.source.display(),
            args.dest.display(),
            source.width(),
            source.height(),
            lines.len(),
            params
        );
    }

    let report = MorphSequence::new(args.frames)
        .run(&inputs, |index: usize, alpha: f64, frame: &morph_core::PixelBuffer| {
            let path = frame_path(&args.output_prefix, index);
            morph_io::write(&path, frame)
                .map_err(|e| -> BoxError { format!("{}: {e}", path.display()).into() })?;
            info!(path = %path.display(), alpha, "frame saved");
            if verbose > 0 {
                println!("Frame {} complete: {}", index + 1, path.display());
            }
            Ok(())
        })
        .context("Morph failed")?;

    println!(
        "Wrote {} frame(s) to {}N.png in {:.2}s",
        report.frames_written,
        args.output_prefix,
        report.elapsed.as_secs_f64()
    );
    Ok(())
}

/// Parameter file first, then flag overrides, then prompts for the rest.
fn resolve_params(args: &RenderArgs) -> Result<MorphParams> {
    let from_file = match &args.params {
        Some(path) => Some(
            morph_io::read_params(path)
                .with_context(|| format!("Failed to read parameters: {}", path.display()))?,
        ),
        None => None,
    };

    let known = [
        args.a.or(from_file.map(|p| p.a)),
        args.b.or(from_file.map(|p| p.b)),
        args.p.or(from_file.map(|p| p.p)),
    ];

    let [a, b, p] = if let [Some(a), Some(b), Some(p)] = known {
        [a, b, p]
    } else {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        prompt_missing(known, &mut stdin.lock(), &mut stdout)?
    };

    Ok(MorphParams::new(a, b, p)?)
}

/// Asks for every value still missing from `known`.
fn prompt_missing<R: BufRead, W: Write>(
    known: [Option<f64>; 3],
    input: &mut R,
    output: &mut W,
) -> Result<[f64; 3]> {
    let mut values = [0.0; 3];
    let mut asked = false;
    for (slot, (value, name)) in values.iter_mut().zip(known.into_iter().zip(["a", "b", "p"])) {
        *slot = match value {
            Some(v) => v,
            None => {
                if !asked {
                    writeln!(output, "Choose the parameter values")?;
                    asked = true;
                }
                prompt_value(name, input, output)?
            }
        };
    }
    Ok(values)
}

fn prompt_value<R: BufRead, W: Write>(name: &str, input: &mut R, output: &mut W) -> Result<f64> {
    loop {
        write!(output, "{name}: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("No value given for parameter {name}");
        }
        match line.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => writeln!(output, "'{}' is not a number", line.trim())?,
        }
    }
}
