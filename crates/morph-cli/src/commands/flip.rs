//! Flip command - vertical flip

use crate::FlipArgs;
use anyhow::Result;
use tracing::debug;

pub fn run(args: FlipArgs, verbose: u8) -> Result<()> {
    let image = super::load_image(&args.input)?;
    debug!(width = image.width(), height = image.height(), "flipping");

    super::save_image(&args.output, &image.flip_vertical())?;

    if verbose > 0 {
        println!("Saved: {}", args.output.display());
    }
    Ok(())
}
