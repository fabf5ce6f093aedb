//! linemorph - feature-line guided image morphing
//!
//! Marks corresponding lines on two images, then renders the in-between
//! frames with Beier-Neely field morphing.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "linemorph")]
#[command(author, version, about = "Feature-line guided image morphing")]
#[command(long_about = "
Morphs one image into another using corresponding guide lines.

Guide points live next to each image as a .dat file (face.png -> face.dat),
one `x y` pair per line; consecutive pairs form a line.

Examples:
  linemorph capture alice.png bob.png          # mark lines, writes .dat files
  linemorph render alice.png bob.png out/m 30 params.txt
  linemorph render a.jpg b.jpg m 10 -a 0.1 -b 2 -p 0
  linemorph -j 4 -vv render a.png b.png m 10 --source-lines a_v2.dat
  linemorph flip frame.png -o flipped.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a morph sequence to numbered PNG frames
    #[command(visible_alias = "r")]
    Render(RenderArgs),

    /// Record guide points from stdin and write the .dat files
    #[command(visible_alias = "c")]
    Capture(CaptureArgs),

    /// Write a vertically flipped copy of an image
    Flip(FlipArgs),
}

/// Arguments for the `render` command.
#[derive(Args)]
struct RenderArgs {
    /// Source image (frame alpha 1)
    source: PathBuf,

    /// Destination image (frame alpha 0)
    dest: PathBuf,

    /// Output prefix; frame i is written to <PREFIX><i>.png
    output_prefix: String,

    /// Number of frames
    frames: usize,

    /// Parameter file with `a b [p]`
    params: Option<PathBuf>,

    /// Source guide points (default: SOURCE with .dat extension)
    #[arg(long)]
    source_lines: Option<PathBuf>,

    /// Destination guide points (default: DEST with .dat extension)
    #[arg(long)]
    dest_lines: Option<PathBuf>,

    /// Distance softening `a` (overrides the parameter file)
    #[arg(short = 'a', long)]
    a: Option<f64>,

    /// Distance falloff `b` (overrides the parameter file)
    #[arg(short = 'b', long)]
    b: Option<f64>,

    /// Length dominance `p` (overrides the parameter file)
    #[arg(short = 'p', long)]
    p: Option<f64>,

    /// Also write the guide points next to both images
    #[arg(long)]
    save_lines: bool,
}

/// Arguments for the `capture` command.
#[derive(Args)]
struct CaptureArgs {
    /// Source image
    source: PathBuf,

    /// Destination image
    dest: PathBuf,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

/// Arguments for the `flip` command.
#[derive(Args)]
struct FlipArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Render(args) => commands::render::run(args, cli.verbose),
        Commands::Capture(args) => commands::capture::run(args, cli.verbose),
        Commands::Flip(args) => commands::flip::run(args, cli.verbose),
    }
}
