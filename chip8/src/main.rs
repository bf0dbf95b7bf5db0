use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use emu8_core::constants::DEFAULT_SPEED;
use emu8_core::Config;
use emu8_display::{ColorScheme, Rgb, DEFAULT_SCALE};

mod audio;
mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(name = "emu8", about = "Run a Chip-8 program in a window.")]
struct Args {
    /// ROM image to load.
    #[arg(value_name = "ROM")]
    rom: PathBuf,

    /// Instructions executed per 60Hz tick.
    #[arg(long, default_value_t = DEFAULT_SPEED, value_parser = clap::value_parser!(u32).range(1..))]
    speed: u32,

    /// Wrap sprites that run off the bottom of the screen back to the top.
    #[arg(long)]
    wrap_y: bool,

    /// black-white, white-black, grays, gameboy or blue-white.
    #[arg(long, default_value = "black-white")]
    color_scheme: ColorScheme,

    /// Lit pixel color as R,G,B (overrides the scheme).
    #[arg(long, value_name = "R,G,B")]
    foreground: Option<Rgb>,

    /// Unlit pixel color as R,G,B (overrides the scheme).
    #[arg(long, value_name = "R,G,B")]
    background: Option<Rgb>,

    /// Window pixels per Chip-8 pixel.
    #[arg(long, default_value_t = DEFAULT_SCALE, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// More logging; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let stderr_format = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(level(args.verbose));
    tracing_subscriber::registry().with(stderr_format).init();

    let config = Config {
        wrap_y: args.wrap_y,
        speed: args.speed,
    };
    let palette = args
        .color_scheme
        .palette()
        .with_foreground(args.foreground)
        .with_background(args.background);

    run::run(&args.rom, config, args.scale, palette)
}
