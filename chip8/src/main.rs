use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use chip8vm_core::Chip8;

use crate::keymap::Layout;

mod keymap;
mod run;

/// Runs a Chip-8 ROM in a window.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Size multiplier for each pixel
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=40))]
    scale: u32,

    /// Host keys that stand in for the hexadecimal keypad
    #[arg(short, long, value_enum, default_value_t = Layout::Qwerty)]
    layout: Layout,

    /// Seed for the random number generator, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // Load ROM
    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open ROM {}", args.rom.display()))?;
    let mut reader = BufReader::new(file);
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };
    chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load ROM {}", args.rom.display()))?;
    info!("successfully loaded ROM {}", args.rom.display());

    run::run(chip8, args.scale, args.layout)
}
