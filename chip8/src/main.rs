use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use chip8_core::constants::FRAME_BUDGET;
use chip8_core::{Chip8, Config, FrameBuffer, Keypad, ToneFlag};
use chip8_display::DEFAULT_SCALE;

mod keymap;
mod run;

/// A cost-paced Chip-8 interpreter
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the ROM to run
    rom: PathBuf,

    /// Size multiplier for each pixel
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    scale: u32,

    /// Abstract microseconds of instruction cost executed per frame
    #[arg(long, default_value_t = FRAME_BUDGET)]
    frame_budget: u32,

    /// Run without a window and print the final frame as text
    #[arg(long)]
    headless: bool,

    /// Number of frames to run in headless mode
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Seed the random number generator for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = Config {
        frame_budget: args.frame_budget,
        seed: args.seed,
    };
    let mut chip8: run::Machine = Chip8::with_config(Keypad::new(), FrameBuffer::new(), ToneFlag::new(), config);

    let file = File::open(&args.rom).with_context(|| format!("unable to open {}", args.rom.display()))?;
    chip8
        .load_rom(&mut BufReader::new(file))
        .with_context(|| format!("unable to load {}", args.rom.display()))?;

    if args.headless {
        print!("{}", run::headless(&mut chip8, args.frames));
    } else {
        run::run(&mut chip8, args.scale)?;
    }
    Ok(())
}
