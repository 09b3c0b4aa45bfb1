use std::io::Read;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{FRAME_BUDGET, MAX_ROM_SIZE, PROGRAM_START};
use crate::devices::{Input, Output, Speaker};
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::operations::Cost;
use crate::state::State;

/// Knobs that change how a `Chip8` runs but not what its instructions do
#[derive(Copy, Clone, Debug)]
pub struct Config {
    /// Abstract microseconds of instruction cost spent per `tick`
    pub frame_budget: u32,
    /// Seed for `CXNN`; seeded from the OS when `None`
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            frame_budget: FRAME_BUDGET,
            seed: None,
        }
    }
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `input`, `output` and `speaker` capabilities it was built with
///  - the cost budget each frame gets (`frame_budget`)
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing the CPU by one instruction (`step`) or one frame (`tick`)
/// - reaching the capabilities so that a frontend can feed keys in and
///   present frames
pub struct Chip8<I: Input, O: Output, S: Speaker> {
    state: State,
    input: I,
    output: O,
    speaker: S,
    rng: StdRng,
    frame_budget: u64,
}

impl<I: Input, O: Output, S: Speaker> Chip8<I, O, S> {
    pub fn new(input: I, output: O, speaker: S) -> Self {
        Self::with_config(input, output, speaker, Config::default())
    }

    pub fn with_config(input: I, output: O, speaker: S, config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Chip8 {
            state: State::new(),
            input,
            output,
            speaker,
            rng,
            frame_budget: u64::from(config.frame_budget),
        }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE);
        reader.read_to_end(&mut rom)?;
        if rom.len() > MAX_ROM_SIZE {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                capacity: MAX_ROM_SIZE,
            });
        }
        self.state.memory.load(PROGRAM_START, &rom)?;
        info!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Advances the CPU by a single instruction
    /// - fetches the opcode at pc and moves pc past it
    /// - decodes and executes it
    ///
    /// Returns the instruction's cost.
    pub fn step(&mut self) -> Cost {
        let pc = self.state.pc;
        let op = self.state.memory.word(pc);
        self.state.pc = pc.wrapping_add(0x2);

        let instruction = Instruction::from_op(op);
        match instruction {
            Instruction::Unknown(_) => debug!("{:#05X}: unknown opcode {:04X}", pc, op),
            _ => trace!("{:#05X}: {:04X} {:?} v{:02X?} i{:04X}", pc, op, instruction, self.state.v, self.state.i),
        }

        let (state, cost) = instruction.execute(&self.state, &self.input, &mut self.output, &mut self.rng);
        self.state = state;
        cost
    }

    /// Advances the machine by one 60Hz frame
    /// - decrements both timers, switching the speaker on while the sound timer runs
    /// - executes instructions until the frame budget is spent
    ///
    /// Every frame starts from a full budget; nothing carries over. A zero cost
    /// instruction (waiting for a key, or an unknown opcode) ends the frame early.
    pub fn tick(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);

        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
            if !self.speaker.is_playing() {
                self.speaker.start();
            }
        } else if self.speaker.is_playing() {
            self.speaker.stop();
        }

        let mut spent: u64 = 0;
        loop {
            let cost = self.step();
            if cost == 0 {
                break;
            }
            spent += u64::from(cost);
            if spent >= self.frame_budget {
                break;
            }
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn speaker(&self) -> &S {
        &self.speaker
    }
}
