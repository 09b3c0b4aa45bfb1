pub use chip8::{Chip8, Config};
pub use devices::{Input, Output, Speaker};
pub use error::{Error, Result};
pub use frame::FrameBuffer;
pub use instruction::Instruction;
pub use keypad::Keypad;
pub use memory::Memory;
pub use operations::Cost;
pub use state::State;
pub use tone::ToneFlag;

mod chip8;
pub mod constants;
mod devices;
mod error;
mod frame;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
pub mod state;
mod tone;
