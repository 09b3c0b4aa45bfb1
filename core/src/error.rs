use std::io;

use thiserror::Error;

/// Everything that can go wrong outside of the fetch/execute loop.
///
/// Faults inside the loop (unknown opcodes, stack over/underflow) are absorbed
/// by the interpreter and never surface here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to read ROM")]
    Io(#[from] io::Error),

    #[error("ROM is {size} bytes but only {capacity} bytes fit in memory")]
    RomTooLarge { size: usize, capacity: usize },

    #[error("{len} bytes at {address:#05X} would run past the end of memory")]
    OutOfRange { address: u16, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
