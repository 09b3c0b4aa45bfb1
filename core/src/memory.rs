use crate::constants::{MEMORY_SIZE, SPRITE_SHEET, SPRITE_SHEET_ADDR};
use crate::error::{Error, Result};

/// Single byte accesses are masked to the 12-bit address bus.
const ADDRESS_MASK: u16 = (MEMORY_SIZE - 1) as u16;

/// # Memory
/// 4096 bytes of addressable memory.
///
/// - `0x000..0x050` holds the sprite sheet
/// - `0x200..0x1000` holds the loaded ROM
///
/// Reads and writes of single bytes wrap around at 4096 so that a stray index
/// register can never index outside of the backing array.
/// Bulk loads that don't fit are rejected instead.
#[derive(Copy, Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory
    pub fn new() -> Self {
        Memory {
            bytes: [0; MEMORY_SIZE],
        }
    }

    /// Zeroed memory with the sprite sheet in place
    pub fn with_font() -> Self {
        let mut memory = Memory::new();
        let start = SPRITE_SHEET_ADDR as usize;
        memory.bytes[start..start + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        memory
    }

    /// Copy `data` into memory starting at `address`
    ///
    /// # Arguments
    /// * `address` where the first byte should be written
    /// * `data` the bytes to write
    pub fn load(&mut self, address: u16, data: &[u8]) -> Result<()> {
        let start = address as usize;
        let end = start + data.len();
        if end > MEMORY_SIZE {
            return Err(Error::OutOfRange {
                address,
                len: data.len(),
            });
        }
        self.bytes[start..end].copy_from_slice(data);
        Ok(())
    }

    pub fn get(&self, address: u16) -> u8 {
        self.bytes[(address & ADDRESS_MASK) as usize]
    }

    pub fn set(&mut self, address: u16, value: u8) {
        self.bytes[(address & ADDRESS_MASK) as usize] = value;
    }

    /// The big-endian word starting at `address`
    pub fn word(&self, address: u16) -> u16 {
        let left = u16::from(self.get(address));
        let right = u16::from(self.get(address.wrapping_add(1)));
        left << 8 | right
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
