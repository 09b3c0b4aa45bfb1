use crate::constants::{PROGRAM_START, REGISTER_COUNT, STACK_DEPTH};
use crate::memory::Memory;

/// A snapshot of the Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack, 0..=16
///
/// Timers
/// - 2 8-bit timers (delay & sound)
/// - both are decremented once per frame and stop at 0
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
///
/// The frame buffer and keypad are not part of the state; they are reached
/// through the `Output` and `Input` capabilities.
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: Memory,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory: Memory::with_font(),
        }
    }

    /// Push a return address; ignored once the stack is full.
    /// Returns whether the address was pushed.
    pub fn push(&mut self, address: u16) -> bool {
        match self.stack.get_mut(self.sp as usize) {
            Some(slot) => {
                *slot = address;
                self.sp += 1;
                true
            }
            None => false,
        }
    }

    /// Pop a return address; `None` once the stack is empty.
    pub fn pop(&mut self) -> Option<u16> {
        if self.sp == 0 {
            return None;
        }
        self.sp -= 1;
        Some(self.stack[self.sp as usize])
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
