use rand::Rng;

use crate::devices::{Input, Output};
use crate::opcode::Opcode;
use crate::operations::{self, Cost};
use crate::state::State;

/// A decoded Chip-8 instruction.
///
/// `x` and `y` are register indices, `nn` a byte literal, `nnn` an address and
/// `n` a sprite height.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    Cls,
    /// `000E` jump to the address in I
    Jpi,
    /// `00EE`
    Rts,
    /// `1nnn`
    Jump(u16),
    /// `2nnn`
    Call(u16),
    /// `3xnn`
    Ske(usize, u8),
    /// `4xnn`
    Skne(usize, u8),
    /// `5xy0`
    Skre(usize, usize),
    /// `6xnn`
    Load(usize, u8),
    /// `7xnn`
    Add(usize, u8),
    /// `8xy0`
    Mv(usize, usize),
    /// `8xy1`
    Or(usize, usize),
    /// `8xy2`
    And(usize, usize),
    /// `8xy3`
    Xor(usize, usize),
    /// `8xy4`
    Addr(usize, usize),
    /// `8xy5`
    Sub(usize, usize),
    /// `8xy6`
    Shr(usize),
    /// `8xy7`
    Subn(usize, usize),
    /// `8xyE`
    Shl(usize),
    /// `9xy0`
    Skrne(usize, usize),
    /// `Annn`
    Loadi(u16),
    /// `Bnnn`
    Jumpi(u16),
    /// `Cxnn`
    Rand(usize, u8),
    /// `Dxyn`
    Draw(usize, usize, u8),
    /// `Ex9E`
    Skpr(usize),
    /// `ExA1`
    Skup(usize),
    /// `Fx07`
    Moved(usize),
    /// `Fx0A`
    Keyd(usize),
    /// `Fx15`
    Loads(usize),
    /// `Fx18`
    Ld(usize),
    /// `Fx1E`
    Addi(usize),
    /// `Fx29`
    Ldspr(usize),
    /// `Fx33`
    Bcd(usize),
    /// `Fx55`
    Stor(usize),
    /// `Fx65`
    Read(usize),
    /// Anything else; executes as a free no-op
    Unknown(u16),
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode.
    ///
    /// Only groups 0, 8, E and F look past the first nibble;
    /// `5xyn` and `9xyn` ignore their last nibble.
    pub fn from_op(op: u16) -> Self {
        let (x, y) = (op.x(), op.y());
        match op.nibbles() {
            (0x0, _, 0xE, 0x0) => Instruction::Cls,
            (0x0, _, 0x0, 0xE) => Instruction::Jpi,
            (0x0, _, 0xE, 0xE) => Instruction::Rts,
            (0x1, ..) => Instruction::Jump(op.nnn()),
            (0x2, ..) => Instruction::Call(op.nnn()),
            (0x3, ..) => Instruction::Ske(x, op.nn()),
            (0x4, ..) => Instruction::Skne(x, op.nn()),
            (0x5, ..) => Instruction::Skre(x, y),
            (0x6, ..) => Instruction::Load(x, op.nn()),
            (0x7, ..) => Instruction::Add(x, op.nn()),
            (0x8, .., 0x0) => Instruction::Mv(x, y),
            (0x8, .., 0x1) => Instruction::Or(x, y),
            (0x8, .., 0x2) => Instruction::And(x, y),
            (0x8, .., 0x3) => Instruction::Xor(x, y),
            (0x8, .., 0x4) => Instruction::Addr(x, y),
            (0x8, .., 0x5) => Instruction::Sub(x, y),
            (0x8, .., 0x6) => Instruction::Shr(x),
            (0x8, .., 0x7) => Instruction::Subn(x, y),
            (0x8, .., 0xE) => Instruction::Shl(x),
            (0x9, ..) => Instruction::Skrne(x, y),
            (0xA, ..) => Instruction::Loadi(op.nnn()),
            (0xB, ..) => Instruction::Jumpi(op.nnn()),
            (0xC, ..) => Instruction::Rand(x, op.nn()),
            (0xD, ..) => Instruction::Draw(x, y, op.n()),
            (0xE, _, 0x9, 0xE) => Instruction::Skpr(x),
            (0xE, _, 0xA, 0x1) => Instruction::Skup(x),
            (0xF, _, 0x0, 0x7) => Instruction::Moved(x),
            (0xF, _, 0x0, 0xA) => Instruction::Keyd(x),
            (0xF, _, 0x1, 0x5) => Instruction::Loads(x),
            (0xF, _, 0x1, 0x8) => Instruction::Ld(x),
            (0xF, _, 0x1, 0xE) => Instruction::Addi(x),
            (0xF, _, 0x2, 0x9) => Instruction::Ldspr(x),
            (0xF, _, 0x3, 0x3) => Instruction::Bcd(x),
            (0xF, _, 0x5, 0x5) => Instruction::Stor(x),
            (0xF, _, 0x6, 0x5) => Instruction::Read(x),
            _ => Instruction::Unknown(op),
        }
    }

    /// Runs the instruction against `state`, returning the next state and the
    /// instruction's cost in abstract microseconds.
    ///
    /// `input`, `output` and `rng` are only touched by the instructions that
    /// need them.
    pub fn execute<I, O, R>(self, state: &State, input: &I, output: &mut O, rng: &mut R) -> (State, Cost)
    where
        I: Input,
        O: Output,
        R: Rng + ?Sized,
    {
        match self {
            Instruction::Cls => operations::cls(state, output),
            Instruction::Jpi => operations::jpi(state),
            Instruction::Rts => operations::rts(state),
            Instruction::Jump(nnn) => operations::jump(state, nnn),
            Instruction::Call(nnn) => operations::call(state, nnn),
            Instruction::Ske(x, nn) => operations::ske(state, x, nn),
            Instruction::Skne(x, nn) => operations::skne(state, x, nn),
            Instruction::Skre(x, y) => operations::skre(state, x, y),
            Instruction::Load(x, nn) => operations::load(state, x, nn),
            Instruction::Add(x, nn) => operations::add(state, x, nn),
            Instruction::Mv(x, y) => operations::mv(state, x, y),
            Instruction::Or(x, y) => operations::or(state, x, y),
            Instruction::And(x, y) => operations::and(state, x, y),
            Instruction::Xor(x, y) => operations::xor(state, x, y),
            Instruction::Addr(x, y) => operations::addr(state, x, y),
            Instruction::Sub(x, y) => operations::sub(state, x, y),
            Instruction::Shr(x) => operations::shr(state, x),
            Instruction::Subn(x, y) => operations::subn(state, x, y),
            Instruction::Shl(x) => operations::shl(state, x),
            Instruction::Skrne(x, y) => operations::skrne(state, x, y),
            Instruction::Loadi(nnn) => operations::loadi(state, nnn),
            Instruction::Jumpi(nnn) => operations::jumpi(state, nnn),
            Instruction::Rand(x, nn) => operations::rand(state, x, nn, rng),
            Instruction::Draw(x, y, n) => operations::draw(state, x, y, n, output),
            Instruction::Skpr(x) => operations::skpr(state, x, input),
            Instruction::Skup(x) => operations::skup(state, x, input),
            Instruction::Moved(x) => operations::moved(state, x),
            Instruction::Keyd(x) => operations::keyd(state, x, input),
            Instruction::Loads(x) => operations::loads(state, x),
            Instruction::Ld(x) => operations::ld(state, x),
            Instruction::Addi(x) => operations::addi(state, x),
            Instruction::Ldspr(x) => operations::ldspr(state, x),
            Instruction::Bcd(x) => operations::bcd(state, x),
            Instruction::Stor(x) => operations::stor(state, x),
            Instruction::Read(x) => operations::read(state, x),
            Instruction::Unknown(_) => (*state, 0),
        }
    }
}
