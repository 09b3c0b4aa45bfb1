//! One function per Chip-8 operation.
//!
//! Every operation takes the current `State` and returns the next one together
//! with its cost: the rough number of microseconds the instruction took on a
//! COSMAC VIP. Costs only pace execution; they never change what an
//! instruction does.
//!
//! The program counter has already been moved past the instruction by the time
//! an operation runs, so skips add 2 and retries subtract 2.

use log::debug;
use rand::Rng;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT, SPRITE_SHEET_ADDR};
use crate::devices::{Input, Output};
use crate::state::State;

/// Abstract microseconds spent executing an instruction
pub type Cost = u32;

const CLEAR_COST: Cost = 109;
const JUMP_COST: Cost = 105;
const JUMP_INDEX_COST: Cost = 1;
const SKIP_COST: Cost = 55;
const SKIP_REGISTER_NE_COST: Cost = 73;
/// Charged on top of a skip's cost when the skip is not taken
const NO_SKIP_PENALTY: Cost = 9;
const LOAD_COST: Cost = 27;
const ADD_COST: Cost = 45;
const ALU_COST: Cost = 200;
const LOAD_INDEX_COST: Cost = 55;
const RANDOM_COST: Cost = 164;
const DRAW_COST: Cost = 22_734;
const KEY_SKIP_COST: Cost = 73;
const TIMER_COST: Cost = 45;
const KEY_FOUND_COST: Cost = 1;
/// Zero so that a frame spent waiting ends right away
const KEY_WAIT_COST: Cost = 0;
const ADD_INDEX_COST: Cost = 86;
const GLYPH_COST: Cost = 91;
const BCD_COST: Cost = 927;
const TRANSFER_COST: Cost = 605;
const TRANSFER_COST_PER_REGISTER: Cost = 64;

fn skip_if(state: &State, condition: bool) -> State {
    if condition {
        State {
            pc: state.pc.wrapping_add(0x2),
            ..*state
        }
    } else {
        *state
    }
}

/// Falling through costs more than skipping
fn skip_cost(condition: bool, cost: Cost) -> Cost {
    if condition {
        cost
    } else {
        cost + NO_SKIP_PENALTY
    }
}

fn conditional_skip(state: &State, condition: bool, cost: Cost) -> (State, Cost) {
    (skip_if(state, condition), skip_cost(condition, cost))
}

fn with_vx(state: &State, x: usize, value: u8) -> State {
    let mut v = state.v;
    v[x] = value;
    State { v, ..*state }
}

/// Vx = value; VF = flag
/// The flag is written last so it wins when x is F
fn with_vx_and_flag(state: &State, x: usize, value: u8, flag: bool) -> State {
    let mut v = state.v;
    v[x] = value;
    v[0xF] = u8::from(flag);
    State { v, ..*state }
}

/// clear
pub fn cls<O: Output>(state: &State, output: &mut O) -> (State, Cost) {
    output.clear();
    (*state, CLEAR_COST)
}

/// PC = I
pub fn jpi(state: &State) -> (State, Cost) {
    (State { pc: state.i, ..*state }, JUMP_INDEX_COST)
}

/// PC = STACK.pop()
pub fn rts(state: &State) -> (State, Cost) {
    let mut next = *state;
    match next.pop() {
        Some(address) => next.pc = address,
        None => debug!("return with an empty stack at {:#05X}", state.pc),
    }
    (next, JUMP_COST)
}

/// PC = addr
pub fn jump(state: &State, addr: u16) -> (State, Cost) {
    (State { pc: addr, ..*state }, JUMP_COST)
}

/// STACK.push(PC); PC = addr
pub fn call(state: &State, addr: u16) -> (State, Cost) {
    let mut next = *state;
    if next.push(state.pc) {
        next.pc = addr;
    } else {
        debug!("call to {:#05X} with a full stack", addr);
    }
    (next, JUMP_COST)
}

/// if Vx == nn then pc += 2
pub fn ske(state: &State, x: usize, nn: u8) -> (State, Cost) {
    conditional_skip(state, state.v[x] == nn, SKIP_COST)
}

/// if Vx != nn then pc += 2
pub fn skne(state: &State, x: usize, nn: u8) -> (State, Cost) {
    conditional_skip(state, state.v[x] != nn, SKIP_COST)
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &State, x: usize, y: usize) -> (State, Cost) {
    conditional_skip(state, state.v[x] == state.v[y], SKIP_COST)
}

/// Vx = nn
pub fn load(state: &State, x: usize, nn: u8) -> (State, Cost) {
    (with_vx(state, x, nn), LOAD_COST)
}

/// Vx += nn
/// Add nn to Vx; allow for overflow but implicitly drop it, VF is untouched
pub fn add(state: &State, x: usize, nn: u8) -> (State, Cost) {
    (with_vx(state, x, state.v[x].wrapping_add(nn)), ADD_COST)
}

/// Vx = Vy
pub fn mv(state: &State, x: usize, y: usize) -> (State, Cost) {
    (with_vx(state, x, state.v[y]), ALU_COST)
}

/// Vx |= Vy
pub fn or(state: &State, x: usize, y: usize) -> (State, Cost) {
    (with_vx(state, x, state.v[x] | state.v[y]), ALU_COST)
}

/// Vx &= Vy
pub fn and(state: &State, x: usize, y: usize) -> (State, Cost) {
    (with_vx(state, x, state.v[x] & state.v[y]), ALU_COST)
}

/// Vx ^= Vy
pub fn xor(state: &State, x: usize, y: usize) -> (State, Cost) {
    (with_vx(state, x, state.v[x] ^ state.v[y]), ALU_COST)
}

/// Vx += Vy; VF = overflow
pub fn addr(state: &State, x: usize, y: usize) -> (State, Cost) {
    let (res, over) = state.v[x].overflowing_add(state.v[y]);
    (with_vx_and_flag(state, x, res, over), ALU_COST)
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(state: &State, x: usize, y: usize) -> (State, Cost) {
    let (vx, vy) = (state.v[x], state.v[y]);
    (with_vx_and_flag(state, x, vx.wrapping_sub(vy), vx > vy), ALU_COST)
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(state: &State, x: usize) -> (State, Cost) {
    let vx = state.v[x];
    (with_vx_and_flag(state, x, vx >> 1, vx & 0x1 == 0x1), ALU_COST)
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(state: &State, x: usize, y: usize) -> (State, Cost) {
    let (vx, vy) = (state.v[x], state.v[y]);
    (with_vx_and_flag(state, x, vy.wrapping_sub(vx), vy > vx), ALU_COST)
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(state: &State, x: usize) -> (State, Cost) {
    let vx = state.v[x];
    (with_vx_and_flag(state, x, vx << 1, vx & 0x80 == 0x80), ALU_COST)
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &State, x: usize, y: usize) -> (State, Cost) {
    conditional_skip(state, state.v[x] != state.v[y], SKIP_REGISTER_NE_COST)
}

/// I = addr
pub fn loadi(state: &State, addr: u16) -> (State, Cost) {
    (State { i: addr, ..*state }, LOAD_INDEX_COST)
}

/// PC = V0 + addr
pub fn jumpi(state: &State, addr: u16) -> (State, Cost) {
    (
        State {
            pc: addr.wrapping_add(u16::from(state.v[0x0])),
            ..*state
        },
        JUMP_COST,
    )
}

/// Vx = rand_byte & nn
pub fn rand<R: Rng + ?Sized>(state: &State, x: usize, nn: u8, rng: &mut R) -> (State, Cost) {
    let rand_byte: u8 = rng.gen();
    (with_vx(state, x, rand_byte & nn), RANDOM_COST)
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs an 8 pixel wide sprite from memory i..i+n onto the output.
///
/// The left edge wraps to `Vx % 64` but nothing else does: columns past the
/// right edge and rows past the bottom are clipped.
/// VF is left alone even when a set pixel is erased.
pub fn draw<O: Output>(state: &State, x: usize, y: usize, n: u8, output: &mut O) -> (State, Cost) {
    let left = state.v[x] as usize % DISPLAY_WIDTH;
    let top = state.v[y] as usize;

    for line in 0..n as usize {
        let row = top + line;
        if row >= DISPLAY_HEIGHT {
            break;
        }
        let sprite = state.memory.get(state.i.wrapping_add(line as u16));
        for bit in 0..8 {
            let col = left + bit;
            if col >= DISPLAY_WIDTH {
                break;
            }
            if sprite & (0x80 >> bit) != 0 {
                output.flip(row * DISPLAY_WIDTH + col);
            }
        }
    }
    output.set_dirty(true);

    (*state, DRAW_COST)
}

/// if Vx.pressed then pc += 2
pub fn skpr<I: Input>(state: &State, x: usize, input: &I) -> (State, Cost) {
    (skip_if(state, input.is_pressed(state.v[x])), KEY_SKIP_COST)
}

/// if !Vx.pressed then pc += 2
pub fn skup<I: Input>(state: &State, x: usize, input: &I) -> (State, Cost) {
    (skip_if(state, !input.is_pressed(state.v[x])), KEY_SKIP_COST)
}

/// Vx = DT
pub fn moved(state: &State, x: usize) -> (State, Cost) {
    (with_vx(state, x, state.delay_timer), TIMER_COST)
}

/// Vx = first key released since the last poll
/// With no such key the instruction is retried on the next frame at no cost.
pub fn keyd<I: Input>(state: &State, x: usize, input: &I) -> (State, Cost) {
    match (0..KEY_COUNT).find(|&key| input.released_since_last_poll(key)) {
        Some(key) => (with_vx(state, x, key), KEY_FOUND_COST),
        None => (
            State {
                pc: state.pc.wrapping_sub(0x2),
                ..*state
            },
            KEY_WAIT_COST,
        ),
    }
}

/// DT = Vx
pub fn loads(state: &State, x: usize) -> (State, Cost) {
    (
        State {
            delay_timer: state.v[x],
            ..*state
        },
        TIMER_COST,
    )
}

/// ST = Vx
pub fn ld(state: &State, x: usize) -> (State, Cost) {
    (
        State {
            sound_timer: state.v[x],
            ..*state
        },
        TIMER_COST,
    )
}

/// I += Vx
pub fn addi(state: &State, x: usize) -> (State, Cost) {
    (
        State {
            i: state.i.wrapping_add(u16::from(state.v[x])),
            ..*state
        },
        ADD_INDEX_COST,
    )
}

/// I = SPRITE_SHEET_ADDR + Vx
/// Offsets by one byte per value rather than one glyph
pub fn ldspr(state: &State, x: usize) -> (State, Cost) {
    (
        State {
            i: SPRITE_SHEET_ADDR + u16::from(state.v[x]),
            ..*state
        },
        GLYPH_COST,
    )
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &State, x: usize) -> (State, Cost) {
    let vx = state.v[x];
    let mut memory = state.memory;
    memory.set(state.i, vx / 100);
    memory.set(state.i.wrapping_add(1), vx / 10 % 10);
    memory.set(state.i.wrapping_add(2), vx % 10);
    (State { memory, ..*state }, BCD_COST)
}

fn transfer_cost(x: usize) -> Cost {
    TRANSFER_COST + TRANSFER_COST_PER_REGISTER * x as Cost
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &State, x: usize) -> (State, Cost) {
    let mut memory = state.memory;
    for (offset, &value) in state.v[..=x].iter().enumerate() {
        memory.set(state.i.wrapping_add(offset as u16), value);
    }
    (State { memory, ..*state }, transfer_cost(x))
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &State, x: usize) -> (State, Cost) {
    let mut v = state.v;
    for (offset, register) in v[..=x].iter_mut().enumerate() {
        *register = state.memory.get(state.i.wrapping_add(offset as u16));
    }
    (State { v, ..*state }, transfer_cost(x))
}
