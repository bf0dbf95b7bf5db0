//! One function per instruction.
//!
//! Every operation receives the state *after* the program counter has moved
//! past the instruction and returns the state to commit, so an operation that
//! fails leaves nothing half-written.

use rand::{Rng, RngCore};

use crate::constants::{FLAG_REGISTER, FONT_GLYPH_SIZE, FONT_START, STACK_SIZE};
use crate::error::{Chip8Error, Result};
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::state::State;

/// Everything an instruction may consult besides the machine state.
pub struct Context<'a> {
    pub keypad: &'a Keypad,
    pub rng: &'a mut dyn RngCore,
    pub wrap_y: bool,
}

pub type Operation = fn(op: Opcode, state: &State, ctx: &mut Context) -> Result<State>;

/// The address the executing instruction was fetched from.
fn instruction_address(state: &State) -> u16 {
    state.pc.wrapping_sub(2)
}

fn skip_if(condition: bool, state: &State) -> State {
    let pc = if condition {
        state.pc.wrapping_add(0x2)
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// Writes VF first and then Vx, so that when x is F the result wins.
fn set_with_flag(state: &State, x: u8, result: u8, flag: u8) -> State {
    let mut v = state.v;
    v[FLAG_REGISTER] = flag;
    v[x as usize] = result;
    State { v, ..*state }
}

/// clear
pub fn clr(_op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let mut frame_buffer = state.frame_buffer;
    frame_buffer.clear();
    Ok(State {
        frame_buffer,
        ..*state
    })
}

/// PC = STACK.pop()
pub fn ret(_op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    if state.sp == 0 {
        return Err(Chip8Error::StackUnderflow {
            pc: instruction_address(state),
        });
    }
    let sp = state.sp - 0x1;
    Ok(State {
        pc: state.stack[sp as usize],
        sp,
        ..*state
    })
}

/// PC = nnn
pub fn jump(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    Ok(State {
        pc: op.nnn(),
        ..*state
    })
}

/// STACK.push(PC); PC = nnn
pub fn call(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    if state.sp as usize >= STACK_SIZE {
        return Err(Chip8Error::StackOverflow {
            pc: instruction_address(state),
            sp: state.sp,
        });
    }
    let mut stack = state.stack;
    stack[state.sp as usize] = state.pc;
    Ok(State {
        pc: op.nnn(),
        sp: state.sp + 0x1,
        stack,
        ..*state
    })
}

/// if Vx == kk then pc += 2
pub fn ske(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    Ok(skip_if(state.v[op.x() as usize] == op.kk(), state))
}

/// if Vx != kk then pc += 2
pub fn skne(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    Ok(skip_if(state.v[op.x() as usize] != op.kk(), state))
}

/// if Vx == Vy then pc += 2
pub fn skre(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    Ok(skip_if(
        state.v[op.x() as usize] == state.v[op.y() as usize],
        state,
    ))
}

/// Vx = kk
pub fn load(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let mut v = state.v;
    v[op.x() as usize] = op.kk();
    Ok(State { v, ..*state })
}

/// Vx += kk
/// Overflow wraps and VF is left alone
pub fn add(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let mut v = state.v;
    v[op.x() as usize] = v[op.x() as usize].wrapping_add(op.kk());
    Ok(State { v, ..*state })
}

/// Vx = Vy
pub fn mv(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let mut v = state.v;
    v[op.x() as usize] = v[op.y() as usize];
    Ok(State { v, ..*state })
}

/// Vx |= Vy
pub fn or(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let mut v = state.v;
    v[op.x() as usize] |= v[op.y() as usize];
    Ok(State { v, ..*state })
}

/// Vx &= Vy
pub fn and(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let mut v = state.v;
    v[op.x() as usize] &= v[op.y() as usize];
    Ok(State { v, ..*state })
}

/// Vx ^= Vy
pub fn xor(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let mut v = state.v;
    v[op.x() as usize] ^= v[op.y() as usize];
    Ok(State { v, ..*state })
}

/// Vx += Vy; VF = carry
pub fn addr(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let (res, carry) = state.v[op.x() as usize].overflowing_add(state.v[op.y() as usize]);
    Ok(set_with_flag(state, op.x(), res, carry as u8))
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let (vx, vy) = (state.v[op.x() as usize], state.v[op.y() as usize]);
    Ok(set_with_flag(state, op.x(), vx.wrapping_sub(vy), (vx > vy) as u8))
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let vx = state.v[op.x() as usize];
    Ok(set_with_flag(state, op.x(), vx >> 1, vx & 0x1))
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let (vx, vy) = (state.v[op.x() as usize], state.v[op.y() as usize]);
    Ok(set_with_flag(state, op.x(), vy.wrapping_sub(vx), (vy > vx) as u8))
}

/// Vx <<= 1; VF = Vx & 0x80
/// The flag is the masked bit itself (0x80), not 1
pub fn shl(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let vx = state.v[op.x() as usize];
    Ok(set_with_flag(state, op.x(), vx << 1, vx & 0x80))
}

/// if Vx != Vy then pc +=2
pub fn skrne(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    Ok(skip_if(
        state.v[op.x() as usize] != state.v[op.y() as usize],
        state,
    ))
}

/// I = nnn
pub fn loadi(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    Ok(State {
        i: op.nnn(),
        ..*state
    })
}

/// PC = V0 + nnn
/// The target wraps at 12 bits like every other address
pub fn jumpv0(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    Ok(State {
        pc: (op.nnn() + u16::from(state.v[0x0])) & 0x0FFF,
        ..*state
    })
}

/// Vx = rand_byte & kk
pub fn rnd(op: Opcode, state: &State, ctx: &mut Context) -> Result<State> {
    let rand_byte: u8 = ctx.rng.gen();
    let mut v = state.v;
    v[op.x() as usize] = rand_byte & op.kk();
    Ok(State { v, ..*state })
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position x, y on the FrameBuffer.
/// Sets VF if any pixels were erased
pub fn draw(op: Opcode, state: &State, ctx: &mut Context) -> Result<State> {
    let mut sprite = [0; 0xF];
    let height = op.n() as usize;
    for (row, byte) in sprite[..height].iter_mut().enumerate() {
        *byte = state.read_byte(state.i.wrapping_add(row as u16));
    }

    let mut frame_buffer = state.frame_buffer;
    let collision = frame_buffer.draw_sprite(
        state.v[op.y() as usize] as usize,
        state.v[op.x() as usize] as usize,
        &sprite[..height],
        ctx.wrap_y,
    );

    let mut v = state.v;
    v[FLAG_REGISTER] = collision as u8;
    Ok(State {
        v,
        frame_buffer,
        ..*state
    })
}

/// if Vx.pressed then pc += 2
pub fn skp(op: Opcode, state: &State, ctx: &mut Context) -> Result<State> {
    Ok(skip_if(ctx.keypad.is_pressed(state.v[op.x() as usize]), state))
}

/// if !Vx.pressed then pc += 2
pub fn sknp(op: Opcode, state: &State, ctx: &mut Context) -> Result<State> {
    Ok(skip_if(
        !ctx.keypad.is_pressed(state.v[op.x() as usize]),
        state,
    ))
}

/// Vx = DT
pub fn getdt(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let mut v = state.v;
    v[op.x() as usize] = state.delay_timer;
    Ok(State { v, ..*state })
}

/// await keypress for Vx
/// The dispatcher fills in Vx once a key goes down
pub fn waitkey(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    Ok(State {
        register_needing_key: Some(op.x()),
        ..*state
    })
}

/// DT = Vx
pub fn setdt(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    Ok(State {
        delay_timer: state.v[op.x() as usize],
        ..*state
    })
}

/// ST = Vx
pub fn setst(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    Ok(State {
        sound_timer: state.v[op.x() as usize],
        ..*state
    })
}

/// I += Vx
/// I only addresses 12 bits so the sum wraps there
pub fn addi(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    Ok(State {
        i: state.i.wrapping_add(u16::from(state.v[op.x() as usize])) & 0x0FFF,
        ..*state
    })
}

/// I = Vx * 5
/// Set I to the memory address of the font sprite for Vx
pub fn ldspr(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    Ok(State {
        i: (FONT_START + FONT_GLYPH_SIZE * state.v[op.x() as usize] as usize) as u16,
        ..*state
    })
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let vx = state.v[op.x() as usize];
    let mut next = *state;
    for (offset, digit) in [vx / 100 % 10, vx / 10 % 10, vx % 10].into_iter().enumerate() {
        next.write_byte(state.i.wrapping_add(offset as u16), digit);
    }
    Ok(next)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let mut next = *state;
    for reg in 0..=op.x() {
        next.write_byte(state.i.wrapping_add(u16::from(reg)), state.v[reg as usize]);
    }
    Ok(next)
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: Opcode, state: &State, _ctx: &mut Context) -> Result<State> {
    let mut v = state.v;
    for reg in 0..=op.x() {
        v[reg as usize] = state.read_byte(state.i.wrapping_add(u16::from(reg)));
    }
    Ok(State { v, ..*state })
}
