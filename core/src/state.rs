use crate::constants::{
    FONT_START, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET,
    STACK_SIZE,
};
use crate::error::{Chip8Error, Result};
use crate::frame::FrameBuffer;
use crate::opcode::Opcode;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry flag
/// - (i) a 16-bit memory address register; only the low 12 bits address memory
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) an 8-bit stack pointer; the number of occupied stack slots
///
/// Timers
/// - 2 8-bit timers (delay & sound) that count down to 0 at 60Hz
///
/// ## Memory
/// - 16 slot stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the hex digit sprite sheet
///     - 0x200..0x1000 holds the program
/// - 64x32 frame buffer
///
/// ## Input
/// - Execution halts while `register_needing_key` is Some register
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub register_needing_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[FONT_START..FONT_START + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: FrameBuffer::new(),
            register_needing_key: None,
        }
    }

    /// Puts everything back the way `new` left it, including the font.
    pub fn reset(&mut self) {
        *self = State::new();
    }

    /// Copies a program into memory at 0x200.
    ///
    /// Programs that don't fit are rejected outright; memory is untouched.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// Addresses past the end of memory wrap around to the start.
    pub fn read_byte(&self, address: u16) -> u8 {
        self.memory[address as usize % MEMORY_SIZE]
    }

    pub fn write_byte(&mut self, address: u16, value: u8) {
        self.memory[address as usize % MEMORY_SIZE] = value;
    }

    /// Reads the big-endian opcode at the program counter.
    pub fn fetch(&self) -> Opcode {
        Opcode::from_be_bytes(self.read_byte(self.pc), self.read_byte(self.pc.wrapping_add(1)))
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
