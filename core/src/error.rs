use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("unknown instruction 0x{opcode:04X} at 0x{pc:03X}")]
    UnknownInstruction { opcode: u16, pc: u16 },
    #[error("stack overflow at 0x{pc:03X}: all {sp} return slots are in use")]
    StackOverflow { pc: u16, sp: u8 },
    #[error("stack underflow at 0x{pc:03X}: return with an empty call stack")]
    StackUnderflow { pc: u16 },
    #[error("program is {size} bytes but at most {max} fit in memory")]
    ProgramTooLarge { size: usize, max: usize },
    #[error("unable to load ROM from {}", path.display())]
    RomLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("speed must be at least one instruction per tick")]
    InvalidSpeed,
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
