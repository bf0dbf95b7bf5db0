pub use chip8::{Chip8, Status};
pub use config::Config;
pub use error::{Chip8Error, Result};
pub use frame::FrameBuffer;
pub use keypad::Keypad;
pub use peripherals::{Screen, Speaker};
pub use scheduler::Scheduler;
pub use state::State;

mod chip8;
mod config;
pub mod constants;
mod error;
mod frame;
mod instruction;
mod keypad;
mod opcode;
mod operations;
mod peripherals;
mod scheduler;
pub mod state;
