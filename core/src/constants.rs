use std::time::Duration;

/// Number of addressable bytes.
pub const MEMORY_SIZE: usize = 0x1000;

/// Where programs are loaded and where the program counter starts.
pub const PROGRAM_START: u16 = 0x200;

/// The largest program that fits between `PROGRAM_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const REGISTER_COUNT: usize = 16;
pub const STACK_SIZE: usize = 16;

/// Index of VF, the carry/borrow/collision flag.
pub const FLAG_REGISTER: usize = 0xF;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Sprites are always a single byte wide.
pub const SPRITE_WIDTH: usize = 8;

/// The timers count down at 60Hz.
pub const TIMER_HZ: u32 = 60;
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TIMER_HZ as u64);

/// Instructions executed per tick unless configured otherwise.
/// 18 * 60Hz ~= 1kHz, which most programs are happy with.
pub const DEFAULT_SPEED: u32 = 18;

pub const FONT_START: usize = 0x000;
pub const FONT_GLYPH_SIZE: usize = 5;

/// # Sprite Sheet
/// Hex digits 0..F, 5 bytes each, 4 pixels wide.
/// ```text
/// 0        1        2        3
/// ████     ..█.     ████     ████
/// █..█     .██.     ...█     ...█
/// █..█     ..█.     ████     ████
/// █..█     ..█.     █...     ...█
/// ████     .███     ████     ████
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
