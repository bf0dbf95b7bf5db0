use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::error::{Chip8Error, Result};
use crate::frame::FrameBuffer;
use crate::instruction::from_op;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::operations::Context;
use crate::state::State;

/// What the CPU will do on its next cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// Fetch and execute the instruction at the program counter.
    Running,
    /// Parked on `Fx0A` until a key goes down; the key code lands in `register`.
    AwaitingKey { register: u8 },
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `keypad` with public interfaces for manipulating it
///  - the random number source used by `Cxkk`
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU and its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    keypad: Keypad,
    config: Config,
    rng: StdRng,
}

impl Chip8 {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// A machine whose random numbers are reproducible.
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            keypad: Keypad::new(),
            config,
            rng,
        }
    }

    /// Starts a new session: memory, registers, timers and screen are wiped.
    pub fn reset(&mut self) {
        tracing::debug!("resetting machine");
        self.state.reset();
    }

    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.state.load_program(program)?;
        tracing::debug!("loaded {} byte program", program.len());
        Ok(())
    }

    /// Load a rom from a file on disk
    pub fn load_rom_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let program = fs::read(path).map_err(|source| Chip8Error::RomLoad {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_program(&program)
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    /// Unset every key, e.g. when the host window loses focus and
    /// would otherwise never see the key-up events.
    pub fn release_keys(&mut self) {
        self.keypad.release_all();
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// The tone should be playing whenever the sound timer is running.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn status(&self) -> Status {
        match self.state.register_needing_key {
            Some(register) => Status::AwaitingKey { register },
            None => Status::Running,
        }
    }

    /// Advances the CPU by a single cycle
    /// - if awaiting a keypress, takes the lowest held key or stays parked
    /// - otherwise fetches, decodes and executes the next opcode
    ///
    /// A failed instruction leaves the state exactly as it was before the fetch.
    pub fn advance_cpu(&mut self) -> Result<Status> {
        if let Some(register) = self.state.register_needing_key {
            return Ok(match self.keypad.first_pressed() {
                Some(key) => {
                    tracing::debug!("key {:X} pressed, resuming into V{:X}", key, register);
                    self.state.v[register as usize] = key;
                    self.state.register_needing_key = None;
                    Status::Running
                }
                None => Status::AwaitingKey { register },
            });
        }

        let pc = self.state.pc;
        let op = self.state.fetch();
        let instruction = from_op(op).ok_or(Chip8Error::UnknownInstruction {
            opcode: op.value(),
            pc,
        })?;
        tracing::trace!(
            "{:03X}: {} {:<4} v{:02X?} i{:03X} sp{}",
            pc,
            op,
            instruction.mnemonic,
            self.state.v,
            self.state.i,
            self.state.sp
        );

        let advanced = State {
            pc: pc.wrapping_add(0x2),
            ..self.state
        };
        let mut ctx = Context {
            keypad: &self.keypad,
            rng: &mut self.rng,
            wrap_y: self.config.wrap_y,
        };
        self.state = (instruction.execute)(op, &advanced, &mut ctx)?;

        let status = self.status();
        if let Status::AwaitingKey { register } = status {
            tracing::debug!("waiting for a key press into V{:X}", register);
        }
        Ok(status)
    }

    /// Counts both timers down by one, stopping at 0.
    pub fn advance_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chip8_with(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_seed(Config::default(), 0x8);
        chip8.load_program(program).unwrap();
        chip8
    }

    #[test]
    fn test_runs_load_load_add() {
        let mut chip8 = chip8_with(&[0x60, 0x0A, 0x61, 0x05, 0x80, 0x14]);
        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.v[0x0], 0x0A);
        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.v[0x1], 0x05);
        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.v[0x0], 0x0F);
        assert_eq!(chip8.state.v[0xF], 0x0);
        assert_eq!(chip8.state.pc, 0x206);
    }

    #[test]
    fn test_call_then_return() {
        let mut chip8 = chip8_with(&[0x23, 0x00]);
        chip8.state.memory[0x300..0x302].copy_from_slice(&[0x00, 0xEE]);
        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.pc, 0x300);
        assert_eq!(chip8.state.sp, 0x1);
        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.sp, 0x0);
    }

    #[test]
    fn test_unknown_instruction_leaves_state_untouched() {
        let mut chip8 = chip8_with(&[0x01, 0x23]);
        let before = chip8.state;
        let err = chip8.advance_cpu().unwrap_err();
        assert!(matches!(
            err,
            Chip8Error::UnknownInstruction {
                opcode: 0x0123,
                pc: 0x200
            }
        ));
        assert_eq!(chip8.state, before);
    }

    #[test]
    fn test_recursion_overflows_the_stack() {
        // 0x200: CALL 0x200
        let mut chip8 = chip8_with(&[0x22, 0x00]);
        for _ in 0..16 {
            chip8.advance_cpu().unwrap();
        }
        let before = chip8.state;
        let err = chip8.advance_cpu().unwrap_err();
        assert!(matches!(err, Chip8Error::StackOverflow { pc: 0x200, sp: 16 }));
        assert_eq!(chip8.state, before);
        assert_eq!(chip8.state.sp, 16);
    }

    #[test]
    fn test_waits_for_key() {
        // LD V3, K; LD V4, 0x01
        let mut chip8 = chip8_with(&[0xF3, 0x0A, 0x64, 0x01]);
        assert_eq!(
            chip8.advance_cpu().unwrap(),
            Status::AwaitingKey { register: 0x3 }
        );
        let pc = chip8.state.pc;
        assert_eq!(
            chip8.advance_cpu().unwrap(),
            Status::AwaitingKey { register: 0x3 }
        );
        assert_eq!(chip8.state.pc, pc);

        chip8.key_press(0xB);
        chip8.key_press(0x9);
        assert_eq!(chip8.advance_cpu().unwrap(), Status::Running);
        assert_eq!(chip8.state.v[0x3], 0x9);
        assert_eq!(chip8.state.v[0x4], 0x0);

        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.v[0x4], 0x1);
    }

    #[test]
    fn test_release_keys_unsets_every_key() {
        // SKP V0
        let mut chip8 = chip8_with(&[0xE0, 0x9E]);
        chip8.key_press(0x0);
        chip8.key_press(0xF);
        chip8.release_keys();
        assert_eq!(chip8.keypad.first_pressed(), None);
        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.pc, 0x202);
    }

    #[test]
    fn test_delay_timer_counts_down_to_zero() {
        // LD V0, 5; LD DT, V0
        let mut chip8 = chip8_with(&[0x60, 0x05, 0xF0, 0x15]);
        chip8.advance_cpu().unwrap();
        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.delay_timer, 5);
        for _ in 0..5 {
            chip8.advance_timers();
        }
        assert_eq!(chip8.state.delay_timer, 0);
        chip8.advance_timers();
        assert_eq!(chip8.state.delay_timer, 0);
    }

    #[test]
    fn test_sound_follows_sound_timer() {
        let mut chip8 = chip8_with(&[]);
        assert!(!chip8.sound_active());
        chip8.state.sound_timer = 1;
        assert!(chip8.sound_active());
        chip8.advance_timers();
        assert!(!chip8.sound_active());
    }

    #[test]
    fn test_reset_starts_a_new_session() {
        let mut chip8 = chip8_with(&[0x60, 0x0A]);
        chip8.advance_cpu().unwrap();
        chip8.reset();
        assert_eq!(chip8.state, State::new());
    }

    #[test]
    fn test_missing_rom_reports_path() {
        let mut chip8 = Chip8::default();
        let err = chip8
            .load_rom_file("/definitely/not/a/rom.ch8")
            .unwrap_err();
        match err {
            Chip8Error::RomLoad { path, .. } => {
                assert_eq!(path, Path::new("/definitely/not/a/rom.ch8"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rom_file_loads() {
        let path = std::env::temp_dir().join(format!("emu8-test-{}.ch8", std::process::id()));
        fs::write(&path, [0x12, 0x00]).unwrap();
        let mut chip8 = Chip8::default();
        chip8.load_rom_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(chip8.state.fetch(), Opcode(0x1200));
    }

    #[test]
    fn test_draws_with_configured_wrap() {
        // LD V1, 30; LD I, 0x000; DRW V0, V1, 4
        let program = [0x61, 0x1E, 0xA0, 0x00, 0xD0, 0x14];
        let mut clipped = chip8_with(&program);
        let mut wrapped = Chip8::with_seed(
            Config {
                wrap_y: true,
                ..Config::default()
            },
            0x8,
        );
        wrapped.load_program(&program).unwrap();
        for _ in 0..3 {
            clipped.advance_cpu().unwrap();
            wrapped.advance_cpu().unwrap();
        }
        assert!(!clipped.frame().is_set(0, 0));
        assert!(wrapped.frame().is_set(0, 0));
        assert!(clipped.frame().is_set(30, 0));
    }
}
