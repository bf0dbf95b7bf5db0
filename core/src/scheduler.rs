use std::time::{Duration, Instant};

use crate::chip8::{Chip8, Status};
use crate::config::Config;
use crate::constants::TICK_DURATION;
use crate::error::{Chip8Error, Result};
use crate::peripherals::{Screen, Speaker};

/// # Scheduler
/// Paces a `Chip8` against the wall clock.
///
/// Each tick, at most 60 times a second:
/// - runs `speed` CPU cycles (fewer if the CPU parks on a key wait)
/// - counts the timers down once
/// - switches the tone on or off to match the sound timer
/// - hands the frame to the screen
///
/// A late tick is simply late; missed ticks are never made up in a burst.
#[derive(Debug)]
pub struct Scheduler {
    speed: u32,
    tick_duration: Duration,
    last_tick: Option<Instant>,
    ticks: u64,
}

impl Scheduler {
    /// Paces at `config.speed` instructions per tick.
    pub fn new(config: &Config) -> Result<Self> {
        if config.speed == 0 {
            return Err(Chip8Error::InvalidSpeed);
        }
        Ok(Scheduler {
            speed: config.speed,
            tick_duration: TICK_DURATION,
            last_tick: None,
            ticks: 0,
        })
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_tick {
            Some(last) => now.saturating_duration_since(last) >= self.tick_duration,
            None => true,
        }
    }

    /// How long the host can sleep before the next tick is due.
    pub fn until_next_tick(&self, now: Instant) -> Duration {
        match self.last_tick {
            Some(last) => self
                .tick_duration
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Runs a tick if one is due at `now`, returning whether it did.
    pub fn poll(
        &mut self,
        now: Instant,
        chip8: &mut Chip8,
        screen: &mut dyn Screen,
        speaker: &mut dyn Speaker,
    ) -> Result<bool> {
        if !self.is_due(now) {
            return Ok(false);
        }
        self.last_tick = Some(now);
        self.tick(chip8, screen, speaker)?;
        Ok(true)
    }

    /// Runs one tick immediately, regardless of the clock.
    pub fn tick(
        &mut self,
        chip8: &mut Chip8,
        screen: &mut dyn Screen,
        speaker: &mut dyn Speaker,
    ) -> Result<()> {
        for _ in 0..self.speed {
            if let Status::AwaitingKey { .. } = chip8.advance_cpu()? {
                break;
            }
        }
        chip8.advance_timers();
        speaker.set_tone(chip8.sound_active());
        screen.render(chip8.frame());
        self.ticks += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameBuffer;

    #[derive(Default)]
    struct RecordingScreen {
        frames: Vec<FrameBuffer>,
    }

    impl Screen for RecordingScreen {
        fn render(&mut self, frame: &FrameBuffer) {
            self.frames.push(*frame);
        }
    }

    #[derive(Default)]
    struct RecordingSpeaker {
        tones: Vec<bool>,
    }

    impl Speaker for RecordingSpeaker {
        fn set_tone(&mut self, on: bool) {
            self.tones.push(on);
        }
    }

    fn chip8_with(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_seed(Config::default(), 0x8);
        chip8.load_program(program).unwrap();
        chip8
    }

    fn scheduler(speed: u32) -> Scheduler {
        Scheduler::new(&Config {
            speed,
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_zero_speed() {
        let config = Config {
            speed: 0,
            ..Config::default()
        };
        assert!(matches!(Scheduler::new(&config), Err(Chip8Error::InvalidSpeed)));
    }

    #[test]
    fn test_paces_at_the_machine_speed() {
        // ADD V0, 1; JP 0x200
        let mut chip8 = chip8_with(&[0x70, 0x01, 0x12, 0x00]);
        let mut scheduler = Scheduler::new(chip8.config()).unwrap();
        let (mut screen, mut speaker) = (RecordingScreen::default(), RecordingSpeaker::default());
        scheduler.tick(&mut chip8, &mut screen, &mut speaker).unwrap();
        assert_eq!(u32::from(chip8.state().v[0x0]), Config::default().speed / 2);
    }

    #[test]
    fn test_tick_runs_speed_instructions() {
        // ADD V0, 1; JP 0x200
        let mut chip8 = chip8_with(&[0x70, 0x01, 0x12, 0x00]);
        let mut scheduler = scheduler(4);
        let (mut screen, mut speaker) = (RecordingScreen::default(), RecordingSpeaker::default());
        scheduler.tick(&mut chip8, &mut screen, &mut speaker).unwrap();
        assert_eq!(chip8.state().v[0x0], 2);
        assert_eq!(screen.frames.len(), 1);
        assert_eq!(speaker.tones, vec![false]);
    }

    #[test]
    fn test_tick_decrements_timers_once() {
        // LD V0, 3; LD DT, V0; LD ST, V0; JP 0x206
        let mut chip8 = chip8_with(&[0x60, 0x03, 0xF0, 0x15, 0xF0, 0x18, 0x12, 0x06]);
        let mut scheduler = scheduler(10);
        let (mut screen, mut speaker) = (RecordingScreen::default(), RecordingSpeaker::default());
        for _ in 0..4 {
            scheduler.tick(&mut chip8, &mut screen, &mut speaker).unwrap();
        }
        assert_eq!(chip8.state().delay_timer, 0);
        assert_eq!(chip8.state().sound_timer, 0);
        assert_eq!(speaker.tones, vec![true, true, false, false]);
    }

    #[test]
    fn test_tick_stops_early_while_awaiting_key() {
        // LD V2, 2; LD DT, V2; LD V1, K; ADD V0, 1; JP 0x206
        let mut chip8 = chip8_with(&[0x62, 0x02, 0xF2, 0x15, 0xF1, 0x0A, 0x70, 0x01, 0x12, 0x06]);
        let mut scheduler = scheduler(8);
        let (mut screen, mut speaker) = (RecordingScreen::default(), RecordingSpeaker::default());

        scheduler.tick(&mut chip8, &mut screen, &mut speaker).unwrap();
        assert_eq!(chip8.status(), Status::AwaitingKey { register: 0x1 });
        assert_eq!(chip8.state().v[0x0], 0);
        // the screen and timers keep going while parked
        assert_eq!(chip8.state().delay_timer, 1);
        assert_eq!(screen.frames.len(), 1);

        chip8.key_press(0x5);
        scheduler.tick(&mut chip8, &mut screen, &mut speaker).unwrap();
        assert_eq!(chip8.status(), Status::Running);
        assert_eq!(chip8.state().v[0x1], 0x5);
        // one cycle to resume, the remaining seven alternate ADD and JP
        assert_eq!(chip8.state().v[0x0], 4);
    }

    #[test]
    fn test_poll_paces_at_60hz() {
        let mut chip8 = chip8_with(&[0x12, 0x00]);
        let mut scheduler = scheduler(1);
        let (mut screen, mut speaker) = (RecordingScreen::default(), RecordingSpeaker::default());
        let start = Instant::now();

        assert!(scheduler.poll(start, &mut chip8, &mut screen, &mut speaker).unwrap());
        let early = start + Duration::from_millis(10);
        assert!(!scheduler.poll(early, &mut chip8, &mut screen, &mut speaker).unwrap());
        assert_eq!(scheduler.until_next_tick(early), TICK_DURATION - Duration::from_millis(10));

        let due = start + TICK_DURATION;
        assert!(scheduler.poll(due, &mut chip8, &mut screen, &mut speaker).unwrap());
        assert_eq!(scheduler.ticks(), 2);
    }

    #[test]
    fn test_poll_never_catches_up() {
        let mut chip8 = chip8_with(&[0x12, 0x00]);
        let mut scheduler = scheduler(1);
        let (mut screen, mut speaker) = (RecordingScreen::default(), RecordingSpeaker::default());
        let start = Instant::now();

        scheduler.poll(start, &mut chip8, &mut screen, &mut speaker).unwrap();
        let late = start + Duration::from_millis(500);
        assert!(scheduler.poll(late, &mut chip8, &mut screen, &mut speaker).unwrap());
        assert!(!scheduler.poll(late, &mut chip8, &mut screen, &mut speaker).unwrap());
        assert!(!scheduler
            .poll(late + Duration::from_millis(16), &mut chip8, &mut screen, &mut speaker)
            .unwrap());
        assert_eq!(scheduler.ticks(), 2);
    }

    #[test]
    fn test_tick_propagates_fatal_errors() {
        let mut chip8 = chip8_with(&[0xFF, 0xFF]);
        let mut scheduler = scheduler(1);
        let (mut screen, mut speaker) = (RecordingScreen::default(), RecordingSpeaker::default());
        let err = scheduler
            .tick(&mut chip8, &mut screen, &mut speaker)
            .unwrap_err();
        assert!(matches!(
            err,
            Chip8Error::UnknownInstruction {
                opcode: 0xFFFF,
                pc: 0x200
            }
        ));
        assert!(screen.frames.is_empty());
    }
}
