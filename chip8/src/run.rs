use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;

use emu8_core::{Chip8, Config, Scheduler};
use emu8_display::{Display, Palette};

use crate::audio::Beeper;
use crate::keymap::keymap;

pub fn run(rom: &Path, config: Config, scale: u32, palette: Palette) -> Result<()> {
    let mut chip8 = Chip8::new(config);
    let mut scheduler = Scheduler::new(chip8.config())?;

    // Load ROM
    chip8
        .load_rom_file(rom)
        .with_context(|| format!("unable to start {}", rom.display()))?;
    tracing::info!("loaded {}", rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e)).context("unable to init SDL2")?;
    let mut display = Display::new(&sdl, scale, palette)?;
    let mut beeper = Beeper::new(&sdl);
    let mut events = sdl
        .event_pump()
        .map_err(|e| anyhow!(e))
        .context("unable to get SDL2 event pump")?;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_release(kc);
                    }
                }
                Event::Window {
                    win_event: WindowEvent::FocusLost,
                    ..
                } => chip8.release_keys(),
                _ => continue,
            };
        }

        // Update state
        let now = Instant::now();
        if let Err(e) = scheduler.poll(now, &mut chip8, &mut display, &mut beeper) {
            tracing::error!("halting: {}", e);
            return Err(e.into());
        }

        // Handle timing
        std::thread::sleep(scheduler.until_next_tick(Instant::now()));
    }

    tracing::info!("exiting after {} ticks", scheduler.ticks());
    Ok(())
}
