use sdl2::pixels::PixelFormatEnum;
use sdl2::render::TextureValueError;
use sdl2::video::WindowBuildError;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8_core::{FrameBuffer, Screen};

pub use palette::{ColorScheme, Palette, Rgb};

mod palette;

pub const DEFAULT_SCALE: u32 = 10;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("SDL2 error: {0}")]
    Sdl(String),
    #[error("unable to open window: {0}")]
    Window(#[from] WindowBuildError),
    #[error("unable to create canvas: {0}")]
    Canvas(#[from] IntegerOrSdlError),
    #[error("unable to create texture: {0}")]
    Texture(#[from] TextureValueError),
}

impl From<String> for DisplayError {
    fn from(e: String) -> Self {
        DisplayError::Sdl(e)
    }
}

/// # Display
/// The Chip-8 display is composed of 64x32 monochrome pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a `FrameBuffer`,
/// and painted with the foreground/background colors of a `Palette`.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    palette: Palette,
    width: usize,
    height: usize,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    /// * `palette` the colors of lit and unlit pixels
    pub fn new(sdl: &sdl2::Sdl, scale: u32, palette: Palette) -> Result<Self, DisplayError> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "Emu-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()?;
        let canvas = window.into_canvas().build()?;
        tracing::debug!("opened {}x scale window with {:?}", scale, palette);

        Ok(Display {
            canvas,
            palette,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    ///
    /// This creates a two color rendering by:
    /// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
    /// - Replacing each element of that 1D array with the RGB values of its palette color
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    /// * `palette` the colors to paint with
    fn frame_to_sdl_texture(frame: &FrameBuffer, palette: &Palette) -> Vec<u8> {
        frame
            .rows()
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|&pixel| palette.pixel(pixel))
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and presents it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn try_render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            self.width as u32,
            self.height as u32,
        )?;

        let pixels = Display::frame_to_sdl_texture(frame, &self.palette);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (row, line) in pixels.chunks(self.width * 3).enumerate() {
                buffer[row * pitch..row * pitch + line.len()].copy_from_slice(line);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

impl Screen for Display {
    fn render(&mut self, frame: &FrameBuffer) {
        if let Err(e) = self.try_render(frame) {
            tracing::error!("dropped frame: {}", e);
        }
    }
}
