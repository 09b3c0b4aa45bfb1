use log::debug;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{TextureValueError, WindowCanvas};
use sdl2::video::WindowBuildError;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::FrameBuffer;

/// Window scale used when none is given
pub const DEFAULT_SCALE: u32 = 10;

#[derive(Debug, Error)]
pub enum Error {
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("unable to create window")]
    Window(#[from] WindowBuildError),

    #[error("unable to create renderer")]
    Canvas(#[from] IntegerOrSdlError),

    #[error("unable to create texture")]
    Texture(#[from] TextureValueError),

    #[error("a scale of {0} makes the window too large")]
    ScaleTooLarge(u32),
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Sdl(message)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Window width and height in screen pixels for a given `scale`
fn window_size(scale: u32) -> Result<(u32, u32)> {
    let width = (DISPLAY_WIDTH as u32).checked_mul(scale);
    let height = (DISPLAY_HEIGHT as u32).checked_mul(scale);
    match (width, height) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(Error::ScaleTooLarge(scale)),
    }
}

/// # Display
/// Presents a Chip-8 `FrameBuffer` in an SDL2 window, scaling every pixel up
/// to a `scale` x `scale` square.
///
/// The display is only asked to `render` when the frame buffer is dirty.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self> {
        let video_subsystem = sdl.video()?;
        let (width, height) = window_size(scale)?;
        let window = video_subsystem
            .window("Chip-8", width, height)
            .position_centered()
            .opengl()
            .build()?;
        let canvas = window.into_canvas().build()?;
        debug!("opened {}x{} window", width, height);

        Ok(Display { canvas })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 RGB24 texture is a 1D array of bytes that represent concatenated
    /// rows of RGB pixels, so each pixel becomes three equal intensities:
    /// 255 when set and 0 when not.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .pixels()
            .iter()
            .flat_map(|&pixel| std::iter::repeat(u8::from(pixel) * 255).take(3))
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<()> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            DISPLAY_WIDTH as u32,
            DISPLAY_HEIGHT as u32,
        )?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], _pitch: usize| {
            buffer.copy_from_slice(&pixels);
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
