use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{TextureValueError, WindowCanvas};
use sdl2::video::WindowBuildError;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

use chip8vm_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8vm_core::Framebuffer;

/// Bytes per pixel in an RGB24 texture.
const CHANNELS: usize = 3;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("sdl2: {0}")]
    Sdl(String),

    #[error("unable to open window")]
    Window(#[from] WindowBuildError),

    #[error("unable to create canvas")]
    Canvas(#[from] IntegerOrSdlError),

    #[error("unable to create texture")]
    Texture(#[from] TextureValueError),
}

impl From<String> for DisplayError {
    fn from(message: String) -> Self {
        DisplayError::Sdl(message)
    }
}

/// # Display
/// The Chip-8 display is composed of 64x32 pixels black/white pixels.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, DisplayError> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "Chip8-VM",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()?;
        let canvas = window.into_canvas().build()?;

        let mut display = Display { canvas };
        display.render(&Framebuffer::new())?;
        Ok(display)
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
    /// - Triplicating each element of that 1D array to represent the RGB values of each pixel
    /// - Mapping on to 255 and off to 0 intensity
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &Framebuffer) -> Vec<u8> {
        frame
            .rows()
            .flat_map(|row| row.iter())
            .flat_map(|&pixel| std::iter::repeat(if pixel { 255 } else { 0 }).take(CHANNELS))
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    /// The texture is stretched over the whole window, so each pixel becomes a
    /// `scale` x `scale` square.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &Framebuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            DISPLAY_WIDTH as u32,
            DISPLAY_HEIGHT as u32,
        )?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            // Rows may be padded out past 64 pixels
            let row_bytes = DISPLAY_WIDTH * CHANNELS;
            for (y, row) in pixels.chunks(row_bytes).enumerate() {
                buffer[y * pitch..y * pitch + row_bytes].copy_from_slice(row);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
