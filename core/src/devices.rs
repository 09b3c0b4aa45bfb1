//! The narrow capabilities the interpreter needs from the outside world.
//!
//! Each one has an in-crate implementation (`Keypad`, `FrameBuffer`,
//! `ToneFlag`), but frontends and tests are free to bring their own.

/// Reads the hexadecimal keypad. Keys outside of `0x0..=0xF` are never pressed.
pub trait Input {
    /// Whether `key` is currently held down
    fn is_pressed(&self, key: u8) -> bool;

    /// Whether `key` was held at the previous sample and has since been let go
    fn released_since_last_poll(&self, key: u8) -> bool;
}

/// Writes to the monochrome pixel surface.
pub trait Output {
    /// Unset every pixel
    fn clear(&mut self);

    /// Toggle the pixel at `index`, where `index = row * DISPLAY_WIDTH + col`
    fn flip(&mut self, index: usize);

    /// Mark whether the surface needs to be presented again
    fn set_dirty(&mut self, dirty: bool);
}

/// Switches a continuous tone on and off.
pub trait Speaker {
    fn is_playing(&self) -> bool;
    fn start(&mut self);
    fn stop(&mut self);
}
