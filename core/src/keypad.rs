use crate::constants::KEY_COUNT;
use crate::devices::Input;

/// # Keypad
/// Chip-8 input is generated with a 16 key hexadecimal keypad.
///
/// Tracks the pressed status of each key now and at the last `sample`, which
/// lets `FX0A` wait for a key to be let go rather than merely held.
#[derive(Default)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT as usize],
    previous: [bool; KEY_COUNT as usize],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the current key states; call once per frame before handling new events.
    pub fn sample(&mut self) {
        self.previous = self.pressed;
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn press(&mut self, key: u8) {
        if let Some(pressed) = self.pressed.get_mut(key as usize) {
            *pressed = true;
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn release(&mut self, key: u8) {
        if let Some(pressed) = self.pressed.get_mut(key as usize) {
            *pressed = false;
        }
    }
}

impl Input for Keypad {
    fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }

    fn released_since_last_poll(&self, key: u8) -> bool {
        let key = key as usize;
        key < self.pressed.len() && self.previous[key] && !self.pressed[key]
    }
}
