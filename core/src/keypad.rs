use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
///
/// The host owns the keypad, flips keys as press/release events arrive, and hands it
/// to the VM on every cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn press(&mut self, key: u8) {
        if let Some(k) = self.keys.get_mut(key as usize) {
            *k = true;
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn release(&mut self, key: u8) {
        if let Some(k) = self.keys.get_mut(key as usize) {
            *k = false;
        }
    }

    /// Values past 0xF don't name a key and are never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest-numbered key that is currently held down.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&k| k).map(|k| k as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release_touch_only_that_key() {
        let mut keypad = Keypad::new();
        keypad.press(0x3);
        keypad.press(0xF);
        assert!(keypad.is_pressed(0x3));
        assert!(keypad.is_pressed(0xF));
        keypad.release(0x3);
        assert!(!keypad.is_pressed(0x3));
        assert!(keypad.is_pressed(0xF));
    }

    #[test]
    fn test_out_of_range_keys() {
        let mut keypad = Keypad::new();
        keypad.press(0x10);
        assert_eq!(keypad, Keypad::new());
        assert!(!keypad.is_pressed(0xFF));
    }

    #[test]
    fn test_first_pressed() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.first_pressed(), None);
        keypad.press(0xF);
        assert_eq!(keypad.first_pressed(), Some(0xF));
        keypad.press(0x7);
        assert_eq!(keypad.first_pressed(), Some(0x7));
    }
}
