pub const KEY_COUNT: usize = 16;

/// # Keypad
/// Chip-8 input is generated with a 16 key hexadecimal keypad.
///
/// The host writes key transitions in between ticks; instructions only read it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            pressed: [false; KEY_COUNT],
        }
    }

    /// Codes outside 0..F don't exist on the keypad and are ignored.
    pub fn press(&mut self, key: u8) {
        if let Some(pressed) = self.pressed.get_mut(key as usize) {
            *pressed = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(pressed) = self.pressed.get_mut(key as usize) {
            *pressed = false;
        }
    }

    pub fn release_all(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }

    /// Every key currently held down, lowest code first.
    pub fn pressed(&self) -> impl Iterator<Item = u8> + '_ {
        self.pressed
            .iter()
            .enumerate()
            .filter(|(_, down)| **down)
            .map(|(key, _)| key as u8)
    }

    pub fn first_pressed(&self) -> Option<u8> {
        self.pressed().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::new();
        keypad.press(0xE);
        assert!(keypad.is_pressed(0xE));
        keypad.release(0xE);
        assert!(!keypad.is_pressed(0xE));
    }

    #[test]
    fn test_ignores_keys_off_the_pad() {
        let mut keypad = Keypad::new();
        keypad.press(0x10);
        assert_eq!(keypad, Keypad::new());
        assert!(!keypad.is_pressed(0xFF));
    }

    #[test]
    fn test_pressed_is_ascending() {
        let mut keypad = Keypad::new();
        keypad.press(0xC);
        keypad.press(0x3);
        keypad.press(0x7);
        assert_eq!(keypad.pressed().collect::<Vec<_>>(), vec![0x3, 0x7, 0xC]);
        assert_eq!(keypad.first_pressed(), Some(0x3));
        keypad.release_all();
        assert_eq!(keypad.first_pressed(), None);
    }
}
