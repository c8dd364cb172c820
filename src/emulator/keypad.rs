pub const NUM_KEYS: usize = 16;

/// Pressed state of each key 0x0..=0xF.
pub type KeyStates = [bool; NUM_KEYS];

/// The hexadecimal keypad, as last sampled from the input device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: KeyStates,
    /// Keys that went from released to pressed in the latest sample.
    just_pressed: KeyStates,
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    /// Take a new sample, noting which keys were pressed since the previous one.
    pub fn update(&mut self, keys: KeyStates) {
        for (key, &pressed) in keys.iter().enumerate() {
            self.just_pressed[key] = pressed && !self.keys[key];
        }
        self.keys = keys;
    }

    /// Keys outside 0x0..=0xF are never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest key pressed since the previous sample, if any.
    /// A key that stays held down is only reported once.
    pub fn first_just_pressed(&self) -> Option<u8> {
        self.just_pressed.iter().position(|&pressed| pressed).map(|key| key as u8)
    }

    /// Consume a new press so it isn't picked up twice. The key still reads as held.
    pub fn take_press(&mut self, key: u8) {
        if let Some(pressed) = self.just_pressed.get_mut(key as usize) {
            *pressed = false;
        }
    }
}
