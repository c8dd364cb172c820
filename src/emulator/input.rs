use crate::emulator::keypad::{KeyStates, NUM_KEYS};
use std::collections::VecDeque;

/// Represents an input device that reports which of the keys 0..=0xF are held down.
/// Polled once per emulation step.
pub trait EmulatorInput {
    fn poll_keys(&mut self) -> KeyStates;
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll_keys(&mut self) -> KeyStates {
        [false; NUM_KEYS]
    }
}

/// Replays a fixed sequence of key states, one per poll,
/// then keeps reporting the last one.
pub struct ScriptedInput {
    script: VecDeque<KeyStates>,
    current: KeyStates,
}

impl ScriptedInput {
    pub fn new<T: IntoIterator<Item = KeyStates>>(script: T) -> ScriptedInput {
        ScriptedInput {
            script: script.into_iter().collect(),
            current: [false; NUM_KEYS],
        }
    }

    /// Key states with only `keys` held down.
    pub fn held(keys: &[u8]) -> KeyStates {
        let mut states = [false; NUM_KEYS];
        for &key in keys {
            if let Some(state) = states.get_mut(key as usize) {
                *state = true;
            }
        }
        states
    }
}

impl EmulatorInput for ScriptedInput {
    fn poll_keys(&mut self) -> KeyStates {
        if let Some(next) = self.script.pop_front() {
            self.current = next;
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_replays_then_holds() {
        let mut input = ScriptedInput::new(vec![ScriptedInput::held(&[1]), ScriptedInput::held(&[2, 3])]);
        assert_eq!(input.poll_keys(), ScriptedInput::held(&[1]));
        assert_eq!(input.poll_keys(), ScriptedInput::held(&[2, 3]));
        assert_eq!(input.poll_keys(), ScriptedInput::held(&[2, 3]));
    }

    #[test]
    fn held_ignores_keys_out_of_range() {
        assert_eq!(ScriptedInput::held(&[0x10]), [false; NUM_KEYS]);
    }
}
