use chyp8::emulator::keypad::{KeyStates, NUM_KEYS};
use std::{
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

/// A thread-safe record of recent keypresses.
/// Terminals report presses but not releases, so a key counts as held
/// for a while after its last press (or auto-repeat) event.
/// Wrap it in an `std::sync::Arc` to share it between producer and consumer.
pub struct HeldKeys {
    hold: Duration,
    pressed_at: Mutex<[Option<Instant>; NUM_KEYS]>,
}

impl HeldKeys {
    pub fn new(hold: Duration) -> HeldKeys {
        HeldKeys {
            hold,
            pressed_at: Mutex::new([None; NUM_KEYS]),
        }
    }

    pub fn press(&self, key: u8) {
        let mut pressed_at = self.pressed_at.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = pressed_at.get_mut(key as usize) {
            *slot = Some(Instant::now());
        }
    }

    /// Which keys are held right now.
    pub fn snapshot(&self) -> KeyStates {
        let pressed_at = self.pressed_at.lock().unwrap_or_else(PoisonError::into_inner);
        let mut states = [false; NUM_KEYS];
        for (state, at) in states.iter_mut().zip(pressed_at.iter()) {
            *state = at.map_or(false, |at| at.elapsed() < self.hold);
        }
        states
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn press_from_another_thread() {
        let keys = Arc::new(HeldKeys::new(Duration::from_secs(10)));

        let producer_keys = keys.clone();
        let producer = thread::spawn(move || producer_keys.press(0xA));
        producer.join().unwrap(); // Ensure the press has been done

        let snapshot = keys.snapshot();
        assert!(snapshot[0xA]);
        assert_eq!(snapshot.iter().filter(|&&held| held).count(), 1);
    }

    #[test]
    fn keys_are_released_after_hold() {
        let keys = HeldKeys::new(Duration::from_millis(10));
        keys.press(3);
        assert!(keys.snapshot()[3]);
        thread::sleep(Duration::from_millis(30));
        assert!(!keys.snapshot()[3]);
    }

    #[test]
    fn out_of_range_keys_are_ignored() {
        let keys = HeldKeys::new(Duration::from_secs(10));
        keys.press(0x10);
        assert_eq!(keys.snapshot(), [false; NUM_KEYS]);
    }
}
