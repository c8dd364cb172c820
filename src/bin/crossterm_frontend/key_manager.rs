use super::held_keys::HeldKeys;
use chyp8::emulator::keypad::KeyStates;
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How long a key counts as held after its last press event.
const KEY_HOLD: Duration = Duration::from_millis(200);

/// How often the listener checks whether it should stop.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A struct for managing keypresses that will automatically
/// start a thread that grabs keypresses.
pub struct KeyManager {
    stop: Arc<AtomicBool>,
    held_keys: Arc<HeldKeys>,
    event_listener: Option<JoinHandle<()>>,
}

impl KeyManager {
    /// Start the event listener thread. It sends on `shutdown` when the user asks to quit.
    pub fn new(shutdown: Sender<()>) -> KeyManager {
        let stop = Arc::new(AtomicBool::new(false));
        let held_keys = Arc::new(HeldKeys::new(KEY_HOLD));
        let event_listener = event_listener(stop.clone(), held_keys.clone(), shutdown);
        KeyManager {
            stop,
            held_keys,
            event_listener: Some(event_listener),
        }
    }

    /// Get the keys that are currently held
    pub fn held_keys(&self) -> KeyStates {
        self.held_keys.snapshot()
    }
}

impl Drop for KeyManager {
    fn drop(&mut self) {
        // Tell the event listener to stop, and wait for it
        self.stop.store(true, Ordering::Relaxed);
        if let Some(event_listener) = self.event_listener.take() {
            if event_listener.join().is_err() {
                log::warn!("Key listener panicked");
            }
        }
    }
}

/// Starts a thread that listens for key events and records them.
fn event_listener(stop: Arc<AtomicBool>, held_keys: Arc<HeldKeys>, shutdown: Sender<()>) -> JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            let event = match next_event() {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(error) => {
                    log::error!("Could not read terminal events: {}", error);
                    let _ = shutdown.send(());
                    break;
                }
            };
            log::trace!("Got event {:?}", event);

            if let Event::Key(key_event) = event {
                if is_quit(key_event) {
                    log::info!("Quit requested");
                    let _ = shutdown.send(());
                } else if let KeyCode::Char(c) = key_event.code {
                    if let Some(key) = keymap(c) {
                        held_keys.press(key);
                    }
                }
            }
        }
    })
}

/// Wait a little while for an event.
fn next_event() -> crossterm::Result<Option<Event>> {
    if poll(POLL_INTERVAL)? {
        read().map(Some)
    } else {
        Ok(None)
    }
}

fn is_quit(key_event: KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key_event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// The left hand side of a qwerty keyboard, laid out like the CHIP-8 keypad:
/// ```text
/// 1 2 3 4      1 2 3 C
/// q w e r  =>  4 5 6 D
/// a s d f      7 8 9 E
/// z x c v      A 0 B F
/// ```
pub fn keymap(c: char) -> Option<u8> {
    let key = match c.to_ascii_lowercase() {
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        '4' => 0xC,
        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'r' => 0xD,
        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'f' => 0xE,
        'z' => 0xA,
        'x' => 0x0,
        'c' => 0xB,
        'v' => 0xF,
        _ => return None,
    };
    Some(key)
}
