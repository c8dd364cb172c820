use chyp8::emulator::timer::ToneEvent;
use std::io::{stdout, Write};
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

/// Starts a thread that rings the terminal bell whenever a tone starts.
/// It stops when the sending side hangs up.
pub fn spawn(tones: Receiver<ToneEvent>) -> JoinHandle<()> {
    thread::spawn(move || {
        for event in tones.iter() {
            log::debug!("Tone {:?}", event);
            if event == ToneEvent::Start {
                let mut stdout = stdout();
                if let Err(error) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
                    log::warn!("Could not ring the bell: {}", error);
                }
            }
        }
    })
}
