use crate::emulator::timer::ToneEvent;
use std::sync::mpsc::Sender;

/// Represents a speaker that can play a single tone.
pub trait EmulatorAudio {
    fn set_tone(&mut self, on: bool);
}

/// A speaker that stays silent.
pub struct DummyAudio;

impl EmulatorAudio for DummyAudio {
    fn set_tone(&mut self, _: bool) {}
}

/// Forwards tone changes to whoever holds the receiving end,
/// typically a thread that owns the actual audio device.
pub struct ChannelAudio {
    sender: Sender<ToneEvent>,
}

impl ChannelAudio {
    pub fn new(sender: Sender<ToneEvent>) -> ChannelAudio {
        ChannelAudio { sender }
    }
}

impl EmulatorAudio for ChannelAudio {
    fn set_tone(&mut self, on: bool) {
        let event = if on { ToneEvent::Start } else { ToneEvent::Stop };
        if self.sender.send(event).is_err() {
            log::warn!("Audio receiver is gone, dropping {:?}", event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;
    use std::thread;

    #[test]
    fn channel_audio_forwards_events_to_another_thread() {
        let (sender, receiver) = channel();
        let player = thread::spawn(move || receiver.iter().collect::<Vec<_>>());

        let mut audio = ChannelAudio::new(sender);
        audio.set_tone(true);
        audio.set_tone(false);
        drop(audio);

        assert_eq!(player.join().unwrap(), vec![ToneEvent::Start, ToneEvent::Stop]);
    }

    #[test]
    fn channel_audio_survives_a_closed_channel() {
        let (sender, receiver) = channel();
        drop(receiver);
        ChannelAudio::new(sender).set_tone(true);
    }
}
