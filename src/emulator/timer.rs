//! The delay and sound timers, and the fixed-rate schedule they decay on.

use std::time::Duration;

/// Timers count down this many times per second.
pub const TIMER_HZ: u32 = 60;

/// Start or stop the tone, sent when the sound timer starts or stops counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEvent {
    Start,
    Stop,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timers {
    delay: u8,
    sound: u8,
}

impl Timers {
    pub fn new() -> Timers {
        Timers::default()
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn sound(&self) -> u8 {
        self.sound
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    pub fn set_sound(&mut self, value: u8) -> Option<ToneEvent> {
        let was_playing = self.sound > 0;
        self.sound = value;
        match (was_playing, value > 0) {
            (false, true) => Some(ToneEvent::Start),
            (true, false) => Some(ToneEvent::Stop),
            _ => None,
        }
    }

    pub fn tick_delay(&mut self) {
        self.delay = self.delay.saturating_sub(1);
    }

    pub fn tick_sound(&mut self) -> Option<ToneEvent> {
        match self.sound {
            0 => None,
            1 => {
                self.sound = 0;
                Some(ToneEvent::Stop)
            }
            _ => {
                self.sound -= 1;
                None
            }
        }
    }
}

/// Turns elapsed time into a number of whole periods at a fixed rate,
/// carrying the remainder over to the next call.
#[derive(Debug, Clone)]
pub struct Schedule {
    period: Duration,
    pending: Duration,
}

impl Schedule {
    pub fn new(hz: u32) -> Schedule {
        Schedule {
            period: Duration::from_secs(1) / hz.max(1),
            pending: Duration::from_secs(0),
        }
    }

    /// Returns how many periods are due after `elapsed` more time has passed.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.pending += elapsed;
        let mut due = 0;
        while self.pending >= self.period {
            self.pending -= self.period;
            due += 1;
        }
        due
    }
}
