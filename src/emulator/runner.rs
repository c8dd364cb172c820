//! Drives an emulator at a fixed clock speed until it is told to stop.

use crate::emulator::audio::EmulatorAudio;
use crate::emulator::config::Config;
use crate::emulator::emulator::Emulator;
use crate::emulator::error::ExecError;
use crate::emulator::input::EmulatorInput;
use crate::emulator::output::EmulatorOutput;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Why a run ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Shutdown,
    CycleLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub reason: StopReason,
}

pub struct Runner {
    period: Duration,
    cycle_limit: Option<u64>,
}

impl Runner {
    pub fn new(config: &Config) -> Runner {
        Runner {
            period: config.instruction_period(),
            cycle_limit: None,
        }
    }

    /// Stop cleanly after this many steps.
    pub fn with_cycle_limit(mut self, cycles: u64) -> Runner {
        self.cycle_limit = Some(cycles);
        self
    }

    /// Step and render once per period until a shutdown signal arrives, the cycle limit is
    /// reached, or a step fails. A dropped sender counts as a shutdown signal.
    /// Timers follow the wall clock, even when steps fall behind the clock speed.
    pub fn run<I, O, A>(
        &self,
        emulator: &mut Emulator<I, O, A>,
        shutdown: &Receiver<()>,
    ) -> Result<RunSummary, ExecError>
    where
        I: EmulatorInput,
        O: EmulatorOutput,
        A: EmulatorAudio,
    {
        let mut cycles = 0;
        let mut deadline = Instant::now();
        let mut last_step = deadline;

        let reason = loop {
            match shutdown.try_recv() {
                Ok(()) | Err(TryRecvError::Disconnected) => break StopReason::Shutdown,
                Err(TryRecvError::Empty) => {}
            }
            if self.cycle_limit.map_or(false, |limit| cycles >= limit) {
                break StopReason::CycleLimit;
            }

            let now = Instant::now();
            emulator.step_elapsed(now - last_step)?;
            last_step = now;
            emulator.render();
            cycles += 1;

            deadline += self.period;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                // Running behind, don't try to catch up with a burst of steps.
                // The timers still see the time that passed.
                deadline = now;
            }
        };

        log::info!("Stopped after {} cycles: {:?}", cycles, reason);
        Ok(RunSummary { cycles, reason })
    }
}
