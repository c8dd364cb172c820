use crate::emulator::display::{Frame, Screen, SCREEN_SIZE};

/// Represents a screen the emulator can present frames on.
/// `render` is only called when the frame has changed since the last call.
pub trait EmulatorOutput {
    fn render(&mut self, screen: &Screen);
}

/// A simple output device that keeps the last frame it was given.
pub struct DummyOutput {
    frame: Frame,
    frames_rendered: usize,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput {
            frame: [0; SCREEN_SIZE],
            frames_rendered: 0,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }
}

impl Default for DummyOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl EmulatorOutput for DummyOutput {
    fn render(&mut self, screen: &Screen) {
        self.frame = *screen.cells();
        self.frames_rendered += 1;
    }
}
