use chyp8::emulator::display::{Screen, SCREEN_HEIGHT, SCREEN_WIDTH};
use chyp8::emulator::input::EmulatorInput;
use chyp8::emulator::keypad::KeyStates;
use chyp8::emulator::output::EmulatorOutput;

use super::key_manager::KeyManager;

use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Stdout, Write};

/// Each pixel is two terminal columns wide, so it comes out roughly square.
const PIXEL_WIDTH: usize = 2;

pub struct CrosstermInput<'a> {
    key_manager: &'a KeyManager,
}

impl CrosstermInput<'_> {
    pub fn new(key_manager: &KeyManager) -> CrosstermInput {
        CrosstermInput { key_manager }
    }
}

impl EmulatorInput for CrosstermInput<'_> {
    fn poll_keys(&mut self) -> KeyStates {
        self.key_manager.held_keys()
    }
}

/// Draws the screen inside a box on the alternate screen.
/// The terminal is restored when this is dropped.
pub struct CrosstermOutput {
    stdout: Stdout,
}

impl CrosstermOutput {
    pub fn new() -> crossterm::Result<CrosstermOutput> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        terminal::enable_raw_mode()?;
        let mut output = CrosstermOutput { stdout };
        output.draw_border()?;
        Ok(output)
    }

    fn draw_border(&mut self) -> crossterm::Result<()> {
        let inner = "━".repeat(SCREEN_WIDTH * PIXEL_WIDTH);
        let right = (SCREEN_WIDTH * PIXEL_WIDTH + 1) as u16;
        let bottom = (SCREEN_HEIGHT + 1) as u16;

        queue!(self.stdout, cursor::MoveTo(0, 0), Print(format!("┏{}┓", inner)))?;
        for y in 1..bottom {
            queue!(
                self.stdout,
                cursor::MoveTo(0, y),
                Print('┃'),
                cursor::MoveTo(right, y),
                Print('┃')
            )?;
        }
        queue!(self.stdout, cursor::MoveTo(0, bottom), Print(format!("┗{}┛", inner)))?;
        self.stdout.flush()?;
        Ok(())
    }

    fn draw(&mut self, screen: &Screen) -> crossterm::Result<()> {
        for y in 0..SCREEN_HEIGHT {
            let row: String = (0..SCREEN_WIDTH)
                .map(|x| if screen.get(x, y) == 1 { "██" } else { "  " })
                .collect();
            queue!(self.stdout, cursor::MoveTo(1, y as u16 + 1), Print(row))?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        let restored = terminal::disable_raw_mode()
            .and_then(|_| execute!(self.stdout, LeaveAlternateScreen, cursor::Show));
        if let Err(error) = restored {
            log::warn!("Could not restore the terminal: {}", error);
        }
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn render(&mut self, screen: &Screen) {
        if let Err(error) = self.draw(screen) {
            log::warn!("Could not draw frame: {}", error);
        }
    }
}
