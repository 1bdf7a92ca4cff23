/// Raw terminal mode: entered once before the menu, restored on exit.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute,
    style::ResetColor,
    terminal::{self, Clear, ClearType},
};

pub struct Terminal {
    out: Stdout,
    active: bool,
}

impl Terminal {
    pub fn new() -> Self {
        Terminal { out: io::stdout(), active: false }
    }

    /// Raw mode (no echo, no line buffering), alternate screen, hidden cursor.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )
    }

    /// Undo `init`. Safe to call more than once.
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.out,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}
