/// Keyboard input: raw key bytes and the commands they map to.
///
/// Reading is blocking, one key at a time. The terminal must already be in
/// raw mode (see `ui::terminal`) so keys arrive unbuffered and unechoed.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

pub const KEY_JUMP: u8 = b' ';
pub const KEY_QUIT: u8 = b'q';

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Jump,
    Quit,
    /// Menu / character digit, 1..=5.
    Digit(u8),
    Unknown(u8),
}

/// Map one raw byte to a command.
pub fn decode(byte: u8) -> Command {
    match byte {
        KEY_JUMP => Command::Jump,
        KEY_QUIT => Command::Quit,
        b'1'..=b'5' => Command::Digit(byte - b'0'),
        other => Command::Unknown(other),
    }
}

/// A blocking source of raw key bytes.
pub trait KeySource {
    fn read_byte(&mut self) -> io::Result<u8>;
}

/// Reads keys from the real terminal through crossterm.
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn read_byte(&mut self) -> io::Result<u8> {
        loop {
            let Event::Key(key) = event::read()? else { continue };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            // Raw mode swallows SIGINT; treat Ctrl+C as quit
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            {
                return Ok(KEY_QUIT);
            }
            match key.code {
                KeyCode::Char(c) if c.is_ascii() => return Ok(c as u8),
                KeyCode::Enter => return Ok(b'\r'),
                KeyCode::Esc => return Ok(0x1b),
                _ => {}
            }
        }
    }
}
