//! Single-line text input.

use std::io::{stdin, stdout, IsTerminal, Write};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue};
use laziest_core::error::{Error, Result};

use super::ui::{read_key, RawModeGuard};

/// Result of one key in a [`LineEditor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditStep {
    Continue,
    Submit(String),
    Cancel,
}

/// Text being typed: printable ASCII, Backspace, Enter to submit, Esc or
/// Ctrl-C to cancel.
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: String,
}

impl LineEditor {
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditStep {
        let modified = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => EditStep::Cancel,
            KeyCode::Esc => EditStep::Cancel,
            KeyCode::Enter => EditStep::Submit(self.buffer.clone()),
            KeyCode::Backspace => {
                self.buffer.pop();
                EditStep::Continue
            }
            KeyCode::Char(c) if (' '..='~').contains(&c) && !modified => {
                self.buffer.push(c);
                EditStep::Continue
            }
            _ => EditStep::Continue,
        }
    }
}

/// Reads one line of text, starting from `initial`.
///
/// Cancelling returns an empty string. Without a terminal the failure is
/// reported on stderr and the answer is empty as well.
///
/// # Errors
///
/// Returns [`Error::Stdio`] when the terminal cannot be read or written.
pub fn prompt_input(prompt: &str, initial: &str) -> Result<String> {
    read_line(prompt, initial, stdin().is_terminal())
}

fn read_line(prompt: &str, initial: &str, interactive: bool) -> Result<String> {
    if !interactive {
        eprintln!("Cannot show input prompt: not a terminal");
        return Ok(String::new());
    }

    let _guard = match RawModeGuard::enter() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to enable raw mode: {e}");
            return Ok(String::new());
        }
    };

    let mut stdout = stdout();
    let mut editor = LineEditor::new(initial);

    loop {
        queue!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(prompt),
            Print(editor.buffer())
        )
        .map_err(Error::Stdio)?;
        stdout.flush().map_err(Error::Stdio)?;

        let Some(key) = read_key()? else {
            continue;
        };

        let result = match editor.handle_key(key) {
            EditStep::Continue => continue,
            EditStep::Submit(text) => text,
            EditStep::Cancel => String::new(),
        };

        queue!(stdout, Print("\r\n")).map_err(Error::Stdio)?;
        stdout.flush().map_err(Error::Stdio)?;
        return Ok(result);
    }
}
