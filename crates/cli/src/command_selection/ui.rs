use std::io::{stdin, stdout, IsTerminal, Write};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::style::{Print, PrintStyledContent};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, is_raw_mode_enabled, Clear, ClearType,
};
use crossterm::{cursor, queue};
use laziest_core::error::{Error, Result};
use log::debug;

use super::colors::AsContentStyle;
use super::input::prompt_input;
use super::state::Picker;
use super::types::{Item, Line, Outcome, PickerOptions, Step};

const FALLBACK_WIDTH: u16 = 80;
const FALLBACK_HEIGHT: u16 = 24;

/// Raw mode for as long as the guard lives. Nested guards leave the mode to
/// the outermost one.
pub(crate) struct RawModeGuard {
    restore: bool,
}

impl RawModeGuard {
    pub(crate) fn enter() -> std::io::Result<Self> {
        let already_enabled = is_raw_mode_enabled()?;
        if !already_enabled {
            enable_raw_mode()?;
        }
        Ok(Self {
            restore: !already_enabled,
        })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.restore {
            let _ = disable_raw_mode();
        }
    }
}

/// Blocks until a key is pressed. Returns `None` for events that only
/// need a redraw, such as a resize.
pub(crate) fn read_key() -> Result<Option<KeyEvent>> {
    loop {
        match event::read().map_err(Error::Stdio)? {
            Event::Key(key) if key.kind != KeyEventKind::Release => return Ok(Some(key)),
            Event::Resize(_, _) => return Ok(None),
            _ => {}
        }
    }
}

/// Tracks what was drawn so the next frame can erase exactly that.
struct Screen<W: Write> {
    out: W,
    lines_drawn: usize,
}

impl<W: Write> Screen<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            lines_drawn: 0,
        }
    }

    fn erase(&mut self) -> Result<()> {
        for _ in 0..self.lines_drawn {
            queue!(self.out, cursor::MoveUp(1), Clear(ClearType::CurrentLine)).map_err(Error::Stdio)?;
        }
        queue!(self.out, cursor::MoveToColumn(0)).map_err(Error::Stdio)?;
        self.lines_drawn = 0;
        self.out.flush().map_err(Error::Stdio)
    }

    /// Each line must fit the terminal width so it takes one row.
    fn draw(&mut self, lines: &[Line]) -> Result<()> {
        self.erase()?;
        for line in lines {
            queue!(
                self.out,
                PrintStyledContent(line.style.as_content_style().apply(line.text.as_str())),
                Print("\r\n")
            )
            .map_err(Error::Stdio)?;
        }
        self.lines_drawn = lines.len();
        self.out.flush().map_err(Error::Stdio)
    }

    /// A text prompt left its answered line above the cursor.
    fn prompt_answered(&mut self) {
        self.lines_drawn = 1;
    }
}

fn terminal_size() -> (usize, usize) {
    let (width, height) = terminal::size().unwrap_or((FALLBACK_WIDTH, FALLBACK_HEIGHT));
    let width = if width == 0 { FALLBACK_WIDTH } else { width };
    let height = if height == 0 { FALLBACK_HEIGHT } else { height };
    (usize::from(width), usize::from(height))
}

/// Runs a picker session on the terminal until it produces an outcome.
///
/// An empty item list without custom input cancels at once. Without a
/// terminal, or when raw mode cannot be enabled, the failure is reported
/// on stderr and the session cancels.
///
/// # Errors
///
/// Returns [`Error::Stdio`] when reading keys or writing the screen fails.
/// Raw mode is restored on every path.
pub fn pick(prompt: &str, items: Vec<Item>, options: PickerOptions) -> Result<Outcome> {
    run_session(prompt, items, options, stdin().is_terminal())
}

fn run_session(prompt: &str, items: Vec<Item>, options: PickerOptions, interactive: bool) -> Result<Outcome> {
    if !interactive {
        eprintln!("Cannot show interactive picker: not a terminal");
        return Ok(Outcome::Cancel);
    }

    let mut picker = Picker::new(prompt, items, options);
    let mut step = picker.start();
    if let Step::Done(outcome) = step {
        return Ok(outcome);
    }

    let _guard = match RawModeGuard::enter() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to enable raw mode: {e}");
            return Ok(Outcome::Cancel);
        }
    };
    let mut screen = Screen::new(stdout());

    loop {
        step = match step {
            Step::Done(outcome) => {
                screen.erase()?;
                debug!("Picker `{}` finished with {:?}", prompt, outcome);
                return Ok(outcome);
            }
            Step::AskText { prompt, initial } => {
                screen.erase()?;
                let text = prompt_input(&prompt, &initial)?;
                screen.prompt_answered();
                picker.submit_text(&text)
            }
            Step::Continue => {
                let (width, height) = terminal_size();
                screen.draw(&picker.frame(width, height))?;

                match read_key()? {
                    Some(key) => picker.handle_key(key),
                    None => Step::Continue,
                }
            }
        };
    }
}
