//! Interactive selection and text input.
//!
//! Every list the tool shows goes through one parameterized [`state::Picker`]:
//! saved commands, binding values, fixed menus and the run history. The
//! picker itself is a pure state machine; [`ui`] drives it on a terminal.
//!
//! # Keys
//!
//! - Up/Down or `k`/`j` to move, Enter to select
//! - `/` to filter by name, command or tag
//! - `e` extra arguments, `m` modify, `x` delete (saved commands only)
//! - `s` skip and `c` custom value (optional and open-ended bindings)
//! - `q`, Esc or Ctrl-C to cancel
//!
//! Callers that need prompts (the command builder, binding resolution, the
//! subcommand handlers) take a [`Prompter`] so they can be driven by a
//! script in tests.

pub mod colors;
pub mod input;
pub mod state;
pub mod types;
pub mod ui;

use laziest_core::error::Result;

pub use types::{Item, Outcome, PickerOptions};

/// Source of user decisions.
pub trait Prompter {
    /// Runs a picker session over `items`.
    fn pick(&mut self, prompt: &str, items: Vec<Item>, options: PickerOptions) -> Result<Outcome>;

    /// Reads one line of text. An empty string means the user gave nothing
    /// or cancelled.
    fn input(&mut self, prompt: &str, initial: &str) -> Result<String>;

    /// Shows an informational line.
    fn message(&mut self, text: &str);
}

/// [`Prompter`] backed by the terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn pick(&mut self, prompt: &str, items: Vec<Item>, options: PickerOptions) -> Result<Outcome> {
        ui::pick(prompt, items, options)
    }

    fn input(&mut self, prompt: &str, initial: &str) -> Result<String> {
        input::prompt_input(prompt, initial)
    }

    fn message(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Shows `labels` as a fixed menu. Returns the chosen index, or `None` when
/// the user cancels.
///
/// # Errors
///
/// Propagates terminal errors from the prompter.
pub fn choose(prompter: &mut dyn Prompter, prompt: &str, labels: &[&str]) -> Result<Option<usize>> {
    let items = labels.iter().map(|label| Item::label(label)).collect();

    match prompter.pick(prompt, items, PickerOptions::menu())? {
        Outcome::Select(chosen) => Ok(labels.iter().position(|label| *label == chosen)),
        _ => Ok(None),
    }
}

/// Yes/No menu. `None` when the user cancels.
///
/// # Errors
///
/// Propagates terminal errors from the prompter.
pub fn confirm(prompter: &mut dyn Prompter, prompt: &str) -> Result<Option<bool>> {
    Ok(choose(prompter, prompt, &["Yes", "No"])?.map(|index| index == 0))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    struct Canned {
        outcomes: VecDeque<Outcome>,
        seen: Vec<(String, Vec<String>)>,
    }

    impl Prompter for Canned {
        fn pick(&mut self, prompt: &str, items: Vec<Item>, _: PickerOptions) -> Result<Outcome> {
            self.seen.push((
                prompt.to_string(),
                items.into_iter().map(|item| item.name).collect(),
            ));
            Ok(self.outcomes.pop_front().unwrap_or(Outcome::Cancel))
        }

        fn input(&mut self, _: &str, _: &str) -> Result<String> {
            Ok(String::new())
        }

        fn message(&mut self, _: &str) {}
    }

    fn canned(outcomes: Vec<Outcome>) -> Canned {
        Canned {
            outcomes: outcomes.into(),
            seen: Vec::new(),
        }
    }

    #[test]
    fn test_choose_maps_selection_to_index() {
        let mut prompter = canned(vec![Outcome::Select("b".to_string())]);

        assert_eq!(choose(&mut prompter, "Pick:", &["a", "b"]).unwrap(), Some(1));
        assert_eq!(
            prompter.seen,
            vec![("Pick:".to_string(), vec!["a".to_string(), "b".to_string()])]
        );
    }

    #[test]
    fn test_confirm() {
        let mut prompter = canned(vec![
            Outcome::Select("Yes".to_string()),
            Outcome::Select("No".to_string()),
            Outcome::Cancel,
        ]);

        assert_eq!(confirm(&mut prompter, "Include --all?").unwrap(), Some(true));
        assert_eq!(confirm(&mut prompter, "Include --all?").unwrap(), Some(false));
        assert_eq!(confirm(&mut prompter, "Include --all?").unwrap(), None);
    }
}
