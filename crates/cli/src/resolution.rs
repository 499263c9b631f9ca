//! Asks for a value for every binding in a saved command.

use laziest_core::binding::{self, Binding, BindingKind};
use laziest_core::error::Result;
use laziest_core::interpolation::{self, Choice};
use laziest_core::listing;
use log::{debug, info};

use crate::command_selection::{confirm, Item, Outcome, PickerOptions, Prompter};

/// Resolves `template` binding by binding, in order of appearance.
///
/// Returns the final command, or `None` as soon as the user cancels any
/// prompt; nothing is resolved partially.
///
/// # Errors
///
/// Fails when the template does not parse, when a directory binding cannot
/// be listed or has no matching files, and on terminal errors.
pub fn resolve_command(prompter: &mut dyn Prompter, template: &str) -> Result<Option<String>> {
    let bindings = binding::parse(template)?;
    let mut answers = Vec::with_capacity(bindings.len());

    for binding in bindings {
        let prompt = interpolation::prompt_context(template, &binding);
        let Some(choice) = ask(prompter, &prompt, &binding)? else {
            info!("Resolution cancelled at `{}`", binding.placeholder);
            return Ok(None);
        };

        match &choice {
            Choice::Value(value) => debug!("Resolved `{}` to `{}`", binding.placeholder, value),
            Choice::Skip => debug!("Skipped `{}`", binding.placeholder),
        }
        answers.push((binding, choice));
    }

    interpolation::apply(template, &answers).map(Some)
}

fn ask(prompter: &mut dyn Prompter, prompt: &str, binding: &Binding) -> Result<Option<Choice>> {
    match &binding.kind {
        BindingKind::Directory { path, filter, .. } => {
            let files = listing::list_files(path, filter.as_deref())?;
            let items = files.iter().map(|file| Item::label(file)).collect();
            let outcome = prompter.pick(prompt, items, PickerOptions::values(binding.optional, false))?;

            Ok(to_choice(outcome).map(|choice| match choice {
                Choice::Value(relative) => {
                    Choice::Value(listing::absolute_path(path, &relative).display().to_string())
                }
                Choice::Skip => Choice::Skip,
            }))
        }
        BindingKind::ValueList {
            values,
            allow_custom,
            ..
        } => {
            let items = values.iter().map(|value| Item::label(value)).collect();
            let options = PickerOptions::values(binding.optional, *allow_custom);
            Ok(to_choice(prompter.pick(prompt, items, options)?))
        }
        BindingKind::BooleanFlag { .. } if !binding.optional => Ok(Some(Choice::Value(String::new()))),
        BindingKind::BooleanFlag { .. } => Ok(confirm(prompter, prompt)?.map(|include| {
            if include {
                Choice::Value(String::new())
            } else {
                Choice::Skip
            }
        })),
    }
}

fn to_choice(outcome: Outcome) -> Option<Choice> {
    match outcome {
        Outcome::Select(value) | Outcome::Custom(value) => Some(Choice::Value(value)),
        Outcome::Skip => Some(Choice::Skip),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_choice() {
        assert_eq!(
            to_choice(Outcome::Custom("x".to_string())),
            Some(Choice::Value("x".to_string()))
        );
        assert_eq!(to_choice(Outcome::Skip), Some(Choice::Skip));
        assert_eq!(to_choice(Outcome::Cancel), None);
        assert_eq!(to_choice(Outcome::Delete("x".to_string())), None);
    }
}
