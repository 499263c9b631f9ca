//! Substitution of chosen values back into a command template.
//!
//! Bindings are located by their byte span, never by searching for the
//! placeholder text, so repeated placeholders resolve independently.

use std::ops::Range;

use crate::binding::{Binding, BindingKind, FLAG_TOKEN};
use crate::error::{Error, Result};

/// The answer given for one binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Value(String),
    Skip,
}

/// Replaces the binding's placeholder with `value`, prefixed by its flag
/// prefix when it has one. A boolean flag binding is replaced by its flag.
///
/// # Errors
///
/// Returns [`Error::StaleBinding`] when the binding's span does not hold
/// its placeholder in `command`.
pub fn resolve(command: &str, binding: &Binding, value: &str) -> Result<String> {
    let mut text = command.to_string();
    splice(&mut text, binding, &Choice::Value(value.to_string()))?;
    Ok(normalize(&text))
}

/// Deletes the binding's placeholder, together with a flag token written
/// directly before it as `flag placeholder` or `flag=placeholder`.
///
/// The preceding token is only taken when it is the binding's own flag
/// prefix, or when the binding has no flag prefix.
///
/// # Errors
///
/// Returns [`Error::StaleBinding`] when the binding's span does not hold
/// its placeholder in `command`.
pub fn remove(command: &str, binding: &Binding) -> Result<String> {
    let mut text = command.to_string();
    splice(&mut text, binding, &Choice::Skip)?;
    Ok(normalize(&text))
}

/// Applies one answer per binding to the template they were parsed from.
///
/// # Errors
///
/// Returns [`Error::StaleBinding`] if any span no longer matches `template`.
pub fn apply(template: &str, answers: &[(Binding, Choice)]) -> Result<String> {
    let mut ordered: Vec<&(Binding, Choice)> = answers.iter().collect();
    ordered.sort_by_key(|(binding, _)| std::cmp::Reverse(binding.span.start));

    let mut text = template.to_string();
    for (binding, choice) in ordered {
        splice(&mut text, binding, choice)?;
    }

    Ok(normalize(&text))
}

/// Appends extra arguments verbatim; blank extras leave the command as is.
#[must_use]
pub fn append_extra(command: &str, extra: &str) -> String {
    let extra = extra.trim();
    if extra.is_empty() {
        command.to_string()
    } else {
        format!("{command} {extra}")
    }
}

/// Prompt shown while choosing a value for `binding`.
///
/// Uses the explicit flag prefix, or else a flag token written right
/// before the placeholder in `command`.
#[must_use]
pub fn prompt_context(command: &str, binding: &Binding) -> String {
    let inferred = || {
        command
            .get(binding.span.clone())
            .filter(|text| *text == binding.placeholder)
            .and_then(|_| preceding_flag(command, binding.span.start))
            .map(|(_, flag)| flag.to_string())
    };

    match &binding.kind {
        BindingKind::BooleanFlag { flag } => format!("Include {flag}?"),
        BindingKind::Directory { path, flag, .. } => {
            match flag.clone().or_else(inferred) {
                Some(flag) => format!("Select file for {flag} [{}]:", path.display()),
                None => format!("Select file [{}]:", path.display()),
            }
        }
        BindingKind::ValueList { flag, .. } => match flag.clone().or_else(inferred) {
            Some(flag) => format!("Select value for {flag}:"),
            None => "Select value:".to_string(),
        },
    }
}

fn splice(text: &mut String, binding: &Binding, choice: &Choice) -> Result<()> {
    if text.get(binding.span.clone()) != Some(binding.placeholder.as_str()) {
        return Err(Error::StaleBinding(binding.placeholder.clone()));
    }

    let (range, replacement) = match choice {
        Choice::Value(value) => (binding.span.clone(), substitution(binding, value)),
        Choice::Skip => (removal_range(text, binding), String::new()),
    };

    text.replace_range(range, &replacement);
    Ok(())
}

fn substitution(binding: &Binding, value: &str) -> String {
    match &binding.kind {
        BindingKind::BooleanFlag { flag } => flag.clone(),
        BindingKind::Directory { flag, .. } | BindingKind::ValueList { flag, .. } => match flag {
            Some(flag) => format!("{flag} {value}"),
            None => value.to_string(),
        },
    }
}

fn removal_range(text: &str, binding: &Binding) -> Range<usize> {
    let explicit = binding.flag();

    match preceding_flag(text, binding.span.start) {
        Some((start, token)) if explicit.map_or(true, |flag| flag == token) => {
            start..binding.span.end
        }
        _ => binding.span.clone(),
    }
}

/// Finds a flag token ending right before `position`, allowing whitespace
/// and a single `=` in between.
fn preceding_flag(text: &str, position: usize) -> Option<(usize, &str)> {
    let before = text[..position].trim_end();
    let before = before.strip_suffix('=').unwrap_or(before).trim_end();

    let start = before
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    let token = &before[start..];

    FLAG_TOKEN.is_match(token).then_some((start, token))
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
