//! Turns an example command into a template by asking, flag by flag, how
//! each one should behave.
//!
//! Every generated placeholder is rendered from a [`Binding`], so the
//! output always parses back to the bindings that were chosen.

use std::path::Path;

use laziest_core::binding::{self, Binding, BindingKind, CUSTOM_MARKER};
use laziest_core::error::Result;
use laziest_core::flags::{self, Flag, Segment};
use log::debug;

use crate::command_selection::{choose, confirm, Prompter};

const CLOSE: &str = "%}";

const SWITCH_PROMPT: &str = "How should this flag behave?";
const VALUE_PROMPT: &str = "How should this flag's value be set?";
const OPTIONAL_PROMPT: &str = "Make this flag optional?";

/// Walks the flags of `example` and returns the resulting template, or
/// `None` when the user cancels. Text between flags stays in place.
///
/// # Errors
///
/// Propagates terminal errors from the prompter.
pub fn build(prompter: &mut dyn Prompter, example: &str) -> Result<Option<String>> {
    let segments = flags::segments(example);
    let flag_count = segments
        .iter()
        .filter(|segment| matches!(segment, Segment::Flag(_)))
        .count();

    if flag_count == 0 {
        return Ok(Some(example.trim().to_string()));
    }

    prompter.message(&format!("Building command from: {example}"));
    prompter.message(&format!("Base command: {}", flags::extract(example).base));
    prompter.message(&format!("Found {flag_count} flag(s) to configure"));

    let mut parts = Vec::with_capacity(segments.len());
    let mut position = 0;

    for segment in segments {
        match segment {
            Segment::Static(text) => parts.push(text),
            Segment::Flag(flag) => {
                position += 1;
                let mut heading = format!("[{position}/{flag_count}] Flag: {}", flag.name);
                if let Some(value) = &flag.value {
                    heading.push_str(&format!(" = {value}"));
                }
                prompter.message(&heading);

                match configure_flag(prompter, &flag)? {
                    Some(text) => parts.push(text),
                    None => {
                        debug!("Builder cancelled at flag `{}`", flag.name);
                        return Ok(None);
                    }
                }
            }
        }
    }

    Ok(Some(parts.join(" ")))
}

fn static_text(flag: &Flag) -> String {
    match &flag.value {
        Some(value) => format!("{} {value}", flag.name),
        None => flag.name.clone(),
    }
}

fn configure_flag(prompter: &mut dyn Prompter, flag: &Flag) -> Result<Option<String>> {
    let templated = flag
        .value
        .as_deref()
        .is_some_and(|value| value.contains("{%"));
    if !binding::is_flag_token(&flag.name) || templated {
        prompter.message(&format!("Keeping '{}' as written", static_text(flag)));
        return Ok(Some(static_text(flag)));
    }

    let text = match flag.value.as_deref() {
        None => configure_switch(prompter, flag)?,
        Some(value) if flag.is_boolean => configure_toggle(prompter, flag, value)?,
        Some(value) => configure_value(prompter, flag, value)?,
    };

    if let Some(text) = &text {
        debug!("Flag `{}` rendered as `{}`", flag.name, text);
    }
    Ok(text)
}

/// A flag without a value: always there, or optional at run time.
fn configure_switch(prompter: &mut dyn Prompter, flag: &Flag) -> Result<Option<String>> {
    let choice = choose(
        prompter,
        SWITCH_PROMPT,
        &[
            "Keep static (always include this flag)",
            "Make optional (choose to include or skip at runtime)",
        ],
    )?;

    Ok(choice.map(|index| match index {
        0 => static_text(flag),
        _ => Binding::new(
            true,
            BindingKind::BooleanFlag {
                flag: flag.name.clone(),
            },
        )
        .to_string(),
    }))
}

/// A flag set to `true` or `false`.
fn configure_toggle(prompter: &mut dyn Prompter, flag: &Flag, value: &str) -> Result<Option<String>> {
    let keep = format!("Keep static (always use {value})");
    let choice = choose(
        prompter,
        SWITCH_PROMPT,
        &[
            keep.as_str(),
            "Make dynamic (choose True/False at runtime)",
            "Make optional + dynamic (choose True/False or skip entirely)",
        ],
    )?;

    let toggle = |optional| {
        Binding::new(
            optional,
            BindingKind::ValueList {
                values: vec!["True".to_string(), "False".to_string()],
                allow_custom: false,
                flag: Some(flag.name.clone()),
            },
        )
        .to_string()
    };

    Ok(choice.map(|index| match index {
        0 => static_text(flag),
        1 => toggle(false),
        _ => toggle(true),
    }))
}

fn configure_value(prompter: &mut dyn Prompter, flag: &Flag, value: &str) -> Result<Option<String>> {
    let choice = choose(
        prompter,
        VALUE_PROMPT,
        &[
            "Keep static (always use this value)",
            "Directory picker (browse and select a path)",
            "Value list (choose from predefined options)",
        ],
    )?;

    match choice {
        None => Ok(None),
        Some(0) => Ok(Some(static_text(flag))),
        Some(1) => directory_binding(prompter, flag, value),
        Some(_) => value_list_binding(prompter, flag, value),
    }
}

fn directory_binding(prompter: &mut dyn Prompter, flag: &Flag, value: &str) -> Result<Option<String>> {
    let default_dir = default_directory(value);

    loop {
        let path = loop {
            let answer = prompter.input(&format!("Base directory [{default_dir}]: "), "")?;
            let answer = answer.trim();
            let path = binding::expand_path(if answer.is_empty() { default_dir.as_str() } else { answer });
            if fits_directory_binding(&path.display().to_string()) {
                break path;
            }
            prompter.message(&format!(
                "'{}' cannot be used: a directory cannot contain ':' or '%}}' or end with ']'",
                path.display()
            ));
        };

        let filter = loop {
            let answer = prompter.input("Filter pattern (e.g., *.yaml, empty for all): ", "")?;
            let answer = answer.trim();
            if answer.is_empty() {
                break None;
            }
            if fits_directory_binding(answer) {
                break Some(answer.to_string());
            }
            prompter.message("A filter cannot contain ':' or '%}' or end with ']'");
        };

        let Some(optional) = confirm(prompter, OPTIONAL_PROMPT)? else {
            return Ok(None);
        };

        let binding = Binding::new(
            optional,
            BindingKind::Directory {
                path,
                filter,
                flag: Some(flag.name.clone()),
            },
        );
        if parses_back(&binding) {
            return Ok(Some(binding.to_string()));
        }
        prompter.message(&format!("'{binding}' would not read back as written, try again"));
    }
}

/// Whether the rendered placeholder parses to the same binding.
fn parses_back(binding: &Binding) -> bool {
    matches!(
        binding::parse(&binding.placeholder).as_deref(),
        Ok([parsed]) if parsed.optional == binding.optional && parsed.kind == binding.kind
    )
}

fn value_list_binding(prompter: &mut dyn Prompter, flag: &Flag, value: &str) -> Result<Option<String>> {
    prompter.message("Enter values one per line. Empty line to finish.");
    prompter.message(&format!(
        "Tip: Add '{CUSTOM_MARKER}' as the last value to allow custom input at runtime."
    ));
    prompter.message(&format!("Suggested: {value}"));

    let mut values: Vec<String> = Vec::new();
    let mut allow_custom = false;

    loop {
        let answer = prompter.input("Value: ", "")?;
        let answer = answer.trim();

        if answer.is_empty() {
            break;
        } else if answer == CUSTOM_MARKER {
            allow_custom = true;
        } else if answer.contains(',') || answer.contains(CLOSE) {
            prompter.message("Values cannot contain ',' or '%}'");
        } else if values.iter().any(|existing| existing == answer) {
            prompter.message(&format!("'{answer}' is already in the list"));
        } else {
            values.push(answer.to_string());
        }
    }

    if values.is_empty() && !allow_custom {
        return Ok(Some(static_text(flag)));
    }

    let Some(optional) = confirm(prompter, OPTIONAL_PROMPT)? else {
        return Ok(None);
    };

    let binding = Binding::new(
        optional,
        BindingKind::ValueList {
            values,
            allow_custom,
            flag: Some(flag.name.clone()),
        },
    );
    Ok(Some(binding.to_string()))
}

/// Text that can sit in a directory binding without being read as a filter
/// separator, a closing delimiter or a value list.
fn fits_directory_binding(text: &str) -> bool {
    !text.contains(':') && !text.contains(CLOSE) && !text.ends_with(']')
}

/// The folder an example value points into: its parent when it names a
/// file, the value itself otherwise.
fn default_directory(value: &str) -> String {
    let path = Path::new(value);
    let directory = if path.extension().is_some() {
        path.parent()
            .map(|parent| parent.display().to_string())
            .unwrap_or_default()
    } else {
        value.to_string()
    };

    if directory.is_empty() || !fits_directory_binding(&directory) {
        ".".to_string()
    } else {
        directory
    }
}
