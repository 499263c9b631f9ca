//! Type definitions for the picker and its outcomes.

/// A row the picker can show: a saved command, a binding value or a menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub command: String,
    pub tags: Vec<String>,
}

impl Item {
    pub fn new(name: &str, command: &str, tags: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            command: command.to_string(),
            tags,
        }
    }

    /// An item that is only a label, such as a value or a menu entry.
    pub fn label(name: &str) -> Self {
        Self::new(name, "", Vec::new())
    }

    pub fn tags_label(&self) -> String {
        if self.tags.is_empty() {
            String::new()
        } else {
            format!("[{}]", self.tags.join(", "))
        }
    }

    pub(crate) fn matches(&self, filter: &str) -> bool {
        let filter = filter.to_lowercase();
        self.name.to_lowercase().contains(&filter)
            || self.command.to_lowercase().contains(&filter)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&filter))
    }
}

/// How a picker session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Cancel,
    Select(String),
    SelectWithExtra(String, String),
    Skip,
    Custom(String),
    Delete(String),
    Modify {
        name: String,
        new_name: String,
        new_command: String,
        new_tags: Vec<String>,
    },
}

/// Which actions a picker session offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickerOptions {
    /// Adds a `[Skip]` row and the `s` key.
    pub allow_skip: bool,
    /// Adds a `[Custom]` row and the `c` key.
    pub allow_custom: bool,
    pub allow_filter: bool,
    pub allow_delete: bool,
    pub allow_modify: bool,
    /// Enables `e` for extra arguments.
    pub allow_extra: bool,
}

impl PickerOptions {
    /// Saved-command list with every action enabled.
    pub fn commands() -> Self {
        Self {
            allow_filter: true,
            allow_delete: true,
            allow_modify: true,
            allow_extra: true,
            ..Self::default()
        }
    }

    /// Values for a binding.
    pub fn values(allow_skip: bool, allow_custom: bool) -> Self {
        Self {
            allow_skip,
            allow_custom,
            allow_filter: true,
            ..Self::default()
        }
    }

    /// A fixed menu: navigate, select or cancel.
    pub fn menu() -> Self {
        Self::default()
    }

    /// Plain list that can be filtered, e.g. the run history.
    pub fn filterable() -> Self {
        Self {
            allow_filter: true,
            ..Self::default()
        }
    }
}

/// A visible row, pointing into the item list or at a synthetic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Item(usize),
    Skip,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Filtering,
    ConfirmingDelete,
    AwaitingText(TextPurpose),
}

/// What a requested line of text will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPurpose {
    Extra,
    Custom,
    ModifyName,
    ModifyCommand,
    ModifyTags,
}

/// Result of feeding one key or one line of text to the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Redraw and wait for the next key.
    Continue,
    /// Read a line of text, then call `submit_text`.
    AskText { prompt: String, initial: String },
    Done(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Plain,
    Prompt,
    Selected,
    Dim,
    Filter,
    Warning,
}

/// One rendered terminal line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub style: LineStyle,
}

impl Line {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_matches_name_command_and_tags() {
        let item = Item::new("deploy", "kubectl apply -f x", vec!["Prod".to_string()]);

        assert!(item.matches("DEP"));
        assert!(item.matches("apply"));
        assert!(item.matches("prod"));
        assert!(item.matches(""));
        assert!(!item.matches("docker"));
    }

    #[test]
    fn test_tags_label() {
        assert_eq!(Item::label("x").tags_label(), "");
        assert_eq!(
            Item::new("x", "y", vec!["a".to_string(), "b".to_string()]).tags_label(),
            "[a, b]"
        );
    }

    #[test]
    fn test_option_presets() {
        let commands = PickerOptions::commands();
        assert!(commands.allow_delete && commands.allow_modify && commands.allow_extra);
        assert!(!commands.allow_skip && !commands.allow_custom);

        let values = PickerOptions::values(true, false);
        assert!(values.allow_skip && values.allow_filter && !values.allow_custom);

        assert_eq!(PickerOptions::menu(), PickerOptions::default());
    }
}
