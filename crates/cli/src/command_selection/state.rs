//! The picker as a pure state machine.
//!
//! Keys go in through [`Picker::handle_key`], lines of text through
//! [`Picker::submit_text`], and each call says what the driver should do
//! next. [`Picker::frame`] renders the current state without touching the
//! terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::types::{Item, Line, LineStyle, Mode, Outcome, PickerOptions, Row, Step, TextPurpose};

const SKIP_LABEL: &str = "[Skip]";
const CUSTOM_LABEL: &str = "[Custom]";
const MIN_COMMAND_WIDTH: usize = 20;
const ELLIPSIS: &str = "...";

const FILTER_HELP: &str = "[↑/↓] navigate  [Enter] select  [Esc] clear filter  [Ctrl+C] cancel";

/// Edited fields while `m` prompts run.
#[derive(Debug, Default)]
struct Draft {
    name: String,
    command: String,
    tags: Vec<String>,
}

#[derive(Debug)]
pub struct Picker {
    prompt: String,
    items: Vec<Item>,
    options: PickerOptions,
    rows: Vec<Row>,
    selected: usize,
    mode: Mode,
    filter: String,
    draft: Draft,
    // Fixed for the whole session so columns never shift while filtering.
    name_width: usize,
    tag_width: usize,
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn is_printable(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if (' '..='~').contains(&c)
                && !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max < ELLIPSIS.len() {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - ELLIPSIS.len()).collect();
    format!("{kept}{ELLIPSIS}")
}

fn split_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn ask(prompt: impl Into<String>, initial: impl Into<String>) -> Step {
    Step::AskText {
        prompt: prompt.into(),
        initial: initial.into(),
    }
}

impl Picker {
    pub fn new(prompt: &str, items: Vec<Item>, options: PickerOptions) -> Self {
        let mut labels: Vec<usize> = items.iter().map(|i| i.name.chars().count()).collect();
        if options.allow_skip {
            labels.push(SKIP_LABEL.len());
        }
        if options.allow_custom {
            labels.push(CUSTOM_LABEL.len());
        }

        let mut picker = Self {
            prompt: prompt.to_string(),
            name_width: labels.into_iter().max().unwrap_or(0),
            tag_width: items
                .iter()
                .map(|i| i.tags_label().chars().count())
                .max()
                .unwrap_or(0),
            items,
            options,
            rows: Vec::new(),
            selected: 0,
            mode: Mode::Browsing,
            filter: String::new(),
            draft: Draft::default(),
        };
        picker.refresh_rows();
        picker
    }

    /// The first step of a session.
    ///
    /// No items means an immediate cancel, unless custom input is allowed,
    /// in which case the session starts by asking for it.
    pub fn start(&mut self) -> Step {
        if !self.items.is_empty() {
            return Step::Continue;
        }

        if self.options.allow_custom {
            self.ask_custom()
        } else {
            Step::Done(Outcome::Cancel)
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn selected_row(&self) -> Option<Row> {
        self.rows.get(self.selected).copied()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Step {
        match self.mode {
            Mode::Browsing => self.browse(key),
            Mode::Filtering => self.edit_filter(key),
            Mode::ConfirmingDelete => self.confirm_delete(key),
            Mode::AwaitingText(_) => Step::Continue,
        }
    }

    /// Feeds the line read for the last [`Step::AskText`].
    ///
    /// Blank text returns to browsing, except for the `m` prompts where it
    /// keeps the current value.
    pub fn submit_text(&mut self, text: &str) -> Step {
        let Mode::AwaitingText(purpose) = self.mode else {
            return Step::Continue;
        };
        self.mode = Mode::Browsing;
        let text = text.trim();

        match purpose {
            TextPurpose::Extra => match self.current_item() {
                Some(item) if !text.is_empty() => {
                    Step::Done(Outcome::SelectWithExtra(item.name.clone(), text.to_string()))
                }
                _ => Step::Continue,
            },
            TextPurpose::Custom if !text.is_empty() => Step::Done(Outcome::Custom(text.to_string())),
            TextPurpose::Custom if self.items.is_empty() => Step::Done(if self.options.allow_skip {
                Outcome::Skip
            } else {
                Outcome::Cancel
            }),
            TextPurpose::Custom => Step::Continue,
            TextPurpose::ModifyName => {
                if !text.is_empty() {
                    self.draft.name = text.to_string();
                }
                self.mode = Mode::AwaitingText(TextPurpose::ModifyCommand);
                ask("New command: ", self.draft.command.clone())
            }
            TextPurpose::ModifyCommand => {
                if !text.is_empty() {
                    self.draft.command = text.to_string();
                }
                self.mode = Mode::AwaitingText(TextPurpose::ModifyTags);
                ask("New tags (comma-separated): ", self.draft.tags.join(", "))
            }
            TextPurpose::ModifyTags => {
                let Some(name) = self.current_item().map(|item| item.name.clone()) else {
                    return Step::Continue;
                };
                let new_tags = if text.is_empty() {
                    std::mem::take(&mut self.draft.tags)
                } else {
                    split_tags(text)
                };
                Step::Done(Outcome::Modify {
                    name,
                    new_name: std::mem::take(&mut self.draft.name),
                    new_command: std::mem::take(&mut self.draft.command),
                    new_tags,
                })
            }
        }
    }

    /// Renders the picker: prompt, rows, filter line and help line.
    ///
    /// At most `height - 4` rows are shown, scrolled to keep the selection
    /// visible. No line is wider than `width`, so every line takes exactly
    /// one terminal row.
    pub fn frame(&self, width: usize, height: usize) -> Vec<Line> {
        let mut lines = vec![Line::new(self.prompt.clone(), LineStyle::Prompt)];

        if self.rows.is_empty() {
            lines.push(Line::new("  (no matches)", LineStyle::Dim));
        } else {
            let max_rows = height.saturating_sub(4).max(3);
            let offset = (self.selected + 1).saturating_sub(max_rows);
            let command_width = self.command_width(width);

            for (i, row) in self.rows.iter().enumerate().skip(offset).take(max_rows) {
                lines.push(self.render_row(*row, i == self.selected, command_width));
            }
        }

        if self.mode == Mode::Filtering {
            lines.push(Line::new(format!("  /{}", self.filter), LineStyle::Filter));
        }

        match (self.mode, self.current_item()) {
            (Mode::ConfirmingDelete, Some(item)) => lines.push(Line::new(
                format!("  Delete '{}'? (y/n)", item.name),
                LineStyle::Warning,
            )),
            (Mode::Filtering, _) => lines.push(Line::new(format!("  {FILTER_HELP}"), LineStyle::Dim)),
            _ => lines.push(Line::new(format!("  {}", self.help()), LineStyle::Dim)),
        }

        for line in &mut lines {
            line.text = truncate(&line.text, width);
        }
        lines
    }

    fn help(&self) -> String {
        let options = &self.options;
        let mut parts = vec!["[↑/↓/j/k] navigate", "[Enter] select"];
        let optional = [
            (options.allow_filter, "[/] filter"),
            (options.allow_extra, "[e] extra"),
            (options.allow_modify, "[m] modify"),
            (options.allow_delete, "[x] delete"),
            (options.allow_custom, "[c] custom"),
            (options.allow_skip, "[s] skip"),
        ];
        parts.extend(optional.iter().filter(|(on, _)| *on).map(|(_, text)| *text));
        parts.push("[q] cancel");
        parts.join("  ")
    }

    fn command_width(&self, width: usize) -> usize {
        width
            .saturating_sub(4 + self.name_width + 2 + self.tag_width + 2 + 1)
            .max(MIN_COMMAND_WIDTH)
    }

    fn render_row(&self, row: Row, selected: bool, command_width: usize) -> Line {
        let (label, tags, command) = match row {
            Row::Item(i) => {
                let item = &self.items[i];
                (item.name.as_str(), item.tags_label(), item.command.as_str())
            }
            Row::Skip => (SKIP_LABEL, String::new(), ""),
            Row::Custom => (CUSTOM_LABEL, String::new(), ""),
        };

        let mut text = format!("{label:<width$}", width = self.name_width);
        if self.tag_width > 0 {
            text.push_str(&format!("  {tags:<width$}", width = self.tag_width));
        }
        if !command.is_empty() {
            text.push_str("  ");
            text.push_str(&truncate(command, command_width));
        }
        let text = text.trim_end();

        if selected {
            Line::new(format!("  > {text}"), LineStyle::Selected)
        } else {
            Line::new(format!("    {text}"), LineStyle::Plain)
        }
    }

    fn refresh_rows(&mut self) {
        let matching = (0..self.items.len()).map(Row::Item);

        self.rows = if self.mode == Mode::Filtering {
            matching
                .filter(|row| match row {
                    Row::Item(i) => self.items[*i].matches(&self.filter),
                    _ => false,
                })
                .collect()
        } else {
            let mut rows = Vec::with_capacity(self.items.len() + 2);
            if self.options.allow_skip {
                rows.push(Row::Skip);
            }
            rows.extend(matching);
            if self.options.allow_custom {
                rows.push(Row::Custom);
            }
            rows
        };
        self.selected = 0;
    }

    fn current_item(&self) -> Option<&Item> {
        match self.selected_row()? {
            Row::Item(i) => self.items.get(i),
            _ => None,
        }
    }

    fn move_up(&mut self) -> Step {
        self.selected = self.selected.saturating_sub(1);
        Step::Continue
    }

    fn move_down(&mut self) -> Step {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
        Step::Continue
    }

    fn ask_custom(&mut self) -> Step {
        self.mode = Mode::AwaitingText(TextPurpose::Custom);
        ask(format!("{} ", self.prompt), "")
    }

    fn browse(&mut self, key: KeyEvent) -> Step {
        if is_ctrl_c(&key) {
            return Step::Done(Outcome::Cancel);
        }
        let has_item = self.current_item().is_some();

        match key.code {
            KeyCode::Up | KeyCode::Char('k' | 'K') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j' | 'J') => self.move_down(),
            KeyCode::Enter => match self.selected_row() {
                Some(Row::Item(i)) => Step::Done(Outcome::Select(self.items[i].name.clone())),
                Some(Row::Skip) => Step::Done(Outcome::Skip),
                Some(Row::Custom) => self.ask_custom(),
                None => Step::Continue,
            },
            KeyCode::Esc | KeyCode::Char('q') => Step::Done(Outcome::Cancel),
            KeyCode::Char('/') if self.options.allow_filter => {
                self.mode = Mode::Filtering;
                self.filter.clear();
                self.refresh_rows();
                Step::Continue
            }
            KeyCode::Char('e' | 'E') if self.options.allow_extra && has_item => {
                self.mode = Mode::AwaitingText(TextPurpose::Extra);
                ask("Extra arguments: ", "")
            }
            KeyCode::Char('x' | 'X') if self.options.allow_delete && has_item => {
                self.mode = Mode::ConfirmingDelete;
                Step::Continue
            }
            KeyCode::Char('m' | 'M') if self.options.allow_modify && has_item => {
                let Some(draft) = self.current_item().map(|item| Draft {
                    name: item.name.clone(),
                    command: item.command.clone(),
                    tags: item.tags.clone(),
                }) else {
                    return Step::Continue;
                };
                let initial = draft.name.clone();
                self.draft = draft;
                self.mode = Mode::AwaitingText(TextPurpose::ModifyName);
                ask("New name: ", initial)
            }
            KeyCode::Char('s' | 'S') if self.options.allow_skip => Step::Done(Outcome::Skip),
            KeyCode::Char('c' | 'C') if self.options.allow_custom => self.ask_custom(),
            _ => Step::Continue,
        }
    }

    fn edit_filter(&mut self, key: KeyEvent) -> Step {
        if is_ctrl_c(&key) {
            return Step::Done(Outcome::Cancel);
        }

        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Browsing;
                self.filter.clear();
                self.refresh_rows();
                Step::Continue
            }
            KeyCode::Enter => match self.current_item() {
                Some(item) => Step::Done(Outcome::Select(item.name.clone())),
                None => Step::Continue,
            },
            KeyCode::Backspace => {
                if self.filter.pop().is_some() {
                    self.refresh_rows();
                }
                Step::Continue
            }
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            _ => {
                if let Some(c) = is_printable(&key) {
                    self.filter.push(c);
                    self.refresh_rows();
                }
                Step::Continue
            }
        }
    }

    fn confirm_delete(&mut self, key: KeyEvent) -> Step {
        self.mode = Mode::Browsing;
        match (key.code, self.current_item()) {
            (KeyCode::Char('y' | 'Y'), Some(item)) => Step::Done(Outcome::Delete(item.name.clone())),
            _ => Step::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ch(c: char) -> KeyEvent {
        key(KeyCode::Char(c))
    }

    fn ctrl_c() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
    }

    fn commands() -> Vec<Item> {
        vec![
            Item::new("build", "cargo build --release", vec!["rust".to_string()]),
            Item::new("up", "docker compose up -d", vec!["docker".to_string(), "dev".to_string()]),
            Item::new("logs", "docker compose logs -f", Vec::new()),
        ]
    }

    fn command_picker() -> Picker {
        let mut picker = Picker::new("Select command:", commands(), PickerOptions::commands());
        assert_eq!(picker.start(), Step::Continue);
        picker
    }

    fn values(list: &[&str], allow_skip: bool, allow_custom: bool) -> Picker {
        let items = list.iter().map(|v| Item::label(v)).collect();
        Picker::new(
            "Select value:",
            items,
            PickerOptions::values(allow_skip, allow_custom),
        )
    }

    fn feed(picker: &mut Picker, keys: &[KeyEvent]) -> Step {
        let mut step = Step::Continue;
        for key in keys {
            step = picker.handle_key(*key);
        }
        step
    }

    #[test]
    fn test_navigation_clamps() {
        let mut picker = command_picker();

        feed(&mut picker, &[key(KeyCode::Up), ch('k')]);
        assert_eq!(picker.selected_row(), Some(Row::Item(0)));

        feed(&mut picker, &[ch('j'), key(KeyCode::Down), ch('J'), key(KeyCode::Down)]);
        assert_eq!(picker.selected_row(), Some(Row::Item(2)));

        assert_eq!(
            picker.handle_key(key(KeyCode::Enter)),
            Step::Done(Outcome::Select("logs".to_string()))
        );
    }

    #[test]
    fn test_cancel_keys() {
        for cancel in [ch('q'), key(KeyCode::Esc), ctrl_c()] {
            let mut picker = command_picker();
            assert_eq!(picker.handle_key(cancel), Step::Done(Outcome::Cancel));
        }
    }

    #[test]
    fn test_zero_items_cancel() {
        let mut picker = Picker::new("Select:", Vec::new(), PickerOptions::commands());
        assert_eq!(picker.start(), Step::Done(Outcome::Cancel));
    }

    #[test]
    fn test_filter_matches_case_insensitively() {
        let mut picker = command_picker();
        feed(&mut picker, &[ch('/'), ch('D'), ch('O'), ch('C')]);

        assert_eq!(picker.mode(), Mode::Filtering);
        assert_eq!(picker.filter(), "DOC");
        assert_eq!(picker.rows(), &[Row::Item(1), Row::Item(2)]);

        feed(&mut picker, &[key(KeyCode::Down)]);
        assert_eq!(
            picker.handle_key(key(KeyCode::Enter)),
            Step::Done(Outcome::Select("logs".to_string()))
        );
    }

    #[test]
    fn test_filter_matches_tags() {
        let mut picker = command_picker();
        feed(&mut picker, &[ch('/'), ch('r'), ch('u'), ch('s'), ch('t')]);

        assert_eq!(picker.rows(), &[Row::Item(0)]);
    }

    #[test]
    fn test_filter_without_matches_ignores_enter() {
        let mut picker = command_picker();
        feed(&mut picker, &[ch('/'), ch('z'), ch('z')]);

        assert!(picker.rows().is_empty());
        assert_eq!(picker.handle_key(key(KeyCode::Enter)), Step::Continue);
        assert_eq!(picker.mode(), Mode::Filtering);
        assert_eq!(picker.filter(), "zz");

        let frame = picker.frame(80, 24);
        assert!(frame.iter().any(|l| l.text == "  (no matches)"));
        assert!(frame.iter().any(|l| l.text == "  /zz"));

        feed(&mut picker, &[key(KeyCode::Backspace), key(KeyCode::Backspace)]);
        assert_eq!(picker.rows().len(), 3);

        feed(&mut picker, &[ch('x'), key(KeyCode::Esc)]);
        assert_eq!(picker.mode(), Mode::Browsing);
        assert_eq!(picker.filter(), "");
        assert_eq!(picker.rows().len(), 3);
    }

    #[test]
    fn test_filter_treats_letters_as_text() {
        let mut picker = command_picker();
        let step = feed(&mut picker, &[ch('/'), ch('q'), ch('j'), ch('s')]);

        assert_eq!(step, Step::Continue);
        assert_eq!(picker.filter(), "qjs");
        assert_eq!(picker.handle_key(ctrl_c()), Step::Done(Outcome::Cancel));
    }

    #[test]
    fn test_extra_arguments() {
        let mut picker = command_picker();

        let step = picker.handle_key(ch('e'));
        assert_eq!(
            step,
            Step::AskText {
                prompt: "Extra arguments: ".to_string(),
                initial: String::new()
            }
        );
        assert_eq!(picker.submit_text("  "), Step::Continue);
        assert_eq!(picker.mode(), Mode::Browsing);

        picker.handle_key(ch('e'));
        assert_eq!(
            picker.submit_text("--verbose"),
            Step::Done(Outcome::SelectWithExtra("build".to_string(), "--verbose".to_string()))
        );
    }

    #[test]
    fn test_delete_confirmation() {
        let mut picker = command_picker();
        feed(&mut picker, &[ch('j'), ch('x')]);
        assert_eq!(picker.mode(), Mode::ConfirmingDelete);
        assert!(picker
            .frame(80, 24)
            .iter()
            .any(|l| l.text == "  Delete 'up'? (y/n)" && l.style == LineStyle::Warning));

        assert_eq!(picker.handle_key(ch('n')), Step::Continue);
        assert_eq!(picker.mode(), Mode::Browsing);
        assert_eq!(picker.selected_row(), Some(Row::Item(1)));

        picker.handle_key(ch('x'));
        assert_eq!(
            picker.handle_key(ch('Y')),
            Step::Done(Outcome::Delete("up".to_string()))
        );
    }

    #[test]
    fn test_modify_prompts_prefill_and_keep_blank_answers() {
        let mut picker = command_picker();
        feed(&mut picker, &[ch('j')]);

        assert_eq!(
            picker.handle_key(ch('m')),
            Step::AskText {
                prompt: "New name: ".to_string(),
                initial: "up".to_string()
            }
        );
        assert_eq!(
            picker.submit_text("start"),
            Step::AskText {
                prompt: "New command: ".to_string(),
                initial: "docker compose up -d".to_string()
            }
        );
        assert_eq!(
            picker.submit_text(""),
            Step::AskText {
                prompt: "New tags (comma-separated): ".to_string(),
                initial: "docker, dev".to_string()
            }
        );
        assert_eq!(
            picker.submit_text("docker, , prod"),
            Step::Done(Outcome::Modify {
                name: "up".to_string(),
                new_name: "start".to_string(),
                new_command: "docker compose up -d".to_string(),
                new_tags: vec!["docker".to_string(), "prod".to_string()],
            })
        );
    }

    #[test]
    fn test_skip_and_custom_rows() {
        let mut picker = values(&["dev", "prod"], true, true);
        assert_eq!(picker.start(), Step::Continue);
        assert_eq!(
            picker.rows(),
            &[Row::Skip, Row::Item(0), Row::Item(1), Row::Custom]
        );

        assert_eq!(picker.handle_key(key(KeyCode::Enter)), Step::Done(Outcome::Skip));

        let mut picker = values(&["dev", "prod"], true, true);
        feed(&mut picker, &[ch('j'), ch('j'), ch('j')]);
        assert_eq!(
            picker.handle_key(key(KeyCode::Enter)),
            Step::AskText {
                prompt: "Select value: ".to_string(),
                initial: String::new()
            }
        );
        assert_eq!(picker.submit_text(""), Step::Continue);
        assert_eq!(picker.mode(), Mode::Browsing);

        picker.handle_key(ch('c'));
        assert_eq!(
            picker.submit_text("staging"),
            Step::Done(Outcome::Custom("staging".to_string()))
        );
    }

    #[test]
    fn test_skip_and_custom_keys_need_options() {
        let mut picker = values(&["a"], false, false);
        assert_eq!(picker.handle_key(ch('s')), Step::Continue);
        assert_eq!(picker.handle_key(ch('c')), Step::Continue);

        let mut picker = values(&["a"], true, false);
        assert_eq!(picker.handle_key(ch('S')), Step::Done(Outcome::Skip));
    }

    #[test]
    fn test_custom_only_starts_with_input() {
        let mut optional = values(&[], true, true);
        assert!(matches!(optional.start(), Step::AskText { .. }));
        assert_eq!(optional.submit_text(""), Step::Done(Outcome::Skip));

        let mut required = values(&[], false, true);
        required.start();
        assert_eq!(required.submit_text(""), Step::Done(Outcome::Cancel));

        let mut typed = values(&[], false, true);
        typed.start();
        assert_eq!(
            typed.submit_text(" hello "),
            Step::Done(Outcome::Custom("hello".to_string()))
        );
    }

    #[test]
    fn test_menu_ignores_list_actions() {
        let items = vec![Item::label("Keep static"), Item::label("Make optional")];
        let mut picker = Picker::new("Flag --all", items, PickerOptions::menu());

        for k in [ch('/'), ch('e'), ch('x'), ch('m'), ch('s'), ch('c')] {
            assert_eq!(picker.handle_key(k), Step::Continue);
            assert_eq!(picker.mode(), Mode::Browsing);
        }
        assert_eq!(
            picker.frame(80, 24).last().unwrap().text,
            "  [↑/↓/j/k] navigate  [Enter] select  [q] cancel"
        );
    }

    #[test]
    fn test_frame_layout() {
        let picker = command_picker();
        let frame = picker.frame(120, 24);

        assert_eq!(frame[0], Line::new("Select command:", LineStyle::Prompt));
        assert_eq!(
            frame[1],
            Line::new(
                "  > build  [rust]         cargo build --release",
                LineStyle::Selected
            )
        );
        assert_eq!(frame[2].text, "    up     [docker, dev]  docker compose up -d");
        assert_eq!(frame[3].text, "    logs                  docker compose logs -f");
        assert_eq!(
            frame[4].text,
            "  [↑/↓/j/k] navigate  [Enter] select  [/] filter  [e] extra  [m] modify  [x] delete  [q] cancel"
        );
        assert_eq!(frame.len(), 5);
    }

    #[test]
    fn test_columns_stay_fixed_while_filtering() {
        let mut picker = command_picker();
        feed(&mut picker, &[ch('/'), ch('l'), ch('o'), ch('g')]);
        let frame = picker.frame(80, 24);

        assert_eq!(frame[1].text, "  > logs                  docker compose logs -f");
        assert_eq!(frame[2].text, "  /log");
        assert!(frame[3].text.contains("[Esc] clear filter"));
    }

    #[test]
    fn test_long_commands_are_truncated() {
        let long = "x".repeat(100);
        let picker = Picker::new(
            "Select:",
            vec![Item::new("n", &long, Vec::new())],
            PickerOptions::commands(),
        );

        let row = &picker.frame(40, 24)[1].text;
        // 40 - 4 - 1 - 2 - 0 - 2 - 1 = 30 columns for the command.
        assert!(row.ends_with("..."));
        assert_eq!(row.chars().count(), "  > n  ".len() + 30);

        let narrow = &picker.frame(10, 24)[1].text;
        assert_eq!(narrow, "  > n  ...");
    }

    #[test]
    fn test_no_frame_line_is_wider_than_the_terminal() {
        let mut items = commands();
        items.push(Item::new(
            "a-rather-long-command-name",
            &"kubectl get pods ".repeat(8),
            vec!["kubernetes".to_string(), "production".to_string()],
        ));
        let mut picker = Picker::new("Select command:", items, PickerOptions::commands());
        assert_eq!(picker.start(), Step::Continue);

        for width in [80, 40, 12, 2] {
            for line in picker.frame(width, 24) {
                assert!(
                    line.text.chars().count() <= width,
                    "{width} columns: `{}`",
                    line.text
                );
            }
        }

        let help = picker.frame(80, 24).pop().unwrap().text;
        assert_eq!(help.chars().count(), 80);
        assert!(help.ends_with("..."));

        feed(&mut picker, &[ch('/')]);
        assert!(picker
            .frame(40, 24)
            .iter()
            .all(|line| line.text.chars().count() <= 40));
    }

    #[test]
    fn test_frame_scrolls_to_selection() {
        let items = (0..30).map(|i| Item::label(&format!("v{i:02}"))).collect();
        let mut picker = Picker::new("Pick:", items, PickerOptions::values(false, false));
        for _ in 0..25 {
            picker.handle_key(ch('j'));
        }

        let frame = picker.frame(80, 14);
        let rows = &frame[1..frame.len() - 1];
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].text, "    v16");
        assert_eq!(rows[9].text, "  > v25");
    }
}
