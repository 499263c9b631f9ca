//! The `lz` subcommands.

use std::io::{stdin, IsTerminal, Read};

use chrono::{DateTime, Utc};
use itertools::Itertools;
use laziest_core::binding;
use laziest_core::command_definitions::{HistoryEntry, SavedCommand};
use laziest_core::config::{self, Paths};
use laziest_core::error::{Error, Result};
use laziest_core::file_handling::{self, parse_tags, validate_name, CommandStore};
use laziest_core::{execution, interpolation, shell};
use log::{debug, warn};

use crate::cli_args::Action;
use crate::command_builder;
use crate::command_selection::{Item, Outcome, PickerOptions, Prompter};
use crate::resolution;

const RULE_WIDTH: usize = 40;
const HISTORY_COMMAND_WIDTH: usize = 50;

/// Everything a subcommand needs: where files live, which shell runs
/// commands, and who answers prompts.
pub struct Session<'a> {
    paths: Paths,
    shell: String,
    prompter: &'a mut dyn Prompter,
}

impl<'a> Session<'a> {
    pub fn new(paths: Paths, shell: String, prompter: &'a mut dyn Prompter) -> Self {
        debug!("Config paths: {:?}", paths);
        Self {
            paths,
            shell,
            prompter,
        }
    }

    /// Runs one subcommand. No subcommand opens the interactive list.
    ///
    /// # Errors
    ///
    /// Store, parse and terminal errors are returned as is. A command that
    /// exits non-zero yields [`Error::SubProcessExit`] with its code.
    pub fn dispatch(&mut self, action: Option<Action>) -> Result<()> {
        match action {
            None => self.list(&[], false),
            Some(Action::List { tags, plain }) => self.list(&tags, plain),
            Some(Action::Add { example }) => self.add(&example.join(" ")),
            Some(Action::AddRaw { name, command, tags }) => {
                let command = if command.is_empty() {
                    read_piped_command()?
                } else {
                    command.join(" ")
                };
                self.add_raw(&name, &command, &tags)
            }
            Some(Action::Run { name, tags, extra }) => {
                self.run(name.as_deref(), &tags, &extra.join(" "))
            }
            Some(Action::Last) => self.last(),
            Some(Action::Remove { name }) => self.remove(&name),
            Some(Action::Tags) => self.tags(),
            Some(Action::Init) => self.init(&config::rc_files()),
        }
    }

    /// Shows the saved commands, limited to those with any of `tags`.
    ///
    /// # Errors
    ///
    /// See [`Session::dispatch`].
    pub fn list(&mut self, tags: &[String], plain: bool) -> Result<()> {
        if plain {
            return self.print_table(tags);
        }
        self.browse(tags, "", false)
    }

    /// Builds a command from `example` and saves it under a name asked for
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Fails on an invalid name or tag, a name in use, or store errors.
    pub fn add(&mut self, example: &str) -> Result<()> {
        let Some(template) = command_builder::build(&mut *self.prompter, example)? else {
            println!("Cancelled.");
            return Ok(());
        };

        println!("{}", "-".repeat(RULE_WIDTH));
        println!("Generated command:\n  {template}\n");
        warn_about_bindings(&template)?;

        let name = self.prompter.input("Command name: ", "")?;
        let name = name.trim();
        if name.is_empty() {
            println!("Cancelled.");
            return Ok(());
        }
        validate_name(name)?;

        let tags = parse_tags(&self.prompter.input("Tags (comma-separated, optional): ", "")?)?;

        println!();
        self.save_new(name, &template, tags)
    }

    /// Saves a command written with binding syntax as is.
    ///
    /// # Errors
    ///
    /// Fails when the command is empty or has a malformed placeholder, on
    /// an invalid name or tag, a name in use, or store errors.
    pub fn add_raw(&mut self, name: &str, command: &str, tags: &[String]) -> Result<()> {
        validate_name(name)?;
        let command = command.trim();
        if command.is_empty() {
            return Err(Error::EmptyCommand);
        }
        warn_about_bindings(command)?;

        let tags = parse_tags(&tags.join(","))?;
        self.save_new(name, command, tags)
    }

    /// Runs a command by name, or offers the commands carrying any of
    /// `tags`. A single match runs without asking.
    ///
    /// # Errors
    ///
    /// Fails for an unknown name, when nothing is saved or nothing has the
    /// tags, and when resolution or execution fails.
    pub fn run(&mut self, name: Option<&str>, tags: &[String], extra: &str) -> Result<()> {
        let store = CommandStore::load(&self.paths.commands)?;
        if store.commands().is_empty() {
            return Err(Error::NoCommands);
        }

        match name {
            Some(name) => {
                let command = store
                    .get(name)
                    .cloned()
                    .ok_or_else(|| Error::CommandNotFound(name.to_string()))?;
                self.run_saved(&command, extra)
            }
            None => self.browse(tags, extra, true),
        }
    }

    /// Offers the run history and reruns the chosen command.
    ///
    /// # Errors
    ///
    /// Fails when the history cannot be read or the command fails.
    pub fn last(&mut self) -> Result<()> {
        let entries = file_handling::get_history(&self.paths.history)?;
        if entries.is_empty() {
            println!("No recent commands.");
            println!("Run commands with 'lz' or 'lz run <name>' first.");
            return Ok(());
        }

        let labels = history_labels(&entries, Utc::now());
        let items = labels.iter().map(|label| Item::label(label)).collect();

        let chosen = match self
            .prompter
            .pick("Recent commands:", items, PickerOptions::filterable())?
        {
            Outcome::Select(label) => labels.iter().position(|l| *l == label),
            _ => None,
        };

        match chosen.and_then(|index| entries.get(index)) {
            Some(entry) => self.execute(&entry.name, &entry.command),
            None => Ok(()),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::CommandNotFound`] for an unknown name, or store errors.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let mut store = CommandStore::load(&self.paths.commands)?;
        store.remove(name)?;
        store.save()?;
        self.refresh_aliases(&store);

        println!("Removed '{name}'");
        Ok(())
    }

    /// # Errors
    ///
    /// Fails when the store cannot be read.
    pub fn tags(&self) -> Result<()> {
        let store = CommandStore::load(&self.paths.commands)?;
        let counts = store.tag_counts();

        if counts.is_empty() {
            println!("No tags defined. Add tags with: lz add-raw <name> <cmd> -t <tags>");
            return Ok(());
        }

        println!("Tags:");
        println!();
        for (tag, count) in counts {
            println!("  {tag:<20} ({count} commands)");
        }
        Ok(())
    }

    /// Adds the alias source line to each of `rc_files` that exists.
    ///
    /// # Errors
    ///
    /// Fails only when the alias file cannot be created.
    pub fn init(&self, rc_files: &[String]) -> Result<()> {
        let report = shell::init(&self.paths.aliases, rc_files)?;
        for (file, e) in &report.failures {
            eprintln!("Warning: {file}: {e}");
        }

        if report.updated.is_empty() {
            println!("lz is already configured in your shell rc files.");
            println!("If aliases aren't working, try: source ~/.bashrc or source ~/.zshrc");
            return Ok(());
        }

        println!("Added source line to:");
        for file in &report.updated {
            println!("  - {file}");
        }
        println!();
        println!("Run 'source ~/.bashrc' or 'source ~/.zshrc' to activate.");
        Ok(())
    }

    /// Picker over the saved commands. Deleting or modifying a command
    /// returns to the picker; selecting one runs it.
    fn browse(&mut self, tags: &[String], extra: &str, run_single: bool) -> Result<()> {
        loop {
            let mut store = CommandStore::load(&self.paths.commands)?;
            if store.commands().is_empty() {
                print_get_started();
                return Ok(());
            }

            let matching = select(&store, tags);
            if matching.is_empty() {
                if run_single {
                    return Err(Error::NoTaggedCommands(tags.join(", ")));
                }
                if tags.is_empty() {
                    println!("No commands left.");
                } else {
                    println!("No commands found with tag(s): {}", tags.join(", "));
                }
                return Ok(());
            }

            if run_single && matching.len() == 1 {
                let command = matching[0].clone();
                return self.run_saved(&command, extra);
            }

            let prompt = if tags.is_empty() {
                "Select command:".to_string()
            } else {
                format!("Select command [{}]:", tags.join(", "))
            };
            let items = matching
                .iter()
                .map(|c| Item::new(&c.name, &c.command, c.tags.iter().cloned().collect()))
                .collect();

            match self.prompter.pick(&prompt, items, PickerOptions::commands())? {
                Outcome::Select(name) => return self.run_named(&store, &name, extra),
                Outcome::SelectWithExtra(name, more) => {
                    let extra = interpolation::append_extra(extra, &more);
                    return self.run_named(&store, &name, &extra);
                }
                Outcome::Delete(name) => {
                    store.remove(&name)?;
                    store.save()?;
                    self.refresh_aliases(&store);
                    println!("Deleted '{name}'");
                }
                Outcome::Modify {
                    name,
                    new_name,
                    new_command,
                    new_tags,
                } => self.modify(&mut store, &name, &new_name, &new_command, new_tags)?,
                _ => return Ok(()),
            }
        }
    }

    /// Applies a picker edit. Rejected edits are reported and leave the
    /// store untouched.
    fn modify(
        &mut self,
        store: &mut CommandStore,
        name: &str,
        new_name: &str,
        new_command: &str,
        new_tags: Vec<String>,
    ) -> Result<()> {
        if let Err(e) = store.update(name, new_name, new_command, new_tags) {
            eprintln!("Error: {e}");
            return Ok(());
        }
        store.save()?;
        self.refresh_aliases(store);

        if new_name == name {
            println!("Modified '{name}'");
        } else {
            println!("Modified '{name}' -> '{new_name}'");
        }
        Ok(())
    }

    fn run_named(&mut self, store: &CommandStore, name: &str, extra: &str) -> Result<()> {
        let command = store
            .get(name)
            .cloned()
            .ok_or_else(|| Error::CommandNotFound(name.to_string()))?;
        self.run_saved(&command, extra)
    }

    fn run_saved(&mut self, command: &SavedCommand, extra: &str) -> Result<()> {
        let Some(resolved) = resolution::resolve_command(&mut *self.prompter, &command.command)?
        else {
            return Ok(());
        };

        let final_command = interpolation::append_extra(&resolved, extra);
        self.execute(&command.name, &final_command)
    }

    fn execute(&self, name: &str, command: &str) -> Result<()> {
        if let Err(e) = file_handling::record_history(&self.paths.history, HistoryEntry::new(name, command)) {
            warn!("Could not record `{}` in the history: {}", command, e);
        }

        println!("Running: {command}");
        println!("{}", "-".repeat(RULE_WIDTH));
        execution::run_in_shell(&self.shell, command)
    }

    fn save_new(&self, name: &str, command: &str, tags: Vec<String>) -> Result<()> {
        let mut store = CommandStore::load(&self.paths.commands)?;
        store.add(SavedCommand::new(name, command, tags.iter().cloned()))?;
        store.save()?;
        self.refresh_aliases(&store);

        println!("Added '{name}': {command}");
        if !tags.is_empty() {
            println!("Tags: {}", tags.iter().join(", "));
        }
        Ok(())
    }

    fn refresh_aliases(&self, store: &CommandStore) {
        if let Err(e) = shell::update_aliases(&self.paths.aliases, store.commands()) {
            eprintln!("Warning: {e}");
        }
    }

    fn print_table(&self, tags: &[String]) -> Result<()> {
        let store = CommandStore::load(&self.paths.commands)?;
        if store.commands().is_empty() {
            print_get_started();
            return Ok(());
        }

        let matching = select(&store, tags);
        if matching.is_empty() {
            println!("No commands found with tag(s): {}", tags.join(", "));
            return Ok(());
        }

        let name_width = matching.iter().map(|c| c.name.len()).max().unwrap_or(0);
        let tag_width = matching
            .iter()
            .map(|c| c.tags_label().len())
            .max()
            .unwrap_or(0);

        println!();
        for command in matching {
            println!(
                "  {:<name_width$}  {:<tag_width$}  {}",
                command.name,
                command.tags_label(),
                command.command
            );
        }
        println!();
        Ok(())
    }
}

/// Every saved command when `tags` is empty, else those with any of them.
fn select<'s>(store: &'s CommandStore, tags: &[String]) -> Vec<&'s SavedCommand> {
    if tags.is_empty() {
        store.commands().iter().collect()
    } else {
        store.with_tags(tags)
    }
}

/// Rejects malformed placeholders and prints advisory warnings.
fn warn_about_bindings(command: &str) -> Result<()> {
    for binding in binding::parse(command)? {
        for warning in binding::validate(&binding) {
            eprintln!("Warning: {warning}");
        }
    }
    Ok(())
}

fn read_piped_command() -> Result<String> {
    if stdin().is_terminal() {
        return Err(Error::EmptyCommand);
    }

    let mut command = String::new();
    stdin()
        .read_to_string(&mut command)
        .map_err(Error::Stdio)?;
    Ok(command)
}

fn print_get_started() {
    println!("No commands saved.");
    println!();
    println!("Get started:");
    println!("  1. Run 'lz init' to set up shell integration");
    println!("  2. Add commands with 'lz add \"<command>\"'");
}

/// One numbered row per history entry. The number keeps rows distinct when
/// shortened commands and ages coincide.
fn history_labels(entries: &[HistoryEntry], now: DateTime<Utc>) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{:>2}. {:<width$}  {}",
                i + 1,
                shorten(&entry.command, HISTORY_COMMAND_WIDTH),
                entry.age_label(now),
                width = HISTORY_COMMAND_WIDTH
            )
        })
        .collect()
}

fn shorten(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
