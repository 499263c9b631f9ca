//! Reading and writing the saved commands and the run history.
//!
//! Both files are YAML lists. A missing or blank file reads as empty, and
//! writing creates the parent directory when needed.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::command_definitions::{HistoryEntry, SavedCommand};
use crate::error::{Error, Result};

/// Most entries kept in the run history.
pub const HISTORY_LIMIT: usize = 20;

fn read_list<T: DeserializeOwned>(file_description: &str, path: &str) -> Result<Vec<T>> {
    if !Path::new(path).exists() {
        debug!("No {} file at {}, starting empty", file_description, path);
        return Ok(Vec::new());
    }

    let content =
        fs::read_to_string(path).map_err(|e| Error::io_error(file_description, path, e))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_yaml::from_str(&content)
        .map_err(|e| Error::yaml_error("reading", file_description, path, e))
}

fn write_list<T: Serialize>(file_description: &str, path: &str, items: &[T]) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io_error(file_description, path, e))?;
    }

    let file = File::create(path).map_err(|e| Error::io_error(file_description, path, e))?;
    serde_yaml::to_writer(file, items)
        .map_err(|e| Error::yaml_error("writing", file_description, path, e))
}

/// Checks an alias name: a letter or `_`, then letters, digits or `_`.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] otherwise.
pub fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidName(name.to_string()))
    }
}

/// # Errors
///
/// Returns [`Error::InvalidTag`] unless the tag is non-empty letters,
/// digits and `_`.
pub fn validate_tag(tag: &str) -> Result<()> {
    if !tag.is_empty() && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(Error::InvalidTag(tag.to_string()))
    }
}

/// Splits comma-separated tags, dropping blanks and validating the rest.
///
/// # Errors
///
/// Returns [`Error::InvalidTag`] for the first invalid tag.
pub fn parse_tags(input: &str) -> Result<Vec<String>> {
    let mut tags = Vec::new();
    for tag in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        validate_tag(tag)?;
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    Ok(tags)
}

/// The saved commands, in the order they were added.
#[derive(Debug)]
pub struct CommandStore {
    commands: Vec<SavedCommand>,
    path: String,
}

impl CommandStore {
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self> {
        let commands: Vec<SavedCommand> = read_list("commands", path)?;
        debug!("Loaded {} command(s) from {}", commands.len(), path);

        Ok(Self {
            commands,
            path: path.to_string(),
        })
    }

    /// # Errors
    ///
    /// Fails when the directory or file cannot be written.
    pub fn save(&self) -> Result<()> {
        write_list("commands", &self.path, &self.commands)?;
        debug!("Saved {} command(s) to {}", self.commands.len(), self.path);
        Ok(())
    }

    pub fn commands(&self) -> &[SavedCommand] {
        &self.commands
    }

    pub fn get(&self, name: &str) -> Option<&SavedCommand> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Adds a command. Nothing is written until [`CommandStore::save`].
    ///
    /// # Errors
    ///
    /// Rejects invalid names and tags, empty commands and names in use.
    pub fn add(&mut self, command: SavedCommand) -> Result<()> {
        validate_name(&command.name)?;
        if command.command.trim().is_empty() {
            return Err(Error::EmptyCommand);
        }
        for tag in &command.tags {
            validate_tag(tag)?;
        }
        if self.get(&command.name).is_some() {
            return Err(Error::DuplicateName(command.name));
        }

        self.commands.push(command);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::CommandNotFound`] for an unknown name.
    pub fn remove(&mut self, name: &str) -> Result<SavedCommand> {
        let index = self.position(name)?;
        Ok(self.commands.remove(index))
    }

    /// Replaces the name, command and tags of an existing command, keeping
    /// its position and `added_at`.
    ///
    /// # Errors
    ///
    /// Fails for an unknown name, an invalid or taken new name, an empty
    /// command or an invalid tag.
    pub fn update(
        &mut self,
        name: &str,
        new_name: &str,
        new_command: &str,
        new_tags: Vec<String>,
    ) -> Result<()> {
        let index = self.position(name)?;

        validate_name(new_name)?;
        if new_command.trim().is_empty() {
            return Err(Error::EmptyCommand);
        }
        for tag in &new_tags {
            validate_tag(tag)?;
        }
        if new_name != name && self.get(new_name).is_some() {
            return Err(Error::DuplicateName(new_name.to_string()));
        }

        let command = &mut self.commands[index];
        command.name = new_name.to_string();
        command.command = new_command.to_string();
        command.tags = new_tags.into_iter().collect();
        Ok(())
    }

    /// Commands carrying any of `tags`, in store order.
    pub fn with_tags(&self, tags: &[String]) -> Vec<&SavedCommand> {
        self.commands
            .iter()
            .filter(|c| c.has_any_tag(tags))
            .collect()
    }

    /// Every tag in use, sorted.
    pub fn tags(&self) -> Vec<String> {
        self.tag_counts().into_keys().collect()
    }

    pub fn tag_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for tag in self.commands.iter().flat_map(|c| c.tags.iter()) {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
        counts
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.commands
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| Error::CommandNotFound(name.to_string()))
    }
}

/// Reads the run history, most recent first.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn get_history(path: &str) -> Result<Vec<HistoryEntry>> {
    read_list("history", path)
}

/// Puts `entry` at the front of the history, dropping an older entry for
/// the same command and trimming to [`HISTORY_LIMIT`].
///
/// # Errors
///
/// Fails when the history cannot be read or written.
pub fn record_history(path: &str, entry: HistoryEntry) -> Result<()> {
    let mut history = get_history(path)?;
    history.retain(|e| e.command != entry.command);
    history.insert(0, entry);
    history.truncate(HISTORY_LIMIT);

    write_list("history", path, &history)
}
