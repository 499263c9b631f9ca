use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A named command template, as stored in `commands.yml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SavedCommand {
    pub name: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub tags: IndexSet<String>,
    pub added_at: DateTime<Utc>,
}

impl SavedCommand {
    pub fn new<I>(name: &str, command: &str, tags: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            name: name.to_string(),
            command: command.to_string(),
            tags: tags.into_iter().collect(),
            added_at: Utc::now(),
        }
    }

    /// Tags as shown in lists, e.g. `[docker, prod]`, or empty.
    pub fn tags_label(&self) -> String {
        if self.tags.is_empty() {
            String::new()
        } else {
            let tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
            format!("[{}]", tags.join(", "))
        }
    }

    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|tag| self.tags.contains(tag))
    }
}

impl Display for SavedCommand {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} ({})", self.name, self.command)
    }
}

/// One executed command in the recency list.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The fully resolved command that was run.
    pub command: String,
    /// Name of the saved command it came from.
    pub name: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(name: &str, command: &str) -> Self {
        Self {
            command: command.to_string(),
            name: name.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Age relative to `now`: `just now`, `5m ago`, `3h ago`, `2d ago`.
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let elapsed = now.signed_duration_since(self.timestamp);

        if elapsed.num_minutes() < 1 {
            "just now".to_string()
        } else if elapsed.num_hours() < 1 {
            format!("{}m ago", elapsed.num_minutes())
        } else if elapsed.num_days() < 1 {
            format!("{}h ago", elapsed.num_hours())
        } else {
            format!("{}d ago", elapsed.num_days())
        }
    }
}

impl Display for HistoryEntry {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_tags_label() {
        let tagged = SavedCommand::new("up", "docker compose up", ["docker".to_string(), "dev".to_string()]);
        assert_eq!(tagged.tags_label(), "[docker, dev]");

        let untagged = SavedCommand::new("ll", "ls -la", Vec::new());
        assert_eq!(untagged.tags_label(), "");
    }

    #[test]
    fn test_has_any_tag() {
        let command = SavedCommand::new("up", "docker compose up", ["docker".to_string()]);

        assert!(command.has_any_tag(&["prod".to_string(), "docker".to_string()]));
        assert!(!command.has_any_tag(&["prod".to_string()]));
        assert!(!command.has_any_tag(&[]));
    }

    #[test]
    fn test_age_label() {
        let now = Utc::now();
        let mut entry = HistoryEntry::new("ll", "ls -la");

        entry.timestamp = now - Duration::seconds(30);
        assert_eq!(entry.age_label(now), "just now");

        entry.timestamp = now - Duration::minutes(5);
        assert_eq!(entry.age_label(now), "5m ago");

        entry.timestamp = now - Duration::hours(3);
        assert_eq!(entry.age_label(now), "3h ago");

        entry.timestamp = now - Duration::days(2);
        assert_eq!(entry.age_label(now), "2d ago");
    }

    #[test]
    fn test_saved_command_yaml_without_tags() {
        let yaml = "name: ll\ncommand: ls -la\nadded_at: 2024-01-02T03:04:05Z\n";
        let command: SavedCommand = serde_yaml::from_str(yaml).unwrap();

        assert!(command.tags.is_empty());
        assert_eq!(command.to_string(), "ll (ls -la)");
        assert!(!serde_yaml::to_string(&command).unwrap().contains("tags"));
    }
}
