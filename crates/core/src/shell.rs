//! Shell alias file generation and startup file setup.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use log::{debug, info};

use crate::binding::has_bindings;
use crate::command_definitions::SavedCommand;
use crate::error::{Error, Result};

const HEADER: &str = "# Managed by lz - do not edit manually";

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

/// Renders the alias file. Commands with bindings go through `lz run` so
/// they stay interactive.
pub fn generate_aliases(commands: &[SavedCommand]) -> String {
    let mut script = format!("{HEADER}\n\n");

    for command in commands {
        let body = if has_bindings(&command.command) {
            format!("lz run {}", command.name)
        } else {
            command.command.clone()
        };
        script.push_str(&format!("alias {}={}\n", command.name, quote(&body)));
    }

    script
}

/// Rewrites the alias file at `path`.
///
/// # Errors
///
/// Fails when the file or its directory cannot be written.
pub fn update_aliases(path: &str, commands: &[SavedCommand]) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io_error("aliases", path, e))?;
    }

    fs::write(path, generate_aliases(commands)).map_err(|e| Error::io_error("aliases", path, e))?;
    debug!("Wrote {} alias(es) to {}", commands.len(), path);
    Ok(())
}

/// The line added to startup files.
pub fn source_line(aliases_path: &str) -> String {
    format!("[ -f {0} ] && source {0}", quote(aliases_path))
}

/// Outcome of [`init`].
#[derive(Debug, Default)]
pub struct InitReport {
    /// Startup files that gained the source line.
    pub updated: Vec<String>,
    /// Startup files that could not be updated, with the reason.
    pub failures: Vec<(String, Error)>,
}

/// Makes sure the alias file exists and that every existing file in
/// `rc_files` sources it. Files that already mention the alias file are
/// left alone.
///
/// # Errors
///
/// Fails only when the alias file cannot be created; problems with single
/// startup files are collected in the report.
pub fn init(aliases_path: &str, rc_files: &[String]) -> Result<InitReport> {
    if !Path::new(aliases_path).exists() {
        update_aliases(aliases_path, &[])?;
    }

    let mut report = InitReport::default();
    for rc_file in rc_files {
        match add_source_line(rc_file, aliases_path) {
            Ok(true) => {
                info!("Added alias source line to {}", rc_file);
                report.updated.push(rc_file.clone());
            }
            Ok(false) => {}
            Err(e) => report.failures.push((rc_file.clone(), e)),
        }
    }

    Ok(report)
}

fn add_source_line(rc_file: &str, aliases_path: &str) -> Result<bool> {
    if !Path::new(rc_file).exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(rc_file).map_err(|e| Error::io_error("rc", rc_file, e))?;
    if content.contains(aliases_path) {
        debug!("{} already sources {}", rc_file, aliases_path);
        return Ok(false);
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(rc_file)
        .map_err(|e| Error::io_error("rc", rc_file, e))?;
    write!(file, "\n# lz aliases\n{}\n", source_line(aliases_path))
        .map_err(|e| Error::io_error("rc", rc_file, e))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(name: &str, command: &str) -> SavedCommand {
        SavedCommand::new(name, command, Vec::new())
    }

    #[test]
    fn test_generate_aliases() {
        let script = generate_aliases(&[
            saved("ll", "ls -la"),
            saved("say", "echo 'hi there'"),
            saved("cfg", "app --config {%/etc/app%}"),
        ]);

        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert!(lines.contains(&"alias ll='ls -la'"));
        assert!(lines.contains(&r"alias say='echo '\''hi there'\'''"));
        assert!(lines.contains(&"alias cfg='lz run cfg'"));
    }

    #[test]
    fn test_init_updates_existing_rc_files_once() {
        let dir = tempfile::tempdir().unwrap();
        let aliases = dir.path().join("lz/aliases.sh");
        let aliases = aliases.to_str().unwrap();
        let bashrc = dir.path().join(".bashrc");
        fs::write(&bashrc, "export A=1\n").unwrap();
        let zshrc = dir.path().join(".zshrc");
        let rc_files = vec![
            bashrc.to_string_lossy().into_owned(),
            zshrc.to_string_lossy().into_owned(),
        ];

        let report = init(aliases, &rc_files).unwrap();
        assert_eq!(report.updated, vec![rc_files[0].clone()]);
        assert!(report.failures.is_empty());
        assert!(Path::new(aliases).exists());
        assert!(!zshrc.exists());

        let content = fs::read_to_string(&bashrc).unwrap();
        assert!(content.starts_with("export A=1\n"));
        assert!(content.contains("# lz aliases"));
        assert!(content.contains(&source_line(aliases)));

        let again = init(aliases, &rc_files).unwrap();
        assert!(again.updated.is_empty());
        assert_eq!(fs::read_to_string(&bashrc).unwrap(), content);
    }

    #[test]
    fn test_update_aliases_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases.sh");
        let path = path.to_str().unwrap();

        update_aliases(path, &[saved("ll", "ls -la")]).unwrap();
        assert!(fs::read_to_string(path).unwrap().contains("alias ll='ls -la'"));
    }
}
