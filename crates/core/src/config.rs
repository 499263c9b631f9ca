//! Configuration paths and the shell used to run commands.
//!
//! Everything lives in one directory, `~/.config/laziest` unless another
//! directory is given on the command line.

use std::path::Path;

/// Default directory holding the commands, history and alias files.
const DEFAULT_CONFIG_DIR: &str = "~/.config/laziest";

const COMMANDS_FILE: &str = "commands.yml";
const HISTORY_FILE: &str = "history.yml";
const ALIASES_FILE: &str = "aliases.sh";

/// Shell used when `$SHELL` is not set.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Shell startup files that `lz init` may update.
const RC_FILES: [&str; 2] = ["~/.bashrc", "~/.zshrc"];

/// Resolved locations of the files laziest reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub config_dir: String,
    pub commands: String,
    pub history: String,
    pub aliases: String,
}

impl Paths {
    /// Resolves all paths below `config_dir`, or below the default
    /// directory when none is given. `~` is expanded.
    ///
    /// # Examples
    ///
    /// ```
    /// use laziest_core::config::Paths;
    ///
    /// let paths = Paths::resolve(Some("/tmp/lz"));
    /// assert_eq!(paths.commands, "/tmp/lz/commands.yml");
    /// ```
    pub fn resolve(config_dir: Option<&str>) -> Self {
        let config_dir = shellexpand::tilde(config_dir.unwrap_or(DEFAULT_CONFIG_DIR)).to_string();
        let join = |file: &str| Path::new(&config_dir).join(file).to_string_lossy().into_owned();

        Self {
            commands: join(COMMANDS_FILE),
            history: join(HISTORY_FILE),
            aliases: join(ALIASES_FILE),
            config_dir,
        }
    }
}

/// The shell named by `$SHELL`, or [`DEFAULT_SHELL`].
pub fn shell() -> String {
    shell_from(std::env::var("SHELL").ok())
}

fn shell_from(value: Option<String>) -> String {
    value
        .filter(|shell| !shell.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SHELL.to_string())
}

/// Expanded paths of the shell startup files, whether or not they exist.
pub fn rc_files() -> Vec<String> {
    RC_FILES
        .iter()
        .map(|file| shellexpand::tilde(file).to_string())
        .collect()
}
