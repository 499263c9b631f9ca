use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The sub process exited with code {}.", .0)]
    SubProcessExit(i32),

    #[error("The sub process was terminated by a signal.")]
    SubProcessSignal,

    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("STDIO error: {}", .0)]
    Stdio(std::io::Error),

    #[error("Empty binding: {}", .0)]
    EmptyBinding(String),

    #[error("Value binding cannot be empty: {}", .0)]
    EmptyValueList(String),

    #[error("Value binding contains an empty value: {}", .0)]
    EmptyValue(String),

    #[error("Value binding lists `{}` more than once: {}", .value, .placeholder)]
    DuplicateValue { placeholder: String, value: String },

    #[error("Unrecognized binding: {}", .0)]
    UnrecognizedBinding(String),

    #[error("Binding `{}` no longer matches its position in the command", .0)]
    StaleBinding(String),

    #[error("Directory `{}` does not exist", .0)]
    DirectoryMissing(String),

    #[error("`{}` is not a directory", .0)]
    NotADirectory(String),

    #[error("Cannot access `{}`: {}", .path, .original)]
    DirectoryAccess {
        path: String,
        original: std::io::Error,
    },

    #[error("Invalid filter pattern `{}`: {}", .filter, .original)]
    InvalidFilter {
        filter: String,
        original: globset::Error,
    },

    #[error("No files found in `{}`", .0)]
    NoFiles(String),

    #[error("No files found in `{}` matching `{}`", .path, .filter)]
    NoMatchingFiles { path: String, filter: String },

    #[error("Command `{}` not found", .0)]
    CommandNotFound(String),

    #[error("Command with name `{}` already exists", .0)]
    DuplicateName(String),

    #[error("Invalid alias name `{}`: must start with a letter or underscore and contain only letters, numbers and underscores", .0)]
    InvalidName(String),

    #[error("Invalid tag `{}`: must contain only letters, numbers and underscores", .0)]
    InvalidTag(String),

    #[error("Command cannot be empty")]
    EmptyCommand,

    #[error("No commands saved. Use 'lz add \"<command>\"' to add one.")]
    NoCommands,

    #[error("No commands found with tag(s): {}", .0)]
    NoTaggedCommands(String),
}

impl Error {
    pub fn yaml_error(
        action: &str,
        file_description: &str,
        path: &str,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action: action.to_string(),
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }

    pub fn io_error(file_description: &str, path: &str, original: std::io::Error) -> Self {
        Self::Io {
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }

    /// True for the syntax errors produced while parsing placeholders.
    #[must_use]
    pub fn is_binding_syntax(&self) -> bool {
        matches!(
            self,
            Self::EmptyBinding(_)
                | Self::EmptyValueList(_)
                | Self::EmptyValue(_)
                | Self::DuplicateValue { .. }
                | Self::UnrecognizedBinding(_)
        )
    }
}
