//! Command-line argument parsing.
//!
//! This module defines the `lz` command-line interface using the `clap`
//! crate. Running `lz` without a subcommand opens the interactive picker.

use clap::{Parser, Subcommand};

/// Command-line arguments for the `lz` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use laziest_cli::cli_args::{Action, Args};
///
/// let args = Args::parse_from(["lz", "run", "train", "--extra", "--verbose"]);
/// assert!(matches!(args.action, Some(Action::Run { .. })));
/// ```
#[derive(Parser, Debug)]
#[command(name = "lz", version, about = "Quick command aliases manager")]
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Directory holding the saved commands, history and alias file.
    ///
    /// If not provided, defaults to `~/.config/laziest`.
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[command(subcommand)]
    pub action: Option<Action>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Action {
    /// Interactive picker, optionally limited to commands with any of the tags.
    #[command(visible_aliases = ["ls", "l"])]
    List {
        /// Comma-separated tags.
        #[arg(long, short = 't', value_delimiter = ',')]
        tags: Vec<String>,

        /// Print a table instead of opening the picker.
        #[arg(long, action)]
        plain: bool,
    },

    /// Build a command from an example, flag by flag.
    ///
    /// # Examples
    /// ```bash
    /// lz add "python train.py --config /configs/model.yaml --epochs 100"
    /// ```
    #[command(visible_alias = "a")]
    Add {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        example: Vec<String>,
    },

    /// Save a command written with binding syntax.
    ///
    /// The command is read from standard input when it is not given.
    ///
    /// # Examples
    /// ```bash
    /// lz add-raw train "python train.py --config {%/configs:*.yaml%}" -t ML
    /// echo "git status" | lz add-raw gs -t Git
    /// ```
    #[command(visible_alias = "ar")]
    AddRaw {
        name: String,

        command: Vec<String>,

        /// Comma-separated tags.
        #[arg(long, short = 't', value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Run a command by name, or pick one among the commands with a tag.
    #[command(visible_alias = "r")]
    Run {
        #[arg(required_unless_present = "tags")]
        name: Option<String>,

        /// Comma-separated tags.
        #[arg(long, short = 't', value_delimiter = ',')]
        tags: Vec<String>,

        /// Arguments appended to the command. Everything after `--extra` is taken.
        #[arg(long, num_args = 1.., allow_hyphen_values = true)]
        extra: Vec<String>,
    },

    /// Pick and rerun a recent command.
    Last,

    /// Remove a saved command.
    #[command(visible_alias = "rm")]
    Remove { name: String },

    /// List all tags with command counts.
    #[command(visible_alias = "t")]
    Tags,

    /// One-time setup: source the alias file from the shell startup files.
    Init,
}
