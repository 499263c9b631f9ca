//! Laziest CLI Library
//!
//! This crate provides the command-line interface for laziest (`lz`), a
//! personal command-alias manager. It handles the interactive picker, the
//! command builder, binding resolution and the subcommand workflows.
//!
//! # Key Features
//!
//! - **Interactive Picker**: Browse, filter, run, modify and delete saved commands
//! - **Command Builder**: Turn an example command into a template, flag by flag
//! - **Binding Resolution**: Pick files, values and optional flags at run time
//! - **Recent Commands**: Rerun anything from the recency list
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`command_selection`]: Picker state machine, terminal driver and the [`command_selection::Prompter`] seam
//! - [`command_builder`]: Interactive construction of binding placeholders
//! - [`resolution`]: Resolving every binding of a saved command
//! - [`subcommands`]: The `lz` subcommands
//!
//! # Examples
//!
//! ```bash
//! # Interactive mode - shows the command picker
//! lz
//!
//! # Build a command from an example
//! lz add "python train.py --config /configs/model.yaml --epochs 100"
//!
//! # Save a command with bindings as is
//! lz add-raw deploy "kubectl apply --dry-run={%[none,client,server]%}" -t K8s
//!
//! # Run by name with extra arguments
//! lz run train --extra --verbose
//!
//! # Pick among the commands tagged ML
//! lz run -t ML
//! ```

pub mod cli_args;
pub mod command_builder;
pub mod command_selection;
pub mod resolution;
pub mod subcommands;
