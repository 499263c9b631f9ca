//! Laziest Core Library
//!
//! This crate provides the core functionality for laziest (`lz`), a personal
//! command-alias manager that stores named shell commands and resolves the
//! dynamic bindings inside them at run time.
//!
//! # Key Features
//!
//! - **Flag Extraction**: Split an example command into static text and flags
//! - **Bindings**: Parse `{%...%}` placeholders into directory, value-list and
//!   boolean-flag bindings
//! - **Resolution**: Substitute chosen values, or remove skipped bindings along
//!   with their flags
//! - **Storage**: YAML-backed saved commands and a short run history
//! - **Shell Plumbing**: Alias file generation, startup file setup and execution
//!
//! # Examples
//!
//! Parsing and resolving a command template:
//!
//! ```
//! use laziest_core::binding::parse;
//! use laziest_core::interpolation::{apply, Choice};
//!
//! let template = "deploy {%--env:[dev,prod]%} {%?--dry-run%}";
//! let bindings = parse(template)?;
//! let answers = vec![
//!     (bindings[0].clone(), Choice::Value("prod".to_string())),
//!     (bindings[1].clone(), Choice::Skip),
//! ];
//!
//! assert_eq!(apply(template, &answers)?, "deploy --env prod");
//! # Ok::<(), laziest_core::error::Error>(())
//! ```

pub mod binding;
pub mod command_definitions;
pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod flags;
pub mod interpolation;
pub mod listing;
pub mod shell;
