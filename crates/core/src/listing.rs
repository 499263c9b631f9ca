use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Lists regular files below `root`, recursively, as sorted paths relative
/// to `root`.
///
/// The filter is a glob matched against each file's name only, so `*.yaml`
/// finds `a.yaml` at any depth. Symbolic links are neither followed nor listed.
///
/// # Errors
///
/// Fails when `root` is missing, not a directory or unreadable, when the
/// filter is not a valid glob, and when nothing matches.
pub fn list_files(root: &Path, filter: Option<&str>) -> Result<Vec<String>> {
    let shown = root.display().to_string();

    match fs::metadata(root) {
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(Error::DirectoryMissing(shown)),
        Err(e) => {
            return Err(Error::DirectoryAccess {
                path: shown,
                original: e,
            })
        }
        Ok(metadata) if !metadata.is_dir() => return Err(Error::NotADirectory(shown)),
        Ok(_) => {}
    }

    let matcher = filter.map(compile_filter).transpose()?;

    let mut files: Vec<String> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry under {}: {}", shown, e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            matcher
                .as_ref()
                .map_or(true, |m| m.is_match(entry.file_name()))
        })
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .ok()
                .map(|relative| relative.to_string_lossy().into_owned())
        })
        .collect();

    files.sort();
    debug!("Found {} file(s) under {}", files.len(), shown);

    if files.is_empty() {
        return Err(match filter {
            Some(filter) => Error::NoMatchingFiles {
                path: shown,
                filter: filter.to_string(),
            },
            None => Error::NoFiles(shown),
        });
    }

    Ok(files)
}

fn compile_filter(filter: &str) -> Result<GlobMatcher> {
    Glob::new(filter)
        .map(|glob| glob.compile_matcher())
        .map_err(|original| Error::InvalidFilter {
            filter: filter.to_string(),
            original,
        })
}

/// Joins a listed relative path back onto its root.
#[must_use]
pub fn absolute_path(root: &Path, relative: &str) -> PathBuf {
    root.join(relative)
}
