use std::process::{Command, Stdio};

use log::info;

use crate::error::{Error, Result};

/// Runs a command with inherited stdio and waits for it.
///
/// # Errors
///
/// Returns [`Error::SubProcess`] if it cannot be started,
/// [`Error::SubProcessExit`] with its code if it exits non-zero, and
/// [`Error::SubProcessSignal`] if it is killed by a signal.
pub fn execute_command(mut command: Command) -> Result<()> {
    let status = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?
        .wait()?;

    if status.success() {
        Ok(())
    } else {
        match status.code() {
            Some(code) => Err(Error::SubProcessExit(code)),
            None => Err(Error::SubProcessSignal),
        }
    }
}

/// Runs `command` through `shell -c`.
///
/// # Errors
///
/// See [`execute_command`].
pub fn run_in_shell(shell: &str, command: &str) -> Result<()> {
    info!("Running `{}` with {}", command, shell);

    let mut process = Command::new(shell);
    process.arg("-c").arg(command);
    execute_command(process)
}
