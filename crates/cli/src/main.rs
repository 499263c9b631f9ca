use std::process::ExitCode;

use clap::Parser;
use laziest_cli::cli_args::Args;
use laziest_cli::command_selection::TerminalPrompter;
use laziest_cli::subcommands::Session;
use laziest_core::config::{self, Paths};
use laziest_core::error::{Error, Result};

fn execute(args: Args) -> Result<()> {
    let paths = Paths::resolve(args.config_dir.as_deref());
    let mut prompter = TerminalPrompter;

    Session::new(paths, config::shell(), &mut prompter).dispatch(args.action)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        // The command ran and already reported its own failure.
        Err(Error::SubProcessExit(code)) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
