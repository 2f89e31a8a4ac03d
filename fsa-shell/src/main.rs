//! fsa - build a DFA at the prompt and test words against it

use std::io;
use std::process::ExitCode;

use clap::Parser;
use fsa_shell::config::Cli;
use fsa_shell::{exit_code, logging, run, welcome};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init(&cli.log_config(), cli.log_format) {
        eprintln!("Warning: logging disabled: {err}");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();

    if !cli.no_banner {
        if let Err(err) = welcome(&mut stdout.lock()) {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    }

    exit_code(&run(stdin.lock(), stdout.lock()))
}
