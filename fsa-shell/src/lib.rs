//! Interactive front end for the `fsa` library: prompts for Σ, S, δ and s₀, then tests words until "exit".

pub mod acquire;
pub mod config;
pub mod error;
pub mod logging;

use std::io::{BufRead, Write};
use std::process::ExitCode;

use fsa::{SessionReport, activate};
use tracing::{error, info};

use crate::config::SHELL_TARGET;

pub use acquire::Acquisition;
pub use error::{InputError, ShellError};

/// Prints the welcome banner.
pub fn welcome(output: &mut impl Write) -> std::io::Result<()> {
    writeln!(output, " --- Welcome to the Finite-State Automaton builder! --- ")?;
    writeln!(
        output,
        "Please, follow the steps and create your desired automaton: A(\u{03A3},S,s\u{2080},\u{03B4},F)"
    )
}

/// Builds an automaton from `input`, then tests every following line as a word.
/// The exit command during the build surfaces as [`ShellError::Exit`].
pub fn run<R: BufRead, W: Write>(input: R, output: W) -> Result<SessionReport, ShellError> {
    let mut acquisition = Acquisition::new(input, output);
    let dfa = acquisition.acquire()?;
    let (input, output) = acquisition.into_parts();
    Ok(activate(&dfa, input, output)?)
}

/// Maps how [`run`] finished to the process exit code, logging under the shell's own target.
/// Exit command and exhausted input count as success.
pub fn exit_code(result: &Result<SessionReport, ShellError>) -> ExitCode {
    match result {
        Ok(report) => {
            info!(target: SHELL_TARGET, ?report, "automaton deactivated");
            ExitCode::SUCCESS
        }
        Err(err) if err.is_normal_termination() => {
            info!(target: SHELL_TARGET, %err, "stopped before the automaton was complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(target: SHELL_TARGET, %err, "shell failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use std::io;
    use std::sync::{Arc, Mutex};

    use fsa::{ConfigError, SessionEnd};
    use tracing::Level;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged(result: &Result<SessionReport, ShellError>) -> (ExitCode, String) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(Level::INFO)
            .with_ansi(false)
            .finish();
        let code = tracing::subscriber::with_default(subscriber, || exit_code(result));
        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        (code, text)
    }

    #[test]
    fn test_exit_codes() {
        let report = SessionReport {
            tested: 2,
            accepted: 1,
            end: SessionEnd::Sentinel,
        };
        assert_eq!(exit_code(&Ok(report)), ExitCode::SUCCESS);
        assert_eq!(exit_code(&Err(ShellError::Exit)), ExitCode::SUCCESS);
        assert_eq!(exit_code(&Err(ShellError::EndOfInput)), ExitCode::SUCCESS);
        assert_eq!(
            exit_code(&Err(ShellError::Config(ConfigError::NoStates))),
            ExitCode::FAILURE
        );
    }

    #[test]
    fn test_outcome_logged_under_shell_target() {
        let (code, text) = logged(&Err(ShellError::Exit));
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(text.contains("fsa_shell:"), "{text}");
        assert!(!text.contains(" fsa:"), "{text}");

        let (code, text) = logged(&Err(ShellError::Io(io::Error::other("closed"))));
        assert_eq!(code, ExitCode::FAILURE);
        assert!(text.contains("ERROR fsa_shell:"), "{text}");
    }
}
