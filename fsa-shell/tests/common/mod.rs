//! Helpers for driving the shell end to end with a scripted stdin.

use std::io::Cursor;

use fsa::SessionReport;
use fsa_shell::{ShellError, run};

/// Everything the shell printed, plus how it finished.
pub struct Transcript {
    pub result: Result<SessionReport, ShellError>,
    pub output: String,
}

/// Feeds `lines` (joined with newlines) to the shell.
pub fn run_script(lines: &[&str]) -> Transcript {
    let mut script = lines.join("\n");
    script.push('\n');

    let mut output = Vec::new();
    let result = run(Cursor::new(script), &mut output);
    Transcript {
        result,
        output: String::from_utf8_lossy(&output).into_owned(),
    }
}

/// Definition lines for: Σ = {a, b}, state 1 rejecting, state 2 accepting,
/// 1 --a--> 2, 2 --a--> 2, no b transitions, s₀ = 1.
pub const A_PLUS: [&str; 7] = ["a,b", "2", "n", "y", "a,2", "a,2", "1"];
