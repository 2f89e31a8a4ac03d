//! The read-evaluate loop that feeds words to a finished automaton and reports verdicts.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::dfa::Dfa;

/// The command that ends a session at any prompt.
pub const EXIT_COMMAND: &str = "exit";

const WORD_PROMPT: &str = "Please, enter a word to test, or enter \"exit\" to stop the automaton:";

/// Whether `line` is the exit command. Surrounding whitespace and case are ignored.
pub fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}

/// Reads one line and strips its line terminator, nothing else. `None` once the input is exhausted.
/// Bytes that are not UTF-8 become U+FFFD instead of failing the read.
pub fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// How a session ended. Both are normal terminations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed the exit command.
    Sentinel,
    /// The input ran out.
    EndOfInput,
}

/// Tally of one session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionReport {
    /// Words evaluated.
    pub tested: usize,
    /// How many of them were accepted.
    pub accepted: usize,
    /// What stopped the loop.
    pub end: SessionEnd,
}

/// Runs the word-testing loop until the exit command or the end of `input`.
/// Empty lines are skipped. Every other line is a word, echoed back as `"<word>" accepted!` or
/// `"<word>" not accepted!`.
pub fn activate<R: BufRead, W: Write>(
    dfa: &Dfa<char>,
    mut input: R,
    mut output: W,
) -> io::Result<SessionReport> {
    writeln!(output, "{WORD_PROMPT}")?;
    output.flush()?;

    let mut tested = 0;
    let mut accepted = 0;
    let end = loop {
        let Some(line) = read_line(&mut input)? else {
            break SessionEnd::EndOfInput;
        };
        if is_exit(&line) {
            break SessionEnd::Sentinel;
        }
        if line.is_empty() {
            continue;
        }

        let verdict = dfa.trace_str(&line);
        debug!(word = %line, ?verdict, "word evaluated");
        tested += 1;
        if verdict.is_accepted() {
            accepted += 1;
            writeln!(output, "\"{line}\" accepted!\n")?;
        } else {
            writeln!(output, "\"{line}\" not accepted!\n")?;
        }
        output.flush()?;
    };

    info!(tested, accepted, ?end, "session finished");
    Ok(SessionReport {
        tested,
        accepted,
        end,
    })
}
