//! Error types for the shell

use std::io;

use fsa::ConfigError;
use thiserror::Error;

/// A prompt answer that cannot be used. Always recoverable: the prompt is shown again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("nothing was entered")]
    Empty,

    #[error("no symbols were given")]
    NoSymbols,

    #[error("\"{0}\" is not a single character")]
    NotASymbol(String),

    #[error("{0:?} is not in the alphabet")]
    UnknownSymbol(char),

    #[error("\"{0}\" is not a positive whole number")]
    NotAPositiveNumber(String),

    #[error("please answer with y or n")]
    NotYesNo,

    #[error("\"{0}\" is not of the form symbol,state")]
    MalformedTransition(String),

    #[error("state {number} does not exist, choose from 1 to {count}")]
    StateOutOfRange { number: usize, count: usize },
}

/// Why the shell stopped before or during a session.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("session ended by the exit command")]
    Exit,

    #[error("input ended before the automaton was complete")]
    EndOfInput,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid automaton: {0}")]
    Config(#[from] ConfigError),
}

impl ShellError {
    /// Exit command and exhausted input are normal ways to leave the program.
    pub fn is_normal_termination(&self) -> bool {
        matches!(self, ShellError::Exit | ShellError::EndOfInput)
    }
}
