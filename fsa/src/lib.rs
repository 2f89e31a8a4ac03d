#![warn(missing_docs)]

//! A small DFA library: build a state graph over any hashable symbol type, then test words against it.
//!
//! States live in a flat arena owned by the automaton, transitions point back into that arena by [`StateId`],
//! so cycles and self-loops need no shared ownership. Construction goes through [`AutomatonBuilder`] and only
//! the finished [`Dfa`] can evaluate words.

pub mod dfa;
pub mod error;
pub mod session;
pub mod state;

pub use dfa::{AutomatonBuilder, Dfa, Rejection, Verdict};
pub use error::ConfigError;
pub use session::{SessionEnd, SessionReport, activate};
pub use state::{State, StateId};
