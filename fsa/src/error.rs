//! Errors raised while assembling an automaton.

use thiserror::Error;

use crate::state::StateId;

/// An automaton description that violates a structural invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The alphabet has no symbols.
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    /// The state collection is empty.
    #[error("automaton must contain at least one state")]
    NoStates,

    /// `build` was called before a start state was set.
    #[error("no start state was chosen")]
    MissingStart,

    /// A handle outside the arena, used as start state or as the state being wired.
    #[error("state {0} does not belong to this automaton")]
    UnknownState(StateId),

    /// A transition target outside the arena.
    #[error("state {from} has a transition to {to}, which does not belong to this automaton")]
    DanglingTransition {
        /// Source of the transition.
        from: StateId,
        /// The missing target.
        to: StateId,
    },

    /// A transition keyed on a symbol the alphabet does not contain.
    #[error("state {state} has a transition on {symbol}, which is not in the alphabet")]
    ForeignSymbol {
        /// Source of the transition.
        state: StateId,
        /// Debug rendering of the offending symbol.
        symbol: String,
    },

    /// The builder was sealed while a state still had no transition map.
    #[error("state {0} never had its transitions attached")]
    TransitionsNotAttached(StateId),
}
