use std::fmt::Debug;
use std::hash::Hash;
use std::iter;

use hashbrown::HashSet;
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::error::ConfigError;
use crate::state::{State, StateId};

// MARK: Verdict
/// Outcome of walking a word through the automaton.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The walk consumed the whole word and stopped on an accept state.
    Accepted {
        /// Where the walk ended.
        state: StateId,
    },
    /// The word was rejected, for the given reason.
    Rejected(Rejection),
}

/// Why a word was rejected. Callers of [`Dfa::evaluate`] only ever see `false` for all of these.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The symbol at `position` is not in the alphabet.
    UnknownSymbol {
        /// Zero-based symbol offset in the word.
        position: usize,
    },
    /// `state` has no transition on the symbol at `position`.
    NoTransition {
        /// The dead-end state.
        state: StateId,
        /// Zero-based symbol offset in the word.
        position: usize,
    },
    /// The whole word was consumed but `state` does not accept.
    NonAccepting {
        /// Where the walk ended.
        state: StateId,
    },
}

impl Verdict {
    /// True for [`Verdict::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

// MARK: Builder
/// A DFA under construction. States are pushed into an arena and wired by [`StateId`];
/// nothing can be evaluated until [`AutomatonBuilder::build`] seals it.
pub struct AutomatonBuilder<Σ: Eq + Hash + Copy + Debug> {
    alphabet: HashSet<Σ>,
    states: Vec<State<Σ>>,
    attached: Vec<bool>,
    start: Option<StateId>,
}

impl<Σ: Eq + Hash + Copy + Debug> AutomatonBuilder<Σ> {
    /// Creates an empty builder over the given alphabet. Repeated symbols collapse.
    pub fn new(alphabet: impl IntoIterator<Item = Σ>) -> Self {
        Self {
            alphabet: alphabet.into_iter().collect(),
            states: Vec::new(),
            attached: Vec::new(),
            start: None,
        }
    }

    /// Pushes a new state without transitions and returns its handle.
    pub fn insert_state(&mut self, is_accept: bool) -> StateId {
        let id = StateId::new(self.states.len());
        self.states.push(State::new(is_accept));
        self.attached.push(false);
        id
    }

    /// Number of states inserted so far.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Attaches transitions to `state`, merging into whatever it already has. Passing an empty
    /// iterator still counts as attaching, that is how a state with no way out is declared.
    /// Every target must already be inserted and every symbol must be in the alphabet; on
    /// failure the state is left untouched.
    pub fn add_transitions(
        &mut self,
        state: StateId,
        transitions: impl IntoIterator<Item = (Σ, StateId)>,
    ) -> Result<(), ConfigError> {
        if state.index() >= self.states.len() {
            return Err(ConfigError::UnknownState(state));
        }

        let transitions: SmallVec<[(Σ, StateId); 4]> = transitions.into_iter().collect();
        for &(symbol, target) in transitions.iter() {
            check_transition(&self.alphabet, self.states.len(), state, symbol, target)?;
        }

        trace!(%state, count = transitions.len(), "attaching transitions");
        self.states[state.index()].add_transitions(transitions);
        self.attached[state.index()] = true;
        Ok(())
    }

    /// Chooses the start state.
    pub fn set_start(&mut self, state: StateId) -> Result<(), ConfigError> {
        if state.index() >= self.states.len() {
            return Err(ConfigError::UnknownState(state));
        }
        self.start = Some(state);
        Ok(())
    }

    /// Seals the builder into an immutable [`Dfa`].
    pub fn build(self) -> Result<Dfa<Σ>, ConfigError> {
        if self.alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        if self.states.is_empty() {
            return Err(ConfigError::NoStates);
        }
        let start = self.start.ok_or(ConfigError::MissingStart)?;
        if let Some(index) = self.attached.iter().position(|attached| !attached) {
            return Err(ConfigError::TransitionsNotAttached(StateId::new(index)));
        }

        Dfa::new(self.alphabet, self.states, start)
    }
}

fn check_transition<Σ: Eq + Hash + Copy + Debug>(
    alphabet: &HashSet<Σ>,
    state_count: usize,
    from: StateId,
    symbol: Σ,
    to: StateId,
) -> Result<(), ConfigError> {
    if !alphabet.contains(&symbol) {
        return Err(ConfigError::ForeignSymbol {
            state: from,
            symbol: format!("{symbol:?}"),
        });
    }
    if to.index() >= state_count {
        return Err(ConfigError::DanglingTransition { from, to });
    }
    Ok(())
}

// MARK: DFA
/// A finished, immutable DFA. Owns its alphabet and the state arena; the start state is tracked
/// explicitly rather than by position.
pub struct Dfa<Σ: Eq + Hash + Copy + Debug> {
    alphabet: HashSet<Σ>,
    states: Vec<State<Σ>>,
    start: StateId,
}

impl<Σ: Eq + Hash + Copy + Debug> Dfa<Σ> {
    /// Builds a DFA straight from a state collection, checking that the alphabet and the collection
    /// are non-empty, that `start` is one of `states`, and that every transition stays inside the
    /// arena and is keyed on an alphabet symbol.
    pub fn new(
        alphabet: impl IntoIterator<Item = Σ>,
        states: Vec<State<Σ>>,
        start: StateId,
    ) -> Result<Self, ConfigError> {
        let alphabet: HashSet<Σ> = alphabet.into_iter().collect();
        if alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        if states.is_empty() {
            return Err(ConfigError::NoStates);
        }
        if start.index() >= states.len() {
            return Err(ConfigError::UnknownState(start));
        }

        for (index, state) in states.iter().enumerate() {
            for (symbol, target) in state.transitions() {
                check_transition(&alphabet, states.len(), StateId::new(index), symbol, target)?;
            }
        }

        info!(
            states = states.len(),
            symbols = alphabet.len(),
            %start,
            "automaton created"
        );
        Ok(Self {
            alphabet,
            states,
            start,
        })
    }

    /// The start state.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Looks up a state by handle.
    pub fn state(&self, id: StateId) -> Option<&State<Σ>> {
        self.states.get(id.index())
    }

    /// Number of states, always at least one.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Whether `symbol` belongs to the alphabet.
    pub fn alphabet_contains(&self, symbol: &Σ) -> bool {
        self.alphabet.contains(symbol)
    }

    /// The alphabet, in no particular order.
    pub fn alphabet(&self) -> impl Iterator<Item = &Σ> + '_ {
        self.alphabet.iter()
    }

    /// Enumerates the states with the start state first, then the rest in insertion order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State<Σ>)> + '_ {
        let start = self.start;
        iter::once(start)
            .chain((0..self.states.len()).map(StateId::new).filter(move |&id| id != start))
            .map(|id| (id, &self.states[id.index()]))
    }

    /// Walks `input` from the start state and reports where and why the walk ended.
    pub fn trace(&self, input: impl IntoIterator<Item = Σ>) -> Verdict {
        let mut cur = self.start;
        for (position, symbol) in input.into_iter().enumerate() {
            if !self.alphabet_contains(&symbol) {
                debug!(position, ?symbol, "symbol outside the alphabet");
                return Verdict::Rejected(Rejection::UnknownSymbol { position });
            }

            match self.states[cur.index()].next(symbol) {
                Some(next) => {
                    trace!(from = %cur, to = %next, ?symbol, "step");
                    cur = next;
                }
                None => {
                    debug!(state = %cur, position, ?symbol, "no transition");
                    return Verdict::Rejected(Rejection::NoTransition { state: cur, position });
                }
            }
        }

        if self.states[cur.index()].accepts() {
            Verdict::Accepted { state: cur }
        } else {
            Verdict::Rejected(Rejection::NonAccepting { state: cur })
        }
    }

    /// Tests the provided input sequence, returning true if the DFA ends at an accept state.
    pub fn evaluate(&self, input: impl IntoIterator<Item = Σ>) -> bool {
        self.trace(input).is_accepted()
    }

    /// Tests the provided input slice, returning true if the DFA ends at an accept state.
    pub fn evaluate_slice(&self, input: &[Σ]) -> bool {
        self.evaluate(input.iter().copied())
    }
}

impl Dfa<char> {
    /// Tests every `char` of `word`. Nothing is trimmed, whitespace is an ordinary symbol.
    pub fn evaluate_str(&self, word: &str) -> bool {
        self.evaluate(word.chars())
    }

    /// [`Dfa::trace`] over the `char`s of `word`.
    pub fn trace_str(&self, word: &str) -> Verdict {
        self.trace(word.chars())
    }
}
