use std::fmt;
use std::hash::Hash;

use smallmap::Map;

/// Handle to a state inside one automaton's arena. MARK: StateId
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    /// Wraps a zero-based arena index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The zero-based arena index.
    pub const fn index(self) -> usize {
        self.0
    }

    /// The 1-based number users see when typing transitions and the start state.
    pub const fn number(self) -> usize {
        self.0 + 1
    }

    /// Inverse of [`StateId::number`], `None` for 0.
    pub const fn from_number(number: usize) -> Option<Self> {
        match number {
            0 => None,
            n => Some(Self(n - 1)),
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A node in the DFA, contains is_accept and a transition map keyed by symbol. MARK: State
pub struct State<Σ: Eq + Hash + Copy> {
    transitions: Map<Σ, StateId>,
    is_accept: bool,
}

impl<Σ: Eq + Hash + Copy> State<Σ> {
    /// Creates a new state with no transitions. The accept flag cannot change afterwards.
    pub fn new(is_accept: bool) -> Self {
        Self {
            transitions: Map::new(),
            is_accept,
        }
    }

    /// Returns the accept state flag.
    pub fn accepts(&self) -> bool {
        self.is_accept
    }

    /// Returns the target of the transition on `symbol`, if one exists.
    /// Symbols outside the alphabet simply have no transition.
    pub fn next(&self, symbol: Σ) -> Option<StateId> {
        self.transitions.get(&symbol).copied()
    }

    /// Merges the provided transitions into this state's map. A symbol already present is retargeted.
    pub fn add_transitions(&mut self, transitions: impl IntoIterator<Item = (Σ, StateId)>) {
        for (symbol, target) in transitions {
            self.transitions.insert(symbol, target);
        }
    }

    /// Iterates over every outgoing transition, in no particular order.
    pub fn transitions(&self) -> impl Iterator<Item = (Σ, StateId)> + '_ {
        self.transitions.iter().map(|entry| {
            let (symbol, target) = entry;
            (*symbol, *target)
        })
    }
}

impl<Σ: Eq + Hash + Copy + fmt::Debug> fmt::Debug for State<Σ> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("is_accept", &self.is_accept)
            .field("transitions", &self.transitions().collect::<Vec<_>>())
            .finish()
    }
}

// MARK: Tests
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_missing_transition_is_none() {
        let state = State::<char>::new(false);
        assert_eq!(state.next('a'), None);
        assert!(!state.accepts());
    }

    #[test]
    fn test_last_write_wins() {
        let mut state = State::new(true);
        state.add_transitions([('a', StateId::new(1))]);
        state.add_transitions([('a', StateId::new(2))]);
        assert_eq!(state.next('a'), Some(StateId::new(2)));
        assert_eq!(state.transitions().count(), 1);
    }

    #[test]
    fn test_duplicate_in_one_batch() {
        let mut state = State::new(false);
        state.add_transitions([('x', StateId::new(0)), ('y', StateId::new(3)), ('x', StateId::new(4))]);
        assert_eq!(state.next('x'), Some(StateId::new(4)));
        assert_eq!(state.next('y'), Some(StateId::new(3)));
    }

    #[test]
    fn test_whitespace_symbol() {
        let mut state = State::new(false);
        state.add_transitions([(' ', StateId::new(0))]);
        assert_eq!(state.next(' '), Some(StateId::new(0)));
        assert_eq!(state.next('\t'), None);
    }

    #[test]
    fn test_numbering() {
        assert_eq!(StateId::from_number(0), None);
        assert_eq!(StateId::from_number(3), Some(StateId::new(2)));
        assert_eq!(StateId::new(2).number(), 3);
        assert_eq!(StateId::new(2).to_string(), "s2");
    }
}
