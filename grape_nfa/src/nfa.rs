use std::collections::HashSet;
use std::fmt;

/// A state ID in the NFA. IDs are indices into the NFA's state arena and
/// stay valid for as long as the NFA lives.
pub type StateId = usize;

/// An edge between two states of the same NFA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Consume exactly `byte` and move to `target`.
    Byte { byte: u8, target: StateId },
    /// Move to `target` without consuming input.
    Epsilon { target: StateId },
}

impl Transition {
    pub fn target(&self) -> StateId {
        match *self {
            Transition::Byte { target, .. } => target,
            Transition::Epsilon { target } => target,
        }
    }

    /// The byte this edge consumes, or `None` for an epsilon edge.
    pub fn byte(&self) -> Option<u8> {
        match *self {
            Transition::Byte { byte, .. } => Some(byte),
            Transition::Epsilon { .. } => None,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Transition::Epsilon { .. })
    }
}

/// A Thompson NFA state: its outgoing edges, in insertion order, and
/// whether it accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    transitions: Vec<Transition>,
    is_accept: bool,
}

impl State {
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn is_accept(&self) -> bool {
        self.is_accept
    }
}

/// Fragment of an NFA with start and accept states. Fragments only exist
/// on the compiler's operand stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub start: StateId,
    pub accept: StateId,
}

/// A Thompson NFA over bytes.
///
/// The NFA owns all of its states. Edges refer to other states by
/// [`StateId`], so the cycles introduced by `*` and `+` need no shared
/// ownership. Once built, an NFA is never mutated: matching only reads it,
/// which makes it safe to share between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NFA {
    states: Vec<State>,
    start: StateId,
    accept: StateId,
}

impl NFA {
    /// Create an empty NFA, ready to receive states from the compiler.
    pub(crate) fn new() -> Self {
        NFA { states: Vec::new(), start: 0, accept: 0 }
    }

    /// Add a new state with no edges and return its ID.
    pub(crate) fn add_state(&mut self) -> StateId {
        let id = self.states.len();
        self.states.push(State::default());
        id
    }

    /// Add a byte edge `from -> to`.
    pub(crate) fn add_byte(&mut self, from: StateId, byte: u8, to: StateId) {
        self.states[from].transitions.push(Transition::Byte { byte, target: to });
    }

    /// Add an epsilon edge `from -> to`.
    pub(crate) fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from].transitions.push(Transition::Epsilon { target: to });
    }

    /// Install the last fragment on the operand stack as the whole
    /// automaton.
    pub(crate) fn finish(&mut self, fragment: Fragment) {
        self.start = fragment.start;
        self.accept = fragment.accept;
        self.states[fragment.accept].is_accept = true;
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accept(&self) -> StateId {
        self.accept
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Look up a state by ID.
    ///
    /// # Panics
    ///
    /// When `id` does not belong to this NFA.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    /// The number of states in the NFA.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns true if the entire input is accepted by this NFA.
    pub fn run(&self, input: &[u8]) -> bool {
        crate::Matcher::new(self).is_match(input)
    }

    /// Get epsilon closure of a set of states.
    ///
    /// Only epsilon edges are followed. `*` and `+` create epsilon cycles,
    /// so every state is pushed at most once, guarded by the closure set
    /// itself.
    pub fn epsilon_closure(&self, states: &HashSet<StateId>) -> HashSet<StateId> {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().copied().collect();

        while let Some(state_id) = stack.pop() {
            for transition in &self.states[state_id].transitions {
                if let Transition::Epsilon { target } = *transition {
                    if closure.insert(target) {
                        stack.push(target);
                    }
                }
            }
        }

        closure
    }

    /// The states reachable from `states` by consuming `byte`, before
    /// taking the epsilon closure.
    pub fn step(&self, states: &HashSet<StateId>, byte: u8) -> HashSet<StateId> {
        let mut next = HashSet::new();
        for &state_id in states {
            for transition in &self.states[state_id].transitions {
                if let Transition::Byte { byte: b, target } = *transition {
                    if b == byte {
                        next.insert(target);
                    }
                }
            }
        }
        next
    }

    /// Check if the accept state is in the set.
    pub fn is_accepting(&self, states: &HashSet<StateId>) -> bool {
        states.contains(&self.accept)
    }
}

/// Prints one line per state followed by its edges, which is what the
/// `nfa-dump` tool shows.
impl fmt::Display for NFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "start: {}", self.start)?;
        writeln!(f, "accept: {}", self.accept)?;
        for (id, state) in self.states.iter().enumerate() {
            write!(f, "{:>4}", id)?;
            if state.is_accept {
                write!(f, " (accept)")?;
            }
            writeln!(f, ":")?;
            for transition in &state.transitions {
                match *transition {
                    Transition::Byte { byte, target } => writeln!(
                        f,
                        "       '{}' -> {}",
                        std::ascii::escape_default(byte),
                        target
                    )?,
                    Transition::Epsilon { target } => {
                        writeln!(f, "       ε -> {}", target)?
                    }
                }
            }
        }
        Ok(())
    }
}
