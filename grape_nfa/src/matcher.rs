use crate::nfa::{StateId, NFA};
use std::collections::HashSet;

/// A matcher that simulates a Thompson NFA against input.
///
/// The simulation tracks the set of every state the NFA could be in, and
/// advances that whole set one byte at a time. No path is ever explored on
/// its own, so matching takes `O(input length * states)` time no matter
/// how the pattern nests its repetitions.
pub struct Matcher<'a> {
    nfa: &'a NFA,
}

impl<'a> Matcher<'a> {
    /// Create a new matcher for the given NFA
    pub fn new(nfa: &'a NFA) -> Self {
        Self { nfa }
    }

    /// Check if the entire input matches.
    pub fn is_match(&self, input: &[u8]) -> bool {
        let mut current_states = self.start_states();

        for &byte in input {
            current_states = self.step_states(&current_states, byte);
            trace!(
                "after byte '{}': {} active states",
                std::ascii::escape_default(byte),
                current_states.len()
            );
            // An empty set can never grow again.
            if current_states.is_empty() {
                return false;
            }
        }

        self.nfa.is_accepting(&current_states)
    }

    /// The epsilon closure of the start state.
    fn start_states(&self) -> HashSet<StateId> {
        let mut start = HashSet::new();
        start.insert(self.nfa.start());
        self.nfa.epsilon_closure(&start)
    }

    /// Consume one byte from every state in the set, then close over
    /// epsilon edges.
    fn step_states(&self, current_states: &HashSet<StateId>, byte: u8) -> HashSet<StateId> {
        let next_states = self.nfa.step(current_states, byte);
        self.nfa.epsilon_closure(&next_states)
    }
}
