use indexmap::IndexSet;
use tracing::debug;

use crate::automaton::Automaton;
use crate::bitset::StateSet;
use crate::state::{State, StateId};
use crate::token::TokenInfo;

impl Automaton {
    /// Subset construction.
    ///
    /// Each DFA state stands for one epsilon-closed set of states of `self`.
    /// Sets are numbered in discovery order (a FIFO walk over the alphabet in
    /// alphabet order) and named `S0`, `S1`, ...; `S0` is the closure of the
    /// starting states and the only starting state of the result. A DFA
    /// state is accepting when its set contains an accepting state, and its
    /// payload concatenates the payloads of those accepting states in
    /// ascending index order.
    ///
    /// The number of DFA states is exponential in the number of NFA states
    /// in the worst case.
    pub fn to_dfa(&self) -> Automaton {
        let mut discovered: IndexSet<StateSet> = IndexSet::new();
        discovered.insert(self.start_states());

        let mut moves: Vec<(usize, u8, usize)> = Vec::new();
        let mut index = 0;
        while index < discovered.len() {
            for character in self.alphabet().iter() {
                let target = self.advance(&discovered[index], character);
                if target.is_empty() {
                    continue;
                }
                let (target_index, _) = discovered.insert_full(target);
                moves.push((index, character, target_index));
            }
            index += 1;
        }

        let mut dfa = Automaton::new(self.alphabet().clone());
        for (position, subset) in discovered.iter().enumerate() {
            dfa.push_state(self.subset_state(position, subset));
        }
        for (from, character, to) in moves {
            dfa.insert_transition(StateId::new(from), character, StateId::new(to));
        }

        debug!(
            nfa_states = self.len(),
            dfa_states = dfa.len(),
            transitions = dfa.transition_count(),
            "determinized automaton"
        );
        dfa
    }

    fn subset_state(&self, position: usize, subset: &StateSet) -> State {
        let accepting: Vec<&State> = subset
            .iter()
            .filter_map(|id| self.state(id))
            .filter(|state| state.accepting)
            .collect();
        let payload: Vec<TokenInfo> = accepting
            .iter()
            .flat_map(|state| state.payload.iter().cloned())
            .collect();
        State::from_parts(
            format!("S{position}"),
            !accepting.is_empty(),
            position == 0,
            payload,
        )
    }
}
