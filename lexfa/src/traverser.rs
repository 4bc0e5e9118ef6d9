use lexfa_automaton::{Automaton, AutomatonError, State, StateId};

/// A cursor over a deterministic automaton.
///
/// The automaton is borrowed, so any number of traversers can walk the same
/// one independently.
#[derive(Clone, Debug)]
pub struct Traverser<'a> {
    automaton: &'a Automaton,
    start: StateId,
    current: StateId,
}

impl<'a> Traverser<'a> {
    /// Fails unless the automaton has exactly one starting state and is
    /// deterministic, which holds for anything produced by
    /// [`Automaton::to_dfa`].
    pub fn new(automaton: &'a Automaton) -> Result<Self, AutomatonError> {
        let start = automaton.start_state()?;
        automaton.check_deterministic()?;
        Ok(Self {
            automaton,
            start,
            current: start,
        })
    }

    pub fn automaton(&self) -> &'a Automaton {
        self.automaton
    }

    pub fn current(&self) -> StateId {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = self.start;
    }

    /// Follow `character` from the current state.
    ///
    /// Returns the state landed on, or `None` when there is no such
    /// transition; the cursor does not move in that case.
    pub fn step(&mut self, character: u8) -> Option<&'a State> {
        let next = self.automaton.next_state(self.current, character)?;
        let state = self.automaton.state(next)?;
        self.current = next;
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexfa_automaton::TokenInfo;

    fn ab() -> Automaton {
        let mut dfa = Automaton::new("ab");
        dfa.add_state(State::start("S0")).unwrap();
        dfa.add_state(State::new("S1")).unwrap();
        dfa.add_state(State::accept("S2", [TokenInfo::new("AB", 1)]))
            .unwrap();
        dfa.add_transition("S0", b'a', "S1").unwrap();
        dfa.add_transition("S1", b'b', "S2").unwrap();
        dfa
    }

    #[test]
    fn steps_and_stays_put_on_miss() {
        let dfa = ab();
        let mut cursor = Traverser::new(&dfa).unwrap();

        assert_eq!(cursor.step(b'a').map(|state| state.name.as_str()), Some("S1"));
        assert!(cursor.step(b'a').is_none());
        assert_eq!(cursor.current(), StateId::new(1));

        let landed = cursor.step(b'b').unwrap();
        assert!(landed.accepting);

        cursor.reset();
        assert_eq!(cursor.current(), StateId::new(0));
    }

    #[test]
    fn rejects_ambiguous_start_and_nondeterminism() {
        let mut dfa = ab();
        dfa.add_state(State::start("S3")).unwrap();
        assert_eq!(
            Traverser::new(&dfa).err(),
            Some(AutomatonError::StartState { count: 2 })
        );

        let mut nfa = ab();
        nfa.add_transition("S0", b'a', "S2").unwrap();
        assert_eq!(
            Traverser::new(&nfa).err(),
            Some(AutomatonError::NotDeterministic {
                state: StateId::new(0),
                character: b'a',
            })
        );

        let mut nfa = ab();
        nfa.add_epsilon_transition("S0", "S2").unwrap();
        assert_eq!(
            Traverser::new(&nfa).err(),
            Some(AutomatonError::EpsilonTransition {
                state: StateId::new(0)
            })
        );
    }
}
