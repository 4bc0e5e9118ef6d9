use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::alphabet::Alphabet;
use crate::bitset::StateSet;
use crate::error::AutomatonError;
use crate::state::{State, StateId};

/// Anything that designates a state of an [`Automaton`]: its id or its name.
pub trait StateKey {
    fn resolve(&self, automaton: &Automaton) -> Result<StateId, AutomatonError>;
}

impl StateKey for StateId {
    fn resolve(&self, automaton: &Automaton) -> Result<StateId, AutomatonError> {
        if self.index() < automaton.len() {
            Ok(*self)
        } else {
            Err(AutomatonError::DanglingReference {
                reference: self.to_string(),
            })
        }
    }
}

impl StateKey for str {
    fn resolve(&self, automaton: &Automaton) -> Result<StateId, AutomatonError> {
        automaton
            .state_id(self)
            .ok_or_else(|| AutomatonError::DanglingReference {
                reference: format!("`{self}`"),
            })
    }
}

impl StateKey for String {
    fn resolve(&self, automaton: &Automaton) -> Result<StateId, AutomatonError> {
        self.as_str().resolve(automaton)
    }
}

impl<K: StateKey + ?Sized> StateKey for &K {
    fn resolve(&self, automaton: &Automaton) -> Result<StateId, AutomatonError> {
        (**self).resolve(automaton)
    }
}

/// A finite automaton over single-byte characters.
///
/// States live in an append-only arena and are referenced by [`StateId`].
/// Character transitions may fan out to several targets and epsilon
/// transitions may be present; [`Automaton::to_dfa`] produces the
/// deterministic special case.
#[derive(Clone, Debug, Default)]
pub struct Automaton {
    alphabet: Alphabet,
    states: Vec<State>,
    names: HashMap<String, StateId>,
    transitions: BTreeMap<(StateId, u8), BTreeSet<StateId>>,
    epsilons: BTreeMap<StateId, BTreeSet<StateId>>,
}

impl Automaton {
    pub fn new(alphabet: impl Into<Alphabet>) -> Self {
        Self {
            alphabet: alphabet.into(),
            ..Self::default()
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + use<> {
        (0..self.states.len()).map(StateId::new)
    }

    /// Append a state. Fails when a state with the same name exists.
    pub fn add_state(&mut self, state: State) -> Result<StateId, AutomatonError> {
        if self.names.contains_key(&state.name) {
            return Err(AutomatonError::DuplicateState { name: state.name });
        }
        Ok(self.push_state(state))
    }

    /// Record `from --character--> to`.
    ///
    /// Several targets for the same `(from, character)` pair are legal before
    /// determinization; adding the exact same transition twice is a no-op.
    pub fn add_transition(
        &mut self,
        from: impl StateKey,
        character: u8,
        to: impl StateKey,
    ) -> Result<(), AutomatonError> {
        self.check_character(character)?;
        let from = from.resolve(self)?;
        let to = to.resolve(self)?;
        self.insert_transition(from, character, to);
        Ok(())
    }

    /// One transition per character of `characters`. Every character is
    /// validated before any transition is recorded.
    pub fn add_transitions(
        &mut self,
        from: impl StateKey,
        characters: impl AsRef<[u8]>,
        to: impl StateKey,
    ) -> Result<(), AutomatonError> {
        let characters = characters.as_ref();
        for &character in characters {
            self.check_character(character)?;
        }
        let from = from.resolve(self)?;
        let to = to.resolve(self)?;
        for &character in characters {
            self.insert_transition(from, character, to);
        }
        Ok(())
    }

    pub fn add_epsilon_transition(
        &mut self,
        from: impl StateKey,
        to: impl StateKey,
    ) -> Result<(), AutomatonError> {
        let from = from.resolve(self)?;
        let to = to.resolve(self)?;
        self.insert_epsilon(from, to);
        Ok(())
    }

    pub fn targets(&self, from: StateId, character: u8) -> impl Iterator<Item = StateId> + '_ {
        self.transitions
            .get(&(from, character))
            .into_iter()
            .flatten()
            .copied()
    }

    /// The lowest-indexed target of `from` on `character`. On a DFA this is
    /// the only one.
    pub fn next_state(&self, from: StateId, character: u8) -> Option<StateId> {
        self.targets(from, character).next()
    }

    pub fn epsilon_targets(&self, from: StateId) -> impl Iterator<Item = StateId> + '_ {
        self.epsilons.get(&from).into_iter().flatten().copied()
    }

    /// Character transitions as `(from, character, to)` ordered by source,
    /// then character value, then target.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, u8, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(from, character), targets)| {
                targets.iter().map(move |&to| (from, character, to))
            })
    }

    pub fn epsilon_transitions(&self) -> impl Iterator<Item = (StateId, StateId)> + '_ {
        self.epsilons
            .iter()
            .flat_map(|(&from, targets)| targets.iter().map(move |&to| (from, to)))
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(BTreeSet::len).sum()
    }

    pub fn has_epsilon_transitions(&self) -> bool {
        self.epsilons.values().any(|targets| !targets.is_empty())
    }

    /// All states reachable from `states` through zero or more epsilon
    /// transitions.
    ///
    /// Ids that are not part of the automaton are carried through unchanged.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut pending: Vec<StateId> = states.iter().collect();
        while let Some(state) = pending.pop() {
            for next in self.epsilon_targets(state) {
                if closure.insert(next) {
                    pending.push(next);
                }
            }
        }
        closure
    }

    /// States flagged as starting, without closure.
    pub fn starting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, state)| state.starting)
            .map(|(index, _)| StateId::new(index))
    }

    /// The epsilon closure of every state flagged as starting.
    pub fn start_states(&self) -> StateSet {
        let flagged = self.starting_states().collect();
        self.epsilon_closure(&flagged)
    }

    /// The single state flagged as starting.
    pub fn start_state(&self) -> Result<StateId, AutomatonError> {
        let mut flagged = self.starting_states();
        match (flagged.next(), flagged.next()) {
            (Some(start), None) => Ok(start),
            (None, _) => Err(AutomatonError::StartState { count: 0 }),
            (Some(_), Some(_)) => Err(AutomatonError::StartState {
                count: self.starting_states().count(),
            }),
        }
    }

    /// Fails on the first epsilon transition, then on the first `(state,
    /// character)` pair with more than one target.
    pub fn check_deterministic(&self) -> Result<(), AutomatonError> {
        if let Some((from, _)) = self.epsilon_transitions().next() {
            return Err(AutomatonError::EpsilonTransition { state: from });
        }
        match self
            .transitions
            .iter()
            .find(|(_, targets)| targets.len() > 1)
        {
            Some((&(state, character), _)) => {
                Err(AutomatonError::NotDeterministic { state, character })
            }
            None => Ok(()),
        }
    }

    pub fn is_deterministic(&self) -> bool {
        self.check_deterministic().is_ok()
    }

    /// Follow `character` from every member of `states`, then close over
    /// epsilon transitions.
    pub fn advance(&self, states: &StateSet, character: u8) -> StateSet {
        let mut reached = StateSet::with_capacity(self.len());
        for state in states {
            reached.extend(self.targets(state, character));
        }
        self.epsilon_closure(&reached)
    }

    pub fn contains_accepting(&self, states: &StateSet) -> bool {
        states
            .iter()
            .any(|id| self.state(id).is_some_and(|state| state.accepting))
    }

    /// Simulate the automaton on `input`, tracking every active state.
    pub fn accepts(&self, input: impl AsRef<[u8]>) -> bool {
        let mut current = self.start_states();
        for &character in input.as_ref() {
            if current.is_empty() {
                return false;
            }
            current = self.advance(&current, character);
        }
        self.contains_accepting(&current)
    }

    pub(crate) fn push_state(&mut self, state: State) -> StateId {
        let id = StateId::new(self.states.len());
        self.names.insert(state.name.clone(), id);
        self.states.push(state);
        id
    }

    pub(crate) fn insert_transition(&mut self, from: StateId, character: u8, to: StateId) {
        self.transitions
            .entry((from, character))
            .or_default()
            .insert(to);
    }

    pub(crate) fn insert_epsilon(&mut self, from: StateId, to: StateId) {
        self.epsilons.entry(from).or_default().insert(to);
    }

    fn check_character(&self, character: u8) -> Result<(), AutomatonError> {
        if self.alphabet.contains(character) {
            Ok(())
        } else {
            Err(AutomatonError::UnknownCharacter { character })
        }
    }
}
