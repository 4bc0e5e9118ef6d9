use tracing::debug;

use crate::alphabet::Alphabet;
use crate::automaton::Automaton;
use crate::state::State;

/// Name of the synthetic start state introduced by [`combine`].
pub const COMBINED_START: &str = "start";

/// Merge automata into one NFA accepting the union of their languages.
///
/// The result starts with a fresh non-accepting start state at index 0 that
/// has an epsilon transition to every state that was starting in an input.
/// States of input `i` are copied in order with an index offset, renamed
/// `"<i>-<name>"`, and lose their starting flag. Payloads are kept as is, so
/// overlapping token kinds are settled later by priority.
pub fn combine<'a>(automata: impl IntoIterator<Item = &'a Automaton>) -> Automaton {
    let automata: Vec<&Automaton> = automata.into_iter().collect();
    let alphabet = automata
        .iter()
        .fold(Alphabet::new(), |merged, automaton| {
            merged.union(automaton.alphabet())
        });

    let mut combined = Automaton::new(alphabet);
    let start = combined.push_state(State::start(COMBINED_START));

    for (input, automaton) in automata.iter().enumerate() {
        let offset = combined.len();
        for state in automaton.states() {
            let copy = State {
                name: format!("{input}-{}", state.name),
                starting: false,
                ..state.clone()
            };
            let id = combined.push_state(copy);
            if state.starting {
                combined.insert_epsilon(start, id);
            }
        }
        for (from, character, to) in automaton.transitions() {
            combined.insert_transition(from.offset(offset), character, to.offset(offset));
        }
        for (from, to) in automaton.epsilon_transitions() {
            combined.insert_epsilon(from.offset(offset), to.offset(offset));
        }
    }

    debug!(
        inputs = automata.len(),
        states = combined.len(),
        "combined automata"
    );
    combined
}
