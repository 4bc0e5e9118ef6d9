#![forbid(unsafe_code)]
#![doc = "Finite automata for lexfa: NFA building, epsilon closure, subset construction."]

mod alphabet;
mod automaton;
mod bitset;
mod combine;
mod dfa;
mod error;
mod state;
mod token;

pub use crate::alphabet::Alphabet;
pub use crate::automaton::{Automaton, StateKey};
pub use crate::bitset::{Iter as StateSetIter, StateSet};
pub use crate::combine::{COMBINED_START, combine};
pub use crate::error::AutomatonError;
pub use crate::state::{State, StateId};
pub use crate::token::{TokenInfo, select_token};
