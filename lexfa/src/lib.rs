#![forbid(unsafe_code)]
#![doc = "lexfa: greedy longest-match lexers driven by declarative finite automata."]

mod document;
mod error;
mod lexer;
mod traverser;

pub use crate::document::{
    AutomatonDocument, StateEntry, TokenInfoEntry, TransitionEntry, load_from_path, save_to_path,
};
pub use crate::error::{DocumentError, Error, LexicalError};
pub use crate::lexer::{Lexer, LexerConfig, Recovery, Token, Tokens, UNKNOWN_KIND};
pub use crate::traverser::Traverser;
pub use lexfa_automaton::{
    Alphabet, Automaton, AutomatonError, COMBINED_START, State, StateId, StateKey, StateSet,
    StateSetIter, TokenInfo, combine, select_token,
};

pub mod prelude {
    pub use crate::document::{AutomatonDocument, load_from_path, save_to_path};
    pub use crate::error::{DocumentError, Error, LexicalError};
    pub use crate::lexer::{Lexer, LexerConfig, Recovery, Token};
    pub use crate::traverser::Traverser;
    pub use lexfa_automaton::{
        Alphabet, Automaton, AutomatonError, State, StateId, StateSet, TokenInfo, combine,
    };
}
