use crate::state::StateId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    #[error("state `{name}` already exists")]
    DuplicateState { name: String },
    #[error("character {} is not part of the alphabet", display_byte(.character))]
    UnknownCharacter { character: u8 },
    #[error("state {reference} does not exist")]
    DanglingReference { reference: String },
    #[error("expected exactly one start state, found {count}")]
    StartState { count: usize },
    #[error("state {state} has several transitions on {}", display_byte(.character))]
    NotDeterministic { state: StateId, character: u8 },
    #[error("state {state} has an epsilon transition")]
    EpsilonTransition { state: StateId },
}

pub(crate) fn display_byte(byte: &u8) -> String {
    format!("'{}'", char::from(*byte).escape_default())
}
