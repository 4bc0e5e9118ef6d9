use lexfa_automaton::AutomatonError;

/// Scanning stopped on input that no token can start or finish with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no token matches the input at offset {offset} (found {})", describe(.character))]
pub struct LexicalError {
    /// Offset of the first byte of the rejected candidate token.
    pub offset: usize,
    pub character: Option<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("malformed automaton document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot access automaton document: {0}")]
    Io(#[from] std::io::Error),
    #[error("payload refers to unknown token info `{0}`")]
    UnknownTokenInfo(String),
    #[error("token info `{0}` is declared more than once")]
    DuplicateTokenInfo(String),
    #[error("character {0:?} does not fit in a single byte")]
    NonByteCharacter(char),
    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Automaton(#[from] AutomatonError),
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

fn describe(character: &Option<u8>) -> String {
    match character {
        Some(byte) => format!("'{}'", char::from(*byte).escape_default()),
        None => "end of input".to_owned(),
    }
}
