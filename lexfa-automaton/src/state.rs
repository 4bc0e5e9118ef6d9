use core::fmt;

use crate::token::{TokenInfo, select_token};

/// Index of a state inside its automaton.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    pub(crate) const fn offset(self, by: usize) -> Self {
        Self(self.0 + by)
    }
}

impl From<StateId> for usize {
    fn from(id: StateId) -> Self {
        id.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
    /// Display label, unique within one automaton.
    pub name: String,
    pub accepting: bool,
    pub starting: bool,
    pub payload: Vec<TokenInfo>,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn start(name: impl Into<String>) -> Self {
        Self::new(name).mark_starting()
    }

    pub fn accept(name: impl Into<String>, payload: impl IntoIterator<Item = TokenInfo>) -> Self {
        Self {
            name: name.into(),
            accepting: true,
            starting: false,
            payload: payload.into_iter().collect(),
        }
    }

    pub fn from_parts(
        name: impl Into<String>,
        accepting: bool,
        starting: bool,
        payload: Vec<TokenInfo>,
    ) -> Self {
        Self {
            name: name.into(),
            accepting,
            starting,
            payload,
        }
    }

    pub fn mark_starting(mut self) -> Self {
        self.starting = true;
        self
    }

    /// The token this state reports when a match ends here.
    pub fn best_token(&self) -> Option<&TokenInfo> {
        select_token(&self.payload)
    }
}
