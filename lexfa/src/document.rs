//! The persisted shape of an automaton.
//!
//! A document lists the alphabet as a string, the states with their flags
//! and payload names, the transitions, and a `tokensInfo` table that
//! resolves payload names to `(type, priority)` pairs:
//!
//! ```json
//! {
//!   "alphabet": "ab",
//!   "states": [
//!     { "name": "S0", "accepting": false, "starting": true, "payload": [] },
//!     { "name": "S1", "accepting": true, "starting": false, "payload": ["ab"] }
//!   ],
//!   "transitions": [{ "from": "S0", "to": "S1", "characters": "ab" }],
//!   "tokensInfo": [{ "name": "ab", "type": "AB", "priority": 1 }]
//! }
//! ```
//!
//! An empty `characters` string is an epsilon transition; longer strings
//! stand for one transition per character. Characters are single bytes,
//! written as the code points U+0000 to U+00FF.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use lexfa_automaton::{Automaton, State, StateId, TokenInfo};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DocumentError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDocument {
    pub alphabet: String,
    pub states: Vec<StateEntry>,
    pub transitions: Vec<TransitionEntry>,
    #[serde(rename = "tokensInfo")]
    pub tokens_info: Vec<TokenInfoEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    pub name: String,
    pub accepting: bool,
    pub starting: bool,
    pub payload: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEntry {
    pub from: String,
    pub to: String,
    pub characters: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfoEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: i32,
}

impl AutomatonDocument {
    pub fn from_json_str(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replay the document through the automaton builder: every state in
    /// order, then every transition.
    pub fn build(&self) -> Result<Automaton, DocumentError> {
        let mut tokens: HashMap<&str, TokenInfo> = HashMap::new();
        for entry in &self.tokens_info {
            match tokens.entry(entry.name.as_str()) {
                Entry::Occupied(_) => {
                    return Err(DocumentError::DuplicateTokenInfo(entry.name.clone()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(TokenInfo::new(entry.kind.clone(), entry.priority));
                }
            }
        }

        let mut automaton = Automaton::new(decode_bytes(&self.alphabet)?);
        for entry in &self.states {
            let payload = entry
                .payload
                .iter()
                .map(|name| {
                    tokens
                        .get(name.as_str())
                        .cloned()
                        .ok_or_else(|| DocumentError::UnknownTokenInfo(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            automaton.add_state(State::from_parts(
                entry.name.clone(),
                entry.accepting,
                entry.starting,
                payload,
            ))?;
        }

        for entry in &self.transitions {
            let characters = decode_bytes(&entry.characters)?;
            match characters.as_slice() {
                [] => automaton.add_epsilon_transition(&entry.from, &entry.to)?,
                [character] => automaton.add_transition(&entry.from, *character, &entry.to)?,
                _ => automaton.add_transitions(&entry.from, &characters, &entry.to)?,
            }
        }

        debug!(
            states = automaton.len(),
            transitions = automaton.transition_count(),
            "loaded automaton document"
        );
        Ok(automaton)
    }

    /// Describe `automaton` in document form.
    ///
    /// Token infos are shared by `(type, priority)` and named
    /// `"<type>:<priority>"`. Character transitions between the same pair of
    /// states are grouped into one entry, characters in alphabet order.
    pub fn from_automaton(automaton: &Automaton) -> Self {
        let mut tokens_info: Vec<TokenInfoEntry> = Vec::new();
        let mut names: HashMap<&TokenInfo, String> = HashMap::new();
        let mut states = Vec::with_capacity(automaton.len());
        for state in automaton.states() {
            let payload = state
                .payload
                .iter()
                .map(|info| {
                    names
                        .entry(info)
                        .or_insert_with(|| {
                            let name = format!("{}:{}", info.kind, info.priority);
                            tokens_info.push(TokenInfoEntry {
                                name: name.clone(),
                                kind: info.kind.clone(),
                                priority: info.priority,
                            });
                            name
                        })
                        .clone()
                })
                .collect();
            states.push(StateEntry {
                name: state.name.clone(),
                accepting: state.accepting,
                starting: state.starting,
                payload,
            });
        }

        let mut grouped: IndexMap<(StateId, StateId), Vec<u8>> = IndexMap::new();
        for character in automaton.alphabet().iter() {
            for from in automaton.state_ids() {
                for to in automaton.targets(from, character) {
                    grouped.entry((from, to)).or_default().push(character);
                }
            }
        }
        grouped.sort_unstable_keys();

        let name_of = |id: StateId| {
            automaton
                .state(id)
                .map(|state| state.name.clone())
                .unwrap_or_default()
        };
        let mut transitions: Vec<TransitionEntry> = grouped
            .into_iter()
            .map(|((from, to), characters)| TransitionEntry {
                from: name_of(from),
                to: name_of(to),
                characters: encode_bytes(&characters),
            })
            .collect();
        transitions.extend(
            automaton
                .epsilon_transitions()
                .map(|(from, to)| TransitionEntry {
                    from: name_of(from),
                    to: name_of(to),
                    characters: String::new(),
                }),
        );

        Self {
            alphabet: encode_bytes(&automaton.alphabet().to_bytes()),
            states,
            transitions,
            tokens_info,
        }
    }
}

/// Read a JSON automaton document from `path` and build it.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Automaton, DocumentError> {
    let json = fs::read_to_string(path)?;
    AutomatonDocument::from_json_str(&json)?.build()
}

/// Write `automaton` to `path` as a pretty-printed JSON document.
pub fn save_to_path(automaton: &Automaton, path: impl AsRef<Path>) -> Result<(), DocumentError> {
    let json = AutomatonDocument::from_automaton(automaton).to_json_string()?;
    fs::write(path, json)?;
    Ok(())
}

fn decode_bytes(text: &str) -> Result<Vec<u8>, DocumentError> {
    text.chars()
        .map(|character| {
            u8::try_from(character).map_err(|_| DocumentError::NonByteCharacter(character))
        })
        .collect()
}

fn encode_bytes(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}
