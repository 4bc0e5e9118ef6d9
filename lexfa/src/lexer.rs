use core::ops::Range;

use lexfa_automaton::{Automaton, AutomatonError, State};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::LexicalError;
use crate::traverser::Traverser;

/// Kind given to the single-byte tokens emitted by [`Recovery::Unknown`].
pub const UNKNOWN_KIND: &str = "<unknown>";

/// What the lexer does when a candidate token dies without ever reaching an
/// accepting state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recovery {
    /// Report a [`LexicalError`] at the start of the candidate and stop.
    #[default]
    Fail,
    /// Emit the first byte of the candidate as an [`UNKNOWN_KIND`] token and
    /// resume right after it.
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerConfig {
    pub recovery: Recovery,
    /// Bytes dropped when no token has started yet and the automaton cannot
    /// use them.
    pub separators: Vec<u8>,
}

impl LexerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recovery(mut self, recovery: Recovery) -> Self {
        self.recovery = recovery;
        self
    }

    pub fn with_separators(mut self, separators: impl AsRef<[u8]>) -> Self {
        self.separators = separators.as_ref().to_vec();
        self
    }
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            recovery: Recovery::Fail,
            separators: b" \n".to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The matched bytes, one `char` per byte (U+0000 to U+00FF), the same
    /// encoding automaton documents use.
    pub lexeme: String,
    pub kind: String,
    /// Byte range of the lexeme in the scanned input.
    pub span: Range<usize>,
}

impl Token {
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.lexeme, &self.kind)
    }
}

#[derive(Copy, Clone, Debug)]
struct Accept<'a> {
    state: &'a State,
    end: usize,
}

/// Greedy longest-match tokenizer over a deterministic automaton.
///
/// At each position the lexer walks the automaton as far as it can,
/// remembering the last accepting state it crossed, then emits the longest
/// match. Its kind comes from that state's payload: the entry with the
/// greatest priority, the first such entry on ties.
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    traverser: Traverser<'a>,
    config: LexerConfig,
    token_start: usize,
    current: usize,
    last_accept: Option<Accept<'a>>,
    started: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(automaton: &'a Automaton) -> Result<Self, AutomatonError> {
        Self::with_config(automaton, LexerConfig::default())
    }

    pub fn with_config(
        automaton: &'a Automaton,
        config: LexerConfig,
    ) -> Result<Self, AutomatonError> {
        Ok(Self {
            traverser: Traverser::new(automaton)?,
            config,
            token_start: 0,
            current: 0,
            last_accept: None,
            started: false,
        })
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Offset of the next byte to examine.
    pub fn position(&self) -> usize {
        self.current
    }

    /// Forget all cursor state so a new input can be scanned from offset 0.
    pub fn reset(&mut self) {
        self.restart_at(0);
    }

    /// Scan the whole of `input` from the beginning.
    ///
    /// With [`Recovery::Fail`] the first lexical error aborts the scan.
    pub fn tokenize(&mut self, input: impl AsRef<[u8]>) -> Result<Vec<Token>, LexicalError> {
        self.reset();
        self.tokens(input.as_ref()).collect()
    }

    /// Iterate over the tokens of `input`, continuing from the current
    /// cursor. The iterator ends after the first error.
    pub fn tokens<'l, 'i>(&'l mut self, input: &'i [u8]) -> Tokens<'l, 'a, 'i> {
        Tokens {
            lexer: self,
            input,
            done: false,
        }
    }

    /// Produce the next token of `input`, resuming where the previous call
    /// stopped. `Ok(None)` means the input is exhausted.
    ///
    /// Every call performs at most one flush, so the same lexer can be fed a
    /// growing buffer; reaching the end of `input` flushes whatever match is
    /// pending.
    pub fn next_token(&mut self, input: impl AsRef<[u8]>) -> Result<Option<Token>, LexicalError> {
        let input = input.as_ref();
        while let Some(&character) = input.get(self.current) {
            match self.traverser.step(character) {
                Some(state) => {
                    self.started = true;
                    self.current += 1;
                    if state.accepting {
                        self.last_accept = Some(Accept {
                            state,
                            end: self.current,
                        });
                    }
                }
                None if !self.started && self.config.separators.contains(&character) => {
                    self.token_start += 1;
                    self.current += 1;
                }
                None => return self.finish_candidate(input).map(Some),
            }
        }

        if self.started {
            self.finish_candidate(input).map(Some)
        } else {
            Ok(None)
        }
    }

    fn finish_candidate(&mut self, input: &[u8]) -> Result<Token, LexicalError> {
        match self.last_accept.take() {
            Some(accept) => Ok(self.flush(input, accept)),
            None => self.recover(input),
        }
    }

    fn flush(&mut self, input: &[u8], accept: Accept<'a>) -> Token {
        let kind = accept
            .state
            .best_token()
            .map(|info| info.kind.clone())
            .unwrap_or_default();
        let token = make_token(input, self.token_start..accept.end, kind);
        trace!(lexeme = %token.lexeme, kind = %token.kind, "token");
        self.restart_at(accept.end);
        token
    }

    fn recover(&mut self, input: &[u8]) -> Result<Token, LexicalError> {
        let offset = self.token_start;
        let character = input.get(offset).copied();
        match self.config.recovery {
            Recovery::Fail => {
                debug!(offset, "no token matches");
                self.restart_at(offset);
                Err(LexicalError { offset, character })
            }
            Recovery::Unknown => {
                debug!(offset, "emitting unknown token");
                let end = (offset + 1).min(input.len());
                let token = make_token(input, offset..end, UNKNOWN_KIND.to_owned());
                self.restart_at(end);
                Ok(token)
            }
        }
    }

    fn restart_at(&mut self, offset: usize) {
        self.token_start = offset;
        self.current = offset;
        self.last_accept = None;
        self.started = false;
        self.traverser.reset();
    }
}

fn make_token(input: &[u8], span: Range<usize>, kind: String) -> Token {
    Token {
        lexeme: input[span.clone()].iter().copied().map(char::from).collect(),
        kind,
        span,
    }
}

/// Iterator returned by [`Lexer::tokens`].
pub struct Tokens<'l, 'a, 'i> {
    lexer: &'l mut Lexer<'a>,
    input: &'i [u8],
    done: bool,
}

impl Iterator for Tokens<'_, '_, '_> {
    type Item = Result<Token, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.lexer.next_token(self.input) {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl core::iter::FusedIterator for Tokens<'_, '_, '_> {}
