use lexfa::{Automaton, Lexer, LexerConfig, LexicalError, Recovery, State, TokenInfo, combine};

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";

fn numbers() -> Automaton {
    let mut nfa = Automaton::new(DIGITS);
    nfa.add_state(State::start("n0")).unwrap();
    nfa.add_state(State::accept("n1", [TokenInfo::new("NUM", 10)]))
        .unwrap();
    nfa.add_transitions("n0", DIGITS, "n1").unwrap();
    nfa.add_transitions("n1", DIGITS, "n1").unwrap();
    nfa
}

fn identifiers() -> Automaton {
    let mut nfa = Automaton::new(format!("{LETTERS}{DIGITS}").as_str());
    nfa.add_state(State::start("i0")).unwrap();
    nfa.add_state(State::accept("i1", [TokenInfo::new("ID", 10)]))
        .unwrap();
    nfa.add_transitions("i0", LETTERS, "i1").unwrap();
    nfa.add_transitions("i1", LETTERS, "i1").unwrap();
    nfa.add_transitions("i1", DIGITS, "i1").unwrap();
    nfa
}

fn keyword_if() -> Automaton {
    let mut nfa = Automaton::new("if");
    nfa.add_state(State::start("k0")).unwrap();
    nfa.add_state(State::new("k1")).unwrap();
    nfa.add_state(State::accept("k2", [TokenInfo::new("IF", 20)]))
        .unwrap();
    nfa.add_transition("k0", b'i', "k1").unwrap();
    nfa.add_transition("k1", b'f', "k2").unwrap();
    nfa
}

/// Digits with an optional exponent: `3`, `3e5`, `3e-5`.
fn scientific() -> Automaton {
    let mut nfa = Automaton::new(format!("{DIGITS}e+-").as_str());
    nfa.add_state(State::start("d0")).unwrap();
    nfa.add_state(State::accept("d1", [TokenInfo::new("NUM", 10)]))
        .unwrap();
    nfa.add_state(State::new("e1")).unwrap();
    nfa.add_state(State::new("e2")).unwrap();
    nfa.add_state(State::accept("e3", [TokenInfo::new("NUM", 10)]))
        .unwrap();
    nfa.add_transitions("d0", DIGITS, "d1").unwrap();
    nfa.add_transitions("d1", DIGITS, "d1").unwrap();
    nfa.add_transition("d1", b'e', "e1").unwrap();
    nfa.add_transitions("e1", "+-", "e2").unwrap();
    nfa.add_transitions("e1", DIGITS, "e3").unwrap();
    nfa.add_transitions("e2", DIGITS, "e3").unwrap();
    nfa.add_transitions("e3", DIGITS, "e3").unwrap();
    nfa
}

fn pairs(dfa: &Automaton, input: &str) -> Result<Vec<(String, String)>, LexicalError> {
    let mut lexer = Lexer::new(dfa).unwrap();
    let tokens = lexer.tokenize(input)?;
    Ok(tokens
        .into_iter()
        .map(|token| (token.lexeme, token.kind))
        .collect())
}

fn owned(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(lexeme, kind)| (lexeme.to_string(), kind.to_string()))
        .collect()
}

#[test]
fn scenario_a_single_chain() {
    let mut nfa = Automaton::new("ab");
    nfa.add_state(State::start("S0")).unwrap();
    nfa.add_state(State::new("S1")).unwrap();
    nfa.add_state(State::accept("S2", [TokenInfo::new("AB", 1)]))
        .unwrap();
    nfa.add_transition("S0", b'a', "S1").unwrap();
    nfa.add_transition("S1", b'b', "S2").unwrap();
    let dfa = nfa.to_dfa();

    assert_eq!(pairs(&dfa, "ab"), Ok(owned(&[("ab", "AB")])));
    assert_eq!(
        pairs(&dfa, "ba"),
        Err(LexicalError {
            offset: 0,
            character: Some(b'b'),
        })
    );
}

#[test]
fn scenario_b_numbers_and_identifiers() {
    let dfa = combine([&numbers(), &identifiers()]).to_dfa();
    assert_eq!(
        pairs(&dfa, "a1 12"),
        Ok(owned(&[("a1", "ID"), ("12", "NUM")]))
    );
}

#[test]
fn scenario_c_priority_breaks_equal_length_ties() {
    let dfa = combine([&keyword_if(), &identifiers()]).to_dfa();
    assert_eq!(pairs(&dfa, "if"), Ok(owned(&[("if", "IF")])));
    // longer matches still win over priority
    assert_eq!(pairs(&dfa, "iff"), Ok(owned(&[("iff", "ID")])));
    assert_eq!(
        pairs(&dfa, "i if\nif2"),
        Ok(owned(&[("i", "ID"), ("if", "IF"), ("if2", "ID")]))
    );
}

#[test]
fn scenario_d_whitespace_only() {
    let dfa = combine([&numbers(), &identifiers()]).to_dfa();
    assert_eq!(pairs(&dfa, "   "), Ok(Vec::new()));
    assert_eq!(pairs(&dfa, " \n \n"), Ok(Vec::new()));
    assert_eq!(pairs(&dfa, ""), Ok(Vec::new()));
}

#[test]
fn scenario_e_dangling_exponent_fails() {
    let dfa = scientific().to_dfa();
    assert_eq!(pairs(&dfa, "3e-5"), Ok(owned(&[("3e-5", "NUM")])));

    let mut lexer = Lexer::new(&dfa).unwrap();
    let first = lexer.next_token("3e-").unwrap().unwrap();
    assert_eq!(first.as_pair(), ("3", "NUM"));
    assert_eq!(
        lexer.next_token("3e-"),
        Err(LexicalError {
            offset: 1,
            character: Some(b'e'),
        })
    );
    assert!(lexer.tokenize("3e-").is_err());
}

#[test]
fn scenario_e_dangling_exponent_recovers() {
    let dfa = scientific().to_dfa();
    let config = LexerConfig::new().with_recovery(Recovery::Unknown);
    let mut lexer = Lexer::with_config(&dfa, config).unwrap();

    let tokens = lexer.tokenize("3e-").unwrap();
    let kinds: Vec<(&str, &str)> = tokens.iter().map(|token| token.as_pair()).collect();
    assert_eq!(
        kinds,
        [("3", "NUM"), ("e", lexfa::UNKNOWN_KIND), ("-", lexfa::UNKNOWN_KIND)]
    );
    // every input byte is covered by exactly one token
    let covered: usize = tokens.iter().map(|token| token.span.len()).sum();
    assert_eq!(covered, 3);
}
