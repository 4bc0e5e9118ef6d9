/// One candidate classification carried by an accepting state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TokenInfo {
    pub kind: String,
    pub priority: i32,
}

impl TokenInfo {
    pub fn new(kind: impl Into<String>, priority: i32) -> Self {
        Self {
            kind: kind.into(),
            priority,
        }
    }
}

/// Pick the entry with the strictly greatest priority.
///
/// Equal priorities keep the entry that comes first in `payload`.
pub fn select_token(payload: &[TokenInfo]) -> Option<&TokenInfo> {
    // `Iterator::max_by_key` keeps the last maximum, so fold by hand.
    payload.iter().fold(None, |best, info| match best {
        Some(current) if current.priority >= info.priority => Some(current),
        _ => Some(info),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_priority_wins() {
        let payload = [
            TokenInfo::new("ID", 10),
            TokenInfo::new("IF", 20),
            TokenInfo::new("NUM", -3),
        ];
        assert_eq!(select_token(&payload).map(|info| info.kind.as_str()), Some("IF"));
    }

    #[test]
    fn ties_keep_payload_order() {
        let payload = [TokenInfo::new("FIRST", 5), TokenInfo::new("SECOND", 5)];
        assert_eq!(
            select_token(&payload).map(|info| info.kind.as_str()),
            Some("FIRST")
        );
        assert_eq!(select_token(&[]), None);
    }
}
