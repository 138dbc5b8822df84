//! Shared helpers for the integration tests.

/// Collapse all whitespace runs to single spaces so two renderings of the
/// same program can be compared structurally.
pub fn normalized(source: &str) -> String {
    source.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when `name` occurs in `source` as a whole identifier, not as a
/// substring of a longer one.
pub fn contains_ident(source: &str, name: &str) -> bool {
    let bytes = source.as_bytes();

    for (start, _) in source.match_indices(name) {
        let end = start + name.len();
        let before_ok = start == 0 || !is_ident_byte(bytes[start - 1]);
        let after_ok = end == bytes.len() || !is_ident_byte(bytes[end]);
        if before_ok && after_ok {
            return true;
        }
    }

    false
}

fn is_ident_byte(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_ident_matching() {
        assert!(contains_ident("int state = 0;", "state"));
        assert!(!contains_ident("int estate = 0;", "state"));
        assert!(!contains_ident("int state_0 = 0;", "state"));
    }
}
