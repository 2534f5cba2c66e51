//! Count-and-noun phrases for log lines.

/// `1 file`, `3 files`, `0 categories`.
///
/// Nouns ending in a consonant + `y` take `ies`; everything else takes `s`.
pub fn plural_count(count: usize, noun: &str) -> String {
    if count == 1 {
        return format!("1 {noun}");
    }
    match noun.strip_suffix('y') {
        Some(stem) if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) => format!("{count} {stem}ies"),
        _ => format!("{count} {noun}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular() {
        assert_eq!(plural_count(0, "file"), "0 files");
        assert_eq!(plural_count(1, "file"), "1 file");
        assert_eq!(plural_count(12, "task"), "12 tasks");
    }

    #[test]
    fn test_consonant_y() {
        assert_eq!(plural_count(2, "entry"), "2 entries");
        assert_eq!(plural_count(1, "entry"), "1 entry");
        assert_eq!(plural_count(3, "key"), "3 keys");
    }
}
