/// Placeholder strings the API uses in place of a real value.
pub const DEFAULT_SENTINELS: &[&str] = &["unknown", "n/a", ""];

/// The set of placeholder strings treated as "no value".
///
/// Matching is exact and case-sensitive after surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelSet {
    values: Vec<String>,
}

impl SentinelSet {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        let text = text.trim();
        self.values.iter().any(|v| v == text)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

impl Default for SentinelSet {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINELS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_matches_api_placeholders() {
        let set = SentinelSet::default();
        assert!(set.contains("unknown"));
        assert!(set.contains("n/a"));
        assert!(set.contains(""));
        assert!(set.contains("  "));
        assert!(!set.contains("none"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let set = SentinelSet::default();
        assert!(!set.contains("Unknown"));
        assert!(!set.contains("N/A"));
    }

    #[test]
    fn custom_set() {
        let set = SentinelSet::new(["indefinite"]);
        assert!(set.contains("indefinite"));
        assert!(!set.contains("unknown"));
        assert_eq!(set.iter().collect::<Vec<_>>(), ["indefinite"]);
    }
}
