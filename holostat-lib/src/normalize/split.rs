/// Split a comma-separated attribute into trimmed, non-empty tokens, preserving order.
///
/// Duplicates are kept. Joining the result with `", "` reproduces the trimmed input
/// whenever the input had no empty segments.
#[must_use]
pub fn split(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims() {
        assert_eq!(split("arid, temperate ,tropical"), ["arid", "temperate", "tropical"]);
    }

    #[test]
    fn drops_empty_segments() {
        assert_eq!(split("blue,, green, "), ["blue", "green"]);
        assert!(split("").is_empty());
        assert!(split(" , ").is_empty());
    }

    #[test]
    fn keeps_duplicates_and_order() {
        assert_eq!(split("grass, grass, mountains"), ["grass", "grass", "mountains"]);
    }

    #[test]
    fn single_token() {
        assert_eq!(split("desert"), ["desert"]);
    }

    #[test]
    fn join_reproduces_clean_input() {
        let input = "grasslands, mountains, jungle";
        assert_eq!(split(input).join(", "), input);
    }
}
