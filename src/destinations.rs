//! Destination tag inference.
//!
//! A document's file name (minus extension) is the only metadata source for
//! its destination tag: the name is matched case-insensitively against the
//! configured vocabulary, and the first vocabulary entry contained in the
//! name wins. Names matching nothing stay untagged and are only reachable
//! through unfiltered queries.

/// Infer a destination tag for a document name, or `None` when the name
/// matches no vocabulary entry.
pub fn infer_destination(name: &str, vocabulary: &[String]) -> Option<String> {
    let lower = name.to_lowercase();
    vocabulary
        .iter()
        .find(|entry| lower.contains(&entry.to_lowercase()))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vec<String> {
        ["Europe", "Italy", "Paris", "New York"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn matches_exact_name() {
        assert_eq!(infer_destination("italy", &vocab()), Some("Italy".to_string()));
    }

    #[test]
    fn matches_case_insensitively() {
        assert_eq!(infer_destination("ITALY_guide", &vocab()), Some("Italy".to_string()));
        assert_eq!(infer_destination("paris-essentials", &vocab()), Some("Paris".to_string()));
    }

    #[test]
    fn matches_multi_word_entries() {
        assert_eq!(
            infer_destination("new york on a budget", &vocab()),
            Some("New York".to_string())
        );
    }

    #[test]
    fn unmatched_names_stay_untagged() {
        assert_eq!(infer_destination("packing", &vocab()), None);
        assert_eq!(infer_destination("honeymoon", &vocab()), None);
    }

    #[test]
    fn first_vocabulary_match_wins() {
        // "europe-italy" contains both; vocabulary order decides.
        assert_eq!(
            infer_destination("europe-italy", &vocab()),
            Some("Europe".to_string())
        );
    }
}
