//! Keyword classes scanned for in the auxiliary text.
//!
//! Each class has a side that pulls its axis down and a side that pushes it
//! up. The scraper only records which keywords were present; deciding what
//! they mean for the score is the scoring engine's job.

use crate::types::LexicalSignal;

/// Complexity class, lowering side.
pub const COMPLEXITY_LOWERING: [&str; 3] = ["nonlinear", "complex", "experimental"];

/// Complexity class, raising side.
pub const COMPLEXITY_RAISING: [&str; 2] = ["simple", "straightforward"];

/// Reception class, raising side.
pub const RECEPTION_RAISING: [&str; 3] = ["masterpiece", "critically acclaimed", "innovative"];

/// Reception class, lowering side.
pub const RECEPTION_LOWERING: [&str; 3] = ["blockbuster", "mainstream", "commercial"];

/// Scan `text` for every keyword, case-insensitively, by substring.
///
/// Matching is by substring, so "complexity" counts as "complex".
pub fn extract_signal(text: &str) -> LexicalSignal {
    let haystack = text.to_lowercase();
    let found = |keywords: &[&str]| {
        keywords
            .iter()
            .filter(|keyword| haystack.contains(**keyword))
            .map(|keyword| keyword.to_string())
            .collect::<Vec<_>>()
    };

    let mut signal = LexicalSignal::default();
    signal
        .complexity_keywords_found
        .extend(found(&COMPLEXITY_LOWERING[..]));
    signal
        .complexity_keywords_found
        .extend(found(&COMPLEXITY_RAISING[..]));
    signal
        .reception_keywords_found
        .extend(found(&RECEPTION_RAISING[..]));
    signal
        .reception_keywords_found
        .extend(found(&RECEPTION_LOWERING[..]));
    signal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_is_case_insensitive() {
        let signal = extract_signal("A NONLINEAR puzzle, hailed as a Masterpiece.");

        assert!(signal.complexity_keywords_found.contains("nonlinear"));
        assert!(signal.reception_keywords_found.contains("masterpiece"));
        assert_eq!(signal.complexity_keywords_found.len(), 1);
        assert_eq!(signal.reception_keywords_found.len(), 1);
    }

    #[test]
    fn test_extract_matches_substrings() {
        let signal = extract_signal("Its complexity and commercially minded marketing");

        assert!(signal.complexity_keywords_found.contains("complex"));
        assert!(signal.reception_keywords_found.contains("commercial"));
    }

    #[test]
    fn test_multi_word_keyword() {
        let signal = extract_signal("The film was Critically Acclaimed on release.");
        assert!(signal.reception_keywords_found.contains("critically acclaimed"));
    }

    #[test]
    fn test_no_keywords_is_neutral() {
        assert!(extract_signal("A film about a dog.").is_neutral());
        assert!(extract_signal("").is_neutral());
    }

    #[test]
    fn test_both_sides_recorded() {
        let signal = extract_signal("a simple yet experimental mainstream blockbuster, innovative");

        assert_eq!(
            signal.complexity_keywords_found.iter().collect::<Vec<_>>(),
            vec!["experimental", "simple"]
        );
        assert_eq!(
            signal.reception_keywords_found.iter().collect::<Vec<_>>(),
            vec!["blockbuster", "innovative", "mainstream"]
        );
    }
}
