//! Candidate quality scoring.
//!
//! A pure heuristic over the answer text: longer, punctuated, structured
//! replies outrank fragments and error strings. Scores only order candidates
//! within one query; they have no meaning across queries.

use crate::config::ScoringConfig;

/// Points for containing a sentence-ending period.
const PERIOD_WEIGHT: u32 = 2;
/// Points for containing a question or exclamation mark.
const EMPHASIS_WEIGHT: u32 = 1;
/// Points for containing clause punctuation (`,`, `;`, `:`).
const CLAUSE_WEIGHT: u32 = 1;
/// Points for containing a discourse marker.
const MARKER_WEIGHT: u32 = 2;
/// Points for containing at least one digit.
const DIGIT_WEIGHT: u32 = 1;

/// Score an answer text. Deterministic, side-effect free, and independent of
/// any other candidate. Texts below the configured floor score exactly 0.
pub fn score(text: &str, config: &ScoringConfig) -> u32 {
    let text = text.trim();
    let length = text.chars().count();
    if length < config.min_length {
        return 0;
    }

    let mut total = 0;

    // Length bands are checked highest first; only the best match counts
    for &(threshold, points) in &config.length_bands {
        if length > threshold {
            total += points;
            break;
        }
    }

    if text.contains('.') {
        total += PERIOD_WEIGHT;
    }
    if text.contains(['?', '!']) {
        total += EMPHASIS_WEIGHT;
    }
    if text.contains([',', ';', ':']) {
        total += CLAUSE_WEIGHT;
    }

    let lowered = text.to_lowercase();
    if config
        .discourse_markers
        .iter()
        .any(|marker| lowered.contains(marker.as_str()))
    {
        total += MARKER_WEIGHT;
    }
    if text.chars().any(|c| c.is_ascii_digit()) {
        total += DIGIT_WEIGHT;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_scores_zero_regardless_of_structure() {
        let config = ScoringConfig::default();
        assert_eq!(score("Yes, it is!", &config), 0);
    }

    #[test]
    fn longer_text_never_scores_lower() {
        let config = ScoringConfig::default();
        let short = "Water boils at 100 degrees Celsius.";
        let long = format!("{short} At higher altitudes the boiling point drops, however, because atmospheric pressure is lower than at sea level.");
        assert!(score(&long, &config) >= score(short, &config));
    }
}
