use chorus::config::ScoringConfig;
use chorus::pipeline::score::score;

#[test]
fn test_below_floor_scores_zero() {
    let config = ScoringConfig::default();
    // Well-punctuated, has a digit - still zero below the floor
    assert_eq!(score("It is 42!", &config), 0);
    assert_eq!(score("", &config), 0);
    assert_eq!(score("   ", &config), 0);
}

#[test]
fn test_monotone_across_length_bands() {
    let config = ScoringConfig::default();
    // Same structural features, growing length
    let short = "Rust compiles to native code."; // under 30 chars
    let medium = "Rust compiles to native code and its borrow checker enforces memory safety."; // ~76
    let long = "Rust compiles to native code and its borrow checker enforces memory safety without garbage collection, which keeps runtime overhead low across embedded targets."; // >150

    let s_short = score(short, &config);
    let s_medium = score(medium, &config);
    let s_long = score(long, &config);
    assert!(s_short <= s_medium);
    assert!(s_medium <= s_long);
    assert!(s_long > 0);
}

#[test]
fn test_punctuation_signals_add_up() {
    let config = ScoringConfig::default();
    let flat = "the quick brown fox jumps over the lazy dog today";
    let punctuated = "The quick brown fox jumps over the lazy dog, today.";
    assert!(score(punctuated, &config) > score(flat, &config));
}

#[test]
fn test_digit_and_marker_bonuses() {
    let config = ScoringConfig::default();
    let plain = "the tower is tall and made of iron and steel beams";
    let digits = "the tower is 324 meters tall and made of iron beams";
    assert!(score(digits, &config) > score(plain, &config));

    let marked = "the tower is tall, for example taller than most churches";
    assert!(score(marked, &config) > score(plain, &config));
}

#[test]
fn test_deterministic_and_order_independent() {
    let config = ScoringConfig::default();
    let text = "However, water boils at 100 degrees: a fact worth repeating, for example in cooking.";
    let first = score(text, &config);
    // Interleave other calls; the result for the same text must not move
    let _ = score("Something entirely different happened here today.", &config);
    let second = score(text, &config);
    assert_eq!(first, second);
}

#[test]
fn test_score_is_bounded_with_defaults() {
    let config = ScoringConfig::default();
    // Every signal at once: all bands, every punctuation class, marker, digit
    let kitchen_sink = "Firstly, the answer is 42! However, for example: a much longer \
        explanation follows; it continues with enough detail, clauses, and trailing \
        sentences to clear the highest length band comfortably. Therefore the score \
        must still stay inside its fixed bounds.";
    let value = score(kitchen_sink, &config);
    assert!(value > 0);
    assert!(value <= 10);
}

#[test]
fn test_custom_thresholds_are_respected() {
    let config = ScoringConfig {
        min_length: 5,
        length_bands: vec![(10, 7)],
        discourse_markers: vec!["zebra".to_string()],
    };
    // 11 chars, no punctuation, no digits: only the custom band fires
    assert_eq!(score("hello world", &config), 7);
    // Custom marker fires on top of the band
    assert_eq!(score("zebra crossing", &config), 9);
}
