//! Candidate ranking and answer synthesis.
//!
//! Fusion is deterministic: a stable sort by descending score, ties broken by
//! the candidates' input order (which is source-configuration order), then a
//! fixed fallback chain for the degenerate cases. Identical input always
//! produces identical output, and fusion never fails.

use std::fmt::Write;

/// Returned when no source produced anything at all.
pub const NO_USABLE_ANSWER: &str =
    "No source returned a usable answer. Check your connection and try rephrasing the question.";

/// An extracted, scored answer attributed to one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub source: String,
    pub text: String,
    pub score: u32,
}

/// Merge the candidates into one final answer string.
///
/// Policy, in order: no candidates -> fixed failure message; no positive
/// scores -> longest text, labeled; one positive -> that answer, labeled with
/// source and score; several -> the top `max_fused` concatenated in
/// descending-score order under a summary header.
pub fn fuse(candidates: &[Candidate], max_fused: usize) -> String {
    if candidates.is_empty() {
        return NO_USABLE_ANSWER.to_string();
    }

    let mut ranked: Vec<&Candidate> = candidates.iter().collect();
    // Stable sort: equal scores keep their configuration order
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    let positive: Vec<&Candidate> = ranked
        .iter()
        .copied()
        .filter(|candidate| candidate.score > 0)
        .collect();

    if positive.is_empty() {
        // Nothing scored: fall back to the longest text on the theory that
        // the most substantial reply is the least likely to be an error page
        let fallback = longest(candidates);
        return format!("Answer from {}:\n\n{}", fallback.source, fallback.text);
    }

    if positive.len() == 1 {
        let only = positive[0];
        return format!(
            "Answer from {} (score {}):\n\n{}",
            only.source, only.score, only.text
        );
    }

    let shown = &positive[..positive.len().min(max_fused.max(1))];
    let mut answer = format!(
        "Synthesized from the top {} of {} responding sources:\n",
        shown.len(),
        candidates.len()
    );
    for (index, candidate) in shown.iter().enumerate() {
        let _ = write!(
            answer,
            "\n[{}] {} (score {})\n{}\n",
            index + 1,
            candidate.source,
            candidate.score,
            candidate.text
        );
    }
    answer.trim_end().to_string()
}

/// First candidate with the longest text; earlier candidates win ties.
fn longest(candidates: &[Candidate]) -> &Candidate {
    let mut best = &candidates[0];
    for candidate in &candidates[1..] {
        if candidate.text.len() > best.text.len() {
            best = candidate;
        }
    }
    best
}
