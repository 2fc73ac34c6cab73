//! User-facing message pools for the CLI layer.
//!
//! Everything here is presentation: waiting phrases for the spinner and the
//! conversational prefixes used in chat mode. None of it feeds back into
//! scoring or fusion.

use rand::prelude::IndexedRandom;

static WAITING_MESSAGES: &[&str] = &[
    "🎶 Tuning the model chorus...",
    "📡 Polling every voice in the choir...",
    "🧠 Gathering independent opinions...",
    "🌐 Fanning your question out across the wire...",
    "⚖️  Weighing answers against each other...",
    "🔀 Merging perspectives into one reply...",
    "🛰️  Waiting for the slowest soloist...",
    "🎼 Arranging responses by quality...",
];

/// Conversational openers for chat mode, in the spirit of a helpful assistant
static RESPONSE_STYLES: &[&str] = &[
    "Alright, here's what I can tell you:",
    "After checking a few sources, here's the answer:",
    "Good question! Here's what came back:",
    "Here's a consolidated answer:",
    "From what I gathered:",
];

/// Pick a random waiting message for the spinner
pub fn random_waiting_message() -> String {
    let mut rng = rand::rng();
    WAITING_MESSAGES
        .choose(&mut rng)
        .copied()
        .unwrap_or("Working...")
        .to_string()
}

/// Prefix an answer with a random conversational opener. Pure formatting,
/// applied only at the chat-mode boundary.
pub fn with_conversational_opener(answer: &str) -> String {
    let mut rng = rand::rng();
    let opener = RESPONSE_STYLES.choose(&mut rng).copied().unwrap_or("");
    if opener.is_empty() {
        answer.to_string()
    } else {
        format!("{opener}\n{answer}")
    }
}
