//! # Name Elicitation
//!
//! The assistant asks for the visitor's name before answering questions.
//! Extraction is heuristic: an ordered list of matchers is tried against the
//! lowercased message, and every candidate goes through a shared stop-list
//! so that greetings and portal vocabulary are never mistaken for names.
//! Known to be fragile for names that collide with common words or are not
//! single `\w+` tokens; that behavior is inherited from the support flow.

use regex::Regex;

/// Common conversational and portal words that must never be captured as a
/// visitor's name.
const STOP_WORDS: &[&str] = &[
    "hi", "hello", "hey", "good", "morning", "afternoon", "evening", "yes", "no", "ok", "okay",
    "sure", "please", "help", "thanks", "thank", "what", "how", "when", "where", "why", "who",
    "which", "possap", "registration", "license", "portal", "login", "password", "payment",
    "certificate", "support", "problem", "issue", "error", "can", "will", "should", "could",
    "would", "need", "want", "like", "get", "have", "make", "take", "give", "find", "know",
    "think", "see", "look", "check", "try", "use", "work", "go", "come",
];

const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
];

/// How a candidate name was matched, which decides how strictly it is
/// validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatcherKind {
    /// An explicit introduction such as "my name is X".
    Phrase,
    /// The whole message is one bare word; only accepted when the original
    /// message is alphabetic and starts with an uppercase letter.
    BareWord,
}

#[derive(Debug, Clone)]
struct NameMatcher {
    re: Regex,
    kind: MatcherKind,
}

/// Extracts visitor names from free-form messages.
#[derive(Debug, Clone)]
pub struct NameExtractor {
    matchers: Vec<NameMatcher>,
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl NameExtractor {
    pub fn new() -> Self {
        let phrase = |pattern: &str| NameMatcher {
            // Fixed literals, compilation cannot fail.
            re: Regex::new(pattern).unwrap(),
            kind: MatcherKind::Phrase,
        };
        let matchers = vec![
            phrase(r"my name is\s+(\w+)"),
            phrase(r"i'm\s+(\w+)"),
            phrase(r"i am\s+(\w+)"),
            phrase(r"call me\s+(\w+)"),
            phrase(r"it's\s+(\w+)"),
            phrase(r"this is\s+(\w+)"),
            phrase(r"name:\s*(\w+)"),
            NameMatcher {
                re: Regex::new(r"^([a-zA-Z]{2,})$").unwrap(),
                kind: MatcherKind::BareWord,
            },
        ];
        Self { matchers }
    }

    /// Tries to extract a name from `message`. Matchers are evaluated in
    /// priority order; the first candidate surviving the stop-list and the
    /// matcher's validity rule wins and is returned capitalized.
    pub fn extract(&self, message: &str) -> Option<String> {
        let original = message.trim();
        let lowered = original.to_lowercase();

        for matcher in &self.matchers {
            let Some(caps) = matcher.re.captures(&lowered) else {
                continue;
            };
            let candidate = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            if candidate.chars().count() < 2 || STOP_WORDS.contains(&candidate) {
                continue;
            }
            match matcher.kind {
                MatcherKind::Phrase => return Some(capitalize(candidate)),
                MatcherKind::BareWord => {
                    let starts_upper = original
                        .chars()
                        .next()
                        .is_some_and(|c| c.is_uppercase());
                    if starts_upper && original.chars().all(|c| c.is_alphabetic()) {
                        return Some(capitalize(candidate));
                    }
                }
            }
        }
        None
    }
}

/// Whether the message reads as a plain greeting.
pub fn is_greeting(message: &str) -> bool {
    let lowered = message.to_lowercase();
    GREETINGS.iter().any(|g| lowered.contains(g))
}

/// First letter uppercased, rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
