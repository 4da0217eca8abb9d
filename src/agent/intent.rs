use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use crate::domain::Outcome;

const GREETING_TOKENS: &[&str] = &["hello", "hi", "hey", "greetings"];
const HELP_KEYWORDS: &[&str] = &["help", "guide", "how to", "what can"];
const CONFIRM_KEYWORDS: &[&str] = &["confirm", "yes", "ok", "agree", "sure"];
const CANCEL_KEYWORDS: &[&str] = &["cancel", "no", "stop", "abort"];
const BETTING_KEYWORDS: &[&str] = &["bet", "place bet", "wager", "stake"];
const CURRENCY_TOKENS: &[&str] = &["sol", "token"];

/// Known team names the extractor recognizes, in roster order
pub const TEAM_ROSTER: &[&str] = &[
    "manchester",
    "liverpool",
    "chelsea",
    "arsenal",
    "real madrid",
    "barcelona",
    "bayern",
    "juventus",
];

/// Structured parameters pulled out of a betting message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BetDetails {
    pub teams: Vec<String>,
    pub outcome: Option<Outcome>,
    pub stake: Option<Decimal>,
}

/// What the user asked for, as one tag of a fixed-priority cascade
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Greeting,
    Help,
    Confirmation,
    Cancel,
    Betting(BetDetails),
    Matches { teams: Vec<String> },
    History,
    Unknown,
}

/// Classification result. `confidence` is diagnostic only; nothing may
/// branch on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedIntent {
    pub intent: Intent,
    pub confidence: f32,
}

struct Rule {
    apply: fn(&str) -> Option<Intent>,
    confidence: f32,
}

/// The cascade, highest priority first. Classification walks this list and
/// returns the first rule that fires, so e.g. a message containing both
/// "yes" and "bet" is a confirmation, never a new bet.
const RULES: &[Rule] = &[
    Rule { apply: greeting_rule, confidence: 0.9 },
    Rule { apply: help_rule, confidence: 0.8 },
    Rule { apply: confirmation_rule, confidence: 0.9 },
    Rule { apply: cancel_rule, confidence: 0.9 },
    Rule { apply: betting_rule, confidence: 0.8 },
    Rule { apply: matches_rule, confidence: 0.0 },
    Rule { apply: history_rule, confidence: 0.0 },
];

fn contains_any(msg: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| msg.contains(k))
}

// Anchored at the very start of the message; leading whitespace defeats it
fn greeting_rule(msg: &str) -> Option<Intent> {
    GREETING_TOKENS
        .iter()
        .any(|t| msg.starts_with(t))
        .then_some(Intent::Greeting)
}

fn help_rule(msg: &str) -> Option<Intent> {
    contains_any(msg, HELP_KEYWORDS).then_some(Intent::Help)
}

fn confirmation_rule(msg: &str) -> Option<Intent> {
    contains_any(msg, CONFIRM_KEYWORDS).then_some(Intent::Confirmation)
}

fn cancel_rule(msg: &str) -> Option<Intent> {
    contains_any(msg, CANCEL_KEYWORDS).then_some(Intent::Cancel)
}

fn betting_rule(msg: &str) -> Option<Intent> {
    contains_any(msg, BETTING_KEYWORDS).then(|| {
        Intent::Betting(BetDetails {
            teams: extract_teams(msg),
            outcome: extract_outcome(msg),
            stake: extract_stake(msg),
        })
    })
}

fn matches_rule(msg: &str) -> Option<Intent> {
    msg.contains("matches").then(|| Intent::Matches {
        teams: extract_teams(msg),
    })
}

fn history_rule(msg: &str) -> Option<Intent> {
    msg.contains("history").then_some(Intent::History)
}

/// All roster teams mentioned in the message, in roster order.
/// Roster entries are distinct, so duplicates cannot occur.
pub fn extract_teams(msg: &str) -> Vec<String> {
    TEAM_ROSTER
        .iter()
        .filter(|team| msg.contains(*team))
        .map(|team| team.to_string())
        .collect()
}

/// First matching synonym group wins.
///
/// "win"/"lose" map to home/away regardless of which team was named, so
/// "liverpool to win" yields `Home` even when Liverpool is the away side.
/// Deliberately kept: the flow only auto-places when a single match was
/// resolved, and the confirmation prompt spells out exactly which side the
/// stake lands on.
pub fn extract_outcome(msg: &str) -> Option<Outcome> {
    if msg.contains("win") || msg.contains("victory") {
        Some(Outcome::Home)
    } else if msg.contains("lose") || msg.contains("defeat") {
        Some(Outcome::Away)
    } else if msg.contains("draw") || msg.contains("tie") {
        Some(Outcome::Draw)
    } else {
        None
    }
}

/// A decimal number immediately followed (optional whitespace) by a
/// currency token, e.g. "0.5 sol" or "2token".
pub fn extract_stake(msg: &str) -> Option<Decimal> {
    let bytes = msg.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }

        let rest = msg[i..].trim_start();
        if CURRENCY_TOKENS.iter().any(|t| rest.starts_with(t)) {
            let number = msg[start..i].trim_end_matches('.');
            if let Ok(stake) = Decimal::from_str(number) {
                return Some(stake);
            }
        }
    }
    None
}

/// Keyword-cascade intent classifier. Stateless; one instance per session
/// for symmetry with the flow controller it feeds.
#[derive(Debug, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Map raw text to exactly one intent via the fixed-priority cascade
    pub fn classify(&self, text: &str) -> ClassifiedIntent {
        let msg = text.to_lowercase();
        for rule in RULES {
            if let Some(intent) = (rule.apply)(&msg) {
                debug!(?intent, confidence = rule.confidence, "intent classified");
                return ClassifiedIntent {
                    intent,
                    confidence: rule.confidence,
                };
            }
        }
        ClassifiedIntent {
            intent: Intent::Unknown,
            confidence: 0.0,
        }
    }
}
