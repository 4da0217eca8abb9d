use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{BetRecord, Match, PendingBet};

const GREETING: &[&str] = &[
    "Hello! I'm your betting assistant. I can help you bet on football matches!",
    "Hi there! I'm ready to help you place bets on exciting matches!",
    "Welcome! Tell me which match you want to bet on!",
];

const HELP: &[&str] = &[
    "I can help you:\n• View match list\n• Place bets on matches\n• Check betting history\n• Manage balance",
    "You can tell me things like: 'I want to bet on Manchester United to win' or 'Show me today's matches'",
    "Try saying: 'Bet 0.1 SOL on Real Madrid to win' or 'I want to bet on a draw'",
];

const NO_MATCHES: &[&str] = &[
    "No matches found right now. Try searching with different keywords!",
    "I couldn't find any matches. Would you like to see the current match list?",
];

const BET_PLACED: &[&str] = &[
    "Excellent! I've placed your bet. Good luck! 🍀",
    "Bet placed successfully! Hope you win! ⚽",
    "Done! I've placed the bet as requested!",
];

const BET_ERROR: &[&str] = &[
    "There was an error placing the bet. Please try again!",
    "Cannot place bet right now. Please check your balance and try again!",
];

const NEED_WALLET: &[&str] = &[
    "You need to connect your wallet before placing bets!",
    "Please connect your wallet to start betting!",
];

const CONFIRM_BET: &[&str] = &[
    "Are you sure you want to place this bet? Type 'confirm' to continue.",
    "Please confirm: Do you want to place this bet?",
];

/// Canned reply categories. Wording varies per pick; meaning never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCategory {
    Greeting,
    Help,
    NoMatches,
    BetPlaced,
    BetError,
    NeedWallet,
    ConfirmBet,
}

impl ResponseCategory {
    pub(crate) fn pool(&self) -> &'static [&'static str] {
        match self {
            ResponseCategory::Greeting => GREETING,
            ResponseCategory::Help => HELP,
            ResponseCategory::NoMatches => NO_MATCHES,
            ResponseCategory::BetPlaced => BET_PLACED,
            ResponseCategory::BetError => BET_ERROR,
            ResponseCategory::NeedWallet => NEED_WALLET,
            ResponseCategory::ConfirmBet => CONFIRM_BET,
        }
    }
}

/// Uniform-random canned response picker.
///
/// The RNG is owned and seedable so tests can pin the wording; randomness
/// affects phrasing only, never what the agent does.
pub struct ResponsePool {
    rng: StdRng,
}

impl ResponsePool {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn pick(&mut self, category: ResponseCategory) -> String {
        let pool = category.pool();
        pool[self.rng.gen_range(0..pool.len())].to_string()
    }
}

impl Default for ResponsePool {
    fn default() -> Self {
        Self::new()
    }
}

/// Numbered listing of upcoming matches, capped at `limit`
pub fn format_match_list(matches: &[Match], limit: usize) -> String {
    let mut out = String::from("📋 Current Matches:\n\n");
    for (i, m) in matches.iter().take(limit).enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, m.title()));
        out.push_str(&format!("   🏆 {}\n", m.league));
        out.push_str(&format!("   ⏰ {}\n", m.kickoff_in()));
        out.push_str(&format!(
            "   📊 Odds: {} | {} | {}\n\n",
            m.odds.home, m.odds.draw, m.odds.away
        ));
    }
    out.push_str("Tell me which match you want to bet on!");
    out
}

/// Disambiguation listing shown when a betting request is underspecified
pub fn format_matches_for_betting(matches: &[Match], limit: usize) -> String {
    if let [m] = matches {
        return format!(
            "🎯 Found Match:\n\n{}\n🏆 {}\n⏰ {}\n📊 Odds: Home {} | Draw {} | Away {}\n\n\
             Tell me how you want to bet! Example: \"Bet 0.1 SOL on home team to win\"",
            m.title(),
            m.league,
            m.kickoff_in(),
            m.odds.home,
            m.odds.draw,
            m.odds.away,
        );
    }
    format_match_list(matches, limit)
}

/// Two-step handshake prompt summarizing the proposed bet
pub fn format_confirm_prompt(bet: &PendingBet) -> String {
    format!(
        "🎯 Confirm Bet:\n\n\
         📅 Match: {}\n\
         💰 Bet: {} SOL on {}\n\
         📊 Odds: {}\n\
         🏆 Potential Win: {:.3} SOL\n\n\
         Type 'confirm' to place bet or 'cancel' to abort.",
        bet.game.title(),
        bet.stake,
        bet.game.outcome_label(bet.outcome),
        bet.odds,
        bet.potential_payout,
    )
}

/// Reverse-chronological history listing, most recent `limit` entries
pub fn format_history(history: &[BetRecord], limit: usize) -> String {
    if history.is_empty() {
        return "📈 You have no betting history yet.".to_string();
    }

    let mut out = String::from("📈 Your Betting History:\n\n");
    for (i, bet) in history.iter().rev().take(limit).enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, bet.game.title()));
        out.push_str(&format!(
            "   💰 {} SOL on {}\n",
            bet.stake,
            bet.game.outcome_label(bet.outcome)
        ));
        out.push_str(&format!("   📊 Odds: {}\n", bet.odds));
        out.push_str(&format!(
            "   📅 {}\n",
            bet.placed_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out.push_str(&format!("   📋 Status: {}\n\n", bet.status));
    }
    out
}
