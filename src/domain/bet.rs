use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::market::{Match, Outcome};

/// Settlement status of a placed bet. The agent only ever creates `Pending`;
/// outcome resolution belongs to a layer that does not exist in this demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Pending,
    Won,
    Lost,
    Void,
}

impl BetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BetStatus::Pending => "⏳ Pending",
            BetStatus::Won => "✅ Won",
            BetStatus::Lost => "❌ Lost",
            BetStatus::Void => "🚫 Void",
        }
    }
}

impl fmt::Display for BetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A fully priced wager awaiting explicit user confirmation.
///
/// Odds are locked at proposal time; a later refresh of the odds feed does
/// not change the payout of a bet already on the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingBet {
    pub game: Match,
    pub outcome: Outcome,
    pub stake: Decimal,
    pub odds: Decimal,
    pub potential_payout: Decimal,
}

impl PendingBet {
    pub fn new(game: Match, outcome: Outcome, stake: Decimal) -> Self {
        let odds = game.odds.price(outcome);
        Self {
            game,
            outcome,
            stake,
            odds,
            potential_payout: stake * odds,
        }
    }
}

/// An immutable, confirmed wager entry in the session's history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetRecord {
    pub id: String,
    pub game: Match,
    pub outcome: Outcome,
    pub stake: Decimal,
    pub odds: Decimal,
    pub potential_payout: Decimal,
    pub placed_at: DateTime<Utc>,
    pub status: BetStatus,
}

impl BetRecord {
    /// Seal a pending bet into a history record at the current time.
    /// Record ids are millisecond timestamps, monotonic enough for a
    /// single conversational session.
    pub fn from_pending(bet: PendingBet) -> Self {
        let placed_at = Utc::now();
        Self {
            id: placed_at.timestamp_millis().to_string(),
            game: bet.game,
            outcome: bet.outcome,
            stake: bet.stake,
            odds: bet.odds,
            potential_payout: bet.potential_payout,
            placed_at,
            status: BetStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::{MatchStatus, OddsBoard};
    use rust_decimal_macros::dec;

    fn fixture() -> Match {
        Match {
            id: "match_1".to_string(),
            league: "Premier League".to_string(),
            home_team: "Manchester United".to_string(),
            away_team: "Liverpool".to_string(),
            start_time: Utc::now() + chrono::Duration::hours(2),
            status: MatchStatus::Upcoming,
            odds: OddsBoard {
                home: dec!(2.10),
                draw: dec!(3.20),
                away: dec!(3.50),
            },
        }
    }

    #[test]
    fn test_pending_bet_locks_odds_and_payout() {
        let bet = PendingBet::new(fixture(), Outcome::Away, dec!(0.5));
        assert_eq!(bet.odds, dec!(3.50));
        assert_eq!(bet.potential_payout, dec!(1.750));
    }

    #[test]
    fn test_record_payout_survives_odds_change() {
        let mut game = fixture();
        let bet = PendingBet::new(game.clone(), Outcome::Home, dec!(0.1));

        // Feed moves after the proposal; the locked price stands.
        game.odds.home = dec!(5.00);
        let record = BetRecord::from_pending(bet);
        assert_eq!(record.odds, dec!(2.10));
        assert_eq!(record.potential_payout, record.stake * record.odds);
        assert_eq!(record.status, BetStatus::Pending);
    }
}
