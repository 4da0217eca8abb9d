use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a match a bet is wagered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Home => "home",
            Outcome::Draw => "draw",
            Outcome::Away => "away",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Match lifecycle status. The mock feed only ever produces `Upcoming`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Live,
    Finished,
}

/// Fixed-odds decimal multipliers for the three outcomes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OddsBoard {
    pub home: Decimal,
    pub draw: Decimal,
    pub away: Decimal,
}

impl OddsBoard {
    /// Get the odds value for a given outcome
    pub fn price(&self, outcome: Outcome) -> Decimal {
        match outcome {
            Outcome::Home => self.home,
            Outcome::Draw => self.draw,
            Outcome::Away => self.away,
        }
    }
}

/// One schedulable sporting event with two named sides and fixed-odds pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    pub start_time: DateTime<Utc>,
    pub status: MatchStatus,
    pub odds: OddsBoard,
}

impl Match {
    pub fn title(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }

    /// Team name shown for a wagered outcome ("Draw" for a tie)
    pub fn outcome_label(&self, outcome: Outcome) -> &str {
        match outcome {
            Outcome::Home => &self.home_team,
            Outcome::Away => &self.away_team,
            Outcome::Draw => "Draw",
        }
    }

    /// Case-insensitive substring match against either team or the league
    pub fn mentions(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.home_team.to_lowercase().contains(&term)
            || self.away_team.to_lowercase().contains(&term)
            || self.league.to_lowercase().contains(&term)
    }

    /// Human-readable time until kickoff, relative to now
    pub fn kickoff_in(&self) -> String {
        let minutes = (self.start_time - Utc::now()).num_minutes().max(0);
        if minutes < 60 {
            format!("in {} minutes", minutes)
        } else if minutes < 24 * 60 {
            format!("in {} hours", minutes / 60)
        } else {
            format!("in {} days", minutes / (24 * 60))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fixture() -> Match {
        Match {
            id: "match_9".to_string(),
            league: "Premier League".to_string(),
            home_team: "Chelsea".to_string(),
            away_team: "Arsenal".to_string(),
            start_time: Utc::now() + chrono::Duration::hours(3),
            status: MatchStatus::Upcoming,
            odds: OddsBoard {
                home: dec!(1.85),
                draw: dec!(3.40),
                away: dec!(4.20),
            },
        }
    }

    #[test]
    fn test_odds_price_by_outcome() {
        let m = fixture();
        assert_eq!(m.odds.price(Outcome::Home), dec!(1.85));
        assert_eq!(m.odds.price(Outcome::Draw), dec!(3.40));
        assert_eq!(m.odds.price(Outcome::Away), dec!(4.20));
    }

    #[test]
    fn test_mentions_is_case_insensitive() {
        let m = fixture();
        assert!(m.mentions("arsenal"));
        assert!(m.mentions("CHELSEA"));
        assert!(m.mentions("premier"));
        assert!(!m.mentions("liverpool"));
    }

    #[test]
    fn test_outcome_label() {
        let m = fixture();
        assert_eq!(m.outcome_label(Outcome::Home), "Chelsea");
        assert_eq!(m.outcome_label(Outcome::Away), "Arsenal");
        assert_eq!(m.outcome_label(Outcome::Draw), "Draw");
    }

    #[test]
    fn test_kickoff_in_hours() {
        let m = fixture();
        assert_eq!(m.kickoff_in(), "in 2 hours");
    }
}
