use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::{Match, MatchStatus, OddsBoard};
use crate::error::Result;

use super::OddsSource;

/// Mock odds feed serving a fixed board of five fixtures.
///
/// Stands in for a real odds API. Fixtures are rebuilt each fetch cycle so
/// kickoff times stay relative to now, then served from a time-boxed cache.
pub struct StaticOddsFeed {
    cache_ttl: std::time::Duration,
    cache: RwLock<Option<CacheEntry>>,
}

struct CacheEntry {
    fetched_at: Instant,
    matches: Vec<Match>,
}

impl StaticOddsFeed {
    pub fn new(cache_ttl: std::time::Duration) -> Self {
        Self {
            cache_ttl,
            cache: RwLock::new(None),
        }
    }

    async fn fetch(&self) -> Vec<Match> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.as_ref() {
                if entry.fetched_at.elapsed() < self.cache_ttl {
                    return entry.matches.clone();
                }
            }
        }

        debug!("odds cache stale, rebuilding fixture board");
        let matches = board();
        let mut cache = self.cache.write().await;
        *cache = Some(CacheEntry {
            fetched_at: Instant::now(),
            matches: matches.clone(),
        });
        matches
    }
}

impl Default for StaticOddsFeed {
    fn default() -> Self {
        Self::new(std::time::Duration::from_secs(300))
    }
}

#[async_trait]
impl OddsSource for StaticOddsFeed {
    async fn list_matches(&self) -> Result<Vec<Match>> {
        Ok(self.fetch().await)
    }

    async fn search_matches(&self, term: &str) -> Result<Vec<Match>> {
        let matches = self.fetch().await;
        Ok(matches.into_iter().filter(|m| m.mentions(term)).collect())
    }

    async fn odds_for(&self, match_id: &str) -> Result<Option<OddsBoard>> {
        let matches = self.fetch().await;
        Ok(matches.iter().find(|m| m.id == match_id).map(|m| m.odds))
    }
}

fn fixture(
    id: &str,
    league: &str,
    home: &str,
    away: &str,
    hours_out: i64,
    odds: OddsBoard,
) -> Match {
    Match {
        id: id.to_string(),
        league: league.to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        start_time: Utc::now() + Duration::hours(hours_out),
        status: MatchStatus::Upcoming,
        odds,
    }
}

fn board() -> Vec<Match> {
    vec![
        fixture(
            "match_1",
            "Premier League",
            "Manchester United",
            "Liverpool",
            2,
            OddsBoard {
                home: dec!(2.10),
                draw: dec!(3.20),
                away: dec!(3.50),
            },
        ),
        fixture(
            "match_2",
            "Premier League",
            "Chelsea",
            "Arsenal",
            4,
            OddsBoard {
                home: dec!(1.85),
                draw: dec!(3.40),
                away: dec!(4.20),
            },
        ),
        fixture(
            "match_3",
            "La Liga",
            "Real Madrid",
            "Barcelona",
            6,
            OddsBoard {
                home: dec!(2.30),
                draw: dec!(3.10),
                away: dec!(3.00),
            },
        ),
        fixture(
            "match_4",
            "Bundesliga",
            "Bayern Munich",
            "Borussia Dortmund",
            8,
            OddsBoard {
                home: dec!(1.70),
                draw: dec!(3.80),
                away: dec!(4.50),
            },
        ),
        fixture(
            "match_5",
            "Serie A",
            "Juventus",
            "Inter Milan",
            24,
            OddsBoard {
                home: dec!(2.50),
                draw: dec!(3.00),
                away: dec!(2.80),
            },
        ),
    ]
}
