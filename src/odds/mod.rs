pub mod mock;

use async_trait::async_trait;

use crate::domain::{Match, OddsBoard};
use crate::error::Result;

pub use mock::StaticOddsFeed;

/// Read-only seam to whatever supplies matches and prices.
///
/// The agent only ever asks three questions of the feed; everything else
/// (refresh cadence, caching, upstream transport) is the implementation's
/// business.
#[async_trait]
pub trait OddsSource: Send + Sync {
    /// Current and upcoming matches, most recent fetch cycle
    async fn list_matches(&self) -> Result<Vec<Match>>;

    /// Matches whose home team, away team, or league contains `term`
    async fn search_matches(&self, term: &str) -> Result<Vec<Match>>;

    /// Odds triple for a specific match, if it is on the board
    async fn odds_for(&self, match_id: &str) -> Result<Option<OddsBoard>>;
}
