pub mod bet;
pub mod market;
pub mod state;

pub use bet::{BetRecord, BetStatus, PendingBet};
pub use market::{Match, MatchStatus, OddsBoard, Outcome};
pub use state::ConversationState;
