pub mod flow;
pub mod intent;
pub mod responses;
pub mod session;

pub use flow::BettingFlow;
pub use intent::{BetDetails, ClassifiedIntent, Intent, IntentClassifier};
pub use responses::{ResponseCategory, ResponsePool};
pub use session::ChatSession;
