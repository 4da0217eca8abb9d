pub mod agent;
pub mod config;
pub mod domain;
pub mod error;
pub mod odds;
pub mod wallet;

pub use agent::{BettingFlow, ChatSession, Intent, IntentClassifier};
pub use config::AppConfig;
pub use domain::{BetRecord, BetStatus, Match, Outcome, PendingBet};
pub use error::{AgentError, Result};
pub use odds::{OddsSource, StaticOddsFeed};
pub use wallet::{SimulatedWallet, WalletGateway};
