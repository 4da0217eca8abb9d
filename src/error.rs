use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the betting agent
#[derive(Error, Debug)]
pub enum AgentError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // User-correctable bet validation failures; carries every violated rule
    #[error("Invalid bet: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Insufficient balance: have {balance} SOL, need {stake} SOL")]
    InsufficientFunds { balance: Decimal, stake: Decimal },

    #[error("Wallet is not connected")]
    WalletNotConnected,

    #[error("No matches found for: {0}")]
    NoMatches(String),

    #[error("No pending bet to confirm or cancel")]
    NoPendingBet,

    // Collaborator faults
    #[error("Market data unavailable: {0}")]
    MarketDataUnavailable(String),

    #[error("Wallet error: {0}")]
    Wallet(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for AgentError
pub type Result<T> = std::result::Result<T, AgentError>;
