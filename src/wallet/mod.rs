pub mod simulated;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;

pub use simulated::SimulatedWallet;

/// Capability seam the betting flow holds onto a wallet through.
///
/// Two facts (connected, balance) and one notification. Connecting,
/// depositing and withdrawing are concerns of the concrete wallet and its
/// presentation layer, not of the agent.
#[async_trait]
pub trait WalletGateway: Send + Sync {
    fn is_connected(&self) -> bool;

    /// Spendable balance in SOL
    async fn balance(&self) -> Result<Decimal>;

    /// Nudge the wallet to refresh its balance after a confirmed bet.
    /// Callers ignore the outcome; a failed refresh never fails the bet.
    async fn request_balance_refresh(&self) -> Result<()>;
}
