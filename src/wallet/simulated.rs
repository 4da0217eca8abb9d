use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use tracing::{debug, info};

use crate::error::{AgentError, Result};

use super::WalletGateway;

/// In-memory stand-in for a browser wallet extension.
///
/// Deposits and withdrawals move numbers around; no transaction is ever
/// signed or submitted anywhere.
pub struct SimulatedWallet {
    connected: AtomicBool,
    balance: RwLock<Decimal>,
}

impl SimulatedWallet {
    pub fn new(starting_balance: Decimal, connected: bool) -> Self {
        Self {
            connected: AtomicBool::new(connected),
            balance: RwLock::new(starting_balance),
        }
    }

    pub fn connect(&self) {
        self.connected.store(true, Ordering::SeqCst);
        info!("wallet connected");
    }

    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
        info!("wallet disconnected");
    }

    /// Simulated deposit. Credits the balance after basic validation.
    pub fn deposit(&self, amount: Decimal) -> Result<Decimal> {
        self.require_connected()?;
        if amount <= Decimal::ZERO {
            return Err(AgentError::Wallet("deposit amount must be positive".to_string()));
        }
        let mut balance = self.balance.write().expect("wallet balance lock poisoned");
        *balance += amount;
        info!(%amount, new_balance = %balance, "simulated deposit");
        Ok(*balance)
    }

    /// Simulated withdrawal. Refuses to overdraw.
    pub fn withdraw(&self, amount: Decimal) -> Result<Decimal> {
        self.require_connected()?;
        if amount <= Decimal::ZERO {
            return Err(AgentError::Wallet("withdraw amount must be positive".to_string()));
        }
        let mut balance = self.balance.write().expect("wallet balance lock poisoned");
        if *balance < amount {
            return Err(AgentError::InsufficientFunds {
                balance: *balance,
                stake: amount,
            });
        }
        *balance -= amount;
        info!(%amount, new_balance = %balance, "simulated withdrawal");
        Ok(*balance)
    }

    fn require_connected(&self) -> Result<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(AgentError::WalletNotConnected)
        }
    }
}

#[async_trait]
impl WalletGateway for SimulatedWallet {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn balance(&self) -> Result<Decimal> {
        self.require_connected()?;
        Ok(*self.balance.read().expect("wallet balance lock poisoned"))
    }

    async fn request_balance_refresh(&self) -> Result<()> {
        // Nothing upstream to poll; the simulated balance is already current.
        debug!("balance refresh requested");
        Ok(())
    }
}
