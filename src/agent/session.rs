use std::sync::Arc;
use tracing::error;

use crate::config::AppConfig;
use crate::domain::BetRecord;
use crate::odds::OddsSource;
use crate::wallet::WalletGateway;

use super::flow::BettingFlow;
use super::intent::{Intent, IntentClassifier};
use super::responses::{ResponseCategory, ResponsePool};

const APOLOGY: &str = "Sorry, I ran into an error processing your message. Please try again!";

/// One betting conversation: classifier plus flow controller behind a
/// single text-in, text-out surface.
///
/// Sessions are explicit values, not globals; construct one per
/// conversation and as many as you like side by side.
pub struct ChatSession {
    classifier: IntentClassifier,
    flow: BettingFlow,
}

impl ChatSession {
    pub fn new(
        config: &AppConfig,
        odds: Arc<dyn OddsSource>,
        wallet: Arc<dyn WalletGateway>,
    ) -> Self {
        Self::build(config, odds, wallet, ResponsePool::new())
    }

    /// Session with pinned canned-response wording, for reproducible output
    pub fn with_seed(
        config: &AppConfig,
        odds: Arc<dyn OddsSource>,
        wallet: Arc<dyn WalletGateway>,
        seed: u64,
    ) -> Self {
        Self::build(config, odds, wallet, ResponsePool::with_seed(seed))
    }

    fn build(
        config: &AppConfig,
        odds: Arc<dyn OddsSource>,
        wallet: Arc<dyn WalletGateway>,
        responses: ResponsePool,
    ) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            flow: BettingFlow::new(config.betting.clone(), odds, wallet, responses),
        }
    }

    /// Single entry point for the presentation layer. Never panics or
    /// propagates an error past this boundary; any internal failure comes
    /// back as a generic apology.
    pub async fn process_message(&mut self, text: &str) -> String {
        let classified = self.classifier.classify(text);

        let result = match classified.intent {
            Intent::Greeting => Ok(self.flow.canned(ResponseCategory::Greeting)),
            Intent::Help => Ok(self.flow.canned(ResponseCategory::Help)),
            Intent::Betting(details) => {
                self.flow
                    .handle_betting(&details.teams, details.outcome, details.stake)
                    .await
            }
            Intent::Confirmation => self.flow.resolve_confirmation(true).await,
            Intent::Cancel => self.flow.resolve_confirmation(false).await,
            Intent::Matches { teams } => self.flow.show_matches(&teams).await,
            Intent::History => Ok(self.flow.show_history()),
            Intent::Unknown => self.flow.fallback(text).await,
        };

        match result {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "failed to process message");
                APOLOGY.to_string()
            }
        }
    }

    /// Confirmed bets, oldest first; rendering order is the caller's call
    pub fn history(&self) -> &[BetRecord] {
        self.flow.history()
    }
}
