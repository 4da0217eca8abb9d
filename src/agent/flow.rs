use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::BettingConfig;
use crate::domain::{BetRecord, ConversationState, Match, Outcome, PendingBet};
use crate::error::{AgentError, Result};
use crate::odds::OddsSource;
use crate::wallet::WalletGateway;

use super::responses::{
    format_confirm_prompt, format_history, format_match_list, format_matches_for_betting,
    ResponseCategory, ResponsePool,
};

/// Orchestrates match lookup, bet validation and the confirm/cancel
/// handshake for one conversation.
///
/// Owns the only two pieces of cross-turn state: the pending-bet slot and
/// the append-only bet history. Nothing else writes them.
pub struct BettingFlow {
    config: BettingConfig,
    odds: Arc<dyn OddsSource>,
    wallet: Arc<dyn WalletGateway>,
    state: ConversationState,
    history: Vec<BetRecord>,
    responses: ResponsePool,
}

impl BettingFlow {
    pub fn new(
        config: BettingConfig,
        odds: Arc<dyn OddsSource>,
        wallet: Arc<dyn WalletGateway>,
        responses: ResponsePool,
    ) -> Self {
        Self {
            config,
            odds,
            wallet,
            state: ConversationState::new(),
            history: Vec::new(),
            responses,
        }
    }

    pub fn canned(&mut self, category: ResponseCategory) -> String {
        self.responses.pick(category)
    }

    pub fn awaiting_confirmation(&self) -> bool {
        self.state.awaiting_confirmation()
    }

    pub fn history(&self) -> &[BetRecord] {
        &self.history
    }

    /// Entry point for a message classified as a betting request
    pub async fn handle_betting(
        &mut self,
        teams: &[String],
        outcome: Option<Outcome>,
        stake: Option<Decimal>,
    ) -> Result<String> {
        if !self.wallet.is_connected() {
            warn!("betting refused: wallet not connected");
            return Ok(self.canned(ResponseCategory::NeedWallet));
        }

        // A proposal is already on the table; repeat the handshake prompt
        // instead of letting a new request overwrite it.
        if self.state.awaiting_confirmation() {
            return Ok(self.canned(ResponseCategory::ConfirmBet));
        }

        // Collaborator faults inside the betting path render as the
        // bet-error canned reply; the generic apology is reserved for
        // failures outside it.
        let candidates = match self.resolve_candidates(teams).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "match lookup failed during betting");
                return Ok(self.canned(ResponseCategory::BetError));
            }
        };
        if candidates.is_empty() {
            return Ok(self.canned(ResponseCategory::NoMatches));
        }

        match (candidates.as_slice(), outcome, stake) {
            ([game], Some(outcome), Some(stake)) => {
                self.propose_bet(game.clone(), outcome, stake).await
            }
            _ => Ok(format_matches_for_betting(
                &candidates,
                self.config.max_listed_matches,
            )),
        }
    }

    /// Union of per-team search results, de-duplicated by match id with the
    /// first occurrence winning. No teams extracted means the full board.
    async fn resolve_candidates(&self, teams: &[String]) -> Result<Vec<Match>> {
        if teams.is_empty() {
            return self.odds.list_matches().await;
        }

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for team in teams {
            for game in self.odds.search_matches(team).await? {
                if seen.insert(game.id.clone()) {
                    candidates.push(game);
                }
            }
        }
        Ok(candidates)
    }

    /// Validate and park a fully specified bet, returning the confirmation
    /// prompt. State is untouched on any failure.
    pub async fn propose_bet(
        &mut self,
        game: Match,
        outcome: Outcome,
        stake: Decimal,
    ) -> Result<String> {
        if self.state.awaiting_confirmation() {
            return Ok(self.canned(ResponseCategory::ConfirmBet));
        }

        if let Err(violations) = self.validate_stake(stake) {
            warn!(?violations, "bet rejected by validation");
            return Ok(format!("Error: {}", violations.join(", ")));
        }

        let balance = match self.wallet.balance().await {
            Ok(balance) => balance,
            Err(e) => {
                warn!(error = %e, "balance query failed during bet proposal");
                return Ok(self.canned(ResponseCategory::BetError));
            }
        };
        if balance < stake {
            warn!(%balance, %stake, "bet rejected: insufficient balance");
            return Ok(format!(
                "Insufficient balance! You have {:.3} SOL, need {} SOL.",
                balance, stake
            ));
        }

        let bet = PendingBet::new(game, outcome, stake);
        let prompt = format_confirm_prompt(&bet);
        info!(
            game = %bet.game.title(),
            outcome = %bet.outcome,
            %stake,
            odds = %bet.odds,
            "bet proposed, awaiting confirmation"
        );
        self.state.propose(bet);
        Ok(prompt)
    }

    /// Every violated rule is reported, not just the first
    fn validate_stake(&self, stake: Decimal) -> std::result::Result<(), Vec<String>> {
        let mut violations = Vec::new();
        if stake <= Decimal::ZERO {
            violations.push("Bet amount must be greater than 0".to_string());
        }
        if stake < self.config.min_stake {
            violations.push(format!("Minimum bet amount is {} SOL", self.config.min_stake));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Settle the handshake: commit the pending bet to history or drop it
    pub async fn resolve_confirmation(&mut self, confirmed: bool) -> Result<String> {
        if !self.state.awaiting_confirmation() {
            return Ok("No pending transaction to confirm.".to_string());
        }

        if !confirmed {
            self.state.take_pending();
            info!("pending bet cancelled");
            return Ok("Bet cancelled.".to_string());
        }

        let bet = self
            .state
            .take_pending()
            .ok_or(AgentError::NoPendingBet)?;
        let record = BetRecord::from_pending(bet);
        let reply = format!(
            "{}\n\n📋 Bet ID: {}",
            self.canned(ResponseCategory::BetPlaced),
            record.id
        );
        info!(bet_id = %record.id, game = %record.game.title(), "bet placed");
        self.history.push(record);

        // Fire-and-forget; a failed refresh never fails the bet
        let _ = self.wallet.request_balance_refresh().await;

        Ok(reply)
    }

    /// Listing for an explicit matches query, optionally filtered by team
    pub async fn show_matches(&mut self, teams: &[String]) -> Result<String> {
        let mut matches = self.odds.list_matches().await?;
        if !teams.is_empty() {
            matches.retain(|m| {
                teams.iter().any(|team| {
                    m.home_team.to_lowercase().contains(team)
                        || m.away_team.to_lowercase().contains(team)
                })
            });
        }

        if matches.is_empty() {
            return Ok(self.canned(ResponseCategory::NoMatches));
        }
        Ok(format_match_list(&matches, self.config.max_listed_matches))
    }

    pub fn show_history(&self) -> String {
        format_history(&self.history, self.config.history_display)
    }

    /// Unknown intent: try the raw text as a search term before giving up
    pub async fn fallback(&mut self, raw: &str) -> Result<String> {
        let found = self.odds.search_matches(raw).await?;
        if !found.is_empty() {
            return Ok(format_match_list(&found, self.config.max_listed_matches));
        }

        Ok("I don't understand your request. You can:\n\
            • Say 'matches' to see the list\n\
            • Say 'bet [team] to win [amount]' to place a bet\n\
            • Say 'history' to see betting history\n\
            • Say 'help' for guidance"
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BettingConfig;
    use crate::odds::StaticOddsFeed;
    use crate::wallet::SimulatedWallet;
    use rust_decimal_macros::dec;

    fn flow_with(balance: Decimal, connected: bool) -> BettingFlow {
        BettingFlow::new(
            BettingConfig::default(),
            Arc::new(StaticOddsFeed::default()),
            Arc::new(SimulatedWallet::new(balance, connected)),
            ResponsePool::with_seed(1),
        )
    }

    fn teams(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_betting_requires_connected_wallet() {
        let mut flow = flow_with(dec!(1.0), false);
        let reply = flow
            .handle_betting(&teams(&["arsenal"]), Some(Outcome::Home), Some(dec!(0.1)))
            .await
            .unwrap();
        assert!(reply.to_lowercase().contains("connect your wallet"));
        assert!(!flow.awaiting_confirmation());
        assert!(flow.history().is_empty());
    }

    #[tokio::test]
    async fn test_two_teams_resolve_to_single_match_and_propose() {
        let mut flow = flow_with(dec!(1.0), true);
        let reply = flow
            .handle_betting(
                &teams(&["real madrid", "barcelona"]),
                Some(Outcome::Draw),
                Some(dec!(0.2)),
            )
            .await
            .unwrap();

        // Both searches hit match_3; the union de-duplicates to one match
        assert!(reply.contains("Confirm Bet"));
        assert!(reply.contains("Real Madrid vs Barcelona"));
        assert!(reply.contains("Odds: 3.10"));
        assert!(flow.awaiting_confirmation());
    }

    #[tokio::test]
    async fn test_pending_bet_is_never_overwritten() {
        let mut flow = flow_with(dec!(1.0), true);
        flow.handle_betting(&teams(&["juventus"]), Some(Outcome::Home), Some(dec!(0.1)))
            .await
            .unwrap();
        assert!(flow.awaiting_confirmation());

        let reply = flow
            .handle_betting(&teams(&["arsenal"]), Some(Outcome::Away), Some(dec!(0.3)))
            .await
            .unwrap();
        assert!(reply.contains("confirm"));
        assert!(flow.awaiting_confirmation());
        // Confirming settles the original Juventus bet, not the Arsenal one
        let placed = flow.resolve_confirmation(true).await.unwrap();
        assert!(placed.contains("Bet ID:"));
        assert_eq!(flow.history()[0].game.id, "match_5");
        assert_eq!(flow.history()[0].stake, dec!(0.1));
    }

    #[tokio::test]
    async fn test_underspecified_bet_lists_candidates() {
        let mut flow = flow_with(dec!(1.0), true);
        // No stake extracted: listing instead of a proposal
        let reply = flow
            .handle_betting(&teams(&["chelsea"]), Some(Outcome::Home), None)
            .await
            .unwrap();
        assert!(reply.contains("Found Match"));
        assert!(!flow.awaiting_confirmation());

        // No team at all: the full board, capped at 5
        let reply = flow.handle_betting(&[], None, None).await.unwrap();
        assert!(reply.contains("Current Matches"));
        assert!(reply.contains("5. "));
    }

    #[tokio::test]
    async fn test_unknown_team_yields_no_matches() {
        let mut flow = flow_with(dec!(1.0), true);
        let reply = flow
            .handle_betting(&teams(&["st pauli"]), Some(Outcome::Home), Some(dec!(0.1)))
            .await
            .unwrap();
        assert!(reply.to_lowercase().contains("matches"));
        assert!(!flow.awaiting_confirmation());
    }

    #[tokio::test]
    async fn test_insufficient_balance_leaves_state_unchanged() {
        let mut flow = flow_with(dec!(0.05), true);
        let reply = flow
            .handle_betting(&teams(&["bayern"]), Some(Outcome::Home), Some(dec!(0.1)))
            .await
            .unwrap();
        assert!(reply.contains("Insufficient balance"));
        // Balance renders at fixed three decimals
        assert!(reply.contains("0.050 SOL"));
        assert!(!flow.awaiting_confirmation());
    }

    #[tokio::test]
    async fn test_validation_reports_every_violation() {
        let mut flow = flow_with(dec!(1.0), true);
        let reply = flow
            .handle_betting(&teams(&["bayern"]), Some(Outcome::Home), Some(dec!(0)))
            .await
            .unwrap();
        assert!(reply.contains("greater than 0"));
        assert!(reply.contains("Minimum bet amount is 0.001"));

        let reply = flow
            .handle_betting(&teams(&["bayern"]), Some(Outcome::Home), Some(dec!(0.0005)))
            .await
            .unwrap();
        assert!(!reply.contains("greater than 0"));
        assert!(reply.contains("Minimum bet amount is 0.001"));
    }

    #[tokio::test]
    async fn test_cancel_without_pending_is_idempotent() {
        let mut flow = flow_with(dec!(1.0), true);
        let first = flow.resolve_confirmation(false).await.unwrap();
        let second = flow.resolve_confirmation(false).await.unwrap();
        assert_eq!(first, "No pending transaction to confirm.");
        assert_eq!(first, second);
        assert!(flow.history().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_drops_pending_without_record() {
        let mut flow = flow_with(dec!(1.0), true);
        flow.handle_betting(&teams(&["liverpool"]), Some(Outcome::Away), Some(dec!(0.1)))
            .await
            .unwrap();
        let reply = flow.resolve_confirmation(false).await.unwrap();
        assert_eq!(reply, "Bet cancelled.");
        assert!(!flow.awaiting_confirmation());
        assert!(flow.history().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_appends_record_and_clears_state() {
        let mut flow = flow_with(dec!(1.0), true);
        flow.handle_betting(&teams(&["arsenal"]), Some(Outcome::Away), Some(dec!(0.25)))
            .await
            .unwrap();
        let reply = flow.resolve_confirmation(true).await.unwrap();
        assert!(reply.contains("Bet ID:"));
        assert!(!flow.awaiting_confirmation());

        let record = &flow.history()[0];
        assert_eq!(record.game.id, "match_2");
        assert_eq!(record.odds, dec!(4.20));
        assert_eq!(record.potential_payout, record.stake * record.odds);
    }

    #[tokio::test]
    async fn test_history_lists_most_recent_first() {
        let mut flow = flow_with(dec!(10), true);
        for team in ["manchester", "chelsea", "juventus"] {
            flow.handle_betting(&teams(&[team]), Some(Outcome::Home), Some(dec!(0.1)))
                .await
                .unwrap();
            flow.resolve_confirmation(true).await.unwrap();
        }
        assert_eq!(flow.history().len(), 3);

        let listing = flow.show_history();
        let juve = listing.find("Juventus").unwrap();
        let manu = listing.find("Manchester United").unwrap();
        assert!(juve < manu);
    }

    #[tokio::test]
    async fn test_show_matches_filters_by_team_name_only() {
        let mut flow = flow_with(dec!(1.0), true);
        let reply = flow.show_matches(&teams(&["bayern"])).await.unwrap();
        assert!(reply.contains("Bayern Munich vs Borussia Dortmund"));
        assert!(!reply.contains("Juventus"));

        let reply = flow.show_matches(&[]).await.unwrap();
        assert!(reply.contains("Juventus"));
    }

    struct OfflineFeed;

    #[async_trait::async_trait]
    impl OddsSource for OfflineFeed {
        async fn list_matches(&self) -> Result<Vec<Match>> {
            Err(AgentError::MarketDataUnavailable("feed offline".into()))
        }

        async fn search_matches(&self, _term: &str) -> Result<Vec<Match>> {
            Err(AgentError::MarketDataUnavailable("feed offline".into()))
        }

        async fn odds_for(&self, _match_id: &str) -> Result<Option<crate::domain::OddsBoard>> {
            Err(AgentError::MarketDataUnavailable("feed offline".into()))
        }
    }

    struct FlakyWallet;

    #[async_trait::async_trait]
    impl WalletGateway for FlakyWallet {
        fn is_connected(&self) -> bool {
            true
        }

        async fn balance(&self) -> Result<Decimal> {
            Err(AgentError::Wallet("rpc timeout".into()))
        }

        async fn request_balance_refresh(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_odds_fault_renders_bet_error_reply() {
        let mut flow = BettingFlow::new(
            BettingConfig::default(),
            Arc::new(OfflineFeed),
            Arc::new(SimulatedWallet::new(dec!(1.0), true)),
            ResponsePool::with_seed(1),
        );
        let reply = flow
            .handle_betting(&teams(&["juventus"]), Some(Outcome::Home), Some(dec!(0.1)))
            .await
            .unwrap();
        assert!(ResponseCategory::BetError.pool().contains(&reply.as_str()));
        assert!(!flow.awaiting_confirmation());
        assert!(flow.history().is_empty());
    }

    #[tokio::test]
    async fn test_balance_fault_renders_bet_error_reply() {
        let mut flow = BettingFlow::new(
            BettingConfig::default(),
            Arc::new(StaticOddsFeed::default()),
            Arc::new(FlakyWallet),
            ResponsePool::with_seed(1),
        );
        let reply = flow
            .handle_betting(&teams(&["juventus"]), Some(Outcome::Home), Some(dec!(0.1)))
            .await
            .unwrap();
        assert!(ResponseCategory::BetError.pool().contains(&reply.as_str()));
        assert!(!flow.awaiting_confirmation());
    }

    #[tokio::test]
    async fn test_fallback_searches_before_apologizing() {
        let mut flow = flow_with(dec!(1.0), true);
        let reply = flow.fallback("inter").await.unwrap();
        assert!(reply.contains("Juventus vs Inter Milan"));

        let reply = flow.fallback("quantum chromodynamics").await.unwrap();
        assert!(reply.contains("I don't understand"));
    }
}
