use super::bet::PendingBet;

/// Cross-turn state of one betting conversation.
///
/// The single `Option` field keeps the "awaiting confirmation iff a bet is
/// pending" invariant true by construction; there is no separate flag to
/// drift out of sync.
#[derive(Debug, Default)]
pub struct ConversationState {
    pending: Option<PendingBet>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn awaiting_confirmation(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_bet(&self) -> Option<&PendingBet> {
        self.pending.as_ref()
    }

    /// Park a proposed bet until the user confirms or cancels.
    /// Refuses to overwrite an existing proposal.
    pub fn propose(&mut self, bet: PendingBet) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(bet);
        true
    }

    /// Clear the pending slot, returning the bet that was parked there.
    pub fn take_pending(&mut self) -> Option<PendingBet> {
        self.pending.take()
    }
}
