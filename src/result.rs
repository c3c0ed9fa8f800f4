//! Round result types for showdown.

use alloc::vec::Vec;

use crate::hand::HandId;
use crate::money::Money;

/// Result of a single hand after showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has higher value).
    Win,
    /// Player loses (player busts or dealer has higher value).
    Lose,
    /// Push (tie).
    Push,
    /// Player has a natural blackjack the dealer does not match.
    Blackjack,
}

impl HandOutcome {
    /// Returns whether the player won the hand.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win | Self::Blackjack)
    }
}

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandResult {
    /// The hand id.
    pub hand_id: HandId,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The bet amount for this hand.
    pub bet: Money,
    /// The payout amount (credited to the player's balance).
    pub payout: Money,
    /// The player's hand value.
    pub player_value: u8,
    /// The dealer's hand value.
    pub dealer_value: u8,
}

/// Result of the entire round after showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    /// Results for each hand, left to right (several if split).
    pub hands: Vec<HandResult>,
    /// Total payout for all hands.
    pub total_payout: Money,
    /// Total staked across all hands.
    pub total_bet: Money,
    /// Net result (positive = profit, negative = loss).
    pub net: Money,
    /// Number of hands won.
    pub hands_won: usize,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
}

impl RoundResult {
    /// Returns whether at least one hand won.
    #[must_use]
    pub const fn any_won(&self) -> bool {
        self.hands_won > 0
    }
}
