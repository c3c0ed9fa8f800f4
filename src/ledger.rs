//! Player bankroll and per-hand bets.

use alloc::string::String;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::error::BetError;
use crate::hand::HandId;
use crate::money::Money;

/// The player's bankroll and lifetime statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    balance: Money,
    total_winnings: Money,
    hands_played: u32,
    hands_won: u32,
}

impl Player {
    /// Creates a player with a fresh record.
    pub fn new(name: impl Into<String>, balance: Money) -> Self {
        Self {
            name: name.into(),
            balance,
            total_winnings: Money::ZERO,
            hands_played: 0,
            hands_won: 0,
        }
    }

    /// Restores lifetime statistics, typically from a saved record.
    #[must_use]
    pub const fn with_stats(
        mut self,
        total_winnings: Money,
        hands_played: u32,
        hands_won: u32,
    ) -> Self {
        self.total_winnings = total_winnings;
        self.hands_played = hands_played;
        self.hands_won = hands_won;
        self
    }

    /// Returns the player's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current balance.
    #[must_use]
    pub const fn balance(&self) -> Money {
        self.balance
    }

    /// Returns the profit of every winning hand played so far.
    #[must_use]
    pub const fn total_winnings(&self) -> Money {
        self.total_winnings
    }

    /// Returns the number of rounds played.
    #[must_use]
    pub const fn hands_played(&self) -> u32 {
        self.hands_played
    }

    /// Returns the number of rounds with at least one winning hand.
    #[must_use]
    pub const fn hands_won(&self) -> u32 {
        self.hands_won
    }

    /// Returns the share of rounds won, in percent.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.hands_played == 0 {
            return 0.0;
        }
        f64::from(self.hands_won) / f64::from(self.hands_played) * 100.0
    }

    /// Returns whether the balance covers `amount`.
    #[must_use]
    pub fn can_cover(&self, amount: Money) -> bool {
        self.balance >= amount
    }

    /// Takes `amount` from the balance as a stake.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive or exceeds the balance.
    pub fn place_bet(&mut self, amount: Money) -> Result<(), BetError> {
        if !amount.is_positive() {
            return Err(BetError::ZeroBet);
        }
        if !self.can_cover(amount) {
            return Err(BetError::InsufficientFunds);
        }

        self.balance -= amount;
        log::debug!("bet {amount} placed, balance {}", self.balance);
        Ok(())
    }

    /// Adds a payout to the balance.
    pub fn credit(&mut self, amount: Money) {
        self.balance += amount;
    }

    /// Records a finished round.
    pub fn record_round(&mut self, won: bool, winnings: Money) {
        self.hands_played += 1;
        if won {
            self.hands_won += 1;
        }
        self.total_winnings += winnings;
    }
}

/// Stakes for the hands in play, keyed by hand id.
#[derive(Debug, Clone, Default)]
pub struct Bets {
    stakes: HashMap<HandId, Money>,
}

impl Bets {
    /// Creates an empty bet book.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stakes: HashMap::new(),
        }
    }

    /// Records the stake for a hand, replacing any previous stake.
    pub fn stake(&mut self, hand: HandId, amount: Money) {
        self.stakes.insert(hand, amount);
    }

    /// Returns the stake for a hand.
    #[must_use]
    pub fn get(&self, hand: HandId) -> Option<Money> {
        self.stakes.get(&hand).copied()
    }

    /// Removes and returns the stake for a hand.
    pub fn remove(&mut self, hand: HandId) -> Option<Money> {
        self.stakes.remove(&hand)
    }

    /// Doubles the stake for a hand and returns the new amount.
    pub fn double(&mut self, hand: HandId) -> Option<Money> {
        let stake = self.stakes.get_mut(&hand)?;
        *stake = *stake * 2;
        Some(*stake)
    }

    /// Returns the sum of all stakes.
    #[must_use]
    pub fn total(&self) -> Money {
        self.stakes.values().copied().sum()
    }

    /// Returns the number of staked hands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stakes.len()
    }

    /// Returns whether no hand is staked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stakes.is_empty()
    }

    /// Removes every stake.
    pub fn clear(&mut self) {
        self.stakes.clear();
    }
}
