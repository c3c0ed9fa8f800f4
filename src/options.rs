//! Table configuration options.

use crate::error::ConfigError;
use crate::money::Money;
use crate::shoe::is_valid_threshold;

/// Rounding mode for payouts that fall between cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjcount::TableOptions;
///
/// let options = TableOptions::default()
///     .with_decks(8)
///     .with_reshuffle_threshold(0.2)
///     .with_blackjack_pays(1.2);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Fraction of the shoe left undrawn at which the next draw reshuffles.
    pub reshuffle_threshold: f64,
    /// Blackjack profit ratio (1.5 pays 3:2).
    pub blackjack_pays: f64,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Balance given to a player without a saved record.
    pub starting_balance: Money,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            decks: 6,
            reshuffle_threshold: 0.25,
            blackjack_pays: 1.5,
            rounding_blackjack: RoundingMode::Down,
            starting_balance: Money::from_units(1000),
        }
    }
}

impl TableOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcount::TableOptions;
    ///
    /// let options = TableOptions::default().with_decks(2);
    /// assert_eq!(options.decks, 2);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the reshuffle threshold.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcount::TableOptions;
    ///
    /// let options = TableOptions::default().with_reshuffle_threshold(0.5);
    /// assert_eq!(options.reshuffle_threshold, 0.5);
    /// ```
    #[must_use]
    pub const fn with_reshuffle_threshold(mut self, threshold: f64) -> Self {
        self.reshuffle_threshold = threshold;
        self
    }

    /// Sets the blackjack payout ratio.
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the balance of a new player.
    #[must_use]
    pub const fn with_starting_balance(mut self, balance: Money) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Checks the options for values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no decks, the reshuffle threshold is not
    /// in `(0, 1)`, or the blackjack ratio is negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decks == 0 {
            return Err(ConfigError::NoDecks);
        }
        if !is_valid_threshold(self.reshuffle_threshold) {
            return Err(ConfigError::InvalidReshuffleThreshold);
        }
        if !self.blackjack_pays.is_finite() || self.blackjack_pays < 0.0 {
            return Err(ConfigError::InvalidBlackjackPays);
        }
        Ok(())
    }
}
