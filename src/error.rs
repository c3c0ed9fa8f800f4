//! Error types for game operations.

use thiserror::Error;

/// Errors in the table configuration. These are fatal at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The shoe was configured with zero decks.
    #[error("the shoe needs at least one deck")]
    NoDecks,
    /// The reshuffle threshold is outside `(0, 1)`.
    #[error("reshuffle threshold must be in (0, 1)")]
    InvalidReshuffleThreshold,
    /// The blackjack payout ratio is negative or not finite.
    #[error("blackjack payout ratio must be a non-negative number")]
    InvalidBlackjackPays,
}

/// Errors that can occur during betting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Insufficient funds.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// Invalid game state for betting.
    #[error("invalid game state for betting")]
    InvalidState,
    /// Bet amount is zero or negative.
    #[error("bet must be greater than zero")]
    ZeroBet,
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid game state for dealing.
    #[error("invalid game state for dealing")]
    InvalidState,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    NoCards,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game state for this action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// Hand not found.
    #[error("hand not found")]
    HandNotFound,
    /// Hand is not active.
    #[error("hand is not active")]
    HandNotActive,
    /// Cannot double down on this hand.
    #[error("you can only double down on your first two cards")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("you can only split two cards of the same rank")]
    CannotSplit,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    NoCards,
}

/// Errors that can occur during dealer play and showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShowdownError {
    /// Invalid game state for showdown.
    #[error("invalid game state for showdown")]
    InvalidState,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    NoCards,
}

/// Errors that can end a driven round early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The initial deal failed.
    #[error(transparent)]
    Deal(#[from] DealError),
    /// Dealer play or payout failed.
    #[error(transparent)]
    Showdown(#[from] ShowdownError),
}

/// Errors that can occur while stacking the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    /// The requested card is not among the undrawn cards.
    #[error("card is not in the undrawn pile")]
    CardUnavailable,
}

/// Errors that can occur while parsing a money amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    /// The input is empty.
    #[error("amount is empty")]
    Empty,
    /// The input contains something other than digits and one decimal point.
    #[error("amount must be a decimal number")]
    InvalidDigit,
    /// More than two fractional digits.
    #[error("amount has more than two decimal places")]
    TooPrecise,
    /// The amount does not fit.
    #[error("amount is too large")]
    Overflow,
}

/// Errors that can occur while loading or saving a player record.
#[cfg(feature = "std")]
#[derive(Debug, Error)]
pub enum PersistError {
    /// Reading or writing the save file failed.
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The save file is not a valid record.
    #[error("save file is malformed: {0}")]
    Json(#[from] serde_json::Error),
    /// The system clock could not be formatted as a timestamp.
    #[error("could not format save timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}
