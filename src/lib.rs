//! A blackjack engine with a Hi-Lo counting shoe and a persistent bankroll.
//!
//! The crate provides a [`Game`] type that runs single-player rounds:
//! betting, the deal, hit/stand/double/split decisions, dealer play, and
//! payout. A [`Shoe`] tracks the running and true count as cards are drawn.
//! With the `std` feature, a [`Session`] saves the player's bankroll between
//! runs.
//!
//! # Example
//!
//! ```
//! use bjcount::{Game, Money, Player, TableOptions};
//!
//! let player = Player::new("Ada", Money::from_units(1000));
//! let mut game = Game::new(TableOptions::default(), player, 42).unwrap();
//! game.bet(Money::from_units(10)).unwrap();
//! game.deal().unwrap();
//! assert_eq!(game.player().balance(), Money::from_units(990));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod error;
pub mod game;
pub mod hand;
pub mod ledger;
pub mod money;
pub mod options;
#[cfg(feature = "std")]
pub mod persist;
pub mod result;
#[cfg(feature = "std")]
pub mod session;
pub mod shoe;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
#[cfg(feature = "std")]
pub use error::PersistError;
pub use error::{
    ActionError, BetError, ConfigError, DealError, MoneyParseError, RoundError, ShowdownError,
    StackError,
};
pub use game::{Action, Actions, Decider, Game, GameState, RoundFlow, settle_hand};
pub use hand::{Hand, HandId, HandStatus};
pub use ledger::{Bets, Player};
pub use money::Money;
pub use options::{RoundingMode, TableOptions};
#[cfg(feature = "std")]
pub use persist::{PlayerRecord, SaveStore};
pub use result::{HandOutcome, HandResult, RoundResult};
#[cfg(feature = "std")]
pub use session::{Checkpoint, Session};
pub use shoe::{CountAdvice, Shoe, ShoeStats};
