//! Game engine and state management.

use alloc::vec::Vec;

use crate::card::Card;
use crate::error::ConfigError;
use crate::hand::{Hand, HandId};
use crate::ledger::{Bets, Player};
use crate::money::Money;
use crate::options::TableOptions;
use crate::shoe::Shoe;

mod actions;
mod bet;
mod dealer;
mod round;
pub mod state;

pub use actions::{Action, Actions};
pub use dealer::settle_hand;
pub use round::{Decider, RoundFlow};
pub use state::GameState;

/// A blackjack table for one player: the engine context for every round.
///
/// The game owns the options, the shoe, the player's ledger, and the state of
/// the round in flight. Rounds go through [`GameState`] in order; each step
/// method checks the state and the legality of the move before it changes
/// anything.
#[derive(Debug, Clone)]
pub struct Game {
    options: TableOptions,
    shoe: Shoe,
    player: Player,
    state: GameState,
    /// Player hands, left to right.
    hands: Vec<Hand>,
    dealer: Hand,
    bets: Bets,
    next_hand_id: u32,
}

impl Game {
    /// Creates a new game for `player` with the given shuffle seed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcount::{Game, GameState, Money, Player, TableOptions};
    ///
    /// let player = Player::new("Ada", Money::from_units(500));
    /// let game = Game::new(TableOptions::default(), player, 42).unwrap();
    /// assert_eq!(game.state(), GameState::Betting);
    /// assert_eq!(game.shoe().total(), 6 * 52);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the options do not validate.
    pub fn new(options: TableOptions, player: Player, seed: u64) -> Result<Self, ConfigError> {
        options.validate()?;
        let shoe = Shoe::new(options.decks, options.reshuffle_threshold, seed)?;

        Ok(Self {
            options,
            shoe,
            player,
            state: GameState::Betting,
            hands: Vec::new(),
            dealer: Hand::new(HandId(0)),
            bets: Bets::new(),
            next_hand_id: 1,
        })
    }

    fn next_id(&mut self) -> HandId {
        let id = HandId(self.next_hand_id);
        self.next_hand_id += 1;
        id
    }

    /// Draws a card from the shoe.
    fn draw(&mut self) -> Option<Card> {
        self.shoe.draw()
    }

    /// Returns the table options.
    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Returns the shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Returns the shoe mutably, for stacking or reshuffling between rounds.
    pub const fn shoe_mut(&mut self) -> &mut Shoe {
        &mut self.shoe
    }

    /// Returns the player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Consumes the game and returns the player.
    #[must_use]
    pub fn into_player(self) -> Player {
        self.player
    }

    /// Returns the current game state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Returns the player's hands.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    /// Returns the bets of the round in flight.
    #[must_use]
    pub const fn bets(&self) -> &Bets {
        &self.bets
    }

    /// Returns the stake on a hand.
    #[must_use]
    pub fn bet_for(&self, hand: HandId) -> Option<Money> {
        self.bets.get(hand)
    }

    /// Returns the index of the hand waiting for an action.
    #[must_use]
    pub const fn current_hand_index(&self) -> Option<usize> {
        match self.state {
            GameState::PlayerActing { hand_index } => Some(hand_index),
            _ => None,
        }
    }

    /// Returns the hand waiting for an action.
    #[must_use]
    pub fn current_hand(&self) -> Option<&Hand> {
        self.current_hand_index()
            .and_then(|index| self.hands.get(index))
    }

    /// Clears all hands and bets and returns to the `Betting` state.
    ///
    /// Stakes of an unfinished round are forfeited.
    pub fn clear_round(&mut self) {
        if !matches!(self.state, GameState::Betting | GameState::Done) {
            log::info!("round abandoned, {} forfeited", self.bets.total());
        }
        self.bets.clear();
        self.hands.clear();
        self.dealer = Hand::new(HandId(0));
        self.next_hand_id = 1;
        self.state = GameState::Betting;
    }
}
