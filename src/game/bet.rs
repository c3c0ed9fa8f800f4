use crate::error::{BetError, DealError};
use crate::hand::Hand;
use crate::money::Money;

use super::{Game, GameState};

impl Game {
    /// Places the round's bet and sets up empty player and dealer hands.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state, the bet is not
    /// positive, or the player lacks funds.
    pub fn bet(&mut self, amount: Money) -> Result<(), BetError> {
        if self.state != GameState::Betting {
            return Err(BetError::InvalidState);
        }

        self.player.place_bet(amount)?;

        let hand = Hand::new(self.next_id());
        self.bets.stake(hand.id(), amount);
        self.hands = alloc::vec![hand];
        self.dealer = Hand::new(self.next_id());
        self.state = GameState::Dealing;

        Ok(())
    }

    /// Deals two cards each to the player and the dealer.
    ///
    /// Cards alternate player, dealer, player, dealer; the dealer's second
    /// card is dealt face down.
    ///
    /// # Errors
    ///
    /// Returns an error if no bet has been placed or the shoe is empty.
    pub fn deal(&mut self) -> Result<(), DealError> {
        if self.state != GameState::Dealing || self.hands.is_empty() {
            return Err(DealError::InvalidState);
        }

        let first = self.draw().ok_or(DealError::NoCards)?;
        let up = self.draw().ok_or(DealError::NoCards)?;
        let second = self.draw().ok_or(DealError::NoCards)?;
        let hole = self.draw().ok_or(DealError::NoCards)?;

        if let Some(hand) = self.hands.first_mut() {
            hand.add_card(first);
            hand.add_card(second);
        }
        self.dealer.add_card(up);
        self.dealer.add_card(hole.face_down());

        log::debug!("dealt {first} {second} against {up}");

        // Skip a natural straight to the dealer
        self.advance_from(0);

        Ok(())
    }
}
