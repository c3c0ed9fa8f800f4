use crate::card::{Card, Rank};
use crate::error::ActionError;
use crate::hand::{Hand, HandStatus};

use super::{Game, GameState};

/// A player decision on the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Draw one card.
    Hit,
    /// Keep the hand as it is.
    Stand,
    /// Double the stake, draw exactly one card, and stand.
    Double,
    /// Split a pair into two hands.
    Split,
}

/// Which actions are legal on the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Actions {
    /// Hit is allowed.
    pub hit: bool,
    /// Stand is allowed.
    pub stand: bool,
    /// Double down is allowed.
    pub double: bool,
    /// Split is allowed.
    pub split: bool,
}

impl Actions {
    /// Returns whether `action` is in the set.
    #[must_use]
    pub const fn allows(&self, action: Action) -> bool {
        match action {
            Action::Hit => self.hit,
            Action::Stand => self.stand,
            Action::Double => self.double,
            Action::Split => self.split,
        }
    }
}

fn is_split_ace(hand: &Hand) -> bool {
    hand.is_from_split()
        && hand.len() == 2
        && hand.cards().first().is_some_and(|card| card.rank == Rank::Ace)
}

impl Game {
    fn acting_index(&self) -> Result<usize, ActionError> {
        let GameState::PlayerActing { hand_index } = self.state else {
            return Err(ActionError::InvalidState);
        };

        let hand = self
            .hands
            .get(hand_index)
            .ok_or(ActionError::HandNotFound)?;
        if hand.status() != HandStatus::Active {
            return Err(ActionError::HandNotActive);
        }

        Ok(hand_index)
    }

    /// Moves the turn to the first hand at or after `index` that needs a
    /// decision, standing naturals and split aces on the way. Hands to the
    /// dealer when none is left.
    pub(super) fn advance_from(&mut self, mut index: usize) {
        let single_hand = self.hands.len() == 1;

        while let Some(hand) = self.hands.get_mut(index) {
            if hand.status() == HandStatus::Active {
                if single_hand && hand.is_blackjack() {
                    log::info!("blackjack on {}", hand.id());
                    hand.stand();
                } else if is_split_ace(hand) {
                    // Split aces take exactly one card each
                    hand.stand();
                } else {
                    self.state = GameState::PlayerActing { hand_index: index };
                    return;
                }
            }
            index += 1;
        }

        self.state = GameState::DealerActing;
    }

    /// Returns the actions legal on the current hand.
    ///
    /// Outside the `PlayerActing` state every flag is false.
    #[must_use]
    pub fn available_actions(&self) -> Actions {
        let Some(hand) = self
            .acting_index()
            .ok()
            .and_then(|index| self.hands.get(index))
        else {
            return Actions::default();
        };

        let covers_bet = self
            .bets
            .get(hand.id())
            .is_some_and(|bet| self.player.can_cover(bet));

        Actions {
            hit: true,
            stand: true,
            double: hand.len() == 2 && covers_bet,
            split: hand.can_split(&self.bets, self.player.balance()),
        }
    }

    /// Applies `action` to the current hand.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying action.
    pub fn apply(&mut self, action: Action) -> Result<(), ActionError> {
        match action {
            Action::Hit => self.hit().map(|_| ()),
            Action::Stand => self.stand(),
            Action::Double => self.double_down().map(|_| ()),
            Action::Split => self.split(),
        }
    }

    /// Player action: Hit (draw a card).
    ///
    /// A bust ends the hand; a hand at 21 keeps the turn until it stands.
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is waiting for an action or the shoe is
    /// empty.
    pub fn hit(&mut self) -> Result<Card, ActionError> {
        let index = self.acting_index()?;
        let card = self.draw().ok_or(ActionError::NoCards)?;

        let hand = self
            .hands
            .get_mut(index)
            .ok_or(ActionError::HandNotFound)?;
        hand.add_card(card);
        log::debug!("hit {card}, hand value {}", hand.best_value());

        if hand.is_busted() {
            log::info!("{} busted with {}", hand.id(), hand.best_value());
            self.advance_from(index + 1);
        }

        Ok(card)
    }

    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is waiting for an action.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        let index = self.acting_index()?;

        let hand = self
            .hands
            .get_mut(index)
            .ok_or(ActionError::HandNotFound)?;
        hand.stand();
        log::debug!("stand at {}", hand.best_value());

        self.advance_from(index + 1);
        Ok(())
    }

    /// Player action: Double down (double bet, receive one card, then stand).
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is waiting for an action, the hand does
    /// not hold exactly two cards, the player lacks funds, or the shoe is
    /// empty.
    pub fn double_down(&mut self) -> Result<Card, ActionError> {
        let index = self.acting_index()?;
        let hand = self.hands.get(index).ok_or(ActionError::HandNotFound)?;

        if hand.len() != 2 {
            return Err(ActionError::CannotDouble);
        }

        let id = hand.id();
        let bet = self.bets.get(id).ok_or(ActionError::HandNotFound)?;
        if !self.player.can_cover(bet) {
            return Err(ActionError::InsufficientFunds);
        }

        let card = self.draw().ok_or(ActionError::NoCards)?;
        self.player
            .place_bet(bet)
            .map_err(|_| ActionError::InsufficientFunds)?;
        let doubled = self.bets.double(id).ok_or(ActionError::HandNotFound)?;

        let hand = self
            .hands
            .get_mut(index)
            .ok_or(ActionError::HandNotFound)?;
        hand.add_card(card);
        hand.stand();
        log::info!("double down to {doubled}, drew {card}");

        self.advance_from(index + 1);
        Ok(card)
    }

    /// Player action: Split (split a pair into two hands).
    ///
    /// Each new hand keeps one card of the pair, receives one fresh card, and
    /// carries the original stake. Play continues with the first new hand.
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is waiting for an action, the hand is not
    /// a pair, the player lacks funds, or the shoe is empty.
    pub fn split(&mut self) -> Result<(), ActionError> {
        let index = self.acting_index()?;
        let hand = self.hands.get(index).ok_or(ActionError::HandNotFound)?;

        if !hand.is_pair() {
            return Err(ActionError::CannotSplit);
        }

        let id = hand.id();
        let bet = self.bets.get(id).ok_or(ActionError::HandNotFound)?;
        if !hand.can_split(&self.bets, self.player.balance()) {
            return Err(ActionError::InsufficientFunds);
        }
        let (left_card, right_card) = (hand.cards()[0], hand.cards()[1]);
        if !self.shoe.can_draw(2) {
            return Err(ActionError::NoCards);
        }

        let left_draw = self.draw().ok_or(ActionError::NoCards)?;
        let right_draw = self.draw().ok_or(ActionError::NoCards)?;
        self.player
            .place_bet(bet)
            .map_err(|_| ActionError::InsufficientFunds)?;

        let mut left = Hand::from_split(self.next_id(), left_card);
        left.add_card(left_draw);
        let mut right = Hand::from_split(self.next_id(), right_card);
        right.add_card(right_draw);

        self.bets.remove(id);
        self.bets.stake(left.id(), bet);
        self.bets.stake(right.id(), bet);
        log::info!(
            "split {id} into {} and {} with {bet} each",
            left.id(),
            right.id()
        );
        self.hands[index] = left;
        self.hands.insert(index + 1, right);

        self.advance_from(index);
        Ok(())
    }
}
