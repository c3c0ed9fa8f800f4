use alloc::vec::Vec;

use crate::card::Card;
use crate::error::ShowdownError;
use crate::hand::Hand;
use crate::money::Money;
use crate::options::TableOptions;
use crate::result::{HandOutcome, HandResult, RoundResult};

use super::{Game, GameState};

/// The dealer draws below this value and stands at or above it.
pub const DEALER_STANDS_ON: u8 = 17;

/// Resolves one player hand against the final dealer hand.
///
/// Returns the outcome and the payout, which includes the returned stake:
/// twice the bet for a win, the bet plus the blackjack ratio for a natural,
/// the bet for a push, and nothing for a loss.
#[must_use]
pub fn settle_hand(
    hand: &Hand,
    dealer: &Hand,
    bet: Money,
    options: &TableOptions,
) -> (HandOutcome, Money) {
    if hand.is_busted() {
        return (HandOutcome::Lose, Money::ZERO);
    }
    if dealer.is_busted() {
        return (HandOutcome::Win, bet * 2);
    }

    match (hand.is_blackjack(), dealer.is_blackjack()) {
        (true, false) => {
            let bonus = bet.scale(options.blackjack_pays, options.rounding_blackjack);
            return (HandOutcome::Blackjack, bet + bonus);
        }
        (false, true) => return (HandOutcome::Lose, Money::ZERO),
        _ => {}
    }

    let player_value = hand.best_value();
    let dealer_value = dealer.best_value();
    if player_value > dealer_value {
        (HandOutcome::Win, bet * 2)
    } else if player_value < dealer_value {
        (HandOutcome::Lose, Money::ZERO)
    } else {
        (HandOutcome::Push, bet)
    }
}

impl Game {
    /// Dealer plays their hand according to the house rule.
    ///
    /// The dealer reveals their hole card and draws while below 17. When every
    /// player hand has busted the dealer does not play at all.
    ///
    /// Returns the cards drawn by the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in dealer turn state or the shoe is
    /// empty while the dealer must draw.
    pub fn dealer_play(&mut self) -> Result<Vec<Card>, ShowdownError> {
        if self.state != GameState::DealerActing {
            return Err(ShowdownError::InvalidState);
        }

        let mut drawn_cards = Vec::new();

        if self.hands.iter().all(Hand::is_busted) {
            self.state = GameState::Settling;
            return Ok(drawn_cards);
        }

        self.dealer.reveal();
        log::info!("dealer reveals {}", self.dealer.best_value());

        while self.dealer.best_value() < DEALER_STANDS_ON {
            let card = self.draw().ok_or(ShowdownError::NoCards)?;
            self.dealer.add_card(card);
            drawn_cards.push(card);
            log::debug!("dealer draws {card}, value {}", self.dealer.best_value());
        }
        self.dealer.stand();

        self.state = GameState::Settling;
        Ok(drawn_cards)
    }

    /// Performs the showdown and pays out every hand.
    ///
    /// Each payout is credited as it is computed. The round counts once
    /// toward the player's hands played, and once toward hands won if any
    /// hand won.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in settling state.
    pub fn showdown(&mut self) -> Result<RoundResult, ShowdownError> {
        if self.state != GameState::Settling {
            return Err(ShowdownError::InvalidState);
        }

        let dealer_value = self.dealer.best_value();
        let mut hand_results = Vec::with_capacity(self.hands.len());
        let mut total_payout = Money::ZERO;
        let mut total_bet = Money::ZERO;
        let mut winnings = Money::ZERO;

        for hand in &self.hands {
            let bet = self.bets.get(hand.id()).unwrap_or_default();
            let (outcome, payout) = settle_hand(hand, &self.dealer, bet, &self.options);

            self.player.credit(payout);
            total_payout += payout;
            total_bet += bet;
            if outcome.is_win() {
                winnings += payout - bet;
            }

            hand_results.push(HandResult {
                hand_id: hand.id(),
                outcome,
                bet,
                payout,
                player_value: hand.best_value(),
                dealer_value,
            });
        }

        let hands_won = hand_results
            .iter()
            .filter(|result| result.outcome.is_win())
            .count();
        self.player.record_round(hands_won > 0, winnings);

        let result = RoundResult {
            hands: hand_results,
            total_payout,
            total_bet,
            net: total_payout - total_bet,
            hands_won,
            dealer_value,
            dealer_bust: self.dealer.is_busted(),
            dealer_blackjack: self.dealer.is_blackjack(),
        };
        log::info!(
            "round settled: payout {}, net {}, balance {}",
            result.total_payout,
            result.net,
            self.player.balance()
        );

        self.state = GameState::Done;
        Ok(result)
    }
}
