//! The multi-deck shoe and its Hi-Lo running count.

use alloc::vec::Vec;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::{ConfigError, StackError};

/// True count at or above which the count favors the player.
pub const FAVORABLE_TRUE_COUNT: f64 = 2.0;

/// True count at or below which the count favors the dealer.
pub const UNFAVORABLE_TRUE_COUNT: f64 = -2.0;

/// Returns whether `threshold` is a usable reshuffle threshold.
///
/// Zero is excluded: a shoe that never reshuffles runs dry mid-round.
pub(crate) fn is_valid_threshold(threshold: f64) -> bool {
    threshold > 0.0 && threshold < 1.0
}

/// Betting advice derived from the true count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountAdvice {
    /// Player advantage, bet high.
    Favorable,
    /// No clear edge, bet normally.
    Neutral,
    /// Dealer advantage, bet low.
    Unfavorable,
}

impl CountAdvice {
    /// Classifies a true count.
    #[must_use]
    pub fn from_true_count(true_count: f64) -> Self {
        if true_count >= FAVORABLE_TRUE_COUNT {
            Self::Favorable
        } else if true_count <= UNFAVORABLE_TRUE_COUNT {
            Self::Unfavorable
        } else {
            Self::Neutral
        }
    }
}

/// A snapshot of how far the shoe has been played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShoeStats {
    /// Cards left to draw.
    pub remaining: usize,
    /// Cards drawn since the last reshuffle.
    pub used: usize,
    /// Cards in the shoe in total.
    pub total: usize,
    /// Share of the shoe left to draw, in percent.
    pub percent_remaining: f64,
}

/// A shoe of one or more 52-card decks.
///
/// Every drawn card moves to the used pile and adds its Hi-Lo value to the
/// running count. Once fewer than `reshuffle_threshold` of the cards remain
/// undrawn, the next draw shuffles the used pile back in first. The running
/// count survives reshuffles.
#[derive(Debug, Clone)]
pub struct Shoe {
    undrawn: Vec<Card>,
    used: Vec<Card>,
    running_count: i32,
    decks: u8,
    reshuffle_threshold: f64,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Builds and shuffles a shoe of `decks` decks.
    ///
    /// # Errors
    ///
    /// Returns an error if `decks` is zero or the threshold is outside `(0, 1)`.
    pub fn new(decks: u8, reshuffle_threshold: f64, seed: u64) -> Result<Self, ConfigError> {
        if decks == 0 {
            return Err(ConfigError::NoDecks);
        }
        if !is_valid_threshold(reshuffle_threshold) {
            return Err(ConfigError::InvalidReshuffleThreshold);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut undrawn = Vec::with_capacity(decks as usize * DECK_SIZE);
        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    undrawn.push(Card::new(suit, rank));
                }
            }
        }
        undrawn.shuffle(&mut rng);
        log::info!("shoe ready with {} cards", undrawn.len());

        Ok(Self {
            undrawn,
            used: Vec::new(),
            running_count: 0,
            decks,
            reshuffle_threshold,
            rng,
        })
    }

    /// Draws the top card, reshuffling first if the shoe has run low.
    ///
    /// Returns `None` only for a shoe without cards, which [`Shoe::new`]
    /// never builds.
    pub fn draw(&mut self) -> Option<Card> {
        if self.needs_reshuffle() {
            log::warn!("shoe running low, reshuffling");
            self.reshuffle();
        }

        let card = self.undrawn.pop()?;
        self.used.push(card);
        self.running_count += card.rank.hi_lo();
        log::debug!(
            "drew {card}, running count {}, {} remaining",
            self.running_count,
            self.undrawn.len()
        );
        Some(card)
    }

    /// Returns whether the undrawn pile is empty or has fallen below the
    /// threshold.
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        if self.undrawn.is_empty() {
            return true;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let limit = self.total() as f64 * self.reshuffle_threshold;
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let remaining = self.undrawn.len() as f64;
        remaining < limit
    }

    /// Shuffles the used pile back into the undrawn pile.
    ///
    /// The running count is left as it is.
    pub fn reshuffle(&mut self) {
        self.undrawn.append(&mut self.used);
        self.undrawn.shuffle(&mut self.rng);
        log::info!("reshuffled shoe: {} cards available", self.undrawn.len());
    }

    /// Moves `draws` to the top of the shoe so they come out in that order.
    ///
    /// Cards are matched by rank and suit, so the shoe keeps its composition.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the shoe untouched, if a requested card is
    /// not in the undrawn pile.
    pub fn stack(&mut self, draws: &[Card]) -> Result<(), StackError> {
        let mut rest = self.undrawn.clone();
        let mut top = Vec::with_capacity(draws.len());

        for wanted in draws {
            let position = rest
                .iter()
                .position(|card| card.same_face(wanted))
                .ok_or(StackError::CardUnavailable)?;
            top.push(rest.remove(position));
        }

        rest.extend(top.into_iter().rev());
        self.undrawn = rest;
        Ok(())
    }

    /// Returns whether `count` cards can be drawn in a row.
    ///
    /// Draws reshuffle the used pile back in when the undrawn pile empties,
    /// so only the size of the shoe limits them.
    #[must_use]
    pub fn can_draw(&self, count: usize) -> bool {
        self.total() >= count
    }

    /// Returns the Hi-Lo running count.
    #[must_use]
    pub const fn running_count(&self) -> i32 {
        self.running_count
    }

    /// Returns the running count per remaining deck, or 0 for an empty shoe.
    #[must_use]
    pub fn true_count(&self) -> f64 {
        if self.undrawn.is_empty() {
            return 0.0;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let decks_remaining = self.undrawn.len() as f64 / DECK_SIZE as f64;
        f64::from(self.running_count) / decks_remaining
    }

    /// Returns the betting advice for the current true count.
    #[must_use]
    pub fn advice(&self) -> CountAdvice {
        CountAdvice::from_true_count(self.true_count())
    }

    /// Returns the number of decks the shoe was built from.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }

    /// Returns the number of cards left to draw.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.undrawn.len()
    }

    /// Returns the number of cards drawn since the last reshuffle.
    #[must_use]
    pub fn used(&self) -> usize {
        self.used.len()
    }

    /// Returns the number of cards in the shoe.
    #[must_use]
    pub fn total(&self) -> usize {
        self.undrawn.len() + self.used.len()
    }

    /// Returns the undrawn cards, bottom first.
    #[must_use]
    pub fn undrawn_cards(&self) -> &[Card] {
        &self.undrawn
    }

    /// Returns the used cards in draw order.
    #[must_use]
    pub fn used_cards(&self) -> &[Card] {
        &self.used
    }

    /// Returns remaining, used and total counts.
    #[must_use]
    pub fn stats(&self) -> ShoeStats {
        let total = self.total();
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let percent_remaining = if total == 0 {
            0.0
        } else {
            self.undrawn.len() as f64 / total as f64 * 100.0
        };

        ShoeStats {
            remaining: self.undrawn.len(),
            used: self.used.len(),
            total,
            percent_remaining,
        }
    }
}
