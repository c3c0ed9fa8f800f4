//! Player and dealer hand representations.

use alloc::vec::Vec;
use core::fmt;

use crate::card::{Card, Rank};
use crate::ledger::Bets;
use crate::money::Money;

/// Stable identifier of a hand within a round.
///
/// Splits replace a hand with two new ones, so bets are keyed by id rather
/// than by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandId(pub u32);

impl fmt::Display for HandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Totals {
    hard: u32,
    best: u32,
}

fn evaluate_cards(cards: &[Card]) -> Totals {
    let mut hard: u32 = 0;
    let mut aces: u32 = 0;

    for card in cards.iter().filter(|card| card.is_face_up()) {
        if card.rank == Rank::Ace {
            aces += 1;
        }
        hard += u32::from(card.rank.hard_value());
    }

    // Every reachable total is `hard + 10 * k` for `k` aces counted high.
    let best = (0..=aces)
        .rev()
        .map(|high| hard + 10 * high)
        .find(|&total| total <= 21)
        .unwrap_or(hard);

    Totals { hard, best }
}

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandStatus {
    /// Hand is active and can take actions.
    Active,
    /// Hand has stood.
    Stand,
    /// Hand has busted (over 21).
    Bust,
}

/// A hand of cards held by the player or the dealer.
#[derive(Debug, Clone)]
pub struct Hand {
    id: HandId,
    cards: Vec<Card>,
    status: HandStatus,
    from_split: bool,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new(id: HandId) -> Self {
        Self {
            id,
            cards: Vec::new(),
            status: HandStatus::Active,
            from_split: false,
        }
    }

    /// Creates a new hand from a split with a single card.
    #[must_use]
    pub fn from_split(id: HandId, card: Card) -> Self {
        Self {
            id,
            cards: alloc::vec![card],
            status: HandStatus::Active,
            from_split: true,
        }
    }

    /// Returns the hand id.
    #[must_use]
    pub const fn id(&self) -> HandId {
        self.id
    }

    /// Adds a card to the hand, marking it busted if it goes over 21.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.check_bust();
    }

    fn check_bust(&mut self) {
        if self.best_value() > 21 {
            self.status = HandStatus::Bust;
        }
    }

    /// Turns every card face up.
    pub fn reveal(&mut self) {
        for card in &mut self.cards {
            *card = card.face_up();
        }
        self.check_bust();
    }

    /// Marks the hand as standing. A busted hand stays busted.
    pub fn stand(&mut self) {
        if self.status == HandStatus::Active {
            self.status = HandStatus::Stand;
        }
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Returns whether the hand went over 21.
    #[must_use]
    pub fn is_busted(&self) -> bool {
        self.status == HandStatus::Bust
    }

    /// Returns whether the hand has stood.
    #[must_use]
    pub fn is_standing(&self) -> bool {
        self.status == HandStatus::Stand
    }

    /// Returns whether this hand is from a split.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Calculates the best value of the face-up cards.
    ///
    /// This is the highest total not over 21, or the lowest total when every
    /// total busts. Face-down cards do not count.
    #[must_use]
    pub fn best_value(&self) -> u8 {
        u8::try_from(evaluate_cards(&self.cards).best).unwrap_or(u8::MAX)
    }

    /// Returns whether the best value counts an ace as 11.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        let totals = evaluate_cards(&self.cards);
        totals.best != totals.hard
    }

    /// Returns whether the hand is a natural: two cards worth 21, not split.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.best_value() == 21 && !self.from_split
    }

    /// Returns whether the hand is two cards of the same rank.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Returns whether the hand can be split with `balance` left to stake.
    #[must_use]
    pub fn can_split(&self, bets: &Bets, balance: Money) -> bool {
        self.is_pair() && bets.get(self.id).is_some_and(|bet| balance >= bet)
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
