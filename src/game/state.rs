//! Game state types.

/// Round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Accepting a bet for the next round.
    Betting,
    /// Bet placed, waiting for the initial deal.
    Dealing,
    /// Waiting for an action on the player hand at `hand_index`.
    PlayerActing {
        /// Index into the player's hands (grows with splits).
        hand_index: usize,
    },
    /// Dealer plays out their hand.
    DealerActing,
    /// Dealer is done; hands can be paid out.
    Settling,
    /// Round has been paid out.
    Done,
}
