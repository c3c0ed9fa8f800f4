use crate::error::{ActionError, BetError, RoundError};
use crate::money::Money;
use crate::result::RoundResult;

use super::{Action, Actions, Game, GameState};

/// Supplies the player's decisions to [`Game::play_round`].
///
/// Returning `None` from either prompt quits the session.
pub trait Decider {
    /// Asks for the round's bet.
    fn bet(&mut self, game: &Game) -> Option<Money>;

    /// Asks for an action on the current hand. `offered` lists the legal ones.
    fn action(&mut self, game: &Game, offered: Actions) -> Option<Action>;

    /// Called when a bet was rejected; the bet is asked for again.
    fn bet_rejected(&mut self, _error: BetError) {}

    /// Called when an action was rejected; the action is asked for again.
    fn action_rejected(&mut self, _error: ActionError) {}
}

/// How a round driven by [`Game::play_round`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundFlow {
    /// The round was played out and paid.
    Settled(RoundResult),
    /// The decider quit; any unfinished round was abandoned.
    Quit,
}

impl Game {
    /// Plays one full round, prompting `decider` for the bet and each action.
    ///
    /// Rejected bets and actions are reported back to the decider and asked
    /// for again; nothing changes until a move is legal. The finished round
    /// stays on the table in the `Done` state until the next round starts.
    ///
    /// # Errors
    ///
    /// Returns an error only if the shoe runs out of cards.
    pub fn play_round<D: Decider + ?Sized>(
        &mut self,
        decider: &mut D,
    ) -> Result<RoundFlow, RoundError> {
        if self.state != GameState::Betting {
            self.clear_round();
        }

        loop {
            let Some(amount) = decider.bet(self) else {
                return Ok(RoundFlow::Quit);
            };
            match self.bet(amount) {
                Ok(()) => break,
                Err(error) => decider.bet_rejected(error),
            }
        }

        self.deal()?;

        while matches!(self.state, GameState::PlayerActing { .. }) {
            let offered = self.available_actions();
            let Some(action) = decider.action(self, offered) else {
                self.clear_round();
                return Ok(RoundFlow::Quit);
            };
            if let Err(error) = self.apply(action) {
                log::debug!("rejected {action:?}: {error}");
                decider.action_rejected(error);
            }
        }

        self.dealer_play()?;
        Ok(RoundFlow::Settled(self.showdown()?))
    }
}
