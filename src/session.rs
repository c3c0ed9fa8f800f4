//! A player's session at the table, saved as it goes.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use alloc::sync::Arc;

use crate::error::{ActionError, BetError, ConfigError, PersistError, RoundError};
use crate::game::{Action, Actions, Decider, Game, RoundFlow};
use crate::ledger::Player;
use crate::money::Money;
use crate::options::TableOptions;
use crate::persist::SaveStore;

/// Name used when the player gives none.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// The latest known state of a seated player, shared across threads.
///
/// A signal handler cannot reach into a running [`Session`], so the session
/// copies the player here every time it hands control to the decider. Saving
/// a checkpoint taken mid-round records the balance with the stakes already
/// taken, the same as quitting the round.
#[derive(Debug, Clone, Default)]
pub struct Checkpoint {
    inner: Arc<Mutex<Option<(SaveStore, Player)>>>,
}

impl Checkpoint {
    /// Creates an empty checkpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<(SaveStore, Player)>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the recorded player and the store it belongs to.
    pub fn record(&self, store: &SaveStore, player: &Player) {
        *self.lock() = Some((store.clone(), player.clone()));
    }

    /// Returns the recorded player, if any.
    #[must_use]
    pub fn player(&self) -> Option<Player> {
        self.lock().as_ref().map(|(_, player)| player.clone())
    }

    /// Saves the recorded player. Returns `None` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    pub fn save(&self) -> Result<Option<PathBuf>, PersistError> {
        let guard = self.lock();
        let Some((store, player)) = guard.as_ref() else {
            return Ok(None);
        };
        store.save(player).map(Some)
    }
}

/// Passes decisions through, recording the player before each one.
struct Recording<'a, D: ?Sized> {
    decider: &'a mut D,
    checkpoint: &'a Checkpoint,
    store: &'a SaveStore,
}

impl<D: Decider + ?Sized> Decider for Recording<'_, D> {
    fn bet(&mut self, game: &Game) -> Option<Money> {
        self.checkpoint.record(self.store, game.player());
        self.decider.bet(game)
    }

    fn action(&mut self, game: &Game, offered: Actions) -> Option<Action> {
        self.checkpoint.record(self.store, game.player());
        self.decider.action(game, offered)
    }

    fn bet_rejected(&mut self, error: BetError) {
        self.decider.bet_rejected(error);
    }

    fn action_rejected(&mut self, error: ActionError) {
        self.decider.action_rejected(error);
    }
}

/// A [`Game`] bound to a [`SaveStore`].
///
/// The player is saved after every settled round and once more when the
/// session is dropped. Save failures are logged and never end the session.
/// A [`Checkpoint`] follows the player through each round.
#[derive(Debug)]
pub struct Session {
    game: Game,
    store: SaveStore,
    restored: bool,
    checkpoint: Checkpoint,
}

impl Session {
    /// Opens a session for `name`, restoring a saved record if there is one.
    ///
    /// An unreadable record is logged and replaced by a fresh player.
    ///
    /// # Errors
    ///
    /// Returns an error if the options do not validate.
    pub fn open(
        name: &str,
        options: TableOptions,
        seed: u64,
        store: SaveStore,
    ) -> Result<Self, ConfigError> {
        let name = match name.trim() {
            "" => DEFAULT_PLAYER_NAME,
            trimmed => trimmed,
        };

        let saved = match store.load(name) {
            Ok(saved) => saved,
            Err(err) => {
                log::error!("could not load progress for '{name}': {err}");
                None
            }
        };
        let restored = saved.is_some();
        let player = saved.unwrap_or_else(|| Player::new(name, options.starting_balance));
        log::info!("player '{name}' seated with {}", player.balance());

        let checkpoint = Checkpoint::new();
        checkpoint.record(&store, &player);

        Ok(Self {
            game: Game::new(options, player, seed)?,
            store,
            restored,
            checkpoint,
        })
    }

    /// Makes the session report to `checkpoint`, recording the player now.
    #[must_use]
    pub fn with_checkpoint(mut self, checkpoint: Checkpoint) -> Self {
        checkpoint.record(&self.store, self.game.player());
        self.checkpoint = checkpoint;
        self
    }

    /// Returns the checkpoint the session reports to.
    #[must_use]
    pub const fn checkpoint(&self) -> &Checkpoint {
        &self.checkpoint
    }

    /// Returns whether the player was restored from a save file.
    #[must_use]
    pub const fn restored(&self) -> bool {
        self.restored
    }

    /// Returns the game.
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the game mutably.
    pub const fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Returns the save store.
    #[must_use]
    pub const fn store(&self) -> &SaveStore {
        &self.store
    }

    /// Returns whether the player has no money left to bet.
    #[must_use]
    pub fn is_broke(&self) -> bool {
        !self.game.player().balance().is_positive()
    }

    /// Plays one round and saves the player once it is settled.
    ///
    /// # Errors
    ///
    /// Returns an error if the shoe runs out of cards.
    pub fn play_round<D: Decider + ?Sized>(
        &mut self,
        decider: &mut D,
    ) -> Result<RoundFlow, RoundError> {
        let mut recording = Recording {
            decider,
            checkpoint: &self.checkpoint,
            store: &self.store,
        };
        let flow = self.game.play_round(&mut recording)?;
        self.checkpoint.record(&self.store, self.game.player());
        if matches!(flow, RoundFlow::Settled(_)) {
            self.save();
        }
        Ok(flow)
    }

    /// Saves the player, returning whether it worked.
    pub fn save(&self) -> bool {
        match self.store.save(self.game.player()) {
            Ok(_) => true,
            Err(err) => {
                log::error!(
                    "could not save progress for '{}': {err}",
                    self.game.player().name()
                );
                false
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.save();
    }
}
