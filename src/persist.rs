//! Per-player save records.
//!
//! A record lives in `blackjack_save_<name>.json` inside the store directory,
//! where `<name>` is the player name reduced to letters, digits, spaces and
//! underscores.

use std::fs;
use std::path::{Path, PathBuf};

use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistError;
use crate::ledger::Player;
use crate::money::Money;

#[expect(
    clippy::cast_precision_loss,
    reason = "f64 has sufficient precision for monetary values"
)]
fn to_units(amount: Money) -> f64 {
    amount.cents() as f64 / 100.0
}

fn from_units(units: f64) -> Money {
    Money::from_cents((units * 100.0).round() as i64)
}

/// The saved form of a [`Player`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Player name as typed.
    #[serde(default)]
    pub name: String,
    /// Balance in currency units.
    pub balance: f64,
    /// Profit of every winning hand, in currency units.
    #[serde(default)]
    pub total_winnings: f64,
    /// Rounds played.
    #[serde(default)]
    pub hands_played: u32,
    /// Rounds with at least one winning hand.
    #[serde(default)]
    pub hands_won: u32,
    /// When the record was written, RFC 3339.
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl PlayerRecord {
    /// Captures `player` with the given timestamp.
    #[must_use]
    pub fn from_player(player: &Player, timestamp: Option<String>) -> Self {
        Self {
            name: player.name().into(),
            balance: to_units(player.balance()),
            total_winnings: to_units(player.total_winnings()),
            hands_played: player.hands_played(),
            hands_won: player.hands_won(),
            timestamp,
        }
    }

    /// Rebuilds a player named `name` from the record.
    #[must_use]
    pub fn into_player(self, name: &str) -> Player {
        Player::new(name, from_units(self.balance)).with_stats(
            from_units(self.total_winnings),
            self.hands_played,
            self.hands_won,
        )
    }
}

/// Reduces a player name to the characters allowed in a save file name.
///
/// ```
/// use bjcount::persist::sanitize_name;
///
/// assert_eq!(sanitize_name("Ada/Lovelace!  "), "AdaLovelace");
/// assert_eq!(sanitize_name("big_win 2"), "big_win 2");
/// ```
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_')
        .collect();
    kept.trim_end().into()
}

/// A directory of player save files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates a store in the user's home directory, or the working
    /// directory when no home is set.
    #[must_use]
    pub fn in_home() -> Self {
        let dir = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        Self::new(dir)
    }

    /// Returns the store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the save file path for a player name.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir
            .join(format!("blackjack_save_{}.json", sanitize_name(name)))
    }

    /// Loads the record for `name`, if one exists.
    ///
    /// A record saved under a different name is loaded anyway with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid record.
    pub fn load(&self, name: &str) -> Result<Option<Player>, PersistError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path)?;
        let record: PlayerRecord = serde_json::from_str(&text)?;

        if record.name != name {
            log::warn!(
                "name mismatch in save file: expected '{name}', found '{}'; loading anyway",
                record.name
            );
        }
        log::info!(
            "progress for '{name}' loaded from {}",
            record.timestamp.as_deref().unwrap_or("N/A")
        );

        Ok(Some(record.into_player(name)))
    }

    /// Writes the record for `player` and returns the file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted or the file
    /// cannot be written.
    pub fn save(&self, player: &Player) -> Result<PathBuf, PersistError> {
        let timestamp = OffsetDateTime::now_utc().format(&Rfc3339)?;
        let record = PlayerRecord::from_player(player, Some(timestamp));
        let path = self.path_for(player.name());

        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serde_json::to_string_pretty(&record)?)?;
        log::debug!("progress for '{}' saved to {}", player.name(), path.display());

        Ok(path)
    }
}
