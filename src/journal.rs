//! Flat-file game log
//!
//! An append-only text file holding the startup argument and notable runtime
//! events. Separate from the `log` diagnostics, which go to stderr.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::sim::{GameEvent, PowerUpKind};

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "game.log";

/// Append-only game journal
#[derive(Debug)]
pub struct GameLog {
    path: PathBuf,
    file: File,
}

impl GameLog {
    /// Open (or create) the log for appending
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    /// Append one line. Write failures are reported to the diagnostic log only.
    pub fn write(&mut self, message: &str) {
        if let Err(e) = writeln!(self.file, "{}", message).and_then(|_| self.file.flush()) {
            log::warn!("Failed to write game log {}: {}", self.path.display(), e);
        }
    }

    /// Record the events worth keeping
    pub fn record(&mut self, event: &GameEvent) {
        if let Some(line) = journal_line(event) {
            self.write(&line);
        }
    }
}

/// Journal text for an event, or None if it is not journaled
pub fn journal_line(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::PlanetImpact { damage } => {
            Some(format!("Player collided with planet (damage {})", damage))
        }
        GameEvent::PowerUpCollected(kind) => {
            Some(format!("Collected {} power-up", powerup_name(*kind)))
        }
        GameEvent::GameOver { score } => Some(format!("Game over, final score {}", score)),
        GameEvent::EnemyDestroyed { .. }
        | GameEvent::PlayerHit { .. }
        | GameEvent::PowerUpExpired(_)
        | GameEvent::WeaponSwitched(_) => None,
    }
}

fn powerup_name(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::Speed => "speed",
        PowerUpKind::FireRate => "fire rate",
        PowerUpKind::Shield => "shield",
        PowerUpKind::Ammo => "ammo",
    }
}
