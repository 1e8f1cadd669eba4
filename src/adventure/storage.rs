//! Save-file persistence.
//!
//! Format: pretty JSON with `inventory`, `gold`, `hp`, `equipped_weapon` (item copy or
//! null), `player_pos` (`[x, y]`) and an informational `saved_at` timestamp. Every field
//! is optional on load.
//!
//! Writes go to a temp file that is renamed over the target while an exclusive lock is
//! held on a sidecar `.lock` file. Reads take a shared lock on the save itself.

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::errors::AdventureError;
use super::types::{Item, PlayerState, Position, DEFAULT_GOLD, DEFAULT_HP};
use crate::validation::safe_filename;

fn default_gold() -> u32 {
    DEFAULT_GOLD
}

fn default_hp() -> i32 {
    DEFAULT_HP
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveDocument {
    #[serde(default)]
    inventory: Vec<Item>,
    #[serde(default = "default_gold")]
    gold: u32,
    #[serde(default = "default_hp")]
    hp: i32,
    #[serde(default)]
    equipped_weapon: Option<Item>,
    #[serde(default)]
    player_pos: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

impl SaveDocument {
    fn capture(state: &PlayerState) -> Self {
        SaveDocument {
            inventory: state.inventory.clone(),
            gold: state.gold,
            hp: state.hp,
            equipped_weapon: state.equipped_item().cloned(),
            player_pos: state.position,
            saved_at: Some(Utc::now()),
        }
    }

    fn into_state(self) -> Result<PlayerState, AdventureError> {
        for item in &self.inventory {
            item.validate()?;
        }
        let mut state = PlayerState::new(self.gold, self.hp);
        state.inventory = self.inventory;
        state.position = self.player_pos;
        if let Some(saved) = self.equipped_weapon {
            match resolve_equipped(&state.inventory, &saved) {
                Some(index) => {
                    state.set_equipped(index);
                }
                None => log::warn!(
                    "adventure: equipped {} is not in the saved inventory; unequipping",
                    saved.name
                ),
            }
        }
        Ok(state)
    }
}

/// Find the inventory entry a saved equipment copy refers to: the first equal item,
/// else the first equippable item with the same name.
fn resolve_equipped(inventory: &[Item], saved: &Item) -> Option<usize> {
    inventory
        .iter()
        .position(|i| i == saved && i.is_equippable())
        .or_else(|| {
            inventory
                .iter()
                .position(|i| i.name == saved.name && i.is_equippable())
        })
}

/// Where the loaded state came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Loaded,
    /// No save file; fresh default state.
    NotFound,
    /// The file exists but could not be read or parsed; fresh default state.
    Corrupt(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub state: PlayerState,
    pub source: LoadSource,
}

impl LoadOutcome {
    /// The notice shown to the player after loading.
    pub fn notice(&self, path: &Path) -> String {
        match &self.source {
            LoadSource::Loaded => format!("Game loaded from {}.", path.display()),
            LoadSource::NotFound => "No saved game found. Starting a new game.".to_string(),
            LoadSource::Corrupt(_) => {
                "Error loading the game file. Starting a new game.".to_string()
            }
        }
    }
}

/// Per-character save path: `<save_dir>/<percent-encoded name>.json`.
pub fn save_path(save_dir: &Path, name: &str) -> PathBuf {
    save_dir.join(format!("{}.json", safe_filename(name)))
}

fn lock_path(path: &Path) -> PathBuf {
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("save.json");
    path.with_file_name(format!(".{}.lock", base))
}

fn write_json_atomic(path: &Path, content: &str) -> Result<(), AdventureError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(lock_path(path))?;
    if lock_file.try_lock_exclusive().is_err() {
        return Err(AdventureError::SaveLocked(path.display().to_string()));
    }
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("save.json");
    let mut counter = 0u32;
    let tmp_path = loop {
        let cand = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&cand) {
            Ok(mut tmp) => {
                tmp.write_all(content.as_bytes())?;
                tmp.flush()?;
                let _ = tmp.sync_all();
                break cand;
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(e.into()),
        }
    };
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    if let Ok(dirf) = File::open(&dir) {
        let _ = dirf.sync_all();
    }
    if let Err(e) = FileExt::unlock(&lock_file) {
        log::warn!("adventure: failed to unlock {}: {}", path.display(), e);
    }
    Ok(())
}

/// Write the player's state to `path`.
pub fn save_game(path: &Path, state: &PlayerState) -> Result<(), AdventureError> {
    let json = serde_json::to_string_pretty(&SaveDocument::capture(state))?;
    write_json_atomic(path, &json)?;
    log::info!("adventure: saved game to {}", path.display());
    Ok(())
}

/// Read a save file. Never fails: a missing or broken file yields the default state
/// and says which fallback happened.
pub fn load_game(path: &Path) -> LoadOutcome {
    let fallback = |source: LoadSource| LoadOutcome {
        state: PlayerState::default(),
        source,
    };
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("adventure: no save at {}", path.display());
            return fallback(LoadSource::NotFound);
        }
        Err(e) => {
            log::warn!("adventure: cannot open {}: {}", path.display(), e);
            return fallback(LoadSource::Corrupt(e.to_string()));
        }
    };
    let locked = match FileExt::lock_shared(&file) {
        Ok(()) => true,
        Err(e) => {
            log::warn!(
                "adventure: could not lock {} for reading: {}; reading unlocked",
                path.display(),
                e
            );
            false
        }
    };
    let mut raw = String::new();
    let read = file.read_to_string(&mut raw);
    if locked {
        if let Err(e) = FileExt::unlock(&file) {
            log::warn!("adventure: failed to unlock {}: {}", path.display(), e);
        }
    }
    if let Err(e) = read {
        log::warn!("adventure: failed reading {}: {}", path.display(), e);
        return fallback(LoadSource::Corrupt(e.to_string()));
    }
    let parsed = serde_json::from_str::<SaveDocument>(raw.trim_start_matches('\0'))
        .map_err(AdventureError::from)
        .and_then(SaveDocument::into_state);
    match parsed {
        Ok(state) => {
            log::info!("adventure: loaded game from {}", path.display());
            LoadOutcome {
                state,
                source: LoadSource::Loaded,
            }
        }
        Err(e) => {
            log::warn!("adventure: malformed save {}: {}", path.display(), e);
            fallback(LoadSource::Corrupt(e.to_string()))
        }
    }
}
