/// Character state store: the single owner of the player character and
/// today's quest set, kept in sync with durable storage.
///
/// Built via `CharacterStore::builder()`, then `initialize()` once per
/// session before use.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::calendar::{Clock, DayKey, SystemClock};
use crate::core::catalog::{CatalogError, QuestCatalog};
use crate::core::progression::{self, DEFAULT_DAILY_QUEST_COUNT};
use crate::core::storage::{KeyValueStore, MemoryStore, StorageError, StorageKeys};
use crate::schema::character::{Character, CharacterClass, CharacterId};
use crate::schema::quest::{Quest, QuestId};
use crate::schema::stats::{StatBonus, StatUpdate};

/// Key prefix shared with the browser client's local-storage entries.
pub const DEFAULT_KEY_PREFIX: &str = "solo-leveling-";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("malformed entry '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode entry: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Tunables, loadable from a RON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Size of each freshly sampled daily quest set.
    pub daily_quest_count: usize,
    /// Prepended to every storage key.
    pub key_prefix: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            daily_quest_count: DEFAULT_DAILY_QUEST_COUNT,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl StoreSettings {
    pub fn load_from_ron(path: &Path) -> Result<StoreSettings, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }
}

/// A level transition caused by a quest completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub from: u32,
    pub to: u32,
}

/// What a successful `complete_quest` changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestCompletion {
    pub quest: Quest,
    pub experience_gained: u64,
    pub stats_gained: StatBonus,
    /// Set when the new experience total crossed a level boundary.
    pub level_up: Option<LevelUp>,
}

/// The authoritative in-memory game state for one session.
pub struct CharacterStore {
    catalog: QuestCatalog,
    storage: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    rng: StdRng,
    settings: StoreSettings,
    keys: StorageKeys,
    character: Option<Character>,
    daily_quests: Vec<Quest>,
    day_key: Option<DayKey>,
    is_loading: bool,
}

/// Builder for constructing a `CharacterStore`.
pub struct CharacterStoreBuilder {
    catalog: Option<QuestCatalog>,
    storage: Option<Box<dyn KeyValueStore>>,
    clock: Option<Box<dyn Clock>>,
    seed: Option<u64>,
    settings: StoreSettings,
    settings_path: Option<PathBuf>,
    daily_quest_count: Option<usize>,
    key_prefix: Option<String>,
}

impl CharacterStore {
    pub fn builder() -> CharacterStoreBuilder {
        CharacterStoreBuilder {
            catalog: None,
            storage: None,
            clock: None,
            seed: None,
            settings: StoreSettings::default(),
            settings_path: None,
            daily_quest_count: None,
            key_prefix: None,
        }
    }

    /// Load persisted state and make sure today's quest set exists.
    ///
    /// A new set is sampled when the stored day marker is missing or is not
    /// today's, or when it is today's but no set was saved. Otherwise the
    /// saved set is used as-is, so repeated calls on the same day leave
    /// storage untouched.
    pub fn initialize(&mut self) -> Result<(), StoreError> {
        let character: Option<Character> = read_json(&*self.storage, &self.keys.character)?;
        if let Some(ref c) = character {
            debug!("loaded character {} ({}), level {}", c.name, c.id, c.level);
        }
        self.character = character;

        let today = self.clock.today();
        let stored_marker = self.storage.get(&self.keys.last_date)?;
        let same_day = stored_marker
            .as_deref()
            .map_or(false, |marker| today.matches_marker(marker));

        if same_day {
            let saved: Option<Vec<Quest>> =
                read_json(&*self.storage, &self.keys.daily_quests)?;
            match saved {
                Some(quests) => {
                    debug!("restored {} daily quests for {}", quests.len(), today);
                    self.daily_quests = quests;
                }
                None => {
                    debug!("no saved daily quests for {}, rolling a new set", today);
                    self.roll_daily_quests()?;
                }
            }
        } else {
            debug!(
                "day changed ({} -> {}), rolling a new quest set",
                stored_marker.as_deref().unwrap_or("none"),
                today
            );
            self.roll_daily_quests()?;
            self.storage.set(&self.keys.last_date, &today.marker())?;
        }

        self.day_key = Some(today);
        self.is_loading = false;
        Ok(())
    }

    /// Create a new level-1 character, replacing any existing one.
    ///
    /// A blank name is ignored and returns `Ok(None)`. Class starting stats
    /// from the catalog are not applied; every character starts at 10 in
    /// each stat.
    pub fn create_character(
        &mut self,
        name: &str,
        class: CharacterClass,
        avatar: &str,
    ) -> Result<Option<&Character>, StoreError> {
        if name.trim().is_empty() {
            debug!("ignoring character creation with a blank name");
            return Ok(None);
        }

        let id = CharacterId::from_millis(self.clock.now_millis());
        let character = Character::new(id, name, class, avatar);
        write_json(&mut *self.storage, &self.keys.character, &character)?;
        info!("created {} the {} ({})", character.name, character.class, character.id);

        self.character = Some(character);
        Ok(self.character.as_ref())
    }

    /// Complete a quest from today's set.
    ///
    /// Returns `Ok(None)` without touching anything when there is no
    /// character or `quest_id` is not in today's set (including quests
    /// already completed today). Changes are committed in memory only once
    /// both the character and the shrunken quest set have been written; on
    /// error the store is left as it was.
    pub fn complete_quest(
        &mut self,
        quest_id: &QuestId,
    ) -> Result<Option<QuestCompletion>, StoreError> {
        let mut character = match self.character.as_ref() {
            Some(c) => c.clone(),
            None => {
                debug!("no character, ignoring completion of {}", quest_id);
                return Ok(None);
            }
        };
        let position = match self.daily_quests.iter().position(|q| &q.id == quest_id) {
            Some(i) => i,
            None => {
                warn!("quest {} is not in today's set", quest_id);
                return Ok(None);
            }
        };

        let mut remaining = self.daily_quests.clone();
        let quest = remaining.remove(position);
        let previous_level = character.gain_experience(quest.rewards.experience);
        character.stats.apply_bonus(&quest.stat_bonus);
        character.total_quests = character.total_quests.saturating_add(1);
        character.completed_today = character.completed_today.saturating_add(1);

        // Two independent writes; a failure between them leaves the saved
        // character ahead of the saved quest set.
        write_json(&mut *self.storage, &self.keys.character, &character)?;
        write_json(&mut *self.storage, &self.keys.daily_quests, &remaining)?;

        let level_up = if character.level > previous_level {
            info!(
                "LEVEL UP! {} reached level {} (from {})",
                character.name, character.level, previous_level
            );
            Some(LevelUp {
                from: previous_level,
                to: character.level,
            })
        } else {
            None
        };
        debug!(
            "completed {} (+{} xp), {} quests left today",
            quest.id,
            quest.rewards.experience,
            remaining.len()
        );

        self.character = Some(character);
        self.daily_quests = remaining;
        Ok(Some(QuestCompletion {
            experience_gained: quest.rewards.experience,
            stats_gained: quest.stat_bonus,
            level_up,
            quest,
        }))
    }

    /// Overwrite the stats set in `update`. Returns `Ok(false)` when there
    /// is no character. The in-memory character changes only after the
    /// write succeeds.
    pub fn update_stats(&mut self, update: &StatUpdate) -> Result<bool, StoreError> {
        let mut character = match self.character.as_ref() {
            Some(c) => c.clone(),
            None => return Ok(false),
        };
        character.stats.apply_update(update);
        write_json(&mut *self.storage, &self.keys.character, &character)?;
        debug!("stats updated: {}", update);
        self.character = Some(character);
        Ok(true)
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    pub fn daily_quests(&self) -> &[Quest] {
        &self.daily_quests
    }

    /// True until `initialize` has completed.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The day the current quest set belongs to, once initialized.
    pub fn day_key(&self) -> Option<DayKey> {
        self.day_key
    }

    pub fn catalog(&self) -> &QuestCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    fn roll_daily_quests(&mut self) -> Result<(), StoreError> {
        self.daily_quests = progression::sample_daily_quests(
            self.catalog.quests(),
            self.settings.daily_quest_count,
            &mut self.rng,
        );
        write_json(&mut *self.storage, &self.keys.daily_quests, &self.daily_quests)
    }
}

impl CharacterStoreBuilder {
    /// Use a custom quest catalog instead of the built-in one.
    pub fn catalog(mut self, catalog: QuestCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Storage backend. Defaults to a fresh `MemoryStore`.
    pub fn storage(mut self, storage: impl KeyValueStore + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Clock used for the day marker and IDs. Defaults to `SystemClock`.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Seed the quest sampler. Without a seed, sampling uses OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn settings(mut self, settings: StoreSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Read settings from a RON file at build time. Missing files are ignored.
    pub fn settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    pub fn daily_quest_count(mut self, count: usize) -> Self {
        self.daily_quest_count = Some(count);
        self
    }

    pub fn key_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = Some(prefix.to_string());
        self
    }

    pub fn build(self) -> Result<CharacterStore, StoreError> {
        let mut settings = self.settings;
        if let Some(ref path) = self.settings_path {
            if path.exists() {
                settings = StoreSettings::load_from_ron(path)?;
                debug!("loaded settings from {}", path.display());
            }
        }
        // Explicit builder calls win over the settings file
        if let Some(count) = self.daily_quest_count {
            settings.daily_quest_count = count;
        }
        if let Some(prefix) = self.key_prefix {
            settings.key_prefix = prefix;
        }

        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => QuestCatalog::builtin()?,
        };
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(CharacterStore {
            catalog,
            storage: self
                .storage
                .unwrap_or_else(|| Box::new(MemoryStore::new())),
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
            rng,
            keys: StorageKeys::with_prefix(&settings.key_prefix),
            settings,
            character: None,
            daily_quests: Vec::new(),
            day_key: None,
            is_loading: true,
        })
    }
}

/// Read and decode a JSON entry. A missing key is `None`; a present but
/// undecodable value is `StoreError::Corrupt`.
fn read_json<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match storage.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

fn write_json<T: Serialize + ?Sized>(
    storage: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let encoded = serde_json::to_string(value)?;
    storage.set(key, &encoded)?;
    Ok(())
}
