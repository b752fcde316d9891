/// Quest catalog - the static table of quests and class profiles.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::character::CharacterClass;
use crate::schema::quest::{Quest, QuestCategory, QuestDifficulty, QuestId};
use crate::schema::stats::PlayerStats;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("duplicate quest id: {0}")]
    DuplicateQuest(QuestId),
}

mod data {
    pub const QUESTS: &str = include_str!("../../quest_data/quests.ron");
    pub const CLASSES: &str = include_str!("../../quest_data/classes.ron");
}

/// Descriptive data for a character class.
///
/// `starting_stats` is shown at character creation but is not applied to
/// new characters; every class starts from the flat baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassProfile {
    pub class: CharacterClass,
    pub description: String,
    pub starting_stats: PlayerStats,
    /// Display gradient, e.g. "from-red-600 to-red-400".
    pub color: String,
}

/// An ordered, read-only set of quests with lookup by id.
#[derive(Debug, Clone, Default)]
pub struct QuestCatalog {
    quests: Vec<Quest>,
    index: FxHashMap<QuestId, usize>,
    classes: Vec<ClassProfile>,
}

impl QuestCatalog {
    /// The catalog shipped with the crate: 30 quests across six
    /// categories and one profile per class.
    pub fn builtin() -> Result<QuestCatalog, CatalogError> {
        Self::parse_ron(data::QUESTS, Some(data::CLASSES))
    }

    /// Build a catalog from already-parsed parts. Quest ids must be unique.
    pub fn from_parts(
        quests: Vec<Quest>,
        classes: Vec<ClassProfile>,
    ) -> Result<QuestCatalog, CatalogError> {
        let mut index = FxHashMap::default();
        for (i, quest) in quests.iter().enumerate() {
            if index.insert(quest.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateQuest(quest.id.clone()));
            }
        }
        Ok(QuestCatalog {
            quests,
            index,
            classes,
        })
    }

    /// Parse a quest list and an optional class profile list from RON.
    pub fn parse_ron(quests: &str, classes: Option<&str>) -> Result<QuestCatalog, CatalogError> {
        let quests: Vec<Quest> = ron::from_str(quests)?;
        let classes: Vec<ClassProfile> = match classes {
            Some(input) => ron::from_str(input)?,
            None => Vec::new(),
        };
        Self::from_parts(quests, classes)
    }

    /// Load `quests.ron` (required) and `classes.ron` (optional) from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<QuestCatalog, CatalogError> {
        let quests = std::fs::read_to_string(dir.join("quests.ron"))?;
        let classes_path = dir.join("classes.ron");
        let classes = if classes_path.exists() {
            Some(std::fs::read_to_string(classes_path)?)
        } else {
            None
        };
        Self::parse_ron(&quests, classes.as_deref())
    }

    /// Merge another catalog into this one. Quests and class profiles from
    /// `other` replace entries with the same id or class; new ones are appended.
    pub fn merge(&mut self, other: QuestCatalog) {
        for quest in other.quests {
            match self.index.get(&quest.id) {
                Some(&i) => self.quests[i] = quest,
                None => {
                    self.index.insert(quest.id.clone(), self.quests.len());
                    self.quests.push(quest);
                }
            }
        }
        for profile in other.classes {
            match self.classes.iter_mut().find(|p| p.class == profile.class) {
                Some(existing) => *existing = profile,
                None => self.classes.push(profile),
            }
        }
    }

    pub fn get(&self, id: &QuestId) -> Option<&Quest> {
        self.index.get(id).map(|&i| &self.quests[i])
    }

    pub fn contains(&self, id: &QuestId) -> bool {
        self.index.contains_key(id)
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    /// Quests matching both filters, in catalog order. `None` matches all.
    pub fn filter(
        &self,
        category: Option<QuestCategory>,
        difficulty: Option<QuestDifficulty>,
    ) -> Vec<&Quest> {
        self.quests
            .iter()
            .filter(|q| category.map_or(true, |c| q.category == c))
            .filter(|q| difficulty.map_or(true, |d| q.difficulty == d))
            .collect()
    }

    pub fn by_category(&self, category: QuestCategory) -> Vec<&Quest> {
        self.filter(Some(category), None)
    }

    pub fn classes(&self) -> &[ClassProfile] {
        &self.classes
    }

    pub fn class_profile(&self, class: CharacterClass) -> Option<&ClassProfile> {
        self.classes.iter().find(|p| p.class == class)
    }
}
