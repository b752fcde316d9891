use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::stats::PlayerStats;
use crate::core::progression;

/// Newtype wrapper for generated character IDs (`char_<unix millis>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub String);

impl CharacterId {
    /// Build the ID for a character created at `millis` since the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("char_{}", millis))
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The class tag picked at character creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Assassin,
    Tank,
    Support,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 5] = [
        Self::Warrior,
        Self::Mage,
        Self::Assassin,
        Self::Tank,
        Self::Support,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Warrior => "Warrior",
            Self::Mage => "Mage",
            Self::Assassin => "Assassin",
            Self::Tank => "Tank",
            Self::Support => "Support",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown character class: {0}")]
pub struct UnknownClass(pub String);

impl FromStr for CharacterClass {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownClass(s.to_string()))
    }
}

/// The single player entity of a session.
///
/// `level` and `experience_to_next` are derived from `experience` and
/// cached; they are recomputed whenever experience changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub experience: u64,
    pub experience_to_next: u64,
    pub stats: PlayerStats,
    /// Opaque avatar identifier chosen at creation.
    pub avatar: String,
    pub total_quests: u32,
    /// Never reset on day rollover; see DESIGN.md.
    pub completed_today: u32,
}

impl Character {
    /// A fresh level-1 character with the flat baseline stat block.
    pub fn new(id: CharacterId, name: &str, class: CharacterClass, avatar: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            class,
            level: 1,
            experience: 0,
            experience_to_next: progression::experience_to_next_level(0),
            stats: PlayerStats::baseline(),
            avatar: avatar.to_string(),
            total_quests: 0,
            completed_today: 0,
        }
    }

    /// Add experience and refresh the derived level fields.
    /// Returns the level before the change. The total is capped at
    /// `MAX_EXPERIENCE`.
    pub fn gain_experience(&mut self, amount: u64) -> u32 {
        let previous = self.level;
        self.experience = self
            .experience
            .saturating_add(amount)
            .min(progression::MAX_EXPERIENCE);
        self.level = progression::calculate_level(self.experience);
        self.experience_to_next = progression::experience_to_next_level(self.experience);
        previous
    }

    /// Percentage (0..100) of the current level already earned.
    pub fn level_progress(&self) -> u8 {
        progression::level_progress(self.experience)
    }
}
