//! Serializable data model: stats, quests, and the player character.

pub mod character;
pub mod quest;
pub mod stats;
