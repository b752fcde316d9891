//! Leveling Engine - character progression and daily quests for habit games.
//!
//! Turns real-world tasks into quests: completing one grants experience and
//! stat bonuses, levels derive from total experience, and a fresh sample of
//! quests is offered each calendar day. State is persisted to a string
//! key-value store.

pub mod core;
pub mod schema;
