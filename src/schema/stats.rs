use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five named attributes every character carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Strength,
    Intelligence,
    Dexterity,
    Constitution,
    Luck,
}

impl StatKind {
    /// All stats, in display order.
    pub const ALL: [StatKind; 5] = [
        Self::Strength,
        Self::Intelligence,
        Self::Dexterity,
        Self::Constitution,
        Self::Luck,
    ];

    /// Returns the lowercase field name used in persisted data (e.g., "luck").
    pub fn name(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Intelligence => "intelligence",
            Self::Dexterity => "dexterity",
            Self::Constitution => "constitution",
            Self::Luck => "luck",
        }
    }

    /// Three-letter abbreviation shown next to stat values.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Intelligence => "INT",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Luck => "LCK",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stat: {0}")]
pub struct UnknownStat(pub String);

impl FromStr for StatKind {
    type Err = UnknownStat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strength" | "str" => Ok(Self::Strength),
            "intelligence" | "int" => Ok(Self::Intelligence),
            "dexterity" | "dex" => Ok(Self::Dexterity),
            "constitution" | "con" => Ok(Self::Constitution),
            "luck" | "lck" => Ok(Self::Luck),
            _ => Err(UnknownStat(s.to_string())),
        }
    }
}

/// A character's attribute block. Values are unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub strength: u32,
    pub intelligence: u32,
    pub dexterity: u32,
    pub constitution: u32,
    pub luck: u32,
}

impl PlayerStats {
    /// Starting value for every stat on a freshly created character.
    pub const BASELINE_VALUE: u32 = 10;

    /// All five stats set to the same value.
    pub fn uniform(value: u32) -> Self {
        Self {
            strength: value,
            intelligence: value,
            dexterity: value,
            constitution: value,
            luck: value,
        }
    }

    /// The flat 10/10/10/10/10 block assigned at character creation.
    pub fn baseline() -> Self {
        Self::uniform(Self::BASELINE_VALUE)
    }

    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Intelligence => self.intelligence,
            StatKind::Dexterity => self.dexterity,
            StatKind::Constitution => self.constitution,
            StatKind::Luck => self.luck,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut u32 {
        match kind {
            StatKind::Strength => &mut self.strength,
            StatKind::Intelligence => &mut self.intelligence,
            StatKind::Dexterity => &mut self.dexterity,
            StatKind::Constitution => &mut self.constitution,
            StatKind::Luck => &mut self.luck,
        }
    }

    /// Sum of all five stats.
    pub fn total(&self) -> u32 {
        StatKind::ALL.iter().map(|kind| self.get(*kind)).sum()
    }

    /// Add every bonus in `bonus` to the matching stat.
    pub fn apply_bonus(&mut self, bonus: &StatBonus) {
        for (kind, amount) in bonus.iter() {
            let stat = self.get_mut(kind);
            *stat = stat.saturating_add(amount);
        }
    }

    /// Overwrite every stat that `update` sets; unset stats are left alone.
    pub fn apply_update(&mut self, update: &StatUpdate) {
        for (kind, value) in update.iter() {
            *self.get_mut(kind) = value;
        }
    }
}

/// A partial stat map: each present entry is a positive bonus added to
/// the corresponding stat when a quest is completed.
///
/// Serialized with absent stats omitted, e.g. `{"strength":1,"luck":1}`.
/// Keys that are not one of the five stat names are ignored when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBonus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dexterity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constitution: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub luck: Option<u32>,
}

/// A partial overwrite of a character's stats. Same shape as
/// [`StatBonus`], but values replace rather than add.
pub type StatUpdate = StatBonus;

impl StatBonus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `kind` to `value`, builder style.
    pub fn with(mut self, kind: StatKind, value: u32) -> Self {
        self.set(kind, Some(value));
        self
    }

    pub fn get(&self, kind: StatKind) -> Option<u32> {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Intelligence => self.intelligence,
            StatKind::Dexterity => self.dexterity,
            StatKind::Constitution => self.constitution,
            StatKind::Luck => self.luck,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: Option<u32>) {
        let slot = match kind {
            StatKind::Strength => &mut self.strength,
            StatKind::Intelligence => &mut self.intelligence,
            StatKind::Dexterity => &mut self.dexterity,
            StatKind::Constitution => &mut self.constitution,
            StatKind::Luck => &mut self.luck,
        };
        *slot = value;
    }

    /// Present entries in stat display order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, u32)> + '_ {
        StatKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|value| (kind, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl fmt::Display for StatBonus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(kind, value)| format!("+{} {}", value, kind.abbreviation()))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_is_all_tens() {
        let stats = PlayerStats::baseline();
        for kind in StatKind::ALL {
            assert_eq!(stats.get(kind), 10);
        }
        assert_eq!(stats.total(), 50);
    }

    #[test]
    fn apply_bonus_adds_only_present_stats() {
        let mut stats = PlayerStats::baseline();
        let bonus = StatBonus::new()
            .with(StatKind::Strength, 1)
            .with(StatKind::Constitution, 2);
        stats.apply_bonus(&bonus);
        assert_eq!(stats.strength, 11);
        assert_eq!(stats.constitution, 12);
        assert_eq!(stats.intelligence, 10);
        assert_eq!(stats.dexterity, 10);
        assert_eq!(stats.luck, 10);
    }

    #[test]
    fn apply_update_overwrites() {
        let mut stats = PlayerStats::baseline();
        stats.apply_update(&StatUpdate::new().with(StatKind::Luck, 3));
        assert_eq!(stats.luck, 3);
        assert_eq!(stats.strength, 10);
    }

    #[test]
    fn bonus_json_omits_absent_stats() {
        let bonus = StatBonus::new().with(StatKind::Intelligence, 2);
        let json = serde_json::to_string(&bonus).unwrap();
        assert_eq!(json, r#"{"intelligence":2}"#);
    }

    #[test]
    fn bonus_ignores_unknown_keys() {
        let bonus: StatBonus =
            serde_json::from_str(r#"{"strength":1,"charisma":4}"#).unwrap();
        assert_eq!(bonus.strength, Some(1));
        assert_eq!(bonus.iter().count(), 1);
    }

    #[test]
    fn bonus_display() {
        let bonus = StatBonus::new()
            .with(StatKind::Dexterity, 1)
            .with(StatKind::Luck, 1);
        assert_eq!(bonus.to_string(), "+1 DEX, +1 LCK");
        assert!(StatBonus::new().is_empty());
    }

    #[test]
    fn stat_kind_from_str() {
        assert_eq!("Strength".parse::<StatKind>(), Ok(StatKind::Strength));
        assert_eq!("dex".parse::<StatKind>(), Ok(StatKind::Dexterity));
        assert!("charisma".parse::<StatKind>().is_err());
    }
}
