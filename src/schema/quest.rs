use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::stats::StatBonus;

/// Newtype wrapper for catalog quest IDs (e.g., "fitness_001").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestId(pub String);

impl QuestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The life area a quest trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestCategory {
    Fitness,
    Learning,
    Productivity,
    Mindfulness,
    Social,
    Creativity,
}

impl QuestCategory {
    pub const ALL: [QuestCategory; 6] = [
        Self::Fitness,
        Self::Learning,
        Self::Productivity,
        Self::Mindfulness,
        Self::Social,
        Self::Creativity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fitness => "Fitness",
            Self::Learning => "Learning",
            Self::Productivity => "Productivity",
            Self::Mindfulness => "Mindfulness",
            Self::Social => "Social",
            Self::Creativity => "Creativity",
        }
    }
}

impl FromStr for QuestCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown quest category: {}", s))
    }
}

/// How demanding a quest is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuestDifficulty {
    Easy,
    Medium,
    Hard,
    Elite,
}

impl QuestDifficulty {
    pub const ALL: [QuestDifficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Elite];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Elite => "Elite",
        }
    }
}

impl FromStr for QuestDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown quest difficulty: {}", s))
    }
}

/// What completing a quest pays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestRewards {
    pub experience: u64,
    pub stat_points: u32,
}

/// An immutable catalog entry describing a real-world task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: QuestId,
    pub title: String,
    pub description: String,
    pub category: QuestCategory,
    pub difficulty: QuestDifficulty,
    pub rewards: QuestRewards,
    /// Free-form display string ("10 minutes", "Full day").
    pub time_estimate: String,
    #[serde(default)]
    pub stat_bonus: StatBonus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::stats::StatKind;

    fn make_quest() -> Quest {
        Quest {
            id: QuestId::new("fitness_003"),
            title: "Plank Challenge".to_string(),
            description: "Hold a plank for 2 minutes straight".to_string(),
            category: QuestCategory::Fitness,
            difficulty: QuestDifficulty::Medium,
            rewards: QuestRewards {
                experience: 60,
                stat_points: 1,
            },
            time_estimate: "5 minutes".to_string(),
            stat_bonus: StatBonus::new()
                .with(StatKind::Strength, 1)
                .with(StatKind::Constitution, 1),
        }
    }

    #[test]
    fn quest_json_uses_camel_case() {
        let json = serde_json::to_value(make_quest()).unwrap();
        assert_eq!(json["id"], "fitness_003");
        assert_eq!(json["timeEstimate"], "5 minutes");
        assert_eq!(json["rewards"]["statPoints"], 1);
        assert_eq!(json["statBonus"]["strength"], 1);
        assert_eq!(json["category"], "Fitness");
        assert_eq!(json["difficulty"], "Medium");
    }

    #[test]
    fn quest_reads_web_app_format() {
        let raw = r#"{
            "id": "social_002",
            "title": "Family Bond",
            "description": "Call a family member or old friend",
            "category": "Social",
            "difficulty": "Easy",
            "rewards": { "experience": 50, "statPoints": 1 },
            "timeEstimate": "15 minutes",
            "statBonus": { "luck": 1 }
        }"#;
        let quest: Quest = serde_json::from_str(raw).unwrap();
        assert_eq!(quest.id, QuestId::from("social_002"));
        assert_eq!(quest.rewards.experience, 50);
        assert_eq!(quest.stat_bonus.luck, Some(1));
    }

    #[test]
    fn category_and_difficulty_parse() {
        assert_eq!("fitness".parse::<QuestCategory>(), Ok(QuestCategory::Fitness));
        assert_eq!("ELITE".parse::<QuestDifficulty>(), Ok(QuestDifficulty::Elite));
        assert!("Cooking".parse::<QuestCategory>().is_err());
    }

    #[test]
    fn difficulty_orders_by_effort() {
        assert!(QuestDifficulty::Easy < QuestDifficulty::Elite);
        assert!(QuestDifficulty::Medium < QuestDifficulty::Hard);
    }
}
