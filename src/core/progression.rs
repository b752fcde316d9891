/// Progression rules - experience to level arithmetic and daily quest sampling.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::schema::quest::Quest;

/// Experience needed per level. Levels are flat: every level costs the same.
pub const XP_PER_LEVEL: u64 = 100;

/// Highest experience total a character can accumulate: the last point
/// before the level would exceed `u32::MAX`.
pub const MAX_EXPERIENCE: u64 = u32::MAX as u64 * XP_PER_LEVEL - 1;

/// Number of quests offered per day unless configured otherwise.
pub const DEFAULT_DAILY_QUEST_COUNT: usize = 5;

/// Level for a given experience total: `floor(experience / 100) + 1`.
pub fn calculate_level(experience: u64) -> u32 {
    let level = experience / XP_PER_LEVEL + 1;
    u32::try_from(level).unwrap_or(u32::MAX)
}

/// Experience still missing before the next level. Always in `1..=100`.
///
/// Equals `calculate_level(experience) * 100 - experience` for every total
/// up to `MAX_EXPERIENCE`. Larger totals (only reachable through an edited
/// save) still yield the distance to the next 100 boundary.
pub fn experience_to_next_level(experience: u64) -> u64 {
    XP_PER_LEVEL - experience % XP_PER_LEVEL
}

/// Percentage of the current level already earned.
pub fn level_progress(experience: u64) -> u8 {
    // XP_PER_LEVEL is 100, so the remainder is already a percentage
    ((experience % XP_PER_LEVEL) * 100 / XP_PER_LEVEL) as u8
}

/// Pick `count` distinct quests uniformly at random.
///
/// Shuffles a copy of the whole pool and keeps the first `count`. When
/// `count` exceeds the pool size the entire (shuffled) pool is returned.
/// Pass a seeded `StdRng` for a reproducible selection.
pub fn sample_daily_quests<R: Rng + ?Sized>(
    pool: &[Quest],
    count: usize,
    rng: &mut R,
) -> Vec<Quest> {
    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::quest::{QuestCategory, QuestDifficulty, QuestId, QuestRewards};
    use crate::schema::stats::StatBonus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn make_pool(n: usize) -> Vec<Quest> {
        (0..n)
            .map(|i| Quest {
                id: QuestId(format!("quest_{:03}", i)),
                title: format!("Quest {}", i),
                description: String::new(),
                category: QuestCategory::Fitness,
                difficulty: QuestDifficulty::Easy,
                rewards: QuestRewards {
                    experience: 50,
                    stat_points: 1,
                },
                time_estimate: "10 minutes".to_string(),
                stat_bonus: StatBonus::default(),
            })
            .collect()
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(experience_to_next_level(0), 100);
        assert_eq!(calculate_level(99), 1);
        assert_eq!(experience_to_next_level(99), 1);
        assert_eq!(calculate_level(100), 2);
        assert_eq!(experience_to_next_level(100), 100);
        assert_eq!(calculate_level(110), 2);
        assert_eq!(experience_to_next_level(110), 90);
    }

    #[test]
    fn level_formula_holds_over_range() {
        for e in 0..5_000u64 {
            assert_eq!(calculate_level(e) as u64, e / 100 + 1);
            let remaining = experience_to_next_level(e);
            assert!(remaining <= 100, "remaining {} for {}", remaining, e);
            assert!(remaining >= 1);
        }
    }

    #[test]
    fn level_fields_agree_up_to_the_cap() {
        for e in [MAX_EXPERIENCE - 250, MAX_EXPERIENCE - 1, MAX_EXPERIENCE] {
            let level = calculate_level(e) as u64;
            assert_eq!(experience_to_next_level(e), level * XP_PER_LEVEL - e, "{}", e);
        }
        assert_eq!(calculate_level(MAX_EXPERIENCE), u32::MAX);
        assert_eq!(experience_to_next_level(MAX_EXPERIENCE), 1);
    }

    #[test]
    fn huge_totals_do_not_overflow() {
        assert_eq!(calculate_level(u64::MAX), u32::MAX);
        let remaining = experience_to_next_level(u64::MAX);
        assert!((1..=100).contains(&remaining));
        assert_eq!(level_progress(u64::MAX), (u64::MAX % 100) as u8);
    }

    #[test]
    fn level_progress_is_remainder() {
        assert_eq!(level_progress(0), 0);
        assert_eq!(level_progress(145), 45);
        assert_eq!(level_progress(200), 0);
    }

    #[test]
    fn sample_returns_distinct_pool_members() {
        let pool = make_pool(30);
        let mut rng = StdRng::seed_from_u64(7);
        let sample = sample_daily_quests(&pool, 5, &mut rng);
        assert_eq!(sample.len(), 5);

        let ids: HashSet<&QuestId> = sample.iter().map(|q| &q.id).collect();
        assert_eq!(ids.len(), 5);
        for quest in &sample {
            assert!(pool.contains(quest));
        }
    }

    #[test]
    fn sample_larger_than_pool_returns_everything() {
        let pool = make_pool(3);
        let mut rng = StdRng::seed_from_u64(7);
        let sample = sample_daily_quests(&pool, 10, &mut rng);
        assert_eq!(sample.len(), 3);
    }

    #[test]
    fn sample_deterministic_same_seed() {
        let pool = make_pool(30);
        let a = sample_daily_quests(&pool, 5, &mut StdRng::seed_from_u64(42));
        let b = sample_daily_quests(&pool, 5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn sample_varies_across_seeds() {
        let pool = make_pool(30);
        let first = sample_daily_quests(&pool, 5, &mut StdRng::seed_from_u64(1));
        let found_different = (2..50u64)
            .any(|seed| sample_daily_quests(&pool, 5, &mut StdRng::seed_from_u64(seed)) != first);
        assert!(found_different, "Expected different samples with different seeds");
    }
}
