//! Leaderboard table: four fixed entries plus the current user.

use rand::Rng;
use serde::Serialize;

pub const FIXED_ENTRIES: [(&str, u32); 4] =
    [("Ayesha", 85), ("Ali", 90), ("Fatima", 78), ("Ahmed", 92)];

/// Inclusive range of the score handed to the current user on each render.
pub const USER_SCORE_RANGE: std::ops::RangeInclusive<u32> = 80..=100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    pub rows: Vec<LeaderboardRow>,
}

impl Leaderboard {
    /// Build a fresh table with a newly drawn score for `user_name`.
    ///
    /// A user sharing a name with a fixed entry replaces it. Rows are sorted by
    /// score descending; ties keep insertion order, which callers must not rely on.
    pub fn generate<R: Rng + ?Sized>(user_name: &str, rng: &mut R) -> Self {
        let user_score = rng.gen_range(USER_SCORE_RANGE);
        let mut rows: Vec<LeaderboardRow> = FIXED_ENTRIES
            .iter()
            .map(|(name, score)| LeaderboardRow {
                name: name.to_string(),
                score: *score,
            })
            .collect();

        match rows.iter_mut().find(|row| row.name == user_name) {
            Some(row) => row.score = user_score,
            None => rows.push(LeaderboardRow {
                name: user_name.to_string(),
                score: user_score,
            }),
        }

        rows.sort_by(|a, b| b.score.cmp(&a.score));
        Self { rows }
    }
}
