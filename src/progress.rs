//! Daily checklist and streak bookkeeping.
//!
//! The streak is session-scoped: it counts consecutive fully-completed
//! checklist cycles, not calendar days.

use serde::Serialize;

/// The daily tasks, in display order.
pub const CHECKLIST: [&str; 8] = [
    "✅ 1 hour of focused study",
    "📝 Reflection on today's learning",
    "🤝 Helped a peer",
    "🎥 Watched a growth mindset video",
    "🧩 Tried a new problem-solving approach",
    "📖 Read at least 10 pages of a book",
    "🌐 Explored new learning resources",
    "🗣️ Shared knowledge with someone",
];

pub const TASK_COUNT: usize = CHECKLIST.len();

/// Checkbox states for one render cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Checklist([bool; TASK_COUNT]);

impl Checklist {
    pub fn new(states: [bool; TASK_COUNT]) -> Self {
        Self(states)
    }

    /// Build from submitted checkbox states. Missing entries are unchecked;
    /// extra entries are ignored.
    pub fn from_states(states: &[bool]) -> Self {
        let mut out = [false; TASK_COUNT];
        for (slot, checked) in out.iter_mut().zip(states) {
            *slot = *checked;
        }
        Self(out)
    }

    /// Build from checked task indices. Returns the first out-of-range index as error.
    pub fn from_indices(indices: &[usize]) -> Result<Self, usize> {
        let mut out = [false; TASK_COUNT];
        for &idx in indices {
            *out.get_mut(idx).ok_or(idx)? = true;
        }
        Ok(Self(out))
    }

    pub fn states(&self) -> [bool; TASK_COUNT] {
        self.0
    }

    pub fn completed(&self) -> usize {
        self.0.iter().filter(|checked| **checked).count()
    }

    /// Completion as a truncated integer percentage.
    pub fn percentage(&self) -> u8 {
        (self.completed() * 100 / TASK_COUNT) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.completed() == TASK_COUNT
    }
}

/// Apply one interaction cycle to the streak.
pub fn next_streak(previous: u32, all_complete: bool) -> u32 {
    if all_complete {
        previous.saturating_add(1)
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Progress {
    pub checklist: Checklist,
    pub streak: u32,
}

impl Progress {
    /// Run one cycle against the current checklist and return the new streak.
    pub fn advance(&mut self) -> u32 {
        self.streak = next_streak(self.streak, self.checklist.is_complete());
        self.streak
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            checked: self.checklist.states().to_vec(),
            completed: self.checklist.completed(),
            total: TASK_COUNT,
            percentage: self.checklist.percentage(),
            streak: self.streak,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    pub checked: Vec<bool>,
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
    pub streak: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_truncated_for_every_subset() {
        for mask in 0u32..(1 << TASK_COUNT) {
            let mut states = [false; TASK_COUNT];
            for (i, slot) in states.iter_mut().enumerate() {
                *slot = mask & (1 << i) != 0;
            }
            let checklist = Checklist::new(states);
            let count = mask.count_ones() as usize;
            assert_eq!(checklist.completed(), count);
            assert_eq!(checklist.percentage() as usize, count * 100 / 8);
        }
    }

    #[test]
    fn tasks_keep_their_icons() {
        assert_eq!(CHECKLIST[0], "✅ 1 hour of focused study");
        assert_eq!(CHECKLIST[7], "🗣️ Shared knowledge with someone");
        assert!(CHECKLIST.iter().all(|task| !task.is_ascii()));
    }

    #[test]
    fn three_of_eight_is_37_percent() {
        let checklist = Checklist::from_indices(&[0, 3, 7]).unwrap();
        assert_eq!(checklist.percentage(), 37);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert_eq!(Checklist::from_indices(&[1, 8]), Err(8));
    }

    #[test]
    fn from_states_pads_missing_entries() {
        let checklist = Checklist::from_states(&[true, true]);
        assert_eq!(checklist.completed(), 2);
        assert!(!checklist.is_complete());
    }

    #[test]
    fn streak_increments_and_resets() {
        assert_eq!(next_streak(0, true), 1);
        assert_eq!(next_streak(4, true), 5);
        assert_eq!(next_streak(4, false), 0);
        assert_eq!(next_streak(0, false), 0);
        assert_eq!(next_streak(u32::MAX, true), u32::MAX);
    }

    #[test]
    fn advance_counts_full_cycles() {
        let mut progress = Progress::default();
        progress.checklist = Checklist::new([true; TASK_COUNT]);
        assert_eq!(progress.advance(), 1);
        assert_eq!(progress.advance(), 2);
        progress.checklist = Checklist::from_indices(&[0]).unwrap();
        assert_eq!(progress.advance(), 0);
        assert_eq!(progress.snapshot().percentage, 12);
    }
}
