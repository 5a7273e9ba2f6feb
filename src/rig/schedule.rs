use serde::{Deserialize, Serialize};

use crate::errors::{MocamError, Result};

/// Timing of the transition into one target.
///
/// `load_frames` is the travel time from the previous target, `stay_frames`
/// the time spent holding at this target before the next departure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionEntry {
    pub load_frames: f32,
    pub stay_frames: f32,
}

impl TransitionEntry {
    #[must_use]
    pub fn new(load_frames: f32, stay_frames: f32) -> Self {
        Self {
            load_frames: load_frames.max(0.0),
            stay_frames: stay_frames.max(0.0),
        }
    }

    /// Length of the whole `[load][stay]` segment.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.load_frames.max(0.0) + self.stay_frames.max(0.0)
    }
}

/// Per-target transition timings, indexed in parallel with the target list.
///
/// The schedule grows on demand and never shrinks, so timings edited by the
/// user stay attached to their slot position even when targets come and go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionSchedule {
    entries: Vec<TransitionEntry>,
    default_entry: TransitionEntry,
}

impl TransitionSchedule {
    #[must_use]
    pub fn new(default_entry: TransitionEntry) -> Self {
        Self {
            entries: Vec::new(),
            default_entry,
        }
    }

    #[must_use]
    pub fn from_entries(entries: Vec<TransitionEntry>, default_entry: TransitionEntry) -> Self {
        Self {
            entries,
            default_entry,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[TransitionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn default_entry(&self) -> TransitionEntry {
        self.default_entry
    }

    /// Grows the schedule until it holds at least `len` entries.
    ///
    /// The very first entry ever created gets `load_frames = 0`: the first
    /// target has nothing to travel from.
    pub fn ensure_len(&mut self, len: usize) {
        while self.entries.len() < len {
            let mut entry = self.default_entry;
            if self.entries.is_empty() {
                entry.load_frames = 0.0;
            }
            self.entries.push(entry);
        }
    }

    /// Mutable access to the entry for target `index`, growing as needed.
    pub fn entry_for(&mut self, index: usize) -> &mut TransitionEntry {
        self.ensure_len(index + 1);
        &mut self.entries[index]
    }

    /// Read-only access; `None` when the schedule has not grown that far.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TransitionEntry> {
        self.entries.get(index)
    }

    /// Overwrites the timing of an existing entry. Negative values clamp to zero.
    pub fn set(&mut self, index: usize, entry: TransitionEntry) -> Result<()> {
        let len = self.entries.len();
        let slot = self.entries.get_mut(index).ok_or(MocamError::InvalidIndex {
            context: "set transition",
            index,
            len,
        })?;
        *slot = TransitionEntry::new(entry.load_frames, entry.stay_frames);
        Ok(())
    }

    /// Total frames covered by the first `count` entries.
    #[must_use]
    pub fn total_frames(&self, count: usize) -> f32 {
        self.entries.iter().take(count).map(TransitionEntry::duration).sum()
    }
}

impl Default for TransitionSchedule {
    fn default() -> Self {
        Self::new(TransitionEntry::new(20.0, 20.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_entry_has_no_load() {
        let mut schedule = TransitionSchedule::new(TransitionEntry::new(12.0, 3.0));
        schedule.entry_for(2);

        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.entries()[0], TransitionEntry::new(0.0, 3.0));
        assert_eq!(schedule.entries()[1], TransitionEntry::new(12.0, 3.0));
        assert_eq!(schedule.entries()[2], TransitionEntry::new(12.0, 3.0));
    }

    #[test]
    fn test_growth_keeps_edits() {
        let mut schedule = TransitionSchedule::default();
        schedule.entry_for(1).load_frames = 5.0;
        schedule.entry_for(4);

        assert_eq!(schedule.len(), 5);
        assert_eq!(schedule.entries()[1].load_frames, 5.0);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut schedule = TransitionSchedule::default();
        assert!(schedule.set(0, TransitionEntry::new(1.0, 1.0)).is_err());
    }
}
