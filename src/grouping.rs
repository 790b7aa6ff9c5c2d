use std::sync::LazyLock;

use regex::Regex;

use crate::plot_data::PlotData;

/// Number of panels in the pointing grid (2x2).
pub const GROUP_PANELS: usize = 4;

static GROUP_SLOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+) of (\d+)\)\s*$").expect("group slot pattern compiles"));

/// Parse a trailing "(N of M)" out of a scan description and return the
/// zero-based grid slot `N - 1`. Descriptions without the pattern (or with
/// N = 0) have no defined slot. The convention is upstream free text, so the
/// parse is best-effort by design of the data, not of this function.
pub fn parse_group_slot(description: &str) -> Option<usize> {
    let caps = GROUP_SLOT_RE.captures(description)?;
    let n: usize = caps[1].parse().ok()?;
    n.checked_sub(1)
}

/// Rolling history of grouped acquisitions, one entry per slotted scan.
///
/// Holds at most [`GROUP_PANELS`] entries. An insertion that would make a
/// fifth entry clears the whole buffer first; the buffer never evicts just
/// the oldest entry. Reset is driven by entry count alone, so two entries
/// can share a slot across reset cycles but never within one. The buffer
/// lives with the tab that displays it and is never persisted.
#[derive(Debug, Default)]
pub struct GroupLayoutTracker {
    entries: Vec<(usize, PlotData)>,
}

impl GroupLayoutTracker {
    pub fn insert(&mut self, slot: usize, entry: PlotData) {
        if self.entries.len() >= GROUP_PANELS {
            self.entries.clear();
        }
        self.entries.push((slot, entry));
    }

    /// The entry currently occupying `slot`, if any. Entries with slots
    /// outside `0..GROUP_PANELS` are never returned; they simply do not
    /// draw anywhere.
    pub fn entry_for_slot(&self, slot: usize) -> Option<&PlotData> {
        self.entries
            .iter()
            .rev()
            .find(|(s, _)| *s == slot)
            .map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> PlotData {
        PlotData::new(vec![0.0], vec![vec![1.0]], None, "Time", "Power", title)
    }

    #[test]
    fn test_parse_slot_from_description() {
        assert_eq!(parse_group_slot("Peak (2 of 4)"), Some(1));
        assert_eq!(parse_group_slot("Peak (1 of 4)"), Some(0));
        assert_eq!(parse_group_slot("Peak (4 of 4) "), Some(3));
    }

    #[test]
    fn test_parse_slot_without_pattern() {
        assert_eq!(parse_group_slot("Focus sweep"), None);
        assert_eq!(parse_group_slot("Peak (2 of 4) redo"), None);
        assert_eq!(parse_group_slot("Peak (0 of 4)"), None);
    }

    #[test]
    fn test_fifth_insert_resets_wholesale() {
        let mut tracker = GroupLayoutTracker::default();
        for slot in 0..4 {
            tracker.insert(slot, entry(&format!("scan {}", slot)));
        }
        assert_eq!(tracker.len(), 4);

        tracker.insert(1, entry("fresh cycle"));
        assert_eq!(tracker.len(), 1);
        assert!(tracker.entry_for_slot(0).is_none());
        assert_eq!(
            tracker.entry_for_slot(1).map(|e| e.title.as_str()),
            Some("fresh cycle")
        );
    }

    #[test]
    fn test_reset_counts_entries_not_slot_collisions() {
        // Out-of-range slots still count toward the reset threshold even
        // though they never draw.
        let mut tracker = GroupLayoutTracker::default();
        for _ in 0..4 {
            tracker.insert(7, entry("ungroupable"));
        }
        assert_eq!(tracker.len(), 4);
        assert!(tracker.entry_for_slot(0).is_none());

        tracker.insert(2, entry("visible"));
        assert_eq!(tracker.len(), 1);
        assert!(tracker.entry_for_slot(2).is_some());
    }

    #[test]
    fn test_out_of_range_slot_is_skipped_silently() {
        let mut tracker = GroupLayoutTracker::default();
        tracker.insert(9, entry("lost"));
        for slot in 0..GROUP_PANELS {
            assert!(tracker.entry_for_slot(slot).is_none());
        }
    }
}
