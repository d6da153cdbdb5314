//! One-shot "reveal on scroll" bookkeeping.
//!
//! The browser side feeds intersection reports in; the tracker decides which of
//! them flip a target to revealed. A target is revealed at most once and is no
//! longer watched afterwards.

use std::collections::HashSet;
use std::hash::Hash;

/// CSS class added to revealed targets.
pub const REVEALED_CLASS: &str = "revealed";

/// Browsers report the crossing ratio with some rounding; a report this close
/// below the threshold still counts.
const RATIO_SLACK: f64 = 1e-3;

#[derive(Debug, Clone)]
pub struct RevealTracker<K> {
    threshold: f64,
    watching: HashSet<K>,
    revealed: HashSet<K>,
}

impl<K: Eq + Hash + Clone> RevealTracker<K> {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            watching: HashSet::new(),
            revealed: HashSet::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start watching `id`. Already revealed targets are not re-armed.
    pub fn observe(&mut self, id: K) -> bool {
        if self.revealed.contains(&id) {
            return false;
        }
        self.watching.insert(id)
    }

    /// Handle one intersection report. Returns `true` exactly when this report
    /// reveals the target; the caller then applies the visual state and stops
    /// observing it.
    pub fn on_intersection(&mut self, id: &K, is_intersecting: bool, ratio: f64) -> bool {
        if !is_intersecting || ratio + RATIO_SLACK < self.threshold {
            return false;
        }
        if !self.watching.remove(id) {
            return false;
        }
        self.revealed.insert(id.clone());
        true
    }

    pub fn is_revealed(&self, id: &K) -> bool {
        self.revealed.contains(id)
    }

    pub fn pending(&self) -> usize {
        self.watching.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_target() {
        let mut tracker = RevealTracker::new(0.12);
        assert!(tracker.observe(1u32));
        assert!(tracker.observe(2u32));

        assert!(!tracker.on_intersection(&1, true, 0.05));
        assert!(!tracker.on_intersection(&1, false, 0.0));
        assert!(tracker.on_intersection(&1, true, 0.1199));
        for _ in 0..10 {
            assert!(!tracker.on_intersection(&1, true, 1.0));
        }
        assert!(tracker.is_revealed(&1));
        assert!(!tracker.is_revealed(&2));
        assert_eq!(tracker.pending(), 1);
    }

    #[test]
    fn revealed_targets_cannot_be_rearmed() {
        let mut tracker = RevealTracker::new(0.15);
        tracker.observe("hero");
        assert!(tracker.on_intersection(&"hero", true, 0.5));
        assert!(!tracker.observe("hero"));
        assert!(!tracker.on_intersection(&"hero", true, 0.5));
    }

    #[test]
    fn unknown_targets_are_ignored() {
        let mut tracker: RevealTracker<u32> = RevealTracker::new(0.1);
        assert!(!tracker.on_intersection(&9, true, 1.0));
        assert!(!tracker.is_revealed(&9));
    }
}
