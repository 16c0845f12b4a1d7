/// Bounded memory of recent matchups and recent songs.
///
/// The scheduler consults this to keep the same matchup from repeating
/// while it is still fresh and to keep individual songs from appearing in
/// back-to-back battles. Both bounds are FIFO: eviction follows insertion
/// order and entries are never touched again after being recorded.
use std::collections::{HashSet, VecDeque};

use crate::constants::{MAX_RECENT_PAIRS, RECENT_SONG_MEMORY, SONG_COOLDOWN};

/// Order-independent key for an unordered pair of song IDs: the two IDs
/// sorted lexicographically and joined, so `key(a, b) == key(b, a)`.
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}-{b}")
    } else {
        format!("{b}-{a}")
    }
}

#[derive(Debug, Default)]
pub struct RecencyTracker {
    /// Membership set for recent pair keys.
    pair_keys: HashSet<String>,
    /// The same keys in insertion order, for FIFO eviction.
    pair_order: VecDeque<String>,
    /// Song IDs in battle order, most recent last.
    recent_songs: VecDeque<String>,
}

impl RecencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this matchup is still in the recent-pair window.
    pub fn is_pair_recent(&self, key: &str) -> bool {
        self.pair_keys.contains(key)
    }

    /// Whether `id` battled within the last SONG_COOLDOWN appearances.
    pub fn is_on_cooldown(&self, id: &str) -> bool {
        self.recent_songs.iter().rev().take(SONG_COOLDOWN).any(|s| s == id)
    }

    /// Record an accepted matchup.
    ///
    /// Inserts the canonical pair key, evicting the oldest-inserted key once
    /// the set holds more than MAX_RECENT_PAIRS. Appends both songs to the
    /// recent sequence and trims it to RECENT_SONG_MEMORY entries. Never
    /// rolled back — the scheduler only records pairs it actually returns.
    pub fn record(&mut self, a: &str, b: &str) {
        let key = pair_key(a, b);
        if self.pair_keys.insert(key.clone()) {
            self.pair_order.push_back(key);
            if self.pair_order.len() > MAX_RECENT_PAIRS {
                if let Some(oldest) = self.pair_order.pop_front() {
                    self.pair_keys.remove(&oldest);
                }
            }
        }

        self.recent_songs.push_back(a.to_string());
        self.recent_songs.push_back(b.to_string());
        while self.recent_songs.len() > RECENT_SONG_MEMORY {
            self.recent_songs.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_is_order_independent() {
        assert_eq!(pair_key("abc", "xyz"), pair_key("xyz", "abc"));
        assert_eq!(pair_key("abc", "xyz"), "abc-xyz");
        assert_eq!(pair_key("track9", "track10"), pair_key("track10", "track9"));
    }

    #[test]
    fn test_recent_pair_membership() {
        let mut tracker = RecencyTracker::new();
        assert!(!tracker.is_pair_recent(&pair_key("a", "b")));

        tracker.record("a", "b");
        assert!(tracker.is_pair_recent(&pair_key("a", "b")));
        assert!(tracker.is_pair_recent(&pair_key("b", "a")));
        assert!(!tracker.is_pair_recent(&pair_key("a", "c")));
    }

    #[test]
    fn test_pair_set_evicts_oldest_past_bound() {
        let mut tracker = RecencyTracker::new();

        // 26 distinct pairs: (p0, q0) .. (p25, q25).
        for i in 0..26 {
            tracker.record(&format!("p{i}"), &format!("q{i}"));
        }

        assert!(!tracker.is_pair_recent(&pair_key("p0", "q0")));
        for i in 1..26 {
            assert!(
                tracker.is_pair_recent(&pair_key(&format!("p{i}"), &format!("q{i}"))),
                "pair {i} should still be recent"
            );
        }
    }

    #[test]
    fn test_rerecording_a_pair_keeps_its_original_slot() {
        let mut tracker = RecencyTracker::new();
        tracker.record("a", "b");
        for i in 0..24 {
            tracker.record(&format!("p{i}"), &format!("q{i}"));
        }
        // Set is at capacity. Re-recording (a, b) must not refresh its
        // insertion slot, so the next new pair still evicts it.
        tracker.record("a", "b");
        tracker.record("x", "y");

        assert!(!tracker.is_pair_recent(&pair_key("a", "b")));
        assert!(tracker.is_pair_recent(&pair_key("x", "y")));
    }

    #[test]
    fn test_cooldown_opens_and_closes() {
        let mut tracker = RecencyTracker::new();
        tracker.record("a", "b");
        assert!(tracker.is_on_cooldown("a"));
        assert!(tracker.is_on_cooldown("b"));

        // One more battle: "a" is now 3rd-from-last, still inside the window.
        tracker.record("c", "d");
        assert!(!tracker.is_on_cooldown("a"));
        assert!(tracker.is_on_cooldown("b"));
        assert!(tracker.is_on_cooldown("c"));
        assert!(tracker.is_on_cooldown("d"));
    }

    #[test]
    fn test_cooldown_expires_after_three_other_battles() {
        let mut tracker = RecencyTracker::new();
        tracker.record("a", "b");

        tracker.record("c", "d");
        tracker.record("e", "f");
        tracker.record("g", "h");

        assert!(!tracker.is_on_cooldown("a"));
        assert!(!tracker.is_on_cooldown("b"));
        assert!(tracker.is_on_cooldown("h"));
    }

    #[test]
    fn test_song_memory_trims_to_bound() {
        let mut tracker = RecencyTracker::new();
        for i in 0..40 {
            tracker.record(&format!("s{i}a"), &format!("s{i}b"));
        }
        assert_eq!(tracker.recent_songs.len(), RECENT_SONG_MEMORY);
        // Most recent entries survive the trim.
        assert!(tracker.is_on_cooldown("s39b"));
    }
}
