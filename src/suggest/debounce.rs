use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct PendingFetch {
    query: String,
    due_at: Instant,
}

/// Outcome of feeding one input change into the debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    /// Query too short; suggestions must be cleared immediately.
    TooShort,
    /// A fetch was armed for the end of the quiet period.
    Armed,
}

/// Single-slot quiet-period timer. Arming always replaces the previous
/// slot, so at most one fetch signal is ever pending. The due query is
/// the one captured at arm time, not re-read when the timer fires.
pub struct Debouncer {
    quiet_period: Duration,
    min_query_len: usize,
    pending: Option<PendingFetch>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration, min_query_len: usize) -> Self {
        Self {
            quiet_period,
            min_query_len,
            pending: None,
        }
    }

    /// Feeds a raw input change. The caller passes the already-trimmed
    /// query text.
    pub fn note_input(&mut self, query: &str, now: Instant) -> InputDisposition {
        self.pending = None;
        if query.chars().count() < self.min_query_len {
            return InputDisposition::TooShort;
        }
        self.pending = Some(PendingFetch {
            query: query.to_string(),
            due_at: now + self.quiet_period,
        });
        InputDisposition::Armed
    }

    /// Drops any pending slot without emitting a fetch.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Takes the pending query if its quiet period has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        let due = self.pending.as_ref().is_some_and(|p| p.due_at <= now);
        if !due {
            return None;
        }
        self.pending.take().map(|p| p.query)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due_at)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> Debouncer {
        Debouncer::new(Duration::from_millis(250), 2)
    }

    #[test]
    fn short_query_clears_and_schedules_nothing() {
        let mut d = debouncer();
        let now = Instant::now();
        assert_eq!(d.note_input("", now), InputDisposition::TooShort);
        assert_eq!(d.note_input("p", now), InputDisposition::TooShort);
        assert!(!d.is_pending());
        assert_eq!(d.take_due(now + Duration::from_secs(1)), None);
    }

    #[test]
    fn short_query_drops_a_previously_armed_fetch() {
        let mut d = debouncer();
        let now = Instant::now();
        assert_eq!(d.note_input("pump", now), InputDisposition::Armed);
        assert_eq!(d.note_input("p", now), InputDisposition::TooShort);
        assert_eq!(d.take_due(now + Duration::from_secs(1)), None);
    }

    #[test]
    fn fetch_is_due_only_after_the_quiet_period() {
        let mut d = debouncer();
        let now = Instant::now();
        d.note_input("pump", now);
        assert_eq!(d.take_due(now + Duration::from_millis(100)), None);
        assert!(d.is_pending());
        assert_eq!(
            d.take_due(now + Duration::from_millis(250)),
            Some("pump".to_string())
        );
        assert!(!d.is_pending());
    }

    #[test]
    fn rapid_burst_keeps_only_the_final_query() {
        let mut d = debouncer();
        let mut now = Instant::now();
        for query in ["pu", "pum", "pump"] {
            d.note_input(query, now);
            now += Duration::from_millis(50);
        }
        // Nothing fired during the burst.
        assert_eq!(d.take_due(now), None);
        assert_eq!(
            d.take_due(now + Duration::from_millis(250)),
            Some("pump".to_string())
        );
        assert_eq!(d.take_due(now + Duration::from_secs(1)), None);
    }

    #[test]
    fn deadline_tracks_the_latest_arm() {
        let mut d = debouncer();
        let now = Instant::now();
        d.note_input("pu", now);
        let later = now + Duration::from_millis(120);
        d.note_input("pum", later);
        assert_eq!(d.next_deadline(), Some(later + Duration::from_millis(250)));
    }
}
