//! Identifier generation for stored records.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues `{prefix}_{n}` identifiers where `n` tracks the Unix time in seconds.
///
/// Two ids requested within the same second would share a timestamp, so `n` is
/// bumped past the last issued value instead; ids stay strictly increasing and
/// never collide within one process.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: &'static str,
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            last: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self) -> String {
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
        self.next_at(now)
    }

    pub(crate) fn next_at(&self, now_secs: u64) -> String {
        let previous = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_secs.max(last + 1))
            }) {
            Ok(prev) | Err(prev) => prev,
        };
        format!("{}_{}", self.prefix, now_secs.max(previous + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_uses_timestamp_when_free() {
        let ids = IdGenerator::new("session");
        assert_eq!(ids.next_at(1_700_000_000), "session_1700000000");
        assert_eq!(ids.next_at(1_700_000_005), "session_1700000005");
    }

    #[test]
    fn test_same_second_does_not_collide() {
        let ids = IdGenerator::new("content");
        assert_eq!(ids.next_at(42), "content_42");
        assert_eq!(ids.next_at(42), "content_43");
        assert_eq!(ids.next_at(40), "content_44");
    }

    #[test]
    fn test_shape_is_prefix_and_digits() {
        let id = IdGenerator::new("session").next_id();
        let digits = id.strip_prefix("session_").unwrap();
        assert!(!digits.is_empty());
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_unique_across_threads() {
        let ids = Arc::new(IdGenerator::new("session"));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..100).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 800);
    }
}
