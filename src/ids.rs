// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Resource ids.
//!
//! A resource id is the wall-clock time of its last Create or Update in
//! nanoseconds since the Unix epoch. Two calls inside the same nanosecond (or a
//! clock step backwards) would otherwise repeat an id, so the generator never
//! hands out a value less than or equal to the previous one.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Strictly increasing nanosecond timestamps.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Next id: the current time in nanoseconds, bumped past the previous id if needed.
    pub fn next_id(&self) -> i64 {
        let now = now_nanos();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }

    /// [`next_id`](Self::next_id) rendered the way it is stored in state.
    pub fn next_id_string(&self) -> String {
        self.next_id().to_string()
    }
}

/// Current time in nanoseconds since the epoch.
///
/// Falls back to microsecond precision outside the range `i64` nanoseconds can
/// represent (after the year 2262).
fn now_nanos() -> i64 {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000))
}

#[cfg(test)]
mod tests {
    use super::IdGenerator;
    use std::sync::Arc;

    #[test]
    fn test_ids_are_positive() {
        let ids = IdGenerator::new();
        assert!(ids.next_id() > 0);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let ids = IdGenerator::new();
        let mut prev = ids.next_id();
        for _ in 0..10_000 {
            let next = ids.next_id();
            assert!(next > prev, "{next} should be greater than {prev}");
            prev = next;
        }
    }

    #[test]
    fn test_ids_unique_across_threads() {
        let ids = Arc::new(IdGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..1_000).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    #[test]
    fn test_id_string_is_numeric() {
        let ids = IdGenerator::new();
        let id: i64 = ids.next_id_string().parse().unwrap();
        assert!(id > 0);
    }
}
