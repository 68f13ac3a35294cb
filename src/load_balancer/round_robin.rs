//! Round-robin load balancing strategy.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::load_balancer::LoadBalancer;

/// Round-robin selector.
/// Stores an internal cursor to rotate through pool positions.
#[derive(Debug, Default)]
pub struct RoundRobin {
    cursor: AtomicUsize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LoadBalancer for RoundRobin {
    fn next_index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        // Single CAS update: the cursor is always stored already wrapped,
        // so concurrent callers observe a strict cyclic sequence.
        let current = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| Some((c + 1) % len))
            .unwrap_or_else(|c| c);
        Some(current % len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_round_robin() {
        let lb = RoundRobin::new();

        assert_eq!(lb.next_index(2), Some(0));
        assert_eq!(lb.next_index(2), Some(1));
        assert_eq!(lb.next_index(2), Some(0));
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let lb = RoundRobin::new();
        assert_eq!(lb.next_index(0), None);
        assert_eq!(lb.next_index(3), Some(0));
    }

    #[test]
    fn cursor_wraps_at_pool_boundary() {
        let lb = RoundRobin::new();
        let seen: Vec<_> = (0..6).filter_map(|_| lb.next_index(5)).collect();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 0]);
    }

    #[test]
    fn concurrent_callers_share_one_cycle() {
        let lb = Arc::new(RoundRobin::new());
        let pool = 3;
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lb = lb.clone();
                std::thread::spawn(move || {
                    (0..250).map(|_| lb.next_index(pool).unwrap()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut counts = [0usize; 3];
        for h in handles {
            for idx in h.join().unwrap() {
                counts[idx] += 1;
            }
        }

        // 1000 calls over 3 slots: each slot is hit 333 or 334 times.
        for c in counts {
            assert!(c == 333 || c == 334, "uneven distribution: {counts:?}");
        }
        assert_eq!(counts.iter().sum::<usize>(), 1000);
    }
}
