//! Deadline scheduling for spawns and status expiry
//!
//! Deadlines live in a min-heap keyed by simulated time and are polled once
//! per tick. Nothing fires asynchronously.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::entity::{ActiveStatus, StatusKind};

/// Something due at a point in simulated time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    SpawnBall,
    StatusExpire(StatusKind),
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    due: f64,
    /// Insertion order, breaks ties between equal deadlines
    seq: u64,
    event: TimerEvent,
}

impl PartialEq for Deadline {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Deadline {}

impl PartialOrd for Deadline {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Deadline {
    // Reversed so the BinaryHeap pops the earliest deadline first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of pending deadlines
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    heap: BinaryHeap<Deadline>,
    next_seq: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `event` to fire at simulated time `due`
    pub fn arm(&mut self, due: f64, event: TimerEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Deadline { due, seq, event });
    }

    /// Pop the earliest deadline at or before `now`
    pub fn pop_due(&mut self, now: f64) -> Option<(f64, TimerEvent)> {
        if self.heap.peek()?.due <= now {
            self.heap.pop().map(|d| (d.due, d.event))
        } else {
            None
        }
    }

    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|d| d.due)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Decide whether an expiry deadline for `kind` should clear `current`.
///
/// Clears only when the same status is still active and `now` has reached
/// `since + duration - epsilon`. Deadlines armed by an earlier application
/// that was since overwritten or refreshed fall through harmlessly.
///
/// The deadline is built from the same `since + duration` sum, so a deadline
/// that fires on time always clears its own status, even with zero epsilon.
pub fn should_expire(
    current: Option<ActiveStatus>,
    kind: StatusKind,
    now: f64,
    duration: f64,
    epsilon: f64,
) -> bool {
    match current {
        Some(status) => status.kind == kind && now >= status.since + duration - epsilon,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_deadline_order() {
        let mut schedule = Schedule::new();
        schedule.arm(3.0, TimerEvent::SpawnBall);
        schedule.arm(1.0, TimerEvent::StatusExpire(StatusKind::Frozen));
        schedule.arm(2.0, TimerEvent::StatusExpire(StatusKind::Godlike));

        assert_eq!(schedule.pop_due(0.5), None);
        assert_eq!(
            schedule.pop_due(10.0),
            Some((1.0, TimerEvent::StatusExpire(StatusKind::Frozen)))
        );
        assert_eq!(
            schedule.pop_due(10.0),
            Some((2.0, TimerEvent::StatusExpire(StatusKind::Godlike)))
        );
        assert_eq!(schedule.pop_due(10.0), Some((3.0, TimerEvent::SpawnBall)));
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_equal_deadlines_pop_in_arm_order() {
        let mut schedule = Schedule::new();
        schedule.arm(1.0, TimerEvent::StatusExpire(StatusKind::Godlike));
        schedule.arm(1.0, TimerEvent::SpawnBall);
        assert_eq!(
            schedule.pop_due(1.0).map(|(_, e)| e),
            Some(TimerEvent::StatusExpire(StatusKind::Godlike))
        );
        assert_eq!(schedule.pop_due(1.0).map(|(_, e)| e), Some(TimerEvent::SpawnBall));
    }

    #[test]
    fn test_next_due_peeks_without_popping() {
        let mut schedule = Schedule::new();
        assert_eq!(schedule.next_due(), None);
        schedule.arm(4.0, TimerEvent::SpawnBall);
        assert_eq!(schedule.next_due(), Some(4.0));
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_expiry_requires_matching_status() {
        let godlike = Some(ActiveStatus {
            kind: StatusKind::Godlike,
            since: 0.0,
        });
        assert!(should_expire(godlike, StatusKind::Godlike, 4.0, 4.0, 0.01));
        assert!(!should_expire(godlike, StatusKind::Frozen, 4.0, 2.0, 0.01));
        assert!(!should_expire(None, StatusKind::Godlike, 4.0, 4.0, 0.01));
    }

    #[test]
    fn test_stale_deadline_ignored_after_refresh() {
        // Godlike applied at 0, refreshed at 3: the deadline armed for 4
        // must not end the refreshed status
        let refreshed = Some(ActiveStatus {
            kind: StatusKind::Godlike,
            since: 3.0,
        });
        assert!(!should_expire(refreshed, StatusKind::Godlike, 4.0, 4.0, 0.01));
        assert!(should_expire(refreshed, StatusKind::Godlike, 7.0, 4.0, 0.01));
    }

    #[test]
    fn test_on_time_deadline_clears_with_zero_epsilon() {
        // Application times as they accumulate tick by tick
        let dt = 1.0 / 24.0;
        let mut since = 0.0f64;
        for _ in 0..5000 {
            since += dt;
            let status = Some(ActiveStatus {
                kind: StatusKind::Frozen,
                since,
            });
            let due = since + 2.0;
            assert!(should_expire(status, StatusKind::Frozen, due, 2.0, 0.0), "since {since}");
        }
    }

    #[test]
    fn test_epsilon_tolerates_early_fire() {
        let frozen = Some(ActiveStatus {
            kind: StatusKind::Frozen,
            since: 1.0,
        });
        assert!(should_expire(frozen, StatusKind::Frozen, 2.995, 2.0, 0.01));
        assert!(!should_expire(frozen, StatusKind::Frozen, 2.98, 2.0, 0.01));
    }
}
