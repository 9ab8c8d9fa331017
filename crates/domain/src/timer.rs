use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::indexed::remove_index;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseTimer {
    Running { started_at: DateTime<Utc> },
    Paused { accumulated: Duration },
}

impl ExerciseTimer {
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        match self {
            ExerciseTimer::Running { started_at } => (now - *started_at).max(Duration::zero()),
            ExerciseTimer::Paused { accumulated } => *accumulated,
        }
    }
}

/// Per-exercise stopwatches, keyed by the position of the exercise in the session.
///
/// Elapsed time is always derived from the stored start time, never accumulated by ticks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExerciseTimerTracker {
    timers: BTreeMap<usize, ExerciseTimer>,
}

impl ExerciseTimerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<ExerciseTimer> {
        self.timers.get(&index).copied()
    }

    /// Starts the timer, continuing from the accumulated time if it was paused.
    pub fn start(&mut self, index: usize, now: DateTime<Utc>) -> bool {
        let started_at = match self.timers.get(&index) {
            Some(ExerciseTimer::Running { .. }) => return false,
            Some(ExerciseTimer::Paused { accumulated }) => now - *accumulated,
            None => now,
        };
        self.timers.insert(index, ExerciseTimer::Running { started_at });
        true
    }

    pub fn pause(&mut self, index: usize, now: DateTime<Utc>) -> bool {
        match self.timers.get_mut(&index) {
            Some(timer) if matches!(timer, ExerciseTimer::Running { .. }) => {
                *timer = ExerciseTimer::Paused {
                    accumulated: timer.elapsed(now),
                };
                true
            }
            _ => false,
        }
    }

    /// Pauses every running timer and returns the number of affected timers.
    pub fn pause_all(&mut self, now: DateTime<Utc>) -> usize {
        let mut count = 0;
        for timer in self.timers.values_mut() {
            if let ExerciseTimer::Running { .. } = timer {
                *timer = ExerciseTimer::Paused {
                    accumulated: timer.elapsed(now),
                };
                count += 1;
            }
        }
        count
    }

    pub fn stop(&mut self, index: usize) -> bool {
        self.timers.remove(&index).is_some()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    #[must_use]
    pub fn running_time(&self, index: usize, now: DateTime<Utc>) -> Duration {
        self.timers
            .get(&index)
            .map_or_else(Duration::zero, |timer| timer.elapsed(now))
    }

    #[must_use]
    pub fn is_running(&self, index: usize) -> bool {
        matches!(self.timers.get(&index), Some(ExerciseTimer::Running { .. }))
    }

    #[must_use]
    pub fn is_paused(&self, index: usize) -> bool {
        matches!(self.timers.get(&index), Some(ExerciseTimer::Paused { .. }))
    }

    #[must_use]
    pub fn any_running(&self) -> bool {
        self.timers
            .values()
            .any(|timer| matches!(timer, ExerciseTimer::Running { .. }))
    }

    pub fn remove_exercise(&mut self, index: usize) -> Option<ExerciseTimer> {
        remove_index(&mut self.timers, index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, ExerciseTimer)> {
        self.timers.iter().map(|(index, timer)| (*index, *timer))
    }
}

impl FromIterator<(usize, ExerciseTimer)> for ExerciseTimerTracker {
    fn from_iter<I: IntoIterator<Item = (usize, ExerciseTimer)>>(iter: I) -> Self {
        Self {
            timers: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn test_start_pause_resume() {
        let mut tracker = ExerciseTimerTracker::new();

        assert_eq!(tracker.running_time(0, at(0)), Duration::zero());
        assert!(tracker.start(0, at(0)));
        assert!(!tracker.start(0, at(5)));
        assert!(tracker.is_running(0));
        assert_eq!(tracker.running_time(0, at(10)), Duration::seconds(10));

        assert!(tracker.pause(0, at(10)));
        assert!(!tracker.pause(0, at(11)));
        assert!(tracker.is_paused(0));
        assert_eq!(tracker.running_time(0, at(100)), Duration::seconds(10));

        assert!(tracker.start(0, at(100)));
        assert_eq!(
            tracker.get(0),
            Some(ExerciseTimer::Running { started_at: at(90) })
        );
        assert_eq!(tracker.running_time(0, at(105)), Duration::seconds(15));
    }

    #[test]
    fn test_pause_all() {
        let mut tracker = ExerciseTimerTracker::new();
        tracker.start(0, at(0));
        tracker.start(1, at(20));
        tracker.start(2, at(0));
        tracker.pause(2, at(5));

        assert_eq!(tracker.pause_all(at(30)), 2);
        assert!(!tracker.any_running());
        assert_eq!(
            tracker.iter().collect::<Vec<_>>(),
            vec![
                (
                    0,
                    ExerciseTimer::Paused {
                        accumulated: Duration::seconds(30)
                    }
                ),
                (
                    1,
                    ExerciseTimer::Paused {
                        accumulated: Duration::seconds(10)
                    }
                ),
                (
                    2,
                    ExerciseTimer::Paused {
                        accumulated: Duration::seconds(5)
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_stop_and_clear() {
        let mut tracker = ExerciseTimerTracker::new();
        tracker.start(0, at(0));
        tracker.start(1, at(0));
        tracker.pause(1, at(3));

        assert!(tracker.stop(1));
        assert!(!tracker.stop(1));
        assert_eq!(tracker.running_time(1, at(10)), Duration::zero());

        tracker.clear();
        assert_eq!(tracker, ExerciseTimerTracker::new());
    }

    #[test]
    fn test_remove_exercise_shifts_indices() {
        let mut tracker = ExerciseTimerTracker::new();
        tracker.start(0, at(0));
        tracker.start(1, at(10));
        tracker.start(2, at(20));
        tracker.pause(2, at(25));

        assert_eq!(
            tracker.remove_exercise(1),
            Some(ExerciseTimer::Running { started_at: at(10) })
        );
        assert_eq!(
            tracker.get(0),
            Some(ExerciseTimer::Running { started_at: at(0) })
        );
        assert_eq!(
            tracker.get(1),
            Some(ExerciseTimer::Paused {
                accumulated: Duration::seconds(5)
            })
        );
        assert_eq!(tracker.get(2), None);
    }

    #[test]
    fn test_running_time_before_start() {
        let tracker = ExerciseTimerTracker::from_iter([(
            0,
            ExerciseTimer::Running { started_at: at(10) },
        )]);
        assert_eq!(tracker.running_time(0, at(5)), Duration::zero());
    }
}
