use std::{
    fmt::{self, Display},
    ops::{Add, AddAssign},
};

use chrono::Duration;

use crate::{SetInput, SetRecord};

pub const NO_SETS_COMPLETED: &str = "No sets completed";

/// Live totals of an exercise, combining committed sets with valid draft rows.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ExerciseSummary {
    pub sets: u32,
    pub reps: u32,
    pub volume: f32,
    pub time: f32,
    pub distance: f32,
}

impl ExerciseSummary {
    #[must_use]
    pub fn new(records: &[SetRecord], drafts: &[SetInput]) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.add_set(record);
        }
        for draft in drafts.iter().filter(|d| d.is_valid()) {
            summary.add_set(&draft.parse());
        }
        summary
    }

    fn add_set(&mut self, record: &SetRecord) {
        self.sets += 1;
        if let Some(reps) = record.reps {
            self.reps += u32::from(reps);
        }
        if let Some(volume) = record.volume() {
            self.volume += volume;
        }
        if let Some(time) = record.time {
            self.time += f32::from(time);
        }
        if let Some(distance) = record.distance {
            self.distance += f32::from(distance);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets == 0
    }
}

impl Add for ExerciseSummary {
    type Output = ExerciseSummary;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            sets: self.sets + rhs.sets,
            reps: self.reps + rhs.reps,
            volume: self.volume + rhs.volume,
            time: self.time + rhs.time,
            distance: self.distance + rhs.distance,
        }
    }
}

impl AddAssign for ExerciseSummary {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Display for ExerciseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{NO_SETS_COMPLETED}");
        }

        let mut parts = vec![];
        if self.sets > 0 {
            parts.push(if self.sets == 1 {
                "1 set".to_string()
            } else {
                format!("{} sets", self.sets)
            });
        }
        if self.reps > 0 {
            parts.push(format!("{} reps", self.reps));
        }
        if self.volume > 0.0 {
            parts.push(format!("{} volume", format_number(self.volume)));
        }
        if self.time > 0.0 {
            parts.push(format_time(self.time));
        }
        if self.distance > 0.0 {
            parts.push(format!("{} distance", format_number(self.distance)));
        }
        write!(f, "{}", parts.join(" • "))
    }
}

/// Totals over all exercises of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub exercises: Vec<ExerciseSummary>,
    pub total: ExerciseSummary,
    pub duration: Duration,
}

impl SessionSummary {
    #[must_use]
    pub fn new(exercises: Vec<ExerciseSummary>, duration: Duration) -> Self {
        let total = exercises
            .iter()
            .fold(ExerciseSummary::default(), |total, summary| total + *summary);
        Self {
            exercises,
            total,
            duration,
        }
    }
}

/// `M:SS` from one minute on, `Ns` below.
#[must_use]
pub fn format_time(seconds: f32) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let seconds = seconds.max(0.0).round() as u64;
    if seconds >= 60 {
        format!("{}:{:02}", seconds / 60, seconds % 60)
    } else {
        format!("{seconds}s")
    }
}

/// `H:MM:SS` for the session clock.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.num_seconds().max(0);
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

fn format_number(value: f32) -> String {
    if value.fract().abs() < f32::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
