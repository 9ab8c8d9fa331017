use chrono::{DateTime, Duration, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, ExerciseSession, ReadError};

#[allow(async_fn_in_trait)]
pub trait FitnessSessionService {
    async fn get_fitness_sessions(&self) -> Result<Vec<FitnessSession>, ReadError>;
    async fn save_fitness_session(
        &self,
        fitness_session: FitnessSession,
    ) -> Result<FitnessSession, CreateError>;
    async fn delete_fitness_session(
        &self,
        id: FitnessSessionID,
    ) -> Result<FitnessSessionID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait FitnessSessionRepository {
    async fn read_fitness_sessions(&self) -> Result<Vec<FitnessSession>, ReadError>;
    /// Stores the session, replacing an earlier version with the same ID.
    async fn save_fitness_session(
        &self,
        fitness_session: FitnessSession,
    ) -> Result<FitnessSession, CreateError>;
    async fn delete_fitness_session(
        &self,
        id: FitnessSessionID,
    ) -> Result<FitnessSessionID, DeleteError>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    #[default]
    Inactive,
    Active,
    Paused,
    Completed,
}

/// Clock state of a fitness session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    pub state: SessionState,
    pub start_time: Option<DateTime<Utc>>,
    pub paused_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub paused_accumulated: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitnessSession {
    pub id: FitnessSessionID,
    timing: SessionTiming,
    exercise_sessions: Vec<ExerciseSession>,
}

impl FitnessSession {
    #[must_use]
    pub fn new(id: FitnessSessionID) -> Self {
        Self {
            id,
            timing: SessionTiming::default(),
            exercise_sessions: vec![],
        }
    }

    #[must_use]
    pub fn with_timing(
        id: FitnessSessionID,
        timing: SessionTiming,
        exercise_sessions: Vec<ExerciseSession>,
    ) -> Self {
        Self {
            id,
            timing,
            exercise_sessions,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.timing.state
    }

    #[must_use]
    pub fn timing(&self) -> SessionTiming {
        self.timing
    }

    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.timing.start_time
    }

    #[must_use]
    pub fn paused_accumulated(&self) -> Duration {
        self.timing.paused_accumulated
    }

    #[must_use]
    pub fn exercise_sessions(&self) -> &[ExerciseSession] {
        &self.exercise_sessions
    }

    #[must_use]
    pub fn exercise(&self, index: usize) -> Option<&ExerciseSession> {
        self.exercise_sessions.get(index)
    }

    pub(crate) fn exercise_mut(&mut self, index: usize) -> Option<&mut ExerciseSession> {
        self.exercise_sessions.get_mut(index)
    }

    pub(crate) fn add_exercise(&mut self, exercise_session: ExerciseSession) -> usize {
        self.exercise_sessions.push(exercise_session);
        self.exercise_sessions.len() - 1
    }

    pub(crate) fn remove_exercise(&mut self, index: usize) -> Option<ExerciseSession> {
        if index < self.exercise_sessions.len() {
            Some(self.exercise_sessions.remove(index))
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.timing.state, SessionState::Active | SessionState::Paused)
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.timing.state != SessionState::Inactive || self.exercise_sessions.is_empty() {
            return false;
        }
        self.timing = SessionTiming {
            state: SessionState::Active,
            start_time: Some(now),
            paused_at: None,
            completed_at: None,
            paused_accumulated: Duration::zero(),
        };
        true
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> bool {
        if self.timing.state != SessionState::Active {
            return false;
        }
        self.timing.state = SessionState::Paused;
        self.timing.paused_at = Some(now);
        true
    }

    pub fn resume(&mut self, now: DateTime<Utc>) -> bool {
        if self.timing.state != SessionState::Paused {
            return false;
        }
        if let Some(paused_at) = self.timing.paused_at.take() {
            self.timing.paused_accumulated += (now - paused_at).max(Duration::zero());
        }
        self.timing.state = SessionState::Active;
        true
    }

    /// Abandons the session. Recorded exercises and sets are kept.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.timing = SessionTiming::default();
        true
    }

    pub fn complete(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_running() {
            return false;
        }
        self.timing.completed_at = Some(self.timing.paused_at.take().unwrap_or(now));
        self.timing.state = SessionState::Completed;
        true
    }

    /// Elapsed training time: advances only while active.
    #[must_use]
    pub fn duration(&self, now: DateTime<Utc>) -> Duration {
        let Some(start_time) = self.timing.start_time else {
            return Duration::zero();
        };
        let end = match self.timing.state {
            SessionState::Inactive => return Duration::zero(),
            SessionState::Active => now,
            SessionState::Paused => self.timing.paused_at.unwrap_or(now),
            SessionState::Completed => self.timing.completed_at.unwrap_or(now),
        };
        (end - start_time - self.timing.paused_accumulated).max(Duration::zero())
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessSessionID(Uuid);

impl FitnessSessionID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for FitnessSessionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for FitnessSessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
