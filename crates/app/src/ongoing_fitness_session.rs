use chrono::{DateTime, Duration, Utc};
use fitlog_domain::{
    ExerciseSession, ExerciseTimer, FitnessSession, SessionSnapshot, SessionState, SessionTiming,
    SetInput,
};

#[allow(async_fn_in_trait)]
pub trait OngoingFitnessSessionService {
    async fn get_ongoing_fitness_session(&self) -> Result<Option<OngoingFitnessSession>, String>;
    async fn set_ongoing_fitness_session(
        &self,
        ongoing_fitness_session: Option<OngoingFitnessSession>,
    ) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait OngoingFitnessSessionRepository {
    async fn read_ongoing_fitness_session(&self) -> Result<Option<OngoingFitnessSession>, String>;
    async fn write_ongoing_fitness_session(
        &self,
        ongoing_fitness_session: Option<OngoingFitnessSession>,
    ) -> Result<(), String>;
}

/// Stored form of a session that has not been completed yet.
///
/// Durations are stored in milliseconds.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct OngoingFitnessSession {
    pub fitness_session_id: u128,
    pub state: SessionState,
    pub start_time: Option<DateTime<Utc>>,
    pub paused_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub paused_accumulated: i64,
    pub exercise_sessions: Vec<ExerciseSession>,
    pub timers: Vec<(usize, TimerState)>,
    pub inputs: Vec<(usize, Vec<SetInput>)>,
    pub saved: bool,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running { started_at: DateTime<Utc> },
    Paused { time: i64 },
}

impl From<ExerciseTimer> for TimerState {
    fn from(value: ExerciseTimer) -> Self {
        match value {
            ExerciseTimer::Running { started_at } => TimerState::Running { started_at },
            ExerciseTimer::Paused { accumulated } => TimerState::Paused {
                time: accumulated.num_milliseconds(),
            },
        }
    }
}

impl From<TimerState> for ExerciseTimer {
    fn from(value: TimerState) -> Self {
        match value {
            TimerState::Running { started_at } => ExerciseTimer::Running { started_at },
            TimerState::Paused { time } => ExerciseTimer::Paused {
                accumulated: Duration::milliseconds(time),
            },
        }
    }
}

impl From<&SessionSnapshot> for OngoingFitnessSession {
    fn from(value: &SessionSnapshot) -> Self {
        let timing = value.fitness_session.timing();
        Self {
            fitness_session_id: value.fitness_session.id.as_u128(),
            state: timing.state,
            start_time: timing.start_time,
            paused_at: timing.paused_at,
            completed_at: timing.completed_at,
            paused_accumulated: timing.paused_accumulated.num_milliseconds(),
            exercise_sessions: value.fitness_session.exercise_sessions().to_vec(),
            timers: value
                .timers
                .iter()
                .map(|(index, timer)| (index, timer.into()))
                .collect(),
            inputs: value
                .inputs
                .iter()
                .map(|(index, rows)| (index, rows.to_vec()))
                .collect(),
            saved: value.saved,
        }
    }
}

impl From<OngoingFitnessSession> for SessionSnapshot {
    fn from(value: OngoingFitnessSession) -> Self {
        Self {
            fitness_session: FitnessSession::with_timing(
                value.fitness_session_id.into(),
                SessionTiming {
                    state: value.state,
                    start_time: value.start_time,
                    paused_at: value.paused_at,
                    completed_at: value.completed_at,
                    paused_accumulated: Duration::milliseconds(value.paused_accumulated),
                },
                value.exercise_sessions,
            ),
            timers: value
                .timers
                .into_iter()
                .map(|(index, timer)| (index, timer.into()))
                .collect(),
            inputs: value.inputs.into_iter().collect(),
            saved: value.saved,
        }
    }
}
