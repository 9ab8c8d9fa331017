use chrono::{DateTime, Duration, Utc};
use log::debug;
use uuid::Uuid;

use crate::{
    Clock, ExerciseCatalog, ExerciseRef, ExerciseSession, ExerciseSummary, ExerciseTimerTracker,
    FitnessSession, FitnessSessionID, InputFields, SessionState, SessionSummary, SetField,
    SetInput, SetInputBuffer, SystemClock, TICK_PERIOD, Ticker, Workout,
};

/// Everything needed to continue an ongoing session after the application was suspended.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub fitness_session: FitnessSession,
    pub timers: ExerciseTimerTracker,
    pub inputs: SetInputBuffer,
    pub saved: bool,
}

/// Drives a fitness session: lifecycle, exercise timers, draft rows and summaries.
///
/// Invalid requests (e.g. pausing an inactive session) are ignored and reported as `false` or
/// `None`, as redundant events from the UI are expected.
pub struct SessionController<C: Clock = SystemClock, T: Ticker = ()> {
    clock: C,
    ticker: T,
    tick: Option<T::Handle>,
    fitness_session: FitnessSession,
    timers: ExerciseTimerTracker,
    inputs: SetInputBuffer,
    saved: bool,
}

impl<C: Clock, T: Ticker> SessionController<C, T> {
    pub fn new(clock: C, ticker: T) -> Self {
        Self {
            clock,
            ticker,
            tick: None,
            fitness_session: FitnessSession::new(FitnessSessionID::from(Uuid::new_v4())),
            timers: ExerciseTimerTracker::new(),
            inputs: SetInputBuffer::new(),
            saved: false,
        }
    }

    #[must_use]
    pub fn fitness_session(&self) -> &FitnessSession {
        &self.fitness_session
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.fitness_session.state()
    }

    #[must_use]
    pub fn timers(&self) -> &ExerciseTimerTracker {
        &self.timers
    }

    #[must_use]
    pub fn inputs(&self) -> &SetInputBuffer {
        &self.inputs
    }

    #[must_use]
    pub fn has_been_saved(&self) -> bool {
        self.saved
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.tick.is_some()
    }

    fn update_tick(&mut self) {
        if self.fitness_session.state() == SessionState::Active {
            if self.tick.is_none() {
                self.tick = Some(self.ticker.start(TICK_PERIOD));
            }
        } else {
            self.tick = None;
        }
    }

    /// Cancels the refresh tick, e.g. when the view is left.
    pub fn shutdown(&mut self) {
        self.tick = None;
    }

    /// Replaces a session that is not running by a new, empty one.
    pub fn new_session(&mut self) -> bool {
        if self.fitness_session.is_running() {
            debug!("ignoring new session while session is running");
            return false;
        }
        self.fitness_session = FitnessSession::new(FitnessSessionID::from(Uuid::new_v4()));
        self.timers.clear();
        self.inputs.clear();
        self.saved = false;
        self.update_tick();
        true
    }

    /// Starts a new session containing the exercises of a workout.
    pub fn load_workout(&mut self, workout: &Workout) -> bool {
        if !self.new_session() {
            return false;
        }
        for exercise_ref in &workout.exercises {
            self.add_exercise(*exercise_ref);
        }
        debug!(
            "loaded workout {} with {} exercises",
            workout.name,
            workout.exercises.len()
        );
        true
    }

    /// Appends an exercise with one empty draft row and returns its index.
    pub fn add_exercise(&mut self, exercise_ref: ExerciseRef) -> Option<usize> {
        if self.fitness_session.state() == SessionState::Completed {
            debug!("ignoring added exercise in completed session");
            return None;
        }
        let index = self
            .fitness_session
            .add_exercise(ExerciseSession::new(exercise_ref));
        self.inputs.add_row(index);
        Some(index)
    }

    /// Removes an exercise together with its timer and draft rows.
    pub fn remove_exercise(&mut self, index: usize) -> bool {
        if self.fitness_session.state() == SessionState::Completed {
            debug!("ignoring removed exercise in completed session");
            return false;
        }
        if self.fitness_session.remove_exercise(index).is_none() {
            return false;
        }
        self.timers.remove_exercise(index);
        self.inputs.remove_exercise(index);
        true
    }

    pub fn start(&mut self) -> bool {
        let now = self.clock.now();
        if !self.fitness_session.start(now) {
            debug!(
                "ignoring start of session in state {:?} with {} exercises",
                self.state(),
                self.fitness_session.exercise_sessions().len()
            );
            return false;
        }
        self.saved = false;
        self.update_tick();
        true
    }

    /// Pauses the session and every running exercise timer.
    pub fn pause(&mut self) -> bool {
        let now = self.clock.now();
        if !self.fitness_session.pause(now) {
            debug!("ignoring pause of session in state {:?}", self.state());
            return false;
        }
        let paused = self.timers.pause_all(now);
        debug!("paused session and {paused} exercise timers");
        self.update_tick();
        true
    }

    /// Resumes the session. Exercise timers stay paused until they are restarted individually.
    pub fn resume(&mut self) -> bool {
        let now = self.clock.now();
        if !self.fitness_session.resume(now) {
            debug!("ignoring resume of session in state {:?}", self.state());
            return false;
        }
        self.update_tick();
        true
    }

    /// Abandons the session without saving it.
    pub fn stop(&mut self) -> bool {
        if !self.fitness_session.stop() {
            debug!("ignoring stop of session in state {:?}", self.state());
            return false;
        }
        self.timers.clear();
        self.update_tick();
        true
    }

    /// Commits all valid draft rows and returns the session to be persisted.
    ///
    /// Committed rows are removed from the draft buffer. Without new input, a repeated save
    /// returns `None`.
    pub fn save(&mut self) -> Option<FitnessSession> {
        if !self.can_save() {
            debug!(
                "ignoring save of session in state {:?} (saved: {})",
                self.state(),
                self.saved
            );
            return None;
        }
        let now = self.clock.now();
        self.commit_inputs(now);
        self.saved = true;
        Some(self.fitness_session.clone())
    }

    /// Saves and completes the session and returns it to be persisted.
    pub fn complete(&mut self) -> Option<FitnessSession> {
        if !self.fitness_session.is_running() {
            debug!("ignoring completion of session in state {:?}", self.state());
            return None;
        }
        let now = self.clock.now();
        self.commit_inputs(now);
        self.saved = true;
        self.fitness_session.complete(now);
        self.timers.clear();
        self.update_tick();
        Some(self.fitness_session.clone())
    }

    #[must_use]
    pub fn can_save(&self) -> bool {
        self.fitness_session.is_running()
            && (self.inputs.has_valid_rows()
                || (!self.saved
                    && self
                        .fitness_session
                        .exercise_sessions()
                        .iter()
                        .any(|e| !e.sets.is_empty())))
    }

    fn commit_inputs(&mut self, now: DateTime<Utc>) {
        let mut committed = 0;
        for (index, rows) in self.inputs.drain() {
            let Some(exercise_session) = self.fitness_session.exercise_mut(index) else {
                continue;
            };
            for record in rows.iter().filter_map(|row| row.to_set_record(now)) {
                exercise_session.sets.push(record);
                committed += 1;
            }
        }
        debug!("committed {committed} draft sets");
    }

    #[must_use]
    pub fn current_duration(&self) -> Duration {
        self.fitness_session.duration(self.clock.now())
    }

    /// Starts or continues the timer of an exercise. Only possible while the session is active.
    pub fn start_exercise_timer(&mut self, index: usize) -> bool {
        if self.fitness_session.state() != SessionState::Active
            || self.fitness_session.exercise(index).is_none()
        {
            debug!("ignoring start of exercise timer {index}");
            return false;
        }
        self.timers.start(index, self.clock.now())
    }

    pub fn pause_exercise_timer(&mut self, index: usize) -> bool {
        self.timers.pause(index, self.clock.now())
    }

    pub fn stop_exercise_timer(&mut self, index: usize) -> bool {
        self.timers.stop(index)
    }

    #[must_use]
    pub fn exercise_running_time(&self, index: usize) -> Duration {
        self.timers.running_time(index, self.clock.now())
    }

    #[must_use]
    pub fn is_exercise_timer_running(&self, index: usize) -> bool {
        self.timers.is_running(index)
    }

    #[must_use]
    pub fn input_rows(&self, index: usize) -> &[SetInput] {
        self.inputs.rows(index)
    }

    pub fn add_input_row(&mut self, index: usize) -> Option<usize> {
        if self.fitness_session.state() == SessionState::Completed {
            return None;
        }
        self.fitness_session.exercise(index)?;
        Some(self.inputs.add_row(index))
    }

    pub fn update_input(
        &mut self,
        index: usize,
        row: usize,
        field: SetField,
        value: impl Into<String>,
    ) -> bool {
        if self.fitness_session.state() == SessionState::Completed {
            return false;
        }
        self.inputs.set_field(index, row, field, value)
    }

    pub fn remove_input_row(&mut self, index: usize, row: usize) -> bool {
        if self.fitness_session.state() == SessionState::Completed {
            return false;
        }
        self.inputs.remove_row(index, row).is_some()
    }

    /// Commits a single draft row with the current time.
    pub fn add_set_to_exercise(&mut self, index: usize, row: usize) -> bool {
        let now = self.clock.now();
        self.add_set_to_exercise_at(index, row, now)
    }

    /// Commits a single draft row and empties it, keeping the row for the next entry.
    pub fn add_set_to_exercise_at(
        &mut self,
        index: usize,
        row: usize,
        timestamp: DateTime<Utc>,
    ) -> bool {
        if self.fitness_session.state() == SessionState::Completed {
            return false;
        }
        let Some(record) = self
            .inputs
            .row(index, row)
            .and_then(|input| input.to_set_record(timestamp))
        else {
            return false;
        };
        let Some(exercise_session) = self.fitness_session.exercise_mut(index) else {
            return false;
        };
        exercise_session.sets.push(record);
        self.inputs.reset_row(index, row);
        true
    }

    #[must_use]
    pub fn input_fields(
        &self,
        index: usize,
        catalog: &impl ExerciseCatalog,
    ) -> Option<InputFields> {
        let exercise_session = self.fitness_session.exercise(index)?;
        catalog
            .resolve_exercise(&exercise_session.exercise_ref)
            .map(|descriptor| descriptor.fields)
    }

    #[must_use]
    pub fn exercise_summary(&self, index: usize) -> Option<ExerciseSummary> {
        let exercise_session = self.fitness_session.exercise(index)?;
        Some(ExerciseSummary::new(
            &exercise_session.sets,
            self.inputs.rows(index),
        ))
    }

    #[must_use]
    pub fn session_summary(&self) -> SessionSummary {
        SessionSummary::new(
            (0..self.fitness_session.exercise_sessions().len())
                .filter_map(|index| self.exercise_summary(index))
                .collect(),
            self.current_duration(),
        )
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            fitness_session: self.fitness_session.clone(),
            timers: self.timers.clone(),
            inputs: self.inputs.clone(),
            saved: self.saved,
        }
    }

    pub fn restore(&mut self, snapshot: SessionSnapshot) {
        self.fitness_session = snapshot.fitness_session;
        self.timers = snapshot.timers;
        self.inputs = snapshot.inputs;
        self.saved = snapshot.saved;
        self.update_tick();
    }
}
