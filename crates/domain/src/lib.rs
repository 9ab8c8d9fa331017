#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod clock;
mod controller;
mod error;
mod exercise;
mod fitness_session;
mod indexed;
mod name;
mod one_rep_max;
mod service;
mod set;
mod set_input;
mod summary;
mod timer;
mod workout;

pub use clock::{Clock, SystemClock, TICK_PERIOD, Ticker};
pub use controller::{SessionController, SessionSnapshot};
pub use error::{
    CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError,
};
pub use exercise::{
    BuiltinExercise, Category, CustomExercise, CustomExerciseID, CustomExerciseRepository,
    CustomExerciseService, ExerciseCatalog, ExerciseDescriptor, ExerciseRef, ExerciseSession,
    ExerciseSessionID, InputFields,
};
pub use fitness_session::{
    FitnessSession, FitnessSessionID, FitnessSessionRepository, FitnessSessionService,
    SessionState, SessionTiming,
};
pub use name::{Name, NameError};
pub use one_rep_max::{
    Formula, LiftSort, OneRepMaxError, OneRepMaxRecord, OneRepMaxRecordID, OneRepMaxRepository,
    OneRepMaxService, RecordType, RepTier, RepTiers, best_record, estimate, personal_records,
    rep_max_table,
};
pub use service::Service;
pub use set::{
    Distance, DistanceError, Reps, RepsError, SetRecord, Time, TimeError, Weight, WeightError,
    parse_time,
};
pub use set_input::{SetField, SetInput, SetInputBuffer};
pub use summary::{
    ExerciseSummary, NO_SETS_COMPLETED, SessionSummary, format_duration, format_time,
};
pub use timer::{ExerciseTimer, ExerciseTimerTracker};
pub use workout::{Workout, WorkoutID, WorkoutRepository, WorkoutService};
