use log::{debug, error};

use crate::{
    Category, CreateError, CustomExercise, CustomExerciseRepository, CustomExerciseService,
    DeleteError, FitnessSession, FitnessSessionID, FitnessSessionRepository,
    FitnessSessionService, Name, OneRepMaxRecord, OneRepMaxRecordID, OneRepMaxRepository,
    OneRepMaxService, ReadError, UpdateError, Workout, WorkoutRepository, WorkoutService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: FitnessSessionRepository> FitnessSessionService for Service<R> {
    async fn get_fitness_sessions(&self) -> Result<Vec<FitnessSession>, ReadError> {
        log_on_error!(
            self.repository.read_fitness_sessions(),
            ReadError,
            "get",
            "fitness sessions"
        )
    }

    async fn save_fitness_session(
        &self,
        fitness_session: FitnessSession,
    ) -> Result<FitnessSession, CreateError> {
        log_on_error!(
            self.repository.save_fitness_session(fitness_session),
            CreateError,
            "save",
            "fitness session"
        )
    }

    async fn delete_fitness_session(
        &self,
        id: FitnessSessionID,
    ) -> Result<FitnessSessionID, DeleteError> {
        log_on_error!(
            self.repository.delete_fitness_session(id),
            DeleteError,
            "delete",
            "fitness session"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_custom_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_custom_workouts(),
            ReadError,
            "get",
            "custom workouts"
        )
    }
}

impl<R: CustomExerciseRepository> CustomExerciseService for Service<R> {
    async fn get_custom_exercises(&self) -> Result<Vec<CustomExercise>, ReadError> {
        log_on_error!(
            self.repository.read_custom_exercises(),
            ReadError,
            "get",
            "custom exercises"
        )
    }

    async fn create_custom_exercise(
        &self,
        name: Name,
        category: Category,
    ) -> Result<CustomExercise, CreateError> {
        log_on_error!(
            self.repository.create_custom_exercise(name, category),
            CreateError,
            "create",
            "custom exercise"
        )
    }
}

impl<R: OneRepMaxRepository> OneRepMaxService for Service<R> {
    async fn get_one_rep_max_records(&self) -> Result<Vec<OneRepMaxRecord>, ReadError> {
        log_on_error!(
            self.repository.read_one_rep_max_records(),
            ReadError,
            "get",
            "one-rep max records"
        )
    }

    async fn add_one_rep_max_record(
        &self,
        record: OneRepMaxRecord,
    ) -> Result<OneRepMaxRecord, CreateError> {
        log_on_error!(
            self.repository.create_one_rep_max_record(record),
            CreateError,
            "add",
            "one-rep max record"
        )
    }

    async fn update_one_rep_max_record(
        &self,
        record: OneRepMaxRecord,
    ) -> Result<OneRepMaxRecord, UpdateError> {
        log_on_error!(
            self.repository.replace_one_rep_max_record(record),
            UpdateError,
            "update",
            "one-rep max record"
        )
    }

    async fn delete_one_rep_max_record(
        &self,
        id: OneRepMaxRecordID,
    ) -> Result<OneRepMaxRecordID, DeleteError> {
        log_on_error!(
            self.repository.delete_one_rep_max_record(id),
            DeleteError,
            "delete",
            "one-rep max record"
        )
    }
}
