use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

use fitlog_domain as domain;
use log::debug;
use uuid::Uuid;

/// Volatile store backing the domain repositories.
///
/// While offline, every operation fails with `StorageError::NoConnection`.
#[derive(Default)]
pub struct MemoryStore {
    offline: Cell<bool>,
    fitness_sessions: RefCell<Vec<domain::FitnessSession>>,
    workouts: RefCell<Vec<domain::Workout>>,
    custom_exercises: RefCell<BTreeMap<domain::CustomExerciseID, domain::CustomExercise>>,
    one_rep_max_records: RefCell<Vec<domain::OneRepMaxRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_workouts(self, workouts: Vec<domain::Workout>) -> Self {
        *self.workouts.borrow_mut() = workouts;
        self
    }

    #[must_use]
    pub fn with_custom_exercises(self, custom_exercises: Vec<domain::CustomExercise>) -> Self {
        *self.custom_exercises.borrow_mut() =
            custom_exercises.into_iter().map(|e| (e.id, e)).collect();
        self
    }

    #[must_use]
    pub fn with_one_rep_max_records(self, records: Vec<domain::OneRepMaxRecord>) -> Self {
        *self.one_rep_max_records.borrow_mut() = records;
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    fn check_connection(&self) -> Result<(), domain::StorageError> {
        if self.offline.get() {
            Err(domain::StorageError::NoConnection)
        } else {
            Ok(())
        }
    }
}

impl domain::ExerciseCatalog for MemoryStore {
    fn resolve_exercise(
        &self,
        exercise_ref: &domain::ExerciseRef,
    ) -> Option<domain::ExerciseDescriptor> {
        domain::ExerciseCatalog::resolve_exercise(&*self.custom_exercises.borrow(), exercise_ref)
    }
}

impl domain::FitnessSessionRepository for MemoryStore {
    async fn read_fitness_sessions(
        &self,
    ) -> Result<Vec<domain::FitnessSession>, domain::ReadError> {
        self.check_connection()?;
        Ok(self.fitness_sessions.borrow().clone())
    }

    async fn save_fitness_session(
        &self,
        fitness_session: domain::FitnessSession,
    ) -> Result<domain::FitnessSession, domain::CreateError> {
        self.check_connection()?;
        let mut fitness_sessions = self.fitness_sessions.borrow_mut();
        if let Some(stored) = fitness_sessions
            .iter_mut()
            .find(|s| s.id == fitness_session.id)
        {
            debug!("replacing fitness session {}", *fitness_session.id);
            *stored = fitness_session.clone();
        } else {
            fitness_sessions.push(fitness_session.clone());
        }
        Ok(fitness_session)
    }

    async fn delete_fitness_session(
        &self,
        id: domain::FitnessSessionID,
    ) -> Result<domain::FitnessSessionID, domain::DeleteError> {
        self.check_connection()?;
        let mut fitness_sessions = self.fitness_sessions.borrow_mut();
        let len = fitness_sessions.len();
        fitness_sessions.retain(|s| s.id != id);
        if fitness_sessions.len() == len {
            return Err(domain::DeleteError::NotFound);
        }
        Ok(id)
    }
}

impl domain::WorkoutRepository for MemoryStore {
    async fn read_custom_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        self.check_connection()?;
        Ok(self.workouts.borrow().clone())
    }
}

impl domain::CustomExerciseRepository for MemoryStore {
    async fn read_custom_exercises(
        &self,
    ) -> Result<Vec<domain::CustomExercise>, domain::ReadError> {
        self.check_connection()?;
        Ok(self.custom_exercises.borrow().values().cloned().collect())
    }

    async fn create_custom_exercise(
        &self,
        name: domain::Name,
        category: domain::Category,
    ) -> Result<domain::CustomExercise, domain::CreateError> {
        self.check_connection()?;
        let mut custom_exercises = self.custom_exercises.borrow_mut();
        if custom_exercises.values().any(|e| e.name.matches(name.as_str())) {
            return Err(domain::CreateError::Conflict);
        }
        let custom_exercise = domain::CustomExercise {
            id: Uuid::new_v4().into(),
            name,
            category,
        };
        custom_exercises.insert(custom_exercise.id, custom_exercise.clone());
        Ok(custom_exercise)
    }
}

impl domain::OneRepMaxRepository for MemoryStore {
    async fn read_one_rep_max_records(
        &self,
    ) -> Result<Vec<domain::OneRepMaxRecord>, domain::ReadError> {
        self.check_connection()?;
        Ok(self.one_rep_max_records.borrow().clone())
    }

    async fn create_one_rep_max_record(
        &self,
        record: domain::OneRepMaxRecord,
    ) -> Result<domain::OneRepMaxRecord, domain::CreateError> {
        self.check_connection()?;
        let mut records = self.one_rep_max_records.borrow_mut();
        let record = if record.id.is_nil() {
            domain::OneRepMaxRecord {
                id: Uuid::new_v4().into(),
                ..record
            }
        } else if records.iter().any(|r| r.id == record.id) {
            return Err(domain::CreateError::Conflict);
        } else {
            record
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn replace_one_rep_max_record(
        &self,
        record: domain::OneRepMaxRecord,
    ) -> Result<domain::OneRepMaxRecord, domain::UpdateError> {
        self.check_connection()?;
        let mut records = self.one_rep_max_records.borrow_mut();
        let stored = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or(domain::UpdateError::NotFound)?;
        *stored = record.clone();
        Ok(record)
    }

    async fn delete_one_rep_max_record(
        &self,
        id: domain::OneRepMaxRecordID,
    ) -> Result<domain::OneRepMaxRecordID, domain::DeleteError> {
        self.check_connection()?;
        let mut records = self.one_rep_max_records.borrow_mut();
        let len = records.len();
        records.retain(|r| r.id != id);
        if records.len() == len {
            return Err(domain::DeleteError::NotFound);
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use fitlog_domain::{
        CustomExerciseService, ExerciseCatalog, FitnessSessionService, OneRepMaxService,
        SessionController, SetField, WorkoutService,
    };

    use crate::tests::data::{
        CUSTOM_EXERCISE, FixedClock, ONE_REP_MAX_RECORD, ONE_REP_MAX_RECORDS, WORKOUT, WORKOUTS,
    };

    use super::*;

    fn service() -> domain::Service<MemoryStore> {
        domain::Service::new(
            MemoryStore::new()
                .with_workouts(WORKOUTS.clone())
                .with_custom_exercises(vec![CUSTOM_EXERCISE.clone()])
                .with_one_rep_max_records(ONE_REP_MAX_RECORDS.clone()),
        )
    }

    #[test]
    fn test_save_fitness_session_from_workout() {
        let service = service();
        let workouts = block_on(service.get_custom_workouts()).unwrap();
        assert_eq!(workouts, *WORKOUTS);

        let mut controller = SessionController::new(FixedClock::default(), ());
        assert!(controller.load_workout(&WORKOUT));
        controller.update_input(0, 0, SetField::Reps, "5");
        controller.update_input(0, 0, SetField::Weight, "100");
        controller.start();

        let saved = controller.save().unwrap();
        block_on(service.save_fitness_session(saved.clone())).unwrap();
        assert_eq!(controller.save(), None);

        let completed = controller.complete().unwrap();
        assert_eq!(completed.id, saved.id);
        block_on(service.save_fitness_session(completed.clone())).unwrap();

        let stored = block_on(service.get_fitness_sessions()).unwrap();
        assert_eq!(stored, vec![completed]);
        assert_eq!(stored[0].exercise(0).unwrap().sets.len(), 1);
    }

    #[test]
    fn test_delete_fitness_session() {
        let service = service();
        let fitness_session = domain::FitnessSession::new(1.into());
        block_on(service.save_fitness_session(fitness_session)).unwrap();

        assert_eq!(
            block_on(service.delete_fitness_session(1.into())).unwrap(),
            domain::FitnessSessionID::from(1)
        );
        assert!(matches!(
            block_on(service.delete_fitness_session(1.into())),
            Err(domain::DeleteError::NotFound)
        ));
    }

    #[test]
    fn test_offline() {
        let service = service();
        service.repository().set_offline(true);
        assert!(matches!(
            block_on(service.get_custom_workouts()),
            Err(domain::ReadError::Storage(
                domain::StorageError::NoConnection
            ))
        ));
        assert!(matches!(
            block_on(service.add_one_rep_max_record(ONE_REP_MAX_RECORD.clone())),
            Err(domain::CreateError::Storage(
                domain::StorageError::NoConnection
            ))
        ));

        service.repository().set_offline(false);
        assert!(block_on(service.get_custom_workouts()).is_ok());
    }

    #[test]
    fn test_create_custom_exercise() {
        let service = service();
        let name = block_on(service.validate_custom_exercise_name("Farmer's Walk")).unwrap();
        let custom_exercise =
            block_on(service.create_custom_exercise(name, domain::Category::Timed)).unwrap();

        assert_eq!(
            service
                .repository()
                .resolve_exercise(&domain::ExerciseRef::Custom(custom_exercise.id))
                .map(|d| d.category),
            Some(domain::Category::Timed)
        );
        assert!(matches!(
            block_on(service.create_custom_exercise(
                domain::Name::new("farmer's walk").unwrap(),
                domain::Category::Timed
            )),
            Err(domain::CreateError::Conflict)
        ));
        assert_eq!(block_on(service.get_custom_exercises()).unwrap().len(), 2);
    }

    #[test]
    fn test_one_rep_max_records() {
        let service = service();

        assert_eq!(
            block_on(service.get_all_lifts())
                .unwrap()
                .iter()
                .map(domain::Name::as_str)
                .collect::<Vec<_>>(),
            vec!["Bench Press", "Squat"]
        );
        assert_eq!(
            block_on(service.get_personal_record("squat")).unwrap(),
            Some(ONE_REP_MAX_RECORDS[1].clone())
        );

        let added = block_on(service.add_one_rep_max_record(domain::OneRepMaxRecord {
            id: domain::OneRepMaxRecordID::nil(),
            value: 160.0,
            ..ONE_REP_MAX_RECORDS[1].clone()
        }))
        .unwrap();
        assert!(!added.id.is_nil());
        assert!(matches!(
            block_on(service.add_one_rep_max_record(added.clone())),
            Err(domain::CreateError::Conflict)
        ));
        assert_eq!(
            block_on(service.get_personal_record("Squat")).unwrap(),
            Some(added.clone())
        );

        let updated = domain::OneRepMaxRecord {
            notes: Some("belt".to_string()),
            ..added.clone()
        };
        assert_eq!(
            block_on(service.update_one_rep_max_record(updated.clone())).unwrap(),
            updated
        );
        assert!(matches!(
            block_on(service.update_one_rep_max_record(domain::OneRepMaxRecord {
                id: 99.into(),
                ..updated
            })),
            Err(domain::UpdateError::NotFound)
        ));

        block_on(service.delete_one_rep_max_record(added.id)).unwrap();
        assert!(matches!(
            block_on(service.delete_one_rep_max_record(added.id)),
            Err(domain::DeleteError::NotFound)
        ));
        assert_eq!(
            block_on(service.get_one_rep_max_records()).unwrap(),
            *ONE_REP_MAX_RECORDS
        );
    }
}
