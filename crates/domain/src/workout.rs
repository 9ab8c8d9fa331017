use derive_more::Deref;
use uuid::Uuid;

use crate::{ExerciseRef, Name, ReadError};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_custom_workouts(&self) -> Result<Vec<Workout>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_custom_workouts(&self) -> Result<Vec<Workout>, ReadError>;
}

/// A user-defined list of exercises a fitness session can be started from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Workout {
    pub id: WorkoutID,
    pub name: Name,
    pub exercises: Vec<ExerciseRef>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkoutID(Uuid);

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
