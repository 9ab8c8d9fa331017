use std::collections::BTreeMap;

use derive_more::Deref;
use strum::{EnumIter, IntoEnumIterator};
use uuid::Uuid;

use crate::{CreateError, Name, ReadError, SetRecord, ValidationError};

#[allow(async_fn_in_trait)]
pub trait CustomExerciseService {
    async fn get_custom_exercises(&self) -> Result<Vec<CustomExercise>, ReadError>;
    async fn create_custom_exercise(
        &self,
        name: Name,
        category: Category,
    ) -> Result<CustomExercise, CreateError>;

    /// Names must not clash with built-in or existing custom exercises.
    async fn validate_custom_exercise_name(&self, name: &str) -> Result<Name, ValidationError> {
        let name = Name::new(name).map_err(|err| ValidationError::Invalid(err.to_string()))?;
        if BuiltinExercise::iter().any(|e| name.matches(e.name())) {
            return Err(ValidationError::Conflict("name".to_string()));
        }
        match self.get_custom_exercises().await {
            Ok(exercises) => {
                if exercises.iter().all(|e| !e.name.matches(name.as_str())) {
                    Ok(name)
                } else {
                    Err(ValidationError::Conflict("name".to_string()))
                }
            }
            Err(err) => Err(ValidationError::Invalid(err.to_string())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait CustomExerciseRepository {
    async fn read_custom_exercises(&self) -> Result<Vec<CustomExercise>, ReadError>;
    async fn create_custom_exercise(
        &self,
        name: Name,
        category: Category,
    ) -> Result<CustomExercise, CreateError>;
}

/// Read-only lookup of the exercise catalog.
pub trait ExerciseCatalog {
    fn resolve_exercise(&self, exercise_ref: &ExerciseRef) -> Option<ExerciseDescriptor>;
}

impl ExerciseCatalog for BTreeMap<CustomExerciseID, CustomExercise> {
    fn resolve_exercise(&self, exercise_ref: &ExerciseRef) -> Option<ExerciseDescriptor> {
        match exercise_ref {
            ExerciseRef::Builtin(exercise) => Some(exercise.descriptor()),
            ExerciseRef::Custom(id) => self.get(id).map(CustomExercise::descriptor),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExerciseRef {
    Builtin(BuiltinExercise),
    Custom(CustomExerciseID),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuiltinExercise {
    BenchPress,
    Squat,
    Deadlift,
    OverheadPress,
    BarbellRow,
    PullUp,
    PushUp,
    Dip,
    Plank,
    Running,
    Rowing,
    Cycling,
    JumpRope,
}

impl BuiltinExercise {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BuiltinExercise::BenchPress => "Bench Press",
            BuiltinExercise::Squat => "Squat",
            BuiltinExercise::Deadlift => "Deadlift",
            BuiltinExercise::OverheadPress => "Overhead Press",
            BuiltinExercise::BarbellRow => "Barbell Row",
            BuiltinExercise::PullUp => "Pull-up",
            BuiltinExercise::PushUp => "Push-up",
            BuiltinExercise::Dip => "Dip",
            BuiltinExercise::Plank => "Plank",
            BuiltinExercise::Running => "Running",
            BuiltinExercise::Rowing => "Rowing",
            BuiltinExercise::Cycling => "Cycling",
            BuiltinExercise::JumpRope => "Jump Rope",
        }
    }

    #[must_use]
    pub fn category(self) -> Category {
        match self {
            BuiltinExercise::BenchPress
            | BuiltinExercise::Squat
            | BuiltinExercise::Deadlift
            | BuiltinExercise::OverheadPress
            | BuiltinExercise::BarbellRow => Category::Strength,
            BuiltinExercise::PullUp | BuiltinExercise::PushUp | BuiltinExercise::Dip => {
                Category::Bodyweight
            }
            BuiltinExercise::Plank | BuiltinExercise::JumpRope => Category::Timed,
            BuiltinExercise::Running | BuiltinExercise::Rowing | BuiltinExercise::Cycling => {
                Category::Cardio
            }
        }
    }

    #[must_use]
    pub fn descriptor(self) -> ExerciseDescriptor {
        ExerciseDescriptor::new(self.name(), self.category())
    }

    pub fn search(query: &str) -> impl Iterator<Item = BuiltinExercise> {
        let query = query.trim().to_lowercase();
        BuiltinExercise::iter().filter(move |e| e.name().to_lowercase().contains(&query))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    Strength,
    Bodyweight,
    Timed,
    Cardio,
}

impl Category {
    #[must_use]
    pub fn input_fields(self) -> InputFields {
        match self {
            Category::Strength | Category::Bodyweight => InputFields {
                reps: true,
                weight: true,
                time: false,
                distance: false,
            },
            Category::Timed => InputFields {
                reps: false,
                weight: false,
                time: true,
                distance: false,
            },
            Category::Cardio => InputFields {
                reps: false,
                weight: false,
                time: true,
                distance: true,
            },
        }
    }
}

/// Which draft fields are relevant for an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct InputFields {
    pub reps: bool,
    pub weight: bool,
    pub time: bool,
    pub distance: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDescriptor {
    pub display_name: String,
    pub category: Category,
    pub fields: InputFields,
}

impl ExerciseDescriptor {
    #[must_use]
    pub fn new(display_name: &str, category: Category) -> Self {
        Self {
            display_name: display_name.to_string(),
            category,
            fields: category.input_fields(),
        }
    }

    #[must_use]
    pub fn supports_time(&self) -> bool {
        self.fields.time
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomExercise {
    pub id: CustomExerciseID,
    pub name: Name,
    pub category: Category,
}

impl CustomExercise {
    #[must_use]
    pub fn descriptor(&self) -> ExerciseDescriptor {
        ExerciseDescriptor::new(self.name.as_str(), self.category)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomExerciseID(Uuid);

impl CustomExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for CustomExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for CustomExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// An exercise performed as part of a fitness session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExerciseSession {
    pub id: ExerciseSessionID,
    pub exercise_ref: ExerciseRef,
    pub sets: Vec<SetRecord>,
}

impl ExerciseSession {
    #[must_use]
    pub fn new(exercise_ref: ExerciseRef) -> Self {
        Self {
            id: Uuid::new_v4().into(),
            exercise_ref,
            sets: vec![],
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExerciseSessionID(Uuid);

impl From<Uuid> for ExerciseSessionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseSessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(BuiltinExercise::BenchPress, Category::Strength)]
    #[case(BuiltinExercise::PullUp, Category::Bodyweight)]
    #[case(BuiltinExercise::Plank, Category::Timed)]
    #[case(BuiltinExercise::Running, Category::Cardio)]
    fn test_builtin_exercise_category(
        #[case] exercise: BuiltinExercise,
        #[case] expected: Category,
    ) {
        assert_eq!(exercise.category(), expected);
    }

    #[test]
    fn test_builtin_exercise_search() {
        assert_eq!(
            BuiltinExercise::search("press").collect::<Vec<_>>(),
            vec![BuiltinExercise::BenchPress, BuiltinExercise::OverheadPress]
        );
        assert_eq!(BuiltinExercise::search("curl").count(), 0);
    }

    #[test]
    fn test_exercise_catalog_resolve_exercise() {
        let custom = CustomExercise {
            id: 1.into(),
            name: Name::new("Sled Push").unwrap(),
            category: Category::Cardio,
        };
        let catalog = BTreeMap::from([(custom.id, custom.clone())]);

        assert_eq!(
            catalog.resolve_exercise(&ExerciseRef::Builtin(BuiltinExercise::Plank)),
            Some(ExerciseDescriptor {
                display_name: "Plank".to_string(),
                category: Category::Timed,
                fields: InputFields {
                    reps: false,
                    weight: false,
                    time: true,
                    distance: false,
                },
            })
        );
        assert_eq!(
            catalog
                .resolve_exercise(&ExerciseRef::Custom(1.into()))
                .map(|d| d.display_name),
            Some("Sled Push".to_string())
        );
        assert!(
            catalog
                .resolve_exercise(&ExerciseRef::Custom(1.into()))
                .unwrap()
                .supports_time()
        );
        assert_eq!(catalog.resolve_exercise(&ExerciseRef::Custom(2.into())), None);
    }

    struct FakeCustomExerciseService(Vec<CustomExercise>);

    impl CustomExerciseService for FakeCustomExerciseService {
        async fn get_custom_exercises(&self) -> Result<Vec<CustomExercise>, ReadError> {
            Ok(self.0.clone())
        }

        async fn create_custom_exercise(
            &self,
            _name: Name,
            _category: Category,
        ) -> Result<CustomExercise, CreateError> {
            Err(CreateError::Conflict)
        }
    }

    #[rstest]
    #[case("Sled Drag", Ok(Name::new("Sled Drag").unwrap()))]
    #[case("  sled push ", Err(ValidationError::Conflict("name".to_string())))]
    #[case("squat", Err(ValidationError::Conflict("name".to_string())))]
    #[case("", Err(ValidationError::Invalid("Name must not be empty".to_string())))]
    fn test_validate_custom_exercise_name(
        #[case] name: &str,
        #[case] expected: Result<Name, ValidationError>,
    ) {
        let service = FakeCustomExerciseService(vec![CustomExercise {
            id: 1.into(),
            name: Name::new("Sled Push").unwrap(),
            category: Category::Cardio,
        }]);
        assert_eq!(
            futures::executor::block_on(service.validate_custom_exercise_name(name)),
            expected
        );
    }

    #[test]
    fn test_custom_exercise_id_nil() {
        assert!(CustomExerciseID::nil().is_nil());
        assert_eq!(CustomExerciseID::nil(), CustomExerciseID::default());
    }

    #[test]
    fn test_exercise_session_new() {
        let exercise_session = ExerciseSession::new(ExerciseRef::Builtin(BuiltinExercise::Squat));
        assert!(exercise_session.sets.is_empty());
        assert!(!exercise_session.id.is_nil());
    }
}
