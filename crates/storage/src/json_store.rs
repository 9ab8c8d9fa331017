use std::{
    collections::{BTreeMap, VecDeque},
    sync::Mutex,
};

use fitlog_app::{OngoingFitnessSession, Settings, log};
use serde::{Serialize, de::DeserializeOwned};

const KEY_SETTINGS: &str = "settings";
const KEY_ONGOING_FITNESS_SESSION: &str = "ongoing fitness session";
const KEY_LOG: &str = "log";

/// Key-value store of JSON documents, persistable as a single JSON snapshot.
#[derive(Default)]
pub struct JsonStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a store from a snapshot created by [`JsonStore::export`].
    pub fn import(snapshot: &str) -> Result<Self, String> {
        let entries = serde_json::from_str(snapshot).map_err(|err| err.to_string())?;
        Ok(Self {
            entries: Mutex::new(entries),
        })
    }

    pub fn export(&self) -> Result<String, String> {
        let entries = self.entries.lock().map_err(|err| err.to_string())?;
        serde_json::to_string(&*entries).map_err(|err| err.to_string())
    }

    /// Returns `None` if the key is not present.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, String> {
        let entries = self.entries.lock().map_err(|err| err.to_string())?;
        entries
            .get(key)
            .map(|value| serde_json::from_str(value))
            .transpose()
            .map_err(|err| format!("failed to read {key}: {err}"))
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), String> {
        let value = serde_json::to_string(value).map_err(|err| err.to_string())?;
        self.entries
            .lock()
            .map_err(|err| err.to_string())?
            .insert(key.to_string(), value);
        Ok(())
    }
}

impl fitlog_app::SettingsRepository for JsonStore {
    async fn read_settings(&self) -> Result<Settings, String> {
        Ok(self.get::<Settings>(KEY_SETTINGS)?.unwrap_or_default())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        self.set(KEY_SETTINGS, &settings)
    }
}

impl fitlog_app::OngoingFitnessSessionRepository for JsonStore {
    async fn read_ongoing_fitness_session(&self) -> Result<Option<OngoingFitnessSession>, String> {
        Ok(self
            .get::<Option<OngoingFitnessSession>>(KEY_ONGOING_FITNESS_SESSION)?
            .flatten())
    }

    async fn write_ongoing_fitness_session(
        &self,
        ongoing_fitness_session: Option<OngoingFitnessSession>,
    ) -> Result<(), String> {
        self.set(KEY_ONGOING_FITNESS_SESSION, &ongoing_fitness_session)
    }
}

impl log::Repository for JsonStore {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        Ok(self
            .get::<VecDeque<log::Entry>>(KEY_LOG)
            .map_err(log::Error::Unknown)?
            .unwrap_or_default())
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(log::MAX_ENTRIES);
        self.set(KEY_LOG, &entries).map_err(log::Error::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use fitlog_app::{
        OngoingFitnessSessionRepository, OngoingFitnessSessionService, SettingsService, Theme,
        log::{Repository, Service},
    };
    use fitlog_domain::{
        BuiltinExercise, ExerciseRef, Formula, SessionController, SessionSnapshot, SessionState,
    };
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use crate::tests::data::FixedClock;

    use super::*;

    fn entry(message: usize) -> log::Entry {
        log::Entry {
            time: "Mar 01 12:00:00".to_string(),
            level: ::log::Level::Info,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_settings() {
        let service = fitlog_app::Service::new(JsonStore::new());
        assert_eq!(block_on(service.get_settings()).unwrap(), Settings::default());

        let settings = Settings {
            formula: Formula::Brzycki,
            theme: Theme::Dark,
            ..Settings::default()
        };
        block_on(service.set_settings(settings)).unwrap();
        assert_eq!(block_on(service.get_settings()).unwrap(), settings);
    }

    #[test]
    fn test_corrupted_settings() {
        let store = JsonStore::import(r#"{"settings":"{\"theme\":\"Blue\"}"}"#).unwrap();
        assert!(
            block_on(fitlog_app::SettingsRepository::read_settings(&store))
                .unwrap_err()
                .starts_with("failed to read settings")
        );
    }

    #[test]
    fn test_ongoing_fitness_session() {
        let store = JsonStore::new();
        assert_eq!(block_on(store.read_ongoing_fitness_session()).unwrap(), None);

        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        let mut controller = SessionController::new(clock, ());
        controller.add_exercise(ExerciseRef::Builtin(BuiltinExercise::Squat));
        controller.start();

        let service = fitlog_app::Service::new(store);
        block_on(
            service.set_ongoing_fitness_session(Some(OngoingFitnessSession::from(
                &controller.snapshot(),
            ))),
        )
        .unwrap();

        let restored = JsonStore::import(&service.repository().export().unwrap()).unwrap();
        let ongoing = block_on(restored.read_ongoing_fitness_session())
            .unwrap()
            .unwrap();
        let snapshot = SessionSnapshot::from(ongoing);
        assert_eq!(snapshot, controller.snapshot());
        assert_eq!(snapshot.fitness_session.state(), SessionState::Active);

        block_on(service.set_ongoing_fitness_session(None)).unwrap();
        assert_eq!(block_on(service.get_ongoing_fitness_session()).unwrap(), None);
    }

    #[test]
    fn test_log_keeps_latest_entries() {
        let store = JsonStore::new();
        for i in 0..=log::MAX_ENTRIES {
            store.write_entry(entry(i)).unwrap();
        }

        let entries = store.read_entries().unwrap();
        assert_eq!(entries.len(), log::MAX_ENTRIES);
        assert_eq!(entries.front(), Some(&entry(log::MAX_ENTRIES)));
        assert_eq!(entries.back(), Some(&entry(1)));

        let service = fitlog_app::Service::new(store);
        assert_eq!(service.get_log_entries().unwrap(), entries);
    }
}
