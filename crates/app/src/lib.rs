#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod log;
mod ongoing_fitness_session;
mod service;
mod settings;
mod ticker;

pub use ongoing_fitness_session::{
    OngoingFitnessSession, OngoingFitnessSessionRepository, OngoingFitnessSessionService,
    TimerState,
};
pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService, Theme};
pub use ticker::{ThreadTicker, TickHandle};
