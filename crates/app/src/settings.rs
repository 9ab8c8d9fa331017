use fitlog_domain::{
    Formula, LiftSort, OneRepMaxError, OneRepMaxRecord, RepTier, RepTiers, personal_records,
};

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    /// Returns the default settings if none have been stored yet.
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub formula: Formula,
    pub rep_tiers: RepTiers,
    pub lift_sort: LiftSort,
    pub show_custom_lifts: bool,
    pub beep_volume: u8,
    pub theme: Theme,
}

impl Settings {
    #[must_use]
    pub fn current_theme(&self, prefers_dark: bool) -> Theme {
        match self.theme {
            Theme::System => {
                if prefers_dark {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
            Theme::Light | Theme::Dark => self.theme,
        }
    }

    /// Best record per lift, filtered and sorted as configured.
    #[must_use]
    pub fn personal_records(&self, records: &[OneRepMaxRecord]) -> Vec<OneRepMaxRecord> {
        personal_records(records, self.lift_sort, self.show_custom_lifts)
    }

    pub fn rep_max_table(
        &self,
        record: &OneRepMaxRecord,
    ) -> Option<Result<Vec<(RepTier, f32)>, OneRepMaxError>> {
        record.rep_max_table(self.formula, &self.rep_tiers)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            formula: Formula::default(),
            rep_tiers: RepTiers::default(),
            lift_sort: LiftSort::default(),
            show_custom_lifts: true,
            beep_volume: 80,
            theme: Theme::Light,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    System,
    Light,
    Dark,
}
