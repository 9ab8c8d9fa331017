use std::{cmp::Ordering, collections::BTreeMap};

use chrono::{DateTime, Utc};
use derive_more::Deref;
use strum::{EnumIter, IntoEnumIterator};
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait OneRepMaxService {
    async fn get_one_rep_max_records(&self) -> Result<Vec<OneRepMaxRecord>, ReadError>;
    async fn add_one_rep_max_record(
        &self,
        record: OneRepMaxRecord,
    ) -> Result<OneRepMaxRecord, CreateError>;
    async fn update_one_rep_max_record(
        &self,
        record: OneRepMaxRecord,
    ) -> Result<OneRepMaxRecord, UpdateError>;
    async fn delete_one_rep_max_record(
        &self,
        id: OneRepMaxRecordID,
    ) -> Result<OneRepMaxRecordID, DeleteError>;

    /// Distinct lift names, sorted alphabetically.
    async fn get_all_lifts(&self) -> Result<Vec<Name>, ReadError> {
        let mut lifts = self
            .get_one_rep_max_records()
            .await?
            .into_iter()
            .map(|r| r.lift_name)
            .collect::<Vec<_>>();
        lifts.sort_by_key(|name| name.as_str().to_lowercase());
        lifts.dedup_by(|a, b| a.matches(b.as_str()));
        Ok(lifts)
    }

    async fn get_personal_record(&self, lift: &str) -> Result<Option<OneRepMaxRecord>, ReadError> {
        let records = self
            .get_one_rep_max_records()
            .await?
            .into_iter()
            .filter(|r| r.lift_name.matches(lift))
            .collect::<Vec<_>>();
        Ok(best_record(&records).cloned())
    }
}

#[allow(async_fn_in_trait)]
pub trait OneRepMaxRepository {
    async fn read_one_rep_max_records(&self) -> Result<Vec<OneRepMaxRecord>, ReadError>;
    async fn create_one_rep_max_record(
        &self,
        record: OneRepMaxRecord,
    ) -> Result<OneRepMaxRecord, CreateError>;
    async fn replace_one_rep_max_record(
        &self,
        record: OneRepMaxRecord,
    ) -> Result<OneRepMaxRecord, UpdateError>;
    async fn delete_one_rep_max_record(
        &self,
        id: OneRepMaxRecordID,
    ) -> Result<OneRepMaxRecordID, DeleteError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OneRepMaxError {
    #[error("unsupported rep count: {0}")]
    UnsupportedReps(u32),
    #[error("weight must be a non-negative number")]
    InvalidWeight,
}

/// Estimation formula for converting between a one-rep max and multi-rep weights.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Formula {
    /// `1RM = w * (1 + r / 30)`
    #[default]
    Epley,
    /// `1RM = w * 36 / (37 - r)`
    Brzycki,
}

impl Formula {
    /// Rep count at which the Brzycki denominator vanishes.
    pub const BRZYCKI_LIMIT: u32 = 37;

    fn check_reps(self, reps: u32) -> Result<(), OneRepMaxError> {
        match self {
            _ if reps == 0 => Err(OneRepMaxError::UnsupportedReps(reps)),
            Formula::Brzycki if reps >= Self::BRZYCKI_LIMIT => {
                Err(OneRepMaxError::UnsupportedReps(reps))
            }
            Formula::Epley | Formula::Brzycki => Ok(()),
        }
    }

    /// Ratio of the one-rep max to the weight that can be lifted for `reps` repetitions.
    #[allow(clippy::cast_precision_loss)]
    fn factor(self, reps: u32) -> f32 {
        let r = reps as f32;
        match self {
            Formula::Epley => 1.0 + r / 30.0,
            Formula::Brzycki => 36.0 / (Self::BRZYCKI_LIMIT as f32 - r),
        }
    }

    /// Weight that can be lifted for `target_reps` repetitions given a one-rep max.
    pub fn estimate_weight(
        self,
        one_rep_max: f32,
        target_reps: u32,
    ) -> Result<f32, OneRepMaxError> {
        check_weight(one_rep_max)?;
        self.check_reps(target_reps)?;
        if target_reps == 1 {
            return Ok(one_rep_max);
        }
        Ok(one_rep_max / self.factor(target_reps))
    }

    /// One-rep max implied by lifting `weight` for `reps` repetitions.
    pub fn estimate_one_rep_max(self, reps: u32, weight: f32) -> Result<f32, OneRepMaxError> {
        check_weight(weight)?;
        self.check_reps(reps)?;
        if reps == 1 {
            return Ok(weight);
        }
        Ok(weight * self.factor(reps))
    }
}

fn check_weight(weight: f32) -> Result<(), OneRepMaxError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(OneRepMaxError::InvalidWeight)
    }
}

pub fn estimate(formula: Formula, one_rep_max: f32, reps: u32) -> Result<f32, OneRepMaxError> {
    formula.estimate_weight(one_rep_max, reps)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RepTier {
    Two,
    Three,
    Five,
    Ten,
}

impl RepTier {
    #[must_use]
    pub fn reps(self) -> u32 {
        match self {
            RepTier::Two => 2,
            RepTier::Three => 3,
            RepTier::Five => 5,
            RepTier::Ten => 10,
        }
    }
}

/// Rep tiers shown next to a one-rep max.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct RepTiers {
    pub two: bool,
    pub three: bool,
    pub five: bool,
    pub ten: bool,
}

impl RepTiers {
    #[must_use]
    pub fn is_enabled(&self, tier: RepTier) -> bool {
        match tier {
            RepTier::Two => self.two,
            RepTier::Three => self.three,
            RepTier::Five => self.five,
            RepTier::Ten => self.ten,
        }
    }

    pub fn toggle(&mut self, tier: RepTier) {
        let flag = match tier {
            RepTier::Two => &mut self.two,
            RepTier::Three => &mut self.three,
            RepTier::Five => &mut self.five,
            RepTier::Ten => &mut self.ten,
        };
        *flag = !*flag;
    }

    pub fn enabled(&self) -> impl Iterator<Item = RepTier> + '_ {
        RepTier::iter().filter(|tier| self.is_enabled(*tier))
    }
}

impl Default for RepTiers {
    fn default() -> Self {
        Self {
            two: true,
            three: true,
            five: true,
            ten: true,
        }
    }
}

/// Estimated weights for every enabled tier, in ascending rep order.
pub fn rep_max_table(
    formula: Formula,
    one_rep_max: f32,
    tiers: &RepTiers,
) -> Result<Vec<(RepTier, f32)>, OneRepMaxError> {
    tiers
        .enabled()
        .map(|tier| Ok((tier, formula.estimate_weight(one_rep_max, tier.reps())?)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordType {
    Weight,
    Time,
    Distance,
    Reps,
    Volume,
}

impl RecordType {
    /// Whether a larger value is the better result.
    #[must_use]
    pub fn higher_is_better(self) -> bool {
        !matches!(self, RecordType::Time)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OneRepMaxRecord {
    pub id: OneRepMaxRecordID,
    pub lift_name: Name,
    pub record_type: RecordType,
    pub value: f32,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
    pub is_custom: bool,
}

impl OneRepMaxRecord {
    /// Rep-max table for weight records; other record types have no estimation.
    pub fn rep_max_table(
        &self,
        formula: Formula,
        tiers: &RepTiers,
    ) -> Option<Result<Vec<(RepTier, f32)>, OneRepMaxError>> {
        (self.record_type == RecordType::Weight)
            .then(|| rep_max_table(formula, self.value, tiers))
    }

    fn is_better_than(&self, other: &OneRepMaxRecord) -> bool {
        match self.value.total_cmp(&other.value) {
            Ordering::Equal => self.date > other.date,
            Ordering::Greater => self.record_type.higher_is_better(),
            Ordering::Less => !self.record_type.higher_is_better(),
        }
    }
}

/// Current best of a single lift.
///
/// If a lift was recorded with different record types, only records of the type of the most recent
/// entry are compared.
#[must_use]
pub fn best_record(records: &[OneRepMaxRecord]) -> Option<&OneRepMaxRecord> {
    let latest = records.iter().max_by_key(|r| r.date)?;
    records
        .iter()
        .filter(|r| r.record_type == latest.record_type)
        .fold(None, |best: Option<&OneRepMaxRecord>, r| match best {
            Some(b) if !r.is_better_than(b) => Some(b),
            _ => Some(r),
        })
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LiftSort {
    #[default]
    Name,
    Value,
    Date,
}

/// Personal record per lift, sorted for display.
#[must_use]
pub fn personal_records(
    records: &[OneRepMaxRecord],
    sort: LiftSort,
    show_custom: bool,
) -> Vec<OneRepMaxRecord> {
    let mut lifts: BTreeMap<String, Vec<OneRepMaxRecord>> = BTreeMap::new();
    for record in records.iter().filter(|r| show_custom || !r.is_custom) {
        lifts
            .entry(record.lift_name.as_str().to_lowercase())
            .or_default()
            .push(record.clone());
    }

    let mut result = lifts
        .values()
        .filter_map(|records| best_record(records).cloned())
        .collect::<Vec<_>>();

    match sort {
        LiftSort::Name => {}
        LiftSort::Value => result.sort_by(|a, b| b.value.total_cmp(&a.value)),
        LiftSort::Date => result.sort_by(|a, b| b.date.cmp(&a.date)),
    }

    result
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OneRepMaxRecordID(Uuid);

impl OneRepMaxRecordID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for OneRepMaxRecordID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for OneRepMaxRecordID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
