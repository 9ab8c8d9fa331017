use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{Distance, Reps, SetRecord, Weight, indexed::remove_index, parse_time};

/// A set as typed by the user, before it is parsed and committed.
///
/// Fields are kept as raw text because input is transiently invalid while typing (e.g. `"1:"`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetInput {
    pub reps: String,
    pub weight: String,
    pub time: String,
    pub distance: String,
}

impl SetInput {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [&self.reps, &self.weight, &self.time, &self.distance]
            .iter()
            .any(|field| !field.trim().is_empty())
    }

    #[must_use]
    pub fn field(&self, field: SetField) -> &str {
        match field {
            SetField::Reps => &self.reps,
            SetField::Weight => &self.weight,
            SetField::Time => &self.time,
            SetField::Distance => &self.distance,
        }
    }

    pub fn set_field(&mut self, field: SetField, value: impl Into<String>) {
        let value = value.into();
        match field {
            SetField::Reps => self.reps = value,
            SetField::Weight => self.weight = value,
            SetField::Time => self.time = value,
            SetField::Distance => self.distance = value,
        }
    }

    /// Parses every field; unparsable fields end up absent.
    #[must_use]
    pub fn parse(&self) -> SetRecord {
        SetRecord {
            reps: Reps::try_from(self.reps.as_str()).ok(),
            weight: Weight::try_from(self.weight.as_str()).ok(),
            time: parse_time(&self.time),
            distance: Distance::try_from(self.distance.as_str()).ok(),
            timestamp: None,
        }
    }

    /// Returns `None` unless the row is valid and at least one field could be parsed.
    #[must_use]
    pub fn to_set_record(&self, timestamp: DateTime<Utc>) -> Option<SetRecord> {
        if !self.is_valid() {
            return None;
        }
        let record = SetRecord {
            timestamp: Some(timestamp),
            ..self.parse()
        };
        record.is_valid().then_some(record)
    }
}

impl From<&SetRecord> for SetInput {
    fn from(value: &SetRecord) -> Self {
        fn text<T: ToString>(value: Option<T>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }
        Self {
            reps: text(value.reps),
            weight: text(value.weight),
            time: text(value.time.map(f32::from)),
            distance: text(value.distance),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetField {
    Reps,
    Weight,
    Time,
    Distance,
}

/// Draft rows per exercise index.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SetInputBuffer {
    rows: BTreeMap<usize, Vec<SetInput>>,
}

impl SetInputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rows(&self, index: usize) -> &[SetInput] {
        self.rows.get(&index).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn row(&self, index: usize, row: usize) -> Option<&SetInput> {
        self.rows.get(&index).and_then(|rows| rows.get(row))
    }

    pub fn valid_rows(&self, index: usize) -> impl Iterator<Item = &SetInput> {
        self.rows(index).iter().filter(|row| row.is_valid())
    }

    /// Appends an empty row and returns its position.
    pub fn add_row(&mut self, index: usize) -> usize {
        let rows = self.rows.entry(index).or_default();
        rows.push(SetInput::default());
        rows.len() - 1
    }

    pub fn set_field(
        &mut self,
        index: usize,
        row: usize,
        field: SetField,
        value: impl Into<String>,
    ) -> bool {
        match self.rows.get_mut(&index).and_then(|rows| rows.get_mut(row)) {
            Some(input) => {
                input.set_field(field, value);
                true
            }
            None => false,
        }
    }

    pub fn remove_row(&mut self, index: usize, row: usize) -> Option<SetInput> {
        let rows = self.rows.get_mut(&index)?;
        if row < rows.len() {
            Some(rows.remove(row))
        } else {
            None
        }
    }

    /// Empties the row in place, keeping its slot.
    pub fn reset_row(&mut self, index: usize, row: usize) -> Option<SetInput> {
        self.rows
            .get_mut(&index)
            .and_then(|rows| rows.get_mut(row))
            .map(std::mem::take)
    }

    pub fn remove_exercise(&mut self, index: usize) -> Option<Vec<SetInput>> {
        remove_index(&mut self.rows, index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[SetInput])> {
        self.rows.iter().map(|(index, rows)| (*index, rows.as_slice()))
    }

    /// Removes all rows, handing them out per exercise index.
    pub fn drain(&mut self) -> std::collections::btree_map::IntoIter<usize, Vec<SetInput>> {
        std::mem::take(&mut self.rows).into_iter()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    #[must_use]
    pub fn has_valid_rows(&self) -> bool {
        self.rows.values().flatten().any(SetInput::is_valid)
    }
}

impl FromIterator<(usize, Vec<SetInput>)> for SetInputBuffer {
    fn from_iter<I: IntoIterator<Item = (usize, Vec<SetInput>)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
