use chrono::{DateTime, Utc};
use derive_more::{Display, Into};

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() || !(0.0..10_000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 9999.9")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// Duration of a set in seconds.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time(f32);

impl Time {
    pub fn new(value: f32) -> Result<Self, TimeError> {
        if !value.is_finite() || value < 0.0 {
            return Err(TimeError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Time {
    type Error = TimeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_time(value).ok_or(TimeError::ParseError)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TimeError {
    #[error("Time must not be negative")]
    OutOfRange,
    #[error("Time must be given as M:SS or seconds")]
    ParseError,
}

/// Parses user input in the forms `M:SS`, integer seconds or decimal seconds, tried in this order.
#[must_use]
pub fn parse_time(value: &str) -> Option<Time> {
    let value = value.trim();

    if let Some((minutes, seconds)) = value.split_once(':') {
        let minutes = minutes.parse::<u32>().ok()?;
        let seconds = seconds.parse::<u32>().ok()?;
        let total = minutes.checked_mul(60)?.checked_add(seconds)?;
        #[allow(clippy::cast_precision_loss)]
        return Time::new(total as f32).ok();
    }

    if let Ok(seconds) = value.parse::<u32>() {
        #[allow(clippy::cast_precision_loss)]
        return Time::new(seconds as f32).ok();
    }

    value
        .parse::<f32>()
        .ok()
        .and_then(|seconds| Time::new(seconds).ok())
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Distance(f32);

impl Distance {
    pub fn new(value: f32) -> Result<Self, DistanceError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DistanceError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Distance {
    type Error = DistanceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Distance::new(parsed_value),
            Err(_) => Err(DistanceError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DistanceError {
    #[error("Distance must not be negative")]
    OutOfRange,
    #[error("Distance must be a decimal")]
    ParseError,
}

/// One completed set of an exercise.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetRecord {
    pub reps: Option<Reps>,
    pub weight: Option<Weight>,
    pub time: Option<Time>,
    pub distance: Option<Distance>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl SetRecord {
    /// A record must carry at least one measurement to be committed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.reps.is_some()
            || self.weight.is_some()
            || self.time.is_some()
            || self.distance.is_some()
    }

    /// `reps * weight`, only if both are present.
    #[must_use]
    pub fn volume(&self) -> Option<f32> {
        match (self.reps, self.weight) {
            #[allow(clippy::cast_precision_loss)]
            (Some(reps), Some(weight)) => Some(u32::from(reps) as f32 * f32::from(weight)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("9:15", Some(555.0))]
    #[case("0:05", Some(5.0))]
    #[case("90", Some(90.0))]
    #[case(" 45 ", Some(45.0))]
    #[case("60.5", Some(60.5))]
    #[case("abc", None)]
    #[case("1:", None)]
    #[case(":30", None)]
    #[case("1:3.5", None)]
    #[case("-5", None)]
    #[case("NaN", None)]
    #[case("", None)]
    fn test_parse_time(#[case] value: &str, #[case] expected: Option<f32>) {
        assert_eq!(parse_time(value).map(f32::from), expected);
    }

    #[rstest]
    #[case("10", Ok(Reps(10)))]
    #[case(" 8 ", Ok(Reps(8)))]
    #[case("1000", Err(RepsError::OutOfRange))]
    #[case("5.5", Err(RepsError::ParseError))]
    #[case("", Err(RepsError::ParseError))]
    fn test_reps_try_from(#[case] value: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(value), expected);
    }

    #[rstest]
    #[case("100", Ok(Weight(100.0)))]
    #[case("52.25", Ok(Weight(52.25)))]
    #[case("-1", Err(WeightError::OutOfRange))]
    #[case("inf", Err(WeightError::OutOfRange))]
    #[case("heavy", Err(WeightError::ParseError))]
    fn test_weight_try_from(#[case] value: &str, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::try_from(value), expected);
    }

    #[rstest]
    #[case("5", Ok(Distance(5.0)))]
    #[case("0.4", Ok(Distance(0.4)))]
    #[case("-0.4", Err(DistanceError::OutOfRange))]
    #[case("far", Err(DistanceError::ParseError))]
    fn test_distance_try_from(
        #[case] value: &str,
        #[case] expected: Result<Distance, DistanceError>,
    ) {
        assert_eq!(Distance::try_from(value), expected);
    }

    #[test]
    fn test_set_record_is_valid() {
        assert!(!SetRecord::default().is_valid());
        assert!(
            !SetRecord {
                timestamp: Some(Utc::now()),
                ..SetRecord::default()
            }
            .is_valid()
        );
        assert!(
            SetRecord {
                distance: Some(Distance(1.0)),
                ..SetRecord::default()
            }
            .is_valid()
        );
    }

    #[test]
    fn test_set_record_volume() {
        let record = SetRecord {
            reps: Some(Reps(10)),
            weight: Some(Weight(100.0)),
            ..SetRecord::default()
        };
        assert_approx_eq!(record.volume().unwrap(), 1000.0);
        assert_eq!(
            SetRecord {
                reps: Some(Reps(10)),
                ..SetRecord::default()
            }
            .volume(),
            None
        );
    }
}
