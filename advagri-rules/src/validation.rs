//! Self-correcting validation for integer rules constrained to multiples of a base unit.
//!
//! Proposed values are never rejected. A value at or below the base unit snaps
//! to the base unit, a value that does not divide evenly rounds up to the next
//! multiple, and anything else passes through untouched. The correction events
//! describe what happened so the host can tell whoever made the change.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Errors raised when the base unit itself is unusable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("base unit must be positive (got {value})")]
    NonPositiveBaseUnit { value: i32 },
    #[error("base unit count {count} does not fit in a rule value")]
    BaseUnitOverflow { count: usize },
}

/// Positive granularity every constrained value must divide evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct BaseUnit(i32);

impl BaseUnit {
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NonPositiveBaseUnit`] when `value <= 0`.
    pub const fn new(value: i32) -> Result<Self, ConfigurationError> {
        if value <= 0 {
            return Err(ConfigurationError::NonPositiveBaseUnit { value });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Classify `proposed` and compute the value that should be stored.
    #[must_use]
    pub fn validate(self, proposed: i32) -> Validation {
        let unit = self.0;
        let mut events = SmallVec::new();

        if proposed <= unit {
            events.push(CorrectionEvent::BelowMinimum);
            return Validation {
                proposed,
                final_value: unit,
                verdict: Verdict::BelowMinimum,
                events,
            };
        }

        if proposed % unit != 0 {
            let corrected = self.next_multiple(proposed);
            events.push(CorrectionEvent::NotAMultiple { original: proposed });
            events.push(CorrectionEvent::CorrectedTo { value: corrected });
            return Validation {
                proposed,
                final_value: corrected,
                verdict: Verdict::NotAMultiple,
                events,
            };
        }

        Validation {
            proposed,
            final_value: proposed,
            verdict: Verdict::Valid,
            events,
        }
    }

    /// Smallest multiple of the unit that is `>= value`, for `value > unit`.
    ///
    /// When that multiple is not representable the largest representable
    /// multiple is used instead.
    fn next_multiple(self, value: i32) -> i32 {
        let unit = self.0;
        let remainder = value % unit;
        if remainder == 0 {
            return value;
        }
        value
            .checked_add(unit - remainder)
            .unwrap_or(i32::MAX - i32::MAX % unit)
    }
}

impl TryFrom<i32> for BaseUnit {
    type Error = ConfigurationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BaseUnit> for i32 {
    fn from(unit: BaseUnit) -> Self {
        unit.0
    }
}

/// Which branch of the decision table a proposal fell into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    BelowMinimum,
    NotAMultiple,
    Valid,
}

/// Notification describing one automatic adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorrectionEvent {
    /// The value did not exceed one full cycle of the base unit.
    BelowMinimum,
    NotAMultiple { original: i32 },
    CorrectedTo { value: i32 },
}

/// Outcome of validating one proposed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub proposed: i32,
    pub final_value: i32,
    pub verdict: Verdict,
    pub events: SmallVec<[CorrectionEvent; 2]>,
}

impl Validation {
    /// Whether the stored value must be rewritten and the events delivered.
    #[must_use]
    pub fn needs_write_back(&self) -> bool {
        self.verdict != Verdict::Valid
    }
}

/// Validate `proposed` against a raw base unit.
///
/// # Errors
///
/// Returns [`ConfigurationError`] when `base_unit` is not positive. No value of
/// `proposed` can fail.
pub fn validate(proposed: i32, base_unit: i32) -> Result<Validation, ConfigurationError> {
    Ok(BaseUnit::new(base_unit)?.validate(proposed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(value: i32) -> BaseUnit {
        BaseUnit::new(value).unwrap()
    }

    #[test]
    fn rejects_non_positive_base_unit() {
        assert_eq!(
            validate(10, 0),
            Err(ConfigurationError::NonPositiveBaseUnit { value: 0 })
        );
        assert_eq!(
            validate(10, -24),
            Err(ConfigurationError::NonPositiveBaseUnit { value: -24 })
        );
    }

    #[test]
    fn value_equal_to_unit_is_below_minimum() {
        let outcome = unit(4).validate(4);
        assert_eq!(outcome.verdict, Verdict::BelowMinimum);
        assert_eq!(outcome.final_value, 4);
        assert_eq!(outcome.events.as_slice(), &[CorrectionEvent::BelowMinimum]);
        assert!(outcome.needs_write_back());
    }

    #[test]
    fn negative_and_zero_snap_to_unit() {
        for proposed in [i32::MIN, -48, -1, 0, 1, 23] {
            let outcome = unit(24).validate(proposed);
            assert_eq!(outcome.final_value, 24, "proposed {proposed}");
            assert_eq!(outcome.events.len(), 1);
        }
    }

    #[test]
    fn rounds_up_to_next_multiple() {
        let outcome = unit(4).validate(5);
        assert_eq!(outcome.verdict, Verdict::NotAMultiple);
        assert_eq!(outcome.final_value, 8);
        assert_eq!(
            outcome.events.as_slice(),
            &[
                CorrectionEvent::NotAMultiple { original: 5 },
                CorrectionEvent::CorrectedTo { value: 8 },
            ]
        );
    }

    #[test]
    fn multiples_above_unit_pass_through() {
        for proposed in [8, 12, 400] {
            let outcome = unit(4).validate(proposed);
            assert_eq!(outcome.verdict, Verdict::Valid);
            assert_eq!(outcome.final_value, proposed);
            assert!(outcome.events.is_empty());
            assert!(!outcome.needs_write_back());
        }
    }

    #[test]
    fn solar_year_scenarios() {
        let year = unit(24);
        assert_eq!(year.validate(24).verdict, Verdict::BelowMinimum);
        assert_eq!(year.validate(24).final_value, 24);
        assert_eq!(year.validate(30).final_value, 48);
        assert_eq!(year.validate(47).final_value, 48);
        assert_eq!(year.validate(49).final_value, 72);
        assert_eq!(year.validate(48).verdict, Verdict::Valid);
    }

    #[test]
    fn unit_of_one_accepts_everything_above_one() {
        assert_eq!(unit(1).validate(1).verdict, Verdict::BelowMinimum);
        assert_eq!(unit(1).validate(2).verdict, Verdict::Valid);
    }

    #[test]
    fn overflowing_round_up_uses_largest_representable_multiple() {
        let outcome = unit(24).validate(i32::MAX);
        assert_eq!(outcome.verdict, Verdict::NotAMultiple);
        assert_eq!(outcome.final_value % 24, 0);
        assert!(outcome.final_value > i32::MAX - 24);
        assert_eq!(unit(24).validate(outcome.final_value).verdict, Verdict::Valid);
    }

    #[test]
    fn results_are_multiples_and_idempotent() {
        for base in 1..=30 {
            let base_unit = unit(base);
            for proposed in -60..=200 {
                let first = base_unit.validate(proposed);
                assert_eq!(first.final_value % base, 0);
                assert!(first.final_value >= base);
                assert!(first.final_value > base || proposed <= base);
                assert!(
                    first.verdict != Verdict::NotAMultiple || first.final_value >= proposed,
                    "never rounds down"
                );
                let second = base_unit.validate(first.final_value);
                if first.final_value > base {
                    assert_eq!(second.verdict, Verdict::Valid);
                    assert!(second.events.is_empty());
                }
                assert_eq!(second.final_value, first.final_value);
            }
        }
    }

    #[test]
    fn base_unit_deserializes_with_validation() {
        let parsed: BaseUnit = serde_json::from_str("24").unwrap();
        assert_eq!(parsed.get(), 24);
        assert!(serde_json::from_str::<BaseUnit>("0").is_err());
    }
}
