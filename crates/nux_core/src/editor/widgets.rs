//! Field widget behavior: choice fallback, spin ranges, field styling.

use std::fmt::Display;
use std::str::FromStr;

/// Visual state of a validated text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStyle {
    #[default]
    Normal,
    /// Highlighted as invalid (pink background). Advisory only.
    Invalid,
}

/// A choice widget that selects by value and falls back to a default option
/// when the value is not one of its choices.
#[derive(Debug, Clone, Copy)]
pub struct ChoiceByValue<T: 'static> {
    label: &'static str,
    choices: &'static [T],
    fallback: T,
}

impl<T> ChoiceByValue<T>
where
    T: Copy + PartialEq + FromStr + Display + 'static,
{
    pub fn new(label: &'static str, choices: &'static [T], fallback: T) -> Self {
        Self {
            label,
            choices,
            fallback,
        }
    }

    pub fn choices(&self) -> &'static [T] {
        self.choices
    }

    /// Index of the option named `raw`, or of the fallback option.
    pub fn index_of(&self, raw: &str) -> usize {
        let found = raw
            .parse::<T>()
            .ok()
            .and_then(|value| self.choices.iter().position(|c| *c == value));

        match found {
            Some(index) => index,
            None => {
                tracing::warn!(
                    "{} {:?} is not a known option, showing {} instead",
                    self.label,
                    raw,
                    self.fallback
                );
                self.fallback_index()
            }
        }
    }

    /// Option at `index`, if in range.
    pub fn value_at(&self, index: usize) -> Option<T> {
        self.choices.get(index).copied()
    }

    fn fallback_index(&self) -> usize {
        self.choices
            .iter()
            .position(|c| *c == self.fallback)
            .unwrap_or(0)
    }
}

/// Integer spin control range. Values outside the range are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinField {
    pub min: i64,
    pub max: i64,
}

impl SpinField {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

/// Update interval spinner, in seconds.
pub const INTERVAL_FIELD: SpinField = SpinField::new(10, 300);

/// Profitability switch threshold spinner, in percent.
pub const THRESHOLD_PERCENT_FIELD: SpinField = SpinField::new(1, 50);

/// Stored fraction to displayed percent.
pub fn threshold_to_percent(threshold: f64) -> i64 {
    (threshold * 100.0).round() as i64
}

/// Displayed percent to stored fraction.
pub fn percent_to_threshold(percent: i64) -> f64 {
    percent as f64 / 100.0
}
