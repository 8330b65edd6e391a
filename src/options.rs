//! Generation options: the read-only configuration every decoder borrows.
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Inclusive `min..=max` bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Element count of every variable-length sequence and map.
    pub sequence_length: usize,
    /// Character count of synthesized strings.
    pub string_length: Bounds<usize>,
    /// Shared by integer and floating-point synthesis.
    pub numeric_range: Bounds<i64>,
    /// strftime pattern for date fields; `None` uses the type's standard form.
    pub temporal_format: Option<String>,
    pub generate_optionals: bool,
    /// Fixed seed for reproducible output; fresh entropy when absent.
    pub seed: Option<u64>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl<T: Copy + PartialOrd> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self { Self { min, max } }

    pub fn is_empty(&self) -> bool { self.min > self.max }
}

impl<T: fmt::Display> fmt::Display for Bounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(-?\d+)\s*(?:\.\.=?\s*(-?\d+))?\s*$").expect("range pattern compiles")
});

/// Accepts `min..max`, `min..=max` (both inclusive) or a single `n` meaning `n..=n`.
impl<T> FromStr for Bounds<T>
where
    T: FromStr + Copy + PartialOrd,
    T::Err: fmt::Display,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = RANGE_RE
            .captures(s)
            .ok_or_else(|| format!("expected `min..max` or a single number, got `{s}`"))?;
        let min = caps[1].parse::<T>().map_err(|e| format!("bad lower bound in `{s}`: {e}"))?;
        let max = match caps.get(2) {
            Some(m) => m.as_str().parse::<T>().map_err(|e| format!("bad upper bound in `{s}`: {e}"))?,
            None => min,
        };
        let bounds = Bounds::new(min, max);
        if bounds.is_empty() {
            return Err(format!("lower bound exceeds upper bound in `{s}`"));
        }
        Ok(bounds)
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            sequence_length: 5,
            string_length: Bounds::new(5, 200),
            numeric_range: Bounds::new(5, 2000),
            temporal_format: None,
            generate_optionals: true,
            seed: None,
        }
    }
}

impl GenerateOptions {
    pub fn with_sequence_length(mut self, n: usize) -> Self {
        self.sequence_length = n;
        self
    }

    pub fn with_string_length(mut self, min: usize, max: usize) -> Self {
        self.string_length = Bounds::new(min, max);
        self
    }

    pub fn with_numeric_range(mut self, min: i64, max: i64) -> Self {
        self.numeric_range = Bounds::new(min, max);
        self
    }

    pub fn with_temporal_format(mut self, format: impl Into<String>) -> Self {
        self.temporal_format = Some(format.into());
        self
    }

    pub fn with_generate_optionals(mut self, on: bool) -> Self {
        self.generate_optionals = on;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load options from a JSON file; missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::invalid_options(format!("failed to read {}: {e}", path.display()))
        })?;
        crate::path_de::from_str_with_path::<Self>(&source).map_err(|e| {
            Error::invalid_options(format!("{}: {e}", path.display()))
        })
    }

    /// Checked once before a traversal starts, so synthesis itself never fails.
    pub fn validate(&self) -> Result<()> {
        if self.string_length.is_empty() {
            return Err(Error::invalid_options(format!(
                "string_length {} is empty", self.string_length
            )));
        }
        if self.numeric_range.is_empty() {
            return Err(Error::invalid_options(format!(
                "numeric_range {} is empty", self.numeric_range
            )));
        }
        if let Some(format) = &self.temporal_format {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                return Err(Error::invalid_options(format!(
                    "temporal_format `{format}` is not a valid strftime pattern"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = GenerateOptions::default();
        assert_eq!(o.sequence_length, 5);
        assert_eq!(o.string_length, Bounds::new(5, 200));
        assert_eq!(o.numeric_range, Bounds::new(5, 2000));
        assert_eq!(o.temporal_format, None);
        assert!(o.generate_optionals);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn parses_range_forms() {
        assert_eq!("5..200".parse::<Bounds<usize>>().unwrap(), Bounds::new(5, 200));
        assert_eq!("5..=200".parse::<Bounds<usize>>().unwrap(), Bounds::new(5, 200));
        assert_eq!("7".parse::<Bounds<usize>>().unwrap(), Bounds::new(7, 7));
        assert_eq!("-10..10".parse::<Bounds<i64>>().unwrap(), Bounds::new(-10, 10));
        assert!("10..1".parse::<Bounds<i64>>().is_err());
        assert!("abc".parse::<Bounds<i64>>().is_err());
        assert!("-1..3".parse::<Bounds<usize>>().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let o: GenerateOptions =
            serde_json::from_str(r#"{"sequence_length": 2, "generate_optionals": false}"#).unwrap();
        assert_eq!(o.sequence_length, 2);
        assert!(!o.generate_optionals);
        assert_eq!(o.numeric_range, Bounds::new(5, 2000));
    }

    #[test]
    fn rejects_empty_bounds_and_bad_formats() {
        let o = GenerateOptions::default().with_numeric_range(10, 1);
        assert!(matches!(o.validate(), Err(Error::InvalidOptions { .. })));
        let o = GenerateOptions::default().with_string_length(3, 2);
        assert!(matches!(o.validate(), Err(Error::InvalidOptions { .. })));
        let o = GenerateOptions::default().with_temporal_format("%Q");
        assert!(matches!(o.validate(), Err(Error::InvalidOptions { .. })));
        let o = GenerateOptions::default().with_temporal_format("%Y-%m");
        assert!(o.validate().is_ok());
    }
}
