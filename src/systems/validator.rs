//! Validator - counting-integer checks for the configuration fields
//!
//! Rules, first failure wins:
//! 1. the text is an integer (`-?[0-9]+`)
//! 2. not negative
//! 3. not zero
//! 4. within `[lower, upper]` (values above `upper` may be clamped instead)
//!
//! Results are recorded per field in a `ValidityMap` that the controller
//! consults before any dependent recomputation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::fields::{BoundStyle, FieldError, FieldKey};

pub const MSG_NOT_A_NUMBER: &str = "Must be a number";
pub const MSG_NEGATIVE: &str = "Must not be negative";
pub const MSG_ZERO: &str = "Must not be zero";

/// Bounds and message style for one counting field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountRule {
    pub lower: u32,
    /// `None` when the upper bound is itself unknown (e.g. its source field
    /// is invalid); only the message changes.
    pub upper: Option<u32>,
    pub style: BoundStyle,
    pub reset_to_max: bool,
}

impl CountRule {
    pub fn range(lower: u32, upper: u32) -> Self {
        Self {
            lower,
            upper: Some(upper),
            style: BoundStyle::Range,
            reset_to_max: false,
        }
    }

    pub fn max(upper: Option<u32>) -> Self {
        Self {
            lower: 1,
            upper,
            style: BoundStyle::Max,
            reset_to_max: false,
        }
    }

    /// Clamp values above the upper bound instead of rejecting them.
    pub fn with_reset_to_max(mut self) -> Self {
        self.reset_to_max = true;
        self
    }

    fn bound_message(&self) -> String {
        match (self.upper, self.style) {
            (Some(upper), BoundStyle::Range) if upper > 0 && self.lower > 0 => {
                format!("Must be a number between {} and {}", self.lower, upper)
            }
            (Some(upper), BoundStyle::Max) if upper > 0 => {
                format!("Must be a number less than or equal to {}", upper)
            }
            _ => MSG_NOT_A_NUMBER.to_string(),
        }
    }
}

fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Check a raw field value against `rule`. On success returns the accepted
/// value, which is `upper` when the value was clamped.
pub fn check_count(raw: &str, rule: &CountRule) -> Result<u32, String> {
    let text = raw.trim();
    if !is_integer_text(text) {
        return Err(MSG_NOT_A_NUMBER.to_string());
    }

    // Only overflow can fail once the pattern matched
    let value = text.parse::<i64>().unwrap_or(if text.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    });

    if value < 0 {
        return Err(MSG_NEGATIVE.to_string());
    }
    if value == 0 {
        return Err(MSG_ZERO.to_string());
    }

    let upper = rule.upper.map(i64::from).unwrap_or(i64::MAX);
    if value < rule.lower as i64 {
        return Err(rule.bound_message());
    }
    if value > upper {
        return match rule.upper {
            Some(upper) if rule.reset_to_max => Ok(upper),
            _ => Err(rule.bound_message()),
        };
    }
    Ok(value as u32)
}

/// Per-field validity plus the message of every invalid field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidityMap {
    valid: BTreeMap<FieldKey, bool>,
    messages: BTreeMap<FieldKey, String>,
}

impl Default for ValidityMap {
    fn default() -> Self {
        Self {
            valid: FieldKey::ORDER.iter().map(|key| (*key, true)).collect(),
            messages: BTreeMap::new(),
        }
    }
}

impl ValidityMap {
    pub fn is_valid(&self, key: FieldKey) -> bool {
        self.valid.get(&key).copied().unwrap_or(true)
    }

    pub fn message(&self, key: FieldKey) -> Option<&str> {
        self.messages.get(&key).map(String::as_str)
    }

    pub fn all_valid(&self) -> bool {
        self.valid.values().all(|v| *v)
    }

    pub fn first_invalid_key(&self) -> Option<FieldKey> {
        FieldKey::ORDER.into_iter().find(|key| !self.is_valid(*key))
    }

    /// Invalid fields in priority order.
    pub fn errors(&self) -> Vec<FieldError> {
        FieldKey::ORDER
            .into_iter()
            .filter_map(|key| {
                self.messages
                    .get(&key)
                    .map(|message| FieldError::new(key, message.clone()))
            })
            .collect()
    }

    fn record(&mut self, key: FieldKey, result: &Result<u32, String>) {
        match result {
            Ok(_) => {
                self.valid.insert(key, true);
                self.messages.remove(&key);
            }
            Err(message) => {
                self.valid.insert(key, false);
                self.messages.insert(key, message.clone());
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Validator {
    map: ValidityMap,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&self) -> &ValidityMap {
        &self.map
    }

    /// Validate `raw` for `key` and record the outcome.
    pub fn validate_count_field(
        &mut self,
        key: FieldKey,
        raw: &str,
        rule: &CountRule,
    ) -> Result<u32, FieldError> {
        let result = check_count(raw, rule);
        self.map.record(key, &result);
        log::debug!("{} '{}' is valid? {}", key, raw, result.is_ok());
        result.map_err(|message| FieldError::new(key, message))
    }

    pub fn is_valid(&self, key: FieldKey) -> bool {
        self.map.is_valid(key)
    }

    pub fn all_valid(&self) -> bool {
        self.map.all_valid()
    }

    pub fn first_invalid_key(&self) -> Option<FieldKey> {
        self.map.first_invalid_key()
    }

    pub fn reset(&mut self) {
        self.map = ValidityMap::default();
    }
}
