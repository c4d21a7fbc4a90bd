use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// The four validated configuration fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKey {
    CellCount,
    Multiple,
    Speed,
    ColumnCount,
}

impl FieldKey {
    /// Priority order for focus and "first invalid" queries. Cell count comes
    /// first because the bounds of multiple and column count depend on it.
    pub const ORDER: [FieldKey; 4] = [
        FieldKey::CellCount,
        FieldKey::Multiple,
        FieldKey::Speed,
        FieldKey::ColumnCount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::CellCount => "cell-count",
            FieldKey::Multiple => "multiple",
            FieldKey::Speed => "speed",
            FieldKey::ColumnCount => "column-count",
        }
    }

    /// Fields whose bounds are derived from this one.
    pub fn dependents(self) -> &'static [FieldKey] {
        match self {
            FieldKey::CellCount => &[FieldKey::Multiple, FieldKey::ColumnCount],
            _ => &[],
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cell-count" => Ok(FieldKey::CellCount),
            "multiple" => Ok(FieldKey::Multiple),
            "speed" => Ok(FieldKey::Speed),
            "column-count" => Ok(FieldKey::ColumnCount),
            other => Err(format!("unknown field key '{}'", other)),
        }
    }
}

/// Phrasing of the bound-violation message. Does not change pass/fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundStyle {
    /// "Must be a number between X and Y"
    Range,
    /// "Must be a number less than or equal to Y"
    Max,
}

/// A field validation failure: the only error kind in the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub key: FieldKey,
    pub message: String,
}

impl FieldError {
    pub fn new(key: FieldKey, message: impl Into<String>) -> Self {
        Self {
            key,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

impl std::error::Error for FieldError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_from_their_own_names() {
        for key in FieldKey::ORDER {
            assert_eq!(key.as_str().parse::<FieldKey>(), Ok(key));
        }
        assert!("rows".parse::<FieldKey>().is_err());
    }

    #[test]
    fn keys_serialize_kebab_case() {
        let json = serde_json::to_string(&FieldKey::ColumnCount).unwrap();
        assert_eq!(json, "\"column-count\"");
    }

    #[test]
    fn error_display_names_the_field() {
        let err = FieldError::new(FieldKey::Multiple, "Must not be zero");
        assert_eq!(err.to_string(), "multiple: Must not be zero");
    }
}
