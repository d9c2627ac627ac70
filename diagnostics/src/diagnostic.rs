//! Diagnostic records and severity resolution.
//!
//! A [`Diagnostic`] is a single issue reported by an external producer
//! (linter, compiler, language server). This module also owns severity
//! resolution: mapping names and ordinals to [`Severity`], and resolving
//! [`SeverityFilter`] range bounds.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Severity levels, ordered from most severe to least severe.
///
/// `Error` is ordinal 1 and `Hint` is ordinal 4, so "more severe" means
/// numerically smaller. Derived `Ord` follows declaration order, which makes
/// `min_by_key` pick the most severe diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error = 1,
    Warning = 2,
    Information = 3,
    Hint = 4,
}

impl Severity {
    /// Resolve a severity name, case-insensitively.
    ///
    /// Both the short (`warn`, `info`) and long (`warning`, `information`)
    /// spellings are accepted.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warn" | "warning" => Ok(Severity::Warning),
            "info" | "information" => Ok(Severity::Information),
            "hint" => Ok(Severity::Hint),
            _ => Err(Error::InvalidSeverity {
                name: name.to_string(),
            }),
        }
    }

    /// Resolve an ordinal in `1..=4`.
    pub fn from_ordinal(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Severity::Error),
            2 => Ok(Severity::Warning),
            3 => Ok(Severity::Information),
            4 => Ok(Severity::Hint),
            _ => Err(Error::InvalidOrdinal { value }),
        }
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Information => "information",
            Severity::Hint => "hint",
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        // Producers write severities either as names or as ordinals.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Ordinal(u8),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Ordinal(value) => Severity::from_ordinal(value).map_err(serde::de::Error::custom),
            Repr::Name(name) => Severity::from_name(&name).map_err(serde::de::Error::custom),
        }
    }
}

/// A single reported issue, anchored to a buffer line.
///
/// Read-only to the render pipeline: formatting steps work on clones, so the
/// caller's records are never rewritten in place. Sorting during
/// [`show`](crate::render::show) reorders the caller's list by contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Row the annotation attaches to (0-based).
    pub line: u32,
    /// Inclusive end of a multi-line range. Must be `>= line` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    /// Column (0-based). Used only as a sort tie-break.
    #[serde(default)]
    pub column: u32,
    /// Severity level.
    pub severity: Severity,
    /// Message text. May contain carriage returns and newlines; composition
    /// strips and collapses them.
    pub message: String,
    /// Origin label, e.g. the producing tool's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Short identifier, e.g. "E0308".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Diagnostic {
    /// Whether this diagnostic covers `row`.
    ///
    /// A ranged diagnostic covers every row in `[line, end_line]` inclusive;
    /// one without `end_line` covers only its own line.
    pub fn covers_line(&self, row: u32) -> bool {
        match self.end_line {
            Some(end) => self.line <= row && row <= end,
            None => self.line == row,
        }
    }
}

/// Severity predicate for filtering: a single level or a range of levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeverityFilter {
    /// Keep only diagnostics at exactly this level.
    Exact(Severity),
    /// Keep levels between the bounds. `min` is the *least severe* level
    /// allowed (defaulting to `Hint`) and `max` the *most severe*
    /// (defaulting to `Error`), consistent with `Error` being ordinal 1.
    Range {
        min: Option<Severity>,
        max: Option<Severity>,
    },
}

impl SeverityFilter {
    /// Resolve to `(least_severe_bound, most_severe_bound)`.
    pub fn bounds(&self) -> (Severity, Severity) {
        match self {
            SeverityFilter::Exact(severity) => (*severity, *severity),
            SeverityFilter::Range { min, max } => (
                min.unwrap_or(Severity::Hint),
                max.unwrap_or(Severity::Error),
            ),
        }
    }

    /// Whether `severity` passes this filter.
    pub fn admits(&self, severity: Severity) -> bool {
        let (least, most) = self.bounds();
        severity <= least && severity >= most
    }
}
