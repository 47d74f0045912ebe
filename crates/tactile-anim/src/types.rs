//! Core animation types and data structures.
//!
//! This module defines the fundamental types shared by the engine:
//! - `RunId`: unique identifier for one execution of a descriptor
//! - `StyleValue`: a numeric or textual value template
//! - `TimeSpan`: a duration in milliseconds, parsed from CSS time text
//! - `IterationCount`: how many times a keyframe run repeats

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Unique identifier for an animation run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RunId(pub u64);

impl RunId {
    /// Generate a new process-unique run ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors raised while parsing CSS-text forms of animation parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The text is not a valid CSS time (`"1s"`, `"300ms"`, `"250"`).
    #[error("invalid time value: {0:?}")]
    InvalidTime(String),
    /// The text is not a valid keyframe selector (`"from"`, `"to"`, `"35%"`).
    #[error("invalid keyframe offset: {0:?}")]
    InvalidOffset(String),
    /// The text is not a recognized timing function.
    #[error("invalid timing function: {0:?}")]
    InvalidEasing(String),
}

/// A value template: either a bare number or a text fragment that may carry
/// units and substitution placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Numeric value, passed through resolution unchanged.
    Number(f64),
    /// Text value, subject to macro and placeholder substitution.
    Text(String),
}

impl StyleValue {
    /// Try to extract a numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to extract the text form.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Render this value as CSS text.
    ///
    /// Numbers get `default_unit` appended when one is given; text is
    /// emitted verbatim.
    pub fn render(&self, default_unit: Option<&str>) -> String {
        match self {
            Self::Number(n) => match default_unit {
                Some(unit) => format!("{}{}", format_number(*n), unit),
                None => format_number(*n),
            },
            Self::Text(t) => t.clone(),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for StyleValue {
    fn from(v: i32) -> Self {
        Self::Number(v as f64)
    }
}

impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// A duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSpan(pub f64);

impl TimeSpan {
    /// The zero duration.
    pub const ZERO: TimeSpan = TimeSpan(0.0);

    /// Build from milliseconds.
    pub fn ms(value: f64) -> Self {
        Self(value)
    }

    /// Build from seconds.
    pub fn seconds(value: f64) -> Self {
        Self(value * 1000.0)
    }

    /// Milliseconds value.
    pub fn as_ms(&self) -> f64 {
        self.0
    }

    /// Whether this span is zero (or negative, which CSS treats as zero).
    pub fn is_zero(&self) -> bool {
        self.0 <= 0.0
    }

    /// Parse a CSS time value: `"1s"`, `"300ms"`, or a bare millisecond
    /// count.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let text = text.trim();
        let (digits, scale) = if let Some(d) = text.strip_suffix("ms") {
            (d, 1.0)
        } else if let Some(d) = text.strip_suffix('s') {
            (d, 1000.0)
        } else {
            (text, 1.0)
        };
        digits
            .trim()
            .parse::<f64>()
            .map(|v| Self(v * scale))
            .map_err(|_| ParseError::InvalidTime(text.to_string()))
    }

    /// Render as CSS text in milliseconds.
    pub fn to_css(&self) -> String {
        format!("{}ms", format_number(self.0.max(0.0)))
    }
}

/// How many times a keyframe run should repeat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IterationCount {
    /// Run a specific number of times (can be fractional).
    Count { count: f32 },
    /// Run indefinitely.
    Infinite,
}

impl Default for IterationCount {
    fn default() -> Self {
        Self::Count { count: 1.0 }
    }
}

impl IterationCount {
    /// Render as CSS `animation-iteration-count` text.
    pub fn to_css(&self) -> String {
        match self {
            Self::Infinite => "infinite".to_string(),
            Self::Count { count } => format_number(*count as f64),
        }
    }
}

/// Format a number the way CSS text expects: no trailing `.0`, no
/// exponent notation for the magnitudes animations use.
pub(crate) fn format_number(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
