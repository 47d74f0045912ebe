//! Timing functions for animation pacing.
//!
//! This module carries the CSS timing-function vocabulary:
//! - Linear
//! - Ease, EaseIn, EaseOut, EaseInOut (standard CSS curves)
//! - CubicBezier (custom curves)
//! - Steps (stepped animations)
//!
//! The engine never evaluates these numerically; they are rendered to CSS
//! text and handed to the platform, which owns interpolation.

use serde::{Deserialize, Serialize};

use crate::types::ParseError;

/// Position for stepped animations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPosition {
    /// Jump at the start of each interval (CSS `jump-start` / `start`).
    Start,
    /// Jump at the end of each interval (CSS `jump-end` / `end`).
    End,
    /// Jump at both start and end (CSS `jump-both`).
    Both,
    /// No jump at start or end (CSS `jump-none`).
    None,
}

impl Default for StepPosition {
    fn default() -> Self {
        Self::End
    }
}

impl StepPosition {
    fn to_css(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Both => "jump-both",
            Self::None => "jump-none",
        }
    }
}

/// Timing function for a transition or keyframe run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,

    /// CSS `ease` - slow start, fast middle, slow end.
    Ease,

    /// CSS `ease-in` - slow start, accelerating.
    EaseIn,

    /// CSS `ease-out` - fast start, decelerating.
    EaseOut,

    /// CSS `ease-in-out` - slow start and end, fast middle.
    EaseInOut,

    /// Custom cubic bezier curve. x values must be in [0, 1].
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },

    /// Stepped animation with discrete jumps; `count` must be >= 1.
    Steps { count: u32, position: StepPosition },
}

impl Default for Easing {
    fn default() -> Self {
        Self::Ease
    }
}

impl Easing {
    /// Create a custom cubic bezier easing function.
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::CubicBezier {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// Create a stepped easing function.
    pub fn steps(count: u32, position: StepPosition) -> Self {
        Self::Steps {
            count: count.max(1),
            position,
        }
    }

    /// Render as CSS `transition-timing-function` /
    /// `animation-timing-function` text.
    pub fn to_css(&self) -> String {
        match self {
            Self::Linear => "linear".to_string(),
            Self::Ease => "ease".to_string(),
            Self::EaseIn => "ease-in".to_string(),
            Self::EaseOut => "ease-out".to_string(),
            Self::EaseInOut => "ease-in-out".to_string(),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                format!("cubic-bezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
            Self::Steps { count, position } => {
                format!("steps({}, {})", count, position.to_css())
            }
        }
    }

    /// Parse the keyword timing functions from CSS text.
    ///
    /// Bezier and step notations come from descriptors as structured data,
    /// so only the keyword forms are accepted here.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        match text.trim() {
            "linear" => Ok(Self::Linear),
            "ease" => Ok(Self::Ease),
            "ease-in" => Ok(Self::EaseIn),
            "ease-out" => Ok(Self::EaseOut),
            "ease-in-out" => Ok(Self::EaseInOut),
            other => Err(ParseError::InvalidEasing(other.to_string())),
        }
    }
}
