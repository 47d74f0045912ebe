//! Animation descriptors: immutable, reusable templates.
//!
//! A descriptor declares what an animation does without binding it to any
//! target: ordered (property, value) pairs, an optional keyframe sequence,
//! and timing parameters. The same descriptor can be processed against many
//! targets concurrently; each run resolves its own snapshot.
//!
//! # Example
//!
//! ```
//! use tactile_anim::descriptor::AnimationDescriptor;
//!
//! // A fade-out keyframe animation
//! let fade = AnimationDescriptor::new()
//!     .frame("from", |kf| kf.set("opacity", 1.0))
//!     .frame("to", |kf| kf.set("opacity", 0.0))
//!     .duration_ms(500.0);
//! assert!(fade.is_complex());
//!
//! // A plain transition
//! let slide = AnimationDescriptor::new()
//!     .property("translateX", "0px")
//!     .duration_ms(300.0);
//! assert!(!slide.is_complex());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::easing::Easing;
use crate::types::{IterationCount, ParseError, StyleValue, TimeSpan};

/// A single keyframe: property values at one point of the timeline.
///
/// `offset` runs from 0.0 (CSS `from` / `0%`) to 1.0 (`to` / `100%`).
/// Values keep their declaration order; order matters when transform
/// components are merged into one `transform` declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position in the timeline (0.0 to 1.0).
    pub offset: f32,
    /// Ordered property values at this keyframe.
    pub values: Vec<(String, StyleValue)>,
}

impl Keyframe {
    /// Create a new keyframe at the given offset.
    pub fn new(offset: f32) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            values: Vec::new(),
        }
    }

    /// Set a property value, replacing an earlier declaration of the same
    /// property in place.
    pub fn set(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        let property = property.into();
        let value = value.into();
        if let Some(slot) = self.values.iter_mut().find(|(p, _)| *p == property) {
            slot.1 = value;
        } else {
            self.values.push((property, value));
        }
        self
    }

    /// Get a property value from this keyframe.
    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.values
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v)
    }

    /// Parse a CSS keyframe selector: `from`, `to`, or a percentage.
    pub fn offset_from_css(selector: &str) -> Result<f32, ParseError> {
        let selector = selector.trim();
        match selector {
            "from" => Ok(0.0),
            "to" => Ok(1.0),
            other => other
                .strip_suffix('%')
                .and_then(|digits| digits.trim().parse::<f32>().ok())
                .filter(|pct| (0.0..=100.0).contains(pct))
                .map(|pct| pct / 100.0)
                .ok_or_else(|| ParseError::InvalidOffset(selector.to_string())),
        }
    }
}

/// Declarative template of one animation.
///
/// Descriptors are immutable once built and reusable across many runs. A
/// descriptor with a keyframe at offset 0 is *complex* (keyframe path);
/// anything else is *simple* (transition path).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationDescriptor {
    /// Ordered (property, value template) pairs for the transition path.
    pub properties: Vec<(String, StyleValue)>,
    /// Keyframes for the keyframe path, kept sorted by offset.
    pub keyframes: Vec<Keyframe>,
    /// Durations, comma-list semantics; empty means the engine default.
    pub durations: Vec<TimeSpan>,
    /// Delay before the run starts.
    pub delay: TimeSpan,
    /// Timing functions, comma-list semantics; empty means the engine
    /// default.
    pub timing: Vec<Easing>,
    /// Iteration count for keyframe runs.
    pub iterations: IterationCount,
    /// Optional `transform-origin` applied at run start.
    pub transform_origin: Option<String>,
    /// When true, the resolved transform composes after the target's
    /// current transform instead of replacing it.
    pub additive: bool,
    /// Fallback values for `${name}` placeholders.
    pub params: HashMap<String, String>,
}

impl AnimationDescriptor {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a (property, value) pair, keeping declaration order.
    pub fn property(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.properties.push((property.into(), value.into()));
        self
    }

    /// Add a keyframe at a numeric offset using a builder function.
    pub fn keyframe<F>(mut self, offset: f32, builder: F) -> Self
    where
        F: FnOnce(Keyframe) -> Keyframe,
    {
        let kf = builder(Keyframe::new(offset));
        self.keyframes.push(kf);
        self.keyframes.sort_by(|a, b| {
            a.offset
                .partial_cmp(&b.offset)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self
    }

    /// Add a keyframe by CSS selector (`"from"`, `"to"`, `"35%"`).
    ///
    /// Invalid selectors are dropped with a warning rather than panicking;
    /// descriptors are often assembled from external data.
    pub fn frame<F>(self, selector: &str, builder: F) -> Self
    where
        F: FnOnce(Keyframe) -> Keyframe,
    {
        match Keyframe::offset_from_css(selector) {
            Ok(offset) => self.keyframe(offset, builder),
            Err(err) => {
                tracing::warn!("dropping keyframe: {err}");
                self
            }
        }
    }

    /// Set a single duration in milliseconds.
    pub fn duration_ms(mut self, duration: f64) -> Self {
        self.durations = vec![TimeSpan::ms(duration)];
        self
    }

    /// Append one duration to the comma list.
    pub fn push_duration(mut self, duration: TimeSpan) -> Self {
        self.durations.push(duration);
        self
    }

    /// Set the start delay in milliseconds.
    pub fn delay_ms(mut self, delay: f64) -> Self {
        self.delay = TimeSpan::ms(delay);
        self
    }

    /// Set a single timing function.
    pub fn timing(mut self, easing: Easing) -> Self {
        self.timing = vec![easing];
        self
    }

    /// Append one timing function to the comma list.
    pub fn push_timing(mut self, easing: Easing) -> Self {
        self.timing.push(easing);
        self
    }

    /// Set the iteration count.
    pub fn iterations(mut self, iterations: IterationCount) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the transform origin.
    pub fn transform_origin(mut self, origin: impl Into<String>) -> Self {
        self.transform_origin = Some(origin.into());
        self
    }

    /// Set the additive flag.
    pub fn additive(mut self, additive: bool) -> Self {
        self.additive = additive;
        self
    }

    /// Provide a fallback value for a `${name}` placeholder.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// A descriptor is complex exactly when it declares a keyframe at
    /// offset 0; complex descriptors take the keyframe path.
    pub fn is_complex(&self) -> bool {
        self.keyframes.iter().any(|kf| kf.offset == 0.0)
    }

    /// The keyframe with the highest offset, whose values are the run's
    /// terminal state.
    pub fn terminal_frame(&self) -> Option<&Keyframe> {
        self.keyframes.last()
    }

    /// All properties named by this descriptor, in first-seen order.
    pub fn declared_properties(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        let pairs = self
            .properties
            .iter()
            .map(|(p, _)| p)
            .chain(self.keyframes.iter().flat_map(|kf| {
                kf.values.iter().map(|(p, _)| p)
            }));
        for property in pairs {
            if !seen.contains(&property.as_str()) {
                seen.push(property.as_str());
            }
        }
        seen
    }
}
