//! Platform collaborator traits and completion signals.
//!
//! The engine does not own any rendering surface. It works against two
//! injected seams: [`Component`], one animatable target, and
//! [`StyleHost`], the document-level sink for generated keyframe rules.
//! Completion events flow back in as [`CompletionSignal`] values pumped by
//! the host.

use thiserror::Error;

/// One animatable target: geometry, style access, and the current
/// transform. Implementations use interior mutability; the engine only
/// holds a target while one of its runs is in flight.
pub trait Component {
    /// Stable identifier, used to scope completion signals.
    fn id(&self) -> &str;

    /// Current size as `[width, height]` in pixels.
    fn size(&self) -> [f64; 2];

    /// Current position as `[x, y]` in pixels.
    fn position(&self) -> [f64; 2];

    /// Read one style property.
    fn style(&self, property: &str) -> Option<String>;

    /// Write one style property.
    fn set_style(&self, property: &str, value: &str);

    /// Remove one style property.
    fn remove_style(&self, property: &str);

    /// The target's current transform, if any.
    fn current_transform(&self) -> Option<String> {
        self.style("transform")
    }
}

/// Failures reported by a [`StyleHost`].
#[derive(Debug, Error)]
pub enum StyleHostError {
    /// The rule's backing node is no longer attached to the document.
    #[error("style rule {0} is no longer attached")]
    Detached(u64),
    /// The host rejected the rule text.
    #[error("style host rejected rule: {0}")]
    Rejected(String),
}

/// Handle to one injected rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleHandle(pub u64);

/// Document-level style sink: inject and remove generated rule sets.
pub trait StyleHost {
    /// Inject one rule set, returning a handle for later removal.
    fn insert_rule(&self, css: &str) -> Result<RuleHandle, StyleHostError>;

    /// Remove a previously injected rule set.
    ///
    /// May fail when the backing node was already detached; the engine
    /// treats that as recoverable.
    fn remove_rule(&self, handle: RuleHandle) -> Result<(), StyleHostError>;
}

/// Which platform signal ended a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// A CSS transition finished (`transitionend`).
    TransitionEnd,
    /// A CSS keyframe animation finished (`animationend`).
    AnimationEnd,
}

/// A completion event delivered by the platform.
///
/// `target` names the component the listener belongs to and `origin` the
/// component the signal was raised on; the engine ignores signals that
/// bubbled up from descendants (`origin != target`).
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSignal {
    /// What kind of run ended.
    pub kind: SignalKind,
    /// Component the signal is scoped to.
    pub target: String,
    /// Component the signal originated on.
    pub origin: String,
    /// Animation name, present for keyframe completions.
    pub animation_name: Option<String>,
    /// Transitioned property, present for transition completions.
    pub property: Option<String>,
}

impl CompletionSignal {
    /// A transition completion raised on the target itself.
    pub fn transition_end(target: impl Into<String>, property: impl Into<String>) -> Self {
        let target = target.into();
        Self {
            kind: SignalKind::TransitionEnd,
            origin: target.clone(),
            target,
            animation_name: None,
            property: Some(property.into()),
        }
    }

    /// A keyframe completion raised on the target itself.
    pub fn animation_end(target: impl Into<String>, animation_name: impl Into<String>) -> Self {
        let target = target.into();
        Self {
            kind: SignalKind::AnimationEnd,
            origin: target.clone(),
            target,
            animation_name: Some(animation_name.into()),
            property: None,
        }
    }

    /// Mark this signal as bubbled up from a descendant component.
    pub fn bubbled_from(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }
}
