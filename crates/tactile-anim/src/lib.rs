//! Declarative CSS animation engine for touch-oriented widget toolkits.
//!
//! This crate builds and runs CSS transition/keyframe animations from
//! immutable descriptors:
//! - **Descriptors**: reusable templates of (property, value) pairs, optional
//!   keyframes, and timing parameters
//! - **Parameter resolution**: geometry macros (`$width`, `$x`, ...) and
//!   `${name}` placeholders resolved against the live target at run start
//! - **Execution**: the transition path for single-state runs, the keyframe
//!   path for multi-frame runs, with lifecycle tracking and id-based
//!   cancellation
//!
//! # Architecture
//!
//! ```text
//! Animator
//!   ├── RunRegistry (in-flight keyframe runs: id → {rule handle, target})
//!   └── Pending completions (simple + complex, completed exactly once)
//!
//! Component / StyleHost / Scheduler
//!   └── platform collaborators, injected as trait objects
//! ```
//!
//! The engine never interpolates values itself; it writes transition and
//! animation styles and lets the platform play them, completing a run when
//! the matching [`CompletionSignal`] arrives (or on the next scheduler tick
//! for zero-duration runs, which the platform never signals).

pub mod config;
pub mod css;
pub mod descriptor;
pub mod easing;
pub mod engine;
pub mod resolver;
pub mod scheduler;
pub mod target;
pub mod testing;
pub mod transform;
pub mod types;

pub use config::{EngineConfig, RunSettings};
pub use descriptor::{AnimationDescriptor, Keyframe};
pub use easing::{Easing, StepPosition};
pub use engine::{AnimationDelegate, Animator, Completion, RunMode, RunOptions};
pub use resolver::{FrameGeometry, resolve_value};
pub use scheduler::{Scheduler, TickQueue};
pub use target::{
    CompletionSignal, Component, RuleHandle, SignalKind, StyleHost, StyleHostError,
};
pub use types::{IterationCount, RunId, StyleValue, TimeSpan};
