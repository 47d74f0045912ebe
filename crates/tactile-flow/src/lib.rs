//! View-flow layer for touch-oriented widget toolkits.
//!
//! This crate decides which view is current and how getting there looks:
//! - **State machine**: states are view identifiers, inputs are named
//!   triggers, edges carry optional exit/enter animation pairs
//! - **Controller**: drives view lifecycle (lazy construction, data
//!   adaptation, event bindings, appear/disappear hooks) around each
//!   transition, with a pluggable visual-effect policy
//! - **Stack controllers**: ordered sequences with auto-wired
//!   `next`/`pred`/`first` navigation and the slide/card/flip/cross-fade
//!   transition family, including gesture-driven drag variants
//!
//! # Architecture
//!
//! ```text
//! Controller<P: TransitionPolicy>
//!   ├── StateMachine (states, inputs, edges, one current state)
//!   └── P produces the visual effect (PairPolicy | stack policies)
//!
//! StackController<P>
//!   └── ordered states + next/pred/first wiring over a Controller<P>
//! ```
//!
//! Animations run on the [`tactile_anim`] engine; a transition completes
//! when the incoming view's animation lands.

pub mod controller;
pub mod error;
pub mod machine;
pub mod policies;
pub mod stack;
pub mod view;

#[cfg(test)]
pub(crate) mod testkit;

pub use controller::{
    Controller, ControllerDelegate, NavDirection, OutputSink, PairPolicy, TransitionPolicy,
    TransitionRequest,
};
pub use error::FlowError;
pub use machine::{Binding, Edge, OutputAction, StateMachine, StateNode, StateSpec};
pub use policies::{
    Axis, CardController, CardDirection, CardPolicy, CubicController, CubicPolicy,
    NavigationController, OpacityController, SlideController, SlidePolicy, SlideUnit,
    StackAdapter, StackPolicy, card_controller, cubic_controller, navigation_controller,
    opacity_controller, slide_controller,
};
pub use stack::{INPUT_FIRST, INPUT_NEXT, INPUT_PRED, PairFactory, StackController};
pub use view::{EventHandler, View};
