//! Ordered stacks of view states.
//!
//! A [`StackController`] keeps its states in push order and auto-wires the
//! `next`/`pred`/`first` inputs between consecutive states, so callers
//! navigate by position (`go_to_next_view`, `go_to_view_at`, ...) instead
//! of naming edges. The visual effect comes either from the injected
//! policy's stack hook or, for pair-based stacks (cross-fade, hierarchical
//! navigation), from descriptor pairs produced per direction by a pair
//! factory and attached to the auto-wired edges.
//!
//! Removing a state mid-sequence rewires `next`/`pred` to the new
//! neighbors and recomputes the `first` edges when the head changed.

use std::rc::Rc;

use serde_json::Value;
use tracing::warn;

use tactile_anim::{AnimationDescriptor, Animator};

use crate::controller::{Controller, NavDirection, TransitionPolicy};
use crate::machine::{Edge, StateMachine, StateSpec};
use crate::view::View;

/// Input wired from each state to its successor.
pub const INPUT_NEXT: &str = "next";
/// Input wired from each state to its predecessor.
pub const INPUT_PRED: &str = "pred";
/// Input wired from every state back to the first one.
pub const INPUT_FIRST: &str = "first";

/// Produces the exit/enter descriptor pair for one navigation direction.
pub type PairFactory =
    Box<dyn Fn(NavDirection) -> (Option<AnimationDescriptor>, Option<AnimationDescriptor>)>;

/// Controller over an ordered sequence of view states.
pub struct StackController<P: TransitionPolicy> {
    inner: Controller<P>,
    order: Vec<String>,
    pair_factory: Option<PairFactory>,
}

impl<P: TransitionPolicy> StackController<P> {
    /// Stack whose visual effect comes entirely from the policy.
    pub fn new(animator: Animator, policy: P) -> Self {
        Self {
            inner: Controller::new(animator, policy),
            order: Vec::new(),
            pair_factory: None,
        }
    }

    /// Stack whose auto-wired edges carry descriptor pairs from `factory`.
    pub fn with_pair_factory(animator: Animator, policy: P, factory: PairFactory) -> Self {
        Self {
            inner: Controller::new(animator, policy),
            order: Vec::new(),
            pair_factory: Some(factory),
        }
    }

    /// The wrapped controller.
    pub fn controller(&self) -> &Controller<P> {
        &self.inner
    }

    /// The wrapped controller, mutably (delegate/owner installation).
    pub fn controller_mut(&mut self) -> &mut Controller<P> {
        &mut self.inner
    }

    /// The underlying state machine.
    pub fn machine(&self) -> &StateMachine {
        self.inner.machine()
    }

    /// The animation engine handle.
    pub fn animator(&self) -> &Animator {
        self.inner.animator()
    }

    /// States in push order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// The current state id.
    pub fn current(&self) -> Option<&str> {
        self.inner.current()
    }

    /// The current state's view, if it has been built.
    pub fn current_view(&self) -> Option<Rc<dyn View>> {
        self.inner.current_view()
    }

    fn pair(
        &self,
        direction: NavDirection,
    ) -> (Option<AnimationDescriptor>, Option<AnimationDescriptor>) {
        self.pair_factory
            .as_ref()
            .map(|factory| factory(direction))
            .unwrap_or((None, None))
    }

    /// Register a state at the end of the sequence and wire its
    /// `next`/`pred`/`first` edges.
    pub fn push(&mut self, spec: StateSpec) -> bool {
        let id = spec.id().to_string();
        if !self.inner.push(spec) {
            return false;
        }
        self.order.push(id.clone());

        if self.order.len() >= 2 {
            let prev = self.order[self.order.len() - 2].clone();
            let (exit, enter) = self.pair(NavDirection::Forward);
            self.inner
                .add_transition(&prev, INPUT_NEXT, Edge::with_pair(&id, exit, enter));
            let (exit, enter) = self.pair(NavDirection::Backward);
            self.inner
                .add_transition(&id, INPUT_PRED, Edge::with_pair(prev, exit, enter));
        }
        let first = self.order[0].clone();
        let (exit, enter) = self.pair(NavDirection::First);
        self.inner
            .add_transition(&id, INPUT_FIRST, Edge::with_pair(first, exit, enter));
        true
    }

    /// Remove a state mid-sequence, rewiring its neighbors to each other
    /// and recomputing the `first` edges when the head changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(index) = self.order.iter().position(|s| s == id) else {
            warn!("remove: {id:?} is not in the stack");
            return false;
        };
        if !self.inner.remove(id) {
            return false;
        }
        let was_first = index == 0;
        self.order.remove(index);

        let prev = index.checked_sub(1).map(|i| self.order[i].clone());
        let next = self.order.get(index).cloned();
        match (prev, next) {
            (Some(prev), Some(next)) => {
                let (exit, enter) = self.pair(NavDirection::Forward);
                self.inner
                    .add_transition(&prev, INPUT_NEXT, Edge::with_pair(&next, exit, enter));
                let (exit, enter) = self.pair(NavDirection::Backward);
                self.inner
                    .add_transition(&next, INPUT_PRED, Edge::with_pair(prev, exit, enter));
            }
            (Some(prev), None) => {
                self.inner.clear_transition(&prev, INPUT_NEXT);
            }
            (None, Some(next)) => {
                self.inner.clear_transition(&next, INPUT_PRED);
            }
            (None, None) => {}
        }

        if was_first {
            if let Some(first) = self.order.first().cloned() {
                for state in self.order.clone() {
                    let (exit, enter) = self.pair(NavDirection::First);
                    self.inner.add_transition(
                        &state,
                        INPUT_FIRST,
                        Edge::with_pair(first.clone(), exit, enter),
                    );
                }
            }
        }
        true
    }

    /// Follow the `next` edge of the current state.
    pub fn go_to_next_view(&mut self, data: Option<&Value>, instant: bool) -> bool {
        self.navigate(INPUT_NEXT, NavDirection::Forward, data, instant)
    }

    /// Follow the `pred` edge of the current state.
    pub fn go_to_previous_view(&mut self, data: Option<&Value>, instant: bool) -> bool {
        self.navigate(INPUT_PRED, NavDirection::Backward, data, instant)
    }

    /// Follow the `first` edge of the current state.
    pub fn go_to_first_view(&mut self, data: Option<&Value>, instant: bool) -> bool {
        self.navigate(INPUT_FIRST, NavDirection::First, data, instant)
    }

    /// Jump to the state at `index` in push order.
    pub fn go_to_view_at(&mut self, index: usize, data: Option<&Value>, instant: bool) -> bool {
        let Some(target) = self.order.get(index).cloned() else {
            warn!("go_to_view_at: index {index} out of bounds");
            return false;
        };
        self.go_to_view_id(&target, data, instant)
    }

    /// Jump to a state by id, inferring the direction from its position
    /// relative to the current state.
    pub fn go_to_view_id(&mut self, id: &str, data: Option<&Value>, instant: bool) -> bool {
        let Some(target_index) = self.order.iter().position(|s| s == id) else {
            warn!("go_to_view_id: {id:?} is not in the stack");
            return false;
        };
        let current_index = self
            .inner
            .current()
            .and_then(|current| self.order.iter().position(|s| s == current));
        let direction = match current_index {
            None => NavDirection::Jump,
            Some(current) if target_index > current => NavDirection::Forward,
            Some(current) if target_index < current => NavDirection::Backward,
            Some(_) => return false,
        };
        let pair = self.pair(direction);
        self.inner
            .transition_to(id, None, data, instant, direction, Some(pair))
    }

    fn navigate(
        &mut self,
        input: &str,
        direction: NavDirection,
        data: Option<&Value>,
        instant: bool,
    ) -> bool {
        let Some(current) = self.inner.current().map(String::from) else {
            warn!("navigate: no current state for input {input:?}");
            return false;
        };
        let Some(edge) = self.inner.machine().edge(&current, input) else {
            warn!("navigate: no {input:?} edge from {current:?}");
            return false;
        };
        let target = edge.to.clone();
        self.inner
            .transition_to(&target, Some(input), data, instant, direction, None)
    }
}
