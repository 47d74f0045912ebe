//! The transition controller.
//!
//! A [`Controller`] owns one [`StateMachine`] and drives transitions
//! between view states: exit/enter hooks, lifecycle ordering, animation
//! pairs, and output actions. The visual effect is produced by an injected
//! [`TransitionPolicy`]; [`PairPolicy`] implements the generic exit/enter
//! pair, the stack policies provide their own effects.
//!
//! A transition is complete only when the incoming view has fully arrived:
//! with an animation pair it is the **enter** animation's completion that
//! fires the shared completion, never the exit's. Calling `go_to` again
//! while a prior transition is still animating starts a second,
//! overlapping transition; the machine bookkeeping follows the last call.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use tactile_anim::{AnimationDescriptor, Animator, Completion, RunOptions};
use tracing::{debug, warn};

use crate::error::FlowError;
use crate::machine::{Edge, OutputAction, StateMachine, StateSpec};
use crate::view::View;

/// Relative direction of a transition within an ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavDirection {
    /// Towards the next state in sequence.
    Forward,
    /// Towards the previous state in sequence.
    Backward,
    /// Back to the first state in sequence.
    First,
    /// Direct jump with no sequence relation.
    Jump,
}

/// Everything a policy needs to produce the visual effect of one
/// transition.
pub struct TransitionRequest {
    /// Outgoing view, absent on the first transition.
    pub from: Option<Rc<dyn View>>,
    /// Incoming view.
    pub to: Rc<dyn View>,
    /// Exit animation from the triggering edge.
    pub exit: Option<AnimationDescriptor>,
    /// Enter animation from the triggering edge.
    pub enter: Option<AnimationDescriptor>,
    /// Sequence direction.
    pub direction: NavDirection,
    /// Zero the animation durations for this transition only.
    pub instant: bool,
}

/// Pluggable visual-effect strategy.
///
/// `done` is the shared completion: it hides the outgoing view and fires
/// the delegate hook. Policies must invoke it exactly once, when the
/// incoming view has arrived.
pub trait TransitionPolicy {
    /// Produce the transition's visual effect.
    fn run(&self, animator: &Animator, request: TransitionRequest, done: Box<dyn FnOnce()>);
}

/// Fires a boxed completion at most once, from whichever path gets there
/// first (animation callback or synchronous fallback).
pub(crate) struct DoneOnce {
    slot: Rc<RefCell<Option<Box<dyn FnOnce()>>>>,
}

impl DoneOnce {
    pub(crate) fn new(done: Box<dyn FnOnce()>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(done))),
        }
    }

    /// An engine completion callback that fires this.
    pub(crate) fn completion(&self) -> Completion {
        let slot = self.slot.clone();
        Box::new(move |_| {
            if let Some(done) = slot.borrow_mut().take() {
                done();
            }
        })
    }

    /// Fire directly (synchronous fallback).
    pub(crate) fn fire(&self) {
        if let Some(done) = self.slot.borrow_mut().take() {
            done();
        }
    }
}

/// Whether a descriptor would start a run at all.
pub(crate) fn is_runnable(descriptor: &AnimationDescriptor) -> bool {
    if descriptor.is_complex() {
        descriptor.keyframes.iter().any(|kf| !kf.values.is_empty())
    } else {
        !descriptor.properties.is_empty()
    }
}

/// Generic exit/enter pair policy.
///
/// Shows the incoming view, runs the enter animation on it and the exit
/// animation on the outgoing one. Without a runnable enter animation the
/// transition completes synchronously.
pub struct PairPolicy;

impl TransitionPolicy for PairPolicy {
    fn run(&self, animator: &Animator, request: TransitionRequest, done: Box<dyn FnOnce()>) {
        let done = DoneOnce::new(done);
        request.to.show();

        if let Some(exit) = request.exit.as_ref().filter(|d| is_runnable(d)) {
            if let Some(from) = &request.from {
                let from_component = from.component();
                animator.process(
                    &from_component,
                    exit,
                    None,
                    RunOptions::animate().instant(request.instant),
                );
            }
        }

        match request.enter.as_ref().filter(|d| is_runnable(d)) {
            Some(enter) => {
                let to_component = request.to.component();
                let started = animator.process(
                    &to_component,
                    enter,
                    Some(done.completion()),
                    RunOptions::animate().instant(request.instant),
                );
                if started.is_none() {
                    done.fire();
                }
            }
            None => done.fire(),
        }
    }
}

/// Observer of controller lifecycle hooks.
pub trait ControllerDelegate {
    /// The current view is about to change.
    fn view_will_change(&self, _old: Option<&str>, _new: &str) {}

    /// A transition's animations have completed.
    fn animation_did_end(&self, _state: &str) {}
}

/// Dispatch surface for output actions that name owner methods.
pub trait OutputSink {
    /// Invoke the named method with the event data.
    fn invoke(&self, method: &str, event: &Value) -> Result<(), FlowError>;
}

/// Drives which view is current and sequences transitions between views.
pub struct Controller<P: TransitionPolicy> {
    machine: StateMachine,
    animator: Animator,
    policy: P,
    owner: Option<Rc<dyn OutputSink>>,
    delegate: Option<Rc<dyn ControllerDelegate>>,
}

impl<P: TransitionPolicy> Controller<P> {
    /// Create a controller around an animator and a transition policy.
    pub fn new(animator: Animator, policy: P) -> Self {
        Self {
            machine: StateMachine::new(),
            animator,
            policy,
            owner: None,
            delegate: None,
        }
    }

    /// Install the owner that receives `OwnerMethod` output actions.
    pub fn set_owner(&mut self, owner: Rc<dyn OutputSink>) {
        self.owner = Some(owner);
    }

    /// Install the lifecycle delegate.
    pub fn set_delegate(&mut self, delegate: Rc<dyn ControllerDelegate>) {
        self.delegate = Some(delegate);
    }

    /// The animation engine handle.
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// The transition policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The underlying state machine.
    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    /// The current state id.
    pub fn current(&self) -> Option<&str> {
        self.machine.current()
    }

    /// The current state's view, if it has been built.
    pub fn current_view(&self) -> Option<Rc<dyn View>> {
        let id = self.machine.current()?;
        self.machine.state(id)?.view()
    }

    /// Register a state; its view is built when first entered.
    pub fn push(&mut self, spec: StateSpec) -> bool {
        self.machine.add_state(spec)
    }

    /// Remove a state. The current state cannot be removed.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.machine.current() == Some(id) {
            warn!("remove: {id} is the current state");
            return false;
        }
        self.machine.remove_state(id).is_some()
    }

    /// Register an input without an output action.
    pub fn add_input(&mut self, input: &str) -> bool {
        self.machine.add_input(input)
    }

    /// Attach an output action to an input, registering the input when
    /// needed.
    pub fn set_output(&mut self, input: &str, action: OutputAction) -> bool {
        if !self.machine.has_input(input) {
            self.machine.add_input(input);
        }
        self.machine.set_output(input, action)
    }

    /// Add a transition edge, registering the input when needed.
    pub fn add_transition(&mut self, from: &str, input: &str, edge: Edge) -> bool {
        if !self.machine.has_input(input) {
            self.machine.add_input(input);
        }
        self.machine.add_transition(from, input, edge)
    }

    /// Remove a transition edge.
    pub fn clear_transition(&mut self, from: &str, input: &str) -> bool {
        self.machine.clear_transition(from, input)
    }

    /// Make `target` the current state.
    ///
    /// `trigger` selects the animation pair (and output action) through
    /// the outgoing state's edge for that input. Unknown targets are
    /// logged and refused without side effects.
    pub fn go_to(
        &mut self,
        target: &str,
        trigger: Option<&str>,
        data: Option<&Value>,
        instant: bool,
    ) -> bool {
        self.transition_to(target, trigger, data, instant, NavDirection::Jump, None)
    }

    /// Follow the current state's edge for `input`.
    pub fn notify(&mut self, input: &str, data: Option<&Value>, instant: bool) -> bool {
        let Some(current) = self.machine.current() else {
            warn!("notify: no current state for input {input:?}");
            return false;
        };
        let Some(edge) = self.machine.edge(current, input) else {
            warn!("notify: no edge from {current:?} on input {input:?}");
            return false;
        };
        let target = edge.to.clone();
        self.transition_to(&target, Some(input), data, instant, NavDirection::Jump, None)
    }

    /// The full transition sequence; `pair_override` bypasses the edge
    /// lookup when the caller already knows the animation pair.
    pub(crate) fn transition_to(
        &mut self,
        target: &str,
        trigger: Option<&str>,
        data: Option<&Value>,
        instant: bool,
        direction: NavDirection,
        pair_override: Option<(Option<AnimationDescriptor>, Option<AnimationDescriptor>)>,
    ) -> bool {
        if !self.machine.has_state(target) {
            warn!("{}", FlowError::UnknownState(target.to_string()));
            return false;
        }

        let old_id = self.machine.current().map(String::from);
        let (exit, enter) = pair_override.unwrap_or_else(|| match (&old_id, trigger) {
            (Some(old), Some(input)) => self
                .machine
                .edge(old, input)
                .map(|edge| (edge.exit.clone(), edge.enter.clone()))
                .unwrap_or((None, None)),
            _ => (None, None),
        });

        // Exit hook: release the outgoing state's bindings.
        let old_view = old_id.as_ref().and_then(|id| {
            let node = self.machine.state(id)?;
            let view = node.view();
            if let Some(view) = &view {
                for binding in node.bindings() {
                    view.unbind(&binding.event);
                }
            }
            view
        });

        // Enter hook: the target becomes current, its view is built and
        // configured on first entry, data is adapted in, bindings attach.
        self.machine.set_current(Some(target.to_string()));
        let Some(node) = self.machine.state(target) else {
            return false;
        };
        let view = node.ensure_view();
        if let Some(data) = data {
            let adapted = node.adapt(data);
            view.set_data(&adapted);
        }
        for binding in node.bindings() {
            view.bind(&binding.event, binding.handler.clone());
        }

        if let Some(old_view) = &old_view {
            old_view.will_disappear();
        }
        view.will_appear();
        if let Some(delegate) = &self.delegate {
            delegate.view_will_change(old_id.as_deref(), target);
        }
        debug!("transition {:?} -> {target:?}", old_id.as_deref());

        // Shared completion: the outgoing view disappears and the
        // delegate is told only once the incoming view has arrived.
        // Self-transitions keep their (shared) view visible.
        let delegate = self.delegate.clone();
        let done_target = target.to_string();
        let done_old = old_view.clone().filter(|old| !Rc::ptr_eq(old, &view));
        let done: Box<dyn FnOnce()> = Box::new(move || {
            if let Some(old) = done_old {
                old.hide();
            }
            if let Some(delegate) = delegate {
                delegate.animation_did_end(&done_target);
            }
        });

        let request = TransitionRequest {
            from: old_view,
            to: view,
            exit,
            enter,
            direction,
            instant,
        };
        self.policy.run(&self.animator, request, done);

        if let Some(input) = trigger {
            self.fire_output(input, data);
        }
        true
    }

    /// Invoke the output action attached to `input`, if any. Failures are
    /// logged and never propagate into the machine.
    fn fire_output(&self, input: &str, data: Option<&Value>) {
        let Some(action) = self.machine.output(input) else {
            return;
        };
        let event = data.cloned().unwrap_or(Value::Null);
        let result = match action {
            OutputAction::Callback(callback) => callback(&event),
            OutputAction::OwnerMethod(method) => match &self.owner {
                Some(owner) => owner.invoke(method, &event),
                None => Err(FlowError::UnknownOutput(method.clone())),
            },
        };
        if let Err(err) = result {
            warn!("output action for input {input:?} failed: {err}");
        }
    }
}
