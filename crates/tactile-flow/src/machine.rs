//! The transition state machine.
//!
//! States are view identifiers; inputs are named triggers; edges map
//! (state, input) to a target state plus an optional exit/enter animation
//! pair. The machine keeps exactly one current state and defers view
//! construction until a state is first entered. Misuse (unknown states,
//! duplicate registrations) is logged as a warning and treated as a no-op
//! — the machine never panics on bad input.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use tactile_anim::AnimationDescriptor;
use tracing::warn;

use crate::error::FlowError;
use crate::view::{EventHandler, View};

/// Transition edge: target state plus the optional animation pair.
#[derive(Clone, Default)]
pub struct Edge {
    /// Target state id.
    pub to: String,
    /// Animation run on the outgoing view.
    pub exit: Option<AnimationDescriptor>,
    /// Animation run on the incoming view; its completion ends the
    /// transition.
    pub enter: Option<AnimationDescriptor>,
}

impl Edge {
    /// Edge without animations.
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            to: target.into(),
            exit: None,
            enter: None,
        }
    }

    /// Edge with an exit/enter animation pair.
    pub fn with_pair(
        target: impl Into<String>,
        exit: Option<AnimationDescriptor>,
        enter: Option<AnimationDescriptor>,
    ) -> Self {
        Self {
            to: target.into(),
            exit,
            enter,
        }
    }
}

/// One event binding recorded for a state.
#[derive(Clone)]
pub struct Binding {
    /// View event name.
    pub event: String,
    /// Handler bound while the state is current.
    pub handler: EventHandler,
}

/// Output action attached to an input.
#[derive(Clone)]
pub enum OutputAction {
    /// Bound callback invoked with the event data.
    Callback(Rc<dyn Fn(&Value) -> Result<(), FlowError>>),
    /// Method name dispatched on the controller's owner.
    OwnerMethod(String),
}

/// Declarative description of a state, built by the caller and handed to
/// [`Controller::push`](crate::controller::Controller::push).
pub struct StateSpec {
    id: String,
    factory: Box<dyn Fn() -> Rc<dyn View>>,
    bindings: Vec<Binding>,
    adapter: Option<Box<dyn Fn(&Value) -> Value>>,
}

impl StateSpec {
    /// Declare a state whose view is built lazily by `factory` when the
    /// state is first entered.
    pub fn new(id: impl Into<String>, factory: impl Fn() -> Rc<dyn View> + 'static) -> Self {
        Self {
            id: id.into(),
            factory: Box::new(factory),
            bindings: Vec::new(),
            adapter: None,
        }
    }

    /// State id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Record an event binding, bound while the state is current.
    pub fn binding(mut self, event: impl Into<String>, handler: impl Fn(&Value) + 'static) -> Self {
        self.bindings.push(Binding {
            event: event.into(),
            handler: Rc::new(handler),
        });
        self
    }

    /// Set the data-adaptation function applied to event data before it is
    /// pushed into the view.
    pub fn adapter(mut self, adapter: impl Fn(&Value) -> Value + 'static) -> Self {
        self.adapter = Some(Box::new(adapter));
        self
    }
}

/// A registered state: lazily built view, bindings, and outgoing edges.
pub struct StateNode {
    id: String,
    factory: Box<dyn Fn() -> Rc<dyn View>>,
    view: RefCell<Option<Rc<dyn View>>>,
    bindings: Vec<Binding>,
    edges: HashMap<String, Edge>,
    adapter: Option<Box<dyn Fn(&Value) -> Value>>,
}

impl StateNode {
    fn from_spec(spec: StateSpec) -> Self {
        Self {
            id: spec.id,
            factory: spec.factory,
            view: RefCell::new(None),
            bindings: spec.bindings,
            edges: HashMap::new(),
            adapter: spec.adapter,
        }
    }

    /// State id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The view, if it has been built.
    pub fn view(&self) -> Option<Rc<dyn View>> {
        self.view.borrow().clone()
    }

    /// The view, building it on first access.
    pub fn ensure_view(&self) -> Rc<dyn View> {
        let mut slot = self.view.borrow_mut();
        match &*slot {
            Some(view) => view.clone(),
            None => {
                let view = (self.factory)();
                *slot = Some(view.clone());
                view
            }
        }
    }

    /// Recorded event bindings.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Apply the state's data-adaptation function.
    pub fn adapt(&self, data: &Value) -> Value {
        match &self.adapter {
            Some(adapter) => adapter(data),
            None => data.clone(),
        }
    }

    /// The edge followed for an input, if any.
    pub fn edge(&self, input: &str) -> Option<&Edge> {
        self.edges.get(input)
    }
}

/// Finite state machine selecting the current view.
#[derive(Default)]
pub struct StateMachine {
    states: HashMap<String, StateNode>,
    inputs: HashMap<String, Option<OutputAction>>,
    current: Option<String>,
}

impl StateMachine {
    /// Create an empty machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state. Duplicate ids are a logged no-op.
    pub fn add_state(&mut self, spec: StateSpec) -> bool {
        if self.states.contains_key(spec.id()) {
            warn!("{}", FlowError::DuplicateState(spec.id().to_string()));
            return false;
        }
        self.states
            .insert(spec.id().to_string(), StateNode::from_spec(spec));
        true
    }

    /// Remove a state and its outgoing edges.
    pub fn remove_state(&mut self, id: &str) -> Option<StateNode> {
        let removed = self.states.remove(id);
        if removed.is_none() {
            warn!("{}", FlowError::UnknownState(id.to_string()));
        }
        removed
    }

    /// Whether a state is registered.
    pub fn has_state(&self, id: &str) -> bool {
        self.states.contains_key(id)
    }

    /// Number of registered states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Register an input. Duplicates are a logged no-op.
    pub fn add_input(&mut self, name: &str) -> bool {
        if self.inputs.contains_key(name) {
            warn!("{}", FlowError::DuplicateInput(name.to_string()));
            return false;
        }
        self.inputs.insert(name.to_string(), None);
        true
    }

    /// Whether an input is registered.
    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    /// Attach an output action to an input.
    pub fn set_output(&mut self, input: &str, action: OutputAction) -> bool {
        match self.inputs.get_mut(input) {
            Some(slot) => {
                *slot = Some(action);
                true
            }
            None => {
                warn!("{}", FlowError::UnknownInput(input.to_string()));
                false
            }
        }
    }

    /// The output action attached to an input.
    pub fn output(&self, input: &str) -> Option<&OutputAction> {
        self.inputs.get(input).and_then(|slot| slot.as_ref())
    }

    /// Add (or replace) the edge followed from `from` on `input`.
    pub fn add_transition(&mut self, from: &str, input: &str, edge: Edge) -> bool {
        if !self.inputs.contains_key(input) {
            warn!("{}", FlowError::UnknownInput(input.to_string()));
            return false;
        }
        match self.states.get_mut(from) {
            Some(node) => {
                node.edges.insert(input.to_string(), edge);
                true
            }
            None => {
                warn!("{}", FlowError::UnknownState(from.to_string()));
                false
            }
        }
    }

    /// Remove the edge followed from `from` on `input`.
    pub fn clear_transition(&mut self, from: &str, input: &str) -> bool {
        self.states
            .get_mut(from)
            .map(|node| node.edges.remove(input).is_some())
            .unwrap_or(false)
    }

    /// The edge followed from `from` on `input`, if any.
    pub fn edge(&self, from: &str, input: &str) -> Option<&Edge> {
        self.states.get(from).and_then(|node| node.edge(input))
    }

    /// A registered state.
    pub fn state(&self, id: &str) -> Option<&StateNode> {
        self.states.get(id)
    }

    /// The current state id.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub(crate) fn set_current(&mut self, id: Option<String>) {
        self.current = id;
    }
}
