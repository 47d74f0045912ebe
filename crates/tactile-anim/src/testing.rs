//! Deterministic fakes for exercising the engine without a platform.
//!
//! [`MockComponent`] records style writes in memory, [`MemoryStyleHost`]
//! holds injected rule text, and the real [`TickQueue`](crate::TickQueue)
//! drives deferred actions by hand. The flow crate's tests build on the
//! same fakes.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::target::{Component, RuleHandle, StyleHost, StyleHostError};

/// In-memory animatable target.
pub struct MockComponent {
    id: String,
    size: Cell<[f64; 2]>,
    position: Cell<[f64; 2]>,
    styles: RefCell<BTreeMap<String, String>>,
}

impl MockComponent {
    /// Create a component with fixed geometry.
    pub fn new(id: impl Into<String>, size: [f64; 2], position: [f64; 2]) -> Self {
        Self {
            id: id.into(),
            size: Cell::new(size),
            position: Cell::new(position),
            styles: RefCell::new(BTreeMap::new()),
        }
    }

    /// Change the reported size.
    pub fn set_size(&self, size: [f64; 2]) {
        self.size.set(size);
    }

    /// Change the reported position.
    pub fn set_position(&self, position: [f64; 2]) {
        self.position.set(position);
    }

    /// Snapshot of every style property currently set.
    pub fn styles(&self) -> BTreeMap<String, String> {
        self.styles.borrow().clone()
    }
}

impl Component for MockComponent {
    fn id(&self) -> &str {
        &self.id
    }

    fn size(&self) -> [f64; 2] {
        self.size.get()
    }

    fn position(&self) -> [f64; 2] {
        self.position.get()
    }

    fn style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
    }

    fn remove_style(&self, property: &str) {
        self.styles.borrow_mut().remove(property);
    }
}

/// In-memory stylesheet recording injected rule text.
#[derive(Default)]
pub struct MemoryStyleHost {
    rules: RefCell<BTreeMap<u64, String>>,
    next_handle: Cell<u64>,
    fail_next_removal: Cell<bool>,
}

impl MemoryStyleHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rules currently injected.
    pub fn rule_count(&self) -> usize {
        self.rules.borrow().len()
    }

    /// Whether any injected rule contains the given text.
    pub fn contains(&self, needle: &str) -> bool {
        self.rules.borrow().values().any(|rule| rule.contains(needle))
    }

    /// Make the next `remove_rule` call fail, simulating a detached node.
    pub fn fail_next_removal(&self) {
        self.fail_next_removal.set(true);
    }
}

impl StyleHost for MemoryStyleHost {
    fn insert_rule(&self, css: &str) -> Result<RuleHandle, StyleHostError> {
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        self.rules.borrow_mut().insert(handle, css.to_string());
        Ok(RuleHandle(handle))
    }

    fn remove_rule(&self, handle: RuleHandle) -> Result<(), StyleHostError> {
        // The entry goes away either way; a detached node cannot be
        // removed twice.
        let existed = self.rules.borrow_mut().remove(&handle.0).is_some();
        if self.fail_next_removal.replace(false) {
            return Err(StyleHostError::Detached(handle.0));
        }
        if existed {
            Ok(())
        } else {
            Err(StyleHostError::Detached(handle.0))
        }
    }
}
