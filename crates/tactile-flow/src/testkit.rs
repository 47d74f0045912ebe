//! Shared scaffolding for the flow crate's tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use tactile_anim::testing::{MemoryStyleHost, MockComponent};
use tactile_anim::{Animator, Component, TickQueue};

use crate::view::{EventHandler, View};

/// View double that records lifecycle traffic in a shared log.
pub(crate) struct TestView {
    component: Rc<MockComponent>,
    visible: Cell<bool>,
    data: RefCell<Option<Value>>,
    bound: RefCell<Vec<String>>,
    log: Rc<RefCell<Vec<String>>>,
}

impl TestView {
    pub(crate) fn new(id: &str, log: &Rc<RefCell<Vec<String>>>) -> Rc<Self> {
        Rc::new(Self {
            component: Rc::new(MockComponent::new(id, [320.0, 480.0], [0.0, 0.0])),
            visible: Cell::new(false),
            data: RefCell::new(None),
            bound: RefCell::new(Vec::new()),
            log: log.clone(),
        })
    }

    /// A view with its own private log, for tests that don't inspect it.
    pub(crate) fn plain(id: &str) -> Rc<dyn View> {
        TestView::new(id, &Rc::new(RefCell::new(Vec::new())))
    }

    pub(crate) fn id(&self) -> String {
        self.component.id().to_string()
    }

    pub(crate) fn mock(&self) -> &Rc<MockComponent> {
        &self.component
    }

    pub(crate) fn data(&self) -> Option<Value> {
        self.data.borrow().clone()
    }

    pub(crate) fn bound_events(&self) -> Vec<String> {
        self.bound.borrow().clone()
    }

    fn record(&self, action: &str) {
        self.log.borrow_mut().push(format!("{}:{}", action, self.id()));
    }
}

impl View for TestView {
    fn component(&self) -> Rc<dyn Component> {
        self.component.clone()
    }

    fn show(&self) {
        self.visible.set(true);
        self.record("show");
    }

    fn hide(&self) {
        self.visible.set(false);
        self.record("hide");
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }

    fn will_appear(&self) {
        self.record("will_appear");
    }

    fn will_disappear(&self) {
        self.record("will_disappear");
    }

    fn set_data(&self, data: &Value) {
        *self.data.borrow_mut() = Some(data.clone());
    }

    fn bind(&self, event: &str, _handler: EventHandler) {
        self.bound.borrow_mut().push(event.to_string());
    }

    fn unbind(&self, event: &str) {
        self.bound.borrow_mut().retain(|e| e != event);
    }
}

/// Engine + platform fakes + view registry for one test.
pub(crate) struct Rig {
    pub(crate) animator: Animator,
    pub(crate) queue: Rc<TickQueue>,
    pub(crate) sheet: Rc<MemoryStyleHost>,
    pub(crate) log: Rc<RefCell<Vec<String>>>,
    views: RefCell<HashMap<String, Rc<TestView>>>,
}

impl Rig {
    pub(crate) fn new() -> Self {
        let queue = Rc::new(TickQueue::new());
        let sheet = Rc::new(MemoryStyleHost::new());
        let animator = Animator::new(sheet.clone(), queue.clone());
        Self {
            animator,
            queue,
            sheet,
            log: Rc::new(RefCell::new(Vec::new())),
            views: RefCell::new(HashMap::new()),
        }
    }

    /// Create (or look up) a registered test view.
    pub(crate) fn view(&self, id: &str) -> Rc<TestView> {
        self.views
            .borrow_mut()
            .entry(id.to_string())
            .or_insert_with(|| TestView::new(id, &self.log))
            .clone()
    }

    /// Whether a registered view is currently visible.
    pub(crate) fn visible(&self, id: &str) -> bool {
        self.views
            .borrow()
            .get(id)
            .map(|view| view.is_visible())
            .unwrap_or(false)
    }
}
