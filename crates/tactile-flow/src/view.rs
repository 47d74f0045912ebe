//! The view collaborator.
//!
//! Views are owned by the host application; the flow layer only drives
//! their lifecycle: show/hide around transitions, appear/disappear hooks,
//! data pushes, and event binding while a view's state is current.

use std::rc::Rc;

use serde_json::Value;
use tactile_anim::Component;

/// Handler bound to a view event while its state is current.
pub type EventHandler = Rc<dyn Fn(&Value)>;

/// One screen/view managed by a controller.
///
/// Implementations use interior mutability; the flow layer holds views as
/// `Rc<dyn View>` and never mutates them directly.
pub trait View {
    /// The view's animatable surface.
    fn component(&self) -> Rc<dyn Component>;

    /// Make the view visible.
    fn show(&self);

    /// Hide the view.
    fn hide(&self);

    /// Whether the view is currently visible.
    fn is_visible(&self) -> bool;

    /// Called before the view becomes the current one.
    fn will_appear(&self) {}

    /// Called before the view stops being the current one.
    fn will_disappear(&self) {}

    /// Push adapted event data into the view.
    fn set_data(&self, _data: &Value) {}

    /// Bind a handler to a view event.
    fn bind(&self, _event: &str, _handler: EventHandler) {}

    /// Unbind the handler for a view event.
    fn unbind(&self, _event: &str) {}
}
