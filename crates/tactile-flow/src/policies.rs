//! Stack transition policies: how a stack change looks.
//!
//! Each policy produces one visual effect through the stack hook:
//! - [`SlidePolicy`]: linear slide along one axis, with live drag preview
//!   and proportional snap-back
//! - [`CardPolicy`]: the outgoing view slides off, revealing the incoming
//!   view beneath
//! - [`CubicPolicy`]: 3D page flip driven by one shared keyframe
//!   animation on the container
//!
//! [`opacity_controller`] and [`navigation_controller`] build pair-based
//! stacks instead: their effects are plain exit/enter descriptor pairs on
//! the auto-wired edges, so they go through the generic pair policy
//! rather than the stack hook.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use tactile_anim::{AnimationDescriptor, Animator, Component, Easing, RunOptions};

use crate::controller::{DoneOnce, NavDirection, PairPolicy, TransitionPolicy, TransitionRequest};
use crate::stack::StackController;
use crate::view::View;

/// Adapts a [`StackPolicy`] to the controller's policy seam.
pub struct StackAdapter<P: StackPolicy> {
    /// The wrapped stack policy.
    pub policy: P,
}

/// Policy hook producing the visual effect of one stack move.
pub trait StackPolicy {
    /// Animate `from` out and `to` in; invoke `done` exactly once, when
    /// the incoming view has arrived.
    fn stack_animate(
        &self,
        animator: &Animator,
        direction: NavDirection,
        from: Option<&Rc<dyn View>>,
        to: &Rc<dyn View>,
        done: Box<dyn FnOnce()>,
        instant: bool,
    );
}

impl<P: StackPolicy> TransitionPolicy for StackAdapter<P> {
    fn run(&self, animator: &Animator, request: TransitionRequest, done: Box<dyn FnOnce()>) {
        self.policy.stack_animate(
            animator,
            request.direction,
            request.from.as_ref(),
            &request.to,
            done,
            request.instant,
        );
    }
}

/// Slide axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Slide along x.
    Horizontal,
    /// Slide along y.
    Vertical,
}

impl Axis {
    fn translate_property(self) -> &'static str {
        match self {
            Self::Horizontal => "translateX",
            Self::Vertical => "translateY",
        }
    }

    fn span_of(self, component: &dyn Component) -> f64 {
        let size = component.size();
        match self {
            Self::Horizontal => size[0],
            Self::Vertical => size[1],
        }
    }
}

/// How slide offsets are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideUnit {
    /// Percentage of the view's own span.
    Percent,
    /// The view's pixel span, measured at run start.
    Pixels,
}

/// Linear slide between neighboring views.
#[derive(Debug, Clone, Copy)]
pub struct SlidePolicy {
    /// Slide axis.
    pub axis: Axis,
    /// Offset unit.
    pub unit: SlideUnit,
    /// Settle duration in milliseconds.
    pub duration_ms: f64,
    /// Settle timing function.
    pub easing: Easing,
    /// Fraction of the span a drag must cover to snap to the neighbor.
    pub snap_threshold: f64,
}

impl Default for SlidePolicy {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            unit: SlideUnit::Percent,
            duration_ms: 350.0,
            easing: Easing::EaseOut,
            snap_threshold: 0.35,
        }
    }
}

impl SlidePolicy {
    fn offset(&self, component: &dyn Component, negative: bool) -> String {
        match self.unit {
            SlideUnit::Percent => if negative { "-100%" } else { "100%" }.to_string(),
            SlideUnit::Pixels => {
                let span = self.axis.span_of(component);
                format!("{}px", if negative { -span } else { span })
            }
        }
    }

    fn translate(&self, value: impl Into<tactile_anim::StyleValue>) -> AnimationDescriptor {
        AnimationDescriptor::new()
            .property(self.axis.translate_property(), value)
            .duration_ms(self.duration_ms)
            .timing(self.easing)
    }
}

impl StackPolicy for SlidePolicy {
    fn stack_animate(
        &self,
        animator: &Animator,
        direction: NavDirection,
        from: Option<&Rc<dyn View>>,
        to: &Rc<dyn View>,
        done: Box<dyn FnOnce()>,
        instant: bool,
    ) {
        let done = DoneOnce::new(done);
        let incoming = to.component();
        // Moving forward the incoming view waits past the trailing edge;
        // moving back it waits before the leading one.
        let from_behind = matches!(direction, NavDirection::Backward | NavDirection::First);
        let start = self.offset(incoming.as_ref(), from_behind);
        animator.process(
            &incoming,
            &AnimationDescriptor::new().property(self.axis.translate_property(), start),
            None,
            RunOptions::now(),
        );
        to.show();

        let started = animator.process(
            &incoming,
            &self.translate("0"),
            Some(done.completion()),
            RunOptions::animate().instant(instant),
        );
        if started.is_none() {
            done.fire();
        }

        if let Some(from) = from {
            let outgoing = from.component();
            let end = self.offset(outgoing.as_ref(), !from_behind);
            animator.process(
                &outgoing,
                &self.translate(end),
                None,
                RunOptions::animate().instant(instant),
            );
        }
    }
}

/// Direction the outgoing card slides off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardDirection {
    /// Off the left edge.
    Left,
    /// Off the right edge.
    Right,
    /// Off the top edge.
    Up,
    /// Off the bottom edge.
    Down,
}

impl CardDirection {
    fn translate(self) -> (&'static str, &'static str) {
        match self {
            Self::Left => ("translateX", "-100%"),
            Self::Right => ("translateX", "100%"),
            Self::Up => ("translateY", "-100%"),
            Self::Down => ("translateY", "100%"),
        }
    }

    fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }
}

/// Card stack: the outgoing view slides off, revealing the incoming view
/// beneath it.
#[derive(Debug, Clone, Copy)]
pub struct CardPolicy {
    /// Where the outgoing card goes.
    pub direction: CardDirection,
    /// Slide duration in milliseconds.
    pub duration_ms: f64,
    /// Slide timing function.
    pub easing: Easing,
    /// Fraction of the span a drag must cover to snap to the neighbor.
    pub snap_threshold: f64,
}

impl Default for CardPolicy {
    fn default() -> Self {
        Self {
            direction: CardDirection::Left,
            duration_ms: 350.0,
            easing: Easing::EaseOut,
            snap_threshold: 0.35,
        }
    }
}

impl CardPolicy {
    fn slide(&self, value: impl Into<tactile_anim::StyleValue>) -> AnimationDescriptor {
        let (property, _) = self.direction.translate();
        AnimationDescriptor::new()
            .property(property, value)
            .duration_ms(self.duration_ms)
            .timing(self.easing)
    }
}

impl StackPolicy for CardPolicy {
    fn stack_animate(
        &self,
        animator: &Animator,
        direction: NavDirection,
        from: Option<&Rc<dyn View>>,
        to: &Rc<dyn View>,
        done: Box<dyn FnOnce()>,
        instant: bool,
    ) {
        let done = DoneOnce::new(done);
        let (_, off) = self.direction.translate();

        match direction {
            NavDirection::Backward | NavDirection::First => {
                // The previous card slides back over the current one; its
                // arrival completes the transition.
                let incoming = to.component();
                animator.process(&incoming, &self.slide(off), None, RunOptions::now());
                to.show();
                let started = animator.process(
                    &incoming,
                    &self.slide("0"),
                    Some(done.completion()),
                    RunOptions::animate().instant(instant),
                );
                if started.is_none() {
                    done.fire();
                }
            }
            _ => {
                // The incoming view is revealed in place beneath the
                // outgoing card; the card's departure completes the
                // transition.
                to.show();
                match from {
                    Some(from) => {
                        let outgoing = from.component();
                        let started = animator.process(
                            &outgoing,
                            &self.slide(off),
                            Some(done.completion()),
                            RunOptions::animate().instant(instant),
                        );
                        if started.is_none() {
                            done.fire();
                        }
                    }
                    None => done.fire(),
                }
            }
        }
    }
}

/// Keyframe offsets and rotation angles of the page flip.
const FLIP_FRAMES: [(f32, f64); 6] = [
    (0.0, 0.0),
    (0.5, -52.0),
    (0.7, -72.0),
    (0.8, -80.0),
    (0.95, -88.0),
    (1.0, -90.0),
];

/// 3D page flip applied to the shared container, with both neighboring
/// views pre-positioned before the rotation starts.
pub struct CubicPolicy {
    /// The container both views live in; the flip rotates it.
    pub container: Rc<dyn Component>,
    /// Flip duration in milliseconds.
    pub duration_ms: f64,
}

impl CubicPolicy {
    fn flip_descriptor(&self, backward: bool) -> AnimationDescriptor {
        let mut descriptor = AnimationDescriptor::new()
            .duration_ms(self.duration_ms)
            .transform_origin("50% 50%");
        for (offset, angle) in FLIP_FRAMES {
            let angle = if backward { -angle } else { angle };
            descriptor = descriptor.keyframe(offset, move |kf| kf.set("rotateY", angle));
        }
        descriptor
    }
}

impl StackPolicy for CubicPolicy {
    fn stack_animate(
        &self,
        animator: &Animator,
        direction: NavDirection,
        from: Option<&Rc<dyn View>>,
        to: &Rc<dyn View>,
        done: Box<dyn FnOnce()>,
        instant: bool,
    ) {
        let done = DoneOnce::new(done);
        let backward = matches!(direction, NavDirection::Backward | NavDirection::First);
        let incoming = to.component();

        // First display: nothing to rotate away from.
        let Some(from) = from else {
            animator.process(
                &incoming,
                &AnimationDescriptor::new().property("rotateY", 0.0),
                None,
                RunOptions::now(),
            );
            to.show();
            done.fire();
            return;
        };

        // Both faces take their resting rotation before the container
        // starts turning.
        let face = if backward { -90.0 } else { 90.0 };
        animator.process(
            &incoming,
            &AnimationDescriptor::new().property("rotateY", face),
            None,
            RunOptions::now(),
        );
        let outgoing = from.component();
        animator.process(
            &outgoing,
            &AnimationDescriptor::new().property("rotateY", 0.0),
            None,
            RunOptions::now(),
        );
        to.show();

        let flip = self.flip_descriptor(backward);
        let started = animator.process(
            &self.container,
            &flip,
            Some(done.completion()),
            RunOptions::animate().instant(instant),
        );
        if started.is_none() {
            done.fire();
        }
    }
}

/// Slide stack controller.
pub type SlideController = StackController<StackAdapter<SlidePolicy>>;

/// Build a slide stack controller.
pub fn slide_controller(animator: Animator, policy: SlidePolicy) -> SlideController {
    StackController::new(animator, StackAdapter { policy })
}

/// Card stack controller.
pub type CardController = StackController<StackAdapter<CardPolicy>>;

/// Build a card stack controller.
pub fn card_controller(animator: Animator, policy: CardPolicy) -> CardController {
    StackController::new(animator, StackAdapter { policy })
}

/// Cubic (page flip) stack controller.
pub type CubicController = StackController<StackAdapter<CubicPolicy>>;

/// Build a cubic stack controller.
pub fn cubic_controller(animator: Animator, policy: CubicPolicy) -> CubicController {
    StackController::new(animator, StackAdapter { policy })
}

/// Cross-fade stack controller; uses the generic exit/enter pair.
pub type OpacityController = StackController<PairPolicy>;

/// Build a cross-fade stack controller.
pub fn opacity_controller(animator: Animator, duration_ms: f64) -> OpacityController {
    StackController::with_pair_factory(
        animator,
        PairPolicy,
        Box::new(move |_direction| {
            (
                Some(
                    AnimationDescriptor::new()
                        .property("opacity", 0.0)
                        .duration_ms(duration_ms),
                ),
                Some(
                    AnimationDescriptor::new()
                        .property("opacity", 1.0)
                        .duration_ms(duration_ms),
                ),
            )
        }),
    )
}

/// Hierarchical navigation controller; uses the generic exit/enter pair
/// with direction-dependent translations.
pub type NavigationController = StackController<PairPolicy>;

/// Build a hierarchical navigation controller.
pub fn navigation_controller(animator: Animator, duration_ms: f64) -> NavigationController {
    StackController::with_pair_factory(
        animator,
        PairPolicy,
        Box::new(move |direction| {
            let backward = matches!(direction, NavDirection::Backward | NavDirection::First);
            let exit_offset = if backward { "100%" } else { "-100%" };
            (
                Some(
                    AnimationDescriptor::new()
                        .property("translateX", exit_offset)
                        .duration_ms(duration_ms)
                        .timing(Easing::EaseInOut),
                ),
                Some(
                    AnimationDescriptor::new()
                        .property("translateX", "0")
                        .duration_ms(duration_ms)
                        .timing(Easing::EaseInOut),
                ),
            )
        }),
    )
}

impl SlideController {
    /// Map a pointer delta directly onto the current view as a
    /// zero-duration transform (live drag preview).
    pub fn drag_update(&self, delta: f64) -> bool {
        let Some(view) = self.current_view() else {
            warn!("drag_update: no current view");
            return false;
        };
        let policy = self.controller().policy().policy;
        let component = view.component();
        let preview = AnimationDescriptor::new()
            .property(policy.axis.translate_property(), format!("{}px", delta));
        self.animator()
            .process(&component, &preview, None, RunOptions::now())
            .is_some()
    }

    /// Finish a drag: snap to the neighbor past the threshold, otherwise
    /// spring back with a duration proportional to the remaining
    /// distance. Returns whether a navigation happened.
    pub fn drag_release(&mut self, delta: f64) -> bool {
        let policy = self.controller().policy().policy;
        release_drag(
            self,
            policy.axis,
            policy.axis.translate_property(),
            policy.snap_threshold,
            policy.duration_ms,
            delta,
        )
    }
}

impl CardController {
    /// Live drag preview along the card's slide axis.
    pub fn drag_update(&self, delta: f64) -> bool {
        let Some(view) = self.current_view() else {
            warn!("drag_update: no current view");
            return false;
        };
        let policy = self.controller().policy().policy;
        let (property, _) = policy.direction.translate();
        let component = view.component();
        let preview = AnimationDescriptor::new().property(property, format!("{}px", delta));
        self.animator()
            .process(&component, &preview, None, RunOptions::now())
            .is_some()
    }

    /// Finish a drag with the same proportional snap-back policy as the
    /// slide stack.
    pub fn drag_release(&mut self, delta: f64) -> bool {
        let policy = self.controller().policy().policy;
        release_drag(
            self,
            policy.direction.axis(),
            policy.direction.translate().0,
            policy.snap_threshold,
            policy.duration_ms,
            delta,
        )
    }
}

fn release_drag<P: StackPolicy>(
    stack: &mut StackController<StackAdapter<P>>,
    axis: Axis,
    property: &'static str,
    snap_threshold: f64,
    duration_ms: f64,
    delta: f64,
) -> bool {
    let Some(view) = stack.current_view() else {
        warn!("drag_release: no current view");
        return false;
    };
    let component = view.component();
    let span = axis.span_of(component.as_ref()).max(1.0);

    if delta.abs() >= snap_threshold * span {
        // Dragging towards the leading edge advances; the other way goes
        // back.
        if delta < 0.0 {
            stack.go_to_next_view(None, false)
        } else {
            stack.go_to_previous_view(None, false)
        }
    } else {
        let spring_ms = duration_ms * (delta.abs() / span);
        let settle = AnimationDescriptor::new()
            .property(property, "0")
            .duration_ms(spring_ms);
        stack
            .animator()
            .process(&component, &settle, None, RunOptions::animate());
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::StateSpec;
    use crate::testkit::Rig;
    use tactile_anim::CompletionSignal;

    fn push_view<P: TransitionPolicy>(
        stack: &mut StackController<P>,
        rig: &Rig,
        id: &str,
    ) {
        let view = rig.view(id);
        assert!(stack.push(StateSpec::new(id, move || view.clone())));
    }

    #[test]
    fn test_slide_prepositions_and_settles() {
        let rig = Rig::new();
        let mut stack = slide_controller(rig.animator.clone(), SlidePolicy::default());
        push_view(&mut stack, &rig, "s1");
        push_view(&mut stack, &rig, "s2");

        stack.go_to_view_at(0, None, true);
        rig.queue.run_until_idle();

        assert!(stack.go_to_next_view(None, false));
        // Pre-positioning lands synchronously: the incoming view waits
        // past the trailing edge before its settle run starts.
        assert_eq!(
            rig.view("s2").mock().style("transform").as_deref(),
            Some("translateX(100%)")
        );
        assert!(rig.visible("s2"));

        rig.queue.run_until_idle();
        assert_eq!(
            rig.view("s2").mock().style("transform").as_deref(),
            Some("translateX(0)")
        );

        // The incoming view's settle completion finishes the transition.
        assert!(rig.visible("s1"));
        rig.animator
            .handle_signal(&CompletionSignal::transition_end("s2", "transform"));
        assert!(!rig.visible("s1"));
        assert_eq!(stack.current(), Some("s2"));
    }

    #[test]
    fn test_slide_backward_prepositions_before_leading_edge() {
        let rig = Rig::new();
        let mut stack = slide_controller(rig.animator.clone(), SlidePolicy::default());
        push_view(&mut stack, &rig, "s1");
        push_view(&mut stack, &rig, "s2");

        stack.go_to_view_at(1, None, true);
        rig.queue.run_until_idle();

        assert!(stack.go_to_previous_view(None, false));
        assert_eq!(
            rig.view("s1").mock().style("transform").as_deref(),
            Some("translateX(-100%)")
        );
    }

    #[test]
    fn test_slide_pixel_mode_uses_span() {
        let rig = Rig::new();
        let policy = SlidePolicy {
            unit: SlideUnit::Pixels,
            ..SlidePolicy::default()
        };
        let mut stack = slide_controller(rig.animator.clone(), policy);
        push_view(&mut stack, &rig, "s1");
        push_view(&mut stack, &rig, "s2");

        stack.go_to_view_at(0, None, true);
        rig.queue.run_until_idle();
        stack.go_to_next_view(None, false);

        // Test views are 320px wide.
        assert_eq!(
            rig.view("s2").mock().style("transform").as_deref(),
            Some("translateX(320px)")
        );
    }

    #[test]
    fn test_drag_preview_and_snap() {
        let rig = Rig::new();
        let mut stack = slide_controller(rig.animator.clone(), SlidePolicy::default());
        push_view(&mut stack, &rig, "s1");
        push_view(&mut stack, &rig, "s2");
        stack.go_to_view_at(0, None, true);
        rig.queue.run_until_idle();

        assert!(stack.drag_update(-48.0));
        assert_eq!(
            rig.view("s1").mock().style("transform").as_deref(),
            Some("translateX(-48px)")
        );

        // Past the threshold (35% of 320px = 112px): snap forward.
        assert!(stack.drag_release(-150.0));
        assert_eq!(stack.current(), Some("s2"));
    }

    #[test]
    fn test_drag_release_springs_back_proportionally() {
        let rig = Rig::new();
        let mut stack = slide_controller(rig.animator.clone(), SlidePolicy::default());
        push_view(&mut stack, &rig, "s1");
        push_view(&mut stack, &rig, "s2");
        stack.go_to_view_at(0, None, true);
        rig.queue.run_until_idle();

        stack.drag_update(-32.0);
        assert!(!stack.drag_release(-32.0));
        assert_eq!(stack.current(), Some("s1"));
        rig.queue.run_until_idle();

        // Spring duration is proportional to the remaining distance:
        // 350ms * 32/320 = 35ms.
        assert_eq!(
            rig.view("s1").mock().style("transition-duration").as_deref(),
            Some("35ms")
        );
        assert_eq!(
            rig.view("s1").mock().style("transform").as_deref(),
            Some("translateX(0)")
        );
    }

    #[test]
    fn test_card_reveals_incoming_beneath() {
        let rig = Rig::new();
        let mut stack = card_controller(rig.animator.clone(), CardPolicy::default());
        push_view(&mut stack, &rig, "c1");
        push_view(&mut stack, &rig, "c2");
        stack.go_to_view_at(0, None, true);
        rig.queue.run_until_idle();

        assert!(stack.go_to_next_view(None, false));
        // The incoming view is visible immediately, untouched; the
        // outgoing card does the moving.
        assert!(rig.visible("c2"));
        assert_eq!(rig.view("c2").mock().style("transform"), None);
        rig.queue.run_until_idle();
        assert_eq!(
            rig.view("c1").mock().style("transform").as_deref(),
            Some("translateX(-100%)")
        );

        // The outgoing card's departure completes the transition here.
        assert!(rig.visible("c1"));
        rig.animator
            .handle_signal(&CompletionSignal::transition_end("c1", "transform"));
        assert!(!rig.visible("c1"));
        assert_eq!(stack.current(), Some("c2"));
    }

    #[test]
    fn test_card_backward_slides_previous_back_on() {
        let rig = Rig::new();
        let mut stack = card_controller(rig.animator.clone(), CardPolicy::default());
        push_view(&mut stack, &rig, "c1");
        push_view(&mut stack, &rig, "c2");
        stack.go_to_view_at(1, None, true);
        rig.queue.run_until_idle();

        assert!(stack.go_to_previous_view(None, false));
        // The previous card starts from its off-screen parking position.
        assert_eq!(
            rig.view("c1").mock().style("transform").as_deref(),
            Some("translateX(-100%)")
        );
        rig.queue.run_until_idle();
        assert_eq!(
            rig.view("c1").mock().style("transform").as_deref(),
            Some("translateX(0)")
        );
    }

    #[test]
    fn test_cubic_flip_runs_on_container() {
        let rig = Rig::new();
        let container = rig.view("deck");
        let policy = CubicPolicy {
            container: container.component(),
            duration_ms: 600.0,
        };
        let mut stack = cubic_controller(rig.animator.clone(), policy);
        push_view(&mut stack, &rig, "p1");
        push_view(&mut stack, &rig, "p2");
        stack.go_to_view_at(0, None, true);
        rig.queue.run_until_idle();

        assert!(stack.go_to_next_view(None, false));
        // Both faces are pre-positioned before the container turns.
        assert_eq!(
            rig.view("p2").mock().style("transform").as_deref(),
            Some("rotateY(90deg)")
        );
        assert_eq!(
            rig.view("p1").mock().style("transform").as_deref(),
            Some("rotateY(0deg)")
        );

        // One shared keyframe rule drives the flip.
        assert_eq!(rig.sheet.rule_count(), 1);
        assert!(rig.sheet.contains("0% { transform: rotateY(0deg); }"));
        assert!(rig.sheet.contains("50% { transform: rotateY(-52deg); }"));
        assert!(rig.sheet.contains("70% { transform: rotateY(-72deg); }"));
        assert!(rig.sheet.contains("80% { transform: rotateY(-80deg); }"));
        assert!(rig.sheet.contains("95% { transform: rotateY(-88deg); }"));
        assert!(rig.sheet.contains("100% { transform: rotateY(-90deg); }"));

        rig.queue.run_until_idle();
        let name = rig.view("deck").mock().style("animation-name").unwrap();
        rig.animator
            .handle_signal(&CompletionSignal::animation_end("deck", name));
        assert_eq!(rig.sheet.rule_count(), 0);
        assert_eq!(stack.current(), Some("p2"));
    }

    #[test]
    fn test_opacity_controller_wires_fade_pairs() {
        let rig = Rig::new();
        let mut stack = opacity_controller(rig.animator.clone(), 200.0);
        push_view(&mut stack, &rig, "o1");
        push_view(&mut stack, &rig, "o2");

        let edge = stack.machine().edge("o1", crate::stack::INPUT_NEXT).unwrap();
        let enter = edge.enter.as_ref().unwrap();
        assert_eq!(
            enter.properties,
            vec![("opacity".to_string(), tactile_anim::StyleValue::Number(1.0))]
        );

        stack.go_to_view_at(0, None, true);
        rig.queue.run_until_idle();
        assert!(stack.go_to_next_view(None, false));
        rig.queue.run_tick();

        // Cross-fade: both views animate opacity, and the incoming one's
        // completion ends the transition.
        assert_eq!(rig.view("o1").mock().style("opacity").as_deref(), Some("0"));
        assert_eq!(rig.view("o2").mock().style("opacity").as_deref(), Some("1"));
        assert!(rig.visible("o1"));
        rig.animator
            .handle_signal(&CompletionSignal::transition_end("o2", "opacity"));
        assert!(!rig.visible("o1"));
    }

    #[test]
    fn test_navigation_controller_translates_by_direction() {
        let rig = Rig::new();
        let mut stack = navigation_controller(rig.animator.clone(), 250.0);
        push_view(&mut stack, &rig, "n1");
        push_view(&mut stack, &rig, "n2");

        stack.go_to_view_at(0, None, true);
        rig.queue.run_until_idle();
        assert!(stack.go_to_next_view(None, true));
        rig.queue.run_until_idle();
        assert_eq!(stack.current(), Some("n2"));
        // Forward: the outgoing view leaves towards the leading edge.
        assert_eq!(
            rig.view("n1").mock().style("transform").as_deref(),
            Some("translateX(-100%)")
        );

        assert!(stack.go_to_previous_view(None, true));
        rig.queue.run_until_idle();
        // Backward: the outgoing view leaves the other way.
        assert_eq!(
            rig.view("n2").mock().style("transform").as_deref(),
            Some("translateX(100%)")
        );
        assert_eq!(stack.current(), Some("n1"));
    }
}
