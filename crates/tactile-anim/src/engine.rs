//! Animation execution engine.
//!
//! The [`Animator`] coordinates every run in flight:
//! - resolving a descriptor against the target's geometry at invocation
//!   time (one immutable snapshot per run)
//! - the **transition path** for simple descriptors and the **keyframe
//!   path** for complex ones (a descriptor is complex exactly when it has
//!   a keyframe at offset 0)
//! - deferring style writes by one scheduler tick so prior writes are
//!   committed before the platform samples a change
//! - synthesizing completions for zero-duration runs, which the platform
//!   never signals
//! - id-based cancellation of keyframe runs through the run registry
//!
//! Completion fires exactly once per run: engine cleanup first, then the
//! optional delegate hook, then the caller's callback.
//!
//! # Usage
//!
//! ```ignore
//! let animator = Animator::new(sheet, scheduler);
//! let fade = AnimationDescriptor::new()
//!     .frame("from", |kf| kf.set("opacity", 1.0))
//!     .frame("to", |kf| kf.set("opacity", 0.0))
//!     .duration_ms(300.0);
//!
//! let id = animator.process(&target, &fade, Some(Box::new(|id| {
//!     // the run is fully cleaned up here
//! })), RunOptions::default());
//!
//! // Platform completion events are pumped back in by the host:
//! animator.handle_signal(&CompletionSignal::animation_end("panel", name));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::css::{self, ResolvedFrame};
use crate::descriptor::AnimationDescriptor;
use crate::easing::Easing;
use crate::resolver::{FrameGeometry, resolve_value};
use crate::scheduler::Scheduler;
use crate::target::{CompletionSignal, Component, RuleHandle, SignalKind, StyleHost};
use crate::transform;
use crate::types::{RunId, StyleValue, TimeSpan};

/// Caller-supplied completion callback; captures whatever context the
/// caller needs.
pub type Completion = Box<dyn FnOnce(RunId)>;

/// Observer notified after a run's cleanup and before the caller's
/// callback.
pub trait AnimationDelegate {
    /// A run on `target_id` finished (normally or via the zero-duration
    /// fallback).
    fn animation_did_end(&self, target_id: &str, run: RunId);
}

/// How a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Play the animation.
    #[default]
    Animate,
    /// Apply only the terminal values with zero duration/delay, to
    /// pre-position a view before first display.
    Now,
}

/// Per-call options for [`Animator::process`].
#[derive(Default)]
pub struct RunOptions {
    /// Execution mode.
    pub mode: RunMode,
    /// Zero the durations for this run only, leaving the descriptor
    /// untouched.
    pub instant: bool,
    /// Per-run `${name}` substitutions, consulted before the descriptor's
    /// own params.
    pub frame_data: HashMap<String, String>,
}

impl RunOptions {
    /// Standard animated run.
    pub fn animate() -> Self {
        Self::default()
    }

    /// Terminal-values-only run (see [`RunMode::Now`]).
    pub fn now() -> Self {
        Self {
            mode: RunMode::Now,
            ..Self::default()
        }
    }

    /// Zero the durations for this run only.
    pub fn instant(mut self, instant: bool) -> Self {
        self.instant = instant;
        self
    }

    /// Add one per-run substitution value.
    pub fn frame_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.frame_data.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKind {
    Simple,
    Complex,
    Immediate,
}

/// Registry entry for one in-flight keyframe run.
struct RegistryEntry {
    rule_handle: RuleHandle,
    target: Rc<dyn Component>,
}

struct PendingRun {
    target: Rc<dyn Component>,
    kind: RunKind,
    animation_name: Option<String>,
    transition_props: Vec<String>,
    start_writes: Vec<(String, String)>,
    terminal: Vec<(String, String)>,
    callback: Option<Completion>,
    zero: bool,
}

impl PendingRun {
    fn matches(&self, signal: &CompletionSignal) -> bool {
        if self.target.id() != signal.target {
            return false;
        }
        match (self.kind, signal.kind) {
            (RunKind::Complex, SignalKind::AnimationEnd) => {
                self.animation_name == signal.animation_name
            }
            (RunKind::Simple, SignalKind::TransitionEnd) => match &signal.property {
                Some(property) => self.transition_props.iter().any(|p| p == property),
                None => true,
            },
            // Immediate runs complete on the fallback tick only.
            _ => false,
        }
    }
}

struct EngineShared {
    sheet: Rc<dyn StyleHost>,
    scheduler: Rc<dyn Scheduler>,
    config: EngineConfig,
    delegate: RefCell<Option<Rc<dyn AnimationDelegate>>>,
    registry: RefCell<HashMap<RunId, RegistryEntry>>,
    pending: RefCell<HashMap<RunId, PendingRun>>,
}

/// Handle to the animation engine; clones share one registry.
pub struct Animator {
    shared: Rc<EngineShared>,
}

impl Clone for Animator {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl Animator {
    /// Create an engine with default configuration.
    pub fn new(sheet: Rc<dyn StyleHost>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self::with_config(sheet, scheduler, EngineConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(
        sheet: Rc<dyn StyleHost>,
        scheduler: Rc<dyn Scheduler>,
        config: EngineConfig,
    ) -> Self {
        Self {
            shared: Rc::new(EngineShared {
                sheet,
                scheduler,
                config,
                delegate: RefCell::new(None),
                registry: RefCell::new(HashMap::new()),
                pending: RefCell::new(HashMap::new()),
            }),
        }
    }

    /// Install the completion delegate.
    pub fn set_delegate(&self, delegate: Rc<dyn AnimationDelegate>) {
        *self.shared.delegate.borrow_mut() = Some(delegate);
    }

    /// Remove the completion delegate.
    pub fn clear_delegate(&self) {
        *self.shared.delegate.borrow_mut() = None;
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.shared.config
    }

    /// Number of keyframe runs currently registered.
    pub fn active_runs(&self) -> usize {
        self.shared.registry.borrow().len()
    }

    /// Number of runs awaiting completion (any path).
    pub fn pending_runs(&self) -> usize {
        self.shared.pending.borrow().len()
    }

    /// Start one run of `descriptor` against `target`.
    ///
    /// Resolves the descriptor against the target's geometry now, defers
    /// the style writes one tick, and returns the run id. Invalid input is
    /// logged and yields `None` with no side effects.
    pub fn process(
        &self,
        target: &Rc<dyn Component>,
        descriptor: &AnimationDescriptor,
        completion: Option<Completion>,
        options: RunOptions,
    ) -> Option<RunId> {
        if target.id().is_empty() {
            warn!("process: target has no id, aborting");
            return None;
        }
        let complex = descriptor.is_complex();
        if complex && descriptor.keyframes.iter().all(|kf| kf.values.is_empty()) {
            warn!("process: keyframes declare no values, aborting");
            return None;
        }
        if !complex && descriptor.properties.is_empty() {
            warn!("process: descriptor declares nothing to animate, aborting");
            return None;
        }

        let shared = &self.shared;
        let settings = &shared.config.run;
        let geometry = FrameGeometry::of(target.as_ref());
        let id = RunId::new();

        let instant = options.instant || options.mode == RunMode::Now;
        let durations: Vec<TimeSpan> = if instant {
            vec![TimeSpan::ZERO]
        } else if descriptor.durations.is_empty() {
            vec![TimeSpan::ms(settings.default_duration_ms)]
        } else {
            descriptor.durations.clone()
        };
        let delay = if instant {
            TimeSpan::ZERO
        } else if descriptor.delay.is_zero() {
            TimeSpan::ms(settings.default_delay_ms)
        } else {
            descriptor.delay
        };
        let timing: Vec<Easing> = if descriptor.timing.is_empty() {
            vec![settings.default_easing]
        } else {
            descriptor.timing.clone()
        };
        let zero = durations.iter().all(TimeSpan::is_zero) && delay.is_zero();

        let resolve = |values: &[(String, StyleValue)]| -> Vec<(String, String)> {
            let resolved: Vec<(String, StyleValue)> = values
                .iter()
                .map(|(p, v)| {
                    (
                        p.clone(),
                        resolve_value(v, &geometry, &options.frame_data, &descriptor.params),
                    )
                })
                .collect();
            let (mut declarations, merged) = transform::split_transform(&resolved);
            if let Some(merged) = merged {
                let composed = transform::compose(
                    &merged,
                    target.current_transform().as_deref(),
                    descriptor.additive,
                );
                declarations.push(("transform".to_string(), composed));
            }
            declarations
        };

        let frames: Vec<ResolvedFrame> = if complex {
            descriptor
                .keyframes
                .iter()
                .map(|kf| ResolvedFrame {
                    offset: kf.offset,
                    declarations: resolve(&kf.values),
                })
                .collect()
        } else {
            Vec::new()
        };
        let declarations = resolve(&descriptor.properties);
        let terminal: Vec<(String, String)> = if complex {
            frames
                .last()
                .map(|frame| frame.declarations.clone())
                .unwrap_or_default()
        } else {
            declarations.clone()
        };

        // `Now` pre-positions synchronously; completion still lands on the
        // next tick so callers observe a uniform asynchronous surface.
        if options.mode == RunMode::Now {
            if let Some(origin) = &descriptor.transform_origin {
                target.set_style("transform-origin", origin);
            }
            for (property, value) in &terminal {
                target.set_style(property, value);
            }
            shared.pending.borrow_mut().insert(
                id,
                PendingRun {
                    target: target.clone(),
                    kind: RunKind::Immediate,
                    animation_name: None,
                    transition_props: Vec::new(),
                    start_writes: Vec::new(),
                    terminal,
                    callback: completion,
                    zero: true,
                },
            );
            schedule_finish(shared, id);
            return Some(id);
        }

        let durations_css = join_css(durations.iter().map(TimeSpan::to_css));
        let timing_css = join_css(timing.iter().map(Easing::to_css));
        let mut start_writes: Vec<(String, String)> = Vec::new();
        if let Some(origin) = &descriptor.transform_origin {
            start_writes.push(("transform-origin".to_string(), origin.clone()));
        }

        if complex {
            let name = format!("{}-{}", settings.name_prefix, id.0);
            let rule = css::keyframes_rule(&name, &frames);
            let rule_handle = match shared.sheet.insert_rule(&rule) {
                Ok(handle) => handle,
                Err(err) => {
                    warn!("process: failed to inject keyframe rule: {err}");
                    return None;
                }
            };
            start_writes.push(("animation-duration".to_string(), durations_css));
            start_writes.push(("animation-delay".to_string(), delay.to_css()));
            start_writes.push(("animation-timing-function".to_string(), timing_css));
            start_writes.push((
                "animation-iteration-count".to_string(),
                descriptor.iterations.to_css(),
            ));
            start_writes.push(("animation-fill-mode".to_string(), "forwards".to_string()));

            shared.registry.borrow_mut().insert(
                id,
                RegistryEntry {
                    rule_handle,
                    target: target.clone(),
                },
            );
            shared.pending.borrow_mut().insert(
                id,
                PendingRun {
                    target: target.clone(),
                    kind: RunKind::Complex,
                    animation_name: Some(name),
                    transition_props: Vec::new(),
                    start_writes,
                    terminal,
                    callback: completion,
                    zero,
                },
            );
            debug!("starting keyframe run {:?} on {}", id, target.id());
        } else {
            let transition_props: Vec<String> =
                declarations.iter().map(|(p, _)| p.clone()).collect();
            start_writes.push((
                "transition-property".to_string(),
                transition_props.join(", "),
            ));
            start_writes.push(("transition-duration".to_string(), durations_css));
            start_writes.push(("transition-delay".to_string(), delay.to_css()));
            start_writes.push(("transition-timing-function".to_string(), timing_css));
            start_writes.extend(declarations.iter().cloned());

            shared.pending.borrow_mut().insert(
                id,
                PendingRun {
                    target: target.clone(),
                    kind: RunKind::Simple,
                    animation_name: None,
                    transition_props,
                    start_writes,
                    terminal,
                    callback: completion,
                    zero,
                },
            );
            debug!("starting transition run {:?} on {}", id, target.id());
        }

        schedule_start(shared, id);
        Some(id)
    }

    /// Cancel a keyframe run by id.
    ///
    /// Strips the run's name token, removes the injected rule set, and
    /// deletes the registry entry. Returns `false` for unknown ids, for
    /// transition runs (untracked by design), and when rule removal fails
    /// — the entry is deleted regardless, so nothing leaks.
    pub fn cancel(&self, id: RunId) -> bool {
        let Some(entry) = self.shared.registry.borrow_mut().remove(&id) else {
            debug!("cancel: run {:?} is not tracked", id);
            return false;
        };
        let name = self
            .shared
            .pending
            .borrow_mut()
            .remove(&id)
            .and_then(|run| run.animation_name);
        if let Some(name) = &name {
            strip_animation_name(entry.target.as_ref(), name);
        }
        match self.shared.sheet.remove_rule(entry.rule_handle) {
            Ok(()) => true,
            Err(err) => {
                warn!("cancel: failed to remove keyframe rule for {:?}: {err}", id);
                false
            }
        }
    }

    /// Route one platform completion signal to its run.
    ///
    /// Signals bubbled up from descendants (`origin != target`) and
    /// signals without a matching in-flight run are ignored. Returns
    /// whether a run was completed.
    pub fn handle_signal(&self, signal: &CompletionSignal) -> bool {
        if signal.origin != signal.target {
            debug!(
                "ignoring completion bubbled from {} to {}",
                signal.origin, signal.target
            );
            return false;
        }
        let matched = {
            let pending = self.shared.pending.borrow();
            let mut ids: Vec<RunId> = pending
                .iter()
                .filter(|(_, run)| run.matches(signal))
                .map(|(id, _)| *id)
                .collect();
            ids.sort();
            ids.first().copied()
        };
        match matched {
            Some(id) => {
                finish_run(&self.shared, id);
                true
            }
            None => false,
        }
    }
}

fn join_css<I: Iterator<Item = String>>(parts: I) -> String {
    parts.collect::<Vec<_>>().join(", ")
}

fn strip_animation_name(target: &dyn Component, token: &str) {
    if let Some(current) = target.style("animation-name") {
        match css::strip_name_token(&current, token) {
            Some(remaining) => target.set_style("animation-name", &remaining),
            None => target.remove_style("animation-name"),
        }
    }
}

fn schedule_start(shared: &Rc<EngineShared>, id: RunId) {
    let weak: Weak<EngineShared> = Rc::downgrade(shared);
    shared.scheduler.schedule(Box::new(move || {
        if let Some(shared) = weak.upgrade() {
            start_run(&shared, id);
        }
    }));
}

fn schedule_finish(shared: &Rc<EngineShared>, id: RunId) {
    let weak: Weak<EngineShared> = Rc::downgrade(shared);
    shared.scheduler.schedule(Box::new(move || {
        if let Some(shared) = weak.upgrade() {
            finish_run(&shared, id);
        }
    }));
}

fn start_run(shared: &Rc<EngineShared>, id: RunId) {
    let plan = {
        let pending = shared.pending.borrow();
        pending.get(&id).map(|run| {
            (
                run.target.clone(),
                run.start_writes.clone(),
                run.animation_name.clone(),
                run.zero,
            )
        })
    };
    // Cancelled before the start tick: nothing to write.
    let Some((target, writes, name, zero)) = plan else {
        return;
    };
    if let Some(name) = &name {
        let appended = css::append_name_token(target.style("animation-name").as_deref(), name);
        target.set_style("animation-name", &appended);
    }
    for (property, value) in &writes {
        target.set_style(property, value);
    }
    if zero {
        schedule_finish(shared, id);
    }
}

fn finish_run(shared: &Rc<EngineShared>, id: RunId) {
    let Some(mut run) = shared.pending.borrow_mut().remove(&id) else {
        return;
    };
    let callback = run.callback.take();
    let target = run.target.clone();

    if run.kind == RunKind::Complex {
        for (property, value) in &run.terminal {
            target.set_style(property, value);
        }
        if let Some(name) = &run.animation_name {
            strip_animation_name(target.as_ref(), name);
        }
        let entry = shared.registry.borrow_mut().remove(&id);
        if let Some(entry) = entry {
            if let Err(err) = shared.sheet.remove_rule(entry.rule_handle) {
                warn!("failed to remove keyframe rule for {:?}: {err}", id);
            }
        }
    }

    let delegate = shared.delegate.borrow().clone();
    if let Some(delegate) = delegate {
        delegate.animation_did_end(target.id(), id);
    }
    if let Some(callback) = callback {
        callback(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStyleHost, MockComponent};
    use crate::scheduler::TickQueue;
    use std::cell::Cell;

    struct Rig {
        animator: Animator,
        queue: Rc<TickQueue>,
        sheet: Rc<MemoryStyleHost>,
        target: Rc<MockComponent>,
        handle: Rc<dyn Component>,
    }

    fn rig() -> Rig {
        let queue = Rc::new(TickQueue::new());
        let sheet = Rc::new(MemoryStyleHost::new());
        let animator = Animator::new(sheet.clone(), queue.clone());
        let target = Rc::new(MockComponent::new("panel", [200.0, 100.0], [10.0, 20.0]));
        let handle: Rc<dyn Component> = target.clone();
        Rig {
            animator,
            queue,
            sheet,
            target,
            handle,
        }
    }

    fn fade_keyframes() -> AnimationDescriptor {
        AnimationDescriptor::new()
            .frame("from", |kf| kf.set("opacity", 1.0))
            .frame("to", |kf| kf.set("opacity", 0.0))
            .duration_ms(1000.0)
    }

    fn slide_transition() -> AnimationDescriptor {
        AnimationDescriptor::new()
            .property("translateX", "40px")
            .property("opacity", 0.5)
            .duration_ms(300.0)
    }

    #[test]
    fn test_simple_path_writes_after_one_tick() {
        let rig = rig();
        let id = rig
            .animator
            .process(&rig.handle, &slide_transition(), None, RunOptions::animate())
            .unwrap();

        // Nothing is written until the start tick.
        assert_eq!(rig.target.style("transition-property"), None);
        rig.queue.run_tick();

        assert_eq!(
            rig.target.style("transition-property").as_deref(),
            Some("opacity, transform")
        );
        assert_eq!(
            rig.target.style("transition-duration").as_deref(),
            Some("300ms")
        );
        assert_eq!(rig.target.style("transform").as_deref(), Some("translateX(40px)"));
        assert_eq!(rig.target.style("opacity").as_deref(), Some("0.5"));
        // Transition runs are untracked: no registry entry, cancel refuses.
        assert_eq!(rig.animator.active_runs(), 0);
        assert!(!rig.animator.cancel(id));
    }

    #[test]
    fn test_simple_completion_via_signal_fires_once() {
        let rig = rig();
        let fired = Rc::new(Cell::new(0));
        let fired2 = fired.clone();
        rig.animator.process(
            &rig.handle,
            &slide_transition(),
            Some(Box::new(move |_| fired2.set(fired2.get() + 1))),
            RunOptions::animate(),
        );
        rig.queue.run_tick();

        let signal = CompletionSignal::transition_end("panel", "opacity");
        assert!(rig.animator.handle_signal(&signal));
        assert_eq!(fired.get(), 1);

        // The run is gone; the same signal is now ignored.
        assert!(!rig.animator.handle_signal(&signal));
        assert_eq!(fired.get(), 1);
        assert_eq!(rig.animator.pending_runs(), 0);
    }

    #[test]
    fn test_zero_duration_synthesizes_completion() {
        let rig = rig();
        let fired = Rc::new(Cell::new(false));
        let fired2 = fired.clone();
        let descriptor = AnimationDescriptor::new()
            .property("opacity", 0.0)
            .duration_ms(0.0);
        rig.animator.process(
            &rig.handle,
            &descriptor,
            Some(Box::new(move |_| fired2.set(true))),
            RunOptions::animate(),
        );

        // Start tick, then the synthesized completion tick.
        rig.queue.run_tick();
        assert!(!fired.get());
        rig.queue.run_tick();
        assert!(fired.get());
    }

    #[test]
    fn test_instant_overrides_duration_per_run() {
        let rig = rig();
        let fired = Rc::new(Cell::new(false));
        let fired2 = fired.clone();
        let descriptor = slide_transition();
        rig.animator.process(
            &rig.handle,
            &descriptor,
            Some(Box::new(move |_| fired2.set(true))),
            RunOptions::animate().instant(true),
        );
        rig.queue.run_until_idle();

        assert!(fired.get());
        assert_eq!(
            rig.target.style("transition-duration").as_deref(),
            Some("0ms")
        );
        // The shared descriptor is untouched.
        assert_eq!(descriptor.durations, vec![TimeSpan::ms(300.0)]);
    }

    #[test]
    fn test_complex_path_lifecycle() {
        let rig = rig();
        let fired = Rc::new(Cell::new(false));
        let fired2 = fired.clone();
        let id = rig
            .animator
            .process(
                &rig.handle,
                &fade_keyframes(),
                Some(Box::new(move |_| fired2.set(true))),
                RunOptions::animate(),
            )
            .unwrap();

        // Rule injected and registered before the start tick.
        assert_eq!(rig.sheet.rule_count(), 1);
        assert_eq!(rig.animator.active_runs(), 1);
        let name = format!("tactile-run-{}", id.0);
        assert!(rig.sheet.contains(&format!("@keyframes {}", name)));
        assert!(rig.sheet.contains("0% { opacity: 1; }"));
        assert!(rig.sheet.contains("100% { opacity: 0; }"));

        rig.queue.run_tick();
        assert_eq!(rig.target.style("animation-name").as_deref(), Some(name.as_str()));
        assert_eq!(
            rig.target.style("animation-duration").as_deref(),
            Some("1000ms")
        );
        assert_eq!(
            rig.target.style("animation-fill-mode").as_deref(),
            Some("forwards")
        );
        assert!(!fired.get());

        // Completion: terminal values reapplied, token stripped, rule gone.
        let signal = CompletionSignal::animation_end("panel", name.clone());
        assert!(rig.animator.handle_signal(&signal));
        assert!(fired.get());
        assert_eq!(rig.target.style("opacity").as_deref(), Some("0"));
        assert_eq!(rig.target.style("animation-name"), None);
        assert_eq!(rig.sheet.rule_count(), 0);
        assert_eq!(rig.animator.active_runs(), 0);
    }

    #[test]
    fn test_concurrent_runs_share_animation_name() {
        let rig = rig();
        let id1 = rig
            .animator
            .process(&rig.handle, &fade_keyframes(), None, RunOptions::animate())
            .unwrap();
        let id2 = rig
            .animator
            .process(&rig.handle, &fade_keyframes(), None, RunOptions::animate())
            .unwrap();
        rig.queue.run_tick();

        let name1 = format!("tactile-run-{}", id1.0);
        let name2 = format!("tactile-run-{}", id2.0);
        assert_eq!(
            rig.target.style("animation-name"),
            Some(format!("{}, {}", name1, name2))
        );

        // Completing the first run leaves the second's token in place.
        rig.animator
            .handle_signal(&CompletionSignal::animation_end("panel", name1));
        assert_eq!(rig.target.style("animation-name").as_deref(), Some(name2.as_str()));
        assert_eq!(rig.sheet.rule_count(), 1);
    }

    #[test]
    fn test_cancel_returns_true_once() {
        let rig = rig();
        let id = rig
            .animator
            .process(&rig.handle, &fade_keyframes(), None, RunOptions::animate())
            .unwrap();

        assert!(rig.animator.cancel(id));
        assert_eq!(rig.sheet.rule_count(), 0);
        assert_eq!(rig.animator.active_runs(), 0);

        assert!(!rig.animator.cancel(id));
    }

    #[test]
    fn test_cancel_cleanup_failure_still_deletes_entry() {
        let rig = rig();
        let id = rig
            .animator
            .process(&rig.handle, &fade_keyframes(), None, RunOptions::animate())
            .unwrap();

        rig.sheet.fail_next_removal();
        assert!(!rig.animator.cancel(id));
        // No leak: the entry is gone even though removal failed.
        assert_eq!(rig.animator.active_runs(), 0);
        assert!(!rig.animator.cancel(id));
    }

    #[test]
    fn test_cancel_before_start_suppresses_writes() {
        let rig = rig();
        let id = rig
            .animator
            .process(&rig.handle, &fade_keyframes(), None, RunOptions::animate())
            .unwrap();

        assert!(rig.animator.cancel(id));
        rig.queue.run_until_idle();

        assert_eq!(rig.target.style("animation-name"), None);
        assert_eq!(rig.target.style("animation-duration"), None);
        assert_eq!(rig.sheet.rule_count(), 0);
    }

    #[test]
    fn test_bubbled_signal_is_ignored() {
        let rig = rig();
        let fired = Rc::new(Cell::new(false));
        let fired2 = fired.clone();
        let id = rig
            .animator
            .process(
                &rig.handle,
                &fade_keyframes(),
                Some(Box::new(move |_| fired2.set(true))),
                RunOptions::animate(),
            )
            .unwrap();
        rig.queue.run_tick();

        let name = format!("tactile-run-{}", id.0);
        let bubbled =
            CompletionSignal::animation_end("panel", name.clone()).bubbled_from("panel-child");
        assert!(!rig.animator.handle_signal(&bubbled));
        assert!(!fired.get());
        assert_eq!(rig.animator.active_runs(), 1);

        // The properly scoped signal still completes the run.
        assert!(
            rig.animator
                .handle_signal(&CompletionSignal::animation_end("panel", name))
        );
        assert!(fired.get());
    }

    #[test]
    fn test_now_mode_is_immediate_and_idempotent() {
        let rig = rig();
        let fired = Rc::new(Cell::new(0));
        let descriptor = fade_keyframes();

        for _ in 0..2 {
            let fired2 = fired.clone();
            rig.animator.process(
                &rig.handle,
                &descriptor,
                Some(Box::new(move |_| fired2.set(fired2.get() + 1))),
                RunOptions::now(),
            );
            // Terminal values are applied synchronously...
            assert_eq!(rig.target.style("opacity").as_deref(), Some("0"));
            // ...and completion lands within one tick.
            rig.queue.run_tick();
        }

        assert_eq!(fired.get(), 2);
        // No rule, no registry entry, no animation styles.
        assert_eq!(rig.sheet.rule_count(), 0);
        assert_eq!(rig.animator.active_runs(), 0);
        assert_eq!(rig.target.style("animation-name"), None);
    }

    #[test]
    fn test_delegate_fires_before_callback() {
        struct OrderDelegate {
            log: Rc<RefCell<Vec<&'static str>>>,
        }
        impl AnimationDelegate for OrderDelegate {
            fn animation_did_end(&self, _target_id: &str, _run: RunId) {
                self.log.borrow_mut().push("delegate");
            }
        }

        let rig = rig();
        let log = Rc::new(RefCell::new(Vec::new()));
        rig.animator.set_delegate(Rc::new(OrderDelegate { log: log.clone() }));

        let log2 = log.clone();
        rig.animator.process(
            &rig.handle,
            &slide_transition(),
            Some(Box::new(move |_| log2.borrow_mut().push("callback"))),
            RunOptions::animate(),
        );
        rig.queue.run_tick();
        rig.animator
            .handle_signal(&CompletionSignal::transition_end("panel", "opacity"));

        assert_eq!(*log.borrow(), vec!["delegate", "callback"]);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let rig = rig();
        let empty = AnimationDescriptor::new();
        assert!(
            rig.animator
                .process(&rig.handle, &empty, None, RunOptions::animate())
                .is_none()
        );

        let anonymous: Rc<dyn Component> =
            Rc::new(MockComponent::new("", [10.0, 10.0], [0.0, 0.0]));
        assert!(
            rig.animator
                .process(&anonymous, &slide_transition(), None, RunOptions::animate())
                .is_none()
        );
        assert_eq!(rig.animator.pending_runs(), 0);
    }

    #[test]
    fn test_additive_composes_with_current_transform() {
        let rig = rig();
        rig.target.set_style("transform", "rotate(10deg)");
        let descriptor = AnimationDescriptor::new()
            .property("translateX", "5px")
            .additive(true)
            .duration_ms(100.0);
        rig.animator
            .process(&rig.handle, &descriptor, None, RunOptions::animate());
        rig.queue.run_tick();

        assert_eq!(
            rig.target.style("transform").as_deref(),
            Some("rotate(10deg) translateX(5px)")
        );
    }

    #[test]
    fn test_geometry_macros_resolve_at_invocation() {
        let rig = rig();
        let descriptor = AnimationDescriptor::new()
            .property("translateX", "$width")
            .duration_ms(100.0);
        rig.animator
            .process(&rig.handle, &descriptor, None, RunOptions::animate());
        // Geometry changes after invocation do not affect the snapshot.
        rig.target.set_size([999.0, 999.0]);
        rig.queue.run_tick();

        assert_eq!(
            rig.target.style("transform").as_deref(),
            Some("translateX(200px)")
        );
    }
}
