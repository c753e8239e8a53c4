//! Pointer-driven 3D tilt with eased motion.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::host::{EffectElement, EffectHost, EventInput, ListenTarget, PointerPosition, Rect, Viewport};
use super::scheduler::FrameScheduler;
use crate::subscription::Subscription;

/// Both axes within this many degrees of the target count as settled.
pub const SETTLE_EPSILON: f64 = 0.1;
/// Slowest easing accepted; smaller values are raised to it.
pub const MIN_EASING: f64 = 0.01;
const DEFAULT_EASING: f64 = 0.1;

/// Keeps easing in `[MIN_EASING, 1]` so every step closes part of the gap
/// without overshooting. Non-finite values fall back to the default.
pub fn clamp_easing(easing: f64) -> f64 {
    if easing.is_finite() {
        easing.clamp(MIN_EASING, 1.0)
    } else {
        DEFAULT_EASING
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxOptions {
    /// Maximum rotation in degrees.
    pub strength: f64,
    /// Perspective distance in pixels.
    pub perspective: f64,
    /// Fraction of the remaining distance covered per frame.
    pub easing: f64,
    /// Pointer distance from the element centre beyond which the tilt is zero.
    pub max_distance: f64,
    pub reset_on_scroll: bool,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            strength: 25.0,
            perspective: 1000.0,
            easing: DEFAULT_EASING,
            max_distance: 500.0,
            reset_on_scroll: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    pub const ZERO: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
    };
}

/// The rotation the element should ease towards for a pointer position.
pub fn target_tilt(
    options: &ParallaxOptions,
    rect: Rect,
    pointer: PointerPosition,
    viewport: Viewport,
) -> Tilt {
    if !rect.intersects(viewport) || options.max_distance <= 0.0 {
        return Tilt::ZERO;
    }
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Tilt::ZERO;
    }

    let center = rect.center();
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    let distance = dx.hypot(dy);
    if distance > options.max_distance {
        return Tilt::ZERO;
    }

    let falloff = 1.0 - distance / options.max_distance;
    Tilt {
        rotate_x: -dy / (rect.height / 2.0) * options.strength * falloff,
        rotate_y: dx / (rect.width / 2.0) * options.strength * falloff,
    }
}

pub fn transform_css(perspective: f64, tilt: Tilt) -> String {
    format!(
        "perspective({perspective}px) rotateX({}deg) rotateY({}deg)",
        tilt.rotate_x, tilt.rotate_y
    )
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TiltMotion {
    pub current: Tilt,
    pub target: Tilt,
}

impl TiltMotion {
    pub fn settled(&self) -> bool {
        (self.target.rotate_x - self.current.rotate_x).abs() < SETTLE_EPSILON
            && (self.target.rotate_y - self.current.rotate_y).abs() < SETTLE_EPSILON
    }

    /// Moves `current` towards `target`; returns whether another step is needed.
    pub fn step(&mut self, easing: f64) -> bool {
        let easing = clamp_easing(easing);
        self.current.rotate_x += (self.target.rotate_x - self.current.rotate_x) * easing;
        self.current.rotate_y += (self.target.rotate_y - self.current.rotate_y) * easing;
        !self.settled()
    }
}

struct TiltState {
    element: Rc<dyn EffectElement>,
    host: Rc<dyn EffectHost>,
    scheduler: Rc<dyn FrameScheduler>,
    options: ParallaxOptions,
    motion: RefCell<TiltMotion>,
    frame: RefCell<Option<Subscription>>,
}

impl TiltState {
    fn aim(self: &Rc<Self>, target: Tilt) {
        self.motion.borrow_mut().target = target;
        self.ensure_frame();
    }

    fn ensure_frame(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }
        let weak = Rc::downgrade(self);
        let frame = self.scheduler.request(Box::new(move || {
            if let Some(state) = weak.upgrade() {
                state.tick();
            }
        }));
        *self.frame.borrow_mut() = Some(frame);
    }

    fn tick(self: &Rc<Self>) {
        // The frame that called us has fired; forget its handle before deciding on the next one.
        let fired = self.frame.borrow_mut().take();
        drop(fired);

        let (current, moving) = {
            let mut motion = self.motion.borrow_mut();
            let moving = motion.step(self.options.easing);
            (motion.current, moving)
        };
        self.element
            .set_style("transform", &transform_css(self.options.perspective, current));
        if moving {
            self.ensure_frame();
        }
    }

    fn on_pointer(self: &Rc<Self>, input: EventInput) {
        let Some(pointer) = input.position() else {
            return;
        };
        let target = target_tilt(
            &self.options,
            self.element.bounding_rect(),
            pointer,
            self.host.viewport(),
        );
        self.aim(target);
    }
}

/// A tilt effect attached to one element. Dropping it removes the listeners
/// and cancels any pending frame.
pub struct ParallaxEffect {
    _listeners: Vec<Subscription>,
    state: Rc<TiltState>,
}

impl ParallaxEffect {
    pub fn mount(
        host: Rc<dyn EffectHost>,
        scheduler: Rc<dyn FrameScheduler>,
        element: Rc<dyn EffectElement>,
        options: ParallaxOptions,
    ) -> Self {
        element.set_style("transform-style", "preserve-3d");
        element.set_style("transition", "transform 0.1s ease-out");

        let state = Rc::new(TiltState {
            element: Rc::clone(&element),
            host: Rc::clone(&host),
            scheduler,
            options,
            motion: RefCell::new(TiltMotion::default()),
            frame: RefCell::new(None),
        });

        let mut listeners = Vec::with_capacity(3);
        listeners.push(host.listen(
            ListenTarget::Document,
            "mousemove",
            with_state(&state, |state, input| state.on_pointer(input)),
        ));
        if options.reset_on_scroll {
            listeners.push(host.listen(
                ListenTarget::Window,
                "scroll",
                with_state(&state, |state, _| state.aim(Tilt::ZERO)),
            ));
        }
        listeners.push(element.listen(
            "mouseleave",
            with_state(&state, |state, _| state.aim(Tilt::ZERO)),
        ));

        Self {
            _listeners: listeners,
            state,
        }
    }

    pub fn motion(&self) -> TiltMotion {
        *self.state.motion.borrow()
    }
}

impl Drop for ParallaxEffect {
    fn drop(&mut self) {
        let pending = self.state.frame.borrow_mut().take();
        drop(pending);
    }
}

fn with_state(
    state: &Rc<TiltState>,
    action: impl Fn(&Rc<TiltState>, EventInput) + 'static,
) -> Box<dyn FnMut(EventInput)> {
    let weak: Weak<TiltState> = Rc::downgrade(state);
    Box::new(move |input| {
        if let Some(state) = weak.upgrade() {
            action(&state, input);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::testing::{FakeElement, FakeHost, ManualFrames};
    use pretty_assertions::{assert_eq, assert_ne};

    fn card() -> Rc<FakeElement> {
        FakeElement::new(Rect::new(100.0, 100.0, 200.0, 100.0))
    }

    fn viewport() -> Viewport {
        Viewport {
            width: 1280.0,
            height: 800.0,
        }
    }

    #[test]
    fn pointer_at_centre_has_no_tilt() {
        let options = ParallaxOptions::default();
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(target_tilt(&options, rect, rect.center(), viewport()), Tilt::ZERO);
    }

    #[test]
    fn pointer_beyond_max_distance_has_no_tilt() {
        let options = ParallaxOptions::default();
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        let far = PointerPosition { x: 900.0, y: 700.0 };
        assert_eq!(target_tilt(&options, rect, far, viewport()), Tilt::ZERO);
    }

    #[test]
    fn element_outside_viewport_has_no_tilt() {
        let options = ParallaxOptions::default();
        let rect = Rect::new(100.0, 900.0, 200.0, 100.0);
        let pointer = PointerPosition { x: 150.0, y: 790.0 };
        assert_eq!(target_tilt(&options, rect, pointer, viewport()), Tilt::ZERO);
    }

    #[test]
    fn tilt_follows_pointer_direction_with_falloff() {
        let options = ParallaxOptions::default();
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        // 50px right of centre, 0px vertical: dx / (w/2) = 0.5, falloff = 0.9.
        let pointer = PointerPosition { x: 250.0, y: 150.0 };
        let tilt = target_tilt(&options, rect, pointer, viewport());
        assert!((tilt.rotate_y - 0.5 * 25.0 * 0.9).abs() < 1e-9);
        assert_eq!(tilt.rotate_x, 0.0);

        // Pointer above the centre tilts the top towards the viewer.
        let above = PointerPosition { x: 200.0, y: 125.0 };
        assert!(target_tilt(&options, rect, above, viewport()).rotate_x > 0.0);
    }

    #[test]
    fn transform_string_uses_perspective_and_both_axes() {
        let tilt = Tilt {
            rotate_x: -2.5,
            rotate_y: 4.0,
        };
        assert_eq!(
            transform_css(1000.0, tilt),
            "perspective(1000px) rotateX(-2.5deg) rotateY(4deg)"
        );
    }

    #[test]
    fn motion_converges_monotonically_and_settles() {
        let mut motion = TiltMotion {
            current: Tilt::ZERO,
            target: Tilt {
                rotate_x: -10.0,
                rotate_y: 20.0,
            },
        };
        let mut last_gap = f64::MAX;
        let mut steps = 0;
        while motion.step(0.1) {
            let gap = (motion.target.rotate_y - motion.current.rotate_y).abs();
            assert!(gap < last_gap);
            last_gap = gap;
            steps += 1;
            assert!(steps < 1000, "motion never settled");
        }
        assert!(motion.settled());
    }

    #[test]
    fn easing_is_kept_within_bounds() {
        assert_eq!(clamp_easing(0.25), 0.25);
        assert_eq!(clamp_easing(0.0), MIN_EASING);
        assert_eq!(clamp_easing(-3.0), MIN_EASING);
        assert_eq!(clamp_easing(2.5), 1.0);
        assert_eq!(clamp_easing(f64::NAN), 0.1);
    }

    #[test]
    fn oversized_easing_settles_instead_of_diverging() {
        let mut motion = TiltMotion {
            current: Tilt::ZERO,
            target: Tilt {
                rotate_x: 5.0,
                rotate_y: -12.0,
            },
        };
        for _ in 0..50 {
            motion.step(2.5);
        }
        assert!(motion.settled());
        assert_eq!(motion.current, motion.target);
    }

    #[test]
    fn zero_easing_still_stops_scheduling() {
        let host = FakeHost::new();
        let frames = ManualFrames::new();
        let options = ParallaxOptions {
            easing: 0.0,
            ..ParallaxOptions::default()
        };
        let effect = ParallaxEffect::mount(host.clone(), frames.clone(), card().as_dyn(), options);

        host.dispatch(
            ListenTarget::Document,
            "mousemove",
            EventInput::Pointer(PointerPosition { x: 250.0, y: 150.0 }),
        );
        let mut frames_run = 0;
        while frames.run_frame() > 0 {
            frames_run += 1;
            assert!(frames_run < 10_000, "tilt never settled");
        }

        assert!(effect.motion().settled());
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn mount_prepares_element_and_attaches_listeners() {
        let host = FakeHost::new();
        let element = card();
        let _effect = ParallaxEffect::mount(
            host.clone(),
            ManualFrames::new(),
            element.as_dyn(),
            ParallaxOptions::default(),
        );

        assert_eq!(element.style("transform-style").as_deref(), Some("preserve-3d"));
        assert_eq!(
            element.style("transition").as_deref(),
            Some("transform 0.1s ease-out")
        );
        assert_eq!(host.listener_count_for(ListenTarget::Document, "mousemove"), 1);
        assert_eq!(host.listener_count_for(ListenTarget::Window, "scroll"), 1);
        assert_eq!(element.listener_count(), 1);
    }

    #[test]
    fn scroll_listener_is_optional() {
        let host = FakeHost::new();
        let options = ParallaxOptions {
            reset_on_scroll: false,
            ..ParallaxOptions::default()
        };
        let _effect = ParallaxEffect::mount(host.clone(), ManualFrames::new(), card().as_dyn(), options);
        assert_eq!(host.listener_count_for(ListenTarget::Window, "scroll"), 0);
    }

    #[test]
    fn scrolling_resets_the_target() {
        let host = FakeHost::new();
        let frames = ManualFrames::new();
        let effect = ParallaxEffect::mount(
            host.clone(),
            frames.clone(),
            card().as_dyn(),
            ParallaxOptions::default(),
        );

        host.dispatch(
            ListenTarget::Document,
            "mousemove",
            EventInput::Pointer(PointerPosition { x: 250.0, y: 150.0 }),
        );
        frames.run_frame();
        assert_ne!(effect.motion().target, Tilt::ZERO);

        host.dispatch(ListenTarget::Window, "scroll", EventInput::Plain);
        assert_eq!(effect.motion().target, Tilt::ZERO);
        assert_eq!(frames.pending(), 1);
    }

    #[test]
    fn element_scrolled_offscreen_ignores_the_pointer() {
        let host = FakeHost::new();
        let frames = ManualFrames::new();
        let element = card();
        let effect = ParallaxEffect::mount(
            host.clone(),
            frames.clone(),
            element.as_dyn(),
            ParallaxOptions::default(),
        );

        element.set_rect(Rect::new(100.0, 900.0, 200.0, 100.0));
        host.dispatch(
            ListenTarget::Document,
            "mousemove",
            EventInput::Pointer(PointerPosition { x: 250.0, y: 790.0 }),
        );
        assert_eq!(effect.motion().target, Tilt::ZERO);

        element.set_rect(Rect::new(100.0, 100.0, 200.0, 100.0));
        host.dispatch(
            ListenTarget::Document,
            "mousemove",
            EventInput::Pointer(PointerPosition { x: 250.0, y: 150.0 }),
        );
        assert_ne!(effect.motion().target, Tilt::ZERO);
    }

    #[test]
    fn pointer_moves_keep_a_single_pending_frame() {
        let host = FakeHost::new();
        let frames = ManualFrames::new();
        let element = card();
        let _effect = ParallaxEffect::mount(
            host.clone(),
            frames.clone(),
            element.as_dyn(),
            ParallaxOptions::default(),
        );

        for x in [220.0, 230.0, 240.0] {
            host.dispatch(
                ListenTarget::Document,
                "mousemove",
                EventInput::Pointer(PointerPosition { x, y: 150.0 }),
            );
        }
        assert_eq!(frames.pending(), 1);
    }

    #[test]
    fn ticks_stop_once_settled() {
        let host = FakeHost::new();
        let frames = ManualFrames::new();
        let element = card();
        let effect = ParallaxEffect::mount(
            host.clone(),
            frames.clone(),
            element.as_dyn(),
            ParallaxOptions::default(),
        );

        host.dispatch(
            ListenTarget::Document,
            "mousemove",
            EventInput::Pointer(PointerPosition { x: 250.0, y: 150.0 }),
        );
        let mut frames_run = 0;
        while frames.run_frame() > 0 {
            frames_run += 1;
            assert!(frames_run < 1000, "tilt never settled");
        }

        assert!(effect.motion().settled());
        assert_eq!(frames.pending(), 0);
        assert!(element
            .style("transform")
            .is_some_and(|transform| transform.starts_with("perspective(1000px) rotateX(")));
    }

    #[test]
    fn leaving_the_element_eases_back_to_zero() {
        let host = FakeHost::new();
        let frames = ManualFrames::new();
        let element = card();
        let effect = ParallaxEffect::mount(
            host.clone(),
            frames.clone(),
            element.as_dyn(),
            ParallaxOptions::default(),
        );

        host.dispatch(
            ListenTarget::Document,
            "mousemove",
            EventInput::Pointer(PointerPosition { x: 250.0, y: 150.0 }),
        );
        frames.run_frame();
        element.fire("mouseleave", EventInput::Plain);
        assert_eq!(effect.motion().target, Tilt::ZERO);
        assert_eq!(frames.pending(), 1);
    }

    #[test]
    fn unmount_removes_listeners_and_pending_frame() {
        let host = FakeHost::new();
        let frames = ManualFrames::new();
        let element = card();
        let effect = ParallaxEffect::mount(
            host.clone(),
            frames.clone(),
            element.as_dyn(),
            ParallaxOptions::default(),
        );
        host.dispatch(
            ListenTarget::Document,
            "mousemove",
            EventInput::Pointer(PointerPosition { x: 250.0, y: 150.0 }),
        );
        assert_eq!(frames.pending(), 1);

        drop(effect);

        assert_eq!(host.listener_count(), 0);
        assert_eq!(element.listener_count(), 0);
        assert_eq!(frames.pending(), 0);
    }
}
