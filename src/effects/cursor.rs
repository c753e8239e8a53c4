//! Cursor-follow effects: per-element `--x`/`--y` tracking and the global
//! dark-mode spotlight.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::host::{EffectElement, EffectHost, EventInput, ListenTarget, PointerPosition, Rect};
use crate::preferences::{DocumentNode, DomAdapter, PreferenceStorage, DARK_MODE_CLASS, THEME_KEY};
use crate::subscription::Subscription;

pub const SPOTLIGHT_CLASS: &str = "global-cursor-spotlight";

/// Pointer position relative to an element, in percent of its size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorOffset {
    pub x: f64,
    pub y: f64,
}

pub fn cursor_offset(rect: Rect, pointer: PointerPosition) -> Option<CursorOffset> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    Some(CursorOffset {
        x: (pointer.x - rect.left) / rect.width * 100.0,
        y: (pointer.y - rect.top) / rect.height * 100.0,
    })
}

/// Keeps `--x` and `--y` on an element in sync with the pointer over it.
pub struct TrackCursor {
    _listener: Subscription,
}

impl TrackCursor {
    pub fn mount(element: Rc<dyn EffectElement>) -> Self {
        let target: Weak<dyn EffectElement> = Rc::downgrade(&element);
        let listener = element.listen(
            "mousemove",
            Box::new(move |input| {
                let (Some(element), Some(pointer)) = (target.upgrade(), input.position()) else {
                    return;
                };
                if let Some(offset) = cursor_offset(element.bounding_rect(), pointer) {
                    element.set_style("--x", &format!("{}%", offset.x));
                    element.set_style("--y", &format!("{}%", offset.y));
                }
            }),
        );
        Self {
            _listener: listener,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpotlightOptions {
    /// CSS length used for both width and height.
    pub size: String,
    pub color: String,
    pub enabled: bool,
    pub enable_on_touch: bool,
}

impl Default for SpotlightOptions {
    fn default() -> Self {
        Self {
            size: "350px".to_string(),
            color: "rgba(99, 102, 241, 0.08)".to_string(),
            enabled: true,
            enable_on_touch: false,
        }
    }
}

/// Dark when either document node carries `dark-mode`, otherwise when the
/// stored theme says so.
pub fn dark_mode_active(dom: &dyn DomAdapter, storage: &dyn PreferenceStorage) -> bool {
    dom.has_class(DocumentNode::Root, DARK_MODE_CLASS)
        || dom.has_class(DocumentNode::Body, DARK_MODE_CLASS)
        || storage.read(THEME_KEY).as_deref() == Some("dark")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Mouse,
    Touch,
}

impl InputMode {
    pub fn detect(touch_device: bool, enable_on_touch: bool) -> Self {
        if touch_device && enable_on_touch {
            InputMode::Touch
        } else {
            InputMode::Mouse
        }
    }

    fn move_event(self) -> &'static str {
        match self {
            InputMode::Mouse => "mousemove",
            InputMode::Touch => "touchmove",
        }
    }

    fn end_event(self) -> &'static str {
        match self {
            InputMode::Mouse => "mouseleave",
            InputMode::Touch => "touchend",
        }
    }
}

pub fn overlay_styles(options: &SpotlightOptions) -> Vec<(&'static str, String)> {
    vec![
        ("position", "fixed".to_string()),
        ("pointer-events", "none".to_string()),
        ("width", options.size.clone()),
        ("height", options.size.clone()),
        ("background-color", options.color.clone()),
        ("border-radius", "50%".to_string()),
        ("transform", "translate(-50%, -50%)".to_string()),
        ("transition", "opacity 0.2s ease".to_string()),
        ("z-index", "99".to_string()),
        ("opacity", "0".to_string()),
        ("mix-blend-mode", "screen".to_string()),
        ("filter", "blur(30px)".to_string()),
    ]
}

struct SpotlightOverlay {
    mode: InputMode,
    listeners: Vec<Subscription>,
    element: Rc<dyn EffectElement>,
}

impl SpotlightOverlay {
    fn attach(host: &dyn EffectHost, options: &SpotlightOptions) -> Option<Self> {
        let Some(element) = host.create_overlay(SPOTLIGHT_CLASS) else {
            tracing::debug!("spotlight: document body unavailable");
            return None;
        };
        for (property, value) in overlay_styles(options) {
            element.set_style(property, &value);
        }

        let mode = InputMode::detect(host.is_touch_device(), options.enable_on_touch);
        let follow = Rc::downgrade(&element);
        let hide = Rc::downgrade(&element);
        let listeners = vec![
            host.listen(
                ListenTarget::Document,
                mode.move_event(),
                Box::new(move |input: EventInput| {
                    let (Some(element), Some(pointer)) = (follow.upgrade(), input.position()) else {
                        return;
                    };
                    element.set_style("left", &format!("{}px", pointer.x));
                    element.set_style("top", &format!("{}px", pointer.y));
                    element.set_style("opacity", "1");
                }),
            ),
            host.listen(
                ListenTarget::Document,
                mode.end_event(),
                Box::new(move |_| {
                    if let Some(element) = hide.upgrade() {
                        element.set_style("opacity", "0");
                    }
                }),
            ),
        ];
        tracing::debug!("spotlight: attached ({mode:?} input)");

        Some(Self {
            mode,
            listeners,
            element,
        })
    }
}

impl Drop for SpotlightOverlay {
    fn drop(&mut self) {
        self.listeners.clear();
        self.element.remove();
        tracing::debug!("spotlight: detached");
    }
}

struct SpotlightState {
    host: Rc<dyn EffectHost>,
    dom: Rc<dyn DomAdapter>,
    storage: Rc<dyn PreferenceStorage>,
    options: RefCell<SpotlightOptions>,
    overlay: RefCell<Option<SpotlightOverlay>>,
}

impl SpotlightState {
    fn sync(&self) {
        let wanted =
            self.options.borrow().enabled && dark_mode_active(self.dom.as_ref(), self.storage.as_ref());
        let showing = self.overlay.borrow().is_some();
        if wanted && !showing {
            let overlay = SpotlightOverlay::attach(self.host.as_ref(), &self.options.borrow());
            *self.overlay.borrow_mut() = overlay;
        } else if !wanted && showing {
            self.detach();
        }
    }

    fn detach(&self) {
        let overlay = self.overlay.borrow_mut().take();
        drop(overlay);
    }
}

/// The page-wide spotlight that follows the pointer while dark mode is on.
/// Dropping it stops watching the theme and removes the overlay.
pub struct GlobalSpotlight {
    _class_watch: Subscription,
    state: Rc<SpotlightState>,
}

impl GlobalSpotlight {
    pub fn mount(
        host: Rc<dyn EffectHost>,
        dom: Rc<dyn DomAdapter>,
        storage: Rc<dyn PreferenceStorage>,
        options: SpotlightOptions,
    ) -> Self {
        let state = Rc::new(SpotlightState {
            host,
            dom: Rc::clone(&dom),
            storage,
            options: RefCell::new(options),
            overlay: RefCell::new(None),
        });

        let weak = Rc::downgrade(&state);
        let class_watch = dom.watch_classes(Rc::new(move || {
            if let Some(state) = weak.upgrade() {
                state.sync();
            }
        }));
        state.sync();

        Self {
            _class_watch: class_watch,
            state,
        }
    }

    /// Applies new options, rebuilding the overlay if one is showing.
    pub fn update(&self, options: SpotlightOptions) {
        if *self.state.options.borrow() == options {
            return;
        }
        *self.state.options.borrow_mut() = options;
        self.state.detach();
        self.state.sync();
    }

    pub fn is_showing(&self) -> bool {
        self.state.overlay.borrow().is_some()
    }

    pub fn input_mode(&self) -> Option<InputMode> {
        self.state.overlay.borrow().as_ref().map(|overlay| overlay.mode)
    }
}

impl Drop for GlobalSpotlight {
    fn drop(&mut self) {
        self.state.detach();
    }
}
