use std::rc::Rc;

use crate::subscription::Subscription;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> PointerPosition {
        PointerPosition {
            x: self.left + self.width / 2.0,
            y: self.top + self.height / 2.0,
        }
    }

    pub fn intersects(&self, viewport: Viewport) -> bool {
        self.top < viewport.height && self.bottom() > 0.0 && self.left < viewport.width && self.right() > 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Client (viewport) coordinates in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventInput {
    Pointer(PointerPosition),
    /// First active touch, if any.
    Touch(Option<PointerPosition>),
    Plain,
}

impl EventInput {
    pub fn position(&self) -> Option<PointerPosition> {
        match self {
            EventInput::Pointer(position) => Some(*position),
            EventInput::Touch(position) => *position,
            EventInput::Plain => None,
        }
    }
}

pub type EventHandler = Box<dyn FnMut(EventInput)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenTarget {
    Window,
    Document,
}

pub trait EffectElement {
    fn bounding_rect(&self) -> Rect;

    /// Sets an inline style property; custom properties (`--x`) included.
    fn set_style(&self, property: &str, value: &str);

    fn remove_style(&self, property: &str);

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    /// Reads `data-<name>`.
    fn data_attribute(&self, name: &str) -> Option<String>;

    fn listen(&self, event: &'static str, handler: EventHandler) -> Subscription;

    /// Detaches the element from the document.
    fn remove(&self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementQuery {
    pub selector: String,
    /// Selector of the element the search is limited to; whole document if unset.
    pub scope: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityOptions {
    pub threshold: f64,
    pub root_margin: String,
}

pub struct VisibilityEntry {
    pub index: usize,
    pub element: Rc<dyn EffectElement>,
    pub intersecting: bool,
    pub ratio: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    Continue,
    Stop,
}

pub type VisibilityHandler = Box<dyn FnMut(&VisibilityEntry) -> Observation>;

/// A live visibility observer over the elements a query matched.
#[derive(Debug)]
pub struct VisibilityWatch {
    observed: usize,
    _subscription: Subscription,
}

impl VisibilityWatch {
    pub fn new(observed: usize, subscription: Subscription) -> Self {
        Self {
            observed,
            _subscription: subscription,
        }
    }

    pub fn empty() -> Self {
        Self::new(0, Subscription::empty())
    }

    pub fn observed(&self) -> usize {
        self.observed
    }
}

/// The page surface the visual effects attach to.
pub trait EffectHost {
    fn listen(&self, target: ListenTarget, event: &'static str, handler: EventHandler) -> Subscription;

    fn viewport(&self) -> Viewport;

    fn is_touch_device(&self) -> bool;

    fn observe_visibility(
        &self,
        query: &ElementQuery,
        options: &VisibilityOptions,
        on_change: VisibilityHandler,
    ) -> VisibilityWatch;

    /// Appends a new `div` with `class` to the body.
    fn create_overlay(&self, class: &str) -> Option<Rc<dyn EffectElement>>;
}
