//! In-memory doubles for the effect host, elements and frame scheduler.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use super::host::{
    EffectElement, EffectHost, ElementQuery, EventHandler, EventInput, ListenTarget, Observation,
    Rect, Viewport, VisibilityEntry, VisibilityHandler, VisibilityOptions, VisibilityWatch,
};
use super::scheduler::FrameScheduler;
use crate::subscription::Subscription;

type SharedHandler = Rc<RefCell<EventHandler>>;

struct Registration<T> {
    id: u64,
    target: T,
    event: &'static str,
    handler: SharedHandler,
}

type Registry<T> = Rc<RefCell<Vec<Registration<T>>>>;

fn register<T: 'static>(
    registry: &Registry<T>,
    next_id: &Cell<u64>,
    target: T,
    event: &'static str,
    handler: EventHandler,
) -> Subscription {
    let id = next_id.get();
    next_id.set(id + 1);
    registry.borrow_mut().push(Registration {
        id,
        target,
        event,
        handler: Rc::new(RefCell::new(handler)),
    });
    let registry = Rc::clone(registry);
    Subscription::new(move || registry.borrow_mut().retain(|entry| entry.id != id))
}

fn dispatch<T: PartialEq>(registry: &Registry<T>, target: &T, event: &str, input: EventInput) -> usize {
    let handlers: Vec<SharedHandler> = registry
        .borrow()
        .iter()
        .filter(|entry| entry.target == *target && entry.event == event)
        .map(|entry| Rc::clone(&entry.handler))
        .collect();
    for handler in &handlers {
        (handler.borrow_mut())(input);
    }
    handlers.len()
}

pub struct FakeElement {
    rect: Cell<Rect>,
    styles: RefCell<BTreeMap<String, String>>,
    classes: RefCell<BTreeSet<String>>,
    data: RefCell<BTreeMap<String, String>>,
    listeners: Registry<()>,
    next_id: Cell<u64>,
    removed: Cell<bool>,
}

impl FakeElement {
    pub fn new(rect: Rect) -> Rc<Self> {
        Rc::new(Self {
            rect: Cell::new(rect),
            styles: RefCell::default(),
            classes: RefCell::default(),
            data: RefCell::default(),
            listeners: Rc::default(),
            next_id: Cell::new(0),
            removed: Cell::new(false),
        })
    }

    pub fn with_data(self: Rc<Self>, name: &str, value: &str) -> Rc<Self> {
        self.data.borrow_mut().insert(name.to_string(), value.to_string());
        self
    }

    pub fn set_rect(&self, rect: Rect) {
        self.rect.set(rect);
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    pub fn is_removed(&self) -> bool {
        self.removed.get()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn fire(&self, event: &str, input: EventInput) -> usize {
        dispatch(&self.listeners, &(), event, input)
    }

    pub fn as_dyn(self: &Rc<Self>) -> Rc<dyn EffectElement> {
        Rc::clone(self) as Rc<dyn EffectElement>
    }
}

impl EffectElement for FakeElement {
    fn bounding_rect(&self) -> Rect {
        self.rect.get()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
    }

    fn remove_style(&self, property: &str) {
        self.styles.borrow_mut().remove(property);
    }

    fn add_class(&self, class: &str) {
        self.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().remove(class);
    }

    fn data_attribute(&self, name: &str) -> Option<String> {
        self.data.borrow().get(name).cloned()
    }

    fn listen(&self, event: &'static str, handler: EventHandler) -> Subscription {
        register(&self.listeners, &self.next_id, (), event, handler)
    }

    fn remove(&self) {
        self.removed.set(true);
    }
}

struct FakeObserver {
    id: u64,
    elements: Vec<Rc<FakeElement>>,
    observing: Vec<bool>,
    options: VisibilityOptions,
    handler: Rc<RefCell<VisibilityHandler>>,
}

struct FakeMatch {
    scope: Option<String>,
    selector: String,
    element: Rc<FakeElement>,
}

impl FakeMatch {
    fn matches(&self, query: &ElementQuery) -> bool {
        self.selector == query.selector
            && (query.scope.is_none() || self.scope == query.scope)
    }
}

pub struct FakeHost {
    listeners: Registry<ListenTarget>,
    next_id: Cell<u64>,
    viewport: Cell<Viewport>,
    touch_device: Cell<bool>,
    matches: RefCell<Vec<FakeMatch>>,
    observers: Rc<RefCell<Vec<FakeObserver>>>,
    overlays: RefCell<Vec<Rc<FakeElement>>>,
}

impl FakeHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            listeners: Rc::default(),
            next_id: Cell::new(0),
            viewport: Cell::new(Viewport {
                width: 1280.0,
                height: 800.0,
            }),
            touch_device: Cell::new(false),
            matches: RefCell::default(),
            observers: Rc::default(),
            overlays: RefCell::default(),
        })
    }

    pub fn set_touch_device(&self, touch: bool) {
        self.touch_device.set(touch);
    }

    /// Makes `element` one of the results for `selector`.
    pub fn add_match(&self, selector: &str, element: &Rc<FakeElement>) {
        self.push_match(None, selector, element);
    }

    /// Like [`add_match`](Self::add_match), for an element that sits inside
    /// the container matched by `scope`.
    pub fn add_scoped_match(&self, scope: &str, selector: &str, element: &Rc<FakeElement>) {
        self.push_match(Some(scope), selector, element);
    }

    fn push_match(&self, scope: Option<&str>, selector: &str, element: &Rc<FakeElement>) {
        self.matches.borrow_mut().push(FakeMatch {
            scope: scope.map(str::to_string),
            selector: selector.to_string(),
            element: Rc::clone(element),
        });
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listener_count_for(&self, target: ListenTarget, event: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|entry| entry.target == target && entry.event == event)
            .count()
    }

    pub fn dispatch(&self, target: ListenTarget, event: &str, input: EventInput) -> usize {
        dispatch(&self.listeners, &target, event, input)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn observer_threshold(&self) -> Option<f64> {
        self.observers.borrow().first().map(|observer| observer.options.threshold)
    }

    pub fn is_observing(&self, element: &Rc<FakeElement>) -> bool {
        self.observers.borrow().iter().any(|observer| {
            observer
                .elements
                .iter()
                .zip(&observer.observing)
                .any(|(candidate, observing)| *observing && Rc::ptr_eq(candidate, element))
        })
    }

    /// Delivers a visibility change for `element` to every observer still
    /// watching it.
    pub fn report_visibility(&self, element: &Rc<FakeElement>, intersecting: bool, ratio: f64) {
        let deliveries: Vec<(u64, usize, Rc<RefCell<VisibilityHandler>>)> = self
            .observers
            .borrow()
            .iter()
            .filter_map(|observer| {
                let index = observer
                    .elements
                    .iter()
                    .position(|candidate| Rc::ptr_eq(candidate, element))?;
                observer.observing[index].then(|| (observer.id, index, Rc::clone(&observer.handler)))
            })
            .collect();

        for (observer_id, index, handler) in deliveries {
            let entry = VisibilityEntry {
                index,
                element: element.as_dyn(),
                intersecting,
                ratio,
            };
            if (handler.borrow_mut())(&entry) == Observation::Stop {
                if let Some(observer) = self
                    .observers
                    .borrow_mut()
                    .iter_mut()
                    .find(|observer| observer.id == observer_id)
                {
                    observer.observing[index] = false;
                }
            }
        }
    }

    pub fn live_overlays(&self) -> Vec<Rc<FakeElement>> {
        self.overlays
            .borrow()
            .iter()
            .filter(|overlay| !overlay.is_removed())
            .cloned()
            .collect()
    }
}

impl EffectHost for FakeHost {
    fn listen(&self, target: ListenTarget, event: &'static str, handler: EventHandler) -> Subscription {
        register(&self.listeners, &self.next_id, target, event, handler)
    }

    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn is_touch_device(&self) -> bool {
        self.touch_device.get()
    }

    fn observe_visibility(
        &self,
        query: &ElementQuery,
        options: &VisibilityOptions,
        on_change: VisibilityHandler,
    ) -> VisibilityWatch {
        let elements: Vec<Rc<FakeElement>> = self
            .matches
            .borrow()
            .iter()
            .filter(|candidate| candidate.matches(query))
            .map(|candidate| Rc::clone(&candidate.element))
            .collect();
        if elements.is_empty() {
            return VisibilityWatch::empty();
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let observed = elements.len();
        self.observers.borrow_mut().push(FakeObserver {
            id,
            observing: vec![true; observed],
            elements,
            options: options.clone(),
            handler: Rc::new(RefCell::new(on_change)),
        });
        let observers = Rc::clone(&self.observers);
        VisibilityWatch::new(
            observed,
            Subscription::new(move || observers.borrow_mut().retain(|observer| observer.id != id)),
        )
    }

    fn create_overlay(&self, class: &str) -> Option<Rc<dyn EffectElement>> {
        let overlay = FakeElement::new(Rect::default());
        overlay.add_class(class);
        self.overlays.borrow_mut().push(Rc::clone(&overlay));
        Some(overlay.as_dyn())
    }
}

/// Frame scheduler driven by hand from tests.
#[derive(Default)]
pub struct ManualFrames {
    queue: Rc<RefCell<Vec<(u64, Box<dyn FnOnce()>)>>>,
    next_id: Cell<u64>,
}

impl ManualFrames {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Runs every callback queued before this call; returns how many ran.
    pub fn run_frame(&self) -> usize {
        let batch: Vec<(u64, Box<dyn FnOnce()>)> = self.queue.borrow_mut().drain(..).collect();
        let count = batch.len();
        for (_, tick) in batch {
            tick();
        }
        count
    }
}

impl FrameScheduler for ManualFrames {
    fn request(&self, tick: Box<dyn FnOnce()>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.queue.borrow_mut().push((id, tick));
        let queue = Rc::clone(&self.queue);
        Subscription::new(move || queue.borrow_mut().retain(|(queued, _)| *queued != id))
    }
}
