use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use super::host::{
    EffectElement, EffectHost, ElementQuery, EventHandler, EventInput, ListenTarget, Observation,
    PointerPosition, Rect, Viewport, VisibilityEntry, VisibilityHandler, VisibilityOptions,
    VisibilityWatch,
};
use crate::subscription::Subscription;

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|window| window.document())
}

fn event_input(event: &web_sys::Event) -> EventInput {
    if event.type_().starts_with("touch") {
        let touch = event.unchecked_ref::<web_sys::TouchEvent>().touches().get(0);
        return EventInput::Touch(touch.map(|touch| PointerPosition {
            x: f64::from(touch.client_x()),
            y: f64::from(touch.client_y()),
        }));
    }
    match event.dyn_ref::<web_sys::MouseEvent>() {
        Some(mouse) => EventInput::Pointer(PointerPosition {
            x: f64::from(mouse.client_x()),
            y: f64::from(mouse.client_y()),
        }),
        None => EventInput::Plain,
    }
}

fn listen_on(target: &web_sys::EventTarget, event: &'static str, mut handler: EventHandler) -> Subscription {
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        handler(event_input(&event));
    }) as Box<dyn FnMut(web_sys::Event)>);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        tracing::debug!("effects: could not listen for {event}");
        return Subscription::empty();
    }

    let target = target.clone();
    Subscription::new(move || {
        let _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        drop(closure);
    })
}

/// A live DOM element.
pub struct WebElement {
    element: web_sys::Element,
}

impl WebElement {
    pub fn new(element: web_sys::Element) -> Self {
        Self { element }
    }
}

impl EffectElement for WebElement {
    fn bounding_rect(&self) -> Rect {
        let rect = self.element.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(element) = self.element.dyn_ref::<web_sys::HtmlElement>() {
            let _ = element.style().set_property(property, value);
        }
    }

    fn remove_style(&self, property: &str) {
        if let Some(element) = self.element.dyn_ref::<web_sys::HtmlElement>() {
            let _ = element.style().remove_property(property);
        }
    }

    fn add_class(&self, class: &str) {
        let _ = self.element.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.element.class_list().remove_1(class);
    }

    fn data_attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(&format!("data-{name}"))
    }

    fn listen(&self, event: &'static str, handler: EventHandler) -> Subscription {
        listen_on(&self.element, event, handler)
    }

    fn remove(&self) {
        self.element.remove();
    }
}

/// The browser window and document.
pub struct WebHost;

impl WebHost {
    fn query_all(query: &ElementQuery) -> Vec<web_sys::Element> {
        let Some(document) = document() else {
            return Vec::new();
        };
        let found = match &query.scope {
            Some(scope) => match document.query_selector(scope) {
                Ok(Some(container)) => container.query_selector_all(&query.selector),
                _ => return Vec::new(),
            },
            None => document.query_selector_all(&query.selector),
        };
        let Ok(nodes) = found else {
            tracing::debug!("effects: invalid selector {}", query.selector);
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .collect()
    }
}

impl EffectHost for WebHost {
    fn listen(&self, target: ListenTarget, event: &'static str, handler: EventHandler) -> Subscription {
        let Some(window) = web_sys::window() else {
            return Subscription::empty();
        };
        match target {
            ListenTarget::Window => listen_on(&window, event, handler),
            ListenTarget::Document => match window.document() {
                Some(document) => listen_on(&document, event, handler),
                None => Subscription::empty(),
            },
        }
    }

    fn viewport(&self) -> Viewport {
        let Some(window) = web_sys::window() else {
            return Viewport {
                width: 0.0,
                height: 0.0,
            };
        };
        let dimension = |value: Result<JsValue, JsValue>| value.ok().and_then(|value| value.as_f64()).unwrap_or(0.0);
        Viewport {
            width: dimension(window.inner_width()),
            height: dimension(window.inner_height()),
        }
    }

    fn is_touch_device(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
            || window.navigator().max_touch_points() > 0
    }

    fn observe_visibility(
        &self,
        query: &ElementQuery,
        options: &VisibilityOptions,
        mut on_change: VisibilityHandler,
    ) -> VisibilityWatch {
        let elements = Self::query_all(query);
        if elements.is_empty() {
            return VisibilityWatch::empty();
        }

        let targets = elements.clone();
        let closure = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                    let target = entry.target();
                    let Some(index) = targets.iter().position(|candidate| *candidate == target) else {
                        continue;
                    };
                    let change = VisibilityEntry {
                        index,
                        element: Rc::new(WebElement::new(target.clone())),
                        intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    };
                    if on_change(&change) == Observation::Stop {
                        observer.unobserve(&target);
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>);

        let init = web_sys::IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let Ok(observer) = web_sys::IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)
        else {
            tracing::debug!("effects: intersection observer unavailable");
            return VisibilityWatch::empty();
        };
        for element in &elements {
            observer.observe(element);
        }

        VisibilityWatch::new(
            elements.len(),
            Subscription::new(move || {
                observer.disconnect();
                drop(closure);
            }),
        )
    }

    fn create_overlay(&self, class: &str) -> Option<Rc<dyn EffectElement>> {
        let document = document()?;
        let body = document.body()?;
        let overlay = document.create_element("div").ok()?;
        overlay.set_class_name(class);
        body.append_child(&overlay).ok()?;
        Some(Rc::new(WebElement::new(overlay)))
    }
}
