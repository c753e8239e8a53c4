use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::subscription::Subscription;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentNode {
    Root,
    Body,
}

/// The document-level side effects the preference store and the spotlight
/// rely on.
pub trait DomAdapter {
    fn set_document_lang(&self, lang: &str);

    /// Replaces the whole body class list.
    fn set_body_class(&self, class: &str);

    fn add_root_classes(&self, classes: &[&str]);

    fn remove_root_classes(&self, classes: &[&str]);

    fn has_class(&self, node: DocumentNode, class: &str) -> bool;

    fn prefers_dark_color_scheme(&self) -> bool;

    /// Calls `on_change` whenever the class list of the root or the body
    /// changes, until the returned subscription is dropped.
    fn watch_classes(&self, on_change: Rc<dyn Fn()>) -> Subscription;
}

#[cfg(target_arch = "wasm32")]
pub struct WebDom;

#[cfg(target_arch = "wasm32")]
impl WebDom {
    fn document() -> Option<web_sys::Document> {
        web_sys::window().and_then(|window| window.document())
    }

    fn node(node: DocumentNode) -> Option<web_sys::Element> {
        let document = Self::document()?;
        match node {
            DocumentNode::Root => document.document_element(),
            DocumentNode::Body => document.body().map(Into::into),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl DomAdapter for WebDom {
    fn set_document_lang(&self, lang: &str) {
        if let Some(root) = Self::node(DocumentNode::Root) {
            let _ = root.set_attribute("lang", lang);
        }
    }

    fn set_body_class(&self, class: &str) {
        if let Some(body) = Self::node(DocumentNode::Body) {
            body.set_class_name(class);
        }
    }

    fn add_root_classes(&self, classes: &[&str]) {
        let Some(root) = Self::node(DocumentNode::Root) else {
            return;
        };
        let list = root.class_list();
        for class in classes {
            let _ = list.add_1(class);
        }
    }

    fn remove_root_classes(&self, classes: &[&str]) {
        let Some(root) = Self::node(DocumentNode::Root) else {
            return;
        };
        let list = root.class_list();
        for class in classes {
            let _ = list.remove_1(class);
        }
    }

    fn has_class(&self, node: DocumentNode, class: &str) -> bool {
        Self::node(node)
            .map(|element| element.class_list().contains(class))
            .unwrap_or(false)
    }

    fn prefers_dark_color_scheme(&self) -> bool {
        web_sys::window()
            .and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map(|query| query.matches())
            .unwrap_or(false)
    }

    fn watch_classes(&self, on_change: Rc<dyn Fn()>) -> Subscription {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::{JsCast, JsValue};

        let closure = Closure::wrap(Box::new(move |_records: js_sys::Array, _observer: web_sys::MutationObserver| {
            on_change();
        }) as Box<dyn FnMut(js_sys::Array, web_sys::MutationObserver)>);
        let Ok(observer) = web_sys::MutationObserver::new(closure.as_ref().unchecked_ref()) else {
            tracing::debug!("dom: mutation observer unavailable");
            return Subscription::empty();
        };

        let init = web_sys::MutationObserverInit::new();
        init.set_attributes(true);
        let filter = js_sys::Array::of1(&JsValue::from_str("class"));
        init.set_attribute_filter(&filter);
        for node in [DocumentNode::Root, DocumentNode::Body] {
            if let Some(element) = Self::node(node) {
                let _ = observer.observe_with_options(&element, &init);
            }
        }

        Subscription::new(move || {
            observer.disconnect();
            drop(closure);
        })
    }
}

type Watchers = Rc<RefCell<Vec<(u64, Rc<dyn Fn()>)>>>;

/// Document stand-in for host builds and tests. Class watchers are notified
/// synchronously after each class change.
#[derive(Default)]
pub struct MemoryDom {
    lang: RefCell<Option<String>>,
    body_class: RefCell<String>,
    root_classes: RefCell<BTreeSet<String>>,
    prefers_dark: Cell<bool>,
    watchers: Watchers,
    next_watch: Cell<u64>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_dark_preference() -> Self {
        let dom = Self::new();
        dom.prefers_dark.set(true);
        dom
    }

    #[cfg(test)]
    pub fn document_lang(&self) -> Option<String> {
        self.lang.borrow().clone()
    }

    #[cfg(test)]
    pub fn body_class(&self) -> String {
        self.body_class.borrow().clone()
    }

    #[cfg(test)]
    pub fn root_classes(&self) -> Vec<String> {
        self.root_classes.borrow().iter().cloned().collect()
    }

    #[cfg(test)]
    pub fn watcher_count(&self) -> usize {
        self.watchers.borrow().len()
    }

    fn notify(&self) {
        let watchers: Vec<Rc<dyn Fn()>> = self
            .watchers
            .borrow()
            .iter()
            .map(|(_, watcher)| Rc::clone(watcher))
            .collect();
        for watcher in watchers {
            watcher();
        }
    }
}

impl DomAdapter for MemoryDom {
    fn set_document_lang(&self, lang: &str) {
        *self.lang.borrow_mut() = Some(lang.to_string());
    }

    fn set_body_class(&self, class: &str) {
        *self.body_class.borrow_mut() = class.to_string();
        self.notify();
    }

    fn add_root_classes(&self, classes: &[&str]) {
        self.root_classes
            .borrow_mut()
            .extend(classes.iter().map(|class| class.to_string()));
        self.notify();
    }

    fn remove_root_classes(&self, classes: &[&str]) {
        {
            let mut root = self.root_classes.borrow_mut();
            for class in classes {
                root.remove(*class);
            }
        }
        self.notify();
    }

    fn has_class(&self, node: DocumentNode, class: &str) -> bool {
        match node {
            DocumentNode::Root => self.root_classes.borrow().contains(class),
            DocumentNode::Body => self
                .body_class
                .borrow()
                .split_whitespace()
                .any(|candidate| candidate == class),
        }
    }

    fn prefers_dark_color_scheme(&self) -> bool {
        self.prefers_dark.get()
    }

    fn watch_classes(&self, on_change: Rc<dyn Fn()>) -> Subscription {
        let id = self.next_watch.get();
        self.next_watch.set(id + 1);
        self.watchers.borrow_mut().push((id, on_change));
        let watchers = Rc::clone(&self.watchers);
        Subscription::new(move || {
            watchers.borrow_mut().retain(|(watch_id, _)| *watch_id != id);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn body_class_is_replaced_not_appended() {
        let dom = MemoryDom::new();
        dom.set_body_class("light-mode");
        dom.set_body_class("dark-mode");
        assert_eq!(dom.body_class(), "dark-mode");
        assert!(dom.has_class(DocumentNode::Body, "dark-mode"));
        assert!(!dom.has_class(DocumentNode::Body, "light-mode"));
    }

    #[test]
    fn watchers_fire_until_released() {
        let dom = MemoryDom::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let watch = dom.watch_classes(Rc::new(move || counter.set(counter.get() + 1)));

        dom.add_root_classes(&["dark"]);
        dom.set_body_class("dark-mode");
        assert_eq!(hits.get(), 2);
        assert_eq!(dom.watcher_count(), 1);

        drop(watch);
        dom.remove_root_classes(&["dark"]);
        assert_eq!(hits.get(), 2);
        assert_eq!(dom.watcher_count(), 0);
    }
}
