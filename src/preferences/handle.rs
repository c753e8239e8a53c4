use std::rc::Rc;

use dioxus::prelude::*;

use super::{
    DomAdapter, Language, PreferenceSnapshot, PreferenceStorage, PreferenceStore, Theme,
};
use crate::i18n::Catalog;

/// Copyable handle to the one preference store of the page. Components get it
/// as a prop from `App`; reading through it subscribes the caller to changes.
#[derive(Clone, Copy, PartialEq)]
pub struct Preferences {
    store: Signal<PreferenceStore>,
}

impl Preferences {
    pub fn snapshot(&self) -> PreferenceSnapshot {
        self.store.read().snapshot()
    }

    pub fn language(&self) -> Language {
        self.store.read().language()
    }

    pub fn theme(&self) -> Theme {
        self.store.read().theme()
    }

    pub fn t(&self, key: &str) -> String {
        self.store.read().t(key)
    }

    pub fn set_language(&self, language: Language) {
        let mut store = self.store;
        store.write().set_language(language);
    }

    pub fn toggle_language(&self) {
        let mut store = self.store;
        store.write().toggle_language();
        tracing::debug!("preferences: language -> {}", store.peek().language());
    }

    pub fn toggle_theme(&self) {
        let mut store = self.store;
        store.write().toggle_theme();
        tracing::debug!("preferences: theme -> {}", store.peek().theme());
    }

    pub fn dom(&self) -> Rc<dyn DomAdapter> {
        self.store.peek().dom()
    }

    pub fn storage(&self) -> Rc<dyn PreferenceStorage> {
        self.store.peek().storage()
    }
}

/// Builds the store once for the lifetime of the calling component.
pub fn use_preference_store() -> Preferences {
    let store = use_signal(|| {
        let (storage, dom) = platform_capabilities();
        PreferenceStore::initialize(storage, dom, Rc::new(Catalog::default()))
    });
    Preferences { store }
}

#[cfg(target_arch = "wasm32")]
fn platform_capabilities() -> (Rc<dyn PreferenceStorage>, Rc<dyn DomAdapter>) {
    (Rc::new(super::BrowserStorage), Rc::new(super::WebDom))
}

#[cfg(not(target_arch = "wasm32"))]
fn platform_capabilities() -> (Rc<dyn PreferenceStorage>, Rc<dyn DomAdapter>) {
    (
        Rc::new(super::MemoryStorage::new()),
        Rc::new(super::MemoryDom::new()),
    )
}
