//! Component hooks that mount the visual effects against the live page.
//!
//! Each hook keeps its effect in a slot owned by the component and empties
//! the slot on unmount, which detaches every listener, observer, frame and
//! injected node. Outside the browser the hooks do nothing.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;

use crate::config::SiteConfig;
use crate::effects::{GlobalSpotlight, ParallaxEffect, ParallaxOptions, RevealOptions, ScrollReveal, TrackCursor};
use crate::preferences::Preferences;
use crate::subscription::Subscription;

type Slot<T> = Rc<RefCell<Option<T>>>;

fn use_slot<T: 'static>() -> Slot<T> {
    use_hook(|| Rc::new(RefCell::new(None)))
}

fn use_clear_on_drop<T: 'static>(slot: &Slot<T>) {
    let slot = Rc::clone(slot);
    use_drop(move || {
        let effect = slot.borrow_mut().take();
        drop(effect);
    });
}

#[cfg(target_arch = "wasm32")]
fn replace<T>(slot: &Slot<T>, effect: T) {
    let previous = slot.borrow_mut().replace(effect);
    drop(previous);
}

/// The element an effect attaches to, filled in by `onmounted`.
#[derive(Clone, Copy, PartialEq)]
pub struct ElementRef {
    node: Signal<Option<web_sys::Element>>,
}

impl ElementRef {
    pub fn capture(&self, event: MountedEvent) {
        #[cfg(target_arch = "wasm32")]
        {
            let mut node = self.node;
            node.set(Some(event.data.as_ref().as_web_event()));
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = event;
    }
}

pub fn use_element_ref() -> ElementRef {
    ElementRef {
        node: use_signal(|| None),
    }
}

/// Reveals the matching elements as they scroll into view.
pub fn use_scroll_reveal(options: RevealOptions) {
    let reveal: Slot<ScrollReveal> = use_slot();
    #[cfg(target_arch = "wasm32")]
    {
        let slot = Rc::clone(&reveal);
        use_effect(move || {
            if slot.borrow().is_some() {
                return;
            }
            replace(&slot, ScrollReveal::mount(&crate::effects::WebHost, &options));
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = options;
    use_clear_on_drop(&reveal);
}

/// Tilts the captured element towards the pointer.
pub fn use_parallax(options: ParallaxOptions) -> ElementRef {
    let target = use_element_ref();
    let tilt: Slot<ParallaxEffect> = use_slot();
    #[cfg(target_arch = "wasm32")]
    {
        use crate::effects::{AnimationFrames, WebElement, WebHost};

        let slot = Rc::clone(&tilt);
        use_effect(move || {
            let Some(element) = target.node.read().clone() else {
                return;
            };
            let effect = ParallaxEffect::mount(
                Rc::new(WebHost),
                Rc::new(AnimationFrames),
                Rc::new(WebElement::new(element)),
                options,
            );
            replace(&slot, effect);
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = options;
    use_clear_on_drop(&tilt);
    target
}

/// Mirrors the pointer position over the captured element into `--x`/`--y`.
pub fn use_track_cursor() -> ElementRef {
    let target = use_element_ref();
    let tracker: Slot<TrackCursor> = use_slot();
    #[cfg(target_arch = "wasm32")]
    {
        let slot = Rc::clone(&tracker);
        use_effect(move || {
            let Some(element) = target.node.read().clone() else {
                return;
            };
            replace(
                &slot,
                TrackCursor::mount(Rc::new(crate::effects::WebElement::new(element))),
            );
        });
    }
    use_clear_on_drop(&tracker);
    target
}

/// Keeps the page-wide spotlight in step with the theme.
pub fn use_global_spotlight(prefs: Preferences, config: SiteConfig) {
    let spotlight: Slot<GlobalSpotlight> = use_slot();
    #[cfg(target_arch = "wasm32")]
    {
        let slot = Rc::clone(&spotlight);
        use_effect(move || {
            let options = config.spotlight_options(prefs.theme());
            if let Some(existing) = slot.borrow().as_ref() {
                existing.update(options);
                return;
            }
            let mounted = GlobalSpotlight::mount(
                Rc::new(crate::effects::WebHost),
                prefs.dom(),
                prefs.storage(),
                options,
            );
            replace(&slot, mounted);
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (prefs, config);
    use_clear_on_drop(&spotlight);
}

/// Whether the window has scrolled further than `threshold` pixels.
pub fn use_scrolled_past(threshold: f64) -> Signal<bool> {
    let scrolled = use_signal(|| false);
    let listener: Slot<Subscription> = use_slot();
    #[cfg(target_arch = "wasm32")]
    {
        use crate::effects::{EffectHost, ListenTarget, WebHost};

        let slot = Rc::clone(&listener);
        use_effect(move || {
            if slot.borrow().is_some() {
                return;
            }
            sync_scrolled(scrolled, threshold);
            let subscription = WebHost.listen(
                ListenTarget::Window,
                "scroll",
                Box::new(move |_| sync_scrolled(scrolled, threshold)),
            );
            replace(&slot, subscription);
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = threshold;
    use_clear_on_drop(&listener);
    scrolled
}

#[cfg(target_arch = "wasm32")]
fn sync_scrolled(mut scrolled: Signal<bool>, threshold: f64) {
    let offset = web_sys::window()
        .and_then(|window| window.scroll_y().ok())
        .unwrap_or(0.0);
    let past = offset > threshold;
    if *scrolled.peek() != past {
        scrolled.set(past);
    }
}
