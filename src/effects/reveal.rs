//! Reveal-on-scroll for elements marked with a selector.

use std::collections::BTreeSet;

use super::host::{EffectHost, ElementQuery, Observation, VisibilityEntry, VisibilityOptions, VisibilityWatch};

pub const REVEALED_CLASS: &str = "revealed";
/// Read as `data-reveal-delay`, in milliseconds.
pub const DELAY_ATTRIBUTE: &str = "reveal-delay";

#[derive(Clone, Debug, PartialEq)]
pub struct RevealOptions {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    pub root_margin: String,
    /// Base delay in milliseconds, added to each element's own delay.
    pub delay_ms: u32,
    pub once: bool,
    pub selector: String,
    /// Limits the search to descendants of this selector.
    pub scope: Option<String>,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            root_margin: "0px".to_string(),
            delay_ms: 0,
            once: true,
            selector: ".scroll-reveal".to_string(),
            scope: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealAction {
    Reveal,
    Hide,
    Nothing,
}

/// Per-element reveal bookkeeping, independent of how visibility is measured.
#[derive(Debug, Default)]
pub struct RevealTracker {
    threshold: f64,
    once: bool,
    revealed: BTreeSet<usize>,
}

impl RevealTracker {
    pub fn new(threshold: f64, once: bool) -> Self {
        Self {
            threshold,
            once,
            revealed: BTreeSet::new(),
        }
    }

    pub fn observe(&mut self, index: usize, intersecting: bool, ratio: f64) -> RevealAction {
        let visible = intersecting && ratio >= self.threshold;
        let already = self.revealed.contains(&index);
        match (visible, already) {
            (true, false) => {
                self.revealed.insert(index);
                RevealAction::Reveal
            }
            (false, true) if !self.once => {
                self.revealed.remove(&index);
                RevealAction::Hide
            }
            _ => RevealAction::Nothing,
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }
}

/// Total delay for an element: the base plus its `data-reveal-delay`.
/// Unparseable attribute values count as zero.
pub fn reveal_delay_ms(base_ms: u32, attribute: Option<&str>) -> u32 {
    let own = attribute
        .and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(0);
    base_ms.saturating_add(own)
}

/// A running scroll-reveal observer. Dropping it disconnects the observer.
#[derive(Debug)]
pub struct ScrollReveal {
    watch: VisibilityWatch,
}

impl ScrollReveal {
    pub fn mount(host: &dyn EffectHost, options: &RevealOptions) -> Self {
        let query = ElementQuery {
            selector: options.selector.clone(),
            scope: options.scope.clone(),
        };
        let visibility = VisibilityOptions {
            threshold: options.threshold,
            root_margin: options.root_margin.clone(),
        };
        let mut tracker = RevealTracker::new(options.threshold, options.once);
        let once = options.once;
        let base_delay = options.delay_ms;

        let watch = host.observe_visibility(
            &query,
            &visibility,
            Box::new(move |entry: &VisibilityEntry| {
                match tracker.observe(entry.index, entry.intersecting, entry.ratio) {
                    RevealAction::Reveal => {
                        let delay =
                            reveal_delay_ms(base_delay, entry.element.data_attribute(DELAY_ATTRIBUTE).as_deref());
                        if delay > 0 {
                            entry.element.set_style("transition-delay", &format!("{delay}ms"));
                        }
                        entry.element.add_class(REVEALED_CLASS);
                        if once {
                            return Observation::Stop;
                        }
                    }
                    RevealAction::Hide => {
                        entry.element.remove_style("transition-delay");
                        entry.element.remove_class(REVEALED_CLASS);
                    }
                    RevealAction::Nothing => {}
                }
                Observation::Continue
            }),
        );

        if watch.observed() == 0 {
            tracing::debug!("reveal: no elements match {}", options.selector);
        } else {
            tracing::debug!("reveal: observing {} elements", watch.observed());
        }
        Self { watch }
    }

    pub fn observed(&self) -> usize {
        self.watch.observed()
    }
}
