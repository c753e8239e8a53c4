//! Visual effects attached to the page: scroll reveal, pointer tilt, cursor
//! tracking and the dark-mode spotlight.
//!
//! Every effect is mounted against an `EffectHost` and torn down by
//! dropping the value `mount` returned.

mod cursor;
mod host;
mod parallax;
mod reveal;
mod scheduler;
#[cfg(test)]
pub(crate) mod testing;
#[cfg(target_arch = "wasm32")]
mod web;

pub use cursor::{GlobalSpotlight, SpotlightOptions, TrackCursor};
#[cfg(target_arch = "wasm32")]
pub use host::{EffectHost, ListenTarget};
pub use parallax::{ParallaxEffect, ParallaxOptions};
pub use reveal::{RevealOptions, ScrollReveal};
#[cfg(target_arch = "wasm32")]
pub use scheduler::AnimationFrames;
#[cfg(target_arch = "wasm32")]
pub use web::{WebElement, WebHost};
