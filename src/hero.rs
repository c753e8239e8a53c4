use dioxus::prelude::*;

use crate::effects::ParallaxOptions;
use crate::hooks::{use_parallax, use_track_cursor};
use crate::preferences::Preferences;

#[component]
pub fn Hero(prefs: Preferences) -> Element {
    let spotlight = use_track_cursor();
    let card = use_parallax(ParallaxOptions {
        strength: 12.0,
        ..ParallaxOptions::default()
    });

    rsx! {
        section { class: "hero",
            div { class: "grid-background" }
            div { class: "container hero-grid",
                div { class: "hero-copy",
                    h1 { class: "hero-title fade-up",
                        span { class: "text-gradient", {prefs.t("hero.title")} }
                    }
                    p { class: "hero-subtitle fade-up fade-delay-1", {prefs.t("hero.subtitle")} }
                    div { class: "hero-actions fade-up fade-delay-2",
                        a { href: "#services", class: "btn-primary", {prefs.t("hero.cta")} }
                        a { href: "#contact", class: "btn-outline", {prefs.t("hero.contact")} }
                    }
                }
                div {
                    class: "hero-visual spotlight track-cursor",
                    onmounted: move |event| spotlight.capture(event),
                    div { class: "hero-glow" }
                    div {
                        class: "hero-card",
                        onmounted: move |event| card.capture(event),
                        div { class: "hero-card-row",
                            span { class: "hero-card-dot" }
                            span { class: "hero-card-dot" }
                            span { class: "hero-card-dot" }
                        }
                        div { class: "hero-card-body",
                            div { class: "hero-card-icon", "🔒" }
                            div { class: "hero-card-lines",
                                span { class: "hero-card-line" }
                                span { class: "hero-card-line hero-card-line-short" }
                            }
                        }
                    }
                    div { class: "hero-orb hero-orb-accent" }
                    div { class: "hero-orb hero-orb-primary" }
                }
            }
        }
    }
}
