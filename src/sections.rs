use dioxus::prelude::*;

use crate::date::current_year;
use crate::nav_bar::LogoLink;
use crate::preferences::Preferences;

const SERVICES: [(&str, &str); 4] = [
    ("🔒", "services.cybersecurity"),
    ("🖥️", "services.techSupport"),
    ("☁️", "services.cloudServices"),
    ("🌐", "services.networkSolutions"),
];

const STATS: [(&str, &str); 3] = [
    ("500+", "stats.clients"),
    ("10,000+", "stats.issues"),
    ("99.9%", "stats.uptime"),
];

const TESTIMONIALS: [&str; 2] = ["testimonials.testimonial1", "testimonials.testimonial2"];

/// Milliseconds between neighbouring cards revealing.
const STAGGER_MS: usize = 100;

fn stagger(index: usize) -> String {
    (index * STAGGER_MS).to_string()
}

/// First letter of every word, e.g. "Marie Dupont" -> "MD".
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

#[component]
pub fn Services(prefs: Preferences) -> Element {
    rsx! {
        section { id: "services", class: "section services",
            div { class: "container",
                div { class: "section-heading scroll-reveal",
                    h2 { class: "section-title", {prefs.t("services.title")} }
                    p { class: "section-subtitle", {prefs.t("services.subtitle")} }
                }
                div { class: "card-grid card-grid-4",
                    for (index, (icon, key)) in SERVICES.into_iter().enumerate() {
                        div {
                            key: "{key}",
                            class: "card border-glow scroll-reveal",
                            "data-reveal-delay": stagger(index),
                            div { class: "card-icon", "{icon}" }
                            h3 { class: "card-title", {prefs.t(&format!("{key}.title"))} }
                            p { class: "card-text", {prefs.t(&format!("{key}.description"))} }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Stats(prefs: Preferences) -> Element {
    rsx! {
        section { class: "section stats",
            div { class: "container",
                div { class: "section-heading scroll-reveal",
                    h2 { class: "section-title", {prefs.t("stats.title")} }
                }
                div { class: "card-grid card-grid-3",
                    for (index, (figure, key)) in STATS.into_iter().enumerate() {
                        div {
                            key: "{key}",
                            class: "stat scroll-reveal",
                            "data-reveal-delay": stagger(index),
                            div { class: "stat-figure", "{figure}" }
                            div { class: "stat-label", {prefs.t(key)} }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Testimonials(prefs: Preferences) -> Element {
    rsx! {
        section { id: "about", class: "section testimonials",
            div { class: "grid-background" }
            div { class: "container",
                div { class: "section-heading scroll-reveal",
                    h2 { class: "section-title", {prefs.t("testimonials.title")} }
                }
                div { class: "card-grid card-grid-2",
                    for (index, key) in TESTIMONIALS.into_iter().enumerate() {
                        TestimonialCard { key: "{key}", prefs, base: key, index }
                    }
                }
            }
        }
    }
}

#[component]
fn TestimonialCard(prefs: Preferences, base: &'static str, index: usize) -> Element {
    let author = prefs.t(&format!("{base}.author"));
    let avatar = initials(&author);

    rsx! {
        div { class: "card testimonial border-glow scroll-reveal", "data-reveal-delay": stagger(index),
            div { class: "testimonial-mark", "\u{201C}" }
            p { class: "testimonial-quote", {prefs.t(&format!("{base}.quote"))} }
            div { class: "testimonial-author",
                div { class: "avatar", "{avatar}" }
                div {
                    div { class: "author-name", "{author}" }
                    div { class: "author-company", {prefs.t(&format!("{base}.company"))} }
                }
            }
        }
    }
}

#[component]
pub fn Footer(prefs: Preferences) -> Element {
    let year = current_year();
    rsx! {
        footer { class: "site-footer",
            div { class: "container footer-inner",
                LogoLink {}
                p { class: "footer-rights", "© {year} Pladd Technologies Consulting Inc. " {prefs.t("footer.rights")} }
            }
        }
    }
}
