use dioxus::prelude::*;

use crate::hooks::use_scrolled_past;
use crate::preferences::{Language, PreferenceSnapshot, Preferences, Theme};

const LOGO: Asset = asset!("/assets/logo.svg");

/// Scroll offset in pixels past which the header compacts.
const COMPACT_AFTER: f64 = 20.0;

const SECTIONS: [(&str, &str); 4] = [
    ("#", "nav.home"),
    ("#services", "nav.services"),
    ("#about", "nav.about"),
    ("#contact", "nav.contact"),
];

fn theme_icon(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "🌙",
        Theme::Dark => "☀️",
    }
}

fn theme_label_key(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "nav.darkMode",
        Theme::Dark => "nav.lightMode",
    }
}

/// Short code of the language the toggle switches to.
fn language_toggle_label(language: Language) -> String {
    language.other().code().to_ascii_uppercase()
}

#[component]
pub fn LogoLink() -> Element {
    rsx! {
        a { href: "#", class: "logo-link", aria_label: "Pladd Technologies Consulting Inc.",
            img { class: "logo-mark", src: LOGO, alt: "Pladd Technologies consulting Inc." }
            span { class: "text-gradient logo-word", "Pladd" }
        }
    }
}

#[component]
pub fn NavBar(prefs: Preferences) -> Element {
    let mut menu_open = use_signal(|| false);
    let scrolled = use_scrolled_past(COMPACT_AFTER);

    let PreferenceSnapshot { language, theme } = prefs.snapshot();
    let header_class = if scrolled() {
        "site-header site-header-compact"
    } else {
        "site-header"
    };
    let theme_label = prefs.t(theme_label_key(theme));

    rsx! {
        header { class: header_class,
            nav { class: "container nav",
                LogoLink {}
                div { class: "nav-links desktop-only",
                    for (href, key) in SECTIONS {
                        a { key: "{href}", href: href, class: "nav-link", {prefs.t(key)} }
                    }
                }
                div { class: "nav-actions desktop-only",
                    button {
                        r#type: "button",
                        class: "icon-button",
                        aria_label: prefs.t("nav.switchLanguage"),
                        onclick: move |_| prefs.toggle_language(),
                        {language_toggle_label(language)}
                    }
                    button {
                        r#type: "button",
                        class: "icon-button",
                        aria_label: theme_label.clone(),
                        onclick: move |_| prefs.toggle_theme(),
                        {theme_icon(theme)}
                    }
                    a { href: "#contact", class: "btn-primary btn-small", {prefs.t("hero.contact")} }
                }
                div { class: "nav-actions mobile-only",
                    button {
                        r#type: "button",
                        class: "icon-button",
                        aria_label: theme_label.clone(),
                        onclick: move |_| prefs.toggle_theme(),
                        {theme_icon(theme)}
                    }
                    button {
                        r#type: "button",
                        class: "icon-button",
                        aria_expanded: "{menu_open()}",
                        aria_label: prefs.t("nav.toggleMenu"),
                        onclick: move |_| menu_open.set(!menu_open()),
                        if menu_open() { "✕" } else { "☰" }
                    }
                }
            }
            if menu_open() {
                div { class: "mobile-menu",
                    div { class: "container mobile-menu-links",
                        for (href, key) in SECTIONS {
                            a {
                                key: "{href}",
                                href: href,
                                class: "mobile-link",
                                onclick: move |_| menu_open.set(false),
                                {prefs.t(key)}
                            }
                        }
                        div { class: "mobile-menu-footer",
                            button {
                                r#type: "button",
                                class: "mobile-language",
                                onclick: move |_| prefs.toggle_language(),
                                {language.other().native_name()}
                            }
                            a { href: "#contact", class: "btn-primary btn-small", {prefs.t("hero.contact")} }
                        }
                    }
                }
            }
        }
    }
}
