use dioxus::prelude::*;

use crate::config::{use_site_config, SiteConfig};
use crate::contact::ContactForm;
use crate::effects::RevealOptions;
use crate::hero::Hero;
use crate::hooks::{use_global_spotlight, use_scroll_reveal};
use crate::nav_bar::NavBar;
use crate::preferences::{use_preference_store, Preferences};
use crate::sections::{Footer, Services, Stats, Testimonials};

const FAVICON: Asset = asset!("/assets/logo.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    let prefs = use_preference_store();
    let config_resource = use_site_config();

    let head = rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Title { "Pladd Technologies Consulting" }
        document::Meta { name: "description", content: prefs.t("hero.subtitle") }
    };

    let Some(config) = config_resource() else {
        return rsx! {
            {head}
            div { class: "page loading" }
        };
    };

    rsx! {
        {head}
        Site { prefs, config }
    }
}

/// The page itself, mounted once the site config is known so the effects
/// start with their final settings.
#[component]
fn Site(prefs: Preferences, config: SiteConfig) -> Element {
    use_global_spotlight(prefs, config.clone());
    use_scroll_reveal(RevealOptions::default());

    rsx! {
        NavBar { prefs }
        main {
            Hero { prefs }
            div { class: "tracing-column",
                Services { prefs }
                Stats { prefs }
                Testimonials { prefs }
                ContactForm {
                    prefs,
                    submit_delay_ms: config.contact_submit_delay_ms,
                    success_reset_ms: config.contact_success_reset_ms,
                }
            }
        }
        Footer { prefs }
    }
}
