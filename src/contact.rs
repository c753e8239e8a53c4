use std::sync::LazyLock;

use dioxus::prelude::*;
use regex::Regex;

use crate::hooks::use_track_cursor;
use crate::preferences::Preferences;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email regex should compile")
});

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Validation failures as translation keys, so they follow language changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

pub fn validate(fields: &ContactFields) -> FieldErrors {
    let required = |value: &str| value.trim().is_empty().then_some("contact.required");
    let email = match required(&fields.email) {
        Some(key) => Some(key),
        None if !EMAIL_REGEX.is_match(&fields.email) => Some("contact.invalidEmail"),
        None => None,
    };
    FieldErrors {
        name: required(&fields.name),
        email,
        message: required(&fields.message),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Name,
    Email,
    Phone,
    Message,
}

impl Field {
    fn store(self, fields: &mut ContactFields, value: String) {
        match self {
            Field::Name => fields.name = value,
            Field::Email => fields.email = value,
            Field::Phone => fields.phone = value,
            Field::Message => fields.message = value,
        }
    }

    fn clear_error(self, errors: &mut FieldErrors) {
        match self {
            Field::Name => errors.name = None,
            Field::Email => errors.email = None,
            Field::Message => errors.message = None,
            Field::Phone => {}
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn pause(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn pause(_ms: u32) {}

fn input_class(error: Option<&str>) -> &'static str {
    if error.is_some() {
        "form-input form-input-error"
    } else {
        "form-input"
    }
}

#[component]
pub fn ContactForm(prefs: Preferences, submit_delay_ms: u32, success_reset_ms: u32) -> Element {
    let mut fields = use_signal(ContactFields::default);
    let mut errors = use_signal(FieldErrors::default);
    let submitting = use_signal(|| false);
    let success = use_signal(|| false);
    let tracked = use_track_cursor();

    let mut edit = move |field: Field, value: String| {
        let mut next = fields();
        field.store(&mut next, value);
        fields.set(next);
        if !errors().is_empty() {
            let mut cleared = errors();
            field.clear_error(&mut cleared);
            errors.set(cleared);
        }
    };

    let current = fields();
    let shown = errors();
    let name_error = shown.name.map(|key| prefs.t(key));
    let email_error = shown.email.map(|key| prefs.t(key));
    let message_error = shown.message.map(|key| prefs.t(key));

    rsx! {
        section { id: "contact", class: "section contact",
            div { class: "container contact-grid",
                div { class: "contact-panel scroll-reveal",
                    h2 { class: "section-title", {prefs.t("contact.title")} }
                    p { class: "section-subtitle", {prefs.t("contact.subtitle")} }
                    form {
                        class: "contact-form spotlight track-cursor",
                        novalidate: true,
                        onmounted: move |event| tracked.capture(event),
                        onsubmit: move |event| {
                            event.prevent_default();
                            let found = validate(&fields());
                            if !found.is_empty() {
                                errors.set(found);
                                return;
                            }
                            let mut submitting = submitting;
                            let mut success = success;
                            let mut fields = fields;
                            submitting.set(true);
                            spawn(async move {
                                pause(submit_delay_ms).await;
                                submitting.set(false);
                                success.set(true);
                                fields.set(ContactFields::default());
                                tracing::debug!("contact: simulated submission complete");
                                pause(success_reset_ms).await;
                                success.set(false);
                            });
                        },
                        div { class: "form-row",
                            label { r#for: "name", {prefs.t("contact.name")} span { class: "required-mark", "*" } }
                            input {
                                id: "name",
                                name: "name",
                                r#type: "text",
                                class: input_class(name_error.as_deref()),
                                value: "{current.name}",
                                aria_invalid: "{name_error.is_some()}",
                                oninput: move |event| edit(Field::Name, event.value()),
                            }
                            if let Some(message) = name_error.clone() {
                                p { id: "name-error", class: "form-error", "{message}" }
                            }
                        }
                        div { class: "form-row",
                            label { r#for: "email", {prefs.t("contact.email")} span { class: "required-mark", "*" } }
                            input {
                                id: "email",
                                name: "email",
                                r#type: "email",
                                class: input_class(email_error.as_deref()),
                                value: "{current.email}",
                                aria_invalid: "{email_error.is_some()}",
                                oninput: move |event| edit(Field::Email, event.value()),
                            }
                            if let Some(message) = email_error.clone() {
                                p { id: "email-error", class: "form-error", "{message}" }
                            }
                        }
                        div { class: "form-row",
                            label { r#for: "phone", {prefs.t("contact.phone")} }
                            input {
                                id: "phone",
                                name: "phone",
                                r#type: "tel",
                                class: "form-input",
                                value: "{current.phone}",
                                oninput: move |event| edit(Field::Phone, event.value()),
                            }
                        }
                        div { class: "form-row",
                            label { r#for: "message", {prefs.t("contact.message")} span { class: "required-mark", "*" } }
                            textarea {
                                id: "message",
                                name: "message",
                                rows: "4",
                                class: input_class(message_error.as_deref()),
                                value: "{current.message}",
                                aria_invalid: "{message_error.is_some()}",
                                oninput: move |event| edit(Field::Message, event.value()),
                            }
                            if let Some(message) = message_error.clone() {
                                p { id: "message-error", class: "form-error", "{message}" }
                            }
                        }
                        button {
                            r#type: "submit",
                            class: "btn-primary btn-block",
                            disabled: submitting() || success(),
                            if submitting() {
                                span { class: "spinner" }
                                {prefs.t("contact.sending")}
                            } else if success() {
                                {prefs.t("contact.success")}
                            } else {
                                {prefs.t("contact.submit")}
                            }
                        }
                    }
                }
                div { class: "contact-card scroll-reveal", "data-reveal-delay": "150",
                    div { class: "contact-card-backdrop grid-background" }
                    div { class: "contact-card-body",
                        div { class: "contact-card-icon", "🌐" }
                        h3 { "Pladd Technologies Consulting" }
                        p { "123 Tech Avenue" br {} "Cyber City, CS 12345" }
                        div { class: "contact-links",
                            a { href: "mailto:info@securetech.example", "Email" }
                            a { href: "tel:+1234567890", "Call" }
                            a { href: "https://twitter.com/example", target: "_blank", rel: "noopener noreferrer", "Twitter" }
                            a { href: "https://linkedin.com/company/example", target: "_blank", rel: "noopener noreferrer", "LinkedIn" }
                        }
                    }
                }
            }
        }
    }
}
