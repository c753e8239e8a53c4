//! Language and theme preferences.
//!
//! The store is the single owner of both values. Every change is mirrored to
//! the translator, to the document (root `lang`, theme classes) and to
//! persistent storage through the [`DomAdapter`] and [`PreferenceStorage`]
//! capabilities it was built with.

mod dom;
mod handle;
mod storage;

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::i18n::Translator;

#[cfg(target_arch = "wasm32")]
pub use dom::WebDom;
pub use dom::{DocumentNode, DomAdapter, MemoryDom};
pub use handle::{use_preference_store, Preferences};
#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
pub use storage::{MemoryStorage, PreferenceStorage};

pub const LANGUAGE_KEY: &str = "language";
pub const THEME_KEY: &str = "theme";

pub const DARK_MODE_CLASS: &str = "dark-mode";
const DARK_CLASSES: [&str; 2] = ["dark", DARK_MODE_CLASS];
const LIGHT_CLASSES: [&str; 2] = ["light", "light-mode"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Language::En => Language::Fr,
            Language::Fr => Language::En,
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "Français",
        }
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            other => Err(ValidationError::Language(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn code(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn body_class(self) -> &'static str {
        match self {
            Theme::Light => "light-mode",
            Theme::Dark => DARK_MODE_CLASS,
        }
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ValidationError::Theme(other.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreferenceSnapshot {
    pub language: Language,
    pub theme: Theme,
}

pub struct PreferenceStore {
    language: Language,
    theme: Theme,
    storage: Rc<dyn PreferenceStorage>,
    dom: Rc<dyn DomAdapter>,
    translator: Rc<dyn Translator>,
}

impl PreferenceStore {
    /// Reads both preferences from storage, falling back to the defaults for
    /// missing or unrecognised values, and brings the translator and the
    /// document in line with the result.
    pub fn initialize(
        storage: Rc<dyn PreferenceStorage>,
        dom: Rc<dyn DomAdapter>,
        translator: Rc<dyn Translator>,
    ) -> Self {
        let language: Language = read_or_default(storage.as_ref(), LANGUAGE_KEY);
        let theme: Theme = read_or_default(storage.as_ref(), THEME_KEY);
        tracing::debug!("preferences: initialized language={language} theme={theme}");

        let store = Self {
            language,
            theme,
            storage,
            dom,
            translator,
        };
        store.translator.set_locale(language);
        store.dom.set_document_lang(language.code());
        store.apply_theme_classes();
        store
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn snapshot(&self) -> PreferenceSnapshot {
        PreferenceSnapshot {
            language: self.language,
            theme: self.theme,
        }
    }

    pub fn t(&self, key: &str) -> String {
        self.translator.translate(key)
    }

    pub fn storage(&self) -> Rc<dyn PreferenceStorage> {
        Rc::clone(&self.storage)
    }

    pub fn dom(&self) -> Rc<dyn DomAdapter> {
        Rc::clone(&self.dom)
    }

    /// A failed write is logged and not rolled back; memory and the document
    /// keep the new value.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.translator.set_locale(language);
        self.dom.set_document_lang(language.code());
        self.persist(LANGUAGE_KEY, language.code());
    }

    pub fn set_language_code(&mut self, code: &str) -> Result<(), ValidationError> {
        let language = code.parse()?;
        self.set_language(language);
        Ok(())
    }

    pub fn toggle_language(&mut self) {
        self.set_language(self.language.other());
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.persist(THEME_KEY, theme.code());
        self.apply_theme_classes();
    }

    pub fn set_theme_code(&mut self, code: &str) -> Result<(), ValidationError> {
        let theme = code.parse()?;
        self.set_theme(theme);
        Ok(())
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.other());
    }

    /// Whether the root carries the dark classes. Without a stored theme the
    /// OS colour-scheme preference decides, even though [`Self::theme`] still
    /// reports the default.
    pub fn renders_dark(&self) -> bool {
        self.theme == Theme::Dark
            || (!self.storage.contains(THEME_KEY) && self.dom.prefers_dark_color_scheme())
    }

    fn apply_theme_classes(&self) {
        self.dom.set_body_class(self.theme.body_class());
        let (remove, add) = if self.renders_dark() {
            (LIGHT_CLASSES, DARK_CLASSES)
        } else {
            (DARK_CLASSES, LIGHT_CLASSES)
        };
        self.dom.remove_root_classes(&remove);
        self.dom.add_root_classes(&add);
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(err) = self.storage.write(key, value) {
            tracing::warn!("preferences: {err}");
        }
    }
}

fn read_or_default<T>(storage: &dyn PreferenceStorage, key: &str) -> T
where
    T: FromStr + Default,
    T::Err: fmt::Display,
{
    let Some(raw) = storage.read(key) else {
        return T::default();
    };
    raw.parse().unwrap_or_else(|err| {
        tracing::debug!("preferences: ignoring stored {key}: {err}");
        T::default()
    })
}
