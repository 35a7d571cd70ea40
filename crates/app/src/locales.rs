//! Locales and localized text.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Display language of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Türkçe
    Tr,

    /// English
    En,

    /// Deutsch
    De,

    /// Русский
    Ru,
}

impl Locale {
    /// Locale used whenever a requested language is missing or unknown.
    pub const DEFAULT: Self = Self::Tr;

    /// Every supported locale, in menu order.
    pub const ALL: [Self; 4] = [Self::Tr, Self::En, Self::De, Self::Ru];

    /// Resolve a `lang` parameter, falling back to [`Locale::DEFAULT`].
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        value
            .and_then(|value| value.parse().ok())
            .unwrap_or(Self::DEFAULT)
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Tr => "tr",
            Self::En => "en",
            Self::De => "de",
            Self::Ru => "ru",
        }
    }

    /// Native name shown on the language selection page.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tr => "Türkçe",
            Self::En => "English",
            Self::De => "Deutsch",
            Self::Ru => "Русский",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "tr" => Ok(Self::Tr),
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            "ru" => Ok(Self::Ru),
            other => Err(UnsupportedLocale(other.to_string())),
        }
    }
}

/// Text with one variant per locale.
///
/// Missing variants read as the empty string; nothing requires the default
/// locale to be filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedText(FxHashMap<Locale, String>);

impl LocalizedText {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, locale: Locale, text: impl Into<String>) -> Self {
        self.set(locale, text);
        self
    }

    pub fn set(&mut self, locale: Locale, text: impl Into<String>) {
        self.0.insert(locale, text.into());
    }

    /// Text for `locale`, exactly as stored.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &str {
        self.0.get(&locale).map_or("", String::as_str)
    }

    /// Text for a raw `lang` value; unknown values select the default locale.
    #[must_use]
    pub fn pick(&self, lang: &str) -> &str {
        self.get(Locale::from_param(Some(lang)))
    }

    /// Owned text for `locale`, used when binding one column per locale.
    #[must_use]
    pub fn to_owned_text(&self, locale: Locale) -> String {
        self.get(locale).to_string()
    }
}

impl FromIterator<(Locale, String)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (Locale, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
