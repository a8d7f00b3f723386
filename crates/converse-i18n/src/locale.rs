//! Locale management and utilities

use crate::error::{I18nError, I18nResult};
use crate::pluralization::PluralRule;
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

/// Supported locales
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Locale {
    English,
    French,
    Spanish,
    German,
    Polish,
}

impl Default for Locale {
    fn default() -> Self {
        Self::English
    }
}

impl Locale {
    /// Get the language code for this locale
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::French => "fr-FR",
            Self::Spanish => "es-ES",
            Self::German => "de-DE",
            Self::Polish => "pl-PL",
        }
    }

    /// Get the short language code for this locale
    pub fn short_code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
            Self::Spanish => "es",
            Self::German => "de",
            Self::Polish => "pl",
        }
    }

    /// Parse a locale from a language code.
    ///
    /// TS documents write underscored codes (`language="fr_FR"`), so both
    /// spellings are accepted.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.replace('_', "-");
        match code.as_str() {
            "en" | "en-US" => Some(Self::English),
            "fr" | "fr-FR" => Some(Self::French),
            "es" | "es-ES" => Some(Self::Spanish),
            "de" | "de-DE" => Some(Self::German),
            "pl" | "pl-PL" => Some(Self::Polish),
            _ => None,
        }
    }

    /// Convert to a language identifier
    pub fn to_language_identifier(&self) -> I18nResult<LanguageIdentifier> {
        self.code()
            .parse()
            .map_err(|_| I18nError::InvalidLanguageId(self.code().to_string()))
    }

    /// Get all supported locales
    pub fn all() -> Vec<Self> {
        vec![
            Self::English,
            Self::French,
            Self::Spanish,
            Self::German,
            Self::Polish,
        ]
    }

    /// Get the display name for this locale
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::French => "Français",
            Self::Spanish => "Español",
            Self::German => "Deutsch",
            Self::Polish => "Polski",
        }
    }

    /// Get the catalog file name for this locale
    pub fn resource_file(&self) -> String {
        format!("{}.ts", self.short_code())
    }

    /// Plural form selection rule for this locale
    pub fn plural_rule(&self) -> PluralRule {
        match self {
            Self::English | Self::French | Self::Spanish | Self::German => PluralRule::TwoForm,
            Self::Polish => PluralRule::ThreeFormSlavic,
        }
    }
}
