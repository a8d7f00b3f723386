//! The immutable translation catalog
//!
//! A catalog is the flat entry table for one locale, built once from a parsed
//! [`TsDocument`] and never mutated afterwards, so it can be shared freely
//! across threads. Lookups key on (context, source text, optional
//! disambiguation comment); obsolete entries are kept aside for audit but
//! never surface through lookups.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{I18nError, I18nResult};
use crate::format::apply_count;
use crate::locale::Locale;
use crate::ts::{Translation, TranslationStatus, TsDocument};

/// How duplicate (context, source) pairs are handled during load.
///
/// `LastWins` reproduces table-overwrite semantics: the last declared entry
/// replaces earlier ones. `Strict` rejects the document instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Keep the last declared entry (default)
    #[default]
    LastWins,
    /// Fail with [`I18nError::DuplicateMessage`]
    Strict,
}

/// Options applied while building a catalog from a document
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Duplicate key handling
    pub duplicates: DuplicatePolicy,
}

/// An inactive entry retained for diff and audit purposes
#[derive(Debug, Clone)]
pub struct ObsoleteEntry {
    /// Context the entry belonged to
    pub context: String,
    /// Source text of the entry
    pub source: String,
    /// The retained translation
    pub translation: Translation,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MessageKey {
    context: String,
    source: String,
    comment: Option<String>,
}

/// Immutable, queryable table of localized strings for one locale
#[derive(Debug)]
pub struct TranslationCatalog {
    locale: Locale,
    entries: HashMap<MessageKey, Translation>,
    obsolete: Vec<ObsoleteEntry>,
}

impl TranslationCatalog {
    /// Parse a TS document and build a catalog with default options
    pub fn parse(input: &str) -> I18nResult<Self> {
        Self::parse_with(input, &LoadOptions::default())
    }

    /// Parse a TS document and build a catalog
    pub fn parse_with(input: &str, options: &LoadOptions) -> I18nResult<Self> {
        let doc = TsDocument::parse(input)?;
        Self::from_document(&doc, options)
    }

    /// Build a catalog from an already parsed document
    pub fn from_document(doc: &TsDocument, options: &LoadOptions) -> I18nResult<Self> {
        let locale = Locale::from_code(&doc.language)
            .ok_or_else(|| I18nError::InvalidLanguageId(doc.language.clone()))?;

        let mut entries = HashMap::new();
        let mut obsolete = Vec::new();
        for context in &doc.contexts {
            for message in &context.messages {
                if message.status == TranslationStatus::Obsolete {
                    obsolete.push(ObsoleteEntry {
                        context: context.name.clone(),
                        source: message.source.clone(),
                        translation: message.translation.clone(),
                    });
                    continue;
                }
                if is_untranslated(&message.translation) {
                    debug!(
                        "Skipping untranslated entry '{}' in context '{}'",
                        message.source, context.name
                    );
                    continue;
                }
                let key = MessageKey {
                    context: context.name.clone(),
                    source: message.source.clone(),
                    comment: message.comment.clone(),
                };
                if entries.contains_key(&key) {
                    match options.duplicates {
                        DuplicatePolicy::Strict => {
                            return Err(I18nError::DuplicateMessage {
                                context: key.context,
                                source: key.source,
                            });
                        }
                        DuplicatePolicy::LastWins => warn!(
                            "Duplicate message '{}' in context '{}', keeping the later entry",
                            message.source, context.name
                        ),
                    }
                }
                entries.insert(key, message.translation.clone());
            }
        }

        debug!(
            "Built catalog for {:?}: {} active entries, {} obsolete",
            locale,
            entries.len(),
            obsolete.len()
        );
        Ok(Self {
            locale,
            entries,
            obsolete,
        })
    }

    /// Get the singular-form translation for a (context, source) pair
    pub fn lookup(&self, context: &str, source: &str) -> I18nResult<&str> {
        self.lookup_disambiguated(context, source, None)
    }

    /// Like [`lookup`](Self::lookup), for messages carrying a disambiguation
    /// comment
    pub fn lookup_disambiguated(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
    ) -> I18nResult<&str> {
        match self.get(context, source, comment) {
            Some(Translation::Singular(text)) => Ok(text),
            Some(Translation::Plural(forms)) => Ok(self.plural_form(forms, 1)),
            None => Err(I18nError::MessageNotFound {
                context: context.to_string(),
                source: source.to_string(),
            }),
        }
    }

    /// Get the translation form selected by the locale's plural rule
    pub fn lookup_plural(&self, context: &str, source: &str, count: i64) -> I18nResult<&str> {
        match self.get(context, source, None) {
            Some(Translation::Plural(forms)) => Ok(self.plural_form(forms, count)),
            Some(Translation::Singular(text)) => Ok(text),
            None => Err(I18nError::MessageNotFound {
                context: context.to_string(),
                source: source.to_string(),
            }),
        }
    }

    /// Resolve a message, falling back to the source text when no active
    /// translation exists
    pub fn translate<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        match self.lookup(context, source) {
            Ok(text) => text,
            Err(_) => {
                debug!(
                    "No translation for '{}' in context '{}', using source text",
                    source, context
                );
                source
            }
        }
    }

    /// Resolve a numerus message and substitute `%n` with the count, falling
    /// back to the source text when no active translation exists
    pub fn translate_plural(&self, context: &str, source: &str, count: i64) -> String {
        let text = self.lookup_plural(context, source, count).unwrap_or(source);
        apply_count(text, count)
    }

    /// Check whether an active entry exists for a (context, source) pair
    pub fn has_message(&self, context: &str, source: &str) -> bool {
        self.get(context, source, None).is_some()
    }

    /// The locale this catalog translates into
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Number of active entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no active entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of all contexts with at least one active entry, sorted
    pub fn contexts(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .entries
            .keys()
            .map(|key| key.context.as_str())
            .collect();
        names.into_iter().collect()
    }

    /// Entries retained for audit but excluded from lookups
    pub fn obsolete_entries(&self) -> &[ObsoleteEntry] {
        &self.obsolete
    }

    fn get(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&Translation> {
        let key = MessageKey {
            context: context.to_string(),
            source: source.to_string(),
            comment: comment.map(str::to_string),
        };
        self.entries.get(&key)
    }

    fn plural_form<'a>(&self, forms: &'a [String], count: i64) -> &'a str {
        let index = self.locale.plural_rule().category_index(count);
        // A document may carry fewer forms than the rule expects; reuse the
        // last available form in that case.
        forms
            .get(index)
            .or_else(|| forms.last())
            .map(String::as_str)
            .unwrap_or_default()
    }
}

fn is_untranslated(translation: &Translation) -> bool {
    match translation {
        Translation::Singular(text) => text.is_empty(),
        Translation::Plural(forms) => forms.iter().all(|form| form.is_empty()),
    }
}
