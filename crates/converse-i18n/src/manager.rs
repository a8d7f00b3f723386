//! Translation manager
//!
//! Owns one immutable catalog per loaded locale. Readers resolve messages
//! lock-free; loading or reloading a locale builds a fresh catalog set and
//! swaps it in atomically, so a reload never blocks or tears an in-flight
//! lookup.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, info, warn};

use crate::catalog::{LoadOptions, TranslationCatalog};
use crate::error::I18nResult;
use crate::format::apply_count;
use crate::locale::Locale;
use crate::resource::ResourceManager;

type CatalogSet = HashMap<Locale, Arc<TranslationCatalog>>;

/// Manages translation catalogs for the application
pub struct I18nManager {
    /// Locale to fall back to before giving up on a lookup
    default_locale: Locale,
    /// Loader for catalog files
    resources: ResourceManager,
    /// Current catalog set, replaced atomically on (re)load
    catalogs: ArcSwap<CatalogSet>,
}

impl std::fmt::Debug for I18nManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18nManager")
            .field("default_locale", &self.default_locale)
            .field("loaded_locales", &self.loaded_locales())
            .finish()
    }
}

impl I18nManager {
    /// Create a new manager with default load options.
    ///
    /// The default locale's catalog is loaded eagerly when its file exists.
    /// A missing file for the default locale is not an error: the source
    /// language needs no catalog, lookups degrade to the source text.
    pub fn new<P: AsRef<Path>>(default_locale: Locale, translations_dir: P) -> I18nResult<Self> {
        Self::with_options(default_locale, translations_dir, LoadOptions::default())
    }

    /// Create a new manager
    pub fn with_options<P: AsRef<Path>>(
        default_locale: Locale,
        translations_dir: P,
        options: LoadOptions,
    ) -> I18nResult<Self> {
        let manager = Self {
            default_locale,
            resources: ResourceManager::with_options(translations_dir, options),
            catalogs: ArcSwap::from_pointee(CatalogSet::new()),
        };

        if manager.resources.catalog_path(default_locale).exists() {
            manager.load_locale(default_locale)?;
        } else {
            info!(
                "No catalog file for default locale {:?}, source text will be used",
                default_locale
            );
        }
        info!(
            "I18nManager initialized with default locale: {:?}",
            default_locale
        );
        Ok(manager)
    }

    /// Load a locale's catalog and publish it atomically
    pub fn load_locale(&self, locale: Locale) -> I18nResult<()> {
        debug!("Loading locale: {:?}", locale);

        let catalog = Arc::new(self.resources.load_catalog(locale)?);
        let mut next = CatalogSet::clone(&self.catalogs.load_full());
        next.insert(locale, catalog);
        self.catalogs.store(Arc::new(next));

        info!("Successfully loaded locale: {:?}", locale);
        Ok(())
    }

    /// Rebuild a locale's catalog from disk and swap it in.
    ///
    /// Readers keep seeing the old catalog until the swap completes.
    pub fn reload_locale(&self, locale: Locale) -> I18nResult<()> {
        debug!("Reloading locale: {:?}", locale);
        self.load_locale(locale)
    }

    /// Load all supported locales, skipping the ones that fail
    pub fn load_all_locales(&self) -> I18nResult<()> {
        for locale in Locale::all() {
            if let Err(e) = self.load_locale(locale) {
                warn!("Failed to load locale {:?}: {}", locale, e);
            }
        }
        Ok(())
    }

    /// Resolve a message for the given locale.
    ///
    /// Falls back to the default locale's catalog, then to the source text.
    pub fn translate(&self, locale: Locale, context: &str, source: &str) -> String {
        let catalogs = self.catalogs.load();

        if let Some(catalog) = catalogs.get(&locale) {
            if let Ok(text) = catalog.lookup(context, source) {
                return text.to_string();
            }
        }

        if locale != self.default_locale {
            if let Some(catalog) = catalogs.get(&self.default_locale) {
                if let Ok(text) = catalog.lookup(context, source) {
                    warn!(
                        "Message '{}' not found in locale {:?}, falling back to default locale {:?}",
                        source, locale, self.default_locale
                    );
                    return text.to_string();
                }
            }
        }

        debug!(
            "No translation for '{}' in context '{}', using source text",
            source, context
        );
        source.to_string()
    }

    /// Resolve a numerus message for the given locale and substitute `%n`.
    ///
    /// Follows the same fallback chain as [`translate`](Self::translate).
    pub fn translate_plural(
        &self,
        locale: Locale,
        context: &str,
        source: &str,
        count: i64,
    ) -> String {
        let catalogs = self.catalogs.load();

        if let Some(catalog) = catalogs.get(&locale) {
            if let Ok(text) = catalog.lookup_plural(context, source, count) {
                return apply_count(text, count);
            }
        }

        if locale != self.default_locale {
            if let Some(catalog) = catalogs.get(&self.default_locale) {
                if let Ok(text) = catalog.lookup_plural(context, source, count) {
                    return apply_count(text, count);
                }
            }
        }

        apply_count(source, count)
    }

    /// Check if an active entry exists in the requested or default locale
    pub fn has_message(&self, locale: Locale, context: &str, source: &str) -> bool {
        let catalogs = self.catalogs.load();
        if let Some(catalog) = catalogs.get(&locale) {
            if catalog.has_message(context, source) {
                return true;
            }
        }
        locale != self.default_locale
            && catalogs
                .get(&self.default_locale)
                .is_some_and(|catalog| catalog.has_message(context, source))
    }

    /// Get a shared handle to a loaded catalog
    pub fn catalog(&self, locale: Locale) -> Option<Arc<TranslationCatalog>> {
        self.catalogs.load().get(&locale).cloned()
    }

    /// Get all loaded locales
    pub fn loaded_locales(&self) -> Vec<Locale> {
        self.catalogs.load().keys().copied().collect()
    }

    /// Get the default locale
    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }
}
