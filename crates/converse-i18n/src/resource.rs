//! Catalog file loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::catalog::{LoadOptions, TranslationCatalog};
use crate::error::{I18nError, I18nResult};
use crate::locale::Locale;

/// Loads translation catalogs from a directory of `.ts` files
#[derive(Debug)]
pub struct ResourceManager {
    /// Base directory for catalog files
    base_dir: PathBuf,
    /// Options applied to every load
    options: LoadOptions,
}

impl ResourceManager {
    /// Create a new ResourceManager with default load options
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self::with_options(base_dir, LoadOptions::default())
    }

    /// Create a new ResourceManager
    pub fn with_options<P: AsRef<Path>>(base_dir: P, options: LoadOptions) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            options,
        }
    }

    /// Path of the catalog file for the given locale
    pub fn catalog_path(&self, locale: Locale) -> PathBuf {
        self.base_dir.join(locale.resource_file())
    }

    /// Load the catalog for the given locale
    pub fn load_catalog(&self, locale: Locale) -> I18nResult<TranslationCatalog> {
        let path = self.catalog_path(locale);
        debug!("Loading catalog file: {:?}", path);

        if !path.exists() {
            warn!("Catalog file does not exist: {:?}", path);
            return Err(I18nError::ResourceLoad {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|_| I18nError::ResourceLoad {
            path: path.to_string_lossy().to_string(),
        })?;

        let catalog = TranslationCatalog::parse_with(&content, &self.options)?;
        if catalog.locale() != locale {
            warn!(
                "Catalog {:?} declares locale {:?}, expected {:?}",
                path,
                catalog.locale(),
                locale
            );
        }

        info!("Successfully loaded catalog for locale: {:?}", locale);
        Ok(catalog)
    }

    /// Get the base directory for catalogs
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new("translations")
    }
}
