//! Translation catalog support for the Converse communications client
//!
//! This crate loads Linguist `.ts` translation catalogs and resolves
//! (context, source text) pairs into localized strings. It includes:
//!
//! - Locale management with per-locale plural rules
//! - A TS document reader and canonical writer
//! - Immutable catalogs, safe to share across threads without locking
//! - Placeholder substitution (`%1`..`%9`, `%n`)
//! - Fallback to the source text for missing translations
//!
//! # Example
//!
//! ```rust
//! use converse_i18n::{I18nManager, Locale};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = I18nManager::new(Locale::English, "translations")?;
//! manager.load_locale(Locale::French)?;
//!
//! let label = manager.translate(Locale::French, "AboutDialog", "Close");
//! println!("{}", label);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod format;
pub mod locale;
pub mod manager;
pub mod pluralization;
pub mod resource;
pub mod ts;
pub mod writer;

pub use catalog::{DuplicatePolicy, LoadOptions, ObsoleteEntry, TranslationCatalog};
pub use error::{I18nError, I18nResult};
pub use format::{apply_count, format};
pub use locale::Locale;
pub use manager::I18nManager;
pub use pluralization::PluralRule;
pub use resource::ResourceManager;
pub use ts::{Translation, TranslationStatus, TsContext, TsDocument, TsMessage};
pub use writer::serialize;
