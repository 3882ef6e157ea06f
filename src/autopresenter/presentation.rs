//! # Presentation Tables
//!
//! A [`Presentation`] says how a model type is presented: a table from attribute key to
//! [`Formatter`]. Tables are declared once per model type with a builder and handed to
//! every presenter of that type, so nothing is looked up by reflection at access time.
//!
//! ```rust
//! use autopresenter::{formatters, Model, Presentation};
//! use once_cell::sync::Lazy;
//! use serde_json::Value;
//! use std::sync::Arc;
//!
//! static USER_PRESENTATION: Lazy<Arc<Presentation>> = Lazy::new(|| {
//!     Arc::new(
//!         Presentation::new()
//!             .format("first_name", formatters::capitalize)
//!             .format("email", formatters::lowercase)
//!             .format_with("full_name", |model, _raw| {
//!                 let first = model.attribute("first_name").ok();
//!                 let last = model.attribute("last_name").ok();
//!                 let parts: Vec<&str> = [&first, &last]
//!                     .iter()
//!                     .filter_map(|d| d.as_ref().and_then(|d| d.as_str()))
//!                     .collect();
//!                 Value::from(parts.join(" "))
//!             }),
//!     )
//! });
//!
//! assert!(USER_PRESENTATION.resolve("fullName").is_some());
//! ```
//!
//! ## Lookup
//!
//! [`Presentation::resolve`] tries the key as written, then its snake_case form, then its
//! camelCase form, and stops at the first registered name.

use crate::case;
use crate::model::Presentable;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Formats one raw attribute value. Receives the model for formatters that combine
/// several attributes.
pub type Formatter = Arc<dyn Fn(&dyn Presentable, Value) -> Value + Send + Sync>;

static EMPTY: Lazy<Arc<Presentation>> = Lazy::new(|| Arc::new(Presentation::new()));

/// Attribute formatters for one model type.
#[derive(Clone, Default)]
pub struct Presentation {
    formatters: HashMap<String, Formatter>,
}

impl Presentation {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared empty table, for models that present every attribute as is.
    pub fn none() -> Arc<Presentation> {
        Arc::clone(&EMPTY)
    }

    /// Registers a formatter that only needs the raw value. Returns self for chaining.
    ///
    /// Registering the same key again replaces the earlier formatter.
    pub fn format<F>(self, key: &str, formatter: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.format_with(key, move |_, raw| formatter(raw))
    }

    /// Registers a formatter that also sees the model. Returns self for chaining.
    pub fn format_with<F>(mut self, key: &str, formatter: F) -> Self
    where
        F: Fn(&dyn Presentable, Value) -> Value + Send + Sync + 'static,
    {
        self.formatters.insert(key.to_string(), Arc::new(formatter));
        self
    }

    /// Finds the formatter for `key`: exact name, then snake_case, then camelCase.
    ///
    /// Returns the registered name that matched along with the formatter.
    pub fn resolve(&self, key: &str) -> Option<(&str, &Formatter)> {
        if let Some(found) = self.lookup(key) {
            return Some(found);
        }
        if self.formatters.is_empty() {
            return None;
        }
        self.lookup(&case::snake(key))
            .or_else(|| self.lookup(&case::camel(key)))
    }

    fn lookup(&self, name: &str) -> Option<(&str, &Formatter)> {
        self.formatters
            .get_key_value(name)
            .map(|(name, formatter)| (name.as_str(), formatter))
    }

    /// Returns true if some formatter answers `key`.
    pub fn has(&self, key: &str) -> bool {
        self.resolve(key).is_some()
    }

    /// Number of registered formatters.
    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }
}

impl fmt::Debug for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.formatters.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("Presentation")
            .field("formatters", &keys)
            .finish()
    }
}
