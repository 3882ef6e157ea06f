//! # AutoPresenter
//!
//! Presenters for template views. A presenter wraps a model and stands in for it in a
//! template: attribute reads may go through a formatter (capitalize a name, render a
//! date), everything else reaches the model untouched. The model type never learns about
//! presentation.
//!
//! ## The Pieces
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Provider (provider.rs)                                       │
//! │  - Installs a composer into viewkit::Views                    │
//! │  - Decorates every template variable before each render       │
//! └───────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Decorator (decorator.rs)                                     │
//! │  - Stateless: models become presenters, collections recurse   │
//! └───────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Presenter (presenter.rs) + Presentation (presentation.rs)    │
//! │  - Reads raw attributes, runs the model type's formatters     │
//! │  - Forwards the Model interface, routing included             │
//! └───────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Models (model.rs)                                            │
//! │  - Model / Presentable traits, implemented by your types      │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust
//! use autopresenter::{
//!     find_attribute, formatters, AutoPresenter, AutoPresenterConfig, Attributes, Data, Model,
//!     Presentable, Presentation, Result,
//! };
//! use once_cell::sync::Lazy;
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//! use viewkit::Views;
//!
//! #[derive(Debug)]
//! struct Post {
//!     id: u64,
//!     title: String,
//! }
//!
//! static POST_PRESENTATION: Lazy<Arc<Presentation>> =
//!     Lazy::new(|| Arc::new(Presentation::new().format("title", formatters::capitalize)));
//!
//! impl Model for Post {
//!     fn attribute(&self, key: &str) -> Result<Data> {
//!         find_attribute(&self.attributes(), key)
//!     }
//!
//!     fn attributes(&self) -> Attributes {
//!         vec![
//!             ("id".to_string(), Data::from(self.id)),
//!             ("title".to_string(), Data::from(self.title.as_str())),
//!         ]
//!     }
//! }
//!
//! impl Presentable for Post {
//!     fn presentation(&self) -> Arc<Presentation> {
//!         POST_PRESENTATION.clone()
//!     }
//! }
//!
//! let mut views: Views<Data> = Views::new();
//! views.add_template("posts.show", "#{{ post.id }} {{ post.title }}").unwrap();
//! AutoPresenter::new(AutoPresenterConfig::default()).install(&mut views);
//!
//! let mut data = BTreeMap::new();
//! data.insert(
//!     "post".to_string(),
//!     Data::model(Post { id: 7, title: "hello world".to_string() }),
//! );
//! assert_eq!(views.render("posts.show", data).unwrap(), "#7 Hello World");
//! ```
//!
//! ## Formatter Lookup
//!
//! Formatters are looked up by the attribute key as written, then its snake_case form,
//! then its camelCase form. A formatter registered as `fullName` therefore also answers
//! `full_name`. Attributes whose raw value is a model, a presenter or a collection are
//! never formatted; they are decorated instead, so nested models come back presented.
//!
//! ## Module Overview
//!
//! - [`decorator`]: What gets a presenter
//! - [`presenter`]: The wrapper itself
//! - [`presentation`]: Per-type formatter tables
//! - [`model`]: `Model` / `Presentable` traits and the dynamic `Data` value
//! - [`formatters`]: Stock formatters (case, dates, defaults)
//! - [`provider`]: View-layer integration
//! - [`config`]: Provider settings
//! - [`error`]: Error types
//! - `template`: minijinja objects for presenters and raw models

pub mod case;
pub mod config;
pub mod decorator;
pub mod error;
pub mod formatters;
pub mod model;
pub mod presentation;
pub mod presenter;
pub mod provider;
mod template;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use config::AutoPresenterConfig;
pub use decorator::{Decorate, Decorator};
pub use error::{AutoPresenterError, Result};
pub use model::{
    find_attribute, serialized_attributes, Attributes, Data, Model, Presentable,
    DEFAULT_ROUTE_KEY,
};
pub use presentation::{Formatter, Presentation};
pub use presenter::Presenter;
pub use provider::AutoPresenter;
