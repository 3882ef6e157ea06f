//! # Provider
//!
//! Hooks a [`Decorator`] into a [`viewkit::Views`] so that every variable a template
//! sees is decorated right before rendering. Call sites keep passing plain models;
//! templates get presenters.
//!
//! ```rust
//! use autopresenter::{AutoPresenter, AutoPresenterConfig, Data};
//! use viewkit::Views;
//!
//! let mut views: Views<Data> = Views::new();
//! AutoPresenter::new(AutoPresenterConfig::default()).install(&mut views);
//! assert_eq!(views.composer_count(), 1);
//! ```
//!
//! The composer runs at the configured order (999 by default), so composers registered
//! with lower orders have already filled in their variables when it decorates them.

use crate::config::AutoPresenterConfig;
use crate::decorator::Decorator;
use crate::model::Data;
use tracing::debug;
use viewkit::Views;

/// Owns the decorator and the settings for installing it.
#[derive(Debug, Clone, Default)]
pub struct AutoPresenter {
    config: AutoPresenterConfig,
    decorator: Decorator,
}

impl AutoPresenter {
    pub fn new(config: AutoPresenterConfig) -> Self {
        Self {
            config,
            decorator: Decorator::new(),
        }
    }

    pub fn config(&self) -> &AutoPresenterConfig {
        &self.config
    }

    pub fn decorator(&self) -> Decorator {
        self.decorator
    }

    /// Registers the decorating composer. Does nothing when the config is disabled.
    pub fn install(&self, views: &mut Views<Data>) {
        if !self.config.enabled {
            debug!("autopresenter disabled, no composer installed");
            return;
        }

        debug!(
            pattern = %self.config.pattern,
            order = self.config.order,
            decorate_shared = self.config.decorate_shared,
            "installing autopresenter composer"
        );

        let decorator = self.decorator;
        let decorate_shared = self.config.decorate_shared;
        views.composer(&self.config.pattern, self.config.order, move |view| {
            let variables = if decorate_shared {
                view.gather()
            } else {
                view.data().clone()
            };
            for (key, value) in variables {
                view.set(&key, decorator.decorate(value));
            }
        });
    }
}
