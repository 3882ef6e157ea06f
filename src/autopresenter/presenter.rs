//! # Presenter
//!
//! A [`Presenter`] wraps one model and stands in for it wherever the model is read.
//!
//! Reading an attribute through [`Presenter::get`]:
//!
//! 1. reads the raw attribute from the model (errors propagate untouched)
//! 2. if the value is a model or a collection, decorates it and returns that, so nested
//!    models come back as presenters of their own
//! 3. otherwise looks for a formatter in the model's [`Presentation`] (exact key, then
//!    snake_case, then camelCase) and returns its output
//! 4. with no formatter, returns the raw value unchanged
//!
//! Everything else goes to the model as is: `Presenter` implements [`Model`] by
//! forwarding each operation, so it can be handed to any code that expects a model,
//! routing included.
//!
//! A presenter never writes to the model.

use crate::decorator::Decorator;
use crate::error::Result;
use crate::model::{serialize_attributes, Attributes, Data, Model, Presentable};
use crate::presentation::Presentation;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// A presentable model plus its formatters.
#[derive(Debug, Clone)]
pub struct Presenter {
    model: Arc<dyn Presentable>,
    presentation: Arc<Presentation>,
    decorator: Decorator,
}

impl Presenter {
    pub fn new(model: Arc<dyn Presentable>, decorator: Decorator) -> Self {
        let presentation = model.presentation();
        Self {
            model,
            presentation,
            decorator,
        }
    }

    /// The wrapped model.
    pub fn model(&self) -> &Arc<dyn Presentable> {
        &self.model
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn decorator(&self) -> &Decorator {
        &self.decorator
    }

    /// The whole model when `key` is `None`, otherwise the raw attribute at `key` with no
    /// presentation applied.
    pub fn raw(&self, key: Option<&str>) -> Result<Data> {
        match key {
            Some(key) => self.model.attribute(key),
            None => Ok(Data::Model(Arc::clone(&self.model))),
        }
    }

    /// Reads an attribute, presented.
    pub fn get(&self, key: &str) -> Result<Data> {
        let raw = self.model.attribute(key)?;
        Ok(self.resolve(key, raw))
    }

    /// All attributes in the model's serialization order, each presented as by
    /// [`Presenter::get`].
    pub fn to_array(&self) -> Attributes {
        self.model
            .attributes()
            .into_iter()
            .map(|(key, raw)| {
                let value = self.resolve(&key, raw);
                (key, value)
            })
            .collect()
    }

    /// JSON encoding of [`Presenter::to_array`].
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn resolve(&self, key: &str, raw: Data) -> Data {
        match raw {
            Data::Value(value) => Data::Value(self.present(key, value)),
            nested => self.decorator.decorate(nested),
        }
    }

    fn present(&self, key: &str, raw: Value) -> Value {
        match self.presentation.resolve(key) {
            Some((name, formatter)) => {
                trace!(key, formatter = name, "presenting attribute");
                formatter(&*self.model, raw)
            }
            None => raw,
        }
    }
}

impl Model for Presenter {
    fn attribute(&self, key: &str) -> Result<Data> {
        self.model.attribute(key)
    }

    fn has_attribute(&self, key: &str) -> bool {
        self.model.has_attribute(key)
    }

    fn attributes(&self) -> Attributes {
        self.model.attributes()
    }

    fn route_key_name(&self) -> String {
        self.model.route_key_name()
    }

    fn route_key(&self) -> Result<String> {
        self.model.route_key()
    }
}

impl Serialize for Presenter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_attributes(&self.to_array(), serializer)
    }
}

impl fmt::Display for Presenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
