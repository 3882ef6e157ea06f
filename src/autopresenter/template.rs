//! # Template Bridge
//!
//! Turns [`Data`] into minijinja values.
//!
//! - Plain data goes through serde.
//! - A [`Presenter`] becomes a map-like object: `{{ user.first_name }}` calls
//!   [`Presenter::get`], `{% for key in user %}` walks the model's attribute names, and
//!   `{{ user }}` prints the JSON of [`Presenter::to_array`].
//! - An undecorated model becomes a map-like object over its raw attributes.
//!
//! Presenter objects answer a fixed set of methods, all forwarded to the presenter or the
//! model: `raw(key?)`, `has_attribute(key)`, `route_key()`, `route_key_name()`,
//! `to_array()` and `to_json()`.
//!
//! Attribute errors turn into undefined values (the environment's undefined behavior
//! decides what happens next) and are logged at debug level.

use crate::error::Result;
use crate::model::{Data, Model, Presentable};
use crate::presenter::Presenter;
use minijinja::value::{from_args, Enumerator, Object, Value};
use minijinja::{Error, ErrorKind, State};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

impl From<Data> for Value {
    fn from(data: Data) -> Self {
        match data {
            Data::Value(v) => Value::from_serialize(&v),
            Data::Model(model) => Value::from_object(RawModel(model)),
            Data::Presenter(presenter) => Value::from_object(presenter),
            Data::List(items) => Value::from(items.into_iter().map(Value::from).collect::<Vec<_>>()),
            Data::Map(entries) => entries
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect(),
        }
    }
}

fn attribute_value(result: Result<Data>, key: &str) -> Option<Value> {
    match result {
        Ok(data) => Some(Value::from(data)),
        Err(err) => {
            debug!(key, error = %err, "attribute unavailable in template");
            None
        }
    }
}

fn attribute_keys<M: Model + ?Sized>(model: &M) -> Enumerator {
    Enumerator::Values(
        model
            .attributes()
            .into_iter()
            .map(|(key, _)| Value::from(key))
            .collect(),
    )
}

fn template_error(err: crate::error::AutoPresenterError) -> Error {
    Error::new(ErrorKind::InvalidOperation, err.to_string())
}

impl Object for Presenter {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let key = key.as_str()?;
        attribute_value(self.get(key), key)
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        attribute_keys(&**self)
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> std::result::Result<Value, Error> {
        match method {
            "raw" => {
                let (key,): (Option<&str>,) = from_args(args)?;
                self.raw(key).map(Value::from).map_err(template_error)
            }
            "has_attribute" => {
                let (key,): (&str,) = from_args(args)?;
                Ok(Value::from(self.has_attribute(key)))
            }
            "route_key" => {
                from_args::<()>(args)?;
                self.route_key().map(Value::from).map_err(template_error)
            }
            "route_key_name" => {
                from_args::<()>(args)?;
                Ok(Value::from(self.route_key_name()))
            }
            "to_array" => {
                from_args::<()>(args)?;
                Ok(self
                    .to_array()
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect())
            }
            "to_json" => {
                from_args::<()>(args)?;
                self.to_json().map(Value::from).map_err(template_error)
            }
            _ => Err(Error::new(
                ErrorKind::UnknownMethod,
                format!("presenter has no method named {}", method),
            )),
        }
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        Self: Sized + 'static,
    {
        fmt::Display::fmt(&**self, f)
    }
}

/// A model exposed to a template without a presenter.
#[derive(Debug)]
struct RawModel(Arc<dyn Presentable>);

impl Object for RawModel {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let key = key.as_str()?;
        attribute_value(self.0.attribute(key), key)
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        attribute_keys(&*self.0)
    }
}
