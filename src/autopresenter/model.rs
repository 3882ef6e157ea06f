//! # Models and Data
//!
//! The presenter layer never knows concrete model types. It talks to them through the
//! [`Model`] trait (read an attribute, check one exists, serialize all of them, route
//! keys) and moves their values around as [`Data`].
//!
//! [`Data`] is the dynamic value that flows into templates and out of model attributes.
//! Plain data sits in [`Data::Value`]; everything else (models, presenters, collections
//! that may contain models) has its own variant so the decorator can tell at a glance
//! what needs wrapping.

use crate::error::{AutoPresenterError, Result};
use crate::presentation::Presentation;
use crate::presenter::Presenter;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Attribute name used for routing when a model does not say otherwise.
pub const DEFAULT_ROUTE_KEY: &str = "id";

/// A model's attributes, in serialization order.
pub type Attributes = Vec<(String, Data)>;

/// Read access to a model's attributes.
///
/// This is the whole surface a [`Presenter`] forwards to; presenters implement it too,
/// so code written against `Model` accepts either.
pub trait Model: fmt::Debug + Send + Sync {
    /// Reads the raw attribute at `key`.
    ///
    /// Unknown keys should return [`AutoPresenterError::UndefinedAttribute`], but any
    /// error is propagated as is.
    fn attribute(&self, key: &str) -> Result<Data>;

    /// Returns true if the attribute exists and is not null.
    fn has_attribute(&self, key: &str) -> bool {
        matches!(self.attribute(key), Ok(value) if !value.is_null())
    }

    /// All attributes in serialization order.
    fn attributes(&self) -> Attributes;

    /// Name of the attribute used as route key.
    fn route_key_name(&self) -> String {
        DEFAULT_ROUTE_KEY.to_string()
    }

    /// Value of the route key, as it would appear in a URL.
    fn route_key(&self) -> Result<String> {
        let name = self.route_key_name();
        match self.attribute(&name)? {
            Data::Value(Value::String(key)) => Ok(key),
            Data::Value(key @ (Value::Number(_) | Value::Bool(_))) => Ok(key.to_string()),
            _ => Err(AutoPresenterError::RouteKey(format!(
                "attribute `{}` is not a scalar",
                name
            ))),
        }
    }
}

/// A model that can be wrapped in a [`Presenter`].
pub trait Presentable: Model {
    /// The formatters applied when this model is presented.
    ///
    /// Build the table once per type (a `Lazy` static works well) and hand out clones
    /// of the `Arc`.
    fn presentation(&self) -> Arc<Presentation>;
}

/// A value exposed to templates or read off a model.
#[derive(Debug, Clone)]
pub enum Data {
    /// Plain data; never decorated.
    Value(Value),

    /// A model that has not been presented yet.
    Model(Arc<dyn Presentable>),

    /// An already presented model.
    Presenter(Presenter),

    /// An ordered sequence; elements are decorated one by one.
    List(Vec<Data>),

    /// A keyed mapping; values are decorated one by one.
    Map(BTreeMap<String, Data>),
}

impl Data {
    pub fn null() -> Self {
        Data::Value(Value::Null)
    }

    /// Wraps a concrete model.
    pub fn model<T: Presentable + 'static>(model: T) -> Self {
        Data::Model(Arc::new(model))
    }

    /// Converts any serializable value into plain data.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Data::Value(serde_json::to_value(value)?))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Data::Value(Value::Null))
    }

    /// True for anything the decorator would act on: models, presenters, lists and maps.
    pub fn is_decoratable(&self) -> bool {
        !matches!(self, Data::Value(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Data::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_presenter(&self) -> Option<&Presenter> {
        match self {
            Data::Presenter(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&Arc<dyn Presentable>> {
        match self {
            Data::Model(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Data]> {
        match self {
            Data::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Data>> {
        match self {
            Data::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Models and presenters compare by identity of the wrapped model, plain data by value.
impl PartialEq for Data {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Data::Value(a), Data::Value(b)) => a == b,
            (Data::Model(a), Data::Model(b)) => Arc::ptr_eq(a, b),
            (Data::Presenter(a), Data::Presenter(b)) => Arc::ptr_eq(a.model(), b.model()),
            (Data::List(a), Data::List(b)) => a == b,
            (Data::Map(a), Data::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for Data {
    fn from(value: Value) -> Self {
        Data::Value(value)
    }
}

impl From<&str> for Data {
    fn from(value: &str) -> Self {
        Data::Value(Value::from(value))
    }
}

impl From<String> for Data {
    fn from(value: String) -> Self {
        Data::Value(Value::from(value))
    }
}

macro_rules! data_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Data {
                fn from(value: $ty) -> Self {
                    Data::Value(Value::from(value))
                }
            }
        )*
    };
}

data_from_scalar!(i32, i64, u32, u64, f64);

impl From<bool> for Data {
    fn from(value: bool) -> Self {
        Data::Value(Value::from(value))
    }
}

impl From<Presenter> for Data {
    fn from(value: Presenter) -> Self {
        Data::Presenter(value)
    }
}

impl From<Vec<Data>> for Data {
    fn from(value: Vec<Data>) -> Self {
        Data::List(value)
    }
}

impl From<BTreeMap<String, Data>> for Data {
    fn from(value: BTreeMap<String, Data>) -> Self {
        Data::Map(value)
    }
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Data::Value(v) => v.serialize(serializer),
            Data::Model(m) => serialize_attributes(&m.attributes(), serializer),
            Data::Presenter(p) => p.serialize(serializer),
            Data::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Data::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Serializes ordered attributes as a map, keeping their order.
pub(crate) fn serialize_attributes<S: Serializer>(
    attributes: &[(String, Data)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(attributes.len()))?;
    for (key, value) in attributes {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

/// Flattens a serializable struct into plain attributes, in field order.
///
/// Handy for implementing [`Model::attributes`] on serde types.
pub fn serialized_attributes<T: Serialize>(value: &T) -> Result<Attributes> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields
            .into_iter()
            .map(|(key, value)| (key, Data::Value(value)))
            .collect()),
        other => Err(AutoPresenterError::Model(
            format!("expected an object, got {}", other).into(),
        )),
    }
}

/// Looks up one key in a set of attributes.
pub fn find_attribute(attributes: &[(String, Data)], key: &str) -> Result<Data> {
    attributes
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
        .ok_or_else(|| AutoPresenterError::UndefinedAttribute(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{line_item, User};
    use serde_json::json;

    #[test]
    fn is_decoratable_by_variant() {
        assert!(!Data::from("x").is_decoratable());
        assert!(!Data::null().is_decoratable());
        assert!(Data::model(User::new(1, "ada", "lovelace")).is_decoratable());
        assert!(Data::List(vec![]).is_decoratable());
        assert!(Data::Map(BTreeMap::new()).is_decoratable());
    }

    #[test]
    fn default_has_attribute_treats_null_as_missing() {
        let user = User::new(1, "ada", "lovelace").with_nickname(None);
        assert!(user.has_attribute("first_name"));
        assert!(!user.has_attribute("nickname"));
        assert!(!user.has_attribute("nope"));
    }

    #[test]
    fn default_route_key_uses_id() {
        let user = User::new(42, "ada", "lovelace");
        assert_eq!(user.route_key_name(), "id");
        assert_eq!(user.route_key().unwrap(), "42");
    }

    #[test]
    fn route_key_rejects_non_scalars() {
        #[derive(Debug)]
        struct Odd;
        impl Model for Odd {
            fn attribute(&self, _key: &str) -> Result<Data> {
                Ok(Data::List(vec![]))
            }
            fn attributes(&self) -> Attributes {
                vec![]
            }
        }

        assert!(matches!(
            Odd.route_key(),
            Err(AutoPresenterError::RouteKey(_))
        ));
    }

    #[test]
    fn serialized_attributes_keep_field_order() {
        #[derive(Serialize)]
        struct Row {
            zeta: i32,
            alpha: &'static str,
        }

        let attrs = serialized_attributes(&Row {
            zeta: 1,
            alpha: "a",
        })
        .unwrap();
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn serialized_attributes_rejects_scalars() {
        assert!(serialized_attributes(&5).is_err());
    }

    #[test]
    fn find_attribute_reports_undefined() {
        let attrs = vec![("a".to_string(), Data::from(1))];
        assert_eq!(find_attribute(&attrs, "a").unwrap(), Data::from(1));
        assert!(matches!(
            find_attribute(&attrs, "b"),
            Err(AutoPresenterError::UndefinedAttribute(key)) if key == "b"
        ));
    }

    #[test]
    fn models_compare_by_identity() {
        let item = Arc::new(line_item("pen", 2, 150));
        let a = Data::Model(item.clone());
        let b = Data::Model(item);
        let c = Data::model(line_item("pen", 2, 150));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn serializes_models_as_raw_attributes() {
        let data = Data::List(vec![
            Data::model(line_item("pen", 2, 150)),
            Data::from("plain"),
        ]);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json,
            json!([{"sku": "pen", "quantity": 2, "unit_price_cents": 150}, "plain"])
        );
    }
}
