//! # Decorator
//!
//! The decorator decides what gets a presenter. It holds no state: `decorate` is a pure
//! function of its input and never fails, falling back to identity for anything it does
//! not recognize.
//!
//! Two entry points cover the two ways values reach it:
//!
//! - **Typed values** go through the [`Decorate`] trait, so the compiler knows the
//!   output type: `Arc<User>` and `Arc<dyn Presentable>` become a [`Presenter`],
//!   `Vec<Arc<User>>` becomes `Vec<Presenter>`, a `String` stays a `String`.
//! - **Dynamic values** ([`Data`], e.g. template variables) are decorated by variant:
//!   models are wrapped, lists and maps are decorated element by element, everything
//!   else passes through.
//!
//! Empty lists and maps go through the same path and come back as empty lists and maps.
//! Presenters are never wrapped a second time.

use crate::model::{Data, Presentable};
use crate::presenter::Presenter;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::Arc;
use tracing::trace;

/// Wraps presentable models in presenters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decorator;

impl Decorator {
    pub fn new() -> Self {
        Decorator
    }

    /// Decorates a value: presenters for models, element-wise for collections, identity
    /// for everything else.
    pub fn decorate<T: Decorate>(&self, value: T) -> T::Output {
        value.decorate_with(self)
    }

    /// Presents a single model.
    pub fn present<T: Presentable + 'static>(&self, model: T) -> Presenter {
        Presenter::new(Arc::new(model), *self)
    }

    /// Decorates every entry of a variable map in place.
    pub fn decorate_all(&self, variables: &mut BTreeMap<String, Data>) {
        for value in variables.values_mut() {
            let raw = std::mem::replace(value, Data::null());
            *value = self.decorate(raw);
        }
    }
}

/// Values the decorator knows how to handle.
pub trait Decorate {
    type Output;

    fn decorate_with(self, decorator: &Decorator) -> Self::Output;
}

impl Decorate for Data {
    type Output = Data;

    fn decorate_with(self, decorator: &Decorator) -> Data {
        match self {
            Data::Model(model) => {
                trace!(model = ?model, "presenting model");
                Data::Presenter(Presenter::new(model, *decorator))
            }
            Data::List(items) => Data::List(
                items
                    .into_iter()
                    .map(|item| item.decorate_with(decorator))
                    .collect(),
            ),
            Data::Map(entries) => Data::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.decorate_with(decorator)))
                    .collect(),
            ),
            other => other,
        }
    }
}

impl<T: Presentable + 'static> Decorate for Arc<T> {
    type Output = Presenter;

    fn decorate_with(self, decorator: &Decorator) -> Presenter {
        Presenter::new(self, *decorator)
    }
}

impl Decorate for Arc<dyn Presentable> {
    type Output = Presenter;

    fn decorate_with(self, decorator: &Decorator) -> Presenter {
        Presenter::new(self, *decorator)
    }
}

impl Decorate for Presenter {
    type Output = Presenter;

    fn decorate_with(self, _decorator: &Decorator) -> Presenter {
        self
    }
}

impl<T: Decorate> Decorate for Vec<T> {
    type Output = Vec<T::Output>;

    fn decorate_with(self, decorator: &Decorator) -> Self::Output {
        self.into_iter()
            .map(|item| item.decorate_with(decorator))
            .collect()
    }
}

impl<T: Decorate> Decorate for Option<T> {
    type Output = Option<T::Output>;

    fn decorate_with(self, decorator: &Decorator) -> Self::Output {
        self.map(|value| value.decorate_with(decorator))
    }
}

impl<K: Ord, T: Decorate> Decorate for BTreeMap<K, T> {
    type Output = BTreeMap<K, T::Output>;

    fn decorate_with(self, decorator: &Decorator) -> Self::Output {
        self.into_iter()
            .map(|(key, value)| (key, value.decorate_with(decorator)))
            .collect()
    }
}

impl<K: Eq + Hash, T: Decorate> Decorate for HashMap<K, T> {
    type Output = HashMap<K, T::Output>;

    fn decorate_with(self, decorator: &Decorator) -> Self::Output {
        self.into_iter()
            .map(|(key, value)| (key, value.decorate_with(decorator)))
            .collect()
    }
}

macro_rules! passthrough {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Decorate for $ty {
                type Output = $ty;

                fn decorate_with(self, _decorator: &Decorator) -> $ty {
                    self
                }
            }
        )*
    };
}

passthrough!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    serde_json::Value,
    chrono::DateTime<chrono::Utc>,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::test_utils::{line_item, sample_order, User};
    use serde_json::json;

    #[test]
    fn scalars_pass_through() {
        let decorator = Decorator::new();
        assert_eq!(decorator.decorate(5i64), 5);
        assert_eq!(decorator.decorate("abc".to_string()), "abc");
        assert_eq!(decorator.decorate(json!({"a": 1})), json!({"a": 1}));
        assert!(decorator.decorate(None::<Arc<User>>).is_none());
    }

    #[test]
    fn plain_data_passes_through() {
        let decorator = Decorator::new();
        assert_eq!(decorator.decorate(Data::from("x")), Data::from("x"));
        assert_eq!(decorator.decorate(Data::null()), Data::null());
    }

    #[test]
    fn model_becomes_presenter_over_same_model() {
        let decorator = Decorator::new();
        let user = Arc::new(User::new(1, "ada", "lovelace"));

        let presenter = decorator.decorate(user.clone());
        let model: Arc<dyn Presentable> = user;
        assert!(Arc::ptr_eq(presenter.model(), &model));
        assert_eq!(presenter.raw(None).unwrap(), Data::Model(model));
    }

    #[test]
    fn dynamic_model_becomes_presenter() {
        let decorator = Decorator::new();
        let model: Arc<dyn Presentable> = Arc::new(User::new(1, "ada", "lovelace"));

        let decorated = decorator.decorate(Data::Model(model.clone()));
        let presenter = decorated.as_presenter().expect("presenter");
        assert!(Arc::ptr_eq(presenter.model(), &model));
    }

    #[test]
    fn each_decoration_is_a_fresh_presenter() {
        let decorator = Decorator::new();
        let user = Arc::new(User::new(1, "ada", "lovelace"));
        let a = decorator.decorate(user.clone());
        let b = decorator.decorate(user);
        // Same model underneath, no identity map in between
        assert!(Arc::ptr_eq(a.model(), b.model()));
    }

    #[test]
    fn typed_vec_keeps_order_and_length() {
        let decorator = Decorator::new();
        let users = vec![
            Arc::new(User::new(1, "ada", "lovelace")),
            Arc::new(User::new(2, "alan", "turing")),
        ];

        let presenters = decorator.decorate(users);
        assert_eq!(presenters.len(), 2);
        assert_eq!(presenters[0].route_key().unwrap(), "1");
        assert_eq!(presenters[1].route_key().unwrap(), "2");
    }

    #[test]
    fn trait_object_vec_becomes_presenters() {
        let decorator = Decorator::new();
        let models: Vec<Arc<dyn Presentable>> = vec![
            Arc::new(User::new(1, "ada", "lovelace")),
            Arc::new(line_item("pen-01", 2, 150)),
        ];

        let presenters: Vec<Presenter> = decorator.decorate(models.clone());
        assert_eq!(presenters.len(), 2);
        assert!(Arc::ptr_eq(presenters[0].model(), &models[0]));
        assert_eq!(presenters[0].get("first_name").unwrap(), Data::from("Ada"));
        assert_eq!(presenters[1].get("sku").unwrap(), Data::from("PEN-01"));
    }

    #[test]
    fn typed_map_keeps_keys() {
        let decorator = Decorator::new();
        let mut users = HashMap::new();
        users.insert("author", Arc::new(User::new(1, "ada", "lovelace")));
        users.insert("editor", Arc::new(User::new(2, "alan", "turing")));

        let presenters = decorator.decorate(users);
        assert_eq!(presenters.len(), 2);
        assert_eq!(presenters["author"].route_key().unwrap(), "1");
        assert_eq!(presenters["editor"].route_key().unwrap(), "2");
    }

    #[test]
    fn dynamic_list_decorates_each_element() {
        let decorator = Decorator::new();
        let list = Data::List(vec![
            Data::model(line_item("pen", 1, 100)),
            Data::from("plain"),
            Data::model(line_item("ink", 2, 300)),
        ]);

        let decorated = decorator.decorate(list);
        let items = decorated.as_list().unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[0].as_presenter().is_some());
        assert_eq!(items[1], Data::from("plain"));
        assert!(items[2].as_presenter().is_some());
    }

    #[test]
    fn dynamic_map_decorates_each_value() {
        let decorator = Decorator::new();
        let mut entries = BTreeMap::new();
        entries.insert("first".to_string(), Data::model(line_item("pen", 1, 100)));
        entries.insert("count".to_string(), Data::from(2));

        let decorated = decorator.decorate(Data::Map(entries));
        let map = decorated.as_map().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["count", "first"]);
        assert!(map["first"].as_presenter().is_some());
        assert_eq!(map["count"], Data::from(2));
    }

    #[test]
    fn nested_collections_are_decorated_recursively() {
        let decorator = Decorator::new();
        let nested = Data::List(vec![Data::List(vec![Data::model(line_item("pen", 1, 100))])]);

        let decorated = decorator.decorate(nested);
        let inner = decorated.as_list().unwrap()[0].as_list().unwrap();
        assert!(inner[0].as_presenter().is_some());
    }

    #[test]
    fn empty_collections_keep_their_kind() {
        let decorator = Decorator::new();
        assert_eq!(decorator.decorate(Data::List(vec![])), Data::List(vec![]));
        assert_eq!(
            decorator.decorate(Data::Map(BTreeMap::new())),
            Data::Map(BTreeMap::new())
        );
        assert!(decorator.decorate(Vec::<Arc<User>>::new()).is_empty());
    }

    #[test]
    fn presenters_are_not_wrapped_twice() {
        let decorator = Decorator::new();
        let presenter = decorator.present(sample_order());
        let again = decorator.decorate(Data::Presenter(presenter.clone()));
        assert_eq!(again, Data::Presenter(presenter));
    }

    #[test]
    fn decorate_all_rewrites_in_place() {
        let decorator = Decorator::new();
        let mut vars = BTreeMap::new();
        vars.insert("order".to_string(), Data::model(sample_order()));
        vars.insert("title".to_string(), Data::from("Orders"));

        decorator.decorate_all(&mut vars);
        assert!(vars["order"].as_presenter().is_some());
        assert_eq!(vars["title"], Data::from("Orders"));
    }
}
