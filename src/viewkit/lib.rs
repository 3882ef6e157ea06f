//! # Viewkit - Named Views with Composers
//!
//! A small view layer on top of [minijinja](https://docs.rs/minijinja): templates are
//! registered by name, some variables are shared by every render, and *composers* get a
//! chance to inspect and rewrite a view's variables right before it is rendered.
//!
//! ## The Problem
//!
//! Templates usually need more than what the caller hands them:
//! - Some variables (current user, app name) should be visible to every template
//! - Some cross-cutting rewriting (wrapping models, injecting defaults) should happen
//!   for every render without each call site remembering to do it
//!
//! ## The Solution
//!
//! - **Shared data** is registered once with [`Views::share`]
//! - **Composers** are registered with [`Views::composer`] against a name pattern and an
//!   order; they run before each matching render, lowest order first
//! - Each render builds a [`View`] holding the shared data and the local data; composers
//!   write into the local slots, which shadow the shared ones
//!
//! ## Quick Example
//!
//! ```rust
//! use minijinja::Value;
//! use std::collections::BTreeMap;
//! use viewkit::Views;
//!
//! let mut views: Views<Value> = Views::new();
//! views.add_template("hello", "Hello {{ name }} from {{ app }}").unwrap();
//! views.share("app", Value::from("viewkit"));
//! views.composer("*", 0, |view| {
//!     let name = view.get("name").map(|v| v.to_string()).unwrap_or_default();
//!     view.set("name", Value::from(name.to_uppercase()));
//! });
//!
//! let mut data = BTreeMap::new();
//! data.insert("name".to_string(), Value::from("ada"));
//! let output = views.render("hello", data).unwrap();
//! assert_eq!(output, "Hello ADA from viewkit");
//! ```
//!
//! ## Patterns
//!
//! - `*` matches every view
//! - `users.*` matches every view whose name starts with `users.`
//! - anything else matches that exact view name

use minijinja::{Environment, Error, Value};
use std::collections::BTreeMap;
use tracing::trace;

/// Pattern that matches every view.
pub const WILDCARD: &str = "*";

/// The variables of a single render.
///
/// Holds a borrow of the data shared across all renders plus the data local to this
/// render. Writes always land in the local data.
pub struct View<'a, V> {
    name: String,
    shared: &'a BTreeMap<String, V>,
    data: BTreeMap<String, V>,
}

impl<'a, V> View<'a, V> {
    /// Name of the template this view renders.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Data shared across all renders.
    pub fn shared(&self) -> &BTreeMap<String, V> {
        self.shared
    }

    /// Data local to this render.
    pub fn data(&self) -> &BTreeMap<String, V> {
        &self.data
    }

    /// Looks up a variable, local data first.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.data.get(key).or_else(|| self.shared.get(key))
    }

    /// Writes a variable into the local data, shadowing any shared entry.
    pub fn set(&mut self, key: &str, value: V) {
        self.data.insert(key.to_string(), value);
    }

    /// Returns true if the variable is visible to the template.
    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key) || self.shared.contains_key(key)
    }
}

impl<'a, V: Clone> View<'a, V> {
    /// The union of shared and local data, local entries winning.
    pub fn gather(&self) -> BTreeMap<String, V> {
        let mut all = self.shared.clone();
        all.extend(self.data.iter().map(|(k, v)| (k.clone(), v.clone())));
        all
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    Any,
    Prefix(String),
    Exact(String),
}

impl Pattern {
    fn parse(pattern: &str) -> Self {
        if pattern == WILDCARD {
            Pattern::Any
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            Pattern::Prefix(prefix.to_string())
        } else {
            Pattern::Exact(pattern.to_string())
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Prefix(prefix) => name.starts_with(prefix.as_str()),
            Pattern::Exact(exact) => name == exact,
        }
    }
}

type ComposeFn<V> = Box<dyn Fn(&mut View<'_, V>) + Send + Sync>;

struct Composer<V> {
    pattern: Pattern,
    order: i32,
    callback: ComposeFn<V>,
}

/// A template environment with shared data and composers.
///
/// `V` is the type of the variables handed to templates; anything convertible into a
/// minijinja [`Value`] works, `Value` itself included.
pub struct Views<V> {
    env: Environment<'static>,
    shared: BTreeMap<String, V>,
    composers: Vec<Composer<V>>,
}

impl<V> Default for Views<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Views<V> {
    /// Creates an empty view environment.
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
            shared: BTreeMap::new(),
            composers: Vec::new(),
        }
    }

    /// Registers a named template.
    ///
    /// The template is compiled immediately; errors are returned if syntax is invalid.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), Error> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())
    }

    /// Mutable access to the underlying environment, for filters and globals.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }

    /// Shares a variable with every render. Replaces an earlier value under the same key.
    pub fn share(&mut self, key: &str, value: V) {
        self.shared.insert(key.to_string(), value);
    }

    /// Data shared across all renders.
    pub fn shared(&self) -> &BTreeMap<String, V> {
        &self.shared
    }

    /// Registers a composer for views matching `pattern`.
    ///
    /// Composers run in ascending `order`; composers with the same order run in
    /// registration order.
    pub fn composer<F>(&mut self, pattern: &str, order: i32, callback: F)
    where
        F: Fn(&mut View<'_, V>) + Send + Sync + 'static,
    {
        let at = self
            .composers
            .iter()
            .position(|c| c.order > order)
            .unwrap_or(self.composers.len());
        self.composers.insert(
            at,
            Composer {
                pattern: Pattern::parse(pattern),
                order,
                callback: Box::new(callback),
            },
        );
    }

    /// Number of registered composers.
    pub fn composer_count(&self) -> usize {
        self.composers.len()
    }

    /// Builds the view for a render without running composers.
    pub fn make(&self, name: &str, data: BTreeMap<String, V>) -> View<'_, V> {
        View {
            name: name.to_string(),
            shared: &self.shared,
            data,
        }
    }

    /// Runs every composer matching the view's name, in order.
    pub fn compose(&self, view: &mut View<'_, V>) {
        for composer in &self.composers {
            if composer.pattern.matches(&view.name) {
                trace!(view = %view.name, order = composer.order, "running composer");
                (composer.callback)(view);
            }
        }
    }
}

impl<V: Clone + Into<Value>> Views<V> {
    /// Composes and renders a registered template with the given local data.
    ///
    /// # Errors
    ///
    /// Returns an error if the template name is not found or rendering fails.
    pub fn render(&self, name: &str, data: BTreeMap<String, V>) -> Result<String, Error> {
        let tmpl = self.env.get_template(name)?;
        let mut view = self.make(name, data);
        self.compose(&mut view);
        let context: Value = view
            .gather()
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect();
        tmpl.render(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn data(pairs: &[(&str, &str)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_render_local_data() {
        let mut views: Views<Value> = Views::new();
        views.add_template("greet", "Hi {{ name }}").unwrap();

        let output = views.render("greet", data(&[("name", "bob")])).unwrap();
        assert_eq!(output, "Hi bob");
    }

    #[test]
    fn test_shared_data_visible_to_all_views() {
        let mut views: Views<Value> = Views::new();
        views.add_template("a", "A:{{ app }}").unwrap();
        views.add_template("b", "B:{{ app }}").unwrap();
        views.share("app", Value::from("demo"));

        assert_eq!(views.render("a", BTreeMap::new()).unwrap(), "A:demo");
        assert_eq!(views.render("b", BTreeMap::new()).unwrap(), "B:demo");
    }

    #[test]
    fn test_local_data_shadows_shared() {
        let mut views: Views<Value> = Views::new();
        views.add_template("t", "{{ app }}").unwrap();
        views.share("app", Value::from("shared"));

        let output = views.render("t", data(&[("app", "local")])).unwrap();
        assert_eq!(output, "local");
    }

    #[test]
    fn test_unknown_template_error() {
        let views: Views<Value> = Views::new();
        assert!(views.render("missing", BTreeMap::new()).is_err());
    }

    #[test]
    fn test_template_syntax_error() {
        let mut views: Views<Value> = Views::new();
        assert!(views.add_template("bad", "{{ unclosed").is_err());
    }

    #[test]
    fn test_composer_rewrites_variables() {
        let mut views: Views<Value> = Views::new();
        views.add_template("t", "{{ name }}").unwrap();
        views.composer("*", 0, |view| {
            view.set("name", Value::from("composed"));
        });

        let output = views.render("t", data(&[("name", "raw")])).unwrap();
        assert_eq!(output, "composed");
    }

    #[test]
    fn test_composer_write_shadows_shared() {
        let mut views: Views<Value> = Views::new();
        views.add_template("t", "{{ app }}").unwrap();
        views.share("app", Value::from("shared"));
        views.composer("*", 0, |view| {
            let app = view.get("app").map(|v| v.to_string()).unwrap_or_default();
            view.set("app", Value::from(format!("[{}]", app)));
        });

        assert_eq!(views.render("t", BTreeMap::new()).unwrap(), "[shared]");
        // The shared entry itself is untouched
        assert_eq!(views.shared()["app"].to_string(), "shared");
    }

    #[test]
    fn test_composers_run_in_ascending_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut views: Views<Value> = Views::new();
        views.add_template("t", "").unwrap();

        for (label, order) in [("late", 999), ("early", -5), ("mid", 0), ("mid2", 0)] {
            let seen = Arc::clone(&seen);
            views.composer("*", order, move |_| seen.lock().unwrap().push(label));
        }

        views.render("t", BTreeMap::new()).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["early", "mid", "mid2", "late"]);
        assert_eq!(views.composer_count(), 4);
    }

    #[test]
    fn test_composer_patterns() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut views: Views<Value> = Views::new();
        for name in ["users.show", "users.index", "orders.show"] {
            views.add_template(name, "").unwrap();
        }
        for pattern in ["users.*", "orders.show", "*"] {
            let seen = Arc::clone(&seen);
            views.composer(pattern, 0, move |view| {
                seen.lock()
                    .unwrap()
                    .push(format!("{}@{}", pattern, view.name()));
            });
        }

        views.render("users.index", BTreeMap::new()).unwrap();
        views.render("orders.show", BTreeMap::new()).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "users.*@users.index",
                "*@users.index",
                "orders.show@orders.show",
                "*@orders.show",
            ]
        );
    }

    #[test]
    fn test_gather_merges_shared_and_local() {
        let mut views: Views<Value> = Views::new();
        views.share("a", Value::from(1));
        views.share("b", Value::from(2));

        let mut local = BTreeMap::new();
        local.insert("b".to_string(), Value::from(20));
        local.insert("c".to_string(), Value::from(30));
        let view = views.make("t", local);

        let all = view.gather();
        assert_eq!(all.len(), 3);
        assert_eq!(all["a"], Value::from(1));
        assert_eq!(all["b"], Value::from(20));
        assert_eq!(all["c"], Value::from(30));
        assert!(view.has("a"));
        assert!(!view.has("z"));
    }

    #[test]
    fn test_pattern_parse() {
        assert_eq!(Pattern::parse("*"), Pattern::Any);
        assert_eq!(Pattern::parse("users.*"), Pattern::Prefix("users.".into()));
        assert_eq!(Pattern::parse("home"), Pattern::Exact("home".into()));
        assert!(!Pattern::parse("home").matches("homepage"));
    }
}
