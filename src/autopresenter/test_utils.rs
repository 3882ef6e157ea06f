//! Fixture models for tests.
//!
//! - [`User`]: hand-written attributes, casing-based formatter lookup, a formatter that
//!   combines several attributes
//! - [`LineItem`]: a serde struct using [`serialized_attributes`]
//! - [`Order`]: nested models (a customer and a list of items), custom route key

use crate::error::Result;
use crate::formatters;
use crate::model::{find_attribute, serialized_attributes, Attributes, Data, Model, Presentable};
use crate::presentation::Presentation;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

fn dollars(value: Value) -> Value {
    match value.as_i64() {
        Some(cents) => Value::from(format!("${}.{:02}", cents / 100, cents % 100)),
        None => value,
    }
}

static USER_PRESENTATION: Lazy<Arc<Presentation>> = Lazy::new(|| {
    Arc::new(
        Presentation::new()
            .format("first_name", formatters::capitalize)
            .format("last_name", formatters::capitalize)
            .format("email", formatters::lowercase)
            .format_with("fullName", |model, _raw| {
                let part = |key: &str| {
                    model
                        .attribute(key)
                        .ok()
                        .and_then(|d| d.as_str().map(str::to_string))
                };
                let mut parts = Vec::new();
                if let Some(first) = part("first_name") {
                    parts.push(first);
                }
                if let Some(nickname) = part("nickname") {
                    parts.push(format!("\"{}\"", nickname));
                }
                if let Some(last) = part("last_name") {
                    parts.push(last);
                }
                formatters::capitalize(Value::from(parts.join(" ")))
            })
            .format("joined_at", formatters::date("%B %-d, %Y")),
    )
});

static LINE_ITEM_PRESENTATION: Lazy<Arc<Presentation>> = Lazy::new(|| {
    Arc::new(
        Presentation::new()
            .format("sku", formatters::uppercase)
            .format("unitPriceCents", dollars),
    )
});

static ORDER_PRESENTATION: Lazy<Arc<Presentation>> = Lazy::new(|| {
    Arc::new(
        Presentation::new()
            .format("placed_at", formatters::date("%Y-%m-%d"))
            .format("total_cents", dollars),
    )
});

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub nickname: Option<String>,
    pub joined_at: String,
}

impl User {
    pub fn new(id: i64, first_name: &str, last_name: &str) -> Self {
        Self {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            nickname: None,
            joined_at: "2024-03-01T09:30:00Z".to_string(),
        }
    }

    pub fn with_nickname(mut self, nickname: Option<&str>) -> Self {
        self.nickname = nickname.map(str::to_string);
        self
    }
}

impl Model for User {
    fn attribute(&self, key: &str) -> Result<Data> {
        find_attribute(&self.attributes(), key)
    }

    fn attributes(&self) -> Attributes {
        vec![
            ("id".to_string(), Data::from(self.id)),
            ("first_name".to_string(), Data::from(self.first_name.as_str())),
            ("last_name".to_string(), Data::from(self.last_name.as_str())),
            (
                "nickname".to_string(),
                Data::from(Value::from(self.nickname.clone())),
            ),
            (
                "email".to_string(),
                Data::from(format!("{}.{}@Example.COM", self.first_name, self.last_name)),
            ),
            (
                "full_name".to_string(),
                Data::from(format!("{} {}", self.first_name, self.last_name)),
            ),
            ("joined_at".to_string(), Data::from(self.joined_at.as_str())),
        ]
    }
}

impl Presentable for User {
    fn presentation(&self) -> Arc<Presentation> {
        Arc::clone(&USER_PRESENTATION)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LineItem {
    pub sku: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

pub fn line_item(sku: &str, quantity: i64, unit_price_cents: i64) -> LineItem {
    LineItem {
        sku: sku.to_string(),
        quantity,
        unit_price_cents,
    }
}

impl Model for LineItem {
    fn attribute(&self, key: &str) -> Result<Data> {
        find_attribute(&serialized_attributes(self)?, key)
    }

    fn attributes(&self) -> Attributes {
        serialized_attributes(self).unwrap_or_default()
    }

    fn route_key_name(&self) -> String {
        "sku".to_string()
    }
}

impl Presentable for LineItem {
    fn presentation(&self) -> Arc<Presentation> {
        Arc::clone(&LINE_ITEM_PRESENTATION)
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub number: String,
    pub placed_at: String,
    pub customer: Arc<User>,
    pub items: Vec<Arc<LineItem>>,
}

impl Order {
    pub fn total_cents(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.quantity * item.unit_price_cents)
            .sum()
    }
}

impl Model for Order {
    fn attribute(&self, key: &str) -> Result<Data> {
        find_attribute(&self.attributes(), key)
    }

    fn attributes(&self) -> Attributes {
        let items = self
            .items
            .iter()
            .map(|item| Data::Model(item.clone()))
            .collect::<Vec<_>>();
        vec![
            ("number".to_string(), Data::from(self.number.as_str())),
            ("placed_at".to_string(), Data::from(self.placed_at.as_str())),
            ("customer".to_string(), Data::Model(self.customer.clone())),
            ("items".to_string(), Data::List(items)),
            ("total_cents".to_string(), Data::from(self.total_cents())),
        ]
    }

    fn route_key_name(&self) -> String {
        "number".to_string()
    }
}

impl Presentable for Order {
    fn presentation(&self) -> Arc<Presentation> {
        Arc::clone(&ORDER_PRESENTATION)
    }
}

/// Order `A-1001` for Grace Hopper: two pens at $1.50 and one ink at $3.25.
pub fn sample_order() -> Order {
    Order {
        number: "A-1001".to_string(),
        placed_at: "2024-05-04T12:00:00Z".to_string(),
        customer: Arc::new(User::new(3, "grace", "hopper")),
        items: vec![
            Arc::new(line_item("pen-01", 2, 150)),
            Arc::new(line_item("ink-02", 1, 325)),
        ],
    }
}
