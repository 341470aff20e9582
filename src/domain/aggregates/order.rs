//! Order Aggregate
//!
//! Read-side view of a placed order, as exposed by the order store.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use crate::domain::value_objects::{Money, ProductCode};

/// Key used to look an order up in the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(value: impl Into<String>) -> Self { Self(value.into()) }
    pub fn as_str(&self) -> &str { &self.0 }

    /// Converts a session value into a lookup key.
    ///
    /// Only primitive scalars qualify: strings are used verbatim, numbers by
    /// their decimal rendering (`42.0` renders as `42`) and booleans as
    /// `1`/`0`. Arrays, objects and null yield `None`.
    pub fn from_session_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(number_key(n))),
            Value::Bool(b) => Some(Self(if *b { "1" } else { "0" }.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

fn number_key(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    number: Option<String>,
    currency: String,
    items: Vec<LineItem>,
    adjustments: Money,
    total: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem { pub product_id: String, pub product_code: Option<ProductCode>, pub variant_code: Option<String>, pub quantity: u32, pub unit_price: Money, pub total: Money }

impl LineItem {
    pub fn new(product_id: impl Into<String>, product_code: Option<ProductCode>, quantity: u32, unit_price: Money) -> Self {
        let total = unit_price.multiply(quantity);
        Self { product_id: product_id.into(), product_code, variant_code: None, quantity, unit_price, total }
    }
}

impl Order {
    pub fn new(id: OrderId, number: Option<String>, currency: &str) -> Self {
        Self { id, number, currency: currency.to_string(), items: vec![], adjustments: Money::zero(currency), total: Money::zero(currency) }
    }

    pub fn id(&self) -> &OrderId { &self.id }
    pub fn number(&self) -> Option<&str> { self.number.as_deref() }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn total(&self) -> &Money { &self.total }
    pub fn items(&self) -> &[LineItem] { &self.items }

    pub fn add_item(&mut self, item: LineItem) { self.items.push(item); self.recalculate(); }

    /// Shipping, tax and promotion adjustments applied on top of the items.
    pub fn set_adjustments(&mut self, adjustments: Money) { self.adjustments = adjustments; self.recalculate(); }

    fn recalculate(&mut self) {
        let items_total = self.items.iter().fold(Money::zero(&self.currency), |acc, i| acc.add(&i.total).unwrap_or(acc));
        self.total = items_total.add(&self.adjustments).unwrap_or(items_total);
    }
}
