//! Lifecycle events as handed over by the storefront host.
//!
//! These types are the boundary of the crate: the host builds them from its
//! own request handling, and [`crate::wiring::TrackingSubscribers`] routes them
//! to the translators. All of them deserialize from JSON so the relay binary
//! can accept them over HTTP.

pub mod grid;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::Product;
pub use grid::{GridData, GridRow, OneShotRows, Page, ProductGridView};

/// Route of the page shown right after checkout completes.
pub const ORDER_THANK_YOU_ROUTE: &str = "sylius_shop_order_thank_you";
/// Session key holding the id of the order just placed.
pub const SESSION_ORDER_ID_KEY: &str = "sylius_order_id";
/// Request attribute carrying the taxon slug on listing pages.
pub const SLUG_ATTRIBUTE: &str = "slug";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    #[default]
    Main,
    /// Internal fragment renders and other nested requests.
    Sub,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Session(Map<String, Value>);

impl Session {
    pub fn new() -> Self { Self::default() }
    pub fn insert(&mut self, key: impl Into<String>, value: Value) { self.0.insert(key.into(), value); }
    pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Request {
    #[serde(default)]
    route: Option<String>,
    #[serde(default)]
    attributes: Map<String, Value>,
    #[serde(default)]
    session: Option<Session>,
}

impl Request {
    pub fn new() -> Self { Self::default() }

    pub fn with_route(mut self, route: impl Into<String>) -> Self { self.route = Some(route.into()); self }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn with_session(mut self, session: Session) -> Self { self.session = Some(session); self }

    pub fn route(&self) -> Option<&str> { self.route.as_deref() }
    pub fn attribute(&self, key: &str) -> Option<&Value> { self.attributes.get(key) }
    /// The attribute's value when it is a string; `None` for any other JSON type.
    pub fn attribute_str(&self, key: &str) -> Option<&str> { self.attribute(key).and_then(Value::as_str) }
    pub fn session(&self) -> Option<&Session> { self.session.as_ref() }
}

/// Fired by the host at the start of every request it handles.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RequestEvent {
    #[serde(default)]
    pub request_type: RequestType,
    pub request: Request,
}

impl RequestEvent {
    pub fn main(request: Request) -> Self { Self { request_type: RequestType::Main, request } }
    pub fn sub(request: Request) -> Self { Self { request_type: RequestType::Sub, request } }
    pub fn is_main_request(&self) -> bool { self.request_type == RequestType::Main }
}

/// Subject carried by a resource controller event.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceSubject {
    Product(Product),
    ProductGrid(ProductGridView),
    Other { type_name: String },
}

impl ResourceSubject {
    pub fn type_name(&self) -> &str {
        match self {
            Self::Product(_) => "product",
            Self::ProductGrid(_) => "product_grid",
            Self::Other { type_name } => type_name,
        }
    }
}

/// Fired by the host around resource controller actions (show, index).
#[derive(Debug, Deserialize)]
pub struct ResourceControllerEvent {
    pub subject: ResourceSubject,
}

impl ResourceControllerEvent {
    pub fn new(subject: ResourceSubject) -> Self { Self { subject } }
}

/// The host hooks this crate subscribes to.
#[derive(Debug)]
pub enum HostEvent {
    Request(RequestEvent),
    ProductShow(ResourceControllerEvent),
    ProductIndex(ResourceControllerEvent),
}

impl HostEvent {
    /// Name under which the host raises the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Request(_) => "kernel.request",
            Self::ProductShow(_) => "sylius.product.show",
            Self::ProductIndex(_) => "sylius.product.index",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_event_defaults_to_main() {
        let event: RequestEvent = serde_json::from_value(json!({
            "request": {"route": ORDER_THANK_YOU_ROUTE, "session": {"sylius_order_id": 5}}
        })).unwrap();
        assert!(event.is_main_request());
        assert_eq!(event.request.route(), Some(ORDER_THANK_YOU_ROUTE));
        assert_eq!(event.request.session().and_then(|s| s.get(SESSION_ORDER_ID_KEY)), Some(&json!(5)));
    }

    #[test]
    fn test_attribute_str_ignores_non_strings() {
        let request = Request::new().with_attribute(SLUG_ATTRIBUTE, json!(12));
        assert!(request.attribute(SLUG_ATTRIBUTE).is_some());
        assert_eq!(request.attribute_str(SLUG_ATTRIBUTE), None);
    }

    #[test]
    fn test_subject_from_json() {
        let event: ResourceControllerEvent = serde_json::from_value(json!({
            "subject": {"type": "other", "type_name": "Taxon"}
        })).unwrap();
        assert_eq!(event.subject.type_name(), "Taxon");
    }
}
