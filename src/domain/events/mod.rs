//! Conversion events
//!
//! Notifications raised for the conversions API consumer. Each one is built
//! once, published once and dropped.
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use crate::domain::aggregates::{Order, Product, Taxon};
use crate::domain::value_objects::ProductCode;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversionEvent {
    OrderPlaced(OrderPlaced),
    ProductViewed(ProductViewed),
    CategoryViewed(CategoryViewed),
}

impl ConversionEvent {
    /// Event name understood by the conversions API.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::OrderPlaced(_) => "Purchase",
            Self::ProductViewed(_) => "ViewContent",
            // custom event used by dynamic product audiences
            Self::CategoryViewed(_) => "ViewCategory",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderPlaced { pub order: Order }

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductViewed { pub product: Product }

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryViewed { pub taxon: Taxon, pub product_codes: Vec<ProductCode> }

impl From<OrderPlaced> for ConversionEvent { fn from(e: OrderPlaced) -> Self { Self::OrderPlaced(e) } }
impl From<ProductViewed> for ConversionEvent { fn from(e: ProductViewed) -> Self { Self::ProductViewed(e) } }
impl From<CategoryViewed> for ConversionEvent { fn from(e: CategoryViewed) -> Self { Self::CategoryViewed(e) } }

/// Envelope handed to the dispatcher.
#[derive(Clone, Debug, Serialize)]
pub struct ConversionEventRaised {
    pub event_id: Uuid,
    pub raised_at: DateTime<Utc>,
    pub event: ConversionEvent,
}

impl ConversionEventRaised {
    pub fn new(event: impl Into<ConversionEvent>) -> Self {
        Self { event_id: Uuid::new_v4(), raised_at: Utc::now(), event: event.into() }
    }

    pub fn event_name(&self) -> &'static str { self.event.event_name() }
}
