//! Translators from host lifecycle events to conversion events.
//!
//! Each translator reacts to one host hook and publishes at most one event.
//! Expected absences (wrong route, no order in session, unknown slug, ...)
//! are reported as [`Outcome::Skipped`] rather than errors.

pub mod category_viewed;
pub mod order_placed;
pub mod product_viewed;

use serde::{Serialize, Serializer};

use crate::domain::{ConversionEvent, ConversionEventRaised};
use crate::ports::EventDispatcher;
use crate::Result;

pub use category_viewed::{visible_product_codes, CategoryViewedTranslator, MAX_PRODUCT_CODES};
pub use order_placed::OrderPlacedTranslator;
pub use product_viewed::ProductViewedTranslator;

#[derive(Debug, Clone)]
pub enum Outcome {
    Published(ConversionEventRaised),
    Skipped(SkipReason),
}

impl Outcome {
    pub fn published(&self) -> Option<&ConversionEventRaised> {
        match self {
            Self::Published(event) => Some(event),
            Self::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Published(_) => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    SubRequest,
    RouteMismatch,
    MissingOrderId,
    OrderNotFound,
    NotAGridView,
    MissingSlug,
    TaxonNotFound,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SubRequest => "sub_request",
            Self::RouteMismatch => "route_mismatch",
            Self::MissingOrderId => "missing_order_id",
            Self::OrderNotFound => "order_not_found",
            Self::NotAGridView => "not_a_grid_view",
            Self::MissingSlug => "missing_slug",
            Self::TaxonNotFound => "taxon_not_found",
        }
    }
}

impl Serialize for SkipReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

async fn publish(dispatcher: &dyn EventDispatcher, event: impl Into<ConversionEvent>) -> Result<Outcome> {
    let raised = ConversionEventRaised::new(event);
    dispatcher.dispatch(raised.clone()).await?;
    Ok(Outcome::Published(raised))
}
