//! Collaborators the translators depend on.
//!
//! The stores are read-only from this crate's point of view. Implementations
//! live in [`crate::infra`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ConversionEventRaised, LocaleCode, Order, OrderId, Taxon};
use crate::Result;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find(&self, id: &OrderId) -> Result<Option<Order>>;
}

#[async_trait]
pub trait TaxonRepository: Send + Sync {
    /// Finds the taxon whose translation for `locale` has the given slug.
    async fn find_one_by_slug(&self, slug: &str, locale: &LocaleCode) -> Result<Option<Taxon>>;
}

/// Resolves the locale of the current storefront request.
pub trait LocaleContext: Send + Sync {
    fn locale_code(&self) -> LocaleCode;
}

/// Sink for raised conversion events.
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    async fn dispatch(&self, event: ConversionEventRaised) -> Result<()>;
}

/// A Meta pixel the conversions API should report to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pixel {
    pub pixel_id: String,
    pub enabled: bool,
}

#[async_trait]
pub trait PixelProvider: Send + Sync {
    async fn pixels(&self) -> Result<Vec<Pixel>>;
}
