//! Category (taxon) listing tracking.
//!
//! Reported as the custom `ViewCategory` event, see
//! <https://developers.facebook.com/docs/marketing-api/audiences/guides/dynamic-product-audiences/#setuppixel>.

use std::sync::Arc;
use tracing::debug;

use super::{publish, Outcome, SkipReason};
use crate::domain::{CategoryViewed, ProductCode};
use crate::host::{GridData, GridRow, ProductGridView, ResourceControllerEvent, ResourceSubject, SLUG_ATTRIBUTE};
use crate::ports::{EventDispatcher, LocaleContext, TaxonRepository};
use crate::Result;

/// Number of listing rows examined for product codes.
pub const MAX_PRODUCT_CODES: usize = 10;

pub struct CategoryViewedTranslator {
    taxons: Arc<dyn TaxonRepository>,
    locale: Arc<dyn LocaleContext>,
    dispatcher: Arc<dyn EventDispatcher>,
}

impl CategoryViewedTranslator {
    pub fn new(taxons: Arc<dyn TaxonRepository>, locale: Arc<dyn LocaleContext>, dispatcher: Arc<dyn EventDispatcher>) -> Self {
        Self { taxons, locale, dispatcher }
    }

    /// Handles the host's product index hook. Subjects other than a product
    /// grid are ignored.
    pub async fn on_product_index(&self, event: &ResourceControllerEvent) -> Result<Outcome> {
        match &event.subject {
            ResourceSubject::ProductGrid(grid) => self.track(grid).await,
            _ => Ok(Outcome::Skipped(SkipReason::NotAGridView)),
        }
    }

    pub async fn track(&self, grid: &ProductGridView) -> Result<Outcome> {
        let Some(slug) = grid.request.attribute_str(SLUG_ATTRIBUTE) else {
            return Ok(Outcome::Skipped(SkipReason::MissingSlug));
        };

        let locale = self.locale.locale_code();
        let Some(taxon) = self.taxons.find_one_by_slug(slug, &locale).await? else {
            debug!(slug, %locale, "no taxon for slug");
            return Ok(Outcome::Skipped(SkipReason::TaxonNotFound));
        };

        let product_codes = visible_product_codes(&grid.data);
        publish(self.dispatcher.as_ref(), CategoryViewed { taxon, product_codes }).await
    }
}

/// Codes of the products among the first [`MAX_PRODUCT_CODES`] rows, in order.
///
/// Rows that are not products or have no code are skipped but still count
/// toward the limit. Data that cannot be iterated yields no codes.
pub fn visible_product_codes(data: &GridData) -> Vec<ProductCode> {
    let Some(rows) = data.rows() else {
        return Vec::new();
    };

    rows.take(MAX_PRODUCT_CODES)
        .filter_map(|row| match row {
            GridRow::Product(product) => product.code().cloned(),
            GridRow::Other { .. } => None,
        })
        .collect()
}
