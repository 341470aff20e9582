//! Product detail page tracking.

use std::sync::Arc;

use super::{publish, Outcome};
use crate::domain::{Product, ProductViewed};
use crate::host::{ResourceControllerEvent, ResourceSubject};
use crate::ports::EventDispatcher;
use crate::{Result, TrackingError};

pub struct ProductViewedTranslator {
    dispatcher: Arc<dyn EventDispatcher>,
}

impl ProductViewedTranslator {
    pub fn new(dispatcher: Arc<dyn EventDispatcher>) -> Self { Self { dispatcher } }

    /// Handles the host's product show hook.
    ///
    /// The host only raises this hook with a product subject, so anything else
    /// is a contract violation and fails with [`TrackingError::UnexpectedSubject`].
    pub async fn on_product_show(&self, event: &ResourceControllerEvent) -> Result<Outcome> {
        match &event.subject {
            ResourceSubject::Product(product) => self.track(product).await,
            other => Err(TrackingError::UnexpectedSubject { expected: "product", found: other.type_name().to_string() }),
        }
    }

    pub async fn track(&self, product: &Product) -> Result<Outcome> {
        publish(self.dispatcher.as_ref(), ProductViewed { product: product.clone() }).await
    }
}
