//! Registration of the translators against the host hooks.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::host::HostEvent;
use crate::pixels::{PixelProviderRegistry, StaticPixelProvider, STORE_PROVIDER};
use crate::ports::{EventDispatcher, LocaleContext, OrderRepository, PixelProvider, TaxonRepository};
use crate::translators::{CategoryViewedTranslator, OrderPlacedTranslator, Outcome, ProductViewedTranslator};
use crate::Result;

/// Everything the translators need from the outside.
#[derive(Clone)]
pub struct Collaborators {
    pub orders: Arc<dyn OrderRepository>,
    pub taxons: Arc<dyn TaxonRepository>,
    pub locale: Arc<dyn LocaleContext>,
    pub dispatcher: Arc<dyn EventDispatcher>,
}

/// The three translators, each bound to the host hook it handles.
pub struct TrackingSubscribers {
    order_placed: OrderPlacedTranslator,
    product_viewed: ProductViewedTranslator,
    category_viewed: CategoryViewedTranslator,
}

impl TrackingSubscribers {
    pub fn new(c: Collaborators) -> Self {
        Self {
            order_placed: OrderPlacedTranslator::new(c.orders, c.dispatcher.clone()),
            product_viewed: ProductViewedTranslator::new(c.dispatcher.clone()),
            category_viewed: CategoryViewedTranslator::new(c.taxons, c.locale, c.dispatcher),
        }
    }

    /// Host event names this crate listens to.
    pub fn subscribed_events() -> [&'static str; 3] {
        ["kernel.request", "sylius.product.show", "sylius.product.index"]
    }

    pub async fn handle(&self, event: &HostEvent) -> Result<Outcome> {
        let hook = event.name();
        let result = match event {
            HostEvent::Request(e) => self.order_placed.on_request(e).await,
            HostEvent::ProductShow(e) => self.product_viewed.on_product_show(e).await,
            HostEvent::ProductIndex(e) => self.category_viewed.on_product_index(e).await,
        };

        match &result {
            Ok(Outcome::Published(raised)) => {
                info!(hook, event_name = raised.event_name(), event_id = %raised.event_id, "conversion event published")
            }
            Ok(Outcome::Skipped(reason)) => debug!(hook, reason = reason.as_str(), "nothing to track"),
            Err(err) => warn!(hook, error = %err, "conversion tracking failed"),
        }
        result
    }
}

/// Pixel providers with the default resolved: pixels from the store win over
/// the configured ids whenever a store provider is available.
pub fn pixel_registry(pixel_ids: &[String], store: Option<Arc<dyn PixelProvider>>) -> PixelProviderRegistry {
    let mut registry = PixelProviderRegistry::new(Arc::new(StaticPixelProvider::from_ids(pixel_ids.iter().cloned())));
    if let Some(store) = store {
        registry.register(STORE_PROVIDER, store);
    }
    registry.prefer_store_provider();
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LocaleCode, Order, OrderId, Product, Taxon};
    use crate::host::{GridData, ProductGridView, Request, RequestEvent, ResourceControllerEvent, ResourceSubject, Session, ORDER_THANK_YOU_ROUTE, SESSION_ORDER_ID_KEY, SLUG_ATTRIBUTE};
    use crate::infra::memory::{FixedLocaleContext, InMemoryOrderRepository, InMemoryTaxonRepository, RecordingDispatcher};
    use crate::pixels::CONFIGURED_PROVIDER;
    use crate::translators::SkipReason;
    use crate::TrackingError;
    use serde_json::json;

    fn subscribers() -> (TrackingSubscribers, Arc<RecordingDispatcher>) {
        let orders = Arc::new(InMemoryOrderRepository::new());
        orders.insert(Order::new(OrderId::new("1"), None, "USD"));
        let taxons = Arc::new(InMemoryTaxonRepository::new());
        taxons.insert(Taxon::new("2", "mugs").with_translation(LocaleCode::new("en_US"), "Mugs", "mugs"));
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let subscribers = TrackingSubscribers::new(Collaborators {
            orders,
            taxons,
            locale: Arc::new(FixedLocaleContext::new(LocaleCode::new("en_US"))),
            dispatcher: dispatcher.clone(),
        });
        (subscribers, dispatcher)
    }

    #[tokio::test]
    async fn routes_each_hook_to_its_translator() {
        let (subscribers, dispatcher) = subscribers();

        let mut session = Session::new();
        session.insert(SESSION_ORDER_ID_KEY, json!(1));
        let request = Request::new().with_route(ORDER_THANK_YOU_ROUTE).with_session(session);
        subscribers.handle(&HostEvent::Request(RequestEvent::main(request))).await.unwrap();

        let show = ResourceControllerEvent::new(ResourceSubject::Product(Product::new("3", "Mug")));
        subscribers.handle(&HostEvent::ProductShow(show)).await.unwrap();

        let grid = ProductGridView::new(GridData::page(vec![]), Request::new().with_attribute(SLUG_ATTRIBUTE, json!("mugs")));
        let index = ResourceControllerEvent::new(ResourceSubject::ProductGrid(grid));
        subscribers.handle(&HostEvent::ProductIndex(index)).await.unwrap();

        let names: Vec<_> = dispatcher.events().iter().map(|e| e.event_name()).collect();
        assert_eq!(names, ["Purchase", "ViewContent", "ViewCategory"]);
    }

    #[tokio::test]
    async fn passes_skips_and_errors_through() {
        let (subscribers, dispatcher) = subscribers();
        let outcome = subscribers.handle(&HostEvent::Request(RequestEvent::main(Request::new()))).await.unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::RouteMismatch));

        let wrong = ResourceControllerEvent::new(ResourceSubject::Other { type_name: "Taxon".into() });
        let err = subscribers.handle(&HostEvent::ProductShow(wrong)).await.unwrap_err();
        assert!(matches!(err, TrackingError::UnexpectedSubject { .. }));
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn subscribed_events_match_host_event_names() {
        let events = [
            HostEvent::Request(RequestEvent::main(Request::new())),
            HostEvent::ProductShow(ResourceControllerEvent::new(ResourceSubject::Other { type_name: "x".into() })),
            HostEvent::ProductIndex(ResourceControllerEvent::new(ResourceSubject::Other { type_name: "x".into() })),
        ];
        let names: Vec<_> = events.iter().map(HostEvent::name).collect();
        assert_eq!(names, TrackingSubscribers::subscribed_events());
    }

    #[test]
    fn pixel_registry_prefers_store() {
        let ids = vec!["1".to_string()];
        assert_eq!(pixel_registry(&ids, None).default_name(), CONFIGURED_PROVIDER);
        let store: Arc<dyn PixelProvider> = Arc::new(StaticPixelProvider::from_ids(["2"]));
        assert_eq!(pixel_registry(&ids, Some(store)).default_name(), STORE_PROVIDER);
    }
}
