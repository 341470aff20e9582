//! Purchase tracking from the order thank-you page.

use std::sync::Arc;
use tracing::debug;

use super::{publish, Outcome, SkipReason};
use crate::domain::{OrderId, OrderPlaced};
use crate::host::{Request, RequestEvent, ORDER_THANK_YOU_ROUTE, SESSION_ORDER_ID_KEY};
use crate::ports::{EventDispatcher, OrderRepository};
use crate::Result;

pub struct OrderPlacedTranslator {
    orders: Arc<dyn OrderRepository>,
    dispatcher: Arc<dyn EventDispatcher>,
}

impl OrderPlacedTranslator {
    pub fn new(orders: Arc<dyn OrderRepository>, dispatcher: Arc<dyn EventDispatcher>) -> Self {
        Self { orders, dispatcher }
    }

    /// Publishes [`OrderPlaced`] when a main request hits the thank-you route
    /// and the session points at an existing order.
    ///
    /// The page may be viewed without an order in session (refresh after the
    /// session expired, direct link), so every miss is a skip.
    pub async fn on_request(&self, event: &RequestEvent) -> Result<Outcome> {
        if !event.is_main_request() {
            return Ok(Outcome::Skipped(SkipReason::SubRequest));
        }

        let request = &event.request;
        if request.route() != Some(ORDER_THANK_YOU_ROUTE) {
            return Ok(Outcome::Skipped(SkipReason::RouteMismatch));
        }

        let Some(order_id) = session_order_id(request) else {
            debug!(route = ORDER_THANK_YOU_ROUTE, "no usable order id in session");
            return Ok(Outcome::Skipped(SkipReason::MissingOrderId));
        };

        let Some(order) = self.orders.find(&order_id).await? else {
            debug!(%order_id, "order from session not found");
            return Ok(Outcome::Skipped(SkipReason::OrderNotFound));
        };

        publish(self.dispatcher.as_ref(), OrderPlaced { order }).await
    }
}

fn session_order_id(request: &Request) -> Option<OrderId> {
    request.session()?.get(SESSION_ORDER_ID_KEY).and_then(OrderId::from_session_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConversionEvent, LineItem, Money, Order, ProductCode};
    use crate::host::Session;
    use crate::infra::memory::{InMemoryOrderRepository, RecordingDispatcher};
    use serde_json::{json, Value};

    fn setup() -> (OrderPlacedTranslator, Arc<RecordingDispatcher>) {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let mut order = Order::new(OrderId::new("42"), Some("000042".into()), "USD");
        order.add_item(LineItem::new("7", Some(ProductCode::new("MUG")), 1, Money::from_minor(1200, "USD")));
        orders.insert(order);
        let dispatcher = Arc::new(RecordingDispatcher::new());
        (OrderPlacedTranslator::new(orders, dispatcher.clone()), dispatcher)
    }

    fn thank_you(order_id: Value) -> Request {
        let mut session = Session::new();
        session.insert(SESSION_ORDER_ID_KEY, order_id);
        Request::new().with_route(ORDER_THANK_YOU_ROUTE).with_session(session)
    }

    #[tokio::test]
    async fn publishes_order_found_from_session() {
        let (translator, dispatcher) = setup();
        let outcome = translator.on_request(&RequestEvent::main(thank_you(json!(42)))).await.unwrap();
        assert!(outcome.published().is_some());
        let events = dispatcher.events();
        assert_eq!(events.len(), 1);
        match &events[0].event {
            ConversionEvent::OrderPlaced(placed) => assert_eq!(placed.order.id().as_str(), "42"),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn ignores_other_routes() {
        let (translator, dispatcher) = setup();
        for route in ["sylius_shop_homepage", "sylius_shop_cart_summary", ""] {
            let mut session = Session::new();
            session.insert(SESSION_ORDER_ID_KEY, json!(42));
            let request = Request::new().with_route(route).with_session(session);
            let outcome = translator.on_request(&RequestEvent::main(request)).await.unwrap();
            assert_eq!(outcome.skip_reason(), Some(SkipReason::RouteMismatch));
        }
        let outcome = translator.on_request(&RequestEvent::main(Request::new())).await.unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::RouteMismatch));
        assert!(dispatcher.is_empty());
    }

    #[tokio::test]
    async fn ignores_sub_requests() {
        let (translator, dispatcher) = setup();
        let outcome = translator.on_request(&RequestEvent::sub(thank_you(json!(42)))).await.unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::SubRequest));
        assert!(dispatcher.is_empty());
    }

    #[tokio::test]
    async fn skips_missing_or_non_scalar_order_id() {
        let (translator, dispatcher) = setup();
        let no_session = Request::new().with_route(ORDER_THANK_YOU_ROUTE);
        let outcome = translator.on_request(&RequestEvent::main(no_session)).await.unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::MissingOrderId));

        let empty_session = Request::new().with_route(ORDER_THANK_YOU_ROUTE).with_session(Session::new());
        let outcome = translator.on_request(&RequestEvent::main(empty_session)).await.unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::MissingOrderId));

        for value in [json!(null), json!([42]), json!({"id": 42})] {
            let outcome = translator.on_request(&RequestEvent::main(thank_you(value))).await.unwrap();
            assert_eq!(outcome.skip_reason(), Some(SkipReason::MissingOrderId));
        }
        assert!(dispatcher.is_empty());
    }

    #[tokio::test]
    async fn skips_unknown_order() {
        let (translator, dispatcher) = setup();
        let outcome = translator.on_request(&RequestEvent::main(thank_you(json!("99")))).await.unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::OrderNotFound));
        assert!(dispatcher.is_empty());
    }

    #[tokio::test]
    async fn repeated_requests_publish_equal_payloads() {
        let (translator, dispatcher) = setup();
        let event = RequestEvent::main(thank_you(json!("42")));
        translator.on_request(&event).await.unwrap();
        translator.on_request(&event).await.unwrap();
        let events = dispatcher.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event, events[1].event);
        assert_ne!(events[0].event_id, events[1].event_id);
    }
}
