//! In-process collaborators, used by tests and local wiring.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use crate::domain::{ConversionEventRaised, LocaleCode, Order, OrderId, Taxon};
use crate::ports::{EventDispatcher, LocaleContext, OrderRepository, TaxonRepository};
use crate::Result;

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&self, order: Order) {
        self.orders
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(order.id().clone(), order);
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find(&self, id: &OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().unwrap_or_else(|e| e.into_inner()).get(id).cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTaxonRepository {
    taxons: RwLock<Vec<Taxon>>,
}

impl InMemoryTaxonRepository {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&self, taxon: Taxon) {
        self.taxons.write().unwrap_or_else(|e| e.into_inner()).push(taxon);
    }
}

#[async_trait]
impl TaxonRepository for InMemoryTaxonRepository {
    async fn find_one_by_slug(&self, slug: &str, locale: &LocaleCode) -> Result<Option<Taxon>> {
        let taxons = self.taxons.read().unwrap_or_else(|e| e.into_inner());
        Ok(taxons.iter().find(|t| t.has_slug(slug, locale)).cloned())
    }
}

/// Always answers with the same locale.
#[derive(Debug, Clone)]
pub struct FixedLocaleContext(LocaleCode);

impl FixedLocaleContext {
    pub fn new(locale: LocaleCode) -> Self { Self(locale) }
}

impl LocaleContext for FixedLocaleContext {
    fn locale_code(&self) -> LocaleCode { self.0.clone() }
}

/// Keeps every dispatched event so tests can inspect them.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    events: Mutex<Vec<ConversionEventRaised>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self { Self::default() }

    pub fn events(&self) -> Vec<ConversionEventRaised> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize { self.events.lock().unwrap_or_else(|e| e.into_inner()).len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

#[async_trait]
impl EventDispatcher for RecordingDispatcher {
    async fn dispatch(&self, event: ConversionEventRaised) -> Result<()> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).push(event);
        Ok(())
    }
}

/// Writes events to the log instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingDispatcher;

#[async_trait]
impl EventDispatcher for LoggingDispatcher {
    async fn dispatch(&self, event: ConversionEventRaised) -> Result<()> {
        let payload = serde_json::to_string(&event.event)?;
        tracing::info!(event_name = event.event_name(), event_id = %event.event_id, %payload, "conversion event not delivered (no NATS configured)");
        Ok(())
    }
}
