//! Delivery of conversion events over NATS.
//!
//! Each event is published as JSON to `<subject>.<event name>`, together with
//! the ids of the pixels it should be reported to.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::ConversionEventRaised;
use crate::pixels::enabled_pixel_ids;
use crate::ports::{EventDispatcher, PixelProvider};
use crate::{Result, TrackingError};

#[derive(Debug, Serialize)]
pub struct OutboundMessage<'a> {
    pub event_name: &'static str,
    pub pixel_ids: Vec<String>,
    #[serde(flatten)]
    pub event: &'a ConversionEventRaised,
}

/// Publish side of a NATS connection.
#[async_trait]
pub trait NatsPublisher: Send + Sync {
    async fn publish(&self, subject: String, payload: Vec<u8>) -> Result<()>;
}

pub struct NatsClientPublisher {
    client: async_nats::Client,
}

impl NatsClientPublisher {
    pub fn new(client: async_nats::Client) -> Self { Self { client } }
}

#[async_trait]
impl NatsPublisher for NatsClientPublisher {
    async fn publish(&self, subject: String, payload: Vec<u8>) -> Result<()> {
        self.client
            .publish(subject, payload.into())
            .await
            .map_err(|e| TrackingError::Dispatch(e.to_string()))
    }
}

pub struct NatsDispatcher {
    publisher: Arc<dyn NatsPublisher>,
    pixels: Arc<dyn PixelProvider>,
    subject: String,
}

impl NatsDispatcher {
    pub fn new(publisher: Arc<dyn NatsPublisher>, pixels: Arc<dyn PixelProvider>, subject: impl Into<String>) -> Self {
        Self { publisher, pixels, subject: subject.into() }
    }

    pub fn subject_for(&self, event: &ConversionEventRaised) -> String {
        format!("{}.{}", self.subject, event.event_name())
    }
}

#[async_trait]
impl EventDispatcher for NatsDispatcher {
    async fn dispatch(&self, event: ConversionEventRaised) -> Result<()> {
        let pixel_ids = enabled_pixel_ids(self.pixels.as_ref()).await?;
        let message = OutboundMessage { event_name: event.event_name(), pixel_ids, event: &event };
        let payload = serde_json::to_vec(&message)?;
        let subject = self.subject_for(&event);
        tracing::debug!(%subject, event_id = %event.event_id, bytes = payload.len(), "publishing conversion event");
        self.publisher.publish(subject, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ProductViewed};
    use crate::pixels::StaticPixelProvider;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingPublisher {
        published: Mutex<Vec<(String, Vec<u8>)>>,
    }

    #[async_trait]
    impl NatsPublisher for CapturingPublisher {
        async fn publish(&self, subject: String, payload: Vec<u8>) -> Result<()> {
            self.published.lock().unwrap_or_else(|e| e.into_inner()).push((subject, payload));
            Ok(())
        }
    }

    #[tokio::test]
    async fn publishes_event_with_pixels() {
        let publisher = Arc::new(CapturingPublisher::default());
        let dispatcher = NatsDispatcher::new(publisher.clone(), Arc::new(StaticPixelProvider::from_ids(["123"])), "conversions.events");
        let event = ConversionEventRaised::new(ProductViewed { product: Product::new("7", "Mug") });
        let event_id = event.event_id;
        dispatcher.dispatch(event).await.unwrap();

        let published = publisher.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, "conversions.events.ViewContent");
        let body: serde_json::Value = serde_json::from_slice(&published[0].1).unwrap();
        assert_eq!(body["pixel_ids"][0], "123");
        assert_eq!(body["event_id"], event_id.to_string());
        assert_eq!(body["event"]["type"], "product_viewed");
    }
}
