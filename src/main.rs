//! OpenSASE Conversions - storefront event relay

use anyhow::Result;
use opensase_conversions::config::AppConfig;
use opensase_conversions::http::{router, AppState};
use opensase_conversions::infra::{FixedLocaleContext, LoggingDispatcher, NatsClientPublisher, NatsDispatcher, PgOrderRepository, PgPixelProvider, PgTaxonRepository};
use opensase_conversions::ports::{EventDispatcher, PixelProvider};
use opensase_conversions::wiring::{pixel_registry, Collaborators, TrackingSubscribers};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();
    let config = AppConfig::from_env()?;
    let db = PgPoolOptions::new().max_connections(config.db_max_connections).connect(&config.database_url).await?;

    let store_pixels = config.pixels_from_store.then(|| Arc::new(PgPixelProvider::new(db.clone())) as Arc<dyn PixelProvider>);
    let pixels = pixel_registry(&config.pixel_ids, store_pixels);
    tracing::info!(provider = pixels.default_name(), "pixel provider selected");

    let dispatcher: Arc<dyn EventDispatcher> = match config.nats_url.as_deref() {
        Some(url) => {
            let client = async_nats::connect(url).await?;
            Arc::new(NatsDispatcher::new(Arc::new(NatsClientPublisher::new(client)), pixels.default_provider(), config.nats_subject.clone()))
        }
        None => {
            tracing::warn!("NATS_URL not set, conversion events will only be logged");
            Arc::new(LoggingDispatcher)
        }
    };

    let subscribers = TrackingSubscribers::new(Collaborators {
        orders: Arc::new(PgOrderRepository::new(db.clone())),
        taxons: Arc::new(PgTaxonRepository::new(db)),
        locale: Arc::new(FixedLocaleContext::new(config.locale())),
        dispatcher,
    });
    let app = router(AppState { subscribers: Arc::new(subscribers) });

    tracing::info!(events = ?TrackingSubscribers::subscribed_events(), "OpenSASE conversions relay listening on 0.0.0.0:{}", config.port);
    axum::serve(tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?, app).await?;
    Ok(())
}
