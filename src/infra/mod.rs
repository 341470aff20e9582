//! Collaborator implementations: in-memory, Postgres and NATS.
pub mod memory;
pub mod nats;
pub mod postgres;

pub use memory::{FixedLocaleContext, InMemoryOrderRepository, InMemoryTaxonRepository, LoggingDispatcher, RecordingDispatcher};
pub use nats::{NatsClientPublisher, NatsDispatcher, NatsPublisher};
pub use postgres::{PgOrderRepository, PgPixelProvider, PgTaxonRepository};
