//! Aggregates module
pub mod product;
pub mod order;
pub mod taxon;

pub use product::Product;
pub use order::{Order, OrderId, LineItem};
pub use taxon::{Taxon, TaxonTranslation};
