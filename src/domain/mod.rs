//! Domain model: catalog and order views plus the conversion events raised from them.
pub mod aggregates;
pub mod events;
pub mod value_objects;

pub use aggregates::{LineItem, Order, OrderId, Product, Taxon, TaxonTranslation};
pub use events::{CategoryViewed, ConversionEvent, ConversionEventRaised, OrderPlaced, ProductViewed};
pub use value_objects::{LocaleCode, Money, ProductCode};
