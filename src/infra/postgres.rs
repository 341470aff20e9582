//! Postgres-backed lookups against the shop's tables.
//!
//! Amounts are stored as integer minor units.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{LineItem, LocaleCode, Money, Order, OrderId, ProductCode, Taxon};
use crate::ports::{OrderRepository, Pixel, PixelProvider, TaxonRepository};
use crate::Result;

#[derive(Debug, sqlx::FromRow)]
struct OrderRow { id: i64, number: Option<String>, currency_code: String, items_total: i64, total: i64 }

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow { product_id: i64, product_code: Option<String>, variant_code: Option<String>, quantity: i32, unit_price: i64, total: i64 }

#[derive(Debug, sqlx::FromRow)]
struct TaxonRow { id: i64, code: String, locale: String, name: String, slug: String }

#[derive(Clone)]
pub struct PgOrderRepository { db: PgPool }

impl PgOrderRepository {
    pub fn new(db: PgPool) -> Self { Self { db } }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find(&self, id: &OrderId) -> Result<Option<Order>> {
        // Ids are numeric in this store; anything else cannot match.
        let Ok(id) = id.as_str().parse::<i64>() else { return Ok(None) };

        let Some(row) = sqlx::query_as::<_, OrderRow>("SELECT id::BIGINT AS id, number, currency_code, items_total::BIGINT AS items_total, total::BIGINT AS total FROM sylius_order WHERE id = $1")
            .bind(id).fetch_optional(&self.db).await? else { return Ok(None) };

        let items = sqlx::query_as::<_, OrderItemRow>(
            "SELECT p.id::BIGINT AS product_id, p.code AS product_code, v.code AS variant_code, i.quantity, i.unit_price::BIGINT AS unit_price, i.total::BIGINT AS total \
             FROM sylius_order_item i \
             JOIN sylius_product_variant v ON v.id = i.variant_id \
             JOIN sylius_product p ON p.id = v.product_id \
             WHERE i.order_id = $1 ORDER BY i.id")
            .bind(id).fetch_all(&self.db).await?;

        Ok(Some(order_from_rows(row, items)))
    }
}

fn order_from_rows(row: OrderRow, items: Vec<OrderItemRow>) -> Order {
    let currency = row.currency_code;
    let mut order = Order::new(OrderId::new(row.id.to_string()), row.number, &currency);
    for item in items {
        order.add_item(LineItem {
            product_id: item.product_id.to_string(),
            product_code: item.product_code.map(ProductCode::new),
            variant_code: item.variant_code,
            quantity: u32::try_from(item.quantity).unwrap_or(0),
            unit_price: Money::from_minor(item.unit_price, &currency),
            total: Money::from_minor(item.total, &currency),
        });
    }
    order.set_adjustments(Money::from_minor(row.total - row.items_total, &currency));
    order
}

#[derive(Clone)]
pub struct PgTaxonRepository { db: PgPool }

impl PgTaxonRepository {
    pub fn new(db: PgPool) -> Self { Self { db } }
}

#[async_trait]
impl TaxonRepository for PgTaxonRepository {
    async fn find_one_by_slug(&self, slug: &str, locale: &LocaleCode) -> Result<Option<Taxon>> {
        let row = sqlx::query_as::<_, TaxonRow>(
            "SELECT t.id::BIGINT AS id, t.code, tt.locale, tt.name, tt.slug \
             FROM sylius_taxon t JOIN sylius_taxon_translation tt ON tt.translatable_id = t.id \
             WHERE tt.slug = $1 AND tt.locale = $2 LIMIT 1")
            .bind(slug).bind(locale.as_str()).fetch_optional(&self.db).await?;
        Ok(row.map(|r| Taxon::new(r.id.to_string(), r.code).with_translation(LocaleCode::new(r.locale), r.name, r.slug)))
    }
}

/// Pixels managed in the store. Registered as [`crate::pixels::STORE_PROVIDER`].
#[derive(Clone)]
pub struct PgPixelProvider { db: PgPool }

impl PgPixelProvider {
    pub fn new(db: PgPool) -> Self { Self { db } }
}

#[async_trait]
impl PixelProvider for PgPixelProvider {
    async fn pixels(&self) -> Result<Vec<Pixel>> {
        let rows: Vec<(String, bool)> = sqlx::query_as("SELECT pixel_id, enabled FROM meta_pixels ORDER BY id")
            .fetch_all(&self.db).await?;
        Ok(rows.into_iter().map(|(pixel_id, enabled)| Pixel { pixel_id, enabled }).collect())
    }
}
