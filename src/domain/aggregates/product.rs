//! Product Aggregate

use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{Money, ProductCode};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: String,
    #[serde(default)]
    code: Option<ProductCode>,
    name: String,
    #[serde(default)]
    price: Option<Money>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), code: None, name: name.into(), price: None }
    }

    pub fn with_code(mut self, code: ProductCode) -> Self { self.code = Some(code); self }
    pub fn with_price(mut self, price: Money) -> Self { self.price = Some(price); self }

    pub fn id(&self) -> &str { &self.id }
    pub fn code(&self) -> Option<&ProductCode> { self.code.as_ref() }
    pub fn name(&self) -> &str { &self.name }
    pub fn price(&self) -> Option<&Money> { self.price.as_ref() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_product_create() {
        let p = Product::new("7", "Test Product")
            .with_code(ProductCode::new("TEST-001"))
            .with_price(Money::new(Decimal::new(1999, 2), "USD"));
        assert_eq!(p.name(), "Test Product");
        assert_eq!(p.code().map(ProductCode::as_str), Some("TEST-001"));
    }

    #[test]
    fn test_product_without_code_deserializes() {
        let p: Product = serde_json::from_str(r#"{"id":"9","name":"Loose"}"#).unwrap();
        assert!(p.code().is_none());
        assert!(p.price().is_none());
    }

    #[test]
    fn test_product_keeps_blank_and_padded_codes() {
        let blank: Product = serde_json::from_str(r#"{"id":"1","code":"","name":"Blank"}"#).unwrap();
        let padded: Product = serde_json::from_str(r#"{"id":"2","code":" p3 ","name":"Padded"}"#).unwrap();
        assert_eq!(blank.code().map(ProductCode::as_str), Some(""));
        assert_eq!(padded.code().map(ProductCode::as_str), Some(" p3 "));
    }
}
