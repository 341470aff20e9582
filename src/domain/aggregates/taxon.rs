//! Taxon Aggregate
//!
//! A node of the catalog taxonomy. Slugs and names are translated per locale.

use serde::{Deserialize, Serialize};
use crate::domain::value_objects::LocaleCode;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxon {
    id: String,
    code: String,
    translations: Vec<TaxonTranslation>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonTranslation { pub locale: LocaleCode, pub name: String, pub slug: String }

impl Taxon {
    pub fn new(id: impl Into<String>, code: impl Into<String>) -> Self {
        Self { id: id.into(), code: code.into(), translations: vec![] }
    }

    pub fn with_translation(mut self, locale: LocaleCode, name: impl Into<String>, slug: impl Into<String>) -> Self {
        self.translations.retain(|t| t.locale != locale);
        self.translations.push(TaxonTranslation { locale, name: name.into(), slug: slug.into() });
        self
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn code(&self) -> &str { &self.code }
    pub fn translations(&self) -> &[TaxonTranslation] { &self.translations }

    pub fn translation(&self, locale: &LocaleCode) -> Option<&TaxonTranslation> {
        self.translations.iter().find(|t| &t.locale == locale)
    }

    pub fn slug(&self, locale: &LocaleCode) -> Option<&str> { self.translation(locale).map(|t| t.slug.as_str()) }

    /// True when the taxon's translation for `locale` carries `slug`.
    pub fn has_slug(&self, slug: &str, locale: &LocaleCode) -> bool { self.slug(locale) == Some(slug) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_is_per_locale() {
        let en = LocaleCode::new("en_US");
        let de = LocaleCode::new("de_DE");
        let t = Taxon::new("3", "mugs")
            .with_translation(en.clone(), "Mugs", "category/mugs")
            .with_translation(de.clone(), "Becher", "kategorie/becher");
        assert!(t.has_slug("category/mugs", &en));
        assert!(!t.has_slug("category/mugs", &de));
        assert_eq!(t.slug(&de), Some("kategorie/becher"));
    }

    #[test]
    fn test_translation_replaced_for_same_locale() {
        let en = LocaleCode::new("en_US");
        let t = Taxon::new("3", "mugs")
            .with_translation(en.clone(), "Mugs", "mugs")
            .with_translation(en.clone(), "Cups", "cups");
        assert_eq!(t.translations().len(), 1);
        assert_eq!(t.slug(&en), Some("cups"));
    }
}
