//! Pixel providers and the choice of the default one.
//!
//! A provider configured from the environment is always registered. When a
//! store-backed provider is registered as well, the default alias is moved to
//! it so pixels managed in the store take precedence.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::ports::{Pixel, PixelProvider};
use crate::Result;

pub const CONFIGURED_PROVIDER: &str = "configured";
pub const STORE_PROVIDER: &str = "store";

/// Pixels fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticPixelProvider {
    pixels: Vec<Pixel>,
}

impl StaticPixelProvider {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pixels = ids.into_iter().map(|id| Pixel { pixel_id: id.into(), enabled: true }).collect();
        Self { pixels }
    }
}

#[async_trait]
impl PixelProvider for StaticPixelProvider {
    async fn pixels(&self) -> Result<Vec<Pixel>> { Ok(self.pixels.clone()) }
}

pub struct PixelProviderRegistry {
    providers: HashMap<String, Arc<dyn PixelProvider>>,
    default: String,
}

impl PixelProviderRegistry {
    pub fn new(configured: Arc<dyn PixelProvider>) -> Self {
        let mut providers = HashMap::new();
        providers.insert(CONFIGURED_PROVIDER.to_string(), configured);
        Self { providers, default: CONFIGURED_PROVIDER.to_string() }
    }

    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn PixelProvider>) {
        self.providers.insert(name.into(), provider);
    }

    pub fn has(&self, name: &str) -> bool { self.providers.contains_key(name) }

    /// Aliases the default to the store-backed provider if one is registered.
    pub fn prefer_store_provider(&mut self) {
        if self.has(STORE_PROVIDER) {
            self.default = STORE_PROVIDER.to_string();
        }
    }

    pub fn default_name(&self) -> &str { &self.default }

    pub fn default_provider(&self) -> Arc<dyn PixelProvider> {
        match self.providers.get(&self.default) {
            Some(provider) => provider.clone(),
            None => Arc::new(StaticPixelProvider::default()),
        }
    }
}

/// Ids of the enabled pixels of `provider`.
pub async fn enabled_pixel_ids(provider: &dyn PixelProvider) -> Result<Vec<String>> {
    Ok(provider.pixels().await?.into_iter().filter(|p| p.enabled).map(|p| p.pixel_id).collect())
}
