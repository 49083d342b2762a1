use crate::{Config, WeatherSnapshot, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// Source of current weather conditions for a free-text location.
///
/// Any error is a failed lookup; callers do not distinguish causes.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, location: &str) -> anyhow::Result<WeatherSnapshot>;
}

/// Construct the WeatherAPI.com provider from config.
///
/// A missing key is not an error here: the request goes out with an empty
/// credential and the provider rejects it like any other failed lookup.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let api_key = config.api_key().unwrap_or_default();
    let provider = match config.endpoint.as_deref() {
        Some(endpoint) => WeatherApiProvider::with_endpoint(api_key, endpoint),
        None => WeatherApiProvider::new(api_key),
    };

    Box::new(provider)
}
