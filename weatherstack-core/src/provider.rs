use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, LocationQuery, error::FetchError};

pub mod weatherstack;

pub use weatherstack::WeatherstackProvider;

/// Source of raw "current conditions" payloads.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Perform one request and return the complete response body.
    async fn fetch_current(&self, query: &LocationQuery) -> Result<Vec<u8>, FetchError>;
}

/// Construct the weatherstack provider from config.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, FetchError> {
    let provider = WeatherstackProvider::new(config.clone())?;
    Ok(Box::new(provider))
}
