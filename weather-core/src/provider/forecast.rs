use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::{
    config::ProviderSettings,
    error::CoreError,
    model::{DataRequest, Location},
};

use super::{DataProvider, ProviderId};

#[derive(Debug, Clone)]
pub struct MockForecastProvider {
    settings: ProviderSettings,
}

impl MockForecastProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }

    /// The placeholder a forecast request for `location` resolves to.
    pub fn forecast_for(&self, location: &Location) -> String {
        debug!(
            endpoint = %self.settings.endpoint("forecast"),
            has_api_key = self.settings.api_key.is_some(),
            location = %location.name,
            "mock forecast fetch"
        );
        format!("Mock Forecast data for {}", location.name)
    }
}

#[async_trait]
impl DataProvider for MockForecastProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Forecast
    }

    async fn fetch(&self, request: &DataRequest) -> Result<String> {
        match request {
            DataRequest::Forecast { location } => Ok(self.forecast_for(location)),
            other => Err(CoreError::UnsupportedRequest {
                provider: self.id(),
                request: other.kind(),
            }
            .into()),
        }
    }
}
