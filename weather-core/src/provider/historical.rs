use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{
    config::ProviderSettings,
    error::CoreError,
    model::{DataRequest, DateRange, Location},
};

use super::{DataProvider, ProviderId};

#[derive(Debug, Clone)]
pub struct MockHistoricalProvider {
    settings: ProviderSettings,
}

impl MockHistoricalProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }

    /// Placeholder for a historical request. Dates are echoed as typed.
    pub fn history_for(&self, location: &Location, range: &DateRange) -> String {
        match range.parsed() {
            Some((start, end)) if start > end => {
                warn!(%start, %end, "historical range ends before it starts")
            }
            Some(_) => {}
            None => warn!(
                start = %range.start,
                end = %range.end,
                "historical dates are not in YYYY-MM-DD form"
            ),
        }

        debug!(
            endpoint = %self.settings.endpoint("history"),
            has_api_key = self.settings.api_key.is_some(),
            location = %location.name,
            "mock historical fetch"
        );

        format!(
            "Mock Historical data for {} from {} to {}",
            location.name, range.start, range.end
        )
    }
}

#[async_trait]
impl DataProvider for MockHistoricalProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Historical
    }

    async fn fetch(&self, request: &DataRequest) -> Result<String> {
        match request {
            DataRequest::Historical { location, range } => Ok(self.history_for(location, range)),
            other => Err(CoreError::UnsupportedRequest {
                provider: self.id(),
                request: other.kind(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_embeds_name_and_dates_verbatim() {
        let provider = MockHistoricalProvider::new(ProviderSettings::default());
        let text = provider.history_for(
            &Location::named("Reykjavik"),
            &DateRange::new("2023-02-01", "last tuesday"),
        );

        assert_eq!(
            text,
            "Mock Historical data for Reykjavik from 2023-02-01 to last tuesday"
        );
    }

    #[tokio::test]
    async fn rejects_forecast_requests() {
        let provider = MockHistoricalProvider::new(ProviderSettings::default());
        let err = provider
            .fetch(&DataRequest::Forecast { location: Location::named("Paris") })
            .await
            .unwrap_err();

        let core = err.downcast_ref::<CoreError>().expect("typed core error");
        assert!(matches!(core, CoreError::UnsupportedRequest { request: "forecast", .. }));
    }
}
