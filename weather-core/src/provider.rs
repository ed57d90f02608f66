use crate::{
    Config, DataRequest,
    config::ProviderSettings,
    provider::{forecast::MockForecastProvider, historical::MockHistoricalProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, io::Write};

pub mod forecast;
pub mod historical;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Forecast,
    Historical,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Forecast => "forecast",
            ProviderId::Historical => "historical",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Forecast, ProviderId::Historical]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "forecast" => Ok(ProviderId::Forecast),
            "historical" => Ok(ProviderId::Historical),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: forecast, historical."
            )),
        }
    }
}

/// A source of weather data. The bundled providers are mocks that return
/// placeholder text without any network traffic.
#[async_trait]
pub trait DataProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    async fn fetch(&self, request: &DataRequest) -> anyhow::Result<String>;
}

/// Response handling shared by every provider: print the text on its own line.
pub fn handle_response<W: Write>(out: &mut W, response: &str) -> std::io::Result<()> {
    writeln!(out, "{response}")
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(id: ProviderId, config: &Config) -> Box<dyn DataProvider> {
    let settings: ProviderSettings = config.provider_settings(id);

    match id {
        ProviderId::Forecast => Box::new(MockForecastProvider::new(settings)),
        ProviderId::Historical => Box::new(MockHistoricalProvider::new(settings)),
    }
}
