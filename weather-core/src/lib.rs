//! Core library for the `weather` console.
//!
//! This crate defines:
//! - In-memory stores for locations and weather variables
//! - Mock forecast and historical data providers
//! - CSV/JSON export and the local cache with its offline flag
//! - Configuration handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod provider;
pub mod storage;
pub mod store;

pub use config::{Config, ProviderSettings, StorageConfig};
pub use error::CoreError;
pub use export::ExportFormat;
pub use model::{DataRequest, DateRange, Location, WeatherVariable};
pub use provider::{DataProvider, ProviderId};
pub use storage::CloudStorage;
pub use store::{LocationStore, VariableStore};
