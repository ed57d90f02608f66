use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::Text;
use std::{io, path::PathBuf};
use tracing::{info, warn};
use weather_core::{Config, ProviderId, ProviderSettings};

use crate::shell::{Session, Shell};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather console")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// File used by the local cache (menu only).
    #[arg(long)]
    pub cache_file: Option<PathBuf>,

    /// Start with offline mode enabled (menu only).
    #[arg(long)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive menu (the default).
    Menu,

    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, "forecast" or "historical".
        provider: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            None | Some(Command::Menu) => self.menu().await,
            Some(Command::Configure { ref provider }) => self.configure(provider),
        }
    }

    async fn menu(&self) -> Result<()> {
        let mut config = self.load_config()?;
        if let Some(cache_file) = &self.cache_file {
            config.storage.cache_file = cache_file.clone();
        }
        if self.offline {
            config.storage.offline = true;
        }

        let stdin = io::stdin();
        let mut shell = Shell::new(
            Session::from_config(&config),
            stdin.lock(),
            io::stdout().lock(),
            io::stderr(),
        );
        shell.run().await
    }

    fn configure(&self, provider: &str) -> Result<()> {
        let id = ProviderId::try_from(provider)?;
        let path = self.config_path()?;
        let mut config = Config::load_from(&path)?;
        let current = config.provider_settings(id);

        let api_key = Text::new(&format!("API key for {id}:"))
            .with_initial_value(current.api_key.as_deref().unwrap_or_default())
            .with_help_message("Leave empty to store no key")
            .prompt()
            .context("Failed to read API key")?;

        let base_url = Text::new("Base URL:")
            .with_default(&current.base_url)
            .prompt()
            .context("Failed to read base URL")?;

        let api_key = api_key.trim();
        let action = if config.has_provider(id) { "Updated" } else { "Saved" };
        config.upsert_provider(
            id,
            ProviderSettings {
                api_key: (!api_key.is_empty()).then(|| api_key.to_string()),
                base_url: base_url.trim().to_string(),
            },
        );
        config.save_to(&path)?;

        info!(provider = %id, path = %path.display(), "provider configured");
        println!("{action} {id} settings in {}", path.display());
        Ok(())
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_file_path(),
        }
    }

    /// The menu still works without a platform config dir; it just uses defaults.
    fn load_config(&self) -> Result<Config> {
        match self.config_path() {
            Ok(path) => Config::load_from(&path),
            Err(err) => {
                warn!("{err:#}; using default settings");
                Ok(Config::default())
            }
        }
    }
}
