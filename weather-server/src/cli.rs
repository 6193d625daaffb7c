use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use weather_core::{Config, Coordinates, ProviderKind, WeatherService};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather proxy server")]
pub struct Cli {
    /// Path to the config file; defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// Listen address, overriding `server.bind`.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Interactively write provider credentials to the config file.
    Configure,

    /// Fetch weather once and print the JSON document.
    Show {
        /// City name.
        #[arg(long, conflicts_with_all = ["lat", "lon"], required_unless_present_all = ["lat", "lon"])]
        city: Option<String>,

        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match self.command {
            Command::Serve { bind } => {
                let config = Config::load_from(&path)?.with_env_overrides();
                serve(&config, bind).await
            }
            Command::Configure => configure(&path),
            Command::Show { city, lat, lon } => {
                let config = Config::load_from(&path)?.with_env_overrides();
                show(&config, city, lat.zip(lon)).await
            }
        }
    }
}

async fn serve(config: &Config, bind: Option<String>) -> anyhow::Result<()> {
    let service = Arc::new(WeatherService::from_config(config)?);
    let app = weather_server::router(service);

    let addr = bind.unwrap_or_else(|| config.server.bind.clone());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

fn configure(path: &std::path::Path) -> anyhow::Result<()> {
    let mut config = Config::load_from(path)?;

    let kind = Select::new("Provider endpoint layout:", ProviderKind::all().to_vec())
        .with_help_message("onecall: One Call 3.0 subscription; split: free current + 5-day forecast")
        .prompt()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let bind = Text::new("Listen address:")
        .with_default(&config.server.bind)
        .prompt()?;

    config.set_provider_kind(kind);
    config.set_api_key(api_key.trim().to_string());
    config.server.bind = bind;
    config.save_to(path)?;

    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn show(
    config: &Config,
    city: Option<String>,
    point: Option<(f64, f64)>,
) -> anyhow::Result<()> {
    let service = WeatherService::from_config(config)?;

    let weather = match (city, point) {
        (Some(city), _) => service.by_city(&city).await?,
        (None, Some((lat, lon))) => {
            let coords = Coordinates::new(lat, lon).ok_or_else(|| {
                anyhow::anyhow!("Coordinates out of range: lat must be in [-90, 90], lon in [-180, 180]")
            })?;
            service.by_coordinates(coords).await?
        }
        (None, None) => anyhow::bail!("Either --city or both --lat and --lon are required"),
    };

    println!("{}", serde_json::to_string_pretty(&weather)?);
    Ok(())
}
