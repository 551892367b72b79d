use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use std::{net::SocketAddr, sync::Arc};

use weathery_core::{Config, Coordinate, Forecaster};

use crate::{dashboard, text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathery", version, about = "Current and forecast weather by US ZIP code")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively edit the user agent, default location and bind address.
    Configure,

    /// Print the 7-day and hourly tables for a ZIP code.
    Show {
        /// US ZIP code; the configured default location when omitted.
        zip: Option<String>,
    },

    /// Serve the browser dashboard.
    Serve {
        /// Address to listen on, e.g. "127.0.0.1:8501".
        #[arg(long)]
        bind: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(&mut config)?,
            Command::Show { zip } => {
                let forecaster = Forecaster::from_config(&config)?;
                let input = zip.unwrap_or_default();
                print!("{}", text::render(&forecaster, &input, chrono::Local::now().date_naive()).await);
            }
            Command::Serve { bind } => {
                let bind = bind.unwrap_or_else(|| config.server.bind.clone());
                let addr: SocketAddr = bind
                    .parse()
                    .with_context(|| format!("Invalid bind address '{bind}'"))?;
                let forecaster = Arc::new(Forecaster::from_config(&config)?);
                dashboard::serve(addr, forecaster).await?;
            }
        }

        Ok(())
    }
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let user_agent = Text::new("User agent sent to weather.gov and Nominatim:")
        .with_default(&config.user_agent)
        .with_help_message("Include a contact address, e.g. \"weathery/0.1 (me@example.com)\"")
        .prompt()?;

    let label = Text::new("Default location label:")
        .with_default(&config.default_location.label)
        .prompt()?;

    let latitude = CustomType::<f64>::new("Default latitude:")
        .with_default(config.default_location.latitude)
        .with_error_message("Please enter a decimal latitude")
        .prompt()?;

    let longitude = CustomType::<f64>::new("Default longitude:")
        .with_default(config.default_location.longitude)
        .with_error_message("Please enter a decimal longitude")
        .prompt()?;

    let bind = CustomType::<SocketAddr>::new("Dashboard bind address:")
        .with_default(config.server.bind.parse().context("Stored bind address is invalid")?)
        .prompt()?;

    config.user_agent = user_agent;
    config.set_default_location(label, Coordinate::new(latitude, longitude));
    config.server.bind = bind.to_string();

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
