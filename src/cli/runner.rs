//! CLI runner - executes commands

use crate::adapter::{fetch_source, test_source};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::load_config;
use crate::curl::translate;
use crate::discovery::{discover_fields, structure_of};
use crate::error::{Error, Result};
use crate::refresh::poll_period;
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Translate { curl } => self.translate(curl),
            Commands::Fields { input } => self.fields(input),
            Commands::Validate { source } => self.validate(source),
            Commands::Test { source } => self.test(source).await,
            Commands::Fetch { source } => self.fetch(source).await,
        }
    }

    fn translate(&self, curl: &str) -> Result<()> {
        let request = translate(curl)?;
        self.emit(&json!({
            "method": "GET",
            "url": request.url,
            "headers": request.headers,
        }))
    }

    fn fields(&self, input: &Path) -> Result<()> {
        let content = fs::read_to_string(input).map_err(|e| {
            Error::config(format!("Failed to read payload '{}': {e}", input.display()))
        })?;
        let payload: Value = serde_json::from_str(&content)?;

        self.emit(&json!({
            "fields": discover_fields(&payload),
            "structure": structure_of(&payload),
        }))
    }

    fn validate(&self, source: &Path) -> Result<()> {
        let config = load_config(source)?;
        let (interval, unit) = config.refresh();

        self.emit(&json!({
            "valid": true,
            "type": config.source_type(),
            "pollPeriodMs": poll_period(interval, unit.as_str())
                .map(|period| period.as_millis() as u64),
        }))
    }

    async fn test(&self, source: &Path) -> Result<()> {
        let config = load_config(source)?;
        let result = test_source(&config).await?;
        self.emit(&result)
    }

    async fn fetch(&self, source: &Path) -> Result<()> {
        let config = load_config(source)?;
        // fetch never fails; errors ride inside the envelope
        let result = fetch_source(&config).await;
        self.emit(&result)
    }

    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{rendered}");
        Ok(())
    }
}
