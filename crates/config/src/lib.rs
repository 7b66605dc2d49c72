//! Configuration management for evlog
//!
//! The configuration lives at `$HOME/.evlog/config.toml` and supplies defaults for every flag
//! the `logs` command leaves unset: the node endpoint, the contract address, and the block range.

/// Error types for the configuration module
pub mod error;

use crate::error::Error;
use clap::Parser;
use evlog_common::{
    constants::{DEFAULT_CONTRACT_ADDRESS, DEFAULT_FROM_BLOCK, DEFAULT_TO_BLOCK},
    utils::io::file::{read_file, write_file},
};
use serde::{Deserialize, Serialize};
#[allow(deprecated)]
use std::env::home_dir;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Command line arguments for the configuration command
#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Display and edit the current configuration",
    override_usage = "evlog config [OPTIONS]"
)]
pub struct ConfigArgs {
    /// The target key to update.
    #[clap(required = false, default_value = "")]
    key: String,

    /// The value to set the key to.
    #[clap(required = false, default_value = "")]
    value: String,
}

/// The [`Configuration`] struct represents the configuration of the CLI. The `logs` command
/// falls back to these values for every option the user does not pass explicitly.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// The URL for the Ethereum RPC endpoint
    pub rpc_url: String,

    /// The contract whose logs are queried
    pub contract_address: String,

    /// First block of the queried range, inclusive
    pub from_block: u64,

    /// Last block of the queried range, inclusive
    pub to_block: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            rpc_url: "".to_string(),
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            from_block: DEFAULT_FROM_BLOCK,
            to_block: DEFAULT_TO_BLOCK,
        }
    }
}

/// Returns `$HOME/.evlog/config.toml`.
#[allow(deprecated)]
pub fn default_config_path() -> Result<PathBuf, Error> {
    let mut home = home_dir().ok_or_else(|| {
        Error::Generic(
            "failed to get home directory. does your os support `std::env::home_dir()`?"
                .to_string(),
        )
    })?;
    home.push(".evlog");
    home.push("config.toml");
    Ok(home)
}

fn path_str(path: &Path) -> Result<&str, Error> {
    path.to_str().ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))
}

impl Configuration {
    /// Returns the current configuration.
    pub fn load() -> Result<Self, Error> {
        let mut config = Self::load_from(&default_config_path()?)?;

        // load mesc config if enabled
        if !mesc::is_mesc_enabled() {
            return Ok(config);
        }

        if let Some(endpoint) = mesc::get_default_endpoint(Some("evlog"))? {
            debug!("overriding rpc_url with mesc endpoint");
            config.rpc_url = endpoint.url;
        }

        Ok(config)
    }

    /// Reads the configuration stored at `path`, creating it with default values when the file
    /// does not exist yet.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            let config = Configuration::default();
            config.save_to(path)?;
        }

        let contents = read_file(path_str(path)?)
            .map_err(|e| Error::Generic(format!("failed to read config file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| Error::ParseError(format!("failed to parse config file: {e}")))
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> Result<(), Error> {
        self.save_to(&default_config_path()?)
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        write_file(
            path_str(path)?,
            &toml::to_string(&self)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?,
        )
        .map_err(|e| Error::Generic(format!("failed to write config file: {e}")))
    }

    /// Update a single key/value pair in memory. Values are type-checked against the key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let parse_block = |value: &str| {
            value.parse::<u64>().map_err(|_| {
                Error::ParseError(format!("invalid value: '{value}' is not a block number."))
            })
        };

        match key {
            "rpc_url" => {
                self.rpc_url = value.to_string();
            }
            "contract_address" => {
                self.contract_address = value.to_string();
            }
            "from_block" => {
                self.from_block = parse_block(value)?;
            }
            "to_block" => {
                self.to_block = parse_block(value)?;
            }
            _ => {
                return Err(Error::Generic(format!(
                    "invalid key: \'{key}\' is not a valid configuration key."
                )))
            }
        }

        Ok(())
    }

    /// Update a single key/value pair in the configuration and write it to disk.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.set(key, value)?;
        self.save()
    }
}

/// The `config` command is used to display and edit the current configuration.
pub fn config(args: ConfigArgs) -> Result<(), Error> {
    if !args.key.is_empty() {
        if !args.value.is_empty() {
            let mut config = Configuration::load()?;
            config.update(&args.key, &args.value)?;
            info!("updated configuration! Set \'{}\' = \'{}\' .", &args.key, &args.value);
        } else {
            error!("found key but no value to set. Please specify a value to set, use `evlog config --help` for more information.");
        }
    } else {
        println!("{:#?}", Configuration::load()?);
        info!("use `evlog config <KEY> <VALUE>` to set a key/value pair.");
    }

    Ok(())
}

/// Parse user input --rpc-url into a full url
pub fn parse_url_arg(url: &str) -> Result<String, String> {
    if mesc::is_mesc_enabled() {
        if let Ok(Some(endpoint)) = mesc::get_endpoint_by_query(url, Some("evlog")) {
            return Ok(endpoint.url);
        }
    }
    Ok(url.to_string())
}
