//! Configuration Module
//!
//! This module defines the configuration structures for the validation
//! service. Configuration is loaded from TOML files and parsed using serde.

use crate::asserter::{Asserter, AsserterError};
use crate::types::{NetworkIdentifier, OperationStatus};
use serde::Deserialize;
use std::fs;
use tracing::info;

/// Main configuration structure
///
/// Loaded from a TOML file (e.g., config/default.toml).
///
/// # Example TOML
/// ```toml
/// [api]
/// host = "127.0.0.1"
/// port = 8080
///
/// [asserter]
/// operation_types = ["TRANSFER"]
/// historical_balance_lookup = true
///
/// [[asserter.networks]]
/// blockchain = "Bitcoin"
/// network = "Mainnet"
///
/// [[asserter.operation_statuses]]
/// status = "SUCCESS"
/// successful = true
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub asserter: AsserterConfig,
}

/// API server configuration
///
/// # Fields
/// - `host`: IP address to bind to (e.g., "127.0.0.1" or "0.0.0.0")
/// - `port`: TCP port to listen on
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

/// Static asserter configuration for a node implementation.
///
/// An omitted status list decodes as empty and is then rejected by
/// [`AsserterConfig::build`], like an empty type list.
#[derive(Debug, Clone, Deserialize)]
pub struct AsserterConfig {
    pub networks: Vec<NetworkIdentifier>,
    pub operation_types: Vec<String>,
    #[serde(default)]
    pub operation_statuses: Vec<OperationStatus>,
    #[serde(default)]
    pub historical_balance_lookup: bool,
    #[serde(default)]
    pub mempool_coins: bool,
}

impl AsserterConfig {
    /// Builds the asserter this section describes.
    ///
    /// # Returns
    /// * `Ok(Asserter)` if the networks, types and statuses are valid
    /// * `Err` naming the first rule the configuration breaks
    pub fn build(&self) -> Result<Asserter, AsserterError> {
        let asserter = Asserter::new_server(
            self.networks.clone(),
            self.operation_types.clone(),
            self.operation_statuses.clone(),
            self.historical_balance_lookup,
            self.mempool_coins,
        )?;

        info!(
            "Asserter ready for {} network(s), {} operation type(s)",
            self.networks.len(),
            self.operation_types.len()
        );

        Ok(asserter)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;

        info!("Loaded configuration from {}", path);
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [api]
        host = "127.0.0.1"
        port = 8080

        [asserter]
        operation_types = ["TRANSFER", "FEE"]

        [[asserter.networks]]
        blockchain = "Bitcoin"
        network = "Mainnet"

        [[asserter.operation_statuses]]
        status = "SUCCESS"
        successful = true
    "#;

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::parse(MINIMAL).unwrap();

        assert_eq!(config.api.port, 8080);
        assert_eq!(
            config.asserter.networks,
            vec![NetworkIdentifier::new("Bitcoin", "Mainnet")]
        );
        assert_eq!(
            config.asserter.operation_statuses,
            vec![OperationStatus::new("SUCCESS", true)]
        );
        assert!(!config.asserter.historical_balance_lookup);
        assert!(!config.asserter.mempool_coins);
    }

    #[test]
    fn test_build_asserter_from_config() {
        let config = Config::parse(MINIMAL).unwrap();
        let asserter = config.asserter.build().unwrap();

        assert_eq!(asserter.operation_types(), vec!["FEE", "TRANSFER"]);
        assert!(!asserter.historical_balance_lookup());
    }

    #[test]
    fn test_sub_networks_and_statuses() {
        let config = Config::parse(
            r#"
            [api]
            host = "0.0.0.0"
            port = 9000

            [asserter]
            operation_types = ["TRANSFER"]
            historical_balance_lookup = true

            [[asserter.networks]]
            blockchain = "Ethereum"
            network = "Mainnet"

            [asserter.networks.sub_network_identifier]
            network = "shard-1"

            [[asserter.operation_statuses]]
            status = "SUCCESS"
            successful = true
            "#,
        )
        .unwrap();

        let asserter = config.asserter.build().unwrap();
        assert_eq!(
            asserter.supported_networks(),
            &[NetworkIdentifier::new("Ethereum", "Mainnet").with_sub_network("shard-1")]
        );
        assert_eq!(asserter.operation_status_successful("SUCCESS"), Some(true));
        assert!(asserter.historical_balance_lookup());
    }

    #[test]
    fn test_invalid_asserter_section_fails_to_build() {
        let config = Config::parse(
            r#"
            [api]
            host = "127.0.0.1"
            port = 8080

            [asserter]
            networks = []
            operation_types = ["TRANSFER"]
            "#,
        )
        .unwrap();

        assert_eq!(
            config.asserter.build().unwrap_err(),
            AsserterError::NoSupportedNetworks
        );
    }

    #[test]
    fn test_missing_statuses_fail_to_build() {
        let config = Config::parse(
            r#"
            [api]
            host = "127.0.0.1"
            port = 8080

            [asserter]
            operation_types = ["TRANSFER"]

            [[asserter.networks]]
            blockchain = "Bitcoin"
            network = "Mainnet"
            "#,
        )
        .unwrap();

        assert!(config.asserter.operation_statuses.is_empty());
        assert_eq!(
            config.asserter.build().unwrap_err(),
            AsserterError::NoOperationStatuses
        );
    }

    #[test]
    fn test_default_config_file_builds() {
        let config = Config::load("config/default.toml").unwrap();
        let asserter = config.asserter.build().unwrap();

        assert_eq!(asserter.operation_status_successful("SUCCESS"), Some(true));
        assert_eq!(asserter.operation_status_successful("SKIPPED"), Some(false));
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(Config::parse("[api]\nhost = \"127.0.0.1\"\nport = 8080\n").is_err());
    }
}
