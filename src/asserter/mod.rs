//! Asserter Module
//!
//! The validation engine. An [`Asserter`] is built once per network
//! configuration and then answers "is this request/response well-formed?"
//! for every endpoint of the protocol.
//!
//! # Layout
//! - `primitives`: single-entity checks (identifiers, currency, amount)
//! - `construction`: public keys, signing payloads and signatures
//! - `operations`: operation sequences against the configured types/statuses
//! - `network`: supported-network registry and `/network/*` shapes
//! - `block`: blocks and transactions as returned by a node
//! - `server`: one validator per request type
//! - `client`: one validator per response type
//!
//! Every check is a pure function of its input and the asserter's immutable
//! configuration. Nothing here logs, blocks, or mutates what it inspects, so
//! a single `Arc<Asserter>` can be shared across any number of threads.

mod block;
mod client;
mod construction;
mod error;
mod network;
mod operations;
mod primitives;
mod server;


pub use block::timestamp;
pub use construction::{curve_type, public_key, signature_type, signatures, signing_payload};
pub use error::{AsserterError, ErrorKind};
pub use network::{
    allow, errors, network_list_response, network_options_response, network_status_response,
    operation_statuses, operation_types, supported_networks, version,
};
pub use primitives::{
    account_identifier, amount, block_identifier, coin_change, currencies, currency,
    network_identifier, partial_block_identifier, transaction_identifier,
};

use crate::types::{
    Allow, BlockIdentifier, Error, NetworkIdentifier, NetworkOptionsResponse,
    NetworkStatusResponse, OperationStatus,
};
use std::collections::{HashMap, HashSet};

/// Immutable validation configuration for one or more networks.
///
/// Construct with [`Asserter::new_server`] when the configuration is known
/// up front, or with one of the client constructors when it is derived from
/// a node's `/network/status` and `/network/options` responses. All lookup
/// tables are built in the constructor and never change afterwards.
#[derive(Debug, Clone)]
pub struct Asserter {
    supported_networks: Vec<NetworkIdentifier>,
    historical_balance_lookup: bool,
    mempool_coins: bool,
    operation_types: HashSet<String>,
    /// Status name -> whether it marks a successful operation.
    operation_statuses: HashMap<String, bool>,
    /// Error code -> the error a node is allowed to return under it.
    errors: HashMap<i32, Error>,
    genesis_block: Option<BlockIdentifier>,
    timestamp_start_index: Option<i64>,
}

impl Asserter {
    /// Creates an asserter for a node implementation validating incoming requests.
    ///
    /// # Arguments
    /// * `supported_networks` - Networks the node serves (non-empty, duplicate-free)
    /// * `operation_types` - Operation types the node understands (non-empty)
    /// * `operation_statuses` - Statuses the node reports (non-empty, at least
    ///   one successful)
    /// * `historical_balance_lookup` - Whether `/account/balance` may name a block
    /// * `mempool_coins` - Whether mempool transactions may create or spend coins
    ///
    /// # Returns
    /// The asserter, or the first configuration rule that was violated
    pub fn new_server(
        supported_networks: Vec<NetworkIdentifier>,
        operation_types: Vec<String>,
        operation_statuses: Vec<OperationStatus>,
        historical_balance_lookup: bool,
        mempool_coins: bool,
    ) -> Result<Self, AsserterError> {
        network::supported_networks(&supported_networks)?;
        network::operation_types(&operation_types)?;
        network::operation_statuses(&operation_statuses)?;

        Ok(Self {
            supported_networks,
            historical_balance_lookup,
            mempool_coins,
            operation_types: operation_types.into_iter().collect(),
            operation_statuses: status_map(operation_statuses),
            errors: HashMap::new(),
            genesis_block: None,
            timestamp_start_index: None,
        })
    }

    /// Creates an asserter for a client validating one node's responses.
    ///
    /// `allow` carries everything `/network/options` reports: operation
    /// types and statuses, allowed errors and feature flags.
    pub fn new_client_with_options(
        network: NetworkIdentifier,
        genesis_block: BlockIdentifier,
        allow: &Allow,
    ) -> Result<Self, AsserterError> {
        primitives::network_identifier(Some(&network))?;
        primitives::block_identifier(Some(&genesis_block))?;
        network::allow(Some(allow))?;

        Ok(Self {
            supported_networks: vec![network],
            historical_balance_lookup: allow.historical_balance_lookup,
            mempool_coins: allow.mempool_coins,
            operation_types: allow.operation_types.iter().cloned().collect(),
            operation_statuses: status_map(allow.operation_statuses.clone()),
            errors: allow
                .errors
                .iter()
                .map(|error| (error.code, error.clone()))
                .collect(),
            genesis_block: Some(genesis_block),
            timestamp_start_index: allow.timestamp_start_index,
        })
    }

    /// Creates a client asserter from responses sampled off a live node.
    ///
    /// Both responses are validated before anything is taken from them.
    pub fn new_client_with_responses(
        network: NetworkIdentifier,
        status: &NetworkStatusResponse,
        options: &NetworkOptionsResponse,
    ) -> Result<Self, AsserterError> {
        primitives::network_identifier(Some(&network))?;
        network::network_status_response(Some(status))?;
        network::network_options_response(Some(options))?;

        let genesis_block = status
            .genesis_block_identifier
            .clone()
            .ok_or(AsserterError::BlockIdentifierIsNil)?;
        let allow = options.allow.as_ref().ok_or(AsserterError::AllowIsNil)?;

        Self::new_client_with_options(network, genesis_block, allow)
    }

    pub fn supported_networks(&self) -> &[NetworkIdentifier] {
        &self.supported_networks
    }

    pub fn historical_balance_lookup(&self) -> bool {
        self.historical_balance_lookup
    }

    pub fn mempool_coins(&self) -> bool {
        self.mempool_coins
    }

    /// Allowed operation types, sorted for stable output.
    pub fn operation_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.operation_types.iter().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Whether `status` marks a successful operation. `None` for unknown statuses.
    pub fn operation_status_successful(&self, status: &str) -> Option<bool> {
        self.operation_statuses.get(status).copied()
    }

    pub fn genesis_block(&self) -> Option<&BlockIdentifier> {
        self.genesis_block.as_ref()
    }

    /// Ensures an error returned by a node is one it declared in `/network/options`.
    pub fn error(&self, err: &Error) -> Result<(), AsserterError> {
        network::error(err)?;

        let allowed = self
            .errors
            .get(&err.code)
            .ok_or(AsserterError::ErrorCodeNotAllowed(err.code))?;

        if allowed.message != err.message {
            return Err(AsserterError::ErrorMessageMismatch {
                code: err.code,
                expected: allowed.message.clone(),
                got: err.message.clone(),
            });
        }

        if allowed.retriable != err.retriable {
            return Err(AsserterError::ErrorRetriableMismatch(err.code));
        }

        Ok(())
    }
}

fn status_map(statuses: Vec<OperationStatus>) -> HashMap<String, bool> {
    statuses
        .into_iter()
        .map(|status| (status.status, status.successful))
        .collect()
}
