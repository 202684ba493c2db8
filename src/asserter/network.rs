//! Supported-Network Registry
//!
//! Validates the networks an asserter serves and answers membership
//! queries, plus the `/network/*` shapes a client derives its
//! configuration from.
//!
//! Network lists are tiny (usually a single entry), so duplicate detection
//! and membership use a linear scan with full structural equality.

use super::{Asserter, AsserterError, block, primitives};
use crate::types::{
    Allow, Error, NetworkIdentifier, NetworkListResponse, NetworkOptionsResponse,
    NetworkStatusResponse, OperationStatus, Version,
};
use std::collections::HashSet;

/// Ensures the list is non-empty, every entry is well-formed, and no entry
/// repeats an earlier one (sub-network included).
pub fn supported_networks(networks: &[NetworkIdentifier]) -> Result<(), AsserterError> {
    if networks.is_empty() {
        return Err(AsserterError::NoSupportedNetworks);
    }

    for (i, network) in networks.iter().enumerate() {
        primitives::network_identifier(Some(network))?;

        if networks[..i].contains(network) {
            return Err(AsserterError::DuplicateSupportedNetwork(network.clone()));
        }
    }

    Ok(())
}

impl Asserter {
    /// Membership test against the configured networks.
    ///
    /// Call only after `network` has passed [`primitives::network_identifier`];
    /// [`Asserter::valid_supported_network`] does both.
    pub fn supported_network(&self, network: &NetworkIdentifier) -> Result<(), AsserterError> {
        if !self.supported_networks.contains(network) {
            return Err(AsserterError::NetworkNotSupported(network.clone()));
        }

        Ok(())
    }

    /// The two-step network gate every request validator starts with.
    pub fn valid_supported_network(
        &self,
        network: Option<&NetworkIdentifier>,
    ) -> Result<(), AsserterError> {
        primitives::network_identifier(network)?;
        let network = network.ok_or(AsserterError::NetworkIdentifierIsNil)?;
        self.supported_network(network)
    }
}

pub fn operation_types(types: &[String]) -> Result<(), AsserterError> {
    if types.is_empty() {
        return Err(AsserterError::NoOperationTypes);
    }

    let mut seen = HashSet::new();
    for op_type in types {
        if op_type.is_empty() {
            return Err(AsserterError::OperationTypeEmpty);
        }

        if !seen.insert(op_type.as_str()) {
            return Err(AsserterError::DuplicateOperationType(op_type.clone()));
        }
    }

    Ok(())
}

/// Ensures statuses are non-empty, unique, and at least one means success.
pub fn operation_statuses(statuses: &[OperationStatus]) -> Result<(), AsserterError> {
    if statuses.is_empty() {
        return Err(AsserterError::NoOperationStatuses);
    }

    let mut seen = HashSet::new();
    for status in statuses {
        if status.status.is_empty() {
            return Err(AsserterError::OperationStatusEmpty);
        }

        if !seen.insert(status.status.as_str()) {
            return Err(AsserterError::DuplicateOperationStatus(status.status.clone()));
        }
    }

    if !statuses.iter().any(|status| status.successful) {
        return Err(AsserterError::NoSuccessfulOperationStatus);
    }

    Ok(())
}

pub(super) fn error(err: &Error) -> Result<(), AsserterError> {
    if err.code < 0 {
        return Err(AsserterError::ErrorCodeNegative(err.code));
    }

    if err.message.is_empty() {
        return Err(AsserterError::ErrorMessageMissing(err.code));
    }

    Ok(())
}

/// Validates the errors a node declares it may return; codes must be unique.
pub fn errors(errors: &[Error]) -> Result<(), AsserterError> {
    let mut codes = HashSet::new();
    for err in errors {
        error(err)?;

        if !codes.insert(err.code) {
            return Err(AsserterError::DuplicateErrorCode(err.code));
        }
    }

    Ok(())
}

pub fn version(version: Option<&Version>) -> Result<(), AsserterError> {
    let version = version.ok_or(AsserterError::VersionIsNil)?;

    if version.rosetta_version.is_empty() {
        return Err(AsserterError::RosettaVersionMissing);
    }

    if version.node_version.is_empty() {
        return Err(AsserterError::NodeVersionMissing);
    }

    if matches!(&version.middleware_version, Some(middleware) if middleware.is_empty()) {
        return Err(AsserterError::MiddlewareVersionEmpty);
    }

    Ok(())
}

pub fn allow(allow: Option<&Allow>) -> Result<(), AsserterError> {
    let allow = allow.ok_or(AsserterError::AllowIsNil)?;

    operation_statuses(&allow.operation_statuses)?;
    operation_types(&allow.operation_types)?;
    errors(&allow.errors)?;

    if let Some(index) = allow.timestamp_start_index {
        if index < 0 {
            return Err(AsserterError::TimestampStartIndexNegative(index));
        }
    }

    Ok(())
}

/// `/network/list` follows the same rules as a supported-network list.
pub fn network_list_response(
    response: Option<&NetworkListResponse>,
) -> Result<(), AsserterError> {
    let response = response.ok_or(AsserterError::ResponseIsNil("NetworkListResponse"))?;
    supported_networks(&response.network_identifiers)
}

pub fn network_status_response(
    response: Option<&NetworkStatusResponse>,
) -> Result<(), AsserterError> {
    let response = response.ok_or(AsserterError::ResponseIsNil("NetworkStatusResponse"))?;

    primitives::block_identifier(response.current_block_identifier.as_ref())?;
    block::timestamp(response.current_block_timestamp)?;
    primitives::block_identifier(response.genesis_block_identifier.as_ref())?;

    if response.oldest_block_identifier.is_some() {
        primitives::block_identifier(response.oldest_block_identifier.as_ref())?;
    }

    if let Some(sync) = &response.sync_status {
        for index in [sync.current_index, sync.target_index].into_iter().flatten() {
            if index < 0 {
                return Err(AsserterError::SyncStatusIndexNegative(index));
            }
        }
    }

    for peer in &response.peers {
        if peer.peer_id.is_empty() {
            return Err(AsserterError::PeerIdMissing);
        }
    }

    Ok(())
}

pub fn network_options_response(
    response: Option<&NetworkOptionsResponse>,
) -> Result<(), AsserterError> {
    let response = response.ok_or(AsserterError::ResponseIsNil("NetworkOptionsResponse"))?;

    version(response.version.as_ref())?;
    allow(response.allow.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockIdentifier;

    fn bitcoin() -> NetworkIdentifier {
        NetworkIdentifier::new("Bitcoin", "Mainnet")
    }

    #[test]
    fn test_supported_networks_rules() {
        assert!(supported_networks(&[bitcoin()]).is_ok());
        assert!(supported_networks(&[bitcoin(), bitcoin().with_sub_network("shard-1")]).is_ok());
        assert_eq!(supported_networks(&[]), Err(AsserterError::NoSupportedNetworks));
        assert_eq!(
            supported_networks(&[bitcoin(), bitcoin()]),
            Err(AsserterError::DuplicateSupportedNetwork(bitcoin()))
        );
        assert_eq!(
            supported_networks(&[bitcoin(), NetworkIdentifier::new("Bitcoin", "")]),
            Err(AsserterError::NetworkIdentifierNetworkMissing)
        );
    }

    #[test]
    fn test_duplicate_sub_networks_are_detected() {
        let shard = bitcoin().with_sub_network("shard-1");
        assert_eq!(
            supported_networks(&[bitcoin(), shard.clone(), shard.clone()]),
            Err(AsserterError::DuplicateSupportedNetwork(shard))
        );
    }

    #[test]
    fn test_operation_statuses_need_a_success() {
        assert_eq!(operation_statuses(&[]), Err(AsserterError::NoOperationStatuses));
        assert_eq!(
            operation_statuses(&[OperationStatus::new("FAILURE", false)]),
            Err(AsserterError::NoSuccessfulOperationStatus)
        );
        assert_eq!(
            operation_statuses(&[
                OperationStatus::new("SUCCESS", true),
                OperationStatus::new("SUCCESS", false),
            ]),
            Err(AsserterError::DuplicateOperationStatus("SUCCESS".to_string()))
        );
    }

    #[test]
    fn test_operation_types_rules() {
        assert_eq!(operation_types(&[]), Err(AsserterError::NoOperationTypes));
        assert_eq!(
            operation_types(&["TRANSFER".to_string(), "TRANSFER".to_string()]),
            Err(AsserterError::DuplicateOperationType("TRANSFER".to_string()))
        );
        assert_eq!(
            operation_types(&[String::new()]),
            Err(AsserterError::OperationTypeEmpty)
        );
    }

    #[test]
    fn test_errors_need_unique_codes() {
        let err = |code: i32, message: &str| Error {
            code,
            message: message.to_string(),
            ..Default::default()
        };

        assert!(errors(&[err(1, "a"), err(2, "b")]).is_ok());
        assert_eq!(errors(&[err(1, "a"), err(1, "b")]), Err(AsserterError::DuplicateErrorCode(1)));
        assert_eq!(errors(&[err(-1, "a")]), Err(AsserterError::ErrorCodeNegative(-1)));
        assert_eq!(errors(&[err(3, "")]), Err(AsserterError::ErrorMessageMissing(3)));
    }

    #[test]
    fn test_network_status_response_rules() {
        let mut status = NetworkStatusResponse {
            current_block_identifier: Some(BlockIdentifier::new(100, "current")),
            current_block_timestamp: 1_600_000_000_000,
            genesis_block_identifier: Some(BlockIdentifier::new(0, "genesis")),
            ..Default::default()
        };
        assert!(network_status_response(Some(&status)).is_ok());

        status.current_block_timestamp = 1_000;
        assert_eq!(
            network_status_response(Some(&status)),
            Err(AsserterError::TimestampBeforeMin(1_000))
        );

        status.current_block_timestamp = 1_600_000_000_000;
        status.genesis_block_identifier = None;
        assert_eq!(
            network_status_response(Some(&status)),
            Err(AsserterError::BlockIdentifierIsNil)
        );
    }

    #[test]
    fn test_version_rules() {
        let mut v = Version {
            rosetta_version: "1.4.0".to_string(),
            node_version: "0.21.0".to_string(),
            ..Default::default()
        };
        assert!(version(Some(&v)).is_ok());

        v.middleware_version = Some(String::new());
        assert_eq!(version(Some(&v)), Err(AsserterError::MiddlewareVersionEmpty));

        assert_eq!(version(None), Err(AsserterError::VersionIsNil));
    }
}
