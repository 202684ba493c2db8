//! Asserter Errors
//!
//! One variant per rule the asserter enforces, grouped into a small set of
//! [`ErrorKind`]s that callers map onto transport responses.

use crate::types::NetworkIdentifier;
use serde::Serialize;
use thiserror::Error;

/// Coarse classification of an [`AsserterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// No asserter was available; a caller bug, never fixed by retrying.
    UninitializedAsserter,
    /// The request, or a required object inside it, is absent.
    MalformedRequest,
    /// A response, or a required object inside it, is absent or inconsistent.
    MalformedResponse,
    /// An identifier, currency, amount or key fails its shape rule.
    InvalidIdentifier,
    /// The network is well-formed but not served by this asserter.
    UnsupportedNetwork,
    /// The request needs a capability the asserter was built without.
    UnsupportedFeature,
    InvalidOperation,
    InvalidSignature,
    /// The asserter's own configuration is unusable.
    InvalidConfiguration,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsserterError {
    #[error("asserter is not initialized")]
    AsserterNotInitialized,

    // Requests
    #[error("{0} is nil")]
    RequestIsNil(&'static str),
    #[error("{0} is nil")]
    ResponseIsNil(&'static str),
    #[error("unable to decode {name}: {reason}")]
    Decode { name: &'static str, reason: String },
    #[error("ConstructionMetadataRequest.options is nil")]
    ConstructionMetadataOptionsIsNil,
    #[error("signed transaction cannot be empty")]
    SignedTransactionEmpty,
    #[error("unsigned transaction cannot be empty")]
    UnsignedTransactionEmpty,
    #[error("transaction cannot be empty")]
    TransactionEmpty,
    #[error("operations cannot be empty for construction")]
    NoOperationsForConstruction,

    // Network identifiers
    #[error("NetworkIdentifier is nil")]
    NetworkIdentifierIsNil,
    #[error("NetworkIdentifier.blockchain is missing")]
    NetworkIdentifierBlockchainMissing,
    #[error("NetworkIdentifier.network is missing")]
    NetworkIdentifierNetworkMissing,
    #[error("NetworkIdentifier.sub_network_identifier.network is missing")]
    SubNetworkIdentifierInvalid,

    // Account identifiers
    #[error("AccountIdentifier is nil")]
    AccountIdentifierIsNil,
    #[error("AccountIdentifier.address is missing")]
    AccountIdentifierAddressMissing,
    #[error("AccountIdentifier.sub_account.address is missing")]
    SubAccountIdentifierAddressMissing,

    // Block and transaction identifiers
    #[error("BlockIdentifier is nil")]
    BlockIdentifierIsNil,
    #[error("BlockIdentifier.hash is missing")]
    BlockIdentifierHashMissing,
    #[error("BlockIdentifier.index is negative: {0}")]
    BlockIdentifierIndexNegative(i64),
    #[error("PartialBlockIdentifier is nil")]
    PartialBlockIdentifierIsNil,
    #[error("neither PartialBlockIdentifier.index nor PartialBlockIdentifier.hash is set")]
    PartialBlockIdentifierFieldsNotSet,
    #[error("PartialBlockIdentifier.hash is empty")]
    PartialBlockIdentifierHashEmpty,
    #[error("PartialBlockIdentifier.index is negative: {0}")]
    PartialBlockIdentifierIndexNegative(i64),
    #[error("TransactionIdentifier is nil")]
    TransactionIdentifierIsNil,
    #[error("TransactionIdentifier.hash is missing")]
    TransactionIdentifierHashMissing,

    // Currencies and amounts
    #[error("Currency is nil")]
    CurrencyIsNil,
    #[error("Currency.symbol is empty")]
    CurrencySymbolEmpty,
    #[error("Currency.decimals must be non-negative, got {0}")]
    CurrencyDecimalsNegative(i32),
    #[error("currency {0} is duplicated")]
    DuplicateCurrency(String),
    #[error("Amount is nil")]
    AmountIsNil,
    #[error("Amount.value is missing")]
    AmountValueMissing,
    #[error("Amount.value is not an integer: {0}")]
    AmountValueNotInteger(String),

    // Coins
    #[error("CoinChange.coin_identifier is nil")]
    CoinIdentifierIsNil,
    #[error("CoinIdentifier.identifier is missing")]
    CoinIdentifierMissing,
    #[error("coin action {0} is not supported")]
    CoinActionInvalid(String),

    // Keys
    #[error("PublicKey is nil")]
    PublicKeyIsNil,
    #[error("PublicKey.hex_bytes is empty")]
    PublicKeyBytesEmpty,
    #[error("curve type {0} is not supported")]
    CurveTypeNotSupported(String),

    // Networks
    #[error("no supported networks")]
    NoSupportedNetworks,
    #[error("supported network duplicate {0}")]
    DuplicateSupportedNetwork(NetworkIdentifier),
    #[error("network {0} is not supported")]
    NetworkNotSupported(NetworkIdentifier),

    // Features
    #[error("historical balance lookup is not supported")]
    HistoricalBalanceLookupNotSupported,
    #[error("mempool coins are not supported")]
    MempoolCoinsNotSupported,

    // Operations
    #[error("Operation.operation_identifier is nil")]
    OperationIdentifierIsNil,
    #[error("operation index {found} is out of order, expected {expected}")]
    InvalidOperationIndex { expected: i64, found: i64 },
    #[error("operation network index is negative: {0}")]
    OperationNetworkIndexNegative(i64),
    #[error("operation type {0} is not allowed")]
    InvalidOperationType(String),
    #[error("operation status {0} is not allowed")]
    InvalidOperationStatus(String),
    #[error("operation status {0} must be empty for construction")]
    OperationStatusNotEmptyForConstruction(String),
    #[error("related operation {related} must precede operation {index}")]
    RelatedOperationIndexOutOfOrder { index: i64, related: i64 },
    #[error("related operation {0} is duplicated")]
    DuplicateRelatedOperation(i64),

    // Signatures
    #[error("signatures cannot be empty")]
    SignaturesEmpty,
    #[error("signature {0} has empty hex_bytes")]
    SignatureBytesEmpty(usize),
    #[error("signature {0} is a duplicate")]
    DuplicateSignature(usize),
    #[error("signature type {0} is not supported")]
    SignatureTypeNotSupported(String),
    #[error("signature type {signature} does not match payload signature type {payload}")]
    SignatureTypeMismatch { payload: String, signature: String },
    #[error("SigningPayload is nil")]
    SigningPayloadIsNil,
    #[error("SigningPayload.hex_bytes is empty")]
    SigningPayloadBytesEmpty,
    #[error("SigningPayload must carry an address or account identifier")]
    SigningPayloadAddressMissing,

    // Configuration
    #[error("no operation types")]
    NoOperationTypes,
    #[error("operation type cannot be empty")]
    OperationTypeEmpty,
    #[error("operation type {0} is duplicated")]
    DuplicateOperationType(String),
    #[error("no operation statuses")]
    NoOperationStatuses,
    #[error("operation status cannot be empty")]
    OperationStatusEmpty,
    #[error("operation status {0} is duplicated")]
    DuplicateOperationStatus(String),
    #[error("no successful operation status")]
    NoSuccessfulOperationStatus,
    #[error("error code {0} is negative")]
    ErrorCodeNegative(i32),
    #[error("error {0} has an empty message")]
    ErrorMessageMissing(i32),
    #[error("error code {0} is duplicated")]
    DuplicateErrorCode(i32),
    #[error("Version is nil")]
    VersionIsNil,
    #[error("Version.rosetta_version is missing")]
    RosettaVersionMissing,
    #[error("Version.node_version is missing")]
    NodeVersionMissing,
    #[error("Version.middleware_version is empty")]
    MiddlewareVersionEmpty,
    #[error("Allow is nil")]
    AllowIsNil,
    #[error("timestamp start index is negative: {0}")]
    TimestampStartIndexNegative(i64),

    // Responses
    #[error("Block is nil")]
    BlockIsNil,
    #[error("block hash equals parent block hash at index {0}")]
    BlockHashEqualsParentBlockHash(i64),
    #[error("block index {index} does not follow parent index {parent}")]
    BlockIndexNotAfterParent { index: i64, parent: i64 },
    #[error("timestamp {0} is before 01/01/2000")]
    TimestampBeforeMin(i64),
    #[error("timestamp {0} is after 01/01/2040")]
    TimestampAfterMax(i64),
    #[error("Transaction is nil")]
    TransactionIsNil,
    #[error("transaction {0} is duplicated")]
    DuplicateTransaction(String),
    #[error("requested block {requested} but got {returned}")]
    ReturnedBlockMismatch { requested: String, returned: String },
    #[error("ConstructionMetadataResponse.metadata is nil")]
    ConstructionMetadataResponseMetadataIsNil,
    #[error("no payloads")]
    ConstructionPayloadsResponsePayloadsEmpty,
    #[error("signed transaction has no signers")]
    ConstructionParseResponseSignersEmpty,
    #[error("unsigned transaction has signers")]
    ConstructionParseResponseSignersNonEmpty,
    #[error("Peer.peer_id is missing")]
    PeerIdMissing,
    #[error("SyncStatus index is negative: {0}")]
    SyncStatusIndexNegative(i64),
    #[error("error code {0} is not allowed")]
    ErrorCodeNotAllowed(i32),
    #[error("error {code} message does not match: expected {expected}, got {got}")]
    ErrorMessageMismatch { code: i32, expected: String, got: String },
    #[error("error {0} retriable flag does not match")]
    ErrorRetriableMismatch(i32),
}

impl AsserterError {
    pub fn kind(&self) -> ErrorKind {
        use AsserterError::*;

        match self {
            AsserterNotInitialized => ErrorKind::UninitializedAsserter,

            RequestIsNil(_)
            | Decode { .. }
            | ConstructionMetadataOptionsIsNil
            | SignedTransactionEmpty
            | UnsignedTransactionEmpty
            | TransactionEmpty => ErrorKind::MalformedRequest,

            NetworkIdentifierIsNil
            | NetworkIdentifierBlockchainMissing
            | NetworkIdentifierNetworkMissing
            | SubNetworkIdentifierInvalid
            | AccountIdentifierIsNil
            | AccountIdentifierAddressMissing
            | SubAccountIdentifierAddressMissing
            | BlockIdentifierIsNil
            | BlockIdentifierHashMissing
            | BlockIdentifierIndexNegative(_)
            | PartialBlockIdentifierIsNil
            | PartialBlockIdentifierFieldsNotSet
            | PartialBlockIdentifierHashEmpty
            | PartialBlockIdentifierIndexNegative(_)
            | TransactionIdentifierIsNil
            | TransactionIdentifierHashMissing
            | CurrencyIsNil
            | CurrencySymbolEmpty
            | CurrencyDecimalsNegative(_)
            | DuplicateCurrency(_)
            | AmountIsNil
            | AmountValueMissing
            | AmountValueNotInteger(_)
            | CoinIdentifierIsNil
            | CoinIdentifierMissing
            | CoinActionInvalid(_)
            | PublicKeyIsNil
            | PublicKeyBytesEmpty
            | CurveTypeNotSupported(_) => ErrorKind::InvalidIdentifier,

            NetworkNotSupported(_) => ErrorKind::UnsupportedNetwork,

            HistoricalBalanceLookupNotSupported | MempoolCoinsNotSupported => {
                ErrorKind::UnsupportedFeature
            }

            NoOperationsForConstruction
            | OperationIdentifierIsNil
            | InvalidOperationIndex { .. }
            | OperationNetworkIndexNegative(_)
            | InvalidOperationType(_)
            | InvalidOperationStatus(_)
            | OperationStatusNotEmptyForConstruction(_)
            | RelatedOperationIndexOutOfOrder { .. }
            | DuplicateRelatedOperation(_) => ErrorKind::InvalidOperation,

            SignaturesEmpty
            | SignatureBytesEmpty(_)
            | DuplicateSignature(_)
            | SignatureTypeNotSupported(_)
            | SignatureTypeMismatch { .. }
            | SigningPayloadIsNil
            | SigningPayloadBytesEmpty
            | SigningPayloadAddressMissing => ErrorKind::InvalidSignature,

            NoSupportedNetworks
            | DuplicateSupportedNetwork(_)
            | NoOperationTypes
            | OperationTypeEmpty
            | DuplicateOperationType(_)
            | NoOperationStatuses
            | OperationStatusEmpty
            | DuplicateOperationStatus(_)
            | NoSuccessfulOperationStatus
            | ErrorCodeNegative(_)
            | ErrorMessageMissing(_)
            | DuplicateErrorCode(_)
            | VersionIsNil
            | RosettaVersionMissing
            | NodeVersionMissing
            | MiddlewareVersionEmpty
            | AllowIsNil
            | TimestampStartIndexNegative(_) => ErrorKind::InvalidConfiguration,

            ResponseIsNil(_)
            | BlockIsNil
            | BlockHashEqualsParentBlockHash(_)
            | BlockIndexNotAfterParent { .. }
            | TimestampBeforeMin(_)
            | TimestampAfterMax(_)
            | TransactionIsNil
            | DuplicateTransaction(_)
            | ReturnedBlockMismatch { .. }
            | ConstructionMetadataResponseMetadataIsNil
            | ConstructionPayloadsResponsePayloadsEmpty
            | ConstructionParseResponseSignersEmpty
            | ConstructionParseResponseSignersNonEmpty
            | PeerIdMissing
            | SyncStatusIndexNegative(_)
            | ErrorCodeNotAllowed(_)
            | ErrorMessageMismatch { .. }
            | ErrorRetriableMismatch(_) => ErrorKind::MalformedResponse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_initialized_is_a_caller_bug() {
        assert_eq!(
            AsserterError::AsserterNotInitialized.kind(),
            ErrorKind::UninitializedAsserter
        );
    }

    #[test]
    fn test_request_is_nil_names_the_request() {
        let err = AsserterError::RequestIsNil("BlockRequest");
        assert_eq!(err.to_string(), "BlockRequest is nil");
        assert_eq!(err.kind(), ErrorKind::MalformedRequest);
    }

    #[test]
    fn test_network_errors_render_identifier() {
        let network = NetworkIdentifier::new("Bitcoin", "Testnet");
        let err = AsserterError::NetworkNotSupported(network.clone());
        assert!(err.to_string().contains("Bitcoin/Testnet"));
        assert_eq!(err.kind(), ErrorKind::UnsupportedNetwork);

        let dup = AsserterError::DuplicateSupportedNetwork(network);
        assert_eq!(dup.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn test_operation_index_error_reports_both_indices() {
        let err = AsserterError::InvalidOperationIndex {
            expected: 1,
            found: 3,
        };
        assert!(err.to_string().contains('1'));
        assert!(err.to_string().contains('3'));
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }
}
