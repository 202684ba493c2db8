//! Request Validators
//!
//! One entry point per endpoint. Each starts with the network gate
//! (well-formed, then supported) and then applies its own rules in a fixed
//! order, returning the first failure untouched.
//!
//! Requests arrive by reference, so "request is nil" cannot happen here; it
//! is reported where a request is decoded (see [`crate::endpoint`]).

use super::{Asserter, AsserterError, construction, primitives};
use crate::types::{
    AccountBalanceRequest, BlockRequest, BlockTransactionRequest, ConstructionCombineRequest,
    ConstructionDeriveRequest, ConstructionHashRequest, ConstructionMetadataRequest,
    ConstructionParseRequest, ConstructionPayloadsRequest, ConstructionPreprocessRequest,
    ConstructionSubmitRequest, MempoolTransactionRequest, MetadataRequest, NetworkRequest,
    Operation, PublicKey,
};

impl Asserter {
    /// Validates `/account/balance`.
    ///
    /// Naming a block is only allowed when historical balance lookup is
    /// enabled; the block is then checked as a partial identifier.
    pub fn account_balance_request(
        &self,
        request: &AccountBalanceRequest,
    ) -> Result<(), AsserterError> {
        self.valid_supported_network(request.network_identifier.as_ref())?;
        primitives::account_identifier(request.account_identifier.as_ref())?;

        if let Some(block) = &request.block_identifier {
            if !self.historical_balance_lookup {
                return Err(AsserterError::HistoricalBalanceLookupNotSupported);
            }

            primitives::partial_block_identifier(Some(block))?;
        }

        primitives::currencies(&request.currencies)
    }

    pub fn block_request(&self, request: &BlockRequest) -> Result<(), AsserterError> {
        self.valid_supported_network(request.network_identifier.as_ref())?;
        primitives::partial_block_identifier(request.block_identifier.as_ref())
    }

    pub fn block_transaction_request(
        &self,
        request: &BlockTransactionRequest,
    ) -> Result<(), AsserterError> {
        self.valid_supported_network(request.network_identifier.as_ref())?;
        primitives::block_identifier(request.block_identifier.as_ref())?;
        primitives::transaction_identifier(request.transaction_identifier.as_ref())
    }

    pub fn mempool_transaction_request(
        &self,
        request: &MempoolTransactionRequest,
    ) -> Result<(), AsserterError> {
        self.valid_supported_network(request.network_identifier.as_ref())?;
        primitives::transaction_identifier(request.transaction_identifier.as_ref())
    }

    /// `/network/list` carries no network identifier; there is nothing to
    /// check beyond the request being present.
    pub fn metadata_request(&self, _request: &MetadataRequest) -> Result<(), AsserterError> {
        Ok(())
    }

    pub fn network_request(&self, request: &NetworkRequest) -> Result<(), AsserterError> {
        self.valid_supported_network(request.network_identifier.as_ref())
    }

    pub fn construction_derive_request(
        &self,
        request: &ConstructionDeriveRequest,
    ) -> Result<(), AsserterError> {
        self.valid_supported_network(request.network_identifier.as_ref())?;
        construction::public_key(request.public_key.as_ref())
    }

    pub fn construction_preprocess_request(
        &self,
        request: &ConstructionPreprocessRequest,
    ) -> Result<(), AsserterError> {
        self.valid_supported_network(request.network_identifier.as_ref())?;
        self.construction_operations(&request.operations)
    }

    pub fn construction_metadata_request(
        &self,
        request: &ConstructionMetadataRequest,
    ) -> Result<(), AsserterError> {
        self.valid_supported_network(request.network_identifier.as_ref())?;

        if request.options.is_none() {
            return Err(AsserterError::ConstructionMetadataOptionsIsNil);
        }

        public_keys(&request.public_keys)
    }

    pub fn construction_payloads_request(
        &self,
        request: &ConstructionPayloadsRequest,
    ) -> Result<(), AsserterError> {
        self.valid_supported_network(request.network_identifier.as_ref())?;
        self.construction_operations(&request.operations)?;
        public_keys(&request.public_keys)
    }

    /// Validates `/construction/combine`. An empty unsigned transaction fails
    /// before any signature is looked at.
    pub fn construction_combine_request(
        &self,
        request: &ConstructionCombineRequest,
    ) -> Result<(), AsserterError> {
        self.valid_supported_network(request.network_identifier.as_ref())?;

        if request.unsigned_transaction.is_empty() {
            return Err(AsserterError::UnsignedTransactionEmpty);
        }

        construction::signatures(&request.signatures)
    }

    pub fn construction_parse_request(
        &self,
        request: &ConstructionParseRequest,
    ) -> Result<(), AsserterError> {
        self.valid_supported_network(request.network_identifier.as_ref())?;

        if request.transaction.is_empty() {
            return Err(AsserterError::TransactionEmpty);
        }

        Ok(())
    }

    pub fn construction_hash_request(
        &self,
        request: &ConstructionHashRequest,
    ) -> Result<(), AsserterError> {
        self.valid_supported_network(request.network_identifier.as_ref())?;

        if request.signed_transaction.is_empty() {
            return Err(AsserterError::SignedTransactionEmpty);
        }

        Ok(())
    }

    pub fn construction_submit_request(
        &self,
        request: &ConstructionSubmitRequest,
    ) -> Result<(), AsserterError> {
        self.valid_supported_network(request.network_identifier.as_ref())?;

        if request.signed_transaction.is_empty() {
            return Err(AsserterError::SignedTransactionEmpty);
        }

        Ok(())
    }

    fn construction_operations(&self, operations: &[Operation]) -> Result<(), AsserterError> {
        if operations.is_empty() {
            return Err(AsserterError::NoOperationsForConstruction);
        }

        self.operations(operations, true)
    }
}

fn public_keys(keys: &[PublicKey]) -> Result<(), AsserterError> {
    for key in keys {
        construction::public_key(Some(key))?;
    }

    Ok(())
}
