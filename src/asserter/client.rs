//! Response Validators
//!
//! Client-side counterparts of the request validators: a client runs these
//! on whatever a node returns before trusting it. `/network/*` responses are
//! free functions in the `network` module since they do not depend on the
//! asserter's configuration.

use super::{Asserter, AsserterError, construction, primitives};
use crate::types::{
    AccountBalanceResponse, BlockResponse, BlockTransactionResponse, ConstructionCombineResponse,
    ConstructionDeriveResponse, ConstructionMetadataResponse, ConstructionParseResponse,
    ConstructionPayloadsResponse, ConstructionPreprocessResponse, MempoolResponse,
    MempoolTransactionResponse, PartialBlockIdentifier, TransactionIdentifier,
    TransactionIdentifierResponse,
};
use std::collections::HashSet;

impl Asserter {
    /// Validates `/account/balance` output.
    ///
    /// # Arguments
    /// * `requested` - The block named in the request, if any; the response
    ///   must then be for that block
    /// * `response` - The node's response
    pub fn account_balance_response(
        &self,
        requested: Option<&PartialBlockIdentifier>,
        response: &AccountBalanceResponse,
    ) -> Result<(), AsserterError> {
        primitives::block_identifier(response.block_identifier.as_ref())?;

        for (i, balance) in response.balances.iter().enumerate() {
            primitives::amount(Some(balance))?;

            if response.balances[..i]
                .iter()
                .any(|prev| prev.currency == balance.currency)
            {
                let symbol = balance
                    .currency
                    .as_ref()
                    .map(|currency| currency.symbol.clone())
                    .unwrap_or_default();
                return Err(AsserterError::DuplicateCurrency(symbol));
            }
        }

        let (Some(requested), Some(returned)) = (requested, &response.block_identifier) else {
            return Ok(());
        };

        let hash_matches = requested.hash.as_ref().is_none_or(|hash| *hash == returned.hash);
        let index_matches = requested.index.is_none_or(|index| index == returned.index);
        if !hash_matches || !index_matches {
            return Err(AsserterError::ReturnedBlockMismatch {
                requested: format!("{requested:?}"),
                returned: format!("{returned:?}"),
            });
        }

        Ok(())
    }

    pub fn block_response(&self, response: &BlockResponse) -> Result<(), AsserterError> {
        self.block(response.block.as_ref())?;
        unique_transaction_identifiers(&response.other_transactions)
    }

    pub fn block_transaction_response(
        &self,
        response: &BlockTransactionResponse,
    ) -> Result<(), AsserterError> {
        self.transaction(response.transaction.as_ref(), false)
    }

    pub fn mempool_response(&self, response: &MempoolResponse) -> Result<(), AsserterError> {
        unique_transaction_identifiers(&response.transaction_identifiers)
    }

    pub fn mempool_transaction_response(
        &self,
        response: &MempoolTransactionResponse,
    ) -> Result<(), AsserterError> {
        self.transaction(response.transaction.as_ref(), true)
    }

    pub fn construction_derive_response(
        &self,
        response: &ConstructionDeriveResponse,
    ) -> Result<(), AsserterError> {
        primitives::account_identifier(response.account_identifier.as_ref())
    }

    pub fn construction_preprocess_response(
        &self,
        response: &ConstructionPreprocessResponse,
    ) -> Result<(), AsserterError> {
        for account in &response.required_public_keys {
            primitives::account_identifier(Some(account))?;
        }

        Ok(())
    }

    pub fn construction_metadata_response(
        &self,
        response: &ConstructionMetadataResponse,
    ) -> Result<(), AsserterError> {
        if response.metadata.is_none() {
            return Err(AsserterError::ConstructionMetadataResponseMetadataIsNil);
        }

        for fee in &response.suggested_fee {
            primitives::amount(Some(fee))?;
        }

        Ok(())
    }

    pub fn construction_payloads_response(
        &self,
        response: &ConstructionPayloadsResponse,
    ) -> Result<(), AsserterError> {
        if response.unsigned_transaction.is_empty() {
            return Err(AsserterError::UnsignedTransactionEmpty);
        }

        if response.payloads.is_empty() {
            return Err(AsserterError::ConstructionPayloadsResponsePayloadsEmpty);
        }

        for payload in &response.payloads {
            construction::signing_payload(Some(payload))?;
        }

        Ok(())
    }

    pub fn construction_combine_response(
        &self,
        response: &ConstructionCombineResponse,
    ) -> Result<(), AsserterError> {
        if response.signed_transaction.is_empty() {
            return Err(AsserterError::SignedTransactionEmpty);
        }

        Ok(())
    }

    /// Validates `/construction/parse` output.
    ///
    /// A parsed signed transaction must name its signers; an unsigned one
    /// must not name any.
    pub fn construction_parse_response(
        &self,
        signed: bool,
        response: &ConstructionParseResponse,
    ) -> Result<(), AsserterError> {
        if response.operations.is_empty() {
            return Err(AsserterError::NoOperationsForConstruction);
        }

        self.operations(&response.operations, true)?;

        match (signed, response.account_identifier_signers.is_empty()) {
            (true, true) => Err(AsserterError::ConstructionParseResponseSignersEmpty),
            (false, false) => Err(AsserterError::ConstructionParseResponseSignersNonEmpty),
            _ => {
                for signer in &response.account_identifier_signers {
                    primitives::account_identifier(Some(signer))?;
                }

                Ok(())
            }
        }
    }

    /// Shared by `/construction/hash` and `/construction/submit`.
    pub fn transaction_identifier_response(
        &self,
        response: &TransactionIdentifierResponse,
    ) -> Result<(), AsserterError> {
        primitives::transaction_identifier(response.transaction_identifier.as_ref())
    }
}

fn unique_transaction_identifiers(
    identifiers: &[TransactionIdentifier],
) -> Result<(), AsserterError> {
    let mut hashes = HashSet::new();
    for identifier in identifiers {
        primitives::transaction_identifier(Some(identifier))?;

        if !hashes.insert(identifier.hash.as_str()) {
            return Err(AsserterError::DuplicateTransaction(identifier.hash.clone()));
        }
    }

    Ok(())
}
