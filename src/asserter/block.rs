//! Blocks and transactions as returned by a node.

use super::{Asserter, AsserterError, primitives};
use crate::types::{Block, Transaction};
use std::collections::HashSet;

/// 01/01/2000 00:00:00 UTC, in milliseconds.
pub const MIN_UNIX_EPOCH: i64 = 946_713_600_000;

/// 01/01/2040 00:00:00 UTC, in milliseconds.
pub const MAX_UNIX_EPOCH: i64 = 2_209_017_600_000;

/// Rejects block timestamps that are obviously not in milliseconds.
pub fn timestamp(timestamp: i64) -> Result<(), AsserterError> {
    if timestamp < MIN_UNIX_EPOCH {
        return Err(AsserterError::TimestampBeforeMin(timestamp));
    }

    if timestamp > MAX_UNIX_EPOCH {
        return Err(AsserterError::TimestampAfterMax(timestamp));
    }

    Ok(())
}

impl Asserter {
    /// Validates a block and every transaction in it.
    ///
    /// The genesis block is allowed to be its own parent and to carry a
    /// placeholder timestamp.
    pub fn block(&self, block: Option<&Block>) -> Result<(), AsserterError> {
        let block = block.ok_or(AsserterError::BlockIsNil)?;

        primitives::block_identifier(block.block_identifier.as_ref())?;
        primitives::block_identifier(block.parent_block_identifier.as_ref())?;

        let (Some(current), Some(parent)) =
            (&block.block_identifier, &block.parent_block_identifier)
        else {
            return Err(AsserterError::BlockIdentifierIsNil);
        };

        let genesis_index = self.genesis_block.as_ref().map_or(0, |genesis| genesis.index);
        if current.index != genesis_index {
            if current.hash == parent.hash {
                return Err(AsserterError::BlockHashEqualsParentBlockHash(current.index));
            }

            if current.index <= parent.index {
                return Err(AsserterError::BlockIndexNotAfterParent {
                    index: current.index,
                    parent: parent.index,
                });
            }
        }

        let check_timestamp = match self.timestamp_start_index {
            Some(start) => current.index >= start,
            None => current.index > genesis_index,
        };
        if check_timestamp {
            timestamp(block.timestamp)?;
        }

        let mut hashes = HashSet::new();
        for transaction in &block.transactions {
            self.transaction(Some(transaction), false)?;

            if let Some(identifier) = &transaction.transaction_identifier {
                if !hashes.insert(identifier.hash.as_str()) {
                    return Err(AsserterError::DuplicateTransaction(identifier.hash.clone()));
                }
            }
        }

        Ok(())
    }

    /// Validates an observed transaction.
    ///
    /// Mempool transactions may only create or spend coins when the asserter
    /// was built with `mempool_coins`.
    pub fn transaction(
        &self,
        transaction: Option<&Transaction>,
        mempool: bool,
    ) -> Result<(), AsserterError> {
        let transaction = transaction.ok_or(AsserterError::TransactionIsNil)?;

        primitives::transaction_identifier(transaction.transaction_identifier.as_ref())?;
        self.operations(&transaction.operations, false)?;

        if mempool
            && !self.mempool_coins
            && transaction.operations.iter().any(|op| op.coin_change.is_some())
        {
            return Err(AsserterError::MempoolCoinsNotSupported);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_bounds() {
        assert!(timestamp(MIN_UNIX_EPOCH).is_ok());
        assert!(timestamp(MAX_UNIX_EPOCH).is_ok());
        assert_eq!(
            timestamp(MIN_UNIX_EPOCH - 1),
            Err(AsserterError::TimestampBeforeMin(MIN_UNIX_EPOCH - 1))
        );
        assert_eq!(
            timestamp(MAX_UNIX_EPOCH + 1),
            Err(AsserterError::TimestampAfterMax(MAX_UNIX_EPOCH + 1))
        );
    }
}
