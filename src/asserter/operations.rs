//! Operation sequence validation.
//!
//! Operations come in two shapes. Observed operations (inside blocks and
//! mempool transactions) may carry a settlement status, which must be one the
//! asserter knows. Operations handed to the construction endpoints have not
//! been executed yet and must not carry a status at all.

use super::{Asserter, AsserterError, primitives};
use crate::types::{Operation, OperationIdentifier};

impl Asserter {
    /// Validates a list of operations in index order, failing on the first
    /// violation.
    ///
    /// # Arguments
    /// * `operations` - Operations in the order they appear in the transaction
    /// * `construction` - `true` for operations that are yet to be constructed
    pub fn operations(
        &self,
        operations: &[Operation],
        construction: bool,
    ) -> Result<(), AsserterError> {
        for (position, operation) in operations.iter().enumerate() {
            self.operation(operation, position as i64, construction)?;
        }

        Ok(())
    }

    /// Validates one operation expected at `index` within its transaction.
    pub fn operation(
        &self,
        operation: &Operation,
        index: i64,
        construction: bool,
    ) -> Result<(), AsserterError> {
        operation_identifier(operation.operation_identifier.as_ref(), index)?;
        self.operation_type(&operation.op_type)?;
        self.operation_status(operation.status.as_deref(), construction)?;

        if operation.account.is_some() {
            primitives::account_identifier(operation.account.as_ref())?;
        }

        if operation.amount.is_some() {
            primitives::amount(operation.amount.as_ref())?;
        }

        primitives::coin_change(operation.coin_change.as_ref())?;

        related_operations(&operation.related_operations, index)
    }

    pub fn operation_type(&self, op_type: &str) -> Result<(), AsserterError> {
        if !self.operation_types.contains(op_type) {
            return Err(AsserterError::InvalidOperationType(op_type.to_string()));
        }

        Ok(())
    }

    /// Construction operations must have no status; observed ones may omit
    /// it, but when present it must be a configured status.
    pub fn operation_status(
        &self,
        status: Option<&str>,
        construction: bool,
    ) -> Result<(), AsserterError> {
        if construction {
            return match status {
                Some(status) if !status.is_empty() => Err(
                    AsserterError::OperationStatusNotEmptyForConstruction(status.to_string()),
                ),
                _ => Ok(()),
            };
        }

        match status {
            None => Ok(()),
            Some(status) if self.operation_statuses.contains_key(status) => Ok(()),
            Some(status) => Err(AsserterError::InvalidOperationStatus(status.to_string())),
        }
    }
}

fn operation_identifier(
    identifier: Option<&OperationIdentifier>,
    expected: i64,
) -> Result<(), AsserterError> {
    let identifier = identifier.ok_or(AsserterError::OperationIdentifierIsNil)?;

    if identifier.index != expected {
        return Err(AsserterError::InvalidOperationIndex {
            expected,
            found: identifier.index,
        });
    }

    if let Some(network_index) = identifier.network_index {
        if network_index < 0 {
            return Err(AsserterError::OperationNetworkIndexNegative(network_index));
        }
    }

    Ok(())
}

/// Related operations may only point backwards, and only once each.
fn related_operations(
    related: &[OperationIdentifier],
    index: i64,
) -> Result<(), AsserterError> {
    for (i, identifier) in related.iter().enumerate() {
        if identifier.index >= index || identifier.index < 0 {
            return Err(AsserterError::RelatedOperationIndexOutOfOrder {
                index,
                related: identifier.index,
            });
        }

        if related[..i].iter().any(|prev| prev.index == identifier.index) {
            return Err(AsserterError::DuplicateRelatedOperation(identifier.index));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Amount, Currency, NetworkIdentifier, OperationStatus};

    fn asserter() -> Asserter {
        Asserter::new_server(
            vec![NetworkIdentifier::new("Bitcoin", "Mainnet")],
            vec!["TRANSFER".to_string(), "FEE".to_string()],
            vec![
                OperationStatus::new("SUCCESS", true),
                OperationStatus::new("FAILURE", false),
            ],
            false,
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_sequential_operations_pass() {
        let ops = vec![
            Operation::new(0, "TRANSFER").with_status("SUCCESS"),
            Operation::new(1, "FEE"),
            Operation::new(2, "TRANSFER").with_status("FAILURE"),
        ];
        assert!(asserter().operations(&ops, false).is_ok());
    }

    #[test]
    fn test_gap_in_indices_fails() {
        let ops = vec![Operation::new(0, "TRANSFER"), Operation::new(2, "TRANSFER")];
        assert_eq!(
            asserter().operations(&ops, false),
            Err(AsserterError::InvalidOperationIndex {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn test_permuted_indices_fail() {
        let ops = vec![Operation::new(1, "TRANSFER"), Operation::new(0, "TRANSFER")];
        assert_eq!(
            asserter().operations(&ops, true),
            Err(AsserterError::InvalidOperationIndex {
                expected: 0,
                found: 1
            })
        );
    }

    #[test]
    fn test_missing_identifier_fails() {
        let mut op = Operation::new(0, "TRANSFER");
        op.operation_identifier = None;
        assert_eq!(
            asserter().operations(&[op], true),
            Err(AsserterError::OperationIdentifierIsNil)
        );
    }

    #[test]
    fn test_unknown_type_fails() {
        let ops = vec![Operation::new(0, "STAKE")];
        assert_eq!(
            asserter().operations(&ops, false),
            Err(AsserterError::InvalidOperationType("STAKE".to_string()))
        );
    }

    #[test]
    fn test_unknown_status_fails_when_observed() {
        let ops = vec![Operation::new(0, "TRANSFER").with_status("PENDING")];
        assert_eq!(
            asserter().operations(&ops, false),
            Err(AsserterError::InvalidOperationStatus("PENDING".to_string()))
        );
    }

    #[test]
    fn test_status_forbidden_for_construction() {
        let ops = vec![Operation::new(0, "TRANSFER").with_status("SUCCESS")];
        assert_eq!(
            asserter().operations(&ops, true),
            Err(AsserterError::OperationStatusNotEmptyForConstruction(
                "SUCCESS".to_string()
            ))
        );

        let blank = vec![Operation::new(0, "TRANSFER").with_status("")];
        assert!(asserter().operations(&blank, true).is_ok());
    }

    #[test]
    fn test_amount_is_delegated() {
        let mut op = Operation::new(0, "TRANSFER");
        op.amount = Some(Amount::new("1.5", Currency::new("BTC", 8)));
        assert_eq!(
            asserter().operations(&[op], true),
            Err(AsserterError::AmountValueNotInteger("1.5".to_string()))
        );
    }

    #[test]
    fn test_related_operations_point_backwards() {
        let mut second = Operation::new(1, "FEE");
        second.related_operations = vec![OperationIdentifier::new(0)];
        let ops = vec![Operation::new(0, "TRANSFER"), second.clone()];
        assert!(asserter().operations(&ops, true).is_ok());

        second.related_operations = vec![OperationIdentifier::new(1)];
        assert_eq!(
            asserter().operations(&[Operation::new(0, "TRANSFER"), second.clone()], true),
            Err(AsserterError::RelatedOperationIndexOutOfOrder {
                index: 1,
                related: 1
            })
        );

        let mut third = Operation::new(2, "FEE");
        third.related_operations = vec![OperationIdentifier::new(0), OperationIdentifier::new(0)];
        let ops = vec![Operation::new(0, "TRANSFER"), Operation::new(1, "FEE"), third];
        assert_eq!(
            asserter().operations(&ops, true),
            Err(AsserterError::DuplicateRelatedOperation(0))
        );
    }
}
