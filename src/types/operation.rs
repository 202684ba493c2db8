use super::{AccountIdentifier, CoinIdentifier, Metadata};
use serde::{Deserialize, Serialize};

/// Asset an amount is denominated in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub decimals: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Currency {
    pub fn new(symbol: impl Into<String>, decimals: i32) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
            metadata: None,
        }
    }
}

/// Signed integer value in atomic units, carried as a string so it is never
/// truncated by a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Amount {
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Amount {
    pub fn new(value: impl Into<String>, currency: Currency) -> Self {
        Self {
            value: value.into(),
            currency: Some(currency),
            metadata: None,
        }
    }
}

wire_enum! {
    /// What an operation did to a coin.
    CoinAction {
        CoinCreated => "coin_created",
        CoinSpent => "coin_spent",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin_identifier: Option<CoinIdentifier>,
    pub coin_action: CoinAction,
}

/// Position of an operation within its transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OperationIdentifier {
    #[serde(default)]
    pub index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_index: Option<i64>,
}

impl OperationIdentifier {
    pub fn new(index: i64) -> Self {
        Self {
            index,
            network_index: None,
        }
    }
}

/// A single state change inside a transaction.
///
/// `status` is only populated once the operation has been executed on chain;
/// operations handed to the construction endpoints never carry one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_identifier: Option<OperationIdentifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_operations: Vec<OperationIdentifier>,
    #[serde(rename = "type", default)]
    pub op_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountIdentifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin_change: Option<CoinChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Operation {
    pub fn new(index: i64, op_type: impl Into<String>) -> Self {
        Self {
            operation_identifier: Some(OperationIdentifier::new(index)),
            op_type: op_type.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_type_uses_protocol_field_name() {
        let op: Operation = serde_json::from_value(json!({
            "operation_identifier": { "index": 0 },
            "type": "TRANSFER",
            "status": "SUCCESS"
        }))
        .unwrap();

        assert_eq!(op.op_type, "TRANSFER");
        assert_eq!(op.status.as_deref(), Some("SUCCESS"));
        assert!(op.related_operations.is_empty());
    }

    #[test]
    fn test_unknown_coin_action_is_kept_verbatim() {
        let change: CoinChange = serde_json::from_value(json!({
            "coin_identifier": { "identifier": "abc:1" },
            "coin_action": "coin_burned"
        }))
        .unwrap();

        assert_eq!(change.coin_action, CoinAction::Unsupported("coin_burned".to_string()));
        assert!(!change.coin_action.is_supported());
    }
}
