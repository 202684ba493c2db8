//! Single-entity validators.
//!
//! Each takes an optional reference so that an absent field is reported by
//! the rule that needed it rather than by the decoder.

use super::AsserterError;
use crate::types::{
    AccountIdentifier, Amount, BlockIdentifier, CoinChange, Currency, NetworkIdentifier,
    PartialBlockIdentifier, TransactionIdentifier,
};

/// Ensures a network identifier names both a blockchain and a network, and
/// that any sub-network names one too.
pub fn network_identifier(network: Option<&NetworkIdentifier>) -> Result<(), AsserterError> {
    let network = network.ok_or(AsserterError::NetworkIdentifierIsNil)?;

    if network.blockchain.is_empty() {
        return Err(AsserterError::NetworkIdentifierBlockchainMissing);
    }

    if network.network.is_empty() {
        return Err(AsserterError::NetworkIdentifierNetworkMissing);
    }

    if let Some(sub) = &network.sub_network_identifier {
        if sub.network.is_empty() {
            return Err(AsserterError::SubNetworkIdentifierInvalid);
        }
    }

    Ok(())
}

pub fn account_identifier(account: Option<&AccountIdentifier>) -> Result<(), AsserterError> {
    let account = account.ok_or(AsserterError::AccountIdentifierIsNil)?;

    if account.address.is_empty() {
        return Err(AsserterError::AccountIdentifierAddressMissing);
    }

    if let Some(sub) = &account.sub_account {
        if sub.address.is_empty() {
            return Err(AsserterError::SubAccountIdentifierAddressMissing);
        }
    }

    Ok(())
}

pub fn block_identifier(block: Option<&BlockIdentifier>) -> Result<(), AsserterError> {
    let block = block.ok_or(AsserterError::BlockIdentifierIsNil)?;

    if block.hash.is_empty() {
        return Err(AsserterError::BlockIdentifierHashMissing);
    }

    if block.index < 0 {
        return Err(AsserterError::BlockIdentifierIndexNegative(block.index));
    }

    Ok(())
}

/// Ensures at least one of `index`/`hash` is set and that whichever is set
/// is well-formed.
pub fn partial_block_identifier(
    block: Option<&PartialBlockIdentifier>,
) -> Result<(), AsserterError> {
    let block = block.ok_or(AsserterError::PartialBlockIdentifierIsNil)?;

    if block.index.is_none() && block.hash.is_none() {
        return Err(AsserterError::PartialBlockIdentifierFieldsNotSet);
    }

    if let Some(hash) = &block.hash {
        if hash.is_empty() {
            return Err(AsserterError::PartialBlockIdentifierHashEmpty);
        }
    }

    if let Some(index) = block.index {
        if index < 0 {
            return Err(AsserterError::PartialBlockIdentifierIndexNegative(index));
        }
    }

    Ok(())
}

pub fn transaction_identifier(
    transaction: Option<&TransactionIdentifier>,
) -> Result<(), AsserterError> {
    let transaction = transaction.ok_or(AsserterError::TransactionIdentifierIsNil)?;

    if transaction.hash.is_empty() {
        return Err(AsserterError::TransactionIdentifierHashMissing);
    }

    Ok(())
}

pub fn currency(currency: Option<&Currency>) -> Result<(), AsserterError> {
    let currency = currency.ok_or(AsserterError::CurrencyIsNil)?;

    if currency.symbol.is_empty() {
        return Err(AsserterError::CurrencySymbolEmpty);
    }

    if currency.decimals < 0 {
        return Err(AsserterError::CurrencyDecimalsNegative(currency.decimals));
    }

    Ok(())
}

/// Validates each currency and rejects repeats (same symbol, decimals and metadata).
pub fn currencies(currencies: &[Currency]) -> Result<(), AsserterError> {
    for (i, item) in currencies.iter().enumerate() {
        currency(Some(item))?;

        if currencies[..i].contains(item) {
            return Err(AsserterError::DuplicateCurrency(item.symbol.clone()));
        }
    }

    Ok(())
}

/// Ensures `value` is a strict base-10 integer string and the currency is valid.
pub fn amount(amount: Option<&Amount>) -> Result<(), AsserterError> {
    let amount = amount.ok_or(AsserterError::AmountIsNil)?;

    if amount.value.is_empty() {
        return Err(AsserterError::AmountValueMissing);
    }

    if !is_integer_string(&amount.value) {
        return Err(AsserterError::AmountValueNotInteger(amount.value.clone()));
    }

    currency(amount.currency.as_ref())
}

pub fn coin_change(change: Option<&CoinChange>) -> Result<(), AsserterError> {
    // Absent is fine: most operations do not touch coins.
    let Some(change) = change else {
        return Ok(());
    };

    let coin = change
        .coin_identifier
        .as_ref()
        .ok_or(AsserterError::CoinIdentifierIsNil)?;

    if coin.identifier.is_empty() {
        return Err(AsserterError::CoinIdentifierMissing);
    }

    if !change.coin_action.is_supported() {
        return Err(AsserterError::CoinActionInvalid(
            change.coin_action.to_string(),
        ));
    }

    Ok(())
}

/// `-?[0-9]+`, nothing else: no `+`, no whitespace, no exponent.
fn is_integer_string(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CoinAction, CoinIdentifier, SubAccountIdentifier};

    fn btc() -> Currency {
        Currency::new("BTC", 8)
    }

    #[test]
    fn test_network_identifier_rules() {
        assert!(network_identifier(Some(&NetworkIdentifier::new("Bitcoin", "Mainnet"))).is_ok());
        assert_eq!(
            network_identifier(None),
            Err(AsserterError::NetworkIdentifierIsNil)
        );
        assert_eq!(
            network_identifier(Some(&NetworkIdentifier::new("", "Mainnet"))),
            Err(AsserterError::NetworkIdentifierBlockchainMissing)
        );
        assert_eq!(
            network_identifier(Some(&NetworkIdentifier::new("Bitcoin", ""))),
            Err(AsserterError::NetworkIdentifierNetworkMissing)
        );
        assert_eq!(
            network_identifier(Some(
                &NetworkIdentifier::new("Bitcoin", "Mainnet").with_sub_network("")
            )),
            Err(AsserterError::SubNetworkIdentifierInvalid)
        );
    }

    #[test]
    fn test_account_identifier_sub_account_needs_address() {
        let mut account = AccountIdentifier::new("abc");
        assert!(account_identifier(Some(&account)).is_ok());

        account.sub_account = Some(SubAccountIdentifier::default());
        assert_eq!(
            account_identifier(Some(&account)),
            Err(AsserterError::SubAccountIdentifierAddressMissing)
        );

        assert_eq!(
            account_identifier(Some(&AccountIdentifier::new(""))),
            Err(AsserterError::AccountIdentifierAddressMissing)
        );
    }

    #[test]
    fn test_block_identifier_rules() {
        assert!(block_identifier(Some(&BlockIdentifier::new(0, "genesis"))).is_ok());
        assert_eq!(
            block_identifier(Some(&BlockIdentifier::new(1, ""))),
            Err(AsserterError::BlockIdentifierHashMissing)
        );
        assert_eq!(
            block_identifier(Some(&BlockIdentifier::new(-1, "hash"))),
            Err(AsserterError::BlockIdentifierIndexNegative(-1))
        );
    }

    #[test]
    fn test_partial_block_identifier_needs_one_field() {
        assert!(partial_block_identifier(Some(&PartialBlockIdentifier::from_index(100))).is_ok());
        assert!(partial_block_identifier(Some(&PartialBlockIdentifier::from_hash("abc"))).is_ok());
        assert_eq!(
            partial_block_identifier(Some(&PartialBlockIdentifier::default())),
            Err(AsserterError::PartialBlockIdentifierFieldsNotSet)
        );
        assert_eq!(
            partial_block_identifier(Some(&PartialBlockIdentifier::from_hash(""))),
            Err(AsserterError::PartialBlockIdentifierHashEmpty)
        );
        assert_eq!(
            partial_block_identifier(Some(&PartialBlockIdentifier::from_index(-5))),
            Err(AsserterError::PartialBlockIdentifierIndexNegative(-5))
        );
        assert_eq!(
            partial_block_identifier(None),
            Err(AsserterError::PartialBlockIdentifierIsNil)
        );
    }

    #[test]
    fn test_amount_value_grammar() {
        for value in ["0", "100", "-100", "000123"] {
            assert!(amount(Some(&Amount::new(value, btc()))).is_ok(), "{value}");
        }

        for value in ["+1", "1.5", "1e9", " 1", "-", "abc", "0x10"] {
            assert_eq!(
                amount(Some(&Amount::new(value, btc()))),
                Err(AsserterError::AmountValueNotInteger(value.to_string())),
                "{value}"
            );
        }

        assert_eq!(
            amount(Some(&Amount::new("", btc()))),
            Err(AsserterError::AmountValueMissing)
        );
    }

    #[test]
    fn test_amount_checks_currency() {
        let missing = Amount {
            value: "1".to_string(),
            ..Default::default()
        };
        assert_eq!(amount(Some(&missing)), Err(AsserterError::CurrencyIsNil));

        assert_eq!(
            amount(Some(&Amount::new("1", Currency::new("", 8)))),
            Err(AsserterError::CurrencySymbolEmpty)
        );
        assert_eq!(
            amount(Some(&Amount::new("1", Currency::new("BTC", -1)))),
            Err(AsserterError::CurrencyDecimalsNegative(-1))
        );
    }

    #[test]
    fn test_currencies_rejects_duplicates() {
        assert!(currencies(&[btc(), Currency::new("ETH", 18)]).is_ok());
        assert_eq!(
            currencies(&[btc(), Currency::new("ETH", 18), btc()]),
            Err(AsserterError::DuplicateCurrency("BTC".to_string()))
        );
    }

    #[test]
    fn test_coin_change_rules() {
        assert!(coin_change(None).is_ok());

        let mut change = CoinChange {
            coin_identifier: Some(CoinIdentifier {
                identifier: "tx:0".to_string(),
            }),
            coin_action: CoinAction::CoinSpent,
        };
        assert!(coin_change(Some(&change)).is_ok());

        change.coin_action = CoinAction::Unsupported("coin_burned".to_string());
        assert_eq!(
            coin_change(Some(&change)),
            Err(AsserterError::CoinActionInvalid("coin_burned".to_string()))
        );

        change.coin_identifier = None;
        assert_eq!(
            coin_change(Some(&change)),
            Err(AsserterError::CoinIdentifierIsNil)
        );
    }
}
