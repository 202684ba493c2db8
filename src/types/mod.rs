//! Protocol Data Model
//!
//! Decoded request and response bodies for every endpoint the asserter
//! understands. Field names follow the protocol's snake_case JSON, so the
//! structs deserialize straight from a request body.
//!
//! Fields the protocol calls required are still `Option`s (or defaulted
//! collections) wherever the validator, not the decoder, must report their
//! absence.

/// Declares a protocol enum that travels as a plain string.
///
/// Names outside the known set decode into `Unsupported` so the asserter can
/// reject them with a precise error instead of failing inside the decoder.
/// A missing name defaults to `Unsupported("")` for the same reason.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Unsupported(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Unsupported(other) => other,
                }
            }

            pub fn is_supported(&self) -> bool {
                !matches!(self, Self::Unsupported(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::Unsupported(String::new())
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                match name.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Unsupported(name),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod chain;
mod identifiers;
mod keys;
mod network;
mod operation;
mod requests;
mod responses;

pub use chain::{Block, Transaction};
pub use identifiers::{
    AccountIdentifier, BlockIdentifier, CoinIdentifier, NetworkIdentifier,
    PartialBlockIdentifier, SubAccountIdentifier, SubNetworkIdentifier, TransactionIdentifier,
};
pub use keys::{CurveType, PublicKey, Signature, SignatureType, SigningPayload};
pub use network::{Allow, Error, OperationStatus, Peer, SyncStatus, Version};
pub use operation::{Amount, CoinAction, CoinChange, Currency, Operation, OperationIdentifier};
pub use requests::*;
pub use responses::*;

/// Opaque, implementation-defined metadata. Passed through untouched.
pub type Metadata = serde_json::Map<String, serde_json::Value>;
