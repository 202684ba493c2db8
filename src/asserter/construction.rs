//! Keys, signing payloads and signatures used by the construction endpoints.

use super::{AsserterError, primitives};
use crate::types::{CurveType, PublicKey, Signature, SignatureType, SigningPayload};

pub fn curve_type(curve: &CurveType) -> Result<(), AsserterError> {
    if !curve.is_supported() {
        return Err(AsserterError::CurveTypeNotSupported(curve.to_string()));
    }

    Ok(())
}

pub fn signature_type(signature: &SignatureType) -> Result<(), AsserterError> {
    if !signature.is_supported() {
        return Err(AsserterError::SignatureTypeNotSupported(
            signature.to_string(),
        ));
    }

    Ok(())
}

pub fn public_key(key: Option<&PublicKey>) -> Result<(), AsserterError> {
    let key = key.ok_or(AsserterError::PublicKeyIsNil)?;

    if key.hex_bytes.is_empty() {
        return Err(AsserterError::PublicKeyBytesEmpty);
    }

    curve_type(&key.curve_type)
}

/// Ensures a payload has bytes to sign and names who must sign them.
pub fn signing_payload(payload: Option<&SigningPayload>) -> Result<(), AsserterError> {
    let payload = payload.ok_or(AsserterError::SigningPayloadIsNil)?;

    if payload.hex_bytes.is_empty() {
        return Err(AsserterError::SigningPayloadBytesEmpty);
    }

    match (&payload.account_identifier, &payload.address) {
        (Some(account), _) => primitives::account_identifier(Some(account))?,
        (None, Some(address)) if !address.is_empty() => {}
        _ => return Err(AsserterError::SigningPayloadAddressMissing),
    }

    if let Some(kind) = &payload.signature_type {
        signature_type(kind)?;
    }

    Ok(())
}

/// Validates a non-empty, duplicate-free list of signatures.
///
/// Each signature must carry a valid payload and public key, a supported
/// signature type that agrees with the payload's, and non-empty bytes.
pub fn signatures(signatures: &[Signature]) -> Result<(), AsserterError> {
    if signatures.is_empty() {
        return Err(AsserterError::SignaturesEmpty);
    }

    for (i, signature) in signatures.iter().enumerate() {
        signing_payload(signature.signing_payload.as_ref())?;
        public_key(signature.public_key.as_ref())?;
        signature_type(&signature.signature_type)?;

        if let Some(expected) = signature
            .signing_payload
            .as_ref()
            .and_then(|payload| payload.signature_type.as_ref())
        {
            if *expected != signature.signature_type {
                return Err(AsserterError::SignatureTypeMismatch {
                    payload: expected.to_string(),
                    signature: signature.signature_type.to_string(),
                });
            }
        }

        if signature.hex_bytes.is_empty() {
            return Err(AsserterError::SignatureBytesEmpty(i));
        }

        if signatures[..i].contains(signature) {
            return Err(AsserterError::DuplicateSignature(i));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountIdentifier;

    fn key() -> PublicKey {
        PublicKey {
            hex_bytes: vec![0x02, 0x01],
            curve_type: CurveType::Secp256k1,
        }
    }

    fn payload() -> SigningPayload {
        SigningPayload {
            account_identifier: Some(AccountIdentifier::new("abc")),
            hex_bytes: vec![0xde, 0xad],
            signature_type: Some(SignatureType::Ecdsa),
            ..Default::default()
        }
    }

    fn signature(bytes: Vec<u8>) -> Signature {
        Signature {
            signing_payload: Some(payload()),
            public_key: Some(key()),
            signature_type: SignatureType::Ecdsa,
            hex_bytes: bytes,
        }
    }

    #[test]
    fn test_public_key_rules() {
        assert!(public_key(Some(&key())).is_ok());
        assert_eq!(public_key(None), Err(AsserterError::PublicKeyIsNil));

        let empty = PublicKey {
            hex_bytes: Vec::new(),
            ..key()
        };
        assert_eq!(public_key(Some(&empty)), Err(AsserterError::PublicKeyBytesEmpty));

        let unknown = PublicKey {
            curve_type: CurveType::Unsupported("bls12_381".to_string()),
            ..key()
        };
        assert_eq!(
            public_key(Some(&unknown)),
            Err(AsserterError::CurveTypeNotSupported("bls12_381".to_string()))
        );
    }

    #[test]
    fn test_signing_payload_needs_a_signer() {
        assert!(signing_payload(Some(&payload())).is_ok());

        let by_address = SigningPayload {
            account_identifier: None,
            address: Some("abc".to_string()),
            ..payload()
        };
        assert!(signing_payload(Some(&by_address)).is_ok());

        let anonymous = SigningPayload {
            account_identifier: None,
            address: None,
            ..payload()
        };
        assert_eq!(
            signing_payload(Some(&anonymous)),
            Err(AsserterError::SigningPayloadAddressMissing)
        );
    }

    #[test]
    fn test_signatures_empty_and_duplicate_are_distinct() {
        assert_eq!(signatures(&[]), Err(AsserterError::SignaturesEmpty));
        assert!(signatures(&[signature(vec![1]), signature(vec![2])]).is_ok());
        assert_eq!(
            signatures(&[signature(vec![1]), signature(vec![1])]),
            Err(AsserterError::DuplicateSignature(1))
        );
        assert_eq!(
            signatures(&[signature(vec![1]), signature(Vec::new())]),
            Err(AsserterError::SignatureBytesEmpty(1))
        );
    }

    #[test]
    fn test_signature_type_must_match_payload() {
        let mut mismatched = signature(vec![1]);
        mismatched.signature_type = SignatureType::Ed25519;

        assert_eq!(
            signatures(&[mismatched]),
            Err(AsserterError::SignatureTypeMismatch {
                payload: "ecdsa".to_string(),
                signature: "ed25519".to_string(),
            })
        );
    }
}
