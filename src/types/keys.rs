use super::AccountIdentifier;
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Elliptic curves a public key may be expressed on.
    CurveType {
        Secp256k1 => "secp256k1",
        Secp256k1Bip340 => "secp256k1_bip340",
        Secp256r1 => "secp256r1",
        Edwards25519 => "edwards25519",
        Tweedle => "tweedle",
        Pallas => "pallas",
    }
}

wire_enum! {
    /// Signature schemes a signing payload may request.
    SignatureType {
        Ecdsa => "ecdsa",
        EcdsaRecovery => "ecdsa_recovery",
        Ed25519 => "ed25519",
        Schnorr1 => "schnorr_1",
        SchnorrBip340 => "schnorr_bip340",
        SchnorrPoseidon => "schnorr_poseidon",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    #[serde(default, with = "hex")]
    pub hex_bytes: Vec<u8>,
    #[serde(default)]
    pub curve_type: CurveType,
}

/// Bytes a signer must sign, plus who must sign them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SigningPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_identifier: Option<AccountIdentifier>,
    #[serde(default, with = "hex")]
    pub hex_bytes: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_type: Option<SignatureType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_payload: Option<SigningPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<PublicKey>,
    #[serde(default)]
    pub signature_type: SignatureType,
    #[serde(default, with = "hex")]
    pub hex_bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_public_key_decodes_hex_bytes() {
        let key: PublicKey = serde_json::from_value(json!({
            "hex_bytes": "02a1b2",
            "curve_type": "secp256k1"
        }))
        .unwrap();

        assert_eq!(key.hex_bytes, vec![0x02, 0xa1, 0xb2]);
        assert_eq!(key.curve_type, CurveType::Secp256k1);
    }

    #[test]
    fn test_curve_type_round_trips_through_wire_name() {
        let curve: CurveType = serde_json::from_value(json!("edwards25519")).unwrap();
        assert_eq!(curve, CurveType::Edwards25519);
        assert_eq!(serde_json::to_value(&curve).unwrap(), json!("edwards25519"));

        let unknown: CurveType = serde_json::from_value(json!("bls12_381")).unwrap();
        assert_eq!(unknown.as_str(), "bls12_381");
        assert!(!unknown.is_supported());
    }

    #[test]
    fn test_missing_names_decode_as_unsupported() {
        let key: PublicKey = serde_json::from_value(json!({ "hex_bytes": "02ff" })).unwrap();
        assert_eq!(key.curve_type, CurveType::Unsupported(String::new()));
        assert!(!key.curve_type.is_supported());

        let signature: Signature = serde_json::from_value(json!({ "hex_bytes": "aabb" })).unwrap();
        assert_eq!(signature.signature_type, SignatureType::Unsupported(String::new()));
    }
}
