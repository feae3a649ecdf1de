use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use utils::encode::bech32;

use crate::error::TypesError;

pub const ACCOUNT_PREFIX: &str = "ex";
pub const VALIDATOR_OPERATOR_PREFIX: &str = "exvaloper";
pub const CONSENSUS_PUBKEY_PREFIX: &str = "exvalconspub";

pub const ADDRESS_LENGTH: usize = 20;
pub const ED25519_PUBKEY_LENGTH: usize = 32;
/// Amino prefix of an ed25519 public key (`tendermint/PubKeyEd25519` plus length byte).
pub const ED25519_AMINO_PREFIX: [u8; 5] = [0x16, 0x24, 0xde, 0x64, 0x20];

fn decode_address(address: &str, prefix: &str) -> Result<Vec<u8>, TypesError> {
    if address.trim().is_empty() {
        return Err(TypesError::empty_address());
    }

    let (hrp, bytes) = bech32::decode_with_hrp(address)
        .map_err(|e| TypesError::bech32_decode(address.to_string(), e))?;
    if hrp != prefix {
        return Err(TypesError::invalid_prefix(prefix.to_string(), hrp));
    }
    if bytes.len() != ADDRESS_LENGTH {
        return Err(TypesError::invalid_address_length(ADDRESS_LENGTH, bytes.len()));
    }

    Ok(bytes)
}

fn fmt_bech32(f: &mut fmt::Formatter<'_>, prefix: &str, bytes: &[u8]) -> fmt::Result {
    let encoded = bech32::encode(prefix, bytes).map_err(|_| fmt::Error)?;
    write!(f, "{}", encoded)
}

macro_rules! bech32_address {
    ($name:ident, $prefix:expr) => {
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; ADDRESS_LENGTH]);

        impl $name {
            pub fn from_bech32(address: &str) -> Result<Self, TypesError> {
                let bytes = decode_address(address, $prefix)?;
                let mut raw = [0u8; ADDRESS_LENGTH];
                raw.copy_from_slice(&bytes);
                Ok(Self(raw))
            }

            pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt_bech32(f, $prefix, &self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = TypesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_bech32(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_bech32(&s).map_err(|e| de::Error::custom(e.to_string()))
            }
        }
    };
}

bech32_address!(AccAddress, ACCOUNT_PREFIX);
bech32_address!(ValAddress, VALIDATOR_OPERATOR_PREFIX);

impl From<&AccAddress> for ValAddress {
    fn from(address: &AccAddress) -> Self {
        ValAddress(address.0)
    }
}

impl From<&ValAddress> for AccAddress {
    fn from(address: &ValAddress) -> Self {
        AccAddress(address.0)
    }
}

/// Validator consensus public key, carried on the wire as an amino encoded
/// ed25519 key wrapped in bech32 with the `exvalconspub` prefix.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ConsPubKey([u8; ED25519_PUBKEY_LENGTH]);

impl ConsPubKey {
    pub fn from_bech32(pubkey: &str) -> Result<Self, TypesError> {
        if pubkey.trim().is_empty() {
            return Err(TypesError::invalid_consensus_pub_key("empty string".to_string()));
        }

        let (hrp, bytes) = bech32::decode_with_hrp(pubkey)
            .map_err(|e| TypesError::bech32_decode(pubkey.to_string(), e))?;
        if hrp != CONSENSUS_PUBKEY_PREFIX {
            return Err(TypesError::invalid_prefix(
                CONSENSUS_PUBKEY_PREFIX.to_string(),
                hrp,
            ));
        }

        let expected_len = ED25519_AMINO_PREFIX.len() + ED25519_PUBKEY_LENGTH;
        if bytes.len() != expected_len {
            return Err(TypesError::invalid_consensus_pub_key(format!(
                "expected {} bytes, got {}",
                expected_len,
                bytes.len()
            )));
        }
        if bytes[..ED25519_AMINO_PREFIX.len()] != ED25519_AMINO_PREFIX {
            return Err(TypesError::invalid_consensus_pub_key(
                "not an ed25519 public key".to_string(),
            ));
        }

        let mut raw = [0u8; ED25519_PUBKEY_LENGTH];
        raw.copy_from_slice(&bytes[ED25519_AMINO_PREFIX.len()..]);
        Ok(Self(raw))
    }

    pub fn key_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ConsPubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = ED25519_AMINO_PREFIX.to_vec();
        bytes.extend_from_slice(&self.0);
        fmt_bech32(f, CONSENSUS_PUBKEY_PREFIX, &bytes)
    }
}

impl fmt::Debug for ConsPubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConsPubKey({})", self)
    }
}

impl FromStr for ConsPubKey {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}

impl Serialize for ConsPubKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ConsPubKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_bech32(&s).map_err(|e| de::Error::custom(e.to_string()))
    }
}

#[cfg(test)]
pub mod address_tests {
    use super::{AccAddress, ConsPubKey, ValAddress};

    const ADDR: &str = "ex1qj5c07sm6jetjz8f509qtrxgh4psxkv3ddyq7u";
    const VAL_ADDR: &str = "exvaloper1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5pvslt3";
    const VAL_CONS_PK: &str =
        "exvalconspub1zcjduepqs2c6xnrfjwxzfclrpq4rh5mxrwlxmncvq6l48ah3ccdew2j6nnfsh3tc5f";

    #[test]
    pub fn acc_address_round_trip() {
        let address = AccAddress::from_bech32(ADDR).unwrap();
        assert_eq!(address.to_string(), ADDR);
        assert_eq!(serde_json::to_string(&address).unwrap(), format!("\"{}\"", ADDR));
    }

    #[test]
    pub fn prefix_must_match() {
        assert!(ValAddress::from_bech32(ADDR).is_err());
        assert!(AccAddress::from_bech32(VAL_ADDR).is_err());

        let val = ValAddress::from_bech32(VAL_ADDR).unwrap();
        assert_eq!(val.as_bytes(), (1u8..=20).collect::<Vec<u8>>().as_slice());
    }

    #[test]
    pub fn malformed_addresses_fail() {
        assert!(AccAddress::from_bech32("").is_err());
        assert!(AccAddress::from_bech32(&ADDR[1..]).is_err());
        assert!(AccAddress::from_bech32(&ADDR[..ADDR.len() - 1]).is_err());
        assert!(AccAddress::from_bech32("ex1qj5c07sm6jetjz8f509qtrxgh4psxkv3ddyq7v").is_err());
    }

    #[test]
    pub fn acc_and_val_share_bytes() {
        let val = ValAddress::from_bech32(VAL_ADDR).unwrap();
        let acc = AccAddress::from(&val);
        assert_eq!(ValAddress::from(&acc), val);
        assert!(acc.to_string().starts_with("ex1"));
    }

    #[test]
    pub fn consensus_pubkey_decode() {
        let pubkey = ConsPubKey::from_bech32(VAL_CONS_PK).unwrap();
        assert_eq!(pubkey.key_bytes().len(), 32);
        assert_eq!(pubkey.key_bytes()[0], 0x82);
        assert_eq!(pubkey.to_string(), VAL_CONS_PK);

        assert!(ConsPubKey::from_bech32(&VAL_CONS_PK[1..]).is_err());
        assert!(ConsPubKey::from_bech32(ADDR).is_err());
        assert!(ConsPubKey::from_bech32("").is_err());
    }
}
