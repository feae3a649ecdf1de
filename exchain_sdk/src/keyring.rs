use std::{collections::HashMap, str::FromStr, sync::RwLock};

use bip39::{Language, Mnemonic, Seed};
use bitcoin::{
    bip32::{ChildNumber, DerivationPath, ExtendedPrivKey, ExtendedPubKey},
    secp256k1::Secp256k1,
    Network,
};
use hdpath::StandardHDPath;
use log::info;
use secp256k1::{Message, PublicKey, SecretKey};
use types::{account::PubKey, address::AccAddress, tx::StdSignature};
use utils::{
    crypto::{keccak256, sha256},
    encode::base64,
};

use crate::error::Error;

/// BIP-44 path of the first ethereum style account.
pub const ETH_HD_PATH: &str = "m/44'/60'/0'/0/0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInfo {
    pub name: String,
    pub address: AccAddress,
    /// Compressed secp256k1 public key.
    pub pub_key: Vec<u8>,
}

impl KeyInfo {
    pub fn amino_pub_key(&self) -> PubKey {
        PubKey::eth_secp256k1(&self.pub_key)
    }
}

/// Source of signing keys. Lookup is by key name; signing is gated by the
/// password the key was stored with.
pub trait Keyring: Send + Sync {
    fn key_info(&self, name: &str) -> Result<KeyInfo, Error>;

    /// Checks that `name` exists and `password` opens it.
    fn unlock(&self, name: &str, password: &str) -> Result<KeyInfo, Error>;

    fn sign(&self, name: &str, password: &str, sign_bytes: &[u8]) -> Result<StdSignature, Error>;
}

pub fn private_key_from_mnemonic(
    mnemonic_words: &str,
    hd_path: &StandardHDPath,
) -> Result<ExtendedPrivKey, Error> {
    let mnemonic = Mnemonic::from_phrase(mnemonic_words, Language::English)
        .map_err(|e| Error::invalid_mnemonic(e.to_string()))?;

    let seed = Seed::new(&mnemonic, "");

    let base_key = ExtendedPrivKey::new_master(Network::Bitcoin, seed.as_bytes()).map_err(|e| {
        Error::bip32_key_generation_failed("Secp256k1".to_string(), e.to_string())
    })?;

    let private_key = base_key
        .derive_priv(&Secp256k1::new(), &standard_path_to_derivation_path(hd_path)?)
        .map_err(|e| {
            Error::bip32_key_generation_failed("Secp256k1".to_string(), e.to_string())
        })?;

    Ok(private_key)
}

fn standard_path_to_derivation_path(path: &StandardHDPath) -> Result<DerivationPath, Error> {
    let invalid = |e: bitcoin::bip32::Error| {
        Error::bip32_key_generation_failed("Secp256k1".to_string(), e.to_string())
    };

    let child_numbers = vec![
        ChildNumber::from_hardened_idx(path.purpose().as_value().as_number()).map_err(invalid)?,
        ChildNumber::from_hardened_idx(path.coin_type()).map_err(invalid)?,
        ChildNumber::from_hardened_idx(path.account()).map_err(invalid)?,
        ChildNumber::from_normal_idx(path.change()).map_err(invalid)?,
        ChildNumber::from_normal_idx(path.index()).map_err(invalid)?,
    ];

    Ok(DerivationPath::from(child_numbers))
}

#[derive(Debug, Clone, Copy)]
pub struct Secp256k1KeyPair {
    pub public_key: PublicKey,
    private_key: SecretKey,
}

impl Secp256k1KeyPair {
    pub fn from_mnemonic(mnemonic: &str, hd_path: &StandardHDPath) -> Result<Self, Error> {
        let private_key = private_key_from_mnemonic(mnemonic, hd_path)?;
        let public_key = ExtendedPubKey::from_priv(&Secp256k1::signing_only(), &private_key);

        Ok(Self {
            public_key: public_key.public_key,
            private_key: private_key.private_key,
        })
    }

    /// Ethereum style address: the last 20 bytes of the keccak256 of the
    /// uncompressed key without its `0x04` tag.
    pub fn address(&self) -> AccAddress {
        let uncompressed = self.public_key.serialize_uncompressed();
        let hash = keccak256(&uncompressed[1..]);

        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        AccAddress::from_bytes(address)
    }

    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.public_key.serialize().to_vec()
    }

    /// Recoverable signature `r || s || v` over keccak256 of the message.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, Error> {
        let message_hash = keccak256(message);
        let message = Message::from_slice(&message_hash).map_err(Error::secp256k1)?;
        let (recovery_id, compact) = secp256k1::Secp256k1::signing_only()
            .sign_ecdsa_recoverable(&message, &self.private_key)
            .serialize_compact();

        let mut signature = compact.to_vec();
        signature.push(recovery_id.to_i32() as u8);
        Ok(signature)
    }
}

struct StoredKey {
    key_pair: Secp256k1KeyPair,
    info: KeyInfo,
    password_hash: [u8; 32],
}

/// In-process keyring holding keys derived from mnemonics.
#[derive(Default)]
pub struct MemoryKeyring {
    keys: RwLock<HashMap<String, StoredKey>>,
}

impl MemoryKeyring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_account_with_mnemonic(
        &self,
        mnemonic: &str,
        name: &str,
        password: &str,
    ) -> Result<KeyInfo, Error> {
        if name.trim().is_empty() {
            return Err(Error::invalid_param("name".to_string(), "empty key name".to_string()));
        }
        if password.is_empty() {
            return Err(Error::empty_password());
        }

        let hd_path = StandardHDPath::from_str(ETH_HD_PATH)
            .map_err(|e| Error::invalid_param("hd_path".to_string(), format!("{:?}", e)))?;
        let key_pair = Secp256k1KeyPair::from_mnemonic(mnemonic, &hd_path)?;
        let info = KeyInfo {
            name: name.to_string(),
            address: key_pair.address(),
            pub_key: key_pair.public_key_bytes(),
        };

        let mut keys = self.keys.write().unwrap_or_else(|e| e.into_inner());
        if keys.contains_key(name) {
            return Err(Error::key_already_exists(name.to_string()));
        }
        keys.insert(
            name.to_string(),
            StoredKey {
                key_pair,
                info: info.clone(),
                password_hash: sha256(password.as_bytes()),
            },
        );

        info!("key {} added to keyring: {}", name, info.address);
        Ok(info)
    }
}

fn unlocked<'a>(
    keys: &'a HashMap<String, StoredKey>,
    name: &str,
    password: &str,
) -> Result<&'a StoredKey, Error> {
    let key = keys
        .get(name)
        .ok_or_else(|| Error::key_not_found(name.to_string()))?;

    if sha256(password.as_bytes()) != key.password_hash {
        return Err(Error::wrong_password(name.to_string()));
    }
    Ok(key)
}

impl Keyring for MemoryKeyring {
    fn key_info(&self, name: &str) -> Result<KeyInfo, Error> {
        let keys = self.keys.read().unwrap_or_else(|e| e.into_inner());
        keys.get(name)
            .map(|key| key.info.clone())
            .ok_or_else(|| Error::key_not_found(name.to_string()))
    }

    fn unlock(&self, name: &str, password: &str) -> Result<KeyInfo, Error> {
        let keys = self.keys.read().unwrap_or_else(|e| e.into_inner());
        unlocked(&keys, name, password).map(|key| key.info.clone())
    }

    fn sign(&self, name: &str, password: &str, sign_bytes: &[u8]) -> Result<StdSignature, Error> {
        let keys = self.keys.read().unwrap_or_else(|e| e.into_inner());
        let key = unlocked(&keys, name, password)?;

        let signature = key.key_pair.sign(sign_bytes)?;
        Ok(StdSignature {
            pub_key: key.info.amino_pub_key(),
            signature: base64::encode(signature),
        })
    }
}
