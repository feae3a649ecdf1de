use serde::{Deserialize, Serialize};
use tendermint_proto::serializers::from_str;

use crate::{address::AccAddress, decimal::DecCoin};

/// Amino name of an ethermint style secp256k1 public key.
pub const ETH_SECP256K1_PUBKEY_TYPE: &str = "ethermint/PubKeySecp256k1";

/// Amino name of the account type returned by `custom/acc/account`.
pub const ETH_ACCOUNT_TYPE: &str = "okexchain/EthAccount";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKey {
    #[serde(rename = "type")]
    pub key_type: String,
    /// Base64 of the compressed key bytes.
    pub value: String,
}

impl PubKey {
    pub fn eth_secp256k1(compressed: &[u8]) -> Self {
        PubKey {
            key_type: ETH_SECP256K1_PUBKEY_TYPE.to_string(),
            value: utils::encode::base64::encode(compressed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub address: AccAddress,
    #[serde(default)]
    pub eth_address: String,
    #[serde(default)]
    pub coins: Vec<DecCoin>,
    #[serde(default)]
    pub public_key: Option<PubKey>,
    #[serde(with = "from_str")]
    pub account_number: u64,
    #[serde(with = "from_str")]
    pub sequence: u64,
    #[serde(default)]
    pub code_hash: String,
}

#[cfg(test)]
pub mod account_tests {
    use super::AccountInfo;

    #[test]
    pub fn account_from_node_json() {
        let raw = r#"{
            "address": "ex1qj5c07sm6jetjz8f509qtrxgh4psxkv3ddyq7u",
            "eth_address": "0x04A987fa1Bd4B2b908e9A3cA058cC8BD43035991",
            "coins": [{"denom": "okt", "amount": "1024.500000000000000000"}],
            "public_key": null,
            "account_number": "7",
            "sequence": "12",
            "code_hash": "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        }"#;

        let account: AccountInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(account.account_number, 7);
        assert_eq!(account.sequence, 12);
        assert_eq!(account.coins[0].to_string(), "1024.500000000000000000okt");
        assert!(account.public_key.is_none());

        let back = serde_json::to_value(&account).unwrap();
        assert_eq!(back["sequence"], "12");
    }
}
