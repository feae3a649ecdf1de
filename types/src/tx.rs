use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tendermint_proto::serializers::from_str;

use crate::{account::PubKey, decimal::DecCoin, error::TypesError};

pub const STD_TX_TYPE: &str = "cosmos-sdk/StdTx";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastMode {
    #[display(fmt = "sync")]
    Sync,
    #[display(fmt = "async")]
    Async,
    #[display(fmt = "block")]
    Block,
}

impl Default for BroadcastMode {
    fn default() -> Self {
        BroadcastMode::Sync
    }
}

impl std::str::FromStr for BroadcastMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sync" => Ok(BroadcastMode::Sync),
            "async" => Ok(BroadcastMode::Async),
            "block" => Ok(BroadcastMode::Block),
            other => Err(format!("unknown broadcast mode: {}", other)),
        }
    }
}

/// Amino envelope of a message inside `StdTx.msg`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdMsg {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<DecCoin>,
    #[serde(with = "from_str")]
    pub gas: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdSignature {
    pub pub_key: PubKey,
    /// Base64 of the 65 byte `r || s || v` signature.
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdTx {
    pub msg: Vec<StdMsg>,
    pub fee: StdFee,
    pub signatures: Vec<StdSignature>,
    pub memo: String,
}

/// The document every signer signs over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StdSignDoc<'a> {
    #[serde(with = "from_str")]
    pub account_number: u64,
    pub chain_id: &'a str,
    pub fee: &'a StdFee,
    pub memo: &'a str,
    pub msgs: &'a [StdMsg],
    #[serde(with = "from_str")]
    pub sequence: u64,
}

impl<'a> StdSignDoc<'a> {
    /// Compact JSON with object keys sorted at every level.
    pub fn sign_bytes(&self) -> Result<Vec<u8>, TypesError> {
        let value = serde_json::to_value(self).map_err(TypesError::serde_json)?;
        serde_json::to_vec(&sort_json(value)).map_err(TypesError::serde_json)
    }
}

// `serde_json::Map` keeps insertion order once any crate in the build enables
// `preserve_order`, and `json!` values carry their literal key order.
fn sort_json(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, sort_json(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_json).collect()),
        other => other,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResponse {
    #[serde(with = "from_str", default)]
    pub height: i64,
    pub txhash: String,
    #[serde(default)]
    pub codespace: String,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub raw_log: String,
    #[serde(default)]
    pub info: String,
    #[serde(with = "from_str", default)]
    pub gas_wanted: i64,
    #[serde(with = "from_str", default)]
    pub gas_used: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<BroadcastMode>,
}

impl TxResponse {
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}
