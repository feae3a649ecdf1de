use serde::{Deserialize, Serialize};
use tendermint_proto::serializers::from_str;
use utils::encode::{base64, error::EncodeError};

pub const ROUTER_KEY: &str = "evm";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmParams {
    pub enable_create: bool,
    pub enable_call: bool,
    #[serde(default)]
    pub extra_eips: Option<Vec<i64>>,
    #[serde(default)]
    pub enable_contract_deployment_whitelist: bool,
    #[serde(default)]
    pub enable_contract_blocked_list: bool,
    #[serde(with = "from_str", default)]
    pub max_gas_limit_per_tx: u64,
}

/// Deployed bytecode, base64 on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResCode {
    #[serde(default)]
    pub code: Option<String>,
}

impl QueryResCode {
    pub fn bytes(&self) -> Result<Vec<u8>, EncodeError> {
        self.code.as_deref().map_or(Ok(vec![]), base64::decode)
    }
}

/// One 32 byte storage slot, base64 on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResStorage {
    #[serde(default)]
    pub value: Option<String>,
}

impl QueryResStorage {
    pub fn bytes(&self) -> Result<Vec<u8>, EncodeError> {
        self.value.as_deref().map_or(Ok(vec![]), base64::decode)
    }
}
