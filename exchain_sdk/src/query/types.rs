use serde::{Deserialize, Serialize};

/// Result of an ABCI query: the raw value and the height it was read at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbciQueryResult {
    pub value: Vec<u8>,
    pub height: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttribute {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbciEvent {
    pub kind: String,
    pub attributes: Vec<EventAttribute>,
}

/// Execution result of one transaction (CheckTx or DeliverTx).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxExecResult {
    pub code: u32,
    pub codespace: String,
    pub data: Vec<u8>,
    pub log: String,
    pub info: String,
    pub gas_wanted: i64,
    pub gas_used: i64,
    pub events: Vec<AbciEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub chain_id: String,
    pub height: i64,
    /// RFC 3339.
    pub time: String,
    pub last_block_hash: String,
    pub app_hash: String,
    pub proposer_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockResult {
    pub block_hash: String,
    pub header: BlockHeader,
    pub txs: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockResults {
    pub height: i64,
    pub txs_results: Vec<TxExecResult>,
    pub begin_block_events: Vec<AbciEvent>,
    pub end_block_events: Vec<AbciEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSignature {
    /// Hex, empty when the validator was absent.
    pub validator_address: String,
    pub signed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitResult {
    pub header: BlockHeader,
    pub block_hash: String,
    pub round: u32,
    pub signatures: Vec<CommitSignature>,
    pub canonical: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    pub address: String,
    pub pub_key: Vec<u8>,
    pub voting_power: u64,
    pub proposer_priority: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorsResult {
    pub block_height: i64,
    pub validators: Vec<ValidatorInfo>,
    pub total: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    pub hash: String,
    pub height: i64,
    pub index: u32,
    pub tx_result: TxExecResult,
    pub tx: Vec<u8>,
    pub has_proof: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxSearchResult {
    pub txs: Vec<TxResult>,
    pub total_count: u32,
}

/// Node answer to a broadcast, before it is turned into a `TxResponse`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastResult {
    pub hash: String,
    pub height: i64,
    pub check_tx: TxExecResult,
    /// Only present for block mode.
    pub deliver_tx: Option<TxExecResult>,
}

/// Signed header and validator set at one height, as needed to update a
/// light client of this chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderAtHeight {
    pub commit: CommitResult,
    pub validators: ValidatorsResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    #[default]
    Ascending,
    Descending,
}

impl SearchOrder {
    /// `"asc"`, `"desc"` or empty for ascending.
    pub fn parse(order_by: &str) -> Option<Self> {
        match order_by.trim() {
            "" | "asc" => Some(SearchOrder::Ascending),
            "desc" => Some(SearchOrder::Descending),
            _ => None,
        }
    }
}
