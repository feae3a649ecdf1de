//! In-process stand-in for a node, used by the client tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tendermint_rpc::error::Error as TrpcError;
use types::tx::BroadcastMode;
use utils::{crypto::sha256, encode::systems::hex_encode_upper};

use crate::{
    client::Client,
    config::ClientConfig,
    error::Error,
    keyring::{KeyInfo, MemoryKeyring},
    query::types::{
        AbciQueryResult, BlockHeader, BlockResult, BlockResults, BroadcastResult, CommitResult,
        SearchOrder, TxExecResult, TxResult, TxSearchResult, ValidatorInfo, ValidatorsResult,
    },
    transport::NodeTransport,
};

pub const MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
pub const KEY_NAME: &str = "alice";
pub const PASSWORD: &str = "12345678";
pub const QUERY_HEIGHT: i64 = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub path: String,
    pub data: Vec<u8>,
}

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, Vec<u8>>>,
    queries: Mutex<Vec<RecordedQuery>>,
    broadcasts: Mutex<Vec<(Vec<u8>, BroadcastMode)>>,
    broadcast_code: Mutex<(u32, String)>,
    tx_searches: Mutex<Vec<String>>,
    tx_search_result: Mutex<TxSearchResult>,
    broadcast_failure: Mutex<Option<String>>,
    tx_search_failure: Mutex<Option<String>>,
    calls: Mutex<usize>,
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn header(height: i64) -> BlockHeader {
    BlockHeader {
        chain_id: "testchain-1".to_string(),
        height,
        time: "2021-01-01T00:00:00Z".to_string(),
        last_block_hash: "default block ID hash".to_string(),
        app_hash: "default app hash".to_string(),
        proposer_address: String::new(),
    }
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_response(&self, path: &str, value: Vec<u8>) {
        lock(&self.responses).insert(path.to_string(), value);
    }

    pub fn set_json_response(&self, path: &str, value: serde_json::Value) {
        self.set_response(path, value.to_string().into_bytes());
    }

    pub fn set_broadcast_code(&self, code: u32, log: &str) {
        *lock(&self.broadcast_code) = (code, log.to_string());
    }

    pub fn set_tx_search_result(&self, result: TxSearchResult) {
        *lock(&self.tx_search_result) = result;
    }

    /// Makes every broadcast fail at the rpc layer with `reason`.
    pub fn fail_broadcast(&self, reason: &str) {
        *lock(&self.broadcast_failure) = Some(reason.to_string());
    }

    pub fn fail_tx_search(&self, reason: &str) {
        *lock(&self.tx_search_failure) = Some(reason.to_string());
    }

    /// Every transport call made so far.
    pub fn calls(&self) -> usize {
        *lock(&self.calls)
    }

    pub fn queries(&self) -> Vec<RecordedQuery> {
        lock(&self.queries).clone()
    }

    pub fn broadcasts(&self) -> Vec<(Vec<u8>, BroadcastMode)> {
        lock(&self.broadcasts).clone()
    }

    pub fn tx_searches(&self) -> Vec<String> {
        lock(&self.tx_searches).clone()
    }

    fn record_call(&self) {
        *lock(&self.calls) += 1;
    }
}

fn injected(operation: &str, failure: &Mutex<Option<String>>) -> Result<(), Error> {
    match lock(failure).clone() {
        Some(reason) => Err(Error::trpc(
            operation.to_string(),
            TrpcError::client_internal(reason),
        )),
        None => Ok(()),
    }
}

impl NodeTransport for MockTransport {
    fn abci_query(&self, path: &str, data: &[u8]) -> Result<AbciQueryResult, Error> {
        self.record_call();
        lock(&self.queries).push(RecordedQuery {
            path: path.to_string(),
            data: data.to_vec(),
        });

        match lock(&self.responses).get(path) {
            Some(value) => Ok(AbciQueryResult {
                value: value.clone(),
                height: QUERY_HEIGHT,
            }),
            None => Err(Error::abci_query(path.to_string(), 6, "unknown query path".to_string())),
        }
    }

    fn broadcast_tx(&self, tx_bytes: Vec<u8>, mode: BroadcastMode) -> Result<BroadcastResult, Error> {
        self.record_call();
        injected("broadcast tx commit", &self.broadcast_failure)?;
        let hash = hex_encode_upper(sha256(&tx_bytes));
        lock(&self.broadcasts).push((tx_bytes, mode));

        let (code, log) = lock(&self.broadcast_code).clone();
        let exec = TxExecResult {
            code,
            log,
            gas_wanted: 200000,
            gas_used: 100000,
            ..Default::default()
        };

        Ok(BroadcastResult {
            hash,
            height: if mode == BroadcastMode::Block { QUERY_HEIGHT } else { 0 },
            check_tx: TxExecResult {
                code: 0,
                ..Default::default()
            },
            deliver_tx: Some(exec),
        })
    }

    fn block(&self, height: Option<u32>) -> Result<BlockResult, Error> {
        self.record_call();
        let height = height.map_or(QUERY_HEIGHT, i64::from);
        Ok(BlockResult {
            block_hash: "default block hash".to_string(),
            header: header(height),
            txs: vec![],
        })
    }

    fn block_results(&self, height: Option<u32>) -> Result<BlockResults, Error> {
        self.record_call();
        Ok(BlockResults {
            height: height.map_or(QUERY_HEIGHT, i64::from),
            txs_results: vec![TxExecResult::default()],
            ..Default::default()
        })
    }

    fn commit(&self, height: Option<u32>) -> Result<CommitResult, Error> {
        self.record_call();
        Ok(CommitResult {
            header: header(height.map_or(QUERY_HEIGHT, i64::from)),
            block_hash: "default block hash".to_string(),
            canonical: true,
            ..Default::default()
        })
    }

    fn validators(
        &self,
        height: Option<u32>,
        _page: usize,
        _per_page: usize,
    ) -> Result<ValidatorsResult, Error> {
        self.record_call();
        Ok(ValidatorsResult {
            block_height: height.map_or(QUERY_HEIGHT, i64::from),
            validators: vec![ValidatorInfo {
                voting_power: 1000,
                ..Default::default()
            }],
            total: 1,
        })
    }

    fn tx(&self, hash: &str, _prove: bool) -> Result<TxResult, Error> {
        self.record_call();
        Ok(TxResult {
            hash: hash.to_uppercase(),
            height: QUERY_HEIGHT,
            ..Default::default()
        })
    }

    fn tx_search(
        &self,
        query: &str,
        _prove: bool,
        _page: u32,
        _per_page: u8,
        _order: SearchOrder,
    ) -> Result<TxSearchResult, Error> {
        self.record_call();
        lock(&self.tx_searches).push(query.to_string());
        injected("tx_search", &self.tx_search_failure)?;
        Ok(lock(&self.tx_search_result).clone())
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig::new(
        "testURL",
        "testchain-1",
        BroadcastMode::Block,
        "",
        200000,
        1.1,
        "0.00000001okt",
    )
    .unwrap()
}

/// Client with every module over `transport`, plus the key of [`MNEMONIC`].
pub fn mock_client(transport: Arc<MockTransport>) -> (Client, KeyInfo) {
    let keyring = Arc::new(MemoryKeyring::new());
    let from = keyring
        .create_account_with_mnemonic(MNEMONIC, KEY_NAME, PASSWORD)
        .unwrap();

    let client = Client::with_transport(test_config(), transport, keyring);
    (client, from)
}
