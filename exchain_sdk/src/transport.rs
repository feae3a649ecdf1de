use std::sync::Arc;

use tendermint_rpc::HttpClient;
use tokio::runtime::Runtime;
use types::tx::BroadcastMode;

use crate::{
    error::Error,
    query::{
        trpc,
        types::{
            AbciQueryResult, BlockResult, BlockResults, BroadcastResult, CommitResult,
            SearchOrder, TxResult, TxSearchResult, ValidatorsResult,
        },
    },
};

/// Blocking view of a node's RPC surface. Every call completes one round-trip
/// before returning. Arguments are validated by the caller.
pub trait NodeTransport: Send + Sync {
    fn abci_query(&self, path: &str, data: &[u8]) -> Result<AbciQueryResult, Error>;

    fn broadcast_tx(&self, tx_bytes: Vec<u8>, mode: BroadcastMode) -> Result<BroadcastResult, Error>;

    fn block(&self, height: Option<u32>) -> Result<BlockResult, Error>;

    fn block_results(&self, height: Option<u32>) -> Result<BlockResults, Error>;

    fn commit(&self, height: Option<u32>) -> Result<CommitResult, Error>;

    fn validators(
        &self,
        height: Option<u32>,
        page: usize,
        per_page: usize,
    ) -> Result<ValidatorsResult, Error>;

    fn tx(&self, hash: &str, prove: bool) -> Result<TxResult, Error>;

    fn tx_search(
        &self,
        query: &str,
        prove: bool,
        page: u32,
        per_page: u8,
        order: SearchOrder,
    ) -> Result<TxSearchResult, Error>;
}

/// Tendermint RPC over HTTP, driven on an owned runtime. Must not be called
/// from inside another tokio runtime.
pub struct TendermintTransport {
    client: HttpClient,
    rt: Arc<Runtime>,
}

impl TendermintTransport {
    pub fn new(node_uri: &str) -> Result<Self, Error> {
        let client = trpc::connect::tendermint_rpc_client(node_uri)?;
        let rt = Runtime::new().map_err(Error::runtime)?;

        Ok(Self {
            client,
            rt: Arc::new(rt),
        })
    }
}

impl NodeTransport for TendermintTransport {
    fn abci_query(&self, path: &str, data: &[u8]) -> Result<AbciQueryResult, Error> {
        self.rt.block_on(trpc::abci::abci_query(
            &self.client,
            path.to_string(),
            data.to_vec(),
        ))
    }

    fn broadcast_tx(&self, tx_bytes: Vec<u8>, mode: BroadcastMode) -> Result<BroadcastResult, Error> {
        self.rt
            .block_on(trpc::tx::broadcast_tx(&self.client, tx_bytes, mode))
    }

    fn block(&self, height: Option<u32>) -> Result<BlockResult, Error> {
        self.rt.block_on(trpc::block::block(&self.client, height))
    }

    fn block_results(&self, height: Option<u32>) -> Result<BlockResults, Error> {
        self.rt
            .block_on(trpc::block::block_results(&self.client, height))
    }

    fn commit(&self, height: Option<u32>) -> Result<CommitResult, Error> {
        self.rt
            .block_on(trpc::consensus::commit(&self.client, height))
    }

    fn validators(
        &self,
        height: Option<u32>,
        page: usize,
        per_page: usize,
    ) -> Result<ValidatorsResult, Error> {
        self.rt.block_on(trpc::consensus::validators(
            &self.client,
            height,
            page,
            per_page,
        ))
    }

    fn tx(&self, hash: &str, prove: bool) -> Result<TxResult, Error> {
        let hash = trpc::tx::parse_tx_hash(hash)?;
        self.rt.block_on(trpc::tx::tx(&self.client, hash, prove))
    }

    fn tx_search(
        &self,
        query: &str,
        prove: bool,
        page: u32,
        per_page: u8,
        order: SearchOrder,
    ) -> Result<TxSearchResult, Error> {
        self.rt.block_on(trpc::tx::tx_search(
            &self.client,
            query,
            prove,
            page,
            per_page,
            order,
        ))
    }
}
