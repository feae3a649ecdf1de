use std::{any::Any, sync::Arc};

use log::debug;

use crate::{
    base::BaseClient,
    codec::Codec,
    error::Error,
    module::params::check_page,
    query::types::{
        BlockResult, BlockResults, CommitResult, TxResult, TxSearchResult, ValidatorsResult,
    },
};

use super::Module;

pub const MODULE_NAME: &str = "tendermint";

/// Page size used when listing the validator set of one height.
const VALIDATORS_PER_PAGE: u32 = 100;

/// Turns `key1=value1&key2=value2` into `key1='value1' AND key2='value2'`.
pub fn events_to_query(events: &str) -> Result<String, Error> {
    let invalid = |reason: String| Error::invalid_param("events".to_string(), reason);

    if events.trim().is_empty() {
        return Err(invalid("empty event filter".to_string()));
    }

    let conditions = events
        .split('&')
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .filter(|(_, value)| !value.contains('='))
                .ok_or_else(|| invalid(format!("expected key=value, got {:?}", pair)))?;

            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                return Err(invalid(format!("empty key or value in {:?}", pair)));
            }
            Ok(format!("{}='{}'", key, value))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(conditions.join(" AND "))
}

pub struct TendermintClient {
    base: Arc<BaseClient>,
}

impl TendermintClient {
    pub fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub fn query_block(&self, height: i64) -> Result<BlockResult, Error> {
        self.base.block(Some(height))
    }

    pub fn query_block_results(&self, height: i64) -> Result<BlockResults, Error> {
        self.base.block_results(Some(height))
    }

    pub fn query_commit_result(&self, height: i64) -> Result<CommitResult, Error> {
        self.base.commit(Some(height))
    }

    pub fn query_validators_result(&self, height: i64) -> Result<ValidatorsResult, Error> {
        self.base.validators(Some(height), 1, VALIDATORS_PER_PAGE)
    }

    pub fn query_tx_result(&self, hash_hex: &str, prove: bool) -> Result<TxResult, Error> {
        self.base.tx(hash_hex, prove)
    }

    /// Searches txs matching every `key=value` pair of `events`, joined by `&`,
    /// e.g. `message.sender=ex1...&message.action=send`.
    pub fn query_txs_by_events(
        &self,
        events: &str,
        page: u32,
        limit: u32,
    ) -> Result<TxSearchResult, Error> {
        check_page(page, limit)?;
        let query = events_to_query(events)?;
        debug!("tx search: {}", query);

        self.base.tx_search(&query, false, page, limit, "")
    }
}

impl Module for TendermintClient {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn register_codec(&self, _codec: &mut Codec) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
pub mod tendermint_client_tests {
    use crate::mock::{mock_client, MockTransport};

    use super::events_to_query;

    const TX_HASH: &str = "0x9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

    #[test]
    pub fn event_filter() {
        assert_eq!(
            events_to_query("message.sender=ex1abc&message.action=send").unwrap(),
            "message.sender='ex1abc' AND message.action='send'"
        );
        assert_eq!(events_to_query("tx.height=5").unwrap(), "tx.height='5'");

        assert!(events_to_query("").is_err());
        assert!(events_to_query("message.sender").is_err());
        assert!(events_to_query("a=b=c").is_err());
        assert!(events_to_query("a=&b=c").is_err());
        assert!(events_to_query("=b").is_err());
        assert!(events_to_query("a=b&").is_err());
    }

    #[test]
    pub fn block_queries() {
        let _ = env_logger::builder().is_test(true).try_init();
        let transport = MockTransport::new();
        let (client, _) = mock_client(transport.clone());
        let tendermint = client.tendermint();

        let block = tendermint.query_block(1024).unwrap();
        assert_eq!(block.header.height, 1024);
        assert_eq!(block.header.chain_id, "testchain-1");
        assert_eq!(tendermint.query_block_results(7).unwrap().height, 7);
        assert!(tendermint.query_commit_result(1024).unwrap().canonical);
        assert_eq!(tendermint.query_validators_result(1024).unwrap().total, 1);

        let tx = tendermint.query_tx_result(TX_HASH, false).unwrap();
        assert_eq!(tx.height, 1024);
        assert_eq!(transport.calls(), 5);

        assert!(tendermint.query_block(0).is_err());
        assert!(tendermint.query_block_results(-1).is_err());
        assert!(tendermint.query_commit_result(-1).is_err());
        assert!(tendermint.query_validators_result(0).is_err());
        assert!(tendermint.query_tx_result("0xabcd", false).is_err());
        assert!(tendermint.query_txs_by_events("tx.height=1", 0, 10).is_err());
        assert_eq!(transport.calls(), 5);
    }
}
