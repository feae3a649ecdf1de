use std::str::FromStr;

use log::debug;
use tendermint::{hash::Algorithm, Hash};
use tendermint_rpc::{
    endpoint::tx::Response as TrpcTxResponse, query::Query, Client, HttpClient, Order,
};
use types::tx::BroadcastMode;

use crate::{
    error::Error,
    query::types::{BroadcastResult, SearchOrder, TxExecResult, TxResult, TxSearchResult},
};

fn tx_result(response: &TrpcTxResponse) -> TxResult {
    TxResult {
        hash: response.hash.to_string(),
        height: response.height.value() as i64,
        index: response.index,
        tx_result: exec_result!(response.tx_result),
        tx: response.tx.clone(),
        has_proof: response.proof.is_some(),
    }
}

pub fn parse_tx_hash(hash: &str) -> Result<Hash, Error> {
    let hex = hash.trim().trim_start_matches("0x").to_uppercase();
    Hash::from_hex_upper(Algorithm::Sha256, &hex).map_err(|e| {
        Error::invalid_param("hash".to_string(), format!("{}: {}", hash, e))
    })
}

pub async fn tx(trpc: &HttpClient, hash: Hash, prove: bool) -> Result<TxResult, Error> {
    let response = trpc
        .tx(hash, prove)
        .await
        .map_err(|e| Error::trpc("tx".to_string(), e))?;

    Ok(tx_result(&response))
}

pub async fn tx_search(
    trpc: &HttpClient,
    query: &str,
    prove: bool,
    page: u32,
    per_page: u8,
    order: SearchOrder,
) -> Result<TxSearchResult, Error> {
    let query = Query::from_str(query)
        .map_err(|e| Error::invalid_param("query".to_string(), e.to_string()))?;
    let order = match order {
        SearchOrder::Ascending => Order::Ascending,
        SearchOrder::Descending => Order::Descending,
    };

    let response = trpc
        .tx_search(query, prove, page, per_page, order)
        .await
        .map_err(|e| Error::trpc("tx_search".to_string(), e))?;

    Ok(TxSearchResult {
        txs: response.txs.iter().map(tx_result).collect(),
        total_count: response.total_count,
    })
}

pub async fn broadcast_tx(
    trpc: &HttpClient,
    tx_bytes: Vec<u8>,
    mode: BroadcastMode,
) -> Result<BroadcastResult, Error> {
    debug!("broadcast {} bytes in {} mode", tx_bytes.len(), mode);

    match mode {
        BroadcastMode::Sync => {
            let response = trpc
                .broadcast_tx_sync(tx_bytes)
                .await
                .map_err(|e| Error::trpc("broadcast tx sync".to_string(), e))?;
            Ok(BroadcastResult {
                hash: response.hash.to_string(),
                height: 0,
                check_tx: TxExecResult {
                    code: response.code.value(),
                    codespace: response.codespace,
                    data: response.data.to_vec(),
                    log: response.log,
                    ..Default::default()
                },
                deliver_tx: None,
            })
        }
        BroadcastMode::Async => {
            let response = trpc
                .broadcast_tx_async(tx_bytes)
                .await
                .map_err(|e| Error::trpc("broadcast tx async".to_string(), e))?;
            Ok(BroadcastResult {
                hash: response.hash.to_string(),
                height: 0,
                check_tx: TxExecResult {
                    code: response.code.value(),
                    codespace: response.codespace,
                    data: response.data.to_vec(),
                    log: response.log,
                    ..Default::default()
                },
                deliver_tx: None,
            })
        }
        BroadcastMode::Block => {
            let response = trpc
                .broadcast_tx_commit(tx_bytes)
                .await
                .map_err(|e| Error::trpc("broadcast tx commit".to_string(), e))?;
            Ok(BroadcastResult {
                hash: response.hash.to_string(),
                height: response.height.value() as i64,
                check_tx: exec_result!(response.check_tx),
                deliver_tx: Some(exec_result!(response.tx_result)),
            })
        }
    }
}
