use tendermint::block::Height;
use tendermint_rpc::{Client, HttpClient};

use crate::{
    error::Error,
    query::{
        trpc::{block_header, event_list},
        types::{BlockResult, BlockResults},
    },
};

pub async fn block(trpc: &HttpClient, height: Option<u32>) -> Result<BlockResult, Error> {
    let response = match height {
        Some(height) => trpc.block(Height::from(height)).await,
        None => trpc.latest_block().await,
    }
    .map_err(|e| Error::trpc("block".to_string(), e))?;

    Ok(BlockResult {
        block_hash: response.block_id.hash.to_string(),
        header: block_header(&response.block.header),
        txs: response.block.data,
    })
}

pub async fn block_results(trpc: &HttpClient, height: Option<u32>) -> Result<BlockResults, Error> {
    let response = match height {
        Some(height) => trpc.block_results(Height::from(height)).await,
        None => trpc.latest_block_results().await,
    }
    .map_err(|e| Error::trpc("block results".to_string(), e))?;

    Ok(BlockResults {
        height: response.height.value() as i64,
        txs_results: response
            .txs_results
            .unwrap_or_default()
            .iter()
            .map(|r| exec_result!(r))
            .collect(),
        begin_block_events: event_list(&response.begin_block_events.unwrap_or_default()),
        end_block_events: event_list(&response.end_block_events.unwrap_or_default()),
    })
}
