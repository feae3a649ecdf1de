use log::trace;
use tendermint_rpc::{Client, HttpClient};

use crate::{error::Error, query::types::AbciQueryResult};

/// Runs an ABCI query at the latest height. A non-zero application code is
/// turned into an error carrying the path, code and log.
pub async fn abci_query(
    trpc: &HttpClient,
    path: String,
    data: Vec<u8>,
) -> Result<AbciQueryResult, Error> {
    trace!("abci query {} with {} bytes", path, data.len());

    let response = trpc
        .abci_query(Some(path.clone()), data, None, false)
        .await
        .map_err(|e| Error::trpc("abci query".to_string(), e))?;

    if response.code.is_err() {
        return Err(Error::abci_query(path, response.code.value(), response.log));
    }

    Ok(AbciQueryResult {
        value: response.value,
        height: response.height.value() as i64,
    })
}
