use log::{info, trace};
use tendermint_rpc::HttpClient;

use crate::error::Error;

pub fn tendermint_rpc_client(rpc_addr: &str) -> Result<HttpClient, Error> {
    trace!("tendermint rpc connect: {}", rpc_addr);

    let client = HttpClient::new(rpc_addr)
        .map_err(|e| Error::tendermint_rpc_client(rpc_addr.to_string(), e))?;

    info!("tendermint rpc client ready: {}", rpc_addr);

    Ok(client)
}
