use log::{info, warn};
use types::tx::{BroadcastMode, StdTx, TxResponse};

use crate::{
    codec::Codec,
    error::Error,
    query::types::{BroadcastResult, TxExecResult},
    transport::NodeTransport,
};

pub fn broadcast_std_tx(
    transport: &dyn NodeTransport,
    codec: &Codec,
    tx: &StdTx,
    mode: BroadcastMode,
) -> Result<TxResponse, Error> {
    let tx_bytes = codec.encode(tx)?;
    let result = transport.broadcast_tx(tx_bytes, mode)?;

    let response = tx_response(result, mode);
    if response.is_ok() {
        info!("tx {} accepted in {} mode", response.txhash, mode);
    } else {
        warn!(
            "tx {} rejected with code {}: {}",
            response.txhash, response.code, response.raw_log
        );
    }

    Ok(response)
}

/// Block mode reports the DeliverTx result unless CheckTx already failed.
pub fn tx_response(result: BroadcastResult, mode: BroadcastMode) -> TxResponse {
    let exec: TxExecResult = match result.deliver_tx {
        Some(deliver_tx) if result.check_tx.code == 0 => deliver_tx,
        _ => result.check_tx,
    };

    TxResponse {
        height: result.height,
        txhash: result.hash,
        codespace: exec.codespace,
        code: exec.code,
        data: utils::encode::systems::hex_encode_upper(&exec.data),
        raw_log: exec.log,
        info: exec.info,
        gas_wanted: exec.gas_wanted,
        gas_used: exec.gas_used,
        mode: Some(mode),
    }
}
