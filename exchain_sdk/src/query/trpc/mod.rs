use tendermint::{abci::Event, block::Header};
use utils::encode::systems::hex_encode_upper;

use super::types::{AbciEvent, BlockHeader, EventAttribute};

/// Maps a CheckTx/DeliverTx style result into a [`TxExecResult`](super::types::TxExecResult).
macro_rules! exec_result {
    ($result:expr) => {
        $crate::query::types::TxExecResult {
            code: $result.code.value(),
            codespace: $result.codespace.clone(),
            data: $result.data.to_vec(),
            log: $result.log.clone(),
            info: $result.info.clone(),
            gas_wanted: $result.gas_wanted,
            gas_used: $result.gas_used,
            events: $crate::query::trpc::event_list(&$result.events),
        }
    };
}

pub mod abci;
pub mod block;
pub mod connect;
pub mod consensus;
pub mod tx;

pub fn event_list(events: &[Event]) -> Vec<AbciEvent> {
    events
        .iter()
        .map(|event| AbciEvent {
            kind: event.kind.clone(),
            attributes: event
                .attributes
                .iter()
                .map(|attr| EventAttribute {
                    key: attr.key.clone(),
                    value: attr.value.clone(),
                })
                .collect(),
        })
        .collect()
}

pub fn block_header(header: &Header) -> BlockHeader {
    BlockHeader {
        chain_id: header.chain_id.to_string(),
        height: header.height.value() as i64,
        time: header.time.to_rfc3339(),
        last_block_hash: header
            .last_block_id
            .as_ref()
            .map(|id| id.hash.to_string())
            .unwrap_or_default(),
        app_hash: hex_encode_upper(&header.app_hash),
        proposer_address: header.proposer_address.to_string(),
    }
}
