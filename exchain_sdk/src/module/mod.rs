use std::any::Any;

use types::{message::Msg, tx::TxResponse};

use crate::{base::BaseClient, codec::Codec, error::Error, keyring::KeyInfo};

pub mod auth;
pub mod evm;
pub mod governance;
pub mod ibc;
pub mod params;
pub mod slashing;
pub mod staking;
pub mod tendermint;
pub mod token;

/// A protocol module client: a stable name, the types it puts into the
/// shared codec, and its own typed operations.
pub trait Module: Any + Send + Sync {
    fn name(&self) -> &'static str;

    fn register_codec(&self, codec: &mut Codec);

    fn as_any(&self) -> &dyn Any;
}

/// Validates each message, wraps it for the codec and broadcasts them in
/// one tx signed by `from`.
pub(crate) fn broadcast_msgs<M: Msg>(
    base: &BaseClient,
    from: &KeyInfo,
    password: &str,
    memo: &str,
    msgs: &[M],
    account_number: u64,
    sequence: u64,
) -> Result<TxResponse, Error> {
    let codec = base.codec()?;
    let std_msgs = msgs
        .iter()
        .map(|msg| {
            msg.validate_basic().map_err(Error::types)?;
            codec.to_std_msg(msg)
        })
        .collect::<Result<Vec<_>, Error>>()?;

    base.build_and_broadcast(&from.name, password, memo, std_msgs, account_number, sequence)
}
