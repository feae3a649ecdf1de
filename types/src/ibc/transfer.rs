use serde::{Deserialize, Serialize};
use tendermint_proto::serializers::from_str;

use crate::{
    address::AccAddress,
    decimal::DecCoin,
    error::TypesError,
    ibc::{
        height::Height,
        identifier::{ChannelId, PortId},
    },
    message::{invalid_msg, Msg},
};

pub const ROUTER_KEY: &str = "transfer";

/// Version string of the ics20 fungible token transfer application.
pub const ICS20_VERSION: &str = "ics20-1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgTransfer {
    pub source_port: PortId,
    pub source_channel: ChannelId,
    pub token: DecCoin,
    pub sender: AccAddress,
    /// Address on the counterparty chain, not necessarily bech32 `ex`.
    pub receiver: String,
    pub timeout_height: Height,
    #[serde(with = "from_str")]
    pub timeout_timestamp: u64,
}

impl Msg for MsgTransfer {
    const TYPE_NAME: &'static str = "cosmos-sdk/MsgTransfer";

    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn msg_type(&self) -> &'static str {
        "transfer"
    }

    fn validate_basic(&self) -> Result<(), TypesError> {
        if !self.token.is_positive() {
            return Err(invalid_msg::<Self>(format!("token must be positive: {}", self.token)));
        }
        if self.receiver.trim().is_empty() {
            return Err(invalid_msg::<Self>("missing receiver address"));
        }
        if self.timeout_height.is_zero() && self.timeout_timestamp == 0 {
            return Err(invalid_msg::<Self>(
                "timeout height and timeout timestamp cannot both be 0",
            ));
        }
        Ok(())
    }
}
