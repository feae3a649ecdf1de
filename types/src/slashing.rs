use serde::{Deserialize, Serialize};

use crate::{address::ValAddress, message::Msg};

pub const ROUTER_KEY: &str = "slashing";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUnjail {
    pub address: ValAddress,
}

impl Msg for MsgUnjail {
    const TYPE_NAME: &'static str = "cosmos-sdk/MsgUnjail";

    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn msg_type(&self) -> &'static str {
        "unjail"
    }
}
