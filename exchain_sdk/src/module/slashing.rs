use std::{any::Any, sync::Arc};

use types::{address::ValAddress, slashing::MsgUnjail, tx::TxResponse};

use crate::{
    base::BaseClient, codec::Codec, error::Error, keyring::KeyInfo,
    module::params::check_key_params,
};

use super::{broadcast_msgs, Module};

pub const MODULE_NAME: &str = "slashing";

pub struct SlashingClient {
    base: Arc<BaseClient>,
}

impl SlashingClient {
    pub fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Releases the validator operated by `from` from jail.
    pub fn unjail(
        &self,
        from: &KeyInfo,
        password: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;

        let msg = MsgUnjail {
            address: ValAddress::from(&from.address),
        };
        broadcast_msgs(&self.base, from, password, memo, &[msg], account_number, sequence)
    }
}

impl Module for SlashingClient {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn register_codec(&self, codec: &mut Codec) {
        codec.register_msg::<MsgUnjail>();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
