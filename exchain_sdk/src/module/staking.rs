use std::{any::Any, sync::Arc};

use serde::Serialize;
use types::{
    address::{AccAddress, ConsPubKey, ValAddress},
    decimal::DecCoin,
    staking::{
        Description, DelegatorResp, MsgAddShares, MsgBindProxy, MsgCreateValidator, MsgDeposit,
        MsgDestroyValidator, MsgEditValidator, MsgRegProxy, MsgUnbindProxy, MsgWithdraw,
        StakingParams, Validator, DEFAULT_MIN_SELF_DELEGATION,
    },
    tx::TxResponse,
};

use crate::{
    base::BaseClient,
    codec::Codec,
    error::Error,
    keyring::KeyInfo,
    module::params::{check_acc_addr, check_coin, check_key_params, check_val_addr, check_val_addrs},
};

use super::{broadcast_msgs, Module};

pub const MODULE_NAME: &str = "staking";

pub const VALIDATORS_PATH: &str = "custom/staking/validators";
pub const VALIDATOR_PATH: &str = "custom/staking/validator";
pub const DELEGATOR_PATH: &str = "custom/staking/delegator";
pub const PARAMS_PATH: &str = "custom/staking/parameters";

#[derive(Serialize)]
struct QueryValidatorParams {
    #[serde(rename = "ValidatorAddr")]
    validator_addr: ValAddress,
}

#[derive(Serialize)]
struct QueryDelegatorParams {
    #[serde(rename = "DelegatorAddr")]
    delegator_addr: AccAddress,
}

/// Staking operations. `deposit` delegates, `withdraw` unbonds and
/// `add_shares` votes the delegated shares to validators.
pub struct StakingClient {
    base: Arc<BaseClient>,
}

impl StakingClient {
    pub fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    fn broadcast<M: types::message::Msg>(
        &self,
        from: &KeyInfo,
        password: &str,
        memo: &str,
        msg: M,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        broadcast_msgs(&self.base, from, password, memo, &[msg], account_number, sequence)
    }

    pub fn deposit(
        &self,
        from: &KeyInfo,
        password: &str,
        coin: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;
        let quantity: DecCoin = check_coin(coin)?;

        let msg = MsgDeposit {
            delegator_address: from.address.clone(),
            quantity,
        };
        self.broadcast(from, password, memo, msg, account_number, sequence)
    }

    pub fn withdraw(
        &self,
        from: &KeyInfo,
        password: &str,
        coin: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;
        let quantity = check_coin(coin)?;

        let msg = MsgWithdraw {
            delegator_address: from.address.clone(),
            quantity,
        };
        self.broadcast(from, password, memo, msg, account_number, sequence)
    }

    pub fn add_shares(
        &self,
        from: &KeyInfo,
        password: &str,
        val_addrs: &[&str],
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;
        let validator_addresses = check_val_addrs(val_addrs)?;

        let msg = MsgAddShares {
            delegator_address: from.address.clone(),
            validator_addresses,
        };
        self.broadcast(from, password, memo, msg, account_number, sequence)
    }

    pub fn register_proxy(
        &self,
        from: &KeyInfo,
        password: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;

        let msg = MsgRegProxy {
            proxy_address: from.address.clone(),
            reg: true,
        };
        self.broadcast(from, password, memo, msg, account_number, sequence)
    }

    pub fn unregister_proxy(
        &self,
        from: &KeyInfo,
        password: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;

        let msg = MsgRegProxy {
            proxy_address: from.address.clone(),
            reg: false,
        };
        self.broadcast(from, password, memo, msg, account_number, sequence)
    }

    pub fn bind_proxy(
        &self,
        from: &KeyInfo,
        password: &str,
        proxy_addr: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;
        let proxy_address = check_acc_addr("proxy_addr", proxy_addr)?;

        let msg = MsgBindProxy {
            delegator_address: from.address.clone(),
            proxy_address,
        };
        self.broadcast(from, password, memo, msg, account_number, sequence)
    }

    pub fn unbind_proxy(
        &self,
        from: &KeyInfo,
        password: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;

        let msg = MsgUnbindProxy {
            delegator_address: from.address.clone(),
        };
        self.broadcast(from, password, memo, msg, account_number, sequence)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_validator(
        &self,
        from: &KeyInfo,
        password: &str,
        cons_pubkey: &str,
        moniker: &str,
        identity: &str,
        website: &str,
        details: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;
        let pubkey: ConsPubKey = cons_pubkey.parse().map_err(Error::types)?;
        let min_self_delegation = check_coin(DEFAULT_MIN_SELF_DELEGATION)?;

        let msg = MsgCreateValidator {
            description: Description::new(moniker, identity, website, details),
            min_self_delegation,
            delegator_address: from.address.clone(),
            validator_address: ValAddress::from(&from.address),
            pubkey,
        };
        self.broadcast(from, password, memo, msg, account_number, sequence)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn edit_validator(
        &self,
        from: &KeyInfo,
        password: &str,
        moniker: &str,
        identity: &str,
        website: &str,
        details: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;

        let msg = MsgEditValidator {
            description: Description::new(moniker, identity, website, details),
            address: ValAddress::from(&from.address),
        };
        self.broadcast(from, password, memo, msg, account_number, sequence)
    }

    pub fn destroy_validator(
        &self,
        from: &KeyInfo,
        password: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;

        let msg = MsgDestroyValidator {
            delegator_address: from.address.clone(),
        };
        self.broadcast(from, password, memo, msg, account_number, sequence)
    }

    pub fn query_validators(&self) -> Result<Vec<Validator>, Error> {
        self.base.query_as(VALIDATORS_PATH, &[])
    }

    pub fn query_validator(&self, val_addr: &str) -> Result<Validator, Error> {
        let validator_addr = check_val_addr(val_addr)?;
        let params = serde_json::to_vec(&QueryValidatorParams { validator_addr })
            .map_err(Error::serde_json)?;

        self.base.query_as(VALIDATOR_PATH, &params)
    }

    pub fn query_delegator(&self, del_addr: &str) -> Result<DelegatorResp, Error> {
        let delegator_addr = check_acc_addr("del_addr", del_addr)?;
        let params = serde_json::to_vec(&QueryDelegatorParams { delegator_addr })
            .map_err(Error::serde_json)?;

        self.base.query_as(DELEGATOR_PATH, &params)
    }

    pub fn query_params(&self) -> Result<StakingParams, Error> {
        self.base.query_as(PARAMS_PATH, &[])
    }
}

impl Module for StakingClient {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn register_codec(&self, codec: &mut Codec) {
        codec.register_msg::<MsgDeposit>();
        codec.register_msg::<MsgWithdraw>();
        codec.register_msg::<MsgAddShares>();
        codec.register_msg::<MsgRegProxy>();
        codec.register_msg::<MsgBindProxy>();
        codec.register_msg::<MsgUnbindProxy>();
        codec.register_msg::<MsgCreateValidator>();
        codec.register_msg::<MsgEditValidator>();
        codec.register_msg::<MsgDestroyValidator>();

        codec.register_plain::<Validator>("okexchain/staking/Validator");
        codec.register_plain::<Vec<Validator>>("okexchain/staking/Validators");
        codec.register_plain::<DelegatorResp>("okexchain/staking/DelegatorResp");
        codec.register_plain::<StakingParams>("okexchain/staking/Params");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
