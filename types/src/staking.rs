use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tendermint_proto::serializers::from_str;

use crate::{
    address::{AccAddress, ConsPubKey, ValAddress},
    decimal::{Dec, DecCoin},
    error::TypesError,
    message::{invalid_msg, Msg},
};

pub const ROUTER_KEY: &str = "staking";

/// Self delegation attached to `MsgCreateValidator`.
pub const DEFAULT_MIN_SELF_DELEGATION: &str = "10000okt";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub moniker: String,
    pub identity: String,
    pub website: String,
    pub details: String,
}

impl Description {
    pub fn new(moniker: &str, identity: &str, website: &str, details: &str) -> Self {
        Description {
            moniker: moniker.to_string(),
            identity: identity.to_string(),
            website: website.to_string(),
            details: details.to_string(),
        }
    }
}

macro_rules! impl_msg {
    ($msg:ty, $name:expr, $msg_type:expr) => {
        impl Msg for $msg {
            const TYPE_NAME: &'static str = $name;

            fn route(&self) -> &'static str {
                ROUTER_KEY
            }

            fn msg_type(&self) -> &'static str {
                $msg_type
            }

            fn validate_basic(&self) -> Result<(), TypesError> {
                self.validate()
            }
        }
    };
}

fn check_positive<M: Msg>(coin: &DecCoin) -> Result<(), TypesError> {
    if !coin.is_positive() {
        return Err(invalid_msg::<M>(format!("quantity must be positive: {}", coin)));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDeposit {
    pub delegator_address: AccAddress,
    pub quantity: DecCoin,
}

impl MsgDeposit {
    fn validate(&self) -> Result<(), TypesError> {
        check_positive::<Self>(&self.quantity)
    }
}
impl_msg!(MsgDeposit, "okexchain/staking/MsgDeposit", "deposit");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgWithdraw {
    pub delegator_address: AccAddress,
    pub quantity: DecCoin,
}

impl MsgWithdraw {
    fn validate(&self) -> Result<(), TypesError> {
        check_positive::<Self>(&self.quantity)
    }
}
impl_msg!(MsgWithdraw, "okexchain/staking/MsgWithdraw", "withdraw");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAddShares {
    pub delegator_address: AccAddress,
    pub validator_addresses: Vec<ValAddress>,
}

impl MsgAddShares {
    fn validate(&self) -> Result<(), TypesError> {
        if self.validator_addresses.is_empty() {
            return Err(invalid_msg::<Self>("empty validator address list"));
        }

        let mut seen = HashSet::new();
        for val in &self.validator_addresses {
            if !seen.insert(val) {
                return Err(invalid_msg::<Self>(format!("duplicate validator address: {}", val)));
            }
        }
        Ok(())
    }
}
impl_msg!(MsgAddShares, "okexchain/staking/MsgAddShares", "add_shares_to_validators");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRegProxy {
    pub proxy_address: AccAddress,
    pub reg: bool,
}

impl MsgRegProxy {
    fn validate(&self) -> Result<(), TypesError> {
        Ok(())
    }
}
impl_msg!(MsgRegProxy, "okexchain/staking/MsgRegProxy", "reg_or_unreg_proxy");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgBindProxy {
    pub delegator_address: AccAddress,
    pub proxy_address: AccAddress,
}

impl MsgBindProxy {
    fn validate(&self) -> Result<(), TypesError> {
        if self.delegator_address == self.proxy_address {
            return Err(invalid_msg::<Self>("delegator cannot bind itself as proxy"));
        }
        Ok(())
    }
}
impl_msg!(MsgBindProxy, "okexchain/staking/MsgBindProxy", "bind_proxy");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUnbindProxy {
    pub delegator_address: AccAddress,
}

impl MsgUnbindProxy {
    fn validate(&self) -> Result<(), TypesError> {
        Ok(())
    }
}
impl_msg!(MsgUnbindProxy, "okexchain/staking/MsgUnbindProxy", "unbind_proxy");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateValidator {
    pub description: Description,
    pub min_self_delegation: DecCoin,
    pub delegator_address: AccAddress,
    pub validator_address: ValAddress,
    pub pubkey: ConsPubKey,
}

impl MsgCreateValidator {
    fn validate(&self) -> Result<(), TypesError> {
        if self.description.moniker.trim().is_empty() {
            return Err(invalid_msg::<Self>("empty moniker"));
        }
        if AccAddress::from(&self.validator_address) != self.delegator_address {
            return Err(invalid_msg::<Self>(
                "validator address must be derived from the delegator address",
            ));
        }
        check_positive::<Self>(&self.min_self_delegation)
    }
}
impl_msg!(MsgCreateValidator, "okexchain/staking/MsgCreateValidator", "create_validator");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgEditValidator {
    pub description: Description,
    pub address: ValAddress,
}

impl MsgEditValidator {
    fn validate(&self) -> Result<(), TypesError> {
        Ok(())
    }
}
impl_msg!(MsgEditValidator, "okexchain/staking/MsgEditValidator", "edit_validator");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDestroyValidator {
    pub delegator_address: AccAddress,
}

impl MsgDestroyValidator {
    fn validate(&self) -> Result<(), TypesError> {
        Ok(())
    }
}
impl_msg!(MsgDestroyValidator, "okexchain/staking/MsgDestroyValidator", "destroy_validator");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    pub operator_address: ValAddress,
    /// Bech32 `exvalconspub` string as returned by the node.
    pub consensus_pubkey: String,
    #[serde(default)]
    pub jailed: bool,
    #[serde(default)]
    pub status: u8,
    #[serde(default)]
    pub tokens: String,
    pub delegator_shares: Dec,
    pub description: Description,
    #[serde(with = "from_str", default)]
    pub unbonding_height: i64,
    #[serde(default)]
    pub unbonding_time: String,
    #[serde(default)]
    pub min_self_delegation: Option<Dec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegatorResp {
    pub delegator_address: AccAddress,
    #[serde(default)]
    pub validator_address: Option<Vec<ValAddress>>,
    pub shares: Dec,
    pub tokens: Dec,
    #[serde(default)]
    pub unbonded_tokens: Option<Dec>,
    #[serde(default)]
    pub completion_time: String,
    #[serde(default)]
    pub is_proxy: bool,
    #[serde(default)]
    pub total_delegated_tokens: Option<Dec>,
    #[serde(default)]
    pub proxy_address: Option<AccAddress>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingParams {
    /// Nanoseconds.
    #[serde(with = "from_str")]
    pub unbonding_time: i64,
    pub max_bonded_validators: u16,
    #[serde(default)]
    pub epoch: u16,
    #[serde(default)]
    pub max_validators_to_add_shares: u16,
    pub min_delegation: Dec,
    pub min_self_delegation: Dec,
}

#[cfg(test)]
pub mod staking_tests {
    use serde_json::json;

    use super::{MsgAddShares, MsgCreateValidator, MsgDeposit, Description};
    use crate::{
        address::{AccAddress, ValAddress},
        message::Msg,
    };

    const ADDR: &str = "ex1qj5c07sm6jetjz8f509qtrxgh4psxkv3ddyq7u";
    const VAL1: &str = "exvaloper1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5pvslt3";
    const VAL2: &str = "exvaloper1z5tpwxqergd3c8g7ruszzg3rysjjvfegkfy3r8";
    const VAL_CONS_PK: &str =
        "exvalconspub1zcjduepqs2c6xnrfjwxzfclrpq4rh5mxrwlxmncvq6l48ah3ccdew2j6nnfsh3tc5f";

    #[test]
    pub fn deposit_json_shape() {
        let msg = MsgDeposit {
            delegator_address: ADDR.parse().unwrap(),
            quantity: "10.24okt".parse().unwrap(),
        };
        assert!(msg.validate_basic().is_ok());
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "delegator_address": ADDR,
                "quantity": {"denom": "okt", "amount": "10.240000000000000000"}
            })
        );

        let zero = MsgDeposit {
            delegator_address: ADDR.parse().unwrap(),
            quantity: "0okt".parse().unwrap(),
        };
        assert!(zero.validate_basic().is_err());
    }

    #[test]
    pub fn add_shares_rejects_duplicates() {
        let val1: ValAddress = VAL1.parse().unwrap();
        let val2: ValAddress = VAL2.parse().unwrap();

        let ok = MsgAddShares {
            delegator_address: ADDR.parse().unwrap(),
            validator_addresses: vec![val1.clone(), val2],
        };
        assert!(ok.validate_basic().is_ok());

        let dup = MsgAddShares {
            delegator_address: ADDR.parse().unwrap(),
            validator_addresses: vec![val1.clone(), val1],
        };
        assert!(dup.validate_basic().is_err());

        let empty = MsgAddShares {
            delegator_address: ADDR.parse().unwrap(),
            validator_addresses: vec![],
        };
        assert!(empty.validate_basic().is_err());
    }

    #[test]
    pub fn create_validator_requires_own_operator() {
        let delegator: AccAddress = ADDR.parse().unwrap();
        let msg = MsgCreateValidator {
            description: Description::new("node0", "", "", ""),
            min_self_delegation: "10000okt".parse().unwrap(),
            delegator_address: delegator.clone(),
            validator_address: ValAddress::from(&delegator),
            pubkey: VAL_CONS_PK.parse().unwrap(),
        };
        assert!(msg.validate_basic().is_ok());

        let foreign = MsgCreateValidator {
            validator_address: VAL1.parse().unwrap(),
            ..msg
        };
        assert!(foreign.validate_basic().is_err());
    }
}
