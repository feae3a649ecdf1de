use serde::{Deserialize, Serialize};

use crate::{
    address::AccAddress,
    decimal::{Dec, DecCoin},
    error::TypesError,
    message::{invalid_msg, Msg},
};

pub const ROUTER_KEY: &str = "token";

/// Upper bound of receivers in one `MsgMultiSend`.
pub const MAX_TRANSFER_UNITS: usize = 1000;

fn check_coins<M: Msg>(coins: &[DecCoin]) -> Result<(), TypesError> {
    if coins.is_empty() {
        return Err(invalid_msg::<M>("empty coins"));
    }
    if let Some(coin) = coins.iter().find(|c| !c.is_positive()) {
        return Err(invalid_msg::<M>(format!("amount must be positive: {}", coin)));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSend {
    pub from_address: AccAddress,
    pub to_address: AccAddress,
    pub amount: Vec<DecCoin>,
}

impl Msg for MsgSend {
    const TYPE_NAME: &'static str = "okexchain/token/MsgTransfer";

    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn msg_type(&self) -> &'static str {
        "send"
    }

    fn validate_basic(&self) -> Result<(), TypesError> {
        check_coins::<Self>(&self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferUnit {
    #[serde(rename = "to_address")]
    pub to: AccAddress,
    pub coins: Vec<DecCoin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgMultiSend {
    pub from_address: AccAddress,
    pub transfers: Vec<TransferUnit>,
}

impl Msg for MsgMultiSend {
    const TYPE_NAME: &'static str = "okexchain/token/MsgMultiTransfer";

    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn msg_type(&self) -> &'static str {
        "multi-send"
    }

    fn validate_basic(&self) -> Result<(), TypesError> {
        if self.transfers.is_empty() || self.transfers.len() > MAX_TRANSFER_UNITS {
            return Err(invalid_msg::<Self>(format!(
                "transfers must hold 1-{} units",
                MAX_TRANSFER_UNITS
            )));
        }
        for unit in &self.transfers {
            check_coins::<Self>(&unit.coins)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    pub description: String,
    pub symbol: String,
    #[serde(default)]
    pub original_symbol: String,
    #[serde(default)]
    pub whole_name: String,
    pub original_total_supply: Dec,
    #[serde(default)]
    pub total_supply: Option<Dec>,
    pub owner: AccAddress,
    pub mintable: bool,
}

#[cfg(test)]
pub mod token_tests {
    use super::{MsgMultiSend, MsgSend, TransferUnit};
    use crate::{decimal::parse_dec_coins, message::Msg};

    const ADDR: &str = "ex1qj5c07sm6jetjz8f509qtrxgh4psxkv3ddyq7u";
    const TO: &str = "ex19y4zktpd9chnqvfjxv6r2d3h8qun5weupfngnh";

    #[test]
    pub fn send_requires_coins() {
        let msg = MsgSend {
            from_address: ADDR.parse().unwrap(),
            to_address: TO.parse().unwrap(),
            amount: parse_dec_coins("1okt").unwrap(),
        };
        assert!(msg.validate_basic().is_ok());
        assert_eq!(
            serde_json::to_value(&msg).unwrap()["amount"][0]["amount"],
            "1.000000000000000000"
        );

        let empty = MsgSend { amount: vec![], ..msg };
        assert!(empty.validate_basic().is_err());
    }

    #[test]
    pub fn multi_send_units() {
        let msg = MsgMultiSend {
            from_address: ADDR.parse().unwrap(),
            transfers: vec![TransferUnit {
                to: TO.parse().unwrap(),
                coins: parse_dec_coins("1okt,2xxb-781").unwrap(),
            }],
        };
        assert!(msg.validate_basic().is_ok());
        assert_eq!(serde_json::to_value(&msg).unwrap()["transfers"][0]["to_address"], TO);

        let empty = MsgMultiSend { transfers: vec![], ..msg };
        assert!(empty.validate_basic().is_err());
    }
}
