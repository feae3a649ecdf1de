use std::{any::Any, sync::Arc};

use types::{
    decimal::parse_dec_coins,
    token::{MsgMultiSend, MsgSend, TokenInfo, TransferUnit},
    tx::TxResponse,
};

use crate::{
    base::BaseClient,
    codec::Codec,
    error::Error,
    keyring::KeyInfo,
    module::params::{check_acc_addr, check_coins, check_key_params},
};

use super::{broadcast_msgs, Module};

pub const MODULE_NAME: &str = "token";

pub const TOKEN_INFO_PATH: &str = "custom/token/info";

/// Parses one `<address> <coins>` pair per line, e.g.
///
/// ```text
/// ex1qj5c07sm6jetjz8f509qtrxgh4psxkv3ddyq7u 1okt
/// ex19y4zktpd9chnqvfjxv6r2d3h8qun5weupfngnh 2okt,1.5xxb-781
/// ```
pub fn parse_transfers_str(transfers: &str) -> Result<Vec<TransferUnit>, Error> {
    transfers
        .trim()
        .lines()
        .map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [to, coins] = fields.as_slice() else {
                return Err(Error::invalid_param(
                    "transfers".to_string(),
                    format!("expected `<address> <coins>`, got {:?}", line),
                ));
            };

            Ok(TransferUnit {
                to: check_acc_addr("to", to)?,
                coins: parse_dec_coins(coins).map_err(Error::types)?,
            })
        })
        .collect()
}

pub struct TokenClient {
    base: Arc<BaseClient>,
}

impl TokenClient {
    pub fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn send(
        &self,
        from: &KeyInfo,
        password: &str,
        to_addr: &str,
        coins: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;
        let to_address = check_acc_addr("to_addr", to_addr)?;
        let amount = check_coins(coins)?;

        let msg = MsgSend {
            from_address: from.address.clone(),
            to_address,
            amount,
        };
        broadcast_msgs(&self.base, from, password, memo, &[msg], account_number, sequence)
    }

    /// `transfers` usually comes from [`parse_transfers_str`].
    pub fn multi_send(
        &self,
        from: &KeyInfo,
        password: &str,
        transfers: Vec<TransferUnit>,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;

        let msg = MsgMultiSend {
            from_address: from.address.clone(),
            transfers,
        };
        broadcast_msgs(&self.base, from, password, memo, &[msg], account_number, sequence)
    }

    pub fn query_token_info(&self, symbol: &str) -> Result<TokenInfo, Error> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(Error::invalid_param("symbol".to_string(), "empty symbol".to_string()));
        }

        self.base
            .query_as(&format!("{}/{}", TOKEN_INFO_PATH, symbol), &[])
    }
}

impl Module for TokenClient {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn register_codec(&self, codec: &mut Codec) {
        codec.register_msg::<MsgSend>();
        codec.register_msg::<MsgMultiSend>();
        codec.register_plain::<TokenInfo>("okexchain/token/TokenInfo");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
pub mod token_client_tests {
    use serde_json::json;

    use crate::mock::{mock_client, MockTransport, PASSWORD};

    use super::{parse_transfers_str, TOKEN_INFO_PATH};

    const ADDR: &str = "ex1qj5c07sm6jetjz8f509qtrxgh4psxkv3ddyq7u";
    const TO: &str = "ex19y4zktpd9chnqvfjxv6r2d3h8qun5weupfngnh";

    #[test]
    pub fn transfers_str() {
        let input = format!("  {} 1okt\n\t{}   2okt,1.5xxb-781  \n", ADDR, TO);
        let transfers = parse_transfers_str(&input).unwrap();
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].to.to_string(), ADDR);
        assert_eq!(transfers[1].coins.len(), 2);

        assert!(parse_transfers_str(&format!("{} 1okt extra", ADDR)).is_err());
        assert!(parse_transfers_str(ADDR).is_err());
        assert!(parse_transfers_str(&format!("{} 1", ADDR)).is_err());
        assert!(parse_transfers_str(&format!("{} 1okt", &ADDR[1..])).is_err());
    }

    #[test]
    pub fn send_and_multi_send() {
        let transport = MockTransport::new();
        let (client, from) = mock_client(transport.clone());
        let token = client.token();

        token.send(&from, PASSWORD, TO, "1.5okt", "", 1, 2).unwrap();
        let transfers = parse_transfers_str(&format!("{} 1okt\n{} 2okt", ADDR, TO)).unwrap();
        token.multi_send(&from, PASSWORD, transfers, "", 1, 3).unwrap();

        let broadcasts = transport.broadcasts();
        assert_eq!(broadcasts.len(), 2);
        let tx: serde_json::Value = serde_json::from_slice(&broadcasts[1].0).unwrap();
        assert_eq!(tx["value"]["msg"][0]["type"], "okexchain/token/MsgMultiTransfer");
        assert_eq!(tx["value"]["msg"][0]["value"]["transfers"][1]["to_address"], TO);

        assert!(token.send(&from, PASSWORD, TO, "", "", 1, 4).is_err());
        assert!(token.send(&from, PASSWORD, &TO[1..], "1okt", "", 1, 4).is_err());
        assert!(token.multi_send(&from, PASSWORD, vec![], "", 1, 4).is_err());
        assert_eq!(transport.broadcasts().len(), 2);
    }

    #[test]
    pub fn query_token_info() {
        let transport = MockTransport::new();
        transport.set_json_response(
            &format!("{}/okt", TOKEN_INFO_PATH),
            json!({
                "description": "OKExChain native token",
                "symbol": "okt",
                "original_symbol": "okt",
                "whole_name": "OKT",
                "original_total_supply": "1000000000.000000000000000000",
                "owner": ADDR,
                "mintable": true
            }),
        );
        let (client, _) = mock_client(transport);

        let info = client.token().query_token_info("okt").unwrap();
        assert_eq!(info.symbol, "okt");
        assert!(info.mintable);
        assert!(client.token().query_token_info(" ").is_err());
    }
}
