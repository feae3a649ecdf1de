use std::{any::Any, sync::Arc};

use serde::Serialize;
use types::{
    account::{AccountInfo, ETH_ACCOUNT_TYPE},
    address::AccAddress,
};

use crate::{base::BaseClient, codec::Codec, error::Error, module::params::check_acc_addr};

use super::Module;

pub const MODULE_NAME: &str = "auth";
pub const ACCOUNT_PATH: &str = "custom/acc/account";

#[derive(Serialize)]
struct QueryAccountParams {
    #[serde(rename = "account")]
    address: AccAddress,
}

pub struct AuthClient {
    base: Arc<BaseClient>,
}

impl AuthClient {
    pub fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub fn query_account(&self, address: &str) -> Result<AccountInfo, Error> {
        let address = check_acc_addr("address", address)?;
        let params =
            serde_json::to_vec(&QueryAccountParams { address }).map_err(Error::serde_json)?;

        self.base.query_as(ACCOUNT_PATH, &params)
    }
}

impl Module for AuthClient {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn register_codec(&self, codec: &mut Codec) {
        codec.register_concrete::<AccountInfo>(ETH_ACCOUNT_TYPE);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
pub mod auth_client_tests {
    use serde_json::json;

    use crate::mock::{mock_client, MockTransport};

    use super::ACCOUNT_PATH;

    const ADDR: &str = "ex1qj5c07sm6jetjz8f509qtrxgh4psxkv3ddyq7u";

    #[test]
    pub fn query_account() {
        let transport = MockTransport::new();
        transport.set_json_response(
            ACCOUNT_PATH,
            json!({
                "type": "okexchain/EthAccount",
                "value": {
                    "address": ADDR,
                    "eth_address": "0x04A987fa1Bd4B2b908e9A3cA058cC8BD43035991",
                    "coins": [{"denom": "okt", "amount": "1024.000000000000000000"}],
                    "public_key": null,
                    "account_number": "1",
                    "sequence": "2",
                    "code_hash": ""
                }
            }),
        );
        let (client, _) = mock_client(transport.clone());

        let account = client.auth().query_account(ADDR).unwrap();
        assert_eq!(account.account_number, 1);
        assert_eq!(account.sequence, 2);
        assert_eq!(account.coins[0].denom, "okt");

        let query = transport.queries().pop().unwrap();
        assert_eq!(query.path, ACCOUNT_PATH);
        assert_eq!(query.data, format!(r#"{{"account":"{}"}}"#, ADDR).into_bytes());

        assert!(client.auth().query_account(&ADDR[1..]).is_err());
        assert!(client.auth().query_account("").is_err());
        assert_eq!(transport.calls(), 1);
    }
}
