use std::{any::Any, str::FromStr, sync::Arc};

use alloy::{
    consensus::TxEnvelope,
    primitives::{Address, B256},
};
use types::evm::{EvmParams, QueryResCode, QueryResStorage};

use crate::{base::BaseClient, codec::Codec, error::Error};

use super::Module;

pub const MODULE_NAME: &str = "evm";

pub const CODE_PATH: &str = "custom/evm/code";
pub const STORAGE_PATH: &str = "custom/evm/storage";
pub const PARAMS_PATH: &str = "custom/evm/params";

/// Canonical hash of an Ethereum transaction signed outside this client:
/// keccak256 of its EIP-2718 encoding.
pub fn get_tx_hash(signed_tx: &TxEnvelope) -> B256 {
    *signed_tx.tx_hash()
}

fn check_contract_addr(contract_addr: &str) -> Result<Address, Error> {
    Address::from_str(contract_addr.trim()).map_err(|e| {
        Error::invalid_param("contract_addr".to_string(), e.to_string())
    })
}

pub struct EvmClient {
    base: Arc<BaseClient>,
}

impl EvmClient {
    pub fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub fn get_tx_hash(&self, signed_tx: &TxEnvelope) -> B256 {
        get_tx_hash(signed_tx)
    }

    /// Deployed bytecode at `contract_addr` (`0x` hex), empty for an account
    /// without code.
    pub fn query_code(&self, contract_addr: &str) -> Result<Vec<u8>, Error> {
        let address = check_contract_addr(contract_addr)?;

        let res: QueryResCode = self
            .base
            .query_as(&format!("{}/{:#x}", CODE_PATH, address), &[])?;
        res.bytes().map_err(Error::encode)
    }

    /// Value of the 32 byte storage slot `key` of `contract_addr`.
    pub fn query_storage_at(&self, contract_addr: &str, key: &str) -> Result<Vec<u8>, Error> {
        let address = check_contract_addr(contract_addr)?;
        let key = B256::from_str(key.trim())
            .map_err(|e| Error::invalid_param("key".to_string(), e.to_string()))?;

        let res: QueryResStorage = self
            .base
            .query_as(&format!("{}/{:#x}/{:#x}", STORAGE_PATH, address, key), &[])?;
        res.bytes().map_err(Error::encode)
    }

    pub fn query_params(&self) -> Result<EvmParams, Error> {
        self.base.query_as(PARAMS_PATH, &[])
    }
}

impl Module for EvmClient {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn register_codec(&self, codec: &mut Codec) {
        codec.register_plain::<EvmParams>("okexchain/evm/Params");
        codec.register_plain::<QueryResCode>("okexchain/evm/QueryResCode");
        codec.register_plain::<QueryResStorage>("okexchain/evm/QueryResStorage");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
pub mod evm_client_tests {
    use std::str::FromStr;

    use alloy::{
        consensus::{SignableTransaction, TxEnvelope, TxLegacy},
        eips::eip2718::{Decodable2718, Encodable2718},
        primitives::{Address, TxKind, B256, U256},
        signers::{local::PrivateKeySigner, SignerSync},
    };
    use serde_json::json;
    use utils::{crypto::keccak256, encode::systems::hex_decode};

    use crate::mock::{mock_client, MockTransport};

    use super::{get_tx_hash, CODE_PATH, PARAMS_PATH, STORAGE_PATH};

    const CONTRACT: &str = "0x2ca3d9e7a49fc2a1d3b0e7a9cbf3b1b2ae8bd1f4";
    const SLOT: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

    const PRIVATE_KEY: &str = "89c81c304704e9890025a5a91898802294658d6e4034a11c6116f4b129ea12d3";

    fn signed_legacy_tx(
        private_key: &str,
        chain_id: u64,
        nonce: u64,
        gas_price: u128,
        to: &str,
    ) -> TxEnvelope {
        let tx = TxLegacy {
            chain_id: Some(chain_id),
            nonce,
            gas_price,
            gas_limit: 21000,
            to: TxKind::Call(Address::from_str(to).unwrap()),
            value: U256::from(1_000_000_000_000_000_000u128),
            input: Default::default(),
        };

        let signer = PrivateKeySigner::from_str(private_key).unwrap();
        let signature = signer.sign_hash_sync(&tx.signature_hash()).unwrap();
        TxEnvelope::Legacy(tx.into_signed(signature))
    }

    #[test]
    pub fn tx_hash_is_keccak_of_envelope() {
        // 1okt to CONTRACT at nonce 591, 0.000000001okt gas price, chain 65
        let envelope = signed_legacy_tx(PRIVATE_KEY, 65, 591, 1_000_000_000, CONTRACT);
        let hash = get_tx_hash(&envelope);

        assert_eq!(
            hash,
            B256::from_str("0x1db7fff038bbf964727f31a7644482debbd3ae8f4c93ea21789bc6a79b694a0a")
                .unwrap()
        );
        assert_eq!(hash.0, keccak256(&envelope.encoded_2718()));
        let next = signed_legacy_tx(PRIVATE_KEY, 65, 592, 1_000_000_000, CONTRACT);
        assert_ne!(hash, get_tx_hash(&next));
    }

    #[test]
    pub fn tx_hash_of_eip155_example() {
        let signed = signed_legacy_tx(
            "4646464646464646464646464646464646464646464646464646464646464646",
            1,
            9,
            20_000_000_000,
            "0x3535353535353535353535353535353535353535",
        );
        let raw = hex_decode(concat!(
            "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a7640000",
            "8025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761",
            "aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
        ))
        .unwrap();
        let decoded = TxEnvelope::decode_2718(&mut raw.as_slice()).unwrap();

        let expected =
            B256::from_str("0x33469b22e9f636356c4160a87eb19df52b7412e8eac32a4a55ffe88ea8350788")
                .unwrap();
        assert_eq!(signed.encoded_2718(), raw);
        assert_eq!(get_tx_hash(&signed), expected);
        assert_eq!(get_tx_hash(&decoded), expected);
    }

    #[test]
    pub fn contract_queries() {
        let transport = MockTransport::new();
        transport.set_json_response(&format!("{}/{}", CODE_PATH, CONTRACT), json!({"code": "YIBgQA=="}));
        transport.set_json_response(
            &format!("{}/{}/{}", STORAGE_PATH, CONTRACT, SLOT),
            json!({"value": "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAE="}),
        );
        transport.set_json_response(
            PARAMS_PATH,
            json!({"enable_create": true, "enable_call": true, "max_gas_limit_per_tx": "30000000"}),
        );
        let (client, _) = mock_client(transport.clone());
        let evm = client.evm();

        assert_eq!(evm.query_code(CONTRACT).unwrap(), vec![0x60, 0x80, 0x60, 0x40]);
        let value = evm.query_storage_at(CONTRACT, SLOT).unwrap();
        assert_eq!(value.len(), 32);
        assert_eq!(value[31], 1);
        assert!(evm.query_params().unwrap().enable_call);

        assert!(evm.query_code("ex1qj5c07sm6jetjz8f509qtrxgh4psxkv3ddyq7u").is_err());
        assert!(evm.query_storage_at(CONTRACT, "0x01").is_err());
        assert_eq!(transport.calls(), 3);
    }
}
