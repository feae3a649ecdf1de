use std::sync::{Arc, OnceLock};

use log::{debug, trace};
use types::tx::{StdMsg, TxResponse};
use utils::encode::{protobuf, systems::hex_decode};

use crate::{
    codec::Codec,
    config::ClientConfig,
    error::Error,
    keyring::Keyring,
    query::types::{
        BlockResult, BlockResults, CommitResult, SearchOrder, TxResult, TxSearchResult,
        ValidatorsResult,
    },
    transport::NodeTransport,
    tx::{create, estimate, send},
};

/// Shared core of every module client: node transport, keyring and the
/// codec the modules registered their types into.
pub struct BaseClient {
    config: ClientConfig,
    transport: Arc<dyn NodeTransport>,
    keyring: Arc<dyn Keyring>,
    codec: OnceLock<Codec>,
}

fn check_height(height: Option<i64>) -> Result<Option<u32>, Error> {
    match height {
        None => Ok(None),
        Some(height) if height <= 0 => Err(Error::invalid_param(
            "height".to_string(),
            format!("height must be positive, got {}", height),
        )),
        Some(height) => u32::try_from(height).map(Some).map_err(|_| {
            Error::invalid_param("height".to_string(), format!("height {} out of range", height))
        }),
    }
}

fn check_positive(name: &str, value: u32) -> Result<(), Error> {
    if value == 0 {
        return Err(Error::invalid_param(name.to_string(), "must be positive".to_string()));
    }
    Ok(())
}

impl BaseClient {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn NodeTransport>,
        keyring: Arc<dyn Keyring>,
    ) -> Self {
        Self {
            config,
            transport,
            keyring,
            codec: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn keyring(&self) -> &dyn Keyring {
        self.keyring.as_ref()
    }

    pub fn codec(&self) -> Result<&Codec, Error> {
        self.codec.get().ok_or_else(Error::codec_uninitialized)
    }

    /// Installs the fully populated codec. Called once by the facade client.
    pub(crate) fn seal_codec(&self, codec: Codec) {
        if self.codec.set(codec).is_err() {
            panic!("codec sealed twice");
        }
    }

    /// ABCI query returning the raw value and the height it was read at.
    pub fn query(&self, path: &str, params: &[u8]) -> Result<(Vec<u8>, i64), Error> {
        trace!("query {}", path);
        let result = self.transport.abci_query(path, params)?;
        Ok((result.value, result.height))
    }

    /// ABCI query whose result is decoded through the codec.
    pub fn query_as<T: 'static>(&self, path: &str, params: &[u8]) -> Result<T, Error> {
        let (value, _) = self.query(path, params)?;
        self.codec()?.decode(&value)
    }

    /// Typed unary call: the request is protobuf encoded and sent to the
    /// fully qualified method path, e.g. `/ibc.core.channel.v1.Query/Channel`.
    pub fn invoke<Req, Resp>(&self, method: &str, request: &Req) -> Result<Resp, Error>
    where
        Req: prost::Message,
        Resp: 'static,
    {
        let codec = self.codec()?;
        let data = protobuf::encode_to_bytes(request).map_err(Error::encode)?;
        let (value, _) = self.query(method, &data)?;
        codec.decode(&value)
    }

    /// Signs `msgs` with the named key and submits them in the configured
    /// broadcast mode. Chain-level failures come back inside the response.
    #[tracing::instrument(skip(self, password, msgs), fields(msgs = msgs.len()))]
    pub fn build_and_broadcast(
        &self,
        signer_name: &str,
        password: &str,
        memo: &str,
        msgs: Vec<StdMsg>,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        if msgs.is_empty() {
            return Err(Error::empty_messages());
        }
        if password.is_empty() {
            return Err(Error::empty_password());
        }
        let codec = self.codec()?;
        self.keyring.unlock(signer_name, password)?;

        let gas = if self.config.gas == 0 {
            let fee = estimate::gas_to_fee(&self.config, 0);
            let unsigned = create::unsigned_tx(&msgs, fee, memo);
            estimate::estimate_gas(&self.config, self.transport.as_ref(), codec, &unsigned)?
        } else {
            self.config.gas
        };
        let fee = estimate::gas_to_fee(&self.config, gas);
        debug!("broadcast fee: gas {}, amount {:?}", fee.gas, fee.amount);

        let tx = create::create_and_sign_tx(
            self.keyring.as_ref(),
            &self.config.chain_id,
            signer_name,
            password,
            memo,
            msgs,
            fee,
            account_number,
            sequence,
        )?;

        send::broadcast_std_tx(
            self.transport.as_ref(),
            codec,
            &tx,
            self.config.broadcast_mode,
        )
    }

    pub fn block(&self, height: Option<i64>) -> Result<BlockResult, Error> {
        self.transport.block(check_height(height)?)
    }

    pub fn block_results(&self, height: Option<i64>) -> Result<BlockResults, Error> {
        self.transport.block_results(check_height(height)?)
    }

    pub fn commit(&self, height: Option<i64>) -> Result<CommitResult, Error> {
        self.transport.commit(check_height(height)?)
    }

    pub fn validators(
        &self,
        height: Option<i64>,
        page: u32,
        per_page: u32,
    ) -> Result<ValidatorsResult, Error> {
        let height = check_height(height)?;
        check_positive("page", page)?;
        check_positive("per_page", per_page)?;
        self.transport
            .validators(height, page as usize, per_page as usize)
    }

    /// `hash` is the hex encoded sha256 of the tx bytes, with or without `0x`.
    pub fn tx(&self, hash: &str, prove: bool) -> Result<TxResult, Error> {
        let bytes = hex_decode(hash).map_err(Error::encode)?;
        if bytes.len() != 32 {
            return Err(Error::invalid_param(
                "hash".to_string(),
                format!("expected 32 bytes, got {}", bytes.len()),
            ));
        }
        self.transport.tx(hash, prove)
    }

    /// `order_by` is `asc`, `desc` or empty. Page sizes above 255 are capped.
    pub fn tx_search(
        &self,
        query: &str,
        prove: bool,
        page: u32,
        per_page: u32,
        order_by: &str,
    ) -> Result<TxSearchResult, Error> {
        if query.trim().is_empty() {
            return Err(Error::invalid_param("query".to_string(), "empty query".to_string()));
        }
        check_positive("page", page)?;
        check_positive("per_page", per_page)?;
        let order = SearchOrder::parse(order_by).ok_or_else(|| {
            Error::invalid_param("order_by".to_string(), format!("unknown order {}", order_by))
        })?;

        let per_page = u8::try_from(per_page).unwrap_or(u8::MAX);
        self.transport
            .tx_search(query, prove, page, per_page, order)
    }
}
