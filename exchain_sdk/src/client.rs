use std::{collections::HashMap, sync::Arc};

use log::{debug, info};

use crate::{
    base::BaseClient,
    codec::{register_basic_codec, Codec},
    config::ClientConfig,
    error::Error,
    keyring::Keyring,
    module::{
        auth::{self, AuthClient},
        evm::{self, EvmClient},
        governance::{self, GovClient},
        ibc::{self, IbcClient},
        slashing::{self, SlashingClient},
        staking::{self, StakingClient},
        tendermint::{self, TendermintClient},
        token::{self, TokenClient},
        Module,
    },
    transport::{NodeTransport, TendermintTransport},
};

/// Entry point of the sdk: owns the module clients and the base client
/// they share.
pub struct Client {
    base: Arc<BaseClient>,
    modules: HashMap<&'static str, Box<dyn Module>>,
}

impl Client {
    /// Connects to `config.node_uri` over Tendermint RPC.
    pub fn new(config: ClientConfig, keyring: Arc<dyn Keyring>) -> Result<Self, Error> {
        let transport = TendermintTransport::new(&config.node_uri)?;
        Ok(Self::with_transport(config, Arc::new(transport), keyring))
    }

    /// Client with every built-in module over an arbitrary transport.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn NodeTransport>,
        keyring: Arc<dyn Keyring>,
    ) -> Self {
        let base = Arc::new(BaseClient::new(config, transport, keyring));
        let modules: Vec<Box<dyn Module>> = vec![
            Box::new(AuthClient::new(base.clone())),
            Box::new(StakingClient::new(base.clone())),
            Box::new(GovClient::new(base.clone())),
            Box::new(SlashingClient::new(base.clone())),
            Box::new(TokenClient::new(base.clone())),
            Box::new(TendermintClient::new(base.clone())),
            Box::new(IbcClient::new(base.clone())),
            Box::new(EvmClient::new(base.clone())),
        ];

        Self::from_modules(base, modules)
    }

    /// Registers `modules` and seals the shared codec into `base`.
    ///
    /// # Panics
    ///
    /// On a duplicated module name or codec registration, or if `base`
    /// already carries a codec.
    pub fn from_modules(base: Arc<BaseClient>, modules: Vec<Box<dyn Module>>) -> Self {
        let mut client = Self {
            base,
            modules: HashMap::new(),
        };

        let mut codec = Codec::new();
        client.register_modules(&mut codec, modules);
        register_basic_codec(&mut codec);
        debug!("codec sealed with {} types", codec.len());
        client.base.seal_codec(codec);

        info!(
            "client ready for chain {} at {}",
            client.base.config().chain_id,
            client.base.config().node_uri
        );
        client
    }

    fn register_modules(&mut self, codec: &mut Codec, modules: Vec<Box<dyn Module>>) {
        for module in modules {
            let name = module.name();
            if self.modules.contains_key(name) {
                panic!("duplicated module: {}", name);
            }

            module.register_codec(codec);
            self.modules.insert(name, module);
        }
    }

    fn module<T: Module>(&self, name: &str) -> &T {
        self.modules
            .get(name)
            .and_then(|module| module.as_any().downcast_ref::<T>())
            .unwrap_or_else(|| panic!("module {} is not registered", name))
    }

    pub fn base(&self) -> &BaseClient {
        &self.base
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn auth(&self) -> &AuthClient {
        self.module(auth::MODULE_NAME)
    }

    pub fn staking(&self) -> &StakingClient {
        self.module(staking::MODULE_NAME)
    }

    pub fn governance(&self) -> &GovClient {
        self.module(governance::MODULE_NAME)
    }

    pub fn slashing(&self) -> &SlashingClient {
        self.module(slashing::MODULE_NAME)
    }

    pub fn token(&self) -> &TokenClient {
        self.module(token::MODULE_NAME)
    }

    pub fn tendermint(&self) -> &TendermintClient {
        self.module(tendermint::MODULE_NAME)
    }

    pub fn ibc(&self) -> &IbcClient {
        self.module(ibc::MODULE_NAME)
    }

    pub fn evm(&self) -> &EvmClient {
        self.module(evm::MODULE_NAME)
    }
}
