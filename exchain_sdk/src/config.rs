use serde::{Deserialize, Serialize};
use types::{
    decimal::{parse_dec_coins, DecCoin},
    tx::BroadcastMode,
};
use utils::file::toml_file;

use crate::error::Error;

/// Immutable settings shared by every module client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub node_uri: String,
    pub chain_id: String,
    pub broadcast_mode: BroadcastMode,
    pub fees: Vec<DecCoin>,
    /// Zero means the gas limit is estimated by simulation before broadcast.
    pub gas: u64,
    pub gas_adjustment: f64,
    pub gas_prices: Vec<DecCoin>,
}

impl ClientConfig {
    pub fn new(
        node_uri: &str,
        chain_id: &str,
        broadcast_mode: BroadcastMode,
        fees: &str,
        gas: u64,
        gas_adjustment: f64,
        gas_prices: &str,
    ) -> Result<Self, Error> {
        if node_uri.trim().is_empty() {
            return Err(Error::invalid_config("empty node uri".to_string()));
        }
        if chain_id.trim().is_empty() {
            return Err(Error::invalid_config("empty chain id".to_string()));
        }
        if !fees.trim().is_empty() && !gas_prices.trim().is_empty() {
            return Err(Error::invalid_config(
                "cannot provide both fees and gas prices".to_string(),
            ));
        }
        if !gas_adjustment.is_finite() || gas_adjustment <= 0.0 {
            return Err(Error::invalid_config(format!(
                "gas adjustment must be positive, got {}",
                gas_adjustment
            )));
        }

        let fees = parse_dec_coins(fees).map_err(Error::types)?;
        let gas_prices = parse_dec_coins(gas_prices).map_err(Error::types)?;

        Ok(Self {
            node_uri: node_uri.to_string(),
            chain_id: chain_id.to_string(),
            broadcast_mode,
            fees,
            gas,
            gas_adjustment,
            gas_prices,
        })
    }
}

/// On-disk form of [`ClientConfig`]; coins are kept as `1okt,2xxb` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfigFile {
    pub node_uri: String,
    pub chain_id: String,
    #[serde(default)]
    pub broadcast_mode: BroadcastMode,
    #[serde(default)]
    pub fees: String,
    #[serde(default)]
    pub gas: u64,
    #[serde(default = "default::gas_adjustment")]
    pub gas_adjustment: f64,
    #[serde(default)]
    pub gas_prices: String,
}

pub fn load_client_config(path: &str) -> Result<ClientConfig, Error> {
    let file: ClientConfigFile = toml_file::toml_file_read(path).map_err(Error::load_client_config)?;

    ClientConfig::new(
        &file.node_uri,
        &file.chain_id,
        file.broadcast_mode,
        &file.fees,
        file.gas,
        file.gas_adjustment,
        &file.gas_prices,
    )
}

pub mod default {
    pub fn gas_adjustment() -> f64 {
        1.0
    }
}
