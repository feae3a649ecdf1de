use std::cmp::min;

use log::{error, info};
use serde::Deserialize;
use tendermint_proto::serializers::from_str;
use types::{
    decimal::DecCoin,
    tx::{StdFee, StdTx},
};
use utils::operation::mul_floor;

use crate::{codec::Codec, config::ClientConfig, error::Error, transport::NodeTransport};

pub const SIMULATE_PATH: &str = "/app/simulate";

#[derive(Debug, Clone, Deserialize)]
struct GasInfo {
    #[serde(with = "from_str", default)]
    gas_wanted: u64,
    #[serde(with = "from_str", default)]
    gas_used: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct SimulationResponse {
    gas_info: GasInfo,
}

/// Fee for a given gas limit: the configured fixed fees when present,
/// otherwise `gas_prices * gas` per denomination.
pub fn gas_to_fee(config: &ClientConfig, gas: u64) -> StdFee {
    let amount = if !config.fees.is_empty() {
        config.fees.clone()
    } else {
        config
            .gas_prices
            .iter()
            .map(|price| DecCoin {
                denom: price.denom.clone(),
                amount: price.amount.mul_u64(gas),
            })
            .collect()
    };

    StdFee { amount, gas }
}

/// Adjusts the simulated gas with `gas_adjustment` so the tx does not run
/// out of gas when the real execution costs slightly more.
pub fn adjust_estimated_gas(gas_adjustment: f64, gas_amount: u64, max_gas: u64) -> u64 {
    if gas_amount == 0 {
        return 0;
    };

    if gas_adjustment == 1.0 {
        return min(gas_amount, max_gas);
    }

    let Some(adjusted) = mul_floor(gas_amount, gas_adjustment) else {
        return min(gas_amount, max_gas);
    };
    let (_sign, digits) = adjusted.to_u64_digits();

    let gas = match digits.as_slice() {
        [] => 0,
        [gas] => *gas,
        // overflow
        _ => u64::MAX,
    };

    min(gas, max_gas)
}

/// Runs the unsigned tx through the node's simulation and returns the
/// adjusted gas limit.
pub fn estimate_gas(
    config: &ClientConfig,
    transport: &dyn NodeTransport,
    codec: &Codec,
    tx: &StdTx,
) -> Result<u64, Error> {
    let tx_bytes = codec.encode(tx)?;
    let result = transport.abci_query(SIMULATE_PATH, &tx_bytes).map_err(|e| {
        error!("failed to simulate tx.");
        e
    })?;

    let simulation: SimulationResponse = serde_json::from_slice(&result.value).map_err(|e| {
        Error::codec_decode("SimulationResponse".to_string(), result.value.len(), e.to_string())
    })?;
    info!(
        "tx simulation successful, gas used: {}, gas wanted: {}",
        simulation.gas_info.gas_used, simulation.gas_info.gas_wanted
    );

    Ok(adjust_estimated_gas(
        config.gas_adjustment,
        simulation.gas_info.gas_used,
        u64::MAX,
    ))
}

#[cfg(test)]
pub mod estimate_tests {
    use types::tx::BroadcastMode;

    use super::{adjust_estimated_gas, gas_to_fee};
    use crate::config::ClientConfig;

    #[test]
    pub fn fee_from_gas_prices() {
        let config = ClientConfig::new(
            "testURL",
            "testchain-1",
            BroadcastMode::Block,
            "",
            200000,
            1.1,
            "0.00000001okt",
        )
        .unwrap();

        let fee = gas_to_fee(&config, 200000);
        assert_eq!(fee.gas, 200000);
        assert_eq!(fee.amount[0].to_string(), "0.002000000000000000okt");
    }

    #[test]
    pub fn fixed_fees_win() {
        let config =
            ClientConfig::new("testURL", "testchain-1", BroadcastMode::Sync, "0.01okt", 0, 1.0, "")
                .unwrap();

        let fee = gas_to_fee(&config, 123456);
        assert_eq!(fee.gas, 123456);
        assert_eq!(fee.amount[0].to_string(), "0.010000000000000000okt");
    }

    #[test]
    pub fn adjust_gas() {
        assert_eq!(adjust_estimated_gas(1.5, 100000, u64::MAX), 150000);
        assert_eq!(adjust_estimated_gas(1.0, 100000, 50000), 50000);
        assert_eq!(adjust_estimated_gas(1.5, 0, u64::MAX), 0);
        assert_eq!(adjust_estimated_gas(2.0, u64::MAX, u64::MAX), u64::MAX);
    }
}
