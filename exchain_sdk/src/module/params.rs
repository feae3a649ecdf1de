use std::collections::HashSet;

use types::{
    address::{AccAddress, ValAddress},
    decimal::{parse_dec_coin, parse_dec_coins, DecCoin},
};

use crate::{error::Error, keyring::KeyInfo};

fn invalid(name: &str, reason: impl Into<String>) -> Error {
    Error::invalid_param(name.to_string(), reason.into())
}

pub fn check_key_params(from: &KeyInfo, password: &str) -> Result<(), Error> {
    if from.name.trim().is_empty() {
        return Err(invalid("from", "empty key name"));
    }
    if password.is_empty() {
        return Err(Error::empty_password());
    }
    Ok(())
}

/// A single decimal coin with an explicit denomination, e.g. `10.24okt`.
pub fn check_coin(coin: &str) -> Result<DecCoin, Error> {
    parse_dec_coin(coin).map_err(Error::types)
}

/// A non-empty comma separated coin list.
pub fn check_coins(coins: &str) -> Result<Vec<DecCoin>, Error> {
    let coins = parse_dec_coins(coins).map_err(Error::types)?;
    if coins.is_empty() {
        return Err(invalid("coins", "empty coins"));
    }
    Ok(coins)
}

pub fn check_acc_addr(name: &str, address: &str) -> Result<AccAddress, Error> {
    if address.trim().is_empty() {
        return Err(invalid(name, "empty address"));
    }
    address.parse().map_err(Error::types)
}

/// Non-empty, duplicate free list of `exvaloper` addresses.
pub fn check_val_addrs(val_addrs: &[&str]) -> Result<Vec<ValAddress>, Error> {
    if val_addrs.is_empty() {
        return Err(invalid("val_addrs", "empty validator address list"));
    }

    let addrs = val_addrs
        .iter()
        .map(|addr| addr.parse::<ValAddress>().map_err(Error::types))
        .collect::<Result<Vec<_>, _>>()?;

    // compared decoded, so case variants of one address collide
    let mut seen = HashSet::new();
    for (addr, raw) in addrs.iter().zip(val_addrs) {
        if !seen.insert(addr) {
            return Err(invalid("val_addrs", format!("duplicate validator address: {}", raw)));
        }
    }

    Ok(addrs)
}

pub fn check_val_addr(val_addr: &str) -> Result<ValAddress, Error> {
    if val_addr.trim().is_empty() {
        return Err(invalid("val_addr", "empty validator address"));
    }
    val_addr.parse().map_err(Error::types)
}

pub fn check_proposal_id(proposal_id: u64) -> Result<(), Error> {
    if proposal_id == 0 {
        return Err(invalid("proposal_id", "proposal id must be positive"));
    }
    Ok(())
}

pub fn check_page(page: u32, limit: u32) -> Result<(), Error> {
    if page == 0 {
        return Err(invalid("page", "page must be positive"));
    }
    if limit == 0 {
        return Err(invalid("limit", "limit must be positive"));
    }
    Ok(())
}
