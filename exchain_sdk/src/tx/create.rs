use log::trace;
use types::tx::{StdFee, StdMsg, StdSignDoc, StdTx};

use crate::{error::Error, keyring::Keyring};

/// Sign bytes of the canonical document for one signer.
pub fn sign_bytes(
    chain_id: &str,
    account_number: u64,
    sequence: u64,
    fee: &StdFee,
    memo: &str,
    msgs: &[StdMsg],
) -> Result<Vec<u8>, Error> {
    StdSignDoc {
        account_number,
        chain_id,
        fee,
        memo,
        msgs,
        sequence,
    }
    .sign_bytes()
    .map_err(Error::types)
}

/// Builds an unsigned tx, as used for gas simulation.
pub fn unsigned_tx(msgs: &[StdMsg], fee: StdFee, memo: &str) -> StdTx {
    StdTx {
        msg: msgs.to_vec(),
        fee,
        signatures: vec![],
        memo: memo.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn create_and_sign_tx(
    keyring: &dyn Keyring,
    chain_id: &str,
    signer_name: &str,
    password: &str,
    memo: &str,
    msgs: Vec<StdMsg>,
    fee: StdFee,
    account_number: u64,
    sequence: u64,
) -> Result<StdTx, Error> {
    let bytes = sign_bytes(chain_id, account_number, sequence, &fee, memo, &msgs)?;
    trace!("sign doc: {}", String::from_utf8_lossy(&bytes));

    let signature = keyring.sign(signer_name, password, &bytes)?;

    Ok(StdTx {
        msg: msgs,
        fee,
        signatures: vec![signature],
        memo: memo.to_string(),
    })
}
