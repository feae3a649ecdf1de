use serde::{de::DeserializeOwned, Serialize};

use crate::error::TypesError;

/// A chain message carried inside `StdTx.msgs`.
///
/// `TYPE_NAME` is the amino route name the node dispatches on, e.g.
/// `okexchain/staking/MsgDeposit`.
pub trait Msg: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const TYPE_NAME: &'static str;

    fn route(&self) -> &'static str;

    fn msg_type(&self) -> &'static str;

    fn validate_basic(&self) -> Result<(), TypesError> {
        Ok(())
    }
}

pub(crate) fn invalid_msg<M: Msg>(reason: impl Into<String>) -> TypesError {
    TypesError::invalid_msg(M::TYPE_NAME.to_string(), reason.into())
}
