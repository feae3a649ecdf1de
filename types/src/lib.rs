pub mod account;
pub mod address;
pub mod decimal;
pub mod error;
pub mod message;
pub mod tx;
pub mod ibc {
    pub mod error;
    pub mod height;
    pub mod identifier;
    pub mod transfer;
}
pub mod evm;
pub mod governance;
pub mod slashing;
pub mod staking;
pub mod token;
