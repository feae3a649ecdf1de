pub mod query {
    pub mod trpc;
    pub mod types;
}
pub mod tx;
pub mod base;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod keyring;
pub mod module;
pub mod transport;

#[cfg(test)]
pub mod mock;
