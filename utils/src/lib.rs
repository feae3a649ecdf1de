pub mod crypto;
pub mod encode {
    pub mod base64;
    pub mod bech32;
    pub mod error;
    pub mod protobuf;
    pub mod systems;
}
pub mod file {
    pub mod error;
    pub mod toml_file;
}
pub mod operation;
