use flex_error::{define_error, TraceError};
use serde_json::Error as SjError;
use tendermint_rpc::error::Error as TrpcError;
use types::error::TypesError;
use utils::{encode::error::EncodeError, file::error::FileError};

define_error! {
    Error {
        // configuration
        LoadClientConfig
            [ FileError ]
            |_| { "load exchain client config error" },
        InvalidConfig
            { reason: String }
            |e| { format!("invalid client config: {}", e.reason) },

        // validation, detected before any node round-trip
        InvalidParam
            { name: String, reason: String }
            |e| { format!("invalid parameter `{}`: {}", e.name, e.reason) },
        EmptyPassword
            |_| { "password cannot be empty" },
        EmptyMessages
            |_| { "no messages to broadcast" },
        Types
            [ TypesError ]
            |_| { "invalid chain type" },
        Encode
            [ EncodeError ]
            |_| { "encoding error" },

        // node
        TendermintRpcClient
            { rpc_addr: String }
            [ TraceError<TrpcError> ]
            |e| { format!("tendermint rpc client for {} cannot be created", e.rpc_addr) },
        Trpc
            { operation: String }
            [ TraceError<TrpcError> ]
            |e| { format!("tendermint rpc `{}` error", e.operation) },
        AbciQuery
            { path: String, code: u32, log: String }
            |e| { format!("abci query `{}` failed with code {}: {}", e.path, e.code, e.log) },
        Runtime
            [ TraceError<std::io::Error> ]
            |_| { "tokio runtime cannot be created" },

        // codec
        CodecUninitialized
            |_| { "codec is used before the modules registered their types" },
        UnregisteredType
            { type_name: String }
            |e| { format!("type {} is not registered in the codec", e.type_name) },
        CodecEncode
            { type_name: String, reason: String }
            |e| { format!("encoding {} failed: {}", e.type_name, e.reason) },
        CodecDecode
            { type_name: String, len: usize, reason: String }
            |e| { format!("decoding {} from {} bytes failed: {}", e.type_name, e.len, e.reason) },
        SerdeJson
            [ TraceError<SjError> ]
            |_| { "serde json error" },

        // keys and signing
        KeyNotFound
            { name: String }
            |e| { format!("key {} not found in keyring", e.name) },
        KeyAlreadyExists
            { name: String }
            |e| { format!("key {} already exists in keyring", e.name) },
        WrongPassword
            { name: String }
            |e| { format!("wrong password for key {}", e.name) },
        InvalidMnemonic
            { reason: String }
            |e| { format!("invalid mnemonic: {}", e.reason) },
        Bip32KeyGenerationFailed
            { key_type: String, reason: String }
            |e| { format!("cannot generate {} private key from BIP-32 seed: {}", e.key_type, e.reason) },
        Secp256k1
            [ TraceError<secp256k1::Error> ]
            |_| { "secp256k1 error" },
    }
}
