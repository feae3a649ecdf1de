use flex_error::{define_error, TraceError};
use serde_json::Error as SjError;
use utils::encode::error::EncodeError;

use crate::ibc::error::IdentifierError;

define_error! {
    TypesError {
        // bech32 addresses and keys
        EmptyAddress
            |_| { "address string cannot be empty" },
        Bech32Decode
            { address: String }
            [ EncodeError ]
            |e| { format_args!("decoding bech32 failed: {}", e.address) },
        Bech32Encode
            { hrp: String }
            [ EncodeError ]
            |e| { format_args!("encoding bech32 with prefix {} failed", e.hrp) },
        InvalidPrefix
            { expected: String, found: String }
            |e| { format_args!("invalid bech32 prefix, expected: {}, got: {}", e.expected, e.found) },
        InvalidAddressLength
            { expected: usize, found: usize }
            |e| { format_args!("invalid address length, expected: {}, got: {}", e.expected, e.found) },
        InvalidConsensusPubKey
            { reason: String }
            |e| { format_args!("invalid consensus public key: {}", e.reason) },
        // decimal coins
        InvalidDecimal
            { value: String }
            |e| { format_args!("invalid decimal string: {:?}", e.value) },
        DecimalPrecision
            { value: String, max: usize }
            |e| { format_args!("too much precision in {:?}, maximum {} digits", e.value, e.max) },
        MissingDenom
            { coin: String }
            |e| { format_args!("invalid decimal coin expression, missing denomination: {:?}", e.coin) },
        InvalidDenom
            { denom: String }
            |e| { format_args!("invalid denomination: {:?}", e.denom) },
        DuplicateDenom
            { denom: String }
            |e| { format_args!("duplicate denomination: {}", e.denom) },
        EmptyCoins
            |_| { "coins cannot be empty" },
        NonPositiveAmount
            { coin: String }
            |e| { format_args!("amount must be positive: {}", e.coin) },
        // governance
        InvalidProposalStatus
            { status: String }
            |e| { format_args!("'{}' is not a valid proposal status", e.status) },
        InvalidVoteOption
            { option: String }
            |e| { format_args!("'{}' is not a valid vote option", e.option) },
        // ibc
        InvalidHeight
            { height: String }
            |e| { format_args!("invalid height: {}", e.height) },
        Identifier
            [ IdentifierError ]
            |_| { "invalid identifier" },
        // message
        InvalidMsg
            { type_name: String, reason: String }
            |e| { format_args!("invalid {}: {}", e.type_name, e.reason) },
        SerdeJson
            [ TraceError<SjError> ]
            |_| { "serde json error" },
    }
}
