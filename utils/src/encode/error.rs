use base64::DecodeError as Base64DecodeError;
use bech32::Error as bech32Error;
use flex_error::{define_error, TraceError};
use prost::{DecodeError as prostDecodeError, EncodeError as prostEncodeError};
use subtle_encoding::Error as SubtleError;

define_error! {
    EncodeError {
        Bech32Encode
            [ TraceError<bech32Error> ]
            |_| { "encode bech32 error" },
        Bech32Decode
            [ TraceError<bech32Error> ]
            |_| { "decode bech32 error" },
        Bech32Variant
            { hrp: String }
            |e| { format!("bech32m encoding is not accepted, hrp: {}", e.hrp) },
        ProtobufEncode
            [ TraceError<prostEncodeError> ]
            |_| { "protobuf encode error" },
        ProtobufDecode
            [ TraceError<prostDecodeError> ]
            |_| { "protobuf decode error" },
        Base64Decode
            [ TraceError<Base64DecodeError> ]
            |_| { "decode base64 error" },
        HexDecode
            [ TraceError<SubtleError> ]
            |_| { "decode hex error" },
    }
}
