use subtle_encoding::hex;

use super::error::EncodeError;

pub fn hex_encode<B: AsRef<[u8]>>(bytes: B) -> Vec<u8> {
    hex::encode(bytes)
}

pub fn hex_encode_upper<B: AsRef<[u8]>>(bytes: B) -> String {
    String::from_utf8(hex::encode_upper(bytes)).unwrap_or_default()
}

/// Accepts both lower and upper case input, with or without a `0x` prefix.
pub fn hex_decode(input: &str) -> Result<Vec<u8>, EncodeError> {
    let input = input.strip_prefix("0x").unwrap_or(input);
    hex::decode(input.to_ascii_lowercase()).map_err(|e| EncodeError::hex_decode(e))
}
