use bech32::{FromBase32, ToBase32};

use super::error::EncodeError;

pub fn encode(hrp: &str, data: &[u8]) -> Result<String, EncodeError> {
    bech32::encode(hrp, data.to_base32(), bech32::Variant::Bech32)
        .map_err(|e| EncodeError::bech32_encode(e))
}

pub fn decode(data: &str) -> Result<Vec<u8>, EncodeError> {
    decode_with_hrp(data).map(|(_, bytes)| bytes)
}

/// Decodes a bech32 string and returns the human readable part next to the payload.
/// Mixed case input and broken checksums are rejected by the underlying codec.
pub fn decode_with_hrp(data: &str) -> Result<(String, Vec<u8>), EncodeError> {
    let (hrp, data, variant) = bech32::decode(data).map_err(|e| EncodeError::bech32_decode(e))?;
    if variant != bech32::Variant::Bech32 {
        return Err(EncodeError::bech32_variant(hrp));
    }

    let bytes = Vec::from_base32(&data).map_err(|e| EncodeError::bech32_decode(e))?;
    Ok((hrp, bytes))
}
