use base64::Engine;

use super::error::EncodeError;

pub fn encode<T: AsRef<[u8]>>(input: T) -> String {
    base64::engine::general_purpose::STANDARD.encode(input)
}

pub fn decode<T: AsRef<[u8]>>(input: T) -> Result<Vec<u8>, EncodeError> {
    base64::engine::general_purpose::STANDARD
        .decode(input)
        .map_err(|e| EncodeError::base64_decode(e))
}

#[cfg(test)]
pub mod base64_tests {
    use super::{decode, encode};

    #[test]
    pub fn standard_alphabet_with_padding() {
        assert_eq!(encode([0xfbu8, 0xff]), "+/8=");
        assert_eq!(decode("+/8=").unwrap(), vec![0xfb, 0xff]);
        assert!(decode("-_8").is_err());
    }
}
