use std::{fs::File, io::Read};

use serde::de::DeserializeOwned;

use super::error::FileError;

/// Reads and deserializes a toml file. A file with nothing but whitespace
/// is rejected before parsing.
pub fn toml_file_read<T>(file_path: &str) -> Result<T, FileError>
where
    T: DeserializeOwned,
{
    let mut file = File::open(file_path).map_err(|e| FileError::open(file_path.to_string(), e))?;
    let mut str_val = String::new();

    file.read_to_string(&mut str_val)
        .map_err(|e| FileError::read(file_path.to_string(), e))?;

    if str_val.trim().is_empty() {
        return Err(FileError::empty_file(file_path.to_string()));
    }

    toml::from_str(&str_val).map_err(|e| FileError::parse_toml(file_path.to_string(), e))
}

#[cfg(test)]
pub mod toml_file_tests {
    use std::io::Write;

    use serde::Deserialize;

    use super::toml_file_read;
    use crate::file::error::FileErrorDetail;

    #[derive(Debug, Deserialize)]
    struct Sample {
        node_uri: String,
        gas: u64,
    }

    #[test]
    pub fn toml_file_read_works() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "node_uri = \"tcp://127.0.0.1:26657\"\ngas = 200000").unwrap();

        let sample: Sample = toml_file_read(file.path().to_str().unwrap()).unwrap();
        assert_eq!(sample.node_uri, "tcp://127.0.0.1:26657");
        assert_eq!(sample.gas, 200000);
    }

    #[test]
    pub fn missing_file_is_an_error() {
        let result: Result<Sample, _> = toml_file_read("/definitely/not/here.toml");
        assert!(result.is_err());
    }

    #[test]
    pub fn empty_and_malformed_files_are_told_apart() {
        let mut empty = tempfile::NamedTempFile::new().unwrap();
        writeln!(empty, "  ").unwrap();
        let err = toml_file_read::<Sample>(empty.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err.detail(), FileErrorDetail::EmptyFile(_)));

        let mut malformed = tempfile::NamedTempFile::new().unwrap();
        writeln!(malformed, "node_uri = ").unwrap();
        let err = toml_file_read::<Sample>(malformed.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err.detail(), FileErrorDetail::ParseToml(_)));

        let err = toml_file_read::<Sample>("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err.detail(), FileErrorDetail::Open(_)));
    }
}
