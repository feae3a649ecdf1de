use flex_error::{define_error, TraceError};
use std::io::Error as IOError;
use toml::de::Error as TomlDeError;

define_error! {
    FileError {
        Open
            { file_path: String }
            [ TraceError<IOError> ]
            |e| { format!("cannot open {}", e.file_path) },
        Read
            { file_path: String }
            [ TraceError<IOError> ]
            |e| { format!("cannot read {}", e.file_path) },
        EmptyFile
            { file_path: String }
            |e| { format!("{} is empty", e.file_path) },
        ParseToml
            { file_path: String }
            [ TraceError<TomlDeError> ]
            |e| { format!("failed to deserialize toml file: {}", e.file_path) },
    }
}
