use std::{
    fmt::{Display, Error, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::error::IdentifierError;

/// Path separator (ie. forward slash '/')
const PATH_SEPARATOR: char = '/';
const VALID_SPECIAL_CHARS: &str = "._+-#[]<>";

/// Default validator function for identifiers.
///
/// A valid identifier only contain alphanumeric characters or one of
/// `VALID_SPECIAL_CHARS`, and be of a given min and max length.
pub fn validate_identifier(id: &str, min: usize, max: usize) -> Result<(), IdentifierError> {
    assert!(max >= min);

    if id.is_empty() {
        return Err(IdentifierError::id_empty());
    }

    if id.contains(PATH_SEPARATOR) {
        return Err(IdentifierError::id_contain_separator(id.to_string()));
    }

    if id.len() < min || id.len() > max {
        return Err(IdentifierError::id_invalid_length(
            id.to_string(),
            id.len(),
            min,
            max,
        ));
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || VALID_SPECIAL_CHARS.contains(c))
    {
        return Err(IdentifierError::id_invalid_character(id.to_string()));
    }

    Ok(())
}

/// A valid port identifier must be between 2-128 characters.
pub fn validate_port_identifier(id: &str) -> Result<(), IdentifierError> {
    validate_identifier(id, 2, 128)
}

/// A valid channel identifier must be between 8-64 characters.
pub fn validate_channel_identifier(id: &str) -> Result<(), IdentifierError> {
    validate_identifier(id, 8, 64)
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortId(String);

impl PortId {
    /// Infallible creation of the well-known transfer port
    pub fn transfer() -> Self {
        Self("transfer".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PortId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PortId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_port_identifier(s).map(|_| Self(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    const CHANNEL_PREFIX: &'static str = "channel-";

    pub fn new(counter: u64) -> Self {
        Self(format!("{}{}", Self::CHANNEL_PREFIX, counter))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ChannelId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChannelId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_channel_identifier(s).map(|_| Self(s.to_string()))
    }
}
