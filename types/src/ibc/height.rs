use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// IBC height: a revision (epoch) number paired with a block height in that revision.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Height {
    #[serde(with = "tendermint_proto::serializers::from_str")]
    pub revision_number: u64,
    #[serde(with = "tendermint_proto::serializers::from_str")]
    pub revision_height: u64,
}

impl Height {
    pub fn new(revision_number: u64, revision_height: u64) -> Result<Self, TypesError> {
        if revision_height == 0 {
            return Err(TypesError::invalid_height(revision_height.to_string()));
        }

        Ok(Self {
            revision_number,
            revision_height,
        })
    }

    /// The zero height disables height based timeouts.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.revision_height == 0
    }
}

impl core::fmt::Display for Height {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}

impl PartialOrd for Height {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Height {
    fn cmp(&self, other: &Self) -> Ordering {
        self.revision_number
            .cmp(&other.revision_number)
            .then(self.revision_height.cmp(&other.revision_height))
    }
}

/// Parses `{revision_number}-{revision_height}`.
impl FromStr for Height {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (number, height) = s
            .split_once('-')
            .ok_or_else(|| TypesError::invalid_height(s.to_string()))?;

        let revision_number = number
            .parse::<u64>()
            .map_err(|_| TypesError::invalid_height(s.to_string()))?;
        let revision_height = height
            .parse::<u64>()
            .map_err(|_| TypesError::invalid_height(s.to_string()))?;

        Ok(Self {
            revision_number,
            revision_height,
        })
    }
}
