use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Opaque identifier of a traded pair, e.g. `btcusd`.
///
/// Taken verbatim: case is preserved, surrounding whitespace is rejected rather
/// than trimmed, and ids are compared byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PairId(String);

impl PairId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.trim().is_empty() {
            return Err(ValidationError::EmptyPairId);
        }

        for (index, ch) in input.chars().enumerate() {
            if ch.is_whitespace() || ch.is_control() {
                return Err(ValidationError::PairIdInvalidChar { ch, index });
            }
        }

        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PairId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for PairId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for PairId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for PairId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PairId> for String {
    fn from(value: PairId) -> Self {
        value.0
    }
}

/// Currency pair as listed by the exchange's pairs endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    #[serde(rename = "ID")]
    pub id: PairId,
}

impl Pair {
    pub fn new(id: PairId) -> Self {
        Self { id }
    }

    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        PairId::parse(id).map(Self::new)
    }
}

impl Display for Pair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.id.fmt(f)
    }
}
