use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::ser::Error as SerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::ValidationError;

/// Timezone-aware instant, stored normalized to UTC.
///
/// Input may carry any RFC3339 offset; the instant is kept and the offset is
/// rewritten to `Z`, so two values describing the same instant compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let parsed = OffsetDateTime::parse(input.trim(), &Rfc3339).map_err(|_| {
            ValidationError::InvalidTimestamp {
                value: input.to_owned(),
            }
        })?;

        Self::from_offset_datetime(parsed)
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Result<Self, ValidationError> {
        value
            .checked_to_offset(UtcOffset::UTC)
            .map(Self)
            .ok_or(ValidationError::TimestampOutOfRange)
    }

    pub fn from_unix_timestamp(seconds: i64) -> Result<Self, ValidationError> {
        OffsetDateTime::from_unix_timestamp(seconds)
            .map(Self)
            .map_err(|_| ValidationError::TimestampOutOfRange)
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    /// RFC3339 rendering; `None` only for years outside 0..=9999.
    pub fn try_format_rfc3339(self) -> Option<String> {
        self.0.format(&Rfc3339).ok()
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.try_format_rfc3339() {
            Some(formatted) => f.write_str(&formatted),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = self.0.format(&Rfc3339).map_err(S::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_utc_timestamp() {
        let parsed = UtcDateTime::parse("2024-01-01T00:00:00Z").expect("must parse");
        assert_eq!(parsed.to_string(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn normalizes_offset_to_utc() {
        let shifted = UtcDateTime::parse("2024-01-01T01:00:00+01:00").expect("must parse");
        let utc = UtcDateTime::parse("2024-01-01T00:00:00Z").expect("must parse");
        assert_eq!(shifted, utc);
        assert_eq!(shifted.to_string(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn keeps_subsecond_precision() {
        let parsed = UtcDateTime::parse("2024-03-05T12:30:45.123456789Z").expect("must parse");
        let json = serde_json::to_string(&parsed).expect("serialize");
        let back: UtcDateTime = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, parsed);
    }

    #[test]
    fn rejects_non_rfc3339() {
        let err = UtcDateTime::parse("2024-01-01 00:00:00").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTimestamp { .. }));
    }
}
