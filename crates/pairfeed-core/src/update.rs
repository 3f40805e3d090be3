//! # Pair Update Envelope
//!
//! [`PairUpdate`] carries exactly one of the three update records through a
//! single callback or channel.
//!
//! ## Wire form
//!
//! An object with exactly one of the keys `VWAPUpdate`, `PerformanceUpdate`
//! or `TrendlineUpdate`. Absent variants are omitted, never `null`:
//!
//! ```json
//! {"VWAPUpdate":{"VWAP":"42.50","Timestamp":"2024-01-01T00:00:00Z"}}
//! ```
//!
//! Decoding goes through [`RawPairUpdate`], the three-optional-field shape,
//! and rejects objects with zero or several populated keys.
//!
//! ## Diagnostics
//!
//! [`PairUpdate::describe`] (and `Display`) render a key-sorted JSON view of the
//! populated variant for logs. That rendering has its own code path and never
//! fails; it is not meant to be parsed back.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    CoreError, PerformanceUpdate, PerformanceWindow, TrendlineUpdate, UtcDateTime,
    ValidationError, VwapUpdate,
};

const VWAP_KEY: &str = "VWAPUpdate";
const PERFORMANCE_KEY: &str = "PerformanceUpdate";
const TRENDLINE_KEY: &str = "TrendlineUpdate";

/// Discriminant of a [`PairUpdate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairUpdateKind {
    Vwap,
    Performance,
    Trendline,
}

impl PairUpdateKind {
    pub const ALL: [Self; 3] = [Self::Vwap, Self::Performance, Self::Trendline];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vwap => "vwap",
            Self::Performance => "performance",
            Self::Trendline => "trendline",
        }
    }

    /// Object key used for this variant in the wire form.
    pub const fn wire_key(self) -> &'static str {
        match self {
            Self::Vwap => VWAP_KEY,
            Self::Performance => PERFORMANCE_KEY,
            Self::Trendline => TRENDLINE_KEY,
        }
    }
}

impl Display for PairUpdateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One update for a pair. Exactly one variant is ever present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPairUpdate", into = "RawPairUpdate")]
pub enum PairUpdate {
    Vwap(VwapUpdate),
    Performance(PerformanceUpdate),
    Trendline(TrendlineUpdate),
}

impl PairUpdate {
    pub fn vwap(update: VwapUpdate) -> Self {
        Self::Vwap(update)
    }

    pub fn performance(update: PerformanceUpdate) -> Self {
        Self::Performance(update)
    }

    pub fn trendline(update: TrendlineUpdate) -> Self {
        Self::Trendline(update)
    }

    pub const fn kind(&self) -> PairUpdateKind {
        match self {
            Self::Vwap(_) => PairUpdateKind::Vwap,
            Self::Performance(_) => PairUpdateKind::Performance,
            Self::Trendline(_) => PairUpdateKind::Trendline,
        }
    }

    pub fn as_vwap(&self) -> Option<&VwapUpdate> {
        match self {
            Self::Vwap(update) => Some(update),
            _ => None,
        }
    }

    pub fn as_performance(&self) -> Option<&PerformanceUpdate> {
        match self {
            Self::Performance(update) => Some(update),
            _ => None,
        }
    }

    pub fn as_trendline(&self) -> Option<&TrendlineUpdate> {
        match self {
            Self::Trendline(update) => Some(update),
            _ => None,
        }
    }

    /// Window of performance and trendline updates; VWAP has none.
    pub fn window(&self) -> Option<PerformanceWindow> {
        match self {
            Self::Vwap(_) => None,
            Self::Performance(update) => Some(update.window),
            Self::Trendline(update) => Some(update.window),
        }
    }

    /// Timestamp of VWAP and trendline updates; performance updates carry none.
    pub fn timestamp(&self) -> Option<UtcDateTime> {
        match self {
            Self::Vwap(update) => Some(update.timestamp),
            Self::Performance(_) => None,
            Self::Trendline(update) => Some(update.timestamp),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Vwap(update) => update.validate(),
            Self::Performance(update) => update.validate(),
            Self::Trendline(update) => update.validate(),
        }
    }

    /// Encode into the canonical wire form.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from the wire form, surfacing a malformed envelope as
    /// [`ValidationError::MalformedUpdate`].
    pub fn from_json(input: &str) -> Result<Self, CoreError> {
        let raw: RawPairUpdate = serde_json::from_str(input)?;
        Ok(Self::try_from(raw)?)
    }

    /// Key-sorted JSON rendering of the populated variant, for logging.
    ///
    /// Rendering failures are reported inside the returned string.
    pub fn describe(&self) -> String {
        match self.describe_value() {
            Ok(value) => value.to_string(),
            Err(error) => format!("[failed to describe PairUpdate: {error}]"),
        }
    }

    fn describe_value(&self) -> Result<Value, serde_json::Error> {
        let payload = match self {
            Self::Vwap(update) => serde_json::to_value(update)?,
            Self::Performance(update) => serde_json::to_value(update)?,
            Self::Trendline(update) => serde_json::to_value(update)?,
        };

        let mut root = serde_json::Map::new();
        root.insert(self.kind().wire_key().to_owned(), sort_keys(payload));
        Ok(Value::Object(root))
    }
}

impl Display for PairUpdate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<VwapUpdate> for PairUpdate {
    fn from(value: VwapUpdate) -> Self {
        Self::Vwap(value)
    }
}

impl From<PerformanceUpdate> for PairUpdate {
    fn from(value: PerformanceUpdate) -> Self {
        Self::Performance(value)
    }
}

impl From<TrendlineUpdate> for PairUpdate {
    fn from(value: TrendlineUpdate) -> Self {
        Self::Trendline(value)
    }
}

/// Three-optional-field wire shape of a [`PairUpdate`].
///
/// Any number of fields may be set here; conversion into [`PairUpdate`]
/// enforces that exactly one is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPairUpdate {
    #[serde(
        rename = "VWAPUpdate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vwap_update: Option<VwapUpdate>,
    #[serde(
        rename = "PerformanceUpdate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub performance_update: Option<PerformanceUpdate>,
    #[serde(
        rename = "TrendlineUpdate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub trendline_update: Option<TrendlineUpdate>,
}

impl RawPairUpdate {
    pub fn present(&self) -> usize {
        usize::from(self.vwap_update.is_some())
            + usize::from(self.performance_update.is_some())
            + usize::from(self.trendline_update.is_some())
    }
}

impl TryFrom<RawPairUpdate> for PairUpdate {
    type Error = ValidationError;

    fn try_from(value: RawPairUpdate) -> Result<Self, Self::Error> {
        let present = value.present();
        let update = match value {
            RawPairUpdate {
                vwap_update: Some(update),
                performance_update: None,
                trendline_update: None,
            } => Self::Vwap(update),
            RawPairUpdate {
                vwap_update: None,
                performance_update: Some(update),
                trendline_update: None,
            } => Self::Performance(update),
            RawPairUpdate {
                vwap_update: None,
                performance_update: None,
                trendline_update: Some(update),
            } => Self::Trendline(update),
            _ => return Err(ValidationError::MalformedUpdate { present }),
        };

        update.validate()?;
        Ok(update)
    }
}

impl From<PairUpdate> for RawPairUpdate {
    fn from(value: PairUpdate) -> Self {
        match value {
            PairUpdate::Vwap(update) => Self {
                vwap_update: Some(update),
                ..Self::default()
            },
            PairUpdate::Performance(update) => Self {
                performance_update: Some(update),
                ..Self::default()
            },
            PairUpdate::Trendline(update) => Self {
                trendline_update: Some(update),
                ..Self::default()
            },
        }
    }
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(key, value)| (key, sort_keys(value)))
                .collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn ts() -> UtcDateTime {
        UtcDateTime::parse("2024-01-01T00:00:00Z").expect("timestamp")
    }

    fn vwap_update() -> PairUpdate {
        PairUpdate::vwap(VwapUpdate::new(Decimal::new(4250, 2), ts()).expect("valid"))
    }

    #[test]
    fn constructors_populate_exactly_one_variant() {
        let vwap = vwap_update();
        let performance = PairUpdate::performance(PerformanceUpdate::new(
            PerformanceWindow::OneYear,
            Decimal::new(-25, 1),
        ));
        let trendline = PairUpdate::trendline(
            TrendlineUpdate::new(
                PerformanceWindow::ThreeMonths,
                ts(),
                Decimal::new(10, 0),
                Decimal::new(3, 0),
            )
            .expect("valid"),
        );

        for update in [&vwap, &performance, &trendline] {
            let populated = [
                update.as_vwap().is_some(),
                update.as_performance().is_some(),
                update.as_trendline().is_some(),
            ];
            assert_eq!(populated.iter().filter(|set| **set).count(), 1);
            assert_eq!(RawPairUpdate::from(update.clone()).present(), 1);
        }
    }

    #[test]
    fn encodes_single_key() {
        let json: Value = serde_json::from_str(&vwap_update().to_json().expect("encode"))
            .expect("valid json");
        let object = json.as_object().expect("object");

        assert_eq!(object.len(), 1);
        assert_eq!(object["VWAPUpdate"]["VWAP"], Value::from("42.50"));
        assert_eq!(
            object["VWAPUpdate"]["Timestamp"],
            Value::from("2024-01-01T00:00:00Z")
        );
        assert!(!object.contains_key("PerformanceUpdate"));
        assert!(!object.contains_key("TrendlineUpdate"));
    }

    #[test]
    fn rejects_empty_envelope() {
        let err = PairUpdate::from_json("{}").expect_err("must fail");
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MalformedUpdate { present: 0 })
        ));
    }

    #[test]
    fn rejects_two_populated_variants() {
        let input = r#"{
            "VWAPUpdate": {"VWAP": "1", "Timestamp": "2024-01-01T00:00:00Z"},
            "PerformanceUpdate": {"Window": "24h", "Performance": "0.5"}
        }"#;
        let err = PairUpdate::from_json(input).expect_err("must fail");
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MalformedUpdate { present: 2 })
        ));
    }

    #[test]
    fn explicit_nulls_count_as_absent() {
        let input = r#"{"VWAPUpdate":null,"PerformanceUpdate":{"Window":"ytd","Performance":"-3.1"},"TrendlineUpdate":null}"#;
        let update = PairUpdate::from_json(input).expect("one variant is set");
        assert_eq!(update.kind(), PairUpdateKind::Performance);
        assert_eq!(update.window(), Some(PerformanceWindow::YearToDate));
    }

    #[test]
    fn decoding_validates_payload() {
        let input = r#"{"VWAPUpdate":{"VWAP":"-1","Timestamp":"2024-01-01T00:00:00Z"}}"#;
        let err = PairUpdate::from_json(input).expect_err("must fail");
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NegativeValue { field: "VWAP" })
        ));
    }

    #[test]
    fn describe_sorts_keys_and_omits_other_variants() {
        let described = vwap_update().describe();
        assert_eq!(
            described,
            r#"{"VWAPUpdate":{"Timestamp":"2024-01-01T00:00:00Z","VWAP":"42.50"}}"#
        );
        assert!(!described.contains("Performance"));
        assert!(!described.contains("Trendline"));
        assert_eq!(vwap_update().to_string(), described);
    }

    #[test]
    fn describe_reports_failures_inline() {
        // Year -1 cannot be rendered as RFC3339.
        let timestamp = UtcDateTime::from_unix_timestamp(-62_200_000_000).expect("in range");
        let update = PairUpdate::vwap(VwapUpdate {
            vwap: Decimal::ONE,
            timestamp,
        });

        assert!(update
            .describe()
            .starts_with("[failed to describe PairUpdate: "));
    }

    #[test]
    fn kind_maps_to_wire_key() {
        let keys: Vec<_> = PairUpdateKind::ALL.iter().map(|kind| kind.wire_key()).collect();
        assert_eq!(keys, ["VWAPUpdate", "PerformanceUpdate", "TrendlineUpdate"]);
    }
}
