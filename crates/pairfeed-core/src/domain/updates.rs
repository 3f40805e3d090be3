use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PerformanceWindow, UtcDateTime, ValidationError};

/// Most recent volume weighted average price of a market at a given time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VwapUpdate {
    #[serde(rename = "VWAP")]
    pub vwap: Decimal,
    #[serde(rename = "Timestamp")]
    pub timestamp: UtcDateTime,
}

impl VwapUpdate {
    pub fn new(vwap: Decimal, timestamp: UtcDateTime) -> Result<Self, ValidationError> {
        let update = Self { vwap, timestamp };
        update.validate()?;
        Ok(update)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_non_negative("VWAP", self.vwap)
    }
}

/// Most recent performance of a market over one window.
///
/// `performance` is signed: a ratio or percentage supplied by the upstream
/// analytics service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerformanceUpdate {
    #[serde(rename = "Window")]
    pub window: PerformanceWindow,
    #[serde(rename = "Performance")]
    pub performance: Decimal,
}

impl PerformanceUpdate {
    pub fn new(window: PerformanceWindow, performance: Decimal) -> Self {
        Self {
            window,
            performance,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Trendline point of a market for one window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrendlineUpdate {
    #[serde(rename = "Window")]
    pub window: PerformanceWindow,
    #[serde(rename = "Timestamp")]
    pub timestamp: UtcDateTime,
    #[serde(rename = "Price")]
    pub price: Decimal,
    #[serde(rename = "Volume")]
    pub volume: Decimal,
}

impl TrendlineUpdate {
    pub fn new(
        window: PerformanceWindow,
        timestamp: UtcDateTime,
        price: Decimal,
        volume: Decimal,
    ) -> Result<Self, ValidationError> {
        let update = Self {
            window,
            timestamp,
            price,
            volume,
        };
        update.validate()?;
        Ok(update)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_non_negative("Price", self.price)?;
        validate_non_negative("Volume", self.volume)
    }
}

fn validate_non_negative(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> UtcDateTime {
        UtcDateTime::parse("2024-01-01T00:00:00Z").expect("timestamp")
    }

    #[test]
    fn rejects_negative_vwap() {
        let err = VwapUpdate::new(Decimal::new(-1, 2), ts()).expect_err("must fail");
        assert_eq!(err, ValidationError::NegativeValue { field: "VWAP" });
    }

    #[test]
    fn accepts_zero_vwap() {
        let update = VwapUpdate::new(Decimal::ZERO, ts()).expect("zero is allowed");
        assert_eq!(update.vwap, Decimal::ZERO);
    }

    #[test]
    fn performance_may_be_negative() {
        let update = PerformanceUpdate::new(PerformanceWindow::OneWeek, Decimal::new(-1234, 2));
        assert!(update.validate().is_ok());
    }

    #[test]
    fn rejects_negative_trendline_volume() {
        let err = TrendlineUpdate::new(
            PerformanceWindow::OneMonth,
            ts(),
            Decimal::new(100, 0),
            Decimal::new(-5, 0),
        )
        .expect_err("must fail");
        assert_eq!(err, ValidationError::NegativeValue { field: "Volume" });
    }

    #[test]
    fn vwap_serializes_decimal_as_string_with_scale() {
        let update = VwapUpdate::new(Decimal::new(4250, 2), ts()).expect("valid");
        let json = serde_json::to_value(&update).expect("serialize");
        assert_eq!(json["VWAP"], serde_json::json!("42.50"));
        assert_eq!(json["Timestamp"], serde_json::json!("2024-01-01T00:00:00Z"));
    }
}
