use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Time window over which performance and trendlines are calculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PerformanceWindow {
    TwentyFourHours,
    OneWeek,
    OneMonth,
    ThreeMonths,
    SixMonths,
    YearToDate,
    OneYear,
    TwoYears,
    ThreeYears,
    FourYears,
    FiveYears,
}

impl PerformanceWindow {
    pub const ALL: [Self; 11] = [
        Self::TwentyFourHours,
        Self::OneWeek,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::YearToDate,
        Self::OneYear,
        Self::TwoYears,
        Self::ThreeYears,
        Self::FourYears,
        Self::FiveYears,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TwentyFourHours => "24h",
            Self::OneWeek => "1w",
            Self::OneMonth => "1m",
            Self::ThreeMonths => "3m",
            Self::SixMonths => "6m",
            Self::YearToDate => "ytd",
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::ThreeYears => "3y",
            Self::FourYears => "4y",
            Self::FiveYears => "5y",
        }
    }
}

impl Display for PerformanceWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact match against the canonical literals; case and whitespace are significant.
impl FromStr for PerformanceWindow {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|window| window.as_str() == value)
            .ok_or_else(|| ValidationError::InvalidWindow {
                value: value.to_owned(),
            })
    }
}

impl TryFrom<String> for PerformanceWindow {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PerformanceWindow> for String {
    fn from(value: PerformanceWindow) -> Self {
        value.as_str().to_owned()
    }
}
