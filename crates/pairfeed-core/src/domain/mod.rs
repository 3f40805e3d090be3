//! # Domain Models
//!
//! Value types carried by the pair update feed.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PairId`] | Opaque, validated pair identifier |
//! | [`Pair`] | Traded market pair |
//! | [`PerformanceWindow`] | Closed set of lookback windows (24h .. 5y) |
//! | [`UtcDateTime`] | RFC3339 instant normalized to UTC |
//! | [`VwapUpdate`] | Volume weighted average price at a point in time |
//! | [`PerformanceUpdate`] | Signed performance over a window |
//! | [`TrendlineUpdate`] | Price/volume trendline point for a window |
//!
//! Prices, volumes and performance figures are [`rust_decimal::Decimal`]
//! values and travel as strings on the wire so no precision is lost.
//! None of these types compute anything; values are produced upstream.

mod pair;
mod timestamp;
mod updates;
mod window;

pub use pair::{Pair, PairId};
pub use timestamp::UtcDateTime;
pub use updates::{PerformanceUpdate, TrendlineUpdate, VwapUpdate};
pub use window::PerformanceWindow;
