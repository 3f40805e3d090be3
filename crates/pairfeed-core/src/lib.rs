//! # Pairfeed Core
//!
//! Data vocabulary for a Cryptowatch-style pair update feed.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Pair identity, performance windows, timestamps, update records |
//! | [`update`] | [`PairUpdate`] envelope, wire codec and diagnostic rendering |
//! | [`stream`] | NDJSON reader/writer and stream validation |
//! | [`handler`] | `OnPairUpdate` handler contract and stream replay |
//! | [`error`] | Core error types |
//!
//! ## Quick Start
//!
//! ```rust
//! use pairfeed_core::{PairUpdate, UtcDateTime, VwapUpdate};
//! use rust_decimal::Decimal;
//!
//! let ts = UtcDateTime::parse("2024-01-01T00:00:00Z")?;
//! let update = PairUpdate::vwap(VwapUpdate::new(Decimal::new(4250, 2), ts)?);
//!
//! let wire = update.to_json()?;
//! assert_eq!(PairUpdate::from_json(&wire)?, update);
//! # Ok::<(), pairfeed_core::CoreError>(())
//! ```
//!
//! Values are computed elsewhere; this crate only carries them.

pub mod domain;
pub mod error;
pub mod handler;
pub mod stream;
pub mod update;

pub use domain::{
    Pair, PairId, PerformanceUpdate, PerformanceWindow, TrendlineUpdate, UtcDateTime, VwapUpdate,
};
pub use error::{CoreError, ValidationError};
pub use handler::{replay, PairUpdateHandler, ReplayReport};
pub use stream::{
    parse_events, validate_stream, NdjsonUpdateWriter, PairEvent, StreamError, StreamSummary,
    StreamValidationError, UpdateStreamReader,
};
pub use update::{PairUpdate, PairUpdateKind, RawPairUpdate};
