//! `OnPairUpdate` callback contract.
//!
//! The feed client owns delivery; this module only defines the handler shape
//! and a [`replay`] helper that drives a handler from a recorded stream.

use std::io::BufRead;

use serde::Serialize;
use tracing::{debug, warn};

use crate::stream::{StreamError, UpdateStreamReader};
use crate::{Pair, PairUpdate};

/// Receiver of pair updates.
pub trait PairUpdateHandler: Send + Sync {
    fn on_pair_update(&self, pair: &Pair, update: &PairUpdate);
}

impl<F> PairUpdateHandler for F
where
    F: Fn(&Pair, &PairUpdate) + Send + Sync,
{
    fn on_pair_update(&self, pair: &Pair, update: &PairUpdate) {
        self(pair, update)
    }
}

/// Outcome of a [`replay`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub delivered: usize,
}

/// Deliver every event of an NDJSON stream to `handler`, in stream order.
///
/// Stops at the first line that fails to decode; events before it have
/// already been delivered.
pub fn replay<R, H>(reader: R, handler: &H) -> Result<ReplayReport, StreamError>
where
    R: BufRead,
    H: PairUpdateHandler + ?Sized,
{
    let mut report = ReplayReport::default();
    let mut events = UpdateStreamReader::new(reader);

    while let Some(event) = events.next() {
        let event = event.inspect_err(|error| {
            warn!(delivered = report.delivered, %error, "replay stopped");
        })?;

        debug!(
            line = events.line_number(),
            pair = %event.pair,
            kind = %event.update.kind(),
            "delivering pair update"
        );
        handler.on_pair_update(&event.pair, &event.update);
        report.delivered += 1;
    }

    Ok(report)
}
