//! # NDJSON Update Streams
//!
//! One [`PairEvent`] per line:
//!
//! ```text
//! {"Pair":{"ID":"btcusd"},"Update":{"VWAPUpdate":{"VWAP":"42.50","Timestamp":"2024-01-01T00:00:00Z"}}}
//! {"Pair":{"ID":"btcusd"},"Update":{"PerformanceUpdate":{"Window":"24h","Performance":"1.25"}}}
//! ```
//!
//! Blank lines are ignored. Line numbers in errors are 1-based.

use std::collections::{BTreeSet, HashMap};
use std::io::{BufRead, Lines, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{
    CoreError, Pair, PairId, PairUpdate, PairUpdateKind, PerformanceWindow, RawPairUpdate,
    UtcDateTime,
};

/// A pair update as delivered to `OnPairUpdate` consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairEvent {
    #[serde(rename = "Pair")]
    pub pair: Pair,
    #[serde(rename = "Update")]
    pub update: PairUpdate,
}

#[derive(Deserialize)]
struct RawPairEvent {
    #[serde(rename = "Pair")]
    pair: Pair,
    #[serde(rename = "Update")]
    update: RawPairUpdate,
}

impl PairEvent {
    pub fn new(pair: Pair, update: impl Into<PairUpdate>) -> Self {
        Self {
            pair,
            update: update.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(input: &str) -> Result<Self, CoreError> {
        let raw: RawPairEvent = serde_json::from_str(input)?;
        Ok(Self {
            pair: raw.pair,
            update: PairUpdate::try_from(raw.update)?,
        })
    }
}

/// Error type for stream operations.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("line {line}: {source}")]
    Decode { line: usize, source: CoreError },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writer for NDJSON pair events.
///
/// Not thread-safe; use one writer per thread or synchronize externally.
pub struct NdjsonUpdateWriter<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> NdjsonUpdateWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Write one event line and flush it.
    pub fn write_event(&mut self, event: &PairEvent) -> Result<(), StreamError> {
        let payload = serde_json::to_string(event)?;
        self.writer.write_all(payload.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Line-by-line reader over an NDJSON update stream.
pub struct UpdateStreamReader<R: BufRead> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> UpdateStreamReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    /// Line number of the most recently read line.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for UpdateStreamReader<R> {
    type Item = Result<PairEvent, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(error) => return Some(Err(StreamError::Io(error))),
            };
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            return Some(
                PairEvent::from_json(&line).map_err(|source| StreamError::Decode {
                    line: self.line_number,
                    source,
                }),
            );
        }
    }
}

/// Parse every event in `input`, failing on the first malformed line.
pub fn parse_events(input: &str) -> Result<Vec<PairEvent>, StreamError> {
    UpdateStreamReader::new(input.as_bytes()).collect()
}

/// Counts gathered by [`validate_stream`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamSummary {
    pub events: usize,
    pub vwap: usize,
    pub performance: usize,
    pub trendline: usize,
    pub pairs: usize,
}

/// Error from stream validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stream validation error at line {line_number}: {message}")]
pub struct StreamValidationError {
    /// 1-based line number where the error occurred.
    pub line_number: usize,
    pub message: String,
}

/// Validate that every line decodes and that timestamps never go backwards.
///
/// VWAP timestamps are tracked per pair, trendline timestamps per pair and window.
pub fn validate_stream(input: &str) -> Result<StreamSummary, StreamValidationError> {
    let mut summary = StreamSummary::default();
    let mut pairs = BTreeSet::new();
    let mut last_vwap: HashMap<PairId, UtcDateTime> = HashMap::new();
    let mut last_trendline: HashMap<(PairId, PerformanceWindow), UtcDateTime> = HashMap::new();

    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let event = PairEvent::from_json(line).map_err(|error| StreamValidationError {
            line_number,
            message: error.to_string(),
        })?;

        let previous = match &event.update {
            PairUpdate::Vwap(update) => {
                last_vwap.insert(event.pair.id.clone(), update.timestamp)
            }
            PairUpdate::Trendline(update) => last_trendline.insert(
                (event.pair.id.clone(), update.window),
                update.timestamp,
            ),
            PairUpdate::Performance(_) => None,
        };

        if let (Some(previous), Some(current)) = (previous, event.update.timestamp()) {
            if current < previous {
                warn!(
                    line = line_number,
                    pair = %event.pair,
                    kind = %event.update.kind(),
                    "update timestamp went backwards"
                );
                return Err(StreamValidationError {
                    line_number,
                    message: format!(
                        "{} timestamp for pair {} went backwards ({current} < {previous})",
                        event.update.kind(),
                        event.pair
                    ),
                });
            }
        }

        summary.events += 1;
        match event.update.kind() {
            PairUpdateKind::Vwap => summary.vwap += 1,
            PairUpdateKind::Performance => summary.performance += 1,
            PairUpdateKind::Trendline => summary.trendline += 1,
        }
        pairs.insert(event.pair.id);
    }

    summary.pairs = pairs.len();
    Ok(summary)
}
