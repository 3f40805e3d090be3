use std::io::Write;
use std::str::FromStr;

use pairfeed_core::{
    NdjsonUpdateWriter, Pair, PairEvent, PairUpdate, PerformanceUpdate, PerformanceWindow,
    TrendlineUpdate, UtcDateTime, ValidationError, VwapUpdate,
};
use rust_decimal::Decimal;

use crate::cli::{EncodeArgs, EncodeCommand};
use crate::error::CliError;

pub fn run<W: Write>(args: &EncodeArgs, out: &mut W) -> Result<(), CliError> {
    let (pair, update) = match &args.update {
        EncodeCommand::Vwap(args) => {
            let update = VwapUpdate::new(
                parse_decimal("vwap", &args.vwap)?,
                parse_timestamp(args.timestamp.as_deref())?,
            )?;
            (Pair::parse(args.pair.trim())?, PairUpdate::from(update))
        }
        EncodeCommand::Performance(args) => {
            let update = PerformanceUpdate::new(
                parse_window(&args.window)?,
                parse_decimal("performance", &args.performance)?,
            );
            (Pair::parse(args.pair.trim())?, PairUpdate::from(update))
        }
        EncodeCommand::Trendline(args) => {
            let update = TrendlineUpdate::new(
                parse_window(&args.window)?,
                parse_timestamp(args.timestamp.as_deref())?,
                parse_decimal("price", &args.price)?,
                parse_decimal("volume", &args.volume)?,
            )?;
            (Pair::parse(args.pair.trim())?, PairUpdate::from(update))
        }
    };

    tracing::debug!(%pair, kind = %update.kind(), "encoding pair update");
    NdjsonUpdateWriter::new(out).write_event(&PairEvent::new(pair, update))?;
    Ok(())
}

fn parse_decimal(flag: &str, raw: &str) -> Result<Decimal, CliError> {
    Decimal::from_str(raw.trim())
        .map_err(|error| CliError::Command(format!("invalid decimal for --{flag} '{raw}': {error}")))
}

/// `--window` is typed by hand, so case and padding are forgiven here only.
fn parse_window(raw: &str) -> Result<PerformanceWindow, ValidationError> {
    PerformanceWindow::from_str(&raw.trim().to_ascii_lowercase()).map_err(|_| {
        ValidationError::InvalidWindow {
            value: raw.to_owned(),
        }
    })
}

fn parse_timestamp(raw: Option<&str>) -> Result<UtcDateTime, CliError> {
    match raw {
        Some(raw) => Ok(UtcDateTime::parse(raw)?),
        None => Ok(UtcDateTime::now()),
    }
}

#[cfg(test)]
mod tests {
    use pairfeed_core::PairUpdateKind;

    use super::*;
    use crate::cli::{PerformanceArgs, TrendlineArgs, VwapArgs};

    fn encode(update: EncodeCommand) -> Result<String, CliError> {
        let mut out = Vec::new();
        run(&EncodeArgs { update }, &mut out)?;
        Ok(String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn encodes_vwap_line() {
        let line = encode(EncodeCommand::Vwap(VwapArgs {
            pair: "btcusd".to_owned(),
            vwap: "42.50".to_owned(),
            timestamp: Some("2024-01-01T00:00:00Z".to_owned()),
        }))
        .expect("encode");

        assert_eq!(
            line,
            "{\"Pair\":{\"ID\":\"btcusd\"},\"Update\":{\"VWAPUpdate\":{\"VWAP\":\"42.50\",\"Timestamp\":\"2024-01-01T00:00:00Z\"}}}\n"
        );
    }

    #[test]
    fn encodes_trendline_that_decodes_back() {
        let line = encode(EncodeCommand::Trendline(TrendlineArgs {
            pair: "ethusd".to_owned(),
            window: "6m".to_owned(),
            timestamp: None,
            price: "1800.1".to_owned(),
            volume: "12".to_owned(),
        }))
        .expect("encode");

        let event = PairEvent::from_json(line.trim()).expect("decode");
        assert_eq!(event.update.kind(), PairUpdateKind::Trendline);
        assert_eq!(event.update.window(), Some(PerformanceWindow::SixMonths));
    }

    #[test]
    fn rejects_unknown_window() {
        let err = encode(EncodeCommand::Performance(PerformanceArgs {
            pair: "btcusd".to_owned(),
            window: "10y".to_owned(),
            performance: "1".to_owned(),
        }))
        .expect_err("must fail");

        assert!(matches!(
            err,
            CliError::Validation(ValidationError::InvalidWindow { .. })
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn window_flag_forgives_case_and_padding() {
        let line = encode(EncodeCommand::Performance(PerformanceArgs {
            pair: " btcusd ".to_owned(),
            window: " YTD".to_owned(),
            performance: "1".to_owned(),
        }))
        .expect("encode");

        assert_eq!(
            line,
            "{\"Pair\":{\"ID\":\"btcusd\"},\"Update\":{\"PerformanceUpdate\":{\"Window\":\"ytd\",\"Performance\":\"1\"}}}\n"
        );
    }

    #[test]
    fn unknown_window_flag_is_reported_as_typed() {
        let err = encode(EncodeCommand::Performance(PerformanceArgs {
            pair: "btcusd".to_owned(),
            window: "10Y".to_owned(),
            performance: "1".to_owned(),
        }))
        .expect_err("must fail");

        assert!(matches!(
            err,
            CliError::Validation(ValidationError::InvalidWindow { ref value }) if value == "10Y"
        ));
    }

    #[test]
    fn rejects_bad_decimal() {
        let err = encode(EncodeCommand::Vwap(VwapArgs {
            pair: "btcusd".to_owned(),
            vwap: "forty".to_owned(),
            timestamp: None,
        }))
        .expect_err("must fail");

        assert!(matches!(err, CliError::Command(message) if message.contains("--vwap")));
    }
}
