use std::io::{self, Write};
use std::sync::Mutex;

use pairfeed_core::{replay, Pair, PairUpdate, PairUpdateHandler};

use crate::cli::InputArgs;
use crate::error::CliError;

use super::open_input;

/// Prints one diagnostic line per delivered update, remembering the first write failure.
struct DescribePrinter<W> {
    out: Mutex<W>,
    failure: Mutex<Option<io::Error>>,
}

impl<W: Write + Send> PairUpdateHandler for DescribePrinter<W> {
    fn on_pair_update(&self, pair: &Pair, update: &PairUpdate) {
        let Ok(mut failure) = self.failure.lock() else {
            return;
        };
        if failure.is_some() {
            return;
        }

        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Err(error) = writeln!(out, "{pair} {update}") {
            *failure = Some(error);
        }
    }
}

pub fn run<W: Write + Send>(args: &InputArgs, out: &mut W) -> Result<(), CliError> {
    let input = open_input(args.input.as_deref())?;
    let printer = DescribePrinter {
        out: Mutex::new(out),
        failure: Mutex::new(None),
    };

    let report = replay(input, &printer)?;
    tracing::info!(delivered = report.delivered, "describe finished");

    if let Some(error) = printer.failure.into_inner().ok().flatten() {
        return Err(CliError::Io(error));
    }
    Ok(())
}
