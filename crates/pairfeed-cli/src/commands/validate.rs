use std::io::{self, Write};

use pairfeed_core::validate_stream;

use crate::cli::InputArgs;
use crate::error::CliError;

use super::{open_input, write_json};

pub fn run<W: Write>(args: &InputArgs, out: &mut W, pretty: bool) -> Result<(), CliError> {
    let input = io::read_to_string(open_input(args.input.as_deref())?)?;
    let summary = validate_stream(&input)?;
    tracing::info!(events = summary.events, pairs = summary.pairs, "stream is valid");
    write_json(out, &summary, pretty)
}
