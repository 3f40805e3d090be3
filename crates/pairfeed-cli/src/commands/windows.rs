use std::io::Write;

use pairfeed_core::PerformanceWindow;

use crate::error::CliError;

use super::write_json;

pub fn run<W: Write>(out: &mut W, pretty: bool) -> Result<(), CliError> {
    write_json(out, &PerformanceWindow::ALL, pretty)
}
