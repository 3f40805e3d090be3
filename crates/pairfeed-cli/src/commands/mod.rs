mod describe;
mod encode;
mod validate;
mod windows;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub fn run<W: Write + Send>(cli: &Cli, out: &mut W) -> Result<(), CliError> {
    match &cli.command {
        Command::Windows => windows::run(out, cli.pretty),
        Command::Encode(args) => encode::run(args, out),
        Command::Describe(args) => describe::run(args, out),
        Command::Validate(args) => validate::run(args, out, cli.pretty),
    }
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, CliError> {
    match path {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    out.write_all(b"\n")?;
    Ok(())
}
