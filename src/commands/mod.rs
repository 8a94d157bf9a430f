//! # CLI Subcommands
//!
//! Contains modules that run the subcommands.

pub mod disc;
pub mod unpack;
pub mod completions;

use std::time::Duration;
use crate::link::serial::{self,SerialConfig};
use crate::records::ParseOptions;

#[derive(thiserror::Error,Debug)]
pub enum CommandError {
    #[error("Command could not be interpreted")]
    InvalidCommand,
    #[error("One of the parameters was out of range")]
    OutOfRange,
    #[error("File not found")]
    FileNotFound
}

/// Gather the serial line settings from the shared line arguments
pub fn line_config(cmd: &clap::ArgMatches) -> Result<SerialConfig,CommandError> {
    let mut config = SerialConfig::default();
    if let Some(path) = cmd.get_one::<String>("port") {
        config.path = path.to_string();
    }
    if let Some(baud) = cmd.get_one::<String>("baud") {
        config.baud = match baud.parse::<u32>() {
            Ok(b) => b,
            Err(_) => return Err(CommandError::OutOfRange)
        };
    }
    if let Some(bits) = cmd.get_one::<u8>("data-bits") {
        config.data_bits = serial::data_bits_from_u8(*bits).ok_or(CommandError::OutOfRange)?;
    }
    if let Some(parity) = cmd.get_one::<String>("parity") {
        config.parity = serial::parity_from_str(parity).ok_or(CommandError::OutOfRange)?;
    }
    if let Some(bits) = cmd.get_one::<u8>("stop-bits") {
        config.stop_bits = serial::stop_bits_from_u8(*bits).ok_or(CommandError::OutOfRange)?;
    }
    if let Some(secs) = cmd.get_one::<f64>("timeout") {
        if !secs.is_finite() || *secs <= 0.0 {
            return Err(CommandError::OutOfRange);
        }
        config.timeout = Duration::from_secs_f64(*secs);
    }
    Ok(config)
}

pub fn parse_options(cmd: &clap::ArgMatches) -> ParseOptions {
    ParseOptions { check_ascii: cmd.get_flag("check-ascii") }
}
