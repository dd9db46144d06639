//! Command handlers for the `wordle-helper` binary.
//!
//! Handlers write their report to the given writer and return the process
//! exit code; user errors (unknown list, duplicate name, bad constraints) are
//! reported there rather than raised.

pub mod guess;
pub mod import;
pub mod lists;
pub mod read;

use std::process::ExitCode;

use serde_json::Value;

/// Exit codes returned by the command handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    Success = 0,
    /// The command ran but the input was rejected (unknown list, duplicate
    /// name, invalid constraints)
    Rejected = 1,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Turn a command line value into JSON, keeping anything that is not an
/// integer as a string so the validator can report it.
pub(crate) fn parse_scalar(raw: &str) -> Value {
    let raw = raw.trim();
    if raw.is_empty() {
        return Value::Null;
    }
    raw.parse::<i64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Comma separated values; an empty string is an empty list
pub(crate) fn parse_list(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Array(Vec::new());
    }
    Value::Array(raw.split(',').map(parse_scalar).collect())
}

/// Split `CHAR=VALUE`
pub(crate) fn split_assignment(raw: &str) -> anyhow::Result<(&str, &str)> {
    raw.split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Expected CHAR=VALUE, got \"{}\"", raw))
}
