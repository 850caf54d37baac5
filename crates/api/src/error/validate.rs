//! Validation utilities for buffer contracts

use super::types::{Error, Expected, Result};

/// Validate an exact length
pub fn exact_length(argument: &'static str, actual: usize, expected: usize) -> Result<()> {
    contract(argument, actual, Expected::Exactly(expected))
}

/// Validate a maximum length
pub fn max_length(argument: &'static str, actual: usize, max: usize) -> Result<()> {
    contract(argument, actual, Expected::AtMost(max))
}

/// Validate a length against an arbitrary contract
pub fn contract(argument: &'static str, actual: usize, expected: Expected) -> Result<()> {
    if !expected.admits(actual) {
        return Err(Error::InvalidBufferSize {
            argument,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Just check an argument condition
pub fn check_argument(condition: bool, context: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::illegal_argument(context, reason));
    }
    Ok(())
}
