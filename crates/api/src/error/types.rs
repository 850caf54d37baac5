//! Error type definitions for gateway operations

use core::fmt;
use thiserror::Error;

/// Size a buffer argument was required to have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// The buffer must be exactly this many bytes
    Exactly(usize),
    /// The buffer may be at most this many bytes
    AtMost(usize),
}

impl Expected {
    /// Whether `actual` satisfies this contract
    pub fn admits(self, actual: usize) -> bool {
        match self {
            Self::Exactly(n) => actual == n,
            Self::AtMost(n) => actual <= n,
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {} bytes", n),
            Self::AtMost(n) => write!(f, "at most {} bytes", n),
        }
    }
}

/// Primary error type for gateway operations
///
/// Every variant names the violated contract rather than exposing engine
/// diagnostics. The type is `Clone` so that a cached bring-up failure can be
/// handed to every pending and future caller identically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Configuration was changed after the engine started loading
    #[error("{context}: configuration is locked once the engine has started loading")]
    ConfigurationLocked { context: &'static str },

    /// The engine artifact could not be obtained or instantiated
    #[error("engine failed to load ({context}): {message}")]
    EngineLoad {
        context: &'static str,
        message: String,
    },

    /// The engine's static memory region cannot hold the fixed slots
    #[error("engine static memory too small: {required} bytes required, {available} available")]
    EngineCapacity { required: usize, available: usize },

    /// A caller buffer violated its size contract
    #[error("invalid buffer size for `{argument}`: expected {expected}, got {actual} bytes")]
    InvalidBufferSize {
        argument: &'static str,
        expected: Expected,
        actual: usize,
    },

    /// An argument combination or value the engine cannot accept
    #[error("illegal argument ({context}): {message}")]
    IllegalArgument {
        context: &'static str,
        message: String,
    },
}

/// Result type for gateway operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Whether this error is terminal for the gateway instance
    ///
    /// Bring-up failures are cached and repeated for the lifetime of the
    /// gateway; every other error is a caller error that can be retried with
    /// corrected arguments.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::EngineLoad { .. } | Self::EngineCapacity { .. })
    }

    /// Build an `EngineLoad` error from any displayable cause
    pub fn engine_load(context: &'static str, cause: impl fmt::Display) -> Self {
        Self::EngineLoad {
            context,
            message: cause.to_string(),
        }
    }

    /// Build an `IllegalArgument` error
    pub fn illegal_argument(context: &'static str, message: impl Into<String>) -> Self {
        Self::IllegalArgument {
            context,
            message: message.into(),
        }
    }
}
