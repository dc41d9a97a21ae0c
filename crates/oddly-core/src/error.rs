//! Error types and stable status codes.
//!
//! Argument errors abort a call before anything is classified or stored.
//! Unsupported value kinds are not errors: the store degrades them to
//! `None` and counts them (see `OddlyEven::degraded_total`).

use std::error::Error;
use std::fmt;

/// A call received an argument of the wrong type.
///
/// Surfaces to the host as its type-error exception.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgumentError {
    /// The argument at `position` is not an OddlyEven store.
    NotAStore {
        /// 1-based argument position.
        position: u8,
        /// Host type name of the argument received.
        found: String,
    },
    /// The argument at `position` is not an integer.
    NonIntegerIndex {
        /// 1-based argument position.
        position: u8,
        /// Host type name of the argument received.
        found: String,
    },
}

impl ArgumentError {
    /// Same error with the host's own type name for the offending argument.
    pub fn with_found(self, name: impl Into<String>) -> Self {
        let found = name.into();
        match self {
            Self::NotAStore { position, .. } => Self::NotAStore { position, found },
            Self::NonIntegerIndex { position, .. } => Self::NonIntegerIndex { position, found },
        }
    }

    /// 1-based position of the offending argument.
    pub fn position(&self) -> u8 {
        match self {
            Self::NotAStore { position, .. } | Self::NonIntegerIndex { position, .. } => *position,
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAStore { position, found } => {
                write!(
                    f,
                    "bad argument #{position} (OddlyEven storage expected, got {found})"
                )
            }
            Self::NonIntegerIndex { position, found } => {
                write!(f, "bad argument #{position} (integer expected, got {found})")
            }
        }
    }
}

impl Error for ArgumentError {}

/// Invalid store or registry configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The store label is empty.
    EmptyLabel,
    /// The store label contains control characters.
    InvalidLabel {
        /// The rejected label.
        label: String,
    },
    /// The storage strategy name is not recognised.
    UnknownStrategy {
        /// The rejected name.
        name: String,
    },
    /// The registry's initial capacity exceeds the table limit.
    CapacityTooLarge {
        /// Requested capacity.
        requested: usize,
        /// Largest accepted capacity.
        max: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "store label must not be empty"),
            Self::InvalidLabel { label } => {
                write!(f, "store label {label:?} contains control characters")
            }
            Self::UnknownStrategy { name } => {
                write!(
                    f,
                    "unknown storage strategy '{name}' (expected 'tagged' or 'registry')"
                )
            }
            Self::CapacityTooLarge { requested, max } => {
                write!(
                    f,
                    "registry initial capacity {requested} exceeds maximum {max}"
                )
            }
        }
    }
}

impl Error for ConfigError {}

/// Status code for host bindings.
///
/// `Ok` = 0, all errors are negative. Values are stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OddlyStatus {
    /// Success.
    Ok = 0,
    /// First argument is not an OddlyEven store.
    NotAStore = -1,
    /// Index or control argument is not an integer.
    NonIntegerIndex = -2,
    /// Store or registry configuration rejected.
    ConfigError = -3,
}

impl OddlyStatus {
    /// Map a raw code back to a status. Unknown codes yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Ok),
            -1 => Some(Self::NotAStore),
            -2 => Some(Self::NonIntegerIndex),
            -3 => Some(Self::ConfigError),
            _ => None,
        }
    }
}

impl From<&ArgumentError> for OddlyStatus {
    fn from(e: &ArgumentError) -> Self {
        match e {
            ArgumentError::NotAStore { .. } => OddlyStatus::NotAStore,
            ArgumentError::NonIntegerIndex { .. } => OddlyStatus::NonIntegerIndex,
        }
    }
}

impl From<&ConfigError> for OddlyStatus {
    fn from(_e: &ConfigError) -> Self {
        OddlyStatus::ConfigError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_values_are_stable() {
        assert_eq!(OddlyStatus::Ok as i32, 0);
        assert_eq!(OddlyStatus::NotAStore as i32, -1);
        assert_eq!(OddlyStatus::NonIntegerIndex as i32, -2);
        assert_eq!(OddlyStatus::ConfigError as i32, -3);
    }

    #[test]
    fn codes_round_trip() {
        for status in [
            OddlyStatus::Ok,
            OddlyStatus::NotAStore,
            OddlyStatus::NonIntegerIndex,
            OddlyStatus::ConfigError,
        ] {
            assert_eq!(OddlyStatus::from_code(status as i32), Some(status));
        }
        assert_eq!(OddlyStatus::from_code(-99), None);
    }

    #[test]
    fn argument_error_to_status() {
        let e = ArgumentError::NotAStore {
            position: 1,
            found: "table".into(),
        };
        assert_eq!(OddlyStatus::from(&e), OddlyStatus::NotAStore);
        let e = ArgumentError::NonIntegerIndex {
            position: 2,
            found: "string".into(),
        };
        assert_eq!(OddlyStatus::from(&e), OddlyStatus::NonIntegerIndex);
        assert_eq!(
            OddlyStatus::from(&ConfigError::EmptyLabel),
            OddlyStatus::ConfigError
        );
    }

    #[test]
    fn messages_name_the_argument() {
        let e = ArgumentError::NonIntegerIndex {
            position: 2,
            found: "number".into(),
        };
        assert_eq!(
            e.to_string(),
            "bad argument #2 (integer expected, got number)"
        );
        let e = e.with_found("float");
        assert_eq!(e.position(), 2);
        assert!(e.to_string().ends_with("got float)"));
    }
}
