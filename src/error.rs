//! Error types for the Enigma library.
//!
//! The core engine reports configuration and domain failures through
//! [`EnigmaError`]. The line-oriented driver in [`crate::session`] wraps those
//! in [`SessionError`] together with its own input-validation failures.

use thiserror::Error;

use crate::rotor_specs::RotorCategory;

/// Errors produced by the rotor and machine core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// No entry of the rotor table carries the requested name.
    #[error("unknown rotor name: {0:?}")]
    UnknownRotorName(String),

    /// A rotor (or a layout slot) does not fit the category required at its position.
    #[error("improper rotor arrangement at slot {slot}: {reason}")]
    InvalidRotorArrangement { slot: usize, reason: String },

    /// The number of rotor names does not match the number of layout slots.
    #[error("expected {expected} rotors, got {actual}")]
    RotorCountMismatch { expected: usize, actual: usize },

    /// A setting index or setting string is out of domain.
    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    /// A symbol index outside `[0, 26)` was passed for conversion.
    #[error("symbol index {0} is outside the alphabet range [0, 26)")]
    Domain(i64),

    /// A character that is not an alphabet letter was passed for conversion.
    #[error("character {0:?} is not an alphabet letter")]
    InvalidSymbol(char),
}

impl EnigmaError {
    pub(crate) fn misplaced(slot: usize, name: &str, expected: RotorCategory, found: RotorCategory) -> Self {
        EnigmaError::InvalidRotorArrangement {
            slot,
            reason: format!("rotor {name} is a {found}, slot requires a {expected}"),
        }
    }
}

/// Errors produced while driving a machine from configuration and message lines.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A message line arrived before any configuration line.
    #[error("input must start with a configuration line")]
    MissingConfiguration,

    /// A configuration line does not carry exactly six fields.
    #[error("configuration line has {0} fields, expected 6")]
    WrongFieldCount(usize),

    /// The position string does not have exactly four characters.
    #[error("position string has {0} characters, expected 4")]
    PositionLength(usize),

    /// The position string contains a non-letter.
    #[error("position string contains invalid character {0:?}")]
    PositionCharacter(char),

    /// A rotor name appears more than once in a configuration line.
    #[error("rotor {0} is repeated in the configuration line")]
    DuplicateRotor(String),

    /// A message line contains a character that is neither a letter nor whitespace.
    #[error("message line contains invalid character {0:?}")]
    InvalidCharacter(char),

    /// The machine rejected the configuration or the message.
    #[error(transparent)]
    Machine(#[from] EnigmaError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for core results.
pub type Result<T> = std::result::Result<T, EnigmaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unknown_rotor() {
        let err = EnigmaError::UnknownRotorName("IX".to_string());
        assert_eq!(format!("{}", err), "unknown rotor name: \"IX\"");
    }

    #[test]
    fn test_display_domain() {
        let err = EnigmaError::Domain(26);
        assert_eq!(
            format!("{}", err),
            "symbol index 26 is outside the alphabet range [0, 26)"
        );
    }

    #[test]
    fn test_display_misplaced() {
        let err = EnigmaError::misplaced(0, "BETA", RotorCategory::Reflector, RotorCategory::Fixed);
        assert_eq!(
            format!("{}", err),
            "improper rotor arrangement at slot 0: rotor BETA is a fixed rotor, slot requires a reflector"
        );
    }

    #[test]
    fn test_session_wraps_machine_error() {
        let err: SessionError = EnigmaError::Domain(-1).into();
        assert!(matches!(err, SessionError::Machine(EnigmaError::Domain(-1))));
        assert_eq!(
            format!("{}", err),
            "symbol index -1 is outside the alphabet range [0, 26)"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(EnigmaError::Domain(3), EnigmaError::Domain(3));
        assert_ne!(
            EnigmaError::Domain(3),
            EnigmaError::InvalidSymbol('3')
        );
    }
}
