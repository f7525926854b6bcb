//! Session: drives a machine from configuration and message lines.
//!
//! Input is line oriented. A line starting with `*` configures a fresh
//! machine:
//!
//! ```text
//! * B BETA III IV I AXLE
//! ```
//!
//! Every other line is a message: whitespace is dropped, letters are
//! upper-cased, and the converted text is written in blocks of five.

use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::debug;

use crate::error::SessionError;
use crate::machine::Machine;

/// Letters per output block.
pub const BLOCK_WIDTH: usize = 5;

/// Number of fields after the `*` of a configuration line.
const CONFIG_FIELDS: usize = 6;

/// Length of the position string.
const POSITION_LEN: usize = 4;

/// A parsed configuration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub reflector: String,
    pub fixed: String,
    pub rotating: [String; 3],
    pub positions: String,
}

impl Configuration {
    /// Returns true iff `line` is a configuration line rather than a message.
    pub fn is_configuration_line(line: &str) -> bool {
        line.starts_with('*')
    }

    /// Builds the machine this configuration describes.
    pub fn build(&self) -> Result<Machine, SessionError> {
        let rotating = [
            self.rotating[0].as_str(),
            self.rotating[1].as_str(),
            self.rotating[2].as_str(),
        ];
        Ok(Machine::new(
            &self.reflector,
            &self.fixed,
            rotating,
            &self.positions,
        )?)
    }
}

impl FromStr for Configuration {
    type Err = SessionError;

    /// Parses `* REFLECTOR FIXED R1 R2 R3 POSITIONS`.
    ///
    /// Checks the field count, the position string, and repeated names.
    /// Rotor names and categories are checked when the machine is built.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let body = line.strip_prefix('*').unwrap_or(line);
        let fields: Vec<&str> = body.split_whitespace().collect();
        if fields.len() != CONFIG_FIELDS {
            return Err(SessionError::WrongFieldCount(fields.len()));
        }

        let positions = fields[CONFIG_FIELDS - 1];
        let position_len = positions.chars().count();
        if position_len != POSITION_LEN {
            return Err(SessionError::PositionLength(position_len));
        }
        if let Some(bad) = positions.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(SessionError::PositionCharacter(bad));
        }

        let mut seen = HashSet::with_capacity(CONFIG_FIELDS);
        for &field in &fields {
            if !seen.insert(field) {
                return Err(SessionError::DuplicateRotor(field.to_string()));
            }
        }

        Ok(Configuration {
            reflector: fields[0].to_string(),
            fixed: fields[1].to_string(),
            rotating: [
                fields[2].to_string(),
                fields[3].to_string(),
                fields[4].to_string(),
            ],
            positions: positions.to_ascii_uppercase(),
        })
    }
}

/// Strips whitespace from a message line and upper-cases its letters.
///
/// # Errors
/// Returns [`SessionError::InvalidCharacter`] for the first character that is
/// neither a letter nor whitespace.
pub fn standardize(line: &str) -> Result<String, SessionError> {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        if c.is_ascii_alphabetic() {
            out.push(c.to_ascii_uppercase());
        } else if !c.is_whitespace() {
            return Err(SessionError::InvalidCharacter(c));
        }
    }
    Ok(out)
}

/// Splits `msg` into blocks of [`BLOCK_WIDTH`] letters joined by single spaces.
pub fn group_blocks(msg: &str) -> String {
    let mut out = String::with_capacity(msg.len() + msg.len() / BLOCK_WIDTH);
    for (i, c) in msg.chars().enumerate() {
        if i > 0 && i % BLOCK_WIDTH == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Line-by-line driver holding the current machine, if any.
#[derive(Debug, Default)]
pub struct Session {
    machine: Option<Machine>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The machine built by the last configuration line.
    pub fn machine(&self) -> Option<&Machine> {
        self.machine.as_ref()
    }

    /// Handles one input line.
    ///
    /// Returns `None` for configuration lines and the formatted output for
    /// message lines.
    ///
    /// # Errors
    /// - Configuration problems from [`Configuration::from_str`] or the machine.
    /// - [`SessionError::MissingConfiguration`] for a message before any configuration.
    /// - [`SessionError::InvalidCharacter`] for a malformed message.
    pub fn process_line(&mut self, line: &str) -> Result<Option<String>, SessionError> {
        if Configuration::is_configuration_line(line) {
            let config: Configuration = line.parse()?;
            let machine = config.build()?;
            debug!(?config, "machine replaced");
            self.machine = Some(machine);
            return Ok(None);
        }

        let machine = self
            .machine
            .as_mut()
            .ok_or(SessionError::MissingConfiguration)?;
        let letters = standardize(line)?;
        let converted = machine.convert_letters(&letters)?;
        Ok(Some(group_blocks(&converted)))
    }

    /// Processes every line of `input`, writing each message result to `output`.
    ///
    /// Output produced before an error is kept; processing stops at the first error.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<(), SessionError> {
        for line in input.lines() {
            let line = line?;
            if let Some(result) = self.process_line(&line)? {
                writeln!(output, "{}", result)?;
            }
        }
        output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnigmaError;

    #[test]
    fn test_parse_configuration() {
        let config: Configuration = "* B BETA III IV I axle".parse().unwrap();
        assert_eq!(config.reflector, "B");
        assert_eq!(config.fixed, "BETA");
        assert_eq!(config.rotating, ["III".to_string(), "IV".to_string(), "I".to_string()]);
        assert_eq!(config.positions, "AXLE");
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        let config: Configuration = "*B\tBETA   III IV I AXLE  ".parse().unwrap();
        assert_eq!(config.reflector, "B");
        assert_eq!(config.positions, "AXLE");
    }

    #[test]
    fn test_wrong_field_count() {
        let err = "* B BETA III IV AXLE".parse::<Configuration>().unwrap_err();
        assert!(matches!(err, SessionError::WrongFieldCount(5)));
    }

    #[test]
    fn test_position_length() {
        let err = "* B BETA III IV I AXL".parse::<Configuration>().unwrap_err();
        assert!(matches!(err, SessionError::PositionLength(3)));
    }

    #[test]
    fn test_position_character() {
        let err = "* B BETA III IV I AX1E".parse::<Configuration>().unwrap_err();
        assert!(matches!(err, SessionError::PositionCharacter('1')));
    }

    #[test]
    fn test_duplicate_rotor() {
        let err = "* B BETA III IV III AXLE".parse::<Configuration>().unwrap_err();
        assert!(matches!(err, SessionError::DuplicateRotor(ref name) if name == "III"));
    }

    #[test]
    fn test_standardize() {
        assert_eq!(standardize("From his\tShoulder ").unwrap(), "FROMHISSHOULDER");
        assert!(matches!(
            standardize("Hi, there"),
            Err(SessionError::InvalidCharacter(','))
        ));
    }

    #[test]
    fn test_group_blocks() {
        assert_eq!(group_blocks(""), "");
        assert_eq!(group_blocks("ABC"), "ABC");
        assert_eq!(group_blocks("ABCDE"), "ABCDE");
        assert_eq!(group_blocks("ABCDEFGHIJK"), "ABCDE FGHIJ K");
    }

    #[test]
    fn test_message_before_configuration() {
        let mut session = Session::new();
        assert!(matches!(
            session.process_line("HELLO"),
            Err(SessionError::MissingConfiguration)
        ));
    }

    #[test]
    fn test_configuration_produces_no_output() {
        let mut session = Session::new();
        assert!(session.process_line("* B BETA I II III AAAA").unwrap().is_none());
        assert!(session.machine().is_some());
    }

    #[test]
    fn test_unknown_rotor_surfaces_machine_error() {
        let mut session = Session::new();
        let err = session.process_line("* B BETA I II X AAAA").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Machine(EnigmaError::UnknownRotorName(ref name)) if name == "X"
        ));
    }

    #[test]
    fn test_misplaced_rotor_surfaces_machine_error() {
        let mut session = Session::new();
        let err = session.process_line("* BETA B I II III AAAA").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Machine(EnigmaError::InvalidRotorArrangement { .. })
        ));
    }

    #[test]
    fn test_message_line_output() {
        let mut session = Session::new();
        session.process_line("* B BETA I II III AAAA").unwrap();
        assert_eq!(
            session.process_line("hello world").unwrap().as_deref(),
            Some("ILBDA AMTAZ")
        );
    }

    #[test]
    fn test_new_configuration_replaces_machine() {
        let mut session = Session::new();
        session.process_line("* B BETA I II III AAAA").unwrap();
        session.process_line("AAAA").unwrap();
        session.process_line("* B BETA I II III AAAA").unwrap();
        assert_eq!(session.machine().unwrap().settings(), vec![0; 5]);
    }

    #[test]
    fn test_run_writes_each_message() {
        let input = "* B BETA I II III AAAA\nHELLO WORLD\n\n* B BETA I II III AAAA\nILBDA AMTAZ\n";
        let mut out = Vec::new();
        Session::new().run(input.as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ILBDA AMTAZ\n\nHELLO WORLD\n");
    }

    #[test]
    fn test_run_stops_at_first_error() {
        let input = "* B BETA I II III AAAA\nHELLO\nBAD 1\nWORLD\n";
        let mut out = Vec::new();
        let err = Session::new().run(input.as_bytes(), &mut out).unwrap_err();
        assert!(matches!(err, SessionError::InvalidCharacter('1')));
        assert_eq!(out.len(), "ILBDA\n".len());
    }
}
