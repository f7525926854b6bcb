//! Rotor cipher machine engine modelled on the four-rotor naval Enigma.
//!
//! A machine is a bank of wheels: a reflector, a fixed Greek wheel, and three
//! rotating rotors. Every keystroke steps the rotating rotors and then sends
//! the signal through the bank and back. Because the reflector is an
//! involution, the same configuration both enciphers and deciphers.
//!
//! # Architecture
//!
//! ```text
//! RotorSpec  (static, compile-time checked wiring table)
//!     ↓ looked up by name
//! Rotor      (spec + mutable setting — shift, map, unshift)
//!     ↓ N typed slots, reflector first
//! Machine    (stepping with double-step + forward/backward pipeline)
//!     ↓ driven by
//! Session    (configuration lines, message lines, five-letter blocks)
//! ```
//!
//! # Examples
//!
//! ```
//! use enigma::Machine;
//!
//! let mut encoder = Machine::new("B", "BETA", ["I", "II", "III"], "AAAA").unwrap();
//! assert_eq!(encoder.convert_letters("HELLOWORLD").unwrap(), "ILBDAAMTAZ");
//!
//! let mut decoder = Machine::new("B", "BETA", ["I", "II", "III"], "AAAA").unwrap();
//! assert_eq!(decoder.convert_letters("ILBDAAMTAZ").unwrap(), "HELLOWORLD");
//! ```
//!
//! Working on alphabet indices directly:
//!
//! ```
//! use enigma::{EnigmaError, Machine};
//!
//! let mut machine = Machine::new("C", "GAMMA", ["VI", "VII", "VIII"], "AZZM").unwrap();
//! assert_eq!(machine.convert(&[0]).unwrap(), vec![14]);
//! assert_eq!(machine.translate(26), Err(EnigmaError::Domain(26)));
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod error;
pub mod machine;
pub mod rotor;
pub mod rotor_specs;
pub mod session;

pub use error::{EnigmaError, SessionError};
pub use machine::{Machine, M4_LAYOUT};
pub use rotor::Rotor;
pub use rotor_specs::{RotorCategory, RotorSpec, ROTOR_SPECS};
pub use session::{Configuration, Session};
