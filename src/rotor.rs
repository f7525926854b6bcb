//! Rotor: one wheel of the machine.
//!
//! A rotor pairs an immutable [`RotorSpec`] from the static table with a
//! mutable rotational setting. Conversions model the wiring turned relative
//! to the stationary housing: the entry contact is shifted by the setting,
//! the wiring is applied, and the exit contact is shifted back.

use crate::alphabet::{self, ALPHABET_SIZE};
use crate::error::{EnigmaError, Result};
use crate::rotor_specs::{RotorCategory, RotorSpec};

/// A wheel instance with its current setting.
///
/// Rotors are small values: cloning one copies the spec reference and the
/// setting, so two machines never share a rotor's state.
#[derive(Debug, Clone)]
pub struct Rotor {
    spec: &'static RotorSpec,
    setting: usize,
}

impl Rotor {
    /// Looks up `name` in the rotor table and creates a rotor at setting 0.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownRotorName`] if no table entry matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Rotor;
    ///
    /// let rotor = Rotor::new("III").unwrap();
    /// assert!(rotor.advances());
    /// assert!(Rotor::new("IX").is_err());
    /// ```
    pub fn new(name: &str) -> Result<Self> {
        let spec = RotorSpec::lookup(name)
            .ok_or_else(|| EnigmaError::UnknownRotorName(name.to_string()))?;
        Ok(Rotor { spec, setting: 0 })
    }

    pub fn name(&self) -> &'static str {
        self.spec.name()
    }

    pub fn spec(&self) -> &'static RotorSpec {
        self.spec
    }

    pub fn category(&self) -> RotorCategory {
        self.spec.category()
    }

    /// True iff the rotor has a ratchet and can advance.
    pub fn advances(&self) -> bool {
        self.category() == RotorCategory::Rotating
    }

    /// True iff the rotor has a distinct right-to-left inverse.
    pub fn has_inverse(&self) -> bool {
        self.category() != RotorCategory::Reflector
    }

    /// Current rotational setting in `[0, 26)`.
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Sets the rotational setting.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSetting`] if `pos >= 26`; the setting is
    /// left unchanged.
    pub fn set_setting(&mut self, pos: usize) -> Result<()> {
        if pos >= ALPHABET_SIZE {
            return Err(EnigmaError::InvalidSetting(format!(
                "rotor {} setting {} is outside [0, {})",
                self.name(),
                pos,
                ALPHABET_SIZE
            )));
        }
        self.setting = pos;
        Ok(())
    }

    /// Advances the rotor one position. Does nothing on rotors that cannot advance.
    pub fn advance(&mut self) {
        if self.advances() {
            self.setting = alphabet::shift(self.setting, 1);
        }
    }

    /// True iff the rotor advances and currently sits on one of its notches.
    pub fn at_notch(&self) -> bool {
        self.advances()
            && self
                .spec
                .notches()
                .iter()
                .any(|&notch| notch as usize == self.setting)
    }

    /// Maps `p` through the wiring, right to left.
    pub fn convert_forward(&self, p: usize) -> usize {
        self.through(self.spec.wiring(), p)
    }

    /// Maps `p` through the inverse wiring, left to right.
    pub fn convert_backward(&self, p: usize) -> usize {
        self.through(self.spec.inverse(), p)
    }

    fn through(&self, map: &[u8; ALPHABET_SIZE], p: usize) -> usize {
        debug_assert!(p < ALPHABET_SIZE, "contact {} out of range", p);
        let enter = alphabet::shift(p, self.setting);
        alphabet::unshift(map[enter] as usize, self.setting)
    }
}
