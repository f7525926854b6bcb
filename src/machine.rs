//! Machine: a bank of typed rotor slots driven one symbol at a time.
//!
//! The bank is ordered left to right with the reflector in slot 0. For each
//! symbol the machine first steps its rotating rotors, then passes the signal
//! right to left through every slot (ending with the reflection) and back
//! left to right through every slot except the reflector.

use tracing::{debug, trace};

use crate::alphabet::{self, ALPHABET_SIZE};
use crate::error::{EnigmaError, Result};
use crate::rotor::Rotor;
use crate::rotor_specs::RotorCategory;

/// Slot layout of the four-rotor naval machine:
/// reflector, fixed Greek wheel, three rotating rotors.
pub const M4_LAYOUT: [RotorCategory; 5] = [
    RotorCategory::Reflector,
    RotorCategory::Fixed,
    RotorCategory::Rotating,
    RotorCategory::Rotating,
    RotorCategory::Rotating,
];

/// A configured rotor machine.
///
/// # Examples
///
/// ```
/// use enigma::Machine;
///
/// let mut encoder = Machine::new("B", "BETA", ["III", "IV", "I"], "AXLE").unwrap();
/// let ciphertext = encoder.convert_letters("FROMHISSHOULDER").unwrap();
///
/// let mut decoder = Machine::new("B", "BETA", ["III", "IV", "I"], "AXLE").unwrap();
/// assert_eq!(decoder.convert_letters(&ciphertext).unwrap(), "FROMHISSHOULDER");
/// ```
#[derive(Debug, Clone)]
pub struct Machine {
    rotors: Vec<Rotor>,
    /// Bank indices of the rotating slots, left to right.
    rotating: Vec<usize>,
    initial_settings: Option<String>,
}

impl Machine {
    /// Builds the standard four-rotor machine and applies `settings`.
    ///
    /// # Parameters
    /// - `reflector`: Name of the reflector (slot 0).
    /// - `fixed`: Name of the fixed rotor (slot 1).
    /// - `rotating`: Names of the three rotating rotors, left to right.
    /// - `settings`: Four letters setting slots 1 through 4.
    ///
    /// # Errors
    /// - [`EnigmaError::UnknownRotorName`] if a name is not in the table.
    /// - [`EnigmaError::InvalidRotorArrangement`] if a rotor sits in a slot of
    ///   the wrong category.
    /// - [`EnigmaError::InvalidSetting`] if `settings` is malformed.
    pub fn new(reflector: &str, fixed: &str, rotating: [&str; 3], settings: &str) -> Result<Self> {
        let names = [reflector, fixed, rotating[0], rotating[1], rotating[2]];
        let mut machine = Self::with_layout(&M4_LAYOUT, &names)?;
        machine.apply_initial_settings(settings)?;
        Ok(machine)
    }

    /// Builds a machine for an arbitrary slot layout with every setting at 0.
    ///
    /// The layout must start with the only reflector and contain at least one
    /// rotating slot.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorCountMismatch`] if `names` and `layout` differ in length.
    /// - [`EnigmaError::InvalidRotorArrangement`] if the layout itself is unusable
    ///   or a rotor's category does not match its slot.
    /// - [`EnigmaError::UnknownRotorName`] if a name is not in the table.
    pub fn with_layout(layout: &[RotorCategory], names: &[&str]) -> Result<Self> {
        validate_layout(layout)?;
        if names.len() != layout.len() {
            return Err(EnigmaError::RotorCountMismatch {
                expected: layout.len(),
                actual: names.len(),
            });
        }

        let mut rotors = Vec::with_capacity(layout.len());
        for (slot, (&name, &required)) in names.iter().zip(layout).enumerate() {
            let rotor = Rotor::new(name)?;
            if rotor.category() != required {
                return Err(EnigmaError::misplaced(slot, name, required, rotor.category()));
            }
            rotors.push(rotor);
        }

        let rotating = layout
            .iter()
            .enumerate()
            .filter(|(_, category)| **category == RotorCategory::Rotating)
            .map(|(slot, _)| slot)
            .collect();

        debug!(rotors = ?names, "machine assembled");
        Ok(Machine {
            rotors,
            rotating,
            initial_settings: None,
        })
    }

    /// Sets slots 1 through N-1 from a string of N-1 letters.
    ///
    /// Letter `i` sets slot `i + 1`; the reflector keeps its setting. Letters
    /// are case-insensitive.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSetting`] if the length is wrong or a
    /// character is not a letter. No setting changes in that case.
    pub fn apply_initial_settings(&mut self, settings: &str) -> Result<()> {
        let expected = self.rotors.len() - 1;
        let positions = settings
            .chars()
            .map(|c| {
                alphabet::to_index(c).ok_or_else(|| {
                    EnigmaError::InvalidSetting(format!("{:?} is not a letter", c))
                })
            })
            .collect::<Result<Vec<usize>>>()?;
        if positions.len() != expected {
            return Err(EnigmaError::InvalidSetting(format!(
                "setting string {:?} has {} letters, expected {}",
                settings,
                positions.len(),
                expected
            )));
        }

        for (rotor, pos) in self.rotors[1..].iter_mut().zip(positions) {
            rotor.set_setting(pos)?;
        }
        self.initial_settings = Some(settings.to_string());
        debug!(settings = %settings, "initial settings applied");
        Ok(())
    }

    /// Restores the settings last given to
    /// [`apply_initial_settings`](Self::apply_initial_settings), or all zeros.
    pub fn reset(&mut self) {
        match self.initial_settings.clone() {
            Some(settings) => {
                // Already validated when it was first applied.
                let _ = self.apply_initial_settings(&settings);
            }
            None => {
                for rotor in self.rotors.iter_mut() {
                    let _ = rotor.set_setting(0);
                }
            }
        }
    }

    /// Number of slots in the bank.
    pub fn len(&self) -> usize {
        self.rotors.len()
    }

    /// Always false: a machine holds at least a reflector and one rotating rotor.
    pub fn is_empty(&self) -> bool {
        self.rotors.is_empty()
    }

    /// The bank, left to right.
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    /// Current setting of every slot, left to right.
    pub fn settings(&self) -> Vec<usize> {
        self.rotors.iter().map(Rotor::setting).collect()
    }

    /// Advances the rotating rotors for one keystroke.
    ///
    /// The rightmost rotating rotor always advances. Between each pair of
    /// adjacent rotating rotors sits a pawl: when the right one is at its
    /// notch, both advance. Notch states are read before anything moves and
    /// each rotor advances at most once. A middle rotor carried onto its own
    /// notch therefore moves again on the very next keystroke (the double step).
    pub fn step_rotors(&mut self) {
        let mut advancing = vec![false; self.rotors.len()];
        if let Some(&rightmost) = self.rotating.last() {
            advancing[rightmost] = true;
        }
        for pair in self.rotating.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            if self.rotors[right].at_notch() {
                advancing[left] = true;
                advancing[right] = true;
            }
        }

        for (slot, rotor) in self.rotors.iter_mut().enumerate() {
            if advancing[slot] {
                rotor.advance();
            }
        }
        if advancing.iter().filter(|&&a| a).count() > 1 {
            trace!(settings = ?self.settings(), "carry step");
        }
    }

    /// Steps the rotors and enciphers one symbol index.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Domain`] if `index` is outside `[0, 26)`; the
    /// rotors do not move in that case.
    pub fn translate(&mut self, index: i32) -> Result<i32> {
        let p = alphabet::checked_index(index)?;
        Ok(self.translate_unchecked(p) as i32)
    }

    fn translate_unchecked(&mut self, p: usize) -> usize {
        self.step_rotors();
        let reflected = self
            .rotors
            .iter()
            .rev()
            .fold(p, |signal, rotor| rotor.convert_forward(signal));
        let out = self.rotors[1..]
            .iter()
            .fold(reflected, |signal, rotor| rotor.convert_backward(signal));
        debug_assert!(out < ALPHABET_SIZE);
        out
    }

    /// Enciphers a sequence of symbol indices, carrying rotor state across calls.
    ///
    /// The whole input is validated before any rotor moves.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Domain`] for the first out-of-range index.
    pub fn convert(&mut self, indices: &[i32]) -> Result<Vec<i32>> {
        let checked = indices
            .iter()
            .map(|&i| alphabet::checked_index(i))
            .collect::<Result<Vec<usize>>>()?;
        Ok(checked
            .into_iter()
            .map(|p| self.translate_unchecked(p) as i32)
            .collect())
    }

    /// Enciphers a string of letters, returning uppercase letters.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] for the first non-letter; the
    /// rotors do not move in that case.
    pub fn convert_letters(&mut self, text: &str) -> Result<String> {
        let indices = alphabet::letters_to_indices(text)?;
        let converted = self.convert(&indices)?;
        Ok(alphabet::indices_to_letters(&converted))
    }
}

fn validate_layout(layout: &[RotorCategory]) -> Result<()> {
    match layout.first() {
        Some(RotorCategory::Reflector) => {}
        _ => {
            return Err(EnigmaError::InvalidRotorArrangement {
                slot: 0,
                reason: "layout must start with a reflector".to_string(),
            })
        }
    }
    if let Some(slot) = layout[1..]
        .iter()
        .position(|&c| c == RotorCategory::Reflector)
    {
        return Err(EnigmaError::InvalidRotorArrangement {
            slot: slot + 1,
            reason: "only slot 0 may hold a reflector".to_string(),
        });
    }
    if !layout.contains(&RotorCategory::Rotating) {
        return Err(EnigmaError::InvalidRotorArrangement {
            slot: layout.len() - 1,
            reason: "layout needs at least one rotating slot".to_string(),
        });
    }
    Ok(())
}
