//! Static rotor specification table.
//!
//! Holds the wiring of every component the machine can be assembled from:
//! the thin reflectors B and C, the fixed Greek wheels BETA and GAMMA, and the
//! rotating rotors I through VIII. Entries are built by `const fn`s, so a
//! wiring that is not a permutation (or a reflector that is not an
//! involution) is rejected at compile time rather than at lookup.

use std::fmt;

use crate::alphabet::ALPHABET_SIZE;

/// Maximum number of notches a rotating rotor may carry.
const MAX_NOTCHES: usize = 2;

/// Role a rotor plays in the bank, derived from the shape of its specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotorCategory {
    /// Involutive wheel at the far left; never advances, no separate inverse.
    Reflector,
    /// Non-advancing wheel with an inverse.
    Fixed,
    /// Advancing wheel with an inverse and one or two notches.
    Rotating,
}

impl fmt::Display for RotorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotorCategory::Reflector => write!(f, "reflector"),
            RotorCategory::Fixed => write!(f, "fixed rotor"),
            RotorCategory::Rotating => write!(f, "rotating rotor"),
        }
    }
}

/// Immutable description of one wheel.
#[derive(Debug)]
pub struct RotorSpec {
    name: &'static str,
    category: RotorCategory,
    wiring: [u8; ALPHABET_SIZE],
    inverse: [u8; ALPHABET_SIZE],
    notches: [u8; MAX_NOTCHES],
    notch_count: usize,
}

impl RotorSpec {
    /// Builds a reflector entry. The wiring must be an involution.
    pub const fn reflector(name: &'static str, wiring: &str) -> Self {
        let map = parse_wiring(wiring);
        let mut i = 0;
        while i < ALPHABET_SIZE {
            assert!(
                map[map[i] as usize] as usize == i,
                "reflector wiring must be an involution"
            );
            i += 1;
        }
        RotorSpec {
            name,
            category: RotorCategory::Reflector,
            wiring: map,
            inverse: map,
            notches: [0; MAX_NOTCHES],
            notch_count: 0,
        }
    }

    /// Builds a fixed (non-advancing) rotor entry.
    pub const fn fixed(name: &'static str, wiring: &str) -> Self {
        let map = parse_wiring(wiring);
        RotorSpec {
            name,
            category: RotorCategory::Fixed,
            wiring: map,
            inverse: invert(&map),
            notches: [0; MAX_NOTCHES],
            notch_count: 0,
        }
    }

    /// Builds a rotating rotor entry with one or two notch letters.
    pub const fn rotating(name: &'static str, wiring: &str, notches: &str) -> Self {
        let map = parse_wiring(wiring);
        let letters = notches.as_bytes();
        assert!(
            !letters.is_empty() && letters.len() <= MAX_NOTCHES,
            "rotating rotors carry one or two notches"
        );
        let mut positions = [0u8; MAX_NOTCHES];
        let mut i = 0;
        while i < letters.len() {
            assert!(letters[i].is_ascii_uppercase(), "notch must be an uppercase letter");
            positions[i] = letters[i] - b'A';
            i += 1;
        }
        RotorSpec {
            name,
            category: RotorCategory::Rotating,
            wiring: map,
            inverse: invert(&map),
            notches: positions,
            notch_count: letters.len(),
        }
    }

    /// Finds the table entry whose name matches exactly.
    pub fn lookup(name: &str) -> Option<&'static RotorSpec> {
        ROTOR_SPECS.iter().find(|spec| spec.name == name)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn category(&self) -> RotorCategory {
        self.category
    }

    /// Forward map: position `i` holds the index letter `i` is wired to.
    pub fn wiring(&self) -> &[u8; ALPHABET_SIZE] {
        &self.wiring
    }

    /// Inverse of [`wiring`](Self::wiring). Equal to it for reflectors.
    pub fn inverse(&self) -> &[u8; ALPHABET_SIZE] {
        &self.inverse
    }

    /// Notch positions; empty unless the rotor is rotating.
    pub fn notches(&self) -> &[u8] {
        &self.notches[..self.notch_count]
    }
}

/// Parses a 26-letter wiring string into an index map, checking it is a permutation.
const fn parse_wiring(wiring: &str) -> [u8; ALPHABET_SIZE] {
    let bytes = wiring.as_bytes();
    assert!(bytes.len() == ALPHABET_SIZE, "wiring must list 26 letters");
    let mut map = [0u8; ALPHABET_SIZE];
    let mut seen = [false; ALPHABET_SIZE];
    let mut i = 0;
    while i < ALPHABET_SIZE {
        assert!(bytes[i].is_ascii_uppercase(), "wiring must be uppercase letters");
        let target = bytes[i] - b'A';
        assert!(!seen[target as usize], "wiring must be a permutation");
        seen[target as usize] = true;
        map[i] = target;
        i += 1;
    }
    map
}

const fn invert(map: &[u8; ALPHABET_SIZE]) -> [u8; ALPHABET_SIZE] {
    let mut inverse = [0u8; ALPHABET_SIZE];
    let mut i = 0;
    while i < ALPHABET_SIZE {
        inverse[map[i] as usize] = i as u8;
        i += 1;
    }
    inverse
}

/// Every rotor the machine can be built from.
pub static ROTOR_SPECS: [RotorSpec; 12] = [
    RotorSpec::reflector("B", "ENKQAUYWJICOPBLMDXZVFTHRGS"),
    RotorSpec::reflector("C", "RDOBJNTKVEHMLFCWZAXGYIPSUQ"),
    RotorSpec::fixed("BETA", "LEYJVCNIXWPBQMDRTAKZGFUHOS"),
    RotorSpec::fixed("GAMMA", "FSOKANUERHMBTIYCWLQPZXVGJD"),
    RotorSpec::rotating("I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", "Q"),
    RotorSpec::rotating("II", "AJDKSIRUXBLHWTMCQGZNPYFVOE", "E"),
    RotorSpec::rotating("III", "BDFHJLCPRTXVZNYEIWGAKMUSQO", "V"),
    RotorSpec::rotating("IV", "ESOVPZJAYQUIRHXLNFTGKDCMWB", "J"),
    RotorSpec::rotating("V", "VZBRGITYUPSDNHLXAWMJQOFECK", "Z"),
    RotorSpec::rotating("VI", "JPGVOUMFYQBENHZRDKASXLICTW", "ZM"),
    RotorSpec::rotating("VII", "NZJHGRCXMYSWBOUFAIVLPEKQDT", "ZM"),
    RotorSpec::rotating("VIII", "FKQHTLXOCBJSPDZRAMEWNIUYGV", "ZM"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = ROTOR_SPECS.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), ROTOR_SPECS.len());
    }

    #[test]
    fn test_lookup_exact_match_only() {
        assert_eq!(RotorSpec::lookup("III").map(|s| s.name()), Some("III"));
        assert!(RotorSpec::lookup("iii").is_none());
        assert!(RotorSpec::lookup("IX").is_none());
        assert!(RotorSpec::lookup("").is_none());
    }

    #[test]
    fn test_inverse_undoes_wiring() {
        for spec in ROTOR_SPECS.iter() {
            for i in 0..ALPHABET_SIZE {
                let out = spec.wiring()[i] as usize;
                assert_eq!(spec.inverse()[out] as usize, i, "rotor {}", spec.name());
            }
        }
    }

    #[test]
    fn test_categories_follow_shape() {
        let count = |cat| ROTOR_SPECS.iter().filter(|s| s.category() == cat).count();
        assert_eq!(count(RotorCategory::Reflector), 2);
        assert_eq!(count(RotorCategory::Fixed), 2);
        assert_eq!(count(RotorCategory::Rotating), 8);
        for spec in ROTOR_SPECS.iter() {
            let has_notches = !spec.notches().is_empty();
            assert_eq!(has_notches, spec.category() == RotorCategory::Rotating);
        }
    }

    #[test]
    fn test_notch_positions() {
        let notches = |name| RotorSpec::lookup(name).unwrap().notches().to_vec();
        assert_eq!(notches("I"), vec![16]);
        assert_eq!(notches("III"), vec![21]);
        assert_eq!(notches("VIII"), vec![25, 12]);
        assert!(notches("BETA").is_empty());
    }

    #[test]
    fn test_reflector_inverse_is_wiring() {
        let b = RotorSpec::lookup("B").unwrap();
        assert_eq!(b.wiring(), b.inverse());
        assert_eq!(b.wiring()[0], 4);
    }
}
