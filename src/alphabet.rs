//! The 26-letter alphabet and conversions between letters and indices.
//!
//! All rotor arithmetic works on alphabet indices in `[0, 26)`. Letters are
//! only seen at the edges: the rotor table and the message text.

use crate::error::{EnigmaError, Result};

/// Number of symbols in the alphabet.
pub const ALPHABET_SIZE: usize = 26;

/// The alphabet in index order.
pub const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Returns the index of an uppercase or lowercase ASCII letter.
pub fn to_index(c: char) -> Option<usize> {
    if c.is_ascii_alphabetic() {
        Some((c.to_ascii_uppercase() as u8 - b'A') as usize)
    } else {
        None
    }
}

/// Returns the uppercase letter at `index`, reduced modulo the alphabet size.
pub fn to_letter(index: usize) -> char {
    (b'A' + (index % ALPHABET_SIZE) as u8) as char
}

/// Validates a caller-supplied symbol index.
///
/// # Errors
/// Returns [`EnigmaError::Domain`] unless `0 <= index < 26`.
pub fn checked_index(index: i32) -> Result<usize> {
    if (0..ALPHABET_SIZE as i32).contains(&index) {
        Ok(index as usize)
    } else {
        Err(EnigmaError::Domain(index as i64))
    }
}

/// Converts a string of letters into alphabet indices.
///
/// # Errors
/// Returns [`EnigmaError::InvalidSymbol`] for the first character that is not
/// an ASCII letter.
pub fn letters_to_indices(text: &str) -> Result<Vec<i32>> {
    text.chars()
        .map(|c| to_index(c).map(|i| i as i32).ok_or(EnigmaError::InvalidSymbol(c)))
        .collect()
}

/// Converts alphabet indices back into an uppercase string.
pub fn indices_to_letters(indices: &[i32]) -> String {
    indices.iter().map(|&i| to_letter(i as usize)).collect()
}

/// Adds `offset` to `index` modulo the alphabet size.
pub(crate) fn shift(index: usize, offset: usize) -> usize {
    (index + offset) % ALPHABET_SIZE
}

/// Subtracts `offset` from `index` modulo the alphabet size, never going negative.
pub(crate) fn unshift(index: usize, offset: usize) -> usize {
    (index + ALPHABET_SIZE - offset % ALPHABET_SIZE) % ALPHABET_SIZE
}
