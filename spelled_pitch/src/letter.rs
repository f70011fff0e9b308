//! A type-safe representation of the seven letter names of Western notation.

use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// The letter names, in the order they would appear on the line of fifths (i.e. each letter is a
/// perfect fifth above the one before it).
const FIFTHS_ORDER: [LetterName; 7] = [
    LetterName::F,
    LetterName::C,
    LetterName::G,
    LetterName::D,
    LetterName::A,
    LetterName::E,
    LetterName::B,
];

/// One of the seven letter names `C`, `D`, `E`, `F`, `G`, `A` or `B`.  Letters are ordered by
/// their position in an ascending C major scale.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[repr(u8)]
pub enum LetterName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl LetterName {
    /// Every `LetterName`, in scale order starting from `C`.
    pub const ALL: [LetterName; 7] = [
        LetterName::C,
        LetterName::D,
        LetterName::E,
        LetterName::F,
        LetterName::G,
        LetterName::A,
        LetterName::B,
    ];

    /// The number of scale steps from `C` up to this letter.
    ///
    /// # Example
    /// ```
    /// use spelled_pitch::LetterName;
    ///
    /// assert_eq!(LetterName::C.steps(), 0);
    /// assert_eq!(LetterName::F.steps(), 3);
    /// assert_eq!(LetterName::B.steps(), 6);
    /// ```
    #[inline]
    pub fn steps(self) -> u8 {
        self as u8
    }

    /// The pitch class (`0..12`, with `C = 0`) of this letter without any accidental.
    pub fn natural_pitch_class(self) -> u8 {
        match self {
            LetterName::C => 0,
            LetterName::D => 2,
            LetterName::E => 4,
            LetterName::F => 5,
            LetterName::G => 7,
            LetterName::A => 9,
            LetterName::B => 11,
        }
    }

    /// The position of this (natural) letter on the line of fifths, measured from `C`.  The
    /// naturals occupy `-1` (`F`) to `5` (`B`).
    ///
    /// # Example
    /// ```
    /// use spelled_pitch::LetterName;
    ///
    /// assert_eq!(LetterName::F.fifths(), -1);
    /// assert_eq!(LetterName::C.fifths(), 0);
    /// assert_eq!(LetterName::D.fifths(), 2);
    /// assert_eq!(LetterName::B.fifths(), 5);
    /// ```
    pub fn fifths(self) -> i32 {
        match self {
            LetterName::F => -1,
            LetterName::C => 0,
            LetterName::G => 1,
            LetterName::D => 2,
            LetterName::A => 3,
            LetterName::E => 4,
            LetterName::B => 5,
        }
    }

    /// Returns the natural letter at a given position on the line of fifths, along with how many
    /// times it has to be sharpened (or flattened, if negative) to reach that position.
    pub(crate) fn from_fifths(fifths: i32) -> (LetterName, i32) {
        // Shift so that `F` is at position 0.  Widened so that `i32::MAX` can't overflow; the
        // quotient always fits back in an `i32`.
        let shifted = fifths as i64 + 1;
        let letter = FIFTHS_ORDER[shifted.rem_euclid(7) as usize];
        (letter, shifted.div_euclid(7) as i32)
    }

    /// Parses an upper-case letter name, returning `None` for anything else.
    pub fn from_char(c: char) -> Option<LetterName> {
        Some(match c {
            'C' => LetterName::C,
            'D' => LetterName::D,
            'E' => LetterName::E,
            'F' => LetterName::F,
            'G' => LetterName::G,
            'A' => LetterName::A,
            'B' => LetterName::B,
            _ => return None,
        })
    }

    pub fn to_char(self) -> char {
        match self {
            LetterName::C => 'C',
            LetterName::D => 'D',
            LetterName::E => 'E',
            LetterName::F => 'F',
            LetterName::G => 'G',
            LetterName::A => 'A',
            LetterName::B => 'B',
        }
    }
}

impl Display for LetterName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
