//! Accidentals, represented as a signed number of sharps.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// An accidental which raises or lowers a [`LetterName`](crate::LetterName) by some whole number
/// of semitones.  A `Modifier` is stored as the number of sharps it applies, so flats are
/// negative.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[repr(transparent)]
pub struct Modifier(i32);

impl Modifier {
    pub const NATURAL: Modifier = Modifier(0);
    pub const SHARP: Modifier = Modifier(1);
    pub const FLAT: Modifier = Modifier(-1);
    pub const DOUBLE_SHARP: Modifier = Modifier(2);
    pub const DOUBLE_FLAT: Modifier = Modifier(-2);

    /// Creates a `Modifier` which applies `sharps` sharps (or `-sharps` flats if negative).
    #[inline]
    pub const fn from_sharps(sharps: i32) -> Self {
        Self(sharps)
    }

    /// The number of semitones this `Modifier` adds to its letter.
    #[inline]
    pub fn adjustment(self) -> i32 {
        self.0
    }

    #[inline]
    pub fn is_natural(self) -> bool {
        self.0 == 0
    }
}

impl Display for Modifier {
    /// Naturals are displayed as an empty string, since that's how they're written in note names.
    ///
    /// ```
    /// use spelled_pitch::Modifier;
    ///
    /// assert_eq!(Modifier::NATURAL.to_string(), "");
    /// assert_eq!(Modifier::SHARP.to_string(), "♯");
    /// assert_eq!(Modifier::DOUBLE_FLAT.to_string(), "𝄫");
    /// assert_eq!(Modifier::from_sharps(3).to_string(), "♯♯♯");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => Ok(()),
            1 => write!(f, "♯"),
            -1 => write!(f, "♭"),
            2 => write!(f, "𝄪"),
            -2 => write!(f, "𝄫"),
            n => {
                let symbol = if n > 0 { "♯" } else { "♭" };
                let count = n.unsigned_abs() as usize;
                write!(f, "{}", itertools::repeat_n(symbol, count).join(""))
            }
        }
    }
}
