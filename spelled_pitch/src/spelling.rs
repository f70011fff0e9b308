//! The spelling of a pitch class: a [`LetterName`] plus a [`Modifier`].

use std::{
    error::Error,
    fmt::{Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::{LetterName, Modifier};

/// The spelling of a pitch class, e.g. `C♯` or `D♭`.  Two `Spelling`s can denote the same pitch
/// class (they are then 'enharmonic'), which is exactly the ambiguity the pitch speller resolves.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Spelling {
    letter: LetterName,
    modifier: Modifier,
}

impl Spelling {
    pub const C: Spelling = Spelling::natural(LetterName::C);
    pub const D: Spelling = Spelling::natural(LetterName::D);
    pub const E: Spelling = Spelling::natural(LetterName::E);
    pub const F: Spelling = Spelling::natural(LetterName::F);
    pub const G: Spelling = Spelling::natural(LetterName::G);
    pub const A: Spelling = Spelling::natural(LetterName::A);
    pub const B: Spelling = Spelling::natural(LetterName::B);

    pub const fn new(letter: LetterName, modifier: Modifier) -> Self {
        Self { letter, modifier }
    }

    pub const fn natural(letter: LetterName) -> Self {
        Self::new(letter, Modifier::NATURAL)
    }

    /// Creates the `Spelling` at a given position on the line of fifths, where `C` is `0`, `G` is
    /// `1`, `F` is `-1`, and so on.
    ///
    /// # Example
    /// ```
    /// use spelled_pitch::{LetterName, Modifier, Spelling};
    ///
    /// assert_eq!(Spelling::from_fifths(2), Spelling::D);
    /// assert_eq!(Spelling::from_fifths(7), Spelling::new(LetterName::C, Modifier::SHARP));
    /// assert_eq!(Spelling::from_fifths(-3), Spelling::new(LetterName::E, Modifier::FLAT));
    /// ```
    pub fn from_fifths(fifths: i32) -> Self {
        let (letter, sharps) = LetterName::from_fifths(fifths);
        Self::new(letter, Modifier::from_sharps(sharps))
    }

    /// The position of this `Spelling` on the line of fifths.  This is the inverse of
    /// [`Spelling::from_fifths`].  Positions can exceed the range of an `i32`, e.g. for `B` with
    /// [`i32::MAX`] sharps.
    pub fn fifths(self) -> i64 {
        self.letter.fifths() as i64 + 7 * self.modifier.adjustment() as i64
    }

    /// The pitch class (`0..12`, `C = 0`) denoted by this `Spelling`.
    ///
    /// # Example
    /// ```
    /// use spelled_pitch::{LetterName, Modifier, Spelling};
    ///
    /// assert_eq!(Spelling::new(LetterName::C, Modifier::SHARP).pitch_class(), 1);
    /// assert_eq!(Spelling::new(LetterName::D, Modifier::FLAT).pitch_class(), 1);
    /// assert_eq!(Spelling::new(LetterName::B, Modifier::SHARP).pitch_class(), 0);
    /// ```
    pub fn pitch_class(self) -> u8 {
        (self.letter.natural_pitch_class() as i32 + self.modifier.adjustment().rem_euclid(12))
            .rem_euclid(12) as u8
    }

    #[inline]
    pub fn letter(self) -> LetterName {
        self.letter
    }

    #[inline]
    pub fn modifier(self) -> Modifier {
        self.modifier
    }
}

impl Display for Spelling {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.letter, self.modifier)
    }
}

/////////////
// PARSING //
/////////////

/// The ways that parsing a [`Spelling`] can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseSpellingError {
    /// The string was empty
    Empty,
    /// The first character wasn't an (upper-case) letter name
    InvalidLetter(char),
    /// Some character after the letter wasn't an accidental
    InvalidAccidental(char),
    /// Sharps and flats were mixed in the same spelling (e.g. `C#b`)
    MixedAccidentals,
}

impl Display for ParseSpellingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseSpellingError::Empty => write!(f, "Can't parse a spelling from an empty string"),
            ParseSpellingError::InvalidLetter(c) => {
                write!(f, "{:?} isn't a letter name (expected one of `CDEFGAB`)", c)
            }
            ParseSpellingError::InvalidAccidental(c) => {
                write!(f, "{:?} isn't an accidental", c)
            }
            ParseSpellingError::MixedAccidentals => {
                write!(f, "A spelling can't contain both sharps and flats")
            }
        }
    }
}

impl Error for ParseSpellingError {}

impl FromStr for Spelling {
    type Err = ParseSpellingError;

    /// Parses strings like `"C"`, `"F#"`, `"E♭"`, `"Bbb"` or `"Gx"`.
    ///
    /// ```
    /// use spelled_pitch::{LetterName, Modifier, ParseSpellingError, Spelling};
    ///
    /// assert_eq!("D".parse::<Spelling>(), Ok(Spelling::D));
    /// assert_eq!("F#".parse::<Spelling>(), Ok(Spelling::new(LetterName::F, Modifier::SHARP)));
    /// assert_eq!("B♭".parse::<Spelling>(), Ok(Spelling::new(LetterName::B, Modifier::FLAT)));
    /// assert_eq!("Ebb".parse::<Spelling>(), Ok(Spelling::new(LetterName::E, Modifier::DOUBLE_FLAT)));
    /// assert_eq!("H".parse::<Spelling>(), Err(ParseSpellingError::InvalidLetter('H')));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let first = chars.next().ok_or(ParseSpellingError::Empty)?;
        let letter = LetterName::from_char(first).ok_or(ParseSpellingError::InvalidLetter(first))?;

        let mut sharps = 0i32;
        let mut flats = 0i32;
        for c in chars {
            match c {
                '#' | '♯' => sharps = sharps.saturating_add(1),
                'x' | '𝄪' => sharps = sharps.saturating_add(2),
                'b' | '♭' => flats = flats.saturating_add(1),
                '𝄫' => flats = flats.saturating_add(2),
                _ => return Err(ParseSpellingError::InvalidAccidental(c)),
            }
        }
        if sharps > 0 && flats > 0 {
            return Err(ParseSpellingError::MixedAccidentals);
        }
        Ok(Self::new(letter, Modifier::from_sharps(sharps - flats)))
    }
}
