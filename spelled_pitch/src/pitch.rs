//! Unspelled and spelled pitches.

use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::Spelling;

/// An unspelled pitch, stored as a MIDI-style note number (so middle C is `60`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[repr(transparent)]
pub struct Pitch(i32);

impl Pitch {
    pub const MIDDLE_C: Pitch = Pitch(60);

    pub const fn new(note_number: i32) -> Self {
        Self(note_number)
    }

    #[inline]
    pub fn note_number(self) -> i32 {
        self.0
    }

    /// The pitch class of this `Pitch`, in `0..12` with `C = 0`.
    ///
    /// # Example
    /// ```
    /// use spelled_pitch::Pitch;
    ///
    /// assert_eq!(Pitch::new(60).pitch_class(), 0);
    /// assert_eq!(Pitch::new(70).pitch_class(), 10);
    /// assert_eq!(Pitch::new(-1).pitch_class(), 11);
    /// ```
    #[inline]
    pub fn pitch_class(self) -> u8 {
        self.0.rem_euclid(12) as u8
    }
}

impl From<i32> for Pitch {
    fn from(note_number: i32) -> Self {
        Self(note_number)
    }
}

impl Display for Pitch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A [`Pitch`] which has been given a [`Spelling`] and therefore an octave number.  The octave
/// follows the letter, not the sounding pitch: `B♯3` and `C4` sound the same.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct SpelledPitch {
    spelling: Spelling,
    octave: i32,
}

impl SpelledPitch {
    /// Spells a [`Pitch`] with a given [`Spelling`].  The octave is computed from the pitch's note
    /// number, so this returns `None` if the `Spelling` doesn't denote the `Pitch`'s pitch class.
    ///
    /// # Example
    /// ```
    /// # fn test() -> Option<()> {
    /// use spelled_pitch::{Pitch, SpelledPitch, Spelling};
    ///
    /// let middle_c = SpelledPitch::new(Pitch::MIDDLE_C, Spelling::C)?;
    /// assert_eq!(middle_c.octave(), 4);
    /// assert_eq!(middle_c.to_string(), "C4");
    ///
    /// let b_sharp = SpelledPitch::new(Pitch::MIDDLE_C, "B#".parse().ok()?)?;
    /// assert_eq!(b_sharp.octave(), 3);
    /// assert_eq!(b_sharp.to_string(), "B♯3");
    ///
    /// // D doesn't spell middle C
    /// assert_eq!(SpelledPitch::new(Pitch::MIDDLE_C, Spelling::D), None);
    /// # Some(())
    /// # }
    /// # fn main() { test().unwrap() }
    /// ```
    pub fn new(pitch: Pitch, spelling: Spelling) -> Option<Self> {
        if pitch.pitch_class() != spelling.pitch_class() {
            return None;
        }
        let octave = (pitch.note_number() as i64 - letter_offset(spelling)).div_euclid(12) - 1;
        Some(Self {
            spelling,
            octave: i32::try_from(octave).ok()?,
        })
    }

    #[inline]
    pub fn spelling(self) -> Spelling {
        self.spelling
    }

    #[inline]
    pub fn octave(self) -> i32 {
        self.octave
    }

    /// The (unspelled) [`Pitch`] which this `SpelledPitch` denotes.  This is `None` only if the
    /// note number doesn't fit in an `i32`, which can't happen for a `SpelledPitch` made by
    /// [`SpelledPitch::new`].
    pub fn pitch(self) -> Option<Pitch> {
        let note_number = (self.octave as i64 + 1) * 12 + letter_offset(self.spelling);
        i32::try_from(note_number).ok().map(Pitch::new)
    }
}

/// The note number of a [`Spelling`] in octave `-1`.  This isn't reduced modulo 12, so e.g. `B♯`
/// is `12` and `C♭` is `-1`.
fn letter_offset(spelling: Spelling) -> i64 {
    spelling.letter().natural_pitch_class() as i64 + spelling.modifier().adjustment() as i64
}

impl Display for SpelledPitch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.spelling, self.octave)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::{LetterName, Modifier};

    #[test]
    fn octaves() {
        #[track_caller]
        fn check(note_number: i32, spelling: &str, exp_octave: i32) {
            let spelling = spelling.parse::<Spelling>().unwrap();
            let spelled = SpelledPitch::new(Pitch::new(note_number), spelling).unwrap();
            assert_eq!(spelled.octave(), exp_octave);
        }

        check(60, "C", 4);
        check(60, "B#", 3);
        check(60, "Dbb", 4);
        check(59, "Cb", 4);
        check(59, "B", 3);
        check(71, "B", 4);
        check(21, "A", 0);
        check(0, "C", -1);
    }

    #[test]
    fn extreme_note_numbers() {
        #[track_caller]
        fn check(note_number: i32, spelling: Spelling, exp_octave: i32) {
            let spelled = SpelledPitch::new(Pitch::new(note_number), spelling).unwrap();
            assert_eq!(spelled.octave(), exp_octave);
            assert_eq!(spelled.pitch(), Some(Pitch::new(note_number)));
        }
        let parse = |s: &str| s.parse::<Spelling>().unwrap();

        // i32::MIN = 12 * -178956971 + 4, so it's an `E`
        check(i32::MIN, Spelling::E, -178956972);
        check(i32::MIN, parse("Fb"), -178956972);
        check(i32::MIN, parse("Dx"), -178956972);
        // i32::MAX = 12 * 178956970 + 7, so it's a `G`
        check(i32::MAX, Spelling::G, 178956969);
        check(i32::MAX, parse("Abb"), 178956969);
        check(i32::MAX, parse("Fx"), 178956969);

        // The most flats possible (an `E`), on the highest `E`
        let flattest = Spelling::new(LetterName::C, Modifier::from_sharps(i32::MIN));
        check(i32::MAX - 3, flattest, 357913940);
        // The most sharps possible (a `G`), on the lowest `G`
        let sharpest = Spelling::new(LetterName::C, Modifier::from_sharps(i32::MAX));
        check(i32::MIN + 3, sharpest, -357913942);
    }

    #[quickcheck]
    fn pitch_round_trip(note_number: i32, fifths: i16) -> bool {
        let pitch = Pitch::new(note_number);
        let spelling = Spelling::from_fifths(fifths as i32);
        match SpelledPitch::new(pitch, spelling) {
            Some(spelled) => spelled.pitch() == Some(pitch),
            // Only fails if the spelling is for a different pitch class
            None => pitch.pitch_class() != spelling.pitch_class(),
        }
    }
}
