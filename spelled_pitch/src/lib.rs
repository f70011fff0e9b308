//! Idiomatic Rust representations of spelled pitches: letter names, accidentals, pitch classes
//! and octaves.

#![deny(clippy::all)]

mod letter;
mod modifier;
mod pitch;
mod spelling;

// Re-export useful data types into the top level of the crate
pub use letter::LetterName;
pub use modifier::Modifier;
pub use pitch::{Pitch, SpelledPitch};
pub use spelling::{ParseSpellingError, Spelling};
