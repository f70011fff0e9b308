//! A pitch speller built on a small, generic flow-network engine.
//!
//! Given a set of simultaneous pitches, the [`PitchSpeller`] decides which enharmonic spelling
//! each should get (e.g. `C♯` vs `D♭`).  This is framed as an optimisation problem: every pitch
//! gets a pair of binary choice nodes in a [`FlowNetwork`], whose capacities encode the cost of
//! each spelling relative to a pivot spelling and to the other pitches.  The minimum cut of the
//! network then decides which side of each binary choice is taken.
//!
//! The engine is usable on its own:
//!
//! - [`graph`] contains weighted and unweighted directed graphs, along with breadth-first
//!   traversals
//! - [`UnweightedScheme`] and [`WeightedScheme`] describe graphs lazily, as functions from edges
//!   to presence or weight, and can be combined algebraically
//! - [`FlowNetwork`] computes maximum flows (by repeatedly augmenting along shortest paths) and
//!   minimum cuts
//!
//! # Example
//! ```
//! # fn main() -> pitch_speller::Result<()> {
//! use pitch_speller::PitchSpeller;
//!
//! let spellings = PitchSpeller::new([(0, 60), (1, 63)], None).spell()?;
//! assert_eq!(spellings[&0].to_string(), "C4");
//! assert_eq!(spellings[&1].to_string(), "E♭4");
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links, rustdoc::private_intra_doc_links)]

mod error;
mod flow;
pub mod graph;
mod scheme;
pub mod speller;
mod weight;

pub use error::{Error, Result};
pub use flow::{CutSide, FlowNetwork, MinimumCut};
pub use scheme::{UnweightedScheme, WeightedScheme};
pub use speller::{Parameters, PitchSpeller};
pub use weight::Weight;
