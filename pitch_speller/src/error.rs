//! Error types for the different ways that building or solving a flow network can fail.

use std::fmt::{Display, Formatter};

use spelled_pitch::{Pitch, Spelling};

/// Alias for `Result<T, pitch_speller::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// The different ways that the pitch speller can fail.  Nodes are stored as their `Debug`
/// representations, so that `Error` doesn't need to be generic over the node type.
///
/// Structural absence (a missing edge, an unreachable node) is never an `Error`; those queries
/// return `Option`s.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /* FLOW NETWORK ERRORS */
    /// A [`FlowNetwork`](crate::FlowNetwork) was given the same node as its source and its sink
    SourceIsSink { node: String },
    /// Some operation referenced a node which isn't in the network
    MissingNode { node: String },
    /// A path passed to [`FlowNetwork::push_flow`](crate::FlowNetwork::push_flow) uses an edge
    /// which doesn't exist in the network
    MissingEdge { from: String, to: String },
    /// Attempted to remove the source or sink of a [`FlowNetwork`](crate::FlowNetwork)
    TerminalRemoval { node: String },
    /// An edge of a [`FlowNetwork`](crate::FlowNetwork) was given a negative (or NaN) capacity
    InvalidCapacity {
        from: String,
        to: String,
        capacity: String,
    },

    /* SPELLER ERRORS */
    /// A [`Parameters`](crate::Parameters) field was negative, infinite or NaN
    InvalidParameter { name: &'static str, value: f64 },
    /// The speller chose a spelling which doesn't denote the pitch being spelled.  This indicates
    /// a bug in the speller's cost model.
    MismatchedSpelling { pitch: Pitch, spelling: Spelling },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            /* FLOW NETWORK ERRORS */
            Error::SourceIsSink { node } => {
                write!(f, "Node {} can't be both the source and the sink", node)
            }
            Error::MissingNode { node } => write!(f, "Node {} isn't in the network", node),
            Error::MissingEdge { from, to } => {
                write!(f, "There's no edge from {} to {} in the network", from, to)
            }
            Error::TerminalRemoval { node } => write!(
                f,
                "Can't remove {} because it's the source or sink of the network",
                node
            ),
            Error::InvalidCapacity { from, to, capacity } => write!(
                f,
                "Edge from {} to {} has capacity {}, but capacities can't be negative",
                from, to, capacity
            ),

            /* SPELLER ERRORS */
            Error::InvalidParameter { name, value } => write!(
                f,
                "Parameter `{}` must be finite and non-negative, but is {}",
                name, value
            ),
            Error::MismatchedSpelling { pitch, spelling } => write!(
                f,
                "Chose spelling {} for pitch {}, which has a different pitch class",
                spelling, pitch
            ),
        }
    }
}

impl std::error::Error for Error {}
