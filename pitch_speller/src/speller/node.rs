//! The nodes of the flow networks built by the [`PitchSpeller`](super::PitchSpeller).

use std::fmt::{Display, Formatter};

index_vec::define_index_type! { pub struct VoiceIdx = usize; }
pub type VoiceVec<T> = index_vec::IndexVec<VoiceIdx, T>;

/// Which way a choice node pushes its voice's spelling.  Nodes on the source side of the cut are
/// assigned `Up`; nodes on the sink side are assigned `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tendency {
    Down,
    Up,
}

/// A binary choice node: one of the two thresholds between the three candidate spellings of a
/// voice.  The `Down` node decides between the flat and middle candidates, the `Up` node between
/// the middle and sharp candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cross {
    pub voice: VoiceIdx,
    pub tendency: Tendency,
}

impl Cross {
    pub fn new(voice: usize, tendency: Tendency) -> Self {
        Self {
            voice: VoiceIdx::new(voice),
            tendency,
        }
    }
}

/// A node in a spelling network
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpellingNode {
    Source,
    Sink,
    Choice(Cross),
}

impl SpellingNode {
    /// The voice of this node, or `None` for the source and sink
    pub fn voice(&self) -> Option<VoiceIdx> {
        match self {
            SpellingNode::Choice(cross) => Some(cross.voice),
            SpellingNode::Source | SpellingNode::Sink => None,
        }
    }

    /// The tendency of this node, or `None` for the source and sink
    pub fn tendency(&self) -> Option<Tendency> {
        match self {
            SpellingNode::Choice(cross) => Some(cross.tendency),
            SpellingNode::Source | SpellingNode::Sink => None,
        }
    }
}

impl From<Cross> for SpellingNode {
    fn from(cross: Cross) -> Self {
        SpellingNode::Choice(cross)
    }
}

impl Display for SpellingNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SpellingNode::Source => write!(f, "source"),
            SpellingNode::Sink => write!(f, "sink"),
            SpellingNode::Choice(Cross { voice, tendency }) => {
                write!(f, "{}{:?}", voice.index(), tendency)
            }
        }
    }
}

/// A choice node, along with the [`Tendency`] given to it by a minimum cut.  These are ordered by
/// node (voice, then tendency) and then by assignment, so sorting them groups each voice's pair
/// of nodes together, with the `Down` node first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssignedNode {
    pub node: Cross,
    pub assignment: Tendency,
}

impl AssignedNode {
    pub fn new(node: Cross, assignment: Tendency) -> Self {
        Self { node, assignment }
    }
}

/// One of the three candidate spellings of a pitch class, each a perfect twelfth apart on the
/// line of fifths (e.g. `A♭`, `G♯` and `F𝄪`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Flat,
    Middle,
    Sharp,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Flat, Tier::Middle, Tier::Sharp];

    /// How far this tier is from the middle tier, on the line of fifths
    pub fn fifths_offset(self) -> i32 {
        match self {
            Tier::Flat => -12,
            Tier::Middle => 0,
            Tier::Sharp => 12,
        }
    }

    /// Reads a tier from the assignments of a voice's `Down` and `Up` nodes.  `(Down, Up)` would
    /// mean the sharp threshold is crossed without the flat one, so gives `None`.
    pub fn from_assignments(down_node: Tendency, up_node: Tendency) -> Option<Self> {
        match (down_node, up_node) {
            (Tendency::Down, Tendency::Down) => Some(Tier::Flat),
            (Tendency::Up, Tendency::Down) => Some(Tier::Middle),
            (Tendency::Up, Tendency::Up) => Some(Tier::Sharp),
            (Tendency::Down, Tendency::Up) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigned_node_order() {
        let a = AssignedNode::new(Cross::new(0, Tendency::Down), Tendency::Down);
        let b = AssignedNode::new(Cross::new(1, Tendency::Up), Tendency::Down);
        let c = AssignedNode::new(Cross::new(0, Tendency::Up), Tendency::Down);
        let d = AssignedNode::new(Cross::new(0, Tendency::Down), Tendency::Up);
        assert!(a < b);
        assert!(a < c);
        assert!(a < d);
        assert!(d < c);

        let mut nodes = vec![b, c, d, a];
        nodes.sort();
        assert_eq!(nodes, vec![a, d, c, b]);
    }

    #[test]
    fn tiers() {
        use Tendency::*;
        assert_eq!(Tier::from_assignments(Down, Down), Some(Tier::Flat));
        assert_eq!(Tier::from_assignments(Up, Down), Some(Tier::Middle));
        assert_eq!(Tier::from_assignments(Up, Up), Some(Tier::Sharp));
        assert_eq!(Tier::from_assignments(Down, Up), None);
    }

    #[test]
    fn projections() {
        let node = SpellingNode::from(Cross::new(3, Tendency::Up));
        assert_eq!(node.voice(), Some(VoiceIdx::new(3)));
        assert_eq!(node.tendency(), Some(Tendency::Up));
        assert_eq!(node.to_string(), "3Up");
        assert_eq!(SpellingNode::Sink.voice(), None);
        assert_eq!(SpellingNode::Source.tendency(), None);
    }
}
