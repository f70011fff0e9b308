//! Choosing spellings for sets of simultaneous pitches.

use std::collections::BTreeMap;

use itertools::Itertools;
use spelled_pitch::{Pitch, SpelledPitch, Spelling};

use crate::{CutSide, Error, FlowNetwork, MinimumCut, Result};

mod cost;
mod node;

pub use cost::Cost;
pub use node::{AssignedNode, Cross, SpellingNode, Tendency, Tier, VoiceIdx, VoiceVec};

/// The weights of the different costs considered by a [`PitchSpeller`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// The cost of each step (on the line of fifths) between a spelling and the pivot
    pub pivot_weight: f64,
    /// The cost of each [`Tier`] separating the spellings of two voices
    pub context_weight: f64,
}

impl Parameters {
    /// Checks that every weight is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("pivot_weight", self.pivot_weight),
            ("context_weight", self.context_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            pivot_weight: 1.0,
            context_weight: 1.0,
        }
    }
}

/// Spells a set of simultaneous pitches, each identified by a key of type `K` (e.g. a voice
/// number).
///
/// Every pitch class can be spelled three ways, a perfect twelfth apart on the line of fifths
/// (e.g. `A♭`, `G♯` or `F𝄪`).  Spellings are chosen to be close to a 'pivot' spelling, and to each
/// other, by computing the minimum cut of a [`FlowNetwork`].  Ties are resolved towards the
/// flatter spelling.
///
/// # Example
/// ```
/// # fn main() -> pitch_speller::Result<()> {
/// use pitch_speller::PitchSpeller;
///
/// let speller = PitchSpeller::new([("bass", 61), ("tenor", 66), ("alto", 70)], None);
/// let spellings = speller.spell()?;
/// assert_eq!(spellings["bass"].to_string(), "C♯4");
/// assert_eq!(spellings["tenor"].to_string(), "F♯4");
/// assert_eq!(spellings["alto"].to_string(), "B♭4");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PitchSpeller<K> {
    pitches: BTreeMap<K, Pitch>,
    pivot: Spelling,
    parameters: Parameters,
}

impl<K: Ord + Clone> PitchSpeller<K> {
    /// The pivot used if none is given.  `D` is in the middle of the natural notes on the line of
    /// fifths.
    pub const DEFAULT_PIVOT: Spelling = Spelling::D;

    /// Creates a `PitchSpeller` for some pitches.  If the same key appears twice, the later pitch
    /// is used.
    pub fn new<P: Into<Pitch>>(
        pitches: impl IntoIterator<Item = (K, P)>,
        pivot: Option<Spelling>,
    ) -> Self {
        Self {
            pitches: pitches.into_iter().map(|(k, p)| (k, p.into())).collect(),
            pivot: pivot.unwrap_or(Self::DEFAULT_PIVOT),
            parameters: Parameters::default(),
        }
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn pitches(&self) -> &BTreeMap<K, Pitch> {
        &self.pitches
    }

    pub fn pivot(&self) -> Spelling {
        self.pivot
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The flow network whose minimum cut decides the spellings.  Voices are numbered in key
    /// order.
    pub fn network(&self) -> Result<FlowNetwork<SpellingNode, Cost>> {
        self.parameters.validate()?;
        cost::build_network(&self.pitch_classes(), self.pivot, &self.parameters)
    }

    /// Spells every pitch.  Every key is given exactly one spelling; no pitches gives no
    /// spellings.
    pub fn spell(&self) -> Result<BTreeMap<K, SpelledPitch>> {
        self.parameters.validate()?;
        if self.pitches.is_empty() {
            return Ok(BTreeMap::new());
        }

        let network = self.network()?;
        let tiers = read_tiers(&network.minimum_cut(), self.pitches.len());
        let spellings = self
            .pitches
            .iter()
            .zip_eq(tiers)
            .map(|((key, &pitch), tier)| {
                let spelling = cost::candidate(pitch.pitch_class(), tier);
                let spelled = SpelledPitch::new(pitch, spelling)
                    .ok_or(Error::MismatchedSpelling { pitch, spelling })?;
                Ok((key.clone(), spelled))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        log::debug!(
            "Spelled {} pitches as [{}]",
            spellings.len(),
            spellings.values().join(", ")
        );
        Ok(spellings)
    }

    fn pitch_classes(&self) -> VoiceVec<u8> {
        self.pitches.values().map(|p| p.pitch_class()).collect()
    }
}

/// Reads the [`Tier`] of every voice from the side of the cut that its choice nodes fall on
fn read_tiers(cut: &MinimumCut<SpellingNode>, num_voices: usize) -> VoiceVec<Tier> {
    let mut assigned = (0..num_voices)
        .cartesian_product([Tendency::Down, Tendency::Up])
        .map(|(voice, tendency)| {
            let node = Cross::new(voice, tendency);
            let assignment = match cut.side_of(&SpellingNode::Choice(node)) {
                Some(CutSide::Source) => Tendency::Up,
                Some(CutSide::Sink) | None => Tendency::Down,
            };
            AssignedNode::new(node, assignment)
        })
        .collect_vec();
    assigned.sort();

    // Sorting puts each voice's `Down` node directly before its `Up` node
    assigned
        .into_iter()
        .tuples()
        .map(|(down_node, up_node)| {
            Tier::from_assignments(down_node.assignment, up_node.assignment).unwrap_or_else(|| {
                log::warn!(
                    "Voice {} crossed its sharp threshold but not its flat one",
                    down_node.node.voice.index()
                );
                Tier::Middle
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use spelled_pitch::{LetterName, Modifier};

    use super::*;

    fn cut(source_side: &[SpellingNode]) -> MinimumCut<SpellingNode> {
        let source_side = source_side.iter().copied().collect::<HashSet<_>>();
        let sink_side = (0..2)
            .cartesian_product([Tendency::Down, Tendency::Up])
            .map(|(v, t)| SpellingNode::Choice(Cross::new(v, t)))
            .chain([SpellingNode::Sink])
            .filter(|n| !source_side.contains(n))
            .collect();
        MinimumCut {
            source_side,
            sink_side,
        }
    }

    #[test]
    fn tiers_from_cut() {
        let choice = |v, t| SpellingNode::Choice(Cross::new(v, t));
        let tiers = read_tiers(
            &cut(&[SpellingNode::Source, choice(0, Tendency::Down)]),
            2,
        );
        assert_eq!(tiers.raw, vec![Tier::Middle, Tier::Flat]);

        let all_up = [
            SpellingNode::Source,
            choice(0, Tendency::Down),
            choice(0, Tendency::Up),
            choice(1, Tendency::Down),
            choice(1, Tendency::Up),
        ];
        assert_eq!(read_tiers(&cut(&all_up), 2).raw, vec![Tier::Sharp; 2]);

        // An impossible assignment falls back to the middle tier
        let inverted = [SpellingNode::Source, choice(1, Tendency::Up)];
        assert_eq!(read_tiers(&cut(&inverted), 2).raw, vec![Tier::Flat, Tier::Middle]);
    }

    #[test]
    fn invalid_parameters() {
        #[track_caller]
        fn check(parameters: Parameters, exp_name: &str) {
            let speller = PitchSpeller::new([(0, 60)], None).with_parameters(parameters);
            match speller.spell() {
                Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, exp_name),
                other => panic!("Expected invalid parameter, got {:?}", other),
            }
        }

        check(
            Parameters {
                pivot_weight: -1.0,
                ..Parameters::default()
            },
            "pivot_weight",
        );
        check(
            Parameters {
                context_weight: f64::NAN,
                ..Parameters::default()
            },
            "context_weight",
        );
        check(
            Parameters {
                context_weight: f64::INFINITY,
                ..Parameters::default()
            },
            "context_weight",
        );
        assert_eq!(Parameters::default().validate(), Ok(()));
    }

    #[test]
    fn pivot() {
        // With E major's sharpest note as the pivot, A♭ becomes G♯
        let g_sharp = Spelling::new(LetterName::G, Modifier::SHARP);
        let speller = PitchSpeller::new([(0, 68)], Some(Spelling::from_fifths(5)));
        assert_eq!(speller.pivot(), Spelling::B);
        assert_eq!(speller.spell().unwrap()[&0].spelling(), g_sharp);

        let default = PitchSpeller::new([(0, 68)], None);
        assert_eq!(default.pivot(), Spelling::D);
        assert_eq!(
            default.spell().unwrap()[&0].spelling(),
            Spelling::new(LetterName::A, Modifier::FLAT)
        );
    }

    #[test]
    fn context_pulls_voices_together() {
        let names = |speller: PitchSpeller<i32>| {
            let spellings = speller.spell().unwrap();
            spellings.values().map(|s| s.spelling().to_string()).collect_vec()
        };

        // Alone, 68 is a tie between A♭ and G♯, which resolves to A♭
        assert_eq!(names(PitchSpeller::new([(0, 68)], None)), ["A♭"]);
        // Next to a C♯, G♯ avoids the cost of the two voices being in different tiers
        assert_eq!(names(PitchSpeller::new([(0, 61), (1, 68)], None)), ["C♯", "G♯"]);
        // Unless that cost is removed
        let no_context = Parameters {
            context_weight: 0.0,
            ..Parameters::default()
        };
        let speller = PitchSpeller::new([(0, 61), (1, 68)], None).with_parameters(no_context);
        assert_eq!(names(speller), ["C♯", "A♭"]);
    }

    #[test]
    fn duplicate_keys() {
        let speller = PitchSpeller::new([(0, 60), (0, 62)], None);
        assert_eq!(speller.pitches().len(), 1);
        assert_eq!(speller.spell().unwrap()[&0].spelling(), Spelling::D);
    }
}
