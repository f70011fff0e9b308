//! The cost model which turns a set of pitches into a spelling network.
//!
//! Each voice has three candidate spellings ([`Tier`]s), a perfect twelfth apart on the line of
//! fifths, and two choice nodes which act as thresholds between them.  The network is a chain
//! `source -> Down -> Up -> sink` for every voice, so cutting the chain at one of its three edges
//! picks one tier:
//!
//! - `source -> Down` is cut when both nodes are on the sink side (the flat tier)
//! - `Down -> Up` is cut when only `Down` is on the source side (the middle tier)
//! - `Up -> sink` is cut when both nodes are on the source side (the sharp tier)
//!
//! Each of these edges costs the distance (on the line of fifths) from its tier to the pivot.  A
//! huge `Up -> Down` edge stops `Up` being on the source side without `Down`, and edges between
//! same-tendency nodes of different voices charge for every tier separating two voices.

use itertools::Itertools;
use ordered_float::OrderedFloat;
use spelled_pitch::Spelling;

use super::{
    node::{Cross, SpellingNode, Tendency, Tier, VoiceIdx, VoiceVec},
    Parameters,
};
use crate::{
    graph::UnweightedGraph, weight, FlowNetwork, Result, UnweightedScheme, WeightedScheme,
};

/// The type of capacities in spelling networks
pub type Cost = OrderedFloat<f64>;

/// The position on the line of fifths of a pitch class's middle candidate.  The middle candidates
/// run from `E♭` (`-3`) to `G♯` (`8`).
pub(super) fn middle_fifths(pitch_class: u8) -> i32 {
    (7 * pitch_class as i32 + 3).rem_euclid(12) - 3
}

/// The spelling of `pitch_class` in a given [`Tier`]
pub(super) fn candidate(pitch_class: u8, tier: Tier) -> Spelling {
    Spelling::from_fifths(middle_fifths(pitch_class) + tier.fifths_offset())
}

/// The cost of each [`Tier`] of every voice, indexed by `Tier as usize`
fn unary_costs(
    pitch_classes: &VoiceVec<u8>,
    pivot: Spelling,
    pivot_weight: f64,
) -> VoiceVec<[Cost; 3]> {
    pitch_classes
        .iter()
        .map(|&pitch_class| {
            Tier::ALL.map(|tier| {
                let distance = (candidate(pitch_class, tier).fifths() - pivot.fifths()).abs();
                OrderedFloat(pivot_weight * distance as f64)
            })
        })
        .collect()
}

/// Builds the spelling network for one chord, where `pitch_classes[v]` is the pitch class sounded
/// by voice `v`.
pub(super) fn build_network(
    pitch_classes: &VoiceVec<u8>,
    pivot: Spelling,
    parameters: &Parameters,
) -> Result<FlowNetwork<SpellingNode, Cost>> {
    use SpellingNode::{Choice, Sink, Source};
    use Tendency::{Down, Up};

    let num_voices = pitch_classes.len();
    let unary = unary_costs(pitch_classes, pivot, parameters.pivot_weight);
    let context = OrderedFloat(parameters.context_weight);
    // The ordering edges must cost more than any cut which doesn't use them
    let num_context_edges = num_voices * num_voices.saturating_sub(1) * 2;
    let hard = weight::total(unary.iter().flatten().copied())
        + context * OrderedFloat(num_context_edges as f64)
        + OrderedFloat(1.0);

    // Pullbacks along the voice and tendency of each node
    let same_voice = UnweightedScheme::new(|a: &Option<VoiceIdx>, b: &Option<VoiceIdx>| {
        a.is_some() && a == b
    })
    .pullback(SpellingNode::voice);
    let distinct_voices = UnweightedScheme::new(|a: &Option<VoiceIdx>, b: &Option<VoiceIdx>| {
        a.is_some() && b.is_some() && a != b
    })
    .pullback(SpellingNode::voice);
    let same_tendency = UnweightedScheme::new(|a: &Option<Tendency>, b: &Option<Tendency>| {
        a.is_some() && a == b
    })
    .pullback(SpellingNode::tendency);
    let up_to_down = UnweightedScheme::new(|a: &Option<Tendency>, b: &Option<Tendency>| {
        *a == Some(Up) && *b == Some(Down)
    })
    .pullback(SpellingNode::tendency);

    let unary_scheme = WeightedScheme::new(move |a: &SpellingNode, b: &SpellingNode| {
        let (voice, tier) = match (*a, *b) {
            (Source, Choice(c)) if c.tendency == Down => (c.voice, Tier::Flat),
            (Choice(c), Choice(d))
                if c.voice == d.voice && (c.tendency, d.tendency) == (Down, Up) =>
            {
                (c.voice, Tier::Middle)
            }
            (Choice(c), Sink) if c.tendency == Up => (c.voice, Tier::Sharp),
            _ => return None,
        };
        Some(unary[voice][tier as usize])
    });
    let costs = unary_scheme
        + hard * (same_voice * up_to_down)
        + context * (distinct_voices * same_tendency);

    // Start with unit capacity on every edge which could carry flow, then scale by the costs
    let nodes = [Source, Sink].into_iter().chain(
        (0..num_voices)
            .cartesian_product([Down, Up])
            .map(|(voice, tendency)| Choice(Cross::new(voice, tendency))),
    );
    let admissible = UnweightedScheme::new(|a: &SpellingNode, b: &SpellingNode| {
        a != b && *a != Sink && *b != Source
    });
    let template = UnweightedGraph::from_scheme(nodes, &admissible);
    let mut network = FlowNetwork::from_unweighted(&template, Source, Sink, OrderedFloat(1.0))?;
    network.mask_weighted(&costs)?;

    log::debug!(
        "Built spelling network for {} voices: {} nodes, {} edges",
        num_voices,
        network.graph().node_count(),
        network.graph().edge_count()
    );
    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(pitch_classes: &[u8], parameters: Parameters) -> FlowNetwork<SpellingNode, Cost> {
        let pitch_classes = pitch_classes.iter().copied().collect::<VoiceVec<_>>();
        build_network(&pitch_classes, Spelling::D, &parameters).unwrap()
    }

    fn choice(voice: usize, tendency: Tendency) -> SpellingNode {
        SpellingNode::Choice(Cross::new(voice, tendency))
    }

    #[test]
    fn middle_candidates() {
        let names = (0..12)
            .map(|pc| candidate(pc, Tier::Middle).to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            ["C", "C♯", "D", "E♭", "E", "F", "F♯", "G", "G♯", "A", "B♭", "B"]
        );
        assert_eq!(candidate(8, Tier::Flat).to_string(), "A♭");
        assert_eq!(candidate(0, Tier::Sharp).to_string(), "B♯");
        assert_eq!(candidate(0, Tier::Flat).to_string(), "D𝄫");
    }

    #[test]
    fn single_voice_chain() {
        use Tendency::*;
        // C over a D pivot: flat (D𝄫) is 14 fifths away, middle (C) 2, sharp (B♯) 10
        let network = network(&[0], Parameters::default());
        let source = SpellingNode::Source;
        let sink = SpellingNode::Sink;
        let capacity = |from: SpellingNode, to: SpellingNode| network.edge_value(&from, &to);
        assert_eq!(capacity(source, choice(0, Down)), Some(OrderedFloat(14.0)));
        assert_eq!(capacity(choice(0, Down), choice(0, Up)), Some(OrderedFloat(2.0)));
        assert_eq!(capacity(choice(0, Up), sink), Some(OrderedFloat(10.0)));
        // Hard edge is one more than the sum of the others
        assert_eq!(capacity(choice(0, Up), choice(0, Down)), Some(OrderedFloat(27.0)));
        assert_eq!(network.edge_value(&source, &sink), None);
        assert_eq!(network.edge_value(&source, &choice(0, Up)), None);
        assert_eq!(network.graph().edge_count(), 4);
        assert_eq!(network.maximum_flow(), OrderedFloat(2.0));
    }

    #[test]
    fn context_edges() {
        use Tendency::*;
        let network = network(&[0, 5, 7], Parameters::default());
        for (i, j) in [(0, 1), (1, 0), (0, 2), (2, 1)] {
            for tendency in [Down, Up] {
                assert_eq!(
                    network.edge_value(&choice(i, tendency), &choice(j, tendency)),
                    Some(OrderedFloat(1.0))
                );
            }
            assert_eq!(network.edge_value(&choice(i, Down), &choice(j, Up)), None);
        }
        // 3 voices * 4 chain edges + 3 * 2 * 2 context edges
        assert_eq!(network.graph().edge_count(), 24);

        let without_context = self::network(
            &[0, 5, 7],
            Parameters {
                context_weight: 0.0,
                ..Parameters::default()
            },
        );
        assert_eq!(without_context.graph().edge_count(), 12);
    }

    #[test]
    fn zero_cost_edges_are_removed() {
        use Tendency::*;
        // D is the pivot, so its middle candidate costs nothing
        let network = network(&[2], Parameters::default());
        assert_eq!(network.edge_value(&choice(0, Down), &choice(0, Up)), None);
        assert_eq!(network.maximum_flow(), OrderedFloat(0.0));
    }
}
