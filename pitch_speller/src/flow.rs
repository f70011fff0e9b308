//! Flow networks, and the computation of their maximum flows and minimum cuts.

use std::{collections::HashSet, fmt::Debug, hash::Hash};

use crate::{
    graph::{search, Graph, NodeIdx, Path, UnweightedGraph},
    scheme::{UnweightedScheme, WeightedScheme},
    weight, Error, Result, Weight,
};

/// A weighted directed [`Graph`] with two distinguished nodes: the `source` and the `sink`.  Edge
/// weights are capacities, so every way of adding them rejects negative (or NaN) weights with
/// [`Error::InvalidCapacity`].
///
/// # Example
/// ```
/// # fn main() -> pitch_speller::Result<()> {
/// use pitch_speller::{CutSide, FlowNetwork};
///
/// let mut network = FlowNetwork::new('s', 't')?;
/// network.insert_edge('s', 'a', 3u32)?;
/// network.insert_edge('s', 'b', 2)?;
/// network.insert_edge('a', 'b', 1)?;
/// network.insert_edge('a', 't', 2)?;
/// network.insert_edge('b', 't', 3)?;
///
/// assert_eq!(network.maximum_flow(), 5);
///
/// let cut = network.minimum_cut();
/// assert_eq!(network.cut_capacity(&cut), 5);
/// assert_eq!(cut.side_of(&'s'), Some(CutSide::Source));
/// assert_eq!(cut.side_of(&'t'), Some(CutSide::Sink));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNetwork<N: Eq + Hash + Clone, W: Weight> {
    graph: Graph<N, W>,
    source: N,
    sink: N,
}

impl<N: Eq + Hash + Clone + Debug, W: Weight> FlowNetwork<N, W> {
    /// Creates a network containing only `source` and `sink`
    pub fn new(source: N, sink: N) -> Result<Self> {
        Self::from_graph(Graph::new(), source, sink)
    }

    /// Turns a [`Graph`] into a network, adding `source` and `sink` to it if needed.  Fails if any
    /// edge of `graph` has a negative capacity.
    pub fn from_graph(mut graph: Graph<N, W>, source: N, sink: N) -> Result<Self> {
        if source == sink {
            return Err(Error::SourceIsSink {
                node: format!("{:?}", source),
            });
        }
        if let Some(edge) = graph.edges().find(|e| !is_valid_capacity(e.weight)) {
            return Err(invalid_capacity(edge.from, edge.to, edge.weight));
        }
        graph.create_node(source.clone());
        graph.create_node(sink.clone());
        Ok(Self {
            graph,
            source,
            sink,
        })
    }

    /// Turns an [`UnweightedGraph`] into a network where every edge has the same `capacity`
    pub fn from_unweighted(
        graph: &UnweightedGraph<N>,
        source: N,
        sink: N,
        capacity: W,
    ) -> Result<Self> {
        Self::from_graph(Graph::from_unweighted(graph, capacity), source, sink)
    }

    /* ACCESSORS */

    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn graph(&self) -> &Graph<N, W> {
        &self.graph
    }

    pub fn contains(&self, node: &N) -> bool {
        self.graph.contains(node)
    }

    /// Every node other than the source and sink
    pub fn internal_nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.graph
            .nodes()
            .filter(move |n| **n != self.source && **n != self.sink)
    }

    /// The total capacity of the edges leaving `node`
    pub fn out_capacity(&self, node: &N) -> W {
        weight::total(self.graph.edges_from(node).map(|(_, w)| w))
    }

    /* MUTATION */

    /// Adds an edge, replacing any existing edge between `from` and `to`.  A capacity of zero
    /// removes the edge.
    pub fn insert_edge(&mut self, from: N, to: N, capacity: W) -> Result<()> {
        if !is_valid_capacity(capacity) {
            return Err(invalid_capacity(&from, &to, capacity));
        }
        self.graph.insert_edge(from, to, capacity);
        Ok(())
    }

    pub fn remove_edge(&mut self, from: &N, to: &N) -> bool {
        self.graph.take_edge(from, to).is_some()
    }

    pub fn edge_value(&self, from: &N, to: &N) -> Option<W> {
        self.graph.edge_value(from, to)
    }

    /// Removes a node and all its edges.  The source and sink can't be removed.
    pub fn remove_node(&mut self, node: &N) -> Result<bool> {
        if *node == self.source || *node == self.sink {
            return Err(Error::TerminalRemoval {
                node: format!("{:?}", node),
            });
        }
        Ok(self.graph.remove_node(node))
    }

    /// Removes every edge which `scheme` doesn't contain
    pub fn mask(&mut self, scheme: &UnweightedScheme<N>)
    where
        N: 'static,
    {
        let removed = self
            .graph
            .edges()
            .filter(|e| !scheme.contains(e.from, e.to))
            .map(|e| (e.from.clone(), e.to.clone()))
            .collect::<Vec<_>>();
        for (from, to) in removed {
            self.graph.take_edge(&from, &to);
        }
    }

    /// Multiplies the capacity of every edge by its weight in `scheme`.  Edges which `scheme`
    /// doesn't contain (or which end up with zero capacity) are removed.  If any new capacity
    /// would be negative, the network is left unchanged.
    pub fn mask_weighted(&mut self, scheme: &WeightedScheme<N, W>) -> Result<()>
    where
        N: 'static,
    {
        let updates = self
            .graph
            .edges()
            .map(|e| {
                let new_capacity = scheme.weight(e.from, e.to).map_or(W::ZERO, |w| e.weight * w);
                if is_valid_capacity(new_capacity) {
                    Ok((e.from.clone(), e.to.clone(), new_capacity))
                } else {
                    Err(invalid_capacity(e.from, e.to, new_capacity))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        for (from, to, capacity) in updates {
            self.graph.insert_edge(from, to, capacity);
        }
        Ok(())
    }

    /// Pushes as much flow as possible along `path` (i.e. the capacity of its smallest edge,
    /// according to the current state of the network), returning the amount pushed.  Every edge
    /// of the path loses that much capacity (being removed if it reaches zero), and its reverse
    /// edge gains the same amount.
    pub fn push_flow(&mut self, path: &Path<N, W>) -> Result<W> {
        let indices = path
            .nodes()
            .iter()
            .map(|n| {
                self.graph.node_idx(n).ok_or_else(|| Error::MissingNode {
                    node: format!("{:?}", n),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        for pair in indices.windows(2) {
            if self.graph.weight_between(pair[0], pair[1]).is_none() {
                return Err(Error::MissingEdge {
                    from: format!("{:?}", self.graph.node(pair[0])),
                    to: format!("{:?}", self.graph.node(pair[1])),
                });
            }
        }
        Ok(self.push_flow_along(&indices))
    }

    /* SOLVING */

    /// The augmenting path with the fewest edges, or `None` if the sink is unreachable from the
    /// source.  Ties are broken by breadth-first discovery order.
    pub fn augmenting_path(&self) -> Option<Path<N, W>> {
        self.graph.shortest_path(&self.source, &self.sink)
    }

    /// Repeatedly pushes flow along augmenting paths until there are none left.  Returns the
    /// value of the resulting (maximum) flow, along with the residual network.
    pub fn maximum_flow_and_residual_network(&self) -> (W, Self) {
        let mut residual = self.clone();
        let Some((source, sink)) = self.terminals() else {
            return (W::ZERO, residual);
        };

        let mut num_paths = 0usize;
        while let Some(path) = search::shortest_path(&residual.graph, source, sink) {
            let pushed = residual.push_flow_along(&path);
            num_paths += 1;
            log::trace!(
                "Pushed {:?} along augmenting path of length {}",
                pushed,
                path.len() - 1
            );
        }

        // Any capacity removed from the edges leaving the source must have become flow
        let flow = weight::total(self.graph.edges_from(&self.source).map(
            |(to, original)| match residual.graph.edge_value(&self.source, to) {
                Some(remaining) => original - remaining,
                None => original,
            },
        ));
        log::debug!(
            "Maximum flow of {:?} found with {} augmenting paths",
            flow,
            num_paths
        );
        (flow, residual)
    }

    pub fn maximum_flow(&self) -> W {
        self.maximum_flow_and_residual_network().0
    }

    /// Computes a minimum cut of this network.  The source side contains exactly the nodes which
    /// are reachable from the source in the residual network; every other node (including any
    /// node whose incident capacity is all saturated) is on the sink side.
    pub fn minimum_cut(&self) -> MinimumCut<N> {
        let (_flow, residual) = self.maximum_flow_and_residual_network();
        let source_side = residual
            .graph
            .breadth_first_search(&self.source)
            .into_iter()
            .cloned()
            .collect::<HashSet<_>>();
        let sink_side = self
            .graph
            .nodes()
            .filter(|n| !source_side.contains(*n))
            .cloned()
            .collect::<HashSet<_>>();
        MinimumCut {
            source_side,
            sink_side,
        }
    }

    /// The total capacity (in this network) of the edges which cross `cut` from the source side
    /// to the sink side
    pub fn cut_capacity(&self, cut: &MinimumCut<N>) -> W {
        weight::total(
            self.graph
                .edges()
                .filter(|e| cut.source_side.contains(e.from) && cut.sink_side.contains(e.to))
                .map(|e| e.weight),
        )
    }

    /* HELPERS */

    fn terminals(&self) -> Option<(NodeIdx, NodeIdx)> {
        Some((
            self.graph.node_idx(&self.source)?,
            self.graph.node_idx(&self.sink)?,
        ))
    }

    /// Pushes flow along a sequence of nodes, each of which must be joined to the next by an edge
    fn push_flow_along(&mut self, path: &[NodeIdx]) -> W {
        let bottleneck = path
            .windows(2)
            .filter_map(|pair| self.graph.weight_between(pair[0], pair[1]))
            .reduce(W::min_weight);
        let Some(bottleneck) = bottleneck else {
            return W::ZERO;
        };
        for pair in path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let forward = self.graph.weight_between(from, to).unwrap_or(W::ZERO);
            self.graph.set_weight_between(from, to, forward - bottleneck);
            let backward = self.graph.weight_between(to, from).unwrap_or(W::ZERO);
            self.graph.set_weight_between(to, from, backward + bottleneck);
        }
        bottleneck
    }
}

/// Which side of a [`MinimumCut`] a node is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CutSide {
    Source,
    Sink,
}

/// A partition of the nodes of a [`FlowNetwork`] into the source side and the sink side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimumCut<N: Eq + Hash> {
    pub source_side: HashSet<N>,
    pub sink_side: HashSet<N>,
}

impl<N: Eq + Hash> MinimumCut<N> {
    /// Which side of the cut `node` is on, or `None` if it isn't in the network
    pub fn side_of(&self, node: &N) -> Option<CutSide> {
        if self.source_side.contains(node) {
            Some(CutSide::Source)
        } else if self.sink_side.contains(node) {
            Some(CutSide::Sink)
        } else {
            None
        }
    }
}

/// Capacities must be non-negative.  NaN fails the comparison, so is rejected as well.
fn is_valid_capacity<W: Weight>(capacity: W) -> bool {
    capacity >= W::ZERO
}

fn invalid_capacity<N: Debug, W: Weight>(from: &N, to: &N, capacity: W) -> Error {
    Error::InvalidCapacity {
        from: format!("{:?}", from),
        to: format!("{:?}", to),
        capacity: format!("{:?}", capacity),
    }
}
