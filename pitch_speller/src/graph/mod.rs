//! Directed graphs over arbitrary hashable node values.
//!
//! [`Graph`] is weighted and [`UnweightedGraph`] is not.  Both intern their nodes into a
//! [`NodeArena`] and store adjacency lists indexed by [`NodeIdx`], and both implement
//! [`GraphLike`] so that the traversals in [`search`] work on either.

use std::{
    fmt::{Display, Formatter},
    hash::Hash,
};

use itertools::Itertools;

use crate::Weight;

mod arena;
pub mod search;
mod unweighted;

pub use arena::{NodeArena, NodeIdx, NodeVec};
pub use unweighted::{Directedness, UnweightedGraph};

/// The capabilities shared by every kind of graph.
pub trait GraphLike {
    type Node: Eq + Hash + Clone;

    fn arena(&self) -> &NodeArena<Self::Node>;

    /// The destinations of the edges leaving `node`, in adjacency order
    fn successors(&self, node: NodeIdx) -> Box<dyn Iterator<Item = NodeIdx> + '_>;

    /// Removes the edge from `from` to `to`, returning `true` if it existed.
    fn remove_edge(&mut self, from: &Self::Node, to: &Self::Node) -> bool;

    /// The destinations of all the edges leaving `node`.  Empty if `node` isn't in the graph.
    fn neighbors(&self, node: &Self::Node) -> Vec<&Self::Node> {
        let arena = self.arena();
        match arena.get(node) {
            Some(idx) => self.successors(idx).map(|i| arena.value(i)).collect(),
            None => Vec::new(),
        }
    }

    /// Every edge which starts or ends at `node`, as `(from, to)` pairs
    fn edges_containing(&self, node: &Self::Node) -> Vec<(&Self::Node, &Self::Node)> {
        let arena = self.arena();
        let Some(target) = arena.get(node) else {
            return Vec::new();
        };
        let mut edges = Vec::new();
        for from in arena.live_indices() {
            for to in self.successors(from) {
                if from == target || to == target {
                    edges.push((arena.value(from), arena.value(to)));
                }
            }
        }
        edges
    }
}

/////////////////////
// EDGES AND PATHS //
/////////////////////

/// A directed edge from one node to another, carrying some weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<N, W> {
    pub from: N,
    pub to: N,
    pub weight: W,
}

impl<N, W> Edge<N, W> {
    pub fn new(from: N, to: N, weight: W) -> Self {
        Self { from, to, weight }
    }

    /// The same edge, but pointing the other way
    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            weight: self.weight,
        }
    }
}

/// A sequence of nodes, each joined to the next by an edge of a [`Graph`].  A `Path` contains at
/// least one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<N, W> {
    nodes: Vec<N>,
    /// `weights[i]` is the weight of the edge from `nodes[i]` to `nodes[i + 1]`
    weights: Vec<W>,
}

impl<N, W: Weight> Path<N, W> {
    /// Creates a `Path` which starts at `start` and contains no edges
    pub fn new(start: N) -> Self {
        Self {
            nodes: vec![start],
            weights: Vec::new(),
        }
    }

    /// Extends this `Path` along an edge of weight `weight` to `node`
    pub fn push(&mut self, node: N, weight: W) {
        self.nodes.push(node);
        self.weights.push(weight);
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn weights(&self) -> &[W] {
        &self.weights
    }

    /// The number of edges in this `Path`
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge<&N, W>> + '_ {
        self.nodes
            .iter()
            .tuple_windows()
            .zip_eq(&self.weights)
            .map(|((from, to), &weight)| Edge::new(from, to, weight))
    }

    /// The smallest weight of any edge in this `Path`, or `None` if it has no edges
    pub fn bottleneck(&self) -> Option<W> {
        self.weights.iter().copied().reduce(W::min_weight)
    }
}

///////////
// GRAPH //
///////////

/// A directed graph with weighted edges.
///
/// There is at most one edge between any ordered pair of nodes, and no edge has weight
/// [`Weight::ZERO`] (inserting a zero-weight edge removes it).  Replacing an edge's weight keeps
/// the edge's position in its adjacency list, so traversal order only depends on the order
/// that edges were first inserted.
///
/// # Example
/// ```
/// use pitch_speller::graph::Graph;
///
/// let mut graph = Graph::new();
/// graph.insert_edge('a', 'b', 3u32);
/// graph.insert_edge('b', 'c', 1);
/// graph.insert_edge('a', 'c', 5);
/// assert_eq!(graph.edge_value(&'a', &'b'), Some(3));
/// assert_eq!(graph.edge_value(&'b', &'a'), None);
///
/// // Zero-weight edges are never stored
/// graph.insert_edge('a', 'c', 0);
/// assert_eq!(graph.edge_value(&'a', &'c'), None);
///
/// let path = graph.shortest_path(&'a', &'c').unwrap();
/// assert_eq!(path.nodes(), &['a', 'b', 'c']);
/// assert_eq!(path.bottleneck(), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct Graph<N, W> {
    nodes: NodeArena<N>,
    /// Outgoing edges of every slot in `nodes` (dead slots have no edges)
    adjacency: NodeVec<Vec<(NodeIdx, W)>>,
}

impl<N: Eq + Hash + Clone, W: Weight> Graph<N, W> {
    pub fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            adjacency: NodeVec::new(),
        }
    }

    /// Creates a graph containing every given edge.  Later edges replace earlier ones between
    /// the same nodes.
    pub fn from_edges(edges: impl IntoIterator<Item = (N, N, W)>) -> Self {
        let mut graph = Self::new();
        for (from, to, weight) in edges {
            graph.insert_edge(from, to, weight);
        }
        graph
    }

    /// Creates a path through `nodes` in which every edge has the same `weight`
    pub fn make_path(nodes: impl IntoIterator<Item = N>, weight: W) -> Self {
        let mut graph = Self::new();
        let mut nodes = nodes.into_iter();
        if let Some(first) = nodes.next() {
            graph.create_node(first.clone());
            let mut last = first;
            for node in nodes {
                graph.insert_edge(last, node.clone(), weight);
                last = node;
            }
        }
        graph
    }

    /// Gives every edge of an [`UnweightedGraph`] the same weight.  Undirected edges become a
    /// pair of directed edges.
    pub fn from_unweighted(graph: &UnweightedGraph<N>, weight: W) -> Self {
        let mut weighted = Self::new();
        for node in graph.nodes() {
            weighted.create_node(node.clone());
        }
        for (from, to) in graph.edges() {
            weighted.insert_edge(from.clone(), to.clone(), weight);
        }
        weighted
    }

    /* NODES */

    /// Ensures that `value` is a node of this graph, returning its index.
    pub fn create_node(&mut self, value: N) -> NodeIdx {
        let (idx, is_new) = self.nodes.intern(value);
        if is_new {
            let adj_idx = self.adjacency.push(Vec::new());
            debug_assert_eq!(adj_idx, idx);
        }
        idx
    }

    /// Removes `value` and every edge which touches it.  Returns `false` if `value` wasn't a node.
    pub fn remove_node(&mut self, value: &N) -> bool {
        let Some(idx) = self.nodes.remove(value) else {
            return false;
        };
        self.adjacency[idx].clear();
        for edges in self.adjacency.iter_mut() {
            edges.retain(|(to, _)| *to != idx);
        }
        true
    }

    pub fn contains(&self, value: &N) -> bool {
        self.nodes.get(value).is_some()
    }

    pub fn node_idx(&self, value: &N) -> Option<NodeIdx> {
        self.nodes.get(value)
    }

    /// All the nodes in this graph, in the order they were added
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.live_values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /* EDGES */

    /// Sets the weight of the edge from `from` to `to`, creating both nodes if needed.  A weight
    /// of zero removes the edge instead (and doesn't create any nodes).
    pub fn insert_edge(&mut self, from: N, to: N, weight: W) {
        if weight.is_zero() {
            self.remove_edge(&from, &to);
            return;
        }
        let from = self.create_node(from);
        let to = self.create_node(to);
        self.set_weight_between(from, to, weight);
    }

    /// Removes the edge from `from` to `to`, returning its weight
    pub fn take_edge(&mut self, from: &N, to: &N) -> Option<W> {
        let from = self.nodes.get(from)?;
        let to = self.nodes.get(to)?;
        let edges = &mut self.adjacency[from];
        let position = edges.iter().position(|(dest, _)| *dest == to)?;
        Some(edges.remove(position).1)
    }

    pub fn edge_value(&self, from: &N, to: &N) -> Option<W> {
        self.weight_between(self.nodes.get(from)?, self.nodes.get(to)?)
    }

    /// Replaces the weight of the edge from `from` to `to` with `f(current_weight)`, where the
    /// current weight is `None` if there's no edge.  As with [`Graph::insert_edge`], a result of
    /// zero removes the edge.
    pub fn update_edge(&mut self, from: N, to: N, f: impl FnOnce(Option<W>) -> W) {
        let current = self.edge_value(&from, &to);
        self.insert_edge(from, to, f(current));
    }

    /// Every edge in this graph, grouped by source node
    pub fn edges(&self) -> impl Iterator<Item = Edge<&N, W>> + '_ {
        self.nodes.live_indices().flat_map(move |from| {
            self.adjacency[from]
                .iter()
                .map(move |&(to, weight)| Edge::new(self.node(from), self.node(to), weight))
        })
    }

    /// The destinations and weights of every edge leaving `from`, in adjacency order
    pub fn edges_from(&self, from: &N) -> impl Iterator<Item = (&N, W)> + '_ {
        self.nodes
            .get(from)
            .map(|idx| &self.adjacency[idx])
            .into_iter()
            .flatten()
            .map(move |&(to, weight)| (self.node(to), weight))
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /* SEARCHING */

    /// The path from `from` to `to` with the fewest edges (see [`search::shortest_path`] for the
    /// tie-breaking rule).
    pub fn shortest_path(&self, from: &N, to: &N) -> Option<Path<N, W>> {
        let indices = search::shortest_path(self, self.nodes.get(from)?, self.nodes.get(to)?)?;
        self.path_from_indices(&indices)
    }

    /// Every node reachable from `from`, in breadth-first discovery order
    pub fn breadth_first_search(&self, from: &N) -> Vec<&N> {
        match self.nodes.get(from) {
            Some(idx) => search::breadth_first_search(self, idx)
                .into_iter()
                .map(|i| self.node(i))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Adds every edge of `path` to this graph, with the weights stored in the path
    pub fn insert_path(&mut self, path: &Path<N, W>) {
        if let Some(first) = path.nodes().first() {
            self.create_node(first.clone());
        }
        for edge in path.edges() {
            self.insert_edge(edge.from.clone(), edge.to.clone(), edge.weight);
        }
    }

    /* TRANSFORMATIONS */

    /// The same graph with the direction of every edge flipped
    pub fn reversed(&self) -> Self {
        self.map_edges(|edge| edge.reversed())
    }

    /// Makes every edge go both ways.  If edges already exist in both directions, both directions
    /// end up with the sum of their weights.
    pub fn undirected(&self) -> Self {
        let mut graph = self.map_edges(|edge| edge);
        for edge in self.edges() {
            graph.update_edge(edge.to.clone(), edge.from.clone(), |w| {
                w.map_or(edge.weight, |w| w + edge.weight)
            });
        }
        // Self-loops got counted twice
        for edge in self.edges().filter(|e| e.from == e.to) {
            graph.insert_edge(edge.from.clone(), edge.to.clone(), edge.weight);
        }
        graph
    }

    /// Renames every node using `f`.  If two nodes are given the same name, they are merged and
    /// later edges (in [`Graph::edges`] order) replace earlier ones.
    pub fn map_nodes<M: Eq + Hash + Clone>(&self, mut f: impl FnMut(&N) -> M) -> Graph<M, W> {
        let mut graph = Graph::new();
        for idx in self.nodes.live_indices() {
            graph.create_node(f(self.node(idx)));
        }
        for edge in self.edges() {
            graph.insert_edge(f(edge.from), f(edge.to), edge.weight);
        }
        graph
    }

    /* HELPERS */

    fn map_edges(&self, f: impl Fn(Edge<N, W>) -> Edge<N, W>) -> Self {
        let mut graph = Self::new();
        for node in self.nodes() {
            graph.create_node(node.clone());
        }
        for edge in self.edges() {
            let edge = f(Edge::new(edge.from.clone(), edge.to.clone(), edge.weight));
            graph.insert_edge(edge.from, edge.to, edge.weight);
        }
        graph
    }

    fn path_from_indices(&self, indices: &[NodeIdx]) -> Option<Path<N, W>> {
        let (&first, rest) = indices.split_first()?;
        let mut path = Path::new(self.node(first).clone());
        let mut last = first;
        for &idx in rest {
            path.push(self.node(idx).clone(), self.weight_between(last, idx)?);
            last = idx;
        }
        Some(path)
    }
}

/* INDEX-BASED ACCESS */

impl<N, W: Weight> Graph<N, W> {
    #[inline]
    pub fn node(&self, idx: NodeIdx) -> &N {
        self.nodes.value(idx)
    }

    pub(crate) fn weight_between(&self, from: NodeIdx, to: NodeIdx) -> Option<W> {
        self.adjacency[from]
            .iter()
            .find(|(dest, _)| *dest == to)
            .map(|&(_, weight)| weight)
    }

    /// Sets the weight between two live nodes, removing the edge if `weight` is zero
    pub(crate) fn set_weight_between(&mut self, from: NodeIdx, to: NodeIdx, weight: W) {
        let edges = &mut self.adjacency[from];
        let position = edges.iter().position(|(dest, _)| *dest == to);
        match (position, weight.is_zero()) {
            (Some(pos), false) => edges[pos].1 = weight,
            (Some(pos), true) => {
                edges.remove(pos);
            }
            (None, false) => edges.push((to, weight)),
            (None, true) => {}
        }
    }
}

impl<N: Eq + Hash + Clone, W: Weight> GraphLike for Graph<N, W> {
    type Node = N;

    fn arena(&self) -> &NodeArena<N> {
        &self.nodes
    }

    fn successors(&self, node: NodeIdx) -> Box<dyn Iterator<Item = NodeIdx> + '_> {
        Box::new(self.adjacency[node].iter().map(|(to, _)| *to))
    }

    fn remove_edge(&mut self, from: &N, to: &N) -> bool {
        self.take_edge(from, to).is_some()
    }
}

impl<N: Eq + Hash + Clone, W: Weight> Default for Graph<N, W> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two graphs are equal if they have the same nodes and the same weighted edges, regardless of
/// the order in which they were added.
impl<N: Eq + Hash + Clone, W: Weight> PartialEq for Graph<N, W> {
    fn eq(&self, other: &Self) -> bool {
        self.node_count() == other.node_count()
            && self.edge_count() == other.edge_count()
            && self.nodes().all(|n| other.contains(n))
            && self
                .edges()
                .all(|e| other.edge_value(e.from, e.to) == Some(e.weight))
    }
}

impl<N: Eq + Hash + Clone + Display, W: Weight + Display> Display for Graph<N, W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for node in self.nodes() {
            write!(f, "{}:", node)?;
            for (to, weight) in self.edges_from(node) {
                write!(f, " {}({})", to, weight)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn diamond() -> Graph<char, u32> {
        Graph::from_edges([
            ('s', 'a', 3),
            ('s', 'b', 2),
            ('a', 't', 1),
            ('b', 't', 4),
        ])
    }

    #[test]
    fn insert_and_remove_edges() {
        let mut graph = Graph::new();
        graph.insert_edge(1, 2, 5u32);
        graph.insert_edge(1, 3, 2);
        graph.insert_edge(1, 2, 7); // replaces
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge_value(&1, &2), Some(7));
        // Replacing keeps the edge's position
        assert_eq!(graph.neighbors(&1), vec![&2, &3]);

        assert_eq!(graph.take_edge(&1, &2), Some(7));
        assert_eq!(graph.take_edge(&1, &2), None);
        assert!(!graph.remove_edge(&1, &2));
        assert!(graph.remove_edge(&1, &3));
        assert_eq!(graph.edge_count(), 0);
        // Nodes stay after their edges are removed
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn zero_weight_doesnt_create_nodes() {
        let mut graph = Graph::<char, i32>::new();
        graph.insert_edge('x', 'y', 0);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_value(&'x', &'y'), None);
    }

    #[test]
    fn update_edge() {
        let mut graph = diamond();
        graph.update_edge('s', 'a', |w| w.unwrap_or(0) + 1);
        graph.update_edge('a', 's', |w| w.unwrap_or(0) + 1);
        graph.update_edge('b', 't', |w| w.unwrap_or(0) - 4);
        assert_eq!(graph.edge_value(&'s', &'a'), Some(4));
        assert_eq!(graph.edge_value(&'a', &'s'), Some(1));
        assert_eq!(graph.edge_value(&'b', &'t'), None);
    }

    #[test]
    fn remove_node() {
        let mut graph = diamond();
        assert!(graph.remove_node(&'a'));
        assert!(!graph.remove_node(&'a'));
        assert!(!graph.contains(&'a'));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edges_containing(&'s'), vec![(&'s', &'b')]);
        assert_eq!(graph.shortest_path(&'s', &'t').unwrap().nodes(), &['s', 'b', 't']);
        // Other node handles are unaffected
        assert_eq!(graph.node(graph.node_idx(&'t').unwrap()), &'t');
    }

    #[test]
    fn shortest_path_tie_break() {
        // Both paths have length 2; `a` was inserted first so its path is discovered first
        let graph = diamond();
        let path = graph.shortest_path(&'s', &'t').unwrap();
        assert_eq!(path.nodes(), &['s', 'a', 't']);
        assert_eq!(path.weights(), &[3, 1]);
        assert_eq!(path.len(), 2);
        assert_eq!(path.bottleneck(), Some(1));

        assert_eq!(graph.shortest_path(&'t', &'s'), None);
        assert_eq!(graph.shortest_path(&'s', &'z'), None);
        let trivial = graph.shortest_path(&'s', &'s').unwrap();
        assert!(trivial.is_empty());
        assert_eq!(trivial.bottleneck(), None);
    }

    #[test]
    fn bfs_order() {
        let mut graph = diamond();
        graph.insert_edge('t', 's', 1);
        graph.insert_edge('t', 'u', 1);
        assert_eq!(graph.breadth_first_search(&'s'), vec![&'s', &'a', &'b', &'t', &'u']);
        assert_eq!(graph.breadth_first_search(&'u'), vec![&'u']);
        assert!(graph.breadth_first_search(&'z').is_empty());
    }

    #[test]
    fn paths() {
        let graph = Graph::make_path(['p', 'q', 'r'], 2u32);
        assert_eq!(graph.edge_count(), 2);
        let path = graph.shortest_path(&'p', &'r').unwrap();

        let mut other = Graph::new();
        other.insert_path(&path);
        assert_eq!(graph, other);
        assert_eq!(Graph::<char, u32>::make_path(['p'], 2).node_count(), 1);
    }

    #[test]
    fn transformations() {
        let graph = Graph::from_edges([(1, 2, 3u32), (2, 1, 1), (2, 3, 5)]);

        let reversed = graph.reversed();
        assert_eq!(reversed.edge_value(&3, &2), Some(5));
        assert_eq!(reversed.edge_value(&2, &3), None);
        assert_eq!(reversed.reversed(), graph);

        let undirected = graph.undirected();
        assert_eq!(undirected.edge_value(&1, &2), Some(4));
        assert_eq!(undirected.edge_value(&2, &1), Some(4));
        assert_eq!(undirected.edge_value(&3, &2), Some(5));
        assert_eq!(undirected.edge_count(), 4);

        let merged = graph.map_nodes(|n| n % 2);
        assert_eq!(merged.node_count(), 2);
        assert_eq!(merged.edge_value(&1, &0), Some(3));
        assert_eq!(merged.edge_value(&0, &1), Some(5));
    }

    #[test]
    fn display() {
        let graph = Graph::from_edges([('a', 'b', 1u32), ('a', 'c', 2)]);
        assert_eq!(graph.to_string(), "a: b(1) c(2)\nb:\nc:\n");
    }

    #[quickcheck]
    fn zero_weight_elimination(ops: Vec<(u8, u8, u8)>) -> bool {
        let mut graph = Graph::new();
        for (from, to, weight) in ops {
            // Lots of zeros, so that removals are common
            graph.insert_edge(from % 8, to % 8, (weight % 4) as u32);
        }
        let no_zeros = graph.edges().all(|e| e.weight != 0);
        no_zeros
    }

    #[quickcheck]
    fn shortest_paths_are_valid(edges: Vec<(u8, u8)>) -> bool {
        let graph = Graph::from_edges(edges.into_iter().map(|(a, b)| (a % 10, b % 10, 1u32)));
        let bfs = graph.breadth_first_search(&0);
        (0..10).all(|target| match graph.shortest_path(&0, &target) {
            Some(path) => {
                bfs.contains(&&target)
                    && path.edges().all(|e| graph.edge_value(e.from, e.to).is_some())
                    && path.nodes().iter().all_unique()
            }
            None => !bfs.contains(&&target),
        })
    }
}
