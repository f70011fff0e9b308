use std::hash::Hash;

use super::{GraphLike, NodeArena, NodeIdx, NodeVec};
use crate::scheme::UnweightedScheme;

/// Whether the edges of an [`UnweightedGraph`] have a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directedness {
    Directed,
    /// Every edge is stored in both directions
    Undirected,
}

/// A graph whose edges have no weights; an edge is either present or not.
#[derive(Debug, Clone)]
pub struct UnweightedGraph<N> {
    nodes: NodeArena<N>,
    adjacency: NodeVec<Vec<NodeIdx>>,
    directedness: Directedness,
}

impl<N: Eq + Hash + Clone> UnweightedGraph<N> {
    pub fn new(directedness: Directedness) -> Self {
        Self {
            nodes: NodeArena::new(),
            adjacency: NodeVec::new(),
            directedness,
        }
    }

    /// Creates the directed graph over `nodes` which contains exactly the edges accepted by
    /// `scheme` (including self-loops, if `scheme` accepts them).
    ///
    /// # Example
    /// ```
    /// use pitch_speller::{graph::UnweightedGraph, UnweightedScheme};
    ///
    /// let less_than = UnweightedScheme::new(|a: &u8, b: &u8| a < b);
    /// let graph = UnweightedGraph::from_scheme(0..4, &less_than);
    /// assert_eq!(graph.edges().count(), 6);
    /// assert!(graph.contains_edge(&0, &3));
    /// assert!(!graph.contains_edge(&3, &0));
    /// ```
    pub fn from_scheme(nodes: impl IntoIterator<Item = N>, scheme: &UnweightedScheme<N>) -> Self
    where
        N: 'static,
    {
        let mut graph = Self::new(Directedness::Directed);
        for node in nodes {
            graph.create_node(node);
        }
        let indices = graph.nodes.live_indices().collect::<Vec<_>>();
        for &from in &indices {
            for &to in &indices {
                if scheme.contains(graph.nodes.value(from), graph.nodes.value(to)) {
                    graph.adjacency[from].push(to);
                }
            }
        }
        graph
    }

    pub fn directedness(&self) -> Directedness {
        self.directedness
    }

    pub fn create_node(&mut self, value: N) -> NodeIdx {
        let (idx, is_new) = self.nodes.intern(value);
        if is_new {
            self.adjacency.push(Vec::new());
        }
        idx
    }

    pub fn insert_edge(&mut self, from: N, to: N) {
        let from = self.create_node(from);
        let to = self.create_node(to);
        self.link(from, to);
        if self.directedness == Directedness::Undirected {
            self.link(to, from);
        }
    }

    pub fn contains_edge(&self, from: &N, to: &N) -> bool {
        match (self.nodes.get(from), self.nodes.get(to)) {
            (Some(from), Some(to)) => self.adjacency[from].contains(&to),
            _ => false,
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.live_values()
    }

    /// Every stored edge.  Undirected edges appear once in each direction.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.nodes.live_indices().flat_map(move |from| {
            self.adjacency[from]
                .iter()
                .map(move |&to| (self.nodes.value(from), self.nodes.value(to)))
        })
    }

    fn link(&mut self, from: NodeIdx, to: NodeIdx) {
        if !self.adjacency[from].contains(&to) {
            self.adjacency[from].push(to);
        }
    }

    fn unlink(&mut self, from: NodeIdx, to: NodeIdx) -> bool {
        let edges = &mut self.adjacency[from];
        let len_before = edges.len();
        edges.retain(|dest| *dest != to);
        edges.len() != len_before
    }
}

impl<N: Eq + Hash + Clone> GraphLike for UnweightedGraph<N> {
    type Node = N;

    fn arena(&self) -> &NodeArena<N> {
        &self.nodes
    }

    fn successors(&self, node: NodeIdx) -> Box<dyn Iterator<Item = NodeIdx> + '_> {
        Box::new(self.adjacency[node].iter().copied())
    }

    fn remove_edge(&mut self, from: &N, to: &N) -> bool {
        let (Some(from), Some(to)) = (self.nodes.get(from), self.nodes.get(to)) else {
            return false;
        };
        let removed = self.unlink(from, to);
        if self.directedness == Directedness::Undirected {
            self.unlink(to, from);
        }
        removed
    }
}
