//! Breadth-first traversals shared by every [`GraphLike`] graph.
//!
//! The frontier is FIFO and each node's successors are visited in adjacency order, so the
//! traversal order (and therefore which of several equally short paths gets returned) is fully
//! determined by the order that edges were inserted.  The max-flow solver relies on this to pick
//! its augmenting paths deterministically.

use std::collections::VecDeque;

use bit_vec::BitVec;

use super::{GraphLike, NodeIdx, NodeVec};

/// Every node reachable from `start` (including `start` itself), in the order they are
/// discovered.  Returns an empty `Vec` if `start` isn't a live node.
pub fn breadth_first_search<G: GraphLike + ?Sized>(graph: &G, start: NodeIdx) -> Vec<NodeIdx> {
    let arena = graph.arena();
    if !arena.is_live(start) {
        return Vec::new();
    }

    let mut visited = BitVec::from_elem(arena.num_slots(), false);
    let mut frontier = VecDeque::new();
    let mut order = Vec::new();

    visited.set(start.index(), true);
    frontier.push_back(start);
    while let Some(node) = frontier.pop_front() {
        order.push(node);
        for succ in graph.successors(node) {
            if !visited[succ.index()] {
                visited.set(succ.index(), true);
                frontier.push_back(succ);
            }
        }
    }
    order
}

/// The path from `from` to `to` with the fewest edges, or `None` if `to` isn't reachable.  Of
/// the shortest paths, the one whose last node is discovered first is returned.
pub fn shortest_path<G: GraphLike + ?Sized>(
    graph: &G,
    from: NodeIdx,
    to: NodeIdx,
) -> Option<Vec<NodeIdx>> {
    let arena = graph.arena();
    if !arena.is_live(from) || !arena.is_live(to) {
        return None;
    }
    if from == to {
        return Some(vec![from]);
    }

    // `predecessors[n]` is the node from which `n` was discovered.  This also doubles as the
    // 'visited' set, except for `from`
    let mut predecessors = NodeVec::<Option<NodeIdx>>::from_vec(vec![None; arena.num_slots()]);
    let mut frontier = VecDeque::new();
    frontier.push_back(from);

    'search: while let Some(node) = frontier.pop_front() {
        for succ in graph.successors(node) {
            if succ == from || predecessors[succ].is_some() {
                continue;
            }
            predecessors[succ] = Some(node);
            if succ == to {
                break 'search;
            }
            frontier.push_back(succ);
        }
    }

    // Walk back from `to` to reconstruct the path
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        current = predecessors[current]?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    type StrGraph = Graph<&'static str, u32>;

    fn path(graph: &StrGraph, from: &'static str, to: &'static str) -> Option<Vec<&'static str>> {
        let from = graph.node_idx(&from)?;
        let to = graph.node_idx(&to)?;
        let path = shortest_path(graph, from, to)?;
        Some(path.into_iter().map(|idx| *graph.node(idx)).collect())
    }

    #[test]
    fn first_discovered_path() {
        let mut graph = StrGraph::from_edges([
            ("s", "a", 1),
            ("s", "b", 1),
            ("a", "t", 1),
            ("b", "t", 1),
        ]);
        assert_eq!(path(&graph, "s", "t"), Some(vec!["s", "a", "t"]));
        assert_eq!(path(&graph, "s", "s"), Some(vec!["s"]));
        assert_eq!(path(&graph, "t", "s"), None);

        graph.remove_node(&"a");
        assert_eq!(path(&graph, "s", "t"), Some(vec!["s", "b", "t"]));
    }

    #[test]
    fn removed_slots() {
        let mut graph = StrGraph::make_path(["s", "a", "b", "t"], 1);
        graph.remove_node(&"a");
        graph.remove_node(&"b");
        assert_eq!(path(&graph, "s", "t"), None);

        // `a` comes back in a fresh slot, past every slot the arena had before
        graph.insert_edge("s", "a", 1);
        graph.insert_edge("a", "t", 1);
        assert_eq!(graph.node_idx(&"a").map(NodeIdx::index), Some(4));
        assert_eq!(path(&graph, "s", "t"), Some(vec!["s", "a", "t"]));

        let s = graph.node_idx(&"s").unwrap();
        let order = breadth_first_search(&graph, s);
        assert_eq!(order.len(), 3);
        assert!(breadth_first_search(&graph, NodeIdx::new(1)).is_empty());
    }
}
