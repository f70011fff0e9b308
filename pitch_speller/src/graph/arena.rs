use std::{collections::HashMap, hash::Hash};

use bit_vec::BitVec;

index_vec::define_index_type! { pub struct NodeIdx = usize; }
pub type NodeVec<T> = index_vec::IndexVec<NodeIdx, T>;

/// Interns node values into [`NodeIdx`] handles.  Removing a node only kills its slot, so the
/// handles of all other nodes stay valid.  A removed value which gets re-added is given a fresh
/// slot.
#[derive(Debug, Clone)]
pub struct NodeArena<N> {
    values: NodeVec<N>,
    /// Which slots in `values` contain nodes which haven't been removed
    live: BitVec,
    /// Maps every live node value to its slot
    indices: HashMap<N, NodeIdx>,
}

impl<N> NodeArena<N> {
    pub fn new() -> Self {
        Self {
            values: NodeVec::new(),
            live: BitVec::new(),
            indices: HashMap::new(),
        }
    }

    /// The value stored in a given slot.  Removed nodes keep their values.
    #[inline]
    pub fn value(&self, idx: NodeIdx) -> &N {
        &self.values[idx]
    }

    #[inline]
    pub fn is_live(&self, idx: NodeIdx) -> bool {
        self.live.get(idx.index()).unwrap_or(false)
    }

    /// The number of live nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The number of slots (live or dead).  Every [`NodeIdx`] created by this arena is less than
    /// this.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.values.len()
    }

    /// The slots of all the live nodes, in the order they were created
    pub fn live_indices(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.values.indices().filter(|idx| self.is_live(*idx))
    }

    /// The values of all the live nodes, in the order they were created
    pub fn live_values(&self) -> impl Iterator<Item = &N> + '_ {
        self.live_indices().map(|idx| self.value(idx))
    }
}

impl<N: Eq + Hash + Clone> NodeArena<N> {
    /// Gets the slot of `value`, creating it if `value` isn't live.  Returns `true` if a new slot
    /// was created.
    pub fn intern(&mut self, value: N) -> (NodeIdx, bool) {
        if let Some(&idx) = self.indices.get(&value) {
            return (idx, false);
        }
        let idx = self.values.push(value.clone());
        self.live.push(true);
        self.indices.insert(value, idx);
        (idx, true)
    }

    pub fn get(&self, value: &N) -> Option<NodeIdx> {
        self.indices.get(value).copied()
    }

    /// Kills the slot of `value`, returning its index if it was live
    pub fn remove(&mut self, value: &N) -> Option<NodeIdx> {
        let idx = self.indices.remove(value)?;
        self.live.set(idx.index(), false);
        Some(idx)
    }
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_and_remove() {
        let mut arena = NodeArena::new();
        let (a, new_a) = arena.intern('a');
        let (b, new_b) = arena.intern('b');
        assert!(new_a && new_b);
        assert_eq!(arena.intern('a'), (a, false));
        assert_eq!(arena.len(), 2);

        assert_eq!(arena.remove(&'a'), Some(a));
        assert_eq!(arena.remove(&'a'), None);
        assert!(!arena.is_live(a));
        assert!(arena.is_live(b));
        assert_eq!(arena.live_values().collect::<Vec<_>>(), vec![&'b']);

        // Re-adding a removed node gives it a new slot, leaving `b` untouched
        let (a2, new_a2) = arena.intern('a');
        assert!(new_a2);
        assert_ne!(a, a2);
        assert_eq!(arena.get(&'b'), Some(b));
        assert_eq!(arena.num_slots(), 3);
        assert_eq!(arena.len(), 2);
    }
}
