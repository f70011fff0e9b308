//! Lazily evaluated descriptions of graphs.
//!
//! A scheme is a pure function from an ordered pair of nodes to either presence (an
//! [`UnweightedScheme`]) or an optional weight (a [`WeightedScheme`]).  No adjacency is ever
//! stored, so schemes can be combined freely and then used to build or
//! [mask](crate::FlowNetwork::mask) concrete graphs.
//!
//! ```
//! use pitch_speller::UnweightedScheme;
//!
//! let increasing = UnweightedScheme::new(|a: &i32, b: &i32| a < b);
//! let adjacent = UnweightedScheme::new(|a: &i32, b: &i32| (a - b).abs() == 1);
//!
//! let step_up = increasing.clone() * adjacent.clone();
//! assert!(step_up.contains(&3, &4));
//! assert!(!step_up.contains(&4, &3));
//!
//! let either = increasing + adjacent;
//! assert!(either.contains(&4, &3));
//! assert!(!either.contains(&4, &2));
//!
//! // Compare numbers by their absolute values
//! let abs = step_up.pullback(|n: &i32| n.abs());
//! assert!(abs.contains(&-3, &4));
//!
//! let weighted = 2.5f64 * abs;
//! assert_eq!(weighted.weight(&-3, &-4), Some(2.5));
//! assert_eq!(weighted.weight(&-3, &-5), None);
//! ```

use std::{
    ops::{Add, Mul, Not},
    sync::Arc,
};

use ordered_float::OrderedFloat;

use crate::Weight;

type Predicate<N> = dyn Fn(&N, &N) -> bool + Send + Sync;
type WeightFn<N, W> = dyn Fn(&N, &N) -> Option<W> + Send + Sync;

/// Describes which (directed) edges are present in a graph over nodes of type `N`
pub struct UnweightedScheme<N> {
    contains: Arc<Predicate<N>>,
}

impl<N: 'static> UnweightedScheme<N> {
    pub fn new(contains: impl Fn(&N, &N) -> bool + Send + Sync + 'static) -> Self {
        Self {
            contains: Arc::new(contains),
        }
    }

    /// The scheme which contains every edge (including self-loops)
    pub fn complete() -> Self {
        Self::new(|_, _| true)
    }

    /// The scheme which contains no edges
    pub fn empty() -> Self {
        Self::new(|_, _| false)
    }

    #[inline]
    pub fn contains(&self, from: &N, to: &N) -> bool {
        (self.contains)(from, to)
    }

    /// Contains an edge if `self` contains it in either direction
    pub fn undirected(&self) -> Self {
        let inner = self.clone();
        Self::new(move |a, b| inner.contains(a, b) || inner.contains(b, a))
    }

    /// Contains the edges which both `self` and `other` contain.  `other` isn't evaluated for
    /// edges which `self` doesn't contain.
    pub fn and(&self, other: &Self) -> Self {
        let (lhs, rhs) = (self.clone(), other.clone());
        Self::new(move |a, b| lhs.contains(a, b) && rhs.contains(a, b))
    }

    /// Contains the edges which either `self` or `other` contain.  `other` isn't evaluated for
    /// edges which `self` contains.
    pub fn or(&self, other: &Self) -> Self {
        let (lhs, rhs) = (self.clone(), other.clone());
        Self::new(move |a, b| lhs.contains(a, b) || rhs.contains(a, b))
    }

    /// Contains exactly the edges which `self` doesn't
    pub fn complement(&self) -> Self {
        let inner = self.clone();
        Self::new(move |a, b| !inner.contains(a, b))
    }

    /// Creates a scheme over nodes of type `M`, which contains `a -> b` if and only if `self`
    /// contains `f(a) -> f(b)`.
    pub fn pullback<M: 'static>(
        &self,
        f: impl Fn(&M) -> N + Send + Sync + 'static,
    ) -> UnweightedScheme<M> {
        let inner = self.clone();
        UnweightedScheme::new(move |a, b| inner.contains(&f(a), &f(b)))
    }

    /// Gives every edge of this scheme the same `weight`
    pub fn scale<W: Weight>(&self, weight: W) -> WeightedScheme<N, W> {
        let inner = self.clone();
        WeightedScheme::new(move |a, b| inner.contains(a, b).then_some(weight))
    }
}

impl<N> Clone for UnweightedScheme<N> {
    fn clone(&self) -> Self {
        Self {
            contains: self.contains.clone(),
        }
    }
}

impl<N> std::fmt::Debug for UnweightedScheme<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnweightedScheme").finish_non_exhaustive()
    }
}

/// Describes the weight (if any) of every edge in a graph over nodes of type `N`
pub struct WeightedScheme<N, W> {
    weight: Arc<WeightFn<N, W>>,
}

impl<N: 'static, W: Weight> WeightedScheme<N, W> {
    pub fn new(weight: impl Fn(&N, &N) -> Option<W> + Send + Sync + 'static) -> Self {
        Self {
            weight: Arc::new(weight),
        }
    }

    /// The weight of the edge `from -> to`, or `None` if this scheme doesn't contain it
    #[inline]
    pub fn weight(&self, from: &N, to: &N) -> Option<W> {
        (self.weight)(from, to)
    }

    /// Creates a scheme over nodes of type `M`, which gives `a -> b` the weight that `self` gives
    /// `f(a) -> f(b)`.
    pub fn pullback<M: 'static>(
        &self,
        f: impl Fn(&M) -> N + Send + Sync + 'static,
    ) -> WeightedScheme<M, W> {
        let inner = self.clone();
        WeightedScheme::new(move |a, b| inner.weight(&f(a), &f(b)))
    }

    /// Contains the edges which either scheme contains.  Edges in both schemes get the sum of the
    /// two weights.
    pub fn plus(&self, other: &Self) -> Self {
        let (lhs, rhs) = (self.clone(), other.clone());
        Self::new(move |a, b| match (lhs.weight(a, b), rhs.weight(a, b)) {
            (Some(w1), Some(w2)) => Some(w1 + w2),
            (w, None) | (None, w) => w,
        })
    }

    /// Keeps only the edges which `mask` contains
    pub fn masked(&self, mask: &UnweightedScheme<N>) -> Self {
        let (inner, mask) = (self.clone(), mask.clone());
        Self::new(move |a, b| {
            if mask.contains(a, b) {
                inner.weight(a, b)
            } else {
                None
            }
        })
    }
}

impl<N, W> Clone for WeightedScheme<N, W> {
    fn clone(&self) -> Self {
        Self {
            weight: self.weight.clone(),
        }
    }
}

impl<N, W> std::fmt::Debug for WeightedScheme<N, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightedScheme").finish_non_exhaustive()
    }
}

///////////////
// OPERATORS //
///////////////

impl<N: 'static> Mul for UnweightedScheme<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.and(&rhs)
    }
}

impl<N: 'static> Add for UnweightedScheme<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.or(&rhs)
    }
}

impl<N: 'static> Not for UnweightedScheme<N> {
    type Output = Self;

    fn not(self) -> Self {
        self.complement()
    }
}

impl<N: 'static, W: Weight> Add for WeightedScheme<N, W> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.plus(&rhs)
    }
}

impl<N: 'static, W: Weight> Mul<UnweightedScheme<N>> for WeightedScheme<N, W> {
    type Output = Self;

    fn mul(self, rhs: UnweightedScheme<N>) -> Self {
        self.masked(&rhs)
    }
}

/// Implements `weight * scheme` for every concrete weight type
macro_rules! impl_scalar_mul {
    ($($ty: ty),*) => {
        $(
            impl<N: 'static> Mul<UnweightedScheme<N>> for $ty {
                type Output = WeightedScheme<N, $ty>;

                fn mul(self, rhs: UnweightedScheme<N>) -> Self::Output {
                    rhs.scale(self)
                }
            }
        )*
    };
}

impl_scalar_mul!(
    f32,
    f64,
    i32,
    i64,
    u32,
    u64,
    usize,
    OrderedFloat<f32>,
    OrderedFloat<f64>
);
