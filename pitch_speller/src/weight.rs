//! Edge weights (i.e. capacities) of graphs and flow networks.

use std::{
    fmt::Debug,
    ops::{Add, Mul, Sub},
};

use ordered_float::OrderedFloat;

/// The weight of an edge in a [`Graph`](crate::graph::Graph) or a
/// [`FlowNetwork`](crate::FlowNetwork).
///
/// Weights are assumed to be non-negative and finite.  An edge with weight [`Weight::ZERO`] is
/// never stored: inserting such an edge removes it instead.
pub trait Weight:
    Copy
    + Debug
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;

    #[inline]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// The smaller of `self` and `other`.  Incomparable values (e.g. `NaN`s) resolve to `self`.
    #[inline]
    fn min_weight(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }
}

macro_rules! impl_weight {
    ($($ty: ty => $zero: expr),* $(,)?) => {
        $(
            impl Weight for $ty {
                const ZERO: Self = $zero;
            }
        )*
    };
}

impl_weight!(
    f32 => 0.0,
    f64 => 0.0,
    i32 => 0,
    i64 => 0,
    u32 => 0,
    u64 => 0,
    usize => 0,
    OrderedFloat<f32> => OrderedFloat(0.0),
    OrderedFloat<f64> => OrderedFloat(0.0),
);

/// Sums a sequence of weights, starting from [`Weight::ZERO`].
pub(crate) fn total<W: Weight>(weights: impl IntoIterator<Item = W>) -> W {
    weights.into_iter().fold(W::ZERO, |acc, w| acc + w)
}
