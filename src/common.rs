use std::fmt::Debug;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use num_traits::{Bounded, CheckedAdd};

pub trait Label: Ord + Clone + Debug {}
impl<T> Label for T where T: Ord + Clone + Debug {}

/// Numeric type carried on edges. `Default::default()` is the zero capacity.
pub trait Capacity:
    Copy
    + Ord
    + Default
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + AddAssign
    + SubAssign
    + CheckedAdd
    + Bounded
{
}
impl<C> Capacity for C where
    C: Copy
        + Ord
        + Default
        + Debug
        + Add<Output = C>
        + Sub<Output = C>
        + AddAssign
        + SubAssign
        + CheckedAdd
        + Bounded
{
}

/// Handle issued by the vertex store when a vertex is created. Stable for the
/// lifetime of the store (until `clear`).
pub type VertexId = usize;

/// The residual graph no longer matches the augmenting path that was found for it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MissingEdgeError {
    #[error("no residual edge from vertex {from} to vertex {to} on the augmenting path")]
    Residual { from: VertexId, to: VertexId },

    #[error("augmenting path breaks at vertex {at} before reaching the source")]
    BrokenPath { at: VertexId },
}

pub type Result<T> = std::result::Result<T, MissingEdgeError>;

pub(crate) fn zero<C: Capacity>() -> C {
    C::default()
}
