mod placement;
mod record;

pub use placement::*;
pub use record::*;

use serde::{Deserialize, Serialize};

use crate::{LogicalObjectId, MirroredObjectId};

/// An instruction argument: a logical object together with its placement.
///
/// An `Operand` is built once by the instruction builder and resolved many times during
/// dispatch. Resolution only needs the parallel id of the context running the instruction, so
/// instructions never have to know the full placement topology.
///
/// # Example
///
/// ```rust
/// use burn_vm::{LogicalObjectId, Operand};
///
/// let weights = Operand::fixed(LogicalObjectId::new(42), 3);
/// let activations = Operand::mirrored(LogicalObjectId::new(43));
///
/// // Every context reads the weights held by rank 3...
/// assert_eq!(weights.get_parallel_id(0), 3);
/// // ...while each context reads its own activations.
/// assert_eq!(activations.get_parallel_id(5), 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "OperandRecord", into = "OperandRecord")]
pub struct Operand {
    logical_object_id: LogicalObjectId,
    placement: Placement,
}

impl Operand {
    /// Creates an operand referring to `logical_object_id` with the given placement.
    pub fn new(logical_object_id: LogicalObjectId, placement: Placement) -> Self {
        if let Placement::Fixed(parallel_id) = placement {
            debug_assert!(
                parallel_id >= 0,
                "Parallel id must be non-negative, got {parallel_id}"
            );
        }

        Self {
            logical_object_id,
            placement,
        }
    }

    /// Creates an operand whose single instance lives at `parallel_id`.
    pub fn fixed(logical_object_id: LogicalObjectId, parallel_id: i64) -> Self {
        Self::new(logical_object_id, Placement::Fixed(parallel_id))
    }

    /// Creates an operand with one independent instance per parallel id.
    pub fn mirrored(logical_object_id: LogicalObjectId) -> Self {
        Self::new(logical_object_id, Placement::Mirrored)
    }

    /// Creates an operand broadcast to every parallel id.
    pub fn all(logical_object_id: LogicalObjectId) -> Self {
        Self::new(logical_object_id, Placement::All)
    }

    /// The referenced logical object.
    pub fn logical_object_id(&self) -> LogicalObjectId {
        self.logical_object_id
    }

    /// The placement of the referenced object.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Returns the parallel id of the instance a context with `parallel_id` must use.
    ///
    /// A fixed operand always answers with its stored parallel id. Mirrored and broadcast operands
    /// answer with the requesting id: the two only differ in how their instances were created.
    pub fn get_parallel_id(&self, parallel_id: i64) -> i64 {
        debug_assert!(
            parallel_id >= 0,
            "Parallel id must be non-negative, got {parallel_id}"
        );

        match self.placement {
            Placement::Fixed(fixed_parallel_id) => fixed_parallel_id,
            Placement::Mirrored | Placement::All => parallel_id,
        }
    }

    /// Returns the key of the instance a context with `parallel_id` must use.
    pub fn mirrored_object_id(&self, parallel_id: i64) -> MirroredObjectId {
        MirroredObjectId::new(
            self.logical_object_id.value(),
            self.get_parallel_id(parallel_id),
        )
    }
}
