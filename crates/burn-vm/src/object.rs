use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a logical object (a tensor, a buffer, ...) independently of where its physical
/// instances live.
///
/// The value is minted elsewhere and is unique within the process for the lifetime of the object
/// it names. It is a plain identifier: copying it never copies or retains the object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicalObjectId(i64);

impl LogicalObjectId {
    /// Wraps an already minted identifier value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw identifier value.
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for LogicalObjectId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for LogicalObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fully resolved key of one physical instance of a logical object.
///
/// A `MirroredObjectId` pairs the logical object value with the concrete parallel id holding the
/// instance. It is produced once an [`Operand`](crate::Operand) has been resolved against the
/// requesting execution context, and is used to look the instance up in an
/// [`ObjectTable`](crate::ObjectTable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MirroredObjectId {
    logical_object_id_value: i64,
    parallel_id: i64,
}

impl MirroredObjectId {
    /// Builds the key for the instance of `logical_object_id_value` living at `parallel_id`.
    ///
    /// `parallel_id` must be non-negative. This is only checked in debug builds.
    pub fn new(logical_object_id_value: i64, parallel_id: i64) -> Self {
        debug_assert!(
            parallel_id >= 0,
            "Parallel id must be non-negative, got {parallel_id}"
        );

        Self {
            logical_object_id_value,
            parallel_id,
        }
    }

    /// The raw value of the logical object this instance belongs to.
    pub fn logical_object_id_value(&self) -> i64 {
        self.logical_object_id_value
    }

    /// The logical object this instance belongs to.
    pub fn logical_object_id(&self) -> LogicalObjectId {
        LogicalObjectId::new(self.logical_object_id_value)
    }

    /// The parallel id holding the instance.
    pub fn parallel_id(&self) -> i64 {
        self.parallel_id
    }
}

impl fmt::Display for MirroredObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.logical_object_id_value, self.parallel_id)
    }
}
