use crate::{MirroredObjectId, Operand};

/// The execution context an instruction is dispatched to.
///
/// Holds the parallel id of the context among the `parallel_num` cooperating contexts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParallelContext {
    parallel_id: i64,
    parallel_num: i64,
}

impl ParallelContext {
    /// Creates the context of rank `parallel_id` out of `parallel_num` ranks.
    ///
    /// Callers must ensure `0 <= parallel_id < parallel_num`; this is only checked in debug builds.
    /// Use [`ParallelDesc::context`](crate::parallel::ParallelDesc::context) for a checked
    /// construction.
    pub fn new(parallel_id: i64, parallel_num: i64) -> Self {
        debug_assert!(
            (0..parallel_num).contains(&parallel_id),
            "Parallel id {parallel_id} is out of range for {parallel_num} contexts"
        );

        Self {
            parallel_id,
            parallel_num,
        }
    }

    /// The parallel id of this context.
    pub fn parallel_id(&self) -> i64 {
        self.parallel_id
    }

    /// The number of cooperating contexts.
    pub fn parallel_num(&self) -> i64 {
        self.parallel_num
    }

    /// Resolves `operand` to the key of the instance this context must use.
    pub fn resolve(&self, operand: &Operand) -> MirroredObjectId {
        operand.mirrored_object_id(self.parallel_id)
    }
}
