use hashbrown::HashMap;

use crate::{MirroredObjectId, Operand, Placement, parallel::ParallelContext};

/// Holds the physical instances of logical objects, keyed by [`MirroredObjectId`].
///
/// The table does not synchronize access. Sharding it per rank or guarding it with a lock is up
/// to the execution engine owning it.
#[derive(Clone, Debug)]
pub struct ObjectTable<T> {
    objects: HashMap<MirroredObjectId, T>,
}

impl<T> Default for ObjectTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ObjectTable<T> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
        }
    }

    /// Inserts an instance, returning the one previously stored under the same key.
    pub fn insert(&mut self, id: MirroredObjectId, object: T) -> Option<T> {
        self.objects.insert(id, object)
    }

    /// The instance stored under `id`.
    pub fn get(&self, id: &MirroredObjectId) -> Option<&T> {
        self.objects.get(id)
    }

    /// The instance stored under `id`, mutably.
    pub fn get_mut(&mut self, id: &MirroredObjectId) -> Option<&mut T> {
        self.objects.get_mut(id)
    }

    /// Removes and returns the instance stored under `id`.
    pub fn remove(&mut self, id: &MirroredObjectId) -> Option<T> {
        self.objects.remove(id)
    }

    /// Whether an instance is stored under `id`.
    pub fn contains(&self, id: &MirroredObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Number of stored instances.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the table holds no instance.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The instance `ctx` must use for `operand`.
    pub fn lookup(&self, operand: &Operand, ctx: &ParallelContext) -> Option<&T> {
        self.objects.get(&ctx.resolve(operand))
    }

    /// Creates the instances of `operand` for `parallel_num` ranks, following its placement.
    ///
    /// A fixed operand gets a single instance, built with `init(parallel_id)`. A mirrored operand
    /// gets an independent instance per rank, each built by its own `init(rank)` call. A broadcast
    /// operand is built once with `init(0)` and cloned to every rank. Nothing is built when there
    /// is no rank to hold an instance.
    ///
    /// Existing instances are overwritten. Returns the number of instances written.
    pub fn populate<F>(&mut self, operand: &Operand, parallel_num: i64, mut init: F) -> usize
    where
        T: Clone,
        F: FnMut(i64) -> T,
    {
        let value = operand.logical_object_id().value();
        let placement = operand.placement();
        let parallel_ids = placement.instance_parallel_ids(parallel_num);
        let count = parallel_ids.clone().count();
        if count == 0 {
            return 0;
        }

        match placement {
            Placement::Fixed(_) | Placement::Mirrored => {
                for parallel_id in parallel_ids {
                    self.insert(MirroredObjectId::new(value, parallel_id), init(parallel_id));
                }
            }
            Placement::All => {
                let replica = init(0);
                for parallel_id in parallel_ids {
                    self.insert(MirroredObjectId::new(value, parallel_id), replica.clone());
                }
            }
        }

        log::debug!(
            "Populated {count} instance(s) of logical object {} ({:?})",
            value,
            placement.replication()
        );

        count
    }

    /// Removes every instance of `operand` for `parallel_num` ranks.
    ///
    /// Returns the number of instances removed.
    pub fn evict(&mut self, operand: &Operand, parallel_num: i64) -> usize {
        let value = operand.logical_object_id().value();
        let removed = operand
            .placement()
            .instance_parallel_ids(parallel_num)
            .filter(|parallel_id| {
                self.objects
                    .remove(&MirroredObjectId::new(value, *parallel_id))
                    .is_some()
            })
            .count();

        log::trace!("Evicted {removed} instance(s) of logical object {value}");

        removed
    }
}
