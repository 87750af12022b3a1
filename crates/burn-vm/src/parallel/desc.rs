use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ParallelContext;

/// Describes the set of devices cooperating on a distributed computation.
///
/// A `ParallelDesc` is an ordered list of devices: the position of a device in the list is its
/// parallel id. Operands are placed and resolved in terms of these parallel ids, so the
/// description is the bridge between a rank and the physical device backing it.
///
/// For example, a description built from the devices `["cuda:0", "cuda:1"]` has a parallel
/// number of 2, and a [`Placement::Fixed(1)`](crate::Placement::Fixed) operand lives on
/// `"cuda:1"`.
///
/// Each device must appear only once, so that a device maps back to a single parallel id. This
/// also holds for descriptions deserialized from a configuration file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    try_from = "ParallelDescBuilder<T>",
    bound(deserialize = "T: Deserialize<'de> + Hash + Eq + Debug")
)]
pub struct ParallelDesc<T> {
    /// Physical devices, indexed by parallel id
    devices: Vec<T>,
}

/// Represents errors that can occur when building or querying a [`ParallelDesc`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParallelDescError {
    /// No device was provided.
    #[error("Parallel description requires at least one device")]
    Empty,
    /// The same device was provided more than once.
    #[error("Device at parallel id {parallel_id} is already listed")]
    DuplicateDevice {
        /// Parallel id of the repeated occurrence.
        parallel_id: usize,
    },
    /// A parallel id does not name any device.
    #[error("Parallel id {parallel_id} is out of range for {parallel_num} devices")]
    OutOfRange {
        /// The requested parallel id.
        parallel_id: i64,
        /// Number of devices in the description.
        parallel_num: i64,
    },
}

/// A builder for constructing a [`ParallelDesc`].
#[derive(Clone, Debug, Deserialize)]
pub struct ParallelDescBuilder<T> {
    /// Physical devices, indexed by parallel id.
    devices: Vec<T>,
}

impl<T> ParallelDescBuilder<T> {
    /// Creates a new [`ParallelDescBuilder`] with the given devices.
    ///
    /// # Arguments
    /// * `devices` - The devices, in parallel id order.
    pub fn new(devices: Vec<T>) -> Self {
        Self { devices }
    }

    /// Appends a device, which gets the next parallel id.
    pub fn with_device(mut self, device: T) -> Self {
        self.devices.push(device);
        self
    }
}

impl<T: Hash + Eq + Debug> ParallelDescBuilder<T> {
    /// Builds a [`ParallelDesc`] from the current configuration.
    ///
    /// # Returns
    /// A `ParallelDesc` if the device list is non-empty and free of duplicates, or a
    /// `ParallelDescError` otherwise.
    ///
    /// # Example
    ///
    /// ```rust
    /// use burn_vm::parallel::ParallelDescBuilder;
    ///
    /// let desc = ParallelDescBuilder::new(vec!["cuda:0", "cuda:1"])
    ///     .with_device("cuda:2")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(desc.parallel_num(), 3);
    /// assert_eq!(desc.parallel_id_of(&"cuda:2"), Some(2));
    /// ```
    pub fn build(self) -> Result<ParallelDesc<T>, ParallelDescError> {
        if self.devices.is_empty() {
            return Err(ParallelDescError::Empty);
        }

        {
            let mut seen = HashSet::with_capacity(self.devices.len());
            for (parallel_id, device) in self.devices.iter().enumerate() {
                if !seen.insert(device) {
                    return Err(ParallelDescError::DuplicateDevice { parallel_id });
                }
            }
        }

        log::debug!("Built parallel description over {:?}", self.devices);

        Ok(ParallelDesc {
            devices: self.devices,
        })
    }
}

impl<T: Hash + Eq + Debug> TryFrom<ParallelDescBuilder<T>> for ParallelDesc<T> {
    type Error = ParallelDescError;

    fn try_from(builder: ParallelDescBuilder<T>) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl<T> ParallelDesc<T> {
    /// Number of cooperating devices.
    pub fn parallel_num(&self) -> i64 {
        self.devices.len() as i64
    }

    /// The device with the given parallel id, if any.
    pub fn device(&self, parallel_id: i64) -> Option<&T> {
        usize::try_from(parallel_id)
            .ok()
            .and_then(|idx| self.devices.get(idx))
    }

    /// The execution context of the device with the given parallel id.
    pub fn context(&self, parallel_id: i64) -> Result<ParallelContext, ParallelDescError> {
        match self.device(parallel_id) {
            Some(_) => Ok(ParallelContext::new(parallel_id, self.parallel_num())),
            None => Err(ParallelDescError::OutOfRange {
                parallel_id,
                parallel_num: self.parallel_num(),
            }),
        }
    }

    /// The execution contexts of every device, in parallel id order.
    pub fn contexts(&self) -> impl Iterator<Item = ParallelContext> + '_ {
        let parallel_num = self.parallel_num();
        (0..parallel_num).map(move |parallel_id| ParallelContext::new(parallel_id, parallel_num))
    }

    /// The devices, in parallel id order.
    pub fn devices(&self) -> &[T] {
        &self.devices
    }
}

impl<T: PartialEq> ParallelDesc<T> {
    /// The parallel id of `device`, if it takes part in this description.
    pub fn parallel_id_of(&self, device: &T) -> Option<i64> {
        self.devices
            .iter()
            .position(|d| d == device)
            .map(|idx| idx as i64)
    }
}
