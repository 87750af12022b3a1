#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Burn virtual machine operand addressing.
//!
//! Instructions dispatched to the cooperating execution contexts of a distributed computation
//! refer to logical objects through [`Operand`]s. Each operand carries a [`Placement`] telling
//! where the physical instances of the object live; resolving it against the parallel id of the
//! running context yields the [`MirroredObjectId`] of the instance to use.

extern crate alloc;

mod object;
mod operand;
mod table;

pub mod parallel;

pub use object::*;
pub use operand::*;
pub use table::*;
