//! Execution contexts and the devices backing them.

mod context;
mod desc;

pub use context::*;
pub use desc::*;
