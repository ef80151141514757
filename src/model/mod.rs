//! Problem data: operations and candidate partitions.

mod operation;
mod partition;

pub use operation::Operation;
pub use partition::Partition;
