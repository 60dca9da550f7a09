pub mod scheduler;
pub mod spool;

pub use scheduler::*;
pub use spool::*;
