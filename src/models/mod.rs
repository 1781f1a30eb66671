pub mod collaborator;
pub mod segment;
pub mod stats;

pub use collaborator::*;
pub use segment::*;
pub use stats::*;
