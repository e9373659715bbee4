pub mod aggregator;
pub mod main;
pub mod sentence;

pub use aggregator::*;
pub use main::*;
pub use sentence::*;
