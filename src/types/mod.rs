pub mod keyframe;
pub mod sample;
pub mod sentence;

pub use keyframe::*;
pub use sample::*;
pub use sentence::*;
