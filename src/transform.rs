//! Pixel operations and the pipeline that runs them.

pub mod adjust;
pub mod border_radius;
pub mod chain;
pub mod engine;
pub mod fit;
pub mod geometry;
