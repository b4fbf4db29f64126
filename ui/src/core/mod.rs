//! Platform-agnostic logic: the measurement model, goal-proximity colors,
//! chart projections and persistence.

pub mod chart;
pub mod color;
pub mod format;
pub mod model;
pub mod platform;
pub mod seed;
pub mod storage;
