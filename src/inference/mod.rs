//! Inference module - scores one employee record against loaded artifacts

pub mod context;
pub mod predict;
pub mod suggestions;

pub use context::*;
pub use predict::*;
pub use suggestions::*;
