//! Report module - training summaries, predictions and importance ranking

pub mod prediction;
pub mod summary;

pub use prediction::*;
pub use summary::*;
