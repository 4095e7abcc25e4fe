//! Utility module - progress indicators and styled terminal output

pub mod progress;
pub mod styling;

pub use progress::*;
pub use styling::*;
