//! Pipeline module - builds the encoded feature matrix and its artifacts

pub mod artifacts;
pub mod builder;
pub mod encoder;
pub mod loader;
pub mod record;
pub mod scaler;
pub mod schema;
pub mod target;
pub mod transform;
pub mod workmode;

pub use artifacts::*;
pub use builder::*;
pub use encoder::*;
pub use loader::*;
pub use record::{bounds, defaults, EmployeeRecord};
pub use scaler::*;
pub use schema::*;
pub use target::*;
pub use transform::*;
pub use workmode::*;
