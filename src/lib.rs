//! attrisk: employee attrition risk library
//!
//! Fits a random forest on an HR dataset, persists the classifier with its
//! label encoders and scaler, and scores single employee records with
//! rule-based retention suggestions.

pub mod cli;
pub mod error;
pub mod inference;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use error::AttritionError;
