//! CLI module - argument parsing, the interactive form and prompts

mod args;
pub mod form;
mod prompts;

pub use args::{Cli, Commands, PredictArgs, TrainArgs};
pub use form::{run_prediction_form, FormAction, FormField, FormMode, FormState};
pub use prompts::*;
