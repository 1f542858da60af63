//! CLI command implementations

pub mod error;
pub mod run;
pub mod validate;

pub use error::CliError;
pub use run::{Cli, CombineArgs, Commands, OutputFormat, Overrides, RunArgs};
pub use validate::ValidateArgs;
