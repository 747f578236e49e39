pub mod args;
pub mod types;

pub use args::{Cli, Commands, FilterArgs, InputArgs};
pub use types::{OutputFormat, PreviewArg};
