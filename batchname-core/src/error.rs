use std::path::PathBuf;

/// Failures callers need to tell apart, e.g. to choose an exit code
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// The plan has collisions, so nothing may be renamed
    #[error("Cannot rename: {0} collision(s) detected")]
    Collisions(usize),

    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Confirmation is needed but stdin is not a terminal
    #[error(
        "Cannot prompt for confirmation in non-interactive mode. Use --yes to rename without prompting."
    )]
    NonInteractive,

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
