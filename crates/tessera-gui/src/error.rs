use std::path::PathBuf;

/// Recoverable failures in the widget layer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a persisted file failed
    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A console command with this name is already registered
    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),
}

pub type Result<T> = std::result::Result<T, Error>;
