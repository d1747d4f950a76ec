use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OldTweetsError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("unable to read usernames from {}", path.display())]
    ReadUsernames {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to create output file {}", path.display())]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}
