use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnscrapeError {
    #[error("unable to run {program}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("unable to capture output of {program}")]
    Stdout { program: String },

    #[error("unable to read output of {program}")]
    Read {
        program: String,
        source: std::io::Error,
    },

    #[error("unable to parse tweet on output line {line}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },

    #[error("{program} failed ({status}) for query: {query}")]
    Status {
        program: String,
        query: String,
        status: ExitStatus,
    },
}
