use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the obstacle file.
#[derive(Debug, Error)]
pub enum ObstacleError {
    #[error("could not open obstacle file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed obstacle data")]
    Malformed(#[from] csv::Error),

    #[error("obstacle ({x}, {y}) on line {line} lies outside the {size}x{size} grid")]
    OutOfRange {
        line: u64,
        x: i64,
        y: i64,
        size: usize,
    },
}
