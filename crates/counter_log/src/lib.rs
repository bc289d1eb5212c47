//! # counter_log
//!
//! Parsing for the text logs produced by core-group cache monitoring
//! (`pqos --mon-core` style output).
//!
//! A log is a sequence of `TIME` header lines, each followed by one or more
//! rows of the form:
//!
//! ```text
//! TIME 2025-06-02 11:12:29
//!      20-27    0.27      53k      9520     2.21       0.00
//! ```
//!
//! Each row is reduced to a [`CounterSample`] (IPC, misses per second and LLC
//! occupancy in KB). All samples in a file are pooled into a single
//! [`CounterSeries`] regardless of the `TIME` block they appeared in.

pub mod line;
pub mod series;

pub use line::*;
pub use series::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a counter log
#[derive(Error, Debug)]
pub enum Error {
    /// The log file could not be opened
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading failed part way through the file
    #[error("error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
