pub mod file;

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::agg::Aggregator;

/// Why a log could not be read on a given tick.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("log file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReadError {
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => ReadError::Missing { path },
            _ => ReadError::Io { path, source },
        }
    }
}

/// Something that can replay log lines into an aggregator.
pub trait LineSource<A: Aggregator> {
    fn run(&mut self, agg: &mut A) -> Result<(), ReadError>;
}
