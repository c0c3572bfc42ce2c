use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use tracing::trace;

use crate::{
    agg::Aggregator,
    source::{LineSource, ReadError},
};

/// Reads a whole file from offset zero on every run. The handle is dropped
/// before `run` returns.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<A: Aggregator> LineSource<A> for FileSource {
    fn run(&mut self, agg: &mut A) -> Result<(), ReadError> {
        let file = File::open(&self.path).map_err(|e| ReadError::from_io(&self.path, e))?;
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut bytes = 0usize;

        agg.on_start();

        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| ReadError::from_io(&self.path, e))?;
            if n == 0 {
                break;
            }
            bytes += n;

            // Writers are not required to emit UTF-8.
            let line = String::from_utf8_lossy(&buf);
            agg.on_line(line.trim_end_matches(['\n', '\r']));
        }

        agg.on_end();
        trace!(path = %self.path.display(), bytes, "log pass complete");

        Ok(())
    }
}
