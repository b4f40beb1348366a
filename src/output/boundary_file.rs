use super::BoundarySink;
use crate::error::{Result, ShotError};
use crate::segmentation::Boundary;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one `"<start> <end>"` line per shot, both fields zero-padded to
/// five digits.
pub struct BoundaryFile<W: Write = BufWriter<File>> {
    writer: W,
    lines: usize,
}

impl BoundaryFile<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ShotError::OutputPath {
                path: path.to_path_buf(),
                reason: "empty file name".to_string(),
            });
        }

        tracing::info!("Writing shot boundaries to {}", path.display());

        let file = File::create(path).map_err(|e| ShotError::OutputPath {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> BoundaryFile<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> BoundarySink for BoundaryFile<W> {
    fn write_boundary(&mut self, boundary: &Boundary) -> Result<()> {
        writeln!(self.writer, "{}", boundary.reported())?;
        self.lines += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
