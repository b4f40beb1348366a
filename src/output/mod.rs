mod boundary_file;

pub use boundary_file::BoundaryFile;

use crate::error::Result;
use crate::segmentation::Boundary;

/// Trait for boundary destinations
pub trait BoundarySink {
    /// Write one closed shot; calls arrive in temporal order
    fn write_boundary(&mut self, boundary: &Boundary) -> Result<()>;

    /// Flush anything still buffered
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects boundaries in memory
impl BoundarySink for Vec<Boundary> {
    fn write_boundary(&mut self, boundary: &Boundary) -> Result<()> {
        self.push(*boundary);
        Ok(())
    }
}
