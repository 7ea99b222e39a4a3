//! Seam between the pipeline and the file-format decoder.

use std::path::Path;

use crate::error::Result;
use crate::frame::GridFrame;

/// Decodes one forecast file into a [`GridFrame`].
///
/// Implementations own every format-specific concern (binary layout,
/// parameter naming, grid geometry). The pipeline only sees the decoded
/// frame; decode errors are propagated to the caller unchanged.
pub trait FrameDecoder {
    /// Decode the file at `path` into a frame.
    fn decode(&self, path: &Path) -> Result<GridFrame>;
}
