//! Error types for the annotation core.
//!
//! Invalid geometry (degenerate boxes, malformed extreme points, zero-area
//! zoom regions) is not an error: it is discarded locally with a logged
//! diagnostic. Errors here are host precondition violations.

use thiserror::Error;

/// Errors surfaced to the driving host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// Frame index outside the loaded sequence. Failing fast here instead
    /// of clamping keeps host navigation bugs visible.
    #[error("frame index {index} out of range (0..{frames})")]
    FrameIndexOutOfRange {
        /// The requested index
        index: usize,
        /// Number of loaded frames
        frames: usize,
    },

    /// An operation that needs a current frame was called before any
    /// frames were loaded.
    #[error("no frames loaded")]
    NoFrames,
}
