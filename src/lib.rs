//! framelabel - Interactive image annotation core
//!
//! The UI-independent heart of a frame-by-frame image labeling tool:
//! coordinate transforms between viewport and normalized image space, the
//! click-sequence machines that build annotations and zoom regions, cursor
//! hit-testing, and per-frame persistence through a pluggable storage
//! backend. Rendering, decoding and audio stay with the host, which drives
//! a [`LabelSession`] and acts on the [`Effect`]s it returns.

mod annotation;
mod config;
mod drawing;
mod error;
mod geometry;
mod selection;
mod session;
mod storage;
mod viewport;
mod zoom;

pub use annotation::{
    Annotation, Frame, FrameAnnotations, FrameImage, POINT_NOTE_CENTER, to_json,
};
pub use config::SessionConfig;
pub use drawing::{AnnotationMode, ClickOutcome, DrawingState, RejectReason};
pub use error::LabelError;
pub use geometry::{BBox2D, Point2D, validate_extreme_points};
pub use selection::{POINT_HIT_RADIUS, hit_test};
pub use session::{ClickCue, Effect, LabelSession};
pub use storage::{AnnotationStorage, InMemoryStorage};
pub use viewport::ViewportTransform;
pub use zoom::{ZoomOutcome, ZoomState};
