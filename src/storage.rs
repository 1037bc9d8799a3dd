//! Persistence collaborator interface.
//!
//! The core persists each frame's annotation list under the frame name on
//! every mutation and reads it back when frames are loaded. The storage
//! medium is the host's business: any key/value backend (file, embedded
//! DB, browser storage, remote service) satisfies this trait.

use std::collections::HashMap;

use crate::annotation::Annotation;

/// Key/value persistence for per-frame annotation lists.
///
/// Calls are synchronous; the session invokes them inline from its event
/// handlers.
pub trait AnnotationStorage {
    /// Load the persisted annotations for a frame, or empty if none.
    fn load_frame(&mut self, name: &str) -> Vec<Annotation>;

    /// Persist a frame's full annotation list, replacing any prior state.
    fn save_frame(&mut self, name: &str, annotations: &[Annotation]);

    /// Remove the persisted state for a frame.
    fn clear_frame(&mut self, name: &str);
}

/// In-memory storage backend.
///
/// The default backend for tests and for hosts that persist through
/// [`crate::session::LabelSession::get_annotations`] instead.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    frames: HashMap<String, Vec<Annotation>>,
    clear_calls: HashMap<String, usize>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persisted annotations for a frame, if any.
    pub fn get(&self, name: &str) -> Option<&Vec<Annotation>> {
        self.frames.get(name)
    }

    /// How many times `clear_frame` was called for a frame.
    pub fn clear_calls(&self, name: &str) -> usize {
        self.clear_calls.get(name).copied().unwrap_or(0)
    }
}

impl AnnotationStorage for InMemoryStorage {
    fn load_frame(&mut self, name: &str) -> Vec<Annotation> {
        self.frames.get(name).cloned().unwrap_or_default()
    }

    fn save_frame(&mut self, name: &str, annotations: &[Annotation]) {
        self.frames.insert(name.to_string(), annotations.to_vec());
    }

    fn clear_frame(&mut self, name: &str) {
        self.frames.remove(name);
        *self.clear_calls.entry(name.to_string()).or_insert(0) += 1;
    }
}
