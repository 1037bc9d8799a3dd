//! Labeling session: the state and input surface of the annotation core.
//!
//! A [`LabelSession`] owns the frames, the current-frame index, the visible
//! region, and both click machines, and exposes the handlers a driving UI
//! calls for pointer and key input. Handlers run synchronously on a single
//! thread and return the [`Effect`]s the host must perform (redraw, audio
//! cue, user notice); rendering and audio stay entirely external. A
//! multi-threaded host must serialize all calls into a session.

use crate::annotation::{Annotation, Frame, FrameAnnotations, FrameImage};
use crate::config::SessionConfig;
use crate::drawing::{AnnotationMode, ClickOutcome, DrawingState, RejectReason};
use crate::error::LabelError;
use crate::geometry::{BBox2D, Point2D};
use crate::selection;
use crate::storage::AnnotationStorage;
use crate::viewport::ViewportTransform;
use crate::zoom::{ZoomOutcome, ZoomState};

/// Which click sound the host should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickCue {
    /// A mid-sequence click: more clicks needed to finish the annotation.
    MidSequence,
    /// A sequence-completing click: an annotation was added or toggled.
    Completed,
}

/// Side-effect requests returned by the input handlers.
///
/// The session mutates its own state and persists through the storage
/// collaborator; everything else is returned as data for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The scene changed; re-render.
    Redraw,
    /// Play a click cue (only emitted when audio cues are enabled).
    PlayCue(ClickCue),
    /// Show a user-facing notice.
    Notify(String),
}

/// An interactive labeling session over a sequence of frames.
pub struct LabelSession<S: AnnotationStorage> {
    frames: Vec<Frame>,
    current_frame: usize,
    mode: AnnotationMode,
    config: SessionConfig,

    viewport_width: f64,
    viewport_height: f64,
    /// Visible sub-rectangle of the image in normalized space. Persists
    /// across frame switches; mutated only by the zoom machine or reset.
    visible_region: BBox2D,

    /// Cursor position in viewport pixels; `None` while not hovering.
    cursor: Option<Point2D>,

    drawing: DrawingState,
    zoom: ZoomState,
    zoom_key: bool,

    storage: S,
}

impl<S: AnnotationStorage> LabelSession<S> {
    /// Create a session with default configuration.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, SessionConfig::default())
    }

    pub fn with_config(storage: S, config: SessionConfig) -> Self {
        Self {
            frames: Vec::new(),
            current_frame: 0,
            mode: AnnotationMode::default(),
            config,
            viewport_width: 1024.0,
            viewport_height: 768.0,
            visible_region: BBox2D::unit(),
            cursor: None,
            drawing: DrawingState::new(),
            zoom: ZoomState::new(),
            zoom_key: false,
            storage,
        }
    }

    // ========================================================================
    // Application-facing API
    // ========================================================================

    /// Replace all frames with a new image sequence.
    ///
    /// Frames are ordered lexicographically by name for reproducible
    /// navigation. Persisted annotations are loaded per frame; the
    /// current-frame index, visible region and both click buffers reset.
    pub fn load_frames(&mut self, mut images: Vec<FrameImage>) -> Vec<Effect> {
        log::info!("📂 Loading set of {} images", images.len());
        images.sort_by(|a, b| a.name.cmp(&b.name));

        self.frames = images
            .into_iter()
            .map(|image| {
                let mut frame = Frame::new(image);
                frame.annotations = self.storage.load_frame(frame.name());
                frame
            })
            .collect();

        self.current_frame = 0;
        self.visible_region = BBox2D::unit();
        self.clear_buffers();
        vec![Effect::Redraw]
    }

    /// Switch to another frame.
    ///
    /// Bounds-checked: an out-of-range index is a host navigation bug and
    /// fails fast instead of clamping. Switching clears both click buffers
    /// but preserves the visible region and annotation mode.
    pub fn set_current_frame(&mut self, index: usize) -> Result<Vec<Effect>, LabelError> {
        if index >= self.frames.len() {
            return Err(LabelError::FrameIndexOutOfRange {
                index,
                frames: self.frames.len(),
            });
        }
        // Annotation lists are host-visible; re-save the outgoing frame in
        // case one was mutated outside the handlers.
        let outgoing = &self.frames[self.current_frame];
        if !outgoing.annotations.is_empty() {
            self.storage.save_frame(&outgoing.image.name, &outgoing.annotations);
        }
        self.current_frame = index;
        self.clear_buffers();
        log::debug!("🔄 Current frame set to {index}");
        Ok(vec![Effect::Redraw])
    }

    /// Change the active annotation mode. Clears both click buffers.
    pub fn set_annotation_mode(&mut self, mode: AnnotationMode) -> Vec<Effect> {
        self.clear_buffers();
        self.mode = mode;
        log::debug!("🖌️ Annotation mode: {}", mode.name());
        vec![Effect::Redraw]
    }

    /// Toggle letterboxed display. Clears both click buffers.
    pub fn set_letterbox(&mut self, letterbox: bool) -> Vec<Effect> {
        self.clear_buffers();
        self.config.letterbox = letterbox;
        vec![Effect::Redraw]
    }

    /// Restore the visible region to the full image. Clears both buffers.
    pub fn reset_zoom(&mut self) -> Vec<Effect> {
        self.clear_buffers();
        self.visible_region = BBox2D::unit();
        log::debug!("🔄 Zoom reset");
        vec![Effect::Redraw]
    }

    /// Update the rendering surface size, in pixels. Must be positive.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        debug_assert!(width > 0.0 && height > 0.0);
        self.viewport_width = width;
        self.viewport_height = height;
    }

    // ========================================================================
    // Input handlers
    // ========================================================================

    /// Pointer moved inside the viewport. The position is clamped to the
    /// viewport bounds so clicks and resulting boxes stay on the image.
    pub fn handle_pointer_move(&mut self, pt: Point2D) -> Vec<Effect> {
        self.cursor = Some(self.clamp_to_viewport(pt));
        vec![Effect::Redraw]
    }

    /// Pointer left the viewport.
    pub fn handle_pointer_leave(&mut self) -> Vec<Effect> {
        self.cursor = None;
        vec![Effect::Redraw]
    }

    /// A click inside the viewport. Routed to the zoom machine while the
    /// zoom key is engaged, otherwise to the annotation click machine.
    pub fn handle_click(&mut self, pt: Point2D) -> Vec<Effect> {
        let Some(transform) = self.transform() else {
            log::warn!("Click ignored: no frames loaded");
            return Vec::new();
        };

        let pt = self.clamp_to_viewport(pt);
        self.cursor = Some(pt);
        let image_pt = transform.to_image(pt);

        if self.zoom_key {
            if let ZoomOutcome::Completed(region) = self.zoom.push_corner(image_pt) {
                self.visible_region = region;
            }
            return vec![Effect::Redraw];
        }

        let mut effects = Vec::new();
        match self.drawing.push_click(self.mode, image_pt) {
            ClickOutcome::TogglePerFrame => {
                self.apply_per_frame_toggle();
                self.push_cue(&mut effects, ClickCue::Completed);
            }
            ClickOutcome::Completed(annotation) => {
                log::info!(
                    "✅ New {} at ({:.4}, {:.4})",
                    annotation.kind(),
                    image_pt.x,
                    image_pt.y
                );
                self.frames[self.current_frame].annotations.push(annotation);
                self.persist_current_frame();
                self.push_cue(&mut effects, ClickCue::Completed);
            }
            ClickOutcome::InProgress => {
                self.push_cue(&mut effects, ClickCue::MidSequence);
            }
            ClickOutcome::Rejected(RejectReason::EmptyBox) => {
                effects.push(Effect::Notify("Empty bbox. Discarding box.".to_string()));
            }
            ClickOutcome::Rejected(RejectReason::InvalidExtremePoints) => {
                // Already logged by the click machine; discard silently.
            }
        }
        effects.push(Effect::Redraw);
        effects
    }

    /// The zoom key was pressed or released. Every change clears both
    /// click buffers so neither machine holds stale partial state.
    pub fn handle_zoom_key(&mut self, engaged: bool) -> Vec<Effect> {
        if engaged != self.zoom_key {
            self.zoom_key = engaged;
            self.clear_buffers();
        }
        vec![Effect::Redraw]
    }

    /// Cancel the current action, clearing both click buffers.
    pub fn handle_cancel(&mut self) -> Vec<Effect> {
        self.clear_buffers();
        vec![Effect::Redraw]
    }

    /// Delete the annotation under the cursor. A no-op without a current
    /// selection.
    pub fn handle_delete(&mut self) -> Vec<Effect> {
        let Some(index) = self.selected_index() else {
            return Vec::new();
        };
        let removed = self.frames[self.current_frame].annotations.remove(index);
        log::info!("🗑️ Deleted {} annotation {index}", removed.kind());
        self.persist_current_frame();
        vec![Effect::Redraw]
    }

    /// Replace the note on the point annotation under the cursor. A no-op
    /// without a selection, or when the selection is not a point.
    pub fn handle_note_update(&mut self, note: &str) -> Vec<Effect> {
        let Some(index) = self.selected_index() else {
            return Vec::new();
        };
        let Annotation::Point { note: existing, .. } =
            &mut self.frames[self.current_frame].annotations[index]
        else {
            return Vec::new();
        };
        *existing = note.to_string();
        log::debug!("Note on point annotation {index} set to {note:?}");
        self.persist_current_frame();
        vec![Effect::Redraw]
    }

    /// Toggle the current frame's binary per-frame tag: remove it if
    /// present, else add it with value 1.
    ///
    /// Also reachable through a click in per-frame mode; exposed for hosts
    /// that bind it to a key as well.
    pub fn toggle_per_frame(&mut self) -> Vec<Effect> {
        if self.frames.is_empty() {
            log::warn!("Per-frame toggle ignored: no frames loaded");
            return Vec::new();
        }
        self.apply_per_frame_toggle();
        vec![Effect::Redraw]
    }

    /// Remove all annotations on the current frame.
    pub fn clear_annotations(&mut self) -> Vec<Effect> {
        self.drawing.cancel();
        if let Some(frame) = self.frames.get_mut(self.current_frame) {
            if !frame.annotations.is_empty() {
                let count = frame.annotations.len();
                frame.annotations.clear();
                log::info!("🗑️ Cleared {count} annotations");
                self.persist_current_frame();
            }
        }
        vec![Effect::Redraw]
    }

    // ========================================================================
    // Read surface for the host and its rendering collaborator
    // ========================================================================

    /// Index of the annotation under the cursor, or `None` when not
    /// hovering, outside the visible region, or over nothing.
    pub fn selected_index(&self) -> Option<usize> {
        let cursor = self.cursor?;
        let transform = self.transform()?;
        let image_pt = transform.to_image_unclamped(cursor);
        if !self.visible_region.contains(&image_pt) {
            return None;
        }
        selection::hit_test(&self.frames[self.current_frame].annotations, image_pt)
    }

    /// The coordinate transform for the current frame, or `None` before
    /// any frames are loaded.
    pub fn transform(&self) -> Option<ViewportTransform> {
        let frame = self.frames.get(self.current_frame)?;
        Some(ViewportTransform::new(
            self.viewport_width,
            self.viewport_height,
            f64::from(frame.image.width),
            f64::from(frame.image.height),
            self.visible_region,
            self.config.letterbox,
        ))
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.get(self.current_frame)
    }

    pub fn current_frame_index(&self) -> usize {
        self.current_frame
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn annotation_mode(&self) -> AnnotationMode {
        self.mode
    }

    pub fn visible_region(&self) -> BBox2D {
        self.visible_region
    }

    /// In-progress annotation points, in normalized image space.
    pub fn in_progress_points(&self) -> &[Point2D] {
        self.drawing.points()
    }

    /// The pending first zoom corner, if the zoom machine holds one.
    pub fn pending_zoom_corner(&self) -> Option<Point2D> {
        self.zoom.pending_corner()
    }

    pub fn is_hovering(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn zoom_key_engaged(&self) -> bool {
        self.zoom_key
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read-only export of every frame's annotations, in frame order.
    pub fn get_annotations(&self) -> Vec<FrameAnnotations> {
        self.frames
            .iter()
            .map(|frame| FrameAnnotations {
                frame: frame.name().to_string(),
                annotations: frame.annotations.clone(),
            })
            .collect()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn clear_buffers(&mut self) {
        self.drawing.cancel();
        self.zoom.cancel();
    }

    fn clamp_to_viewport(&self, pt: Point2D) -> Point2D {
        BBox2D::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(self.viewport_width, self.viewport_height),
        )
        .clamp_point(pt)
    }

    fn push_cue(&self, effects: &mut Vec<Effect>, cue: ClickCue) {
        if self.config.audio_cues {
            effects.push(Effect::PlayCue(cue));
        }
    }

    fn apply_per_frame_toggle(&mut self) {
        let frame = &mut self.frames[self.current_frame];
        if let Some(index) = frame.per_frame_index() {
            frame.annotations.remove(index);
            log::info!("Removed per-frame annotation");
        } else {
            frame.annotations.push(Annotation::PerFrame { value: 1 });
            log::info!("Added per-frame annotation");
        }
        self.persist_current_frame();
    }

    /// Persist the current frame: save when it has annotations, clear the
    /// persisted entry when a mutation emptied it.
    fn persist_current_frame(&mut self) {
        let frame = &self.frames[self.current_frame];
        if frame.annotations.is_empty() {
            self.storage.clear_frame(&frame.image.name);
        } else {
            self.storage.save_frame(&frame.image.name, &frame.annotations);
        }
    }
}
