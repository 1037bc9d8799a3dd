//! Session configuration.
//!
//! Display and feedback settings a host can serialize alongside its own
//! preferences.

use serde::{Deserialize, Serialize};

/// Settings for a labeling session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Fit the visible region into the viewport preserving aspect ratio.
    /// When false the image is stretched to fill the viewport.
    #[serde(default = "default_true")]
    pub letterbox: bool,

    /// Emit audio-cue effects on clicks (playback itself is the host's).
    #[serde(default)]
    pub audio_cues: bool,

    /// Tell the rendering collaborator to draw extreme-point markers.
    #[serde(default = "default_true")]
    pub show_extreme_points: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            letterbox: true,
            audio_cues: false,
            show_extreme_points: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert!(config.letterbox);
        assert!(!config.audio_cues);
        assert!(config.show_extreme_points);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = SessionConfig {
            letterbox: false,
            audio_cues: true,
            show_extreme_points: false,
        };
        let json = serde_json::to_string(&config).expect("serialize failed");
        let parsed: SessionConfig = serde_json::from_str(&json).expect("parse failed");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: SessionConfig = serde_json::from_str("{}").expect("parse failed");
        assert_eq!(parsed, SessionConfig::default());
    }
}
