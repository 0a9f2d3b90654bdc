//! Configuration for a play session.

use std::time::Duration;

/// Locations the narrative fallback looks for, in the order they are tried.
pub const DEFAULT_LANDMARKS: &[&str] = &[
    "West of House",
    "North of House",
    "South of House",
    "Behind House",
    "Kitchen",
    "Living Room",
    "Attic",
    "Forest",
    "Canyon View",
    "Clearing",
    "Canyon Bottom",
    "End of Rainbow",
    "Chimney",
    "Studio",
    "Gallery",
    "Mailbox",
];

/// Configuration for a play session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Location assumed before anything has been inferred.
    pub start_location: String,
    /// Delay before each queued command is served.
    pub pacing: Duration,
    /// Number of trailing log lines the inventory heuristics look at.
    pub inference_window: usize,
    /// Longest input line handed to process-backed interpreters.
    pub max_input: usize,
    /// Location names matched against narrative text, in priority order.
    pub landmarks: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_location: "West of House".to_string(),
            pacing: Duration::from_millis(400),
            inference_window: 12,
            max_input: 80,
            landmarks: DEFAULT_LANDMARKS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SessionConfig {
    /// Set the starting location.
    pub fn with_start_location(mut self, name: impl Into<String>) -> Self {
        self.start_location = name.into();
        self
    }

    /// Set the delay before queued commands.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set the inference window (at least one line).
    pub fn with_inference_window(mut self, lines: usize) -> Self {
        self.inference_window = lines.max(1);
        self
    }

    /// Set the maximum input length (at least one character).
    pub fn with_max_input(mut self, len: usize) -> Self {
        self.max_input = len.max(1);
        self
    }

    /// Replace the narrative landmark list.
    pub fn with_landmarks<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.landmarks = names.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.start_location, "West of House");
        assert_eq!(cfg.pacing, Duration::from_millis(400));
        assert_eq!(cfg.inference_window, 12);
        assert_eq!(cfg.landmarks.first().map(String::as_str), Some("West of House"));
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default()
            .with_start_location("Kitchen")
            .with_pacing(Duration::ZERO)
            .with_max_input(40)
            .with_landmarks(["Attic"]);
        assert_eq!(cfg.start_location, "Kitchen");
        assert!(cfg.pacing.is_zero());
        assert_eq!(cfg.max_input, 40);
        assert_eq!(cfg.landmarks, vec!["Attic".to_string()]);
    }

    #[test]
    fn lower_bounds_clamped() {
        let cfg = SessionConfig::default()
            .with_inference_window(0)
            .with_max_input(0);
        assert_eq!(cfg.inference_window, 1);
        assert_eq!(cfg.max_input, 1);
    }
}
