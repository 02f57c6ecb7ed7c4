//! Scene configuration
//!
//! Read once at mount from an optional inline JSON block in the page. Never
//! written back: the scene has no cross-session state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How far the containment walls reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Floor sits just below the visible surface
    #[default]
    Contained,
    /// Floor sits far below the fold so glyphs can fall and settle there
    FullViewport,
}

impl BoundaryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryMode::Contained => "contained",
            BoundaryMode::FullViewport => "full_viewport",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "contained" => Some(BoundaryMode::Contained),
            "full_viewport" | "full" | "viewport" => Some(BoundaryMode::FullViewport),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid scene config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scene config needs a non-empty title line")]
    EmptyTitle,
}

/// Scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    // === Text ===
    /// The two fixed title lines
    pub title_lines: [String; 2],
    /// Description sentence, word-wrapped to the container width
    pub description: String,

    // === Style ===
    /// Glyph ink (any CSS colour)
    pub ink: String,
    /// CSS font family for glyphs
    pub font_family: String,

    // === Physics ===
    pub boundary_mode: BoundaryMode,
    /// Reduced motion: the pointer proxy never enters the world
    pub reduced_motion: bool,

    // === Collaborators ===
    /// Subscription endpoint (JSON POST)
    pub subscribe_endpoint: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title_lines: ["Hello there,".to_string(), "I build stuff".to_string()],
            description: "I write software, tinker with physics, and now and then blog about \
                          what I learn. Move your cursor through these letters and see what \
                          happens."
                .to_string(),

            ink: "#1f1a17".to_string(),
            font_family: "ui-monospace, Menlo, monospace".to_string(),

            boundary_mode: BoundaryMode::Contained,
            reduced_motion: false,

            subscribe_endpoint: "/api/subscribe".to_string(),
        }
    }
}

impl SceneConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.title_lines.iter().all(|l| l.trim().is_empty()) {
            return Err(ConfigError::EmptyTitle);
        }
        Ok(config)
    }

    /// Whether pointer input should reach the physics world
    pub fn effective_pointer(&self) -> bool {
        !self.reduced_motion
    }

    /// Element holding the inline JSON config
    const CONFIG_ELEMENT_ID: &'static str = "scene-config";

    /// Load config from the page's inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = text {
            match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded scene config from #{}", Self::CONFIG_ELEMENT_ID);
                    return config;
                }
                Err(e) => log::warn!("{e}; using defaults"),
            }
        }

        log::info!("Using default scene config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No #{} outside the browser", Self::CONFIG_ELEMENT_ID);
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SceneConfig::from_json(r#"{"boundary_mode": "full_viewport"}"#).unwrap();
        assert_eq!(config.boundary_mode, BoundaryMode::FullViewport);
        assert_eq!(config.title_lines, SceneConfig::default().title_lines);
        assert!(config.effective_pointer());
    }

    #[test]
    fn test_reduced_motion_disables_pointer() {
        let config = SceneConfig::from_json(r#"{"reduced_motion": true}"#).unwrap();
        assert!(!config.effective_pointer());
    }

    #[test]
    fn test_rejects_blank_title() {
        let err = SceneConfig::from_json(r#"{"title_lines": ["  ", ""]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyTitle));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            SceneConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_boundary_mode_from_str() {
        assert_eq!(BoundaryMode::from_str("Full-Viewport"), Some(BoundaryMode::FullViewport));
        assert_eq!(BoundaryMode::from_str("contained"), Some(BoundaryMode::Contained));
        assert_eq!(BoundaryMode::from_str("sideways"), None);
        assert_eq!(BoundaryMode::FullViewport.as_str(), "full_viewport");
    }
}
