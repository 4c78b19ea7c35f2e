//! Page configuration: endpoint paths, element ids, and logging
//!
//! Every field has a built-in default matching the stock page markup, so an
//! empty TOML document yields a working configuration. A page overrides
//! individual values by embedding a TOML block; unknown keys are rejected.

use crate::{Error, Result};
use serde::Deserialize;

/// Front-end configuration loaded from TOML
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    /// Backend endpoint locations
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// DOM element ids and input names
    #[serde(default)]
    pub elements: ElementIds,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl UiConfig {
    /// Parse a TOML document, filling omitted keys with defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Backend endpoint locations
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    /// Absolute origin the paths are resolved against
    ///
    /// In the browser this falls back to `window.location.origin`.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_chat_path")]
    pub chat: String,

    #[serde(default = "default_plan_path")]
    pub generate_plan: String,

    #[serde(default = "default_upload_path")]
    pub upload: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            chat: default_chat_path(),
            generate_plan: default_plan_path(),
            upload: default_upload_path(),
        }
    }
}

impl EndpointConfig {
    /// Join `base` with an endpoint path, tolerating a trailing slash on `base`
    pub fn resolve(base: &str, path: &str) -> String {
        let base = base.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

/// DOM element ids (and input names) the controllers bind to
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ElementIds {
    // === Chat ===
    pub chat_form: String,
    pub chat_input: String,
    pub chat_history: String,
    pub chat_use_rag: String,

    // === Learning plan ===
    pub plan_form: String,
    pub plan_result: String,
    /// `name` attribute shared by the goal checkboxes
    pub goals_name: String,

    // === Upload ===
    pub upload_form: String,
    pub upload_file: String,
    pub result_section: String,
    pub original_audio: String,
    pub midi_player: String,

    // === Visualizer ===
    pub visualizer: String,
    /// `name` attribute shared by the visualization-type radios
    pub visualization_type_name: String,
    pub note_height: String,
    pub note_height_value: String,
    pub note_speed: String,
    pub note_speed_value: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            chat_form: "chatForm".to_string(),
            chat_input: "userMessage".to_string(),
            chat_history: "chatHistory".to_string(),
            chat_use_rag: "useRag".to_string(),
            plan_form: "learningPlanForm".to_string(),
            plan_result: "planResult".to_string(),
            goals_name: "goals".to_string(),
            upload_form: "uploadForm".to_string(),
            upload_file: "audioFile".to_string(),
            result_section: "resultSection".to_string(),
            original_audio: "originalAudio".to_string(),
            midi_player: "midiPlayer".to_string(),
            visualizer: "midiVisualizer".to_string(),
            visualization_type_name: "visualizationType".to_string(),
            note_height: "noteHeight".to_string(),
            note_height_value: "noteHeightValue".to_string(),
            note_speed: "noteSpeed".to_string(),
            note_speed_value: "noteSpeedValue".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_chat_path() -> String {
    "/chat".to_string()
}

fn default_plan_path() -> String {
    "/generate-plan".to_string()
}

fn default_upload_path() -> String {
    "/upload".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
