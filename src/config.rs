//! Settings for documents and the frame hosting them.
//!
//! Settings are plain serde structs so embedders can keep them in a JSON file
//! next to the rest of their configuration. Every field has a default, so an
//! empty object `{}` is a valid settings file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bridge::BridgeHandle;
use crate::error::Result;
use crate::host::{Frame, WidgetId};

/// Parsing mode of the owning document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HtmlMode {
    /// Plain HTML. Named items are supported.
    #[default]
    Html,
    /// XHTML. Named items are not tracked and `id` doubles as `name` for params and applets.
    Xhtml,
}

/// Document-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// Parsing mode.
    pub mode: HtmlMode,
    /// Base URL that relative `data`, `src` and `code` attributes resolve against.
    pub base_url: Option<String>,
}

/// Capabilities of the frame the document is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    /// Whether Java applets may run.
    pub java_enabled: bool,
    /// Whether plugins may be instantiated.
    pub plugins_enabled: bool,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            java_enabled: true,
            plugins_enabled: true,
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Document settings.
    pub document: DocumentSettings,
    /// Frame settings.
    pub frame: FrameSettings,
    /// Optional `tracing` filter directive used by [`crate::logging::install`].
    pub log_filter: Option<String>,
}

impl Settings {
    /// Parses settings from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be read and
    /// [`crate::Error::Config`] if its content is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// A frame driven purely by [`FrameSettings`].
///
/// It has no scripting bridge, so every handle request yields nothing. Useful
/// for headless hosts that only need representation decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticFrame {
    settings: FrameSettings,
}

impl StaticFrame {
    /// Creates a frame with the given capabilities.
    #[must_use]
    pub const fn new(settings: FrameSettings) -> Self {
        Self { settings }
    }

    /// Returns the capabilities of this frame.
    #[must_use]
    pub const fn settings(&self) -> FrameSettings {
        self.settings
    }
}

impl Frame for StaticFrame {
    fn java_enabled(&self) -> bool {
        self.settings.java_enabled
    }

    fn plugins_enabled(&self) -> bool {
        self.settings.plugins_enabled
    }

    fn object_instance_for_widget(&mut self, _widget: WidgetId) -> Option<BridgeHandle> {
        None
    }

    fn embed_instance_for_widget(&mut self, _widget: WidgetId) -> Option<BridgeHandle> {
        None
    }

    fn applet_instance_for_widget(&mut self, _widget: WidgetId) -> Option<BridgeHandle> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let settings = Settings::from_json_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.frame.java_enabled);
        assert!(settings.frame.plugins_enabled);
        assert_eq!(settings.document.mode, HtmlMode::Html);
    }

    #[test]
    fn test_partial_settings() {
        let settings = Settings::from_json_str(
            r#"{
                "document": { "mode": "xhtml", "base_url": "http://example.com/dir/" },
                "frame": { "plugins_enabled": false },
                "log_filter": "embedded_content=trace"
            }"#,
        )
        .unwrap();

        assert_eq!(settings.document.mode, HtmlMode::Xhtml);
        assert_eq!(
            settings.document.base_url.as_deref(),
            Some("http://example.com/dir/")
        );
        assert!(settings.frame.java_enabled);
        assert!(!settings.frame.plugins_enabled);
        assert_eq!(settings.log_filter.as_deref(), Some("embedded_content=trace"));
    }

    #[test]
    fn test_malformed_settings() {
        let result = Settings::from_json_str(r#"{ "frame": { "java_enabled": "yes" } }"#);
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_missing_settings_file() {
        let result = Settings::load("/definitely/not/here/settings.json");
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_static_frame_has_no_bridge() {
        let mut frame = StaticFrame::new(FrameSettings {
            java_enabled: false,
            plugins_enabled: true,
        });
        assert!(!frame.java_enabled());
        assert!(frame.plugins_enabled());
        assert!(frame.object_instance_for_widget(WidgetId::new(1)).is_none());
        assert!(frame.applet_instance_for_widget(WidgetId::new(1)).is_none());
    }
}
