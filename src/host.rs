//! The seam between this core and the engine that hosts it.
//!
//! The core never owns render objects or widgets. It asks the host to create
//! and destroy them and keeps only the opaque [`RendererId`] it was handed.
//! Everything the core needs from the outside world is expressed as one of the
//! traits in this module:
//!
//! - [`Frame`]: capability switches and scripting-bridge handle acquisition.
//! - [`ImageSupport`]: whether a MIME type can be decoded as an image.
//! - [`StyleSink`]: presentational style effects and re-style requests.
//! - [`RenderTree`]: render object and widget factories.
//!
//! [`Host`] bundles them; document operations are generic over it.

use core::fmt;

use image::ImageFormat;
use mime::Mime;

use crate::attribute::{AttrName, StyleEffect};
use crate::bridge::BridgeHandle;
use crate::document::{Document, NodeId};

/// Opaque key of a render object owned by the host's render tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RendererId(u64);

impl RendererId {
    /// Wraps a host-assigned identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the host-assigned identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Opaque key of a platform widget backing a plugin or applet render object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Wraps a host-assigned identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the host-assigned identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Render object factories the core may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderKind {
    /// An image box.
    Image,
    /// A plugin part hosting a widget.
    PartObject,
    /// A Java applet hosting a widget.
    Applet,
    /// Placeholder box for an applet that cannot run.
    EmptyApplet,
    /// Ordinary box whose children are the element's light children.
    Fallback,
}

impl RenderKind {
    /// Whether render objects of this kind own a platform widget.
    #[must_use]
    pub const fn hosts_widget(self) -> bool {
        matches!(self, Self::PartObject | Self::Applet)
    }
}

impl fmt::Display for RenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Image => "image",
            Self::PartObject => "part-object",
            Self::Applet => "applet",
            Self::EmptyApplet => "empty-applet",
            Self::Fallback => "fallback",
        })
    }
}

/// Everything the widget factory needs to instantiate a plugin or applet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetRequest {
    /// Render object kind the widget belongs to.
    pub kind: Option<RenderKind>,
    /// Resolved content URL.
    pub url: String,
    /// Lowercased MIME type without parameters.
    pub service_type: String,
    /// `classid` of an object element.
    pub class_id: String,
    /// Plugin download page of an embed element.
    pub plugin_page: String,
    /// Ordered construction arguments, including child param name/value pairs.
    pub args: Vec<(String, String)>,
}

impl WidgetRequest {
    /// Returns the first argument value stored under `key`.
    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Capabilities and scripting bridge of the frame displaying the document.
pub trait Frame {
    /// Whether Java applets may run.
    fn java_enabled(&self) -> bool;
    /// Whether plugins may be instantiated.
    fn plugins_enabled(&self) -> bool;
    /// Bridge handle for a widget created from an `<object>`.
    fn object_instance_for_widget(&mut self, widget: WidgetId) -> Option<BridgeHandle>;
    /// Bridge handle for a widget created from an `<embed>`.
    fn embed_instance_for_widget(&mut self, widget: WidgetId) -> Option<BridgeHandle>;
    /// Bridge handle for a widget running a Java applet.
    fn applet_instance_for_widget(&mut self, widget: WidgetId) -> Option<BridgeHandle>;
}

/// Image decoding capability.
pub trait ImageSupport {
    /// Whether content of the given MIME type can be displayed as an image.
    fn supports_type(&self, mime: &str) -> bool;
}

/// Receiver of presentational style effects.
pub trait StyleSink {
    /// Replaces the declarations `attribute` contributes to `node` with
    /// `effects`, in order.
    ///
    /// Called on every mutation of a presentational attribute, removal
    /// included. An empty slice clears the attribute's declarations.
    fn apply_style(&mut self, node: NodeId, attribute: AttrName, effects: &[StyleEffect]);
    /// Marks the node as needing a style pass; the host later calls
    /// [`Document::recalc_style`] for it.
    fn schedule_style_recalc(&mut self, node: NodeId);
}

/// Render object and widget factories.
pub trait RenderTree {
    /// Creates a render object for `node`. `None` means the host declined.
    fn create_renderer(&mut self, node: NodeId, kind: RenderKind) -> Option<RendererId>;
    /// Destroys a render object and any widget it owns.
    fn destroy_renderer(&mut self, renderer: RendererId);
    /// Returns the live widget owned by `renderer`, if any.
    fn widget(&self, renderer: RendererId) -> Option<WidgetId>;
    /// Creates or refreshes the widget of `renderer`.
    ///
    /// Widget construction may synchronously re-enter the document, most
    /// commonly through [`Document::recalc_style`] on the same node.
    fn update_widget(
        &mut self,
        document: &mut Document,
        node: NodeId,
        renderer: RendererId,
        request: &WidgetRequest,
    );
    /// Starts loading `url` into an image render object.
    fn load_image(&mut self, renderer: RendererId, url: &str) {
        let _ = (renderer, url);
    }
}

/// All collaborators the lifecycle needs.
pub trait Host: ImageSupport + StyleSink + RenderTree {
    /// The frame displaying the document, if it is displayed at all.
    fn frame(&mut self) -> Option<&mut dyn Frame>;
}

/// [`ImageSupport`] answered by the decoders compiled into the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecoderImageSupport;

impl ImageSupport for DecoderImageSupport {
    fn supports_type(&self, mime: &str) -> bool {
        let Ok(parsed) = mime.trim().parse::<Mime>() else {
            return false;
        };
        parsed.type_() == mime::IMAGE
            && ImageFormat::from_mime_type(parsed.essence_str())
                .is_some_and(|format| format.reading_enabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_support() {
        let images = DecoderImageSupport;
        assert!(images.supports_type("image/png"));
        assert!(images.supports_type("image/jpeg"));
        assert!(images.supports_type("image/gif"));
        assert!(!images.supports_type("application/x-shockwave-flash"));
        assert!(!images.supports_type("text/plain"));
        assert!(!images.supports_type(""));
    }

    #[test]
    fn test_widget_request_arg_lookup() {
        let request = WidgetRequest {
            args: vec![
                ("code".into(), "Main.class".into()),
                ("quality".into(), "high".into()),
            ],
            ..WidgetRequest::default()
        };
        assert_eq!(request.arg("code"), Some("Main.class"));
        assert_eq!(request.arg("quality"), Some("high"));
        assert_eq!(request.arg("missing"), None);
    }

    #[test]
    fn test_render_kind_display() {
        assert_eq!(RenderKind::PartObject.to_string(), "part-object");
        assert_eq!(RenderKind::EmptyApplet.to_string(), "empty-applet");
    }

    #[test]
    fn test_only_plugin_and_applet_boxes_host_widgets() {
        assert!(RenderKind::PartObject.hosts_widget());
        assert!(RenderKind::Applet.hosts_widget());
        assert!(!RenderKind::EmptyApplet.hosts_widget());
        assert!(!RenderKind::Image.hosts_widget());
        assert!(!RenderKind::Fallback.hosts_widget());
    }
}
