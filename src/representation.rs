//! Choosing how an embedded-content element is rendered.

use core::fmt;

use image::ImageFormat;

use crate::element::{ElementKind, EmbeddedElement};
use crate::host::{Frame, ImageSupport, RenderKind};

/// Rendering category of an embedded-content element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Displayed as an image.
    Image,
    /// Hosted plugin widget.
    Plugin,
    /// Hosted Java applet widget.
    Applet,
    /// Light children rendered in place of the element.
    FallbackContent,
    /// Nothing is rendered.
    NoRenderer,
}

impl Representation {
    /// Whether this representation is backed by a hosted widget.
    #[must_use]
    pub const fn hosts_widget(self) -> bool {
        matches!(self, Self::Plugin | Self::Applet)
    }

    /// Render object factory used for an element of `kind`.
    ///
    /// Applets that cannot run still get a placeholder box.
    #[must_use]
    pub const fn render_kind(self, kind: ElementKind) -> Option<RenderKind> {
        match (self, kind) {
            (Self::Image, _) => Some(RenderKind::Image),
            (Self::Applet, _) => Some(RenderKind::Applet),
            (Self::Plugin, ElementKind::Applet) => Some(RenderKind::EmptyApplet),
            (Self::Plugin, _) => Some(RenderKind::PartObject),
            (Self::FallbackContent, _) => Some(RenderKind::Fallback),
            (Self::NoRenderer, _) => None,
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Image => "image",
            Self::Plugin => "plugin",
            Self::Applet => "applet",
            Self::FallbackContent => "fallback-content",
            Self::NoRenderer => "no-renderer",
        })
    }
}

/// Frame capabilities relevant to representation choice.
///
/// A document without a frame has no capabilities at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Java applets may run.
    pub java_enabled: bool,
    /// Plugins may be instantiated.
    pub plugins_enabled: bool,
}

impl Capabilities {
    /// Reads the capabilities of an optional frame.
    #[must_use]
    pub fn of(frame: Option<&dyn Frame>) -> Self {
        frame.map_or_else(Self::default, |frame| Self {
            java_enabled: frame.java_enabled(),
            plugins_enabled: frame.plugins_enabled(),
        })
    }
}

const DATA_SCHEME: &str = "data:";
const DATA_DEFAULT_MIME: &str = "text/plain";

/// Extracts the MIME type of a `data:` URL.
///
/// The type is whatever sits between the five-character `data:` prefix and
/// the first `;` (or, failing that, the first `,`) in the URL. An empty type
/// means `text/plain`. Returns `None` for other URLs and for `data:` URLs with
/// neither delimiter.
#[must_use]
pub fn sniff_data_url_mime(url: &str) -> Option<&str> {
    if !url.starts_with(DATA_SCHEME) {
        return None;
    }
    let index = url.find(';').or_else(|| url.find(','))?;
    if index > DATA_SCHEME.len() {
        Some(&url[DATA_SCHEME.len()..index])
    } else {
        Some(DATA_DEFAULT_MIME)
    }
}

/// Guesses an image MIME type from the file extension of a URL path.
#[must_use]
pub fn guess_image_mime(url: &str) -> Option<&'static str> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default();
    let (_, extension) = file.rsplit_once('.')?;
    ImageFormat::from_extension(extension).map(|format| format.to_mime_type())
}

impl EmbeddedElement {
    /// Whether the element's content is an image the host can display.
    ///
    /// With no explicit type, a `data:` URL's MIME type is sniffed and stored
    /// as the service type; later calls reuse it. Other URLs without a type
    /// are judged by their file extension, which is not stored.
    pub fn is_image_type<I: ImageSupport + ?Sized>(&mut self, images: &I) -> bool {
        if self.service_type.is_empty() {
            if let Some(mime) = sniff_data_url_mime(&self.url) {
                self.service_type = mime.to_owned();
            }
        }
        if self.service_type.is_empty() {
            return guess_image_mime(&self.url).is_some_and(|mime| images.supports_type(mime));
        }
        images.supports_type(&self.service_type)
    }

    /// Picks the representation for the element's current fields.
    pub fn resolve_representation<I: ImageSupport + ?Sized>(
        &mut self,
        images: &I,
        capabilities: Capabilities,
    ) -> Representation {
        if self.kind() == ElementKind::Param {
            return Representation::NoRenderer;
        }
        if self.uses_fallback_content {
            return Representation::FallbackContent;
        }
        if self.is_image_type(images) {
            return Representation::Image;
        }
        if self.kind() == ElementKind::Applet
            && capabilities.java_enabled
            && self.attribute("code").is_some_and(|code| !code.is_empty())
        {
            return Representation::Applet;
        }
        if !capabilities.plugins_enabled {
            return Representation::NoRenderer;
        }
        Representation::Plugin
    }

    /// Whether the element gets a render object at all.
    ///
    /// `parent_renders_object` is true when the element is a direct child of
    /// an object that already owns rendering for its subtree.
    pub fn renderer_is_needed<I: ImageSupport + ?Sized>(
        &mut self,
        images: &I,
        capabilities: Capabilities,
        parent_renders_object: bool,
    ) -> bool {
        match self.kind() {
            ElementKind::Applet => self.attribute("code").is_some_and(|code| !code.is_empty()),
            ElementKind::Embed => capabilities.plugins_enabled && !parent_renders_object,
            ElementKind::Object => {
                self.uses_fallback_content
                    || self.is_image_type(images)
                    || capabilities.plugins_enabled
            }
            ElementKind::Param => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::DecoderImageSupport;

    const ALL: Capabilities = Capabilities {
        java_enabled: true,
        plugins_enabled: true,
    };

    const NONE: Capabilities = Capabilities {
        java_enabled: false,
        plugins_enabled: false,
    };

    fn object(url: &str, service_type: &str) -> EmbeddedElement {
        let mut element = EmbeddedElement::new(ElementKind::Object);
        element.url = url.to_owned();
        element.service_type = service_type.to_owned();
        element
    }

    #[test]
    fn test_sniff_data_url() {
        assert_eq!(sniff_data_url_mime("data:;base64,Zm9v"), Some("text/plain"));
        assert_eq!(sniff_data_url_mime("data:,hello"), Some("text/plain"));
        assert_eq!(
            sniff_data_url_mime("data:image/png;base64,Zm9v"),
            Some("image/png")
        );
        assert_eq!(sniff_data_url_mime("data:text/html,<p>"), Some("text/html"));
        assert_eq!(sniff_data_url_mime("data:nodelimiter"), None);
        assert_eq!(sniff_data_url_mime("http://x/a;b"), None);
    }

    #[test]
    fn test_data_url_sniff_is_memoized() {
        let mut element = object("data:;base64,Zm9v", "");
        assert!(!element.is_image_type(&DecoderImageSupport));
        assert_eq!(element.service_type(), "text/plain");

        let mut element = object("data:image/png;base64,Zm9v", "");
        assert!(element.is_image_type(&DecoderImageSupport));
        assert_eq!(element.service_type(), "image/png");
    }

    #[test]
    fn test_explicit_type_wins_over_url() {
        let mut element = object("data:image/png;base64,Zm9v", "application/x-foo");
        assert!(!element.is_image_type(&DecoderImageSupport));
        assert_eq!(element.service_type(), "application/x-foo");
    }

    #[test]
    fn test_extension_guess_is_not_stored() {
        let mut element = object("http://x/pic.png?size=2#top", "");
        assert!(element.is_image_type(&DecoderImageSupport));
        assert_eq!(element.service_type(), "");

        let mut element = object("http://x/movie.swf", "");
        assert!(!element.is_image_type(&DecoderImageSupport));
    }

    #[test]
    fn test_guess_image_mime() {
        assert_eq!(guess_image_mime("http://x/pic.PNG"), Some("image/png"));
        assert_eq!(guess_image_mime("http://x.com/dir.gif/"), None);
        assert_eq!(guess_image_mime("http://x/no-extension"), None);
        assert_eq!(guess_image_mime(""), None);
    }

    #[test]
    fn test_representation_order() {
        let mut element = object("http://x/pic.png", "");
        assert_eq!(
            element.resolve_representation(&DecoderImageSupport, NONE),
            Representation::Image
        );

        let mut element = object("http://x/movie", "application/x-foo");
        assert_eq!(
            element.resolve_representation(&DecoderImageSupport, ALL),
            Representation::Plugin
        );
        assert_eq!(
            element.resolve_representation(&DecoderImageSupport, NONE),
            Representation::NoRenderer
        );

        element.uses_fallback_content = true;
        assert_eq!(
            element.resolve_representation(&DecoderImageSupport, ALL),
            Representation::FallbackContent
        );
    }

    #[test]
    fn test_applet_representation() {
        let mut applet = EmbeddedElement::new(ElementKind::Applet);
        applet.store_attribute("code", "Main.class");
        assert_eq!(
            applet.resolve_representation(&DecoderImageSupport, ALL),
            Representation::Applet
        );

        let no_java = Capabilities {
            java_enabled: false,
            plugins_enabled: true,
        };
        let representation = applet.resolve_representation(&DecoderImageSupport, no_java);
        assert_eq!(representation, Representation::Plugin);
        assert_eq!(
            representation.render_kind(ElementKind::Applet),
            Some(RenderKind::EmptyApplet)
        );
    }

    #[test]
    fn test_renderer_is_needed() {
        let mut applet = EmbeddedElement::new(ElementKind::Applet);
        assert!(!applet.renderer_is_needed(&DecoderImageSupport, ALL, false));
        applet.store_attribute("code", "Main.class");
        assert!(applet.renderer_is_needed(&DecoderImageSupport, NONE, false));

        let mut embed = EmbeddedElement::new(ElementKind::Embed);
        assert!(embed.renderer_is_needed(&DecoderImageSupport, ALL, false));
        assert!(!embed.renderer_is_needed(&DecoderImageSupport, ALL, true));
        assert!(!embed.renderer_is_needed(&DecoderImageSupport, NONE, false));

        let mut plugin = object("http://x/movie", "application/x-foo");
        assert!(plugin.renderer_is_needed(&DecoderImageSupport, ALL, false));
        assert!(!plugin.renderer_is_needed(&DecoderImageSupport, NONE, false));

        let mut picture = object("http://x/pic.png", "");
        assert!(picture.renderer_is_needed(&DecoderImageSupport, NONE, false));

        let mut param = EmbeddedElement::new(ElementKind::Param);
        assert!(!param.renderer_is_needed(&DecoderImageSupport, ALL, false));
    }

    #[test]
    fn test_hosts_widget() {
        assert!(Representation::Plugin.hosts_widget());
        assert!(Representation::Applet.hosts_widget());
        assert!(!Representation::Image.hosts_widget());
        assert!(!Representation::FallbackContent.hosts_widget());
        assert_eq!(Representation::NoRenderer.render_kind(ElementKind::Object), None);
    }
}
