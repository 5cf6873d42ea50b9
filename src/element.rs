//! Embedded-content element state.
//!
//! The four element kinds share one state struct. Which fields matter depends
//! on the kind: params only use [`Param`], applets and objects use the
//! `complete` flag for "all params parsed", and only objects ever switch to
//! fallback content.

use core::fmt;

use crate::bridge::BridgeCache;
use crate::config::HtmlMode;
use crate::host::RendererId;
use crate::representation::Representation;

/// The embedded-content element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `<applet>`
    Applet,
    /// `<embed>`
    Embed,
    /// `<object>`
    Object,
    /// `<param>`
    Param,
}

impl ElementKind {
    /// The HTML tag name.
    #[must_use]
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::Applet => "applet",
            Self::Embed => "embed",
            Self::Object => "object",
            Self::Param => "param",
        }
    }

    /// Parses a tag name, ignoring ASCII case.
    #[must_use]
    pub fn from_tag_name(tag: &str) -> Option<Self> {
        [Self::Applet, Self::Embed, Self::Object, Self::Param]
            .into_iter()
            .find(|kind| kind.tag_name().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// Fields of a `<param>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Param {
    /// Argument name.
    pub name: String,
    /// Argument value.
    pub value: String,
    /// Content type of the value.
    pub content_type: String,
    /// `data`, `ref` or `object`.
    pub value_type: String,
}

/// An image loader kept while an element displays its content as an image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageLoader {
    source: String,
}

impl ImageLoader {
    /// The URL the loader currently points at.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Re-points the loader. Returns `true` if the source changed.
    pub(crate) fn update_from(&mut self, url: &str) -> bool {
        if self.source == url {
            return false;
        }
        url.clone_into(&mut self.source);
        true
    }
}

/// State of one applet, embed, object or param element.
pub struct EmbeddedElement {
    kind: ElementKind,
    attributes: Vec<(String, String)>,
    pub(crate) url: String,
    pub(crate) service_type: String,
    pub(crate) class_id: String,
    pub(crate) plugin_page: String,
    pub(crate) name: String,
    pub(crate) id: String,
    pub(crate) param: Param,
    pub(crate) attached: bool,
    pub(crate) needs_widget_update: bool,
    pub(crate) uses_fallback_content: bool,
    pub(crate) complete: bool,
    pub(crate) is_doc_named_item: bool,
    pub(crate) renderer: Option<RendererId>,
    pub(crate) representation: Option<Representation>,
    pub(crate) image_loader: Option<ImageLoader>,
    pub(crate) bridge: BridgeCache,
}

impl EmbeddedElement {
    /// Creates a detached element with no attributes.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
            url: String::new(),
            service_type: String::new(),
            class_id: String::new(),
            plugin_page: String::new(),
            name: String::new(),
            id: String::new(),
            param: Param::default(),
            attached: false,
            needs_widget_update: false,
            uses_fallback_content: false,
            complete: false,
            // An object without children qualifies.
            is_doc_named_item: true,
            renderer: None,
            representation: None,
            image_loader: None,
            bridge: BridgeCache::new(),
        }
    }

    /// Element kind.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Resolved content URL (`data`, `src` or `code`).
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Normalized MIME type; may have been sniffed from a `data:` URL.
    #[must_use]
    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    /// `classid` of an object.
    #[must_use]
    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    /// Plugin download page of an embed.
    #[must_use]
    pub fn plugin_page(&self) -> &str {
        &self.plugin_page
    }

    /// Current `name` value.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current `id` value.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Param fields; empty for other kinds.
    #[must_use]
    pub const fn param(&self) -> &Param {
        &self.param
    }

    /// Whether the element is between `attach` and `detach`.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether a widget (re)build is pending.
    #[must_use]
    pub const fn needs_widget_update(&self) -> bool {
        self.needs_widget_update
    }

    /// Whether the element renders its light children instead of a widget.
    #[must_use]
    pub const fn uses_fallback_content(&self) -> bool {
        self.uses_fallback_content
    }

    /// Whether the parser has closed the element (all params available).
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether an object currently qualifies for named-item lookup.
    #[must_use]
    pub const fn is_doc_named_item(&self) -> bool {
        self.is_doc_named_item
    }

    /// Render object created for this element, if any.
    #[must_use]
    pub const fn renderer(&self) -> Option<RendererId> {
        self.renderer
    }

    /// Representation chosen by the last attach; `None` while detached.
    #[must_use]
    pub const fn representation(&self) -> Option<Representation> {
        self.representation
    }

    /// Image loader, present while the image path is active.
    #[must_use]
    pub const fn image_loader(&self) -> Option<&ImageLoader> {
        self.image_loader.as_ref()
    }

    /// Whether a scripting-bridge handle is currently held.
    #[must_use]
    pub const fn has_bridge(&self) -> bool {
        self.bridge.is_holding()
    }

    /// Raw attribute value, matched ignoring ASCII case.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Raw attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub(crate) fn store_attribute(&mut self, name: &str, value: &str) {
        if let Some(slot) = self
            .attributes
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            value.clone_into(&mut slot.1);
        } else {
            self.attributes
                .push((name.to_ascii_lowercase(), value.to_owned()));
        }
    }

    pub(crate) fn drop_attribute(&mut self, name: &str) -> bool {
        let before = self.attributes.len();
        self.attributes
            .retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        before != self.attributes.len()
    }

    /// Construction arguments of an applet widget, before any params.
    ///
    /// `code` and `baseURL` are always present; the rest only when the
    /// corresponding attribute is set. XHTML documents name applets by `id`.
    #[must_use]
    pub fn applet_arguments(&self, mode: HtmlMode, base_url: &str) -> Vec<(String, String)> {
        let name_attribute = match mode {
            HtmlMode::Html => "name",
            HtmlMode::Xhtml => "id",
        };
        let mut args = vec![(
            "code".to_owned(),
            self.attribute("code").unwrap_or_default().to_owned(),
        )];
        let optional = |args: &mut Vec<(String, String)>, key: &str, attribute: &str| {
            if let Some(value) = self.attribute(attribute) {
                args.push((key.to_owned(), value.to_owned()));
            }
        };
        optional(&mut args, "codeBase", "codebase");
        optional(&mut args, "name", name_attribute);
        optional(&mut args, "archive", "archive");
        args.push(("baseURL".to_owned(), base_url.to_owned()));
        optional(&mut args, "mayScript", "mayscript");
        args
    }

    /// Whether the element takes part in named-item lookup right now,
    /// ignoring connectedness.
    pub(crate) const fn is_named_item_eligible(&self) -> bool {
        match self.kind {
            ElementKind::Applet | ElementKind::Embed => true,
            ElementKind::Object => self.is_doc_named_item,
            ElementKind::Param => false,
        }
    }
}

impl fmt::Debug for EmbeddedElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedElement")
            .field("kind", &self.kind)
            .field("url", &self.url)
            .field("service_type", &self.service_type)
            .field("name", &self.name)
            .field("id", &self.id)
            .field("attached", &self.attached)
            .field("needs_widget_update", &self.needs_widget_update)
            .field("uses_fallback_content", &self.uses_fallback_content)
            .field("representation", &self.representation)
            .field("renderer", &self.renderer)
            .field("bridge", &self.bridge)
            .finish_non_exhaustive()
    }
}

impl Drop for EmbeddedElement {
    fn drop(&mut self) {
        // The handle references a widget owned by the render tree, which is
        // gone by now. Only detach may release it.
        if !std::thread::panicking() {
            assert!(
                !self.bridge.is_holding(),
                "{} element destroyed while still holding a scripting bridge handle",
                self.kind
            );
        }
    }
}
