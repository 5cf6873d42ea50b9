#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub mod attribute;
pub mod bridge;
pub mod config;
pub mod document;
pub mod element;
/// Error types shared by every fallible operation.
pub mod error;
pub mod host;
mod lifecycle;
pub mod logging;
pub mod named_items;
pub mod representation;
pub mod resolve;


#[doc(inline)]
pub use config::{DocumentSettings, FrameSettings, HtmlMode, Settings, StaticFrame};
#[doc(inline)]
pub use document::{Document, Node, NodeData, NodeId};
#[doc(inline)]
pub use element::{ElementKind, EmbeddedElement};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use host::{Frame, Host, ImageSupport, RenderKind, RenderTree, StyleSink};
#[doc(inline)]
pub use representation::Representation;

pub mod prelude {
    //! Commonly used types and collaborator traits.
    pub use crate::attribute::{AttrName, StyleEffect};
    pub use crate::bridge::BridgeHandle;
    pub use crate::config::{DocumentSettings, FrameSettings, HtmlMode, Settings, StaticFrame};
    pub use crate::document::{Document, NodeId};
    pub use crate::element::ElementKind;
    pub use crate::error::{Error, Result};
    pub use crate::host::{
        DecoderImageSupport, Frame, Host, ImageSupport, RenderKind, RenderTree, RendererId,
        StyleSink, WidgetId, WidgetRequest,
    };
    pub use crate::representation::Representation;
}
