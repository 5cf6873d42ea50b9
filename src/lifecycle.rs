//! Attach/detach state machine of embedded-content elements.
//!
//! Widget construction is deferred by one style pass. The first attach of a
//! plugin or applet only raises `needs_widget_update` and asks the host for a
//! re-style; [`Document::recalc_style`] then detaches and re-attaches the
//! element, and that second attach builds the widget. The flag is cleared
//! before the host builds the widget, so a host that re-enters
//! `recalc_style` from inside widget construction finds nothing to do.
//!
//! Detach is the only place a scripting-bridge handle is released, and it
//! always happens before the render object owning the widget is destroyed.

use crate::bridge::{self, BridgeHandle, Lookup};
use crate::document::{Document, NodeData, NodeId};
use crate::element::{ElementKind, ImageLoader};
use crate::error::{Error, Result};
use crate::host::{Host, RenderKind, RendererId, WidgetRequest};
use crate::representation::{Capabilities, Representation};

fn capabilities<H: Host + ?Sized>(host: &mut H) -> Capabilities {
    Capabilities::of(host.frame().map(|frame| &*frame))
}

impl Document {
    // ========================================================================
    // Attach
    // ========================================================================

    /// Attaches `node` and its subtree to the render tree.
    ///
    /// Attaching an attached node does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HierarchyRequest`] if the node is not connected.
    pub fn attach<H: Host + ?Sized>(&mut self, node: NodeId, host: &mut H) -> Result<()> {
        let target = self.node(node)?;
        if target.attached {
            return Ok(());
        }
        if !target.connected {
            return Err(Error::HierarchyRequest("only connected nodes can be attached"));
        }
        if matches!(target.data, NodeData::Embedded(_)) {
            return self.attach_embedded(node, host);
        }
        self.node_mut(node)?.attached = true;
        self.attach_children(node, host)
    }

    fn attach_children<H: Host + ?Sized>(&mut self, node: NodeId, host: &mut H) -> Result<()> {
        let children = self.node(node)?.children.clone();
        for child in children {
            // Widget construction of an earlier sibling may have moved it.
            if self.node(child).is_ok_and(|current| current.parent == Some(node)) {
                self.attach(child, host)?;
            }
        }
        Ok(())
    }

    fn attach_embedded<H: Host + ?Sized>(&mut self, node: NodeId, host: &mut H) -> Result<()> {
        let capabilities = capabilities(host);
        let parent_renders_object = self.parent_renders_object(node);

        let element = self.element_mut(node)?;
        let representation =
            if element.renderer_is_needed(&*host, capabilities, parent_renders_object) {
                element.resolve_representation(&*host, capabilities)
            } else {
                Representation::NoRenderer
            };
        let kind = element.kind();
        let render_kind = representation.render_kind(kind);
        let renderer = render_kind.and_then(|render_kind| host.create_renderer(node, render_kind));
        element.attached = true;
        element.representation = Some(representation);
        element.renderer = renderer;
        self.node_mut(node)?.attached = true;
        tracing::debug!(?node, %kind, %representation, ?renderer, "attached");

        self.attach_children(node, host)?;

        let (Some(render_kind), Some(renderer)) = (render_kind, renderer) else {
            self.element_mut(node)?.needs_widget_update = false;
            return Ok(());
        };
        let element = self.element(node)?;
        if !element.attached || element.renderer != Some(renderer) {
            // A child re-entered and rebuilt this element already.
            return Ok(());
        }
        match render_kind {
            RenderKind::Image => self.start_image_load(node, renderer, host),
            widget_kind if widget_kind.hosts_widget() => {
                self.materialize_widget(node, renderer, widget_kind, host)
            }
            _ => {
                self.element_mut(node)?.needs_widget_update = false;
                Ok(())
            }
        }
    }

    /// Whether `node` sits directly inside an object that renders it.
    fn parent_renders_object(&self, node: NodeId) -> bool {
        self.node(node)
            .ok()
            .and_then(|current| current.parent)
            .and_then(|parent| self.element(parent).ok())
            .is_some_and(|parent| {
                parent.kind() == ElementKind::Object
                    && parent.renderer.is_some()
                    && !parent.uses_fallback_content
            })
    }

    fn start_image_load<H: Host + ?Sized>(
        &mut self,
        node: NodeId,
        renderer: RendererId,
        host: &mut H,
    ) -> Result<()> {
        let element = self.element_mut(node)?;
        element.needs_widget_update = false;
        let loader = element.image_loader.get_or_insert_with(ImageLoader::default);
        loader.update_from(&element.url);
        tracing::trace!(?node, url = %element.url, "image load requested");
        host.load_image(renderer, &element.url);
        Ok(())
    }

    /// Builds the widget, or defers it to the next style pass.
    fn materialize_widget<H: Host + ?Sized>(
        &mut self,
        node: NodeId,
        renderer: RendererId,
        render_kind: RenderKind,
        host: &mut H,
    ) -> Result<()> {
        let element = self.element_mut(node)?;
        if !element.needs_widget_update {
            element.needs_widget_update = true;
            tracing::trace!(?node, "widget update deferred to the next style pass");
            host.schedule_style_recalc(node);
            return Ok(());
        }
        // Cleared first: the host may re-enter attach or recalc_style.
        element.needs_widget_update = false;
        let request = self.widget_request(node, render_kind)?;
        tracing::debug!(?node, kind = %render_kind, url = %request.url, "building widget");
        host.update_widget(self, node, renderer, &request);
        Ok(())
    }

    /// Assembles what the widget factory needs for `node`.
    ///
    /// Applets lead with their own arguments; every kind then carries the
    /// name/value pairs of its child params in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] or [`Error::NotEmbedded`].
    pub fn widget_request(&self, node: NodeId, render_kind: RenderKind) -> Result<WidgetRequest> {
        let element = self.element(node)?;
        let mut args = if element.kind() == ElementKind::Applet {
            element.applet_arguments(self.mode(), self.base_url_str())
        } else {
            Vec::new()
        };
        args.extend(
            self.node(node)?
                .children
                .iter()
                .filter_map(|&child| self.element(child).ok())
                .filter(|child| child.kind() == ElementKind::Param && !child.param.name.is_empty())
                .map(|child| (child.param.name.clone(), child.param.value.clone())),
        );
        Ok(WidgetRequest {
            kind: Some(render_kind),
            url: element.url.clone(),
            service_type: element.service_type.clone(),
            class_id: element.class_id.clone(),
            plugin_page: element.plugin_page.clone(),
            args,
        })
    }

    // ========================================================================
    // Detach
    // ========================================================================

    /// Detaches `node` and its subtree from the render tree.
    ///
    /// Scripting-bridge handles are released before any render object is
    /// destroyed. An element that lost a live widget keeps
    /// `needs_widget_update` raised so the next attach rebuilds it at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] for stale keys.
    pub fn detach<H: Host + ?Sized>(&mut self, node: NodeId, host: &mut H) -> Result<()> {
        let target = self.node(node)?;
        if !target.attached {
            return Ok(());
        }
        if let Some(element) = target.as_embedded() {
            let widget_existed = element
                .representation
                .is_some_and(Representation::hosts_widget)
                && element
                    .renderer
                    .is_some_and(|renderer| host.widget(renderer).is_some());
            let element = self.element_mut(node)?;
            if widget_existed {
                element.needs_widget_update = true;
            }
            if element.bridge.clear() {
                tracing::trace!(?node, "bridge handle released");
            }
        }

        let children = self.node(node)?.children.clone();
        for child in children {
            if self.contains(child) {
                self.detach(child, host)?;
            }
        }

        let target = self.node_mut(node)?;
        target.attached = false;
        if let NodeData::Embedded(element) = &mut target.data {
            element.attached = false;
            element.representation = None;
            let renderer = element.renderer.take();
            tracing::debug!(?node, kind = %element.kind(), ?renderer, "detached");
            if let Some(renderer) = renderer {
                host.destroy_renderer(renderer);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Style Pass
    // ========================================================================

    /// Runs the style pass for `node` and its subtree.
    ///
    /// An attached element with a render object and a pending widget update
    /// is detached and re-attached; this is the only path that rebuilds a
    /// widget after the initial attach. Elements showing fallback content or
    /// image content are left alone: the image loader follows URL changes on
    /// its own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] for stale keys.
    pub fn recalc_style<H: Host + ?Sized>(&mut self, node: NodeId, host: &mut H) -> Result<()> {
        let stale = match &mut self.node_mut(node)?.data {
            NodeData::Embedded(element) => {
                element.attached
                    && element.needs_widget_update
                    && element.renderer.is_some()
                    && !element.uses_fallback_content
                    && !element.is_image_type(&*host)
            }
            _ => false,
        };
        if stale {
            tracing::debug!(?node, "rebuilding for pending widget update");
            self.detach(node, host)?;
            self.attach(node, host)?;
        }

        let children = self.node(node)?.children.clone();
        for child in children {
            if self.contains(child) {
                self.recalc_style(child, host)?;
            }
        }
        Ok(())
    }

    /// Tells an applet or object that the parser reached its end tag.
    ///
    /// All params are available from now on, so a connected element that is
    /// not showing fallback content schedules a widget rebuild. Later calls
    /// and other kinds do nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] or [`Error::NotEmbedded`].
    pub fn close_renderer<H: Host + ?Sized>(&mut self, node: NodeId, host: &mut H) -> Result<()> {
        let connected = self.node(node)?.connected;
        let element = self.element_mut(node)?;
        let closable = matches!(element.kind(), ElementKind::Applet | ElementKind::Object);
        if !closable || element.complete {
            return Ok(());
        }
        element.complete = true;
        tracing::trace!(?node, kind = %element.kind(), "element complete");
        if connected && !element.uses_fallback_content {
            element.needs_widget_update = true;
            host.schedule_style_recalc(node);
        }
        Ok(())
    }

    // ========================================================================
    // Fallback Content
    // ========================================================================

    /// Switches an object to rendering its light children, for good.
    ///
    /// Returns `false` without side effects if the object already shows
    /// fallback content or `node` is not an object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] or [`Error::NotEmbedded`].
    pub fn render_fallback_content<H: Host + ?Sized>(
        &mut self,
        node: NodeId,
        host: &mut H,
    ) -> Result<bool> {
        let element = self.element_mut(node)?;
        if element.kind() != ElementKind::Object || element.uses_fallback_content {
            return Ok(false);
        }
        element.uses_fallback_content = true;
        tracing::debug!(?node, "switching to fallback content");
        self.update_doc_named_item(node)?;

        if self.node(node)?.attached {
            self.detach(node, host)?;
            self.attach(node, host)?;
        }
        Ok(true)
    }

    // ========================================================================
    // Scripting Bridge
    // ========================================================================

    /// Returns the scripting-bridge handle of `node`, acquiring it on first use.
    ///
    /// A handle, or the host's answer that none exists, is cached until the
    /// next detach. Without a frame (or with Java disabled, for applets) or
    /// without a live widget nothing is requested and nothing is cached. An
    /// embed without a render object of its own uses the widget of its
    /// parent object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] or [`Error::NotEmbedded`].
    pub fn bridge<H: Host + ?Sized>(
        &mut self,
        node: NodeId,
        host: &mut H,
    ) -> Result<Option<&BridgeHandle>> {
        let element = self.element(node)?;
        if !matches!(element.bridge.lookup(), Lookup::Miss) {
            tracing::trace!(?node, "bridge cache hit");
            return Ok(self.element(node)?.bridge.handle());
        }
        let kind = element.kind();
        if kind == ElementKind::Param {
            return Ok(None);
        }

        let renderer = element.renderer.or_else(|| {
            if kind != ElementKind::Embed {
                return None;
            }
            let parent = self.node(node).ok()?.parent?;
            self.element(parent)
                .ok()
                .filter(|parent| parent.kind() == ElementKind::Object)
                .and_then(|parent| parent.renderer)
        });
        let Some(widget) = renderer.and_then(|renderer| host.widget(renderer)) else {
            tracing::trace!(?node, "no widget to bridge to");
            return Ok(None);
        };
        let Some(frame) = host.frame() else {
            tracing::debug!(?node, "no frame, bridge unavailable");
            return Ok(None);
        };
        if kind == ElementKind::Applet && !frame.java_enabled() {
            return Ok(None);
        }

        let handle = bridge::acquire(frame, widget, kind);
        tracing::debug!(?node, %kind, ?widget, acquired = handle.is_some(), "bridge requested");
        Ok(self.element_mut(node)?.bridge.store(handle))
    }
}
