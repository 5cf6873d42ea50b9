//! The document owning embedded-content elements.
//!
//! Nodes live in a [`SlotMap`] arena keyed by [`NodeId`]. The tree API is kept
//! to what the embedded-content elements react to: insertion and removal
//! (connectedness and named items), child list changes (object eligibility
//! and widget arguments) and attribute mutation.

use slotmap::SlotMap;
use url::Url;

use crate::attribute::{self, Classification, FieldUpdate, ParamField};
use crate::config::{DocumentSettings, HtmlMode};
use crate::element::{ElementKind, EmbeddedElement, ImageLoader};
use crate::error::{Error, Result};
use crate::host::Host;
use crate::named_items::{NameDomain, NamedItemIndex};
use crate::representation::Representation;
use crate::resolve::resolve_url;

slotmap::new_key_type! {
    /// Key of a node in a [`Document`].
    pub struct NodeId;
}

/// Payload of a node.
#[derive(Debug)]
pub enum NodeData {
    /// An applet, embed, object or param element.
    Embedded(EmbeddedElement),
    /// Any other element, by lowercased tag name.
    Element(String),
    /// Character data.
    Text(String),
}

/// A node in the document arena.
#[derive(Debug)]
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
    pub(crate) connected: bool,
    pub(crate) attached: bool,
}

impl Node {
    const fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
            connected: false,
            attached: false,
        }
    }

    /// Parent node, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Node payload.
    #[must_use]
    pub const fn data(&self) -> &NodeData {
        &self.data
    }

    /// Whether the node is reachable from the document root.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whether the node is attached to the render tree.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// The embedded-content element carried by this node, if any.
    #[must_use]
    pub const fn as_embedded(&self) -> Option<&EmbeddedElement> {
        match &self.data {
            NodeData::Embedded(element) => Some(element),
            _ => None,
        }
    }

    // Params and whitespace are the only children an object may have while
    // still being found by name.
    fn keeps_object_named(&self) -> bool {
        match &self.data {
            NodeData::Embedded(element) => element.kind() == ElementKind::Param,
            NodeData::Text(text) => text.bytes().all(|b| b.is_ascii_whitespace()),
            NodeData::Element(_) => false,
        }
    }
}

/// Index domains an element kind registers in.
const fn named_domains(kind: ElementKind) -> &'static [NameDomain] {
    match kind {
        ElementKind::Applet | ElementKind::Object => &[NameDomain::Name, NameDomain::Id],
        ElementKind::Embed => &[NameDomain::Name],
        ElementKind::Param => &[],
    }
}

/// A document: node arena, named-item index, mode and base URL.
#[derive(Debug)]
pub struct Document {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    named_items: NamedItemIndex,
    mode: HtmlMode,
    base_url: Option<Url>,
}

impl Document {
    /// Creates an empty document whose root is connected but not attached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBaseUrl`] if the configured base URL is not an
    /// absolute URL.
    pub fn new(settings: &DocumentSettings) -> Result<Self> {
        let base_url = settings.base_url.as_deref().map(Url::parse).transpose()?;
        let mut nodes = SlotMap::with_key();
        let mut root = Node::new(NodeData::Element("#document".to_owned()));
        root.connected = true;
        let root = nodes.insert(root);
        tracing::debug!(mode = ?settings.mode, ?base_url, "document created");
        Ok(Self {
            nodes,
            root,
            named_items: NamedItemIndex::new(),
            mode: settings.mode,
            base_url,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Parsing mode.
    #[must_use]
    pub const fn mode(&self) -> HtmlMode {
        self.mode
    }

    /// Base URL relative content URLs resolve against.
    #[must_use]
    pub const fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub(crate) fn base_url_str(&self) -> &str {
        self.base_url.as_ref().map_or("", Url::as_str)
    }

    /// Only HTML documents track named items.
    #[must_use]
    pub fn supports_named_items(&self) -> bool {
        self.mode == HtmlMode::Html
    }

    /// The name/id index.
    #[must_use]
    pub const fn named_items(&self) -> &NamedItemIndex {
        &self.named_items
    }

    /// Whether `node` is a live node of this document.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Looks up a node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] for stale or foreign keys.
    pub fn node(&self, node: NodeId) -> Result<&Node> {
        self.nodes.get(node).ok_or(Error::UnknownNode(node))
    }

    pub(crate) fn node_mut(&mut self, node: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(node).ok_or(Error::UnknownNode(node))
    }

    /// Looks up an embedded-content element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] for stale keys and
    /// [`Error::NotEmbedded`] for other node types.
    pub fn element(&self, node: NodeId) -> Result<&EmbeddedElement> {
        self.node(node)?
            .as_embedded()
            .ok_or(Error::NotEmbedded(node))
    }

    pub(crate) fn element_mut(&mut self, node: NodeId) -> Result<&mut EmbeddedElement> {
        match &mut self.node_mut(node)?.data {
            NodeData::Embedded(element) => Ok(element),
            _ => Err(Error::NotEmbedded(node)),
        }
    }

    // ========================================================================
    // Node Creation
    // ========================================================================

    /// Creates a detached element. Applet, embed, object and param tags
    /// produce embedded-content elements.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let data = ElementKind::from_tag_name(tag).map_or_else(
            || NodeData::Element(tag.to_ascii_lowercase()),
            |kind| NodeData::Embedded(EmbeddedElement::new(kind)),
        );
        self.nodes.insert(Node::new(data))
    }

    /// Creates a detached embedded-content element.
    pub fn create_embedded(&mut self, kind: ElementKind) -> NodeId {
        self.nodes
            .insert(Node::new(NodeData::Embedded(EmbeddedElement::new(kind))))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.nodes.insert(Node::new(NodeData::Text(text.to_owned())))
    }

    // ========================================================================
    // Tree Mutation
    // ========================================================================

    /// Appends `child` to `parent`.
    ///
    /// # Errors
    ///
    /// See [`Document::insert_child`].
    pub fn append_child<H: Host + ?Sized>(
        &mut self,
        parent: NodeId,
        child: NodeId,
        host: &mut H,
    ) -> Result<()> {
        let index = self.node(parent)?.children.len();
        self.insert_child(parent, index, child, host)
    }

    /// Inserts `child` at `index` among the children of `parent`.
    ///
    /// The child is connected if the parent is, attached if the parent is,
    /// and the parent is then told its children changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] for stale keys,
    /// [`Error::AlreadyParented`] if the child has a parent, and
    /// [`Error::HierarchyRequest`] for text parents, the root as a child, or
    /// cycles.
    pub fn insert_child<H: Host + ?Sized>(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
        host: &mut H,
    ) -> Result<()> {
        self.check_insertion(parent, child)?;

        let parent_node = self.node_mut(parent)?;
        let index = index.min(parent_node.children.len());
        parent_node.children.insert(index, child);
        let (connected, attached) = (parent_node.connected, parent_node.attached);
        self.node_mut(child)?.parent = Some(parent);

        if connected {
            self.set_subtree_connected(child, true);
        }
        if attached {
            self.attach(child, host)?;
        }
        self.children_changed(parent, host)
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;
        if matches!(parent_node.data, NodeData::Text(_)) {
            return Err(Error::HierarchyRequest("text nodes cannot have children"));
        }
        if child == self.root {
            return Err(Error::HierarchyRequest("the document root cannot be inserted"));
        }
        if child_node.parent.is_some() {
            return Err(Error::AlreadyParented(child));
        }
        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(Error::HierarchyRequest("a node cannot be inserted into itself"));
            }
            cursor = self.nodes.get(ancestor).and_then(|node| node.parent);
        }
        Ok(())
    }

    /// Removes `child` from `parent`, detaching and disconnecting its subtree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HierarchyRequest`] if `child` is not a child of
    /// `parent`.
    pub fn remove_child<H: Host + ?Sized>(
        &mut self,
        parent: NodeId,
        child: NodeId,
        host: &mut H,
    ) -> Result<()> {
        if self.node(child)?.parent != Some(parent) {
            return Err(Error::HierarchyRequest("node is not a child of the given parent"));
        }
        self.detach(child, host)?;

        self.node_mut(parent)?.children.retain(|&id| id != child);
        let child_node = self.node_mut(child)?;
        child_node.parent = None;
        if child_node.connected {
            self.set_subtree_connected(child, false);
        }
        self.children_changed(parent, host)
    }

    /// Replaces the character data of a text node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HierarchyRequest`] if `node` is not a text node.
    pub fn set_text<H: Host + ?Sized>(
        &mut self,
        node: NodeId,
        text: &str,
        host: &mut H,
    ) -> Result<()> {
        let target = self.node_mut(node)?;
        let NodeData::Text(content) = &mut target.data else {
            return Err(Error::HierarchyRequest("only text nodes carry character data"));
        };
        text.clone_into(content);
        let parent = target.parent;
        if let Some(parent) = parent {
            self.children_changed(parent, host)?;
        }
        Ok(())
    }

    /// Removes `node` from the tree and frees it and its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HierarchyRequest`] for the root.
    pub fn destroy<H: Host + ?Sized>(&mut self, node: NodeId, host: &mut H) -> Result<()> {
        if node == self.root {
            return Err(Error::HierarchyRequest("the document root cannot be destroyed"));
        }
        let parent = self.node(node)?.parent;
        match parent {
            Some(parent) => self.remove_child(parent, node, host)?,
            None => self.detach(node, host)?,
        }
        for id in self.subtree(node) {
            self.nodes.remove(id);
        }
        Ok(())
    }

    /// `node` and its descendants in preorder.
    pub(crate) fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(current) = self.nodes.get(id) {
                order.push(id);
                stack.extend(current.children.iter().rev().copied());
            }
        }
        order
    }

    fn set_subtree_connected(&mut self, node: NodeId, connected: bool) {
        for id in self.subtree(node) {
            if let Some(current) = self.nodes.get_mut(id) {
                current.connected = connected;
            }
            self.set_named_item_registration(id, connected);
        }
    }

    /// Child list notification; only objects react to it.
    ///
    /// An object re-evaluates whether it is a named item and, while connected
    /// and not showing fallback content, schedules a widget rebuild because
    /// its params may have changed.
    pub(crate) fn children_changed<H: Host + ?Sized>(
        &mut self,
        node: NodeId,
        host: &mut H,
    ) -> Result<()> {
        let target = self.node(node)?;
        let connected = target.connected;
        if target.as_embedded().map(EmbeddedElement::kind) != Some(ElementKind::Object) {
            return Ok(());
        }
        self.update_doc_named_item(node)?;

        let element = self.element_mut(node)?;
        if connected && !element.uses_fallback_content {
            element.needs_widget_update = true;
            host.schedule_style_recalc(node);
        }
        Ok(())
    }

    // ========================================================================
    // Named Items
    // ========================================================================

    /// Adds or removes every current key of `node`, if it is eligible.
    fn set_named_item_registration(&mut self, node: NodeId, register: bool) {
        if !self.supports_named_items() {
            return;
        }
        let Some(element) = self.nodes.get(node).and_then(Node::as_embedded) else {
            return;
        };
        if !element.is_named_item_eligible() {
            return;
        }
        for &domain in named_domains(element.kind()) {
            let key = match domain {
                NameDomain::Name => element.name.as_str(),
                NameDomain::Id => element.id.as_str(),
            };
            if register {
                self.named_items.add(domain, key, node);
            } else {
                self.named_items.remove(domain, key, node);
            }
        }
    }

    /// Recomputes whether an object qualifies as a named item.
    ///
    /// An object qualifies while it is not showing fallback content and all
    /// its children are params or whitespace. A flip moves both index entries
    /// together while the object is connected.
    pub(crate) fn update_doc_named_item(&mut self, node: NodeId) -> Result<()> {
        let target = self.node(node)?;
        let connected = target.connected;
        let element = self.element(node)?;
        let is_named_item = !element.uses_fallback_content
            && target
                .children
                .iter()
                .all(|&child| self.nodes.get(child).is_some_and(Node::keeps_object_named));
        if is_named_item == element.is_doc_named_item {
            return Ok(());
        }

        if connected && !is_named_item {
            self.set_named_item_registration(node, false);
        }
        self.element_mut(node)?.is_doc_named_item = is_named_item;
        if connected && is_named_item {
            self.set_named_item_registration(node, true);
        }
        tracing::debug!(?node, is_named_item, "object named-item eligibility changed");
        Ok(())
    }

    /// Replaces the name or id of `node`, moving its index entry.
    ///
    /// The old key is unregistered before the new one is registered, so the
    /// index never holds both.
    fn rename(&mut self, node: NodeId, domain: NameDomain, value: String) -> Result<()> {
        let supports_named_items = self.supports_named_items();
        let target = self.nodes.get_mut(node).ok_or(Error::UnknownNode(node))?;
        let connected = target.connected;
        let NodeData::Embedded(element) = &mut target.data else {
            return Err(Error::NotEmbedded(node));
        };
        let tracked = supports_named_items
            && connected
            && element.is_named_item_eligible()
            && named_domains(element.kind()).contains(&domain);
        let field = match domain {
            NameDomain::Name => &mut element.name,
            NameDomain::Id => &mut element.id,
        };
        if tracked {
            self.named_items.remove(domain, field.as_str(), node);
        }
        *field = value;
        if tracked {
            self.named_items.add(domain, field.as_str(), node);
        }
        Ok(())
    }

    // ========================================================================
    // Attribute Mutation
    // ========================================================================

    /// Sets an attribute on an embedded-content element.
    ///
    /// Presentational attributes report their effects to the host's style
    /// sink, even when the value yields none; semantic fields,
    /// the named-item index and pending widget updates follow the value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] or [`Error::NotEmbedded`].
    pub fn set_attribute<H: Host + ?Sized>(
        &mut self,
        node: NodeId,
        name: &str,
        value: &str,
        host: &mut H,
    ) -> Result<()> {
        let element = self.element_mut(node)?;
        element.store_attribute(name, value);
        let kind = element.kind();
        let Classification { effects, update } = attribute::classify(kind, name, value);
        tracing::trace!(?node, name, value, ?update, "attribute set");
        if let Some(attr) = attribute::style_attribute(kind, name) {
            host.apply_style(node, attr, &effects);
        }
        self.apply_field_update(node, update, host)
    }

    /// Removes an attribute, resetting whatever field it drove and clearing
    /// any style declarations it contributed.
    ///
    /// Returns `false` if the attribute was not present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] or [`Error::NotEmbedded`].
    pub fn remove_attribute<H: Host + ?Sized>(
        &mut self,
        node: NodeId,
        name: &str,
        host: &mut H,
    ) -> Result<bool> {
        let element = self.element_mut(node)?;
        if !element.drop_attribute(name) {
            return Ok(false);
        }
        let kind = element.kind();
        let update = attribute::classify(kind, name, "").update;
        tracing::trace!(?node, name, "attribute removed");
        if let Some(attr) = attribute::style_attribute(kind, name) {
            host.apply_style(node, attr, &[]);
        }
        self.apply_field_update(node, update, host)?;
        Ok(true)
    }

    fn apply_field_update<H: Host + ?Sized>(
        &mut self,
        node: NodeId,
        update: FieldUpdate,
        host: &mut H,
    ) -> Result<()> {
        match update {
            FieldUpdate::None => {}
            FieldUpdate::ServiceType(service_type) => {
                let element = self.element_mut(node)?;
                element.service_type = service_type;
                if element.renderer.is_some() {
                    element.needs_widget_update = true;
                    host.schedule_style_recalc(node);
                }
                if element.image_loader.is_some() && !element.is_image_type(&*host) {
                    tracing::trace!(?node, "image loader dropped");
                    element.image_loader = None;
                }
            }
            FieldUpdate::Url(raw) => {
                let url = resolve_url(self.base_url.as_ref(), &raw);
                let element = self.element_mut(node)?;
                element.url = url;
                if element.attached {
                    element.needs_widget_update = true;
                    host.schedule_style_recalc(node);
                }
                if let Some(renderer) = element.renderer {
                    if element.representation == Some(Representation::Image)
                        && element.is_image_type(&*host)
                    {
                        let loader = element.image_loader.get_or_insert_with(ImageLoader::default);
                        if loader.update_from(&element.url) {
                            host.load_image(renderer, &element.url);
                        }
                    }
                }
            }
            FieldUpdate::Name(value) => self.rename(node, NameDomain::Name, value)?,
            FieldUpdate::Id(value) => self.rename(node, NameDomain::Id, value)?,
            FieldUpdate::ElementId(value) => self.element_mut(node)?.id = value,
            FieldUpdate::ClassId(value) => {
                let element = self.element_mut(node)?;
                element.class_id = value;
                if element.renderer.is_some() {
                    element.needs_widget_update = true;
                    host.schedule_style_recalc(node);
                }
            }
            FieldUpdate::PluginPage(value) => self.element_mut(node)?.plugin_page = value,
            FieldUpdate::Param(field, value) => {
                let xhtml = self.mode == HtmlMode::Xhtml;
                let param = &mut self.element_mut(node)?.param;
                match field {
                    ParamField::Name => param.name = value,
                    ParamField::Value => param.value = value,
                    ParamField::Type => param.content_type = value,
                    ParamField::ValueType => param.value_type = value,
                    ParamField::Id => {
                        if xhtml {
                            param.name.clone_from(&value);
                        }
                        self.element_mut(node)?.id = value;
                    }
                }
            }
        }
        Ok(())
    }
}
