//! Host capability surface and an in-memory recording host.
//!
//! The design tool that ultimately owns the nodes is abstracted behind
//! [`Host`]. [`commit`] materializes a finished [`LayoutNode`] tree on a host:
//! each node is created, appended to its parent, and only then given its
//! sizing relative to that parent.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use futures::future::{self, BoxFuture};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::layout::{FontName, FrameProps, ImageHash, LayoutNode, Sizing, Text};
use crate::{Error, Result};

/// Host-assigned node handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node-creation and viewport capabilities consumed from the design tool.
pub trait Host {
    /// Create a detached frame carrying `props`. Children are appended
    /// separately.
    fn create_frame(&mut self, props: &FrameProps) -> Result<NodeId>;

    /// Create a detached text node.
    fn create_text(&mut self, text: &Text) -> Result<NodeId>;

    /// Upload image bytes and return the hash paints refer to them by.
    fn create_image(&mut self, bytes: &[u8]) -> Result<ImageHash>;

    /// Make a font available for text nodes.
    fn load_font(&self, font: FontName) -> BoxFuture<'_, Result<()>>;

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()>;

    /// Sizing of an already appended node relative to its parent.
    fn set_layout_sizing(&mut self, node: NodeId, horizontal: Sizing, vertical: Sizing) -> Result<()>;

    fn set_position(&mut self, node: NodeId, x: f64, y: f64) -> Result<()>;

    /// Remove a node and its subtree.
    fn remove_node(&mut self, node: NodeId) -> Result<()>;

    /// Scroll and zoom the viewport to show `nodes`.
    fn focus_viewport(&mut self, nodes: &[NodeId]) -> Result<()>;

    /// Signal that the run is complete.
    fn finish(&mut self, message: &str);
}

/// Create `node` and its subtree on `host`, returning the new root.
///
/// If any host call fails, the nodes created so far for this subtree are
/// removed again before the error is returned.
pub fn commit<H: Host + ?Sized>(host: &mut H, node: &LayoutNode) -> Result<NodeId> {
    let id = match node {
        LayoutNode::Frame(f) => host.create_frame(&f.props)?,
        LayoutNode::Text(t) => host.create_text(t)?,
    };
    debug!("created {} '{}'", id, node.name());

    if let Err(e) = commit_children(host, id, node) {
        discard(host, id);
        return Err(e);
    }
    Ok(id)
}

/// Remove `node` while unwinding a failed operation. A failed removal leaves
/// the node orphaned on the host; it is logged rather than returned so the
/// original error reaches the caller.
pub fn discard<H: Host + ?Sized>(host: &mut H, node: NodeId) {
    if let Err(e) = host.remove_node(node) {
        warn!("Rollback could not remove {}; it remains on the host: {}", node, e);
    }
}

fn commit_children<H: Host + ?Sized>(host: &mut H, parent: NodeId, node: &LayoutNode) -> Result<()> {
    for child in node.children() {
        let child_id = commit(host, &child.node)?;
        if let Err(e) = host.append_child(parent, child_id) {
            discard(host, child_id);
            return Err(e);
        }
        host.set_layout_sizing(child_id, child.horizontal, child.vertical)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostNodeKind {
    Frame(FrameProps),
    Text(Text),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostNode {
    pub id: NodeId,
    pub kind: HostNodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub layout_sizing: Option<(Sizing, Sizing)>,
    pub x: f64,
    pub y: f64,
}

impl HostNode {
    pub fn name(&self) -> &str {
        match &self.kind {
            HostNodeKind::Frame(p) => &p.name,
            HostNodeKind::Text(t) => t.name(),
        }
    }
}

/// Serializable view of a recorded node and its subtree
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    pub id: NodeId,
    #[serde(flatten)]
    pub kind: HostNodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_sizing_horizontal: Option<Sizing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_sizing_vertical: Option<Sizing>,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

/// Serializable view of everything a [`RecordingHost`] holds
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    pub roots: Vec<NodeSnapshot>,
    /// Image hash to byte length
    pub images: BTreeMap<String, usize>,
    pub loaded_fonts: Vec<FontName>,
    pub viewport: Vec<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished: Option<String>,
}

/// In-memory [`Host`] that records every call.
///
/// Used by the CLI to produce a JSON document and by tests to inspect what a
/// run committed. Font families can be marked unavailable and node creation
/// can be capped to exercise failure paths.
#[derive(Debug, Default)]
pub struct RecordingHost {
    nodes: BTreeMap<NodeId, HostNode>,
    next_id: u64,
    creations: usize,
    images: BTreeMap<ImageHash, Vec<u8>>,
    unavailable_families: HashSet<String>,
    font_requests: Mutex<Vec<FontName>>,
    loaded_fonts: Mutex<Vec<FontName>>,
    node_limit: Option<usize>,
    refuse_removal: bool,
    viewport: Vec<NodeId>,
    finished: Option<String>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to load any style of `family`.
    pub fn with_unavailable_family(mut self, family: impl Into<String>) -> Self {
        self.unavailable_families.insert(family.into());
        self
    }

    /// Fail node creation once `limit` nodes have been created.
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Fail every `remove_node` call.
    pub fn with_refused_removal(mut self) -> Self {
        self.refuse_removal = true;
        self
    }

    /// Total node-creation calls that succeeded, including since-removed nodes
    pub fn creation_count(&self) -> usize {
        self.creations
    }

    /// Nodes currently present
    pub fn live_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&HostNode> {
        self.nodes.get(&id)
    }

    /// Top-level nodes in creation order
    pub fn roots(&self) -> Vec<&HostNode> {
        self.nodes.values().filter(|n| n.parent.is_none()).collect()
    }

    pub fn image(&self, hash: &ImageHash) -> Option<&[u8]> {
        self.images.get(hash).map(Vec::as_slice)
    }

    pub fn font_requests(&self) -> Vec<FontName> {
        self.font_requests.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn loaded_fonts(&self) -> Vec<FontName> {
        self.loaded_fonts.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn viewport(&self) -> &[NodeId] {
        &self.viewport
    }

    pub fn finished(&self) -> Option<&str> {
        self.finished.as_deref()
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            roots: self.roots().iter().filter_map(|n| self.snapshot_node(n.id)).collect(),
            images: self.images.iter().map(|(h, b)| (h.0.clone(), b.len())).collect(),
            loaded_fonts: self.loaded_fonts(),
            viewport: self.viewport.clone(),
            finished: self.finished.clone(),
        }
    }

    fn snapshot_node(&self, id: NodeId) -> Option<NodeSnapshot> {
        let node = self.nodes.get(&id)?;
        Some(NodeSnapshot {
            id,
            kind: node.kind.clone(),
            layout_sizing_horizontal: node.layout_sizing.map(|s| s.0),
            layout_sizing_vertical: node.layout_sizing.map(|s| s.1),
            x: node.x,
            y: node.y,
            children: node.children.iter().filter_map(|c| self.snapshot_node(*c)).collect(),
        })
    }

    fn insert(&mut self, kind: HostNodeKind) -> Result<NodeId> {
        if let Some(limit) = self.node_limit {
            if self.creations >= limit {
                return Err(Error::Host(format!("node limit of {} reached", limit)));
            }
        }
        self.next_id += 1;
        self.creations += 1;
        let id = NodeId(self.next_id);
        self.nodes.insert(
            id,
            HostNode {
                id,
                kind,
                parent: None,
                children: Vec::new(),
                layout_sizing: None,
                x: 0.0,
                y: 0.0,
            },
        );
        Ok(id)
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut HostNode> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| Error::Host(format!("unknown node {}", id)))
    }
}

impl Host for RecordingHost {
    fn create_frame(&mut self, props: &FrameProps) -> Result<NodeId> {
        self.insert(HostNodeKind::Frame(props.clone()))
    }

    fn create_text(&mut self, text: &Text) -> Result<NodeId> {
        let loaded = self.loaded_fonts();
        if !loaded.contains(&text.style.font_name) {
            return Err(Error::Host(format!(
                "font '{}' must be loaded before creating text",
                text.style.font_name
            )));
        }
        self.insert(HostNodeKind::Text(text.clone()))
    }

    fn create_image(&mut self, bytes: &[u8]) -> Result<ImageHash> {
        let hash = ImageHash(hex::encode(Sha256::digest(bytes)));
        self.images.insert(hash.clone(), bytes.to_vec());
        Ok(hash)
    }

    fn load_font(&self, font: FontName) -> BoxFuture<'_, Result<()>> {
        if let Ok(mut requests) = self.font_requests.lock() {
            requests.push(font.clone());
        }
        let result = if self.unavailable_families.contains(&font.family) {
            Err(Error::Host(format!("font '{}' is not available", font)))
        } else {
            if let Ok(mut loaded) = self.loaded_fonts.lock() {
                if !loaded.contains(&font) {
                    loaded.push(font);
                }
            }
            Ok(())
        };
        Box::pin(future::ready(result))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if matches!(self.get_mut(parent)?.kind, HostNodeKind::Text(_)) {
            return Err(Error::Host(format!("text node {} cannot have children", parent)));
        }
        let old_parent = self.get_mut(child)?.parent.replace(parent);
        if let Some(old) = old_parent {
            self.get_mut(old)?.children.retain(|c| *c != child);
        }
        self.get_mut(parent)?.children.push(child);
        Ok(())
    }

    fn set_layout_sizing(&mut self, node: NodeId, horizontal: Sizing, vertical: Sizing) -> Result<()> {
        let node = self.get_mut(node)?;
        if node.parent.is_none() {
            return Err(Error::Host(format!(
                "node {} must be appended before its layout sizing is set",
                node.id
            )));
        }
        node.layout_sizing = Some((horizontal, vertical));
        Ok(())
    }

    fn set_position(&mut self, node: NodeId, x: f64, y: f64) -> Result<()> {
        let node = self.get_mut(node)?;
        node.x = x;
        node.y = y;
        Ok(())
    }

    fn remove_node(&mut self, node: NodeId) -> Result<()> {
        if self.refuse_removal {
            return Err(Error::Host(format!("removal of {} refused", node)));
        }
        let removed = self
            .nodes
            .remove(&node)
            .ok_or_else(|| Error::Host(format!("unknown node {}", node)))?;
        if let Some(parent) = removed.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != node);
        }
        let mut stack = removed.children;
        while let Some(id) = stack.pop() {
            if let Some(n) = self.nodes.remove(&id) {
                stack.extend(n.children);
            }
        }
        Ok(())
    }

    fn focus_viewport(&mut self, nodes: &[NodeId]) -> Result<()> {
        for id in nodes {
            self.get_mut(*id)?;
        }
        self.viewport = nodes.to_vec();
        Ok(())
    }

    fn finish(&mut self, message: &str) {
        self.finished = Some(message.to_string());
    }
}
