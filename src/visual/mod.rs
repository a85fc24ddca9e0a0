//! Visual registry
//!
//! The registry owns the on-screen projection of the list: one [`VisualNode`]
//! per materialized logical node and an explicit set of [`VisualConnector`]s.
//! Connectors are never inferred from logical links; every one of them is
//! created and destroyed by a step.
//!
//! The whole registry can be captured into a [`StateSnapshot`] and restored
//! from one, which is what backward stepping is built on.
//!
//! # Submodules
//!
//! - [`layout`]: slot positions and connector curve geometry

pub mod layout;

use crate::list::NodeId;
use crate::snapshot::{ConnectorRecord, NodeRecord, StateSnapshot};
use layout::{ConnectorKind, ConnectorPath, Point};
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How long a removed node keeps being drawn while it fades out
pub const EXIT_TRANSITION: Duration = Duration::from_millis(500);

/// Highlight state of a visual node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    /// Node currently being visited
    Active,
    /// Freshly created node
    New,
    /// Search hit
    Found,
    /// Marked for deletion
    Danger,
}

/// Rendering projection of a logical node
#[derive(Debug, Clone, PartialEq)]
pub struct VisualNode {
    pub id: NodeId,
    pub value: i32,
    pub position: Point,
    /// Decorative pseudo address, assigned once
    pub address: String,
    pub highlight: Highlight,
    pub index_label: Option<usize>,
}

/// Directed edge between two visual nodes
#[derive(Debug, Clone, PartialEq)]
pub struct VisualConnector {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: ConnectorKind,
    pub path: ConnectorPath,
}

/// A removed node still being drawn during its exit transition
#[derive(Debug, Clone)]
pub struct Ghost {
    pub node: VisualNode,
    pub removed_at: Instant,
}

/// Owner of all visual nodes and connectors
#[derive(Debug, Default)]
pub struct VisualRegistry {
    nodes: FxHashMap<NodeId, VisualNode>,
    connectors: Vec<VisualConnector>,
    next_id: u32,
    ghosts: Vec<Ghost>,
    /// Mixed into every pseudo address so each run looks different
    address_salt: u32,
}

impl VisualRegistry {
    pub fn new() -> Self {
        let address_salt = getrandom::u32().unwrap_or_else(|e| {
            warn!(error = %e, "no entropy for node addresses");
            0
        });
        Self {
            address_salt,
            ..Self::default()
        }
    }

    /// Draw a fresh id from the counter without creating a node yet
    pub fn reserve_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create a node. An explicit id is reused as-is; otherwise one is
    /// drawn from the counter.
    pub fn add_node(
        &mut self,
        value: i32,
        position: Point,
        explicit_id: Option<NodeId>,
    ) -> &VisualNode {
        let id = match explicit_id {
            Some(id) => {
                self.next_id = self.next_id.max(id.0 + 1);
                id
            }
            None => self.reserve_id(),
        };
        debug!(%id, value, "adding visual node");

        let node = VisualNode {
            id,
            value,
            position,
            address: pseudo_address(id, self.address_salt),
            highlight: Highlight::New,
            index_label: None,
        };
        self.nodes.insert(id, node);
        &self.nodes[&id]
    }

    /// Remove a node, leaving a ghost for the exit transition. No-op if absent.
    pub fn remove_node(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            debug!(%id, "removing visual node");
            self.ghosts.push(Ghost {
                node,
                removed_at: Instant::now(),
            });
        }
    }

    /// Connect two nodes. Returns `None` (and logs) if either endpoint is missing.
    pub fn connect(
        &mut self,
        from: NodeId,
        to: NodeId,
        kind: ConnectorKind,
    ) -> Option<&VisualConnector> {
        let (Some(a), Some(b)) = (self.nodes.get(&from), self.nodes.get(&to)) else {
            warn!(
                %from,
                %to,
                ?kind,
                from_exists = self.nodes.contains_key(&from),
                to_exists = self.nodes.contains_key(&to),
                "failed to connect: endpoint missing"
            );
            return None;
        };

        let path = ConnectorPath::between(a.position, b.position, kind);
        self.connectors.push(VisualConnector {
            from,
            to,
            kind,
            path,
        });
        debug!(%from, %to, ?kind, total = self.connectors.len(), "connector created");
        self.connectors.last()
    }

    /// Remove every connector matching `predicate`, returning how many went away
    pub fn disconnect<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&VisualConnector) -> bool,
    {
        let before = self.connectors.len();
        self.connectors.retain(|c| !predicate(c));
        before - self.connectors.len()
    }

    /// Remove the outgoing connectors of `from` with the given kind
    pub fn remove_outgoing(&mut self, from: NodeId, kind: ConnectorKind) -> usize {
        self.disconnect(|c| c.from == from && c.kind == kind)
    }

    /// Remove every connector of the given kind
    pub fn remove_kind(&mut self, kind: ConnectorKind) -> usize {
        self.disconnect(|c| c.kind == kind)
    }

    /// Remove every connector that starts or ends at `id`
    pub fn remove_touching(&mut self, id: NodeId) -> usize {
        self.disconnect(|c| c.from == id || c.to == id)
    }

    pub fn clear_connectors(&mut self) {
        self.connectors.clear();
    }

    /// Set the highlight of a node; `false` if the node does not exist
    pub fn highlight(&mut self, id: NodeId, highlight: Highlight) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.highlight = highlight;
                true
            }
            None => false,
        }
    }

    pub fn unhighlight(&mut self, id: NodeId) -> bool {
        self.highlight(id, Highlight::None)
    }

    pub fn clear_highlights(&mut self) {
        for node in self.nodes.values_mut() {
            node.highlight = Highlight::None;
        }
    }

    pub fn set_index_label(&mut self, id: NodeId, label: Option<usize>) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.index_label = label;
                true
            }
            None => false,
        }
    }

    /// Move a node; connector paths are recomputed by [`Self::refresh_paths`]
    pub fn move_node(&mut self, id: NodeId, position: Point) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Recompute every connector path from the current node positions
    pub fn refresh_paths(&mut self) {
        let nodes = &self.nodes;
        for connector in &mut self.connectors {
            if let (Some(a), Some(b)) = (nodes.get(&connector.from), nodes.get(&connector.to)) {
                connector.path = ConnectorPath::between(a.position, b.position, connector.kind);
            }
        }
    }

    /// Place the nodes of `order` into consecutive slots, label their
    /// indices and redraw every connector
    pub fn relayout(&mut self, order: &[NodeId]) {
        self.clear_highlights();
        for (index, id) in order.iter().enumerate() {
            if self.move_node(*id, layout::slot(index)) {
                self.set_index_label(*id, Some(index));
            }
        }
        self.refresh_paths();
    }

    /// Pure capture of the full registry state
    pub fn snapshot(&self) -> StateSnapshot {
        let mut nodes: Vec<NodeRecord> = self
            .nodes
            .values()
            .map(|n| NodeRecord {
                id: n.id,
                value: n.value,
                position: n.position,
                address: n.address.clone(),
                highlight: n.highlight,
                index_label: n.index_label,
            })
            .collect();
        nodes.sort_by_key(|n| n.id);

        StateSnapshot {
            nodes,
            connectors: self
                .connectors
                .iter()
                .map(|c| ConnectorRecord {
                    from: c.from,
                    to: c.to,
                    kind: c.kind,
                })
                .collect(),
            next_id: self.next_id,
        }
    }

    /// Discard the current state and rebuild it from `snapshot`
    pub fn restore(&mut self, snapshot: &StateSnapshot) {
        self.nodes.clear();
        self.connectors.clear();
        self.ghosts.clear();
        self.next_id = snapshot.next_id;

        for record in &snapshot.nodes {
            self.nodes.insert(
                record.id,
                VisualNode {
                    id: record.id,
                    value: record.value,
                    position: record.position,
                    address: record.address.clone(),
                    highlight: record.highlight,
                    index_label: record.index_label,
                },
            );
        }

        for record in &snapshot.connectors {
            self.connect(record.from, record.to, record.kind);
        }
    }

    /// Remove everything and restart the id counter
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connectors.clear();
        self.ghosts.clear();
        self.next_id = 0;
    }

    /// Forget ghosts whose exit transition has finished
    pub fn sweep_exits(&mut self, now: Instant) {
        self.ghosts
            .retain(|g| now.saturating_duration_since(g.removed_at) < EXIT_TRANSITION);
    }

    // ========== Getter methods for rendering ==========

    pub fn node(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Nodes sorted by id
    pub fn nodes(&self) -> Vec<&VisualNode> {
        let mut nodes: Vec<&VisualNode> = self.nodes.values().collect();
        nodes.sort_by_key(|n| n.id);
        nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connectors(&self) -> &[VisualConnector] {
        &self.connectors
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }
}

/// Decorative address such as `0x3FA`, stable for a given id and salt
fn pseudo_address(id: NodeId, salt: u32) -> String {
    let bits = id.0.wrapping_add(1).wrapping_mul(0x9E37_79B9) ^ salt;
    format!("0x{:03X}", (bits >> 12) & 0xFFF)
}
