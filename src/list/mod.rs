//! Logical linked list model
//!
//! The logical list is the data structure being taught. It owns no visuals:
//! nodes live in an id-keyed arena and link to each other by [`NodeId`], the
//! same id the visual registry uses for the node's on-screen projection.
//!
//! # Variants
//!
//! - [`ListVariant::Singly`]: forward links only
//! - [`ListVariant::Doubly`]: forward and backward links
//! - [`ListVariant::Circular`]: singly linked, with the tail linking back to the head
//!
//! # Bounded Traversal
//!
//! Every walk is bounded by `len()` and also stops on returning to the head,
//! so a circular list (or a corrupted one) can never loop forever.

use rustc_hash::FxHashMap;
use std::fmt;

/// Stable identity of a node, shared by its logical and visual forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which kind of linked list is being animated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListVariant {
    #[default]
    Singly,
    Doubly,
    Circular,
}

impl ListVariant {
    pub const ALL: [ListVariant; 3] = [
        ListVariant::Singly,
        ListVariant::Doubly,
        ListVariant::Circular,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ListVariant::Singly => "singly",
            ListVariant::Doubly => "doubly",
            ListVariant::Circular => "circular",
        }
    }

    /// Cycle to the next variant (singly -> doubly -> circular -> singly)
    pub fn next(self) -> Self {
        match self {
            ListVariant::Singly => ListVariant::Doubly,
            ListVariant::Doubly => ListVariant::Circular,
            ListVariant::Circular => ListVariant::Singly,
        }
    }
}

impl fmt::Display for ListVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ListVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "singly" | "single" | "sll" => Ok(ListVariant::Singly),
            "doubly" | "double" | "dll" => Ok(ListVariant::Doubly),
            "circular" | "cll" => Ok(ListVariant::Circular),
            other => Err(format!("unknown list type '{}'", other)),
        }
    }
}

/// A node of the logical list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalNode {
    pub id: NodeId,
    pub value: i32,
    pub next: Option<NodeId>,
    /// Only ever set for doubly linked lists
    pub prev: Option<NodeId>,
}

impl LogicalNode {
    pub fn new(id: NodeId, value: i32) -> Self {
        LogicalNode {
            id,
            value,
            next: None,
            prev: None,
        }
    }
}

/// The logical list: an arena of nodes plus head/tail/size bookkeeping
#[derive(Debug, Clone)]
pub struct LogicalList {
    variant: ListVariant,
    nodes: FxHashMap<NodeId, LogicalNode>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    size: usize,
}

impl LogicalList {
    pub fn new(variant: ListVariant) -> Self {
        LogicalList {
            variant,
            nodes: FxHashMap::default(),
            head: None,
            tail: None,
            size: 0,
        }
    }

    pub fn variant(&self) -> ListVariant {
        self.variant
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn node(&self, id: NodeId) -> Option<&LogicalNode> {
        self.nodes.get(&id)
    }

    pub fn next_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.next)
    }

    pub fn prev_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.prev)
    }

    pub fn value_of(&self, id: NodeId) -> Option<i32> {
        self.nodes.get(&id).map(|n| n.value)
    }

    /// Node ids in forward order, bounded by size and by returning to head
    pub fn ids(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.size);
        let mut current = self.head;
        while let Some(id) = current {
            if out.len() >= self.size {
                break;
            }
            out.push(id);
            current = self.next_of(id);
            if current == self.head {
                break;
            }
        }
        out
    }

    /// Values in forward order
    pub fn values(&self) -> Vec<i32> {
        self.ids()
            .into_iter()
            .filter_map(|id| self.value_of(id))
            .collect()
    }

    /// Id of the node at `index` in forward order
    pub fn nth(&self, index: usize) -> Option<NodeId> {
        self.ids().get(index).copied()
    }

    // ========== Raw mutation used by the operation driver ==========

    /// Add a detached node to the arena and count it towards the size
    pub(crate) fn adopt(&mut self, node: LogicalNode) {
        if self.nodes.insert(node.id, node).is_none() {
            self.size += 1;
        }
    }

    /// Remove a node from the arena, returning it
    pub(crate) fn release(&mut self, id: NodeId) -> Option<LogicalNode> {
        let node = self.nodes.remove(&id)?;
        self.size -= 1;
        Some(node)
    }

    pub(crate) fn set_next(&mut self, id: NodeId, next: Option<NodeId>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.next = next;
        }
    }

    pub(crate) fn set_prev(&mut self, id: NodeId, prev: Option<NodeId>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.prev = prev;
        }
    }

    pub(crate) fn set_head(&mut self, head: Option<NodeId>) {
        self.head = head;
    }

    pub(crate) fn set_tail(&mut self, tail: Option<NodeId>) {
        self.tail = tail;
    }

    /// Drop every node
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.size = 0;
    }

    /// Check every structural invariant of the list
    pub fn validate(&self) -> Result<(), String> {
        if self.size != self.nodes.len() {
            return Err(format!(
                "size {} does not match {} stored nodes",
                self.size,
                self.nodes.len()
            ));
        }

        let (head, tail) = match (self.head, self.tail) {
            (None, None) if self.size == 0 => return Ok(()),
            (Some(head), Some(tail)) if self.size > 0 => (head, tail),
            _ => {
                return Err(format!(
                    "head {:?} / tail {:?} inconsistent with size {}",
                    self.head, self.tail, self.size
                ))
            }
        };

        let ids = self.ids();
        if ids.len() != self.size {
            return Err(format!(
                "{} nodes reachable from head, size is {}",
                ids.len(),
                self.size
            ));
        }
        if ids.last() != Some(&tail) {
            return Err(format!("walk from head does not end at tail {}", tail));
        }

        let tail_next = self.next_of(tail);
        match self.variant {
            ListVariant::Circular if tail_next != Some(head) => {
                return Err(format!(
                    "circular tail {} links to {:?}, expected head {}",
                    tail, tail_next, head
                ));
            }
            ListVariant::Singly | ListVariant::Doubly if tail_next.is_some() => {
                return Err(format!("tail {} has a forward link", tail));
            }
            _ => {}
        }

        for (i, id) in ids.iter().enumerate() {
            let prev = self.prev_of(*id);
            let expected = match self.variant {
                ListVariant::Doubly if i > 0 => Some(ids[i - 1]),
                _ => None,
            };
            if prev != expected {
                return Err(format!(
                    "node {} has backward link {:?}, expected {:?}",
                    id, prev, expected
                ));
            }
        }

        Ok(())
    }
}

impl Default for LogicalList {
    fn default() -> Self {
        Self::new(ListVariant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(variant: ListVariant, values: &[i32]) -> LogicalList {
        let mut list = LogicalList::new(variant);
        let mut prev: Option<NodeId> = None;
        for (i, v) in values.iter().enumerate() {
            let id = NodeId(i as u32);
            list.adopt(LogicalNode::new(id, *v));
            match prev {
                Some(p) => {
                    list.set_next(p, Some(id));
                    if variant == ListVariant::Doubly {
                        list.set_prev(id, Some(p));
                    }
                }
                None => list.set_head(Some(id)),
            }
            prev = Some(id);
        }
        list.set_tail(prev);
        if variant == ListVariant::Circular {
            if let Some(tail) = prev {
                list.set_next(tail, list.head());
            }
        }
        list
    }

    #[test]
    fn test_empty_list_is_valid() {
        let list = LogicalList::new(ListVariant::Circular);
        assert!(list.validate().is_ok());
        assert!(list.ids().is_empty());
    }

    #[test]
    fn test_circular_walk_is_bounded() {
        let list = chain(ListVariant::Circular, &[1, 2, 3]);
        assert_eq!(list.values(), vec![1, 2, 3]);
        assert!(list.validate().is_ok());
    }

    #[test]
    fn test_validate_catches_missing_wrap() {
        let mut list = chain(ListVariant::Circular, &[1, 2]);
        list.set_next(NodeId(1), None);
        assert!(list.validate().is_err());
    }

    #[test]
    fn test_validate_catches_bad_backward_link() {
        let mut list = chain(ListVariant::Doubly, &[1, 2, 3]);
        assert!(list.validate().is_ok());
        list.set_prev(NodeId(2), Some(NodeId(0)));
        assert!(list.validate().is_err());
    }

    #[test]
    fn test_variant_parsing() {
        assert_eq!("Doubly".parse::<ListVariant>(), Ok(ListVariant::Doubly));
        assert!("tree".parse::<ListVariant>().is_err());
    }
}
