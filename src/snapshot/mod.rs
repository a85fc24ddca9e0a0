// Snapshot management for backward stepping

use crate::list::NodeId;
use crate::visual::layout::{ConnectorKind, Point};
use crate::visual::Highlight;

/// Captured state of one visual node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: NodeId,
    pub value: i32,
    pub position: Point,
    pub address: String,
    pub highlight: Highlight,
    pub index_label: Option<usize>,
}

/// Captured state of one connector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorRecord {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: ConnectorKind,
}

/// Immutable capture of the whole visual registry
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    /// Sorted by id
    pub nodes: Vec<NodeRecord>,
    /// In creation order
    pub connectors: Vec<ConnectorRecord>,
    pub next_id: u32,
}

impl StateSnapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough estimate: fixed record size plus the address string
        let node_size: usize = self
            .nodes
            .iter()
            .map(|n| std::mem::size_of::<NodeRecord>() + n.address.len())
            .sum();
        let connector_size = self.connectors.len() * std::mem::size_of::<ConnectorRecord>();

        std::mem::size_of::<Self>() + node_size + connector_size
    }
}

/// Per-step snapshot slots: slot `i` holds the visual state captured
/// immediately before step `i` last ran forward
#[derive(Debug)]
pub struct SnapshotHistory {
    slots: Vec<Option<StateSnapshot>>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotHistory {
    pub fn new(max_memory: usize) -> Self {
        SnapshotHistory {
            slots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Store a snapshot in slot `index`, replacing whatever was captured there before
    pub fn record(&mut self, index: usize, snapshot: StateSnapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();
        let replaced_size = self
            .slots
            .get(index)
            .and_then(|slot| slot.as_ref())
            .map_or(0, StateSnapshot::estimated_size);

        let projected = self.current_memory - replaced_size + snapshot_size;
        if projected > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory - replaced_size,
                snapshot_size,
                self.max_memory
            ));
        }

        if self.slots.len() <= index {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(snapshot);
        self.current_memory = projected;
        Ok(())
    }

    /// Get the snapshot captured before step `index`, if that step ever ran
    pub fn get(&self, index: usize) -> Option<&StateSnapshot> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.current_memory = 0;
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(nodes: usize) -> StateSnapshot {
        StateSnapshot {
            nodes: (0..nodes)
                .map(|i| NodeRecord {
                    id: NodeId(i as u32),
                    value: i as i32,
                    position: Point::new(0.0, 0.0),
                    address: "0xABC".to_string(),
                    highlight: Highlight::None,
                    index_label: Some(i),
                })
                .collect(),
            connectors: Vec::new(),
            next_id: nodes as u32,
        }
    }

    #[test]
    fn test_slots_start_empty() {
        let mut history = SnapshotHistory::new(1 << 20);
        assert!(history.get(0).is_none());
        history.record(2, snapshot_with(1)).unwrap();
        assert!(history.get(0).is_none());
        assert!(history.get(1).is_none());
        assert!(history.get(2).is_some());
    }

    #[test]
    fn test_rerecording_replaces_memory() {
        let mut history = SnapshotHistory::new(1 << 20);
        history.record(0, snapshot_with(3)).unwrap();
        let first = history.memory_usage();
        history.record(0, snapshot_with(3)).unwrap();
        assert_eq!(history.memory_usage(), first);
    }

    #[test]
    fn test_limit_is_enforced() {
        let small = snapshot_with(1).estimated_size();
        let mut history = SnapshotHistory::new(small);
        history.record(0, snapshot_with(1)).unwrap();
        assert!(history.record(1, snapshot_with(1)).is_err());
        assert!(history.get(1).is_none());
    }
}
