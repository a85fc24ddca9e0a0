// Insertion at head, tail and arbitrary positions

use super::{Operation, OperationDriver, OperationScript, Outcome, Rejection, Script};
use crate::list::{LogicalNode, NodeId};
use crate::visual::layout::{slot, ConnectorKind, SLOT_GAP, STAGING_OFFSET};
use crate::visual::{Highlight, VisualRegistry};
use tracing::debug;

const NEW_NODE_CODE: &str = "Node* newNode = new Node(value);";

impl OperationDriver {
    /// Append `value` after the current tail
    pub fn insert_at_tail(
        &mut self,
        registry: &mut VisualRegistry,
        value: i32,
    ) -> OperationScript {
        let mut script = Script::new(Operation::InsertTail);
        self.build_insert_tail(registry, value, &mut script);
        script.finish(self.variant(), Outcome::Completed)
    }

    /// Prepend `value` before the current head
    pub fn insert_at_head(
        &mut self,
        registry: &mut VisualRegistry,
        value: i32,
    ) -> OperationScript {
        let mut script = Script::new(Operation::InsertHead);
        self.build_insert_head(registry, value, &mut script);
        script.finish(self.variant(), Outcome::Completed)
    }

    /// Insert `value` so that it ends up at index `position`.
    ///
    /// Valid positions are `0..=len`; the two ends delegate to head and tail
    /// insertion.
    pub fn insert_at(
        &mut self,
        registry: &mut VisualRegistry,
        value: i32,
        position: i64,
    ) -> Result<OperationScript, Rejection> {
        let len = self.list.len();
        let index = usize::try_from(position)
            .ok()
            .filter(|p| *p <= len)
            .ok_or(Rejection::PositionOutOfRange { position, max: len })?;

        let mut script = Script::new(Operation::InsertAt);
        if index == 0 {
            self.build_insert_head(registry, value, &mut script);
        } else if index == len {
            self.build_insert_tail(registry, value, &mut script);
        } else {
            self.build_insert_middle(registry, value, index, &mut script);
        }
        Ok(script.finish(self.variant(), Outcome::Completed))
    }

    pub(super) fn build_insert_tail(
        &mut self,
        registry: &mut VisualRegistry,
        value: i32,
        script: &mut Script,
    ) {
        let id = registry.reserve_id();
        let index = self.list.len();
        debug!(%id, value, index, "building tail insert");

        script.create(
            format!("Creating new node {}", value),
            NEW_NODE_CODE,
            id,
            value,
            slot(index),
            Some(index),
        );
        self.list.adopt(LogicalNode::new(id, value));

        let Some(tail) = self.list.tail() else {
            self.become_only_node(id, script);
            return;
        };

        if self.policy.wraps {
            script.remove_wrap("Removing old circular link");
        }
        script.link(
            "Linking Tail to New Node",
            "tail->next = newNode;",
            tail,
            id,
            ConnectorKind::Next,
        );
        self.list.set_next(tail, Some(id));

        if self.policy.links_backward {
            script.link(
                "Linking New Node back to Tail",
                "newNode->prev = tail;",
                id,
                tail,
                ConnectorKind::Prev,
            );
            self.list.set_prev(id, Some(tail));
        }

        script.narrate("Moving Tail to New Node", "tail = newNode;");
        self.list.set_tail(Some(id));

        if self.policy.wraps {
            if let Some(head) = self.list.head() {
                self.list.set_next(id, Some(head));
                script.add_wrap("Updating Circular Link", id, head);
            }
        }
    }

    pub(super) fn build_insert_head(
        &mut self,
        registry: &mut VisualRegistry,
        value: i32,
        script: &mut Script,
    ) {
        let id = registry.reserve_id();
        debug!(%id, value, "building head insert");

        script.create(
            format!("Creating new Head node {}", value),
            NEW_NODE_CODE,
            id,
            value,
            slot(0).offset(-SLOT_GAP, 0.0),
            None,
        );
        self.list.adopt(LogicalNode::new(id, value));

        match self.list.head() {
            None => self.become_only_node(id, script),
            Some(head) => {
                if self.policy.wraps {
                    script.remove_wrap("Removing old circular link");
                }
                script.link(
                    "Linking New Node to Old Head",
                    "newNode->next = head;",
                    id,
                    head,
                    ConnectorKind::Next,
                );
                self.list.set_next(id, Some(head));

                if self.policy.links_backward {
                    script.link(
                        "Linking Old Head back to New Node",
                        "head->prev = newNode;",
                        head,
                        id,
                        ConnectorKind::Prev,
                    );
                    self.list.set_prev(head, Some(id));
                }

                script.narrate("Moving Head to New Node", "head = newNode;");
                self.list.set_head(Some(id));

                if self.policy.wraps {
                    if let Some(tail) = self.list.tail() {
                        self.list.set_next(tail, Some(id));
                        script.add_wrap("Updating Tail -> New Head", tail, id);
                    }
                }
            }
        }

        script.relayout(self.list.ids());
    }

    fn build_insert_middle(
        &mut self,
        registry: &mut VisualRegistry,
        value: i32,
        index: usize,
        script: &mut Script,
    ) {
        let ids = self.list.ids();
        let current = ids[index - 1];
        let after = ids[index];
        let id = registry.reserve_id();
        debug!(%id, value, index, "building positional insert");

        script.highlight(
            format!("Found predecessor at index {}", index - 1),
            "Node* current = head;\nfor (int i = 0; i < index - 1; i++) current = current->next;",
            current,
            Highlight::Active,
        );
        script.create(
            format!("Creating new node {}", value),
            NEW_NODE_CODE,
            id,
            value,
            slot(index).offset(0.0, -STAGING_OFFSET),
            None,
        );

        script.link(
            "Pointing New Node at the next node",
            "newNode->next = current->next;",
            id,
            after,
            ConnectorKind::Next,
        );
        if self.policy.links_backward {
            script.relink(
                "Pointing next node back at New Node",
                "current->next->prev = newNode;",
                after,
                id,
                ConnectorKind::Prev,
            );
        }
        script.relink(
            "Linking predecessor to New Node",
            "current->next = newNode;",
            current,
            id,
            ConnectorKind::Next,
        );
        if self.policy.links_backward {
            script.link(
                "Linking New Node back to predecessor",
                "newNode->prev = current;",
                id,
                current,
                ConnectorKind::Prev,
            );
        }

        self.list.adopt(LogicalNode::new(id, value));
        self.list.set_next(id, Some(after));
        self.list.set_next(current, Some(id));
        if self.policy.links_backward {
            self.list.set_prev(after, Some(id));
            self.list.set_prev(id, Some(current));
        }

        script.relayout(self.list.ids());
    }

    /// Make the freshly adopted `id` the whole list
    fn become_only_node(&mut self, id: NodeId, script: &mut Script) {
        script.narrate("List empty, new node is Head & Tail", "head = tail = newNode;");
        self.list.set_head(Some(id));
        self.list.set_tail(Some(id));

        if self.policy.wraps {
            self.list.set_next(id, Some(id));
            script.link(
                "Self-loop for circular list",
                "tail->next = head;",
                id,
                id,
                ConnectorKind::Wrap,
            );
        }
    }
}
