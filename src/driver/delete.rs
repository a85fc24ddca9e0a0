// Deletion at head, tail and arbitrary positions, plus clear

use super::{Operation, OperationDriver, OperationScript, Outcome, Rejection, Script};
use crate::list::NodeId;
use crate::visual::layout::ConnectorKind;
use crate::visual::{Highlight, VisualRegistry};
use tracing::debug;

impl OperationDriver {
    pub fn delete_at_head(&mut self) -> Result<OperationScript, Rejection> {
        let head = self.list.head().ok_or(Rejection::EmptyList)?;
        let mut script = Script::new(Operation::DeleteHead);
        self.build_delete_head(head, &mut script);
        Ok(script.finish(self.variant(), Outcome::Completed))
    }

    /// Remove the tail. A single-node list is handled as a head deletion.
    pub fn delete_at_tail(&mut self) -> Result<OperationScript, Rejection> {
        if self.list.is_empty() {
            return Err(Rejection::EmptyList);
        }
        let mut script = Script::new(Operation::DeleteTail);
        self.build_delete_tail(&mut script);
        Ok(script.finish(self.variant(), Outcome::Completed))
    }

    /// Remove the node at `position`, which must be in `0..len`
    pub fn delete_at(&mut self, position: i64) -> Result<OperationScript, Rejection> {
        let len = self.list.len();
        if len == 0 {
            return Err(Rejection::EmptyList);
        }
        let index = usize::try_from(position)
            .ok()
            .filter(|p| *p < len)
            .ok_or(Rejection::PositionOutOfRange {
                position,
                max: len - 1,
            })?;

        let mut script = Script::new(Operation::DeleteAt);
        if index == 0 {
            let head = self.list.head().ok_or(Rejection::EmptyList)?;
            self.build_delete_head(head, &mut script);
        } else if index == len - 1 {
            self.build_delete_tail(&mut script);
        } else {
            self.build_delete_middle(index, &mut script);
        }
        Ok(script.finish(self.variant(), Outcome::Completed))
    }

    /// Unlink every node, then delete them one by one
    pub fn clear(&mut self, registry: &VisualRegistry) -> Result<OperationScript, Rejection> {
        if self.list.is_empty() {
            return Err(Rejection::EmptyList);
        }
        let mut script = Script::new(Operation::Clear);

        // Nodes that are on screen but no longer logical (e.g. mid-transition)
        // are swept along with the list.
        let mut doomed = self.list.ids();
        for node in registry.nodes() {
            if !doomed.contains(&node.id) {
                doomed.push(node.id);
            }
        }
        debug!(count = doomed.len(), "building clear");

        let code = if self.policy.wraps {
            "tail->next = nullptr;"
        } else {
            "Node* current = head;"
        };
        script.step("Removing all links", code, |registry| {
            registry.clear_connectors();
            Ok(())
        });
        for id in doomed {
            let value = registry
                .node(id)
                .map(|n| n.value)
                .or_else(|| self.list.value_of(id))
                .unwrap_or_default();
            script.highlight(
                format!("Deleting node {}", value),
                "Node* next = current->next;",
                id,
                Highlight::Danger,
            );
            script.remove(format!("Node {} deleted", value), "delete current;", id);
        }
        script.narrate("List is now empty", "head = tail = nullptr;");

        self.list.clear();
        Ok(script.finish(self.variant(), Outcome::Completed))
    }

    fn build_delete_head(&mut self, head: NodeId, script: &mut Script) {
        debug!(%head, "building head delete");
        script.highlight(
            "Marking Head for deletion",
            "Node* temp = head;",
            head,
            Highlight::Danger,
        );

        if self.list.len() == 1 {
            script.narrate("Only node: list becomes empty", "head = tail = nullptr;");
            script.remove("Deleting old Head", "delete temp;", head);
            self.list.clear();
            return;
        }

        let Some(next) = self.list.next_of(head) else {
            return;
        };
        if self.policy.wraps {
            script.remove_wrap("Removing old circular link");
        }
        script.highlight("Moving Head forward", "head = head->next;", next, Highlight::Active);
        if self.policy.links_backward {
            script.step("Clearing new Head's back link", "head->prev = nullptr;", move |registry| {
                registry.remove_outgoing(next, ConnectorKind::Prev);
                Ok(())
            });
            self.list.set_prev(next, None);
        }
        script.remove("Deleting old Head", "delete temp;", head);

        self.list.release(head);
        self.list.set_head(Some(next));
        if self.policy.wraps {
            if let Some(tail) = self.list.tail() {
                self.list.set_next(tail, Some(next));
                script.add_wrap("Updating Tail -> New Head", tail, next);
            }
        }

        script.relayout(self.list.ids());
    }

    fn build_delete_tail(&mut self, script: &mut Script) {
        let ids = self.list.ids();
        let (Some(&tail), Some(&head)) = (ids.last(), ids.first()) else {
            return;
        };
        if ids.len() == 1 {
            self.build_delete_head(head, script);
            return;
        }
        let before = ids[ids.len() - 2];
        debug!(%tail, %before, "building tail delete");

        script.highlight(
            "Marking Tail for deletion",
            "Node* temp = tail;",
            tail,
            Highlight::Danger,
        );
        if self.policy.links_backward {
            script.highlight(
                "Stepping back from Tail",
                "tail = tail->prev;",
                before,
                Highlight::Active,
            );
        } else {
            script.highlight(
                "Found node before Tail",
                "while (current->next != tail) current = current->next;",
                before,
                Highlight::Active,
            );
        }

        if self.policy.wraps {
            script.remove_wrap("Removing old circular link");
        } else {
            script.step("Cutting link to old Tail", "tail->next = nullptr;", move |registry| {
                registry.remove_outgoing(before, ConnectorKind::Next);
                Ok(())
            });
        }
        script.remove("Removing Tail node", "delete temp;", tail);

        self.list.release(tail);
        self.list.set_tail(Some(before));
        if self.policy.wraps {
            self.list.set_next(before, Some(head));
            script.add_wrap("Updating Circular Link", before, head);
        } else {
            self.list.set_next(before, None);
        }

        script.relayout(self.list.ids());
    }

    fn build_delete_middle(&mut self, index: usize, script: &mut Script) {
        let ids = self.list.ids();
        let current = ids[index - 1];
        let target = ids[index];
        let after = ids[index + 1];
        debug!(%target, index, "building positional delete");

        script.highlight(
            format!("Found predecessor at index {}", index - 1),
            "Node* current = head;\nfor (int i = 0; i < index - 1; i++) current = current->next;",
            current,
            Highlight::Active,
        );
        script.highlight(
            format!("Marking node at {} for deletion", index),
            "Node* toDelete = current->next;",
            target,
            Highlight::Danger,
        );
        script.step("Unlinking node", "current->next = toDelete->next;", move |registry| {
            registry.remove_touching(target);
            registry.connect(current, after, ConnectorKind::Next);
            Ok(())
        });
        if self.policy.links_backward {
            script.link(
                "Linking next node back to predecessor",
                "toDelete->next->prev = current;",
                after,
                current,
                ConnectorKind::Prev,
            );
            self.list.set_prev(after, Some(current));
        }
        script.remove("Deleting node", "delete toDelete;", target);

        self.list.set_next(current, Some(after));
        self.list.release(target);

        script.relayout(self.list.ids());
    }
}
