// Operations that walk the list: search, traverse, reverse and random fill

use super::{
    Operation, OperationDriver, OperationScript, Outcome, Rejection, ReverseStrategy, Script,
};
use crate::list::{ListVariant, NodeId};
use crate::visual::layout::ConnectorKind;
use crate::visual::{Highlight, VisualRegistry};
use tracing::debug;

impl OperationDriver {
    /// Visit nodes in forward order until `target` is found.
    ///
    /// The outcome is decided at build time; a circular list is searched for
    /// exactly one revolution.
    pub fn search(&mut self, target: i32) -> Result<OperationScript, Rejection> {
        if self.list.is_empty() {
            return Err(Rejection::EmptyList);
        }
        let mut script = Script::new(Operation::Search);
        let mut outcome = Outcome::NotFound;

        for (index, id) in self.list.ids().into_iter().enumerate() {
            let value = self.list.value_of(id).unwrap_or_default();
            script.highlight(
                format!("Checking index {}: Is {} == {}?", index, value, target),
                "if (current->data == value)",
                id,
                Highlight::Active,
            );
            if value == target {
                script.highlight("Found it!", "return index;", id, Highlight::Found);
                outcome = Outcome::Found { index };
                break;
            }
            script.step(
                "Not found, moving next",
                "current = current->next;",
                move |registry| {
                    registry.unhighlight(id);
                    Ok(())
                },
            );
        }

        if outcome == Outcome::NotFound {
            script.narrate("Value not found in list.", "return -1;");
        }
        debug!(value = target, ?outcome, "built search");
        Ok(script.finish(self.variant(), outcome))
    }

    /// Highlight every node once, in forward order
    pub fn traverse(&mut self) -> Result<OperationScript, Rejection> {
        if self.list.is_empty() {
            return Err(Rejection::EmptyList);
        }
        let mut script = Script::new(Operation::Traverse);
        let ids = self.list.ids();

        for (index, &id) in ids.iter().enumerate() {
            let value = self.list.value_of(id).unwrap_or_default();
            script.step(
                format!("Visiting index {}: {}", index, value),
                "cout << current->data << \" -> \";",
                move |registry| {
                    registry.clear_highlights();
                    super::mark(registry, id, Highlight::Active)
                },
            );
        }

        let (end, code) = if self.policy.wraps {
            ("(head)", "} while (current != head);")
        } else {
            ("NULL", "cout << \"NULL\" << endl;")
        };
        let rendered: Vec<String> = self.list.values().iter().map(|v| v.to_string()).collect();
        script.step(
            format!("{} -> {}", rendered.join(" -> "), end),
            code,
            |registry| {
                registry.clear_highlights();
                Ok(())
            },
        );
        Ok(script.finish(self.variant(), Outcome::Completed))
    }

    /// Reverse the list in place.
    ///
    /// Singly and circular lists flip each forward link with a three-pointer
    /// walk; doubly lists swap each node's links.
    pub fn reverse(&mut self) -> Result<OperationScript, Rejection> {
        if self.variant() == ListVariant::Circular && !self.circular_reverse {
            return Err(Rejection::Unsupported {
                operation: Operation::Reverse,
                variant: self.variant(),
            });
        }
        if self.list.len() < 2 {
            return Err(Rejection::TooSmallToReverse);
        }

        let mut script = Script::new(Operation::Reverse);
        match self.policy.reverse {
            ReverseStrategy::Relink => self.build_relink_reverse(&mut script),
            ReverseStrategy::SwapLinks => self.build_swap_reverse(&mut script),
        }
        script.relayout(self.list.ids());
        Ok(script.finish(self.variant(), Outcome::Completed))
    }

    /// Append every value of `values` at the tail, as a single script
    pub fn random_fill(
        &mut self,
        registry: &mut VisualRegistry,
        values: &[i32],
    ) -> OperationScript {
        let mut script = Script::new(Operation::InsertTail);
        script.narrate(
            format!("Generating {} random nodes", values.len()),
            "// Building a random list...",
        );
        for &value in values {
            self.build_insert_tail(registry, value, &mut script);
        }
        script.relayout(self.list.ids());
        debug!(count = values.len(), "built random fill");
        script.finish(self.variant(), Outcome::Completed)
    }

    fn build_relink_reverse(&mut self, script: &mut Script) {
        let ids = self.list.ids();
        let (Some(&old_head), Some(&old_tail)) = (ids.first(), ids.last()) else {
            return;
        };

        if self.policy.wraps {
            script.remove_wrap("Removing circular link before reverse");
        }

        let mut prev: Option<NodeId> = None;
        for &id in &ids {
            let value = self.list.value_of(id).unwrap_or_default();
            script.highlight(
                format!("Processing node {}", value),
                "next = current->next;",
                id,
                Highlight::Active,
            );
            script.step("Flipping pointer", "current->next = prev;", move |registry| {
                registry.remove_outgoing(id, ConnectorKind::Next);
                if let Some(prev) = prev {
                    registry.connect(id, prev, ConnectorKind::Next);
                }
                Ok(())
            });
            self.list.set_next(id, prev);
            prev = Some(id);
        }

        script.narrate("Swapping Head and Tail", "tail = head;\nhead = prev;");
        self.list.set_head(Some(old_tail));
        self.list.set_tail(Some(old_head));

        if self.policy.wraps {
            self.list.set_next(old_head, Some(old_tail));
            script.add_wrap("Restoring circular link", old_head, old_tail);
        }
    }

    fn build_swap_reverse(&mut self, script: &mut Script) {
        let ids = self.list.ids();
        let (Some(&old_head), Some(&old_tail)) = (ids.first(), ids.last()) else {
            return;
        };

        for &id in &ids {
            let old_next = self.list.next_of(id);
            let old_prev = self.list.prev_of(id);

            script.highlight(
                "Swapping prev and next pointers",
                "temp = current->prev;\ncurrent->prev = current->next;\ncurrent->next = temp;",
                id,
                Highlight::Active,
            );
            script.step("Pointers swapped", "", move |registry| {
                registry.remove_outgoing(id, ConnectorKind::Next);
                registry.remove_outgoing(id, ConnectorKind::Prev);
                if let Some(target) = old_prev {
                    registry.connect(id, target, ConnectorKind::Next);
                }
                if let Some(target) = old_next {
                    registry.connect(id, target, ConnectorKind::Prev);
                }
                Ok(())
            });

            self.list.set_next(id, old_prev);
            self.list.set_prev(id, old_next);
        }

        script.narrate("Swapping Head and Tail", "tail = head;\nhead = temp->prev;");
        self.list.set_head(Some(old_tail));
        self.list.set_tail(Some(old_head));
    }
}
