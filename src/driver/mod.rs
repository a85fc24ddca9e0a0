//! Operation driver: compiles list operations into animation steps
//!
//! Every public operation follows the same template:
//!
//! 1. Validate the request and return a [`Rejection`] without touching anything.
//! 2. Mutate the [`LogicalList`] eagerly while recording one [`Step`] per
//!    meaningful edit (create node, link, unlink, move head/tail, remove node,
//!    re-layout).
//! 3. Append a trailing step showing the full C++ listing from [`code`].
//!
//! The resulting [`OperationScript`] is handed to the player. Steps capture
//! ids and positions by value, never references into the list, so they can be
//! replayed in any order the user navigates.
//!
//! # Variant policy
//!
//! One driver serves all three list types. [`Policy`] holds the small set of
//! variant-specific decisions: whether a wrap connector must be maintained,
//! whether backward links exist, and which reverse strategy applies.
//!
//! # Modules
//!
//! - [`code`]: static pseudo-code table
//! - [`errors`]: validation rejections
//! - `insert`, `delete`, `walk`: per-operation step generation

pub mod code;
pub mod errors;

mod delete;
mod insert;
mod walk;

pub use errors::Rejection;

use crate::config::ENTRY_TRANSITION;
use crate::list::{ListVariant, LogicalList, NodeId};
use crate::player::errors::StepError;
use crate::player::step::{DisplayText, Step};
use crate::visual::layout::{slot, ConnectorKind, Point};
use crate::visual::{Highlight, VisualRegistry};
use std::fmt;

/// Operations the driver knows how to animate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    InsertHead,
    InsertTail,
    InsertAt,
    DeleteHead,
    DeleteTail,
    DeleteAt,
    Search,
    Traverse,
    Reverse,
    Clear,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::InsertHead,
        Operation::InsertTail,
        Operation::InsertAt,
        Operation::DeleteHead,
        Operation::DeleteTail,
        Operation::DeleteAt,
        Operation::Search,
        Operation::Traverse,
        Operation::Reverse,
        Operation::Clear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::InsertHead => "insertAtHead",
            Operation::InsertTail => "insertAtTail",
            Operation::InsertAt => "insertAtPosition",
            Operation::DeleteHead => "deleteAtHead",
            Operation::DeleteTail => "deleteAtTail",
            Operation::DeleteAt => "deleteAtPosition",
            Operation::Search => "search",
            Operation::Traverse => "traverse",
            Operation::Reverse => "reverse",
            Operation::Clear => "clear",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Logical result of an operation, known as soon as it is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Found { index: usize },
    NotFound,
}

/// Steps compiled for one operation
#[derive(Debug)]
pub struct OperationScript {
    pub operation: Operation,
    pub steps: Vec<Step>,
    pub outcome: Outcome,
}

/// How a variant reverses its links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReverseStrategy {
    /// prev/current/next walk flipping each forward link
    Relink,
    /// swap each node's next and prev in place
    SwapLinks,
}

/// Variant-specific decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// Tail links back to head through a wrap connector
    pub wraps: bool,
    /// Nodes carry backward links
    pub links_backward: bool,
    pub reverse: ReverseStrategy,
}

impl Policy {
    pub fn for_variant(variant: ListVariant) -> Self {
        match variant {
            ListVariant::Singly => Policy {
                wraps: false,
                links_backward: false,
                reverse: ReverseStrategy::Relink,
            },
            ListVariant::Doubly => Policy {
                wraps: false,
                links_backward: true,
                reverse: ReverseStrategy::SwapLinks,
            },
            ListVariant::Circular => Policy {
                wraps: true,
                links_backward: false,
                reverse: ReverseStrategy::Relink,
            },
        }
    }
}

/// Builds the logical list and the steps animating it
#[derive(Debug)]
pub struct OperationDriver {
    list: LogicalList,
    policy: Policy,
    circular_reverse: bool,
}

impl OperationDriver {
    pub fn new(variant: ListVariant, circular_reverse: bool) -> Self {
        OperationDriver {
            list: LogicalList::new(variant),
            policy: Policy::for_variant(variant),
            circular_reverse,
        }
    }

    pub fn list(&self) -> &LogicalList {
        &self.list
    }

    pub fn variant(&self) -> ListVariant {
        self.list.variant()
    }

    /// Start over with an empty list of `variant`
    pub fn reset(&mut self, variant: ListVariant) {
        self.list = LogicalList::new(variant);
        self.policy = Policy::for_variant(variant);
    }

    /// Make the registry mirror the logical list immediately, keeping the
    /// visuals (and addresses) of nodes that are already on screen
    pub fn materialize(&self, registry: &mut VisualRegistry) {
        let ids = self.list.ids();

        let stale: Vec<NodeId> = registry
            .nodes()
            .iter()
            .map(|n| n.id)
            .filter(|id| self.list.node(*id).is_none())
            .collect();
        for id in stale {
            registry.remove_node(id);
        }

        for (index, id) in ids.iter().enumerate() {
            if !registry.contains(*id) {
                if let Some(value) = self.list.value_of(*id) {
                    registry.add_node(value, slot(index), Some(*id));
                }
            }
        }

        registry.clear_connectors();
        for pair in ids.windows(2) {
            registry.connect(pair[0], pair[1], ConnectorKind::Next);
            if self.policy.links_backward {
                registry.connect(pair[1], pair[0], ConnectorKind::Prev);
            }
        }
        if self.policy.wraps {
            if let (Some(tail), Some(head)) = (self.list.tail(), self.list.head()) {
                registry.connect(tail, head, ConnectorKind::Wrap);
            }
        }
        registry.relayout(&ids);
    }
}

/// Highlight a node, failing the step if it is not on screen
fn mark(
    registry: &mut VisualRegistry,
    id: NodeId,
    highlight: Highlight,
) -> Result<(), StepError> {
    if registry.highlight(id, highlight) {
        Ok(())
    } else {
        Err(StepError::MissingNode(id))
    }
}

/// Ordered steps under construction
struct Script {
    operation: Operation,
    steps: Vec<Step>,
}

impl Script {
    fn new(operation: Operation) -> Self {
        Script {
            operation,
            steps: Vec::new(),
        }
    }

    fn step<F>(&mut self, description: impl Into<String>, code: &str, action: F)
    where
        F: Fn(&mut VisualRegistry) -> Result<(), StepError> + 'static,
    {
        self.steps
            .push(Step::new(description, DisplayText::code(code), action));
    }

    /// A step that leaves the previously shown code on display
    fn quiet<F>(&mut self, description: impl Into<String>, action: F)
    where
        F: Fn(&mut VisualRegistry) -> Result<(), StepError> + 'static,
    {
        self.steps
            .push(Step::new(description, DisplayText::Preserve, action));
    }

    /// A step whose only effect is its description and code
    fn narrate(&mut self, description: impl Into<String>, code: &str) {
        self.steps
            .push(Step::narration(description, DisplayText::code(code)));
    }

    /// Materialize a node whose id was reserved at build time
    fn create(
        &mut self,
        description: String,
        code: &str,
        id: NodeId,
        value: i32,
        at: Point,
        label: Option<usize>,
    ) {
        let step = Step::new(description, DisplayText::code(code), move |registry| {
            registry.add_node(value, at, Some(id));
            registry.set_index_label(id, label);
            Ok(())
        });
        self.steps.push(step.with_settle(ENTRY_TRANSITION));
    }

    fn highlight(
        &mut self,
        description: impl Into<String>,
        code: &str,
        id: NodeId,
        highlight: Highlight,
    ) {
        self.step(description, code, move |registry| {
            mark(registry, id, highlight)
        });
    }

    fn link(
        &mut self,
        description: &str,
        code: &str,
        from: NodeId,
        to: NodeId,
        kind: ConnectorKind,
    ) {
        self.step(description, code, move |registry| {
            registry.connect(from, to, kind);
            Ok(())
        });
    }

    /// Replace the outgoing connector of `from` with the given kind
    fn relink(
        &mut self,
        description: &str,
        code: &str,
        from: NodeId,
        to: NodeId,
        kind: ConnectorKind,
    ) {
        self.step(description, code, move |registry| {
            registry.remove_outgoing(from, kind);
            registry.connect(from, to, kind);
            Ok(())
        });
    }

    /// Remove a node together with every connector touching it
    fn remove(&mut self, description: impl Into<String>, code: &str, id: NodeId) {
        let step = Step::new(description, DisplayText::code(code), move |registry| {
            registry.remove_touching(id);
            registry.remove_node(id);
            Ok(())
        });
        self.steps.push(step.with_settle(ENTRY_TRANSITION));
    }

    fn remove_wrap(&mut self, description: &str) {
        self.step(description, "", |registry| {
            registry.remove_kind(ConnectorKind::Wrap);
            Ok(())
        });
    }

    fn add_wrap(&mut self, description: &str, tail: NodeId, head: NodeId) {
        self.link(description, "tail->next = head;", tail, head, ConnectorKind::Wrap);
    }

    /// Move every node to the slot of its final logical position
    fn relayout(&mut self, order: Vec<NodeId>) {
        self.quiet("Adjusting node positions...", move |registry| {
            registry.relayout(&order);
            Ok(())
        });
    }

    /// Append the closing listing step and hand the script over
    fn finish(mut self, variant: ListVariant, outcome: Outcome) -> OperationScript {
        self.narrate(
            "Operation complete! Review the full C++ implementation.",
            code::listing(self.operation, variant),
        );
        OperationScript {
            operation: self.operation,
            steps: self.steps,
            outcome,
        }
    }
}
