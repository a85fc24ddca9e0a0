//! # Introduction
//!
//! listanim animates singly, doubly and circular linked-list operations one
//! step at a time. Every operation is compiled up front into a queue of
//! replayable steps; a player runs them forward with autoplay or manual
//! stepping and rewinds them from per-step snapshots. A terminal UI built with
//! [ratatui](https://docs.rs/ratatui) draws the list and the C++ code behind
//! each step.
//!
//! ## Pipeline
//!
//! ```text
//! Input → Session → OperationDriver → Steps → Player → VisualRegistry → TUI
//!                         ↓
//!                    LogicalList
//! ```
//!
//! 1. [`list`] — the logical list: arena of nodes with head, tail and size.
//! 2. [`driver`] — validates a request, mutates the logical list eagerly and
//!    records one [`player::Step`] per visible edit.
//! 3. [`player`] — step queue, autoplay scheduling and snapshot-based rewind.
//! 4. [`visual`] — on-screen nodes and explicit connectors, with
//!    [`snapshot`] capture and restore.
//! 5. [`session`] — the context object tying the above together.
//! 6. [`ui`] — ratatui-based TUI; not part of the stable library API.

pub mod config;
pub mod driver;
pub mod list;
pub mod player;
pub mod session;
pub mod snapshot;
pub mod ui;
pub mod visual;
