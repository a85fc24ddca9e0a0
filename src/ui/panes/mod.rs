//! TUI pane rendering modules
//!
//! Each pane module exports a primary `render_*` function plus the small
//! render-data struct it reads from.
//!
//! # Pane Modules
//!
//! - [`canvas`]: nodes, connectors and exit transitions of the list
//! - [`code`]: C++ fragment of the current step, with syntax highlighting
//! - [`explanation`]: step description, list summary and input prompt
//! - [`status`]: status bar with keybindings and playback state

pub mod canvas;
pub mod code;
pub mod explanation;
pub mod status;

pub use canvas::{render_canvas_pane, CanvasRenderData};
pub use code::render_code_pane;
pub use explanation::{render_explanation_pane, ExplanationRenderData};
pub use status::{render_status_bar, StatusRenderData};
