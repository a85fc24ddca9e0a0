//! List canvas rendering
//!
//! Draws the visual registry with a braille [`Canvas`]: one box per node,
//! connector curves sampled from their paths, and fading ghosts of removed
//! nodes. Layout space has y growing downward, so every y is negated before
//! it reaches the canvas.

use crate::list::{ListVariant, NodeId};
use crate::ui::theme::DEFAULT_THEME;
use crate::visual::layout::{Point, ORIGIN_X, ORIGIN_Y, SLOT_GAP};
use crate::visual::{VisualNode, VisualRegistry};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Rectangle},
        Block, Borders,
    },
    Frame,
};

const NODE_WIDTH: f64 = 90.0;
const NODE_HEIGHT: f64 = 50.0;
const CURVE_SEGMENTS: usize = 16;

/// Vertical room above and below the slot row
const VERTICAL_SPAN: f64 = 260.0;

/// What the canvas needs to know besides the registry
pub struct CanvasRenderData {
    pub variant: ListVariant,
    pub head: Option<NodeId>,
    pub tail: Option<NodeId>,
    pub is_focused: bool,
}

pub fn render_canvas_pane(
    frame: &mut Frame,
    area: Rect,
    registry: &VisualRegistry,
    data: &CanvasRenderData,
) {
    let border_style = if data.is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    let block = Block::default()
        .title(format!(" {} Linked List ", title_case(data.variant.name())))
        .borders(Borders::ALL)
        .border_style(border_style);

    let nodes = registry.nodes();
    let right_edge = nodes
        .iter()
        .map(|n| n.position.x)
        .fold(ORIGIN_X + 4.0 * SLOT_GAP, f64::max)
        + SLOT_GAP;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([ORIGIN_X - SLOT_GAP - NODE_WIDTH, right_edge])
        .y_bounds([-(ORIGIN_Y + VERTICAL_SPAN), -(ORIGIN_Y - VERTICAL_SPAN)])
        .paint(|ctx| {
            for ghost in registry.ghosts() {
                draw_box(ctx, &ghost.node, DEFAULT_THEME.comment);
            }
            ctx.layer();

            for connector in registry.connectors() {
                let color = DEFAULT_THEME.connector(connector.kind);
                let points = connector.path.sample(CURVE_SEGMENTS);
                for pair in points.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].x,
                        y1: -pair[0].y,
                        x2: pair[1].x,
                        y2: -pair[1].y,
                        color,
                    });
                }
                if let [.., before, end] = points.as_slice() {
                    let arrow = if end.x >= before.x { "►" } else { "◄" };
                    ctx.print(end.x, -end.y, Span::styled(arrow, Style::default().fg(color)));
                }
            }
            ctx.layer();

            for node in &nodes {
                let color = DEFAULT_THEME.highlight(node.highlight);
                draw_box(ctx, node, color);
                draw_labels(ctx, node, data);
            }
        });

    frame.render_widget(canvas, area);
}

fn draw_box(ctx: &mut Context<'_>, node: &VisualNode, color: ratatui::style::Color) {
    let Point { x, y } = node.position;
    ctx.draw(&Rectangle {
        x: x - NODE_WIDTH / 2.0,
        y: -y - NODE_HEIGHT / 2.0,
        width: NODE_WIDTH,
        height: NODE_HEIGHT,
        color,
    });
    ctx.print(
        x - 8.0,
        -y + 8.0,
        Span::styled(
            node.value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    );
}

fn draw_labels(ctx: &mut Context<'_>, node: &VisualNode, data: &CanvasRenderData) {
    let Point { x, y } = node.position;
    let muted = Style::default().fg(DEFAULT_THEME.comment);

    ctx.print(
        x - NODE_WIDTH / 2.0 + 4.0,
        -y - 10.0,
        Span::styled(node.address.clone(), muted),
    );

    if let Some(index) = node.index_label {
        ctx.print(
            x - 10.0,
            -y - NODE_HEIGHT,
            Span::styled(format!("[{}]", index), muted),
        );
    }

    let role = match (Some(node.id) == data.head, Some(node.id) == data.tail) {
        (true, true) => Some("HEAD/TAIL"),
        (true, false) => Some("HEAD"),
        (false, true) => Some("TAIL"),
        (false, false) => None,
    };
    if let Some(role) = role {
        ctx.print(
            x - NODE_WIDTH / 2.0,
            -y + NODE_HEIGHT,
            Span::styled(role, Style::default().fg(DEFAULT_THEME.secondary)),
        );
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
