//! Explanation pane: step description, list summary and the active prompt

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct ExplanationRenderData<'a> {
    pub description: &'a str,
    pub length: usize,
    pub head: Option<i32>,
    pub tail: Option<i32>,
    /// `(label, typed text)` while the user is entering an argument
    pub prompt: Option<(&'a str, &'a str)>,
    pub is_focused: bool,
}

pub fn render_explanation_pane(frame: &mut Frame, area: Rect, data: &ExplanationRenderData<'_>) {
    let border_style = if data.is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    let block = Block::default()
        .title(" Explanation ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let label = Style::default().fg(DEFAULT_THEME.comment);
    let value = Style::default().fg(DEFAULT_THEME.number);
    let show = |v: Option<i32>| v.map_or_else(|| "-".to_string(), |v| v.to_string());

    let mut lines = vec![
        Line::from(Span::styled(
            data.description.to_string(),
            Style::default()
                .fg(DEFAULT_THEME.fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(data.length.to_string(), value),
            Span::styled("   Head: ", label),
            Span::styled(show(data.head), value),
            Span::styled("   Tail: ", label),
            Span::styled(show(data.tail), value),
        ]),
    ];

    if let Some((prompt, typed)) = data.prompt {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", prompt),
                Style::default().fg(DEFAULT_THEME.secondary),
            ),
            Span::styled(format!("{}█", typed), Style::default().fg(DEFAULT_THEME.fg)),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
