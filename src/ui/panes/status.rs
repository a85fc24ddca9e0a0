//! Status bar rendering with keybindings and playback indicators

use crate::config::PlaybackSpeed;
use crate::player::PlayerState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Everything the status bar shows
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub is_error: bool,
    /// Index of the last executed step
    pub cursor: Option<usize>,
    pub total_steps: usize,
    pub state: PlayerState,
    pub speed: PlaybackSpeed,
    /// Prompt label while the user is typing an operation argument
    pub prompt: Option<&'a str>,
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData<'_>) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let step_text = match (data.cursor, data.total_steps) {
        (_, 0) => " Step -/- ".to_string(),
        (None, total) => format!(" Step 0/{} ", total),
        (Some(index), total) => format!(" Step {}/{} ", index + 1, total),
    };

    let left_spans = vec![
        Span::styled(
            step_text,
            Style::default()
                .bg(if data.is_error {
                    DEFAULT_THEME.error
                } else if data.prompt.is_some() {
                    DEFAULT_THEME.secondary
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(if data.is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = if data.prompt.is_some() {
        vec![
            Span::styled(" ↵ ", key_style),
            Span::styled(" confirm ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" esc ", key_style),
            Span::styled(" cancel ", desc_style),
        ]
    } else {
        vec![
            Span::styled(" ←/→ ", key_style),
            Span::styled(" step ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ⎵ ", key_style),
            Span::styled(" play ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" +/- ", key_style),
            Span::styled(format!(" {} ", data.speed), desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ? ", key_style),
            Span::styled(" keys ", desc_style),
            Span::styled("│", sep_style),
            Span::styled("q", key_style),
            Span::styled(" quit ", desc_style),
        ]
    };

    let badge = match data.state {
        _ if data.prompt.is_some() => Some((" ⌨ INPUT ", DEFAULT_THEME.secondary)),
        PlayerState::Playing => Some((" ▶ PLAYING ", DEFAULT_THEME.secondary)),
        PlayerState::Paused => Some((" ❚❚ PAUSED ", DEFAULT_THEME.primary)),
        PlayerState::Finished => Some((" END ", DEFAULT_THEME.error)),
        PlayerState::Populated => Some((" START ", DEFAULT_THEME.success)),
        PlayerState::Idle => None,
    };
    if let Some((text, color)) = badge {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
