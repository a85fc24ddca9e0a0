//! Code pane rendering with syntax highlighting
//!
//! Shows the C++ fragment attached to the current step, or the full listing
//! once an operation completes. Highlighting uses a character-by-character
//! tokenizer rather than a full lexer.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for C++ fragments
fn highlight_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '/' && i + 1 < chars.len() && chars[i + 1] == '/' {
            if !current_word.is_empty() {
                spans.push(Span::raw(current_word.clone()));
                current_word.clear();
            }
            let rest: String = chars[i..].iter().collect();
            spans.push(Span::styled(rest, Style::default().fg(DEFAULT_THEME.comment)));
            break;
        }

        if c == '"' {
            if !current_word.is_empty() {
                spans.push(Span::raw(current_word.clone()));
                current_word.clear();
            }
            let mut end = i + 1;
            while end < chars.len() && chars[end] != '"' {
                end += if chars[end] == '\\' { 2 } else { 1 };
            }
            end = (end + 1).min(chars.len());
            let literal: String = chars[i..end].iter().collect();
            spans.push(Span::styled(literal, Style::default().fg(DEFAULT_THEME.string)));
            i = end;
            continue;
        }

        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                let style = word_style(&current_word, c == '(');
                spans.push(Span::styled(current_word.clone(), style));
                current_word.clear();
            }

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        let style = word_style(&current_word, false);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn word_style(word: &str, is_function: bool) -> Style {
    match word {
        "int" | "void" | "Node" => Style::default().fg(DEFAULT_THEME.type_name),
        "return" | "if" | "else" | "while" | "for" | "do" | "new" | "delete" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "nullptr" | "NULL" | "cout" | "endl" => Style::default().fg(DEFAULT_THEME.number),
        _ if word.chars().all(|c| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ if is_function => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the code pane. `scroll` is clamped to the available lines.
pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    code: &str,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = code.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll = (*scroll).min(lines.len().saturating_sub(visible_height));

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, line)| {
            let mut spans = vec![Span::styled(
                format!("{:3} ", idx + 1),
                Style::default().fg(DEFAULT_THEME.comment),
            )];
            spans.extend(highlight_code(line).spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}
