use crate::visual::layout::ConnectorKind;
use crate::visual::Highlight;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub function: Color,
    pub type_name: Color, // Cyan for type names
    pub node: Color,      // Idle node outline
    pub active: Color,    // Node being visited
    pub next_link: Color,
    pub prev_link: Color,
    pub wrap_link: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    string: Color::Rgb(250, 179, 135),         // Orange for strings
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    function: Color::Rgb(249, 226, 175),       // Yellow for functions
    type_name: Color::Rgb(148, 226, 213),      // Cyan/teal for type names
    node: Color::Rgb(137, 180, 250),
    active: Color::Rgb(249, 226, 175),
    next_link: Color::Rgb(137, 180, 250),
    prev_link: Color::Rgb(245, 194, 231), // Pink for backward links
    wrap_link: Color::Rgb(203, 166, 247), // Mauve for the circular link
};

impl Theme {
    pub fn highlight(&self, highlight: Highlight) -> Color {
        match highlight {
            Highlight::None => self.node,
            Highlight::Active => self.active,
            Highlight::New => self.success,
            Highlight::Found => self.type_name,
            Highlight::Danger => self.error,
        }
    }

    pub fn connector(&self, kind: ConnectorKind) -> Color {
        match kind {
            ConnectorKind::Next => self.next_link,
            ConnectorKind::Prev => self.prev_link,
            ConnectorKind::Wrap => self.wrap_link,
        }
    }
}
