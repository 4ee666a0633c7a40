use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::typing::ThinkingIndicator;

/// One-line status strip between the messages and the input box. Shows the
/// bounded dot cycle while a reply is outstanding, nothing otherwise.
pub fn draw_status(f: &mut Frame, area: Rect, thinking: &ThinkingIndicator) {
    let marker = if thinking.is_active() { "●" } else { " " };

    let status = Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(thinking.label(), Style::default().fg(Color::DarkGray)),
    ]);

    f.render_widget(
        Paragraph::new(status).alignment(ratatui::layout::Alignment::Left),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: 1,
        },
    );
}
