use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppScreen};
use crate::status_indicator::draw_status;

// Input box: separator, up to three visible input rows, separator.
const INPUT_ROWS: u16 = 3;

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .margin(1)
        .split(size);

    let chat_vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(2),
                Constraint::Length(INPUT_ROWS + 2),
            ]
            .as_ref(),
        )
        .split(horizontal_chunks[0]);

    draw_messages(f, app, chat_vertical_chunks[0]);
    draw_status(f, chat_vertical_chunks[1], &app.thinking);
    draw_input(f, app, chat_vertical_chunks[2]);
    draw_logs(f, app, horizontal_chunks[1], size);

    if app.screen == AppScreen::QuitConfirm {
        draw_quit_confirm(f, size);
    }
}

fn draw_messages(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for message in app.messages.iter() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(message.render(area));
    }

    let total_lines = lines.len() as u16;
    let available_height = area.height;
    let max_scroll = total_lines.saturating_sub(available_height);
    let chat_scroll = app.chat_scroll.min(max_scroll);

    let msgs_para = Paragraph::new(lines)
        .style(Style::default())
        .block(Block::default())
        .wrap(Wrap { trim: true });
    f.render_widget(msgs_para.scroll((chat_scroll, 0)), area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    // Show the tail of the buffer when it has more lines than the box.
    let input_lines: Vec<&str> = app.input.split('\n').collect();
    let skip = input_lines.len().saturating_sub(INPUT_ROWS as usize);
    let visible: Vec<Line> = input_lines[skip..]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 && skip == 0 { "→ " } else { "  " };
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(Color::DarkGray)),
                Span::styled(*line, Style::default().fg(Color::White)),
            ])
        })
        .collect();
    let visible_line_count = visible.len() as u16;

    f.render_widget(
        Paragraph::new(visible),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 2,
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        },
    );

    let last_line = input_lines.last().copied().unwrap_or("");
    let cursor_x = area.x + 2 + last_line.width() as u16;
    let cursor_y = area.y + visible_line_count.max(1);
    f.set_cursor_position((cursor_x.min(area.x + area.width - 1), cursor_y));
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect, size: Rect) {
    let vsep = "│".repeat(size.height.saturating_sub(2) as usize);
    f.render_widget(
        Paragraph::new(Span::raw(vsep)).style(Style::default().fg(Color::DarkGray)),
        Rect {
            x: area.x.saturating_sub(1),
            y: 1,
            width: 1,
            height: size.height.saturating_sub(2),
        },
    );

    let log_lines: Vec<Line> = app
        .logs
        .entries
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::raw(entry.as_str()),
            ])
        })
        .collect();

    let total_log_lines = log_lines.len() as u16;
    let max_log_scroll = total_log_lines.saturating_sub(area.height);
    let logs_scroll = app.logs_scroll.min(max_log_scroll);

    let logs_para = Paragraph::new(log_lines)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    f.render_widget(logs_para.scroll((logs_scroll, 0)), area);
}

fn draw_quit_confirm(f: &mut Frame, size: Rect) {
    let width = 36.min(size.width);
    let height = 5.min(size.height);
    let popup = Rect {
        x: (size.width - width) / 2,
        y: (size.height - height) / 2,
        width,
        height,
    };

    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Quit?")
        .style(Style::default().fg(Color::LightYellow));
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "y / Enter to quit, n / Esc to stay",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(text, popup);
}
