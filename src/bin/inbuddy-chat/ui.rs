use crate::app::App;
use inbuddy::format::{format, Block as FormatBlock, Inline};
use inbuddy::llm::MessageRole;
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const MAX_INPUT_ROWS: usize = 6;

pub fn render(app: &mut App, frame: &mut Frame) {
    let error_height = u16::from(app.banner().is_some());
    let input_rows = app.compose.input().split('\n').count().clamp(1, MAX_INPUT_ROWS);

    let [header_area, chat_area, error_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(error_height),
        Constraint::Length(to_u16(input_rows + 2)),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(app, frame, header_area);
    render_chat(app, frame, chat_area);
    if let Some(error) = app.banner() {
        let banner = Paragraph::new(format!(" ⚠ {error}"))
            .style(Style::default().fg(Color::White).bg(Color::Red));
        frame.render_widget(banner, error_area);
    }
    render_input(app, frame, input_area);
    render_footer(frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " InBuddy ",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("· {}", app.relay_url),
            Style::default().fg(Color::Gray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(title).style(Style::default().bg(Color::Blue)),
        area,
    );
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for message in &app.snapshot.messages {
        match message.role {
            MessageRole::User => {
                lines.push(role_line("You:", Color::Cyan));
                lines.extend(message.content.lines().map(|l| Line::from(l.to_string())));
            }
            MessageRole::Assistant => {
                lines.push(role_line("InBuddy:", Color::Yellow));
                lines.extend(block_lines(&format(&message.content)));
            }
            MessageRole::System => continue,
        }
        lines.push(Line::default());
    }

    if app.is_loading() {
        lines.push(role_line("InBuddy:", Color::Yellow));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat(usize::from(app.animation_frame) + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{dots}"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    // Inner size minus borders
    let width = usize::from(area.width.saturating_sub(2)).max(1);
    let height = area.height.saturating_sub(2);
    let total: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    app.max_scroll = to_u16(total).saturating_sub(height);
    app.scroll = if app.follow {
        app.max_scroll
    } else {
        app.scroll.min(app.max_scroll)
    };

    let chat = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" LinkedIn career buddy "),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    frame.render_widget(chat, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let loading = app.is_loading();
    let border = if loading { Color::DarkGray } else { Color::Cyan };
    let input = app.compose.input();

    let rows: Vec<&str> = input.split('\n').collect();
    let visible = &rows[rows.len().saturating_sub(MAX_INPUT_ROWS)..];
    let text: Vec<Line> = visible.iter().map(|r| Line::from(*r)).collect();

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Message "),
    );
    frame.render_widget(paragraph, area);

    if !loading {
        let last = visible.last().map_or(0, |r| Line::from(*r).width());
        let x = area.x + 1 + to_u16(last).min(area.width.saturating_sub(2));
        let y = area.y + to_u16(visible.len());
        frame.set_cursor_position(Position::new(x, y));
    }
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Black).bg(Color::Gray);
    let label = Style::default().fg(Color::Gray);
    let footer = Line::from(vec![
        Span::styled(" Enter ", key),
        Span::styled(" send ", label),
        Span::styled(" Shift+Enter ", key),
        Span::styled(" newline ", label),
        Span::styled(" ↑↓ PgUp PgDn ", key),
        Span::styled(" scroll ", label),
        Span::styled(" Esc ", key),
        Span::styled(" quit ", label),
    ]);
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().bg(Color::Black)),
        area,
    );
}

fn role_line(label: &'static str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Accumulates styled runs, starting a new line at every `\n`
#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
}

impl LineBuilder {
    fn push(&mut self, text: &str, style: Style) {
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.break_line();
            }
            if !part.is_empty() {
                self.current.push(Span::styled(part.to_string(), style));
            }
        }
    }

    fn push_spans(&mut self, spans: &[Inline]) {
        for span in spans {
            match span {
                Inline::Text { text } => self.push(text, Style::default()),
                Inline::Bold { text } => {
                    self.push(text, Style::default().add_modifier(Modifier::BOLD));
                }
                Inline::Link { label, url } => {
                    self.push(
                        label,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::UNDERLINED),
                    );
                    self.push(&format!(" ({url})"), Style::default().fg(Color::DarkGray));
                }
            }
        }
    }

    fn break_line(&mut self) {
        self.lines.push(Line::from(std::mem::take(&mut self.current)));
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        if !self.current.is_empty() {
            self.break_line();
        }
        self.lines
    }
}

/// Terminal rendering of formatted blocks, one blank line between blocks
pub fn block_lines(blocks: &[FormatBlock]) -> Vec<Line<'static>> {
    let mut out = LineBuilder::default();

    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.break_line();
        }
        match block {
            FormatBlock::Paragraph { spans } => {
                out.push_spans(spans);
                out.break_line();
            }
            FormatBlock::BulletList { items } => {
                for item in items {
                    out.push("• ", Style::default().fg(Color::Yellow));
                    out.push_spans(item);
                    out.break_line();
                }
            }
        }
    }

    out.finish()
}
