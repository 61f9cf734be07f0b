//! Shared layout pieces for the game screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Play field, inside the outer border.
    pub content: Rect,
    /// Two-line status bar under the play field.
    pub status_bar: Rect,
    /// Bordered side panel on the right.
    pub info_panel: Rect,
}

/// Outer border with the play field and status bar on the left and an info
/// panel on the right.
///
/// ```text
/// ┌─ Title ───────────────┬─ Info ──────┐
/// │                       │             │
/// │   [play field]        │  [info]     │
/// │                       │             │
/// │ [status bar]          │             │
/// └───────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(16), Constraint::Length(info_panel_width)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Status message on the first line, key hints on the second.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height == 0 {
        return;
    }

    let status = Paragraph::new(Span::styled(
        status_text,
        Style::default()
            .fg(status_color)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height < 2 || controls.is_empty() {
        return;
    }

    let spans: Vec<Span> = controls
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let gap = if i > 0 { "  " } else { "" };
            [
                Span::raw(gap),
                Span::styled(*key, Style::default().fg(Color::White)),
                Span::styled(format!(" {}", action), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

/// Bordered info panel; returns the inner area.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Centered banner over the play field. Only the banner rows are cleared;
/// the rest of the field stays visible.
pub fn render_banner(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let height: u16 = 4;
    if area.height < height || area.width < 8 {
        return;
    }
    let banner = Rect {
        x: area.x,
        y: area.y + (area.height - height) / 2,
        width: area.width,
        height,
    };
    frame.render_widget(Clear, banner);

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(color));
    let inner = block.inner(banner);
    frame.render_widget(block, banner);

    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
