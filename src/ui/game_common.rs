//! Frame pieces around the play field: outer split, status lines, result
//! banner and titled side panels.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Rows reserved under the play field for status text and key hints.
pub const STATUS_ROWS: u16 = 2;

/// Where each part of the screen goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLayout {
    pub field: Rect,
    pub status: Rect,
    pub side: Rect,
}

/// Draw the titled outer border and split its inside into the play field,
/// the status rows under it and a side column of `side_width`.
pub fn split_scene(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border: Color,
    side_width: u16,
) -> SceneLayout {
    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = outer.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(outer, area);

    let [left, side] = columns(inner, side_width);
    let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(STATUS_ROWS)]).split(left);
    SceneLayout {
        field: rows[0],
        status: rows[1],
        side,
    }
}

fn columns(area: Rect, side_width: u16) -> [Rect; 2] {
    let split =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(side_width)]).split(area);
    [split[0], split[1]]
}

/// `status` in `color` over a line of `[key] action` hints.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status: &str,
    color: Color,
    hints: &[(&str, &str)],
) {
    let hint_spans: Vec<Span> = hints
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let gap = if i == 0 { "" } else { "  " };
            [
                Span::raw(gap),
                Span::styled(*key, Style::default().fg(Color::White)),
                Span::styled(format!(" {action}"), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    let lines = vec![
        Line::styled(status, Style::default().fg(color)),
        Line::from(hint_spans),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Boxed result across the bottom of `area`; the field stays visible above.
/// Green for a win, red otherwise.
pub fn render_result_banner(
    frame: &mut Frame,
    area: Rect,
    won: bool,
    headline: &str,
    details: &[String],
) {
    let accent = if won { Color::Green } else { Color::Red };
    // Border, headline, details, restart hint
    let height = (details.len() as u16 + 4).min(area.height);
    let banner = Rect {
        y: area.bottom() - height,
        height,
        ..area
    };

    let mut lines = vec![Line::styled(
        headline,
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    )];
    lines.extend(
        details
            .iter()
            .map(|d| Line::styled(d.as_str(), Style::default().fg(Color::White))),
    );
    lines.push(Line::styled(
        "[Space] Run again",
        Style::default().fg(Color::DarkGray),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    frame.render_widget(Clear, banner);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        banner,
    );
}

/// Gray-bordered panel with `title`. Returns the area inside the border.
pub fn titled_panel(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_split_reserves_status_rows_and_side_column() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                let layout = split_scene(frame, frame.size(), " T ", Color::Cyan, 22);
                assert_eq!(layout.side.width, 22);
                assert_eq!(layout.status.height, STATUS_ROWS);
                assert_eq!(layout.field.height, 24 - 2 - STATUS_ROWS);
                assert_eq!(layout.field.width, 80 - 2 - 22);
                assert_eq!(layout.status.y, layout.field.bottom());
            })
            .unwrap();
    }

    #[test]
    fn test_banner_sits_on_bottom_edge() {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|frame| {
                let details = vec!["Ran 120".to_string()];
                render_result_banner(frame, frame.size(), false, "GAME OVER", &details);
            })
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Ran 120"));
        assert!(text.contains("Run again"));
        // 1 detail line makes a 5-row banner, so the top rows stay untouched
        assert!(text[..40 * 7].trim().is_empty());
    }

    #[test]
    fn test_status_bar_lists_hints() {
        let mut terminal = Terminal::new(TestBackend::new(40, 2)).unwrap();
        terminal
            .draw(|frame| {
                render_status_bar(
                    frame,
                    frame.size(),
                    "Run!",
                    Color::Cyan,
                    &[("[Up]", "Jump"), ("[Q]", "Quit")],
                );
            })
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Run!"));
        assert!(text.contains("[Up] Jump  [Q] Quit"));
    }
}
