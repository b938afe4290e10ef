//! Key binding overlay

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("[", "close / reopen threads"),
    ("]", "close / reopen prompts"),
    ("1", "open threads"),
    ("2", "open prompts"),
    ("j / k", "select thread"),
    ("p", "pin / unpin thread"),
    ("l", "switch language"),
    ("?", "toggle help"),
    ("q", "quit"),
];

pub struct HelpOverlay;

impl HelpOverlay {
    /// Centered popup area, clipped to `area`.
    pub fn popup_area(area: Rect) -> Rect {
        let width = 40.min(area.width);
        let height = (BINDINGS.len() as u16 + 2).min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }
}

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = Self::popup_area(area);
        Clear.render(popup, buf);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {key:>6} "),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*what),
                ])
            })
            .collect();

        Paragraph::new(lines)
            .block(Block::default().title(" Help ").borders(Borders::ALL))
            .render(popup, buf);
    }
}
