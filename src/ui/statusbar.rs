//! Status bar widget
//!
//! Shows the current path, pane states, the last panel effect and
//! keybinding hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::app::App;
use crate::layout::{Effect, Side};

/// Status bar at the bottom of the screen
pub struct StatusBar<'a> {
    app: &'a App,
}

impl<'a> StatusBar<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    fn pane_span(&self, side: Side) -> Span<'static> {
        let collapsed = self.app.panes.is_collapsed(side);
        let (label, bg) = if collapsed {
            ("closed", Color::DarkGray)
        } else {
            ("open", Color::Cyan)
        };
        Span::styled(
            format!(" {side}:{label} "),
            Style::default().fg(Color::Black).bg(bg),
        )
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.app.path),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            self.pane_span(Side::Left),
            self.pane_span(Side::Right),
        ];

        if let Some(id) = self.app.threads.selected_id() {
            spans.push(Span::styled(
                format!(" {id} "),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ));
        }

        if let Some((side, effect)) = self.app.panes.handle().last() {
            let verb = match effect {
                Effect::Collapse => "collapse",
                Effect::Expand => "expand",
            };
            spans.push(Span::styled(
                format!(" {verb} {side} "),
                Style::default().fg(Color::DarkGray),
            ));
        }

        // Fill remaining width with keybinding hints
        let used_width: usize = spans.iter().map(|s| s.width()).sum();
        let hints = " [/]:pane  1/2:open  j/k:nav  p:pin  l:lang  q:quit  ?:help ";
        let remaining = (area.width as usize).saturating_sub(used_width);
        if remaining > hints.len() {
            spans.push(Span::raw(" ".repeat(remaining - hints.len())));
        }
        spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

        Widget::render(Line::from(spans), area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Dictionaries, Locale};
    use crate::ui::buffer_text;

    fn app() -> App {
        App::new(1920, Locale::Ja, Dictionaries::default())
    }

    #[test]
    fn statusbar_renders_state() {
        let app = app();
        let area = Rect::new(0, 0, 120, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&app).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("/ja/chat"));
        assert!(text.contains("left:open"));
        assert!(text.contains("right:closed"));
        assert!(text.contains("t-1"));
        assert!(text.contains("collapse right"));
    }

    #[test]
    fn statusbar_narrow_renders() {
        let app = app();
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&app).render(area, &mut buf);
    }
}
