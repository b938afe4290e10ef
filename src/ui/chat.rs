//! Chat screen widgets
//!
//! The thread list (left pane), the conversation (center), the prompt list
//! (right pane), the icon rail and the edge tabs that reopen collapsed panes.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::data::{Thread, ThreadList};
use crate::i18n::Dictionary;
use crate::layout::Side;

/// Scroll state for the thread list
#[derive(Debug, Default, Clone)]
pub struct ThreadListView {
    /// Scroll offset for vertical scrolling
    pub offset: usize,
}

/// Left pane: pinned threads, then every thread
pub struct ThreadsWidget<'a> {
    threads: &'a ThreadList,
    dict: &'a Dictionary,
}

impl<'a> ThreadsWidget<'a> {
    pub fn new(threads: &'a ThreadList, dict: &'a Dictionary) -> Self {
        Self { threads, dict }
    }

    fn thread_line(thread: &Thread, selected: bool) -> (Line<'static>, bool) {
        let pin = if thread.pinned { "* " } else { "  " };
        let line = Line::from(vec![
            Span::styled(pin, Style::default().fg(Color::Yellow)),
            Span::styled(
                thread.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", thread.updated.format("%m/%d")),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        (line, selected)
    }

    /// Lines with their selected flag. The selected thread is highlighted
    /// in both sections.
    fn build_lines(&self) -> Vec<(Line<'static>, bool)> {
        let selected = self.threads.selected_id();
        let mut lines = Vec::new();

        let pinned: Vec<&Thread> = self.threads.pinned().collect();
        if !pinned.is_empty() {
            lines.push((
                Line::from(Span::styled(
                    self.dict.text("chat.pinned").to_string(),
                    Style::default().fg(Color::Cyan),
                )),
                false,
            ));
            for thread in pinned {
                lines.push(Self::thread_line(thread, Some(thread.id.as_str()) == selected));
            }
            lines.push((Line::raw(""), false));
        }

        for thread in self.threads.threads() {
            lines.push(Self::thread_line(thread, Some(thread.id.as_str()) == selected));
        }
        lines
    }
}

impl<'a> StatefulWidget for ThreadsWidget<'a> {
    type State = ThreadListView;

    fn render(self, area: Rect, buf: &mut Buffer, view: &mut Self::State) {
        if area.width == 0 {
            return;
        }
        let block = Block::default()
            .title(format!(" {} ", self.dict.text("chat.threads")))
            .title(Line::from(" [x] ").alignment(Alignment::Right))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.build_lines();
        let visible_height = inner.height as usize;
        let selected_row = lines.iter().rposition(|(_, s)| *s);

        // Keep the selection (in the full list) visible
        if let Some(row) = selected_row {
            if row < view.offset {
                view.offset = row;
            } else if visible_height > 0 && row >= view.offset + visible_height {
                view.offset = row - visible_height + 1;
            }
        }

        for (i, (line, is_selected)) in lines
            .iter()
            .skip(view.offset)
            .enumerate()
            .take(visible_height)
        {
            let y = inner.y + i as u16;
            let line_area = Rect::new(inner.x, y, inner.width, 1);
            if *is_selected {
                buf.set_style(
                    line_area,
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                );
            }
            Widget::render(line.clone(), line_area, buf);
        }
    }
}

/// Center pane: the selected conversation
pub struct ConversationWidget<'a> {
    thread: Option<&'a Thread>,
    dict: &'a Dictionary,
}

impl<'a> ConversationWidget<'a> {
    pub fn new(thread: Option<&'a Thread>, dict: &'a Dictionary) -> Self {
        Self { thread, dict }
    }
}

impl<'a> Widget for ConversationWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.thread {
            Some(t) => format!(" {} / {} ", self.dict.text("chat.title"), t.id),
            None => format!(" {} ", self.dict.text("chat.title")),
        };
        let block = Block::default().title(title).borders(Borders::ALL);

        let lines = match self.thread {
            Some(t) => vec![
                Line::from(Span::styled(
                    t.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::raw(""),
                Line::from(vec![
                    Span::styled("> ", Style::default().fg(Color::Green)),
                    Span::raw(t.last.clone()),
                ]),
            ],
            None => vec![Line::raw(self.dict.text("home.description").to_string())],
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Dictionary keys of the saved prompts, in display order
const PROMPT_KEYS: &[&str] = &[
    "prompts.summarize",
    "prompts.reply",
    "prompts.questions",
    "prompts.to_en",
    "prompts.to_ja",
];

/// Right pane: saved prompts
pub struct PromptsWidget<'a> {
    dict: &'a Dictionary,
}

impl<'a> PromptsWidget<'a> {
    pub fn new(dict: &'a Dictionary) -> Self {
        Self { dict }
    }
}

impl<'a> Widget for PromptsWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 {
            return;
        }
        let block = Block::default()
            .title(Line::from(" [x] "))
            .title(Line::from(format!(" {} ", self.dict.text("chat.prompts"))).alignment(Alignment::Right))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));
        let lines: Vec<Line> = PROMPT_KEYS
            .iter()
            .map(|key| Line::raw(format!("- {}", self.dict.text(key))))
            .collect();
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Tab anchored to the center pane's edge; reopens a collapsed side
pub struct EdgeTab {
    side: Side,
}

impl EdgeTab {
    pub fn new(side: Side) -> Self {
        Self { side }
    }

    pub fn glyph(&self) -> &'static str {
        match self.side {
            Side::Left => ">",
            Side::Right => "<",
        }
    }
}

impl Widget for EdgeTab {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        Paragraph::new(self.glyph())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }
}

/// Icon rail: `1` opens threads, `2` opens prompts
pub struct Rail {
    left_open: bool,
    right_open: bool,
}

impl Rail {
    pub fn new(left_open: bool, right_open: bool) -> Self {
        Self {
            left_open,
            right_open,
        }
    }
}

impl Widget for Rail {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let item = |key: &'static str, open: bool| {
            let style = if open {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(format!(" {key} "), style))
        };
        let lines = vec![
            Line::raw(" H "),
            item("1", self.left_open),
            item("2", self.right_open),
            Line::raw(" F "),
            Line::raw(" S "),
        ];
        Paragraph::new(lines)
            .style(Style::default().bg(Color::Rgb(15, 23, 32)))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::bundled;
    use crate::i18n::Locale;
    use crate::ui::buffer_text;

    #[test]
    fn build_lines_sections() {
        let threads = ThreadList::sample();
        let dict = bundled(Locale::En).unwrap();
        let widget = ThreadsWidget::new(&threads, &dict);
        let lines = widget.build_lines();
        // header + 4 pinned + blank + 24 threads
        assert_eq!(lines.len(), 30);
        // t-1 is pinned and selected: highlighted in both sections
        assert_eq!(lines.iter().filter(|(_, s)| *s).count(), 2);
    }

    #[test]
    fn no_pinned_section_without_pins() {
        let input = include_str!("../../tests/fixtures/threads.json");
        let mut threads = ThreadList::from_json(input).unwrap();
        threads.toggle_pin("t-1");
        let dict = Dictionary::default();
        let lines = ThreadsWidget::new(&threads, &dict).build_lines();
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn threads_scroll_to_selection() {
        let mut threads = ThreadList::sample();
        threads.select("t-24");
        let dict = Dictionary::default();
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        let mut view = ThreadListView::default();
        ThreadsWidget::new(&threads, &dict).render(area, &mut buf, &mut view);
        assert!(view.offset > 0);
        assert!(buffer_text(&buf).contains("Design sync / v3"));
    }

    #[test]
    fn conversation_shows_selected() {
        let threads = ThreadList::sample();
        let dict = bundled(Locale::En).unwrap();
        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        ConversationWidget::new(threads.selected(), &dict).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Chat / t-1"));
        assert!(text.contains("Let's ship it today."));
    }

    #[test]
    fn prompts_wrap_in_a_narrow_pane() {
        let dict = bundled(Locale::En).unwrap();
        let area = Rect::new(0, 0, 21, 14);
        let mut buf = Buffer::empty(area);
        PromptsWidget::new(&dict).render(area, &mut buf);
        let text = buffer_text(&buf);
        // 19 inner columns: the long prompt continues on the next row
        assert!(text.contains("- Summarize this"));
        assert!(text.contains("thread"));
        assert!(text.contains("- Draft a reply"));
        assert!(text.contains("Japanese"));
    }

    #[test]
    fn prompts_follow_the_locale() {
        let dict = bundled(Locale::Ja).unwrap();
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        PromptsWidget::new(&dict).render(area, &mut buf);
        let text = buffer_text(&buf);
        // Wide glyphs leave a blank cell after them, so check single glyphs.
        assert!(text.contains('要'));
        assert!(!text.contains("Summarize"));
    }

    #[test]
    fn edge_tab_glyphs() {
        assert_eq!(EdgeTab::new(Side::Left).glyph(), ">");
        assert_eq!(EdgeTab::new(Side::Right).glyph(), "<");
    }

    #[test]
    fn zero_width_panes_render_nothing() {
        let dict = Dictionary::default();
        let threads = ThreadList::sample();
        let area = Rect::new(0, 0, 0, 10);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 10));
        ThreadsWidget::new(&threads, &dict).render(area, &mut buf, &mut ThreadListView::default());
        PromptsWidget::new(&dict).render(area, &mut buf);
        assert!(buffer_text(&buf).trim().is_empty());
    }
}
