//! Terminal preview of the chat layout (ratatui)

pub mod chat;
pub mod help;
pub mod layout;
pub mod statusbar;

use ratatui::{buffer::Buffer, Frame};

use crate::app::App;
use crate::layout::Side;
use chat::{ConversationWidget, EdgeTab, PromptsWidget, Rail, ThreadListView, ThreadsWidget};
use help::HelpOverlay;
use layout::ChatLayout;
use statusbar::StatusBar;

/// Draw one frame of the chat screen.
pub fn draw(frame: &mut Frame, app: &App, view: &mut ThreadListView) {
    let area = frame.area();
    let layout = ChatLayout::compute(area, app.panes.effective_widths());
    let dict = app.dictionary();

    frame.render_widget(
        Rail::new(
            !app.panes.is_collapsed(Side::Left),
            !app.panes.is_collapsed(Side::Right),
        ),
        layout.rail,
    );
    frame.render_stateful_widget(ThreadsWidget::new(&app.threads, dict), layout.left, view);
    frame.render_widget(ConversationWidget::new(app.threads.selected(), dict), layout.center);
    frame.render_widget(PromptsWidget::new(dict), layout.right);

    if let Some(tab) = layout.left_tab {
        frame.render_widget(EdgeTab::new(Side::Left), tab);
    }
    if let Some(tab) = layout.right_tab {
        frame.render_widget(EdgeTab::new(Side::Right), tab);
    }

    frame.render_widget(StatusBar::new(app), layout.status_bar);

    if app.show_help {
        frame.render_widget(HelpOverlay, area);
    }
}

/// Buffer contents as text, one line per row.
pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::with_capacity((area.width as usize + 1) * area.height as usize);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
