//! Screen split layout
//!
//! Maps the pane controller's effective widths onto terminal columns:
//! icon rail (left edge), the three panes, and the status bar (bottom).
//! Collapsed panes get zero columns and an edge tab over the center pane.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::layout::Widths;

/// Width of the icon rail in columns.
pub const RAIL_WIDTH: u16 = 5;

/// Size of an edge reopen tab.
pub const TAB_WIDTH: u16 = 3;
pub const TAB_HEIGHT: u16 = 3;

/// Computed areas for the chat screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    pub rail: Rect,
    pub left: Rect,
    pub center: Rect,
    pub right: Rect,
    pub status_bar: Rect,
    /// Reopen tab for a collapsed left pane
    pub left_tab: Option<Rect>,
    /// Reopen tab for a collapsed right pane
    pub right_tab: Option<Rect>,
}

impl ChatLayout {
    /// Compute layout from terminal area
    ///
    /// ```text
    /// +--+-------+------------------+-------+
    /// |  | left  |      center      | right |
    /// |  |       |                  |       |
    /// +--+-------+------------------+-------+
    /// |             Status Bar              |
    /// +-------------------------------------+
    /// ```
    pub fn compute(area: Rect, widths: Widths) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let body = vertical[0];
        let rail_width = RAIL_WIDTH.min(body.width);
        let available = body.width - rail_width;
        let left_cols = columns(available, widths.left);
        let right_cols = columns(available, widths.right).min(available - left_cols);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(rail_width),
                Constraint::Length(left_cols),
                Constraint::Min(0),
                Constraint::Length(right_cols),
            ])
            .split(body);

        let center = horizontal[2];
        let left_tab = (left_cols == 0).then(|| tab(center, center.x));
        let right_tab = (right_cols == 0)
            .then(|| tab(center, center.right().saturating_sub(TAB_WIDTH).max(center.x)));

        Self {
            rail: horizontal[0],
            left: horizontal[1],
            center,
            right: horizontal[3],
            status_bar: vertical[1],
            left_tab,
            right_tab,
        }
    }
}

fn columns(available: u16, percent: f32) -> u16 {
    if percent <= 0.0 || available == 0 {
        return 0;
    }
    let cols = (f32::from(available) * percent / 100.0).round();
    (cols as u16).clamp(1, available)
}

fn tab(center: Rect, x: u16) -> Rect {
    Rect::new(
        x,
        center.y,
        TAB_WIDTH.min(center.width),
        TAB_HEIGHT.min(center.height),
    )
}
