//! Pane layout controller
//!
//! Owns the collapsed/expanded state of the left and right panes of the
//! three-pane chat screen. The center pane never collapses and never drops
//! below [`PaneBounds::CENTER`].
//!
//! ```text
//! +------+----------------------+------+
//! | left |        center        | right|
//! |  (1) |         (3)          |  (4) |
//! +------+----------------------+------+
//! ```
//!
//! Every real transition drives the [`PanelHandle`] exactly once; no-op
//! transitions never touch it.

pub mod sizing;

use serde::Serialize;
use tracing::debug;

pub use sizing::{PaneBounds, SizeTriple, COMPACT_BREAKPOINT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Expanded,
    Collapsed,
}

/// The control offered for a side in its current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Affordance {
    /// Close icon in the pane's own header; collapses
    HeaderClose,
    /// Edge-anchored tab over the center pane; expands
    EdgeReopen,
}

/// Imperative effect on the rendered panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Collapse,
    Expand,
}

/// The rendering collaborator's imperative panel API
pub trait PanelHandle {
    fn collapse(&mut self, side: Side);
    fn expand(&mut self, side: Side);
}

/// Records every effect in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectLog {
    pub effects: Vec<(Side, Effect)>,
}

impl EffectLog {
    pub fn last(&self) -> Option<(Side, Effect)> {
        self.effects.last().copied()
    }

    pub fn count(&self, side: Side, effect: Effect) -> usize {
        self.effects
            .iter()
            .filter(|&&(s, e)| s == side && e == effect)
            .count()
    }
}

impl PanelHandle for EffectLog {
    fn collapse(&mut self, side: Side) {
        self.effects.push((side, Effect::Collapse));
    }

    fn expand(&mut self, side: Side) {
        self.effects.push((side, Effect::Expand));
    }
}

/// State of one side pane
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaneState {
    pub visibility: Visibility,
    /// Configured size; kept while collapsed so expand restores it
    pub size_percent: f32,
    pub order: u8,
    pub bounds: PaneBounds,
}

impl PaneState {
    pub fn is_collapsed(&self) -> bool {
        self.visibility == Visibility::Collapsed
    }

    /// Rendered share: zero while collapsed, whatever the configured size.
    pub fn effective_percent(&self) -> f32 {
        if self.is_collapsed() {
            0.0
        } else {
            self.size_percent
        }
    }
}

pub const LEFT_ORDER: u8 = 1;
pub const CENTER_ORDER: u8 = 3;
pub const RIGHT_ORDER: u8 = 4;

/// Rendered percentages; collapsed sides are 0 and the center takes the rest
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Widths {
    pub left: f32,
    pub center: f32,
    pub right: f32,
}

/// Three-pane controller, created at mount and dropped at unmount
#[derive(Debug, Clone)]
pub struct PaneLayout<H> {
    left: PaneState,
    right: PaneState,
    defaults: SizeTriple,
    handle: H,
}

impl<H: PanelHandle> PaneLayout<H> {
    /// Mount with the viewport width measured once. Left starts expanded,
    /// right starts collapsed; the handle is told about the right pane so
    /// the rendered panel matches.
    pub fn mount(viewport_width: u32, mut handle: H) -> Self {
        let defaults = SizeTriple::for_viewport(viewport_width);
        handle.collapse(Side::Right);
        debug!(viewport_width, ?defaults, "pane layout mounted");

        Self {
            left: PaneState {
                visibility: Visibility::Expanded,
                size_percent: defaults.left,
                order: LEFT_ORDER,
                bounds: PaneBounds::SIDE,
            },
            right: PaneState {
                visibility: Visibility::Collapsed,
                size_percent: defaults.right,
                order: RIGHT_ORDER,
                bounds: PaneBounds::SIDE,
            },
            defaults,
            handle,
        }
    }

    pub fn collapse(&mut self, side: Side) -> bool {
        self.transition(side, Visibility::Collapsed)
    }

    pub fn expand(&mut self, side: Side) -> bool {
        self.transition(side, Visibility::Expanded)
    }

    /// Returns whether the state changed. Same-state requests are no-ops and
    /// do not reach the handle.
    fn transition(&mut self, side: Side, to: Visibility) -> bool {
        let pane = self.pane_mut(side);
        if pane.visibility == to {
            debug!(%side, ?to, "pane transition is a no-op");
            return false;
        }
        pane.visibility = to;
        match to {
            Visibility::Collapsed => self.handle.collapse(side),
            Visibility::Expanded => self.handle.expand(side),
        }
        debug!(%side, ?to, "pane transition");
        true
    }

    /// The control to render for `side` right now.
    pub fn affordance(&self, side: Side) -> Affordance {
        if self.pane(side).is_collapsed() {
            Affordance::EdgeReopen
        } else {
            Affordance::HeaderClose
        }
    }

    /// Dispatch a press on either control. A stale press (the control no
    /// longer matches the state) falls into the idempotent no-op.
    pub fn press(&mut self, side: Side, affordance: Affordance) -> bool {
        match affordance {
            Affordance::HeaderClose => self.collapse(side),
            Affordance::EdgeReopen => self.expand(side),
        }
    }

    /// Icon-rail shortcut: opens a collapsed pane, never closes an open one.
    pub fn sidebar_shortcut(&mut self, side: Side) -> bool {
        if self.pane(side).is_collapsed() {
            self.expand(side)
        } else {
            false
        }
    }

    /// Set a side's configured size, clamped to its bounds and reduced if
    /// the center would fall below its minimum. Returns the applied size.
    pub fn resize(&mut self, side: Side, percent: f32) -> f32 {
        let other = self.pane(side.other()).size_percent;
        let room = 100.0 - other - PaneBounds::CENTER.min;
        let pane = self.pane_mut(side);
        let applied = pane.bounds.clamp(percent).min(room);
        pane.size_percent = applied;
        debug!(%side, requested = percent, applied, "pane resized");
        applied
    }

    pub fn effective_widths(&self) -> Widths {
        let left = self.left.effective_percent();
        let right = self.right.effective_percent();
        Widths {
            left,
            center: 100.0 - left - right,
            right,
        }
    }

    pub fn pane(&self, side: Side) -> &PaneState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn pane_mut(&mut self, side: Side) -> &mut PaneState {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn is_collapsed(&self, side: Side) -> bool {
        self.pane(side).is_collapsed()
    }

    pub fn defaults(&self) -> SizeTriple {
        self.defaults
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(width: u32) -> PaneLayout<EffectLog> {
        PaneLayout::mount(width, EffectLog::default())
    }

    #[test]
    fn initial_state() {
        let layout = mounted(1920);
        assert!(!layout.is_collapsed(Side::Left));
        assert!(layout.is_collapsed(Side::Right));
        assert_eq!(layout.handle().effects, vec![(Side::Right, Effect::Collapse)]);
    }

    #[test]
    fn orders_are_fixed() {
        let layout = mounted(1920);
        assert_eq!(layout.pane(Side::Left).order, 1);
        assert_eq!(layout.pane(Side::Right).order, 4);
        assert!(LEFT_ORDER < CENTER_ORDER && CENTER_ORDER < RIGHT_ORDER);
    }

    #[test]
    fn mount_picks_defaults_once() {
        assert_eq!(mounted(1366).defaults(), SizeTriple::COMPACT);
        assert_eq!(mounted(1920).defaults(), SizeTriple::COMFORTABLE);
        assert_eq!(mounted(1366).pane(Side::Left).size_percent, 20.0);
    }

    #[test]
    fn collapse_then_collapse_again() {
        let mut layout = mounted(1920);
        assert!(layout.collapse(Side::Left));
        assert!(!layout.collapse(Side::Left));
        assert!(layout.is_collapsed(Side::Left));
        assert_eq!(layout.handle().count(Side::Left, Effect::Collapse), 1);
    }

    #[test]
    fn expand_when_expanded_is_silent() {
        let mut layout = mounted(1920);
        assert!(layout.expand(Side::Right));
        assert!(!layout.expand(Side::Right));
        assert_eq!(layout.handle().count(Side::Right, Effect::Expand), 1);
    }

    #[test]
    fn affordance_follows_state() {
        let mut layout = mounted(1920);
        assert_eq!(layout.affordance(Side::Left), Affordance::HeaderClose);
        assert_eq!(layout.affordance(Side::Right), Affordance::EdgeReopen);
        layout.collapse(Side::Left);
        assert_eq!(layout.affordance(Side::Left), Affordance::EdgeReopen);
    }

    #[test]
    fn press_maps_to_transitions() {
        let mut layout = mounted(1920);
        assert!(layout.press(Side::Left, Affordance::HeaderClose));
        assert!(layout.press(Side::Left, Affordance::EdgeReopen));
        // stale control
        assert!(!layout.press(Side::Left, Affordance::EdgeReopen));
        assert_eq!(
            layout.handle().effects[1..],
            [(Side::Left, Effect::Collapse), (Side::Left, Effect::Expand)]
        );
    }

    #[test]
    fn sidebar_shortcut_only_opens() {
        let mut layout = mounted(1920);
        assert!(!layout.sidebar_shortcut(Side::Left));
        assert!(!layout.is_collapsed(Side::Left));

        assert!(layout.sidebar_shortcut(Side::Right));
        assert!(!layout.is_collapsed(Side::Right));
        assert!(!layout.sidebar_shortcut(Side::Right));
        assert!(!layout.is_collapsed(Side::Right));
    }

    #[test]
    fn collapsed_width_is_zero() {
        let mut layout = mounted(1366);
        let w = layout.effective_widths();
        assert_eq!((w.left, w.center, w.right), (20.0, 80.0, 0.0));

        layout.expand(Side::Right);
        let w = layout.effective_widths();
        assert_eq!((w.left, w.center, w.right), (20.0, 60.0, 20.0));

        layout.collapse(Side::Left);
        layout.collapse(Side::Right);
        let w = layout.effective_widths();
        assert_eq!((w.left, w.center, w.right), (0.0, 100.0, 0.0));
    }

    #[test]
    fn collapse_keeps_configured_size() {
        let mut layout = mounted(1920);
        layout.resize(Side::Left, 24.0);
        layout.collapse(Side::Left);
        assert_eq!(layout.pane(Side::Left).size_percent, 24.0);
        layout.expand(Side::Left);
        assert_eq!(layout.effective_widths().left, 24.0);
    }

    #[test]
    fn resize_clamps_to_bounds() {
        let mut layout = mounted(1920);
        assert_eq!(layout.resize(Side::Left, 2.0), 10.0);
        assert_eq!(layout.resize(Side::Left, 90.0), 26.0);
        assert_eq!(layout.resize(Side::Right, 25.0), 25.0);
    }

    #[test]
    fn center_never_below_minimum() {
        let mut layout = mounted(1920);
        layout.resize(Side::Left, 26.0);
        layout.resize(Side::Right, 26.0);
        layout.expand(Side::Right);
        assert!(layout.effective_widths().center >= PaneBounds::CENTER.min);
    }

    #[test]
    fn side_other() {
        assert_eq!(Side::Left.other(), Side::Right);
        assert_eq!(Side::Right.other(), Side::Left);
    }
}
