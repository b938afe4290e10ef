//! App state for the terminal chat-layout preview

use crate::data::ThreadList;
use crate::event::Action;
use crate::i18n::{Dictionaries, Dictionary, Locale};
use crate::layout::{EffectLog, PaneLayout, Side};
use crate::router::switch_locale;

/// Main application state
pub struct App {
    pub running: bool,
    pub panes: PaneLayout<EffectLog>,
    pub threads: ThreadList,
    pub locale: Locale,
    /// Path the preview pretends to be rendering
    pub path: String,
    pub show_help: bool,
    dictionaries: Dictionaries,
    fallback: Dictionary,
}

impl App {
    /// Mount the chat screen for a viewport `viewport_width` pixels wide.
    pub fn new(viewport_width: u32, locale: Locale, dictionaries: Dictionaries) -> Self {
        Self {
            running: true,
            panes: PaneLayout::mount(viewport_width, EffectLog::default()),
            threads: ThreadList::sample(),
            locale,
            path: format!("/{locale}/chat"),
            show_help: false,
            dictionaries,
            fallback: Dictionary::default(),
        }
    }

    pub fn with_threads(mut self, threads: ThreadList) -> Self {
        self.threads = threads;
        self
    }

    /// Strings for the current locale; keys render as-is when missing.
    pub fn dictionary(&self) -> &Dictionary {
        self.dictionaries.get(self.locale).unwrap_or(&self.fallback)
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Press the control `side` currently shows (header close or edge tab).
    pub fn press_pane(&mut self, side: Side) {
        let affordance = self.panes.affordance(side);
        self.panes.press(side, affordance);
    }

    pub fn toggle_pin_selected(&mut self) {
        if let Some(id) = self.threads.selected_id().map(str::to_string) {
            self.threads.toggle_pin(&id);
        }
    }

    pub fn next_locale(&mut self) {
        let idx = Locale::ALL.iter().position(|&l| l == self.locale).unwrap_or(0);
        let next = Locale::ALL[(idx + 1) % Locale::ALL.len()];
        self.path = switch_locale(&self.path, next);
        self.locale = next;
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit(),
            Action::MoveDown => self.threads.select_next(),
            Action::MoveUp => self.threads.select_prev(),
            Action::PressPane(side) => self.press_pane(side),
            Action::Shortcut(side) => {
                self.panes.sidebar_shortcut(side);
            }
            Action::TogglePin => self.toggle_pin_selected(),
            Action::NextLocale => self.next_locale(),
            Action::ToggleHelp => self.toggle_help(),
            Action::None => {}
        }
    }
}
