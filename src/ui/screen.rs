use ratatui::{buffer::Buffer, layout::Rect};

use crate::{
    app::App,
    round::SessionState,
    ui::{
        ended_controls, play_controls, render_ended, render_play, render_title, title_controls,
        Control,
    },
};

/// A UI Screen boundary: responsible for rendering and for knowing where its buttons are
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
    /// Buttons laid out for `area`; rendering and mouse hit-testing share this.
    fn controls(&self, _app: &App, _area: Rect) -> Vec<Control> {
        Vec::new()
    }
}

/// Shown before the first session starts
pub struct TitleScreen;

impl Screen for TitleScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_title(app, area, buf);
    }

    fn controls(&self, app: &App, area: Rect) -> Vec<Control> {
        title_controls(app, area)
    }
}

/// The card, timer and score, both while running and paused
pub struct PlayScreen;

impl Screen for PlayScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_play(app, area, buf);
    }

    fn controls(&self, app: &App, area: Rect) -> Vec<Control> {
        play_controls(app, area)
    }
}

pub struct EndedScreen;

impl Screen for EndedScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_ended(app, area, buf);
    }

    fn controls(&self, app: &App, area: Rect) -> Vec<Control> {
        ended_controls(app, area)
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(session: SessionState) -> Box<dyn Screen> {
    match session {
        SessionState::NotStarted => Box::new(TitleScreen),
        SessionState::Running | SessionState::Paused => Box::new(PlayScreen),
        SessionState::Ended => Box::new(EndedScreen),
    }
}
