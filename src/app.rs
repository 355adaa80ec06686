use std::time::Duration;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::controller::RoundController;
use crate::gesture::{GestureTracker, PointerKind, PointerSample, SwipeThresholds};
use crate::round::{Decision, SessionState};
use crate::runtime::GameEvent;
use crate::ui::screen::current_screen;

/// Something the player asked for, by key, button or swipe
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    TogglePause,
    Restart,
    ResetCounts,
    Decide(Decision),
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub controller: RoundController,
    pub gesture: GestureTracker,
    /// Last area the view was drawn into, used to hit-test mouse clicks
    pub area: Rect,
}

impl App {
    pub fn new(controller: RoundController, thresholds: SwipeThresholds) -> Self {
        Self {
            controller,
            gesture: GestureTracker::new(thresholds),
            area: Rect::default(),
        }
    }

    pub fn session(&self) -> SessionState {
        self.controller.session()
    }

    pub fn advance(&mut self, dt: Duration) {
        self.controller.advance(dt);
    }

    /// Applies one terminal event. `at` is the time since the app started and
    /// only matters for mouse drags.
    pub fn handle_event(&mut self, event: GameEvent, at: Duration) -> Flow {
        match event {
            GameEvent::Key(key) => match key_action(key) {
                Some(action) => self.perform(action),
                None => Flow::Continue,
            },
            GameEvent::Mouse(mouse) => match self.mouse_action(mouse, at) {
                Some(action) => self.perform(action),
                None => Flow::Continue,
            },
            GameEvent::Resize | GameEvent::Tick => Flow::Continue,
        }
    }

    pub fn perform(&mut self, action: Action) -> Flow {
        match action {
            Action::Start => self.controller.start(),
            Action::TogglePause => self.controller.toggle_pause(),
            Action::Restart => self.controller.restart(),
            Action::ResetCounts => self.controller.reset_counts(),
            Action::Decide(decision) => self.controller.on_decision(decision),
            Action::Quit => {
                self.gesture.cancel();
                self.controller.dispose();
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// The button under a terminal cell, if any
    pub fn control_at(&self, column: u16, row: u16) -> Option<Action> {
        let pos = Position::new(column, row);
        current_screen(self.session())
            .controls(self, self.area)
            .into_iter()
            .find(|control| control.rect.contains(pos))
            .map(|control| control.action)
    }

    fn mouse_action(&mut self, mouse: MouseEvent, at: Duration) -> Option<Action> {
        let sample = PointerSample::new(f64::from(mouse.column), f64::from(mouse.row), at);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(action) = self.control_at(mouse.column, mouse.row) {
                    self.gesture.cancel();
                    return Some(action);
                }
                self.gesture.pointer_down(PointerKind::Mouse, sample);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.gesture.pointer_move(PointerKind::Mouse, sample);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => self
                .gesture
                .pointer_up(PointerKind::Mouse, sample)
                .map(|swipe| Action::Decide(swipe.into())),
            _ => None,
        }
    }
}

pub fn key_action(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Right => Some(Action::Decide(Decision::Success)),
        KeyCode::Left => Some(Action::Decide(Decision::Failure)),
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::TogglePause),
        KeyCode::Char('s') | KeyCode::Enter => Some(Action::Start),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char('c') => Some(Action::ResetCounts),
        _ => None,
    }
}
