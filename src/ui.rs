pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{Action, App},
    round::{Decision, SessionState, WARNING_SECS},
    ui::screen::current_screen,
};

const CARD_HEIGHT: u16 = 7;
const MIN_CARD_WIDTH: u16 = 32;
const BUTTON_GAP: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        current_screen(self.session()).render(self, area, buf);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTone {
    Normal,
    Warning,
    Alarm,
}

impl TimerTone {
    pub fn for_seconds(secs: u32) -> Self {
        match secs {
            0 => TimerTone::Alarm,
            s if s <= WARNING_SECS => TimerTone::Warning,
            _ => TimerTone::Normal,
        }
    }

    fn style(self) -> Style {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        match self {
            TimerTone::Normal => bold,
            TimerTone::Warning => bold.fg(Color::Yellow),
            TimerTone::Alarm => bold.fg(Color::Red),
        }
    }
}

pub fn timer_label(secs: u32) -> String {
    if secs > 0 && secs <= WARNING_SECS {
        format!("{} seconds left!", secs)
    } else {
        format!("Time left: {}s", secs)
    }
}

/// Label of the start/pause/resume button
pub fn pause_label(session: SessionState) -> &'static str {
    match session {
        SessionState::NotStarted => "Start",
        SessionState::Running => "Pause",
        SessionState::Paused => "Resume",
        SessionState::Ended => "Restart",
    }
}

/// A clickable button and where it was laid out
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Control {
    pub label: &'static str,
    pub action: Action,
    pub rect: Rect,
}

fn button_width(label: &str) -> u16 {
    label.width() as u16 + 4
}

fn layout_buttons_right(row: Rect, buttons: &[(&'static str, Action)]) -> Vec<Control> {
    let mut right = row.x + row.width;
    let mut controls = Vec::with_capacity(buttons.len());

    for &(label, action) in buttons.iter().rev() {
        let width = button_width(label);
        if right < row.x + width {
            break;
        }
        right -= width;
        controls.push(Control {
            label,
            action,
            rect: Rect::new(right, row.y, width, 1),
        });
        right = right.saturating_sub(BUTTON_GAP).max(row.x);
    }

    controls.reverse();
    controls
}

fn layout_buttons_centered(row: Rect, buttons: &[(&'static str, Action)]) -> Vec<Control> {
    let total: u16 = buttons
        .iter()
        .map(|(label, _)| button_width(label))
        .sum::<u16>()
        + BUTTON_GAP * (buttons.len() as u16).saturating_sub(1);

    let mut x = row.x + row.width.saturating_sub(total) / 2;
    let mut controls = Vec::with_capacity(buttons.len());
    for &(label, action) in buttons {
        let width = button_width(label).min((row.x + row.width).saturating_sub(x));
        if width == 0 {
            break;
        }
        controls.push(Control {
            label,
            action,
            rect: Rect::new(x, row.y, width, 1),
        });
        x += width + BUTTON_GAP;
    }
    controls
}

fn button_style(action: Action) -> Style {
    let base = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    match action {
        Action::ResetCounts => base.bg(Color::Red),
        Action::Start | Action::Restart => base.bg(Color::Blue),
        _ => base.bg(Color::DarkGray),
    }
}

fn render_controls(controls: &[Control], buf: &mut Buffer) {
    for control in controls {
        Paragraph::new(Span::styled(
            format!("  {}  ", control.label),
            button_style(control.action),
        ))
        .render(control.rect, buf);
    }
}

fn render_line(text: String, style: Style, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Span::styled(text, style))
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn legend_style() -> Style {
    Style::default()
        .add_modifier(Modifier::ITALIC)
        .add_modifier(Modifier::DIM)
}

fn score_line(app: &App) -> String {
    let score = app.controller.score();
    format!("Successes: {}    Failures: {}", score.success, score.failure)
}

struct PlayLayout {
    buttons: Rect,
    timer: Rect,
    card_row: Rect,
    banner: Rect,
    score: Rect,
    legend: Rect,
}

fn play_layout(area: Rect) -> PlayLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // buttons
            Constraint::Min(0),
            Constraint::Length(1), // timer
            Constraint::Length(1),
            Constraint::Length(CARD_HEIGHT),
            Constraint::Length(1), // acknowledgment banner
            Constraint::Min(0),
            Constraint::Length(1), // score
            Constraint::Length(1), // legend
        ])
        .split(area);

    PlayLayout {
        buttons: chunks[0],
        timer: chunks[2],
        card_row: chunks[4],
        banner: chunks[5],
        score: chunks[7],
        legend: chunks[8],
    }
}

pub(crate) fn play_controls(app: &App, area: Rect) -> Vec<Control> {
    layout_buttons_right(
        play_layout(area).buttons,
        &[
            (pause_label(app.session()), Action::TogglePause),
            ("Restart", Action::Restart),
            ("Reset Counts", Action::ResetCounts),
        ],
    )
}

/// Places the card in its row, centered and then pushed `offset` cells
/// sideways, without leaving the row.
fn card_rect(row: Rect, width: u16, offset: i32) -> Rect {
    let width = width.min(row.width);
    let min_x = i32::from(row.x);
    let max_x = i32::from(row.x + row.width - width);
    let centered = min_x + i32::from((row.width - width) / 2);
    let x = (centered + offset).clamp(min_x, max_x) as u16;
    Rect::new(x, row.y, width, row.height)
}

fn card_offset(app: &App, card_width: u16) -> i32 {
    let shift = i32::from(card_width / 3);
    match app.controller.acknowledgment() {
        Some(Decision::Success) => shift,
        Some(Decision::Failure) => -shift,
        None if app.controller.state().accepts_decision() => {
            let limit = i32::from(card_width / 2);
            (app.gesture.drag_offset().round() as i32).clamp(-limit, limit)
        }
        None => 0,
    }
}

fn render_card(app: &App, row: Rect, buf: &mut Buffer) {
    let word = app.controller.current_word();
    let width = (word.width() as u16 + 6).max(MIN_CARD_WIDTH);
    let card = card_rect(row, width, card_offset(app, width.min(row.width)));

    let paused = app.session() == SessionState::Paused;
    let border_style = match app.controller.acknowledgment() {
        Some(Decision::Success) => Style::default().fg(Color::Green),
        Some(Decision::Failure) => Style::default().fg(Color::Red),
        None if paused => Style::default().add_modifier(Modifier::DIM),
        None => Style::default(),
    };

    let mut block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    if paused {
        block = block.title(" Paused ").title_alignment(Alignment::Center);
    }

    let inner = block.inner(card);
    block.render(card, buf);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let lines = ((word.width() as u16).max(1)).div_ceil(inner.width);
    let pad = inner.height.saturating_sub(lines) / 2;
    let text_area = Rect::new(inner.x, inner.y + pad, inner.width, inner.height - pad);

    let word_style = if paused {
        Style::default().add_modifier(Modifier::BOLD | Modifier::DIM)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    Paragraph::new(Span::styled(word.to_string(), word_style))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(text_area, buf);
}

pub(crate) fn render_play(app: &App, area: Rect, buf: &mut Buffer) {
    let layout = play_layout(area);

    render_controls(&play_controls(app, area), buf);

    let secs = app.controller.seconds_remaining();
    render_line(
        timer_label(secs),
        TimerTone::for_seconds(secs).style(),
        layout.timer,
        buf,
    );

    render_card(app, layout.card_row, buf);

    if let Some(decision) = app.controller.acknowledgment() {
        let color = match decision {
            Decision::Success => Color::Green,
            Decision::Failure => Color::Red,
        };
        render_line(
            decision.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
            layout.banner,
            buf,
        );
    }

    render_line(
        score_line(app),
        Style::default().add_modifier(Modifier::BOLD),
        layout.score,
        buf,
    );
    render_line(
        "(←) failure / (→) success / (space) pause / (r)estart / (c)lear / (esc)ape"
            .to_string(),
        legend_style(),
        layout.legend,
        buf,
    );
}

/// Rows of a screen whose content is a short column of centered lines
fn centered_rows(area: Rect, lines: u16) -> Vec<Rect> {
    let mut constraints = vec![Constraint::Min(0)];
    constraints.extend(std::iter::repeat(Constraint::Length(1)).take(lines as usize));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1)); // legend

    Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

const TITLE_LINES: u16 = 6;
const TITLE_BUTTON_ROW: usize = 6;

pub(crate) fn title_controls(_app: &App, area: Rect) -> Vec<Control> {
    let rows = centered_rows(area, TITLE_LINES);
    layout_buttons_centered(rows[TITLE_BUTTON_ROW], &[("Start", Action::Start)])
}

pub(crate) fn render_title(app: &App, area: Rect, buf: &mut Buffer) {
    let rows = centered_rows(area, TITLE_LINES);
    let bank = app.controller.bank();

    render_line(
        "swipeword".to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        rows[1],
        buf,
    );
    render_line(
        format!("{} phrases from the {} bank", bank.len(), bank.name),
        Style::default().add_modifier(Modifier::DIM),
        rows[2],
        buf,
    );
    render_line(
        "Swipe right when your team guesses it, left to give up.".to_string(),
        Style::default(),
        rows[4],
        buf,
    );
    render_controls(&title_controls(app, area), buf);
    render_line(
        "(s)tart / (space) start without resetting scores / (esc)ape".to_string(),
        legend_style(),
        rows[rows.len() - 1],
        buf,
    );
}

const ENDED_LINES: u16 = 5;
const ENDED_BUTTON_ROW: usize = 5;

pub(crate) fn ended_controls(_app: &App, area: Rect) -> Vec<Control> {
    let rows = centered_rows(area, ENDED_LINES);
    layout_buttons_centered(rows[ENDED_BUTTON_ROW], &[("Restart Game", Action::Restart)])
}

pub(crate) fn render_ended(app: &App, area: Rect, buf: &mut Buffer) {
    let rows = centered_rows(area, ENDED_LINES);
    let secs = app.controller.seconds_remaining();

    render_line(
        timer_label(secs),
        TimerTone::for_seconds(secs).style(),
        rows[1],
        buf,
    );
    render_line(
        "Game ended, restart?".to_string(),
        Style::default().add_modifier(Modifier::BOLD),
        rows[2],
        buf,
    );
    render_line(score_line(app), Style::default(), rows[3], buf);
    render_controls(&ended_controls(app, area), buf);
    render_line(
        "(r)estart / (c) reset counts / (esc)ape".to_string(),
        legend_style(),
        rows[rows.len() - 1],
        buf,
    );
}
