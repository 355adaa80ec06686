use std::time::Duration;

use crate::round::Decision;

pub const DEFAULT_MIN_DISTANCE: u16 = 6;
pub const DEFAULT_MIN_VELOCITY: f64 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Swipe {
    Left,
    Right,
}

impl From<Swipe> for Decision {
    fn from(swipe: Swipe) -> Self {
        match swipe {
            Swipe::Right => Decision::Success,
            Swipe::Left => Decision::Failure,
        }
    }
}

/// One pointer position, in terminal cells, with the time it was observed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub at: Duration,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, at: Duration) -> Self {
        Self { x, y, at }
    }
}

/// When a drag counts as a swipe
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeThresholds {
    /// horizontal travel in cells
    pub min_distance: u16,
    /// horizontal speed in cells per second, for short flicks
    pub min_velocity: f64,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            min_velocity: DEFAULT_MIN_VELOCITY,
        }
    }
}

/// Classifies a finished drag from its first and last samples.
///
/// The drag must be mostly horizontal. It is a swipe when it travelled at
/// least `min_distance`, or when it moved at all and did so at `min_velocity`.
pub fn classify(start: PointerSample, end: PointerSample, t: &SwipeThresholds) -> Option<Swipe> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;

    if dx.abs() <= dy.abs() || dx.abs() < 1.0 {
        return None;
    }

    let elapsed = end.at.saturating_sub(start.at).as_secs_f64();
    let far_enough = dx.abs() >= f64::from(t.min_distance);
    let fast_enough = elapsed > 0.0 && dx.abs() / elapsed >= t.min_velocity;

    if !(far_enough || fast_enough) {
        return None;
    }

    Some(if dx > 0.0 { Swipe::Right } else { Swipe::Left })
}

/// Turns a stream of pointer down/move/up into at most one swipe per drag.
/// Mouse and touch pointers are tracked the same way.
#[derive(Debug, Default)]
pub struct GestureTracker {
    thresholds: SwipeThresholds,
    start: Option<(PointerKind, PointerSample)>,
    last: Option<PointerSample>,
}

impl GestureTracker {
    pub fn new(thresholds: SwipeThresholds) -> Self {
        Self {
            thresholds,
            start: None,
            last: None,
        }
    }

    pub fn thresholds(&self) -> &SwipeThresholds {
        &self.thresholds
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    pub fn pointer_down(&mut self, kind: PointerKind, sample: PointerSample) {
        self.start = Some((kind, sample));
        self.last = Some(sample);
    }

    pub fn pointer_move(&mut self, kind: PointerKind, sample: PointerSample) {
        match self.start {
            Some((k, _)) if k == kind => self.last = Some(sample),
            _ => {}
        }
    }

    pub fn pointer_up(&mut self, kind: PointerKind, sample: PointerSample) -> Option<Swipe> {
        let (k, start) = self.start.take()?;
        self.last = None;
        if k != kind {
            return None;
        }
        classify(start, sample, &self.thresholds)
    }

    pub fn cancel(&mut self) {
        self.start = None;
        self.last = None;
    }

    /// Horizontal travel of the drag in progress, for dragging the card along.
    pub fn drag_offset(&self) -> f64 {
        match (self.start, self.last) {
            (Some((_, start)), Some(last)) => last.x - start.x,
            _ => 0.0,
        }
    }
}
