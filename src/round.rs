use std::time::Duration;

/// Length of a session, and the value the timer starts from
pub const ROUND_SECS: u32 = 60;
/// How long a decision stays on screen before the next word appears
pub const ACK_DELAY: Duration = Duration::from_millis(300);
/// At or below this many seconds the timer is shown as a warning
pub const WARNING_SECS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum SessionState {
    #[strum(serialize = "Not started")]
    NotStarted,
    Running,
    Paused,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Decision {
    Success,
    Failure,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreCounters {
    pub success: u32,
    pub failure: u32,
}

impl ScoreCounters {
    fn record(&mut self, decision: Decision) {
        match decision {
            Decision::Success => self.success += 1,
            Decision::Failure => self.failure += 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rules {
    /// Give every word a fresh timer once its decision has been acknowledged
    pub reset_timer_per_word: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundEvent {
    /// Begin a session from NotStarted or Ended, showing word `cursor` first
    Start { cursor: usize },
    /// Like `Start`, but from any state
    Restart { cursor: usize },
    TogglePause,
    Decide(Decision),
    /// The acknowledgment window of the pending decision has passed
    AckElapsed,
    Tick,
    ResetCounts,
}

/// Everything the game screen is derived from.
///
/// Transitions are pure: [`RoundState::apply`] returns the next state and
/// events that make no sense in the current state leave it untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundState {
    pub session: SessionState,
    pub cursor: usize,
    pub bank_len: usize,
    pub seconds_remaining: u32,
    pub score: ScoreCounters,
    pub pending: Option<Decision>,
    pub rules: Rules,
}

impl RoundState {
    pub fn new(bank_len: usize, cursor: usize, rules: Rules) -> Self {
        let bank_len = bank_len.max(1);
        Self {
            session: SessionState::NotStarted,
            cursor: cursor % bank_len,
            bank_len,
            seconds_remaining: ROUND_SECS,
            score: ScoreCounters::default(),
            pending: None,
            rules,
        }
    }

    pub fn accepts_decision(&self) -> bool {
        self.session == SessionState::Running && self.pending.is_none()
    }

    pub fn apply(self, event: RoundEvent) -> Self {
        use SessionState::*;

        match (self.session, event) {
            (NotStarted | Ended, RoundEvent::Start { cursor })
            | (_, RoundEvent::Restart { cursor }) => Self {
                session: Running,
                cursor: cursor % self.bank_len,
                seconds_remaining: ROUND_SECS,
                score: ScoreCounters::default(),
                pending: None,
                ..self
            },
            (NotStarted | Paused, RoundEvent::TogglePause) => Self {
                session: Running,
                ..self
            },
            (Running, RoundEvent::TogglePause) => Self {
                session: Paused,
                ..self
            },
            (Running, RoundEvent::Decide(decision)) if self.pending.is_none() => {
                let mut score = self.score;
                score.record(decision);
                Self {
                    score,
                    pending: Some(decision),
                    ..self
                }
            }
            (Running | Paused, RoundEvent::AckElapsed) if self.pending.is_some() => {
                let seconds_remaining = if self.rules.reset_timer_per_word {
                    ROUND_SECS
                } else {
                    self.seconds_remaining
                };
                Self {
                    cursor: (self.cursor + 1) % self.bank_len,
                    pending: None,
                    seconds_remaining,
                    ..self
                }
            }
            (Running, RoundEvent::Tick) => {
                let seconds_remaining = self.seconds_remaining.saturating_sub(1);
                if seconds_remaining == 0 {
                    Self {
                        session: Ended,
                        seconds_remaining,
                        pending: None,
                        ..self
                    }
                } else {
                    Self {
                        seconds_remaining,
                        ..self
                    }
                }
            }
            (_, RoundEvent::ResetCounts) => Self {
                score: ScoreCounters::default(),
                ..self
            },
            _ => self,
        }
    }
}
