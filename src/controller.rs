use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info};

use crate::round::{
    Decision, RoundEvent, RoundState, Rules, ScoreCounters, SessionState, ACK_DELAY,
};
use crate::timer::{Delay, Interval};
use crate::words::WordBank;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owns the game: the word bank, the round state, and the two deferred
/// callbacks (the one-second clock and the acknowledgment delay).
///
/// The clock only exists while the session is running. The delay only exists
/// while a decision is pending. Both are dropped the moment the state says so,
/// which is what keeps a late tick or a stale acknowledgment from firing.
#[derive(Debug)]
pub struct RoundController<R: Rng = StdRng> {
    bank: WordBank,
    state: RoundState,
    rng: R,
    clock: Option<Interval>,
    ack: Option<Delay>,
}

impl RoundController<StdRng> {
    pub fn new(bank: WordBank, rules: Rules) -> Self {
        Self::with_rng(bank, rules, StdRng::from_entropy())
    }
}

impl<R: Rng> RoundController<R> {
    pub fn with_rng(bank: WordBank, rules: Rules, mut rng: R) -> Self {
        let cursor = bank.random_index(&mut rng);
        let state = RoundState::new(bank.len(), cursor, rules);

        Self {
            bank,
            state,
            rng,
            clock: None,
            ack: None,
        }
    }

    pub fn start(&mut self) {
        let cursor = self.bank.random_index(&mut self.rng);
        self.dispatch(RoundEvent::Start { cursor });
    }

    pub fn restart(&mut self) {
        let cursor = self.bank.random_index(&mut self.rng);
        self.dispatch(RoundEvent::Restart { cursor });
    }

    pub fn toggle_pause(&mut self) {
        self.dispatch(RoundEvent::TogglePause);
    }

    pub fn on_decision(&mut self, decision: Decision) {
        self.dispatch(RoundEvent::Decide(decision));
    }

    pub fn on_tick(&mut self) {
        self.dispatch(RoundEvent::Tick);
    }

    pub fn reset_counts(&mut self) {
        self.dispatch(RoundEvent::ResetCounts);
    }

    /// Feeds real elapsed time to the pending timers, firing whatever is due.
    pub fn advance(&mut self, dt: Duration) {
        let ack_due = self.ack.as_mut().is_some_and(|delay| delay.advance(dt));
        if ack_due {
            self.dispatch(RoundEvent::AckElapsed);
        }

        let ticks = self.clock.as_mut().map_or(0, |clock| clock.advance(dt));
        for _ in 0..ticks {
            if self.clock.is_none() {
                break;
            }
            self.on_tick();
        }
    }

    /// Cancels all pending work. Call before throwing the controller away.
    pub fn dispose(&mut self) {
        self.clock = None;
        self.ack = None;
        debug!("round controller disposed");
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn session(&self) -> SessionState {
        self.state.session
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn current_word(&self) -> &str {
        self.bank.get(self.state.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.state.seconds_remaining
    }

    pub fn score(&self) -> ScoreCounters {
        self.state.score
    }

    /// The decision being acknowledged on screen, if any
    pub fn acknowledgment(&self) -> Option<Decision> {
        self.state.pending
    }

    pub fn clock_armed(&self) -> bool {
        self.clock.is_some()
    }

    pub fn ack_armed(&self) -> bool {
        self.ack.is_some()
    }

    fn dispatch(&mut self, event: RoundEvent) {
        let before = self.state;
        self.state = before.apply(event);

        if self.state == before {
            debug!(?event, session = %before.session, "event ignored");
            return;
        }

        // a new session always gets a fresh clock
        if let RoundEvent::Start { .. } | RoundEvent::Restart { .. } = event {
            self.clock = None;
            self.ack = None;
        }
        self.sync_timers();

        if self.state.session != before.session {
            info!(
                from = %before.session,
                to = %self.state.session,
                seconds_remaining = self.state.seconds_remaining,
                "session state changed"
            );
        }
        if let RoundEvent::Decide(decision) = event {
            info!(
                %decision,
                word = self.current_word(),
                success = self.state.score.success,
                failure = self.state.score.failure,
                "decision recorded"
            );
        }
        if let RoundEvent::ResetCounts = event {
            info!("score counters reset");
        }
    }

    fn sync_timers(&mut self) {
        if self.state.session == SessionState::Running {
            if self.clock.is_none() {
                self.clock = Some(Interval::new(TICK_PERIOD));
            }
        } else {
            self.clock = None;
        }

        match (self.state.pending, self.ack.is_some()) {
            (Some(_), false) => self.ack = Some(Delay::new(ACK_DELAY)),
            (None, true) => self.ack = None,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::ROUND_SECS;
    use crate::words::DEFAULT_BANK;

    fn controller() -> RoundController<StdRng> {
        let bank = WordBank::builtin(DEFAULT_BANK).unwrap();
        RoundController::with_rng(bank, Rules::default(), StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_new_controller_is_idle() {
        let c = controller();

        assert_eq!(c.session(), SessionState::NotStarted);
        assert!(c.cursor() < c.bank().len());
        assert!(!c.clock_armed());
        assert!(!c.ack_armed());

        let mut c = c;
        c.advance(Duration::from_secs(5));
        assert_eq!(c.seconds_remaining(), ROUND_SECS);
    }

    #[test]
    fn test_start_arms_clock() {
        let mut c = controller();
        c.start();

        assert_eq!(c.session(), SessionState::Running);
        assert_eq!(c.seconds_remaining(), 60);
        assert_eq!(c.score(), ScoreCounters::default());
        assert!(c.clock_armed());
    }

    #[test]
    fn test_clock_counts_down_with_elapsed_time() {
        let mut c = controller();
        c.start();

        for _ in 0..25 {
            c.advance(Duration::from_millis(100));
        }
        assert_eq!(c.seconds_remaining(), 58);
    }

    #[test]
    fn test_session_ends_and_clock_is_cancelled() {
        let mut c = controller();
        c.start();

        c.advance(Duration::from_secs(75));
        assert_eq!(c.session(), SessionState::Ended);
        assert_eq!(c.seconds_remaining(), 0);
        assert!(!c.clock_armed());
    }

    #[test]
    fn test_decision_then_ack_advances_once() {
        let mut c = controller();
        c.start();
        let first = c.cursor();

        c.on_decision(Decision::Success);
        assert_eq!(c.score().success, 1);
        assert_eq!(c.acknowledgment(), Some(Decision::Success));
        assert!(c.ack_armed());

        // a second swipe during the window is dropped
        c.on_decision(Decision::Failure);
        assert_eq!(c.score().failure, 0);

        c.advance(Duration::from_millis(200));
        assert_eq!(c.cursor(), first);
        c.advance(Duration::from_millis(100));
        assert_eq!(c.cursor(), (first + 1) % 50);
        assert_eq!(c.acknowledgment(), None);
        assert!(!c.ack_armed());

        c.advance(Duration::from_millis(300));
        assert_eq!(c.cursor(), (first + 1) % 50);
    }

    #[test]
    fn test_pause_cancels_clock_and_keeps_time() {
        let mut c = controller();
        c.start();
        c.advance(Duration::from_millis(3500));
        assert_eq!(c.seconds_remaining(), 57);

        c.toggle_pause();
        assert_eq!(c.session(), SessionState::Paused);
        assert!(!c.clock_armed());

        c.advance(Duration::from_secs(30));
        c.on_tick();
        assert_eq!(c.seconds_remaining(), 57);

        c.toggle_pause();
        assert!(c.clock_armed());
        c.advance(Duration::from_secs(1));
        assert_eq!(c.seconds_remaining(), 56);
    }

    #[test]
    fn test_toggle_from_not_started_begins_clock() {
        let mut c = controller();
        let cursor = c.cursor();
        c.toggle_pause();

        assert_eq!(c.session(), SessionState::Running);
        assert_eq!(c.cursor(), cursor);
        assert!(c.clock_armed());
    }

    #[test]
    fn test_restart_drops_pending_ack() {
        let mut c = controller();
        c.start();
        c.on_decision(Decision::Failure);
        c.restart();

        assert!(!c.ack_armed());
        assert_eq!(c.acknowledgment(), None);
        assert_eq!(c.score(), ScoreCounters::default());
        assert_eq!(c.session(), SessionState::Running);
    }

    #[test]
    fn test_reset_counts_leaves_rest_alone() {
        let mut c = controller();
        c.start();
        c.on_decision(Decision::Success);
        c.advance(Duration::from_millis(1200));
        let cursor = c.cursor();
        let secs = c.seconds_remaining();

        c.reset_counts();
        assert_eq!(c.score(), ScoreCounters::default());
        assert_eq!(c.cursor(), cursor);
        assert_eq!(c.seconds_remaining(), secs);
        assert_eq!(c.session(), SessionState::Running);
    }

    #[test]
    fn test_dispose_cancels_everything() {
        let mut c = controller();
        c.start();
        c.on_decision(Decision::Success);
        c.dispose();

        let cursor = c.cursor();
        c.advance(Duration::from_secs(5));
        assert_eq!(c.seconds_remaining(), 60);
        assert_eq!(c.cursor(), cursor);
    }

    #[test]
    fn test_current_word_follows_cursor() {
        let mut c = controller();
        c.start();
        assert_eq!(c.current_word(), c.bank().get(c.cursor()));
    }
}
