use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};

use swipeword::app::{App, Flow};
use swipeword::controller::RoundController;
use swipeword::gesture::SwipeThresholds;
use swipeword::round::{Rules, SessionState};
use swipeword::runtime::{FixedTicker, GameEvent, Runner, TestEventSource};
use swipeword::words::{WordBank, DEFAULT_BANK};

fn app() -> App {
    let bank = WordBank::builtin(DEFAULT_BANK).unwrap();
    let controller =
        RoundController::with_rng(bank, Rules::default(), StdRng::seed_from_u64(11));
    App::new(controller, SwipeThresholds::default())
}

fn key(code: KeyCode) -> GameEvent {
    GameEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

// Headless integration using the internal runtime without a TTY.
// Each Tick stands for 100ms of game time so the test does not wait on real seconds.
#[test]
fn headless_session_scores_and_quits() {
    let mut app = app();

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(2));
    let runner = Runner::new(es, ticker);

    tx.send(key(KeyCode::Char('s'))).unwrap();
    tx.send(key(KeyCode::Right)).unwrap();

    let mut at = Duration::ZERO;
    let mut quit_sent = false;
    for _ in 0..200u32 {
        match runner.step() {
            GameEvent::Tick => {
                at += Duration::from_millis(100);
                app.advance(Duration::from_millis(100));

                // once the first acknowledgment is over, swipe left and leave
                if !quit_sent
                    && app.controller.acknowledgment().is_none()
                    && at >= Duration::from_millis(500)
                {
                    tx.send(key(KeyCode::Left)).unwrap();
                    tx.send(key(KeyCode::Esc)).unwrap();
                    quit_sent = true;
                }
            }
            event => {
                if app.handle_event(event, at) == Flow::Quit {
                    break;
                }
            }
        }
    }

    assert!(quit_sent, "session should have reached the second swipe");
    let score = app.controller.score();
    assert_eq!(score.success, 1);
    assert_eq!(score.failure, 1);
    assert!(!app.controller.clock_armed());
    assert!(!app.controller.ack_armed());
}

#[test]
fn headless_timed_session_ends() {
    let mut app = app();
    app.handle_event(key(KeyCode::Char('s')), Duration::ZERO);

    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );

    // 61 simulated seconds, fed in 250ms slices
    for _ in 0..244u32 {
        if let GameEvent::Tick = runner.step() {
            app.advance(Duration::from_millis(250));
        }
        assert!(app.controller.seconds_remaining() <= 60);
        assert!(app.controller.cursor() < app.controller.bank().len());
    }

    assert_eq!(app.session(), SessionState::Ended);
    assert_eq!(app.controller.seconds_remaining(), 0);

    // restart from the end screen
    app.handle_event(key(KeyCode::Char('r')), Duration::ZERO);
    assert_eq!(app.session(), SessionState::Running);
    assert_eq!(app.controller.seconds_remaining(), 60);
}
