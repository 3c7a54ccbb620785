use std::time::Duration;

use broadside::{think_delay, Difficulty, Phase, PlayerId, VsComputerSession, TOTAL_SHIP_CELLS};

fn marks_on_human_board(session: &VsComputerSession) -> usize {
    let board = session.own_board();
    board.hits().count() + board.misses().count()
}

/// Get a seeded session into battle with the human to move.
fn battle_session(difficulty: Difficulty, seed: u64) -> VsComputerSession {
    let mut session = VsComputerSession::seeded(difficulty, seed);
    session.randomize_fleet().unwrap();
    assert_eq!(session.phase(), Phase::Battle);
    assert_eq!(session.active_player(), PlayerId::One);
    session
}

#[tokio::test(start_paused = true)]
async fn computer_replies_after_its_thinking_delay() {
    let mut session = battle_session(Difficulty::Medium, 1);

    session.attack(0, 0).unwrap();
    assert_eq!(session.active_player(), PlayerId::Two);
    assert!(session.move_pending());
    assert_eq!(marks_on_human_board(&session), 0, "no reply before the delay");
    // The human's shot shows up in the redacted enemy view.
    assert_ne!(
        session.enemy_view().cell(0, 0).unwrap(),
        broadside::TargetCell::Unknown
    );

    tokio::time::sleep(think_delay(Difficulty::Medium) + Duration::from_millis(10)).await;

    assert!(!session.move_pending());
    assert_eq!(session.active_player(), PlayerId::One);
    assert_eq!(marks_on_human_board(&session), 1, "exactly one computer move");
}

#[tokio::test(start_paused = true)]
async fn only_one_computer_move_may_be_in_flight() {
    let mut session = battle_session(Difficulty::Easy, 2);

    session.attack(0, 0).unwrap();
    assert!(session.move_pending());
    // A duplicate schedule while one is pending is refused.
    assert!(!session.schedule_computer_move());

    tokio::time::sleep(think_delay(Difficulty::Easy) + Duration::from_millis(10)).await;
    assert_eq!(marks_on_human_board(&session), 1);

    // Nothing to schedule once the turn is back with the human.
    assert!(!session.schedule_computer_move());
    assert!(!session.move_pending());
}

#[tokio::test(start_paused = true)]
async fn reset_cancels_a_pending_computer_move() {
    let mut session = battle_session(Difficulty::Hard, 3);

    session.attack(5, 5).unwrap();
    assert!(session.move_pending());

    session.reset().await;
    assert!(!session.move_pending());
    assert_eq!(session.phase(), Phase::Placement);
    assert_eq!(session.active_player(), PlayerId::One);

    // Even after the old delay elapses, no stale move lands on the
    // fresh board.
    tokio::time::sleep(think_delay(Difficulty::Hard) + Duration::from_millis(10)).await;
    assert_eq!(marks_on_human_board(&session), 0);
    assert_eq!(session.own_board().ship_cells(), 0);
}

#[tokio::test(start_paused = true)]
async fn scores_survive_session_reset() {
    let mut session = battle_session(Difficulty::Easy, 4);
    let before = session.games_played();
    session.reset().await;
    assert_eq!(session.games_played(), before);
    assert_eq!(session.score(PlayerId::One), 0);
    assert_eq!(session.score(PlayerId::Two), 0);

    // Session is ready for a fresh placement round.
    session.randomize_fleet().unwrap();
    assert_eq!(session.phase(), Phase::Battle);
    assert_eq!(session.own_board().ship_cells(), TOTAL_SHIP_CELLS);
}

#[tokio::test(start_paused = true)]
async fn played_to_the_end_the_session_declares_a_winner() {
    let mut session = battle_session(Difficulty::Medium, 5);

    // The human sweeps the whole enemy grid cell by cell (the view is
    // redacted, so exhaustive fire is the only sure route); the computer
    // replies between shots.
    let mut targets = (0..broadside::BOARD_SIZE)
        .flat_map(|r| (0..broadside::BOARD_SIZE).map(move |c| (r, c)));
    let mut guard = 0;
    while session.phase() == Phase::Battle {
        guard += 1;
        assert!(guard < 500, "session never finished");
        if session.active_player() == PlayerId::One {
            let (r, c) = targets.next().expect("ran out of targets");
            session.attack(r, c).unwrap();
        } else {
            tokio::time::sleep(think_delay(Difficulty::Medium) + Duration::from_millis(10)).await;
        }
    }

    assert_eq!(session.phase(), Phase::GameOver);
    assert!(session.winner().is_some());
    assert_eq!(session.games_played(), 1);
    assert_eq!(
        session.score(PlayerId::One) + session.score(PlayerId::Two),
        1
    );
}
