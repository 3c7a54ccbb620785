#![cfg(feature = "std")]

//! Human-vs-computer session driver.
//!
//! The human controls player one through synchronous calls; the computer's
//! reply is a scheduled tokio task that fires after a per-difficulty
//! thinking delay. At most one computer move may be pending (`AtomicBool`
//! guard), and a reset cancels any pending move and waits for the task to
//! unwind, so a stale move can never land on a fresh board.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::board::{Board, TargetView};
use crate::common::{AttackOutcome, EngineError};
use crate::config::think_delay;
use crate::game::{Game, GameMode, Phase, PlayerId};
use crate::strategy::{plan_attack, Difficulty};

pub struct VsComputerSession {
    game: Arc<Mutex<Game>>,
    difficulty: Difficulty,
    rng: SmallRng,
    pending: Arc<AtomicBool>,
    cancel_tx: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl VsComputerSession {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Deterministic session for tests and reproduction.
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(difficulty: Difficulty, rng: SmallRng) -> Self {
        Self {
            game: Arc::new(Mutex::new(Game::new(GameMode::VsComputer(difficulty)))),
            difficulty,
            rng,
            pending: Arc::new(AtomicBool::new(false)),
            cancel_tx: None,
            task: None,
        }
    }

    /// Place the human's next catalog ship. Finishing the fleet auto-places
    /// the computer's ships and opens the battle with the human to move.
    pub fn place_ship(&mut self, row: usize, col: usize) -> Result<(), EngineError> {
        self.game.lock().unwrap().place_ship(&mut self.rng, row, col)
    }

    pub fn toggle_orientation(&mut self) {
        self.game.lock().unwrap().toggle_orientation();
    }

    /// Randomize the human fleet in one step.
    pub fn randomize_fleet(&mut self) -> Result<(), EngineError> {
        self.game
            .lock()
            .unwrap()
            .randomize_fleet(&mut self.rng, PlayerId::One)
    }

    /// Human attack on the computer's board. On a mutating attack that
    /// passes the turn, the computer's reply is scheduled.
    pub fn attack(&mut self, row: usize, col: usize) -> Result<AttackOutcome, EngineError> {
        let outcome = self.game.lock().unwrap().attack(PlayerId::Two, row, col)?;
        self.schedule_computer_move();
        Ok(outcome)
    }

    /// Arm the delayed computer move if it is the computer's turn and no
    /// move is already in flight. Returns whether a task was scheduled.
    pub fn schedule_computer_move(&mut self) -> bool {
        {
            let game = self.game.lock().unwrap();
            if game.phase() != Phase::Battle || game.active_player() != PlayerId::Two {
                return false;
            }
        }
        if self
            .pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }

        let (tx, mut cancel) = watch::channel(false);
        self.cancel_tx = Some(tx);
        let game = Arc::clone(&self.game);
        let pending = Arc::clone(&self.pending);
        let difficulty = self.difficulty;
        let delay = think_delay(difficulty);
        let mut rng = SmallRng::from_rng(&mut self.rng);

        self.task = Some(tokio::spawn(async move {
            let fire = tokio::select! {
                _ = tokio::time::sleep(delay) => true,
                _ = cancel.changed() => false,
            };
            if fire {
                let mut game = game.lock().unwrap();
                // Re-check under the lock: a reset may have raced the timer.
                if game.phase() == Phase::Battle && game.active_player() == PlayerId::Two {
                    let view = game.target_view(PlayerId::One);
                    match plan_attack(&view, difficulty, &mut rng) {
                        Some((row, col)) => match game.attack(PlayerId::One, row, col) {
                            Ok(outcome) => {
                                log::debug!(
                                    "computer ({}) fired at ({}, {}): {:?}",
                                    difficulty.name(),
                                    row,
                                    col,
                                    outcome
                                );
                            }
                            Err(err) => log::warn!("computer move rejected: {}", err),
                        },
                        None => log::warn!("computer found no target to attack"),
                    }
                }
            }
            pending.store(false, Ordering::SeqCst);
        }));
        true
    }

    /// Whether a computer move is currently scheduled.
    pub fn move_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Cancel a scheduled computer move, waiting for the task to finish so
    /// no move can land afterwards.
    pub async fn cancel_pending(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(true);
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Start the next game. Cancels any pending computer move first;
    /// cumulative scores survive.
    pub async fn reset(&mut self) {
        self.cancel_pending().await;
        self.game.lock().unwrap().reset();
        log::info!("game reset");
    }

    pub fn phase(&self) -> Phase {
        self.game.lock().unwrap().phase()
    }

    pub fn active_player(&self) -> PlayerId {
        self.game.lock().unwrap().active_player()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.game.lock().unwrap().winner()
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.game.lock().unwrap().score(player)
    }

    pub fn games_played(&self) -> u32 {
        self.game.lock().unwrap().games_played()
    }

    /// The human's own board, ships visible.
    pub fn own_board(&self) -> Board {
        *self.game.lock().unwrap().board(PlayerId::One)
    }

    /// The computer's board as the human may see it, ships redacted.
    pub fn enemy_view(&self) -> TargetView {
        self.game.lock().unwrap().target_view(PlayerId::Two)
    }
}
