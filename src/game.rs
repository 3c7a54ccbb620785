//! Game session: phase machine, turn order, placement cursor, and scoring.

use rand::Rng;

use crate::board::{Board, TargetView};
use crate::common::{AttackOutcome, EngineError};
use crate::config::{FLEET, NUM_SHIPS};
use crate::ship::{Orientation, ShipClass};
use crate::strategy::Difficulty;

/// One of the two sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

/// Game phase. Strictly forward-moving; only [`Game::reset`] returns to
/// `Placement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Placement,
    Battle,
    GameOver,
}

/// Who controls player two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    TwoPlayer,
    VsComputer(Difficulty),
}

/// A full two-sided game session.
///
/// Owns both boards exclusively; opponents only ever receive the redacted
/// [`TargetView`]. Scores and the completed-game count accumulate across
/// resets and are cleared only by constructing a new session.
pub struct Game {
    mode: GameMode,
    boards: [Board; 2],
    phase: Phase,
    active: PlayerId,
    next_ship: usize,
    orientation: Orientation,
    winner: Option<PlayerId>,
    scores: [u32; 2],
    games_played: u32,
}

impl Game {
    pub fn new(mode: GameMode) -> Self {
        Game {
            mode,
            boards: [Board::new(), Board::new()],
            phase: Phase::Placement,
            active: PlayerId::One,
            next_ship: 0,
            orientation: Orientation::Horizontal,
            winner: None,
            scores: [0, 0],
            games_played: 0,
        }
    }

    /// Place the next catalog ship for the active player at (`row`, `col`)
    /// with the current orientation. Rejections leave everything unchanged.
    ///
    /// When player one finishes in vs-computer mode, the computer fleet is
    /// placed immediately from `rng` and the battle begins; in two-player
    /// mode placement passes to player two first.
    pub fn place_ship<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        row: usize,
        col: usize,
    ) -> Result<(), EngineError> {
        if self.phase != Phase::Placement {
            return Err(EngineError::WrongPhase);
        }
        let class = match FLEET.get(self.next_ship) {
            Some(&class) => class,
            None => return Err(EngineError::FleetComplete),
        };
        self.boards[self.active.index()].place(class, self.orientation, row, col)?;
        self.next_ship += 1;
        if self.next_ship == NUM_SHIPS {
            self.finish_side(rng)?;
        }
        Ok(())
    }

    /// Replace `player`'s fleet with a random one and complete their
    /// placement turn. Only the player currently placing may randomize.
    pub fn randomize_fleet<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        player: PlayerId,
    ) -> Result<(), EngineError> {
        if self.phase != Phase::Placement {
            return Err(EngineError::WrongPhase);
        }
        if player != self.active {
            return Err(EngineError::WrongTurn);
        }
        let mut board = Board::new();
        board.place_fleet_random(rng)?;
        self.boards[player.index()] = board;
        self.next_ship = NUM_SHIPS;
        self.finish_side(rng)
    }

    fn finish_side<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        match (self.active, self.mode) {
            (PlayerId::One, GameMode::VsComputer(_)) => {
                self.boards[PlayerId::Two.index()].place_fleet_random(rng)?;
                self.start_battle();
            }
            (PlayerId::One, GameMode::TwoPlayer) => {
                self.active = PlayerId::Two;
                self.next_ship = 0;
            }
            (PlayerId::Two, _) => self.start_battle(),
        }
        Ok(())
    }

    fn start_battle(&mut self) {
        self.phase = Phase::Battle;
        self.active = PlayerId::One;
        self.next_ship = 0;
    }

    /// Flip the placement orientation.
    pub fn toggle_orientation(&mut self) {
        self.orientation = self.orientation.toggled();
    }

    /// Attack `defender`'s board at (`row`, `col`) on behalf of the active
    /// player. A repeat on a resolved cell changes nothing and keeps the
    /// turn; a mutating attack either ends the game or passes the turn.
    pub fn attack(
        &mut self,
        defender: PlayerId,
        row: usize,
        col: usize,
    ) -> Result<AttackOutcome, EngineError> {
        if self.phase != Phase::Battle {
            return Err(EngineError::WrongPhase);
        }
        if defender != self.active.opponent() {
            return Err(EngineError::WrongTurn);
        }
        let outcome = self.boards[defender.index()].attack(row, col)?;
        if outcome == AttackOutcome::Repeat {
            return Ok(outcome);
        }
        if self.boards[defender.index()].is_defeated() {
            let attacker = self.active;
            self.phase = Phase::GameOver;
            self.winner = Some(attacker);
            self.scores[attacker.index()] += 1;
            self.games_played += 1;
        } else {
            self.active = defender;
        }
        Ok(outcome)
    }

    /// Start the next game: boards emptied, phase back to placement for
    /// player one, cursor and orientation reset, winner cleared. Scores and
    /// the games-played count are deliberately kept.
    pub fn reset(&mut self) {
        self.boards = [Board::new(), Board::new()];
        self.phase = Phase::Placement;
        self.active = PlayerId::One;
        self.next_ship = 0;
        self.orientation = Orientation::Horizontal;
        self.winner = None;
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// The catalog entry the active player places next, if any remain.
    pub fn next_ship(&self) -> Option<ShipClass> {
        FLEET.get(self.next_ship).copied()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player.index()]
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Full board view for rendering a player's own fleet.
    pub fn board(&self, player: PlayerId) -> &Board {
        &self.boards[player.index()]
    }

    /// Redacted view of `player`'s board for their opponent.
    pub fn target_view(&self, player: PlayerId) -> TargetView {
        self.boards[player.index()].target_view()
    }
}
