use broadside::{
    AttackOutcome, CellState, Difficulty, EngineError, Game, GameMode, Orientation, Phase,
    PlayerId, NUM_SHIPS, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Stack the whole catalog in rows starting at `top_row`.
fn place_column_fleet(game: &mut Game, rng: &mut SmallRng, top_row: usize) {
    for i in 0..NUM_SHIPS {
        game.place_ship(rng, top_row + i, 0).unwrap();
    }
}

#[test]
fn placement_flows_through_both_players_into_battle() {
    let mut rng = rng(1);
    let mut game = Game::new(GameMode::TwoPlayer);
    assert_eq!(game.phase(), Phase::Placement);
    assert_eq!(game.active_player(), PlayerId::One);

    place_column_fleet(&mut game, &mut rng, 0);
    // Catalog exhausted for player one; placement moves to player two.
    assert_eq!(game.phase(), Phase::Placement);
    assert_eq!(game.active_player(), PlayerId::Two);

    place_column_fleet(&mut game, &mut rng, 0);
    assert_eq!(game.phase(), Phase::Battle);
    assert_eq!(game.active_player(), PlayerId::One);
    assert_eq!(game.board(PlayerId::One).ship_cells(), TOTAL_SHIP_CELLS);
    assert_eq!(game.board(PlayerId::Two).ship_cells(), TOTAL_SHIP_CELLS);
}

#[test]
fn miss_passes_the_turn() {
    let mut rng = rng(2);
    let mut game = Game::new(GameMode::TwoPlayer);
    place_column_fleet(&mut game, &mut rng, 0);
    place_column_fleet(&mut game, &mut rng, 0);

    // Player two's fleet sits in rows 0..5; row 9 is open water.
    let outcome = game.attack(PlayerId::Two, 9, 0).unwrap();
    assert_eq!(outcome, AttackOutcome::Miss);
    assert_eq!(game.active_player(), PlayerId::Two);
    assert_eq!(game.phase(), Phase::Battle);
}

#[test]
fn repeat_attack_keeps_state_and_turn() {
    let mut rng = rng(3);
    let mut game = Game::new(GameMode::TwoPlayer);
    place_column_fleet(&mut game, &mut rng, 0);
    place_column_fleet(&mut game, &mut rng, 0);

    game.attack(PlayerId::Two, 9, 9).unwrap();
    game.attack(PlayerId::One, 9, 9).unwrap();
    assert_eq!(game.active_player(), PlayerId::One);

    let hits = game.board(PlayerId::Two).hits();
    let misses = game.board(PlayerId::Two).misses();
    let outcome = game.attack(PlayerId::Two, 9, 9).unwrap();
    assert_eq!(outcome, AttackOutcome::Repeat);
    assert_eq!(game.active_player(), PlayerId::One, "turn must not pass");
    assert_eq!(game.board(PlayerId::Two).hits(), hits);
    assert_eq!(game.board(PlayerId::Two).misses(), misses);
}

#[test]
fn attacking_the_wrong_board_is_rejected() {
    let mut rng = rng(4);
    let mut game = Game::new(GameMode::TwoPlayer);
    place_column_fleet(&mut game, &mut rng, 0);
    place_column_fleet(&mut game, &mut rng, 0);

    // Player one is active and may only attack player two.
    let err = game.attack(PlayerId::One, 0, 0).unwrap_err();
    assert_eq!(err, EngineError::WrongTurn);
    assert!(game.board(PlayerId::One).hits().is_empty());
}

#[test]
fn attack_during_placement_is_rejected() {
    let mut game = Game::new(GameMode::TwoPlayer);
    let err = game.attack(PlayerId::Two, 0, 0).unwrap_err();
    assert_eq!(err, EngineError::WrongPhase);
}

#[test]
fn orientation_toggle_drives_placement() {
    let mut rng = rng(5);
    let mut game = Game::new(GameMode::TwoPlayer);
    assert_eq!(game.orientation(), Orientation::Horizontal);
    game.toggle_orientation();
    assert_eq!(game.orientation(), Orientation::Vertical);

    // Carrier placed vertically from (0, 0) runs down column 0.
    game.place_ship(&mut rng, 0, 0).unwrap();
    let board = game.board(PlayerId::One);
    assert_eq!(board.cell(4, 0).unwrap(), CellState::Ship);
    assert_eq!(board.cell(0, 4).unwrap(), CellState::Empty);
}

#[test]
fn rejected_placement_leaves_cursor_alone() {
    let mut rng = rng(6);
    let mut game = Game::new(GameMode::TwoPlayer);
    let carrier = game.next_ship().unwrap();

    // Out of bounds for a 5-long horizontal run.
    let err = game.place_ship(&mut rng, 0, 8).unwrap_err();
    assert_eq!(err, EngineError::PlacementInvalid);
    assert_eq!(game.next_ship().unwrap(), carrier);
    assert_eq!(game.board(PlayerId::One).ship_cells(), 0);

    game.place_ship(&mut rng, 0, 0).unwrap();
    // Overlap with the carrier.
    let err = game.place_ship(&mut rng, 0, 3).unwrap_err();
    assert_eq!(err, EngineError::PlacementInvalid);
    assert_ne!(game.next_ship().unwrap(), carrier);
}

#[test]
fn vs_computer_auto_places_after_player_one() {
    let mut rng = rng(7);
    let mut game = Game::new(GameMode::VsComputer(Difficulty::Medium));
    place_column_fleet(&mut game, &mut rng, 0);

    assert_eq!(game.phase(), Phase::Battle);
    assert_eq!(game.active_player(), PlayerId::One);
    assert_eq!(game.board(PlayerId::Two).ship_cells(), TOTAL_SHIP_CELLS);
}

#[test]
fn randomize_fleet_completes_a_placement_turn() {
    let mut rng = rng(8);
    let mut game = Game::new(GameMode::TwoPlayer);

    // Only the player currently placing may randomize.
    let err = game.randomize_fleet(&mut rng, PlayerId::Two).unwrap_err();
    assert_eq!(err, EngineError::WrongTurn);

    game.randomize_fleet(&mut rng, PlayerId::One).unwrap();
    assert_eq!(game.active_player(), PlayerId::Two);
    game.randomize_fleet(&mut rng, PlayerId::Two).unwrap();
    assert_eq!(game.phase(), Phase::Battle);
    assert_eq!(game.board(PlayerId::One).ship_cells(), TOTAL_SHIP_CELLS);
    assert_eq!(game.board(PlayerId::Two).ship_cells(), TOTAL_SHIP_CELLS);
}

/// Drive a placed game to a player-one win: player one shoots the enemy
/// fleet in order, player two wastes shots on open water.
fn play_to_win(game: &mut Game) {
    let enemy_ships: Vec<(usize, usize)> =
        game.board(PlayerId::Two).ship_map().cells().collect();
    let own_water: Vec<(usize, usize)> =
        (!game.board(PlayerId::One).ship_map()).cells().collect();
    let mut water = own_water.into_iter();

    for &(r, c) in &enemy_ships {
        assert_eq!(game.attack(PlayerId::Two, r, c).unwrap(), AttackOutcome::Hit);
        if game.phase() == Phase::GameOver {
            return;
        }
        let (wr, wc) = water.next().expect("ran out of open water");
        assert_eq!(game.attack(PlayerId::One, wr, wc).unwrap(), AttackOutcome::Miss);
    }
    panic!("game did not end after the whole fleet was hit");
}

#[test]
fn sinking_the_fleet_ends_the_game_and_scores() {
    let mut rng = rng(9);
    let mut game = Game::new(GameMode::TwoPlayer);
    game.randomize_fleet(&mut rng, PlayerId::One).unwrap();
    game.randomize_fleet(&mut rng, PlayerId::Two).unwrap();

    play_to_win(&mut game);

    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.winner(), Some(PlayerId::One));
    assert_eq!(game.score(PlayerId::One), 1);
    assert_eq!(game.score(PlayerId::Two), 0);
    assert_eq!(game.games_played(), 1);

    // Terminal state: no further attacks.
    let err = game.attack(PlayerId::Two, 9, 9).unwrap_err();
    assert_eq!(err, EngineError::WrongPhase);
}

#[test]
fn reset_clears_the_game_but_keeps_scores() {
    let mut rng = rng(10);
    let mut game = Game::new(GameMode::TwoPlayer);
    game.randomize_fleet(&mut rng, PlayerId::One).unwrap();
    game.randomize_fleet(&mut rng, PlayerId::Two).unwrap();
    game.toggle_orientation();
    play_to_win(&mut game);

    game.reset();
    assert_eq!(game.phase(), Phase::Placement);
    assert_eq!(game.active_player(), PlayerId::One);
    assert_eq!(game.orientation(), Orientation::Horizontal);
    assert_eq!(game.winner(), None);
    assert_eq!(game.board(PlayerId::One).ship_cells(), 0);
    assert_eq!(game.board(PlayerId::Two).ship_cells(), 0);
    assert!(game.board(PlayerId::One).hits().is_empty());
    assert!(game.board(PlayerId::Two).misses().is_empty());

    // Cumulative tallies survive the reset.
    assert_eq!(game.score(PlayerId::One), 1);
    assert_eq!(game.games_played(), 1);

    // And keep accumulating over the next game.
    game.randomize_fleet(&mut rng, PlayerId::One).unwrap();
    game.randomize_fleet(&mut rng, PlayerId::Two).unwrap();
    play_to_win(&mut game);
    assert_eq!(game.score(PlayerId::One), 2);
    assert_eq!(game.games_played(), 2);
}

#[test]
fn strategies_finish_a_full_duel() {
    for (seed, d1, d2) in [
        (100, Difficulty::Easy, Difficulty::Easy),
        (101, Difficulty::Medium, Difficulty::Easy),
        (102, Difficulty::Hard, Difficulty::Medium),
        (103, Difficulty::Hard, Difficulty::Hard),
    ] {
        let mut rng = rng(seed);
        let mut game = Game::new(GameMode::TwoPlayer);
        game.randomize_fleet(&mut rng, PlayerId::One).unwrap();
        game.randomize_fleet(&mut rng, PlayerId::Two).unwrap();

        let mut turns = 0;
        while game.phase() == Phase::Battle {
            turns += 1;
            assert!(turns <= 250, "duel took too many turns");
            let attacker = game.active_player();
            let defender = attacker.opponent();
            let difficulty = if attacker == PlayerId::One { d1 } else { d2 };
            let view = game.target_view(defender);
            let (r, c) = broadside::plan_attack(&view, difficulty, &mut rng)
                .expect("active game must have a target");
            let outcome = game.attack(defender, r, c).unwrap();
            assert_ne!(outcome, AttackOutcome::Repeat, "strategies never repeat");
        }
        assert!(game.winner().is_some());
        assert_eq!(game.games_played(), 1);
    }
}
