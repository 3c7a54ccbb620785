//! Seeded strategy-vs-strategy duels, reported as JSON.

use anyhow::Result;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

use broadside::{
    init_logging, plan_attack, Difficulty, Game, GameMode, Phase, PlayerId,
};

#[derive(Parser)]
#[command(about = "Run seeded computer-vs-computer duels", long_about = None)]
struct Cli {
    /// Difficulty for player one (unrecognized values mean medium).
    #[arg(long, default_value = "hard")]
    player1: String,
    /// Difficulty for player two.
    #[arg(long, default_value = "medium")]
    player2: String,
    /// Number of games to play in one session.
    #[arg(long, default_value_t = 1)]
    games: u32,
    /// Fix the RNG seed for reproducible duels.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let d1 = Difficulty::from_name(&cli.player1);
    let d2 = Difficulty::from_name(&cli.player2);
    let mut rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    };

    let mut game = Game::new(GameMode::TwoPlayer);
    let mut turn_counts = Vec::with_capacity(cli.games as usize);
    for _ in 0..cli.games {
        game.reset();
        game.randomize_fleet(&mut rng, PlayerId::One)?;
        game.randomize_fleet(&mut rng, PlayerId::Two)?;

        let mut turns = 0u32;
        while game.phase() == Phase::Battle {
            turns += 1;
            if turns > 400 {
                anyhow::bail!("duel exceeded the turn bound");
            }
            let attacker = game.active_player();
            let defender = attacker.opponent();
            let difficulty = if attacker == PlayerId::One { d1 } else { d2 };
            let view = game.target_view(defender);
            let (row, col) = match plan_attack(&view, difficulty, &mut rng) {
                Some(target) => target,
                None => anyhow::bail!("board exhausted before a win"),
            };
            game.attack(defender, row, col)?;
        }
        log::debug!(
            "game {} finished after {} turns, winner {:?}",
            game.games_played(),
            turns,
            game.winner()
        );
        turn_counts.push(turns);
    }

    let summary = json!({
        "player1": { "difficulty": d1.name(), "wins": game.score(PlayerId::One) },
        "player2": { "difficulty": d2.name(), "wins": game.score(PlayerId::Two) },
        "games": game.games_played(),
        "turns": turn_counts,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
