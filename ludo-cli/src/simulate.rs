//! Simulate command - play random games through the engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: seeding and formatting utilities

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use ludo_core::{Colour, Game, GameConfig};

use crate::GameArgs;

/// Colours seated in join order
const COLOURS: [&str; 4] = ["red", "green", "yellow", "blue"];

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Turns after which a game is abandoned as unfinished
    #[arg(long, default_value = "10000")]
    pub max_turns: u64,

    /// Run games in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub game: GameArgs,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    winner: Option<Colour>,
    turns: u64,
    captures: usize,
    passes: u64,
}

/// Aggregated results
#[derive(Clone, Debug)]
struct SimulationResults {
    games: Vec<GameRecord>,
    wins: BTreeMap<Colour, usize>,
    unfinished: usize,
    avg_turns: f32,
    total_captures: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// 1. Resolve the game config
/// 2. Play every game
/// 3. Report results
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    let config = args.game.to_config(seed)?;
    let base_seed = run_seed(&config);

    tracing::info!(
        "Simulating {} games: {} players x {} counters (seed={})",
        args.games,
        config.number_of_players,
        config.counters_per_player,
        base_seed
    );

    let results = play_games(&config, &args, base_seed)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games, optionally in parallel
fn play_games(config: &GameConfig, args: &SimulateArgs, base_seed: u64) -> Result<SimulationResults> {
    let progress = create_progress_bar(args.games as u64, args.json);

    let play = |index: usize| {
        let record = play_single_game(config, index + 1, game_seed(base_seed, index), args.max_turns);
        progress.inc(1);
        record
    };

    let games: Result<Vec<GameRecord>> = if args.parallel {
        (0..args.games).into_par_iter().map(play).collect()
    } else {
        (0..args.games).map(play).collect()
    };
    progress.finish_and_clear();

    let games = games?;
    for record in &games {
        tracing::debug!(
            "Game {}: {} in {} turns",
            record.game_number,
            record.winner.as_ref().map_or("unfinished".to_string(), |c| c.to_string()),
            record.turns
        );
    }

    Ok(compute_statistics(games))
}

/// Report results
fn report_results(results: &SimulationResults, args: &SimulateArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game with random-choice agents until someone wins
fn play_single_game(
    config: &GameConfig,
    game_number: usize,
    seed: u64,
    max_turns: u64,
) -> Result<GameRecord> {
    let mut game = Game::new(config.clone().with_seed(seed))?;
    for (i, colour) in COLOURS.iter().take(config.number_of_players).enumerate() {
        game.add_player(*colour, format!("agent-{}", i))?;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed.rotate_left(17));
    let mut captures = 0;
    let mut passes = 0;
    let mut winner = None;

    while winner.is_none() && game.turns_taken() < max_turns {
        let (user, colour) = match game.current_player() {
            Some(p) => (p.user_id.clone(), p.colour.clone()),
            None => break,
        };

        game.roll(&user)?;
        match game.legal_moves().choose(&mut rng) {
            Some(&origin) => {
                let outcome = game.move_counter(&user, origin, &colour)?;
                captures += outcome.captures.len();
                if outcome.won {
                    winner = Some(outcome.colour);
                }
            }
            None => {
                game.pass_turn_if_stuck(&user)?;
                passes += 1;
            }
        }
    }

    Ok(GameRecord {
        game_number,
        winner,
        turns: game.turns_taken(),
        captures,
        passes,
    })
}

/// Compute aggregate statistics from game records
fn compute_statistics(games: Vec<GameRecord>) -> SimulationResults {
    let mut wins = BTreeMap::new();
    for colour in games.iter().filter_map(|g| g.winner.clone()) {
        *wins.entry(colour).or_insert(0) += 1;
    }
    let unfinished = games.iter().filter(|g| g.winner.is_none()).count();
    let total_captures = games.iter().map(|g| g.captures).sum();

    let total_turns: u64 = games.iter().map(|g| g.turns).sum();
    let avg_turns = if games.is_empty() {
        0.0
    } else {
        total_turns as f32 / games.len() as f32
    };

    SimulationResults {
        games,
        wins,
        unfinished,
        avg_turns,
        total_captures,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Run seed: `--seed`, else the config file's seed, else entropy
fn run_seed(config: &GameConfig) -> u64 {
    config
        .seed
        .unwrap_or_else(|| ChaCha8Rng::from_entropy().gen())
}

/// Per-game seed derived from the run seed
fn game_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add(index as u64)
}

fn create_progress_bar(len: u64, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} games ({eta})") {
        bar.set_style(style);
    }
    bar
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &SimulationResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        winner: Option<String>,
        turns: u64,
        captures: usize,
        passes: u64,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        wins: BTreeMap<String, usize>,
        unfinished: usize,
        avg_turns: f32,
        total_captures: usize,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        wins: results
            .wins
            .iter()
            .map(|(c, &n)| (c.to_string(), n))
            .collect(),
        unfinished: results.unfinished,
        avg_turns: results.avg_turns,
        total_captures: results.total_captures,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                winner: g.winner.as_ref().map(|c| c.to_string()),
                turns: g.turns,
                captures: g.captures,
                passes: g.passes,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &SimulationResults) {
    let total = results.games.len();

    println!("\n=== Simulation Results ===");
    println!("Total games: {}", total);
    for (colour, &wins) in &results.wins {
        println!("{:<12} {} ({:.1}%)", format!("{} wins:", colour), wins, percent(wins, total));
    }
    println!(
        "Unfinished:  {} ({:.1}%)",
        results.unfinished,
        percent(results.unfinished, total)
    );
    println!("Avg turns:   {:.1}", results.avg_turns);
    println!("Captures:    {}", results.total_captures);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(game_number: usize, winner: Option<&str>, turns: u64) -> GameRecord {
        GameRecord {
            game_number,
            winner: winner.map(Colour::from),
            turns,
            captures: 1,
            passes: 0,
        }
    }

    #[test]
    fn test_compute_statistics_empty() {
        let results = compute_statistics(vec![]);
        assert!(results.wins.is_empty());
        assert_eq!(results.unfinished, 0);
        assert_eq!(results.avg_turns, 0.0);
    }

    #[test]
    fn test_compute_statistics() {
        let games = vec![
            record(1, Some("red"), 10),
            record(2, Some("green"), 20),
            record(3, Some("red"), 30),
            record(4, None, 40),
        ];

        let results = compute_statistics(games);
        assert_eq!(results.wins[&Colour::from("red")], 2);
        assert_eq!(results.wins[&Colour::from("green")], 1);
        assert_eq!(results.unfinished, 1);
        assert_eq!(results.avg_turns, 25.0);
        assert_eq!(results.total_captures, 4);
    }

    #[test]
    fn test_single_game_finishes() {
        let config = GameConfig::new(2, 1);
        let record = play_single_game(&config, 1, 42, 10_000).unwrap();
        assert!(record.winner.is_some());
        assert!(record.turns > 0);
    }

    #[test]
    fn test_single_game_deterministic() {
        let config = GameConfig::new(3, 2);
        let a = play_single_game(&config, 1, 7, 10_000).unwrap();
        let b = play_single_game(&config, 1, 7, 10_000).unwrap();
        assert_eq!(a.winner, b.winner);
        assert_eq!(a.turns, b.turns);
        assert_eq!(a.captures, b.captures);
    }

    #[test]
    fn test_turn_cap_leaves_game_unfinished() {
        let config = GameConfig::new(4, 4);
        let record = play_single_game(&config, 1, 3, 5).unwrap();
        assert!(record.winner.is_none());
        assert_eq!(record.turns, 5);
    }

    #[test]
    fn test_run_seed_from_config() {
        let args = GameArgs {
            players: 2,
            counters: 1,
            config: None,
        };
        let config = args.to_config(Some(21)).unwrap();
        assert_eq!(run_seed(&config), 21);
        assert_eq!(run_seed(&GameConfig::new(2, 1).with_seed(5)), 5);
    }

    #[test]
    fn test_run_seed_from_config_file() {
        let path = std::env::temp_dir().join(format!("ludo-sim-seed-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"number_of_players": 2, "counters_per_player": 1, "seed": 9}"#,
        )
        .unwrap();
        let args = GameArgs {
            players: 4,
            counters: 4,
            config: Some(path.clone()),
        };

        let from_file = args.to_config(None).unwrap();
        let overridden = args.to_config(Some(3)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(run_seed(&from_file), 9);
        assert_eq!(run_seed(&overridden), 3);
    }

    #[test]
    fn test_game_seed_offsets() {
        assert_eq!(game_seed(10, 0), 10);
        assert_eq!(game_seed(10, 3), 13);
        assert_eq!(game_seed(u64::MAX, 1), 0);
    }
}
