//! Self-play game generation.
//!
//! Plays full games in which every player answers each build request with a
//! uniformly random offered option. Used to stress the state machine over
//! many seeds and to produce JSONL game records for offline inspection.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};

use crate::board::{Phase, Species};
use crate::dice::SeededDice;
use crate::error::GameError;
use crate::game::Game;
use crate::movegen::random_proposal;
use crate::protocol::snapshot::GameSnapshot;

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Species of each seat, in player order.
    pub species: Vec<Species>,
    /// Maximum BUILD/BATTLE cycles before a game is cut off.
    pub max_rounds: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress logging.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            species: vec![Species::Human, Species::Xenite],
            max_rounds: 200,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// Battles fought.
    pub rounds: usize,
    /// Whether the game reached GAME_OVER (as opposed to the round cap).
    pub game_over: bool,
    /// Indices of players left with hp above zero.
    pub survivors: Vec<usize>,
    /// Final hp of each player.
    pub final_hp: Vec<i32>,
    /// The final game state.
    pub final_state: GameSnapshot,
}

/// Aggregate statistics over a batch of games.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelfPlaySummary {
    pub games: usize,
    pub game_overs: usize,
    pub mean_rounds: f64,
    /// Games won outright by each seat (sole survivor at GAME_OVER).
    pub sole_survivor_wins: Vec<usize>,
    /// Games that ended with nobody left standing.
    pub mutual_destruction: usize,
}

fn rng_for(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays a single self-play game and returns its record.
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, GameError> {
    let mut dice = SeededDice::from_rng(SmallRng::seed_from_u64(rng.gen()));
    let (mut game, _) = Game::start(&config.species, &mut dice)?;
    let mut rounds = 0;

    while !game.phase().is_terminal() && rounds < config.max_rounds {
        for id in 0..game.players().len() {
            if let Some(proposal) = random_proposal(&game.players()[id], rng) {
                let (next, accepted) = game.submit(id, &proposal);
                if !accepted {
                    warn!(game_id, player_id = id, "offered proposal was rejected");
                }
                game = next;
            }
        }
        if game.has_pending_requests() {
            warn!(game_id, "requests still pending after self-play submissions");
            break;
        }
        let was_build = game.phase() == Phase::Build;
        game = game.next(&mut dice).0;
        if was_build {
            rounds += 1;
        }
    }

    let final_hp: Vec<i32> = game.players().iter().map(|p| p.hp).collect();
    let survivors = final_hp
        .iter()
        .enumerate()
        .filter(|(_, &hp)| hp > 0)
        .map(|(i, _)| i)
        .collect();

    Ok(GameRecord {
        game_id,
        rounds,
        game_over: game.phase().is_terminal(),
        survivors,
        final_hp,
        final_state: game.to_snapshot(),
    })
}

fn log_progress(config: &SelfPlayConfig, done: usize, game: &GameRecord, started: Instant) {
    if config.quiet {
        return;
    }
    let outcome = match (game.game_over, game.survivors.as_slice()) {
        (true, [winner]) => format!("player {} wins", winner),
        (true, []) => "mutual destruction".to_string(),
        (true, _) => "game over".to_string(),
        (false, _) => "round cap".to_string(),
    };
    info!(
        "Game {}/{}: {} after {} rounds ({:.1}ms)",
        done,
        config.num_games,
        outcome,
        game.rounds,
        started.elapsed().as_secs_f64() * 1000.0,
    );
}

/// Runs self-play generation, producing one record per game in id order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    if config.threads > 1 {
        run_self_play_parallel(config)
    } else {
        run_self_play_sequential(config)
    }
}

/// Failure modes of a self-play batch.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    for i in 0..config.num_games {
        let started = Instant::now();
        let mut rng = rng_for(config.seed, i);
        let game = play_game(config, i, &mut rng)?;
        log_progress(config, i + 1, &game, started);
        games.push(game);
    }
    Ok(games)
}

/// Parallel self-play: plays games concurrently on a dedicated rayon pool.
fn run_self_play_parallel(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let completed = AtomicUsize::new(0);

    let games = pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| {
                let started = Instant::now();
                let mut rng = rng_for(config.seed, i);
                let game = play_game(config, i, &mut rng)?;
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                log_progress(config, done, &game, started);
                Ok(game)
            })
            .collect::<Result<Vec<_>, GameError>>()
    })?;
    Ok(games)
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Computes aggregate statistics over a batch of games.
pub fn summarize(games: &[GameRecord]) -> SelfPlaySummary {
    let seats = games.iter().map(|g| g.final_hp.len()).max().unwrap_or(0);
    let mut summary = SelfPlaySummary {
        games: games.len(),
        sole_survivor_wins: vec![0; seats],
        ..Default::default()
    };
    let mut total_rounds = 0;
    for game in games {
        total_rounds += game.rounds;
        if !game.game_over {
            continue;
        }
        summary.game_overs += 1;
        match game.survivors.as_slice() {
            [winner] => summary.sole_survivor_wins[*winner] += 1,
            [] => summary.mutual_destruction += 1,
            _ => {}
        }
    }
    if !games.is_empty() {
        summary.mean_rounds = total_rounds as f64 / games.len() as f64;
    }
    summary
}
