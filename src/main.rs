use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::info;

use std::io::{stdin, stdout, BufRead, Write};
use std::path::PathBuf;

use connect4_minimax::{
    api::{self, ErrorResponse, Request},
    profile::{Difficulty, CONFIG_PATH},
    search::Searcher,
    simulate::simulate_matches,
    win::{game_over, winner},
    Board, DifficultyConfig, Side, WIDTH,
};

mod display;

/// Play Connect 4 against a minimax engine
#[derive(Debug, Parser)]
#[command(name = "connect4", about = "Connect 4 against a minimax engine")]
struct Cli {
    /// Path to the JSON difficulty table
    #[arg(long, env = "CONNECT4_CONFIG", default_value = CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Mode {
    /// Play an interactive game in the terminal (default)
    Play,
    /// Answer one JSON request per stdin line with one JSON response line
    Json,
    /// Play the engine against a random opponent and report the results
    Simulate {
        /// Number of games to play
        #[arg(default_value_t = 1000)]
        games: usize,
        /// Difficulty the engine plays at: easy, medium or hard
        #[arg(default_value = "easy")]
        difficulty: Difficulty,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = DifficultyConfig::load_or_default(&cli.config)?;

    match cli.mode.unwrap_or(Mode::Play) {
        Mode::Play => play(&config),
        Mode::Json => serve_json(&config),
        Mode::Simulate { games, difficulty } => simulate(&config, games, difficulty),
    }
}

/// Answers one JSON request per input line with one JSON response line
fn serve_json(config: &DifficultyConfig) -> Result<()> {
    let stdin = stdin();
    let mut stdout = stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => match api::handle(config, &request) {
                Ok(state) => serde_json::to_string(&state)?,
                Err(err) => serde_json::to_string(&ErrorResponse::from(&err))?,
            },
            // requests that don't match the schema at all
            Err(err) => serde_json::to_string(&ErrorResponse {
                error: err.to_string(),
                status: 422,
            })?,
        };
        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }
    Ok(())
}

fn simulate(config: &DifficultyConfig, games: usize, difficulty: Difficulty) -> Result<()> {
    let profile = config.profile(difficulty);
    println!("Num games: {}", games);
    println!("Difficulty: {} ({:?})", difficulty, profile);

    let stats = simulate_matches(*profile, games, 0, true);
    println!(
        "AI won {} lost {} games and drew {} games",
        stats.engine_wins, stats.opponent_wins, stats.draws
    );
    Ok(())
}

fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    stdout().flush()?;
    let mut buffer = String::new();
    if stdin().read_line(&mut buffer)? == 0 {
        return Err(anyhow!("input closed"));
    }
    Ok(buffer.trim().to_string())
}

fn play(config: &DifficultyConfig) -> Result<()> {
    println!("Welcome to Connect 4\n");

    // choose difficulty
    let difficulty = loop {
        let answer = prompt("Difficulty? easy/medium/hard: ")?;
        match answer.parse::<Difficulty>() {
            Ok(difficulty) => break difficulty,
            Err(err) => println!("{}", err),
        }
    };
    let mut searcher = Searcher::new(*config.profile(difficulty));

    let mut board = Board::new();
    let mut side = if searcher.profile().ai_moves_first {
        Side::Computer
    } else {
        Side::Human
    };

    // game loop
    while !game_over(&board) {
        display::draw(&board, None)?;

        match side {
            Side::Computer => {
                println!("AI is thinking...");
                stdout().flush()?;

                let result = searcher.par_pick_best_move(&board);
                let column = match result.column {
                    Some(column) => column,
                    None => break,
                };
                board = board.apply_move(column, Side::Computer)?;
                println!("AI drops in column {} (eval {}).", column, result.score);
                info!("{} nodes searched so far", searcher.node_count);
            }
            Side::Human => {
                let input = prompt("Move input > ")?;
                let column = match input.parse::<usize>() {
                    Ok(column) if column < WIDTH => column,
                    _ => {
                        println!(
                            "{} is invalid. Please pick a number from 0-{}",
                            input,
                            WIDTH - 1
                        );
                        continue;
                    }
                };
                match board.apply_move(column, Side::Human) {
                    Ok(next) => board = next,
                    Err(_) => {
                        println!("Column {} is full, pick another one", column);
                        // try the move again
                        continue;
                    }
                }
            }
        }
        side = side.other();
    }

    // end states
    let win = winner(&board);
    display::draw(&board, win.as_ref().map(|(_, cells)| cells))?;
    match win {
        Some((Side::Computer, _)) => println!("AI wins! Game over."),
        Some((Side::Human, _)) => println!("Player wins! Game over."),
        None => println!("Draw. Game over."),
    }
    Ok(())
}
