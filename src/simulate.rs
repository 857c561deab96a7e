//! Engine-versus-random match simulation, used to gauge difficulty profiles

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rayon::prelude::*;

use crate::{
    board::{Board, Side},
    profile::DifficultyProfile,
    search::Searcher,
    win::{game_over, winner},
};

/// How a simulated game ended
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    EngineWin,
    OpponentWin,
    Draw,
}

/// Results over a batch of games
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct MatchStats {
    pub engine_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
}

impl MatchStats {
    pub fn games(&self) -> usize {
        self.engine_wins + self.opponent_wins + self.draws
    }

    fn record(mut self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::EngineWin => self.engine_wins += 1,
            Outcome::OpponentWin => self.opponent_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
        self
    }
}

/// Plays one game between the engine and an opponent choosing uniformly
/// among legal columns; the opponent moves first
pub fn play_random_game(profile: DifficultyProfile, seed: u64) -> Outcome {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut searcher = Searcher::new(profile);
    let mut board = Board::new();
    let mut side = Side::Human;

    while !game_over(&board) {
        let column = match side {
            Side::Computer => searcher.pick_best_move(&board).column,
            Side::Human => board
                .legal_moves()
                .collect::<Vec<_>>()
                .choose(&mut rng)
                .copied(),
        };
        match column {
            Some(column) => board = board.drop_piece(column, side),
            None => break,
        }
        side = side.other();
    }

    debug!("game {} finished after {} nodes", seed, searcher.node_count);
    match winner(&board) {
        Some((Side::Computer, _)) => Outcome::EngineWin,
        Some((Side::Human, _)) => Outcome::OpponentWin,
        None => Outcome::Draw,
    }
}

/// Plays `games` games on the rayon pool, seeding game `i` with `seed + i`
pub fn simulate_matches(
    profile: DifficultyProfile,
    games: usize,
    seed: u64,
    show_progress: bool,
) -> MatchStats {
    let progress = if show_progress {
        let progress = ProgressBar::new(games as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Simulating games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );
        progress
    } else {
        ProgressBar::hidden()
    };

    let stats = (0..games as u64)
        .into_par_iter()
        .map(|i| {
            let outcome = play_random_game(profile, seed.wrapping_add(i));
            progress.inc(1);
            outcome
        })
        .fold(MatchStats::default, MatchStats::record)
        .reduce(MatchStats::default, |a, b| MatchStats {
            engine_wins: a.engine_wins + b.engine_wins,
            opponent_wins: a.opponent_wins + b.opponent_wins,
            draws: a.draws + b.draws,
        });

    progress.finish();
    stats
}
