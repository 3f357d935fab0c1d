//! Exhaustive check of the computer's play
//!
//! Plays the computer against every sequence of human moves from the empty
//! board and tallies how each game ends. Any game the human wins is kept as
//! a losing line for inspection.

use anyhow::Result;
use indicatif::*;
use rayon::prelude::*;
use tracing::info;

use std::time::{Duration, Instant};

use crate::{
    board::Move,
    game::{Game, Sides},
    solver::Pruning,
};

#[derive(Clone, Debug, Default)]
pub struct AuditReport {
    pub ai_wins: usize,
    pub draws: usize,
    pub human_wins: usize,
    /// Full move sequences, both sides interleaved, of every game the human won
    pub losing_lines: Vec<Vec<Move>>,
    pub elapsed: Duration,
}

impl AuditReport {
    pub fn games(&self) -> usize {
        self.ai_wins + self.draws + self.human_wins
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.ai_wins += other.ai_wins;
        self.draws += other.draws;
        self.human_wins += other.human_wins;
        self.losing_lines.extend(other.losing_lines);
        self.elapsed = self.elapsed.max(other.elapsed);
        self
    }

    fn record(&mut self, game: &Game, line: &[Move]) {
        let sides = game.sides();
        match game.winner() {
            Some(player) if player == sides.human => {
                self.human_wins += 1;
                self.losing_lines.push(line.to_vec());
            }
            Some(_) => self.ai_wins += 1,
            None => self.draws += 1,
        }
    }
}

pub struct Audit {
    sides: Sides,
    pruning: Pruning,
    progress: bool,
}

impl Audit {
    pub fn new(sides: Sides) -> Self {
        Self {
            sides,
            pruning: Pruning::default(),
            progress: false,
        }
    }

    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    /// Shows a progress bar over the human's opening moves while running
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn run(&self) -> Result<AuditReport> {
        let start = Instant::now();

        let mut game = Game::new(self.sides).with_pruning(self.pruning);
        let mut opening_line = Vec::new();
        if !self.sides.human_moves_first() {
            opening_line.push(game.compute_ai_move()?);
        }

        let openings: Vec<Move> = game.board().empty_cells().collect();
        let progress = if self.progress {
            ProgressBar::new(openings.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Auditing human openings: {bar:40.cyan/blue} {pos}/{len}")
                .progress_chars("█▓▒░  "),
        );

        // each opening is an independent subtree
        let reports = openings
            .par_iter()
            .map(|&opening| -> Result<AuditReport> {
                let mut line = opening_line.clone();
                let mut report = AuditReport::default();
                branch(&game, opening, &mut line, &mut report)?;
                progress.inc(1);
                Ok(report)
            })
            .collect::<Result<Vec<_>>>()?;
        progress.finish_and_clear();

        let mut report = reports
            .into_iter()
            .fold(AuditReport::default(), AuditReport::merge);
        report.elapsed = start.elapsed();

        info!(
            games = report.games(),
            ai_wins = report.ai_wins,
            draws = report.draws,
            human_wins = report.human_wins,
            pruning = ?self.pruning,
            "audit finished"
        );
        Ok(report)
    }
}

/// Plays `human_move` and the computer's reply, then explores every continuation
fn branch(game: &Game, human_move: Move, line: &mut Vec<Move>, report: &mut AuditReport) -> Result<()> {
    let mut next = game.clone();
    next.apply_human_move(human_move.row, human_move.col)?;
    line.push(human_move);

    let mut plies = 1;
    if !next.is_game_over() {
        line.push(next.compute_ai_move()?);
        plies += 1;
    }
    explore(&next, line, report)?;

    line.truncate(line.len() - plies);
    Ok(())
}

fn explore(game: &Game, line: &mut Vec<Move>, report: &mut AuditReport) -> Result<()> {
    if game.is_game_over() {
        report.record(game, line);
        return Ok(());
    }
    for human_move in game.board().empty_cells() {
        branch(game, human_move, line, report)?;
    }
    Ok(())
}
