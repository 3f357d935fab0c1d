use anyhow::{anyhow, Result};
use indicatif::HumanDuration;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};

use tictactoe_ai::{audit::*, board::Move, game::*, solver::Pruning};

mod display;

/// Environment variable selecting how far alpha-beta cutoffs reach, `row` or `full`
const PRUNING_VAR: &str = "TICTACTOE_PRUNING";

fn read_line() -> Result<String> {
    let mut buffer = String::new();
    if stdin().read_line(&mut buffer)? == 0 {
        return Err(anyhow!("input closed"));
    }
    Ok(buffer)
}

fn ask_yes_no(question: &str) -> Result<bool> {
    loop {
        print!("{} y/n: ", question);
        stdout().flush()?;
        match read_line()?.trim().to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn run_audit(pruning: Pruning) -> Result<()> {
    for (label, sides) in [("first", Sides::human_first()), ("second", Sides::ai_first())].iter() {
        println!("Human moving {}:", label);
        let report = Audit::new(*sides)
            .with_pruning(pruning)
            .with_progress(true)
            .run()?;

        println!(
            "  {} games: {} AI wins, {} draws, {} human wins ({})",
            report.games(),
            report.ai_wins,
            report.draws,
            report.human_wins,
            HumanDuration(report.elapsed)
        );
        for line in report.losing_lines.iter() {
            let positions: Vec<String> = line.iter().map(|m| m.position().to_string()).collect();
            println!("  lost: {}", positions.join(" "));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let pruning = match std::env::var(PRUNING_VAR) {
        Ok(value) => value.parse::<Pruning>()?,
        Err(_) => Pruning::default(),
    };

    println!("Welcome to Tic-Tac-Toe\n");

    if ask_yes_no("Audit the AI against every possible human game first?")? {
        return run_audit(pruning);
    }

    let sides = if ask_yes_no("Do you want to play first?")? {
        Sides::human_first()
    } else {
        Sides::ai_first()
    };
    let mut game = Game::new(sides).with_pruning(pruning);
    let mut human_turn = sides.human_moves_first();

    // game loop
    display::draw(game.board())?;
    while !game.is_game_over() {
        if human_turn {
            print!("Choose a position (1-9) > ");
            stdout().flush()?;
            let input = read_line()?;

            let position = match input.trim().parse::<usize>() {
                Err(_) => {
                    println!("Enter a number!");
                    continue;
                }
                Ok(position) => position,
            };
            let next_move = match Move::from_position(position) {
                Some(next_move) => next_move,
                None => {
                    println!("Invalid move, positions are numbered 1 to 9");
                    continue;
                }
            };
            if let Err(err) = game.apply_human_move(next_move.row, next_move.col) {
                println!("{}", err);
                // try the move again
                continue;
            }
        } else {
            game.compute_ai_move()?;
        }

        human_turn = !human_turn;
        display::draw(game.board())?;
    }

    match game.winner() {
        Some(player) if player == sides.human => println!("You beat the AI!"),
        Some(_) => println!("The AI wins!"),
        None => println!("Draw!"),
    }
    Ok(())
}
