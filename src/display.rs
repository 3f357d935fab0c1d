use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use std::io::{stdout, Write};

use tictactoe_ai::{
    board::{Board, Cell, Move, Player},
    SIZE,
};

/// Clears the terminal and draws the board, numbering the empty cells 1-9
pub fn draw(board: &Board) -> Result<()> {
    let mut stdout = stdout();
    stdout.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;

    for (row, cells) in board.rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let separator = if col == 0 { " " } else { " | " };
            stdout.queue(PrintStyledContent(style(separator)))?;

            let content = match cell {
                Cell::Empty => style(Move::new(row, col).position().to_string()).with(Color::DarkGrey),
                Cell::Mark(player) => style(player.mark().to_string())
                    .attribute(Attribute::Bold)
                    .with(match player {
                        Player::First => Color::Red,
                        Player::Second => Color::Yellow,
                    }),
            };
            stdout.queue(PrintStyledContent(content))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
        if row + 1 < SIZE {
            stdout.queue(PrintStyledContent(style("-----------\n")))?;
        }
    }
    stdout.queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}
