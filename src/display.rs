use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent, StyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use max_connect4_ai::{Board, Cell, Player, WIDTH};

fn styled_cell(cell: Cell) -> StyledContent<char> {
    let styled = style(cell.symbol()).attribute(Attribute::Bold);
    match cell {
        Cell::PlayerOne => styled.with(Color::Red),
        Cell::PlayerTwo => styled.with(Color::Yellow),
        Cell::Empty => styled.with(Color::DarkGrey),
    }
}

/// Draws the board and both scores to stdout
pub fn draw(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    let divider = "_".repeat(WIDTH * 2 + 1);
    stdout.queue(PrintStyledContent(style(divider + "\n")))?;
    let columns: String = (0..WIDTH).map(|column| format!(" {}", column)).collect();
    stdout.queue(PrintStyledContent(style(columns + "\n")))?;

    for row in board.cells().iter() {
        stdout.queue(PrintStyledContent(style("|")))?;
        for &cell in row.iter() {
            stdout
                .queue(PrintStyledContent(styled_cell(cell)))?
                .queue(PrintStyledContent(style("|")))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }

    for &player in [Player::One, Player::Two].iter() {
        stdout
            .queue(PrintStyledContent(styled_cell(player.cell())))?
            .queue(PrintStyledContent(style(format!(
                " Score: {}\n",
                board.score(player)
            ))))?;
    }
    stdout.flush()?;
    Ok(())
}
