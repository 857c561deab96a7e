use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_minimax::{
    board::{Board, Cell},
    win::Window,
    HEIGHT, WIDTH,
};

/// Draws the board below the cursor, highlighting `highlight` if given
pub fn draw(board: &Board, highlight: Option<&Window>) -> Result<()> {
    let mut stdout = stdout();

    // columns are entered 0-indexed
    let cols: String = (0..WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for _ in 0..HEIGHT {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    // the cursor now sits on the line below the bottom row
    let (origin_x, origin_y) = crossterm::cursor::position()?;

    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            let (pos_x, pos_y) = (
                origin_x + column as u16,
                origin_y.saturating_sub((HEIGHT - row) as u16),
            );
            let winning = highlight.map_or(false, |cells| cells.contains(&(row, column)));

            let mut tile = style(if winning { "*" } else { "O" })
                .attribute(Attribute::Bold)
                .on(Color::DarkBlue)
                .with(match board.cell(row, column) {
                    Cell::Human => Color::Red,
                    Cell::Computer => Color::Yellow,
                    Cell::Empty => Color::DarkBlue,
                });
            if winning {
                tile = tile.attribute(Attribute::Underlined);
            }

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(tile))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x, origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}
