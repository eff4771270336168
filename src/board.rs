use log::{debug, warn};
use static_assertions::*;

use std::fmt;
use std::fs;
use std::path::Path;

use crate::{error::BoardError, utility, HEIGHT, WIDTH};

/// The sum of both player identities, so that the opponent of `p` is `PLAYER_ID_SUM - p`
pub const PLAYER_ID_SUM: u8 = 3;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One = 1,
    Two = 2,
}

const_assert!(Player::One as u8 + Player::Two as u8 == PLAYER_ID_SUM);

impl Player {
    /// The numeric identity of the player, as used in the board file
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// The opposing player
    pub fn other(self) -> Self {
        match PLAYER_ID_SUM - self.id() {
            1 => Player::One,
            _ => Player::Two,
        }
    }

    /// The cell value holding one of this player's tiles
    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }

    /// The symbol used for this player's tiles when printing the board
    pub fn symbol(self) -> char {
        self.cell().symbol()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The player owning the tile in this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
        }
    }

    fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Cell::Empty),
            '1' => Some(Cell::PlayerOne),
            '2' => Some(Cell::PlayerTwo),
            _ => None,
        }
    }

    fn digit(self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::PlayerOne => '1',
            Cell::PlayerTwo => '2',
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
        }
    }
}

/// A Max Connect 4 position
///
/// # Notes
/// Cells are stored row by row with row 0 at the top of the board. Tiles can only be
/// added through [`Board::play`], which keeps every column packed from the bottom up.
/// Callers that want to look ahead without changing a position should clone it first.
///
/// # Text Format
/// A board is stored as 6 lines of 7 digits (`0` empty, `1` and `2` for the players'
/// tiles), the line index being the row and the character index the column, followed
/// by a single line holding the player to move next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
    turn: Player,
    num_pieces: usize,
}

impl Board {
    /// Creates an empty board with player 1 to move
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
            turn: Player::One,
            num_pieces: 0,
        }
    }

    /// Parses a board from its text format
    pub fn from_text<S: AsRef<str>>(text: S) -> Result<Self, BoardError> {
        let mut lines: Vec<&str> = text.as_ref().lines().collect();
        // trailing blank lines carry no data
        while lines.last().map_or(false, |line| line.trim().is_empty()) {
            lines.pop();
        }
        if lines.len() < HEIGHT + 1 {
            return Err(BoardError::MissingLines { found: lines.len() });
        }

        let mut cells = [[Cell::Empty; WIDTH]; HEIGHT];
        let mut num_pieces = 0;
        for (row, line) in lines.iter().take(HEIGHT).enumerate() {
            let length = line.chars().count();
            if length != WIDTH {
                return Err(BoardError::RowLength { row, length });
            }
            for (column, digit) in line.chars().enumerate() {
                let cell = Cell::from_digit(digit).ok_or(BoardError::InvalidCell {
                    row,
                    column,
                    found: digit,
                })?;
                if !cell.is_empty() {
                    num_pieces += 1;
                }
                cells[row][column] = cell;
            }
        }

        let turn_line = lines[HEIGHT].trim();
        let turn = turn_line
            .parse::<u8>()
            .ok()
            .and_then(Player::from_id)
            .ok_or_else(|| BoardError::InvalidTurn(turn_line.to_string()))?;

        // report the first extra line holding data, counting lines from 1
        if let Some(extra) = lines[HEIGHT + 1..]
            .iter()
            .position(|line| !line.trim().is_empty())
        {
            return Err(BoardError::TrailingData {
                line: HEIGHT + 2 + extra,
            });
        }

        // every tile must rest on another tile or on the bottom of the board
        for row in 0..HEIGHT - 1 {
            for column in 0..WIDTH {
                if !cells[row][column].is_empty() && cells[row + 1][column].is_empty() {
                    return Err(BoardError::FloatingPiece { row, column });
                }
            }
        }

        Ok(Self {
            cells,
            turn,
            num_pieces,
        })
    }

    /// Reads a board from a file in the text format
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BoardError> {
        let path = path.as_ref();
        let board = Self::from_text(fs::read_to_string(path)?)?;
        debug!(
            "loaded board from {}: {} tiles, player {} to move",
            path.display(),
            board.num_pieces,
            board.turn
        );
        Ok(board)
    }

    /// Reads a board from a file, starting from an empty board with player 1 to move
    /// if the file cannot be read or parsed
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(board) => board,
            Err(err) => {
                warn!(
                    "could not load board from {} ({}), starting from an empty board",
                    path.display(),
                    err
                );
                Self::new()
            }
        }
    }

    /// Formats the board in its text format
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity((WIDTH + 1) * HEIGHT + 1);
        for row in self.cells.iter() {
            text.extend(row.iter().map(|cell| cell.digit()));
            text.push('\n');
        }
        text.push_str(&self.turn.to_string());
        text
    }

    /// Writes the board to a file in the text format
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), BoardError> {
        let path = path.as_ref();
        fs::write(path, self.to_text())?;
        debug!("saved board to {}", path.display());
        Ok(())
    }

    /// The content of a single cell, row 0 being the top of the board
    ///
    /// # Panics
    /// Panics if `row` or `column` is outside the board.
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    /// A copy of the whole grid, row 0 being the top of the board
    pub fn cells(&self) -> [[Cell; WIDTH]; HEIGHT] {
        self.cells
    }

    /// The player to move next
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// The number of tiles on the board
    pub fn num_pieces(&self) -> usize {
        self.num_pieces
    }

    /// Whether a tile can be dropped into `column`
    pub fn playable(&self, column: usize) -> bool {
        column < WIDTH && self.cells[0][column].is_empty()
    }

    /// Drops a tile for the current player into `column` and passes the turn
    ///
    /// The column must be [playable](Board::playable), see [`Board::play_checked`]
    /// for a checked version.
    ///
    /// # Panics
    /// Panics if `column` is outside the board or already full.
    pub fn play(&mut self, column: usize) {
        assert!(self.playable(column), "column {} is not playable", column);

        if let Some(row) = (0..HEIGHT)
            .rev()
            .find(|&row| self.cells[row][column].is_empty())
        {
            self.cells[row][column] = self.turn.cell();
            self.num_pieces += 1;
            self.turn = self.turn.other();
        }
    }

    /// Drops a tile into `column`, returning an error instead if the move is not legal
    pub fn play_checked(&mut self, column: usize) -> Result<(), BoardError> {
        if column >= WIDTH {
            return Err(BoardError::InvalidMove { column });
        }
        if !self.playable(column) {
            return Err(BoardError::ColumnFull { column });
        }
        self.play(column);
        Ok(())
    }

    /// Whether the game is over, which only happens once the board is full
    pub fn is_full(&self) -> bool {
        self.num_pieces == WIDTH * HEIGHT
    }

    /// The number of complete runs of four tiles owned by `player`
    pub fn score(&self, player: Player) -> usize {
        let tile = player.cell();
        utility::RUNS
            .iter()
            .filter(|run| {
                run.iter()
                    .all(|&(row, column)| self.cells[row][column] == tile)
            })
            .count()
    }

    /// The heuristic value of the position from the point of view of `player`
    pub fn utility(&self, player: Player) -> i32 {
        utility::evaluate(self, player)
    }

    /// The player with the higher score, or `None` if the scores are tied
    pub fn leader(&self) -> Option<Player> {
        let (one, two) = (self.score(Player::One), self.score(Player::Two));
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Some(Player::One),
            std::cmp::Ordering::Less => Some(Player::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for column in 0..WIDTH {
            write!(f, " {}", column)?;
        }
        writeln!(f)?;
        for row in self.cells.iter() {
            write!(f, "|")?;
            for cell in row.iter() {
                write!(f, "{}|", cell.symbol())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{} Score: {}", Player::One.symbol(), self.score(Player::One))?;
        write!(f, "{} Score: {}", Player::Two.symbol(), self.score(Player::Two))
    }
}
