//! Turning outside text and data into engine values: direction names typed by
//! a player, and grids read back from serialized boards.

use std::str::FromStr;

use crate::engine::{self, Board, Grid, Move, Tile, SIZE};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognised direction {0:?} (expected up/down/left/right, w/a/s/d or h/j/k/l)")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" | "k" => Ok(Move::Up),
            "down" | "s" | "j" => Ok(Move::Down),
            "left" | "a" | "h" => Ok(Move::Left),
            "right" | "d" | "l" => Ok(Move::Right),
            _ => Err(ParseMoveError(s.trim().to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid tile {value} at ({row}, {col}): tiles must be 0 or a power of two >= 2")]
pub struct InvalidTileError {
    pub row: usize,
    pub col: usize,
    pub value: Tile,
}

impl TryFrom<Grid> for Board {
    type Error = InvalidTileError;

    fn try_from(rows: Grid) -> Result<Self, Self::Error> {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let value = rows[row][col];
                if !engine::is_valid_tile(value) {
                    return Err(InvalidTileError { row, col, value });
                }
            }
        }
        Ok(Board::from_rows(rows))
    }
}
