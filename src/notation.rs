//! Compact board encoding: the piece-placement field of a FEN record.
//!
//! Ranks are listed from the first encoded row to the last, separated by
//! `/` (or any other separator the caller picks), and a digit stands for
//! that many empty squares.

use std::error::Error;
use std::fmt;

use itertools::Itertools;

use crate::board::{Board, Squares};
use crate::types::Piece;

pub const RANK_SEPARATOR: char = '/';

/// Separator used by the image dataset the positions come from, whose file
/// names are compact encodings with `-` between the ranks.
pub const DATASET_SEPARATOR: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// The encoding did not split into 8 ranks. Holds the count found.
    RankCount(usize),
    /// A rank expanded to something other than 8 squares.
    RankLength { rank: usize, squares: usize },
    UnexpectedChar(char),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::RankCount(count) => {
                write!(f, "found {count} ranks, 8 were expected")
            }
            FormatError::RankLength { rank, squares } => write!(
                f,
                "rank {} describes {squares} squares, 8 were expected",
                rank + 1
            ),
            FormatError::UnexpectedChar(c) => write!(f, "unexpected `{c}`"),
        }
    }
}

impl Error for FormatError {}

pub fn decode(compact: &str) -> Result<Board, FormatError> {
    decode_with_separator(compact, RANK_SEPARATOR)
}

/// Expand a compact encoding into a dense board. Nothing is built unless
/// every rank is well formed.
pub fn decode_with_separator(compact: &str, separator: char) -> Result<Board, FormatError> {
    let ranks: Vec<&str> = compact.trim().split(separator).collect();
    if ranks.len() != 8 {
        return Err(FormatError::RankCount(ranks.len()));
    }

    let mut squares: Squares = [[None; 8]; 8];
    for (rank, rank_str) in ranks.into_iter().enumerate() {
        let cells = expand_rank(rank_str)?;
        if cells.len() != 8 {
            return Err(FormatError::RankLength {
                rank,
                squares: cells.len(),
            });
        }
        for (file, cell) in cells.into_iter().enumerate() {
            squares[rank][file] = cell;
        }
    }
    Ok(Board::from_squares(squares))
}

fn expand_rank(rank_str: &str) -> Result<Vec<Option<Piece>>, FormatError> {
    let mut cells = Vec::with_capacity(8);
    for c in rank_str.chars() {
        match c {
            '1'..='8' => {
                let run = (c as u8 - b'0') as usize;
                cells.extend(std::iter::repeat(None).take(run));
            }
            _ => {
                let piece = Piece::from_char(c).map_err(|_| FormatError::UnexpectedChar(c))?;
                cells.push(Some(piece));
            }
        }
    }
    Ok(cells)
}

pub fn encode(board: &Board) -> String {
    encode_with_separator(board, RANK_SEPARATOR)
}

/// Inverse of [`decode_with_separator`]: maximal runs of empty squares are
/// written as their length.
pub fn encode_with_separator(board: &Board, separator: char) -> String {
    (0..8)
        .map(|rank| {
            board
                .rank(rank)
                .iter()
                .dedup_with_count()
                .map(|(count, cell)| match cell {
                    None => count.to_string(),
                    Some(piece) => piece.to_char().to_string().repeat(count),
                })
                .collect::<String>()
        })
        .join(&separator.to_string())
}
