//! Attack geometry over a static board.
//!
//! Every predicate answers "does some occurrence of `attacker` attack the
//! square of `defender`". The defender has to sit on exactly one square;
//! when it is missing or duplicated the answer is `false`, and it is up to
//! the legality rules to complain about the piece count.

use crate::board::Board;
use crate::types::{Color, ParseSymbolError, Piece, PieceType, Position};

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Runs `hits` for each square of `attacker` against the defender's square.
fn any_attacker<F>(board: &Board, attacker: Piece, defender: Piece, hits: F) -> bool
where
    F: Fn(Position, Position) -> bool,
{
    let Some(target) = board.unique_position(defender) else {
        return false;
    };
    board
        .positions_of(attacker)
        .into_iter()
        .any(|from| from != target && hits(from, target))
}

/// A line segment is open when only its two end points are occupied.
fn is_open<'a, I>(cells: I) -> bool
where
    I: IntoIterator<Item = &'a Option<Piece>>,
{
    cells.into_iter().filter(|cell| cell.is_some()).count() == 2
}

fn straight_line_open(board: &Board, from: Position, to: Position) -> bool {
    if from.rank == to.rank {
        let (lo, hi) = (from.file.min(to.file), from.file.max(to.file));
        is_open(&board.rank(from.rank as usize)[lo as usize..=hi as usize])
    } else if from.file == to.file {
        let (lo, hi) = (from.rank.min(to.rank), from.rank.max(to.rank));
        is_open(&board.file(from.file as usize)[lo as usize..=hi as usize])
    } else {
        false
    }
}

/// Squares on the diagonal of the bounding square of `from` and `to` that
/// passes through `from`. Empty when the bounding box is not square.
fn bounding_diagonal(from: Position, to: Position) -> Vec<Position> {
    let size = from.rank_distance(&to) + 1;
    if size != from.file_distance(&to) + 1 {
        return Vec::new();
    }
    let top = from.rank.min(to.rank);
    let left = from.file.min(to.file);
    // the main diagonal runs top-left to bottom-right; if `from` is not on
    // it the sub-grid is flipped vertically, which puts the anti-diagonal there
    let on_main = from.rank - top == from.file - left;
    (0..size)
        .map(|i| {
            let rank = if on_main { top + i } else { top + size - 1 - i };
            Position::new(rank, left + i)
        })
        .collect()
}

fn diagonal_open(board: &Board, from: Position, to: Position) -> bool {
    let diagonal = bounding_diagonal(from, to);
    if diagonal.is_empty() {
        return false;
    }
    let cells: Vec<Option<Piece>> = diagonal.into_iter().map(|p| board.piece_at(p)).collect();
    is_open(&cells)
}

pub fn king_attacks(board: &Board, attacker: Piece, defender: Piece) -> bool {
    any_attacker(board, attacker, defender, |from, to| {
        KING_OFFSETS
            .iter()
            .any(|&(dr, df)| to.offset(dr, df) == Some(from))
    })
}

pub fn rook_attacks(board: &Board, attacker: Piece, defender: Piece) -> bool {
    any_attacker(board, attacker, defender, |from, to| {
        straight_line_open(board, from, to)
    })
}

pub fn bishop_attacks(board: &Board, attacker: Piece, defender: Piece) -> bool {
    any_attacker(board, attacker, defender, |from, to| {
        diagonal_open(board, from, to)
    })
}

pub fn queen_attacks(board: &Board, attacker: Piece, defender: Piece) -> bool {
    rook_attacks(board, attacker, defender) || bishop_attacks(board, attacker, defender)
}

pub fn knight_attacks(board: &Board, attacker: Piece, defender: Piece) -> bool {
    any_attacker(board, attacker, defender, |from, to| {
        KNIGHT_OFFSETS
            .iter()
            .any(|&(dr, df)| from.offset(dr, df) == Some(to))
    })
}

/// Which way a pawn faces cannot be told from the board alone, so a pawn
/// attacks both diagonal neighbours, forwards and backwards.
pub fn pawn_attacks(board: &Board, attacker: Piece, defender: Piece) -> bool {
    any_attacker(board, attacker, defender, |from, to| {
        from.rank_distance(&to) == 1 && from.file_distance(&to) == 1
    })
}

/// Dispatch on the attacker's piece type.
pub fn attacks(board: &Board, attacker: Piece, defender: Piece) -> bool {
    match attacker.piece_type {
        PieceType::King => king_attacks(board, attacker, defender),
        PieceType::Rook => rook_attacks(board, attacker, defender),
        PieceType::Bishop => bishop_attacks(board, attacker, defender),
        PieceType::Queen => queen_attacks(board, attacker, defender),
        PieceType::Knight => knight_attacks(board, attacker, defender),
        PieceType::Pawn => pawn_attacks(board, attacker, defender),
    }
}

/// Same as [`attacks`], taking the two piece letters, e.g. `('R', 'k')`.
pub fn attacks_by_symbol(
    board: &Board,
    attacker: char,
    defender: char,
) -> Result<bool, ParseSymbolError> {
    Ok(attacks(
        board,
        Piece::from_char(attacker)?,
        Piece::from_char(defender)?,
    ))
}

/// Opponent piece types currently checking the king of `color`.
pub fn checkers(board: &Board, color: Color) -> Vec<PieceType> {
    let king = Piece::king(color);
    PieceType::CHECKERS
        .into_iter()
        .filter(|&piece_type| attacks(board, Piece::new(color.other_color(), piece_type), king))
        .collect()
}

pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    let king = Piece::king(color);
    PieceType::CHECKERS
        .iter()
        .any(|&piece_type| attacks(board, Piece::new(color.other_color(), piece_type), king))
}
