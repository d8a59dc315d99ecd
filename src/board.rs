use std::fmt;

use crate::notation::{self, FormatError};
use crate::types::{Piece, Position};

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub type Squares = [[Option<Piece>; 8]; 8];

/// An immutable 8x8 snapshot. Row 0 is the first rank of the encoding and
/// column 0 its first file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: Squares,
}

impl Board {
    pub fn new() -> Board {
        Board::from_fen(STARTING_POSITION_FEN).expect("starting position is well formed")
    }

    pub fn from_squares(squares: Squares) -> Board {
        Board { squares }
    }

    /// Decode the piece placement of a FEN record. Anything after the first
    /// field (side to move, castling, clocks) is ignored.
    pub fn from_fen(fen_string: &str) -> Result<Board, FormatError> {
        let placement = fen_string.split_whitespace().next().unwrap_or("");
        notation::decode(placement)
    }

    pub fn to_fen(&self) -> String {
        notation::encode(self)
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.rank as usize][pos.file as usize]
    }

    /// Every square holding `piece`, in row-major order.
    pub fn positions_of(&self, piece: Piece) -> Vec<Position> {
        self.squares
            .iter()
            .enumerate()
            .flat_map(|(rank, row)| {
                row.iter()
                    .enumerate()
                    .filter(move |(_, cell)| **cell == Some(piece))
                    .map(move |(file, _)| Position::new(rank as u8, file as u8))
            })
            .collect()
    }

    /// The square holding `piece` if it is the only one; `None` when the
    /// piece is missing or appears more than once.
    pub fn unique_position(&self, piece: Piece) -> Option<Position> {
        match self.positions_of(piece).as_slice() {
            [pos] => Some(*pos),
            _ => None,
        }
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|cell| **cell == Some(piece))
            .count()
    }

    /// Row `i` of the grid, in encoding order. Panics unless `i < 8`.
    pub fn rank(&self, i: usize) -> &[Option<Piece>; 8] {
        &self.squares[i]
    }

    /// Column `j` of the grid, top to bottom. Panics unless `j < 8`.
    pub fn file(&self, j: usize) -> [Option<Piece>; 8] {
        self.squares.map(|row| row[j])
    }

    pub fn draw_board(&self) -> String {
        let mut string = String::new();

        for row in self.squares.iter() {
            for cell in row {
                string = format!(
                    "{} {}",
                    string,
                    match cell {
                        Some(p) => p.to_symbol(),
                        None => ".",
                    }
                );
            }
            string = format!("{}\n", string);
        }
        string
    }

    pub fn draw_to_terminal(&self) {
        println!("{}", self.draw_board());
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// Dense text form: one line per rank, `.` for an empty square.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.squares.iter() {
            for cell in row {
                match cell {
                    Some(p) => write!(f, "{}", p.to_char())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceType};
    use pretty_assertions::assert_eq;

    #[test]
    fn build_starting_board() {
        let b = Board::new();

        let all: usize = Color::ALL
            .iter()
            .flat_map(|c| PieceType::ALL.iter().map(move |t| Piece::new(*c, *t)))
            .map(|p| b.count(p))
            .sum();
        assert_eq!(all, 8 * 4);

        for color in Color::ALL {
            assert_eq!(b.count(Piece::new(color, PieceType::Pawn)), 8);
            for pt in [PieceType::Rook, PieceType::Bishop, PieceType::Knight] {
                assert_eq!(b.count(Piece::new(color, pt)), 2);
            }
            for pt in [PieceType::King, PieceType::Queen] {
                assert_eq!(b.count(Piece::new(color, pt)), 1);
            }
        }

        assert_eq!(
            b.unique_position(Piece::king(Color::Black)),
            Some(Position::new(0, 4))
        );
        assert_eq!(
            b.unique_position(Piece::king(Color::White)),
            Some(Position::new(7, 4))
        );
    }

    #[test]
    fn from_fen_ignores_trailing_fields() {
        assert_eq!(
            Board::from_fen(STARTING_POSITION_FEN).unwrap(),
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").unwrap()
        );
        assert_eq!(
            Board::new().to_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn positions_are_row_major() {
        let b = Board::new();
        let white_rook = Piece::new(Color::White, PieceType::Rook);
        assert_eq!(
            b.positions_of(white_rook),
            vec![Position::new(7, 0), Position::new(7, 7)]
        );

        let black_pawn = Piece::new(Color::Black, PieceType::Pawn);
        let pawns = b.positions_of(black_pawn);
        assert_eq!(pawns.len(), b.count(black_pawn));
        assert!(pawns.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn positions_of_missing_piece_is_empty() {
        let b = Board::from_fen("8/8/8/8/8/8/8/8").unwrap();
        assert!(b.positions_of(Piece::king(Color::White)).is_empty());
        assert_eq!(b.unique_position(Piece::king(Color::White)), None);
    }

    #[test]
    fn unique_position_rejects_duplicates() {
        let b = Board::from_fen("K6K/8/8/8/8/8/8/8").unwrap();
        assert_eq!(b.positions_of(Piece::king(Color::White)).len(), 2);
        assert_eq!(b.unique_position(Piece::king(Color::White)), None);
    }

    #[test]
    fn rank_and_file_slices() {
        let b = Board::from_fen("8/8/8/3r4/8/8/8/3K4").unwrap();
        let rook = Some(Piece::new(Color::Black, PieceType::Rook));
        let king = Some(Piece::king(Color::White));

        assert_eq!(b.rank(3), &[None, None, None, rook, None, None, None, None]);
        assert_eq!(
            b.file(3),
            [None, None, None, rook, None, None, None, king]
        );
    }

    #[test]
    #[should_panic]
    fn rank_out_of_range() {
        Board::new().rank(8);
    }

    #[test]
    #[should_panic]
    fn file_out_of_range() {
        Board::new().file(8);
    }

    #[test]
    fn display_dense_grid() {
        let b = Board::from_fen("k7/8/8/8/8/8/8/7K").unwrap();
        assert_eq!(
            b.to_string(),
            "k.......\n........\n........\n........\n........\n........\n........\n.......K\n"
        );
    }
}
