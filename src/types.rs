use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Piece letters carry their color in the case: uppercase is white.
    pub fn from_case(c: char) -> Option<Color> {
        if c.is_ascii_uppercase() {
            Some(Color::White)
        } else if c.is_ascii_lowercase() {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn other_color(&self) -> Color {
        if *self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Piece types that can give check through the attack predicates.
    /// The king is left out; two kings touching is its own rule.
    pub const CHECKERS: [PieceType; 5] = [
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::Pawn,
    ];

    pub fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'r' => Some(PieceType::Rook),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Rook => "rook",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Rook => 'R',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseSymbolError(pub char);

impl fmt::Display for ParseSymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` is not a piece symbol, expected one of KQRBNPkqrbnp",
            self.0
        )
    }
}

impl Error for ParseSymbolError {}

/// One of the twelve piece symbols. An empty square is `None` wherever a
/// cell is stored, so there is exactly one way to spell "nothing here".
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Piece {
    pub color: Color,
    pub piece_type: PieceType,
}

impl Piece {
    pub const fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece { color, piece_type }
    }

    pub fn from_char(c: char) -> Result<Piece, ParseSymbolError> {
        let color = Color::from_case(c).ok_or(ParseSymbolError(c))?;
        let piece_type = PieceType::from_char(c).ok_or(ParseSymbolError(c))?;
        Ok(Piece { color, piece_type })
    }

    pub fn to_char(&self) -> char {
        let c = self.piece_type.to_char();
        if self.color == Color::White {
            c
        } else {
            c.to_ascii_lowercase()
        }
    }

    pub fn king(color: Color) -> Piece {
        Piece::new(color, PieceType::King)
    }

    pub fn to_symbol(&self) -> &str {
        let is_white = self.color == Color::White;
        match self.piece_type {
            PieceType::Pawn => {
                if is_white {
                    "♙"
                } else {
                    "♟︎"
                }
            }
            PieceType::Rook => {
                if is_white {
                    "♖"
                } else {
                    "♜"
                }
            }
            PieceType::Knight => {
                if is_white {
                    "♘"
                } else {
                    "♞"
                }
            }
            PieceType::Bishop => {
                if is_white {
                    "♗"
                } else {
                    "♝"
                }
            }
            PieceType::Queen => {
                if is_white {
                    "♕"
                } else {
                    "♛"
                }
            }
            PieceType::King => {
                if is_white {
                    "♔"
                } else {
                    "♚"
                }
            }
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A square on the board, both coordinates 0-indexed.
///
/// `rank` is the row in the order the encoding lists them (0 is the first
/// segment, i.e. rank 8 in algebraic terms), `file` is the column (0 is `a`).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Position {
    pub rank: u8,
    pub file: u8,
}

impl Position {
    pub const fn new(rank: u8, file: u8) -> Position {
        Position { rank, file }
    }

    pub fn to_algebraic(&self) -> String {
        format!(
            "{}{}",
            (self.file + b'a') as char,
            (b'8' - self.rank) as char
        )
    }

    /// Move by a signed offset, `None` if that walks off the board.
    pub fn offset(&self, d_rank: i8, d_file: i8) -> Option<Position> {
        let rank = self.rank.checked_add_signed(d_rank)?;
        let file = self.file.checked_add_signed(d_file)?;
        if rank < 8 && file < 8 {
            Some(Position { rank, file })
        } else {
            None
        }
    }

    pub fn rank_distance(&self, other: &Position) -> u8 {
        self.rank.abs_diff(other.rank)
    }

    pub fn file_distance(&self, other: &Position) -> u8 {
        self.file.abs_diff(other.file)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
