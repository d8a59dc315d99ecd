//! Structural legality of a position.
//!
//! The rules run in a fixed order and the first one to fail is reported.
//! None of them know whose move it is.

use std::fmt;

use crate::attack::{is_king_attacked, king_attacks};
use crate::board::Board;
use crate::types::{Color, Piece, PieceType};

/// Upper bounds per color, allowing for every pawn having promoted.
/// Checked in this order.
pub const MATERIAL_CAPS: [(PieceType, usize); 5] = [
    (PieceType::Queen, 9),
    (PieceType::Bishop, 10),
    (PieceType::Knight, 10),
    (PieceType::Rook, 10),
    (PieceType::Pawn, 8),
];

pub const BACK_RANKS: [usize; 2] = [0, 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rule {
    KingCount,
    MaterialCap,
    BackRankPawn,
    KingsAdjacent,
    SimultaneousCheck,
}

impl Rule {
    /// Rules in evaluation order.
    pub const ALL: [Rule; 5] = [
        Rule::KingCount,
        Rule::MaterialCap,
        Rule::BackRankPawn,
        Rule::KingsAdjacent,
        Rule::SimultaneousCheck,
    ];

    /// 1-based position in the evaluation order.
    pub fn number(&self) -> u8 {
        match self {
            Rule::KingCount => 1,
            Rule::MaterialCap => 2,
            Rule::BackRankPawn => 3,
            Rule::KingsAdjacent => 4,
            Rule::SimultaneousCheck => 5,
        }
    }

    pub fn check(&self, board: &Board) -> Result<(), Violation> {
        match self {
            Rule::KingCount => check_king_count(board),
            Rule::MaterialCap => check_material_caps(board),
            Rule::BackRankPawn => check_back_rank_pawns(board),
            Rule::KingsAdjacent => check_kings_apart(board),
            Rule::SimultaneousCheck => check_not_both_in_check(board),
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Rule::KingCount => "king count",
            Rule::MaterialCap => "material cap",
            Rule::BackRankPawn => "back rank pawn",
            Rule::KingsAdjacent => "kings adjacent",
            Rule::SimultaneousCheck => "simultaneous check",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {} ({})", self.number(), self.to_human())
    }
}

/// Why a position is illegal. Each variant belongs to exactly one [`Rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    MissingKing,
    ExtraKing,
    TooMany { piece_type: PieceType, cap: usize },
    PawnOnBackRank,
    KingsAdjacent,
    SimultaneousCheck,
}

impl Violation {
    pub fn rule(&self) -> Rule {
        match self {
            Violation::MissingKing | Violation::ExtraKing => Rule::KingCount,
            Violation::TooMany { .. } => Rule::MaterialCap,
            Violation::PawnOnBackRank => Rule::BackRankPawn,
            Violation::KingsAdjacent => Rule::KingsAdjacent,
            Violation::SimultaneousCheck => Rule::SimultaneousCheck,
        }
    }

    pub fn to_human(&self) -> String {
        match self {
            Violation::MissingKing => {
                "either white king, black king, or both are missing.".to_string()
            }
            Violation::ExtraKing => {
                "either white king, black king, or both are more than 1.".to_string()
            }
            Violation::TooMany { piece_type, cap } => {
                let name = piece_type.to_human();
                format!("either white {name}, black {name}, or both are more than {cap}.")
            }
            Violation::PawnOnBackRank => {
                "either white pawn, black pawn, or both are in the first row and/or the last row."
                    .to_string()
            }
            Violation::KingsAdjacent => "the king checks the other the king.".to_string(),
            Violation::SimultaneousCheck => {
                "white king and black king are under attack simultaneously.".to_string()
            }
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_human())
    }
}

fn check_king_count(board: &Board) -> Result<(), Violation> {
    let counts = Color::ALL.map(|color| board.count(Piece::king(color)));
    if counts.contains(&0) {
        Err(Violation::MissingKing)
    } else if counts.iter().any(|&n| n > 1) {
        Err(Violation::ExtraKing)
    } else {
        Ok(())
    }
}

fn check_material_caps(board: &Board) -> Result<(), Violation> {
    for (piece_type, cap) in MATERIAL_CAPS {
        let over = Color::ALL
            .iter()
            .any(|&color| board.count(Piece::new(color, piece_type)) > cap);
        if over {
            return Err(Violation::TooMany { piece_type, cap });
        }
    }
    Ok(())
}

fn check_back_rank_pawns(board: &Board) -> Result<(), Violation> {
    let pawn_on_back_rank = BACK_RANKS.iter().any(|&rank| {
        board
            .rank(rank)
            .iter()
            .flatten()
            .any(|piece| piece.piece_type == PieceType::Pawn)
    });
    if pawn_on_back_rank {
        Err(Violation::PawnOnBackRank)
    } else {
        Ok(())
    }
}

fn check_kings_apart(board: &Board) -> Result<(), Violation> {
    let white = Piece::king(Color::White);
    let black = Piece::king(Color::Black);
    if king_attacks(board, black, white) || king_attacks(board, white, black) {
        Err(Violation::KingsAdjacent)
    } else {
        Ok(())
    }
}

fn check_not_both_in_check(board: &Board) -> Result<(), Violation> {
    if Color::ALL
        .iter()
        .all(|&color| is_king_attacked(board, color))
    {
        Err(Violation::SimultaneousCheck)
    } else {
        Ok(())
    }
}

/// Run every rule in order, stopping at the first violation.
pub fn check_legality(board: &Board) -> Result<(), Violation> {
    Rule::ALL.iter().try_for_each(|rule| rule.check(board))
}

pub fn is_legal(board: &Board) -> bool {
    check_legality(board).is_ok()
}
