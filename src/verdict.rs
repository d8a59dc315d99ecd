use std::fmt;

use crate::attack::is_king_attacked;
use crate::board::Board;
use crate::legality::{check_legality, Violation};
use crate::notation::{self, FormatError};
use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KingStatus {
    Safe,
    UnderAttack,
}

impl KingStatus {
    fn of(board: &Board, color: Color) -> KingStatus {
        if is_king_attacked(board, color) {
            KingStatus::UnderAttack
        } else {
            KingStatus::Safe
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            KingStatus::Safe => "safe",
            KingStatus::UnderAttack => "under attack",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The first rule the position breaks.
    Illegal(Violation),
    Legal { white: KingStatus, black: KingStatus },
}

impl Verdict {
    pub fn is_legal(&self) -> bool {
        matches!(self, Verdict::Legal { .. })
    }

    pub fn violation(&self) -> Option<Violation> {
        match self {
            Verdict::Illegal(violation) => Some(*violation),
            Verdict::Legal { .. } => None,
        }
    }

    pub fn king_status(&self, color: Color) -> Option<KingStatus> {
        match (self, color) {
            (Verdict::Legal { white, .. }, Color::White) => Some(*white),
            (Verdict::Legal { black, .. }, Color::Black) => Some(*black),
            (Verdict::Illegal(_), _) => None,
        }
    }

    pub fn to_human(&self) -> String {
        match self {
            Verdict::Illegal(violation) => format!(
                "This is an illegal chess position. Reason is {}",
                violation.to_human()
            ),
            // simultaneous check is illegal, so at most one king is attacked here
            Verdict::Legal { white, black } => {
                let attacked = match (white, black) {
                    (KingStatus::UnderAttack, _) => Color::White,
                    (_, KingStatus::UnderAttack) => Color::Black,
                    _ => return "Both kings are safe.".to_string(),
                };
                format!(
                    "The {} king is {}.",
                    attacked.to_human(),
                    KingStatus::UnderAttack.to_human()
                )
            }
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_human())
    }
}

pub fn analyze(board: &Board) -> Verdict {
    match check_legality(board) {
        Err(violation) => Verdict::Illegal(violation),
        Ok(()) => Verdict::Legal {
            white: KingStatus::of(board, Color::White),
            black: KingStatus::of(board, Color::Black),
        },
    }
}

pub fn analyze_encoding(compact: &str) -> Result<Verdict, FormatError> {
    analyze_encoding_with_separator(compact, notation::RANK_SEPARATOR)
}

pub fn analyze_encoding_with_separator(
    compact: &str,
    separator: char,
) -> Result<Verdict, FormatError> {
    let board = notation::decode_with_separator(compact, separator)?;
    Ok(analyze(&board))
}
