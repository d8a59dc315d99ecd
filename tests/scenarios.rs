//! End-to-end verdicts on hand-built positions
//!
//! Run with: cargo test --test scenarios

use chess_legality::board::Board;
use chess_legality::legality::{Rule, Violation};
use chess_legality::notation::{decode, encode};
use chess_legality::types::{Color, Piece, PieceType};
use chess_legality::verdict::{analyze_encoding, KingStatus, Verdict};
use pretty_assertions::assert_eq;

fn verdict(encoding: &str) -> Verdict {
    analyze_encoding(encoding).expect("encoding should decode")
}

#[test]
fn starting_position_is_legal_and_quiet() {
    assert_eq!(
        verdict("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
        Verdict::Legal {
            white: KingStatus::Safe,
            black: KingStatus::Safe
        }
    );
}

#[test]
fn empty_board_has_no_kings() {
    let v = verdict("8/8/8/8/8/8/8/8");
    assert_eq!(v, Verdict::Illegal(Violation::MissingKing));
    assert_eq!(v.violation().map(|v| v.rule().number()), Some(1));
}

#[test]
fn touching_kings() {
    let v = verdict("8/8/8/8/3Kk3/8/8/8");
    assert_eq!(v.violation().map(|v| v.rule()), Some(Rule::KingsAdjacent));
    assert_eq!(v.violation().map(|v| v.rule().number()), Some(4));
}

#[test]
fn rook_on_open_file_checks() {
    // . . . . ♚ . . .
    // . . . . . . . .
    // . . . . . . . .
    // . . . . . . . .
    // . . . . ♖ . . .
    // . . . . . . . .
    // . . . . . . . .
    // ♔ . . . . . . .
    let v = verdict("4k3/8/8/8/4R3/8/8/K7");
    assert_eq!(
        v,
        Verdict::Legal {
            white: KingStatus::Safe,
            black: KingStatus::UnderAttack
        }
    );
    assert_eq!(v.to_string(), "The black king is under attack.");
}

#[test]
fn pawn_between_rook_and_king_blocks() {
    let v = verdict("4k3/8/4p3/8/4R3/8/8/K7");
    assert_eq!(
        v,
        Verdict::Legal {
            white: KingStatus::Safe,
            black: KingStatus::Safe
        }
    );
    assert_eq!(v.to_string(), "Both kings are safe.");
}

#[test]
fn king_count_is_reported_before_simultaneous_check() {
    // two kings a side; every king sits on an open line with an enemy rook
    let v = verdict("k2R3k/8/8/8/8/8/8/K2r3K");
    assert_eq!(v, Verdict::Illegal(Violation::ExtraKing));
}

#[test]
fn simultaneous_check_is_rule_five() {
    let v = verdict("4k3/8/8/8/4R3/8/8/r3K3");
    assert_eq!(v.violation().map(|v| v.rule().number()), Some(5));
}

#[test]
fn encode_inverts_decode() {
    for encoding in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        "r3k2r/p1ppqpb1/Bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPB1PPP/R3K2R",
        "1b1B1Qr1/7p/6r1/2P5/4Rk2/1K6/4B3/8",
        "8/8/8/8/8/8/8/8",
    ] {
        let board = decode(encoding).unwrap();
        assert_eq!(encode(&board), encoding);
        assert_eq!(decode(&encode(&board)).unwrap(), board);
    }
}

#[test]
fn positions_match_symbol_counts() {
    let encoding = "r3k2r/p1ppqpb1/Bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPB1PPP/R3K2R";
    let board = Board::from_fen(encoding).unwrap();
    for color in Color::ALL {
        for piece_type in PieceType::ALL {
            let piece = Piece::new(color, piece_type);
            let positions = board.positions_of(piece);
            let in_encoding = encoding.chars().filter(|&c| c == piece.to_char()).count();
            assert_eq!(positions.len(), in_encoding, "{piece}");
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
