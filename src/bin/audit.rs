//! Position auditor - decide whether boards are legal and which king is attacked
//!
//! Usage: cargo run --release --bin audit -- \
//!          rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR \
//!          ./dataset/test/1b1B1Qr1-7p-6r1-2P5-4Rk2-1K6-4B3-8.jpeg \
//!          --summary
//!
//! Arguments that look like file names (they contain a `.`) are treated as
//! dataset images: directory and extension are dropped and the ranks are
//! split on `-`.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chess_legality::attack::{attacks, checkers};
use chess_legality::board::Board;
use chess_legality::batch::{analyze_all_with_separator, Summary};
use chess_legality::notation::{decode_with_separator, DATASET_SEPARATOR};
use chess_legality::types::{Color, Piece};
use clap::Parser;
use color_eyre::eyre::{bail, WrapErr};
use itertools::Itertools;

#[derive(Parser, Debug)]
#[command(name = "audit")]
#[command(about = "Check chess positions for structural legality and checks")]
struct Args {
    /// Compact board encodings, or dataset image paths
    positions: Vec<String>,

    /// Read more encodings from a file, one per line (`-` for stdin)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Rank separator used by the encodings
    #[arg(short, long, default_value_t = '/')]
    separator: char,

    /// Answer a single attack query instead, e.g. `Rk` (white rook on black king)
    #[arg(short, long)]
    attack: Option<String>,

    /// Print each board, and any pieces giving check, before its verdict
    #[arg(short, long)]
    draw: bool,

    /// Print counts per outcome at the end
    #[arg(long, conflicts_with = "attack")]
    summary: bool,
}

fn read_lines(path: &Path) -> color_eyre::Result<Vec<String>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .wrap_err("failed to read positions from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read positions from {}", path.display()))?
    };
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Dataset images are named after their position, e.g.
/// `1b1B1Qr1-7p-6r1-2P5-4Rk2-1K6-4B3-8.jpeg`.
fn normalize(position: &str, separator: char) -> String {
    if !position.contains('.') {
        return position.to_string();
    }
    let file_name = position.rsplit(['/', '\\']).next().unwrap_or(position);
    let stem = file_name.split('.').next().unwrap_or(file_name);
    stem.replace(DATASET_SEPARATOR, &separator.to_string())
}

fn parse_attack(query: &str) -> color_eyre::Result<(Piece, Piece)> {
    let mut chars = query.chars();
    let (Some(attacker), Some(defender), None) = (chars.next(), chars.next(), chars.next())
    else {
        bail!("attack query must be two piece letters, like `Rk`, got `{query}`");
    };
    let attacker = Piece::from_char(attacker).wrap_err("bad attacker")?;
    let defender = Piece::from_char(defender).wrap_err("bad defender")?;
    Ok((attacker, defender))
}

/// One line per king in check, naming the piece types giving it.
fn describe_checks(board: &Board) -> Vec<String> {
    Color::ALL
        .into_iter()
        .filter_map(|color| {
            let by = checkers(board, color);
            if by.is_empty() {
                return None;
            }
            Some(format!(
                "{} king checked by {} {}",
                color.to_human(),
                color.other_color().to_human(),
                by.iter().map(|piece_type| piece_type.to_human()).join(", ")
            ))
        })
        .collect()
}

fn draw(board: &Board) {
    board.draw_to_terminal();
    for line in describe_checks(board) {
        println!("{line}");
    }
}

fn ensure_decoded(malformed: usize, total: usize) -> color_eyre::Result<()> {
    if malformed > 0 {
        bail!("{malformed} of {total} positions could not be decoded");
    }
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut positions = args.positions.clone();
    if let Some(path) = &args.file {
        positions.extend(read_lines(path)?);
    }
    if positions.is_empty() {
        bail!("no positions given, pass encodings as arguments or use --file");
    }
    let encodings: Vec<String> = positions
        .iter()
        .map(|p| normalize(p, args.separator))
        .collect();

    let query = args.attack.as_deref().map(parse_attack).transpose()?;

    let mut malformed = 0;
    if let Some((attacker, defender)) = query {
        for (position, encoding) in positions.iter().zip(&encodings) {
            match decode_with_separator(encoding, args.separator) {
                Ok(board) => {
                    if args.draw {
                        draw(&board);
                    }
                    println!("{position}: {}", attacks(&board, attacker, defender));
                }
                Err(err) => {
                    eprintln!("{position}: error: {err}");
                    malformed += 1;
                }
            }
        }
    } else {
        let results = analyze_all_with_separator(&encodings, args.separator);
        for ((position, encoding), result) in positions.iter().zip(&encodings).zip(&results) {
            match result {
                Ok(verdict) => {
                    if args.draw {
                        if let Ok(board) = decode_with_separator(encoding, args.separator) {
                            draw(&board);
                        }
                    }
                    println!("{position}: {verdict}");
                }
                Err(err) => {
                    eprintln!("{position}: error: {err}");
                    malformed += 1;
                }
            }
        }
        if args.summary {
            println!();
            println!("{}", Summary::from_results(&results));
        }
    }

    ensure_decoded(malformed, positions.len())
}
