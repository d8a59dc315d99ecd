//! Analysis of many positions at once.
//!
//! Boards share nothing, so each one is analysed on its own rayon task and
//! results come back in input order.

use std::collections::BTreeMap;
use std::fmt;

use rayon::prelude::*;

use crate::legality::Rule;
use crate::notation::{FormatError, RANK_SEPARATOR};
use crate::types::Color;
use crate::verdict::{analyze_encoding_with_separator, KingStatus, Verdict};

pub fn analyze_all<S>(encodings: &[S]) -> Vec<Result<Verdict, FormatError>>
where
    S: AsRef<str> + Sync,
{
    analyze_all_with_separator(encodings, RANK_SEPARATOR)
}

pub fn analyze_all_with_separator<S>(
    encodings: &[S],
    separator: char,
) -> Vec<Result<Verdict, FormatError>>
where
    S: AsRef<str> + Sync,
{
    encodings
        .par_iter()
        .map(|encoding| analyze_encoding_with_separator(encoding.as_ref(), separator))
        .collect()
}

/// Tally of outcomes over a batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub both_safe: usize,
    pub white_in_check: usize,
    pub black_in_check: usize,
    pub illegal: BTreeMap<Rule, usize>,
    pub malformed: usize,
}

impl Summary {
    pub fn from_results<'a, I>(results: I) -> Summary
    where
        I: IntoIterator<Item = &'a Result<Verdict, FormatError>>,
    {
        let mut summary = Summary::default();
        for result in results {
            summary.record(result);
        }
        summary
    }

    pub fn record(&mut self, result: &Result<Verdict, FormatError>) {
        match result {
            Err(_) => self.malformed += 1,
            Ok(Verdict::Illegal(violation)) => {
                *self.illegal.entry(violation.rule()).or_insert(0) += 1;
            }
            Ok(verdict) => {
                if verdict.king_status(Color::White) == Some(KingStatus::UnderAttack) {
                    self.white_in_check += 1;
                } else if verdict.king_status(Color::Black) == Some(KingStatus::UnderAttack) {
                    self.black_in_check += 1;
                } else {
                    self.both_safe += 1;
                }
            }
        }
    }

    pub fn legal(&self) -> usize {
        self.both_safe + self.white_in_check + self.black_in_check
    }

    pub fn total(&self) -> usize {
        self.legal() + self.illegal.values().sum::<usize>() + self.malformed
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "positions: {}", self.total())?;
        writeln!(f, "legal: {}", self.legal())?;
        writeln!(f, "  both kings safe: {}", self.both_safe)?;
        writeln!(f, "  white king under attack: {}", self.white_in_check)?;
        writeln!(f, "  black king under attack: {}", self.black_in_check)?;
        writeln!(f, "illegal: {}", self.illegal.values().sum::<usize>())?;
        for rule in Rule::ALL {
            let count = self.illegal.get(&rule).copied().unwrap_or(0);
            writeln!(f, "  {rule}: {count}")?;
        }
        write!(f, "malformed: {}", self.malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn results_keep_input_order() {
        let encodings = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "8/8/8/8/8/8/8/8",
            "8/8",
            "4k3/8/8/8/8/8/8/r3K3",
        ];
        let results = analyze_all(&encodings);
        assert_eq!(results.len(), 4);
        assert!(results[0].as_ref().is_ok_and(Verdict::is_legal));
        assert_eq!(
            results[1].as_ref().ok().and_then(Verdict::violation).map(|v| v.rule()),
            Some(Rule::KingCount)
        );
        assert_eq!(results[2], Err(FormatError::RankCount(2)));

        let summary = Summary::from_results(&results);
        assert_eq!(summary.both_safe, 1);
        assert_eq!(summary.white_in_check, 1);
        assert_eq!(summary.black_in_check, 0);
        assert_eq!(summary.illegal.get(&Rule::KingCount), Some(&1));
        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn owned_strings_and_separator() {
        let encodings = vec!["k7-8-8-8-8-8-8-7K".to_string()];
        let results = analyze_all_with_separator(&encodings, '-');
        assert_eq!(
            results,
            vec![Ok(Verdict::Legal {
                white: KingStatus::Safe,
                black: KingStatus::Safe
            })]
        );
    }

    #[test]
    fn summary_lists_every_rule() {
        let summary = Summary::default();
        let text = summary.to_string();
        for rule in Rule::ALL {
            assert!(text.contains(&rule.to_string()), "{text}");
        }
    }
}
