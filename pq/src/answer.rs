//! Answer checking
//!
//! Answers are compared case-insensitively. By default only leading
//! whitespace of the submitted answer is ignored: `"  paris"` matches
//! `"Paris"` but `"paris "` does not.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of checking one answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    /// Not attempted or not checked yet
    #[default]
    Unknown,
    Correct,
    Incorrect,
}

impl Validity {
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }

    /// Single-character marker for compact displays
    pub fn icon(self) -> &'static str {
        match self {
            Self::Unknown => "·",
            Self::Correct => "✓",
            Self::Incorrect => "✗",
        }
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Correct => write!(f, "correct"),
            Self::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// Which whitespace is ignored when comparing answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimMode {
    /// Strip leading whitespace of the submitted answer only
    #[default]
    Leading,
    /// Strip surrounding whitespace of both answers
    Both,
}

/// Check a submitted answer with the default trim mode
pub fn check_answer(submitted: Option<&str>, expected: &str) -> Validity {
    check_answer_with(submitted, expected, TrimMode::Leading)
}

/// Check a submitted answer against the expected one
///
/// A missing or empty submission yields [`Validity::Unknown`].
pub fn check_answer_with(submitted: Option<&str>, expected: &str, mode: TrimMode) -> Validity {
    debug!(?submitted, %expected, ?mode, "check_answer_with: called");
    let Some(given) = submitted.filter(|s| !s.is_empty()) else {
        return Validity::Unknown;
    };

    let given = given.to_lowercase();
    let expected = expected.to_lowercase();
    let matched = match mode {
        TrimMode::Leading => given.trim_start() == expected,
        TrimMode::Both => given.trim() == expected.trim(),
    };

    if matched { Validity::Correct } else { Validity::Incorrect }
}

/// Check a list of (submitted, expected) pairs
pub fn check_all<'a, I>(pairs: I, mode: TrimMode) -> Vec<Validity>
where
    I: IntoIterator<Item = (Option<&'a str>, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(submitted, expected)| check_answer_with(submitted, expected, mode))
        .collect()
}

/// Tally of a checked quiz
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
    pub total: usize,
}

impl Score {
    pub fn from_results(results: &[Validity]) -> Self {
        results.iter().fold(
            Self {
                total: results.len(),
                ..Self::default()
            },
            |mut score, v| {
                match v {
                    Validity::Correct => score.correct += 1,
                    Validity::Incorrect => score.incorrect += 1,
                    Validity::Unknown => score.unanswered += 1,
                }
                score
            },
        )
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} correct", self.correct, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(check_answer(Some("Paris"), "paris"), Validity::Correct);
        assert_eq!(check_answer(Some("PARIS"), "Paris"), Validity::Correct);
    }

    #[test]
    fn test_leading_whitespace_ignored() {
        assert_eq!(check_answer(Some("  paris"), "paris"), Validity::Correct);
        assert_eq!(check_answer(Some("\tparis"), "paris"), Validity::Correct);
    }

    #[test]
    fn test_trailing_whitespace_not_ignored() {
        assert_eq!(check_answer(Some("paris "), "paris"), Validity::Incorrect);
    }

    #[test]
    fn test_expected_side_is_not_trimmed() {
        assert_eq!(check_answer(Some("paris"), " paris"), Validity::Incorrect);
    }

    #[test]
    fn test_empty_or_missing_is_unknown() {
        assert_eq!(check_answer(Some(""), "paris"), Validity::Unknown);
        assert_eq!(check_answer(None, "paris"), Validity::Unknown);
    }

    #[test]
    fn test_whitespace_only_is_attempted() {
        assert_eq!(check_answer(Some("   "), "paris"), Validity::Incorrect);
    }

    #[test]
    fn test_wrong_answer() {
        assert_eq!(check_answer(Some("london"), "paris"), Validity::Incorrect);
    }

    #[test]
    fn test_trim_both_mode() {
        assert_eq!(check_answer_with(Some("paris "), "paris", TrimMode::Both), Validity::Correct);
        assert_eq!(check_answer_with(Some(" paris "), " Paris ", TrimMode::Both), Validity::Correct);
        assert_eq!(check_answer_with(Some(""), "paris", TrimMode::Both), Validity::Unknown);
    }

    #[test]
    fn test_check_all_and_score() {
        let results = check_all(
            vec![(Some("17"), "17"), (None, "Italy"), (Some("germany"), "Italy")],
            TrimMode::Leading,
        );
        assert_eq!(results, vec![Validity::Correct, Validity::Unknown, Validity::Incorrect]);

        let score = Score::from_results(&results);
        assert_eq!(
            score,
            Score {
                correct: 1,
                incorrect: 1,
                unanswered: 1,
                total: 3
            }
        );
        assert_eq!(score.to_string(), "1/3 correct");
    }

    #[test]
    fn test_validity_display() {
        assert_eq!(Validity::Unknown.to_string(), "unknown");
        assert_eq!(Validity::Correct.icon(), "✓");
        assert!(!Validity::Unknown.is_known());
        assert!(Validity::Incorrect.is_known());
    }
}
