use serde::{Deserialize, Serialize};

use super::bank::MAX_OPTION_SCORE;

/// Totals derived from a sequence of recorded scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: u8,
}

impl ScoreSummary {
    /// Summarise `scores` against a bank of `question_count` questions.
    ///
    /// The maximum is fixed by the bank size, not by how many answers were
    /// recorded, so a partial run reports its share of the full questionnaire.
    pub fn from_scores(scores: &[u8], question_count: usize) -> Self {
        let total_score: u32 = scores.iter().map(|score| u32::from(*score)).sum();
        let max_score = u32::from(MAX_OPTION_SCORE) * question_count as u32;
        Self {
            total_score,
            max_score,
            percentage: rounded_percentage(total_score, max_score),
        }
    }
}

/// `round(100 * total / max)` with halves rounded up, clamped to `0..=100`.
pub(crate) fn rounded_percentage(total: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    let total = u64::from(total.min(max));
    let max = u64::from(max);
    let rounded = (200 * total + max) / (2 * max);
    rounded.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_halves_up() {
        assert_eq!(rounded_percentage(275, 400), 69);
        assert_eq!(rounded_percentage(2, 400), 1);
        assert_eq!(rounded_percentage(1, 400), 0);
        assert_eq!(rounded_percentage(1, 8), 13);
    }

    #[test]
    fn summary_covers_extremes() {
        assert_eq!(
            ScoreSummary::from_scores(&[100, 100, 100, 100], 4),
            ScoreSummary {
                total_score: 400,
                max_score: 400,
                percentage: 100
            }
        );
        assert_eq!(ScoreSummary::from_scores(&[0, 0, 0, 0], 4).percentage, 0);
    }

    #[test]
    fn partial_runs_measure_against_full_bank() {
        let summary = ScoreSummary::from_scores(&[100], 4);
        assert_eq!(summary.total_score, 100);
        assert_eq!(summary.max_score, 400);
        assert_eq!(summary.percentage, 25);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(ScoreSummary::from_scores(&[50], 1)).expect("json");
        assert_eq!(json["totalScore"], 50);
        assert_eq!(json["maxScore"], 100);
        assert_eq!(json["percentage"], 50);
    }
}
