use serde::Serialize;

use super::model::ReportModel;

/// Channel-neutral lines derived from a [`ReportModel`].
///
/// Renderers only arrange these lines; none of them recompute scores or tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportContent {
    pub display_name: String,
    pub question_lines: Vec<String>,
    pub total_line: String,
    pub percentage: u8,
    pub status_label: &'static str,
    pub status_message: &'static str,
    pub status_range: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplementary_lines: Option<Vec<String>>,
}

impl ReportContent {
    pub(crate) fn from_report(report: &ReportModel) -> Self {
        let question_lines = report
            .per_question_scores
            .iter()
            .map(|entry| format!("{}: {}", entry.title, entry.score))
            .collect();

        let supplementary_lines = report.supplementary.as_ref().map(|readings| {
            vec![
                format!("BMI: {}", readings.bmi),
                format!("RBS: {}", readings.rbs),
                format!("BP: {}", readings.bp),
            ]
        });

        Self {
            display_name: report.user.display_name(),
            question_lines,
            total_line: format!(
                "{}/{}",
                report.summary.total_score, report.summary.max_score
            ),
            percentage: report.summary.percentage,
            status_label: report.status.label(),
            status_message: report.status.message(),
            status_range: report.status.range_label(),
            supplementary_lines,
        }
    }

    pub fn questions_answered(&self) -> usize {
        self.question_lines.len()
    }
}
