use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content::ReportContent;
use crate::workflows::questionnaire::{
    AssessmentError, HealthStatus, QuestionBank, ScoreSummary, MAX_OPTION_SCORE,
};

/// Honorific chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Salutation {
    #[serde(rename = "Mr.", alias = "Mr")]
    Mr,
    #[serde(rename = "Mrs.", alias = "Mrs")]
    Mrs,
    #[serde(rename = "Miss.", alias = "Miss")]
    Miss,
}

impl Salutation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mr => "Mr.",
            Self::Mrs => "Mrs.",
            Self::Miss => "Miss.",
        }
    }
}

impl fmt::Display for Salutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Salutation {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().trim_end_matches('.').to_ascii_lowercase().as_str() {
            "mr" => Ok(Self::Mr),
            "mrs" => Ok(Self::Mrs),
            "miss" => Ok(Self::Miss),
            _ => Err(format!("unknown title '{value}' (expected Mr., Mrs. or Miss.)")),
        }
    }
}

/// Respondent identity supplied by registration. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub title: Salutation,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.title, self.name.trim())
    }
}

/// Clinical values entered separately from the questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementaryScores {
    #[serde(default)]
    pub bmi: Option<String>,
    #[serde(default, alias = "rst")]
    pub rbs: Option<String>,
    #[serde(default)]
    pub bp: Option<String>,
}

impl SupplementaryScores {
    pub fn new(bmi: Option<String>, rbs: Option<String>, bp: Option<String>) -> Self {
        Self { bmi, rbs, bp }
    }

    /// All three readings, or `None` if any is missing or blank.
    pub fn complete(&self) -> Option<SupplementaryReadings> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Some(SupplementaryReadings {
            bmi: present(&self.bmi)?,
            rbs: present(&self.rbs)?,
            bp: present(&self.bp)?,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementaryReadings {
    pub bmi: String,
    pub rbs: String,
    pub bp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionScore {
    pub title: String,
    pub score: u8,
}

/// Frozen report handed to every delivery channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportModel {
    pub user: UserProfile,
    pub summary: ScoreSummary,
    pub per_question_scores: Vec<QuestionScore>,
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplementary: Option<SupplementaryReadings>,
    pub generated_at: DateTime<Utc>,
}

impl ReportModel {
    pub fn content(&self) -> ReportContent {
        ReportContent::from_report(self)
    }

    pub fn scores(&self) -> Vec<u8> {
        self.per_question_scores
            .iter()
            .map(|entry| entry.score)
            .collect()
    }

    pub fn completion_payload(&self) -> CompletionPayload {
        CompletionPayload {
            name: self.user.name.clone(),
            email: self.user.email.clone(),
            title: self.user.title.label().to_string(),
            total_score: self.summary.total_score,
            percentage: self.summary.percentage,
            scores: self.scores(),
        }
    }
}

/// Body posted to the results backend once a questionnaire completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionPayload {
    pub name: String,
    pub email: String,
    pub title: String,
    pub total_score: u32,
    pub percentage: u8,
    pub scores: Vec<u8>,
}

/// Builds [`ReportModel`]s. Pure: no I/O, and the status tier is decided here only.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    bank: Arc<QuestionBank>,
}

impl ReportAssembler {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn assemble(
        &self,
        user: &UserProfile,
        summary: ScoreSummary,
        per_question_scores: &[u8],
        supplementary: Option<&SupplementaryScores>,
    ) -> Result<ReportModel, AssessmentError> {
        self.assemble_at(user, summary, per_question_scores, supplementary, Utc::now())
    }

    pub fn assemble_at(
        &self,
        user: &UserProfile,
        summary: ScoreSummary,
        per_question_scores: &[u8],
        supplementary: Option<&SupplementaryScores>,
        generated_at: DateTime<Utc>,
    ) -> Result<ReportModel, AssessmentError> {
        let expected = self.bank.count();
        if per_question_scores.len() != expected {
            return Err(AssessmentError::IncompleteAssessment {
                answered: per_question_scores.len(),
                expected,
            });
        }
        if summary.percentage > 100 {
            return Err(AssessmentError::out_of_range(
                "percentage",
                usize::from(summary.percentage),
                101,
            ));
        }
        if let Some((position, _)) = per_question_scores
            .iter()
            .enumerate()
            .find(|(_, score)| **score > MAX_OPTION_SCORE)
        {
            return Err(AssessmentError::out_of_range(
                "score",
                usize::from(per_question_scores[position]),
                usize::from(MAX_OPTION_SCORE) + 1,
            ));
        }

        let recomputed = ScoreSummary::from_scores(per_question_scores, expected);
        if recomputed != summary {
            return Err(AssessmentError::SummaryMismatch {
                detail: format!(
                    "expected {}/{} ({}%), got {}/{} ({}%)",
                    recomputed.total_score,
                    recomputed.max_score,
                    recomputed.percentage,
                    summary.total_score,
                    summary.max_score,
                    summary.percentage
                ),
            });
        }

        let per_question_scores = self
            .bank
            .questions()
            .iter()
            .zip(per_question_scores)
            .map(|(question, score)| QuestionScore {
                title: question.title.clone(),
                score: *score,
            })
            .collect();

        Ok(ReportModel {
            user: user.clone(),
            summary,
            per_question_scores,
            status: HealthStatus::classify(summary.percentage),
            supplementary: supplementary.and_then(SupplementaryScores::complete),
            generated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assembler() -> ReportAssembler {
        ReportAssembler::new(Arc::new(QuestionBank::standard()))
    }

    fn profile() -> UserProfile {
        UserProfile {
            title: Salutation::Mrs,
            name: "Nimali Perera".to_string(),
            phone: "0771234567".to_string(),
            email: "nimali@example.com".to_string(),
        }
    }

    fn assemble(scores: &[u8], supplementary: Option<&SupplementaryScores>) -> ReportModel {
        let summary = ScoreSummary::from_scores(scores, 4);
        let at = Utc.with_ymd_and_hms(2025, 10, 1, 9, 30, 0).unwrap();
        assembler()
            .assemble_at(&profile(), summary, scores, supplementary, at)
            .expect("report assembles")
    }

    #[test]
    fn rejects_incomplete_scores() {
        let scores = [100, 100];
        let error = assembler()
            .assemble(&profile(), ScoreSummary::from_scores(&scores, 4), &scores, None)
            .expect_err("two of four answers is incomplete");
        assert_eq!(
            error,
            AssessmentError::IncompleteAssessment {
                answered: 2,
                expected: 4
            }
        );
    }

    #[test]
    fn rejects_summary_that_disagrees_with_scores() {
        let scores = [100, 100, 100, 100];
        let forged = ScoreSummary {
            total_score: 300,
            max_score: 400,
            percentage: 75,
        };
        let error = assembler()
            .assemble(&profile(), forged, &scores, None)
            .expect_err("mismatch detected");
        assert!(matches!(error, AssessmentError::SummaryMismatch { .. }));
    }

    #[test]
    fn rejects_percentage_above_one_hundred() {
        let scores = [100, 100, 100, 100];
        let summary = ScoreSummary {
            total_score: 400,
            max_score: 400,
            percentage: 101,
        };
        assert!(matches!(
            assembler().assemble(&profile(), summary, &scores, None),
            Err(AssessmentError::OutOfRange { what: "percentage", .. })
        ));
    }

    #[test]
    fn freezes_status_and_aligns_titles() {
        let report = assemble(&[50, 50, 75, 100], None);
        assert_eq!(report.summary.total_score, 275);
        assert_eq!(report.summary.percentage, 69);
        assert_eq!(report.status, HealthStatus::Good);
        let titles: Vec<&str> = report
            .per_question_scores
            .iter()
            .map(|entry| entry.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Q1", "Q2", "Q3", "Q4"]);
    }

    #[test]
    fn partial_supplementary_scores_are_dropped() {
        let partial = SupplementaryScores::new(Some("22.4".into()), None, Some("120/80".into()));
        let report = assemble(&[100, 100, 100, 100], Some(&partial));
        assert!(report.supplementary.is_none());

        let blank = SupplementaryScores::new(Some("22.4".into()), Some("  ".into()), Some("120/80".into()));
        assert!(!blank.is_complete());
    }

    #[test]
    fn complete_supplementary_scores_are_trimmed_and_kept() {
        let full = SupplementaryScores::new(
            Some(" 22.4 ".into()),
            Some("98".into()),
            Some("120/80".into()),
        );
        let report = assemble(&[100, 100, 100, 100], Some(&full));
        assert_eq!(
            report.supplementary,
            Some(SupplementaryReadings {
                bmi: "22.4".to_string(),
                rbs: "98".to_string(),
                bp: "120/80".to_string(),
            })
        );
    }

    #[test]
    fn completion_payload_uses_camel_case() {
        let report = assemble(&[0, 50, 100, 100], None);
        let json = serde_json::to_value(report.completion_payload()).expect("json");
        assert_eq!(json["name"], "Nimali Perera");
        assert_eq!(json["title"], "Mrs.");
        assert_eq!(json["totalScore"], 250);
        assert_eq!(json["percentage"], 63);
        assert_eq!(json["scores"], serde_json::json!([0, 50, 100, 100]));
    }

    #[test]
    fn salutation_parses_with_or_without_dot() {
        assert_eq!("Mr.".parse::<Salutation>(), Ok(Salutation::Mr));
        assert_eq!("miss".parse::<Salutation>(), Ok(Salutation::Miss));
        assert!("Dr.".parse::<Salutation>().is_err());
        let json = serde_json::to_value(Salutation::Mrs).expect("json");
        assert_eq!(json, "Mrs.");
    }

    #[test]
    fn supplementary_accepts_rst_alias() {
        let scores: SupplementaryScores =
            serde_json::from_str(r#"{"bmi":"24","rst":"110","bp":"130/85"}"#).expect("parse");
        assert_eq!(scores.rbs.as_deref(), Some("110"));
        assert!(scores.is_complete());
    }
}
