use serde::{Deserialize, Serialize};

use super::bank::{Question, QuestionBank};
use super::error::AssessmentError;
use super::scoring::ScoreSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    InProgress { question_index: usize },
    Completed,
}

/// Result of confirming the selected option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next { question_index: usize },
    Completed { scores: Vec<u8> },
}

/// One respondent's pass through a [`QuestionBank`].
///
/// While in progress `recorded_scores.len() == current_question_index`; once
/// completed it equals the bank size. The bank is passed to each operation so
/// the session itself stays a plain serializable value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireSession {
    current_question_index: usize,
    selected_option_index: Option<usize>,
    recorded_scores: Vec<u8>,
    completed: bool,
}

impl QuestionnaireSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.completed {
            SessionState::Completed
        } else {
            SessionState::InProgress {
                question_index: self.current_question_index,
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn selected_option_index(&self) -> Option<usize> {
        self.selected_option_index
    }

    pub fn recorded_scores(&self) -> &[u8] {
        &self.recorded_scores
    }

    /// The question awaiting an answer, or `None` once completed.
    pub fn current_question<'b>(&self, bank: &'b QuestionBank) -> Option<&'b Question> {
        if self.completed {
            None
        } else {
            bank.question_at(self.current_question_index).ok()
        }
    }

    pub fn select_option(
        &mut self,
        bank: &QuestionBank,
        option_index: usize,
    ) -> Result<(), AssessmentError> {
        if self.completed {
            return Err(AssessmentError::AlreadyCompleted);
        }
        let question = bank.question_at(self.current_question_index)?;
        question.option_at(option_index)?;
        self.selected_option_index = Some(option_index);
        Ok(())
    }

    pub fn confirm_and_advance(&mut self, bank: &QuestionBank) -> Result<Advance, AssessmentError> {
        if self.completed {
            return Err(AssessmentError::AlreadyCompleted);
        }
        let selected = self
            .selected_option_index
            .ok_or(AssessmentError::NoSelection {
                question: self.current_question_index,
            })?;
        let score = bank
            .question_at(self.current_question_index)?
            .option_at(selected)?
            .score;

        self.recorded_scores.push(score);

        if self.current_question_index + 1 < bank.count() {
            self.current_question_index += 1;
            self.selected_option_index = None;
            Ok(Advance::Next {
                question_index: self.current_question_index,
            })
        } else {
            self.completed = true;
            Ok(Advance::Completed {
                scores: self.recorded_scores.clone(),
            })
        }
    }

    pub fn total_score(&self) -> u32 {
        self.recorded_scores.iter().map(|score| u32::from(*score)).sum()
    }

    pub fn summary(&self, bank: &QuestionBank) -> ScoreSummary {
        ScoreSummary::from_scores(&self.recorded_scores, bank.count())
    }

    pub fn percentage(&self, bank: &QuestionBank) -> u8 {
        self.summary(bank).percentage
    }

    /// Start over from the first question ("retake questionnaire").
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_all(bank: &QuestionBank, choices: &[usize]) -> (QuestionnaireSession, Advance) {
        let mut session = QuestionnaireSession::new();
        let mut last = None;
        for choice in choices {
            session.select_option(bank, *choice).expect("valid option");
            last = Some(session.confirm_and_advance(bank).expect("confirm"));
        }
        (session, last.expect("at least one answer"))
    }

    #[test]
    fn confirm_without_selection_is_rejected() {
        let bank = QuestionBank::standard();
        let mut session = QuestionnaireSession::new();
        assert_eq!(
            session.confirm_and_advance(&bank),
            Err(AssessmentError::NoSelection { question: 0 })
        );
        assert!(session.recorded_scores().is_empty());
    }

    #[test]
    fn advancing_clears_selection_and_keeps_invariant() {
        let bank = QuestionBank::standard();
        let mut session = QuestionnaireSession::new();
        session.select_option(&bank, 1).expect("select");
        let advance = session.confirm_and_advance(&bank).expect("confirm");

        assert_eq!(advance, Advance::Next { question_index: 1 });
        assert_eq!(session.selected_option_index(), None);
        assert_eq!(session.recorded_scores(), &[50]);
        assert_eq!(
            session.recorded_scores().len(),
            session.current_question_index()
        );
        assert_eq!(session.state(), SessionState::InProgress { question_index: 1 });
    }

    #[test]
    fn selecting_out_of_range_option_fails_without_side_effects() {
        let bank = QuestionBank::standard();
        let mut session = QuestionnaireSession::new();
        session.select_option(&bank, 2).expect("select");
        let error = session
            .select_option(&bank, 4)
            .expect_err("only four options on Q1");
        assert_eq!(
            error,
            AssessmentError::OutOfRange {
                what: "option",
                index: 4,
                len: 4
            }
        );
        assert_eq!(session.selected_option_index(), Some(2));
    }

    #[test]
    fn reselecting_before_confirm_keeps_only_the_last_choice() {
        let bank = QuestionBank::standard();
        let mut session = QuestionnaireSession::new();
        session.select_option(&bank, 0).expect("select");
        session.select_option(&bank, 2).expect("reselect");
        session.confirm_and_advance(&bank).expect("confirm");
        assert_eq!(session.total_score(), 100);
    }

    #[test]
    fn final_confirmation_completes_the_session() {
        let bank = QuestionBank::standard();
        let (session, advance) = answer_all(&bank, &[1, 1, 1, 1]);

        assert_eq!(
            advance,
            Advance::Completed {
                scores: vec![50, 50, 75, 100]
            }
        );
        assert!(session.is_completed());
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.recorded_scores().len(), bank.count());
        assert!(session.current_question(&bank).is_none());
    }

    #[test]
    fn completed_session_rejects_further_actions() {
        let bank = QuestionBank::standard();
        let (mut session, _) = answer_all(&bank, &[0, 0, 0, 0]);
        assert_eq!(
            session.select_option(&bank, 0),
            Err(AssessmentError::AlreadyCompleted)
        );
        assert_eq!(
            session.confirm_and_advance(&bank),
            Err(AssessmentError::AlreadyCompleted)
        );
    }

    #[test]
    fn partial_totals_are_available_mid_session() {
        let bank = QuestionBank::standard();
        let mut session = QuestionnaireSession::new();
        session.select_option(&bank, 2).expect("select");
        session.confirm_and_advance(&bank).expect("confirm");
        session.select_option(&bank, 3).expect("select");
        session.confirm_and_advance(&bank).expect("confirm");

        assert_eq!(session.total_score(), 200);
        assert_eq!(session.percentage(&bank), 50);
    }

    #[test]
    fn reset_returns_to_first_question() {
        let bank = QuestionBank::standard();
        let (mut session, _) = answer_all(&bank, &[2, 3, 0, 0]);
        session.reset();
        assert_eq!(session, QuestionnaireSession::new());
        assert_eq!(
            session.current_question(&bank).map(|q| q.title.as_str()),
            Some("Q1")
        );
    }

    #[test]
    fn session_round_trips_through_json_checkpoint() {
        let bank = QuestionBank::standard();
        let mut session = QuestionnaireSession::new();
        session.select_option(&bank, 3).expect("select");
        session.confirm_and_advance(&bank).expect("confirm");

        let checkpoint = serde_json::to_string(&session).expect("serialize");
        let restored: QuestionnaireSession =
            serde_json::from_str(&checkpoint).expect("deserialize");
        assert_eq!(restored, session);
    }
}
