use serde::{Deserialize, Serialize};

use super::error::AssessmentError;

/// Highest score a single option may award.
pub const MAX_OPTION_SCORE: u8 = 100;

/// One selectable answer. Position within the question is display order only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub score: u8,
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, score: u8) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub title: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn new(title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            prompt: prompt.into(),
            subtext: None,
            options: Vec::new(),
        }
    }

    pub fn with_subtext(mut self, subtext: impl Into<String>) -> Self {
        self.subtext = Some(subtext.into());
        self
    }

    pub fn with_option(mut self, label: impl Into<String>, score: u8) -> Self {
        self.options.push(AnswerOption::new(label, score));
        self
    }

    pub fn option_at(&self, index: usize) -> Result<&AnswerOption, AssessmentError> {
        self.options
            .get(index)
            .ok_or_else(|| AssessmentError::out_of_range("option", index, self.options.len()))
    }

    fn validate(&self, position: usize) -> Result<(), AssessmentError> {
        if self.title.trim().is_empty() {
            return Err(AssessmentError::InvalidQuestion(format!(
                "question {position} has an empty title"
            )));
        }
        if self.options.is_empty() {
            return Err(AssessmentError::InvalidQuestion(format!(
                "{} has no options",
                self.title
            )));
        }
        if let Some(option) = self
            .options
            .iter()
            .find(|option| option.score > MAX_OPTION_SCORE)
        {
            return Err(AssessmentError::InvalidQuestion(format!(
                "{} option '{}' scores {} (max {MAX_OPTION_SCORE})",
                self.title, option.label, option.score
            )));
        }
        Ok(())
    }
}

/// Ordered, validated, immutable list of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, AssessmentError> {
        if questions.is_empty() {
            return Err(AssessmentError::InvalidQuestion(
                "question bank is empty".to_string(),
            ));
        }
        for (position, question) in questions.iter().enumerate() {
            question.validate(position)?;
        }
        Ok(Self { questions })
    }

    /// The lifestyle questionnaire shown to every respondent.
    pub fn standard() -> Self {
        Self {
            questions: vec![
                Question::new("Q1", "How many liters of water do you drink daily?")
                    .with_option("Less than 500 ml", 0)
                    .with_option("1 liter", 50)
                    .with_option("2 liters", 100)
                    .with_option("More than 3 liters", 25),
                Question::new("Q2", "Days with 10,000+ steps this week?")
                    .with_option("0 days", 0)
                    .with_option("2 days", 50)
                    .with_option("3 days", 75)
                    .with_option("5+ days", 100),
                Question::new("Q3", "Days eating out this week?")
                    .with_subtext("(restaurant, takeout, packaged meals)")
                    .with_option("1 day", 100)
                    .with_option("3 days", 75)
                    .with_option("5 days", 50)
                    .with_option("7 days", 0),
                Question::new("Q4", "Your routine 1 hour before bedtime?")
                    .with_option("Reading/Relaxation", 100)
                    .with_option("Family time (no screens)", 100)
                    .with_option("Watching TV/mobile", 0),
            ],
        }
    }

    pub fn question_at(&self, index: usize) -> Result<&Question, AssessmentError> {
        self.questions
            .get(index)
            .ok_or_else(|| AssessmentError::out_of_range("question", index, self.questions.len()))
    }

    pub fn count(&self) -> usize {
        self.questions.len()
    }

    pub fn max_score(&self) -> u32 {
        u32::from(MAX_OPTION_SCORE) * self.questions.len() as u32
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::standard()
    }
}
