/// Failures raised by the question bank, the scoring session, and report assembly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("{what} index {index} is outside 0..{len}")]
    OutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    #[error("no option selected for question {question}")]
    NoSelection { question: usize },
    #[error("assessment incomplete: {answered} of {expected} questions answered")]
    IncompleteAssessment { answered: usize, expected: usize },
    #[error("questionnaire already completed")]
    AlreadyCompleted,
    #[error("score summary does not match recorded scores ({detail})")]
    SummaryMismatch { detail: String },
    #[error("invalid question bank: {0}")]
    InvalidQuestion(String),
}

impl AssessmentError {
    pub(crate) fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        Self::OutOfRange { what, index, len }
    }
}
