use std::fmt;

use serde::{Deserialize, Serialize};

use crate::workflows::questionnaire::{Question, ScoreSummary, SessionState};
use crate::workflows::report::{Salutation, SupplementaryScores, UserProfile};

/// Identifier wrapper for questionnaire sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /api/v1/assessments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRequest {
    pub title: Salutation,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl StartRequest {
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            title: self.title,
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectRequest {
    pub option_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub supplementary: Option<SupplementaryScores>,
}

/// What a client needs to render the current step of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub respondent: String,
    #[serde(flatten)]
    pub state: SessionState,
    pub answered: usize,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ScoreSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
}
