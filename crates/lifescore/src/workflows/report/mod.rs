//! Report assembly and the channel-neutral content every renderer formats.

mod card;
mod content;
mod model;
pub mod render;

pub use card::{BmiBand, HealthCard, RbsBand, RECOMMENDATIONS};
pub use content::ReportContent;
pub use model::{
    CompletionPayload, QuestionScore, ReportAssembler, ReportModel, Salutation,
    SupplementaryReadings, SupplementaryScores, UserProfile,
};
