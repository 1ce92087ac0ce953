pub mod assessment;
pub mod delivery;
pub mod questionnaire;
pub mod registry;
pub mod report;
