use serde::{Deserialize, Serialize};

/// Lifescore assumed when a respondent has no stored value.
pub const DEFAULT_LIFESCORE: u8 = 30;

/// Tier shown on questionnaire results. Thresholds are inclusive lower bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl HealthStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Excellent, Self::Good, Self::Fair, Self::NeedsWork]
    }

    pub const fn classify(percentage: u8) -> Self {
        if percentage >= 80 {
            Self::Excellent
        } else if percentage >= 60 {
            Self::Good
        } else if percentage >= 40 {
            Self::Fair
        } else {
            Self::NeedsWork
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent! Keep it up!",
            Self::Good => "Good job!",
            Self::Fair => "Fair",
            Self::NeedsWork => "Needs work",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Maintain your healthy habits.",
            Self::Good => "Keep improving daily.",
            Self::Fair => "Develop healthier habits.",
            Self::NeedsWork => "Start healthy habits now.",
        }
    }

    /// Band caption used on the results card.
    pub const fn range_label(self) -> &'static str {
        match self {
            Self::Excellent => "100-80",
            Self::Good => "80-60",
            Self::Fair => "60-40",
            Self::NeedsWork => "<40",
        }
    }
}

/// Tier used by the health-card screen for the stored lifescore.
///
/// Not interchangeable with [`HealthStatus`]; the wording differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifescoreStatus {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl LifescoreStatus {
    pub const fn classify(lifescore: u8) -> Self {
        if lifescore >= 80 {
            Self::Excellent
        } else if lifescore >= 60 {
            Self::Good
        } else if lifescore >= 40 {
            Self::Fair
        } else {
            Self::NeedsImprovement
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT HEALTH STATUS",
            Self::Good => "GOOD HEALTH STATUS",
            Self::Fair => "FAIR HEALTH STATUS",
            Self::NeedsImprovement => "NEEDS IMPROVEMENT",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Excellent => "You maintain excellent overall health. Keep up the good habits!",
            Self::Good => "You have good health with some areas for improvement.",
            Self::Fair => "Your health needs attention in some areas.",
            Self::NeedsImprovement => "Focus on developing healthier lifestyle habits.",
        }
    }
}
