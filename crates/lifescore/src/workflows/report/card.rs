use serde::Serialize;

use super::model::SupplementaryScores;
use crate::workflows::questionnaire::{LifescoreStatus, DEFAULT_LIFESCORE};

/// Standing advice appended to every comprehensive report, in display order.
pub const RECOMMENDATIONS: [&str; 10] = [
    "Maintain regular health checkups every 6 months",
    "Follow a balanced diet rich in fruits and vegetables",
    "Engage in 30 minutes of physical activity daily",
    "Drink 2-3 liters of water daily for proper hydration",
    "Get 7-8 hours of quality sleep each night",
    "Practice stress management techniques like meditation",
    "Limit processed foods and sugar intake",
    "Avoid smoking and limit alcohol consumption",
    "Monitor your health scores regularly",
    "Consult healthcare professionals for personalized advice",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiBand {
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

impl BmiBand {
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Healthy
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    pub const fn advice(self) -> &'static str {
        match self {
            Self::Underweight => {
                "BMI indicates underweight - Consider nutritional consultation and balanced diet"
            }
            Self::Healthy => {
                "BMI is in healthy range - Maintain current weight with regular exercise"
            }
            Self::Overweight => "BMI indicates overweight - Consider weight management program",
            Self::Obese => {
                "BMI indicates obesity - Medical consultation and lifestyle changes recommended"
            }
        }
    }
}

/// Random blood sugar band (mg/dL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RbsBand {
    Normal,
    PreDiabetes,
    DiabetesRisk,
}

impl RbsBand {
    pub fn classify(rbs: f64) -> Self {
        if rbs < 100.0 {
            Self::Normal
        } else if rbs <= 125.0 {
            Self::PreDiabetes
        } else {
            Self::DiabetesRisk
        }
    }

    pub const fn advice(self) -> &'static str {
        match self {
            Self::Normal => "RBS levels are normal - Maintain healthy diet and regular monitoring",
            Self::PreDiabetes => {
                "RBS indicates pre-diabetes - Monitor sugar intake and increase physical activity"
            }
            Self::DiabetesRisk => {
                "RBS indicates diabetes risk - Immediate medical consultation and dietary changes advised"
            }
        }
    }
}

/// Health-card view of a respondent: lifescore tier plus clinical analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthCard {
    pub lifescore: u8,
    pub status: LifescoreStatus,
    pub supplementary: SupplementaryScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi_band: Option<BmiBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rbs_band: Option<RbsBand>,
    pub analysis: Vec<String>,
}

impl HealthCard {
    pub fn new(lifescore: Option<u8>, supplementary: SupplementaryScores) -> Self {
        let lifescore = lifescore.unwrap_or(DEFAULT_LIFESCORE).min(100);
        let status = LifescoreStatus::classify(lifescore);

        let bmi = reading(&supplementary.bmi);
        let rbs = reading(&supplementary.rbs);
        let bp = reading(&supplementary.bp);

        let bmi_band = bmi.and_then(parse_number).map(BmiBand::classify);
        let rbs_band = rbs.and_then(parse_number).map(RbsBand::classify);

        let mut analysis = Vec::new();
        if let Some(raw) = bmi {
            analysis.push(match bmi_band {
                Some(band) => band.advice().to_string(),
                None => format!("BMI value '{raw}' could not be interpreted"),
            });
        }
        if let Some(raw) = rbs {
            analysis.push(match rbs_band {
                Some(band) => band.advice().to_string(),
                None => format!("RBS value '{raw}' could not be interpreted"),
            });
        }
        if let Some(raw) = bp {
            analysis.push(format!(
                "Blood Pressure: {raw} - Regular monitoring and lifestyle modifications recommended"
            ));
        }
        analysis.push(format!(
            "Overall Lifescore {lifescore}% - {}",
            status.message()
        ));

        Self {
            lifescore,
            status,
            supplementary,
            bmi_band,
            rbs_band,
            analysis,
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        &RECOMMENDATIONS
    }
}

fn reading(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

/// Leading numeric prefix, so "24.5 kg/m2" reads as 24.5.
fn parse_number(raw: &str) -> Option<f64> {
    let end = raw
        .char_indices()
        .take_while(|(index, c)| c.is_ascii_digit() || *c == '.' || (*index == 0 && *c == '-'))
        .map(|(index, c)| index + c.len_utf8())
        .last()?;
    raw[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}
