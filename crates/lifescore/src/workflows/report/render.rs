//! Text layouts for each delivery channel.
//!
//! Every function reads [`ReportContent`]; scores and tiers are never derived here.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::card::HealthCard;
use super::content::ReportContent;
use super::model::{ReportModel, SupplementaryReadings, UserProfile};

pub const BRAND: &str = "ASIRI HEALTH";
pub const EMAIL_SUBJECT: &str = "Your health assessment results are ready!";
pub const HEALTH_CARD_SUBJECT: &str = "Your Comprehensive Health Report from Asiri Health";

const SHARE_RECOMMENDATIONS: [&str; 4] = [
    "Regular health checkups",
    "Balanced diet",
    "Daily exercise",
    "Proper hydration",
];

const NOT_PROVIDED: &str = "Not provided";

/// Rendered e-mail, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub text_body: String,
}

fn or_not_provided(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_PROVIDED
    } else {
        value
    }
}

fn report_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Plain-text questionnaire report, used as the download fallback.
pub fn plain_text(report: &ReportModel) -> String {
    let content = report.content();
    let mut lines = vec![
        format!("{BRAND} - HEALTH ASSESSMENT REPORT"),
        "=".repeat(40),
        String::new(),
        format!("Name: {}", content.display_name),
        format!("Email: {}", or_not_provided(&report.user.email)),
        format!("Generated: {}", report_timestamp(report.generated_at)),
        String::new(),
        "QUESTIONNAIRE RESULTS".to_string(),
        "-".repeat(21),
    ];
    lines.extend(content.question_lines.iter().cloned());
    lines.push(format!(
        "Total Score: {} ({}%)",
        content.total_line, content.percentage
    ));
    lines.push(String::new());
    push_status_block(&mut lines, &content);
    if let Some(supplementary) = &content.supplementary_lines {
        lines.push(String::new());
        lines.push("HEALTH SCORES".to_string());
        lines.push("-".repeat(13));
        lines.extend(supplementary.iter().cloned());
    }
    lines.push(String::new());
    lines.push("Results are for informational purposes only.".to_string());
    lines.join("\n")
}

fn push_status_block(lines: &mut Vec<String>, content: &ReportContent) {
    lines.push("HEALTH STATUS".to_string());
    lines.push("-".repeat(13));
    lines.push(content.status_label.to_string());
    lines.push(content.status_message.to_string());
}

pub fn email(report: &ReportModel) -> EmailMessage {
    let content = report.content();
    let answered = content.questions_answered();
    let mut body = vec![
        format!("Dear {},", content.display_name),
        String::new(),
        EMAIL_SUBJECT.to_string(),
        String::new(),
        format!("Total Score: {} ({}%)", content.total_line, content.percentage),
        format!("Questions Answered: {answered}/{answered}"),
        String::new(),
        format!("{} {}", content.status_label, content.status_message),
        String::new(),
    ];
    body.extend(content.question_lines.iter().cloned());
    if let Some(supplementary) = &content.supplementary_lines {
        body.push(String::new());
        body.extend(supplementary.iter().cloned());
    }
    body.push(String::new());
    body.push("Thank you for completing the assessment!".to_string());

    EmailMessage {
        to_email: report.user.email.trim().to_string(),
        to_name: content.display_name,
        subject: EMAIL_SUBJECT.to_string(),
        text_body: body.join("\n"),
    }
}

/// Chat message body (WhatsApp markup: `*bold*`, `_italic_`).
pub fn whatsapp(report: &ReportModel) -> String {
    let content = report.content();
    let mut lines = vec![
        format!("*{BRAND} - Health Assessment Report*"),
        String::new(),
        format!("*Name:* {}", content.display_name),
        format!("*Total Score:* {} ({}%)", content.total_line, content.percentage),
        String::new(),
        format!("*{}*", content.status_label),
        content.status_message.to_string(),
        String::new(),
    ];
    lines.extend(content.question_lines.iter().map(|line| format!("- {line}")));
    if let Some(supplementary) = &content.supplementary_lines {
        lines.push(String::new());
        lines.push("*Health Scores:*".to_string());
        lines.extend(supplementary.iter().map(|line| format!("- {line}")));
    }
    lines.push(String::new());
    lines.push(format!("_Thank you for choosing {BRAND}_"));
    lines.join("\n")
}

/// Health-card report combining the lifescore analysis with optional questionnaire results.
pub fn comprehensive_text(
    user: &UserProfile,
    card: &HealthCard,
    questionnaire: Option<&ReportModel>,
    generated_at: DateTime<Utc>,
) -> String {
    let reading = |value: &Option<String>| {
        value
            .as_deref()
            .map(or_not_provided)
            .unwrap_or(NOT_PROVIDED)
            .to_string()
    };

    let mut lines = vec![
        format!("{BRAND} - COMPREHENSIVE HEALTH REPORT"),
        "=".repeat(43),
        String::new(),
        "PATIENT INFORMATION".to_string(),
        "-".repeat(19),
        format!("Name: {}", or_not_provided(&user.display_name())),
        format!("Email: {}", or_not_provided(&user.email)),
        format!("Report Date: {}", report_timestamp(generated_at)),
        String::new(),
        "HEALTH SCORES".to_string(),
        "-".repeat(13),
        format!("Overall Lifescore: {}%", card.lifescore),
        format!("BMI Score: {}", reading(&card.supplementary.bmi)),
        format!("RBS Score: {}", reading(&card.supplementary.rbs)),
        format!("BP Score: {}", reading(&card.supplementary.bp)),
        String::new(),
        "HEALTH ASSESSMENT".to_string(),
        "-".repeat(17),
        card.status.label().to_string(),
        card.status.message().to_string(),
    ];

    if let Some(report) = questionnaire {
        let content = report.content();
        lines.push(String::new());
        lines.push("QUESTIONNAIRE RESULTS".to_string());
        lines.push("-".repeat(21));
        lines.push(format!(
            "Total Score: {} ({}%)",
            content.total_line, content.percentage
        ));
        lines.extend(content.question_lines.iter().cloned());
    }

    lines.push(String::new());
    lines.push("DETAILED ANALYSIS".to_string());
    lines.push("-".repeat(17));
    lines.extend(card.analysis.iter().cloned());
    lines.push(String::new());
    lines.push("HEALTH RECOMMENDATIONS".to_string());
    lines.push("-".repeat(22));
    lines.extend(card.recommendations().iter().map(|rec| rec.to_string()));
    lines.push(String::new());
    lines.push("Consult healthcare professionals for medical advice.".to_string());
    lines.join("\n")
}

fn health_score_lines(card: &HealthCard, readings: &SupplementaryReadings) -> [String; 4] {
    [
        format!("Lifescore: {}%", card.lifescore),
        format!("BMI: {}", readings.bmi),
        format!("RBS: {}", readings.rbs),
        format!("BP: {}", readings.bp),
    ]
}

/// Health-card e-mail. `None` until all three readings are entered.
pub fn health_card_email(user: &UserProfile, card: &HealthCard) -> Option<EmailMessage> {
    let readings = card.supplementary.complete()?;
    let display_name = user.display_name();
    let mut body = vec![
        "Comprehensive Health Report".to_string(),
        String::new(),
        format!("Name: {display_name}"),
        "Your health scores:".to_string(),
    ];
    body.extend(
        health_score_lines(card, &readings)
            .into_iter()
            .map(|line| format!("- {line}")),
    );
    body.push(String::new());
    body.push(format!("Status: {}", card.status.label()));
    body.push(String::new());
    body.push("Thank you for using Asiri Health Lifescore!".to_string());
    body.push("Best regards,".to_string());
    body.push("Asiri Health Team".to_string());

    Some(EmailMessage {
        to_email: user.email.trim().to_string(),
        to_name: display_name,
        subject: HEALTH_CARD_SUBJECT.to_string(),
        text_body: body.join("\n"),
    })
}

/// Health-card chat message. `None` until all three readings are entered.
pub fn health_card_whatsapp(
    user: &UserProfile,
    card: &HealthCard,
    generated_at: DateTime<Utc>,
) -> Option<String> {
    let readings = card.supplementary.complete()?;
    let mut lines = vec![
        format!("*{BRAND} - Comprehensive Health Report*"),
        String::new(),
        "*Patient Information:*".to_string(),
        format!("*Name:* {}", user.display_name()),
        format!("*Email:* {}", or_not_provided(&user.email)),
        format!("*Report Date:* {}", report_timestamp(generated_at)),
        String::new(),
        "*Health Scores Summary:*".to_string(),
    ];
    lines.extend(
        health_score_lines(card, &readings)
            .into_iter()
            .map(|line| format!("- {line}")),
    );
    lines.push(String::new());
    lines.push("*Health Assessment:*".to_string());
    lines.push(card.status.label().to_string());
    lines.push(card.status.message().to_string());
    lines.push(String::new());
    lines.push("*Key Recommendations:*".to_string());
    lines.extend(SHARE_RECOMMENDATIONS.iter().map(|rec| format!("- {rec}")));
    lines.push(String::new());
    lines.push(format!("_Thank you for choosing {BRAND}_"));
    Some(lines.join("\n"))
}
