use crate::infra::UnconfiguredPdfRenderer;
use clap::Args;
use lifescore::config::DeliveryConfig;
use lifescore::error::AppError;
use lifescore::workflows::delivery::{
    AutoReportTrigger, DeliveryDispatcher, DeliveryError, DeliveryOutcome, PdfChannel,
    TextReportChannel, WhatsAppChannel,
};
use lifescore::workflows::questionnaire::{Advance, AssessmentError, QuestionBank, QuestionnaireSession};
use lifescore::workflows::report::{
    render, HealthCard, ReportAssembler, ReportModel, Salutation, SupplementaryScores,
    UserProfile,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Zero-based option index per question, comma separated (e.g. 2,3,0,0)
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) answers: Vec<usize>,
    /// Title: Mr., Mrs. or Miss.
    #[arg(long, default_value = "Mr.")]
    pub(crate) title: Salutation,
    /// Respondent name
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long, default_value = "")]
    pub(crate) email: String,
    /// Phone number used for the WhatsApp share link
    #[arg(long, default_value = "")]
    pub(crate) phone: String,
    #[arg(long)]
    pub(crate) bmi: Option<String>,
    /// Random blood sugar (mg/dL)
    #[arg(long)]
    pub(crate) rbs: Option<String>,
    /// Blood pressure, e.g. 120/80
    #[arg(long)]
    pub(crate) bp: Option<String>,
    /// Save the report under the configured report directory
    #[arg(long)]
    pub(crate) save: bool,
    /// Override the report directory
    #[arg(long)]
    pub(crate) report_dir: Option<PathBuf>,
}

pub(crate) fn run_questions() {
    let bank = QuestionBank::standard();
    println!("Lifestyle questionnaire ({} points max)", bank.max_score());
    for question in bank.questions() {
        println!("\n{}: {}", question.title, question.prompt);
        if let Some(subtext) = &question.subtext {
            println!("    {subtext}");
        }
        for (index, option) in question.options.iter().enumerate() {
            println!("  [{index}] {:<28} {:>3}", option.label, option.score);
        }
    }
}

fn score_answers(
    bank: &QuestionBank,
    answers: &[usize],
) -> Result<(QuestionnaireSession, Vec<u8>), AssessmentError> {
    let mut session = QuestionnaireSession::new();
    for answer in answers {
        session.select_option(bank, *answer)?;
        if let Advance::Completed { scores } = session.confirm_and_advance(bank)? {
            return Ok((session, scores));
        }
    }
    Err(AssessmentError::IncompleteAssessment {
        answered: session.recorded_scores().len(),
        expected: bank.count(),
    })
}

pub(crate) async fn run_assess(args: AssessArgs, delivery: &DeliveryConfig) -> Result<(), AppError> {
    let bank = Arc::new(QuestionBank::standard());
    let (session, scores) = score_answers(&bank, &args.answers)?;

    let user = UserProfile {
        title: args.title,
        name: args.name.trim().to_string(),
        phone: args.phone.trim().to_string(),
        email: args.email.trim().to_string(),
    };
    let readings = SupplementaryScores::new(args.bmi, args.rbs, args.bp);
    let report = ReportAssembler::new(bank.clone()).assemble(
        &user,
        session.summary(&bank),
        &scores,
        Some(&readings),
    )?;

    println!("{}", render::plain_text(&report));
    println!(
        "\nShare on WhatsApp: {}",
        WhatsAppChannel::new(delivery.country_code.clone()).link_for(&report)
    );

    if readings.is_complete() {
        let card = HealthCard::new(Some(report.summary.percentage), readings.clone());
        println!(
            "\n{}",
            render::comprehensive_text(&user, &card, Some(&report), report.generated_at)
        );
    }

    if args.save {
        let directory = args
            .report_dir
            .unwrap_or_else(|| delivery.report_dir.clone());
        let dispatcher = DeliveryDispatcher::new(Arc::new(PdfChannel::new(
            UnconfiguredPdfRenderer,
            directory.clone(),
        )))
        .with_fallback(Arc::new(TextReportChannel::new(directory)));

        let outcome = if readings.is_complete() {
            save_when_triggered(dispatcher, report, &readings, delivery).await?
        } else {
            dispatcher.dispatch(&report)?
        };

        if let DeliveryOutcome::FellBack { notice, .. } = &outcome {
            println!("\n{notice}");
        }
        println!("Report saved to {}", outcome.receipt().location);
    }

    Ok(())
}

/// Mirrors the interactive flow: once all readings are in, the report saves after the configured delay.
async fn save_when_triggered(
    dispatcher: DeliveryDispatcher,
    report: ReportModel,
    readings: &SupplementaryScores,
    delivery: &DeliveryConfig,
) -> Result<DeliveryOutcome, AppError> {
    let (sender, receiver) = oneshot::channel();
    let mut trigger = AutoReportTrigger::new(delivery.auto_report_delay);
    let scheduled = trigger.update(readings, move || {
        let _ = sender.send(dispatcher.dispatch(&report));
    })?;
    if !scheduled {
        return Err(DeliveryError::Transport("auto report was not scheduled".to_string()).into());
    }

    println!(
        "\nAll readings entered; saving the full report in {} ms...",
        trigger.delay().as_millis()
    );
    let outcome = receiver
        .await
        .map_err(|_| DeliveryError::Transport("auto report was cancelled".to_string()))??;
    Ok(outcome)
}
