use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::artifacts::{pdf_report_name, text_report_name};
use super::{ChannelKind, DeliveryError, DeliveryReceipt, ReportChannel};
use crate::workflows::report::render::{self, EmailMessage};
use crate::workflows::report::ReportModel;

/// Produces PDF bytes for a report. Layout belongs to the implementor.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, report: &ReportModel) -> Result<Vec<u8>, DeliveryError>;
}

/// Sends a rendered e-mail (SMTP relay, hosted API, ...).
pub trait EmailTransport: Send + Sync {
    fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError>;
}

fn write_artifact(directory: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, DeliveryError> {
    fs::create_dir_all(directory)?;
    let path = directory.join(file_name);
    fs::write(&path, bytes)?;
    debug!(path = %path.display(), size = bytes.len(), "report artifact written");
    Ok(path)
}

pub struct PdfChannel<R: PdfRenderer> {
    renderer: R,
    directory: PathBuf,
}

impl<R: PdfRenderer> PdfChannel<R> {
    pub fn new(renderer: R, directory: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            directory: directory.into(),
        }
    }
}

impl<R: PdfRenderer> ReportChannel for PdfChannel<R> {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Pdf
    }

    fn deliver(&self, report: &ReportModel) -> Result<DeliveryReceipt, DeliveryError> {
        let bytes = self.renderer.render(report)?;
        let name = pdf_report_name(&report.user.name, report.generated_at.date_naive());
        let path = write_artifact(&self.directory, &name, &bytes)?;
        Ok(DeliveryReceipt {
            channel: ChannelKind::Pdf,
            location: path.display().to_string(),
        })
    }
}

pub struct EmailChannel<T: EmailTransport> {
    transport: T,
}

impl<T: EmailTransport> EmailChannel<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T: EmailTransport> ReportChannel for EmailChannel<T> {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Email
    }

    fn deliver(&self, report: &ReportModel) -> Result<DeliveryReceipt, DeliveryError> {
        let message = render::email(report);
        if message.to_email.is_empty() {
            return Err(DeliveryError::MissingRecipient("e-mail"));
        }
        self.transport.send(&message)?;
        Ok(DeliveryReceipt {
            channel: ChannelKind::Email,
            location: message.to_email,
        })
    }
}

/// Writes the plain-text report; the usual fallback when PDF rendering fails.
#[derive(Debug, Clone)]
pub struct TextReportChannel {
    directory: PathBuf,
}

impl TextReportChannel {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl ReportChannel for TextReportChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::PlainText
    }

    fn deliver(&self, report: &ReportModel) -> Result<DeliveryReceipt, DeliveryError> {
        let name = text_report_name(&report.user.name, report.generated_at.date_naive());
        let body = render::plain_text(report);
        let path = write_artifact(&self.directory, &name, body.as_bytes())?;
        Ok(DeliveryReceipt {
            channel: ChannelKind::PlainText,
            location: path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::delivery::{DeliveryDispatcher, DeliveryOutcome};
    use crate::workflows::questionnaire::{QuestionBank, ScoreSummary};
    use crate::workflows::report::{ReportAssembler, Salutation, UserProfile};
    use chrono::{TimeZone, Utc};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    struct StubPdf {
        fail: bool,
    }

    impl PdfRenderer for StubPdf {
        fn render(&self, report: &ReportModel) -> Result<Vec<u8>, DeliveryError> {
            if self.fail {
                return Err(DeliveryError::Render("font table missing".to_string()));
            }
            Ok(format!("%PDF-1.4 {}", report.summary.total_score).into_bytes())
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<EmailMessage>>,
    }

    impl EmailTransport for &RecordingTransport {
        fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
            self.sent.lock().expect("transport lock").push(message.clone());
            Ok(())
        }
    }

    fn report(email: &str) -> ReportModel {
        let scores = [50, 50, 75, 100];
        ReportAssembler::new(Arc::new(QuestionBank::standard()))
            .assemble_at(
                &UserProfile {
                    title: Salutation::Mr,
                    name: "Saman Kumara".to_string(),
                    phone: "0712345678".to_string(),
                    email: email.to_string(),
                },
                ScoreSummary::from_scores(&scores, 4),
                &scores,
                None,
                Utc.with_ymd_and_hms(2025, 10, 6, 10, 0, 0).unwrap(),
            )
            .expect("assembles")
    }

    #[test]
    fn pdf_channel_names_artifact() {
        let dir = TempDir::new().expect("temp dir");
        let channel = PdfChannel::new(StubPdf { fail: false }, dir.path());

        let receipt = channel.deliver(&report("")).expect("pdf written");

        let expected = dir
            .path()
            .join("Asiri_Comprehensive_Health_Report_Saman_Kumara_2025-10-06.pdf");
        assert_eq!(receipt.location, expected.display().to_string());
        assert_eq!(fs::read(expected).expect("read"), b"%PDF-1.4 275");
    }

    #[test]
    fn pdf_failure_falls_back_to_text_report() {
        let dir = TempDir::new().expect("temp dir");
        let dispatcher = DeliveryDispatcher::new(Arc::new(PdfChannel::new(
            StubPdf { fail: true },
            dir.path(),
        )))
        .with_fallback(Arc::new(TextReportChannel::new(dir.path())));

        let outcome = dispatcher.dispatch(&report("")).expect("fallback");

        assert!(matches!(outcome, DeliveryOutcome::FellBack { .. }));
        let text = fs::read_to_string(
            dir.path()
                .join("Asiri_Health_Report_Saman_Kumara_2025-10-06.txt"),
        )
        .expect("text report");
        assert!(text.contains("Total Score: 275/400 (69%)"));
        assert!(text.contains("Good job!"));
    }

    #[test]
    fn email_channel_requires_recipient() {
        let transport = RecordingTransport::default();
        let channel = EmailChannel::new(&transport);

        assert!(matches!(
            channel.deliver(&report("  ")),
            Err(DeliveryError::MissingRecipient("e-mail"))
        ));

        let receipt = channel.deliver(&report("saman@example.com")).expect("sent");
        assert_eq!(receipt.location, "saman@example.com");
        let sent = transport.sent.lock().expect("transport lock");
        assert_eq!(sent.len(), 1);
        assert!(sent[0].text_body.contains("Questions Answered: 4/4"));
    }
}
