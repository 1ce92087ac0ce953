//! Delivery boundary: hands an assembled [`ReportModel`] to PDF, e-mail,
//! WhatsApp or plain-text channels. Channels format; they never rescore.

pub mod artifacts;
mod channels;
mod trigger;
pub mod whatsapp;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::workflows::report::ReportModel;

pub use channels::{EmailChannel, EmailTransport, PdfChannel, PdfRenderer, TextReportChannel};
pub use trigger::AutoReportTrigger;
pub use whatsapp::WhatsAppChannel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Pdf,
    Email,
    WhatsApp,
    PlainText,
}

impl ChannelKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF report",
            Self::Email => "e-mail",
            Self::WhatsApp => "WhatsApp",
            Self::PlainText => "plain-text report",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a delivered report ended up: a file path, a share URL, or a recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    pub channel: ChannelKind,
    pub location: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("report rendering failed: {0}")]
    Render(String),
    #[error("transport unavailable: {0}")]
    Transport(String),
    #[error("no {0} recipient on file")]
    MissingRecipient(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("auto report needs a tokio runtime: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
    #[error("{primary}; fallback also failed: {fallback}")]
    Exhausted {
        primary: Box<DeliveryError>,
        fallback: Box<DeliveryError>,
    },
}

/// A destination able to turn a report into a human-readable artifact.
pub trait ReportChannel: Send + Sync {
    fn kind(&self) -> ChannelKind;
    fn deliver(&self, report: &ReportModel) -> Result<DeliveryReceipt, DeliveryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    Delivered {
        receipt: DeliveryReceipt,
    },
    /// The primary channel failed; `notice` is suitable for showing the respondent.
    FellBack {
        receipt: DeliveryReceipt,
        notice: String,
    },
}

impl DeliveryOutcome {
    pub fn receipt(&self) -> &DeliveryReceipt {
        match self {
            Self::Delivered { receipt } | Self::FellBack { receipt, .. } => receipt,
        }
    }
}

/// Primary channel with an optional fallback (e.g. PDF, then plain text).
#[derive(Clone)]
pub struct DeliveryDispatcher {
    primary: Arc<dyn ReportChannel>,
    fallback: Option<Arc<dyn ReportChannel>>,
}

impl DeliveryDispatcher {
    pub fn new(primary: Arc<dyn ReportChannel>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn ReportChannel>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn dispatch(&self, report: &ReportModel) -> Result<DeliveryOutcome, DeliveryError> {
        let primary_kind = self.primary.kind();
        let primary_error = match self.primary.deliver(report) {
            Ok(receipt) => {
                info!(channel = %primary_kind, location = %receipt.location, "report delivered");
                return Ok(DeliveryOutcome::Delivered { receipt });
            }
            Err(error) => error,
        };

        warn!(channel = %primary_kind, error = %primary_error, "report delivery failed");

        let Some(fallback) = &self.fallback else {
            return Err(primary_error);
        };

        match fallback.deliver(report) {
            Ok(receipt) => {
                info!(
                    channel = %fallback.kind(),
                    location = %receipt.location,
                    "report delivered through fallback"
                );
                let notice = format!(
                    "Could not deliver the {primary_kind} ({primary_error}); a {} was provided instead.",
                    fallback.kind()
                );
                Ok(DeliveryOutcome::FellBack { receipt, notice })
            }
            Err(fallback_error) => {
                warn!(channel = %fallback.kind(), error = %fallback_error, "fallback delivery failed");
                Err(DeliveryError::Exhausted {
                    primary: Box::new(primary_error),
                    fallback: Box::new(fallback_error),
                })
            }
        }
    }
}
