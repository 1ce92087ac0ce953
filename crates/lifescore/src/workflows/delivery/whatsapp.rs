//! WhatsApp share links (`wa.me`).

use std::fmt::Write as _;

use super::{ChannelKind, DeliveryError, DeliveryReceipt, ReportChannel};
use crate::config::DeliveryConfig;
use crate::workflows::report::{render, ReportModel};

const SHARE_BASE: &str = "https://wa.me/";

/// Digits-only international form of a local number, or `None` when no digits remain.
///
/// A leading trunk `0` is replaced by the country code; any other number gets the
/// country code prepended unless it already starts with it.
pub fn normalize_phone(raw: &str, country_code: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let normalized = if let Some(local) = digits.strip_prefix('0') {
        format!("{country_code}{local}")
    } else if digits.starts_with(country_code) {
        digits
    } else {
        format!("{country_code}{digits}")
    };
    Some(normalized)
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, byte-wise over UTF-8.
pub fn encode_uri_component(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(char::from(byte)),
            _ => {
                let _ = write!(encoded, "%{byte:02X}");
            }
        }
    }
    encoded
}

pub fn share_link(phone: Option<&str>, message: &str) -> String {
    let text = encode_uri_component(message);
    match phone {
        Some(number) => format!("{SHARE_BASE}{number}?text={text}"),
        None => format!("{SHARE_BASE}?text={text}"),
    }
}

#[derive(Debug, Clone)]
pub struct WhatsAppChannel {
    country_code: String,
}

impl WhatsAppChannel {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
        }
    }

    pub fn link_for(&self, report: &ReportModel) -> String {
        let phone = normalize_phone(&report.user.phone, &self.country_code);
        share_link(phone.as_deref(), &render::whatsapp(report))
    }
}

impl Default for WhatsAppChannel {
    fn default() -> Self {
        Self::new(DeliveryConfig::DEFAULT_COUNTRY_CODE)
    }
}

impl ReportChannel for WhatsAppChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::WhatsApp
    }

    fn deliver(&self, report: &ReportModel) -> Result<DeliveryReceipt, DeliveryError> {
        Ok(DeliveryReceipt {
            channel: ChannelKind::WhatsApp,
            location: self.link_for(report),
        })
    }
}
