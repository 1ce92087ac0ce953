//! File names for downloadable artifacts.

use chrono::NaiveDate;

const FALLBACK_NAME: &str = "Patient";

/// Replaces each whitespace run with `_`, leading and trailing runs included.
/// Only an empty name becomes `Patient`.
pub fn name_segment(name: &str) -> String {
    if name.is_empty() {
        return FALLBACK_NAME.to_string();
    }
    let mut segment = String::with_capacity(name.len());
    let mut in_run = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_run {
                segment.push('_');
            }
            in_run = true;
        } else {
            segment.push(ch);
            in_run = false;
        }
    }
    segment
}

pub fn pdf_report_name(name: &str, date: NaiveDate) -> String {
    format!(
        "Asiri_Comprehensive_Health_Report_{}_{}.pdf",
        name_segment(name),
        date.format("%Y-%m-%d")
    )
}

pub fn text_report_name(name: &str, date: NaiveDate) -> String {
    format!(
        "Asiri_Health_Report_{}_{}.txt",
        name_segment(name),
        date.format("%Y-%m-%d")
    )
}

pub fn user_export_name(date: NaiveDate) -> String {
    format!("users-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 4).unwrap()
    }

    #[test]
    fn names_collapse_whitespace() {
        assert_eq!(
            pdf_report_name("Amaya   de\tSilva", date()),
            "Asiri_Comprehensive_Health_Report_Amaya_de_Silva_2025-10-04.pdf"
        );
        assert_eq!(
            text_report_name("Kamal Perera", date()),
            "Asiri_Health_Report_Kamal_Perera_2025-10-04.txt"
        );
    }

    #[test]
    fn empty_name_becomes_patient() {
        assert_eq!(
            text_report_name("", date()),
            "Asiri_Health_Report_Patient_2025-10-04.txt"
        );
    }

    #[test]
    fn edge_whitespace_is_kept_as_underscores() {
        assert_eq!(name_segment("  Amaya de Silva "), "_Amaya_de_Silva_");
        assert_eq!(
            text_report_name("   ", date()),
            "Asiri_Health_Report___2025-10-04.txt"
        );
    }

    #[test]
    fn export_name_is_dated() {
        assert_eq!(user_export_name(date()), "users-2025-10-04.csv");
    }
}
