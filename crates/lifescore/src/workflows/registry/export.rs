use std::io;

use serde::Serialize;

use super::domain::RegisteredUser;
use super::listing::display_phone;

pub const CSV_HEADER: [&str; 5] = ["No.", "Name", "Phone", "Email", "Registered Date"];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("export is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "No.")]
    serial: usize,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Phone")]
    phone: String,
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Registered Date")]
    registered_date: String,
}

/// Writes the filtered users with serials starting at 1. Fields are quoted when needed.
pub fn write_csv<W: io::Write>(
    writer: W,
    users: &[&RegisteredUser],
    country_code: &str,
) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(CSV_HEADER)?;
    for (index, user) in users.iter().enumerate() {
        writer.serialize(ExportRow {
            serial: index + 1,
            name: &user.name,
            phone: display_phone(&user.phone, country_code),
            email: &user.email,
            registered_date: user
                .registered_at
                .map(|at| at.date_naive().format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_csv(users: &[&RegisteredUser], country_code: &str) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, users, country_code)?;
    Ok(String::from_utf8(buffer)?)
}
