use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{RegisteredUser, UserId};

const PAGE_WINDOW: usize = 5;

/// Case-insensitive match on name or e-mail; phone numbers match as typed.
pub fn matches(user: &RegisteredUser, term: &str) -> bool {
    let needle = term.to_lowercase();
    user.name.to_lowercase().contains(&needle)
        || user.email.to_lowercase().contains(&needle)
        || user.phone.contains(term)
}

pub fn search<'a>(users: &'a [RegisteredUser], term: &str) -> Vec<&'a RegisteredUser> {
    users.iter().filter(|user| matches(user, term)).collect()
}

/// Local mobile numbers (`07XXXXXXXX`) shown in international form.
pub fn display_phone(phone: &str, country_code: &str) -> String {
    match phone.strip_prefix('0') {
        Some(local) if phone.starts_with("07") && phone.len() == 10 => {
            format!("+{country_code}{local}")
        }
        _ => phone.to_string(),
    }
}

pub fn total_pages(matched: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    matched.div_ceil(per_page)
}

/// Up to five page links centred on `current`.
pub fn page_numbers(current: usize, total: usize) -> Vec<usize> {
    if total <= PAGE_WINDOW {
        return (1..=total).collect();
    }
    let start = current.saturating_sub(2).max(1);
    let end = (current + 2).min(total);
    (start..=end).collect()
}

pub fn serial(page: usize, per_page: usize, index: usize) -> usize {
    (page.max(1) - 1) * per_page + index + 1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRow {
    pub serial: usize,
    pub id: UserId,
    pub title: &'static str,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_on: Option<NaiveDate>,
}

impl UserRow {
    pub fn new(serial: usize, user: &RegisteredUser, country_code: &str) -> Self {
        Self {
            serial,
            id: user.id.clone(),
            title: user.title.label(),
            name: user.name.clone(),
            phone: display_phone(&user.phone, country_code),
            email: user.email.clone(),
            registered_on: user.registered_at.map(|at| at.date_naive()),
        }
    }
}

/// One page of the admin listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPage {
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub matched: usize,
    pub total_users: usize,
    pub page_numbers: Vec<usize>,
    pub rows: Vec<UserRow>,
}

impl UserPage {
    /// `page` is clamped into `1..=total_pages`.
    pub fn build(
        users: &[RegisteredUser],
        term: &str,
        page: usize,
        per_page: usize,
        country_code: &str,
    ) -> Self {
        let matched = search(users, term);
        let total_pages = total_pages(matched.len(), per_page);
        let page = page.clamp(1, total_pages.max(1));

        let rows = matched
            .iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .enumerate()
            .map(|(index, user)| UserRow::new(serial(page, per_page, index), user, country_code))
            .collect();

        Self {
            page,
            per_page,
            total_pages,
            matched: matched.len(),
            total_users: users.len(),
            page_numbers: page_numbers(page, total_pages),
            rows,
        }
    }
}
