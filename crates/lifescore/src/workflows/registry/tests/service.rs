use super::common::*;
use crate::workflows::registry::{
    ListQuery, RegistrationError, RegistryServiceError, UserRepository,
};
use chrono::NaiveDate;

#[test]
fn register_trims_and_timestamps() {
    let (service, _) = build_service(30);

    let user = service
        .register(registration(" Lasantha ", "0712345678 ", "lasantha@example.com"))
        .expect("registered");

    assert_eq!(user.name, "Lasantha");
    assert_eq!(user.phone, "0712345678");
    assert!(user.registered_at.is_some());
    assert!(user.id.0.starts_with("usr-"));
}

#[test]
fn register_rejects_missing_email() {
    let (service, repository) = build_service(30);

    match service.register(registration("Lasantha", "0712345678", " ")) {
        Err(RegistryServiceError::Registration(RegistrationError::MissingField("email"))) => {}
        other => panic!("expected missing email, got {other:?}"),
    }
    assert!(repository.list().expect("list").is_empty());
}

#[test]
fn list_filters_then_paginates() {
    let (service, _) = build_service(4);
    seed(&service, 10);

    let page = service
        .list(&ListQuery {
            search: Some("MEMBER".to_string()),
            page: Some(3),
        })
        .expect("listing");

    assert_eq!(page.total_pages, 3);
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.rows[0].serial, 9);
    assert_eq!(page.page_numbers, vec![1, 2, 3]);

    let filtered = service
        .list(&ListQuery {
            search: Some("member1".to_string()),
            page: None,
        })
        .expect("listing");
    assert_eq!(filtered.matched, 2);
    assert_eq!(filtered.total_users, 10);
}

#[test]
fn export_covers_all_matches_not_just_one_page() {
    let (service, _) = build_service(2);
    seed(&service, 5);

    let export = service
        .export(&ListQuery::default(), NaiveDate::from_ymd_opt(2025, 10, 7).unwrap())
        .expect("export");

    assert_eq!(export.file_name, "users-2025-10-07.csv");
    assert_eq!(export.rows, 5);
    let lines: Vec<&str> = export.body.lines().collect();
    assert_eq!(lines[0], "No.,Name,Phone,Email,Registered Date");
    assert!(lines[1].starts_with("1,Member 01,+947000000"));
    assert_eq!(lines.len(), 6);
}
