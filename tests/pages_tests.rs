//! Page view models against a fake school backend

mod common;

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post, put},
};
use common::{PARENT_ID, STUDENT_ID, context, dead_base_url, serve, twelve_homeworks};
use schoolboard::pages::attendance::MonthYearFilter;
use schoolboard::prelude::*;
use serde_json::{Value, json};
use std::collections::HashMap;

// =============================================================================
// Fake backend
// =============================================================================

fn backend() -> Router {
    Router::new()
        .route(
            "/api/admin/add-classroom",
            post(|Json(body): Json<Value>| async move {
                if body["roomNumber"] == "999" {
                    return (
                        StatusCode::CONFLICT,
                        Json(json!({"message": "Room 999 already exists"})),
                    );
                }
                (
                    StatusCode::CREATED,
                    Json(json!({
                        "message": "Classroom added",
                        "data": {"_id": "room-1", "roomNumber": body["roomNumber"]}
                    })),
                )
            }),
        )
        .route(
            "/api/library/issued-books",
            get(|Query(criteria): Query<HashMap<String, String>>| async move {
                let books = vec![
                    json!({"_id": "b1", "title": "Rust in Action", "bookNo": "L-1", "isbn": "978-1",
                           "memberName": "Ayesha", "author": "McNamara", "subject": "Science",
                           "issueDate": "2024-01-10", "returnDate": "2024-01-24", "status": "Issued"}),
                    json!({"_id": 2, "title": "World History", "bookNo": "L-2", "isbn": "978-2",
                           "memberName": "Bilal", "author": "Roberts", "subject": "History",
                           "issueDate": "2024-02-01", "returnDate": "2024-02-15", "status": "Returned"}),
                ];
                let books: Vec<Value> = books
                    .into_iter()
                    .filter(|b| criteria.get("subject").is_none_or(|s| b["subject"] == s.as_str()))
                    .collect();
                Json(json!({"books": books}))
            }),
        )
        .route(
            "/api/students/get-attendance/{student_id}",
            get(|Path(student_id): Path<String>| async move {
                if student_id == "broken" {
                    return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})));
                }
                if student_id != STUDENT_ID {
                    return (StatusCode::NOT_FOUND, Json(json!({"message": "Student not found"})));
                }
                (
                    StatusCode::OK,
                    Json(json!({"attendance": [
                        {"_id": "a1", "date": "2024-03-04T00:00:00.000Z", "attendanceStatus": "Present", "subject": "Math"},
                        {"_id": "a2", "date": "2024-03-05T00:00:00.000Z", "attendanceStatus": "Absent", "subject": "Science"},
                        {"_id": "a3", "date": "2023-11-20T00:00:00.000Z", "attendanceStatus": "Present", "subject": "Math"}
                    ]})),
                )
            }),
        )
        .route(
            "/api/parent/my-child-attendance/{parent_id}/{student_id}",
            get(|Path((parent_id, student_id)): Path<(String, String)>| async move {
                assert_eq!(parent_id, PARENT_ID);
                assert_eq!(student_id, STUDENT_ID);
                Json(json!({"studentDetails": {
                    "firstName": "Sara",
                    "class": 5,
                    "section": "A",
                    "roll": 12,
                    "attendance": [
                        {"date": "2024-03-04", "status": "Present"},
                        {"date": "2024-04-01", "status": "Absent"}
                    ]
                }}))
            }),
        )
        .route(
            "/api/teacher/homeworks",
            get(|| async {
                Json(json!({"message": "Homeworks retrieved successfully!", "homeworks": twelve_homeworks()}))
            }),
        )
        .route(
            "/api/teacher/update-status/{homework_id}",
            put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                // hw11 exists locally but has been deleted on the server
                if id.starts_with("hw") && id != "hw11" {
                    (
                        StatusCode::OK,
                        Json(json!({"message": "Status updated successfully!", "data": {"_id": id, "status": body["status"]}})),
                    )
                } else {
                    (StatusCode::NOT_FOUND, Json(json!({"message": "Homework not found"})))
                }
            }),
        )
        .route(
            "/api/students/notices/{student_id}",
            get(|| async {
                Json(json!({"notices": [
                    {"_id": "n1", "title": "Sports day", "description": "Friday", "date": "2024-05-03", "postedBy": "Principal"}
                ]}))
            }),
        )
}

// =============================================================================
// Class rooms
// =============================================================================

#[tokio::test]
async fn test_classroom_save_appends_room() {
    let base = serve(backend()).await;
    let mut page = ClassRoomPage::new(context(&base));

    page.set_room_no("101");
    page.set_capacity("30");
    assert!(page.save().await);

    assert_eq!(page.success_message(), Some("Classroom added successfully!"));
    assert_eq!(page.error(), None);
    assert_eq!(page.rooms().len(), 1);
    assert_eq!(page.rooms()[0].id, "room-1");
    assert_eq!(page.form().room_no, "");

    let table = page.table();
    assert_eq!(table.cell_rows()[0], &["101", "30", "Remove"].map(String::from));

    assert!(page.remove("room-1"));
    assert!(page.table().is_empty_state());
}

#[tokio::test]
async fn test_classroom_requires_all_fields() {
    let base = dead_base_url().await;
    let mut page = ClassRoomPage::new(context(&base));

    page.set_room_no("101");
    assert!(!page.save().await);
    assert_eq!(page.error(), Some("Please fill in all fields."));

    page.set_capacity("-3");
    assert!(!page.save().await);
    assert!(page.error().unwrap().starts_with("Capacity must be a positive whole number"));
}

#[tokio::test]
async fn test_classroom_server_rejection_and_network_failure() {
    let base = serve(backend()).await;
    let mut page = ClassRoomPage::new(context(&base));
    page.set_room_no("999");
    page.set_capacity("20");
    assert!(!page.save().await);
    assert_eq!(page.error(), Some("Room 999 already exists"));
    assert_eq!(page.form().room_no, "999");

    let base = dead_base_url().await;
    let mut page = ClassRoomPage::new(context(&base));
    page.set_room_no("102");
    page.set_capacity("20");
    assert!(!page.save().await);
    assert_eq!(page.error(), Some("An error occurred while adding the classroom."));
    assert!(page.can_save());
}

// =============================================================================
// Issued books
// =============================================================================

#[tokio::test]
async fn test_issued_books_search_and_quick_search() {
    let base = serve(backend()).await;
    let mut page = IssuedBookPage::new(context(&base)).unwrap();

    assert!(page.search().await);
    let table = page.table();
    assert_eq!(table.cell_rows().len(), 2);
    assert_eq!(table.footer, "Showing 2 entries");
    assert_eq!(table.cell_rows()[0][5], "01/10/2024");

    page.set_quick_search("ROBERTS");
    let table = page.table();
    assert_eq!(table.cell_rows().len(), 1);
    assert_eq!(table.cell_rows()[0][0], "World History");

    page.set_quick_search("");
    page.set_subject("Science");
    assert!(page.search().await);
    assert_eq!(page.table().cell_rows().len(), 1);
}

#[tokio::test]
async fn test_issued_books_rejects_unknown_subject() {
    let base = dead_base_url().await;
    let mut page = IssuedBookPage::new(context(&base)).unwrap();
    page.set_subject("Astrology");

    assert!(!page.search().await);
    assert!(page.criteria_error().unwrap().starts_with("Subject must be one of"));
    assert_eq!(page.status(), ViewStatus::Idle);
}

#[tokio::test]
async fn test_issued_books_network_failure() {
    let base = dead_base_url().await;
    let mut page = IssuedBookPage::new(context(&base)).unwrap();

    assert!(page.search().await);
    assert_eq!(
        page.error().as_deref(),
        Some("Failed to fetch issued books. Please try again.")
    );
    assert!(page.table().is_empty_state());
    assert!(page.can_search());
}

// =============================================================================
// Attendance
// =============================================================================

#[tokio::test]
async fn test_student_attendance_month_year_filter() {
    let base = serve(backend()).await;
    let mut page = StudentAttendancePage::new(context(&base)).unwrap();

    assert!(page.load().await);
    assert_eq!(page.loading_text(), None);
    assert_eq!(page.table().cell_rows().len(), 3);

    page.set_month("March");
    page.set_year("2024");
    let table = page.table();
    assert_eq!(table.cell_rows().len(), 2);
    assert_eq!(table.cell_rows()[0], &["03/04/2024", "Present", "Math"].map(String::from));

    page.set_year("2023");
    let table = page.table();
    assert!(table.is_empty_state());
    assert_eq!(
        table.rows[0],
        RenderedRow::Placeholder {
            message: "No attendance records available for the selected month and year."
                .to_string(),
            span: 3
        }
    );
}

#[tokio::test]
async fn test_student_attendance_server_message() {
    let base = serve(backend()).await;
    let mut config = common::config(&base);
    config.identity.student_id = "someone-else".to_string();
    let page = StudentAttendancePage::new(PageContext::from_config(config).unwrap()).unwrap();

    assert!(page.load().await);
    assert_eq!(page.error().as_deref(), Some("Student not found"));
}

#[tokio::test]
async fn test_student_attendance_failure_messages() {
    let base = serve(backend()).await;
    let mut config = common::config(&base);
    config.identity.student_id = "broken".to_string();
    let page = StudentAttendancePage::new(PageContext::from_config(config).unwrap()).unwrap();

    assert!(page.load().await);
    assert_eq!(page.status(), ViewStatus::Failure("Error fetching attendance".to_string()));
    assert!(page.table().is_empty_state());

    let base = dead_base_url().await;
    let page = StudentAttendancePage::new(context(&base)).unwrap();
    assert!(page.load().await);
    assert_eq!(
        page.error().as_deref(),
        Some("An error occurred while fetching attendance")
    );
}

#[tokio::test]
async fn test_child_attendance_details_and_search() {
    let base = serve(backend()).await;
    let mut page = ChildAttendancePage::new(context(&base)).unwrap();

    assert!(page.table().is_none());
    assert_eq!(page.search_label(), "Search");

    assert!(page.load_details().await);
    let details = page.details().unwrap();
    assert_eq!(details.first_name, "Sara");
    assert_eq!(details.class, "5");
    assert_eq!(details.roll, "12");

    assert!(page.search().await);
    let table = page.table().unwrap();
    assert_eq!(
        table.cell_rows(),
        vec![
            &["2024-03-04: Present".to_string()][..],
            &["2024-04-01: Absent".to_string()][..],
        ]
    );

    page.set_month("April");
    assert_eq!(page.table().unwrap().cell_rows().len(), 1);
}

#[tokio::test]
async fn test_child_attendance_failures() {
    let base = dead_base_url().await;
    let mut page = ChildAttendancePage::new(context(&base)).unwrap();

    assert!(!page.load_details().await);
    assert_eq!(
        page.error().as_deref(),
        Some("Failed to fetch student details. Please try again.")
    );

    assert!(page.search().await);
    assert_eq!(
        page.error().as_deref(),
        Some("Failed to fetch attendance. Please try again.")
    );
    assert!(page.table().is_none());
}

#[test]
fn test_month_year_options() {
    assert_eq!(MonthYearFilter::months()[0], "January");
    assert_eq!(MonthYearFilter::recent_years().len(), 4);
}

// =============================================================================
// Homework
// =============================================================================

#[tokio::test]
async fn test_homework_class_and_section_selection() {
    let base = serve(backend()).await;
    let mut page = HomeworkPage::new(context(&base)).unwrap();
    assert!(page.load().await);

    assert_eq!(page.class_options(), vec!["5", "6"]);
    assert!(!page.section_enabled());
    assert!(page.section_options().is_empty());
    assert!(!page.select_section("A"));

    page.select_class("5");
    assert_eq!(page.section_options(), vec!["A", "B"]);
    assert!(page.select_section("B"));
    assert_eq!(page.table().cell_rows().len(), 3);

    page.select_class("6");
    assert_eq!(page.selected_section(), "");
    let table = page.table();
    assert_eq!(table.cell_rows().len(), 6);
    assert!(!table.pager.shown);

    page.select_class("7");
    let table = page.table();
    assert_eq!(
        table.rows,
        vec![RenderedRow::Placeholder {
            message: "No homework found for the selected class and section.".to_string(),
            span: 7
        }]
    );
}

#[tokio::test]
async fn test_homework_pager_over_all_classes() {
    let base = serve(backend()).await;
    let page = HomeworkPage::new(context(&base)).unwrap();
    assert!(page.load().await);

    let table = page.table();
    assert!(table.pager.shown);
    assert_eq!(table.cell_rows().len(), 10);
    assert_eq!(table.cell_rows()[0][2], "03/01/2024");
    assert_eq!(table.cell_rows()[0][4], "10");

    assert!(page.next_page());
    assert_eq!(page.table().cell_rows().len(), 2);
    assert!(!page.next_page());
    assert!(page.previous_page());
}

#[tokio::test]
async fn test_homework_status_update() {
    let base = serve(backend()).await;
    let mut page = HomeworkPage::new(context(&base)).unwrap();
    assert!(page.load().await);

    assert!(page.update_status("hw03", "Graded").await);
    let homeworks = page.homeworks();
    assert_eq!(homeworks[3].status, "Graded");
    assert_eq!(homeworks[3].homework_title, "Homework 3");
    assert_eq!(homeworks.len(), 12);
    assert_eq!(page.update_error(), None);

    assert!(!page.update_status("hw03", "Lost").await);
    assert_eq!(page.update_error(), Some("Unknown status: Lost"));
    assert!(!page.update_status("missing", "Graded").await);
}

#[tokio::test]
async fn test_homework_status_update_rejected_by_server() {
    let base = serve(backend()).await;
    let mut page = HomeworkPage::new(context(&base)).unwrap();
    assert!(page.load().await);

    assert!(!page.update_status("hw11", "Graded").await);
    assert_eq!(page.update_error(), Some("Homework not found"));
    assert_eq!(page.homeworks()[11].status, "Not Submitted");
    assert_eq!(page.homeworks().len(), 12);

    assert!(page.update_status("hw10", "Graded").await);
    assert_eq!(page.update_error(), None);
}

// =============================================================================
// Notices
// =============================================================================

#[tokio::test]
async fn test_notice_board_load() {
    let base = serve(backend()).await;
    let page = NoticeBoardPage::new(context(&base)).unwrap();
    assert!(page.load().await);

    let table = page.table();
    assert_eq!(
        table.cell_rows()[0],
        &["Sports day", "Friday", "05/03/2024", "Principal"].map(String::from)
    );
}

#[tokio::test]
async fn test_notice_board_network_failure() {
    let base = dead_base_url().await;
    let page = NoticeBoardPage::new(context(&base)).unwrap();
    assert!(page.load().await);

    assert_eq!(
        page.error().as_deref(),
        Some("An error occurred while fetching notices")
    );
    assert_eq!(page.status(), ViewStatus::Failure("An error occurred while fetching notices".to_string()));
    assert!(page.notices().is_empty());
}

// =============================================================================
// Local pages
// =============================================================================

#[test]
fn test_phone_call_log_is_local() {
    let mut page = PhoneCallLogPage::for_today(10);
    page.form.phone = "+44 20 7946 0958".to_string();
    assert!(page.submit());
    assert_eq!(page.calls().len(), 1);
    assert_eq!(page.form.phone, "");
}

#[test]
fn test_chat_list_create_group() {
    let mut page = ChatListPage::new(10);
    assert!(page.table().is_empty_state());
    let id = page.create_group("Science club").unwrap();
    assert_eq!(page.groups()[0].id, id);
}
