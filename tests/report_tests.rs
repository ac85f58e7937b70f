use chrono::NaiveDate;
use rollcall::{
    models::AttendanceStatus::{Absent, Present},
    repositories::{SqliteAttendanceRepository, SqliteStudentRepository},
    services::{AttendanceService, ReportService},
    test_utils::test_helpers,
};
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_dashboard_stats_on_empty_database() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let reports = ReportService::new(pool);

    let stats = reports.dashboard_stats().await.unwrap();

    assert_eq!(stats.total_students, 0);
    assert_eq!(stats.attendance_days, 0);
    assert_eq!(stats.total_records, 0);
    assert_eq!(stats.attendance_percentage, 0.0);
}

#[tokio::test]
async fn test_dashboard_stats_counts() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let alice = test_helpers::create_test_student(&pool, "R1", "Alice", None)
        .await
        .unwrap();
    let bob = test_helpers::create_test_student(&pool, "R2", "Bob", None)
        .await
        .unwrap();
    test_helpers::create_test_student(&pool, "R3", "Carol", None)
        .await
        .unwrap();

    test_helpers::insert_attendance(&pool, alice, date(2024, 1, 1), Present).await.unwrap();
    test_helpers::insert_attendance(&pool, bob, date(2024, 1, 1), Present).await.unwrap();
    test_helpers::insert_attendance(&pool, alice, date(2024, 1, 2), Present).await.unwrap();
    test_helpers::insert_attendance(&pool, bob, date(2024, 1, 2), Absent).await.unwrap();

    let stats = ReportService::new(pool).dashboard_stats().await.unwrap();

    assert_eq!(stats.total_students, 3);
    assert_eq!(stats.attendance_days, 2);
    assert_eq!(stats.total_records, 4);
    assert_eq!(stats.present_count, 3);
    assert_eq!(stats.attendance_percentage, 75.0);
}

#[tokio::test]
async fn test_student_report_tallies() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let bob = test_helpers::create_test_student(&pool, "R2", "Bob", None)
        .await
        .unwrap();
    let alice = test_helpers::create_test_student(&pool, "R1", "Alice", None)
        .await
        .unwrap();
    // Never marked
    test_helpers::create_test_student(&pool, "R3", "Carol", None)
        .await
        .unwrap();

    test_helpers::insert_attendance(&pool, alice, date(2024, 1, 1), Present).await.unwrap();
    test_helpers::insert_attendance(&pool, alice, date(2024, 1, 2), Present).await.unwrap();
    test_helpers::insert_attendance(&pool, alice, date(2024, 1, 3), Absent).await.unwrap();
    test_helpers::insert_attendance(&pool, bob, date(2024, 1, 1), Absent).await.unwrap();

    let report = ReportService::new(pool).student_report().await.unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report[0].roll_number, "R1");
    assert_eq!((report[0].present, report[0].absent), (2, 1));
    assert_eq!(report[1].name, "Bob");
    assert_eq!((report[1].present, report[1].absent), (0, 1));
}

#[tokio::test]
async fn test_date_range_is_inclusive() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let alice = test_helpers::create_test_student(&pool, "R1", "Alice", None)
        .await
        .unwrap();

    for d in [date(2023, 12, 31), date(2024, 1, 1), date(2024, 1, 15), date(2024, 1, 31), date(2024, 2, 1)] {
        test_helpers::insert_attendance(&pool, alice, d, Present).await.unwrap();
    }

    let service = AttendanceService::new(
        Arc::new(SqliteStudentRepository::new(pool.clone())),
        Arc::new(SqliteAttendanceRepository::new(pool)),
    );

    let january = service
        .records_between(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)))
        .await
        .unwrap();
    let dates: Vec<NaiveDate> = january.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 15), date(2024, 1, 31)]);

    assert!(service
        .records_between(Some(date(2024, 1, 1)), None)
        .await
        .unwrap()
        .is_empty());
    assert!(service
        .records_between(None, Some(date(2024, 1, 31)))
        .await
        .unwrap()
        .is_empty());
}
