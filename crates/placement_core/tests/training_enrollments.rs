use placement_core::db::open_db_in_memory;
use placement_core::repo::student_repo::{SqliteStudentRepository, StudentRepository};
use placement_core::repo::training_repo::{
    EnrollmentListQuery, SqliteTrainingRepository, TrainingRepository,
};
use placement_core::{
    CompletionStatus, EnrollmentDraft, ListOrder, RepoError, StudentDraft, TrainingProgramDraft,
    ValidationError,
};
use rusqlite::Connection;
use uuid::Uuid;

fn program(title: &str) -> TrainingProgramDraft {
    TrainingProgramDraft {
        title: title.to_string(),
        trainer_name: "Dr. Sen".to_string(),
        start_date: "2024-01-10".to_string(),
        end_date: "2024-02-10".to_string(),
        description: Some("Aptitude and interview prep".to_string()),
    }
}

fn seed_student(conn: &Connection, roll_number: &str) -> Uuid {
    SqliteStudentRepository::try_new(conn)
        .unwrap()
        .create_student(&StudentDraft {
            name: format!("Student {roll_number}"),
            roll_number: roll_number.to_string(),
            branch: "CSE".to_string(),
            year: 3,
            cgpa: 7.9,
            email: format!("{roll_number}@college.edu"),
            phone_number: "9000000000".to_string(),
            resume_link: None,
        })
        .unwrap()
}

fn enrollment(student_id: Uuid, training_id: Uuid) -> EnrollmentDraft {
    EnrollmentDraft {
        student_id,
        training_id,
        ..EnrollmentDraft::default()
    }
}

#[test]
fn program_create_then_list() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::try_new(&conn).unwrap();

    let id = repo.create_program(&program("Soft Skills")).unwrap();

    let programs = repo.list_programs(ListOrder::NewestFirst).unwrap();
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0].id, id);
    assert_eq!(programs[0].start_date, "2024-01-10");
    assert_eq!(
        programs[0].description.as_deref(),
        Some("Aptitude and interview prep")
    );
}

#[test]
fn program_with_reversed_dates_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::try_new(&conn).unwrap();

    let mut draft = program("Backwards");
    draft.start_date = "2024-03-01".to_string();
    draft.end_date = "2024-02-01".to_string();

    let err = repo.create_program(&draft).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::DateRangeReversed { .. })
    ));
}

#[test]
fn enrollment_defaults_and_joined_student() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::try_new(&conn).unwrap();
    let student_id = seed_student(&conn, "cs001");
    let training_id = repo.create_program(&program("DSA Bootcamp")).unwrap();

    repo.create_enrollment(&enrollment(student_id, training_id))
        .unwrap();

    let rows = repo
        .list_enrollment_details(&EnrollmentListQuery {
            training_id: Some(training_id),
        })
        .unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.enrollment.completion_status, CompletionStatus::Enrolled);
    assert_eq!(row.enrollment.attendance_percentage, 0.0);
    assert_eq!(
        row.student.as_ref().map(|s| s.roll_number.as_str()),
        Some("cs001")
    );
}

#[test]
fn duplicate_enrollment_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::try_new(&conn).unwrap();
    let student_id = seed_student(&conn, "cs001");
    let training_id = repo.create_program(&program("DSA Bootcamp")).unwrap();

    repo.create_enrollment(&enrollment(student_id, training_id))
        .unwrap();
    let err = repo
        .create_enrollment(&enrollment(student_id, training_id))
        .unwrap_err();

    assert!(matches!(err, RepoError::Constraint(_)));
    let rows = repo
        .list_enrollment_details(&EnrollmentListQuery::default())
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn update_enrollment_records_progress() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::try_new(&conn).unwrap();
    let student_id = seed_student(&conn, "cs001");
    let training_id = repo.create_program(&program("DSA Bootcamp")).unwrap();
    let enrollment_id = repo
        .create_enrollment(&enrollment(student_id, training_id))
        .unwrap();

    repo.update_enrollment(enrollment_id, 92.5, CompletionStatus::Completed)
        .unwrap();

    let rows = repo
        .list_enrollment_details(&EnrollmentListQuery::default())
        .unwrap();
    assert_eq!(rows[0].enrollment.attendance_percentage, 92.5);
    assert_eq!(rows[0].enrollment.completion_status, CompletionStatus::Completed);

    let err = repo
        .update_enrollment(enrollment_id, 120.0, CompletionStatus::Completed)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::OutOfRange { .. })
    ));
}

#[test]
fn deleting_program_cascades_enrollments() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::try_new(&conn).unwrap();
    let student_id = seed_student(&conn, "cs001");
    let kept = repo.create_program(&program("Kept")).unwrap();
    let removed = repo.create_program(&program("Removed")).unwrap();

    repo.create_enrollment(&enrollment(student_id, kept)).unwrap();
    repo.create_enrollment(&enrollment(student_id, removed))
        .unwrap();

    repo.delete_program(removed).unwrap();

    let rows = repo
        .list_enrollment_details(&EnrollmentListQuery::default())
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].enrollment.training_id, kept);
}

#[test]
fn deleting_student_cascades_enrollments() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::try_new(&conn).unwrap();
    let student_id = seed_student(&conn, "cs001");
    let training_id = repo.create_program(&program("DSA Bootcamp")).unwrap();
    repo.create_enrollment(&enrollment(student_id, training_id))
        .unwrap();

    SqliteStudentRepository::try_new(&conn)
        .unwrap()
        .delete_student(student_id)
        .unwrap();

    assert!(repo
        .list_enrollment_details(&EnrollmentListQuery::default())
        .unwrap()
        .is_empty());
}

#[test]
fn delete_enrollment_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainingRepository::try_new(&conn).unwrap();
    let student_id = seed_student(&conn, "cs001");
    let training_id = repo.create_program(&program("DSA Bootcamp")).unwrap();
    let enrollment_id = repo
        .create_enrollment(&enrollment(student_id, training_id))
        .unwrap();

    repo.delete_enrollment(enrollment_id).unwrap();

    assert!(repo
        .list_enrollment_details(&EnrollmentListQuery::default())
        .unwrap()
        .is_empty());
    assert!(matches!(
        repo.delete_enrollment(enrollment_id).unwrap_err(),
        RepoError::NotFound { .. }
    ));
}
