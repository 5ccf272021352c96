use placement_core::db::open_db_in_memory;
use placement_core::repo::application_repo::{
    ApplicationListQuery, ApplicationRepository, SqliteApplicationRepository,
};
use placement_core::repo::company_repo::{CompanyRepository, SqliteCompanyRepository};
use placement_core::repo::job_profile_repo::{JobProfileRepository, SqliteJobProfileRepository};
use placement_core::repo::student_repo::{SqliteStudentRepository, StudentRepository};
use placement_core::{
    ApplicationDraft, ApplicationStatus, CompanyDraft, JobProfileDraft, RepoError, StudentDraft,
    ValidationError,
};
use rusqlite::Connection;
use uuid::Uuid;

struct Seed {
    student_id: Uuid,
    other_student_id: Uuid,
    job_id: Uuid,
}

fn seed(conn: &Connection) -> Seed {
    let companies = SqliteCompanyRepository::try_new(conn).unwrap();
    let jobs = SqliteJobProfileRepository::try_new(conn).unwrap();
    let students = SqliteStudentRepository::try_new(conn).unwrap();

    let company_id = companies
        .create_company(&CompanyDraft {
            company_name: "Acme".to_string(),
            location: "Pune".to_string(),
            industry_type: "IT".to_string(),
            hr_name: "Riya".to_string(),
            hr_contact: "riya@acme.example".to_string(),
        })
        .unwrap();
    let job_id = jobs
        .create_job_profile(&JobProfileDraft {
            company_id,
            role: "SDE".to_string(),
            package: 14.0,
        })
        .unwrap();

    let student = |name: &str, roll: &str| StudentDraft {
        name: name.to_string(),
        roll_number: roll.to_string(),
        branch: "CSE".to_string(),
        year: 4,
        cgpa: 8.0,
        email: format!("{roll}@college.edu"),
        phone_number: "9000000001".to_string(),
        resume_link: None,
    };
    let student_id = students.create_student(&student("Asha", "cs001")).unwrap();
    let other_student_id = students.create_student(&student("Ravi", "cs002")).unwrap();

    Seed {
        student_id,
        other_student_id,
        job_id,
    }
}

fn apply(student_id: Uuid, job_id: Uuid) -> ApplicationDraft {
    ApplicationDraft {
        student_id,
        job_id,
        ..ApplicationDraft::default()
    }
}

#[test]
fn new_application_defaults_to_applied() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed(&conn);
    let repo = SqliteApplicationRepository::try_new(&conn).unwrap();

    let id = repo
        .create_application(&apply(seed.student_id, seed.job_id))
        .unwrap();

    let stored = repo.get_application(id).unwrap().unwrap();
    assert_eq!(stored.application_status, ApplicationStatus::Applied);
    assert_eq!(stored.student_id, seed.student_id);
    assert_eq!(stored.job_id, seed.job_id);
}

#[test]
fn duplicate_application_is_rejected_and_list_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed(&conn);
    let repo = SqliteApplicationRepository::try_new(&conn).unwrap();

    repo.create_application(&apply(seed.student_id, seed.job_id))
        .unwrap();
    let before = repo
        .list_applications(&ApplicationListQuery::default())
        .unwrap();

    let err = repo
        .create_application(&apply(seed.student_id, seed.job_id))
        .unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));

    let after = repo
        .list_applications(&ApplicationListQuery::default())
        .unwrap();
    assert_eq!(before, after);
}

#[test]
fn status_update_changes_only_status() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed(&conn);
    let repo = SqliteApplicationRepository::try_new(&conn).unwrap();
    let id = repo
        .create_application(&apply(seed.student_id, seed.job_id))
        .unwrap();

    repo.update_application_status(id, ApplicationStatus::Selected)
        .unwrap();

    let stored = repo.get_application(id).unwrap().unwrap();
    assert_eq!(stored.application_status, ApplicationStatus::Selected);
    assert_eq!(stored.student_id, seed.student_id);

    let missing = repo
        .update_application_status(Uuid::new_v4(), ApplicationStatus::Rejected)
        .unwrap_err();
    assert!(matches!(missing, RepoError::NotFound { .. }));
}

#[test]
fn details_join_student_job_and_company() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed(&conn);
    let repo = SqliteApplicationRepository::try_new(&conn).unwrap();

    repo.create_application(&apply(seed.student_id, seed.job_id))
        .unwrap();
    repo.create_application(&apply(seed.other_student_id, seed.job_id))
        .unwrap();

    let details = repo
        .list_application_details(&ApplicationListQuery::default())
        .unwrap();
    assert_eq!(details.len(), 2);

    let newest = &details[0];
    assert_eq!(
        newest.student.as_ref().map(|s| s.name.as_str()),
        Some("Ravi")
    );
    assert_eq!(newest.job.as_ref().map(|j| j.role.as_str()), Some("SDE"));
    assert_eq!(
        newest.company.as_ref().map(|c| c.company_name.as_str()),
        Some("Acme")
    );
}

#[test]
fn list_filters_by_status() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed(&conn);
    let repo = SqliteApplicationRepository::try_new(&conn).unwrap();

    let selected = repo
        .create_application(&apply(seed.student_id, seed.job_id))
        .unwrap();
    repo.create_application(&apply(seed.other_student_id, seed.job_id))
        .unwrap();
    repo.update_application_status(selected, ApplicationStatus::Selected)
        .unwrap();

    let rows = repo
        .list_application_details(&ApplicationListQuery {
            status: Some(ApplicationStatus::Selected),
        })
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].application.id, selected);
}

#[test]
fn deleting_job_profile_cascades_applications() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed(&conn);
    let repo = SqliteApplicationRepository::try_new(&conn).unwrap();
    repo.create_application(&apply(seed.student_id, seed.job_id))
        .unwrap();

    SqliteJobProfileRepository::try_new(&conn)
        .unwrap()
        .delete_job_profile(seed.job_id)
        .unwrap();

    assert!(repo
        .list_applications(&ApplicationListQuery::default())
        .unwrap()
        .is_empty());
}

#[test]
fn delete_application_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed(&conn);
    let repo = SqliteApplicationRepository::try_new(&conn).unwrap();
    let id = repo
        .create_application(&apply(seed.student_id, seed.job_id))
        .unwrap();

    repo.delete_application(id).unwrap();

    assert!(repo.get_application(id).unwrap().is_none());
}

#[test]
fn unpicked_student_or_job_is_a_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed(&conn);
    let repo = SqliteApplicationRepository::try_new(&conn).unwrap();

    let err = repo
        .create_application(&ApplicationDraft::default())
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyField("student_id"))
    ));

    let err = repo
        .create_application(&ApplicationDraft {
            student_id: seed.student_id,
            ..ApplicationDraft::default()
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyField("job_id"))
    ));
    assert!(repo
        .list_applications(&ApplicationListQuery::default())
        .unwrap()
        .is_empty());
}
