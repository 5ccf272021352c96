use placement_core::db::open_db_in_memory;
use placement_core::repo::student_repo::{
    SqliteStudentRepository, StudentListQuery, StudentRepository,
};
use placement_core::{ListOrder, RepoError, StudentDraft, ValidationError};

fn student(name: &str, roll_number: &str, branch: &str) -> StudentDraft {
    StudentDraft {
        name: name.to_string(),
        roll_number: roll_number.to_string(),
        branch: branch.to_string(),
        year: 4,
        cgpa: 8.4,
        email: format!("{}@college.edu", roll_number.to_lowercase()),
        phone_number: "9876543210".to_string(),
        resume_link: None,
    }
}

#[test]
fn create_then_list_returns_one_matching_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let mut draft = student("Asha Rao", "CS001", "CSE");
    draft.resume_link = Some(" https://cv.example.com/asha ".to_string());
    let id = repo.create_student(&draft).unwrap();

    let students = repo.list_students(&StudentListQuery::default()).unwrap();
    assert_eq!(students.len(), 1);
    let stored = &students[0];
    assert_eq!(stored.id, id);
    assert_eq!(stored.name, "Asha Rao");
    assert_eq!(stored.roll_number, "CS001");
    assert_eq!(stored.year, 4);
    assert!((stored.cgpa - 8.4).abs() < f64::EPSILON);
    assert_eq!(
        stored.resume_link.as_deref(),
        Some("https://cv.example.com/asha")
    );
}

#[test]
fn blank_resume_link_is_stored_as_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let mut draft = student("Ravi", "EC010", "ECE");
    draft.resume_link = Some("   ".to_string());
    let id = repo.create_student(&draft).unwrap();

    let stored = repo.get_student(id).unwrap().unwrap();
    assert_eq!(stored.resume_link, None);
}

#[test]
fn duplicate_roll_number_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    repo.create_student(&student("Asha", "CS001", "CSE")).unwrap();
    let err = repo
        .create_student(&student("Another Asha", "CS001", "IT"))
        .unwrap_err();

    assert!(matches!(err, RepoError::Constraint(_)));
    assert_eq!(
        repo.list_students(&StudentListQuery::default())
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn validation_rejects_out_of_range_values() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let mut bad_year = student("Kiran", "ME001", "ME");
    bad_year.year = 5;
    assert!(matches!(
        repo.create_student(&bad_year).unwrap_err(),
        RepoError::Validation(ValidationError::OutOfRange { field: "year", .. })
    ));

    let mut bad_cgpa = student("Kiran", "ME001", "ME");
    bad_cgpa.cgpa = 10.5;
    assert!(matches!(
        repo.create_student(&bad_cgpa).unwrap_err(),
        RepoError::Validation(ValidationError::OutOfRange { field: "cgpa", .. })
    ));

    let mut bad_email = student("Kiran", "ME001", "ME");
    bad_email.email = "not-an-email".to_string();
    assert!(matches!(
        repo.create_student(&bad_email).unwrap_err(),
        RepoError::Validation(ValidationError::InvalidEmail(_))
    ));

    assert!(repo
        .list_students(&StudentListQuery::default())
        .unwrap()
        .is_empty());
}

#[test]
fn update_changes_stored_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    let id = repo.create_student(&student("Asha", "CS001", "CSE")).unwrap();

    let mut draft = student("Asha R", "CS001", "IT");
    draft.cgpa = 9.0;
    repo.update_student(id, &draft).unwrap();

    let stored = repo.get_student(id).unwrap().unwrap();
    assert_eq!(stored.name, "Asha R");
    assert_eq!(stored.branch, "IT");
    assert!((stored.cgpa - 9.0).abs() < f64::EPSILON);
}

#[test]
fn delete_removes_only_that_student() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let keep = repo.create_student(&student("Asha", "CS001", "CSE")).unwrap();
    let drop_id = repo.create_student(&student("Ravi", "EC010", "ECE")).unwrap();

    repo.delete_student(drop_id).unwrap();

    let students = repo.list_students(&StudentListQuery::default()).unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].id, keep);
    assert!(repo.get_student(drop_id).unwrap().is_none());
}

#[test]
fn list_filters_by_branch_and_sorts_by_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    repo.create_student(&student("zoya", "CS003", "CSE")).unwrap();
    repo.create_student(&student("Ravi", "EC010", "ECE")).unwrap();
    repo.create_student(&student("Asha", "CS001", "CSE")).unwrap();

    let cse = repo
        .list_students(&StudentListQuery {
            order: ListOrder::Alphabetical,
            branch: Some("CSE".to_string()),
        })
        .unwrap();
    let names: Vec<&str> = cse.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Asha", "zoya"]);
}

#[test]
fn email_without_dotted_domain_is_accepted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let mut draft = student("Asha", "CS001", "CSE");
    draft.email = "asha@campus".to_string();
    let id = repo.create_student(&draft).unwrap();

    assert_eq!(repo.get_student(id).unwrap().unwrap().email, "asha@campus");
}
