//! Students screen.

use super::crud::{CrudScreen, CrudStore};
use crate::model::student::{Student, StudentDraft, StudentId};
use crate::repo::student_repo::{SqliteStudentRepository, StudentListQuery, StudentRepository};
use crate::repo::RepoResult;

pub type StudentsScreen<'conn> = CrudScreen<SqliteStudentRepository<'conn>>;

impl CrudStore for SqliteStudentRepository<'_> {
    type Id = StudentId;
    type Record = Student;
    type Draft = StudentDraft;

    const ENTITY: &'static str = "student";
    const SUBJECT: &'static str = "students";

    fn record_id(record: &Student) -> StudentId {
        record.id
    }

    fn draft_from(record: &Student) -> StudentDraft {
        StudentDraft::from(record)
    }

    fn fetch(&self) -> RepoResult<Vec<Student>> {
        self.list_students(&StudentListQuery::default())
    }

    fn insert(&self, draft: &StudentDraft) -> RepoResult<StudentId> {
        self.create_student(draft)
    }

    fn update(&self, id: StudentId, draft: &StudentDraft) -> RepoResult<()> {
        self.update_student(id, draft)
    }

    fn remove(&self, id: StudentId) -> RepoResult<()> {
        self.delete_student(id)
    }
}
