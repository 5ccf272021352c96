//! Applications screen.
//!
//! Lists applications joined with student, job profile and company, and
//! offers student/job pickers for the create form. Editing changes the
//! status only.

use super::crud::{CrudScreen, CrudStore};
use super::{Alert, ScreenError, WriteAction};
use crate::model::application::{
    ApplicationDetails, ApplicationDraft, ApplicationId, ApplicationStatus,
};
use crate::model::job_profile::JobProfileWithCompany;
use crate::model::student::Student;
use crate::repo::application_repo::{
    ApplicationListQuery, ApplicationRepository, SqliteApplicationRepository,
};
use crate::repo::job_profile_repo::{JobProfileRepository, SqliteJobProfileRepository};
use crate::repo::student_repo::{SqliteStudentRepository, StudentListQuery, StudentRepository};
use crate::repo::{ListOrder, RepoError, RepoResult};
use log::error;

impl CrudStore for SqliteApplicationRepository<'_> {
    type Id = ApplicationId;
    type Record = ApplicationDetails;
    type Draft = ApplicationDraft;

    const ENTITY: &'static str = "application";
    const SUBJECT: &'static str = "applications";

    fn record_id(record: &ApplicationDetails) -> ApplicationId {
        record.application.id
    }

    fn draft_from(record: &ApplicationDetails) -> ApplicationDraft {
        ApplicationDraft::from(&record.application)
    }

    fn fetch(&self) -> RepoResult<Vec<ApplicationDetails>> {
        self.list_application_details(&ApplicationListQuery::default())
    }

    fn insert(&self, draft: &ApplicationDraft) -> RepoResult<ApplicationId> {
        self.create_application(draft)
    }

    fn update(&self, id: ApplicationId, draft: &ApplicationDraft) -> RepoResult<()> {
        self.update_application_status(id, draft.application_status)
    }

    fn remove(&self, id: ApplicationId) -> RepoResult<()> {
        self.delete_application(id)
    }

    fn failure_message(action: WriteAction, error: &RepoError) -> String {
        match (action, error) {
            (WriteAction::Create, RepoError::Constraint(_)) => {
                "Error creating application. Student may have already applied for this job."
                    .to_string()
            }
            (other, _) => format!("Error {} application", other.progressive()),
        }
    }
}

/// Application listing, pickers and form.
pub struct ApplicationsScreen<'conn> {
    applications: CrudScreen<SqliteApplicationRepository<'conn>>,
    student_repo: SqliteStudentRepository<'conn>,
    job_repo: SqliteJobProfileRepository<'conn>,
    students: Vec<Student>,
    jobs: Vec<JobProfileWithCompany>,
}

impl<'conn> ApplicationsScreen<'conn> {
    pub fn mount(
        applications: SqliteApplicationRepository<'conn>,
        student_repo: SqliteStudentRepository<'conn>,
        job_repo: SqliteJobProfileRepository<'conn>,
    ) -> Self {
        let mut screen = Self {
            applications: CrudScreen::new(applications),
            student_repo,
            job_repo,
            students: Vec::new(),
            jobs: Vec::new(),
        };
        screen.reload();
        screen
    }

    pub fn applications(&self) -> &CrudScreen<SqliteApplicationRepository<'conn>> {
        &self.applications
    }

    pub fn applications_mut(&mut self) -> &mut CrudScreen<SqliteApplicationRepository<'conn>> {
        &mut self.applications
    }

    /// Student picker, ordered by name.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Job picker, ordered by role.
    pub fn jobs(&self) -> &[JobProfileWithCompany] {
        &self.jobs
    }

    /// Applications currently listed with the given status.
    pub fn with_status(&self, status: ApplicationStatus) -> Vec<&ApplicationDetails> {
        self.applications
            .rows()
            .iter()
            .filter(|details| details.application.application_status == status)
            .collect()
    }

    pub fn take_alert(&mut self) -> Option<Alert> {
        self.applications.take_alert()
    }

    /// Refetches the listing and both pickers; each read fails independently.
    pub fn reload(&mut self) -> bool {
        let applications_ok = self.applications.reload();

        let students_ok = match self.student_repo.list_students(&StudentListQuery {
            order: ListOrder::Alphabetical,
            branch: None,
        }) {
            Ok(students) => {
                self.students = students;
                true
            }
            Err(err) => {
                error!(
                    "event=screen_reload module=screen status=error subject=students error={}",
                    err
                );
                false
            }
        };

        let jobs_ok = match self
            .job_repo
            .list_job_profiles_with_company(ListOrder::Alphabetical)
        {
            Ok(jobs) => {
                self.jobs = jobs;
                true
            }
            Err(err) => {
                error!(
                    "event=screen_reload module=screen status=error subject=job_profiles error={}",
                    err
                );
                false
            }
        };

        applications_ok && students_ok && jobs_ok
    }

    /// Opens an empty application form with status `Applied`.
    pub fn open_create(&mut self) {
        self.applications.open_create();
    }

    pub fn submit(&mut self) -> Result<(), ScreenError> {
        self.applications.submit()
    }
}
