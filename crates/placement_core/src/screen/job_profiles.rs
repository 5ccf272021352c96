//! Job profiles screen.
//!
//! Rows carry their company so the table can show the company name; the
//! company picker is refreshed alongside the rows.

use super::crud::{CrudScreen, CrudStore};
use super::{Alert, ScreenError};
use crate::model::company::Company;
use crate::model::job_profile::{JobProfileDraft, JobProfileId, JobProfileWithCompany};
use crate::repo::company_repo::{CompanyRepository, SqliteCompanyRepository};
use crate::repo::job_profile_repo::{JobProfileRepository, SqliteJobProfileRepository};
use crate::repo::{ListOrder, RepoResult};
use log::error;

impl CrudStore for SqliteJobProfileRepository<'_> {
    type Id = JobProfileId;
    type Record = JobProfileWithCompany;
    type Draft = JobProfileDraft;

    const ENTITY: &'static str = "job profile";
    const SUBJECT: &'static str = "job_profiles";

    fn record_id(record: &JobProfileWithCompany) -> JobProfileId {
        record.job.id
    }

    fn draft_from(record: &JobProfileWithCompany) -> JobProfileDraft {
        JobProfileDraft::from(&record.job)
    }

    fn fetch(&self) -> RepoResult<Vec<JobProfileWithCompany>> {
        self.list_job_profiles_with_company(ListOrder::NewestFirst)
    }

    fn insert(&self, draft: &JobProfileDraft) -> RepoResult<JobProfileId> {
        self.create_job_profile(draft)
    }

    fn update(&self, id: JobProfileId, draft: &JobProfileDraft) -> RepoResult<()> {
        self.update_job_profile(id, draft)
    }

    fn remove(&self, id: JobProfileId) -> RepoResult<()> {
        self.delete_job_profile(id)
    }
}

/// Job profile CRUD plus the company picker.
pub struct JobProfilesScreen<'conn> {
    jobs: CrudScreen<SqliteJobProfileRepository<'conn>>,
    company_repo: SqliteCompanyRepository<'conn>,
    companies: Vec<Company>,
}

impl<'conn> JobProfilesScreen<'conn> {
    pub fn mount(
        jobs: SqliteJobProfileRepository<'conn>,
        company_repo: SqliteCompanyRepository<'conn>,
    ) -> Self {
        let mut screen = Self {
            jobs: CrudScreen::new(jobs),
            company_repo,
            companies: Vec::new(),
        };
        screen.reload();
        screen
    }

    pub fn jobs(&self) -> &CrudScreen<SqliteJobProfileRepository<'conn>> {
        &self.jobs
    }

    pub fn jobs_mut(&mut self) -> &mut CrudScreen<SqliteJobProfileRepository<'conn>> {
        &mut self.jobs
    }

    /// Companies offered by the picker, alphabetical.
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn take_alert(&mut self) -> Option<Alert> {
        self.jobs.take_alert()
    }

    /// Refetches job profiles and the company picker independently.
    pub fn reload(&mut self) -> bool {
        let jobs_ok = self.jobs.reload();
        let companies_ok = self.reload_companies();
        jobs_ok && companies_ok
    }

    /// Submits the open job form and refreshes the picker too.
    pub fn submit(&mut self) -> Result<(), ScreenError> {
        let outcome = self.jobs.submit();
        self.reload_companies();
        outcome
    }

    fn reload_companies(&mut self) -> bool {
        match self.company_repo.list_companies(ListOrder::Alphabetical) {
            Ok(companies) => {
                self.companies = companies;
                true
            }
            Err(err) => {
                error!(
                    "event=screen_reload module=screen status=error subject=companies error={}",
                    err
                );
                false
            }
        }
    }
}
