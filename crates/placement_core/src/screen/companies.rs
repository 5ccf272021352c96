//! Companies screen.

use super::crud::{CrudScreen, CrudStore};
use crate::model::company::{Company, CompanyDraft, CompanyId};
use crate::repo::company_repo::{CompanyRepository, SqliteCompanyRepository};
use crate::repo::{ListOrder, RepoResult};

pub type CompaniesScreen<'conn> = CrudScreen<SqliteCompanyRepository<'conn>>;

impl CrudStore for SqliteCompanyRepository<'_> {
    type Id = CompanyId;
    type Record = Company;
    type Draft = CompanyDraft;

    const ENTITY: &'static str = "company";
    const SUBJECT: &'static str = "companies";

    fn record_id(record: &Company) -> CompanyId {
        record.id
    }

    fn draft_from(record: &Company) -> CompanyDraft {
        CompanyDraft::from(record)
    }

    fn fetch(&self) -> RepoResult<Vec<Company>> {
        self.list_companies(ListOrder::NewestFirst)
    }

    fn insert(&self, draft: &CompanyDraft) -> RepoResult<CompanyId> {
        self.create_company(draft)
    }

    fn update(&self, id: CompanyId, draft: &CompanyDraft) -> RepoResult<()> {
        self.update_company(id, draft)
    }

    fn remove(&self, id: CompanyId) -> RepoResult<()> {
        self.delete_company(id)
    }
}
