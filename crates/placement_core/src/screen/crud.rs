//! Generic create/read/update/delete screen.
//!
//! Every entity screen follows the same loop: fetch rows, open a form,
//! submit an insert or update, delete, refetch. `CrudScreen` implements the
//! loop once; `CrudStore` supplies the entity-specific calls.

use super::{capitalize, Alert, ScreenError, WriteAction};
use crate::repo::{RepoError, RepoResult};
use crate::stats::count;
use log::{error, info};
use std::fmt::Display;

/// Entity-specific store operations used by [`CrudScreen`].
pub trait CrudStore {
    type Id: Copy + PartialEq + Display;
    type Record: Clone;
    type Draft: Clone + Default;

    /// Singular lowercase entity label, e.g. `student`.
    const ENTITY: &'static str;
    /// Plural label used in fetch logs, e.g. `students`.
    const SUBJECT: &'static str;

    fn record_id(record: &Self::Record) -> Self::Id;
    fn draft_from(record: &Self::Record) -> Self::Draft;

    fn fetch(&self) -> RepoResult<Vec<Self::Record>>;
    fn insert(&self, draft: &Self::Draft) -> RepoResult<Self::Id>;
    fn update(&self, id: Self::Id, draft: &Self::Draft) -> RepoResult<()>;
    fn remove(&self, id: Self::Id) -> RepoResult<()>;

    /// Alert text for a failed write.
    fn failure_message(action: WriteAction, _error: &RepoError) -> String {
        format!("Error {} {}", action.progressive(), Self::ENTITY)
    }

    /// Alert text for a successful write.
    fn success_message(action: WriteAction) -> String {
        format!("{} {} successfully!", capitalize(Self::ENTITY), action.past())
    }
}

/// Whether the open form creates a new row or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Edit(Id),
}

/// Open modal form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<Id, Draft> {
    pub mode: FormMode<Id>,
    pub draft: Draft,
}

/// View-model for one CRUD screen.
pub struct CrudScreen<S: CrudStore> {
    store: S,
    rows: Vec<S::Record>,
    loading: bool,
    form: Option<FormState<S::Id, S::Draft>>,
    alert: Option<Alert>,
    fetch_error: Option<ScreenError>,
}

impl<S: CrudStore> CrudScreen<S> {
    /// Creates an empty screen in the loading state without fetching.
    pub fn new(store: S) -> Self {
        Self {
            store,
            rows: Vec::new(),
            loading: true,
            form: None,
            alert: None,
            fetch_error: None,
        }
    }

    /// Creates the screen and performs the initial fetch.
    pub fn mount(store: S) -> Self {
        let mut screen = Self::new(store);
        screen.reload();
        screen
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rows(&self) -> &[S::Record] {
        &self.rows
    }

    /// Number of listed rows; zero before the first successful fetch.
    pub fn row_count(&self) -> usize {
        count(Some(self.rows.as_slice()))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn form(&self) -> Option<&FormState<S::Id, S::Draft>> {
        self.form.as_ref()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Dismisses and returns the pending alert.
    pub fn take_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    /// Error from the most recent fetch, cleared by a successful one.
    pub fn fetch_error(&self) -> Option<&ScreenError> {
        self.fetch_error.as_ref()
    }

    pub fn find(&self, id: S::Id) -> Option<&S::Record> {
        self.rows.iter().find(|record| S::record_id(record) == id)
    }

    /// Refetches rows. Returns `false` when the fetch failed.
    pub fn reload(&mut self) -> bool {
        self.loading = true;
        let result = self.store.fetch();
        self.loading = false;

        match result {
            Ok(rows) => {
                info!(
                    "event=screen_reload module=screen status=ok subject={} rows={}",
                    S::SUBJECT,
                    rows.len()
                );
                self.rows = rows;
                self.fetch_error = None;
                true
            }
            Err(err) => {
                error!(
                    "event=screen_reload module=screen status=error subject={} error={}",
                    S::SUBJECT,
                    err
                );
                self.fetch_error = Some(ScreenError::Fetch {
                    subject: S::SUBJECT,
                    source: err,
                });
                false
            }
        }
    }

    /// Opens an empty create form.
    pub fn open_create(&mut self) {
        self.form = Some(FormState {
            mode: FormMode::Create,
            draft: S::Draft::default(),
        });
    }

    /// Opens an edit form prefilled from the listed row.
    pub fn open_edit(&mut self, id: S::Id) -> Result<(), ScreenError> {
        let record = self
            .find(id)
            .ok_or_else(|| ScreenError::UnknownRow(id.to_string()))?;
        let draft = S::draft_from(record);
        self.form = Some(FormState {
            mode: FormMode::Edit(id),
            draft,
        });
        Ok(())
    }

    /// Applies a change to the open form's draft.
    pub fn edit_form(&mut self, change: impl FnOnce(&mut S::Draft)) -> Result<(), ScreenError> {
        let form = self.form.as_mut().ok_or(ScreenError::NoOpenForm)?;
        change(&mut form.draft);
        Ok(())
    }

    /// Closes the form and discards the draft.
    pub fn reset_form(&mut self) {
        self.form = None;
    }

    /// Submits the open form, then resets it and refetches.
    pub fn submit(&mut self) -> Result<(), ScreenError> {
        let form = self.form.take().ok_or(ScreenError::NoOpenForm)?;
        let (action, result) = match form.mode {
            FormMode::Create => (
                WriteAction::Create,
                self.store.insert(&form.draft).map(|_| ()),
            ),
            FormMode::Edit(id) => (WriteAction::Update, self.store.update(id, &form.draft)),
        };

        let outcome = self.record_write(action, result);
        self.reload();
        outcome
    }

    /// Deletes one row; refetches only when the delete succeeded.
    pub fn delete(&mut self, id: S::Id) -> Result<(), ScreenError> {
        let result = self.store.remove(id);
        let outcome = self.record_write(WriteAction::Delete, result);
        if outcome.is_ok() {
            self.reload();
        }
        outcome
    }

    fn record_write(
        &mut self,
        action: WriteAction,
        result: RepoResult<()>,
    ) -> Result<(), ScreenError> {
        match result {
            Ok(()) => {
                info!(
                    "event=screen_write module=screen status=ok entity={} action={}",
                    S::ENTITY,
                    action.past()
                );
                self.alert = Some(Alert::success(S::success_message(action)));
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=screen_write module=screen status=error entity={} action={} error={}",
                    S::ENTITY,
                    action.progressive(),
                    err
                );
                self.alert = Some(Alert::error(S::failure_message(action, &err)));
                Err(ScreenError::Write {
                    action,
                    entity: S::ENTITY,
                    source: err,
                })
            }
        }
    }
}
