//! `SeaORM` implementation of the `BugRegistry` trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::db::Store;
use crate::models::{Bug, BugId, NewBug, UserId};
use crate::services::CredentialStore;
use crate::services::bug_registry::{BugError, BugRegistry, MAX_TAG_LEN, MAX_TITLE_LEN};

pub struct SeaOrmBugRegistry {
    store: Store,
    credentials: Arc<dyn CredentialStore>,
}

impl SeaOrmBugRegistry {
    #[must_use]
    pub fn new(store: Store, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { store, credentials }
    }
}

fn validate(bug: &NewBug) -> Result<(), BugError> {
    if bug.title.trim().is_empty() {
        return Err(BugError::Validation("Title is required".to_string()));
    }
    if bug.title.chars().count() > MAX_TITLE_LEN {
        return Err(BugError::Validation(format!(
            "Title must be {MAX_TITLE_LEN} characters or less"
        )));
    }
    if bug.description.trim().is_empty() {
        return Err(BugError::Validation("Description is required".to_string()));
    }
    if let Some(tag) = &bug.tag
        && tag.chars().count() > MAX_TAG_LEN
    {
        return Err(BugError::Validation(format!(
            "Tag must be {MAX_TAG_LEN} characters or less"
        )));
    }
    Ok(())
}

#[async_trait]
impl BugRegistry for SeaOrmBugRegistry {
    async fn create_bug(&self, bug: NewBug, reporter: UserId) -> Result<BugId, BugError> {
        validate(&bug)?;

        let reported_by = self
            .credentials
            .username_of(reporter)
            .await?
            .ok_or(BugError::MissingReporter(reporter))?;

        let id = self.store.insert_bug(&bug, &reported_by).await?;
        metrics::counter!("bugs_reported_total").increment(1);

        Ok(id)
    }

    async fn list_bugs(&self) -> Result<Vec<Bug>, BugError> {
        Ok(self.store.list_bugs().await?)
    }
}
