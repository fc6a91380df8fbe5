// src/service.rs
// Work logging service and its credential freshness policy

use crate::error::Result;
use crate::store::{UserRecord, UserStore};
use crate::timesheet::{Project, TimesheetApi};
use crate::types::WorkEntry;
use chrono::{NaiveDateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// Cached tokens older than this are re-issued before use
const TOKEN_TTL_DAYS: i64 = 7;

/// Orchestrates credential caching and entry submission.
///
/// Every operation resolves a usable token first (0-2 remote calls,
/// depending on cache state) and then performs exactly one remote call
/// with it.
pub struct WorkLogService {
    store: Arc<dyn UserStore>,
    api: Arc<dyn TimesheetApi>,
}

impl WorkLogService {
    pub fn new(store: Arc<dyn UserStore>, api: Arc<dyn TimesheetApi>) -> Self {
        Self { store, api }
    }

    /// Submit one work entry on behalf of the user
    pub async fn log_work(&self, email: &str, password: &str, entry: &WorkEntry) -> Result<()> {
        let record = self.resolve_credentials(email, password).await?;
        self.api
            .submit_entry(&record.token, record.person_id, entry)
            .await
    }

    /// List projects visible to the user, with the same token reuse as log_work
    pub async fn list_projects(&self, email: &str, password: &str) -> Result<Vec<Project>> {
        let record = self.resolve_credentials(email, password).await?;
        self.api.fetch_projects(&record.token).await
    }

    /// Return a user record whose token is fresh enough to use.
    ///
    /// Unknown email: authenticate, fetch the person identity, persist a
    /// new record. Known but stale: re-authenticate and overwrite token
    /// and timestamp; the person id is assumed stable and is not
    /// re-fetched. Known and fresh: no remote calls.
    async fn resolve_credentials(&self, email: &str, password: &str) -> Result<UserRecord> {
        let now = Utc::now().naive_utc();

        match self.store.find_by_email(email)? {
            None => {
                debug!("No cached credentials for {}, authenticating", email);
                let token = self.api.authenticate(email, password).await?;
                let person = self.api.fetch_person(&token).await?;
                self.store.create(&UserRecord {
                    email: email.to_string(),
                    token,
                    person_id: person.person_id,
                    initialized_at: now,
                })
            }
            Some(mut record) if is_stale(record.initialized_at, now) => {
                debug!("Cached token for {} is stale, re-authenticating", email);
                record.token = self.api.authenticate(email, password).await?;
                record.initialized_at = now;
                self.store.update(&record)
            }
            Some(record) => Ok(record),
        }
    }
}

fn is_stale(initialized_at: NaiveDateTime, now: NaiveDateTime) -> bool {
    now - initialized_at >= chrono::Duration::days(TOKEN_TTL_DAYS)
}
