// src/store.rs
// User record and the persistence port it lives behind

use crate::error::Result;
use chrono::NaiveDateTime;

/// Cached credentials for one known email.
///
/// Created on first successful authentication, refreshed in place when
/// the token goes stale, never deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub email: String,
    pub token: String,
    pub person_id: i64,
    pub initialized_at: NaiveDateTime,
}

/// Narrow persistence port for user records.
///
/// `email` is the uniqueness key. `update` overwrites the token and
/// timestamp of the stored record; the person id is written once at
/// creation and assumed stable afterwards.
pub trait UserStore: Send + Sync {
    fn create(&self, record: &UserRecord) -> Result<UserRecord>;
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;
    fn update(&self, record: &UserRecord) -> Result<UserRecord>;
}
