//! Test utilities for Tally integration tests

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tally::db::Database;
use tally::error::{Result, TallyError};
use tally::mcp::{Credentials, TallyServer};
use tally::service::WorkLogService;
use tally::store::{UserRecord, UserStore};
use tally::timesheet::{Person, Project, ProjectClient, TimesheetApi};
use tally::types::WorkEntry;

pub const TEST_EMAIL: &str = "a@b.com";
pub const TEST_PASSWORD: &str = "hunter2";

/// Scripted remote service that records every call
#[derive(Default)]
pub struct ScriptedApi {
    pub token: String,
    pub person_id: i64,
    pub fail_auth: bool,
    pub fail_submit: bool,
    pub projects: Vec<Project>,
    pub auth_calls: AtomicUsize,
    pub person_calls: AtomicUsize,
    pub submissions: Mutex<Vec<(String, i64, WorkEntry)>>,
}

impl ScriptedApi {
    /// Service that issues `token` and reports `person_id` for the user
    pub fn issuing(token: &str, person_id: i64) -> Self {
        Self {
            token: token.to_string(),
            person_id,
            ..Self::default()
        }
    }

    pub fn auth_count(&self) -> usize {
        self.auth_calls.load(Ordering::SeqCst)
    }

    pub fn person_count(&self) -> usize {
        self.person_calls.load(Ordering::SeqCst)
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().expect("submissions poisoned").len()
    }

    pub fn last_submission(&self) -> (String, i64, WorkEntry) {
        self.submissions
            .lock()
            .expect("submissions poisoned")
            .last()
            .cloned()
            .expect("no submissions recorded")
    }
}

#[async_trait]
impl TimesheetApi for ScriptedApi {
    async fn authenticate(&self, _email: &str, _password: &str) -> Result<String> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_auth {
            return Err(TallyError::Auth("service returned 401".to_string()));
        }
        Ok(self.token.clone())
    }

    async fn fetch_person(&self, _token: &str) -> Result<Person> {
        self.person_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Person {
            person_id: self.person_id,
            first_name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            email: TEST_EMAIL.to_string(),
        })
    }

    async fn fetch_projects(&self, _token: &str) -> Result<Vec<Project>> {
        Ok(self.projects.clone())
    }

    async fn submit_entry(&self, token: &str, person_id: i64, entry: &WorkEntry) -> Result<()> {
        self.submissions
            .lock()
            .expect("submissions poisoned")
            .push((token.to_string(), person_id, entry.clone()));
        if self.fail_submit {
            return Err(TallyError::Submission("service returned 400".to_string()));
        }
        Ok(())
    }
}

/// Tool-level test fixture wired over an in-memory store
pub struct TestContext {
    pub server: TallyServer,
    pub store: Arc<Database>,
    pub api: Arc<ScriptedApi>,
}

impl TestContext {
    pub fn new(api: ScriptedApi) -> Self {
        let api = Arc::new(api);
        let store =
            Arc::new(Database::open_in_memory().expect("Failed to create in-memory store"));
        let service = Arc::new(WorkLogService::new(store.clone(), api.clone()));

        let server = TallyServer::new(
            service,
            Credentials {
                email: TEST_EMAIL.to_string(),
                password: TEST_PASSWORD.to_string(),
            },
        );

        Self { server, store, api }
    }

    /// Seed a cached record for the acting user, `age_days` old
    pub fn seed_record(&self, token: &str, person_id: i64, age_days: i64) {
        self.store
            .create(&UserRecord {
                email: TEST_EMAIL.to_string(),
                token: token.to_string(),
                person_id,
                initialized_at: Utc::now().naive_utc() - chrono::Duration::days(age_days),
            })
            .expect("failed to seed user record");
    }

    pub fn stored_record(&self) -> Option<UserRecord> {
        self.store
            .find_by_email(TEST_EMAIL)
            .expect("store lookup failed")
    }
}

pub fn sample_project(task_id: i64, name: &str) -> Project {
    Project {
        task_id,
        name: name.to_string(),
        is_active: true,
        created_on: "2024-01-05T08:00:00".to_string(),
        updated_on: "2025-02-11T16:20:00".to_string(),
        client: ProjectClient {
            group_id: 7,
            name: "Acme".to_string(),
            currency: "USD".to_string(),
        },
    }
}
