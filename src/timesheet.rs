// src/timesheet.rs
// HTTP client for the remote timesheet service

use crate::error::{Result, TallyError};
use crate::types::{self, WorkEntry};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// HTTP timeout
const TIMEOUT_SECS: u64 = 30;

/// Department every entry is filed under
const DEPARTMENT_ID: i64 = 1;

/// Remote calls the work logging service depends on.
///
/// Every method maps a non-2xx response or transport failure to its
/// error variant; nothing here retries.
#[async_trait]
pub trait TimesheetApi: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<String>;
    async fn fetch_person(&self, token: &str) -> Result<Person>;
    async fn fetch_projects(&self, token: &str) -> Result<Vec<Project>>;
    async fn submit_entry(&self, token: &str, person_id: i64, entry: &WorkEntry) -> Result<()>;
}

/// Identity record returned by /api/users/me
#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    #[serde(rename = "PersonId")]
    pub person_id: i64,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "Surname")]
    pub surname: String,
    #[serde(rename = "Email")]
    pub email: String,
}

/// Project lookup record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "TaskId")]
    pub task_id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "IsActive")]
    pub is_active: bool,
    #[serde(rename = "Created_On")]
    pub created_on: String,
    #[serde(rename = "Updated_On")]
    pub updated_on: String,
    #[serde(rename = "Client")]
    pub client: ProjectClient,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectClient {
    #[serde(rename = "GroupId")]
    pub group_id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Currency")]
    pub currency: String,
}

#[derive(Serialize)]
struct AuthoriseRequest<'a> {
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthoriseResponse {
    token: String,
}

/// Submission payload in the exact shape /api/entry/create expects
#[derive(Debug, Serialize)]
struct EntryPayload<'a> {
    #[serde(rename = "TaskId")]
    task_id: i64,
    #[serde(rename = "PersonId")]
    person_id: i64,
    #[serde(rename = "CostCodeId")]
    cost_code_id: i64,
    #[serde(rename = "DepartmentId")]
    department_id: i64,
    #[serde(rename = "Overtime")]
    overtime: i64,
    #[serde(rename = "Time")]
    time: f64,
    #[serde(rename = "EntryDate")]
    entry_date: String,
    #[serde(rename = "Comments")]
    comments: &'a str,
    #[serde(rename = "WorklogId")]
    worklog_id: i64,
    #[serde(rename = "Audited")]
    audited: i64,
}

impl<'a> EntryPayload<'a> {
    fn new(person_id: i64, entry: &'a WorkEntry) -> Self {
        Self {
            task_id: entry.task_id,
            person_id,
            cost_code_id: entry.cost_code_id,
            department_id: DEPARTMENT_ID,
            overtime: i64::from(entry.overtime),
            time: entry.hours,
            entry_date: types::format_timestamp(&entry.date),
            comments: &entry.description,
            worklog_id: 0,
            audited: 0,
        }
    }
}

/// Production client over the remote HTTP service
pub struct TimesheetClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl TimesheetClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.into(),
            http_client,
        }
    }
}

#[async_trait]
impl TimesheetApi for TimesheetClient {
    async fn authenticate(&self, email: &str, password: &str) -> Result<String> {
        let url = format!("{}/api/account/Authorise", self.base_url);
        let body = AuthoriseRequest { email, password };

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TallyError::Auth(format!("request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(TallyError::Auth(format!(
                "service returned {}",
                response.status()
            )));
        }

        let parsed: AuthoriseResponse = response
            .json()
            .await
            .map_err(|e| TallyError::Auth(format!("unexpected response body: {}", e)))?;

        debug!("Authenticated {}", email);
        Ok(parsed.token)
    }

    async fn fetch_person(&self, token: &str) -> Result<Person> {
        let url = format!("{}/api/users/me", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| TallyError::Lookup(format!("request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(TallyError::Lookup(format!(
                "service returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| TallyError::Lookup(format!("unexpected response body: {}", e)))
    }

    async fn fetch_projects(&self, token: &str) -> Result<Vec<Project>> {
        let url = format!("{}/api/project/list", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| TallyError::Lookup(format!("request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(TallyError::Lookup(format!(
                "service returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| TallyError::Lookup(format!("unexpected response body: {}", e)))
    }

    async fn submit_entry(&self, token: &str, person_id: i64, entry: &WorkEntry) -> Result<()> {
        let url = format!("{}/api/entry/create", self.base_url);
        let payload = EntryPayload::new(person_id, entry);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| TallyError::Submission(format!("request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(TallyError::Submission(format!(
                "service returned {}",
                response.status()
            )));
        }

        debug!(task_id = entry.task_id, hours = entry.hours, "Entry submitted");
        Ok(())
    }
}
