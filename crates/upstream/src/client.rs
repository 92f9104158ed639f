use ranking::{Program, Report, Round, Student};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::Result;
use crate::traits::{ProgramService, ProgramSnapshot};

/// HTTP client for the upstream program-management API.
pub struct ProgramClient {
    base_url: String,
    caller: String,
    client: reqwest::Client,
}

impl ProgramClient {
    pub fn new(base_url: impl Into<String>, caller: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            caller: caller.into(),
            client: reqwest::Client::builder()
                .user_agent(concat!("ranking-web/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/api/{}", self.base_url, endpoint);
        debug!(%url, "GET upstream");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get_filtered_students(&self, program: &str) -> Result<Vec<Student>> {
        self.get_json(
            "get-filtered-students",
            &[("owner", self.caller.as_str()), ("program", program)],
        )
        .await
    }

    pub async fn get_filtered_reports(&self, program: &str) -> Result<Vec<Report>> {
        self.get_json(
            "get-filtered-reports",
            &[("owner", self.caller.as_str()), ("program", program)],
        )
        .await
    }

    pub async fn get_filtered_rounds(&self, program: &str) -> Result<Vec<Round>> {
        self.get_json(
            "get-filtered-rounds",
            &[("owner", self.caller.as_str()), ("program", program)],
        )
        .await
    }

    pub async fn get_program(&self, name: &str) -> Result<Program> {
        self.get_json(
            "get-program",
            &[("owner", self.caller.as_str()), ("name", name)],
        )
        .await
    }

    /// Upstream answers with a bare boolean: `false` means the update was
    /// not applied even though the request itself went through.
    pub async fn post_update_report(
        &self,
        owner: &str,
        name: &str,
        report: &Report,
    ) -> Result<bool> {
        let url = format!("{}/api/update-report", self.base_url);
        debug!(%url, owner, name, "POST upstream");

        let response = self
            .client
            .post(&url)
            .query(&[("owner", owner), ("name", name)])
            .json(report)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait::async_trait]
impl ProgramService for ProgramClient {
    fn caller(&self) -> &str {
        &self.caller
    }

    async fn fetch_snapshot(&self, program: &str) -> Result<ProgramSnapshot> {
        let (students, reports, rounds, record) = tokio::try_join!(
            self.get_filtered_students(program),
            self.get_filtered_reports(program),
            self.get_filtered_rounds(program),
            self.get_program(program),
        )?;

        Ok(ProgramSnapshot {
            students,
            reports,
            rounds,
            program: record,
        })
    }

    async fn update_report(&self, owner: &str, name: &str, report: &Report) -> Result<bool> {
        self.post_update_report(owner, name, report).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ProgramClient::new("http://localhost:7000/", "admin");
        assert_eq!(client.base_url(), "http://localhost:7000");
        assert_eq!(client.caller(), "admin");
    }

    #[test]
    fn test_update_response_is_a_bare_boolean() {
        let applied: bool = serde_json::from_str("true").unwrap();
        assert!(applied);
        let applied: bool = serde_json::from_str("false").unwrap();
        assert!(!applied);
    }
}
