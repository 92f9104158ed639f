use ranking::{Program, Report, Round, Student};

use crate::Result;

/// All four collections the ranking table is built from, fetched together.
#[derive(Debug, Clone)]
pub struct ProgramSnapshot {
    pub students: Vec<Student>,
    pub reports: Vec<Report>,
    pub rounds: Vec<Round>,
    pub program: Program,
}

#[async_trait::async_trait]
pub trait ProgramService: Send + Sync {
    /// The identity sent as `owner` on every upstream call, and used as the
    /// owner of synthesized placeholder reports.
    fn caller(&self) -> &str;

    async fn fetch_snapshot(&self, program: &str) -> Result<ProgramSnapshot>;

    async fn update_report(&self, owner: &str, name: &str, report: &Report) -> Result<bool>;
}
