use std::sync::Mutex;

use chrono::NaiveDate;
use ranking::{Program, Report, Round, Student};
use upstream::{ProgramService, ProgramSnapshot, UpstreamError};

/// In-memory stand-in for the upstream API. `update_report` applies the
/// change to the stored reports so a follow-up snapshot reflects it, the
/// way the real upstream would.
pub struct FakeProgramService {
    snapshot: Mutex<ProgramSnapshot>,
    pub fail_fetch: bool,
    pub reject_updates: bool,
    pub fail_updates: bool,
}

impl FakeProgramService {
    pub fn seeded() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let snapshot = ProgramSnapshot {
            students: vec![student("alice"), student("bob")],
            reports: vec![
                report("r1", "alice", 3),
                report("r2", "alice", 5),
                report("r1", "bob", -1),
            ],
            rounds: vec![
                round("r1", date(2022, 1, 3), date(2022, 1, 10)),
                round("r2", date(2022, 1, 10), date(2022, 1, 17)),
            ],
            program: Program {
                owner: "admin".to_string(),
                name: "talent2022".to_string(),
                title: "Talent 2022".to_string(),
            },
        };
        Self {
            snapshot: Mutex::new(snapshot),
            fail_fetch: false,
            reject_updates: false,
            fail_updates: false,
        }
    }

    pub fn failing() -> Self {
        let mut service = Self::seeded();
        service.fail_fetch = true;
        service
    }

    fn parse_error() -> UpstreamError {
        UpstreamError::Parse(serde_json::from_str::<bool>("nope").unwrap_err())
    }
}

#[async_trait::async_trait]
impl ProgramService for FakeProgramService {
    fn caller(&self) -> &str {
        "admin"
    }

    async fn fetch_snapshot(&self, _program: &str) -> upstream::Result<ProgramSnapshot> {
        if self.fail_fetch {
            return Err(Self::parse_error());
        }
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn update_report(
        &self,
        owner: &str,
        name: &str,
        report: &Report,
    ) -> upstream::Result<bool> {
        if self.fail_updates {
            return Err(Self::parse_error());
        }
        if self.reject_updates {
            return Ok(false);
        }

        let mut snapshot = self.snapshot.lock().unwrap();
        match snapshot
            .reports
            .iter_mut()
            .find(|r| r.owner == owner && r.name == name)
        {
            Some(existing) => {
                *existing = report.clone();
                Ok(true)
            }
            // the upstream refuses updates for reports it has never seen
            None => Ok(false),
        }
    }
}

fn student(name: &str) -> Student {
    Student {
        owner: "admin".to_string(),
        name: name.to_string(),
        real_name: format!("Real {}", name),
        github: name.to_string(),
        mentor: "mentor".to_string(),
        program: "talent2022".to_string(),
        created_time: String::new(),
    }
}

fn round(name: &str, start: NaiveDate, end: NaiveDate) -> Round {
    Round {
        owner: "admin".to_string(),
        name: name.to_string(),
        created_time: String::new(),
        title: name.to_string(),
        program: "talent2022".to_string(),
        start_date: start,
        end_date: end,
    }
}

fn report(round: &str, student: &str, score: i64) -> Report {
    Report {
        owner: "admin".to_string(),
        name: ranking::ReportName::derive("talent2022", round, student),
        created_time: String::new(),
        program: "talent2022".to_string(),
        round: round.to_string(),
        student: student.to_string(),
        text: "weekly update".to_string(),
        score,
    }
}
