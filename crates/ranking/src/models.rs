use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub real_name: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub mentor: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub created_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub created_time: String,
    #[serde(default)]
    pub title: String,
    pub program: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Round {
    /// A round is current while `today` falls inside its date range;
    /// the end date is exclusive.
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.start_date <= today && today < self.end_date
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub created_time: String,
    pub program: String,
    pub round: String,
    pub student: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub score: i64,
}

impl Report {
    /// Stand-in for a missing submission: zero score, empty text, named
    /// the same way the upstream names persisted reports.
    pub fn placeholder(caller: &str, program: &str, round: &str, student: &str) -> Self {
        Self {
            owner: caller.to_string(),
            name: ReportName::derive(program, round, student),
            created_time: String::new(),
            program: program.to_string(),
            round: round.to_string(),
            student: student.to_string(),
            text: String::new(),
            score: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    #[serde(default)]
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
}

/// The `report_<program>_<round>_<student>` naming convention shared with
/// the upstream. Program and round segments never contain `_`; the student
/// segment may (GitHub handles).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportName {
    pub program: String,
    pub round: String,
    pub student: String,
}

impl ReportName {
    pub fn derive(program: &str, round: &str, student: &str) -> String {
        format!("report_{}_{}_{}", program, round, student)
    }

    pub fn parse(name: &str) -> Option<Self> {
        let rest = name.strip_prefix("report_")?;
        let mut parts = rest.splitn(3, '_');
        let program = parts.next()?;
        let round = parts.next()?;
        let student = parts.next()?;
        if program.is_empty() || round.is_empty() || student.is_empty() {
            return None;
        }
        Some(Self {
            program: program.to_string(),
            round: round.to_string(),
            student: student.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_round_current_window() {
        let round = Round {
            owner: "admin".to_string(),
            name: "talent2022-week-1".to_string(),
            created_time: String::new(),
            title: "Week 1".to_string(),
            program: "talent2022".to_string(),
            start_date: date(2022, 1, 3),
            end_date: date(2022, 1, 10),
        };

        assert!(!round.is_current(date(2022, 1, 2)));
        assert!(round.is_current(date(2022, 1, 3)));
        assert!(round.is_current(date(2022, 1, 9)));
        // end date is exclusive
        assert!(!round.is_current(date(2022, 1, 10)));
    }

    #[test]
    fn test_report_name_roundtrip() {
        let name = ReportName::derive("talent2022", "talent2022-week-3", "alice");
        assert_eq!(name, "report_talent2022_talent2022-week-3_alice");

        let parsed = ReportName::parse(&name).unwrap();
        assert_eq!(parsed.program, "talent2022");
        assert_eq!(parsed.round, "talent2022-week-3");
        assert_eq!(parsed.student, "alice");
    }

    #[test]
    fn test_report_name_student_may_contain_underscores() {
        let name = ReportName::derive("p", "week-1", "the_real_bob");
        let parsed = ReportName::parse(&name).unwrap();
        assert_eq!(parsed.student, "the_real_bob");
    }

    #[test]
    fn test_report_name_rejects_malformed() {
        assert!(ReportName::parse("weekly_p_r_s").is_none());
        assert!(ReportName::parse("report_p_r").is_none());
        assert!(ReportName::parse("report___s").is_none());
        assert!(ReportName::parse("").is_none());
    }

    #[test]
    fn test_placeholder_shape() {
        let report = Report::placeholder("admin", "talent2022", "talent2022-week-1", "alice");
        assert_eq!(report.owner, "admin");
        assert_eq!(report.name, "report_talent2022_talent2022-week-1_alice");
        assert_eq!(report.score, 0);
        assert!(report.text.is_empty());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = r#"{
            "owner": "admin",
            "name": "alice",
            "realName": "Alice Liddell",
            "github": "alice",
            "mentor": "hatter",
            "program": "talent2022",
            "createdTime": "2022-01-13T00:00:00+08:00"
        }"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.real_name, "Alice Liddell");
        assert_eq!(student.created_time, "2022-01-13T00:00:00+08:00");

        let json = r#"{
            "owner": "admin",
            "name": "talent2022-week-1",
            "title": "Week 1",
            "program": "talent2022",
            "startDate": "2022-01-03",
            "endDate": "2022-01-10"
        }"#;
        let round: Round = serde_json::from_str(json).unwrap();
        assert_eq!(round.start_date, date(2022, 1, 3));
    }
}
