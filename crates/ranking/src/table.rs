use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Program, Report, Round, Student};
use crate::tag::{TagKind, tag_label};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Column {
    pub title: String,
    pub key: String,
    pub width: String,
    pub current: bool,
}

impl Column {
    fn fixed(title: &str, key: &str, width: &str) -> Self {
        Self {
            title: title.to_string(),
            key: key.to_string(),
            width: width.to_string(),
            current: false,
        }
    }

    fn for_round(round: &Round, today: NaiveDate) -> Self {
        Self {
            title: round.name.clone(),
            key: round.name.clone(),
            width: "70px".to_string(),
            current: round.is_current(today),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportCell {
    pub report: Report,
    pub tag: TagKind,
    pub color: String,
    pub label: String,
}

impl ReportCell {
    pub fn new(report: Report) -> Self {
        let tag = TagKind::for_report(&report);
        let label = tag_label(&report);
        Self {
            report,
            tag,
            color: tag.color().to_string(),
            label,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankingRow {
    pub name: String,
    pub real_name: String,
    pub github: String,
    pub mentor: String,
    /// Sum of persisted report scores; placeholders contribute nothing.
    pub score: i64,
    /// One cell per round, keyed by round name.
    pub cells: HashMap<String, ReportCell>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RankingTable {
    pub program: Program,
    pub columns: Vec<Column>,
    pub rows: Vec<RankingRow>,
}

impl RankingTable {
    pub fn row(&self, student: &str) -> Option<&RankingRow> {
        self.rows.iter().find(|row| row.name == student)
    }
}

/// Join the four upstream collections into the ranked table.
///
/// Every (student, round) pair gets exactly one cell: the persisted report
/// when one exists, a synthesized placeholder otherwise. Rows are sorted by
/// total score descending; the sort is stable, so ties keep the upstream
/// student order.
pub fn build_table(
    program: Program,
    students: Vec<Student>,
    reports: Vec<Report>,
    rounds: Vec<Round>,
    today: NaiveDate,
    caller: &str,
) -> RankingTable {
    let mut columns: Vec<Column> = vec![
        Column::fixed("Name", "realName", "60px"),
        Column::fixed("GitHub", "github", "80px"),
        Column::fixed("Mentor", "mentor", "70px"),
        Column::fixed("Score", "score", "50px"),
    ];
    columns.extend(rounds.iter().map(|round| Column::for_round(round, today)));

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<(Student, i64, HashMap<String, Report>)> = Vec::new();
    for student in students {
        index.insert(student.name.clone(), rows.len());
        rows.push((student, 0, HashMap::new()));
    }

    for round in &rounds {
        for (student, _, cells) in rows.iter_mut() {
            cells.insert(
                round.name.clone(),
                Report::placeholder(caller, &program.name, &round.name, &student.name),
            );
        }
    }

    let known_rounds: HashSet<&str> = rounds.iter().map(|round| round.name.as_str()).collect();

    for report in reports {
        let Some(&at) = index.get(report.student.as_str()) else {
            tracing::warn!(
                report = %report.name,
                student = %report.student,
                "report references an unknown student, skipping"
            );
            continue;
        };
        let (_, total, cells) = &mut rows[at];
        *total += report.score;
        if known_rounds.contains(report.round.as_str()) {
            cells.insert(report.round.clone(), report);
        }
    }

    rows.sort_by(|a, b| b.1.cmp(&a.1));

    let rows = rows
        .into_iter()
        .map(|(student, total, cells)| RankingRow {
            name: student.name,
            real_name: student.real_name,
            github: student.github,
            mentor: student.mentor,
            score: total,
            cells: cells
                .into_iter()
                .map(|(round, report)| (round, ReportCell::new(report)))
                .collect(),
        })
        .collect();

    RankingTable {
        program,
        columns,
        rows,
    }
}
