use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Report;

/// Visual category of a report cell. The thresholds mirror the admin UI's
/// tag palette and are relied on by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TagKind {
    NotAvailable,
    Error,
    Warning,
    Processing,
    Success,
}

impl TagKind {
    pub fn classify(text: &str, score: i64) -> Self {
        if text.is_empty() {
            return Self::NotAvailable;
        }

        if score <= 0 {
            Self::Error
        } else if score <= 2 {
            Self::Warning
        } else if score <= 4 {
            Self::Processing
        } else {
            Self::Success
        }
    }

    pub fn for_report(report: &Report) -> Self {
        Self::classify(&report.text, report.score)
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::NotAvailable | Self::Error => "error",
            Self::Warning => "warning",
            Self::Processing => "processing",
            Self::Success => "success",
        }
    }
}

/// Text shown on the tag: "N/A" for a missing submission, the score
/// otherwise.
pub fn tag_label(report: &Report) -> String {
    if report.text.is_empty() {
        "N/A".to_string()
    } else {
        report.score.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(text: &str, score: i64) -> Report {
        Report {
            owner: "admin".to_string(),
            name: "report_p_r_s".to_string(),
            created_time: String::new(),
            program: "p".to_string(),
            round: "r".to_string(),
            student: "s".to_string(),
            text: text.to_string(),
            score,
        }
    }

    #[test]
    fn test_empty_text_wins_over_score() {
        assert_eq!(TagKind::classify("", 5), TagKind::NotAvailable);
        assert_eq!(TagKind::classify("", 0), TagKind::NotAvailable);
    }

    #[test]
    fn test_score_thresholds() {
        assert_eq!(TagKind::classify("did things", -3), TagKind::Error);
        assert_eq!(TagKind::classify("did things", 0), TagKind::Error);
        assert_eq!(TagKind::classify("did things", 1), TagKind::Warning);
        assert_eq!(TagKind::classify("did things", 2), TagKind::Warning);
        assert_eq!(TagKind::classify("did things", 3), TagKind::Processing);
        assert_eq!(TagKind::classify("did things", 4), TagKind::Processing);
        assert_eq!(TagKind::classify("did things", 5), TagKind::Success);
        assert_eq!(TagKind::classify("did things", 9), TagKind::Success);
    }

    #[test]
    fn test_colors() {
        assert_eq!(TagKind::NotAvailable.color(), "error");
        assert_eq!(TagKind::Error.color(), "error");
        assert_eq!(TagKind::Warning.color(), "warning");
        assert_eq!(TagKind::Processing.color(), "processing");
        assert_eq!(TagKind::Success.color(), "success");
    }

    #[test]
    fn test_label() {
        assert_eq!(tag_label(&report("", 0)), "N/A");
        assert_eq!(tag_label(&report("weekly update", 4)), "4");
        assert_eq!(tag_label(&report("weekly update", -1)), "-1");
    }
}
