use ranking::dto::{SaveResponse, UpdateReportRequest};
use ranking::editor::{Editor, EditorCommand, EditorEvent, NoticeKind};
use ranking::{Report, ReportName};
use upstream::ProgramService;
use validator::Validate;

use crate::error::WebError;
use crate::features::ranking::services::load_table;

/// Resolve the report the editor opens: the persisted one when it exists,
/// otherwise the placeholder standing in for the missing submission.
pub async fn open_report(
    service: &dyn ProgramService,
    owner: &str,
    name: &str,
) -> Result<Report, WebError> {
    let parsed = ReportName::parse(name)
        .ok_or_else(|| WebError::BadRequest(format!("malformed report name: {}", name)))?;

    let snapshot = service.fetch_snapshot(&parsed.program).await?;

    if let Some(report) = snapshot
        .reports
        .into_iter()
        .find(|r| r.owner == owner && r.name == name)
    {
        return Ok(report);
    }

    let round_known = snapshot.rounds.iter().any(|r| r.name == parsed.round);
    let student_known = snapshot.students.iter().any(|s| s.name == parsed.student);
    if round_known && student_known {
        Ok(Report::placeholder(
            service.caller(),
            &parsed.program,
            &parsed.round,
            &parsed.student,
        ))
    } else {
        Err(WebError::NotFound)
    }
}

/// Run one save through the editor state machine: open the report, apply
/// the edits, submit, execute the resulting upstream update, and feed the
/// outcome back. Success carries the affected student's recomputed row.
pub async fn save_report(
    service: &dyn ProgramService,
    owner: &str,
    name: &str,
    request: UpdateReportRequest,
) -> Result<SaveResponse, WebError> {
    request.validate()?;

    let current = open_report(service, owner, name).await?;

    let mut editor = Editor::new();
    editor.apply(EditorEvent::Opened(current));
    if let Some(text) = request.text {
        editor.apply(EditorEvent::TextChanged(text));
    }
    editor.apply(EditorEvent::ScoreChanged(request.score));

    let mut commands = editor.apply(EditorEvent::Submitted);
    let Some(EditorCommand::SaveReport {
        owner,
        name,
        report,
    }) = commands.pop()
    else {
        return Err(WebError::Internal(
            "editor produced no save command".to_string(),
        ));
    };

    let outcome = service.update_report(&owner, &name, &report).await;
    let event = match outcome {
        Ok(true) => EditorEvent::SaveSucceeded {
            student: report.student.clone(),
        },
        Ok(false) => EditorEvent::SaveRejected,
        Err(error) => EditorEvent::SaveFailed(error.to_string()),
    };

    let mut notice = None;
    let mut refresh = None;
    for command in editor.apply(event) {
        match command {
            EditorCommand::Notify(n) => notice = Some(n),
            EditorCommand::RefreshRow { student } => refresh = Some(student),
            EditorCommand::SaveReport { .. } => {}
        }
    }

    let notice =
        notice.ok_or_else(|| WebError::Internal("editor produced no outcome".to_string()))?;

    if notice.kind != NoticeKind::Success {
        return Err(WebError::Save(notice.message));
    }

    let row = match refresh {
        Some(student) => {
            let table = load_table(service, &report.program).await?;
            table.row(&student).cloned()
        }
        None => None,
    };

    Ok(SaveResponse {
        message: notice.message,
        row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::testutil::FakeProgramService;
    use ranking::dto::ScoreInput;

    fn score_request(input: ScoreInput) -> UpdateReportRequest {
        UpdateReportRequest {
            text: None,
            score: input,
        }
    }

    #[tokio::test]
    async fn test_open_returns_persisted_report() {
        let service = FakeProgramService::seeded();

        let report = open_report(&service, "admin", "report_talent2022_r1_alice")
            .await
            .unwrap();

        assert_eq!(report.score, 3);
        assert_eq!(report.round, "r1");
    }

    #[tokio::test]
    async fn test_open_synthesizes_placeholder_for_missing_submission() {
        let service = FakeProgramService::seeded();

        let report = open_report(&service, "admin", "report_talent2022_r2_bob")
            .await
            .unwrap();

        assert_eq!(report.score, 0);
        assert!(report.text.is_empty());
        assert_eq!(report.student, "bob");
    }

    #[tokio::test]
    async fn test_open_unknown_pair_is_not_found() {
        let service = FakeProgramService::seeded();

        let result = open_report(&service, "admin", "report_talent2022_r9_alice").await;
        assert!(matches!(result, Err(WebError::NotFound)));

        let result = open_report(&service, "admin", "report_talent2022_r1_ghost").await;
        assert!(matches!(result, Err(WebError::NotFound)));
    }

    #[tokio::test]
    async fn test_open_malformed_name_is_bad_request() {
        let service = FakeProgramService::seeded();

        let result = open_report(&service, "admin", "weekly-r1-alice").await;
        assert!(matches!(result, Err(WebError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_save_success_returns_refreshed_row() {
        let service = FakeProgramService::seeded();

        let response = save_report(
            &service,
            "admin",
            "report_talent2022_r1_bob",
            score_request(ScoreInput::Number(4)),
        )
        .await
        .unwrap();

        assert_eq!(response.message, "Successfully saved");
        let row = response.row.unwrap();
        assert_eq!(row.name, "bob");
        // bob's total moves from -1 to 4
        assert_eq!(row.score, 4);
        assert_eq!(row.cells["r1"].report.score, 4);
    }

    #[tokio::test]
    async fn test_save_coerces_unparseable_score_to_zero() {
        let service = FakeProgramService::seeded();

        let response = save_report(
            &service,
            "admin",
            "report_talent2022_r1_alice",
            score_request(ScoreInput::Text("abc".to_string())),
        )
        .await
        .unwrap();

        assert_eq!(response.row.unwrap().cells["r1"].report.score, 0);
    }

    #[tokio::test]
    async fn test_save_of_placeholder_is_rejected_by_upstream() {
        let service = FakeProgramService::seeded();

        let result = save_report(
            &service,
            "admin",
            "report_talent2022_r2_bob",
            score_request(ScoreInput::Number(5)),
        )
        .await;

        match result {
            Err(WebError::Save(message)) => {
                assert_eq!(message, "failed to save: server side failure");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_soft_failure_message() {
        let mut service = FakeProgramService::seeded();
        service.reject_updates = true;

        let result = save_report(
            &service,
            "admin",
            "report_talent2022_r1_alice",
            score_request(ScoreInput::Number(5)),
        )
        .await;

        match result {
            Err(WebError::Save(message)) => {
                assert_eq!(message, "failed to save: server side failure");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_hard_failure_interpolates_error() {
        let mut service = FakeProgramService::seeded();
        service.fail_updates = true;

        let result = save_report(
            &service,
            "admin",
            "report_talent2022_r1_alice",
            score_request(ScoreInput::Number(5)),
        )
        .await;

        match result {
            Err(WebError::Save(message)) => {
                assert!(message.starts_with("failed to save: "));
                assert_ne!(message, "failed to save: server side failure");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
