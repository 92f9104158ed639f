use crate::dto::ScoreInput;
use crate::models::Report;

/// The report editor, modeled as an explicit state machine instead of
/// ambient UI state. `transition` is pure; side effects are returned as
/// commands for the caller to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    Closed,
    Open { draft: Report },
}

#[derive(Debug, Clone)]
pub enum EditorEvent {
    Opened(Report),
    ScoreChanged(ScoreInput),
    TextChanged(String),
    Submitted,
    SaveSucceeded { student: String },
    SaveRejected,
    SaveFailed(String),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    SaveReport {
        owner: String,
        name: String,
        report: Report,
    },
    RefreshRow {
        student: String,
    },
    Notify(Notice),
}

pub fn transition(state: EditorState, event: EditorEvent) -> (EditorState, Vec<EditorCommand>) {
    match (state, event) {
        (_, EditorEvent::Opened(report)) => (EditorState::Open { draft: report }, vec![]),

        (EditorState::Open { mut draft }, EditorEvent::ScoreChanged(input)) => {
            draft.score = coerce_score(&input);
            (EditorState::Open { draft }, vec![])
        }

        (EditorState::Open { mut draft }, EditorEvent::TextChanged(text)) => {
            draft.text = text;
            (EditorState::Open { draft }, vec![])
        }

        (EditorState::Open { draft }, EditorEvent::Submitted) => {
            let command = EditorCommand::SaveReport {
                owner: draft.owner.clone(),
                name: draft.name.clone(),
                report: draft,
            };
            (EditorState::Closed, vec![command])
        }

        (state, EditorEvent::SaveSucceeded { student }) => (
            state,
            vec![
                EditorCommand::Notify(Notice {
                    kind: NoticeKind::Success,
                    message: "Successfully saved".to_string(),
                }),
                EditorCommand::RefreshRow { student },
            ],
        ),

        (state, EditorEvent::SaveRejected) => (
            state,
            vec![EditorCommand::Notify(Notice {
                kind: NoticeKind::Error,
                message: "failed to save: server side failure".to_string(),
            })],
        ),

        (state, EditorEvent::SaveFailed(error)) => (
            state,
            vec![EditorCommand::Notify(Notice {
                kind: NoticeKind::Error,
                message: format!("failed to save: {}", error),
            })],
        ),

        (_, EditorEvent::Cancelled) => (EditorState::Closed, vec![]),

        // field edits without an open editor are dropped
        (state, EditorEvent::ScoreChanged(_) | EditorEvent::TextChanged(_)) => (state, vec![]),
        (state, EditorEvent::Submitted) => (state, vec![]),
    }
}

/// Convenience wrapper holding the current state across `apply` calls.
#[derive(Debug)]
pub struct Editor {
    state: EditorState,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            state: EditorState::Closed,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn apply(&mut self, event: EditorEvent) -> Vec<EditorCommand> {
        let state = std::mem::replace(&mut self.state, EditorState::Closed);
        let (next, commands) = transition(state, event);
        self.state = next;
        commands
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer coercion for the score field. Mirrors the admin UI's parse:
/// trim, optional sign, leading decimal digits; anything else is 0.
pub fn coerce_score(input: &ScoreInput) -> i64 {
    match input {
        ScoreInput::Number(n) => *n,
        ScoreInput::Float(f) if f.is_finite() => *f as i64,
        ScoreInput::Float(_) => 0,
        ScoreInput::Text(s) => parse_int_prefix(s),
    }
}

fn parse_int_prefix(s: &str) -> i64 {
    let s = s.trim();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        return 0;
    }

    match digits.parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}
