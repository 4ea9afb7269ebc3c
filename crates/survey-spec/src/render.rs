use serde_json::{Map, Value, json};

use crate::{
    answers::AnswerState, session::SurveySession, snapshot::ScreenSnapshot,
    spec::question::AnswerKind,
};

/// Progress counters exposed to renderers.
#[derive(Debug, Clone)]
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// Describes the current question for render outputs.
#[derive(Debug, Clone)]
pub struct RenderQuestion {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: AnswerKind,
    pub choices: Option<Vec<String>>,
    pub current_value: Option<Value>,
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone)]
pub struct ScreenPayload {
    pub survey_id: String,
    pub survey_title: String,
    pub help: Option<String>,
    pub snapshot: ScreenSnapshot,
    pub next_enabled: bool,
    pub progress: RenderProgress,
    pub question: RenderQuestion,
}

/// Build the renderer payload from the session's current state.
pub fn build_screen_payload(session: &SurveySession) -> ScreenPayload {
    let spec = session.spec();
    let question = session.current_question();
    let report = session.completion_report();

    ScreenPayload {
        survey_id: spec.id.clone(),
        survey_title: spec.title.clone(),
        help: spec.description.clone(),
        snapshot: session.snapshot(),
        next_enabled: session.is_next_enabled(),
        progress: RenderProgress {
            answered: report.answered,
            total: report.total,
        },
        question: RenderQuestion {
            id: question.id.clone(),
            title: question.title.clone(),
            description: question.description.clone(),
            kind: question.kind,
            choices: question.choices.clone(),
            current_value: session.answer(&question.id).and_then(answer_value),
        },
    }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &ScreenPayload) -> Value {
    let question = &payload.question;
    let mut map = Map::new();
    map.insert("id".into(), Value::String(question.id.clone()));
    map.insert("title".into(), Value::String(question.title.clone()));
    map.insert(
        "description".into(),
        question
            .description
            .clone()
            .map(Value::String)
            .unwrap_or(Value::Null),
    );
    map.insert("type".into(), Value::String(question.kind.as_str().into()));
    if let Some(choices) = &question.choices {
        map.insert(
            "choices".into(),
            Value::Array(
                choices
                    .iter()
                    .map(|choice| Value::String(choice.clone()))
                    .collect(),
            ),
        );
    }
    if let Some(current_value) = &question.current_value {
        map.insert("current_value".into(), current_value.clone());
    }

    json!({
        "survey_id": payload.survey_id,
        "survey_title": payload.survey_title,
        "help": payload.help,
        "screen": {
            "position": payload.snapshot.position,
            "total_count": payload.snapshot.total_count,
            "show_previous": payload.snapshot.show_previous,
            "show_done": payload.snapshot.show_done,
            "current_question": payload.snapshot.current_question,
        },
        "next_enabled": payload.next_enabled,
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "question": Value::Object(map),
    })
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &ScreenPayload) -> String {
    let question = &payload.question;
    let mut lines = Vec::new();
    lines.push(format!(
        "Question {} of {}: {}",
        payload.snapshot.display_index(),
        payload.snapshot.total_count,
        question.title
    ));
    if let Some(description) = &question.description {
        lines.push(format!("  {}", description));
    }

    let selected = question
        .current_value
        .as_ref()
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_i64).collect::<Vec<_>>())
        .unwrap_or_default();
    if let Some(choices) = &question.choices {
        for (index, choice) in choices.iter().enumerate() {
            let marker = match question.kind {
                AnswerKind::MultiSelect if selected.contains(&(index as i64)) => "[x]",
                AnswerKind::MultiSelect => "[ ]",
                _ => "-",
            };
            lines.push(format!("  {} {}: {}", marker, index, choice));
        }
    }

    match &question.current_value {
        Some(value) if question.kind != AnswerKind::MultiSelect => {
            lines.push(format!("  Current value: {}", value_to_display(value)));
        }
        Some(_) => {}
        None => lines.push("  Not answered yet.".to_string()),
    }

    let mut actions = Vec::new();
    if payload.snapshot.show_previous {
        actions.push("previous");
    }
    if payload.snapshot.show_done {
        actions.push("done");
    } else if payload.next_enabled {
        actions.push("next");
    }
    if !actions.is_empty() {
        lines.push(format!("Actions: {}", actions.join(", ")));
    }

    lines.join("\n")
}

fn answer_value(state: &AnswerState) -> Option<Value> {
    if !state.is_answered() {
        return None;
    }
    match state {
        AnswerState::Scalar(value) => (*value)
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number),
        AnswerState::MultiSelect(values) => Some(Value::Array(
            values.values().map(Value::from).collect(),
        )),
        AnswerState::Photo(locator) => locator
            .as_ref()
            .map(|locator| Value::String(locator.as_str().to_string())),
    }
}

fn value_to_display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(num) => num.to_string(),
        other => other.to_string(),
    }
}
