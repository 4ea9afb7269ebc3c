use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Answer shape a question collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    /// A single optional number, e.g. a slider reading or a choice index.
    Scalar,
    /// A set of selected option values, e.g. a checkbox group.
    MultiSelect,
    /// A locator for a captured photo.
    Photo,
}

impl AnswerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerKind::Scalar => "scalar",
            AnswerKind::MultiSelect => "multi_select",
            AnswerKind::Photo => "photo",
        }
    }
}

/// Definition of a single question inside a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AnswerKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Option labels; multi-select values index into this list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl QuestionSpec {
    pub fn new(id: impl Into<String>, kind: AnswerKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            description: None,
            choices: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Label for a choice value, when the question declares labels.
    pub fn choice_label(&self, value: i64) -> Option<&str> {
        let index = usize::try_from(value).ok()?;
        self.choices
            .as_ref()
            .and_then(|choices| choices.get(index))
            .map(String::as_str)
    }
}
