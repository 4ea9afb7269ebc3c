use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spec::question::QuestionSpec;

/// Problems that make a survey definition unusable for a session.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("survey '{0}' has no questions")]
    Empty(String),
    #[error("question id '{0}' is declared more than once")]
    DuplicateQuestion(String),
    #[error("failed to parse survey definition: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level survey definition: an ordered, fixed list of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurveySpec {
    pub id: String,
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<QuestionSpec>,
}

impl SurveySpec {
    /// Parses and checks a JSON survey definition.
    pub fn from_json_str(json: &str) -> Result<Self, SpecError> {
        let spec: SurveySpec = serde_json::from_str(json)?;
        spec.check()?;
        Ok(spec)
    }

    /// Ensures the definition can back a session: at least one question and unique ids.
    pub fn check(&self) -> Result<(), SpecError> {
        if self.questions.is_empty() {
            return Err(SpecError::Empty(self.id.clone()));
        }
        let mut seen = BTreeSet::new();
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(SpecError::DuplicateQuestion(question.id.clone()));
            }
        }
        Ok(())
    }

    pub fn question(&self, id: &str) -> Option<&QuestionSpec> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// JSON Schema describing survey definition files.
pub fn survey_schema() -> serde_json::Value {
    schemars::schema_for!(SurveySpec).to_value()
}
