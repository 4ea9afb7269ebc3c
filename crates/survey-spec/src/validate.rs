use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;
use crate::spec::survey::SurveySpec;

/// Presence summary for a set of answers. Informational only; completing a
/// survey is never gated on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReport {
    pub complete: bool,
    pub answered: usize,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

pub fn completion_report(spec: &SurveySpec, answers: &AnswerSet) -> CompletionReport {
    let missing: Vec<String> = spec
        .questions
        .iter()
        .filter(|question| {
            !answers
                .get(&question.id)
                .is_some_and(|state| state.is_answered())
        })
        .map(|question| question.id.clone())
        .collect();

    let total = spec.questions.len();
    CompletionReport {
        complete: missing.is_empty(),
        answered: total - missing.len(),
        total,
        missing,
    }
}
