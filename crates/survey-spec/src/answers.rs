use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_cbor::{to_vec, value::to_value};

use crate::photo::PhotoLocator;
use crate::spec::question::AnswerKind;
use crate::spec::survey::SurveySpec;

/// Selected option values of a multi-select answer.
///
/// Each value keeps a selection count: selecting twice needs two deselections
/// before the value is cleared, so a select/deselect pair always restores the
/// previous state. Order is irrelevant. Encodes as a sorted list of values, a
/// value repeated once per extra selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<i64>", into = "Vec<i64>")]
pub struct Selection {
    counts: BTreeMap<i64, usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, value: i64) {
        *self.counts.entry(value).or_insert(0) += 1;
    }

    /// Drops one selection of `value`; clearing an unselected value is a no-op.
    pub fn deselect(&mut self, value: i64) {
        if let Some(count) = self.counts.get_mut(&value) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&value);
            }
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.counts.contains_key(&value)
    }

    pub fn times_selected(&self, value: i64) -> usize {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct selected values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Distinct selected values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.counts.keys().copied()
    }
}

impl FromIterator<i64> for Selection {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for value in iter {
            selection.select(value);
        }
        selection
    }
}

impl From<Vec<i64>> for Selection {
    fn from(values: Vec<i64>) -> Self {
        values.into_iter().collect()
    }
}

impl From<Selection> for Vec<i64> {
    fn from(selection: Selection) -> Self {
        selection
            .counts
            .into_iter()
            .flat_map(|(value, count)| std::iter::repeat_n(value, count))
            .collect()
    }
}

/// Current answer held for one question. The variant always matches the
/// question's declared [`AnswerKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerState {
    Scalar(Option<f64>),
    MultiSelect(#[schemars(with = "Vec<i64>")] Selection),
    Photo(Option<PhotoLocator>),
}

impl AnswerState {
    /// Unanswered state for a question kind.
    pub fn empty(kind: AnswerKind) -> Self {
        match kind {
            AnswerKind::Scalar => AnswerState::Scalar(None),
            AnswerKind::MultiSelect => AnswerState::MultiSelect(Selection::new()),
            AnswerKind::Photo => AnswerState::Photo(None),
        }
    }

    pub fn kind(&self) -> AnswerKind {
        match self {
            AnswerState::Scalar(_) => AnswerKind::Scalar,
            AnswerState::MultiSelect(_) => AnswerKind::MultiSelect,
            AnswerState::Photo(_) => AnswerKind::Photo,
        }
    }

    /// Presence check: a value is set, or at least one option is selected.
    pub fn is_answered(&self) -> bool {
        match self {
            AnswerState::Scalar(value) => value.is_some(),
            AnswerState::MultiSelect(values) => !values.is_empty(),
            AnswerState::Photo(locator) => locator.is_some(),
        }
    }
}

/// All answers of one survey run, keyed by question id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerSet {
    pub survey_id: String,
    pub spec_version: String,
    pub answers: BTreeMap<String, AnswerState>,
}

impl AnswerSet {
    /// Creates an answer set holding an empty state for every question.
    pub fn for_spec(spec: &SurveySpec) -> Self {
        let answers = spec
            .questions
            .iter()
            .map(|question| (question.id.clone(), AnswerState::empty(question.kind)))
            .collect();
        Self {
            survey_id: spec.id.clone(),
            spec_version: spec.version.clone(),
            answers,
        }
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerState> {
        self.answers.get(question_id)
    }

    pub(crate) fn get_mut(&mut self, question_id: &str) -> Option<&mut AnswerState> {
        self.answers.get_mut(question_id)
    }

    /// Serializes the answers set as canonical CBOR bytes.
    pub fn to_cbor(&self) -> Result<Vec<u8>, serde_cbor::Error> {
        let canonical = to_value(self)?;
        to_vec(&canonical)
    }

    /// Serializes the answers set as indented JSON for debugging.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
