use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};

use crate::answers::{AnswerSet, AnswerState, Selection};
use crate::observer::{SessionEvent, SessionObserver};
use crate::photo::{PhotoError, PhotoLocator, PhotoLocatorProvider};
use crate::snapshot::ScreenSnapshot;
use crate::spec::question::{AnswerKind, QuestionSpec};
use crate::spec::survey::{SpecError, SurveySpec};
use crate::validate::{CompletionReport, completion_report};

/// Recoverable misuse of the answer API.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("question '{0}' is not part of this survey")]
    UnknownQuestion(String),
    #[error("question '{question_id}' expects a {expected} answer, got {actual}")]
    KindMismatch {
        question_id: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("question '{question_id}' needs a finite number, got {value}")]
    NonFiniteScalar { question_id: String, value: f64 },
    #[error("no photo locator provider is configured")]
    NoPhotoProvider,
    #[error(transparent)]
    Photo(#[from] PhotoError),
}

/// One run through a survey: the fixed question order, the current position and
/// every answer collected so far.
///
/// Derived state (next-enabled flag, [`ScreenSnapshot`]) is computed on read.
/// Observers are notified after each mutation.
pub struct SurveySession {
    spec: SurveySpec,
    position: usize,
    answers: AnswerSet,
    observers: Vec<Box<dyn SessionObserver>>,
    photos: Option<Box<dyn PhotoLocatorProvider>>,
    last_next_enabled: bool,
}

impl fmt::Debug for SurveySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurveySession")
            .field("survey_id", &self.spec.id)
            .field("position", &self.position)
            .field("answers", &self.answers)
            .field("observers", &self.observers.len())
            .field("has_photo_provider", &self.photos.is_some())
            .finish()
    }
}

impl SurveySession {
    pub fn new(spec: SurveySpec) -> Result<Self, SpecError> {
        spec.check()?;
        let answers = AnswerSet::for_spec(&spec);
        let mut session = Self {
            spec,
            position: 0,
            answers,
            observers: Vec::new(),
            photos: None,
            last_next_enabled: false,
        };
        session.last_next_enabled = session.is_next_enabled();
        debug!(
            survey = %session.spec.id,
            questions = session.spec.len(),
            "survey session started"
        );
        Ok(session)
    }

    /// Attaches the external capability used by [`Self::new_photo_locator`].
    pub fn with_photo_provider(mut self, provider: impl PhotoLocatorProvider + 'static) -> Self {
        self.photos = Some(Box::new(provider));
        self
    }

    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn spec(&self) -> &SurveySpec {
        &self.spec
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current_question(&self) -> &QuestionSpec {
        &self.spec.questions[self.position]
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn answer(&self, question_id: &str) -> Option<&AnswerState> {
        self.answers.get(question_id)
    }

    pub fn scalar_answer(&self, question_id: &str) -> Option<f64> {
        match self.answers.get(question_id) {
            Some(AnswerState::Scalar(value)) => *value,
            _ => None,
        }
    }

    pub fn multi_answer(&self, question_id: &str) -> Option<&Selection> {
        match self.answers.get(question_id) {
            Some(AnswerState::MultiSelect(values)) => Some(values),
            _ => None,
        }
    }

    pub fn photo_answer(&self, question_id: &str) -> Option<&PhotoLocator> {
        match self.answers.get(question_id) {
            Some(AnswerState::Photo(locator)) => locator.as_ref(),
            _ => None,
        }
    }

    /// Handles a system back press. Returns `false` on the first question so the
    /// host can leave the survey; otherwise moves back one question.
    pub fn go_back(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.change_position(self.position - 1);
        true
    }

    /// Moves back one question.
    ///
    /// # Panics
    ///
    /// Panics on the first question. Callers guard this with
    /// [`ScreenSnapshot::show_previous`].
    pub fn go_to_previous(&mut self) {
        assert!(
            self.position > 0,
            "go_to_previous called on the first question"
        );
        self.change_position(self.position - 1);
    }

    /// Moves forward one question.
    ///
    /// # Panics
    ///
    /// Panics on the last question. Callers guard this with
    /// [`ScreenSnapshot::show_done`]; the position is never clamped.
    pub fn go_next(&mut self) {
        assert!(
            self.position + 1 < self.spec.len(),
            "go_next called on the last question ({} of {})",
            self.position + 1,
            self.spec.len()
        );
        self.change_position(self.position + 1);
    }

    /// Selects `value` in a multi-select answer when `selected`, drops one
    /// selection of it otherwise.
    pub fn set_multi_answer(
        &mut self,
        question_id: &str,
        value: i64,
        selected: bool,
    ) -> Result<(), SessionError> {
        if let AnswerState::MultiSelect(values) =
            self.state_mut(question_id, AnswerKind::MultiSelect)?
        {
            if selected {
                values.select(value);
            } else {
                values.deselect(value);
            }
        }
        trace!(question = question_id, value, selected, "multi-select answer");
        self.answer_changed(question_id);
        Ok(())
    }

    /// Replaces a scalar answer. NaN and infinities are rejected and leave the
    /// previous answer in place.
    pub fn set_scalar_answer(&mut self, question_id: &str, value: f64) -> Result<(), SessionError> {
        let state = self.state_mut(question_id, AnswerKind::Scalar)?;
        if !value.is_finite() {
            return Err(SessionError::NonFiniteScalar {
                question_id: question_id.to_string(),
                value,
            });
        }
        *state = AnswerState::Scalar(Some(value));
        trace!(question = question_id, value, "scalar answer");
        self.answer_changed(question_id);
        Ok(())
    }

    /// Replaces a photo answer.
    pub fn set_photo_answer(
        &mut self,
        question_id: &str,
        locator: PhotoLocator,
    ) -> Result<(), SessionError> {
        let state = self.state_mut(question_id, AnswerKind::Photo)?;
        trace!(question = question_id, locator = %locator, "photo answer");
        *state = AnswerState::Photo(Some(locator));
        self.answer_changed(question_id);
        Ok(())
    }

    /// Asks the configured provider for a fresh photo destination.
    pub fn new_photo_locator(&mut self) -> Result<PhotoLocator, SessionError> {
        let provider = self.photos.as_mut().ok_or(SessionError::NoPhotoProvider)?;
        let locator = provider.new_locator()?;
        debug!(locator = %locator, "allocated photo locator");
        Ok(locator)
    }

    /// Whether the current question has an answer.
    pub fn is_next_enabled(&self) -> bool {
        self.answers
            .get(&self.current_question().id)
            .is_some_and(AnswerState::is_answered)
    }

    pub fn snapshot(&self) -> ScreenSnapshot {
        ScreenSnapshot::at(self.position, self.spec.len(), &self.current_question().id)
    }

    pub fn completion_report(&self) -> CompletionReport {
        completion_report(&self.spec, &self.answers)
    }

    /// Hands the collected answers to `on_done`. Completion is not gated on
    /// every question being answered; see [`Self::completion_report`].
    pub fn complete<F>(&self, on_done: F)
    where
        F: FnOnce(&AnswerSet),
    {
        let report = self.completion_report();
        debug!(
            survey = %self.spec.id,
            answered = report.answered,
            total = report.total,
            "survey completed"
        );
        on_done(&self.answers);
    }

    fn state_mut(
        &mut self,
        question_id: &str,
        requested: AnswerKind,
    ) -> Result<&mut AnswerState, SessionError> {
        let state = self
            .answers
            .get_mut(question_id)
            .ok_or_else(|| SessionError::UnknownQuestion(question_id.to_string()))?;
        let declared = state.kind();
        if declared != requested {
            return Err(SessionError::KindMismatch {
                question_id: question_id.to_string(),
                expected: declared.as_str(),
                actual: requested.as_str(),
            });
        }
        Ok(state)
    }

    fn change_position(&mut self, position: usize) {
        debug!(from = self.position, to = position, "changing question");
        self.position = position;
        let snapshot = self.snapshot();
        self.emit(SessionEvent::PositionChanged(snapshot));
        self.refresh_next_enabled();
    }

    fn answer_changed(&mut self, question_id: &str) {
        self.emit(SessionEvent::AnswerChanged {
            question_id: question_id.to_string(),
        });
        self.refresh_next_enabled();
    }

    fn refresh_next_enabled(&mut self) {
        let enabled = self.is_next_enabled();
        if enabled != self.last_next_enabled {
            self.last_next_enabled = enabled;
            self.emit(SessionEvent::NextEnabledChanged(enabled));
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::jetsurvey;

    fn two_question_session() -> SurveySession {
        let mut spec = jetsurvey::survey();
        spec.questions.truncate(2);
        SurveySession::new(spec).expect("session")
    }

    #[test]
    fn new_rejects_empty_survey() {
        let mut spec = jetsurvey::survey();
        spec.questions.clear();
        assert!(matches!(
            SurveySession::new(spec),
            Err(SpecError::Empty(id)) if id == "jetsurvey"
        ));
    }

    #[test]
    fn scalar_answer_enables_next_and_done_on_last() {
        let mut session = two_question_session();
        assert!(!session.is_next_enabled());

        session
            .set_scalar_answer(jetsurvey::FEELING_ABOUT_SELFIES, 0.7)
            .expect("answer");
        assert!(session.is_next_enabled());
        assert_eq!(
            session.scalar_answer(jetsurvey::FEELING_ABOUT_SELFIES),
            Some(0.7)
        );

        session.go_next();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.position, 1);
        assert_eq!(snapshot.total_count, 2);
        assert!(snapshot.show_done);
        assert!(snapshot.show_previous);
        assert_eq!(snapshot.current_question, jetsurvey::FREE_TIME);
    }

    #[test]
    fn kind_mismatch_reports_declared_kind() {
        let mut session = two_question_session();
        let err = session
            .set_multi_answer(jetsurvey::FEELING_ABOUT_SELFIES, 1, true)
            .expect_err("mismatch");
        match err {
            SessionError::KindMismatch {
                question_id,
                expected,
                actual,
            } => {
                assert_eq!(question_id, jetsurvey::FEELING_ABOUT_SELFIES);
                assert_eq!(expected, "scalar");
                assert_eq!(actual, "multi_select");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn photo_locator_requires_provider() {
        let mut session = two_question_session();
        assert!(matches!(
            session.new_photo_locator(),
            Err(SessionError::NoPhotoProvider)
        ));
    }
}
