use std::cell::RefCell;
use std::rc::Rc;

use survey_spec::{
    AnswerState, PhotoError, PhotoLocator, PhotoLocatorProvider, Selection, SessionError,
    SessionEvent, SurveySession, SurveySpec, jetsurvey,
};

fn selfie_session() -> SurveySession {
    let spec = SurveySpec::from_json_str(include_str!("../tests/fixtures/selfie_form.json"))
        .expect("fixture");
    SurveySession::new(spec).expect("session")
}

fn two_questions() -> SurveySession {
    let spec = SurveySpec {
        questions: vec![jetsurvey::feeling_about_selfies(), jetsurvey::free_time()],
        ..jetsurvey::survey()
    };
    SurveySession::new(spec).expect("session")
}

struct CountingPhotos {
    issued: usize,
}

impl PhotoLocatorProvider for CountingPhotos {
    fn new_locator(&mut self) -> Result<PhotoLocator, PhotoError> {
        self.issued += 1;
        Ok(PhotoLocator::new(format!(
            "file:///cache/selfie-{}.jpg",
            self.issued
        )))
    }
}

struct BrokenPhotos;

impl PhotoLocatorProvider for BrokenPhotos {
    fn new_locator(&mut self) -> Result<PhotoLocator, PhotoError> {
        Err(PhotoError::Unavailable("no storage".into()))
    }
}

#[test]
fn example_walkthrough_enables_next_and_reaches_done() {
    let mut session = two_questions();
    assert_eq!(session.position(), 0);
    assert!(!session.is_next_enabled());
    assert!(!session.snapshot().show_done);

    session
        .set_scalar_answer(jetsurvey::FEELING_ABOUT_SELFIES, 0.7)
        .expect("scalar");
    assert!(session.is_next_enabled());

    session.go_next();
    let snapshot = session.snapshot();
    assert_eq!(snapshot.position, 1);
    assert!(snapshot.show_done);
    assert!(snapshot.show_previous);
    assert!(!session.is_next_enabled());
}

#[test]
fn go_back_on_first_question_is_a_no_op() {
    let mut session = two_questions();
    session
        .set_scalar_answer(jetsurvey::FEELING_ABOUT_SELFIES, 0.2)
        .expect("scalar");
    let before = session.answers().clone();

    assert!(!session.go_back());
    assert_eq!(session.position(), 0);
    assert_eq!(session.answers(), &before);
}

#[test]
fn go_back_moves_one_question() {
    let mut session = selfie_session();
    session.go_next();
    session.go_next();
    assert!(session.go_back());
    assert_eq!(session.position(), 1);
    assert!(session.go_back());
    assert!(!session.go_back());
    assert_eq!(session.position(), 0);
}

#[test]
#[should_panic(expected = "go_to_previous called on the first question")]
fn go_to_previous_on_first_question_panics() {
    let mut session = two_questions();
    session.go_to_previous();
}

#[test]
fn go_to_previous_moves_back_when_allowed() {
    let mut session = two_questions();
    session.go_next();
    assert!(session.snapshot().show_previous);
    session.go_to_previous();
    assert_eq!(session.position(), 0);
    assert!(!session.snapshot().show_previous);
}

#[test]
#[should_panic(expected = "go_next called on the last question")]
fn go_next_past_last_question_panics() {
    let mut session = two_questions();
    session.go_next();
    session.go_next();
}

#[test]
fn guarded_navigation_keeps_position_in_range() {
    let mut session = selfie_session();
    let total = session.spec().len();
    let script = [1, 1, -1, 1, 1, 1, -1, -1, -1, -1, 1, 1, 1, 1];
    for step in script {
        if step > 0 {
            if !session.snapshot().show_done {
                session.go_next();
            }
        } else {
            session.go_back();
        }
        assert!(session.position() < total);
        assert_eq!(session.snapshot().position, session.position());
    }
    assert!(session.snapshot().show_done);
}

#[test]
fn multi_select_toggle_round_trip_restores_set() {
    let mut session = two_questions();
    session
        .set_multi_answer(jetsurvey::FREE_TIME, 1, true)
        .expect("select");
    let before = session.multi_answer(jetsurvey::FREE_TIME).cloned();

    session
        .set_multi_answer(jetsurvey::FREE_TIME, 4, true)
        .expect("select");
    session
        .set_multi_answer(jetsurvey::FREE_TIME, 4, false)
        .expect("deselect");

    assert_eq!(session.multi_answer(jetsurvey::FREE_TIME).cloned(), before);
    assert_eq!(before, Some(Selection::from_iter([1])));
}

#[test]
fn multi_select_toggle_of_already_selected_value_restores_selection() {
    let mut session = two_questions();
    session
        .set_multi_answer(jetsurvey::FREE_TIME, 3, true)
        .expect("select");
    let before = session.answer(jetsurvey::FREE_TIME).cloned();

    session
        .set_multi_answer(jetsurvey::FREE_TIME, 3, true)
        .expect("select again");
    session
        .set_multi_answer(jetsurvey::FREE_TIME, 3, false)
        .expect("deselect");

    assert_eq!(session.answer(jetsurvey::FREE_TIME).cloned(), before);
    assert_eq!(
        before,
        Some(AnswerState::MultiSelect(Selection::from_iter([3])))
    );
    let selection = session.multi_answer(jetsurvey::FREE_TIME).expect("selection");
    assert!(selection.contains(3));
    assert_eq!(selection.times_selected(3), 1);
}

#[test]
fn non_finite_scalar_is_rejected_and_keeps_previous_answer() {
    let mut session = two_questions();
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = session
            .set_scalar_answer(jetsurvey::FEELING_ABOUT_SELFIES, value)
            .expect_err("non-finite");
        assert!(matches!(
            err,
            SessionError::NonFiniteScalar { ref question_id, .. }
                if question_id == jetsurvey::FEELING_ABOUT_SELFIES
        ));
        assert_eq!(session.scalar_answer(jetsurvey::FEELING_ABOUT_SELFIES), None);
        assert!(!session.is_next_enabled());
    }

    session
        .set_scalar_answer(jetsurvey::FEELING_ABOUT_SELFIES, 0.25)
        .expect("finite");
    session
        .set_scalar_answer(jetsurvey::FEELING_ABOUT_SELFIES, f64::NAN)
        .expect_err("non-finite");
    assert_eq!(
        session.scalar_answer(jetsurvey::FEELING_ABOUT_SELFIES),
        Some(0.25)
    );
    assert!(session.is_next_enabled());
    assert!(session.answers().to_json_pretty().is_ok());
}

#[test]
fn next_enabled_tracks_only_current_question() {
    let mut session = two_questions();
    session
        .set_multi_answer(jetsurvey::FREE_TIME, 0, true)
        .expect("select");
    assert!(!session.is_next_enabled());

    session
        .set_scalar_answer(jetsurvey::FEELING_ABOUT_SELFIES, 1.0)
        .expect("scalar");
    session.go_next();
    assert!(session.is_next_enabled());

    session
        .set_multi_answer(jetsurvey::FREE_TIME, 0, false)
        .expect("deselect");
    assert!(!session.is_next_enabled());
}

#[test]
fn unknown_question_is_rejected() {
    let mut session = two_questions();
    let err = session
        .set_scalar_answer("superhero", 2.0)
        .expect_err("unknown");
    assert!(matches!(err, SessionError::UnknownQuestion(id) if id == "superhero"));
}

#[test]
fn observers_receive_events_in_order() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let mut session = two_questions();
    session.subscribe(move |event: &SessionEvent| sink.borrow_mut().push(event.clone()));

    session
        .set_scalar_answer(jetsurvey::FEELING_ABOUT_SELFIES, 0.5)
        .expect("scalar");
    session
        .set_scalar_answer(jetsurvey::FEELING_ABOUT_SELFIES, 0.6)
        .expect("scalar");
    session.go_next();

    let events = events.borrow();
    assert_eq!(
        events[0],
        SessionEvent::AnswerChanged {
            question_id: jetsurvey::FEELING_ABOUT_SELFIES.into()
        }
    );
    assert_eq!(events[1], SessionEvent::NextEnabledChanged(true));
    assert_eq!(
        events[2],
        SessionEvent::AnswerChanged {
            question_id: jetsurvey::FEELING_ABOUT_SELFIES.into()
        }
    );
    match &events[3] {
        SessionEvent::PositionChanged(snapshot) => {
            assert_eq!(snapshot.position, 1);
            assert!(snapshot.show_done);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(events[4], SessionEvent::NextEnabledChanged(false));
    assert_eq!(events.len(), 5);
}

#[test]
fn complete_runs_callback_without_validation() {
    let session = two_questions();
    let mut seen = None;
    session.complete(|answers| seen = Some(answers.clone()));

    let answers = seen.expect("callback invoked");
    assert_eq!(answers.survey_id, "jetsurvey");
    let report = session.completion_report();
    assert!(!report.complete);
    assert_eq!(report.missing, vec!["feeling_about_selfies", "free_time"]);
}

#[test]
fn photo_answer_uses_provider_locator() {
    let mut session = selfie_session().with_photo_provider(CountingPhotos { issued: 0 });
    session.go_next();
    session.go_next();
    assert_eq!(session.current_question().id, "take_selfie");
    assert!(!session.is_next_enabled());

    let locator = session.new_photo_locator().expect("locator");
    assert_eq!(locator.as_str(), "file:///cache/selfie-1.jpg");
    session
        .set_photo_answer("take_selfie", locator.clone())
        .expect("photo");
    assert!(session.is_next_enabled());
    assert_eq!(session.photo_answer("take_selfie"), Some(&locator));
    assert_eq!(
        session.new_photo_locator().expect("locator").as_str(),
        "file:///cache/selfie-2.jpg"
    );
}

#[test]
fn photo_provider_errors_propagate() {
    let mut session = selfie_session().with_photo_provider(BrokenPhotos);
    let err = session.new_photo_locator().expect_err("broken");
    assert!(matches!(err, SessionError::Photo(PhotoError::Unavailable(_))));
    assert!(err.to_string().contains("no storage"));
}
