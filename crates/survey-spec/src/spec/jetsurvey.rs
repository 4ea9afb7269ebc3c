//! Built-in "jetsurvey" definition.
//!
//! [`survey`] returns the shipped ordering. The superhero, takeaway and selfie
//! questions are not shipped yet; [`extended`] appends them for configurations
//! that want to enable them.

use crate::spec::question::{AnswerKind, QuestionSpec};
use crate::spec::survey::SurveySpec;

pub const SURVEY_ID: &str = "jetsurvey";

pub const FEELING_ABOUT_SELFIES: &str = "feeling_about_selfies";
pub const FREE_TIME: &str = "free_time";
pub const FREE_TIME_NEXT: &str = "free_time_next";
pub const FREE_TIME_NEXT2: &str = "free_time_next2";
pub const FREE_TIME_NEXT3: &str = "free_time_next3";
pub const FREE_TIME_NEXT4: &str = "free_time_next4";
pub const SUPERHERO: &str = "superhero";
pub const LAST_TAKEAWAY: &str = "last_takeaway";
pub const TAKE_SELFIE: &str = "take_selfie";

const FREE_TIME_CHOICES: [&str; 6] = [
    "Read",
    "Work out",
    "Draw",
    "Play games",
    "Dance",
    "Watch movies",
];

const SUPERHEROES: [&str; 4] = ["Spark", "Lenz", "Bugchaos", "Frag"];

pub fn feeling_about_selfies() -> QuestionSpec {
    QuestionSpec::new(
        FEELING_ABOUT_SELFIES,
        AnswerKind::Scalar,
        "How do you feel about selfies?",
    )
    .with_description("Slide from 0 (dislike) to 1 (love).")
}

fn free_time_question(id: &str, title: &str) -> QuestionSpec {
    QuestionSpec::new(id, AnswerKind::MultiSelect, title)
        .with_description("Select all that apply.")
        .with_choices(FREE_TIME_CHOICES)
}

pub fn free_time() -> QuestionSpec {
    free_time_question(FREE_TIME, "What do you like to do in your free time?")
}

pub fn superhero() -> QuestionSpec {
    QuestionSpec::new(SUPERHERO, AnswerKind::Scalar, "Which superhero are you?")
        .with_description("Pick one; the answer is the choice index.")
        .with_choices(SUPERHEROES)
}

pub fn last_takeaway() -> QuestionSpec {
    QuestionSpec::new(
        LAST_TAKEAWAY,
        AnswerKind::Scalar,
        "When did you last order takeaway?",
    )
    .with_description("Epoch milliseconds of the order.")
}

pub fn take_selfie() -> QuestionSpec {
    QuestionSpec::new(TAKE_SELFIE, AnswerKind::Photo, "Take a selfie")
}

/// The shipped question order.
pub fn survey() -> SurveySpec {
    SurveySpec {
        id: SURVEY_ID.into(),
        title: "Jetsurvey".into(),
        version: "1.0.0".into(),
        description: Some("A short survey about how you spend your time.".into()),
        questions: vec![
            feeling_about_selfies(),
            free_time(),
            free_time_question(FREE_TIME_NEXT, "What else do you do in your free time?"),
            free_time_question(FREE_TIME_NEXT2, "What do you do on weekends?"),
            free_time_question(FREE_TIME_NEXT3, "What do you do on holidays?"),
            free_time_question(FREE_TIME_NEXT4, "What would you like to try?"),
        ],
    }
}

/// The shipped order followed by the unshipped questions.
pub fn extended() -> SurveySpec {
    let mut spec = survey();
    spec.questions.extend([superhero(), last_takeaway(), take_selfie()]);
    spec
}
