#![allow(missing_docs)]

pub mod answers;
pub mod observer;
pub mod photo;
pub mod render;
pub mod session;
pub mod snapshot;
pub mod spec;
pub mod validate;

pub use answers::{AnswerSet, AnswerState, Selection};
pub use observer::{SessionEvent, SessionObserver};
pub use photo::{PhotoError, PhotoLocator, PhotoLocatorProvider};
pub use render::{
    RenderProgress, RenderQuestion, ScreenPayload, build_screen_payload, render_json_ui,
    render_text,
};
pub use session::{SessionError, SurveySession};
pub use snapshot::ScreenSnapshot;
pub use spec::survey::survey_schema;
pub use spec::{AnswerKind, QuestionSpec, SpecError, SurveySpec, jetsurvey};
pub use validate::{CompletionReport, completion_report};
