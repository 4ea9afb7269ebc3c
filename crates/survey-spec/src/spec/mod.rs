pub mod jetsurvey;
pub mod question;
pub mod survey;

pub use question::{AnswerKind, QuestionSpec};
pub use survey::{SpecError, SurveySpec};
