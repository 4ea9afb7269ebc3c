use crate::snapshot::ScreenSnapshot;

/// Change notifications emitted by a session after each mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The position moved; carries the rebuilt snapshot.
    PositionChanged(ScreenSnapshot),
    /// An answer was written.
    AnswerChanged { question_id: String },
    /// The derived next-enabled flag flipped.
    NextEnabledChanged(bool),
}

/// Receives [`SessionEvent`]s synchronously, in mutation order.
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

impl<F> SessionObserver for F
where
    F: FnMut(&SessionEvent),
{
    fn on_event(&mut self, event: &SessionEvent) {
        self(event)
    }
}
