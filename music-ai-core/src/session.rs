//! Top-level view state and the lifetime of server-side sessions.
//!
//! Every result handed to the coordinator carries a session the server keeps
//! temporary files for. Whenever a held result is discarded, the coordinator
//! asks its [`SessionReleaser`] to drop that session, exactly once.

use std::sync::Arc;

use crate::i18n::Message;
use crate::types::AnalysisResult;

/// Fire-and-forget release of a server-side session.
///
/// Implementations must not block or report failure to the caller.
pub trait SessionReleaser {
    fn release(&self, session_id: &str);
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum RootState {
    #[default]
    Idle,
    Busy,
    Ready(Arc<AnalysisResult>),
    Failed(Message),
}

impl RootState {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        match self {
            Self::Ready(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Message> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// The upload widget stays up until a result replaces it, including while
    /// its own upload is in flight.
    pub fn shows_upload(&self) -> bool {
        !matches!(self, Self::Ready(_))
    }
}

pub struct Coordinator<R: SessionReleaser> {
    state: RootState,
    releaser: R,
}

impl<R: SessionReleaser> Coordinator<R> {
    pub fn new(releaser: R) -> Self {
        Self { state: RootState::Idle, releaser }
    }

    pub fn state(&self) -> &RootState {
        &self.state
    }

    /// A new upload started: drop any held result and any stale error.
    pub fn processing_started(&mut self) {
        self.replace(RootState::Busy);
    }

    /// Outcome of the in-flight upload. A result arriving when nothing is in
    /// flight is stale; its session is released and the state is kept.
    pub fn completed(&mut self, result: AnalysisResult) {
        if !self.state.is_busy() {
            log::warn!("Discarding stale analysis result {}", result.session_id);
            self.release(&result.session_id);
            return;
        }
        self.replace(RootState::Ready(Arc::new(result)));
    }

    pub fn failed(&mut self, message: impl Into<Message>) {
        self.replace(RootState::Failed(message.into()));
    }

    /// "New analysis": back to the picker.
    pub fn reset(&mut self) {
        self.replace(RootState::Idle);
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.state, RootState::Failed(_)) {
            self.state = RootState::Idle;
        }
    }

    /// The view is going away; release whatever is held.
    pub fn unmount(&mut self) {
        self.replace(RootState::Idle);
    }

    fn replace(&mut self, next: RootState) {
        let previous = std::mem::replace(&mut self.state, next);
        if let RootState::Ready(result) = previous {
            self.release(&result.session_id);
        }
    }

    fn release(&self, session_id: &str) {
        if session_id.is_empty() {
            return;
        }
        log::info!("Releasing session {session_id}");
        self.releaser.release(session_id);
    }
}

impl<R: SessionReleaser> Drop for Coordinator<R> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SAMPLE_RESPONSE;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingReleaser(Rc<RefCell<Vec<String>>>);

    impl SessionReleaser for RecordingReleaser {
        fn release(&self, session_id: &str) {
            self.0.borrow_mut().push(session_id.to_string());
        }
    }

    impl RecordingReleaser {
        fn calls(&self) -> Vec<String> {
            self.0.borrow().clone()
        }
    }

    fn result(session_id: &str) -> AnalysisResult {
        let mut r: AnalysisResult = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        r.session_id = session_id.to_string();
        r
    }

    #[test]
    fn test_new_upload_releases_held_session_once() {
        let releaser = RecordingReleaser::default();
        let mut c = Coordinator::new(releaser.clone());
        c.processing_started();
        c.completed(result("S1"));
        assert!(c.state().result().is_some());
        assert!(!c.state().shows_upload());
        assert!(releaser.calls().is_empty());

        c.processing_started();
        assert_eq!(releaser.calls(), vec!["S1"]);
        assert!(c.state().is_busy());
        assert!(c.state().result().is_none());

        c.completed(result("S3"));
        assert_eq!(releaser.calls(), vec!["S1"], "S1 released exactly once");
        assert_eq!(c.state().result().unwrap().session_id, "S3");
    }

    #[test]
    fn test_unmount_releases_once() {
        let releaser = RecordingReleaser::default();
        {
            let mut c = Coordinator::new(releaser.clone());
            c.processing_started();
            c.completed(result("S2"));
            c.unmount();
            assert_eq!(releaser.calls(), vec!["S2"]);
        }
        assert_eq!(releaser.calls(), vec!["S2"], "drop after unmount must not release again");
    }

    #[test]
    fn test_drop_releases_held_session() {
        let releaser = RecordingReleaser::default();
        {
            let mut c = Coordinator::new(releaser.clone());
            c.processing_started();
            c.completed(result("S2"));
        }
        assert_eq!(releaser.calls(), vec!["S2"]);
    }

    #[test]
    fn test_reset_releases_and_goes_idle() {
        let releaser = RecordingReleaser::default();
        let mut c = Coordinator::new(releaser.clone());
        c.processing_started();
        c.completed(result("S1"));
        c.reset();
        assert_eq!(*c.state(), RootState::Idle);
        c.reset();
        assert_eq!(releaser.calls(), vec!["S1"]);
    }

    #[test]
    fn test_busy_never_holds_result() {
        let mut c = Coordinator::new(RecordingReleaser::default());
        c.processing_started();
        assert!(c.state().is_busy() && c.state().result().is_none());
        c.completed(result("S1"));
        assert!(!c.state().is_busy() && c.state().result().is_some());
    }

    #[test]
    fn test_failure_then_dismiss() {
        let releaser = RecordingReleaser::default();
        let mut c = Coordinator::new(releaser.clone());
        c.processing_started();
        assert!(c.state().shows_upload());
        c.failed("Network Error");
        assert_eq!(c.state().error(), Some(&Message::from("Network Error")));
        assert!(c.state().result().is_none());
        assert!(c.state().shows_upload());
        c.dismiss_error();
        assert_eq!(*c.state(), RootState::Idle);
        assert!(releaser.calls().is_empty());
    }

    #[test]
    fn test_start_clears_stale_error() {
        let mut c = Coordinator::new(RecordingReleaser::default());
        c.failed("Invalid format");
        c.processing_started();
        assert_eq!(c.state().error(), None);
        assert!(c.state().is_busy());
    }

    #[test]
    fn test_dismiss_error_leaves_result_alone() {
        let releaser = RecordingReleaser::default();
        let mut c = Coordinator::new(releaser.clone());
        c.processing_started();
        c.completed(result("S1"));
        c.dismiss_error();
        assert!(c.state().result().is_some());
        assert!(releaser.calls().is_empty());
    }

    #[test]
    fn test_stale_completion_released_immediately() {
        let releaser = RecordingReleaser::default();
        let mut c = Coordinator::new(releaser.clone());
        c.completed(result("LATE"));
        assert_eq!(*c.state(), RootState::Idle);
        assert_eq!(releaser.calls(), vec!["LATE"]);
    }
}
